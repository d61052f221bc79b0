use super::canvas::Canvas;
use super::color::Color;
use super::effects::{colorize, get_effect, EffectStyle};
use crate::garden::Mode;
use strum::IntoEnumIterator;

const GRADIENT_TOP: Color = Color::new(15, 25, 50);
const GRADIENT_BOTTOM: Color = Color::new(40, 100, 160);
const DECORATION: Color = Color::new(80, 150, 80);
const PANEL: Color = Color::new(40, 60, 90);
const PANEL_BORDER: Color = Color::new(100, 150, 200);
const MODE_BOX: Color = Color::new(30, 50, 80);
const MODE_BORDER: Color = Color::new(120, 180, 220);
const KEY_CIRCLE: Color = Color::new(80, 120, 180);
const CONTROLS: Color = Color::new(20, 30, 50);
const CONTROLS_BORDER: Color = Color::new(80, 120, 160);
const CONNECTED: Color = Color::new(100, 255, 100);
const DISCONNECTED: Color = Color::new(255, 120, 120);
const DETAIL: Color = Color::new(200, 200, 200);
const HEADING: Color = Color::new(220, 220, 220);
const DESCRIPTION: Color = Color::new(180, 180, 180);
const DEVICE_CONTROL: Color = Color::new(255, 255, 100);
const FOOTER: Color = Color::new(120, 120, 120);

const TITLE: &str = "* MindGarden *";
const SUBTITLE: &str = "Brain-Controlled Relaxation Experience";
const FOOTER_TEXT: &str = "Developed for Brain-Computer Interface Research | Part 1: Software Prototype";

/// The first row of the first mode box. Each box takes four rows.
const MODES_ROW: u16 = 18;

/// The size the menu is laid out for, in pixels. Larger canvases center it.
const MENU_WIDTH: u16 = 110;
const MENU_HEIGHT: u16 = 70;

/// Where the menu layout sits on the canvas.
#[derive(Clone, Copy, Debug)]
struct Origin {
    x: i32,
    row: u16,
}

impl Origin {
    fn centered(canvas: &Canvas) -> Self {
        let x = (canvas.width() as i32 - MENU_WIDTH as i32) / 2;
        let row = canvas.rows().saturating_sub(MENU_HEIGHT / 2) / 2;
        Self { x, row }
    }

    fn px(self, x: i32) -> i32 {
        x + self.x
    }

    fn py(self, y: i32) -> i32 {
        y + self.row as i32 * 2
    }

    fn col(self, col: u16) -> u16 {
        (col as i32 + self.x).max(0) as u16
    }

    fn row(self, row: u16) -> u16 {
        row + self.row
    }
}

/// Draw the start menu.
pub(crate) fn draw(canvas: &mut Canvas, device_connected: bool, phase: f32) {
    canvas.vertical_gradient(GRADIENT_TOP, GRADIENT_BOTTOM);
    let at = Origin::centered(canvas);

    let title = colorize(get_effect(EffectStyle::Rainbow).as_ref(), TITLE, phase);
    canvas.colored_text_centered(at.row(3), &title, Color::new(120, 255, 120));
    let subtitle = colorize(get_effect(EffectStyle::Wave).as_ref(), SUBTITLE, phase);
    canvas.colored_text_centered(at.row(5), &subtitle, Color::new(180, 220, 180));

    canvas.outline_circle(at.px(20), at.py(20), 4, DECORATION);
    canvas.outline_circle(at.px(90), at.py(25), 3, DECORATION);
    canvas.outline_circle(at.px(15), at.py(40), 3, DECORATION);

    draw_device_panel(canvas, at, device_connected);

    canvas.text_centered(at.row(16), "Select Experience Mode:", HEADING);
    for (index, mode) in Mode::iter().enumerate() {
        draw_mode_box(canvas, at, mode, MODES_ROW + index as u16 * 4);
    }

    draw_controls(canvas, at, device_connected);
    canvas.text_centered(at.row(MENU_HEIGHT / 2 - 1), FOOTER_TEXT, FOOTER);
}

fn draw_device_panel(canvas: &mut Canvas, at: Origin, device_connected: bool) {
    canvas.fill_rect(at.px(35), at.py(17), 40, 8, PANEL);
    canvas.outline_rect(at.px(35), at.py(17), 40, 8, PANEL_BORDER);
    let (status, color, detail) = if device_connected {
        ("[ON] EEG Device: Connected", CONNECTED, "Ready for brain-computer interface")
    } else {
        ("[OFF] EEG Device: Not Connected", DISCONNECTED, "Using keyboard simulation mode")
    };
    canvas.text_centered(at.row(9), status, color);
    canvas.text_centered(at.row(11), detail, DETAIL);
}

fn draw_mode_box(canvas: &mut Canvas, at: Origin, mode: Mode, row: u16) {
    let y = at.py(row as i32 * 2);
    canvas.fill_rect(at.px(20), y, 70, 8, MODE_BOX);
    canvas.outline_rect(at.px(20), y, 70, 8, MODE_BORDER);

    canvas.fill_ellipse(at.px(22) as f32, y as f32 + 2.0, 5.0, 5.0, KEY_CIRCLE, 255);
    canvas.text(at.col(24), at.row(row + 2), &mode.key().to_string(), Color::WHITE);

    canvas.text(at.col(30), at.row(row + 1), &format!(">> {}", mode.title()), Color::WHITE);
    canvas.text(at.col(30), at.row(row + 2), mode.description(), DESCRIPTION);
}

fn draw_controls(canvas: &mut Canvas, at: Origin, device_connected: bool) {
    canvas.fill_rect(at.px(25), at.py(60), 60, 8, CONTROLS);
    canvas.outline_rect(at.px(25), at.py(60), 60, 8, CONTROLS_BORDER);
    let action = if device_connected { "Disconnect" } else { "Connect" };
    canvas.text_centered(at.row(31), &format!("[D] {action} EEG Device (Demo)"), DEVICE_CONTROL);
    canvas.text_centered(at.row(32), "[ESC] Exit Application", DETAIL);
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn row_text(canvas: &Canvas, row: u16) -> String {
        (0..canvas.width()).map(|col| canvas.cell(col, row).ch).collect()
    }

    fn menu(device_connected: bool) -> Canvas {
        let mut canvas = Canvas::new(110, 70);
        draw(&mut canvas, device_connected, 0.0);
        canvas
    }

    #[rstest]
    #[case(false, "[OFF] EEG Device: Not Connected", "[D] Connect EEG Device (Demo)")]
    #[case(true, "[ON] EEG Device: Connected", "[D] Disconnect EEG Device (Demo)")]
    fn device_status(#[case] connected: bool, #[case] status: &str, #[case] control: &str) {
        let canvas = menu(connected);
        assert!(row_text(&canvas, 9).contains(status));
        assert!(row_text(&canvas, 31).contains(control));
    }

    #[test]
    fn lists_every_mode() {
        let canvas = menu(false);
        assert!(row_text(&canvas, 3).contains(TITLE));
        assert!(row_text(&canvas, 19).contains(">> Static Tree Evolution"));
        assert!(row_text(&canvas, 23).contains(">> Animated Meditation"));
        assert!(row_text(&canvas, 27).contains(">> Health & Wellness"));
        assert_eq!(canvas.cell(24, 28).ch, '3');
        assert!(row_text(&canvas, 34).contains("Part 1: Software Prototype"));
    }

    #[rstest]
    #[case::narrowest(90, 70)]
    #[case::large(160, 100)]
    fn layout_follows_canvas(#[case] width: u16, #[case] height: u16) {
        let mut canvas = Canvas::new(width, height);
        draw(&mut canvas, false, 0.0);
        let top = (canvas.rows() - MENU_HEIGHT / 2) / 2;
        let rows: Vec<String> = (0..canvas.rows()).map(|row| row_text(&canvas, row)).collect();
        assert!(rows[top as usize + 3].contains(TITLE));
        assert!(rows[top as usize + 9].contains("[OFF] EEG Device: Not Connected"));
        for (index, mode) in Mode::iter().enumerate() {
            let row = &rows[top as usize + 19 + index * 4];
            assert!(row.contains(&format!(">> {}", mode.title())), "{row}");
            assert!(rows[top as usize + 20 + index * 4].contains(mode.description()));
        }
        assert!(rows[top as usize + 31].contains("[D] Connect EEG Device (Demo)"));
        assert!(rows[top as usize + 34].contains("Part 1: Software Prototype"));
    }

    #[test]
    fn status_is_colored() {
        let canvas = menu(true);
        let col = row_text(&canvas, 9).chars().position(|ch| ch == '[').expect("status missing") as u16;
        assert_eq!(canvas.cell(col, 9).fg, CONNECTED);
    }
}

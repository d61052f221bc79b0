use super::canvas::{Canvas, Cell};
use super::color::Color;
use crossterm::{
    cursor,
    event::{KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags},
    queue,
    style::{Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal::{self, ClearType},
};
use std::io::{self, Stdout, Write};

/// The terminal, switched into an alternate screen for as long as this lives.
pub(crate) struct Surface {
    stdout: Stdout,
    /// What's on screen, used to only print cells that changed.
    previous: Vec<Cell>,
    size: (u16, u16),
    enhanced_keyboard: bool,
}

impl Surface {
    pub(crate) fn new() -> io::Result<Self> {
        let mut stdout = io::stdout();
        terminal::enable_raw_mode()?;
        queue!(stdout, terminal::EnterAlternateScreen, cursor::Hide, terminal::Clear(ClearType::All))?;

        // Key release events let held keys keep signaling, but not every terminal reports them.
        let enhanced_keyboard = terminal::supports_keyboard_enhancement().unwrap_or(false);
        if enhanced_keyboard {
            queue!(stdout, PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES))?;
        }
        stdout.flush()?;

        let size = terminal::size()?;
        Ok(Self { stdout, previous: Vec::new(), size, enhanced_keyboard })
    }

    /// Whether the terminal reports key releases.
    pub(crate) fn reports_key_releases(&self) -> bool {
        self.enhanced_keyboard
    }

    /// Forget what's on screen, so the next frame is printed in full.
    pub(crate) fn resized(&mut self, columns: u16, rows: u16) -> io::Result<()> {
        self.size = (columns, rows);
        self.previous.clear();
        queue!(self.stdout, ResetColor, terminal::Clear(ClearType::All))?;
        self.stdout.flush()
    }

    /// Print a canvas centered on the screen.
    pub(crate) fn present(&mut self, canvas: &Canvas) -> io::Result<()> {
        let (columns, rows) = self.size;
        let offset_x = columns.saturating_sub(canvas.width()) / 2;
        let offset_y = rows.saturating_sub(canvas.rows()) / 2;
        let visible_columns = canvas.width().min(columns);
        let visible_rows = canvas.rows().min(rows);

        let full_redraw = self.previous.len() != canvas.width() as usize * canvas.rows() as usize;
        if full_redraw {
            self.previous = vec![Cell { ch: '\0', fg: Color::BLACK, bg: Color::BLACK }; canvas.width() as usize * canvas.rows() as usize];
        }

        let mut last_colors: Option<(Color, Color)> = None;
        for row in 0..visible_rows {
            let mut cursor_in_place = false;
            for col in 0..visible_columns {
                let cell = canvas.cell(col, row);
                let index = row as usize * canvas.width() as usize + col as usize;
                if self.previous[index] == cell {
                    cursor_in_place = false;
                    continue;
                }
                self.previous[index] = cell;

                if !cursor_in_place {
                    queue!(self.stdout, cursor::MoveTo(offset_x + col, offset_y + row))?;
                    cursor_in_place = true;
                }
                if last_colors != Some((cell.fg, cell.bg)) {
                    queue!(self.stdout, SetForegroundColor(cell.fg.into()), SetBackgroundColor(cell.bg.into()))?;
                    last_colors = Some((cell.fg, cell.bg));
                }
                queue!(self.stdout, Print(cell.ch))?;
            }
        }
        queue!(self.stdout, ResetColor)?;
        self.stdout.flush()
    }

    /// Ring the terminal bell.
    pub(crate) fn bell(&mut self) -> io::Result<()> {
        queue!(self.stdout, Print('\x07'))?;
        self.stdout.flush()
    }
}

impl Drop for Surface {
    fn drop(&mut self) {
        if self.enhanced_keyboard {
            let _ = queue!(self.stdout, PopKeyboardEnhancementFlags);
        }
        let _ = queue!(self.stdout, ResetColor, cursor::Show, terminal::LeaveAlternateScreen);
        let _ = self.stdout.flush();
        let _ = terminal::disable_raw_mode();
    }
}

/// Restore the terminal before the default panic message is printed, so it stays readable.
pub(crate) fn install_panic_hook() {
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        restore();
        original_hook(info);
    }));
}

fn restore() {
    let mut stdout = io::stdout();
    let _ = queue!(stdout, PopKeyboardEnhancementFlags, ResetColor, cursor::Show, terminal::LeaveAlternateScreen);
    let _ = stdout.flush();
    let _ = terminal::disable_raw_mode();
}

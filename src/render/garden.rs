use super::canvas::Canvas;
use super::color::Color;
use super::effects::{colorize, get_effect, EffectStyle};
use crate::garden::{DropCue, Mode, RelaxationMachine};
use crate::scene::sky::{sky_color, ANIMATED_BACKDROP, HEALTH_BACKDROP};
use crate::scene::tree::{draw_static_tree, TreeStage};
use crate::scene::Scene;
use std::time::Instant;

const INSTRUCTIONS: Color = Color::WHITE;
const HEALTH_TRACK: Color = Color::new(180, 180, 180);
const HEALTH_FILL: Color = Color::new(0, 255, 0);

/// Draw the garden for the current state of the machine.
pub(crate) fn draw(
    canvas: &mut Canvas,
    machine: &RelaxationMachine,
    scene: &mut Scene,
    device_connected: bool,
    phase: f32,
    now: Instant,
) {
    let mode = machine.mode();
    let progress = machine.state().progress();
    match mode {
        Mode::StaticGrowth => {
            canvas.clear(sky_color(progress));
            draw_static_tree(canvas, progress, scene.trees.as_mut());
        }
        Mode::AnimatedFrame | Mode::HealthMeter => {
            canvas.clear(if mode == Mode::HealthMeter { HEALTH_BACKDROP } else { ANIMATED_BACKDROP });
            let max_width = canvas.width() as f32 * 0.55;
            let max_height = canvas.height() as f32 * 0.6;
            if let Some(index) = machine.frame_index() {
                scene.animation.draw(canvas, index, max_width, max_height);
            }
        }
    }
    if mode == Mode::HealthMeter {
        draw_health_bar(canvas, progress);
    }

    scene.leaves.draw(canvas);
    scene.drops.draw(canvas);

    for (row, line) in instructions(mode, progress, device_connected).iter().enumerate() {
        canvas.text(1, row as u16 + 1, line, INSTRUCTIONS);
    }

    if machine.show_relaxed_message(now) {
        let effect = get_effect(EffectStyle::Breathe);
        let message = colorize(effect.as_ref(), &machine.profile().relaxed_message, phase);
        canvas.colored_text_centered(message_row(canvas), &message, Color::new(255, 255, 0));
    }
}

/// The row of the relaxed message, a third of the way down.
fn message_row(canvas: &Canvas) -> u16 {
    canvas.rows() / 3
}

fn draw_health_bar(canvas: &mut Canvas, health: f32) {
    let width = canvas.width() as i32;
    let height = canvas.height() as i32;
    let bar_width = width * 2 / 11;
    let x = (width - bar_width) / 2;
    let y = height - 4;
    let filled = (bar_width as f32 * health / 100.0).round() as i32;
    canvas.fill_rect(x, y, bar_width, 2, HEALTH_TRACK);
    canvas.fill_rect(x, y, filled, 2, HEALTH_FILL);

    let label = format!("Health: {}/100", health.round() as u32);
    canvas.text_centered(canvas.rows().saturating_sub(4), &label, Color::WHITE);
}

fn instructions(mode: Mode, progress: f32, device_connected: bool) -> Vec<String> {
    let device = format!("Device: {}", if device_connected { "Connected" } else { "Keyboard Mode" });
    let mut lines: Vec<String> = match mode {
        Mode::StaticGrowth => vec![
            "[C] Calm -> Grow tree slowly +".into(),
            "[B] Blink -> Water tree ~".into(),
            "Too many [B] -> Stress -> Shrink !".into(),
            "Tree evolves: Small->Medium->Large".into(),
            format!("Current stage: {}", TreeStage::for_height(progress).name()),
        ],
        Mode::AnimatedFrame => {
            vec!["[C] Calm -> Tree grows +".into(), "[B] Blink -> Tree grows/shrinks *".into()]
        }
        Mode::HealthMeter => {
            vec!["[C] Calm -> Health + +".into(), "[B] Blink -> Health grows/shrinks *".into()]
        }
    };
    lines.extend([device, "[R] Reset".into(), "[1,2,3] Change Mode".into(), "[ESC] Quit".into()]);
    lines
}

/// Where a water drop starts on the canvas. Drops start higher the further the garden has grown.
pub(crate) fn drop_origin(canvas: &Canvas, cue: DropCue) -> (f32, f32) {
    let x = canvas.width() as f32 / 2.0;
    let y = canvas.height() as f32 * (0.8 - 0.6 * cue.level.clamp(0.0, 1.0));
    (x, y)
}

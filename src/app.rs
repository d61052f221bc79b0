use crate::assets;
use crate::config::Config;
use crate::garden::{BlinkVerdict, Mode, RelaxationMachine};
use crate::input::{Command, KeyLatch, Screen};
use crate::render::canvas::Canvas;
use crate::render::terminal::{self, Surface};
use crate::render::{garden, menu};
use crate::scene::Scene;
use anyhow::Context;
use crossterm::event::{self, Event};
use std::ops::ControlFlow;
use std::time::Instant;

/// How far the text effects move every tick, in degrees.
const PHASE_STEP: f32 = 4.0;

/// The running application: the terminal, the garden and everything in between.
pub struct App {
    config: Config,
    surface: Surface,
    canvas: Canvas,
    latch: KeyLatch,
    device_connected: bool,
    phase: f32,
}

impl App {
    /// Take over the terminal.
    pub fn new(config: Config) -> anyhow::Result<Self> {
        terminal::install_panic_hook();
        let surface = Surface::new().context("setting up the terminal")?;
        let latch = KeyLatch::new(surface.reports_key_releases());
        let canvas = Canvas::new(config.window.width, config.window.height);
        tracing::debug!("terminal reports key releases: {}", surface.reports_key_releases());
        Ok(Self { config, surface, canvas, latch, device_connected: false, phase: 0.0 })
    }

    /// Show the menu unless a mode was picked up front, then run the garden until the player quits.
    pub fn run(mut self, mode: Option<Mode>) -> anyhow::Result<()> {
        let mode = match mode {
            Some(mode) => mode,
            None => match self.run_menu()? {
                Some(mode) => mode,
                None => return Ok(()),
            },
        };
        self.run_garden(mode)
    }

    fn run_menu(&mut self) -> anyhow::Result<Option<Mode>> {
        let interval = self.config.tick_interval();
        loop {
            menu::draw(&mut self.canvas, self.device_connected, self.phase);
            self.surface.present(&self.canvas)?;

            let deadline = Instant::now() + interval;
            while let Some(event) = next_event(deadline)? {
                let Some(command) = self.handle_event(event, Screen::Menu)? else {
                    continue;
                };
                match command {
                    Command::Quit => return Ok(None),
                    Command::SwitchMode(mode) => {
                        tracing::info!("selected {mode} mode, device connected: {}", self.device_connected);
                        self.latch.clear();
                        return Ok(Some(mode));
                    }
                    Command::ToggleDevice => {
                        self.device_connected = !self.device_connected;
                        tracing::info!("device connected: {}", self.device_connected);
                    }
                    Command::Reset => (),
                }
            }
            self.phase += PHASE_STEP;
        }
    }

    fn run_garden(&mut self, mode: Mode) -> anyhow::Result<()> {
        let (trees, animation) = assets::load_or_fallback(&self.config.assets);
        let mut profiles = self.config.profiles();
        profiles.fit_frames(animation.len());
        let mut scene = Scene::new(&self.config, trees, animation);
        let mut machine = RelaxationMachine::new(mode, profiles, self.config.machine_settings());
        tracing::info!("starting {mode} mode");

        let interval = self.config.tick_interval();
        let mut deadline = Instant::now() + interval;
        loop {
            while let Some(event) = next_event(deadline)? {
                let Some(command) = self.handle_event(event, Screen::Garden)? else {
                    continue;
                };
                if apply_garden_command(command, &mut machine, &mut scene, &mut self.latch).is_break() {
                    return Ok(());
                }
            }

            let now = Instant::now();
            let signals = self.latch.take_signals();
            let outcome = machine.tick(signals, now);
            for cue in &outcome.drops {
                let (x, y) = garden::drop_origin(&self.canvas, *cue);
                scene.drops.spawn(x, y);
            }
            if !outcome.drops.is_empty() && self.config.decorations.bell_on_water {
                self.surface.bell()?;
            }
            if outcome.blink == Some(BlinkVerdict::Stress) {
                tracing::debug!("stress: {} blinks in the window", machine.state().recent_blinks());
            }
            if outcome.relaxed_entered {
                tracing::info!("relaxed in {} mode", machine.mode());
            }

            scene.update();
            garden::draw(&mut self.canvas, &machine, &mut scene, self.device_connected, self.phase, now);
            self.surface.present(&self.canvas)?;

            self.phase += PHASE_STEP;
            deadline += interval;
            // Don't try to catch up after a stall.
            if deadline < now {
                deadline = now + interval;
            }
        }
    }

    fn handle_event(&mut self, event: Event, screen: Screen) -> anyhow::Result<Option<Command>> {
        match event {
            Event::Key(key) => Ok(self.latch.observe(&key, screen)),
            Event::Resize(columns, rows) => {
                self.surface.resized(columns, rows)?;
                Ok(None)
            }
            _ => Ok(None),
        }
    }
}

/// Carry out a command given in the garden. Breaks when the player quits.
///
/// Starting over also drops any calm or blink presses still pending, so they don't leak into the
/// fresh state.
fn apply_garden_command(
    command: Command,
    machine: &mut RelaxationMachine,
    scene: &mut Scene,
    latch: &mut KeyLatch,
) -> ControlFlow<()> {
    match command {
        Command::Quit => {
            tracing::info!("quitting at progress {:.1}", machine.state().progress());
            return ControlFlow::Break(());
        }
        Command::Reset => {
            machine.reset();
            scene.drops.clear();
            latch.clear();
            tracing::info!("reset {} mode", machine.mode());
        }
        Command::SwitchMode(mode) => {
            machine.switch_mode(mode);
            scene.drops.clear();
            latch.clear();
            tracing::info!("switched to {mode} mode");
        }
        Command::ToggleDevice => (),
    }
    ControlFlow::Continue(())
}

/// Wait for the next terminal event, giving up at `deadline`.
fn next_event(deadline: Instant) -> anyhow::Result<Option<Event>> {
    let timeout = deadline.saturating_duration_since(Instant::now());
    if event::poll(timeout).context("polling terminal events")? {
        return Ok(Some(event::read().context("reading terminal event")?));
    }
    Ok(None)
}

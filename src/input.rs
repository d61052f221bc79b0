use crate::garden::{Mode, Signals};
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Something the player asked for, besides calm and blink.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Command {
    Quit,
    Reset,
    SwitchMode(Mode),
    ToggleDevice,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Signal {
    Calm,
    Blink,
}

/// Where key presses are going.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Screen {
    Menu,
    Garden,
}

/// Collects key events between ticks and turns them into signals.
///
/// A signal is asserted on a tick if its key was pressed or auto-repeated since the previous tick.
/// When the terminal reports releases, a key also keeps asserting its signal for as long as it's
/// held down.
#[derive(Debug, Default)]
pub(crate) struct KeyLatch {
    track_held: bool,
    pressed: Signals,
    held: Signals,
}

impl KeyLatch {
    pub(crate) fn new(track_held: bool) -> Self {
        Self { track_held, ..Default::default() }
    }

    /// Process a key event, returning the command it triggers, if any.
    pub(crate) fn observe(&mut self, event: &KeyEvent, screen: Screen) -> Option<Command> {
        if let Some(signal) = signal_for(event, screen) {
            let pressed = matches!(event.kind, KeyEventKind::Press | KeyEventKind::Repeat);
            if pressed {
                set(&mut self.pressed, signal, true);
            }
            if self.track_held {
                set(&mut self.held, signal, event.kind != KeyEventKind::Release);
            }
            return None;
        }
        if event.kind == KeyEventKind::Release {
            return None;
        }
        command_for(event, screen)
    }

    /// The signals for the tick that's about to run. Presses are consumed, held keys are not.
    pub(crate) fn take_signals(&mut self) -> Signals {
        let pressed = std::mem::take(&mut self.pressed);
        Signals { calm: pressed.calm || self.held.calm, blink: pressed.blink || self.held.blink }
    }

    /// Forget everything, such as when switching screens.
    pub(crate) fn clear(&mut self) {
        self.pressed = Signals::default();
        self.held = Signals::default();
    }
}

fn set(signals: &mut Signals, signal: Signal, value: bool) {
    match signal {
        Signal::Calm => signals.calm = value,
        Signal::Blink => signals.blink = value,
    }
}

fn lowercase_char(event: &KeyEvent) -> Option<char> {
    match event.code {
        KeyCode::Char(c) => Some(c.to_ascii_lowercase()),
        _ => None,
    }
}

fn signal_for(event: &KeyEvent, screen: Screen) -> Option<Signal> {
    if screen != Screen::Garden || event.modifiers.contains(KeyModifiers::CONTROL) {
        return None;
    }
    match lowercase_char(event)? {
        'c' => Some(Signal::Calm),
        'b' => Some(Signal::Blink),
        _ => None,
    }
}

fn command_for(event: &KeyEvent, screen: Screen) -> Option<Command> {
    if event.code == KeyCode::Esc {
        return Some(Command::Quit);
    }
    let c = lowercase_char(event)?;
    if event.modifiers.contains(KeyModifiers::CONTROL) {
        return (c == 'c').then_some(Command::Quit);
    }
    if let Some(mode) = Mode::from_key(c) {
        return Some(Command::SwitchMode(mode));
    }
    match (c, screen) {
        ('q', _) => Some(Command::Quit),
        ('r', Screen::Garden) => Some(Command::Reset),
        ('d', Screen::Menu) => Some(Command::ToggleDevice),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn press(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE)
    }

    fn release(c: char) -> KeyEvent {
        KeyEvent::new_with_kind(KeyCode::Char(c), KeyModifiers::NONE, KeyEventKind::Release)
    }

    #[test]
    fn presses_last_one_tick() {
        let mut latch = KeyLatch::new(false);
        latch.observe(&press('c'), Screen::Garden);
        latch.observe(&press('B'), Screen::Garden);
        assert_eq!(latch.take_signals(), Signals::both());
        assert_eq!(latch.take_signals(), Signals::default());
    }

    #[test]
    fn held_keys_keep_signaling() {
        let mut latch = KeyLatch::new(true);
        latch.observe(&press('c'), Screen::Garden);
        assert_eq!(latch.take_signals(), Signals::calm());
        assert_eq!(latch.take_signals(), Signals::calm());

        latch.observe(&release('c'), Screen::Garden);
        assert_eq!(latch.take_signals(), Signals::default());
    }

    #[test]
    fn press_and_release_within_a_tick_still_counts() {
        let mut latch = KeyLatch::new(true);
        latch.observe(&press('b'), Screen::Garden);
        latch.observe(&release('b'), Screen::Garden);
        assert_eq!(latch.take_signals(), Signals::blink());
        assert_eq!(latch.take_signals(), Signals::default());
    }

    #[test]
    fn releases_ignored_without_tracking() {
        let mut latch = KeyLatch::new(false);
        latch.observe(&release('c'), Screen::Garden);
        assert_eq!(latch.take_signals(), Signals::default());
    }

    #[test]
    fn signals_only_in_garden() {
        let mut latch = KeyLatch::new(false);
        assert_eq!(latch.observe(&press('c'), Screen::Menu), None);
        assert_eq!(latch.take_signals(), Signals::default());
    }

    #[rstest]
    #[case::escape(KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE), Screen::Garden, Some(Command::Quit))]
    #[case::ctrl_c(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL), Screen::Garden, Some(Command::Quit))]
    #[case::q(press('q'), Screen::Menu, Some(Command::Quit))]
    #[case::reset(press('r'), Screen::Garden, Some(Command::Reset))]
    #[case::reset_in_menu(press('r'), Screen::Menu, None)]
    #[case::device(press('d'), Screen::Menu, Some(Command::ToggleDevice))]
    #[case::device_in_garden(press('d'), Screen::Garden, None)]
    #[case::mode(press('3'), Screen::Garden, Some(Command::SwitchMode(Mode::HealthMeter)))]
    #[case::menu_mode(press('1'), Screen::Menu, Some(Command::SwitchMode(Mode::StaticGrowth)))]
    #[case::released(release('r'), Screen::Garden, None)]
    fn commands(#[case] event: KeyEvent, #[case] screen: Screen, #[case] expected: Option<Command>) {
        let mut latch = KeyLatch::new(true);
        assert_eq!(latch.observe(&event, screen), expected);
    }
}

use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// Blink timestamps within a trailing time window, oldest first.
#[derive(Clone, Debug)]
pub(crate) struct BlinkWindow {
    span: Duration,
    times: VecDeque<Instant>,
}

impl BlinkWindow {
    pub(crate) fn new(span: Duration) -> Self {
        Self { span, times: VecDeque::new() }
    }

    /// Forget every blink that is `span` or more older than `now`.
    pub(crate) fn purge(&mut self, now: Instant) {
        while let Some(oldest) = self.times.front() {
            if now.saturating_duration_since(*oldest) < self.span {
                break;
            }
            self.times.pop_front();
        }
    }

    /// Record a blink and return how many blinks are now in the window.
    pub(crate) fn record(&mut self, now: Instant) -> usize {
        self.times.push_back(now);
        self.times.len()
    }

    pub(crate) fn len(&self) -> usize {
        self.times.len()
    }

    #[cfg(test)]
    pub(crate) fn is_empty(&self) -> bool {
        self.times.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(base: Instant, seconds: f64) -> Instant {
        base + Duration::from_secs_f64(seconds)
    }

    #[test]
    fn purge_drops_expired_entries() {
        let base = Instant::now();
        let mut window = BlinkWindow::new(Duration::from_secs(3));
        for t in [0.0, 1.0, 2.0, 3.0] {
            window.record(at(base, t));
        }
        window.purge(at(base, 4.1));
        assert_eq!(window.len(), 2);
    }

    #[test]
    fn entry_exactly_span_old_expires() {
        let base = Instant::now();
        let mut window = BlinkWindow::new(Duration::from_secs(3));
        window.record(base);
        window.purge(at(base, 3.0));
        assert!(window.is_empty());
    }

    #[test]
    fn record_counts() {
        let base = Instant::now();
        let mut window = BlinkWindow::new(Duration::from_secs(3));
        assert_eq!(window.record(base), 1);
        assert_eq!(window.record(at(base, 0.5)), 2);
    }
}

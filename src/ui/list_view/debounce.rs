use std::time::{Duration, Instant};

/// Single-shot restartable timer. Arming it again before it fires drops
/// the pending action; the timer is driven by whoever owns it calling
/// [`DebounceTimer::fire_due`] with the current time.
#[derive(Debug, Clone)]
pub struct DebounceTimer<A> {
    pending: Option<Pending<A>>,
}

#[derive(Debug, Clone)]
struct Pending<A> {
    deadline: Instant,
    action: A,
}

impl<A> Default for DebounceTimer<A> {
    fn default() -> Self {
        Self { pending: None }
    }
}

impl<A> DebounceTimer<A> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arms the timer to release `action` once `delay` has elapsed after
    /// `now`, cancelling whatever was pending.
    pub fn schedule(&mut self, now: Instant, delay: Duration, action: A) {
        self.pending = Some(Pending {
            deadline: now + delay,
            action,
        });
    }

    /// Takes the pending action if its deadline has been reached.
    pub fn fire_due(&mut self, now: Instant) -> Option<A> {
        match &self.pending {
            Some(pending) if pending.deadline <= now => {
                self.pending.take().map(|pending| pending.action)
            }
            _ => None,
        }
    }

    /// Drops the pending action without firing it.
    pub fn cancel(&mut self) -> Option<A> {
        self.pending.take().map(|pending| pending.action)
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|pending| pending.deadline)
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DELAY: Duration = Duration::from_millis(500);

    #[test]
    fn nothing_fires_before_the_deadline() {
        let start = Instant::now();
        let mut timer = DebounceTimer::new();
        timer.schedule(start, DELAY, "a");

        assert_eq!(timer.fire_due(start + Duration::from_millis(499)), None);
        assert!(timer.is_pending());
        assert_eq!(timer.fire_due(start + DELAY), Some("a"));
        assert!(!timer.is_pending());
    }

    #[test]
    fn rescheduling_cancels_the_previous_action() {
        let start = Instant::now();
        let mut timer = DebounceTimer::new();
        timer.schedule(start, DELAY, "first");
        timer.schedule(start + Duration::from_millis(300), DELAY, "second");

        assert_eq!(timer.fire_due(start + DELAY), None);
        assert_eq!(
            timer.deadline(),
            Some(start + Duration::from_millis(800))
        );
        assert_eq!(
            timer.fire_due(start + Duration::from_millis(800)),
            Some("second")
        );
    }

    #[test]
    fn fires_only_once() {
        let start = Instant::now();
        let mut timer = DebounceTimer::new();
        timer.schedule(start, DELAY, 1);

        assert_eq!(timer.fire_due(start + DELAY * 2), Some(1));
        assert_eq!(timer.fire_due(start + DELAY * 3), None);
    }

    #[test]
    fn cancelled_action_never_fires() {
        let start = Instant::now();
        let mut timer = DebounceTimer::new();
        timer.schedule(start, DELAY, "a");

        assert_eq!(timer.cancel(), Some("a"));
        assert_eq!(timer.deadline(), None);
        assert_eq!(timer.fire_due(start + DELAY), None);
        assert_eq!(timer.cancel(), None);
    }
}

//! Stopwatch session owned by the top unit loop

use super::events::Event;
use super::machine::State;

/// The one timing session of a top unit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct StopwatchSession {
    state: State,
}

impl Default for StopwatchSession {
    fn default() -> Self {
        Self::new()
    }
}

impl StopwatchSession {
    pub const fn new() -> Self {
        Self {
            state: State::Waiting,
        }
    }

    pub fn state(&self) -> State {
        self.state
    }

    /// Apply an event; returns true if the state changed
    pub fn apply(&mut self, event: Event) -> bool {
        let next = self.state.transition(event);
        let changed = next != self.state;
        self.state = next;
        changed
    }

    /// Time to show at `now_ms`
    ///
    /// Running sessions report live elapsed time, stopped sessions the frozen
    /// final time, waiting sessions nothing.
    pub fn elapsed_at(&self, now_ms: u32) -> Option<u32> {
        match self.state {
            State::Waiting => None,
            State::Running { started_at_ms } => Some(now_ms.wrapping_sub(started_at_ms)),
            State::Stopped { elapsed_ms } => Some(elapsed_ms),
        }
    }

    pub fn final_elapsed(&self) -> Option<u32> {
        self.state.final_elapsed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_run() {
        let mut session = StopwatchSession::new();
        assert_eq!(session.elapsed_at(100), None);

        assert!(session.apply(Event::StartReceived { at_ms: 100 }));
        assert_eq!(session.elapsed_at(1_100), Some(1_000));

        assert!(session.apply(Event::StopPressed { at_ms: 5_100 }));
        assert_eq!(session.final_elapsed(), Some(5_000));
        // Frozen regardless of time passing
        assert_eq!(session.elapsed_at(60_000), Some(5_000));

        assert!(session.apply(Event::ResetReceived));
        assert_eq!(session.state(), State::Waiting);
        assert_eq!(session.final_elapsed(), None);
    }

    #[test]
    fn test_ignored_event_reports_no_change() {
        let mut session = StopwatchSession::new();
        assert!(!session.apply(Event::StopPressed { at_ms: 10 }));
        assert!(!session.apply(Event::ResetReceived));
    }

    #[test]
    fn test_final_elapsed_set_once() {
        let mut session = StopwatchSession::new();
        session.apply(Event::StartReceived { at_ms: 0 });
        session.apply(Event::StopPressed { at_ms: 4_000 });
        session.apply(Event::StopPressed { at_ms: 9_000 });
        session.apply(Event::StartReceived { at_ms: 9_500 });
        assert_eq!(session.final_elapsed(), Some(4_000));
    }
}

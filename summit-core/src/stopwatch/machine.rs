//! Stopwatch state machine definition
//!
//! What the top unit shows is a function of the current state and the
//! current time.

use super::events::Event;

/// Session states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum State {
    /// No run in progress; waiting for START
    Waiting,
    /// Clock running since `started_at_ms`
    Running { started_at_ms: u32 },
    /// Clock stopped; final time frozen on the display
    Stopped { elapsed_ms: u32 },
}

impl State {
    /// Check if the clock is running
    pub fn is_running(&self) -> bool {
        matches!(self, State::Running { .. })
    }

    pub fn is_waiting(&self) -> bool {
        matches!(self, State::Waiting)
    }

    /// Final time, only present once stopped
    pub fn final_elapsed(&self) -> Option<u32> {
        match self {
            State::Stopped { elapsed_ms } => Some(*elapsed_ms),
            _ => None,
        }
    }

    /// Process an event and return the next state
    ///
    /// START is only honoured while waiting; a stray START during or after a
    /// run must not overwrite the climber's time. RESET works from anywhere.
    pub fn transition(self, event: Event) -> Self {
        use Event::*;
        use State::*;

        match (self, event) {
            (Waiting, StartReceived { at_ms }) => Running { started_at_ms: at_ms },

            (Running { started_at_ms }, StopPressed { at_ms }) => Stopped {
                elapsed_ms: at_ms.wrapping_sub(started_at_ms),
            },

            (_, ResetReceived) => Waiting,

            // Default: stay in current state
            _ => self,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_start_from_waiting() {
        let next = State::Waiting.transition(Event::StartReceived { at_ms: 500 });
        assert_eq!(next, State::Running { started_at_ms: 500 });
    }

    #[test]
    fn test_only_start_leaves_waiting() {
        let events = [Event::StopPressed { at_ms: 10 }, Event::ResetReceived];
        for event in events {
            assert_eq!(State::Waiting.transition(event), State::Waiting);
        }
    }

    #[test]
    fn test_stop_computes_elapsed() {
        let running = State::Running { started_at_ms: 1_000 };
        let stopped = running.transition(Event::StopPressed { at_ms: 13_345 });
        assert_eq!(stopped, State::Stopped { elapsed_ms: 12_345 });
        assert_eq!(stopped.final_elapsed(), Some(12_345));
    }

    #[test]
    fn test_stop_across_clock_wrap() {
        let running = State::Running {
            started_at_ms: u32::MAX - 99,
        };
        let stopped = running.transition(Event::StopPressed { at_ms: 100 });
        assert_eq!(stopped, State::Stopped { elapsed_ms: 200 });
    }

    #[test]
    fn test_reset_from_any_state() {
        let states = [
            State::Waiting,
            State::Running { started_at_ms: 5 },
            State::Stopped { elapsed_ms: 42 },
        ];

        for state in states {
            assert_eq!(state.transition(Event::ResetReceived), State::Waiting);
        }
    }

    #[test]
    fn test_stop_only_matters_while_running() {
        let stopped = State::Stopped { elapsed_ms: 42 };
        assert_eq!(stopped.transition(Event::StopPressed { at_ms: 99 }), stopped);
    }

    #[test]
    fn test_start_ignored_outside_waiting() {
        let running = State::Running { started_at_ms: 5 };
        assert_eq!(running.transition(Event::StartReceived { at_ms: 50 }), running);

        let stopped = State::Stopped { elapsed_ms: 42 };
        assert_eq!(stopped.transition(Event::StartReceived { at_ms: 50 }), stopped);
    }

    #[test]
    fn test_final_elapsed_only_when_stopped() {
        assert_eq!(State::Waiting.final_elapsed(), None);
        assert_eq!(State::Running { started_at_ms: 0 }.final_elapsed(), None);
    }
}

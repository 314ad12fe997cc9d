//! Property tests for formatting, debouncing, and link health

use proptest::prelude::*;

use summit_core::display::Readout;
use summit_core::input::{Debouncer, Edge};
use summit_core::link::{LinkChange, LinkHealth};
use summit_core::stopwatch::{Event, State};

proptest! {
    #[test]
    fn readout_never_decreases(ms in 0u32..100_000) {
        let now = Readout::from_millis(ms).centiseconds();
        let next = Readout::from_millis(ms + 1).centiseconds();
        prop_assert!(next >= now);
        prop_assert_eq!(now, ms / 10);
    }

    #[test]
    fn readout_clamps_from_100_seconds(ms in 100_000u32..) {
        prop_assert_eq!(Readout::from_millis(ms), Readout::MAX);
    }

    #[test]
    fn readout_digits_in_range(ms: u32) {
        let r = Readout::from_millis(ms);
        prop_assert!(r.tens <= 9 && r.ones <= 9 && r.tenths <= 9 && r.hundredths <= 9);
    }

    /// Chatter that never holds longer than the window is silent
    #[test]
    fn bounce_inside_window_is_silent(
        window in 1u32..50,
        runs in prop::collection::vec(0u32..50, 1..32),
    ) {
        let mut button = Debouncer::new(window);
        let mut t = 0u32;
        let mut level = false;
        for run in runs {
            level = !level;
            let hold = run.min(window);
            for offset in 0..=hold {
                prop_assert_eq!(button.update(level, t + offset), None);
            }
            t += hold + 1;
        }
        prop_assert!(!button.is_pressed());
    }

    /// A level held past the window gives exactly one edge
    #[test]
    fn held_transition_emits_once(window in 0u32..50, polls in 2usize..40) {
        let mut button = Debouncer::new(window);
        let mut edges = 0;
        button.update(true, 0);
        for i in 1..=polls as u32 {
            if let Some(edge) = button.update(true, window + i) {
                prop_assert_eq!(edge, Edge::Pressed);
                edges += 1;
            }
        }
        prop_assert_eq!(edges, 1);
    }

    #[test]
    fn only_start_leaves_waiting(at_ms: u32) {
        let stopped = State::Waiting.transition(Event::StopPressed { at_ms });
        prop_assert_eq!(stopped, State::Waiting);
        let next = State::Waiting.transition(Event::StartReceived { at_ms });
        prop_assert!(next.is_running());
    }

    #[test]
    fn link_lost_exactly_once(heard: u32, extra in 1u32..10_000, checks in 1usize..20) {
        let mut link = LinkHealth::new(1000, 3000);
        link.message_received(heard);

        let mut losses = 0;
        for i in 0..checks as u32 {
            let now = heard.wrapping_add(3000 + extra + i);
            if link.check_timeout(now) == Some(LinkChange::Lost) {
                losses += 1;
            }
        }
        prop_assert_eq!(losses, 1);

        let back = heard.wrapping_add(20_000);
        prop_assert_eq!(link.message_received(back), Some(LinkChange::Connected));
    }
}

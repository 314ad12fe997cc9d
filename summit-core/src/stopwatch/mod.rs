//! Stopwatch session for the top unit
//!
//! The state machine is explicit, finite, and deterministic. Timing data
//! lives inside the states, so a final time only exists once the clock has
//! been stopped.

pub mod events;
pub mod machine;
pub mod session;

pub use events::Event;
pub use machine::State;
pub use session::StopwatchSession;

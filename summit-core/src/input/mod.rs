//! Button input handling

pub mod debounce;

pub use debounce::{Debouncer, Edge};

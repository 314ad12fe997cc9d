//! Radio link monitoring

pub mod health;

pub use health::{LinkChange, LinkHealth};

//! Summit link protocol
//!
//! This crate defines the datagrams exchanged between the bottom unit
//! (start pad + reset button) and the top unit (stop button + display).
//! The transport is ESP-NOW, so every datagram already has a boundary and
//! needs no framing of its own.
//!
//! # Wire format
//!
//! Every message is a fixed 8-byte record, laid out like the C struct the
//! first generation of the units used:
//! ```text
//! ┌───────────────┬────────────────────┐
//! │ KIND (i32 LE) │ TIMESTAMP (u32 LE) │
//! │ 4B            │ 4B                 │
//! └───────────────┴────────────────────┘
//! ```
//!
//! The timestamp is the sender's monotonic millisecond clock. The receiver
//! never compares it against its own clock; it is informational only.

#![no_std]
#![deny(unsafe_code)]

pub mod address;
pub mod messages;

pub use address::PeerAddress;
pub use messages::{DecodeError, LinkMessage, MessageKind, MESSAGE_LEN};

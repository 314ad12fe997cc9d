//! Inter-task communication channels
//!
//! The radio tasks and the unit loop only meet here, so the loop never
//! runs concurrently with message handling.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;

use summit_protocol::LinkMessage;

/// Channel capacity for decoded inbound messages
const INBOUND_CHANNEL_SIZE: usize = 8;

/// Channel capacity for messages waiting to be sent
const OUTBOUND_CHANNEL_SIZE: usize = 8;

/// A decoded message and the local time it arrived
#[derive(Debug, Clone, Copy, PartialEq, Eq, defmt::Format)]
pub struct Inbound {
    pub message: LinkMessage,
    pub received_ms: u32,
}

/// Messages from the peer, drained once per loop tick
pub static INBOUND: Channel<CriticalSectionRawMutex, Inbound, INBOUND_CHANNEL_SIZE> =
    Channel::new();

/// Messages for the peer, sent by the link TX task
pub static OUTBOUND: Channel<CriticalSectionRawMutex, LinkMessage, OUTBOUND_CHANNEL_SIZE> =
    Channel::new();

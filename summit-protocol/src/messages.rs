//! Message types for the Summit link
//!
//! Direction of use:
//! - Bottom → Top: START, RESET, PONG
//! - Top → Bottom: PING, PONG

// Message kind codes
pub const KIND_START: i32 = 1;
pub const KIND_RESET: i32 = 2;
pub const KIND_PING: i32 = 3;
pub const KIND_PONG: i32 = 4;

/// Size of an encoded message in bytes
pub const MESSAGE_LEN: usize = 8;

/// Errors that can occur while decoding a datagram
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DecodeError {
    /// Datagram is not exactly [`MESSAGE_LEN`] bytes
    WrongLength(usize),
    /// Kind code is not one of the known kinds
    UnknownKind(i32),
}

/// Kind of a link message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MessageKind {
    /// Climber left the start pad; top unit starts timing
    Start,
    /// Operator pressed reset; top unit clears and waits
    Reset,
    /// Heartbeat request
    Ping,
    /// Heartbeat response
    Pong,
}

impl MessageKind {
    /// Parse a kind from its wire code
    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            KIND_START => Some(MessageKind::Start),
            KIND_RESET => Some(MessageKind::Reset),
            KIND_PING => Some(MessageKind::Ping),
            KIND_PONG => Some(MessageKind::Pong),
            _ => None,
        }
    }

    /// Convert to wire code
    pub fn code(self) -> i32 {
        match self {
            MessageKind::Start => KIND_START,
            MessageKind::Reset => KIND_RESET,
            MessageKind::Ping => KIND_PING,
            MessageKind::Pong => KIND_PONG,
        }
    }

    /// Returns true for heartbeat traffic (PING/PONG)
    pub fn is_heartbeat(&self) -> bool {
        matches!(self, MessageKind::Ping | MessageKind::Pong)
    }
}

/// A single link datagram
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LinkMessage {
    /// What the message asks for
    pub kind: MessageKind,
    /// Sender's monotonic clock at send time (ms)
    pub timestamp_ms: u32,
}

impl LinkMessage {
    /// Create a message of the given kind
    pub const fn new(kind: MessageKind, timestamp_ms: u32) -> Self {
        Self { kind, timestamp_ms }
    }

    pub const fn start(timestamp_ms: u32) -> Self {
        Self::new(MessageKind::Start, timestamp_ms)
    }

    pub const fn reset(timestamp_ms: u32) -> Self {
        Self::new(MessageKind::Reset, timestamp_ms)
    }

    pub const fn ping(timestamp_ms: u32) -> Self {
        Self::new(MessageKind::Ping, timestamp_ms)
    }

    pub const fn pong(timestamp_ms: u32) -> Self {
        Self::new(MessageKind::Pong, timestamp_ms)
    }

    /// Encode into the fixed 8-byte wire record
    pub fn encode(&self) -> [u8; MESSAGE_LEN] {
        let mut buffer = [0u8; MESSAGE_LEN];
        buffer[..4].copy_from_slice(&self.kind.code().to_le_bytes());
        buffer[4..].copy_from_slice(&self.timestamp_ms.to_le_bytes());
        buffer
    }

    /// Decode a received datagram
    pub fn decode(bytes: &[u8]) -> Result<Self, DecodeError> {
        if bytes.len() != MESSAGE_LEN {
            return Err(DecodeError::WrongLength(bytes.len()));
        }

        let mut code = [0u8; 4];
        code.copy_from_slice(&bytes[..4]);
        let code = i32::from_le_bytes(code);

        let mut timestamp = [0u8; 4];
        timestamp.copy_from_slice(&bytes[4..]);

        let kind = MessageKind::from_code(code).ok_or(DecodeError::UnknownKind(code))?;

        Ok(Self {
            kind,
            timestamp_ms: u32::from_le_bytes(timestamp),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_start() {
        let bytes = LinkMessage::start(0x0102_0304).encode();
        assert_eq!(bytes, [1, 0, 0, 0, 0x04, 0x03, 0x02, 0x01]);
    }

    #[test]
    fn test_decode_pong() {
        let msg = LinkMessage::decode(&[4, 0, 0, 0, 0xE8, 0x03, 0, 0]).unwrap();
        assert_eq!(msg.kind, MessageKind::Pong);
        assert_eq!(msg.timestamp_ms, 1000);
    }

    #[test]
    fn test_decode_wrong_length() {
        assert_eq!(
            LinkMessage::decode(&[1, 0, 0, 0]),
            Err(DecodeError::WrongLength(4))
        );
        assert_eq!(
            LinkMessage::decode(&[0u8; 12]),
            Err(DecodeError::WrongLength(12))
        );
    }

    #[test]
    fn test_decode_unknown_kind() {
        let result = LinkMessage::decode(&[9, 0, 0, 0, 0, 0, 0, 0]);
        assert_eq!(result, Err(DecodeError::UnknownKind(9)));

        let negative = (-1i32).to_le_bytes();
        let mut bytes = [0u8; MESSAGE_LEN];
        bytes[..4].copy_from_slice(&negative);
        assert_eq!(
            LinkMessage::decode(&bytes),
            Err(DecodeError::UnknownKind(-1))
        );
    }

    #[test]
    fn test_kind_codes_match_legacy_units() {
        assert_eq!(MessageKind::Start.code(), 1);
        assert_eq!(MessageKind::Reset.code(), 2);
        assert_eq!(MessageKind::Ping.code(), 3);
        assert_eq!(MessageKind::Pong.code(), 4);
        assert_eq!(MessageKind::from_code(0), None);
    }

    #[test]
    fn test_is_heartbeat() {
        assert!(MessageKind::Ping.is_heartbeat());
        assert!(MessageKind::Pong.is_heartbeat());
        assert!(!MessageKind::Start.is_heartbeat());
        assert!(!MessageKind::Reset.is_heartbeat());
    }

    #[test]
    fn test_roundtrip_max_timestamp() {
        let message = LinkMessage::reset(u32::MAX);
        let parsed = LinkMessage::decode(&message.encode()).unwrap();
        assert_eq!(message, parsed);
    }
}

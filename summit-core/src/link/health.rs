//! Link health tracker
//!
//! Liveness heuristic for the radio link, not a handshake. The top unit
//! sends a PING every heartbeat interval whether or not the peer is
//! connected, and treats any inbound message as proof of life.

/// Connection change reported to the unit loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LinkChange {
    /// First message after silence
    Connected,
    /// Silence exceeded the timeout
    Lost,
}

/// Link health state owned by the top unit
#[derive(Debug, Clone)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LinkHealth {
    heartbeat_interval_ms: u32,
    timeout_ms: u32,
    /// Time the last heartbeat went out
    last_sent_ms: Option<u32>,
    /// Time anything was last heard from the peer
    last_heard_ms: Option<u32>,
    connected: bool,
}

impl LinkHealth {
    pub const fn new(heartbeat_interval_ms: u32, timeout_ms: u32) -> Self {
        Self {
            heartbeat_interval_ms,
            timeout_ms,
            last_sent_ms: None,
            last_heard_ms: None,
            connected: false,
        }
    }

    /// Check if a heartbeat should go out now
    pub fn heartbeat_due(&self, now_ms: u32) -> bool {
        match self.last_sent_ms {
            None => true,
            Some(sent) => now_ms.wrapping_sub(sent) >= self.heartbeat_interval_ms,
        }
    }

    /// Record that a heartbeat was sent
    pub fn heartbeat_sent(&mut self, now_ms: u32) {
        self.last_sent_ms = Some(now_ms);
    }

    /// Record an inbound message of any kind
    ///
    /// Returns `Connected` only on the transition from disconnected.
    pub fn message_received(&mut self, now_ms: u32) -> Option<LinkChange> {
        self.last_heard_ms = Some(now_ms);

        if self.connected {
            None
        } else {
            self.connected = true;
            Some(LinkChange::Connected)
        }
    }

    /// Check for receive silence longer than the timeout
    ///
    /// Returns `Lost` once per loss; further calls stay quiet until the
    /// peer is heard again.
    pub fn check_timeout(&mut self, now_ms: u32) -> Option<LinkChange> {
        if !self.connected {
            return None;
        }

        let heard = self.last_heard_ms?;
        if now_ms.wrapping_sub(heard) > self.timeout_ms {
            self.connected = false;
            Some(LinkChange::Lost)
        } else {
            None
        }
    }

    /// Check if the peer is considered connected
    pub fn is_connected(&self) -> bool {
        self.connected
    }
}

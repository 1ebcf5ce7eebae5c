//! Host link liveness

/// Whether the host is talking to us
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ConnectionState {
    /// Set by inbound traffic, cleared only by the timeout check
    pub connected: bool,
    /// Time of the last inbound line (ms)
    pub last_activity: u32,
}

impl ConnectionState {
    /// Disconnected, with the inactivity clock starting at `now`
    pub fn new(now: u32) -> Self {
        Self {
            connected: false,
            last_activity: now,
        }
    }

    /// Record an inbound line
    ///
    /// Returns true if this re-established the link.
    pub fn record_activity(&mut self, now: u32) -> bool {
        self.last_activity = now;
        let reconnected = !self.connected;
        self.connected = true;
        reconnected
    }

    /// Milliseconds since the last inbound line
    pub fn idle_ms(&self, now: u32) -> u32 {
        now.wrapping_sub(self.last_activity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_activity_connects() {
        let mut conn = ConnectionState::new(0);
        assert!(!conn.connected);
        assert!(conn.record_activity(100));
        assert!(!conn.record_activity(200));
        assert_eq!(conn.idle_ms(350), 150);
    }

    #[test]
    fn test_idle_wraps() {
        let mut conn = ConnectionState::new(0);
        conn.record_activity(u32::MAX - 9);
        assert_eq!(conn.idle_ms(10), 20);
    }
}

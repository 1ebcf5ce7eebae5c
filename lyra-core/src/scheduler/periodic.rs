//! Next-due tick gate

/// Fires once per period
///
/// Timestamps are wrapping `u32` milliseconds; comparisons stay correct
/// across the wrap as long as periods are under ~24 days.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Periodic {
    period_ms: u32,
    next_due: u32,
}

impl Periodic {
    /// First due `period_ms` after `now`
    pub const fn new(period_ms: u32, now: u32) -> Self {
        Self {
            period_ms,
            next_due: now.wrapping_add(period_ms),
        }
    }

    /// Period in milliseconds
    pub fn period_ms(&self) -> u32 {
        self.period_ms
    }

    /// Push the next due time to one period after `now`
    pub fn restart(&mut self, now: u32) {
        self.next_due = now.wrapping_add(self.period_ms);
    }

    /// Whether the gate would fire at `now`
    pub fn is_due(&self, now: u32) -> bool {
        now.wrapping_sub(self.next_due) as i32 >= 0
    }

    /// Fire if due, rescheduling from `now`
    ///
    /// A late poll fires once, not once per missed period.
    pub fn poll(&mut self, now: u32) -> bool {
        if self.is_due(now) {
            self.restart(now);
            true
        } else {
            false
        }
    }
}

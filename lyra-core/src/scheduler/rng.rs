//! Pseudo-random source for equalizer jitter

/// 64-bit linear congruential generator
///
/// Plenty for visual noise; not for anything that needs real randomness.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Lcg(u64);

impl Lcg {
    /// Seeded generator
    pub const fn new(seed: u64) -> Self {
        Self(seed)
    }

    /// Next 32 random bits
    pub fn next_u32(&mut self) -> u32 {
        self.0 = self
            .0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        // High bits of an LCG are the well-mixed ones
        (self.0 >> 32) as u32
    }

    /// Uniform value in `-amplitude..=amplitude`
    pub fn delta(&mut self, amplitude: u8) -> i8 {
        let span = 2 * amplitude as u32 + 1;
        (self.next_u32() % span) as i8 - amplitude as i8
    }
}

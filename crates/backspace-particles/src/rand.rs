//! Lightweight xorshift32 PRNG - no external crate needed

/// Source of uniform samples in `[0, 1)`.
///
/// The simulation only ever needs unit-interval samples; tests substitute a
/// scripted source to make bounces and spawn velocities exact.
pub trait UniformSource {
    fn next_unit(&mut self) -> f32;
}

/// Default seed, used when the host does not supply one
pub const DEFAULT_SEED: u32 = 0xDEAD_BEEF;

pub struct ParticleRng {
    state: u32,
}

impl Default for ParticleRng {
    fn default() -> Self {
        Self::new(DEFAULT_SEED)
    }
}

impl ParticleRng {
    pub fn new(seed: u32) -> Self {
        Self {
            state: if seed == 0 { 1 } else { seed },
        }
    }

    fn next_u32(&mut self) -> u32 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        self.state = x;
        x
    }

    /// Returns a float in [0, 1)
    pub fn next_f32(&mut self) -> f32 {
        // 24 significant bits so the result can never round up to 1.0
        (self.next_u32() >> 8) as f32 / (1u32 << 24) as f32
    }
}

impl UniformSource for ParticleRng {
    fn next_unit(&mut self) -> f32 {
        self.next_f32()
    }
}

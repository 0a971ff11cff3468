//! Injectable random source for combat rolls.
//!
//! Every probabilistic decision in an encounter (hit rolls, crits, procs,
//! monster action choice) draws from exactly one [`RandomSource`] handed to
//! the encounter. Production wraps a wall-clock seeded [`PcgRng`]; tests
//! substitute a [`SequenceRng`] to script each draw.

/// Source of uniform random values.
pub trait RandomSource {
    /// Next raw 32-bit value.
    fn next_u32(&mut self) -> u32;

    /// Uniform value in `[0, 1)`.
    fn next_unit(&mut self) -> f64 {
        f64::from(self.next_u32()) / (f64::from(u32::MAX) + 1.0)
    }

    /// Uniform integer in `[0, bound)`. Returns 0 when `bound` is 0.
    fn below(&mut self, bound: u32) -> u32 {
        if bound == 0 {
            return 0;
        }
        let value = (self.next_unit() * f64::from(bound)) as u32;
        value.min(bound - 1)
    }

    /// Bernoulli trial: true with probability `probability`.
    fn chance(&mut self, probability: f64) -> bool {
        self.next_unit() < probability
    }
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    fn next_u32(&mut self) -> u32 {
        (**self).next_u32()
    }

    fn next_unit(&mut self) -> f64 {
        (**self).next_unit()
    }
}

/// PCG random number generator (Permuted Congruential Generator).
///
/// PCG-XSH-RR: 64 bits of LCG state, 32-bit permuted output.
///
/// # Properties
///
/// - **Deterministic**: Same seed always produces the same sequence
/// - **Fast**: Single multiply + xorshift + rotate
/// - **Small state**: Only 64 bits
#[derive(Clone, Debug)]
pub struct PcgRng {
    state: u64,
}

impl PcgRng {
    /// PCG multiplier constant.
    const MULTIPLIER: u64 = 6364136223846793005;

    /// PCG increment constant.
    const INCREMENT: u64 = 1442695040888963407;

    /// Creates a generator from an explicit seed.
    pub fn seeded(seed: u64) -> Self {
        let mut rng = Self {
            state: seed.wrapping_add(Self::INCREMENT),
        };
        rng.step();
        rng
    }

    /// Creates a generator seeded from the wall clock.
    pub fn from_time() -> Self {
        use std::time::{SystemTime, UNIX_EPOCH};

        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| elapsed.as_nanos() as u64)
            .unwrap_or(0);
        Self::seeded(nanos)
    }

    /// Advance the LCG state by one step.
    #[inline]
    fn step(&mut self) {
        self.state = self
            .state
            .wrapping_mul(Self::MULTIPLIER)
            .wrapping_add(Self::INCREMENT);
    }

    /// XSH-RR output permutation.
    #[inline]
    fn output(state: u64) -> u32 {
        let xorshifted = (((state >> 18) ^ state) >> 27) as u32;
        let rot = (state >> 59) as u32;
        xorshifted.rotate_right(rot)
    }
}

impl RandomSource for PcgRng {
    fn next_u32(&mut self) -> u32 {
        let old = self.state;
        self.step();
        Self::output(old)
    }
}

/// Scripted random source: returns the given unit values in order, cycling.
///
/// Values are clamped into `[0, 1)` so a script can never produce an
/// out-of-range draw.
#[derive(Clone, Debug)]
pub struct SequenceRng {
    values: Vec<f64>,
    cursor: usize,
}

impl SequenceRng {
    pub fn new(values: impl Into<Vec<f64>>) -> Self {
        let values = values.into();
        assert!(!values.is_empty(), "SequenceRng needs at least one value");
        Self { values, cursor: 0 }
    }

    /// Number of draws consumed so far.
    pub fn draws(&self) -> usize {
        self.cursor
    }
}

impl RandomSource for SequenceRng {
    fn next_u32(&mut self) -> u32 {
        (self.next_unit() * (f64::from(u32::MAX) + 1.0)) as u32
    }

    fn next_unit(&mut self) -> f64 {
        let value = self.values[self.cursor % self.values.len()];
        self.cursor += 1;
        value.clamp(0.0, 0.999_999_999)
    }
}

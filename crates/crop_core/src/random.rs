use rand::Rng;

/// Uniform integer source used for yield rolls.
pub trait RandomSource {
    /// Uniform draw from `min..=max`. Callers guarantee `min <= max`.
    fn uniform(&mut self, min: u32, max: u32) -> u32;
}

impl<R: Rng + ?Sized> RandomSource for R {
    fn uniform(&mut self, min: u32, max: u32) -> u32 {
        self.gen_range(min..=max)
    }
}

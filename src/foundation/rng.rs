use rand::{Rng as _, SeedableRng as _};
use rand_pcg::Pcg64;

/// Seeded randomness provider. Every random draw in the crate flows through
/// this wrapper so a fixed seed reproduces a composition exactly.
#[derive(Clone, Debug)]
pub struct Rng {
    inner: Pcg64,
}

impl Rng {
    pub fn seed_from_u64(seed: u64) -> Self {
        Self {
            inner: Pcg64::seed_from_u64(seed),
        }
    }

    /// Uniform in [0, 1).
    pub fn unit(&mut self) -> f64 {
        self.inner.random::<f64>()
    }

    /// Uniform in [lo, hi).
    pub fn range(&mut self, lo: f64, hi: f64) -> f64 {
        if lo >= hi {
            return lo;
        }
        self.inner.random_range(lo..hi)
    }

    /// Bernoulli trial; probability clamped into [0, 1].
    pub fn chance(&mut self, p: f64) -> bool {
        self.unit() < p.clamp(0.0, 1.0)
    }

    /// Uniform pick from a non-empty slice.
    pub fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        debug_assert!(!items.is_empty());
        let idx = (self.unit() * items.len() as f64) as usize;
        &items[idx.min(items.len() - 1)]
    }

    /// Gaussian sample via the Marsaglia polar method (no cached spare, so
    /// the draw count per call is unbounded but the stream stays seeded).
    pub fn gaussian(&mut self, mean: f64, sd: f64) -> f64 {
        loop {
            let u = self.range(-1.0, 1.0);
            let v = self.range(-1.0, 1.0);
            let s = u * u + v * v;
            if s > 0.0 && s < 1.0 {
                return mean + sd * u * (-2.0 * s.ln() / s).sqrt();
            }
        }
    }
}

//! Running total modulo the output prime

/// Output modulus: the prime 1,000,000,007
pub const MODULUS: u64 = 1_000_000_007;

/// Weighted sum kept reduced modulo [`MODULUS`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ModularAccumulator {
    total: u64,
}

impl ModularAccumulator {
    /// Start from zero
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `value × weight`.
    ///
    /// Both factors are reduced first, so the product of two residues
    /// (< 2^60) never overflows.
    #[inline]
    pub fn add(&mut self, value: u64, weight: u64) {
        let product = (value % MODULUS) * (weight % MODULUS) % MODULUS;
        self.total = (self.total + product) % MODULUS;
    }

    /// Current total in `[0, MODULUS)`
    #[inline]
    pub fn total(&self) -> u64 {
        self.total
    }
}

/// `(a + b) mod MODULUS` for arbitrary inputs
#[inline]
pub(crate) fn add_mod(a: u64, b: u64) -> u64 {
    (a % MODULUS + b % MODULUS) % MODULUS
}

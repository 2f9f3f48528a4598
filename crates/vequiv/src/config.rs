//! Comparison configuration.

/// Treatment of native words' bits above the declared width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HighBitPolicy {
    /// Producer guarantees clean high bits; decode words as-is.
    Trust,
    /// Clear high bits before decoding, warning if any were set.
    #[default]
    Mask,
    /// Report set high bits as a mismatch.
    Reject,
}

impl std::fmt::Display for HighBitPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Trust => write!(f, "trust"),
            Self::Mask => write!(f, "mask"),
            Self::Reject => write!(f, "reject"),
        }
    }
}

/// Configuration for comparison.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CompareConfig {
    pub high_bits: HighBitPolicy,
}

impl CompareConfig {
    #[must_use]
    pub const fn with_high_bits(high_bits: HighBitPolicy) -> Self {
        Self { high_bits }
    }
}

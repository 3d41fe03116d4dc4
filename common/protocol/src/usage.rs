//! Token usage accounting, passed through from providers unmodified.

use serde::Deserialize;
use serde::Serialize;

/// Usage reported by a provider for a single assistant response.
///
/// An aborted or errored assistant message always reports zero usage,
/// regardless of what the provider sent before the abort was observed.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct TokenUsage {
    pub input: i64,
    pub output: i64,
    pub cache_read: i64,
    pub cache_write: i64,
}

impl TokenUsage {
    pub fn new(input: i64, output: i64) -> Self {
        Self {
            input,
            output,
            cache_read: 0,
            cache_write: 0,
        }
    }

    pub fn zero() -> Self {
        Self::default()
    }

    pub fn total_tokens(&self) -> i64 {
        self.input + self.output + self.cache_read + self.cache_write
    }

    pub fn is_zero(&self) -> bool {
        *self == Self::default()
    }

    pub fn accumulate(&mut self, other: TokenUsage) {
        self.input += other.input;
        self.output += other.output;
        self.cache_read += other.cache_read;
        self.cache_write += other.cache_write;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_usage_is_zero() {
        assert!(TokenUsage::zero().is_zero());
        assert!(!TokenUsage::new(1, 0).is_zero());
    }

    #[test]
    fn accumulate_sums_fields() {
        let mut total = TokenUsage::new(10, 20);
        total.accumulate(TokenUsage {
            input: 1,
            output: 2,
            cache_read: 3,
            cache_write: 4,
        });
        assert_eq!(total.total_tokens(), 10 + 20 + 1 + 2 + 3 + 4);
    }
}

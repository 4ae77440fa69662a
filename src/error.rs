//! Error types.
//!
//! None of the cache operations fail: a miss is an ordinary `None`. Errors
//! only surface from construction-time validation and from the invariant
//! checkers used by tests.
//!
//! - [`ConfigError`]: a constructor parameter is out of range (for example a
//!   negative or NaN hybrid weight).
//! - [`InvariantError`]: `check_invariants` found inconsistent bookkeeping.
//!
//! ```
//! use evictkit::error::ConfigError;
//! use evictkit::policy::hybrid::HybridCache;
//!
//! let ok: Result<HybridCache<u32, u32>, ConfigError> = HybridCache::try_new(8, 0.7, 0.3);
//! assert!(ok.is_ok());
//!
//! let bad = HybridCache::<u32, u32>::try_new(8, -1.0, 0.3);
//! assert!(bad.unwrap_err().to_string().contains("alpha"));
//! ```

use std::fmt;

/// Internal bookkeeping does not match the cache contents.
///
/// Carries a description of the first violated invariant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantError(String);

impl InvariantError {
    #[inline]
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    #[inline]
    pub fn message(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for InvariantError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for InvariantError {}

/// A construction parameter failed validation.
///
/// Produced by [`HybridCache::try_new`](crate::policy::hybrid::HybridCache::try_new)
/// and [`CacheBuilder::try_build`](crate::builder::CacheBuilder::try_build).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError(String);

impl ConfigError {
    #[inline]
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    #[inline]
    pub fn message(&self) -> &str {
        &self.0
    }

    /// Rejects weights that are negative, NaN or infinite.
    pub(crate) fn check_weight(name: &str, value: f64) -> Result<(), Self> {
        if value.is_finite() && value >= 0.0 {
            Ok(())
        } else {
            Err(Self(format!(
                "{} must be finite and non-negative, got {}",
                name, value
            )))
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invariant_display_shows_message() {
        let err = InvariantError::new("bucket 3 is empty");
        assert_eq!(err.to_string(), "bucket 3 is empty");
        assert_eq!(err.message(), "bucket 3 is empty");
    }

    #[test]
    fn config_display_shows_message() {
        let err = ConfigError::new("beta must be finite");
        assert_eq!(err.to_string(), "beta must be finite");
        assert!(format!("{:?}", err).contains("beta"));
    }

    #[test]
    fn check_weight_accepts_zero_and_large() {
        assert!(ConfigError::check_weight("alpha", 0.0).is_ok());
        assert!(ConfigError::check_weight("alpha", 1e9).is_ok());
    }

    #[test]
    fn check_weight_rejects_bad_values() {
        for bad in [-0.5, f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let err = ConfigError::check_weight("beta", bad).unwrap_err();
            assert!(err.message().starts_with("beta must be"));
        }
    }

    #[test]
    fn both_implement_std_error() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<InvariantError>();
        assert_error::<ConfigError>();
    }
}

//! Error handler for TOTP operations.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, TotpError>;

/// Enum representing every failure the crate can surface.
///
/// A wrong pin is not an error: validation returns `Ok(false)`.
#[derive(Debug, Error)]
pub enum TotpError {
    #[error("digits must be greater than 0, got {digits}")]
    InvalidDigits { digits: u32 },
    #[error("digits must be at most {max}, got {digits}")]
    TooManyDigits { digits: u32, max: u32 },
    #[error("period must be greater than 0 seconds, got {period}")]
    InvalidPeriod { period: u64 },

    #[error("invalid HMAC key length")]
    InvalidKeyLength,
    #[error("secret is not valid base32")]
    InvalidSecret,
    #[error("unknown hash algorithm {0:?}")]
    UnknownAlgorithm(String),

    #[error("failed to gather random bytes")]
    Random(#[from] rand::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configuration_error_carries_value() {
        let err = TotpError::InvalidDigits { digits: 0 };
        assert_eq!(err.to_string(), "digits must be greater than 0, got 0");

        let err = TotpError::InvalidPeriod { period: 0 };
        assert!(err.to_string().contains("got 0"));
    }
}

//! Shared secret between the code generator and the verifier.

use base32::Alphabet;
use rand::RngCore;
use rand::rngs::OsRng;
use zeroize::Zeroizing;

use crate::error::{Result, TotpError};

const ALPHABET: Alphabet = Alphabet::Rfc4648 { padding: false };

/// Raw secret key bytes, wiped from memory on drop.
#[derive(Clone)]
pub struct Secret(Zeroizing<Vec<u8>>);

impl Secret {
    /// 160 bits, as recommended by RFC 4226.
    pub const DEFAULT_LENGTH: usize = 20;

    /// Create a [`Secret`] from raw bytes.
    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Self(Zeroizing::new(bytes.into()))
    }

    /// Decode a base32 (RFC 4648) secret, as displayed by authenticator apps.
    ///
    /// Case, whitespace and trailing `=` padding are ignored.
    ///
    /// # Errors
    ///
    /// Returns `Err` if string is empty or not base32.
    pub fn from_base32(encoded: &str) -> Result<Self> {
        let normalized: Zeroizing<String> = Zeroizing::new(
            encoded
                .chars()
                .filter(|c| !c.is_whitespace())
                .map(|c| c.to_ascii_uppercase())
                .collect(),
        );
        let normalized = normalized.trim_end_matches('=');

        if normalized.is_empty() {
            return Err(TotpError::InvalidSecret);
        }

        base32::decode(ALPHABET, normalized)
            .map(Self::from_bytes)
            .ok_or(TotpError::InvalidSecret)
    }

    /// Generate a random secret of `length` bytes from the OS RNG.
    pub fn generate(length: usize) -> Result<Self> {
        let mut bytes = vec![0u8; length];
        OsRng.try_fill_bytes(&mut bytes)?;
        Ok(Self::from_bytes(bytes))
    }

    /// Unpadded base32 representation.
    pub fn to_base32(&self) -> String {
        base32::encode(ALPHABET, &self.0)
    }

    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl PartialEq for Secret {
    fn eq(&self, other: &Self) -> bool {
        constant_time_eq::constant_time_eq(&self.0, &other.0)
    }
}

impl Eq for Secret {}

impl std::fmt::Debug for Secret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Secret").field(&"[REDACTED]").finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base32() {
        let secret = Secret::from_base32("JBSWY3DPEHPK3PXP").unwrap();
        assert_eq!(secret.as_bytes(), b"Hello!\xde\xad\xbe\xef");
        assert_eq!(secret.to_base32(), "JBSWY3DPEHPK3PXP");

        let relaxed = Secret::from_base32("jbsw y3dp ehpk 3pxp").unwrap();
        assert_eq!(secret, relaxed);
    }

    #[test]
    fn test_invalid_base32() {
        assert!(matches!(
            Secret::from_base32(""),
            Err(TotpError::InvalidSecret)
        ));
        assert!(matches!(
            Secret::from_base32("not base32!"),
            Err(TotpError::InvalidSecret)
        ));
    }

    #[test]
    fn test_generate() {
        let first = Secret::generate(Secret::DEFAULT_LENGTH).unwrap();
        let second = Secret::generate(Secret::DEFAULT_LENGTH).unwrap();

        assert_eq!(first.as_bytes().len(), Secret::DEFAULT_LENGTH);
        assert_ne!(first, second);
        assert_eq!(Secret::from_base32(&first.to_base32()).unwrap(), first);
    }

    #[test]
    fn test_debug_is_redacted() {
        let secret = Secret::from_bytes(b"12345678901234567890".to_vec());
        assert_eq!(format!("{secret:?}"), "Secret(\"[REDACTED]\")");
    }
}

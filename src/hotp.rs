//! HMAC-based one-time password (RFC 4226).

use hmac::digest::KeyInit;
use hmac::{Hmac, Mac};
use sha1::Sha1;
use sha2::{Sha256, Sha512};

use crate::algorithm::Algorithm;
use crate::error::{Result, TotpError};
use crate::secret::Secret;

/// Port for the counter-based code primitive TOTP is built on.
pub trait Hotp: Send + Sync {
    /// Return the `digits`-long, zero-padded decimal code for `counter`.
    fn generate(
        &self,
        algorithm: Algorithm,
        digits: u32,
        secret: &Secret,
        counter: u64,
    ) -> Result<String>;
}

/// HOTP over the `hmac` crate.
#[derive(Debug, Default, Clone, Copy)]
pub struct HmacHotp;

impl HmacHotp {
    pub fn new() -> Self {
        Self
    }
}

fn sign<M: Mac + KeyInit>(key: &[u8], message: &[u8]) -> Result<Vec<u8>> {
    let mut mac = <M as Mac>::new_from_slice(key)
        .map_err(|_| TotpError::InvalidKeyLength)?;
    mac.update(message);
    Ok(mac.finalize().into_bytes().to_vec())
}

/// Dynamic truncation, then reduction to `digits` decimal characters.
fn truncate(hash: &[u8], digits: u32) -> String {
    let offset = (hash[hash.len() - 1] & 0x0f) as usize;
    let binary_code = ((hash[offset] as u64 & 0x7f) << 24) |
        ((hash[offset + 1] as u64) << 16) |
        ((hash[offset + 2] as u64) << 8) |
        (hash[offset + 3] as u64);

    // Past 19 digits the modulus overflows and is larger than any code anyway.
    let code = match 10u64.checked_pow(digits) {
        Some(modulus) => binary_code % modulus,
        None => binary_code,
    };

    format!("{:0>width$}", code, width = digits as usize)
}

impl Hotp for HmacHotp {
    fn generate(
        &self,
        algorithm: Algorithm,
        digits: u32,
        secret: &Secret,
        counter: u64,
    ) -> Result<String> {
        let counter_bytes = counter.to_be_bytes();
        let key = secret.as_bytes();

        let hash = match algorithm {
            Algorithm::Sha1 => sign::<Hmac<Sha1>>(key, &counter_bytes)?,
            Algorithm::Sha256 => sign::<Hmac<Sha256>>(key, &counter_bytes)?,
            Algorithm::Sha512 => sign::<Hmac<Sha512>>(key, &counter_bytes)?,
        };

        Ok(truncate(&hash, digits))
    }
}

impl<H: Hotp + ?Sized> Hotp for std::sync::Arc<H> {
    fn generate(
        &self,
        algorithm: Algorithm,
        digits: u32,
        secret: &Secret,
        counter: u64,
    ) -> Result<String> {
        (**self).generate(algorithm, digits, secret, counter)
    }
}

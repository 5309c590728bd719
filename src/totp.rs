//! Time-based one-time password (RFC 6238).
//!
//! Wall-clock time is quantized into a counter which is handed to a [`Hotp`]
//! implementation. Validation accepts codes from a symmetric window of
//! counters to absorb clock drift between the code generator and the
//! verifier.

use std::time::Duration;

use constant_time_eq::constant_time_eq;

use crate::algorithm::Algorithm;
use crate::clock::{Clock, SystemClock};
use crate::error::{Result, TotpError};
use crate::hotp::{HmacHotp, Hotp};
use crate::secret::Secret;

/// Convert `base_time_millis` into a time-step counter.
#[inline]
pub fn time_counter(period: u64, base_time_millis: u64) -> u64 {
    // A step wider than `u64::MAX` ms never completes.
    period
        .checked_mul(1000)
        .map_or(0, |step| base_time_millis / step)
}

/// Per-call options.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct TotpOptions {
    /// Instant to compute codes for, in milliseconds since the Unix epoch.
    /// `None` reads the configured [`Clock`].
    pub base_time_millis: Option<u64>,
}

impl TotpOptions {
    /// Use the configured clock.
    pub fn now() -> Self {
        Self::default()
    }

    /// Use a caller-supplied instant.
    pub fn at(base_time_millis: u64) -> Self {
        Self {
            base_time_millis: Some(base_time_millis),
        }
    }
}

/// TOTP generator and validator.
///
/// Holds an immutable configuration; the secret is passed on every call and
/// never retained.
#[derive(Debug, Clone)]
pub struct Totp<C = SystemClock, H = HmacHotp> {
    algorithm: Algorithm,
    digits: u32,
    period: u64,
    clock: C,
    hotp: H,
}

impl Totp {
    pub const DEFAULT_DIGITS: u32 = 6;
    /// Default time step as per RFC 6238.
    pub const DEFAULT_PERIOD: u64 = 30;

    /// Largest digit count accepted from configuration files.
    pub const MAX_DIGITS: u32 = 10;

    /// Create a new [`Totp`] with validation.
    ///
    /// `digits` is only bounded below: every generated code is a string of
    /// exactly `digits` characters, so huge values allocate accordingly on
    /// each call. Untrusted input should be checked against
    /// [`Totp::MAX_DIGITS`] first.
    ///
    /// # Errors
    ///
    /// Returns `Err` if `digits` or `period` is zero.
    pub fn new(algorithm: Algorithm, digits: u32, period: u64) -> Result<Self> {
        if digits == 0 {
            tracing::debug!(digits, "rejected TOTP configuration");
            return Err(TotpError::InvalidDigits { digits });
        }

        if period == 0 {
            tracing::debug!(period, "rejected TOTP configuration");
            return Err(TotpError::InvalidPeriod { period });
        }

        if digits > 9 {
            tracing::warn!(
                digits,
                "codes longer than 9 digits are padded with leading zeros"
            );
        }

        tracing::debug!(%algorithm, digits, period, "TOTP configured");

        Ok(Self {
            algorithm,
            digits,
            period,
            clock: SystemClock,
            hotp: HmacHotp,
        })
    }
}

impl Default for Totp {
    /// SHA-1, 6 digits, 30 seconds.
    fn default() -> Self {
        Self {
            algorithm: Algorithm::Sha1,
            digits: Self::DEFAULT_DIGITS,
            period: Self::DEFAULT_PERIOD,
            clock: SystemClock,
            hotp: HmacHotp,
        }
    }
}

impl<C: Clock, H: Hotp> Totp<C, H> {
    /// Replace the time source used when no explicit time is given.
    pub fn with_clock<T: Clock>(self, clock: T) -> Totp<T, H> {
        Totp {
            algorithm: self.algorithm,
            digits: self.digits,
            period: self.period,
            clock,
            hotp: self.hotp,
        }
    }

    /// Replace the HOTP primitive.
    pub fn with_hotp<T: Hotp>(self, hotp: T) -> Totp<C, T> {
        Totp {
            algorithm: self.algorithm,
            digits: self.digits,
            period: self.period,
            clock: self.clock,
            hotp,
        }
    }

    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    pub fn digits(&self) -> u32 {
        self.digits
    }

    pub fn period(&self) -> u64 {
        self.period
    }

    fn base_time(&self, options: &TotpOptions) -> u64 {
        options
            .base_time_millis
            .unwrap_or_else(|| self.clock.now_millis())
    }

    /// Time-step counter for the given options.
    pub fn time(&self, options: &TotpOptions) -> u64 {
        time_counter(self.period, self.base_time(options))
    }

    /// Time left before the counter moves to the next step.
    pub fn remaining(&self, options: &TotpOptions) -> Duration {
        let base_time = self.base_time(options);
        let elapsed = self
            .period
            .checked_mul(1000)
            .map_or(base_time, |step| base_time % step);

        Duration::from_secs(self.period) - Duration::from_millis(elapsed)
    }

    /// Generate the code for the current time step.
    pub fn generate(
        &self,
        secret: &Secret,
        options: &TotpOptions,
    ) -> Result<String> {
        self.hotp
            .generate(self.algorithm, self.digits, secret, self.time(options))
    }

    /// Generate the codes for every counter in `[-window, +window]` around the
    /// current one, in ascending counter order.
    pub fn generate_window(
        &self,
        secret: &Secret,
        window: u32,
        options: &TotpOptions,
    ) -> Result<Vec<String>> {
        let counter = self.time(options);
        let window = i64::from(window);

        (-window..=window)
            .map(|offset| {
                // Wrap like a signed 64-bit counter below zero.
                let counter = counter.wrapping_add_signed(offset);
                self.hotp
                    .generate(self.algorithm, self.digits, secret, counter)
            })
            .collect()
    }

    /// Check `pin` against the code of the current time step only.
    pub fn validate(
        &self,
        pin: &str,
        secret: &Secret,
        options: &TotpOptions,
    ) -> Result<bool> {
        let expected = self.generate(secret, options)?;
        Ok(constant_time_eq(pin.as_bytes(), expected.as_bytes()))
    }

    /// Check `pin` against every code of the window.
    ///
    /// Every candidate is compared, even after a match.
    pub fn validate_window(
        &self,
        pin: &str,
        secret: &Secret,
        window: u32,
        options: &TotpOptions,
    ) -> Result<bool> {
        let candidates = self.generate_window(secret, window, options)?;

        Ok(candidates.iter().fold(false, |found, code| {
            found | constant_time_eq(pin.as_bytes(), code.as_bytes())
        }))
    }
}

//! Time-based one-time passwords (RFC 6238) for Autha.
//!
//! ```
//! use autha_totp::{Algorithm, Secret, Totp, TotpOptions};
//!
//! let totp = Totp::new(Algorithm::Sha1, 6, 30).unwrap();
//! let secret = Secret::from_bytes(b"12345678901234567890".to_vec());
//!
//! let code = totp.generate(&secret, &TotpOptions::at(59_000)).unwrap();
//! assert_eq!(code, "287082");
//! assert!(totp.validate_window(&code, &secret, 1, &TotpOptions::at(89_000)).unwrap());
//! ```

#![forbid(unsafe_code)]
#![deny(unused_mut)]

pub mod algorithm;
pub mod clock;
pub mod config;
pub mod error;
pub mod hotp;
pub mod secret;
pub mod telemetry;
pub mod totp;

pub use algorithm::Algorithm;
pub use clock::{Clock, FixedClock, SystemClock};
pub use error::{Result, TotpError};
pub use hotp::{HmacHotp, Hotp};
pub use secret::Secret;
pub use totp::{Totp, TotpOptions, time_counter};

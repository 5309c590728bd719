//! Configuration manager for the TOTP tooling.

use std::fs::File;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::algorithm::Algorithm;
use crate::error::{Result, TotpError};
use crate::totp::Totp;

const DEFAULT_CONFIG_PATH: &str = "config.yaml";

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct Configuration {
    #[serde(skip)]
    path: PathBuf,
    /// Related to TOTP generation and validation.
    #[serde(default)]
    pub totp: TotpSection,
}

/// TOTP configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TotpSection {
    /// Underlying HMAC digest.
    pub algorithm: Algorithm,
    /// Number of digits for the code.
    pub digits: u32,
    /// Seconds each code stays valid.
    pub period: u64,
    /// Accepted time steps before and after the current one.
    pub window: u32,
}

impl Default for TotpSection {
    fn default() -> Self {
        Self {
            algorithm: Algorithm::Sha1,
            digits: Totp::DEFAULT_DIGITS,
            period: Totp::DEFAULT_PERIOD,
            window: 1,
        }
    }
}

impl TotpSection {
    /// Build a validated [`Totp`] from this section.
    ///
    /// # Errors
    ///
    /// Returns `Err` if `digits` is zero or above [`Totp::MAX_DIGITS`], or
    /// if `period` is zero.
    pub fn build(&self) -> Result<Totp> {
        if self.digits > Totp::MAX_DIGITS {
            return Err(TotpError::TooManyDigits {
                digits: self.digits,
                max: Totp::MAX_DIGITS,
            });
        }

        Totp::new(self.algorithm, self.digits, self.period)
    }
}

impl Configuration {
    pub fn path(mut self, path: PathBuf) -> Self {
        self.path = path;
        self
    }

    /// Reads the `config.yaml` file from the specified path or the default
    /// location.
    pub fn read(self) -> Self {
        let file_path = if self.path.is_file() {
            self.path.clone()
        } else {
            if !self.path.as_os_str().is_empty() {
                tracing::warn!(
                    path = %self.path.display(),
                    fallback = DEFAULT_CONFIG_PATH,
                    "configuration path is not a file, using fallback"
                );
            }
            Path::new(DEFAULT_CONFIG_PATH).to_path_buf()
        };

        match File::open(&file_path) {
            Ok(file) => match serde_yaml::from_reader::<_, Configuration>(file) {
                Ok(config) => {
                    tracing::debug!(path = %file_path.display(), "configuration loaded");
                    config.path(file_path)
                },
                Err(err) => self.error(err),
            },
            Err(err) => self.error(err),
        }
    }

    /// Return a default configuration as fallback.
    fn error(&self, err: impl std::error::Error) -> Self {
        tracing::error!(error = %err, "`config.yaml` file not found or invalid");
        Self {
            path: self.path.clone(),
            ..Default::default()
        }
    }
}

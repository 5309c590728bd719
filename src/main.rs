use std::path::PathBuf;
use std::process::ExitCode;

use autha_totp::config::Configuration;
use autha_totp::{Secret, TotpOptions, telemetry};
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the YAML configuration file.
    #[arg(long, short, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand, Debug, Clone)]
enum Commands {
    /// Create a random base32 secret.
    Secret {
        /// Secret size in bytes.
        #[arg(long, short, default_value_t = Secret::DEFAULT_LENGTH)]
        length: usize,
    },
    /// Print the code for a secret.
    Generate {
        /// Base32-encoded secret.
        secret: String,
        /// Unix time in milliseconds, defaults to now.
        #[arg(long, short)]
        time: Option<u64>,
        /// Print every code of a window of this size.
        #[arg(long, short)]
        window: Option<u32>,
    },
    /// Check a code against a secret.
    Validate {
        /// Base32-encoded secret.
        secret: String,
        /// Code to check.
        pin: String,
        /// Unix time in milliseconds, defaults to now.
        #[arg(long, short)]
        time: Option<u64>,
        /// Accepted time steps around the current one; overrides the
        /// configuration file.
        #[arg(long, short)]
        window: Option<u32>,
    },
}

fn run(args: Args) -> autha_totp::Result<ExitCode> {
    let config = match args.config {
        Some(path) => Configuration::default().path(path),
        None => Configuration::default(),
    }
    .read();

    match args.cmd {
        Commands::Secret { length } => {
            let secret = Secret::generate(length)?;
            println!("{}", secret.to_base32());
        },
        Commands::Generate {
            secret,
            time,
            window,
        } => {
            let totp = config.totp.build()?;
            let secret = Secret::from_base32(&secret)?;
            let options = TotpOptions {
                base_time_millis: time,
            };

            match window {
                Some(window) => {
                    for code in totp.generate_window(&secret, window, &options)?
                    {
                        println!("{code}");
                    }
                },
                None => {
                    println!("{}", totp.generate(&secret, &options)?);
                    tracing::debug!(
                        remaining = ?totp.remaining(&options),
                        "code expires"
                    );
                },
            }
        },
        Commands::Validate {
            secret,
            pin,
            time,
            window,
        } => {
            let totp = config.totp.build()?;
            let secret = Secret::from_base32(&secret)?;
            let window = window.unwrap_or(config.totp.window);
            let options = TotpOptions {
                base_time_millis: time,
            };

            if totp.validate_window(&pin, &secret, window, &options)? {
                println!("valid");
            } else {
                println!("invalid");
                return Ok(ExitCode::FAILURE);
            }
        },
    }

    Ok(ExitCode::SUCCESS)
}

fn main() -> ExitCode {
    if let Err(err) = telemetry::setup_logging() {
        eprintln!("cannot initialize logging: {err}");
    }

    let args = Args::parse();
    match run(args) {
        Ok(code) => code,
        Err(err) => {
            tracing::error!(error = %err, "command failed");
            ExitCode::from(2)
        },
    }
}

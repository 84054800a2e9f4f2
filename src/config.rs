//! Storefront configuration

use std::{path::PathBuf, time::Duration};

use clap::Args;

use crate::{
    catalog::Catalog,
    fixtures::FixtureError,
    session::{DemoAuthenticator, FileIdentitySlot},
};

/// Log output format.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum LogFormat {
    /// Compact, human-readable logs.
    #[default]
    Compact,

    /// Structured JSON logs.
    Json,
}

/// Logging settings.
#[derive(Debug, Clone, Args)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "RUST_LOG", default_value = "warn", global = true)]
    pub log_level: String,

    /// Log format (compact, json)
    #[arg(long, env = "LOG_FORMAT", value_enum, default_value_t = LogFormat::Compact, global = true)]
    pub log_format: LogFormat,
}

/// Runtime settings shared by every command.
#[derive(Debug, Clone, Args)]
pub struct StorefrontConfig {
    /// Product catalog YAML file; the built-in demo catalog when omitted
    #[arg(long, env = "CATALOG_PATH", global = true)]
    pub catalog: Option<PathBuf>,

    /// Where the signed-in identity is kept between runs
    #[arg(
        long,
        env = "SESSION_FILE",
        default_value = ".loomcart/session.json",
        global = true
    )]
    pub session_file: PathBuf,

    /// Simulated authentication latency in milliseconds
    #[arg(long, env = "AUTH_LATENCY_MS", default_value_t = 1_000_u64, global = true)]
    pub auth_latency_ms: u64,

    /// Logging output settings.
    #[command(flatten)]
    pub logging: LoggingConfig,
}

impl StorefrontConfig {
    /// Load the configured catalog, or the demo catalog.
    ///
    /// # Errors
    ///
    /// Returns a [`FixtureError`] if the catalog file cannot be read or is invalid.
    pub fn catalog(&self) -> Result<Catalog, FixtureError> {
        match &self.catalog {
            Some(path) => Catalog::from_path(path),
            None => Catalog::demo(),
        }
    }

    /// Authentication latency as a duration.
    #[must_use]
    pub fn auth_latency(&self) -> Duration {
        Duration::from_millis(self.auth_latency_ms)
    }

    /// The demo authenticator with the configured latency.
    #[must_use]
    pub fn authenticator(&self) -> DemoAuthenticator {
        DemoAuthenticator::new(self.auth_latency())
    }

    /// The file-backed identity slot.
    #[must_use]
    pub fn identity_slot(&self) -> FileIdentitySlot {
        FileIdentitySlot::new(&self.session_file)
    }
}

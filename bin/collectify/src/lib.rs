//! Collectify CLI Library
//!
//! Command implementations for the Collectify content checker. The binary entry
//! point lives in `main.rs`.
//!
//! # Modules
//!
//! - [`cmd`] - Command implementations (check, schema, show)
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//!
//! use collectify::cmd;
//!
//! // Validate every collection under the configured content directory
//! cmd::check::run(Path::new("collectify.toml"), false).unwrap();
//! ```

pub mod cmd;

// Re-export core types for convenience
pub use collectify_core::Config;
pub use collectify_loader::{ContentLoader, LoadReport};
pub use collectify_schema::CollectionRegistry;

/// Initialize tracing with the specified verbosity level.
///
/// # Arguments
///
/// * `verbose` - Verbosity level (0 = WARN, 1 = INFO, 2 = DEBUG, 3+ = TRACE)
pub fn init_tracing(verbose: u8) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .init();
}

/// Load the configuration, falling back to defaults when the file is absent.
///
/// `COLLECTIFY__*` environment variables apply in both cases.
pub(crate) fn load_config(config_path: &std::path::Path) -> color_eyre::eyre::Result<Config> {
    use color_eyre::eyre::WrapErr;

    if !config_path.exists() {
        tracing::info!(?config_path, "No configuration file, using defaults");
        return Config::from_env().wrap_err("Failed to load configuration");
    }

    Config::load_with_env(config_path).wrap_err("Failed to load configuration")
}

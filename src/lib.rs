//! # Pantokit
//!
//! Converter between the PMD pantograph motor-command format and SVG
//! vector paths.
//!
//! The heavy lifting lives in the member crates; this crate ties them
//! together behind the command-line surface and re-exports the public
//! API.

pub use pantokit_core::{
    AnglePair, ConvergenceError, Error, FormatError, GeometryError, MechanismConfig,
    PathDocument, PmdDocument, Point, Result,
};
pub use pantokit_formats::{pmd, svg};
pub use pantokit_kinematics::{forward, inverse};
pub use pantokit_pipeline::{decode, encode};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initialize logging with the default configuration
///
/// Sets up structured logging with:
/// - Console output on stderr (stdout carries conversion summaries)
/// - RUST_LOG environment variable support
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into());

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();

    Ok(())
}

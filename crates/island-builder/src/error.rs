//! Error types for the island builder binary.
//!
//! [`BuilderError`] is the top-level error type that wraps every failure
//! mode between loading configuration and writing the report.

/// Top-level error for the island builder binary.
///
/// Each variant wraps a specific subsystem error, providing a single
/// error type that `main` can propagate with `?`.
#[derive(Debug, thiserror::Error)]
pub enum BuilderError {
    /// Configuration loading failed.
    #[error("config error: {source}")]
    Config {
        /// The underlying config error.
        #[from]
        source: island_world::ConfigError,
    },

    /// Manifest validation or a map edit failed.
    #[error("world error: {source}")]
    World {
        /// The underlying world error.
        #[from]
        source: island_world::WorldError,
    },

    /// The report could not be serialized.
    #[error("report serialization failed: {source}")]
    Json {
        /// The underlying serialization error.
        #[from]
        source: serde_json::Error,
    },

    /// The report could not be written.
    #[error("failed to write report: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// The island was built but failed its readiness checks.
    #[error("island is not ready: {}", blocking_issues.join("; "))]
    NotReady {
        /// The verdict's blocking issues.
        blocking_issues: Vec<String>,
    },
}

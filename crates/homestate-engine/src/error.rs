//! Error types for the dataset generator binary.

/// Top-level error for the generator binary.
///
/// Each variant wraps a specific subsystem error, providing a single
/// error type that `main` can propagate with `?`.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// Configuration loading failed.
    #[error("config error: {source}")]
    Config {
        /// The underlying config error.
        #[from]
        source: homestate_core::config::ConfigError,
    },

    /// The output directory could not be prepared.
    #[error("output error: {source}")]
    Sink {
        /// The underlying sink error.
        #[from]
        source: homestate_core::timeline::SinkError,
    },

    /// A dataset run failed.
    #[error("dataset {dataset} failed: {source}")]
    Run {
        /// Index of the failing dataset.
        dataset: u32,
        /// The underlying timeline error.
        source: homestate_core::timeline::TimelineError,
    },

    /// The driver could not be built.
    #[error("timeline error: {source}")]
    Timeline {
        /// The underlying timeline error.
        #[from]
        source: homestate_core::timeline::TimelineError,
    },
}

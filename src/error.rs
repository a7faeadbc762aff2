//! Crate-wide error types.
//!
//! Module-specific errors live with their modules (`domain::ProviderError`,
//! `domain::ResolveError`, `config::ConfigError`); this module aggregates
//! them for callers that want one error type across the whole crate.

/// Crate-wide result type.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error, aggregating every subsystem.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Configuration load/save error
    #[error("Configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),

    /// Terminal resolution failure
    #[error("Resolution error: {0}")]
    Resolve(#[from] crate::domain::ResolveError),

    /// Error from a directly-invoked provider call
    #[error("Provider error: {0}")]
    Provider(#[from] crate::domain::ProviderError),

    /// Generic error with context
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<Error>,
    },
}

impl Error {
    /// Add context to an error.
    pub fn context(self, ctx: impl Into<String>) -> Self {
        Self::WithContext {
            context: ctx.into(),
            source: Box::new(self),
        }
    }
}

/// Extension trait for adding context to Results.
pub trait ResultExt<T> {
    /// Add context to an error result.
    fn with_context(self, ctx: impl Into<String>) -> Result<T>;
}

impl<T> ResultExt<T> for Result<T> {
    fn with_context(self, ctx: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.context(ctx))
    }
}

impl<T> ResultExt<T> for std::result::Result<T, crate::domain::ProviderError> {
    fn with_context(self, ctx: impl Into<String>) -> Result<T> {
        self.map_err(|e| Error::Provider(e).context(ctx))
    }
}

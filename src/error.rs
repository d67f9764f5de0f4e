//! Local failures: file I/O, tag containers, configuration and CLI usage.
//!
//! Remote lookups have their own [`LookupError`](crate::artwork::LookupError)
//! and never surface here; providers fold it into a `Lookup` outcome. The
//! binary entry point wraps everything in `anyhow`.

use std::path::PathBuf;

/// Result over [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Crate error for everything that is not a remote lookup.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A tag container could not be read or written
    #[error("Tag error in {path}: {message}")]
    Metadata { path: PathBuf, message: String },

    /// Music folder or album folder missing
    #[error("Not found: {0}")]
    NotFound(PathBuf),

    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Invalid combination of command-line flags
    #[error("{0}")]
    Usage(String),

    /// Another error, prefixed with what was being done
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<Error>,
    },
}

impl Error {
    pub fn metadata(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Metadata {
            path: path.into(),
            message: message.into(),
        }
    }

    pub fn not_found(path: impl Into<PathBuf>) -> Self {
        Self::NotFound(path.into())
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    pub fn usage(message: impl Into<String>) -> Self {
        Self::Usage(message.into())
    }

    /// Wrap with a description of the operation that failed.
    pub fn context(self, ctx: impl Into<String>) -> Self {
        Self::WithContext {
            context: ctx.into(),
            source: Box::new(self),
        }
    }
}

/// `with_context` on crate and I/O results.
pub trait ResultExt<T> {
    fn with_context(self, ctx: impl Into<String>) -> Result<T>;
}

impl<T> ResultExt<T> for Result<T> {
    fn with_context(self, ctx: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.context(ctx))
    }
}

impl<T> ResultExt<T> for std::result::Result<T, std::io::Error> {
    fn with_context(self, ctx: impl Into<String>) -> Result<T> {
        self.map_err(|e| Error::Io(e).context(ctx))
    }
}

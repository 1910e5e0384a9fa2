//! Error types for listing and mutation operations.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while reading a directory listing.
///
/// Listing failures are non-fatal: the affected pane shows an empty
/// listing and the error is logged.
#[derive(Debug, Error)]
pub enum ListingError {
    /// Permission denied for a path.
    #[error("Permission denied: {path}")]
    PermissionDenied { path: PathBuf },

    /// Path not found.
    #[error("Path not found: {path}")]
    NotFound { path: PathBuf },

    /// Path exists but is not a directory.
    #[error("Not a directory: {path}")]
    NotADirectory { path: PathBuf },

    /// Generic I/O error.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ListingError {
    /// Create an I/O error with path context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        match source.kind() {
            std::io::ErrorKind::PermissionDenied => Self::PermissionDenied { path },
            std::io::ErrorKind::NotFound => Self::NotFound { path },
            std::io::ErrorKind::NotADirectory => Self::NotADirectory { path },
            _ => Self::Io { path, source },
        }
    }
}

/// Errors from rename, delete, and create-directory operations.
///
/// Surfaced to the user as a blocking notice; the affected pane is
/// refreshed afterwards regardless.
#[derive(Debug, Error)]
pub enum MutationError {
    /// Permission denied for a path.
    #[error("Permission denied: {path}")]
    PermissionDenied { path: PathBuf },

    /// Path not found.
    #[error("Not found: {path}")]
    NotFound { path: PathBuf },

    /// Target name already exists.
    #[error("Already exists: {path}")]
    AlreadyExists { path: PathBuf },

    /// Rejected entry name.
    #[error("Invalid name: {message}")]
    InvalidName { message: String },

    /// Generic I/O error.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl MutationError {
    /// Create an I/O error with path context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        match source.kind() {
            std::io::ErrorKind::PermissionDenied => Self::PermissionDenied { path },
            std::io::ErrorKind::NotFound => Self::NotFound { path },
            std::io::ErrorKind::AlreadyExists => Self::AlreadyExists { path },
            _ => Self::Io { path, source },
        }
    }

    /// Create an invalid-name error.
    pub fn invalid_name(message: impl Into<String>) -> Self {
        Self::InvalidName {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_listing_error_io_classification() {
        let err = ListingError::io(
            "/test/path",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        assert!(matches!(err, ListingError::PermissionDenied { .. }));

        let err = ListingError::io(
            "/test/path",
            std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
        );
        assert!(matches!(err, ListingError::NotFound { .. }));
    }

    #[test]
    fn test_mutation_error_io_classification() {
        let err = MutationError::io(
            "/test/path",
            std::io::Error::new(std::io::ErrorKind::AlreadyExists, "exists"),
        );
        assert!(matches!(err, MutationError::AlreadyExists { .. }));
    }

    #[test]
    fn test_mutation_error_display() {
        let err = MutationError::invalid_name("name contains '/'");
        assert_eq!(err.to_string(), "Invalid name: name contains '/'");
    }
}

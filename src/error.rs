//! Error type for the polyfs filesystem abstraction.

use std::path::PathBuf;

/// Filesystem error type shared by every backend.
///
/// The contract recognizes three failure kinds beyond success: a generic
/// operation failure (missing path, backend rejection), bad parameters
/// detected before the backend is touched, and operations a backend does not
/// implement. The generic kind carries context where it is available, so it
/// is split into several variants here. Uses `#[non_exhaustive]` for forward
/// compatibility.
///
/// No variant is ever escalated to process termination by this crate; every
/// failure is returned to the immediate caller as a result value.
///
/// # Examples
///
/// ```rust
/// use polyfs::FsError;
/// use std::path::PathBuf;
///
/// let err = FsError::NotFound { path: PathBuf::from("/missing.txt") };
/// assert_eq!(err.to_string(), "not found: /missing.txt");
///
/// let err = FsError::NotImplemented { operation: "disk_info" };
/// assert!(err.is_not_implemented());
/// ```
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum FsError {
    /// Path does not exist.
    #[error("not found: {path}")]
    NotFound {
        /// The path that was not found.
        path: PathBuf,
    },

    /// Path already exists when it shouldn't.
    #[error("{operation}: already exists: {path}")]
    AlreadyExists {
        /// The path that already exists.
        path: PathBuf,
        /// The operation that failed.
        operation: &'static str,
    },

    /// Expected a regular file but found something else.
    #[error("not a file: {path}")]
    NotAFile {
        /// The path that is not a file.
        path: PathBuf,
    },

    /// Expected a directory but found something else.
    #[error("not a directory: {path}")]
    NotADirectory {
        /// The path that is not a directory.
        path: PathBuf,
    },

    /// Directory is not empty when it should be.
    #[error("directory not empty: {path}")]
    DirectoryNotEmpty {
        /// The path to the non-empty directory.
        path: PathBuf,
    },

    /// Handle was not opened with the access the operation needs.
    #[error("{operation}: access denied: {path}")]
    PermissionDenied {
        /// The path the handle refers to.
        path: PathBuf,
        /// The operation that was denied.
        operation: &'static str,
    },

    /// Invalid argument supplied by the caller, rejected before reaching
    /// the backend.
    #[error("{operation}: bad parameters: {detail}")]
    BadParameters {
        /// The operation that rejected its arguments.
        operation: &'static str,
        /// What was wrong with them.
        detail: String,
    },

    /// Operation recognized but unsupported by this backend.
    #[error("not implemented: {operation}")]
    NotImplemented {
        /// The unsupported operation.
        operation: &'static str,
    },

    /// Generic backend error.
    #[error("backend error: {0}")]
    Backend(String),

    /// I/O error with context.
    #[error("{operation} failed for {path}: {source}")]
    Io {
        /// The operation that failed.
        operation: &'static str,
        /// The path involved in the operation.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

impl FsError {
    /// Returns `true` if this is the [`FsError::NotImplemented`] kind.
    ///
    /// Callers probing for optional capabilities (disk-space queries,
    /// non-zero truncation) use this to distinguish "this backend cannot"
    /// from an actual failure.
    #[inline]
    pub fn is_not_implemented(&self) -> bool {
        matches!(self, FsError::NotImplemented { .. })
    }
}

impl From<std::io::Error> for FsError {
    fn from(error: std::io::Error) -> Self {
        // Convert common io::ErrorKind to more specific FsError variants when possible
        match error.kind() {
            std::io::ErrorKind::NotFound => FsError::NotFound {
                path: PathBuf::new(),
            },
            std::io::ErrorKind::AlreadyExists => FsError::AlreadyExists {
                path: PathBuf::new(),
                operation: "io",
            },
            std::io::ErrorKind::PermissionDenied => FsError::PermissionDenied {
                path: PathBuf::new(),
                operation: "io",
            },
            _ => FsError::Io {
                operation: "io",
                path: PathBuf::new(),
                source: error,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_display() {
        let err = FsError::NotFound {
            path: PathBuf::from("/missing"),
        };
        assert_eq!(err.to_string(), "not found: /missing");
    }

    #[test]
    fn already_exists_display() {
        let err = FsError::AlreadyExists {
            path: PathBuf::from("/exists"),
            operation: "create_dir",
        };
        assert_eq!(err.to_string(), "create_dir: already exists: /exists");
    }

    #[test]
    fn bad_parameters_display() {
        let err = FsError::BadParameters {
            operation: "open_file",
            detail: "empty path".into(),
        };
        assert_eq!(err.to_string(), "open_file: bad parameters: empty path");
    }

    #[test]
    fn not_implemented_probe() {
        assert!(
            FsError::NotImplemented {
                operation: "disk_info"
            }
            .is_not_implemented()
        );
        assert!(!FsError::Backend("boom".into()).is_not_implemented());
    }

    #[test]
    fn from_io_not_found() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "test");
        let fs_err = FsError::from(io_err);
        assert!(matches!(fs_err, FsError::NotFound { .. }));
    }

    #[test]
    fn from_io_already_exists() {
        let io_err = std::io::Error::new(std::io::ErrorKind::AlreadyExists, "test");
        let fs_err = FsError::from(io_err);
        assert!(matches!(fs_err, FsError::AlreadyExists { .. }));
    }

    #[test]
    fn from_io_other() {
        let io_err = std::io::Error::other("test");
        let fs_err = FsError::from(io_err);
        assert!(matches!(fs_err, FsError::Io { .. }));
    }
}

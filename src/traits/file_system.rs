//! The mounted-backend operation contract.

use std::path::{Path, PathBuf};

use crate::{DiskInfo, FileStat, FsDir, FsError, FsFile};

/// The operation contract a mounted storage backend satisfies.
///
/// Exactly one value of an implementing type exists per mounted backend;
/// ownership is shared by all callers for the process lifetime (wrap it in
/// [`LockedFs`](crate::LockedFs) and clone, or share it behind an `Arc`).
///
/// Paths are forward-slash ASCII and passed through to the backend without
/// normalization; separator and casing conventions are backend-defined.
///
/// # Object Safety
///
/// This trait is object-safe and can be used as `dyn FileSystem`.
///
/// # Example
///
/// ```rust
/// use polyfs::{FileSystem, FsError, MemoryFs};
/// use std::path::Path;
///
/// // Generic code works against any backend
/// fn touch<B: FileSystem>(fs: &B, path: &Path) -> Result<(), FsError> {
///     let file = fs.open_file(path, "a")?;
///     file.close()
/// }
///
/// let fs = MemoryFs::new();
/// touch(&fs, Path::new("/marker"))?;
/// assert!(fs.file_exists(Path::new("/marker")));
/// # Ok::<(), FsError>(())
/// ```
pub trait FileSystem: Send + Sync {
    /// Open a file with a `fopen`-style mode string.
    ///
    /// The mode string is decoded by [`OpenMode::parse`](crate::OpenMode::parse);
    /// for `"w"` / `"w+"` an existing target is deleted before the empty file
    /// is created (the delete tolerates an absent target).
    ///
    /// # Errors
    ///
    /// - [`FsError::NotFound`] if the mode demands existence and the path is absent
    /// - [`FsError::NotAFile`] if the path names a directory
    /// - [`FsError::BadParameters`] for an empty path
    fn open_file(&self, path: &Path, mode: &str) -> Result<Box<dyn FsFile>, FsError>;

    /// Remove a file.
    ///
    /// Removing an absent file is reported as an error, never silently
    /// ignored.
    ///
    /// # Errors
    ///
    /// - [`FsError::NotFound`] if the path does not exist
    /// - [`FsError::NotAFile`] if the path names a directory
    fn remove_file(&self, path: &Path) -> Result<(), FsError>;

    /// Whether `path` names an existing regular file.
    ///
    /// Returns `false` (not an error) for any non-existent or wrong-kind
    /// path.
    fn file_exists(&self, path: &Path) -> bool;

    /// Rename a file.
    ///
    /// Atomic with respect to other callers only when dispatched through
    /// [`LockedFs`](crate::LockedFs).
    fn rename_file(&self, from: &Path, to: &Path) -> Result<(), FsError>;

    /// Open a directory for enumeration.
    ///
    /// The returned cursor yields `"."`, then `".."`, then native entries
    /// in backend-defined order; see [`FsDir`].
    ///
    /// # Errors
    ///
    /// - [`FsError::NotFound`] if the path does not exist
    /// - [`FsError::NotADirectory`] if the path names a file
    fn open_dir(&self, path: &Path) -> Result<Box<dyn FsDir>, FsError>;

    /// Create a directory. The parent must already exist.
    ///
    /// # Errors
    ///
    /// - [`FsError::NotFound`] if the parent does not exist
    /// - [`FsError::AlreadyExists`] if the path already exists
    fn create_dir(&self, path: &Path) -> Result<(), FsError>;

    /// Remove an empty directory. Never recursive — see
    /// [`FsExt::remove_dir_all`](crate::FsExt::remove_dir_all) for the
    /// higher-level helper.
    ///
    /// # Errors
    ///
    /// - [`FsError::NotFound`] if the path does not exist
    /// - [`FsError::DirectoryNotEmpty`] if the directory has entries
    fn remove_dir(&self, path: &Path) -> Result<(), FsError>;

    /// Whether `path` names an existing directory.
    ///
    /// Returns `false` (not an error) for any non-existent or wrong-kind
    /// path.
    fn dir_exists(&self, path: &Path) -> bool;

    /// Rename a directory.
    ///
    /// Atomic with respect to other callers only when dispatched through
    /// [`LockedFs`](crate::LockedFs).
    fn rename_dir(&self, from: &Path, to: &Path) -> Result<(), FsError>;

    /// Metadata snapshot for a path.
    ///
    /// The record is zero-initialized before population; fields the backend
    /// cannot supply stay zero.
    fn stat(&self, path: &Path) -> Result<FileStat, FsError>;

    /// Size in bytes of the entry at `path`.
    fn file_size(&self, path: &Path) -> Result<u64, FsError>;

    /// Free and total capacity of a volume.
    ///
    /// # Errors
    ///
    /// - [`FsError::NotImplemented`] on backends lacking the query — which
    ///   is every backend shipped here
    fn disk_info(&self, volume: &Path) -> Result<DiskInfo, FsError>;

    /// Current working directory, or the backend's fixed notion of one.
    fn cwd(&self) -> Result<PathBuf, FsError>;

    /// Path of the running executable, or the backend's fixed literal.
    fn exe_path(&self) -> Result<PathBuf, FsError>;

    /// Per-user writable storage location, or the backend's fixed literal.
    fn user_storage_path(&self) -> Result<PathBuf, FsError>;

    /// Temporary-file location, or the backend's fixed literal.
    fn temp_path(&self) -> Result<PathBuf, FsError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_system_is_object_safe() {
        fn _check(_: &dyn FileSystem) {}
    }

    #[test]
    fn file_system_requires_send_sync() {
        fn _assert_send_sync<T: Send + Sync>() {}
        fn _check<T: FileSystem>() {
            _assert_send_sync::<T>();
        }
    }
}

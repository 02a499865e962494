//! Plain data records exchanged across the filesystem contract.

/// Metadata snapshot for a path or an open file.
///
/// Backends populate only the fields they can supply; everything else stays
/// at its zero value. A stat record is always fully zero-initialized before
/// population, so unset fields are well-defined — callers cannot distinguish
/// "zero" from "unsupported", and that ambiguity is part of the contract.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FileStat {
    /// Size in bytes.
    pub size: u64,
    /// Entry is a directory.
    pub is_dir: bool,
    /// Entry is a regular file.
    pub is_reg_file: bool,
    /// Entry is a symbolic link.
    pub is_link: bool,
    /// Device id, when the backend has one.
    pub dev: u64,
    /// Inode number, when the backend has one.
    pub ino: u64,
    /// Permission bits, when the backend has them.
    pub mode: u32,
    /// Number of hard links.
    pub nlink: u64,
    /// Owner user id.
    pub uid: u32,
    /// Owner group id.
    pub gid: u32,
    /// Last access time, seconds since the Unix epoch.
    pub atime: u64,
    /// Last modification time, seconds since the Unix epoch.
    pub mtime: u64,
    /// Last status change time, seconds since the Unix epoch.
    pub ctime: u64,
}

/// A single directory entry produced by one read step of a directory handle.
///
/// The kind flags are not guaranteed mutually exclusive across all backends,
/// but a conforming entry sets exactly one of `is_reg_file` / `is_dir`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DirEntry {
    /// Name of the entry (final component only, not a full path).
    pub name: String,
    /// Entry is a regular file.
    pub is_reg_file: bool,
    /// Entry is a directory.
    pub is_dir: bool,
    /// Entry is a symbolic link.
    pub is_link: bool,
}

impl DirEntry {
    /// Entry describing a regular file.
    pub fn file(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_reg_file: true,
            is_dir: false,
            is_link: false,
        }
    }

    /// Entry describing a directory.
    pub fn dir(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_reg_file: false,
            is_dir: true,
            is_link: false,
        }
    }
}

/// Free and total capacity of a mounted volume, in kilobytes.
///
/// Returned by [`FileSystem::disk_info`](crate::FileSystem::disk_info) on
/// backends that can answer the query; most report
/// [`FsError::NotImplemented`](crate::FsError::NotImplemented) instead.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DiskInfo {
    /// Free capacity in kilobytes.
    pub free_kb: u64,
    /// Total capacity in kilobytes.
    pub total_kb: u64,
}

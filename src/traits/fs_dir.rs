//! One open directory traversal cursor.

use crate::{DirEntry, FsError};

/// An open directory enumeration cursor.
///
/// Created by [`FileSystem::open_dir`](crate::FileSystem::open_dir),
/// destroyed by [`close`](FsDir::close). Enumeration order is `"."`, then
/// `".."`, then native entries in backend-defined order; callers must not
/// assume anything about the native order beyond that prefix. Backends whose
/// native enumeration lacks the dot entries synthesize them with
/// [`DotPrefix`].
///
/// # Example
///
/// ```rust
/// use polyfs::{FileSystem, FsError, MemoryFs};
/// use std::path::Path;
///
/// let fs = MemoryFs::new();
/// fs.create_dir(Path::new("/logs"))?;
///
/// let mut dir = fs.open_dir(Path::new("/"))?;
/// let first = dir.read()?.unwrap();
/// let second = dir.read()?.unwrap();
/// assert_eq!((first.name.as_str(), second.name.as_str()), (".", ".."));
/// dir.close()?;
/// # Ok::<(), FsError>(())
/// ```
pub trait FsDir: Send {
    /// Produce the next entry, or `None` when enumeration is exhausted.
    fn read(&mut self) -> Result<Option<DirEntry>, FsError>;

    /// Reset enumeration to the start, re-synthesizing `"."` / `".."`.
    fn rewind(&mut self) -> Result<(), FsError>;

    /// Close the cursor, releasing the backend-native resource.
    fn close(self: Box<Self>) -> Result<(), FsError>;
}

/// Cursor state for the synthesized `"."` and `".."` entries.
///
/// Backends whose native enumeration does not supply the dot entries embed
/// one of these in their directory handle and drain it before forwarding
/// native entries:
///
/// ```rust
/// use polyfs::DotPrefix;
///
/// let mut dots = DotPrefix::new();
/// assert_eq!(dots.next().unwrap().name, ".");
/// assert_eq!(dots.next().unwrap().name, "..");
/// assert!(dots.next().is_none());
///
/// dots.rewind();
/// assert_eq!(dots.next().unwrap().name, ".");
/// ```
#[derive(Debug, Clone)]
pub struct DotPrefix {
    emitted: u8,
}

impl DotPrefix {
    /// A fresh cursor positioned before `"."`.
    pub fn new() -> Self {
        Self { emitted: 0 }
    }

    /// The next pseudo-entry, or `None` once both have been produced.
    pub fn next(&mut self) -> Option<DirEntry> {
        let name = match self.emitted {
            0 => ".",
            1 => "..",
            _ => return None,
        };
        self.emitted += 1;
        Some(DirEntry::dir(name))
    }

    /// Reset so the next call produces `"."` again.
    pub fn rewind(&mut self) {
        self.emitted = 0;
    }
}

impl Default for DotPrefix {
    fn default() -> Self {
        Self::new()
    }
}

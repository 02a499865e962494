//! Convenience helpers layered over the backend contract.

use std::path::{Component, Path, PathBuf};

use crate::{FileSystem, FsError};

/// Whole-file and recursive-tree helpers for any [`FileSystem`].
///
/// These are built entirely from contract operations, so every backend —
/// and every decorated backend — gets them for free through the blanket
/// implementation.
///
/// # Example
///
/// ```rust
/// use polyfs::{FsError, FsExt, MemoryFs};
/// use std::path::Path;
///
/// let fs = MemoryFs::new();
/// fs.create_dir_all(Path::new("/a/b/c"))?;
/// fs.write(Path::new("/a/b/c/note.txt"), b"remember")?;
/// assert_eq!(fs.read(Path::new("/a/b/c/note.txt"))?, b"remember");
/// fs.remove_dir_all(Path::new("/a"))?;
/// # Ok::<(), FsError>(())
/// ```
pub trait FsExt: FileSystem {
    /// Read the entire file at `path`.
    fn read(&self, path: &Path) -> Result<Vec<u8>, FsError> {
        let mut file = self.open_file(path, "rb")?;
        let size = file.size()? as usize;
        let mut data = vec![0u8; size];
        let mut filled = 0;
        while filled < data.len() {
            let n = file.read(&mut data[filled..])?;
            if n == 0 {
                break;
            }
            filled += n;
        }
        data.truncate(filled);
        file.close()?;
        Ok(data)
    }

    /// Replace the file at `path` with `data` (open mode `"wb+"`).
    fn write(&self, path: &Path, data: &[u8]) -> Result<(), FsError> {
        let mut file = self.open_file(path, "wb+")?;
        let mut written = 0;
        while written < data.len() {
            let n = file.write(&data[written..])?;
            if n == 0 {
                return Err(FsError::Backend(format!(
                    "short write at byte {written} of {}",
                    data.len()
                )));
            }
            written += n;
        }
        file.close()
    }

    /// Create `path` and every missing ancestor, left to right.
    ///
    /// Idempotent: components that already exist are skipped.
    fn create_dir_all(&self, path: &Path) -> Result<(), FsError> {
        let mut current = PathBuf::new();
        for component in path.components() {
            current.push(component);
            if matches!(component, Component::RootDir | Component::Prefix(_)) {
                continue;
            }
            if self.dir_exists(&current) {
                continue;
            }
            match self.create_dir(&current) {
                Ok(()) | Err(FsError::AlreadyExists { .. }) => {}
                Err(e) => return Err(e),
            }
        }
        Ok(())
    }

    /// Remove `path` and everything beneath it.
    ///
    /// This is the higher-level recursive helper; the contract's
    /// [`remove_dir`](FileSystem::remove_dir) stays non-recursive. The
    /// synthesized `"."` / `".."` entries are skipped, and the cursor is
    /// closed before the tree is mutated.
    fn remove_dir_all(&self, path: &Path) -> Result<(), FsError> {
        let mut dir = self.open_dir(path)?;
        let mut children = Vec::new();
        while let Some(entry) = dir.read()? {
            if entry.name == "." || entry.name == ".." {
                continue;
            }
            children.push((path.join(&entry.name), entry.is_dir));
        }
        dir.close()?;

        for (child, is_dir) in children {
            if is_dir {
                self.remove_dir_all(&child)?;
            } else {
                self.remove_file(&child)?;
            }
        }
        self.remove_dir(path)
    }
}

// Blanket implementation - every backend (and trait object) gets FsExt for free
impl<T: FileSystem + ?Sized> FsExt for T {}

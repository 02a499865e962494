//! In-memory backend.

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::RwLock;

use crate::mode::OpenMode;
use crate::{DirEntry, DiskInfo, DotPrefix, FileStat, FileSystem, FsDir, FsError, FsFile};

/// An in-memory filesystem.
///
/// Files are byte vectors, directories a plain set of paths; the root `"/"`
/// exists from construction. Clones share the same tree. The backend keeps
/// itself internally consistent under concurrent use, but makes no
/// cross-operation atomicity promise — wrap it in
/// [`LockedFs`](crate::LockedFs) for that.
///
/// Environment queries answer with the fixed literals embedded storage
/// backends use: cwd `"/"`, executable `"/app/bin"`, user storage
/// `"/appdata"`, temp `"/tmp"`.
///
/// # Example
///
/// ```rust
/// use polyfs::{FileSystem, FsError, MemoryFs};
/// use std::path::Path;
///
/// let fs = MemoryFs::new();
/// let mut file = fs.open_file(Path::new("/greeting"), "w+")?;
/// file.write(b"hello")?;
/// file.close()?;
/// assert_eq!(fs.file_size(Path::new("/greeting"))?, 5);
/// # Ok::<(), FsError>(())
/// ```
#[derive(Clone)]
pub struct MemoryFs {
    state: Arc<RwLock<State>>,
}

#[derive(Default, Debug)]
struct State {
    files: HashMap<PathBuf, Vec<u8>>,
    dirs: HashSet<PathBuf>,
}

impl State {
    fn children_of(&self, dir: &Path) -> Vec<DirEntry> {
        let mut entries = Vec::new();
        for child in &self.dirs {
            if child.parent() == Some(dir) {
                if let Some(name) = child.file_name() {
                    entries.push(DirEntry::dir(name.to_string_lossy()));
                }
            }
        }
        for child in self.files.keys() {
            if child.parent() == Some(dir) {
                if let Some(name) = child.file_name() {
                    entries.push(DirEntry::file(name.to_string_lossy()));
                }
            }
        }
        entries.sort_by(|a, b| a.name.cmp(&b.name));
        entries
    }

    fn parent_missing(&self, path: &Path) -> Option<PathBuf> {
        match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() && !self.dirs.contains(parent) => {
                Some(parent.to_path_buf())
            }
            _ => None,
        }
    }
}

impl MemoryFs {
    /// An empty filesystem containing only the root directory.
    pub fn new() -> Self {
        let mut state = State::default();
        state.dirs.insert(PathBuf::from("/"));
        Self {
            state: Arc::new(RwLock::new(state)),
        }
    }
}

impl Default for MemoryFs {
    fn default() -> Self {
        Self::new()
    }
}

fn reject_empty(path: &Path, operation: &'static str) -> Result<(), FsError> {
    if path.as_os_str().is_empty() {
        return Err(FsError::BadParameters {
            operation,
            detail: "empty path".into(),
        });
    }
    Ok(())
}

impl FileSystem for MemoryFs {
    fn open_file(&self, path: &Path, mode: &str) -> Result<Box<dyn FsFile>, FsError> {
        reject_empty(path, "open_file")?;
        let mode = OpenMode::parse(mode);
        if mode.truncate && self.file_exists(path) {
            self.remove_file(path)?;
        }

        let mut state = self.state.write();
        if state.dirs.contains(path) {
            return Err(FsError::NotAFile {
                path: path.to_path_buf(),
            });
        }
        if !state.files.contains_key(path) {
            if mode.must_exist() {
                return Err(FsError::NotFound {
                    path: path.to_path_buf(),
                });
            }
            if let Some(parent) = state.parent_missing(path) {
                return Err(FsError::NotFound { path: parent });
            }
            state.files.insert(path.to_path_buf(), Vec::new());
        }
        drop(state);

        Ok(Box::new(MemFile {
            state: Arc::clone(&self.state),
            path: path.to_path_buf(),
            pos: 0,
            mode,
        }))
    }

    fn remove_file(&self, path: &Path) -> Result<(), FsError> {
        let mut state = self.state.write();
        if state.dirs.contains(path) {
            return Err(FsError::NotAFile {
                path: path.to_path_buf(),
            });
        }
        state
            .files
            .remove(path)
            .map(|_| ())
            .ok_or_else(|| FsError::NotFound {
                path: path.to_path_buf(),
            })
    }

    fn file_exists(&self, path: &Path) -> bool {
        self.state.read().files.contains_key(path)
    }

    fn rename_file(&self, from: &Path, to: &Path) -> Result<(), FsError> {
        let mut state = self.state.write();
        if state.dirs.contains(from) {
            return Err(FsError::NotAFile {
                path: from.to_path_buf(),
            });
        }
        let data = state
            .files
            .remove(from)
            .ok_or_else(|| FsError::NotFound {
                path: from.to_path_buf(),
            })?;
        state.files.insert(to.to_path_buf(), data);
        Ok(())
    }

    fn open_dir(&self, path: &Path) -> Result<Box<dyn FsDir>, FsError> {
        reject_empty(path, "open_dir")?;
        let state = self.state.read();
        if state.files.contains_key(path) {
            return Err(FsError::NotADirectory {
                path: path.to_path_buf(),
            });
        }
        if !state.dirs.contains(path) {
            return Err(FsError::NotFound {
                path: path.to_path_buf(),
            });
        }
        let entries = state.children_of(path);
        drop(state);

        Ok(Box::new(MemDir {
            state: Arc::clone(&self.state),
            path: path.to_path_buf(),
            dots: DotPrefix::new(),
            entries,
            next: 0,
        }))
    }

    fn create_dir(&self, path: &Path) -> Result<(), FsError> {
        reject_empty(path, "create_dir")?;
        let mut state = self.state.write();
        if state.dirs.contains(path) || state.files.contains_key(path) {
            return Err(FsError::AlreadyExists {
                path: path.to_path_buf(),
                operation: "create_dir",
            });
        }
        if let Some(parent) = state.parent_missing(path) {
            return Err(FsError::NotFound { path: parent });
        }
        state.dirs.insert(path.to_path_buf());
        Ok(())
    }

    fn remove_dir(&self, path: &Path) -> Result<(), FsError> {
        let mut state = self.state.write();
        if state.files.contains_key(path) {
            return Err(FsError::NotADirectory {
                path: path.to_path_buf(),
            });
        }
        if !state.dirs.contains(path) {
            return Err(FsError::NotFound {
                path: path.to_path_buf(),
            });
        }
        if !state.children_of(path).is_empty() {
            return Err(FsError::DirectoryNotEmpty {
                path: path.to_path_buf(),
            });
        }
        state.dirs.remove(path);
        Ok(())
    }

    fn dir_exists(&self, path: &Path) -> bool {
        self.state.read().dirs.contains(path)
    }

    fn rename_dir(&self, from: &Path, to: &Path) -> Result<(), FsError> {
        let mut state = self.state.write();
        if !state.dirs.contains(from) {
            return Err(FsError::NotFound {
                path: from.to_path_buf(),
            });
        }
        if state.dirs.contains(to) || state.files.contains_key(to) {
            return Err(FsError::AlreadyExists {
                path: to.to_path_buf(),
                operation: "rename_dir",
            });
        }

        // Every path under the old prefix moves with it.
        let rebase = |path: &Path| -> Option<PathBuf> {
            let rel = path.strip_prefix(from).ok()?;
            Some(if rel.as_os_str().is_empty() {
                to.to_path_buf()
            } else {
                to.join(rel)
            })
        };

        let moved_dirs: Vec<PathBuf> = state
            .dirs
            .iter()
            .filter(|p| p.starts_with(from))
            .cloned()
            .collect();
        for old in moved_dirs {
            if let Some(new) = rebase(&old) {
                state.dirs.remove(&old);
                state.dirs.insert(new);
            }
        }

        let moved_files: Vec<PathBuf> = state
            .files
            .keys()
            .filter(|p| p.starts_with(from))
            .cloned()
            .collect();
        for old in moved_files {
            if let Some(new) = rebase(&old) {
                if let Some(data) = state.files.remove(&old) {
                    state.files.insert(new, data);
                }
            }
        }
        Ok(())
    }

    fn stat(&self, path: &Path) -> Result<FileStat, FsError> {
        let state = self.state.read();
        if state.dirs.contains(path) {
            return Ok(FileStat {
                is_dir: true,
                ..FileStat::default()
            });
        }
        if let Some(data) = state.files.get(path) {
            return Ok(FileStat {
                size: data.len() as u64,
                is_reg_file: true,
                ..FileStat::default()
            });
        }
        Err(FsError::NotFound {
            path: path.to_path_buf(),
        })
    }

    fn file_size(&self, path: &Path) -> Result<u64, FsError> {
        Ok(self.stat(path)?.size)
    }

    fn disk_info(&self, _volume: &Path) -> Result<DiskInfo, FsError> {
        Err(FsError::NotImplemented {
            operation: "disk_info",
        })
    }

    fn cwd(&self) -> Result<PathBuf, FsError> {
        Ok(PathBuf::from("/"))
    }

    fn exe_path(&self) -> Result<PathBuf, FsError> {
        Ok(PathBuf::from("/app/bin"))
    }

    fn user_storage_path(&self) -> Result<PathBuf, FsError> {
        Ok(PathBuf::from("/appdata"))
    }

    fn temp_path(&self) -> Result<PathBuf, FsError> {
        Ok(PathBuf::from("/tmp"))
    }
}

/// Open file over the shared in-memory tree.
#[derive(Debug)]
struct MemFile {
    state: Arc<RwLock<State>>,
    path: PathBuf,
    pos: u64,
    mode: OpenMode,
}

impl MemFile {
    fn with_data<R>(&self, f: impl FnOnce(&Vec<u8>) -> R) -> Result<R, FsError> {
        let state = self.state.read();
        let data = state.files.get(&self.path).ok_or_else(|| FsError::NotFound {
            path: self.path.clone(),
        })?;
        Ok(f(data))
    }
}

impl FsFile for MemFile {
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, FsError> {
        if !self.mode.read {
            return Err(FsError::PermissionDenied {
                path: self.path.clone(),
                operation: "read",
            });
        }
        let pos = self.pos as usize;
        let n = self.with_data(|data| {
            if pos >= data.len() {
                return 0;
            }
            let n = buf.len().min(data.len() - pos);
            buf[..n].copy_from_slice(&data[pos..pos + n]);
            n
        })?;
        self.pos += n as u64;
        Ok(n)
    }

    fn write(&mut self, buf: &[u8]) -> Result<usize, FsError> {
        if !self.mode.write {
            return Err(FsError::PermissionDenied {
                path: self.path.clone(),
                operation: "write",
            });
        }
        let mut state = self.state.write();
        let data = state
            .files
            .get_mut(&self.path)
            .ok_or_else(|| FsError::NotFound {
                path: self.path.clone(),
            })?;
        if self.mode.append {
            self.pos = data.len() as u64;
        }
        let pos = self.pos as usize;
        let end = pos + buf.len();
        if end > data.len() {
            data.resize(end, 0);
        }
        data[pos..end].copy_from_slice(buf);
        self.pos = end as u64;
        Ok(buf.len())
    }

    fn seek(&mut self, offset: u64) -> Result<(), FsError> {
        self.pos = offset;
        Ok(())
    }

    fn tell(&mut self) -> Result<u64, FsError> {
        Ok(self.pos)
    }

    fn size(&mut self) -> Result<u64, FsError> {
        self.with_data(|data| data.len() as u64)
    }

    fn stat(&mut self) -> Result<FileStat, FsError> {
        let size = self.size()?;
        Ok(FileStat {
            size,
            is_reg_file: true,
            ..FileStat::default()
        })
    }

    fn sync(&mut self) -> Result<(), FsError> {
        Ok(())
    }

    fn truncate(&mut self, size: u64) -> Result<(), FsError> {
        let mut state = self.state.write();
        let data = state
            .files
            .get_mut(&self.path)
            .ok_or_else(|| FsError::NotFound {
                path: self.path.clone(),
            })?;
        data.resize(size as usize, 0);
        Ok(())
    }

    fn eof(&mut self) -> bool {
        match self.size() {
            Ok(size) => self.pos >= size,
            Err(_) => true,
        }
    }

    fn close(self: Box<Self>) -> Result<(), FsError> {
        Ok(())
    }
}

/// Directory cursor over a listing snapshot taken at open (or rewind) time.
struct MemDir {
    state: Arc<RwLock<State>>,
    path: PathBuf,
    dots: DotPrefix,
    entries: Vec<DirEntry>,
    next: usize,
}

impl FsDir for MemDir {
    fn read(&mut self) -> Result<Option<DirEntry>, FsError> {
        if let Some(entry) = self.dots.next() {
            return Ok(Some(entry));
        }
        let entry = self.entries.get(self.next).cloned();
        if entry.is_some() {
            self.next += 1;
        }
        Ok(entry)
    }

    fn rewind(&mut self) -> Result<(), FsError> {
        self.dots.rewind();
        self.next = 0;
        self.entries = self.state.read().children_of(&self.path);
        Ok(())
    }

    fn close(self: Box<Self>) -> Result<(), FsError> {
        Ok(())
    }
}

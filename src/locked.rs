//! Whole-filesystem locking for single-threaded backends.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::Mutex;

use crate::{DirEntry, DiskInfo, FileStat, FileSystem, FsDir, FsError, FsFile};

/// Serializes every operation on a wrapped backend through one lock.
///
/// `LockedFs` turns a single-threaded backend into one safely usable from
/// multiple concurrent callers: every contract operation — including every
/// operation on file and directory handles opened through it — acquires the
/// shared mutex before delegating and releases it afterward. Two callers
/// never execute underlying backend operations overlapping in time; the
/// backend runs as if single-threaded.
///
/// This is a correctness-first, throughput-naive design: operations are
/// fully serialized, with no read/write sharing and no per-file granularity.
/// Callers block until the lock is free; acquisition order among blocked
/// callers is unspecified and starvation is possible. There is no timeout —
/// an operation that hangs the backend holds the lock indefinitely.
///
/// The lock is created exactly once, when [`wrap`](LockedFs::wrap) takes
/// ownership of the backend. Because the backend moves into the wrapper, no
/// second lock can ever be attached to it; [`Clone`] hands out additional
/// handles to the same lock rather than allocating a new one.
///
/// # Example
///
/// ```rust
/// use polyfs::{FsExt, LockedFs, MemoryFs};
/// use std::path::PathBuf;
///
/// let fs = LockedFs::wrap(MemoryFs::new());
/// std::thread::scope(|s| {
///     for id in 0..4 {
///         let fs = fs.clone();
///         s.spawn(move || {
///             let path = PathBuf::from(format!("/{id}.txt"));
///             fs.write(&path, format!("from {id}").as_bytes()).unwrap();
///             assert_eq!(fs.read(&path).unwrap(), format!("from {id}").as_bytes());
///         });
///     }
/// });
/// ```
pub struct LockedFs<B> {
    inner: Arc<B>,
    lock: Arc<Mutex<()>>,
}

impl<B: FileSystem> LockedFs<B> {
    /// Take ownership of `backend` and serialize all access to it.
    pub fn wrap(backend: B) -> Self {
        log::debug!("wrapping backend for multi-threaded access");
        Self {
            inner: Arc::new(backend),
            lock: Arc::new(Mutex::new(())),
        }
    }
}

impl<B> Clone for LockedFs<B> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            lock: Arc::clone(&self.lock),
        }
    }
}

impl<B: FileSystem> FileSystem for LockedFs<B> {
    fn open_file(&self, path: &Path, mode: &str) -> Result<Box<dyn FsFile>, FsError> {
        let inner = {
            let _guard = self.lock.lock();
            self.inner.open_file(path, mode)?
        };
        Ok(Box::new(LockedFile {
            inner,
            lock: Arc::clone(&self.lock),
        }))
    }

    fn remove_file(&self, path: &Path) -> Result<(), FsError> {
        let _guard = self.lock.lock();
        self.inner.remove_file(path)
    }

    fn file_exists(&self, path: &Path) -> bool {
        let _guard = self.lock.lock();
        self.inner.file_exists(path)
    }

    fn rename_file(&self, from: &Path, to: &Path) -> Result<(), FsError> {
        let _guard = self.lock.lock();
        self.inner.rename_file(from, to)
    }

    fn open_dir(&self, path: &Path) -> Result<Box<dyn FsDir>, FsError> {
        let inner = {
            let _guard = self.lock.lock();
            self.inner.open_dir(path)?
        };
        Ok(Box::new(LockedDir {
            inner,
            lock: Arc::clone(&self.lock),
        }))
    }

    fn create_dir(&self, path: &Path) -> Result<(), FsError> {
        let _guard = self.lock.lock();
        self.inner.create_dir(path)
    }

    fn remove_dir(&self, path: &Path) -> Result<(), FsError> {
        let _guard = self.lock.lock();
        self.inner.remove_dir(path)
    }

    fn dir_exists(&self, path: &Path) -> bool {
        let _guard = self.lock.lock();
        self.inner.dir_exists(path)
    }

    fn rename_dir(&self, from: &Path, to: &Path) -> Result<(), FsError> {
        let _guard = self.lock.lock();
        self.inner.rename_dir(from, to)
    }

    fn stat(&self, path: &Path) -> Result<FileStat, FsError> {
        let _guard = self.lock.lock();
        self.inner.stat(path)
    }

    fn file_size(&self, path: &Path) -> Result<u64, FsError> {
        let _guard = self.lock.lock();
        self.inner.file_size(path)
    }

    fn disk_info(&self, volume: &Path) -> Result<DiskInfo, FsError> {
        let _guard = self.lock.lock();
        self.inner.disk_info(volume)
    }

    fn cwd(&self) -> Result<PathBuf, FsError> {
        let _guard = self.lock.lock();
        self.inner.cwd()
    }

    fn exe_path(&self) -> Result<PathBuf, FsError> {
        let _guard = self.lock.lock();
        self.inner.exe_path()
    }

    fn user_storage_path(&self) -> Result<PathBuf, FsError> {
        let _guard = self.lock.lock();
        self.inner.user_storage_path()
    }

    fn temp_path(&self) -> Result<PathBuf, FsError> {
        let _guard = self.lock.lock();
        self.inner.temp_path()
    }
}

/// File handle opened through a [`LockedFs`]; every operation takes the
/// shared lock before reaching the wrapped handle.
#[derive(Debug)]
struct LockedFile {
    inner: Box<dyn FsFile>,
    lock: Arc<Mutex<()>>,
}

impl FsFile for LockedFile {
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, FsError> {
        let _guard = self.lock.lock();
        self.inner.read(buf)
    }

    fn write(&mut self, buf: &[u8]) -> Result<usize, FsError> {
        let _guard = self.lock.lock();
        self.inner.write(buf)
    }

    fn seek(&mut self, offset: u64) -> Result<(), FsError> {
        let _guard = self.lock.lock();
        self.inner.seek(offset)
    }

    fn tell(&mut self) -> Result<u64, FsError> {
        let _guard = self.lock.lock();
        self.inner.tell()
    }

    fn size(&mut self) -> Result<u64, FsError> {
        let _guard = self.lock.lock();
        self.inner.size()
    }

    fn stat(&mut self) -> Result<FileStat, FsError> {
        let _guard = self.lock.lock();
        self.inner.stat()
    }

    fn sync(&mut self) -> Result<(), FsError> {
        let _guard = self.lock.lock();
        self.inner.sync()
    }

    fn truncate(&mut self, size: u64) -> Result<(), FsError> {
        let _guard = self.lock.lock();
        self.inner.truncate(size)
    }

    fn eof(&mut self) -> bool {
        let _guard = self.lock.lock();
        self.inner.eof()
    }

    fn close(self: Box<Self>) -> Result<(), FsError> {
        let LockedFile { inner, lock } = *self;
        let _guard = lock.lock();
        inner.close()
    }
}

/// Directory cursor opened through a [`LockedFs`].
struct LockedDir {
    inner: Box<dyn FsDir>,
    lock: Arc<Mutex<()>>,
}

impl FsDir for LockedDir {
    fn read(&mut self) -> Result<Option<DirEntry>, FsError> {
        let _guard = self.lock.lock();
        self.inner.read()
    }

    fn rewind(&mut self) -> Result<(), FsError> {
        let _guard = self.lock.lock();
        self.inner.rewind()
    }

    fn close(self: Box<Self>) -> Result<(), FsError> {
        let LockedDir { inner, lock } = *self;
        let _guard = lock.lock();
        inner.close()
    }
}

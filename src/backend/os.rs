//! Host operating-system backend.

use std::fs::{self, OpenOptions};
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use crate::mode::OpenMode;
use crate::{DirEntry, DiskInfo, DotPrefix, FileStat, FileSystem, FsDir, FsError, FsFile};

/// Backend over the host operating system's filesystem.
///
/// Delegates to `std::fs`; paths are handed through unchanged, so separator
/// and casing conventions are the host's. Environment queries come from the
/// process environment (working directory, executable path, temp dir) and
/// the platform user-data directory.
///
/// The host kernel already serializes individual syscalls, but multi-step
/// operations through this backend race like any other; wrap it in
/// [`LockedFs`](crate::LockedFs) when callers need the whole-filesystem
/// ordering guarantee.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsFs;

impl OsFs {
    /// A handle to the host filesystem.
    pub const fn new() -> Self {
        OsFs
    }
}

fn io_error(operation: &'static str, path: &Path, source: std::io::Error) -> FsError {
    match source.kind() {
        std::io::ErrorKind::NotFound => FsError::NotFound {
            path: path.to_path_buf(),
        },
        std::io::ErrorKind::AlreadyExists => FsError::AlreadyExists {
            path: path.to_path_buf(),
            operation,
        },
        std::io::ErrorKind::DirectoryNotEmpty => FsError::DirectoryNotEmpty {
            path: path.to_path_buf(),
        },
        std::io::ErrorKind::NotADirectory => FsError::NotADirectory {
            path: path.to_path_buf(),
        },
        _ => FsError::Io {
            operation,
            path: path.to_path_buf(),
            source,
        },
    }
}

fn stat_from_metadata(meta: &fs::Metadata) -> FileStat {
    let mut st = FileStat {
        size: meta.len(),
        is_dir: meta.is_dir(),
        is_reg_file: meta.is_file(),
        is_link: meta.file_type().is_symlink(),
        ..FileStat::default()
    };
    #[cfg(unix)]
    {
        use std::os::unix::fs::MetadataExt;
        st.dev = meta.dev();
        st.ino = meta.ino();
        st.mode = meta.mode();
        st.nlink = meta.nlink();
        st.uid = meta.uid();
        st.gid = meta.gid();
        st.atime = meta.atime().max(0) as u64;
        st.mtime = meta.mtime().max(0) as u64;
        st.ctime = meta.ctime().max(0) as u64;
    }
    st
}

impl FileSystem for OsFs {
    fn open_file(&self, path: &Path, mode: &str) -> Result<Box<dyn FsFile>, FsError> {
        if path.as_os_str().is_empty() {
            return Err(FsError::BadParameters {
                operation: "open_file",
                detail: "empty path".into(),
            });
        }
        let intent = OpenMode::parse(mode);
        if intent.truncate && self.file_exists(path) {
            self.remove_file(path)?;
        }

        let mut opts = OpenOptions::new();
        opts.read(intent.read)
            .write(intent.write)
            .append(intent.append)
            .create(intent.create);
        match opts.open(path) {
            Ok(file) => Ok(Box::new(OsFile {
                file,
                path: path.to_path_buf(),
            })),
            Err(e) => {
                log::warn!("open {} {mode} failed: {e}", path.display());
                Err(io_error("open_file", path, e))
            }
        }
    }

    fn remove_file(&self, path: &Path) -> Result<(), FsError> {
        fs::remove_file(path).map_err(|e| io_error("remove_file", path, e))
    }

    fn file_exists(&self, path: &Path) -> bool {
        fs::metadata(path).map(|m| m.is_file()).unwrap_or(false)
    }

    fn rename_file(&self, from: &Path, to: &Path) -> Result<(), FsError> {
        fs::rename(from, to).map_err(|e| io_error("rename_file", from, e))
    }

    fn open_dir(&self, path: &Path) -> Result<Box<dyn FsDir>, FsError> {
        let iter = fs::read_dir(path).map_err(|e| io_error("open_dir", path, e))?;
        Ok(Box::new(OsDir {
            path: path.to_path_buf(),
            // Host read_dir omits the dot entries, so they are synthesized.
            dots: DotPrefix::new(),
            iter,
        }))
    }

    fn create_dir(&self, path: &Path) -> Result<(), FsError> {
        fs::create_dir(path).map_err(|e| io_error("create_dir", path, e))
    }

    fn remove_dir(&self, path: &Path) -> Result<(), FsError> {
        fs::remove_dir(path).map_err(|e| io_error("remove_dir", path, e))
    }

    fn dir_exists(&self, path: &Path) -> bool {
        fs::metadata(path).map(|m| m.is_dir()).unwrap_or(false)
    }

    fn rename_dir(&self, from: &Path, to: &Path) -> Result<(), FsError> {
        fs::rename(from, to).map_err(|e| io_error("rename_dir", from, e))
    }

    fn stat(&self, path: &Path) -> Result<FileStat, FsError> {
        let meta = fs::metadata(path).map_err(|e| io_error("stat", path, e))?;
        Ok(stat_from_metadata(&meta))
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
        std::env::current_dir().map_err(|e| io_error("cwd", Path::new("."), e))
    }

    fn exe_path(&self) -> Result<PathBuf, FsError> {
        std::env::current_exe().map_err(|e| io_error("exe_path", Path::new("."), e))
    }

    fn user_storage_path(&self) -> Result<PathBuf, FsError> {
        dirs::data_dir().ok_or_else(|| FsError::Backend("no user data directory".into()))
    }

    fn temp_path(&self) -> Result<PathBuf, FsError> {
        Ok(std::env::temp_dir())
    }
}

/// Open file backed by a host file descriptor.
#[derive(Debug)]
struct OsFile {
    file: fs::File,
    path: PathBuf,
}

impl FsFile for OsFile {
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, FsError> {
        self.file
            .read(buf)
            .map_err(|e| io_error("read", &self.path, e))
    }

    fn write(&mut self, buf: &[u8]) -> Result<usize, FsError> {
        self.file
            .write(buf)
            .map_err(|e| io_error("write", &self.path, e))
    }

    fn seek(&mut self, offset: u64) -> Result<(), FsError> {
        self.file
            .seek(SeekFrom::Start(offset))
            .map(|_| ())
            .map_err(|e| io_error("seek", &self.path, e))
    }

    fn tell(&mut self) -> Result<u64, FsError> {
        self.file
            .stream_position()
            .map_err(|e| io_error("tell", &self.path, e))
    }

    fn size(&mut self) -> Result<u64, FsError> {
        self.file
            .metadata()
            .map(|m| m.len())
            .map_err(|e| io_error("size", &self.path, e))
    }

    fn stat(&mut self) -> Result<FileStat, FsError> {
        let meta = self
            .file
            .metadata()
            .map_err(|e| io_error("stat", &self.path, e))?;
        Ok(stat_from_metadata(&meta))
    }

    fn sync(&mut self) -> Result<(), FsError> {
        self.file
            .sync_all()
            .map_err(|e| io_error("sync", &self.path, e))
    }

    fn truncate(&mut self, size: u64) -> Result<(), FsError> {
        self.file
            .set_len(size)
            .map_err(|e| io_error("truncate", &self.path, e))
    }

    fn eof(&mut self) -> bool {
        match (self.file.stream_position(), self.file.metadata()) {
            (Ok(pos), Ok(meta)) => pos >= meta.len(),
            _ => true,
        }
    }

    fn close(self: Box<Self>) -> Result<(), FsError> {
        // The descriptor is released when the handle drops here.
        Ok(())
    }
}

/// Directory cursor over a host directory stream.
struct OsDir {
    path: PathBuf,
    dots: DotPrefix,
    iter: fs::ReadDir,
}

impl FsDir for OsDir {
    fn read(&mut self) -> Result<Option<DirEntry>, FsError> {
        if let Some(entry) = self.dots.next() {
            return Ok(Some(entry));
        }
        match self.iter.next() {
            None => Ok(None),
            Some(entry) => {
                let entry = entry.map_err(|e| io_error("read_dir", &self.path, e))?;
                let kind = entry
                    .file_type()
                    .map_err(|e| io_error("read_dir", &self.path, e))?;
                Ok(Some(DirEntry {
                    name: entry.file_name().to_string_lossy().into_owned(),
                    is_reg_file: kind.is_file(),
                    is_dir: kind.is_dir(),
                    is_link: kind.is_symlink(),
                }))
            }
        }
    }

    fn rewind(&mut self) -> Result<(), FsError> {
        // The host stream has no rewind; reopen it.
        self.iter = fs::read_dir(&self.path).map_err(|e| io_error("rewind", &self.path, e))?;
        self.dots.rewind();
        Ok(())
    }

    fn close(self: Box<Self>) -> Result<(), FsError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch() -> tempfile::TempDir {
        tempfile::tempdir().expect("temp dir")
    }

    #[test]
    fn write_close_reopen_read() {
        let tmp = scratch();
        let fs = OsFs::new();
        let path = tmp.path().join("data.bin");

        let mut f = fs.open_file(&path, "w+").unwrap();
        assert_eq!(f.write(b"hello host").unwrap(), 10);
        f.close().unwrap();
        assert_eq!(fs.file_size(&path).unwrap(), 10);

        let mut f = fs.open_file(&path, "r").unwrap();
        let mut buf = [0u8; 32];
        let n = f.read(&mut buf).unwrap();
        assert_eq!(&buf[..n], b"hello host");
        f.close().unwrap();
    }

    #[test]
    fn truncating_mode_empties_existing_file() {
        let tmp = scratch();
        let fs = OsFs::new();
        let path = tmp.path().join("t.txt");

        let mut f = fs.open_file(&path, "w").unwrap();
        f.write(b"not empty").unwrap();
        f.close().unwrap();

        let f = fs.open_file(&path, "w").unwrap();
        assert_eq!(fs.file_size(&path).unwrap(), 0);
        f.close().unwrap();
    }

    #[test]
    fn read_mode_on_missing_file_is_not_found() {
        let tmp = scratch();
        let fs = OsFs::new();
        let err = fs.open_file(&tmp.path().join("nope"), "r").unwrap_err();
        assert!(matches!(err, FsError::NotFound { .. }));
    }

    #[test]
    fn listing_starts_with_synthesized_dots() {
        let tmp = scratch();
        let fs = OsFs::new();
        fs.create_dir(&tmp.path().join("sub")).unwrap();

        let mut dir = fs.open_dir(tmp.path()).unwrap();
        assert_eq!(dir.read().unwrap().unwrap().name, ".");
        assert_eq!(dir.read().unwrap().unwrap().name, "..");
        let mut rest = Vec::new();
        while let Some(e) = dir.read().unwrap() {
            rest.push(e.name);
        }
        assert!(rest.contains(&"sub".to_string()));

        dir.rewind().unwrap();
        assert_eq!(dir.read().unwrap().unwrap().name, ".");
        dir.close().unwrap();
    }

    #[test]
    fn stat_populates_host_fields() {
        let tmp = scratch();
        let fs = OsFs::new();
        let path = tmp.path().join("s.txt");
        let mut f = fs.open_file(&path, "w").unwrap();
        f.write(b"abc").unwrap();
        f.close().unwrap();

        let st = fs.stat(&path).unwrap();
        assert_eq!(st.size, 3);
        assert!(st.is_reg_file && !st.is_dir);
        #[cfg(unix)]
        {
            assert_ne!(st.ino, 0);
            assert_ne!(st.nlink, 0);
            assert_ne!(st.mtime, 0);
        }
    }

    #[test]
    fn rename_and_remove() {
        let tmp = scratch();
        let fs = OsFs::new();
        let a = tmp.path().join("a");
        let b = tmp.path().join("b");

        let f = fs.open_file(&a, "w").unwrap();
        f.close().unwrap();
        fs.rename_file(&a, &b).unwrap();
        assert!(!fs.file_exists(&a));
        assert!(fs.file_exists(&b));
        fs.remove_file(&b).unwrap();
        assert!(!fs.file_exists(&b));
    }

    #[test]
    fn disk_info_reports_not_implemented() {
        let fs = OsFs::new();
        assert!(fs.disk_info(Path::new("/")).unwrap_err().is_not_implemented());
    }

    #[test]
    fn environment_queries_answer() {
        let fs = OsFs::new();
        assert!(fs.cwd().is_ok());
        assert!(fs.temp_path().is_ok());
    }
}

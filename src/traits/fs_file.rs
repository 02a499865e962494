//! One open file.

use crate::{FileStat, FsError};

/// An open file handle.
///
/// Owns exactly one backend-native file resource. Created by
/// [`FileSystem::open_file`](crate::FileSystem::open_file), destroyed by
/// [`close`](FsFile::close), which consumes the handle. Dropping a handle
/// without closing releases the native resource but discards any close
/// failure.
///
/// A handle is privately owned by the caller that opened it; methods take
/// `&mut self` and the handle is `Send` but not shared.
pub trait FsFile: Send + std::fmt::Debug {
    /// Read up to `buf.len()` bytes at the current position.
    ///
    /// Returns the number of bytes read; `0` at end of file.
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, FsError>;

    /// Write `buf` at the current position (at end of file in append mode).
    ///
    /// Returns the number of bytes written.
    fn write(&mut self, buf: &[u8]) -> Result<usize, FsError>;

    /// Move the position to `offset` bytes from the start.
    fn seek(&mut self, offset: u64) -> Result<(), FsError>;

    /// Current position in bytes from the start.
    fn tell(&mut self) -> Result<u64, FsError>;

    /// Current size of the file in bytes.
    fn size(&mut self) -> Result<u64, FsError>;

    /// Metadata snapshot for the open file. Zero-initialized before
    /// population.
    fn stat(&mut self) -> Result<FileStat, FsError>;

    /// Flush buffered writes to the storage medium.
    fn sync(&mut self) -> Result<(), FsError>;

    /// Resize the file to `size` bytes.
    ///
    /// # Errors
    ///
    /// - [`FsError::NotImplemented`] on backends that only support
    ///   truncation to zero
    fn truncate(&mut self, size: u64) -> Result<(), FsError>;

    /// Whether the position is at or past the end of the file.
    fn eof(&mut self) -> bool;

    /// Close the handle, releasing the backend-native resource.
    fn close(self: Box<Self>) -> Result<(), FsError>;
}

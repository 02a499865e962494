//! # Filesystem Traits
//!
//! The operation contract every storage backend satisfies.
//!
//! ## Shape
//!
//! Three object-safe traits cover the whole surface:
//!
//! | Trait | Role |
//! |-------|------|
//! | [`FileSystem`] | Mounted-backend operations: open/remove/rename, directory management, path metadata, environment queries |
//! | [`FsFile`] | One open file: positional I/O, size, sync, truncate |
//! | [`FsDir`] | One directory traversal cursor: read, rewind, close |
//!
//! A caller holds a [`FileSystem`] value (a raw backend, or one wrapped by
//! [`LockedFs`](crate::LockedFs)) and dispatches every operation through it;
//! handles come back boxed, so the caller never learns which backend produced
//! them.
//!
//! ## Handle lifecycle
//!
//! Handles are created by [`FileSystem::open_file`] / [`FileSystem::open_dir`]
//! and destroyed by their consuming `close` methods. Because `close` takes the
//! handle by value, use-after-close does not compile — what the C world
//! documents as "undefined, a programming error" is simply unrepresentable
//! here. A handle dropped without `close` still releases its native resource,
//! but any close failure is lost; call `close` when the result matters.
//!
//! ## Thread safety
//!
//! [`FileSystem`] requires `Send + Sync`; handles require only `Send`. A
//! handle belongs to the caller that opened it and is never shared between
//! threads, so its methods take `&mut self` and need no internal locking.
//! Raw backends make no cross-caller serialization promise at all — that is
//! [`LockedFs`](crate::LockedFs)'s job.

mod file_system;
mod fs_dir;
mod fs_file;

pub use file_system::FileSystem;
pub use fs_dir::{DotPrefix, FsDir};
pub use fs_file::FsFile;

//! # polyfs
//!
//! A **pluggable virtual filesystem**: one operation contract over host,
//! block-device and flash storage backends, POSIX-style open-mode strings,
//! and a serializing lock layer for single-threaded backends.
//!
//! Higher-level code performs file and directory operations without knowing
//! which storage technology is mounted underneath. A backend implements
//! [`FileSystem`]; callers dispatch every operation through that trait and
//! receive boxed [`FsFile`] / [`FsDir`] handles whose concrete type they
//! never see.
//!
//! ---
//!
//! ## Quick Start
//!
//! ```rust
//! use polyfs::{FileSystem, FsError, FsExt, MemoryFs};
//! use std::path::Path;
//!
//! fn main() -> Result<(), FsError> {
//!     let fs = MemoryFs::new();
//!     fs.create_dir_all(Path::new("/data/2026"))?;
//!     fs.write(Path::new("/data/2026/report.txt"), b"ready")?;
//!
//!     let mut dir = fs.open_dir(Path::new("/data"))?;
//!     while let Some(entry) = dir.read()? {
//!         println!("{}", entry.name);
//!     }
//!     dir.close()?;
//!     Ok(())
//! }
//! ```
//!
//! ---
//!
//! ## Core Types
//!
//! | Type | Purpose |
//! |------|---------|
//! | [`FileSystem`] | The contract every backend satisfies |
//! | [`FsFile`], [`FsDir`] | One open file / one directory cursor |
//! | [`OpenMode`] | Backend-neutral decoding of `fopen`-style mode strings |
//! | [`LockedFs`] | Decorator serializing all access through one lock |
//! | [`FsExt`] | Whole-file and recursive-tree helpers for any backend |
//! | [`FileStat`], [`DirEntry`], [`DiskInfo`] | Plain data records |
//! | [`FsError`] | Result taxonomy shared by every backend |
//!
//! ---
//!
//! ## Open Modes
//!
//! Mode strings are a stable wire format between callers and the
//! abstraction: `"r"`, `"w"`, `"a"`, `"r+"`, `"w+"`, `"a+"` with an optional
//! binary suffix, and a permissive read-write-create fallback for anything
//! else. See [`OpenMode`] for the full table. The `"w"` / `"w+"` modes
//! delete an existing target before creating it empty, on every backend.
//!
//! ---
//!
//! ## Thread Safety
//!
//! A raw backend makes no cross-caller serialization promise. Wrapping it in
//! [`LockedFs`] yields a [`FileSystem`] whose every operation — including
//! operations on handles opened through it — runs under one shared mutex, so
//! the backend executes as if single-threaded. Handles themselves are owned
//! by the caller that opened them and are `Send` but never shared.
//!
//! ```rust
//! use polyfs::{FsExt, LockedFs, MemoryFs};
//! use std::path::PathBuf;
//!
//! let fs = LockedFs::wrap(MemoryFs::new());
//! std::thread::scope(|s| {
//!     for id in 0..8 {
//!         let fs = fs.clone();
//!         s.spawn(move || {
//!             let path = PathBuf::from(format!("/worker-{id}"));
//!             fs.write(&path, b"done").unwrap();
//!         });
//!     }
//! });
//! ```
//!
//! ---
//!
//! ## Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `serde` | Enable serialization for [`FileStat`], [`DirEntry`], [`DiskInfo`], [`OpenMode`] |

pub mod backend;

// Private modules
mod error;
mod ext;
mod locked;
mod mode;
mod traits;
mod types;

// Public re-exports - error type
pub use error::FsError;

// Public re-exports - core types
pub use mode::OpenMode;
pub use types::{DirEntry, DiskInfo, FileStat};

// Public re-exports - the contract
pub use traits::{DotPrefix, FileSystem, FsDir, FsFile};

// Public re-exports - infrastructure
pub use backend::{MemoryFs, OsFs};
pub use ext::FsExt;
pub use locked::LockedFs;

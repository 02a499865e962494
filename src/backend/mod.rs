//! # Backends
//!
//! Concrete providers of the [`FileSystem`](crate::FileSystem) contract.
//!
//! Two backends ship with the crate: [`MemoryFs`] (an in-memory tree, used
//! heavily by the test suite and useful as a scratch filesystem) and
//! [`OsFs`] (the host operating system's filesystem). Adapters for
//! block-device (FAT-style) and flash-wear-leveling filesystems live with
//! their storage drivers; the rest of this page records what such an adapter
//! must honor so callers cannot tell backends apart.
//!
//! ## Conformance requirements for external adapters
//!
//! **Open modes.** Derive native access flags from
//! [`OpenMode::parse`](crate::OpenMode::parse) only. For a mode with
//! `truncate` set, delete the target if it exists — tolerating absence —
//! before creating it empty; run that step before the create step.
//!
//! **Status mapping.** Map every native status code onto
//! [`FsError`](crate::FsError): missing paths to `NotFound`, kind mismatches
//! to `NotAFile` / `NotADirectory`, everything without a better home to
//! `Backend` with the native code in the message. Never panic on a native
//! failure.
//!
//! **Existence queries.** `file_exists` / `dir_exists` return `false` for
//! absent paths *and* for wrong-kind paths; they never fail. A FAT-style
//! adapter checks the archive/directory attribute bits, a flash adapter the
//! object type from its stat call.
//!
//! **Directory enumeration.** If the native driver does not produce `"."`
//! and `".."` (FAT and flash drivers do not), synthesize them ahead of
//! native entries with [`DotPrefix`](crate::DotPrefix), and re-synthesize on
//! rewind. Entry kind flags come from native attributes; a driver with no
//! symlink notion leaves `is_link` false.
//!
//! **Stat records.** Zero-initialize (`FileStat::default()`), then populate
//! what the driver supplies. A FAT adapter fills size, the kind flags, and a
//! modification time; a flash adapter fills size and kind only. Unset fields
//! stay zero — never garbage.
//!
//! **NotImplemented, explicitly.** Operations the driver genuinely lacks
//! report [`FsError::NotImplemented`](crate::FsError::NotImplemented):
//! disk-space queries (all current adapters), truncation to a non-zero size
//! (FAT), directory rewind, create and remove on flat-namespace flash
//! drivers. Do not zero-fill a result and report success instead.
//!
//! **Environment queries.** Embedded adapters answer with fixed literals,
//! and those literals are part of the observable interface: executable path
//! `"app"` (FAT) or `"/app/bin"` (flash), user storage `"/appdata"`, temp
//! `"/tmp"`. The working directory is the native one where the driver tracks
//! it (FAT), otherwise `"/"`.
//!
//! **Thread safety.** An adapter may assume it is called from one thread at
//! a time only when wrapped in [`LockedFs`](crate::LockedFs); if it is used
//! raw, callers carry the serialization burden.

mod memory;
mod os;

pub use memory::MemoryFs;
pub use os::OsFs;

//! Translation of POSIX-style open-mode strings into a backend-neutral intent.

/// Backend-neutral open intent decoded from a `fopen`-style mode string.
///
/// Every backend derives its native access flags from this record, so a given
/// mode string means the same thing no matter which storage technology is
/// mounted. The translation table (checked in order, case-sensitive, exact
/// matches):
///
/// | input          | intent                                                |
/// |----------------|-------------------------------------------------------|
/// | `"r"`, `"rb"`  | read-only; the file must already exist                |
/// | `"w"`, `"wb"`  | write; an existing target is deleted, then created empty |
/// | `"a"`          | write, append positioning; created if absent          |
/// | `"r+"`, `"rb+"`| read-write; the file must already exist               |
/// | `"w+"`, `"wb+"`| read-write; an existing target is deleted, then created empty |
/// | `"a+"`         | read-write, append positioning for writes; created if absent |
/// | anything else  | read-write, create-if-absent                          |
///
/// The fallback row is deliberate: no mode string is ever rejected.
///
/// `truncate` marks the delete-then-create step for `"w"` / `"w+"`. The
/// backend's open path performs that step (tolerating an absent target)
/// before creating; [`parse`](OpenMode::parse) itself never touches
/// filesystem state.
///
/// # Example
///
/// ```rust
/// use polyfs::OpenMode;
///
/// assert_eq!(OpenMode::parse("r"), OpenMode::READ);
/// assert_eq!(OpenMode::parse("wb+"), OpenMode::READ_WRITE_TRUNCATE);
/// assert_eq!(OpenMode::parse("scribble"), OpenMode::READ_WRITE_CREATE);
/// assert!(OpenMode::parse("r").must_exist());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OpenMode {
    /// Open for reading.
    pub read: bool,
    /// Open for writing.
    pub write: bool,
    /// Writes always land at the end of the file.
    pub append: bool,
    /// Create the file if it does not exist.
    pub create: bool,
    /// Delete an existing target before creating it empty.
    pub truncate: bool,
}

impl OpenMode {
    /// `"r"` — read-only, file must exist.
    pub const READ: Self = Self {
        read: true,
        write: false,
        append: false,
        create: false,
        truncate: false,
    };

    /// `"w"` — write, delete-then-create empty.
    pub const WRITE_TRUNCATE: Self = Self {
        read: false,
        write: true,
        append: false,
        create: true,
        truncate: true,
    };

    /// `"a"` — write at end of file, create if absent.
    pub const WRITE_APPEND: Self = Self {
        read: false,
        write: true,
        append: true,
        create: true,
        truncate: false,
    };

    /// `"r+"` — read-write, file must exist.
    pub const READ_WRITE: Self = Self {
        read: true,
        write: true,
        append: false,
        create: false,
        truncate: false,
    };

    /// `"w+"` — read-write, delete-then-create empty.
    pub const READ_WRITE_TRUNCATE: Self = Self {
        read: true,
        write: true,
        append: false,
        create: true,
        truncate: true,
    };

    /// `"a+"` — read-write with writes at end of file, create if absent.
    pub const READ_WRITE_APPEND: Self = Self {
        read: true,
        write: true,
        append: true,
        create: true,
        truncate: false,
    };

    /// The permissive fallback — read-write, create if absent.
    pub const READ_WRITE_CREATE: Self = Self {
        read: true,
        write: true,
        append: false,
        create: true,
        truncate: false,
    };

    /// Decode a mode string. Total: unrecognized strings yield
    /// [`READ_WRITE_CREATE`](OpenMode::READ_WRITE_CREATE), never an error.
    pub fn parse(mode: &str) -> Self {
        match mode {
            "r" | "rb" => Self::READ,
            "w" | "wb" => Self::WRITE_TRUNCATE,
            "a" => Self::WRITE_APPEND,
            "r+" | "rb+" => Self::READ_WRITE,
            "w+" | "wb+" => Self::READ_WRITE_TRUNCATE,
            "a+" => Self::READ_WRITE_APPEND,
            _ => Self::READ_WRITE_CREATE,
        }
    }

    /// Returns `true` when the mode demands the target already exist.
    #[inline]
    pub const fn must_exist(&self) -> bool {
        !self.create
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recognized_modes() {
        assert_eq!(OpenMode::parse("r"), OpenMode::READ);
        assert_eq!(OpenMode::parse("rb"), OpenMode::READ);
        assert_eq!(OpenMode::parse("w"), OpenMode::WRITE_TRUNCATE);
        assert_eq!(OpenMode::parse("wb"), OpenMode::WRITE_TRUNCATE);
        assert_eq!(OpenMode::parse("a"), OpenMode::WRITE_APPEND);
        assert_eq!(OpenMode::parse("r+"), OpenMode::READ_WRITE);
        assert_eq!(OpenMode::parse("rb+"), OpenMode::READ_WRITE);
        assert_eq!(OpenMode::parse("w+"), OpenMode::READ_WRITE_TRUNCATE);
        assert_eq!(OpenMode::parse("wb+"), OpenMode::READ_WRITE_TRUNCATE);
        assert_eq!(OpenMode::parse("a+"), OpenMode::READ_WRITE_APPEND);
    }

    #[test]
    fn anything_else_falls_back_to_read_write_create() {
        for s in ["", "x", "rw", "R", "b", "w b", "a+b", "r++", "nonsense"] {
            assert_eq!(OpenMode::parse(s), OpenMode::READ_WRITE_CREATE, "{s:?}");
        }
    }

    #[test]
    fn read_modes_demand_existence() {
        assert!(OpenMode::parse("r").must_exist());
        assert!(OpenMode::parse("r+").must_exist());
        assert!(!OpenMode::parse("w").must_exist());
        assert!(!OpenMode::parse("a").must_exist());
        assert!(!OpenMode::parse("garbage").must_exist());
    }

    #[test]
    fn truncate_only_on_w_modes() {
        assert!(OpenMode::parse("w").truncate);
        assert!(OpenMode::parse("w+").truncate);
        assert!(!OpenMode::parse("a").truncate);
        assert!(!OpenMode::parse("a+").truncate);
        assert!(!OpenMode::parse("r").truncate);
        assert!(!OpenMode::parse("other").truncate);
    }

    #[test]
    fn append_positions_writes_at_end() {
        assert!(OpenMode::parse("a").append);
        assert!(OpenMode::parse("a+").append);
        assert!(!OpenMode::parse("w").append);
    }
}

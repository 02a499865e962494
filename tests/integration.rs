//! Integration tests exercising the backend contract end to end.
//!
//! These tests verify that:
//! 1. Mode strings translate to the same intent on every backend
//! 2. The existence / round-trip / enumeration behavior callers rely on
//!    holds for the shipped backends
//! 3. `LockedFs` keeps a backend consistent under heavy concurrent use
//! 4. The recursive helpers compose correctly from contract operations

use polyfs::*;
use std::path::{Path, PathBuf};

// =============================================================================
// Mode translation
// =============================================================================

#[test]
fn mode_table_is_stable() {
    let table = [
        ("r", OpenMode::READ),
        ("rb", OpenMode::READ),
        ("w", OpenMode::WRITE_TRUNCATE),
        ("wb", OpenMode::WRITE_TRUNCATE),
        ("a", OpenMode::WRITE_APPEND),
        ("r+", OpenMode::READ_WRITE),
        ("rb+", OpenMode::READ_WRITE),
        ("w+", OpenMode::READ_WRITE_TRUNCATE),
        ("wb+", OpenMode::READ_WRITE_TRUNCATE),
        ("a+", OpenMode::READ_WRITE_APPEND),
    ];
    for (input, expected) in table {
        assert_eq!(OpenMode::parse(input), expected, "{input:?}");
    }
}

#[test]
fn unrecognized_modes_default_to_read_write_create() {
    for input in ["", "x", "rw", "R", "r ", " w", "ab?", "w++"] {
        assert_eq!(OpenMode::parse(input), OpenMode::READ_WRITE_CREATE, "{input:?}");
    }
}

// =============================================================================
// Existence lifecycle
// =============================================================================

#[test]
fn existence_follows_create_and_remove() {
    let fs = MemoryFs::new();
    let path = Path::new("/lifecycle.txt");

    assert!(!fs.file_exists(path));

    let file = fs.open_file(path, "w").unwrap();
    file.close().unwrap();
    assert!(fs.file_exists(path));

    fs.remove_file(path).unwrap();
    assert!(!fs.file_exists(path));

    // Reported, never silently ignored
    assert!(matches!(
        fs.remove_file(path),
        Err(FsError::NotFound { .. })
    ));
}

// =============================================================================
// Round trips
// =============================================================================

#[test]
fn write_close_reopen_read_returns_same_bytes() {
    let fs = MemoryFs::new();
    let path = Path::new("/roundtrip.bin");
    let payload: Vec<u8> = (0u32..4096).map(|i| (i * 31 % 251) as u8).collect();

    let mut file = fs.open_file(path, "w+").unwrap();
    let mut written = 0;
    while written < payload.len() {
        written += file.write(&payload[written..]).unwrap();
    }
    file.close().unwrap();

    assert_eq!(fs.file_size(path).unwrap(), payload.len() as u64);

    let mut file = fs.open_file(path, "r").unwrap();
    let mut back = vec![0u8; payload.len() + 64];
    let mut filled = 0;
    loop {
        let n = file.read(&mut back[filled..]).unwrap();
        if n == 0 {
            break;
        }
        filled += n;
    }
    assert!(file.eof());
    file.close().unwrap();

    assert_eq!(&back[..filled], &payload[..]);
}

#[test]
fn truncating_open_empties_without_a_write() {
    let fs = MemoryFs::new();
    let path = Path::new("/shrink.txt");

    let mut file = fs.open_file(path, "w+").unwrap();
    file.write(b"not empty at all").unwrap();
    file.close().unwrap();
    assert_eq!(fs.file_size(path).unwrap(), 16);

    let file = fs.open_file(path, "w").unwrap();
    assert_eq!(fs.file_size(path).unwrap(), 0);
    file.close().unwrap();
}

// =============================================================================
// Directory enumeration
// =============================================================================

fn collect_names(dir: &mut Box<dyn FsDir>) -> Vec<String> {
    let mut names = Vec::new();
    while let Some(entry) = dir.read().unwrap() {
        names.push(entry.name);
    }
    names
}

#[test]
fn enumeration_starts_with_dot_then_dotdot() {
    let fs = MemoryFs::new();
    fs.create_dir(Path::new("/d")).unwrap();
    fs.open_file(Path::new("/d/a"), "w").unwrap().close().unwrap();
    fs.open_file(Path::new("/d/b"), "w").unwrap().close().unwrap();

    let mut dir = fs.open_dir(Path::new("/d")).unwrap();
    let names = collect_names(&mut dir);

    assert_eq!(&names[..2], &[".".to_string(), "..".to_string()]);
    let mut rest: Vec<_> = names[2..].to_vec();
    rest.sort();
    assert_eq!(rest, vec!["a".to_string(), "b".to_string()]);

    // Rewind replays the same initial sequence
    dir.rewind().unwrap();
    let replay = collect_names(&mut dir);
    assert_eq!(replay, names);
    dir.close().unwrap();
}

#[test]
fn dot_entries_describe_directories() {
    let fs = MemoryFs::new();
    fs.create_dir(Path::new("/d")).unwrap();

    let mut dir = fs.open_dir(Path::new("/d")).unwrap();
    for _ in 0..2 {
        let entry = dir.read().unwrap().unwrap();
        assert!(entry.is_dir && !entry.is_reg_file && !entry.is_link);
    }
    dir.close().unwrap();
}

// =============================================================================
// Recursive helpers
// =============================================================================

#[test]
fn remove_dir_all_handles_nesting_and_skips_dots() {
    let fs = MemoryFs::new();
    fs.create_dir_all(Path::new("/tree/x/y")).unwrap();
    fs.write(Path::new("/tree/top.txt"), b"1").unwrap();
    fs.write(Path::new("/tree/x/mid.txt"), b"22").unwrap();
    fs.write(Path::new("/tree/x/y/leaf.txt"), b"333").unwrap();

    fs.remove_dir_all(Path::new("/tree")).unwrap();
    assert!(!fs.dir_exists(Path::new("/tree")));
    // Root survives: the helper never follows "." or ".."
    assert!(fs.dir_exists(Path::new("/")));
}

#[test]
fn remove_dir_stays_non_recursive() {
    let fs = MemoryFs::new();
    fs.create_dir_all(Path::new("/p/q")).unwrap();
    assert!(matches!(
        fs.remove_dir(Path::new("/p")),
        Err(FsError::DirectoryNotEmpty { .. })
    ));
}

// =============================================================================
// Stat records
// =============================================================================

#[test]
fn stat_is_zeroed_beyond_backend_support() {
    let fs = MemoryFs::new();
    fs.write(Path::new("/s"), b"four").unwrap();

    let st = fs.stat(Path::new("/s")).unwrap();
    assert_eq!(st.size, 4);
    assert!(st.is_reg_file);
    let zeroed = FileStat {
        size: st.size,
        is_reg_file: true,
        ..FileStat::default()
    };
    assert_eq!(st, zeroed);

    let mut file = fs.open_file(Path::new("/s"), "r").unwrap();
    assert_eq!(file.stat().unwrap(), zeroed);
    file.close().unwrap();
}

#[test]
fn disk_info_is_explicitly_not_implemented() {
    let fs = MemoryFs::new();
    assert!(fs.disk_info(Path::new("/")).unwrap_err().is_not_implemented());
}

// =============================================================================
// Concurrency through LockedFs
// =============================================================================

const LOOPS: u32 = 20;

fn worker(fs: &LockedFs<MemoryFs>, id: u32) {
    let payload = format!("payload-from-{id}");
    for i in 0..LOOPS {
        let dir = PathBuf::from(format!("/{id}/{i}"));
        let filename = dir.join("test.txt");
        if !fs.dir_exists(&dir) {
            fs.create_dir_all(&dir).unwrap();
        }

        let mut file = fs.open_file(&filename, "w+").unwrap();
        assert_eq!(file.write(payload.as_bytes()).unwrap(), payload.len());
        file.close().unwrap();
        assert_eq!(fs.file_size(&filename).unwrap(), payload.len() as u64);

        let mut file = fs.open_file(&filename, "rb").unwrap();
        let mut buf = [0u8; 64];
        let n = file.read(&mut buf).unwrap();
        assert_eq!(&buf[..n], payload.as_bytes());
        file.close().unwrap();

        assert!(fs.file_exists(&filename));
        fs.remove_file(&filename).unwrap();
        assert!(!fs.file_exists(&filename));
    }
    fs.remove_dir_all(Path::new(&format!("/{id}"))).unwrap();
}

fn run_concurrent(threads: u32) {
    let fs = LockedFs::wrap(MemoryFs::new());
    std::thread::scope(|s| {
        for id in 0..threads {
            let fs = fs.clone();
            s.spawn(move || worker(&fs, id));
        }
    });
    // All per-thread subtrees were torn down; only the root remains
    let mut dir = fs.open_dir(Path::new("/")).unwrap();
    let mut names = Vec::new();
    while let Some(entry) = dir.read().unwrap() {
        names.push(entry.name);
    }
    dir.close().unwrap();
    assert_eq!(names, vec![".".to_string(), "..".to_string()]);
}

#[test]
fn one_thread_through_the_decorator() {
    run_concurrent(1);
}

#[test]
fn ten_threads_on_disjoint_subpaths() {
    run_concurrent(10);
}

#[test]
fn twenty_threads_on_disjoint_subpaths() {
    run_concurrent(20);
}

// =============================================================================
// Decorated and raw backends expose the same contract
// =============================================================================

#[test]
fn decorator_preserves_observable_behavior() {
    fn probe<B: FileSystem>(fs: &B) {
        fs.create_dir(Path::new("/probe")).unwrap();
        fs.write(Path::new("/probe/f"), b"same").unwrap();
        assert_eq!(fs.read(Path::new("/probe/f")).unwrap(), b"same");
        assert_eq!(fs.file_size(Path::new("/probe/f")).unwrap(), 4);
        fs.rename_file(Path::new("/probe/f"), Path::new("/probe/g"))
            .unwrap();
        assert!(fs.file_exists(Path::new("/probe/g")));
        fs.remove_dir_all(Path::new("/probe")).unwrap();
    }

    probe(&MemoryFs::new());
    probe(&LockedFs::wrap(MemoryFs::new()));
}

#[test]
fn trait_object_dispatch() {
    let backends: Vec<Box<dyn FileSystem>> = vec![
        Box::new(MemoryFs::new()),
        Box::new(LockedFs::wrap(MemoryFs::new())),
    ];
    for fs in &backends {
        fs.write(Path::new("/dyn"), b"ok").unwrap();
        assert_eq!(fs.read(Path::new("/dyn")).unwrap(), b"ok");
    }
}

// =============================================================================
// Host backend (kept light; the heavy cases live in the unit tests)
// =============================================================================

#[test]
fn host_backend_roundtrip_under_the_decorator() {
    let tmp = tempfile::tempdir().unwrap();
    let fs = LockedFs::wrap(OsFs::new());
    let path = tmp.path().join("host.txt");

    fs.write(&path, b"host bytes").unwrap();
    assert_eq!(fs.read(&path).unwrap(), b"host bytes");
    assert_eq!(fs.file_size(&path).unwrap(), 10);
    fs.remove_file(&path).unwrap();
    assert!(!fs.file_exists(&path));
}

// e2e/cli_integration.rs: black-box tests of the `lz4blk` binary.
//
// Runs the built executable with std::process::Command and checks exit
// codes, files written and the bench report.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use tempfile::TempDir;

fn lz4blk() -> Command {
    Command::new(env!("CARGO_BIN_EXE_lz4blk"))
}

fn run(dir: &Path, args: &[&str]) -> Output {
    lz4blk()
        .args(args)
        .current_dir(dir)
        .env_remove("LZ4BLK_CLEVEL")
        .env_remove("LZ4BLK_ITERATIONS")
        .output()
        .expect("failed to run lz4blk")
}

/// A TempDir holding `input.txt` with ~6 KB of repetitive text.
fn make_temp_input() -> (TempDir, PathBuf, Vec<u8>) {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("input.txt");
    let content = "Hello, raw blocks!\n".repeat(320).into_bytes();
    fs::write(&input, &content).unwrap();
    (dir, input, content)
}

fn s(p: &Path) -> &str {
    p.to_str().unwrap()
}

// ── Round trips ──────────────────────────────────────────────────────────────

#[test]
fn test_cli_roundtrip_with_exact_size() {
    let (dir, input, content) = make_temp_input();
    let packed = dir.path().join("out.lz4b");
    let restored = dir.path().join("restored.txt");

    let out = run(dir.path(), &["compress", s(&input), s(&packed)]);
    assert!(out.status.success(), "compress: {}", String::from_utf8_lossy(&out.stderr));
    assert!(fs::metadata(&packed).unwrap().len() < content.len() as u64);

    let size = content.len().to_string();
    let out = run(dir.path(), &["decompress", "--size", &size, s(&packed), s(&restored)]);
    assert!(out.status.success(), "decompress: {}", String::from_utf8_lossy(&out.stderr));
    assert_eq!(fs::read(&restored).unwrap(), content);
}

#[test]
fn test_cli_roundtrip_default_names() {
    let (dir, input, content) = make_temp_input();
    assert!(run(dir.path(), &["compress", "--hc", s(&input)]).status.success());
    let packed = dir.path().join("input.txt.lz4b");
    assert!(packed.exists());

    fs::remove_file(&input).unwrap();
    assert!(run(dir.path(), &["decompress", s(&packed)]).status.success());
    assert_eq!(fs::read(&input).unwrap(), content);
}

#[test]
fn test_cli_hc_levels_and_fast_acceleration() {
    let (dir, input, content) = make_temp_input();
    let flag_sets: [&[&str]; 3] = [&["--level", "12"], &["--hc", "--level", "3"], &["--fast", "20"]];
    for flags in flag_sets {
        let packed = dir.path().join("x.lz4b");
        let restored = dir.path().join("x.txt");
        let mut args = vec!["-f", "compress"];
        args.extend_from_slice(flags);
        args.extend([s(&input), s(&packed)]);
        let out = run(dir.path(), &args);
        assert!(out.status.success(), "{flags:?}: {}", String::from_utf8_lossy(&out.stderr));

        let out = run(dir.path(), &["-f", "decompress", "--max-size", "100000", s(&packed), s(&restored)]);
        assert!(out.status.success(), "{flags:?}");
        assert_eq!(fs::read(&restored).unwrap(), content, "{flags:?}");
    }
}

// ── Failures ─────────────────────────────────────────────────────────────────

#[test]
fn test_cli_refuses_to_overwrite_without_force() {
    let (dir, input, _) = make_temp_input();
    let packed = dir.path().join("taken.lz4b");
    fs::write(&packed, b"existing").unwrap();

    let out = run(dir.path(), &["compress", s(&input), s(&packed)]);
    assert_eq!(out.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&out.stderr).contains("already exists"));
    assert_eq!(fs::read(&packed).unwrap(), b"existing");

    let out = run(dir.path(), &["-f", "compress", s(&input), s(&packed)]);
    assert!(out.status.success());
    assert_ne!(fs::read(&packed).unwrap(), b"existing");
}

#[test]
fn test_cli_wrong_size_fails() {
    let (dir, input, content) = make_temp_input();
    let packed = dir.path().join("p.lz4b");
    assert!(run(dir.path(), &["compress", s(&input), s(&packed)]).status.success());

    let size = (content.len() - 1).to_string();
    let out = run(dir.path(), &["decompress", "--size", &size, s(&packed), s(&dir.path().join("o"))]);
    assert_eq!(out.status.code(), Some(1));
    let out = run(dir.path(), &["decompress", "--max-size", "10", s(&packed), s(&dir.path().join("o"))]);
    assert_eq!(out.status.code(), Some(1));
}

#[test]
fn test_cli_corrupt_block_fails() {
    let dir = TempDir::new().unwrap();
    let bad = dir.path().join("bad.lz4b");
    fs::write(&bad, [0x1Fu8, b'a', 0x09, 0x00, 0x00]).unwrap();
    let out = run(dir.path(), &["decompress", s(&bad)]);
    assert_eq!(out.status.code(), Some(1));
    assert!(!dir.path().join("bad").exists());
}

#[test]
fn test_cli_nonexistent_input() {
    let dir = TempDir::new().unwrap();
    let out = run(dir.path(), &["compress", "no_such_file_lz4blk"]);
    assert_eq!(out.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&out.stderr).contains("no_such_file_lz4blk"));
}

#[test]
fn test_cli_conflicting_flags_rejected() {
    let (dir, input, _) = make_temp_input();
    let out = run(dir.path(), &["compress", "--fast", "2", "--hc", s(&input)]);
    assert!(!out.status.success());
    let out = run(dir.path(), &["decompress", "--size", "1", "--max-size", "2", s(&input)]);
    assert!(!out.status.success());
}

// ── Quiet mode, version, bench ───────────────────────────────────────────────

#[test]
fn test_cli_quiet_prints_nothing() {
    let (dir, input, _) = make_temp_input();
    let out = run(dir.path(), &["-q", "compress", s(&input)]);
    assert!(out.status.success());
    assert!(out.stderr.is_empty(), "{}", String::from_utf8_lossy(&out.stderr));
    assert!(out.stdout.is_empty());
}

#[test]
fn test_cli_version() {
    let out = run(Path::new("."), &["--version"]);
    assert!(out.status.success());
    assert!(String::from_utf8_lossy(&out.stdout).contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_cli_bench_files() {
    let (dir, input, _) = make_temp_input();
    let out = run(dir.path(), &["bench", "-i", "1", s(&input)]);
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("input.txt"), "{stdout}");
    assert!(stdout.contains("MB/s"));

    let out = run(dir.path(), &["bench", "--hc", "--level", "4", "-i", "1", s(&input)]);
    assert!(out.status.success());
}

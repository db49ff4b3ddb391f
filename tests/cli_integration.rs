// tests/cli_integration.rs — black-box tests of the `blpk` binary.
//
// Drives the compiled binary through std::process::Command and asserts on
// exit codes, derived filenames and the single-line error diagnostics.

use std::fs;
use std::path::PathBuf;
use std::process::Command;

use tempfile::TempDir;

/// Locate the `blpk` binary produced by Cargo.
fn blpk_bin() -> PathBuf {
    // CARGO_BIN_EXE_blpk is set by Cargo when running integration tests.
    if let Ok(p) = std::env::var("CARGO_BIN_EXE_blpk") {
        return PathBuf::from(p);
    }
    let mut p = std::env::current_exe().unwrap();
    p.pop();
    if p.ends_with("deps") {
        p.pop();
    }
    p.push("blpk");
    p
}

/// Create a TempDir containing a compressible input file of ~64 KiB.
fn make_temp_input() -> (TempDir, PathBuf) {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("input.bin");
    let data: Vec<u8> = (0..16_384u32).flat_map(|i| i.to_le_bytes()).collect();
    fs::write(&input, data).unwrap();
    (dir, input)
}

// ── 1. Compress / decompress roundtrip with derived filenames ─────────────────

#[test]
fn compress_decompress_roundtrip_with_default_names() {
    let (dir, input) = make_temp_input();
    let original = fs::read(&input).unwrap();

    let status = Command::new(blpk_bin())
        .args(["compress", input.to_str().unwrap()])
        .status()
        .expect("failed to run blpk compress");
    assert!(status.success(), "compress should exit 0");

    let packed = dir.path().join("input.bin.blp");
    assert!(packed.exists(), "derived .blp output should exist");

    // Decompressing would recreate input.bin, which still exists — so this
    // needs --force.
    let status = Command::new(blpk_bin())
        .args(["--force", "decompress", packed.to_str().unwrap()])
        .status()
        .expect("failed to run blpk decompress");
    assert!(status.success(), "decompress should exit 0");

    assert_eq!(fs::read(&input).unwrap(), original);
}

// ── 2. Subcommand aliases and explicit output names ───────────────────────────

#[test]
fn aliases_and_explicit_output_names() {
    let (dir, input) = make_temp_input();
    let original = fs::read(&input).unwrap();
    let packed = dir.path().join("packed.blp");
    let restored = dir.path().join("restored.bin");

    let status = Command::new(blpk_bin())
        .args([
            "c",
            "--chunk-size",
            "16K",
            input.to_str().unwrap(),
            packed.to_str().unwrap(),
        ])
        .status()
        .unwrap();
    assert!(status.success());

    let status = Command::new(blpk_bin())
        .args(["d", packed.to_str().unwrap(), restored.to_str().unwrap()])
        .status()
        .unwrap();
    assert!(status.success());

    assert_eq!(fs::read(&restored).unwrap(), original);
}

// ── 3. --version and --help ───────────────────────────────────────────────────

#[test]
fn version_exits_zero_and_names_the_crate_version() {
    let output = Command::new(blpk_bin()).arg("--version").output().unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("0.1.1"), "got: {stdout}");
}

#[test]
fn help_exits_zero_and_shows_usage() {
    let output = Command::new(blpk_bin()).arg("--help").output().unwrap();
    assert!(output.status.success());
    let combined = format!(
        "{}{}",
        String::from_utf8_lossy(&output.stdout),
        String::from_utf8_lossy(&output.stderr)
    );
    assert!(combined.to_lowercase().contains("usage"), "got: {combined}");
}

// ── 4. Exit code 1 on errors ──────────────────────────────────────────────────

#[test]
fn missing_input_exits_one() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("absent.bin");
    let output = Command::new(blpk_bin())
        .args(["compress", missing.to_str().unwrap()])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("does not exist"), "got: {stderr}");
}

#[test]
fn existing_output_needs_force() {
    let (dir, input) = make_temp_input();
    let packed = dir.path().join("input.bin.blp");
    fs::write(&packed, b"occupied").unwrap();

    let output = Command::new(blpk_bin())
        .args(["compress", input.to_str().unwrap()])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("exists"), "got: {stderr}");

    let status = Command::new(blpk_bin())
        .args(["--force", "compress", input.to_str().unwrap()])
        .status()
        .unwrap();
    assert!(status.success(), "--force should allow the overwrite");
}

#[test]
fn usage_errors_exit_one() {
    let output = Command::new(blpk_bin())
        .args(["compress", "--no-such-flag", "whatever.bin"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));

    let output = Command::new(blpk_bin())
        .args(["compress", "--clevel", "11", "whatever.bin"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn decompress_without_extension_exits_one() {
    let dir = TempDir::new().unwrap();
    let oddly_named = dir.path().join("archive.dat");
    fs::write(&oddly_named, b"not a container").unwrap();

    let output = Command::new(blpk_bin())
        .args(["decompress", oddly_named.to_str().unwrap()])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains(".blp"), "got: {stderr}");
}

#[test]
fn no_check_extension_requires_output_name() {
    let (dir, input) = make_temp_input();
    let packed = dir.path().join("renamed.bin");
    let status = Command::new(blpk_bin())
        .args([
            "compress",
            input.to_str().unwrap(),
            packed.to_str().unwrap(),
        ])
        .status()
        .unwrap();
    assert!(status.success());

    let output = Command::new(blpk_bin())
        .args(["decompress", "-e", packed.to_str().unwrap()])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));

    let restored = dir.path().join("restored.bin");
    let status = Command::new(blpk_bin())
        .args([
            "decompress",
            "-e",
            packed.to_str().unwrap(),
            restored.to_str().unwrap(),
        ])
        .status()
        .unwrap();
    assert!(status.success());
    assert_eq!(fs::read(&restored).unwrap(), fs::read(&input).unwrap());
}

#[test]
fn corrupt_magic_exits_one() {
    let dir = TempDir::new().unwrap();
    let bogus = dir.path().join("bogus.blp");
    fs::write(&bogus, b"xxxx\x01\x00\x00\x00\x01\x00\x00\x00\x00\x00\x00\x00").unwrap();

    let output = Command::new(blpk_bin())
        .args(["decompress", bogus.to_str().unwrap()])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("magic"), "got: {stderr}");
}

// ── 5. Verbosity ──────────────────────────────────────────────────────────────

#[test]
fn verbose_mode_prefixes_diagnostics() {
    let (dir, input) = make_temp_input();
    let packed = dir.path().join("verbose.blp");
    let output = Command::new(blpk_bin())
        .args([
            "--verbose",
            "compress",
            input.to_str().unwrap(),
            packed.to_str().unwrap(),
        ])
        .output()
        .unwrap();
    assert!(output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("blpk: "), "got: {stderr}");
    assert!(stderr.contains("nchunks"), "got: {stderr}");
}

#[test]
fn nthreads_option_is_accepted() {
    let (dir, input) = make_temp_input();
    let packed = dir.path().join("threaded.blp");
    let status = Command::new(blpk_bin())
        .args([
            "--nthreads",
            "2",
            "compress",
            input.to_str().unwrap(),
            packed.to_str().unwrap(),
        ])
        .status()
        .unwrap();
    assert!(status.success());
}

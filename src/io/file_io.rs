//! File I/O primitives for the pack/unpack pipeline.
//!
//! Entry points:
//! - [`check_paths`]    — existence policy for the input/output pair
//! - [`open_src_file`]  — buffered, seekable reader over the input
//! - [`create_dst_file`] — truncating writer over the output
//! - [`file_size`]      — byte length of a regular file
//! - [`read_exact_or_short`] — `read_exact` that reports how far it got
//!
//! Both handles use scoped ownership; they are released on every exit path,
//! success or failure, by drop.

use std::fs::{File, OpenOptions};
use std::io::{BufReader, ErrorKind, Read};
use std::path::Path;

use crate::cli::constants::VERBOSE;
use crate::error::{Error, Result};
use crate::verbose;

/// Enforces the path policy: the input must exist, the output must not —
/// unless `force` permits overwriting.
pub fn check_paths(in_file: &Path, out_file: &Path, force: bool) -> Result<()> {
    if !in_file.exists() {
        return Err(Error::FileMissing(in_file.to_owned()));
    }
    if out_file.exists() {
        if !force {
            return Err(Error::FileExists(out_file.to_owned()));
        }
        verbose!(VERBOSE, "overwriting existing file: {}", out_file.display());
    }
    verbose!(VERBOSE, "input file is: {}", in_file.display());
    verbose!(VERBOSE, "output file is: {}", out_file.display());
    Ok(())
}

/// Opens the input for buffered sequential reading (with relative seeks).
pub fn open_src_file(path: &Path) -> Result<BufReader<File>> {
    let file = File::open(path)?;
    Ok(BufReader::new(file))
}

/// Opens the output for writing, truncating anything already there.
///
/// The overwrite policy lives in [`check_paths`]; by the time this runs the
/// caller has decided the path may be clobbered.
pub fn create_dst_file(path: &Path) -> Result<File> {
    let file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(path)?;
    Ok(file)
}

/// Returns the size in bytes of the file at `path`.
pub fn file_size(path: &Path) -> Result<u64> {
    Ok(std::fs::metadata(path)?.len())
}

/// Fills `buf` completely or fails with [`Error::ShortRead`] naming the byte
/// counts, unlike `Read::read_exact` which discards them.
pub fn read_exact_or_short(reader: &mut impl Read, buf: &mut [u8]) -> Result<()> {
    let wanted = buf.len();
    let mut got = 0usize;
    while got < wanted {
        match reader.read(&mut buf[got..]) {
            Ok(0) => return Err(Error::ShortRead { wanted, got }),
            Ok(n) => got += n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e.into()),
        }
    }
    Ok(())
}

// ─── Tests ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use tempfile::TempDir;

    #[test]
    fn check_paths_missing_input() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("absent.bin");
        let out = dir.path().join("out.blp");
        assert!(matches!(
            check_paths(&missing, &out, false),
            Err(Error::FileMissing(_))
        ));
    }

    #[test]
    fn check_paths_existing_output_needs_force() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("in.bin");
        let out = dir.path().join("out.blp");
        std::fs::write(&input, b"data").unwrap();
        std::fs::write(&out, b"already here").unwrap();
        assert!(matches!(
            check_paths(&input, &out, false),
            Err(Error::FileExists(_))
        ));
        assert!(check_paths(&input, &out, true).is_ok());
    }

    #[test]
    fn file_size_reports_length() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("sized.bin");
        std::fs::write(&path, vec![0u8; 12345]).unwrap();
        assert_eq!(file_size(&path).unwrap(), 12345);
    }

    #[test]
    fn create_dst_file_truncates() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.blp");
        std::fs::write(&path, b"previous contents").unwrap();
        drop(create_dst_file(&path).unwrap());
        assert_eq!(file_size(&path).unwrap(), 0);
    }

    #[test]
    fn read_exact_or_short_reports_progress() {
        let mut reader = Cursor::new(vec![1u8, 2, 3]);
        let mut buf = [0u8; 8];
        match read_exact_or_short(&mut reader, &mut buf) {
            Err(Error::ShortRead { wanted, got }) => {
                assert_eq!(wanted, 8);
                assert_eq!(got, 3);
            }
            other => panic!("expected ShortRead, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn read_exact_or_short_fills_buffer() {
        let mut reader = Cursor::new((0u8..64).collect::<Vec<u8>>());
        let mut buf = [0u8; 64];
        read_exact_or_short(&mut reader, &mut buf).unwrap();
        assert_eq!(buf[63], 63);
    }
}

//! Crate-wide error taxonomy.
//!
//! Every fallible operation in the container core returns [`Result`]. All
//! kinds are fatal: nothing is retried, and no partial output file is cleaned
//! up automatically. The binary prints each error as a single line and exits
//! non-zero.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// All error kinds the container core can produce.
#[derive(Debug)]
pub enum Error {
    /// A human-readable size string failed to parse.
    InvalidSize(String),
    /// Mutually exclusive or otherwise illegal arguments were supplied.
    InvalidArgument(String),
    /// The planner cannot produce a legal partition.
    Chunking(String),
    /// Header encode was called with an illegal chunk count.
    OutOfRange(String),
    /// The container header's first four bytes are not `blpk`.
    BadMagic([u8; 4]),
    /// The container header is structurally unusable (wrong length,
    /// nonsensical chunk count).
    BadFormat(String),
    /// The container declares a format version this build does not read.
    UnsupportedVersion { expected: u8, found: u8 },
    /// Input ended before a chunk's expected byte count was read.
    ShortRead { wanted: usize, got: usize },
    /// An OS-level read/write/open/stat failure.
    Io(io::Error),
    /// The output path exists and overwriting was not forced.
    FileExists(PathBuf),
    /// The input path does not exist.
    FileMissing(PathBuf),
    /// The block codec rejected or could not reproduce a buffer.
    Codec(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidSize(msg) => write!(f, "invalid size: {}", msg),
            Error::InvalidArgument(msg) => write!(f, "invalid argument: {}", msg),
            Error::Chunking(msg) => write!(f, "chunking error: {}", msg),
            Error::OutOfRange(msg) => write!(f, "out of range: {}", msg),
            Error::BadMagic(found) => write!(
                f,
                "the magic marker 'blpk' is missing from the header, \
                 instead we found: {:?}",
                String::from_utf8_lossy(found)
            ),
            Error::BadFormat(msg) => write!(f, "bad container format: {}", msg),
            Error::UnsupportedVersion { expected, found } => write!(
                f,
                "format version of file was not '{}' as expected, but '{}'",
                expected, found
            ),
            Error::ShortRead { wanted, got } => write!(
                f,
                "short read: wanted {} bytes but input ended after {}",
                wanted, got
            ),
            Error::Io(e) => write!(f, "i/o error: {}", e),
            Error::FileExists(path) => {
                write!(f, "output file '{}' exists!", path.display())
            }
            Error::FileMissing(path) => {
                write!(f, "input file '{}' does not exist!", path.display())
            }
            Error::Codec(msg) => write!(f, "blosc codec error: {}", msg),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for Error {
    fn from(e: io::Error) -> Self {
        Error::Io(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_is_single_line() {
        let errors: Vec<Error> = vec![
            Error::InvalidSize("'Q' is not a valid suffix".into()),
            Error::InvalidArgument("specify chunk_count or chunk_size, not both".into()),
            Error::Chunking("chunk_size must be greater than zero".into()),
            Error::OutOfRange("nchunks too large".into()),
            Error::BadMagic(*b"xxxx"),
            Error::BadFormat("header length 12, expected 16".into()),
            Error::UnsupportedVersion { expected: 1, found: 2 },
            Error::ShortRead { wanted: 64, got: 12 },
            Error::Io(io::Error::new(io::ErrorKind::Other, "disk on fire")),
            Error::FileExists(PathBuf::from("out.blp")),
            Error::FileMissing(PathBuf::from("in.bin")),
            Error::Codec("ctbytes smaller than header".into()),
        ];
        for e in errors {
            let rendered = e.to_string();
            assert!(!rendered.contains('\n'), "multi-line error: {:?}", rendered);
            assert!(!rendered.is_empty());
        }
    }

    #[test]
    fn io_error_converts_and_chains() {
        let e: Error = io::Error::new(io::ErrorKind::NotFound, "gone").into();
        assert!(matches!(e, Error::Io(_)));
        assert!(std::error::Error::source(&e).is_some());
    }
}

//! Named digest functions with fixed digest sizes.
//!
//! The registry is ordered; positions are stable so future container versions
//! can refer to a checksum by numeric code. Format version 1 validates the
//! selected name but does not place digest bytes on the wire.
//!
//! The integer hashes (`adler32`, `crc32`) are masked to 32 unsigned bits and
//! packed little-endian so digests are identical across platforms.

use adler32::RollingAdler32;
use md5::{Digest, Md5};
use sha1::Sha1;
use sha2::{Sha224, Sha256, Sha384, Sha512};

use crate::error::{Error, Result};

/// Checksum selected for a packed file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Checksum {
    None = 0,
    Adler32 = 1,
    Crc32 = 2,
    Md5 = 3,
    Sha1 = 4,
    Sha224 = 5,
    Sha256 = 6,
    Sha384 = 7,
    Sha512 = 8,
}

/// Registry in canonical order.
pub const CHECKSUMS: [Checksum; 9] = [
    Checksum::None,
    Checksum::Adler32,
    Checksum::Crc32,
    Checksum::Md5,
    Checksum::Sha1,
    Checksum::Sha224,
    Checksum::Sha256,
    Checksum::Sha384,
    Checksum::Sha512,
];

/// Checksum applied when the user does not choose one.
pub const DEFAULT_CHECKSUM: Checksum = Checksum::Adler32;

impl Checksum {
    /// The user-visible name, as accepted by `--checksum`.
    pub fn name(self) -> &'static str {
        match self {
            Checksum::None => "None",
            Checksum::Adler32 => "adler32",
            Checksum::Crc32 => "crc32",
            Checksum::Md5 => "md5",
            Checksum::Sha1 => "sha1",
            Checksum::Sha224 => "sha224",
            Checksum::Sha256 => "sha256",
            Checksum::Sha384 => "sha384",
            Checksum::Sha512 => "sha512",
        }
    }

    /// Digest length in bytes.
    pub fn size(self) -> usize {
        match self {
            Checksum::None => 0,
            Checksum::Adler32 | Checksum::Crc32 => 4,
            Checksum::Md5 => 16,
            Checksum::Sha1 => 20,
            Checksum::Sha224 => 28,
            Checksum::Sha256 => 32,
            Checksum::Sha384 => 48,
            Checksum::Sha512 => 64,
        }
    }

    /// Stable numeric code: the registry position.
    #[inline]
    pub fn code(self) -> u8 {
        self as u8
    }

    /// Computes the digest of `data`, always exactly [`size`](Self::size)
    /// bytes long.
    pub fn digest(self, data: &[u8]) -> Vec<u8> {
        match self {
            Checksum::None => Vec::new(),
            Checksum::Adler32 => {
                let h = RollingAdler32::from_buffer(data).hash() & 0xffff_ffff;
                h.to_le_bytes().to_vec()
            }
            Checksum::Crc32 => {
                let h = crc32fast::hash(data) & 0xffff_ffff;
                h.to_le_bytes().to_vec()
            }
            Checksum::Md5 => Md5::digest(data).to_vec(),
            Checksum::Sha1 => Sha1::digest(data).to_vec(),
            Checksum::Sha224 => Sha224::digest(data).to_vec(),
            Checksum::Sha256 => Sha256::digest(data).to_vec(),
            Checksum::Sha384 => Sha384::digest(data).to_vec(),
            Checksum::Sha512 => Sha512::digest(data).to_vec(),
        }
    }

    /// Looks a checksum up by name.
    pub fn from_name(name: &str) -> Result<Checksum> {
        CHECKSUMS
            .iter()
            .copied()
            .find(|c| c.name() == name)
            .ok_or_else(|| {
                Error::InvalidArgument(format!(
                    "'{}' is not a known checksum, use one of: {}",
                    name,
                    available_names().join(", ")
                ))
            })
    }
}

/// Names of all registered checksums, in canonical order.
pub fn available_names() -> Vec<&'static str> {
    CHECKSUMS.iter().map(|c| c.name()).collect()
}

// ─── Tests ────────────────────────────────────────────────────────────────────

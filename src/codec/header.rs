//! The 16-byte header the block codec prepends to every compressed block.
//!
//! ```text
//! |-0-|-1-|-2-|-3-|-4-|-5-|-6-|-7-|-8-|-9-|-A-|-B-|-C-|-D-|-E-|-F-|
//!   ^   ^   ^   ^ |     nbytes    |   blocksize   |    ctbytes    |
//!   |   |   |   |
//!   |   |   |   +--typesize
//!   |   |   +------flags
//!   |   +----------versionlz
//!   +--------------version
//! ```
//!
//! The first four fields are single bytes; the last three are little-endian
//! `u32`. `nbytes` is the uncompressed length, `ctbytes` the total compressed
//! length *including* these 16 header bytes. The container's unpacker treats
//! the structure as read-only external data and only relies on `ctbytes`.

use crate::config::BLOSC_HEADER_LENGTH;

// ── Flags byte ────────────────────────────────────────────────────────────────

/// Byte-wise shuffle was applied before compression.
pub const FLAG_DOSHUFFLE: u8 = 0x01;
/// The payload is a plain copy of the uncompressed bytes.
pub const FLAG_MEMCPYED: u8 = 0x02;
/// Compressor format code stored in bits 5..8 of the flags byte.
pub const LZ4_COMPFORMAT: u8 = 1;

/// Blosc format version written by this codec (Blosc 1.x stable series).
pub const BLOSC_VERSION_FORMAT: u8 = 2;
/// Version of the internal compressor format.
pub const LZ4_VERSION_FORMAT: u8 = 1;

/// Decoded form of a codec-block header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BloscHeader {
    pub version: u8,
    pub versionlz: u8,
    pub flags: u8,
    pub typesize: u8,
    pub nbytes: u32,
    pub blocksize: u32,
    pub ctbytes: u32,
}

#[inline]
fn read_le_u32(src: &[u8], offset: usize) -> u32 {
    u32::from_le_bytes([
        src[offset],
        src[offset + 1],
        src[offset + 2],
        src[offset + 3],
    ])
}

/// Decodes a codec-block header.
///
/// Infallible: the fixed-size parameter makes short input unrepresentable,
/// and every 16-byte buffer decodes to *some* header. Callers validate the
/// field values, not this function.
pub fn decode_blosc_header(buffer: &[u8; BLOSC_HEADER_LENGTH]) -> BloscHeader {
    BloscHeader {
        version: buffer[0],
        versionlz: buffer[1],
        flags: buffer[2],
        typesize: buffer[3],
        nbytes: read_le_u32(buffer, 4),
        blocksize: read_le_u32(buffer, 8),
        ctbytes: read_le_u32(buffer, 12),
    }
}

impl BloscHeader {
    /// Encodes the header into its wire form.
    pub fn encode(&self) -> [u8; BLOSC_HEADER_LENGTH] {
        let mut buffer = [0u8; BLOSC_HEADER_LENGTH];
        buffer[0] = self.version;
        buffer[1] = self.versionlz;
        buffer[2] = self.flags;
        buffer[3] = self.typesize;
        buffer[4..8].copy_from_slice(&self.nbytes.to_le_bytes());
        buffer[8..12].copy_from_slice(&self.blocksize.to_le_bytes());
        buffer[12..16].copy_from_slice(&self.ctbytes.to_le_bytes());
        buffer
    }
}

// ─── Tests ────────────────────────────────────────────────────────────────────

//! Container header codec.
//!
//! The bloscpack header is 16 bytes:
//!
//! ```text
//! |-0-|-1-|-2-|-3-|-4-|-5-|-6-|-7-|-8-|-9-|-A-|-B-|-C-|-D-|-E-|-F-|
//! | b   l   p   k | ^ | RESERVED  |           nchunks             |
//!                version
//! ```
//!
//! The first four bytes are the magic marker `blpk`. Byte 4 is the unsigned
//! format version. Bytes 5..8 are reserved, written as zero and ignored on
//! read. Bytes 8..16 are a signed little-endian 64-bit chunk count; the value
//! −1 designates an unknown count and is reserved for future streaming use.

use crate::config::{BLOSCPACK_HEADER_LENGTH, MAGIC, MAX_CHUNKS};
use crate::error::{Error, Result};

#[inline]
fn write_le_i64(dst: &mut [u8], offset: usize, value: i64) {
    dst[offset..offset + 8].copy_from_slice(&value.to_le_bytes());
}

#[inline]
fn read_le_i64(src: &[u8], offset: usize) -> i64 {
    i64::from_le_bytes([
        src[offset],
        src[offset + 1],
        src[offset + 2],
        src[offset + 3],
        src[offset + 4],
        src[offset + 5],
        src[offset + 6],
        src[offset + 7],
    ])
}

/// Encodes the container header.
///
/// `nchunks = None` writes the reserved −1 sentinel. Fails with
/// [`Error::OutOfRange`] when the chunk count exceeds the signed 64-bit
/// range.
pub fn create_bloscpack_header(
    nchunks: Option<u64>,
    format_version: u8,
) -> Result<[u8; BLOSCPACK_HEADER_LENGTH]> {
    let encoded: i64 = match nchunks {
        None => -1,
        Some(n) => {
            if n > MAX_CHUNKS {
                return Err(Error::OutOfRange(format!(
                    "'nchunks' must be in the range 0 <= n <= {}, not '{}'",
                    MAX_CHUNKS, n
                )));
            }
            n as i64
        }
    };
    let mut header = [0u8; BLOSCPACK_HEADER_LENGTH];
    header[0..4].copy_from_slice(MAGIC);
    header[4] = format_version;
    // bytes 5..8 stay zero (reserved)
    write_le_i64(&mut header, 8, encoded);
    Ok(header)
}

/// Decodes a container header, returning `(nchunks, format_version)`.
///
/// Fails with [`Error::BadFormat`] when `buffer` is not exactly 16 bytes and
/// [`Error::BadMagic`] when the marker is absent. The reserved bytes are not
/// validated.
pub fn decode_bloscpack_header(buffer: &[u8]) -> Result<(i64, u8)> {
    if buffer.len() != BLOSCPACK_HEADER_LENGTH {
        return Err(Error::BadFormat(format!(
            "attempting to decode a bloscpack header of length '{}', not '{}'",
            buffer.len(),
            BLOSCPACK_HEADER_LENGTH
        )));
    }
    if &buffer[0..4] != MAGIC {
        return Err(Error::BadMagic([buffer[0], buffer[1], buffer[2], buffer[3]]));
    }
    let format_version = buffer[4];
    let nchunks = read_le_i64(buffer, 8);
    Ok((nchunks, format_version))
}

// ─── Tests ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_exact_bytes_for_single_chunk_v1() {
        let header = create_bloscpack_header(Some(1), 1).unwrap();
        assert_eq!(
            header,
            [
                0x62, 0x6C, 0x70, 0x6B, 0x01, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x00,
                0x00, 0x00, 0x00
            ]
        );
    }

    #[test]
    fn round_trip_over_corner_counts_and_versions() {
        for n in [0u64, 1, 42, MAX_CHUNKS] {
            for v in [0u8, 1, 255] {
                let header = create_bloscpack_header(Some(n), v).unwrap();
                let (nchunks, version) = decode_bloscpack_header(&header).unwrap();
                assert_eq!(nchunks, n as i64);
                assert_eq!(version, v);
            }
        }
    }

    #[test]
    fn none_encodes_the_unknown_sentinel() {
        let header = create_bloscpack_header(None, 1).unwrap();
        let (nchunks, _) = decode_bloscpack_header(&header).unwrap();
        assert_eq!(nchunks, -1);
    }

    #[test]
    fn nchunks_above_signed_range_is_rejected() {
        let result = create_bloscpack_header(Some(MAX_CHUNKS + 1), 1);
        assert!(matches!(result, Err(Error::OutOfRange(_))));
    }

    #[test]
    fn wrong_magic_is_rejected() {
        let mut buffer = [0u8; 16];
        buffer[0..4].copy_from_slice(b"xxxx");
        assert!(matches!(
            decode_bloscpack_header(&buffer),
            Err(Error::BadMagic(found)) if &found == b"xxxx"
        ));
    }

    #[test]
    fn wrong_length_is_rejected() {
        assert!(matches!(
            decode_bloscpack_header(&[0u8; 12]),
            Err(Error::BadFormat(_))
        ));
        assert!(matches!(
            decode_bloscpack_header(&[0u8; 17]),
            Err(Error::BadFormat(_))
        ));
    }

    #[test]
    fn reserved_bytes_are_ignored_on_read() {
        let mut header = create_bloscpack_header(Some(7), 1).unwrap();
        header[5] = 0xAB;
        header[6] = 0xCD;
        header[7] = 0xEF;
        let (nchunks, version) = decode_bloscpack_header(&header).unwrap();
        assert_eq!((nchunks, version), (7, 1));
    }
}

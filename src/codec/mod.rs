//! Block codec: blosc-format compression of bounded buffers.
//!
//! Every call compresses or decompresses one self-describing block: a
//! 16-byte header ([`header::BloscHeader`]) followed by the payload. Buffers
//! are bounded by [`MAX_BUFFER`](crate::config::MAX_BUFFER); the container
//! layer above is responsible for cutting larger inputs into chunks.
//!
//! Internally a buffer is split into cache-friendly blocks which are
//! LZ4-compressed independently and written as length-prefixed streams, so
//! the worker pool can process them in parallel. A buffer that does not
//! shrink is stored as a plain copy (the `MEMCPYED` flag), which also bounds
//! the worst-case output at `input + 16` bytes.
//!
//! The pool size is fixed when the [`Codec`] is constructed and flows in from
//! the command line; nothing here consults process-global state.

pub mod header;
pub mod shuffle;

use std::borrow::Cow;

use rayon::prelude::*;

use crate::config::{BLOSC_HEADER_LENGTH, DEFAULT_CLEVEL, DEFAULT_SHUFFLE, DEFAULT_TYPESIZE, MAX_BUFFER};
use crate::error::{Error, Result};

use header::{
    decode_blosc_header, BloscHeader, BLOSC_VERSION_FORMAT, FLAG_DOSHUFFLE, FLAG_MEMCPYED,
    LZ4_COMPFORMAT, LZ4_VERSION_FORMAT,
};
use shuffle::{shuffle, unshuffle};

// L1 cache ballpark used as the base block size.
const L1: usize = 32 * 1024;

/// Settings forwarded to the codec for each compressed buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BloscOpts {
    /// Size in bytes of the atomic type in the data; drives the shuffle
    /// filter and block alignment.
    pub typesize: usize,
    /// Compression level, 0..=9. Level 0 stores without compression.
    pub clevel: u8,
    /// Whether to apply the byte-shuffle filter.
    pub shuffle: bool,
}

impl Default for BloscOpts {
    fn default() -> Self {
        BloscOpts {
            typesize: DEFAULT_TYPESIZE,
            clevel: DEFAULT_CLEVEL,
            shuffle: DEFAULT_SHUFFLE,
        }
    }
}

/// Typesizes the header cannot represent degrade to a plain byte stream.
#[inline]
fn effective_typesize(typesize: usize) -> usize {
    if typesize == 0 || typesize > u8::MAX as usize {
        1
    } else {
        typesize
    }
}

/// Block size for one compressed buffer: starts at the L1 ballpark, grows
/// with the compression level, and is aligned down to the typesize.
fn compute_blocksize(clevel: u8, typesize: usize, nbytes: usize) -> usize {
    if nbytes < L1 {
        return nbytes.max(1);
    }
    let mut blocksize = match clevel {
        0 | 1 => L1,
        2..=4 => 4 * L1,
        5..=7 => 16 * L1,
        _ => 32 * L1,
    };
    if blocksize > nbytes {
        blocksize = nbytes;
    }
    if typesize > 1 && blocksize > typesize {
        blocksize -= blocksize % typesize;
    }
    blocksize.max(1)
}

/// Handle to the block codec and its worker pool.
///
/// Construction is the single point where the thread count is configured;
/// clones of the handle are not needed because compression and decompression
/// take `&self`.
pub struct Codec {
    pool: rayon::ThreadPool,
    nthreads: usize,
}

impl Codec {
    /// Builds a codec whose internal operations use `nthreads` workers.
    pub fn new(nthreads: usize) -> Result<Codec> {
        let nthreads = nthreads.max(1);
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(nthreads)
            .build()
            .map_err(|e| Error::Codec(format!("cannot build worker pool: {}", e)))?;
        Ok(Codec { pool, nthreads })
    }

    /// Number of worker threads the codec was configured with.
    pub fn nthreads(&self) -> usize {
        self.nthreads
    }

    /// Compresses `src` into a self-describing block.
    ///
    /// Fails only when `src` exceeds `MAX_BUFFER`; incompressible data falls
    /// back to stored form rather than erroring.
    pub fn compress(&self, src: &[u8], opts: &BloscOpts) -> Result<Vec<u8>> {
        let nbytes = src.len();
        if nbytes as u64 > MAX_BUFFER {
            return Err(Error::Codec(format!(
                "buffer of {} bytes exceeds the maximum of {}",
                nbytes, MAX_BUFFER
            )));
        }
        let typesize = effective_typesize(opts.typesize);
        if opts.clevel == 0 || nbytes == 0 {
            return Ok(stored_block(src, typesize));
        }

        let do_shuffle = opts.shuffle && typesize > 1 && nbytes >= typesize;
        let filtered: Cow<[u8]> = if do_shuffle {
            Cow::Owned(shuffle(typesize, src))
        } else {
            Cow::Borrowed(src)
        };

        let blocksize = compute_blocksize(opts.clevel, typesize, nbytes);
        let streams: Vec<Vec<u8>> = self.pool.install(|| {
            filtered
                .par_chunks(blocksize)
                .map(|block| lz4_flex::block::compress(block))
                .collect()
        });

        // A stream at least as long as its block is stored raw behind a
        // zero length prefix; if the whole payload fails to shrink, fall
        // back to a plain copy of the unfiltered input.
        let payload_len: usize = streams
            .iter()
            .zip(filtered.chunks(blocksize))
            .map(|(s, block)| 4 + s.len().min(block.len()))
            .sum();
        if payload_len >= nbytes {
            return Ok(stored_block(src, typesize));
        }

        let ctbytes = BLOSC_HEADER_LENGTH + payload_len;
        let mut flags = LZ4_COMPFORMAT << 5;
        if do_shuffle {
            flags |= FLAG_DOSHUFFLE;
        }
        let blosc_header = BloscHeader {
            version: BLOSC_VERSION_FORMAT,
            versionlz: LZ4_VERSION_FORMAT,
            flags,
            typesize: typesize as u8,
            nbytes: nbytes as u32,
            blocksize: blocksize as u32,
            ctbytes: ctbytes as u32,
        };

        let mut out = Vec::with_capacity(ctbytes);
        out.extend_from_slice(&blosc_header.encode());
        for (stream, block) in streams.iter().zip(filtered.chunks(blocksize)) {
            if stream.len() >= block.len() {
                out.extend_from_slice(&0u32.to_le_bytes());
                out.extend_from_slice(block);
            } else {
                out.extend_from_slice(&(stream.len() as u32).to_le_bytes());
                out.extend_from_slice(stream);
            }
        }
        debug_assert_eq!(out.len(), ctbytes);
        Ok(out)
    }

    /// Decompresses one self-describing block back into the original bytes.
    pub fn decompress(&self, src: &[u8]) -> Result<Vec<u8>> {
        if src.len() < BLOSC_HEADER_LENGTH {
            return Err(Error::Codec(format!(
                "buffer of {} bytes is shorter than the blosc header",
                src.len()
            )));
        }
        let mut raw_header = [0u8; BLOSC_HEADER_LENGTH];
        raw_header.copy_from_slice(&src[..BLOSC_HEADER_LENGTH]);
        let blosc_header = decode_blosc_header(&raw_header);

        let nbytes = blosc_header.nbytes as usize;
        let ctbytes = blosc_header.ctbytes as usize;
        if ctbytes < BLOSC_HEADER_LENGTH || ctbytes > src.len() {
            return Err(Error::Codec(format!(
                "ctbytes {} inconsistent with a buffer of {} bytes",
                ctbytes,
                src.len()
            )));
        }
        let payload = &src[BLOSC_HEADER_LENGTH..ctbytes];

        if blosc_header.flags & FLAG_MEMCPYED != 0 {
            if payload.len() != nbytes {
                return Err(Error::Codec(format!(
                    "stored block carries {} bytes, header declares {}",
                    payload.len(),
                    nbytes
                )));
            }
            return Ok(payload.to_vec());
        }
        if nbytes == 0 {
            return Ok(Vec::new());
        }

        let blocksize = blosc_header.blocksize as usize;
        if blocksize == 0 {
            return Err(Error::Codec("blocksize of zero in a non-empty block".to_owned()));
        }
        let nblocks = nbytes.div_ceil(blocksize);

        // First pass walks the length prefixes to locate every stream.
        struct Stream {
            start: usize,
            len: usize,
            raw: bool,
        }
        let mut streams = Vec::with_capacity(nblocks);
        let mut offset = 0usize;
        for i in 0..nblocks {
            let expected = if i + 1 == nblocks {
                nbytes - blocksize * (nblocks - 1)
            } else {
                blocksize
            };
            if offset + 4 > payload.len() {
                return Err(Error::Codec("truncated stream prefix".to_owned()));
            }
            let csize = u32::from_le_bytes([
                payload[offset],
                payload[offset + 1],
                payload[offset + 2],
                payload[offset + 3],
            ]) as usize;
            offset += 4;
            let raw = csize == 0;
            let len = if raw { expected } else { csize };
            if offset + len > payload.len() {
                return Err(Error::Codec("truncated stream payload".to_owned()));
            }
            streams.push(Stream {
                start: offset,
                len,
                raw,
            });
            offset += len;
        }

        let mut out = vec![0u8; nbytes];
        self.pool.install(|| {
            out.par_chunks_mut(blocksize)
                .zip(streams.par_iter())
                .try_for_each(|(dst, stream)| {
                    let bytes = &payload[stream.start..stream.start + stream.len];
                    if stream.raw {
                        dst.copy_from_slice(bytes);
                        return Ok(());
                    }
                    let written = lz4_flex::block::decompress_into(bytes, dst)
                        .map_err(|e| Error::Codec(format!("lz4: {}", e)))?;
                    if written != dst.len() {
                        return Err(Error::Codec(format!(
                            "block decompressed to {} bytes, expected {}",
                            written,
                            dst.len()
                        )));
                    }
                    Ok(())
                })
        })?;

        if blosc_header.flags & FLAG_DOSHUFFLE != 0 && blosc_header.typesize > 1 {
            out = unshuffle(blosc_header.typesize as usize, &out);
        }
        Ok(out)
    }
}

/// Builds a stored (`MEMCPYED`) block: header plus a plain copy of `src`.
fn stored_block(src: &[u8], typesize: usize) -> Vec<u8> {
    let nbytes = src.len();
    let ctbytes = BLOSC_HEADER_LENGTH + nbytes;
    let blosc_header = BloscHeader {
        version: BLOSC_VERSION_FORMAT,
        versionlz: LZ4_VERSION_FORMAT,
        flags: FLAG_MEMCPYED | (LZ4_COMPFORMAT << 5),
        typesize: typesize as u8,
        nbytes: nbytes as u32,
        blocksize: nbytes as u32,
        ctbytes: ctbytes as u32,
    };
    let mut out = Vec::with_capacity(ctbytes);
    out.extend_from_slice(&blosc_header.encode());
    out.extend_from_slice(src);
    out
}

// ─── Tests ────────────────────────────────────────────────────────────────────

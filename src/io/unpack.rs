//! Unpacking: `.blp` → container header → per-chunk codec calls → output.
//!
//! Each chunk is recovered by peeking at the codec-block header to learn the
//! block's total compressed length (`ctbytes`), rewinding those 16 bytes, and
//! handing the codec the full self-describing block. Trailing bytes after the
//! last chunk are permitted and ignored.
//!
//! ```text
//!  [INIT] --read header--> [BODY(remaining=N)]
//!  [BODY(k>0)] --decompress chunk--> [BODY(k-1)]
//!  [BODY(0)] --> [DONE]
//!  any state on i/o error --> [FAILED]
//! ```

use std::io::Write;
use std::path::Path;

use crate::cli::constants::{DEBUG, VERBOSE};
use crate::codec::header::decode_blosc_header;
use crate::codec::Codec;
use crate::config::{BLOSCPACK_HEADER_LENGTH, BLOSC_HEADER_LENGTH, FORMAT_VERSION};
use crate::container::decode_bloscpack_header;
use crate::error::{Error, Result};
use crate::io::file_io::{create_dst_file, file_size, open_src_file, read_exact_or_short};
use crate::pretty::pretty_size;
use crate::verbose;

/// Decompresses the container at `in_file` into `out_file`.
pub fn unpack_file(in_file: &Path, out_file: &Path, codec: &Codec) -> Result<()> {
    let in_file_size = file_size(in_file)?;
    verbose!(VERBOSE, "input file size: {}", pretty_size(in_file_size));

    let mut input = open_src_file(in_file)?;
    let mut output = create_dst_file(out_file)?;

    verbose!(DEBUG, "reading bloscpack header");
    let mut raw_header = [0u8; BLOSCPACK_HEADER_LENGTH];
    read_exact_or_short(&mut input, &mut raw_header).map_err(|e| match e {
        Error::ShortRead { got, .. } => Error::BadFormat(format!(
            "file ends after {} bytes, before a complete bloscpack header",
            got
        )),
        other => other,
    })?;
    let (nchunks, format_version) = decode_bloscpack_header(&raw_header)?;
    verbose!(
        DEBUG,
        "nchunks: {}, format_version: {}",
        nchunks,
        format_version
    );
    if format_version != FORMAT_VERSION {
        return Err(Error::UnsupportedVersion {
            expected: FORMAT_VERSION,
            found: format_version,
        });
    }
    if nchunks < 0 {
        return Err(Error::BadFormat(format!(
            "chunk count of {}; unknown-length containers are not supported",
            nchunks
        )));
    }

    let mut out_file_size = 0u64;
    let mut compressed = Vec::new();
    for i in 0..nchunks {
        verbose!(
            DEBUG,
            "decompressing chunk '{}'{}",
            i,
            if i == nchunks - 1 { " (last)" } else { "" }
        );
        let mut blosc_raw = [0u8; BLOSC_HEADER_LENGTH];
        read_exact_or_short(&mut input, &mut blosc_raw)?;
        let blosc_header = decode_blosc_header(&blosc_raw);
        verbose!(DEBUG, "blosc header: {:?}", blosc_header);
        let ctbytes = blosc_header.ctbytes as usize;
        if ctbytes < BLOSC_HEADER_LENGTH {
            return Err(Error::Codec(format!(
                "block declares ctbytes of {}, smaller than its own header",
                ctbytes
            )));
        }
        // Rewind so the codec sees the full self-describing block.
        input.seek_relative(-(BLOSC_HEADER_LENGTH as i64))?;
        compressed.resize(ctbytes, 0);
        read_exact_or_short(&mut input, &mut compressed)?;
        let decompressed = codec.decompress(&compressed)?;
        output.write_all(&decompressed)?;
        out_file_size += decompressed.len() as u64;
        verbose!(
            DEBUG,
            "chunk written, in: {} out: {}",
            pretty_size(ctbytes as u64),
            pretty_size(decompressed.len() as u64)
        );
    }
    output.flush()?;

    verbose!(VERBOSE, "output file size: {}", pretty_size(out_file_size));
    verbose!(
        VERBOSE,
        "decompression ratio: {:.6}",
        out_file_size as f64 / in_file_size as f64
    );
    Ok(())
}

// ─── Tests ────────────────────────────────────────────────────────────────────

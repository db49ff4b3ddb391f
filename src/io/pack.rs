//! Packing: input file → chunking plan → per-chunk codec calls → `.blp`.
//!
//! The pipeline is single-threaded and strictly sequential: reads, codec
//! calls and writes happen in program order, and chunks land in the output in
//! input order. The container header is written before any chunk bytes.

use std::io::Write;
use std::path::Path;

use crate::chunking::calculate_nchunks;
use crate::cli::constants::{DEBUG, VERBOSE};
use crate::codec::{BloscOpts, Codec};
use crate::config::FORMAT_VERSION;
use crate::container::create_bloscpack_header;
use crate::error::Result;
use crate::io::file_io::{create_dst_file, file_size, open_src_file, read_exact_or_short};
use crate::pretty::pretty_size;
use crate::verbose;

/// Compresses `in_file` into the container at `out_file`.
///
/// `nchunks` and `chunk_size` are mutually exclusive chunking proposals; with
/// neither the planner splits at the codec's buffer ceiling. The caller is
/// expected to have run the path policy checks already; this function fails
/// on I/O errors rather than re-validating.
pub fn pack_file(
    in_file: &Path,
    out_file: &Path,
    blosc_opts: &BloscOpts,
    codec: &Codec,
    nchunks: Option<u64>,
    chunk_size: Option<u64>,
) -> Result<()> {
    let in_file_size = file_size(in_file)?;
    verbose!(VERBOSE, "input file size: {}", pretty_size(in_file_size));

    let plan = calculate_nchunks(in_file_size, nchunks, chunk_size)?;
    let header = create_bloscpack_header(Some(plan.nchunks), FORMAT_VERSION)?;
    verbose!(DEBUG, "bloscpack header: {:02x?}", header);

    let mut input = open_src_file(in_file)?;
    let mut output = create_dst_file(out_file)?;
    output.write_all(&header)?;
    let mut out_file_size = header.len() as u64;

    let mut chunk = Vec::new();
    for (i, want) in plan.sizes().enumerate() {
        chunk.resize(want as usize, 0);
        read_exact_or_short(&mut input, &mut chunk)?;
        let compressed = codec.compress(&chunk, blosc_opts)?;
        output.write_all(&compressed)?;
        out_file_size += compressed.len() as u64;
        verbose!(
            DEBUG,
            "chunk '{}'{} written, in: {} out: {}",
            i,
            if i as u64 == plan.nchunks - 1 { " (last)" } else { "" },
            pretty_size(want),
            pretty_size(compressed.len() as u64)
        );
    }
    output.flush()?;

    verbose!(VERBOSE, "output file size: {}", pretty_size(out_file_size));
    verbose!(
        VERBOSE,
        "compression ratio: {:.6}",
        out_file_size as f64 / in_file_size as f64
    );
    Ok(())
}

// ─── Tests ────────────────────────────────────────────────────────────────────

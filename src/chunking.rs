//! Chunking planner.
//!
//! [`calculate_nchunks`] divides an input of known size into a partition that
//! is legal for the block codec: every chunk fits in `MAX_BUFFER`, the chunk
//! count fits the container header's signed 64-bit field, and the chunk sizes
//! sum to the input size exactly. The caller proposes either a chunk count or
//! a chunk size, never both; with neither, the input is split at the codec's
//! buffer ceiling.

use crate::cli::constants::{DEBUG, VERBOSE};
use crate::config::{MAX_BUFFER, MAX_CHUNKS};
use crate::error::{Error, Result};
use crate::pretty::pretty_size;
use crate::verbose;

/// A legal partition of the input.
///
/// For a single chunk the regular `chunk_size` is 0 by convention and
/// `last_chunk_size` covers the whole input. For `nchunks >= 2`,
/// `chunk_size * (nchunks - 1) + last_chunk_size` equals the input size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PartitionPlan {
    /// Number of chunks, at least 1.
    pub nchunks: u64,
    /// Size of every chunk except the last.
    pub chunk_size: u64,
    /// Size of the final chunk, at least 1.
    pub last_chunk_size: u64,
}

impl PartitionPlan {
    /// Per-chunk byte counts in file order.
    pub fn sizes(&self) -> impl Iterator<Item = u64> + '_ {
        let (nchunks, chunk_size, last) = (self.nchunks, self.chunk_size, self.last_chunk_size);
        (0..nchunks).map(move |i| if i + 1 == nchunks { last } else { chunk_size })
    }

    /// Total bytes covered by the plan.
    pub fn total(&self) -> u64 {
        self.chunk_size * (self.nchunks - 1) + self.last_chunk_size
    }
}

/// Splits `in_file_size` at a proposed chunk size.
fn plan_from_chunk_size(in_file_size: u64, chunk_size: u64) -> Result<PartitionPlan> {
    if chunk_size > in_file_size {
        return Err(Error::Chunking(format!(
            "your value of 'chunk_size': {} is greater than the input size: {}",
            chunk_size, in_file_size
        )));
    }
    if chunk_size == 0 {
        return Err(Error::Chunking(
            "'chunk_size' must be greater than zero".to_owned(),
        ));
    }
    if chunk_size == in_file_size {
        return Ok(PartitionPlan {
            nchunks: 1,
            chunk_size: 0,
            last_chunk_size: in_file_size,
        });
    }
    let quotient = in_file_size / chunk_size;
    let remainder = in_file_size % chunk_size;
    if remainder == 0 {
        Ok(PartitionPlan {
            nchunks: quotient,
            chunk_size,
            last_chunk_size: chunk_size,
        })
    } else {
        Ok(PartitionPlan {
            nchunks: quotient + 1,
            chunk_size,
            last_chunk_size: remainder,
        })
    }
}

/// Splits `in_file_size` into a proposed number of chunks.
///
/// When the division has a remainder and `nchunks >= 3`, the regular chunk
/// size is `in_file_size / (nchunks - 1)` rather than `in_file_size /
/// nchunks`: the remainder lands in the last chunk instead of leaving a tiny
/// tail. Preserved for bit-for-bit compatibility with existing archives.
fn plan_from_nchunks(in_file_size: u64, nchunks: u64) -> Result<PartitionPlan> {
    if nchunks > in_file_size {
        return Err(Error::Chunking(format!(
            "your value of 'nchunks': {} is greater than the input size: {}",
            nchunks, in_file_size
        )));
    }
    if nchunks == 0 {
        return Err(Error::Chunking(
            "'nchunks' must be greater than zero".to_owned(),
        ));
    }
    if nchunks == 1 {
        return Ok(PartitionPlan {
            nchunks: 1,
            chunk_size: 0,
            last_chunk_size: in_file_size,
        });
    }
    let quotient = in_file_size / nchunks;
    let remainder = in_file_size % nchunks;
    if remainder == 0 {
        Ok(PartitionPlan {
            nchunks,
            chunk_size: quotient,
            last_chunk_size: quotient,
        })
    } else if nchunks == 2 {
        Ok(PartitionPlan {
            nchunks: 2,
            chunk_size: quotient,
            last_chunk_size: in_file_size - quotient,
        })
    } else {
        let regular = in_file_size / (nchunks - 1);
        Ok(PartitionPlan {
            nchunks,
            chunk_size: regular,
            last_chunk_size: in_file_size - regular * (nchunks - 1),
        })
    }
}

/// Determines the chunking for an input of `in_file_size` bytes.
///
/// At most one of `nchunks` and `chunk_size` may be supplied. With neither,
/// the input is split at `MAX_BUFFER` (clamped to the input size, so anything
/// that fits one codec buffer becomes a single chunk).
///
/// Fails with [`Error::InvalidArgument`] when both proposals are present and
/// with [`Error::Chunking`] when no legal plan exists: empty input, a
/// proposal out of bounds, a chunk that would exceed `MAX_BUFFER`, a chunk
/// count beyond `MAX_CHUNKS`, or a degenerate zero-byte final chunk.
pub fn calculate_nchunks(
    in_file_size: u64,
    nchunks: Option<u64>,
    chunk_size: Option<u64>,
) -> Result<PartitionPlan> {
    if nchunks.is_some() && chunk_size.is_some() {
        return Err(Error::InvalidArgument(
            "either specify 'nchunks' or 'chunk_size', but not both".to_owned(),
        ));
    }
    if in_file_size == 0 {
        return Err(Error::Chunking(
            "input of size zero cannot be chunked".to_owned(),
        ));
    }
    let plan = match (nchunks, chunk_size) {
        (Some(n), None) => {
            verbose!(DEBUG, "'nchunks' proposed");
            plan_from_nchunks(in_file_size, n)?
        }
        (None, Some(size)) => {
            verbose!(DEBUG, "'chunk_size' proposed");
            plan_from_chunk_size(in_file_size, size)?
        }
        (None, None) => plan_from_chunk_size(in_file_size, MAX_BUFFER.min(in_file_size))?,
        (Some(_), Some(_)) => unreachable!("rejected above"),
    };
    if plan.chunk_size > MAX_BUFFER || plan.last_chunk_size > MAX_BUFFER {
        return Err(Error::Chunking(format!(
            "chunk sizes larger than the codec buffer ceiling: \
             nchunks: {} chunk_size: {} last_chunk_size: {} MAX_BUFFER: {}",
            plan.nchunks, plan.chunk_size, plan.last_chunk_size, MAX_BUFFER
        )));
    }
    if plan.nchunks > MAX_CHUNKS {
        return Err(Error::Chunking(format!(
            "nchunks: '{}' is greater than the MAX_CHUNKS: '{}'",
            plan.nchunks, MAX_CHUNKS
        )));
    }
    if plan.last_chunk_size == 0 {
        // Reachable when nchunks - 1 divides the input evenly but nchunks
        // does not; such proposals have no legal remainder distribution.
        return Err(Error::Chunking(format!(
            "'nchunks': {} leaves a zero-byte final chunk for input size {}, \
             use a different chunk count",
            plan.nchunks, in_file_size
        )));
    }
    verbose!(VERBOSE, "nchunks: {}", plan.nchunks);
    verbose!(VERBOSE, "chunk_size: {}", pretty_size(plan.chunk_size));
    verbose!(DEBUG, "last_chunk_size: {}", pretty_size(plan.last_chunk_size));
    Ok(plan)
}

// ─── Tests ────────────────────────────────────────────────────────────────────

//! bloscpack — a chunked `.blp` file container over the blosc block format.
//!
//! Arbitrarily large files are split into bounded chunks, each compressed
//! independently by the block codec and written back-to-back behind a 16-byte
//! container header. Decompression reads the container header, then walks the
//! self-describing codec blocks one chunk at a time.
//!
//! The crate exposes the container pieces individually — the chunking
//! planner, the two header codecs, the pack/unpack pipeline — plus the block
//! codec itself; the `blpk` binary wires them to a command line.

pub mod checksum;
pub mod chunking;
pub mod cli;
pub mod codec;
pub mod config;
pub mod container;
pub mod error;
pub mod io;
pub mod pretty;

// ─────────────────────────────────────────────────────────────────────────────
// Top-level convenience re-exports for the most common API entry points.
// ─────────────────────────────────────────────────────────────────────────────

/// Chunking planner: input size + proposal → legal partition.
pub use chunking::{calculate_nchunks, PartitionPlan};
/// Block codec handle and its per-buffer options.
pub use codec::{BloscOpts, Codec};
/// Container header encode/decode.
pub use container::{create_bloscpack_header, decode_bloscpack_header};
/// Crate-wide error type and result alias.
pub use error::{Error, Result};
/// End-to-end file operations.
pub use io::{pack_file, unpack_file};
/// Checksum registry.
pub use checksum::{available_names, Checksum, CHECKSUMS, DEFAULT_CHECKSUM};
/// Human-readable byte sizes.
pub use pretty::{pretty_size, reverse_pretty};

// ─────────────────────────────────────────────────────────────────────────────
// Version API
// ─────────────────────────────────────────────────────────────────────────────

/// Crate version string, as reported by `blpk --version`.
pub const BLOSCPACK_VERSION_STRING: &str = env!("CARGO_PKG_VERSION");

/// Returns the library version string.
pub fn version_string() -> &'static str {
    BLOSCPACK_VERSION_STRING
}

// config.rs — Compile-time configuration constants for the `.blp` container.

/// Magic marker at the start of every packed file.
pub const MAGIC: &[u8; 4] = b"blpk";

/// File-name extension for packed files.
pub const EXTENSION: &str = ".blp";

/// Container format version written by the packer.
pub const FORMAT_VERSION: u8 = 1;

/// Highest format version expressible in the header's one-byte field.
pub const MAX_FORMAT_VERSION: u8 = u8::MAX;

/// Length of the container header in bytes.
pub const BLOSCPACK_HEADER_LENGTH: usize = 16;

/// Length of the header the block codec prepends to every compressed block.
pub const BLOSC_HEADER_LENGTH: usize = 16;

/// Maximum number of chunks a packed file may declare.
/// The chunk-count field is a signed little-endian 64-bit integer; -1 is
/// reserved for "unknown" and never produced by the packer.
pub const MAX_CHUNKS: u64 = i64::MAX as u64;

/// Maximum size of a single buffer handed to the block codec.
/// INT_MAX minus the 16-byte block-header overhead, matching
/// BLOSC_MAX_BUFFERSIZE from the reference codec.
pub const MAX_BUFFER: u64 = (i32::MAX as u64) - (BLOSC_HEADER_LENGTH as u64);

/// Upper bound for the `--nthreads` option.
pub const MAX_NTHREADS: usize = 256;

// Blosc option defaults (see codec::BloscOpts).
pub const DEFAULT_TYPESIZE: usize = 4;
pub const DEFAULT_CLEVEL: u8 = 7;
pub const DEFAULT_SHUFFLE: bool = true;

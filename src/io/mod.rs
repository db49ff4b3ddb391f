//! Sequential file I/O pipeline: open/stat helpers, the packer and the
//! unpacker.

pub mod file_io;
pub mod pack;
pub mod unpack;

pub use file_io::{check_paths, create_dst_file, file_size, open_src_file};
pub use pack::pack_file;
pub use unpack::unpack_file;

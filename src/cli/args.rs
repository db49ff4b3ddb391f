//! Command-line argument definitions for the `blpk` binary.
//!
//! The surface has two subcommands, `compress` (alias `c`) and `decompress`
//! (alias `d`), plus global flags for verbosity, overwrite policy and the
//! codec's worker-thread count. Parsing is declarative via clap derive;
//! [`process_compression_args`] and [`process_decompression_args`] apply the
//! output-name conventions that clap cannot express (deriving `<out_file>`
//! from `<in_file>` and the `.blp` extension rules).

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::checksum::Checksum;
use crate::config::{DEFAULT_CLEVEL, DEFAULT_TYPESIZE, EXTENSION, MAX_NTHREADS};
use crate::error::{Error, Result};
use crate::pretty::reverse_pretty;

/// Version string shown by `--version`: crate version plus the container
/// format version the packer writes.
const VERSION_TEXT: &str = concat!(env!("CARGO_PKG_VERSION"), " (container format 1)");

/// command line de/compression with blosc
#[derive(Debug, Parser)]
#[command(name = "blpk", version = VERSION_TEXT, about, propagate_version = true)]
pub struct Cli {
    /// be verbose about actions
    #[arg(short, long, global = true, conflicts_with = "debug")]
    pub verbose: bool,

    /// print debugging output too
    #[arg(short, long, global = true)]
    pub debug: bool,

    /// disable overwrite checks for existing files (use with caution)
    #[arg(short, long, global = true)]
    pub force: bool,

    /// set number of threads (default: number of cores)
    #[arg(
        short,
        long,
        global = true,
        value_name = "[1, 256]",
        value_parser = clap::value_parser!(u64).range(1..=MAX_NTHREADS as u64)
    )]
    pub nthreads: Option<u64>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// perform compression on file
    #[command(visible_alias = "c")]
    Compress(CompressArgs),
    /// perform decompression on file
    #[command(visible_alias = "d")]
    Decompress(DecompressArgs),
}

#[derive(Debug, Args)]
pub struct CompressArgs {
    /// typesize for blosc
    #[arg(short, long, value_name = "<size>", default_value_t = DEFAULT_TYPESIZE)]
    pub typesize: usize,

    /// compression level
    #[arg(
        short = 'l',
        long,
        value_name = "[0, 9]",
        default_value_t = DEFAULT_CLEVEL,
        value_parser = clap::value_parser!(u8).range(0..=9)
    )]
    pub clevel: u8,

    /// deactivate shuffle
    #[arg(short = 's', long = "no-shuffle")]
    pub no_shuffle: bool,

    /// set desired number of chunks
    #[arg(
        short = 'c',
        long,
        value_name = "[1, 2^63-1]",
        conflicts_with = "chunk_size"
    )]
    pub nchunks: Option<u64>,

    /// set desired chunk size, e.g. 1M or 512K
    #[arg(short = 'z', long, value_name = "<size>", value_parser = parse_chunk_size)]
    pub chunk_size: Option<u64>,

    /// set desired checksum
    #[arg(
        short = 'k',
        long,
        value_name = "<checksum>",
        default_value = "adler32",
        value_parser = parse_checksum
    )]
    pub checksum: Checksum,

    /// file to be compressed
    #[arg(value_name = "<in_file>")]
    pub in_file: PathBuf,

    /// file to compress to
    #[arg(value_name = "<out_file>")]
    pub out_file: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct DecompressArgs {
    /// disable checking input file for extension (*.blp)
    /// (requires use of <out_file>)
    #[arg(short = 'e', long)]
    pub no_check_extension: bool,

    /// file to be decompressed
    #[arg(value_name = "<in_file>")]
    pub in_file: PathBuf,

    /// file to decompress to
    #[arg(value_name = "<out_file>")]
    pub out_file: Option<PathBuf>,
}

fn parse_chunk_size(value: &str) -> std::result::Result<u64, String> {
    match reverse_pretty(value) {
        Ok(0) => Err("chunk size must be greater than zero".to_owned()),
        Ok(bytes) => Ok(bytes),
        Err(e) => Err(e.to_string()),
    }
}

fn parse_checksum(value: &str) -> std::result::Result<Checksum, String> {
    Checksum::from_name(value).map_err(|e| e.to_string())
}

/// Resolves the input/output pair for compression: a missing `<out_file>`
/// appends the `.blp` extension to the input name.
pub fn process_compression_args(args: &CompressArgs) -> (PathBuf, PathBuf) {
    let out_file = args.out_file.clone().unwrap_or_else(|| {
        let mut name = args.in_file.clone().into_os_string();
        name.push(EXTENSION);
        PathBuf::from(name)
    });
    (args.in_file.clone(), out_file)
}

/// Resolves the input/output pair for decompression.
///
/// Unless `--no-check-extension` is set, the input must carry the `.blp`
/// extension; a missing `<out_file>` is derived by stripping it. With the
/// check disabled, an explicit `<out_file>` becomes mandatory.
pub fn process_decompression_args(args: &DecompressArgs) -> Result<(PathBuf, PathBuf)> {
    if args.no_check_extension {
        return match &args.out_file {
            Some(out_file) => Ok((args.in_file.clone(), out_file.clone())),
            None => Err(Error::InvalidArgument(
                "--no-check-extension requires use of <out_file>".to_owned(),
            )),
        };
    }
    let name = args.in_file.to_string_lossy();
    match name.strip_suffix(EXTENSION) {
        Some(base) => {
            let out_file = args
                .out_file
                .clone()
                .unwrap_or_else(|| PathBuf::from(base.to_owned()));
            Ok((args.in_file.clone(), out_file))
        }
        None => Err(Error::InvalidArgument(format!(
            "input file '{}' does not end with '{}'",
            name, EXTENSION
        ))),
    }
}

// ─── Tests ────────────────────────────────────────────────────────────────────

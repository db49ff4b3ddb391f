//! Binary entry point for the `blpk` command-line tool.
//!
//! Control flow:
//!
//! 1. `Cli::try_parse` processes all flags; `--help`/`--version` exit 0 and
//!    any usage error exits 1 (every failure of this tool exits 1).
//! 2. The verbosity global is set once from `--verbose`/`--debug`.
//! 3. [`run`] resolves filenames, enforces the path policy, builds the codec
//!    with the requested worker count and dispatches to pack or unpack.
//!
//! All file handles are released by RAII on every path, including failure; no
//! partial output is cleaned up automatically.

use std::process;

use anyhow::Context;
use clap::error::ErrorKind as ClapErrorKind;
use clap::Parser;

use bloscpack::checksum::Checksum;
use bloscpack::cli::args::{
    process_compression_args, process_decompression_args, Cli, Command,
};
use bloscpack::cli::constants::{set_verbosity_level, DEBUG, PREFIX, VERBOSE};
use bloscpack::codec::{BloscOpts, Codec};
use bloscpack::io::{check_paths, pack_file, unpack_file};
use bloscpack::verbose;

fn run(cli: Cli) -> anyhow::Result<()> {
    let nthreads = cli
        .nthreads
        .map(|n| n as usize)
        .unwrap_or_else(num_cpus::get);
    verbose!(
        VERBOSE,
        "using {} thread{}",
        nthreads,
        if nthreads > 1 { "s" } else { "" }
    );
    let codec = Codec::new(nthreads)?;

    match cli.command {
        Command::Compress(args) => {
            verbose!(VERBOSE, "getting ready for compression");
            let (in_file, out_file) = process_compression_args(&args);
            check_paths(&in_file, &out_file, cli.force)?;
            let blosc_opts = BloscOpts {
                typesize: args.typesize,
                clevel: args.clevel,
                shuffle: !args.no_shuffle,
            };
            verbose!(
                DEBUG,
                "blosc args are: typesize: {}, clevel: {}, shuffle: {}",
                blosc_opts.typesize,
                blosc_opts.clevel,
                blosc_opts.shuffle
            );
            if args.checksum != Checksum::Adler32 {
                verbose!(DEBUG, "checksum: {}", args.checksum.name());
            }
            pack_file(
                &in_file,
                &out_file,
                &blosc_opts,
                &codec,
                args.nchunks,
                args.chunk_size,
            )
            .with_context(|| format!("cannot pack '{}'", in_file.display()))?;
        }
        Command::Decompress(args) => {
            verbose!(VERBOSE, "getting ready for decompression");
            let (in_file, out_file) = process_decompression_args(&args)?;
            check_paths(&in_file, &out_file, cli.force)?;
            unpack_file(&in_file, &out_file, &codec)
                .with_context(|| format!("cannot unpack '{}'", in_file.display()))?;
        }
    }
    verbose!(VERBOSE, "done");
    Ok(())
}

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // Help and version are not failures; everything else is, and
            // every failure of this tool exits 1.
            let code = match e.kind() {
                ClapErrorKind::DisplayHelp | ClapErrorKind::DisplayVersion => 0,
                _ => 1,
            };
            let _ = e.print();
            process::exit(code);
        }
    };

    if cli.debug {
        set_verbosity_level(DEBUG);
    } else if cli.verbose {
        set_verbosity_level(VERBOSE);
    }
    verbose!(DEBUG, "command line argument parsing complete");

    if let Err(e) = run(cli) {
        eprintln!("{}: error: {:#}", PREFIX, e);
        process::exit(1);
    }
}

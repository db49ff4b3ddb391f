//! Command-line surface: argument definitions and display infrastructure.

pub mod args;
pub mod constants;

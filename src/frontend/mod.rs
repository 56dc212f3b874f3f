//! Frontend components
//!
//! Command-line parsing and configuration for the `countlib` binary.

pub mod cli;
pub mod config;

pub use cli::main as cli_main;
pub use config::Config;

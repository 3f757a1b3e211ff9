//! Command-line interface for counting, sampling and enumerating partitions.
//!
//! Every command produces either a single count or a list of partitions;
//! rendering is newline-delimited with parts separated by spaces so output
//! pipes cleanly into other tools.

mod commands;

pub use commands::{
    Cli, CliError, Command, CommandOutput, ConjugateArgs, CountArgs, EnumerateArgs, SampleArgs,
    render_output, run_cli,
};

#[cfg(test)]
mod tests;

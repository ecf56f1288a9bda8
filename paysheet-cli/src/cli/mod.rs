//! Command-line interface definitions

pub mod commands;

use clap::{Parser, Subcommand};

use commands::compare::{CompareArgs, HeadersArgs};

#[derive(Parser)]
#[command(
    name = "paysheet-cli",
    version,
    about = "Reconcile multi-vendor payroll spreadsheets against a system of record"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate the header-mapping report only
    Headers(HeadersArgs),
    /// Run the full batch comparison across all vendor sheets
    Compare(CompareArgs),
}

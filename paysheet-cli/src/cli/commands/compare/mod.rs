//! Header-mapping and batch-comparison commands

mod handler;

pub use handler::{handle_compare_command, handle_headers_command};

use std::path::PathBuf;

use clap::{Args, ValueEnum};

use crate::sheets::DEFAULT_MAX_SCAN_ROWS;

/// Field comparison strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CompareMode {
    /// Decimal-truncated string equality
    Strict,
    /// Numeric tolerance with a name-normalized name column
    Tolerant,
}

#[derive(Args)]
pub struct HeadersArgs {
    /// Vendor workbook (one sheet per vendor)
    #[arg(long, value_name = "FILE")]
    pub vendor_file: PathBuf,

    /// System-of-record workbook (first sheet is used)
    #[arg(long, value_name = "FILE")]
    pub system_file: PathBuf,

    /// Map only this vendor sheet instead of every sheet
    #[arg(long)]
    pub sheet: Option<String>,

    /// Output workbook path (default: header_mapping_<timestamp>.xlsx)
    #[arg(long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Rows scanned when locating the header row
    #[arg(long, default_value_t = DEFAULT_MAX_SCAN_ROWS)]
    pub max_scan_rows: usize,
}

#[derive(Args)]
pub struct CompareArgs {
    /// Vendor workbook (one sheet per vendor)
    #[arg(long, value_name = "FILE")]
    pub vendor_file: PathBuf,

    /// System-of-record workbook (first sheet is used)
    #[arg(long, value_name = "FILE")]
    pub system_file: PathBuf,

    /// Directory for report artifacts
    #[arg(long, value_name = "DIR", default_value = "reports")]
    pub output_dir: PathBuf,

    /// Field comparison strategy (overrides the config file)
    #[arg(long, value_enum)]
    pub mode: Option<CompareMode>,

    /// Maximum absolute numeric difference tolerated in tolerant mode
    #[arg(long)]
    pub tolerance: Option<f64>,

    /// Column compared with name normalization in tolerant mode
    #[arg(long)]
    pub name_column: Option<String>,

    /// Only include non-matching rows in the differences report
    #[arg(long)]
    pub only_mismatches: bool,

    /// Also export the row differences as CSV
    #[arg(long)]
    pub csv: bool,

    /// Never prompt; pick the first employee-key candidate automatically
    #[arg(long)]
    pub non_interactive: bool,

    /// Rows scanned when locating the header row
    #[arg(long, default_value_t = DEFAULT_MAX_SCAN_ROWS)]
    pub max_scan_rows: usize,
}

//! Handlers for the headers and compare commands
//!
//! The batch loop processes vendor sheets strictly sequentially; every
//! per-sheet failure is reported and the remaining sheets continue.

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use chrono::Local;
use colored::*;
use dialoguer::Select;
use is_terminal::IsTerminal;

use super::{CompareArgs, CompareMode, HeadersArgs};
use crate::config::Config;
use crate::export::ReportWriter;
use crate::export::csv_exporter::export_row_differences_csv;
use crate::services::matching::{self, AzureOracle, MatchOutcome};
use crate::services::recon::{
    ComparePolicy, ComparisonMode, SheetReport, first_candidate, process_sheet,
};
use crate::sheets::WorkbookSource;

/// Resolve the effective comparison policy from config file and flags
fn build_policy(
    config: &Config,
    mode: Option<CompareMode>,
    tolerance: Option<f64>,
    name_column: Option<String>,
) -> ComparePolicy {
    let defaults = ComparePolicy::default();

    let mode = match mode {
        Some(CompareMode::Strict) => ComparisonMode::Strict,
        Some(CompareMode::Tolerant) => ComparisonMode::Tolerant,
        None => match config.compare.mode.as_deref() {
            Some("strict") => ComparisonMode::Strict,
            Some("tolerant") | None => defaults.mode,
            Some(other) => {
                log::warn!("Unknown comparison mode '{}' in config, using default", other);
                defaults.mode
            }
        },
    };

    ComparePolicy {
        mode,
        tolerance: tolerance
            .or(config.compare.tolerance)
            .unwrap_or(defaults.tolerance),
        name_column: name_column
            .or_else(|| config.compare.name_column.clone())
            .unwrap_or(defaults.name_column),
    }
}

fn timestamp() -> String {
    Local::now().format("%Y%m%d_%H%M%S").to_string()
}

/// Generate the header-mapping report without comparing rows
pub async fn handle_headers_command(args: HeadersArgs) -> Result<()> {
    if !args.vendor_file.exists() {
        bail!("Vendor file does not exist: {}", args.vendor_file.display());
    }
    if !args.system_file.exists() {
        bail!("System file does not exist: {}", args.system_file.display());
    }

    let config = Config::load()?;
    let oracle = AzureOracle::new(config.oracle_config());

    let mut system_book = WorkbookSource::open(&args.system_file)?;
    let system = system_book.load_first_sheet(args.max_scan_rows)?;

    let mut vendor_book = WorkbookSource::open(&args.vendor_file)?;
    let sheet_names = match &args.sheet {
        Some(name) => vec![name.clone()],
        None => vendor_book.sheet_names(),
    };

    let mut outcomes: Vec<(String, MatchOutcome)> = Vec::new();
    for name in sheet_names {
        let sheet = match vendor_book.load_sheet(&name, args.max_scan_rows) {
            Ok(sheet) => sheet,
            Err(e) => {
                println!("{} {}", "Warning:".yellow().bold(), e);
                continue;
            }
        };
        match matching::match_columns(&sheet.headers, &system.headers, &oracle).await {
            Ok(outcome) => outcomes.push((name, outcome)),
            Err(e) => {
                println!(
                    "{} header mapping failed for sheet '{}': {}",
                    "Error:".red().bold(),
                    name,
                    e
                );
            }
        }
    }

    if outcomes.is_empty() {
        bail!("No vendor sheet produced a header mapping");
    }

    let path = args
        .output
        .unwrap_or_else(|| PathBuf::from(format!("header_mapping_{}.xlsx", timestamp())));
    ReportWriter::write_header_mapping(&outcomes, &path)?;
    println!(
        "{} {}",
        "Header mapping exported:".green().bold(),
        path.display()
    );
    Ok(())
}

/// Run the full batch comparison across all vendor sheets
pub async fn handle_compare_command(args: CompareArgs) -> Result<()> {
    if !args.vendor_file.exists() {
        bail!("Vendor file does not exist: {}", args.vendor_file.display());
    }
    if !args.system_file.exists() {
        bail!("System file does not exist: {}", args.system_file.display());
    }

    let config = Config::load()?;
    let policy = build_policy(&config, args.mode, args.tolerance, args.name_column.clone());
    let oracle = AzureOracle::new(config.oracle_config());

    let mut system_book = WorkbookSource::open(&args.system_file)?;
    let system = system_book.load_first_sheet(args.max_scan_rows)?;
    log::info!(
        "System sheet loaded: {} columns, {} rows",
        system.headers.len(),
        system.rows.len()
    );

    let mut vendor_book = WorkbookSource::open(&args.vendor_file)?;
    let sheet_names = vendor_book.sheet_names();

    let interactive = !args.non_interactive && std::io::stdin().is_terminal();
    let selector: Box<dyn Fn(&[String]) -> usize> = if interactive {
        Box::new(|candidates: &[String]| {
            Select::new()
                .with_prompt("Multiple possible employee ID columns found, pick one")
                .items(candidates)
                .default(0)
                .interact()
                .unwrap_or_else(|e| {
                    log::warn!("Selection prompt failed ({}), using first candidate", e);
                    0
                })
        })
    } else {
        Box::new(first_candidate)
    };

    let mut reports: Vec<SheetReport> = Vec::new();
    for name in sheet_names {
        let sheet = match vendor_book.load_sheet(&name, args.max_scan_rows) {
            Ok(sheet) => sheet,
            Err(e) => {
                println!("{} skipping sheet '{}': {}", "Warning:".yellow().bold(), name, e);
                continue;
            }
        };

        match process_sheet(&sheet, &system, &oracle, &policy, selector.as_ref()).await {
            Ok(report) => {
                match report.recon.match_rate {
                    Some(rate) => println!(
                        "Sheet '{}' ({}): match rate {}",
                        name,
                        report.vendor_name,
                        format!("{:.2}%", rate * 100.0).bold()
                    ),
                    None => println!(
                        "Sheet '{}' ({}): no comparable columns",
                        name, report.vendor_name
                    ),
                }
                reports.push(report);
            }
            Err(e) if e.is_skip() => {
                println!("{} {}", "Warning:".yellow().bold(), e);
                log::warn!("Sheet skipped: {}", e);
            }
            Err(e) => {
                println!("{} sheet aborted: {}", "Error:".red().bold(), e);
                log::error!("Sheet aborted: {}", e);
            }
        }
    }

    if reports.is_empty() {
        bail!("No vendor sheet could be processed");
    }

    print_headcount_summary(&reports);

    std::fs::create_dir_all(&args.output_dir).with_context(|| {
        format!(
            "Failed to create output directory: {}",
            args.output_dir.display()
        )
    })?;

    let stamp = timestamp();
    let mapping_path = args
        .output_dir
        .join(format!("header_mapping_{}.xlsx", stamp));
    let comparison_path = args
        .output_dir
        .join(format!("row_comparison_{}.xlsx", stamp));

    let outcomes: Vec<(String, MatchOutcome)> = reports
        .iter()
        .map(|r| (r.sheet_name.clone(), r.outcome.clone()))
        .collect();
    ReportWriter::write_header_mapping(&outcomes, &mapping_path)?;
    ReportWriter::write_row_comparison(&reports, &comparison_path, args.only_mismatches)?;

    println!(
        "{} {}",
        "Header mapping exported:".green().bold(),
        mapping_path.display()
    );
    println!(
        "{} {}",
        "Row comparison exported:".green().bold(),
        comparison_path.display()
    );

    if args.csv {
        let csv_path = args.output_dir.join(format!("row_comparison_{}.csv", stamp));
        export_row_differences_csv(&reports, &csv_path, args.only_mismatches)?;
        println!(
            "{} {}",
            "CSV exported:".green().bold(),
            csv_path.display()
        );
    }

    Ok(())
}

fn print_headcount_summary(reports: &[SheetReport]) {
    println!();
    println!("{}", "Headcount Summary".bold());
    println!(
        "{:<20} {:>12} {:>12} {:>10} {:>15} {:>15}",
        "Vendor", "Vendor Count", "System Count", "Matching", "Only in Vendor", "Only in System"
    );
    for report in reports {
        let h = &report.recon.headcount;
        println!(
            "{:<20} {:>12} {:>12} {:>10} {:>15} {:>15}",
            h.vendor, h.vendor_count, h.system_count, h.matching, h.only_in_vendor, h.only_in_system
        );
    }
    println!();
}

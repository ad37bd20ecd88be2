//! Batch validation handler for the CLI.
//!
//! Reads the input spreadsheet, verifies every address strictly
//! sequentially with a fixed delay between calls, echoes invalid rows to
//! the operator as they are found, and writes the annotated spreadsheets.
//! Per-address failures degrade to error-path verdict rows and never abort
//! the run.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context;
use clap::Args;
use mailable_core::AppConfig;
use mailable_google::AddressVerdict;

use crate::pipeline::{build_google_client, verify_one};
use crate::table::{Table, TableFormat};

/// Verdict columns appended to every output row, in order.
const VERDICT_COLUMNS: [&str; 11] = [
    "validated_address",
    "is_valid",
    "validation_status",
    "is_po_box",
    "is_dpv_confirmed",
    "is_confirmed",
    "is_vacant",
    "is_no_stat",
    "is_cmra",
    "is_undeliverable",
    "dpv_confirmation_description",
];

#[derive(Debug, Args)]
pub struct ValidateArgs {
    /// Input spreadsheet (.csv, .xlsx, or .xls)
    #[arg(long)]
    pub(crate) input: PathBuf,

    /// Name of the column holding the addresses; defaults to the only
    /// column when the input has exactly one
    #[arg(long)]
    pub(crate) column: Option<String>,

    /// Directory the annotated spreadsheets are written to
    #[arg(long, default_value = "validation-results")]
    pub(crate) output_dir: PathBuf,

    /// Skip USPS CASS gating of the confirmed flag
    #[arg(long)]
    pub(crate) no_cass: bool,

    /// Region code applied when interpreting USPS signals
    #[arg(long, default_value = "US")]
    pub(crate) region_code: String,

    /// Process at most this many rows
    #[arg(long)]
    pub(crate) limit: Option<usize>,

    /// Preview the run without calling the network
    #[arg(long)]
    pub(crate) dry_run: bool,
}

/// Validate every address in the input spreadsheet.
///
/// # Errors
///
/// Returns an error when the input cannot be read, the address column
/// cannot be resolved, the client cannot be built, or an output file
/// cannot be written. Per-address API failures are recorded in the output
/// instead of propagated.
pub(crate) async fn run_validate(config: &AppConfig, args: &ValidateArgs) -> anyhow::Result<()> {
    let table = Table::read(&args.input)?;
    let format = TableFormat::from_path(&args.input)?;
    let column = resolve_address_column(&table, args.column.as_deref())?;

    let row_count = args
        .limit
        .map_or(table.rows.len(), |limit| table.rows.len().min(limit));

    if args.dry_run {
        println!(
            "dry-run: would validate {row_count} address(es) from column '{}' of {}",
            table.headers[column],
            args.input.display()
        );
        return Ok(());
    }

    let client = build_google_client(config)?;
    let enable_usps_cass = !args.no_cass;
    let delay = Duration::from_millis(config.inter_request_delay_ms);

    println!(
        "Validating {row_count} address(es) from '{}' (column '{}')...",
        args.input.display(),
        table.headers[column]
    );

    let mut annotated: Vec<Vec<String>> = Vec::with_capacity(row_count);
    let mut verdicts: Vec<AddressVerdict> = Vec::with_capacity(row_count);
    let mut invalid_count = 0usize;

    for row in table.rows.iter().take(row_count) {
        let address = row.get(column).map_or("", String::as_str);
        let verdict = verify_one(&client, address, &args.region_code, enable_usps_cass).await;

        if verdict.is_valid {
            println!("  \u{2713} {:<48} {}", preview(address), verdict.validation_status);
        } else {
            invalid_count += 1;
            println!("  \u{2717} {:<48} {}", preview(address), verdict.validation_status);
            println!("      suggested: {}", verdict.validated_address);
        }

        let mut out_row = row.clone();
        out_row.extend(verdict_columns(&verdict));
        annotated.push(out_row);
        verdicts.push(verdict);

        // Fixed spacing between calls keeps a sequential run within the
        // validation API's ~100 requests/minute allowance.
        tokio::time::sleep(delay).await;
    }

    println!("Processing complete: {invalid_count} invalid out of {row_count} address(es)");

    let mut headers = table.headers.clone();
    headers.extend(VERDICT_COLUMNS.iter().map(|c| (*c).to_string()));
    write_outputs(&args.output_dir, format, &headers, &annotated, &verdicts)?;

    Ok(())
}

/// Picks the address column: the named one, or the sole column when the
/// input has exactly one.
fn resolve_address_column(table: &Table, requested: Option<&str>) -> anyhow::Result<usize> {
    match requested {
        Some(name) => table.column_index(name).ok_or_else(|| {
            anyhow::anyhow!(
                "column '{name}' not found; available columns: {}",
                table.headers.join(", ")
            )
        }),
        None if table.headers.len() == 1 => Ok(0),
        None => anyhow::bail!(
            "input has {} columns; pass --column to pick the address column (available: {})",
            table.headers.len(),
            table.headers.join(", ")
        ),
    }
}

/// Renders the verdict as output cells, in [`VERDICT_COLUMNS`] order.
fn verdict_columns(verdict: &AddressVerdict) -> Vec<String> {
    vec![
        verdict.validated_address.clone(),
        verdict.is_valid.to_string(),
        verdict.validation_status.clone(),
        verdict.is_po_box.to_string(),
        verdict.is_dpv_confirmed.to_string(),
        verdict.is_confirmed.to_string(),
        verdict.is_vacant.to_string(),
        verdict.is_no_stat.to_string(),
        verdict.is_cmra.to_string(),
        verdict.is_undeliverable.to_string(),
        verdict.dpv_confirmation_description.clone(),
    ]
}

fn write_outputs(
    output_dir: &Path,
    format: TableFormat,
    headers: &[String],
    annotated: &[Vec<String>],
    verdicts: &[AddressVerdict],
) -> anyhow::Result<()> {
    std::fs::create_dir_all(output_dir)
        .with_context(|| format!("creating {}", output_dir.display()))?;

    let subset = |keep_valid: bool| -> Vec<Vec<String>> {
        annotated
            .iter()
            .zip(verdicts)
            .filter(|(_, verdict)| verdict.is_valid == keep_valid)
            .map(|(row, _)| row.clone())
            .collect()
    };

    let extension = format.extension();
    let outputs = [
        ("all_addresses", annotated.to_vec()),
        ("valid_addresses_only", subset(true)),
        ("invalid_addresses_only", subset(false)),
    ];

    for (stem, rows) in outputs {
        if rows.is_empty() && stem != "all_addresses" {
            println!("  (no rows for {stem}, skipping)");
            continue;
        }
        let path = output_dir.join(format!("{stem}.{extension}"));
        let table = Table {
            headers: headers.to_vec(),
            rows,
        };
        table.write(&path, format)?;
        println!("  wrote {}", path.display());
    }

    Ok(())
}

/// Shortens an address for one-line progress output.
fn preview(address: &str) -> String {
    const MAX_CHARS: usize = 48;
    if address.chars().count() <= MAX_CHARS {
        address.to_string()
    } else {
        let cut: String = address.chars().take(MAX_CHARS - 1).collect();
        format!("{cut}\u{2026}")
    }
}

#[cfg(test)]
#[path = "validate_test.rs"]
mod tests;

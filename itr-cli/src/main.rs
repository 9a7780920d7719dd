use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, info};

use itr_cli::{batch, config, csv_loader, logging};
use itr_core::calculations::{RegimeComparator, SuggestionEngine, investment_deadline};
use itr_core::{SuggestionInput, TaxInput, TaxYearConfig};
use itr_form16::{DeclaredIncome, Form16Processor, PlainTextSource, check_document_consistency};

// ─── CLI definition ──────────────────────────────────────────────────────────

/// Indian income-tax regime comparison and Form-16 extraction.
///
/// Every command prints JSON on stdout; logs go to stderr.
#[derive(Debug, Parser)]
#[command(name = "itr", version)]
struct Cli {
    /// Tax-year parameters in TOML. Defaults to built-in FY2024-25.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Pretty-print JSON output.
    #[arg(long, global = true)]
    pretty: bool,

    /// Log filter used when `RUST_LOG` is unset.
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    /// Also append logs to this file.
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Compare old and new regime liability for one taxpayer.
    Compare {
        /// `TaxInput` JSON file.
        #[arg(long)]
        input: PathBuf,
    },
    /// Compare every row of a CSV file.
    Batch {
        #[arg(long)]
        csv: PathBuf,
    },
    /// Rank tax-saving opportunities.
    Suggest {
        /// `SuggestionInput` JSON file.
        #[arg(long)]
        input: PathBuf,
    },
    /// Extract and validate a Form-16 text rendition.
    Form16 {
        #[arg(long)]
        text: PathBuf,

        /// Gross salary the taxpayer declared, checked against the certificate.
        #[arg(long)]
        declared_gross: Option<Decimal>,

        /// TDS the taxpayer declared.
        #[arg(long, requires = "declared_gross")]
        declared_tds: Option<Decimal>,

        /// Run the regime comparison on the extracted figures.
        #[arg(long)]
        compare: bool,
    },
    /// Days left to make tax-saving investments this financial year.
    Deadline {
        /// Reference date (YYYY-MM-DD). Defaults to today.
        #[arg(long)]
        date: Option<NaiveDate>,
    },
}

// ─── helpers ─────────────────────────────────────────────────────────────────

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("cannot read '{}'", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("invalid JSON in '{}'", path.display()))
}

fn print_json<T: Serialize>(
    value: &T,
    pretty: bool,
) -> Result<()> {
    let out = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{out}");
    Ok(())
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Form16Report {
    #[serde(flatten)]
    outcome: itr_form16::Form16Outcome,
    #[serde(skip_serializing_if = "Option::is_none")]
    consistency: Option<itr_form16::ConsistencyReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    comparison: Option<itr_core::ComparisonResult>,
}

// ─── commands ────────────────────────────────────────────────────────────────

async fn run(
    cli: Cli,
    config: &TaxYearConfig,
) -> Result<()> {
    match cli.command {
        Command::Compare { input } => {
            let input: TaxInput = read_json(&input)?;
            let result = itr_core::compute(config, &input)?;
            info!(
                recommended = %result.recommended_regime,
                savings = %result.savings,
                "comparison complete"
            );
            print_json(&result, cli.pretty)
        }
        Command::Batch { csv } => {
            let rows = csv_loader::load_from_file(&csv)?;
            debug!(rows = rows.len(), "loaded batch input");
            print_json(&batch::run_batch(config, &rows), cli.pretty)
        }
        Command::Suggest { input } => {
            let input: SuggestionInput = read_json(&input)?;
            let report = SuggestionEngine::new(config).suggest(&input);
            print_json(&report, cli.pretty)
        }
        Command::Form16 {
            text,
            declared_gross,
            declared_tds,
            compare,
        } => {
            let outcome = Form16Processor::new(PlainTextSource::new(text))
                .process()
                .await?;

            let consistency = declared_gross.map(|gross_salary| {
                check_document_consistency(
                    &outcome.record,
                    &DeclaredIncome {
                        gross_salary,
                        tds: declared_tds.unwrap_or_default(),
                    },
                )
            });
            let comparison = if compare {
                let input = outcome.record.to_tax_input(config);
                Some(
                    RegimeComparator::new(config)
                        .compare(&input)
                        .context("extracted figures cannot be compared")?,
                )
            } else {
                None
            };

            print_json(
                &Form16Report {
                    outcome,
                    consistency,
                    comparison,
                },
                cli.pretty,
            )
        }
        Command::Deadline { date } => {
            let today = date.unwrap_or_else(|| chrono::Local::now().date_naive());
            print_json(&investment_deadline(today), cli.pretty)
        }
    }
}

// ─── entry point ─────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init_tracing(&cli.log_level, cli.log_file.as_deref())?;

    let config = config::load_config(cli.config.as_deref())?;
    debug!(year = %config.financial_year, "tax-year config ready");

    run(cli, &config).await
}

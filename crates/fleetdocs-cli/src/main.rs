//! FleetDocs CLI
//!
//! The `fleetdocs` command answers document applicability and compliance
//! questions for an operator's fleet.
//!
//! ## Commands
//!
//! - `applicable`: Documents whose applicability rule matches an aircraft
//! - `before-cutoff`: Matching documents issued before an in-service date
//! - `closure`: Documents transitively referenced from an anchor document
//! - `summary`: Per-aircraft compliance summary (table, JSON or CSV)
//! - `fleet`: Compliance summaries for every aircraft

mod config;
mod output;

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{info, warn, Level};

use fleetdocs_core::{
    applicable_documents, documents_before_in_service, documents_for_prospective, load_corpus,
    parse_calendar_date, read_compliance, read_documents, read_fleet, resolve_closure,
    resolve_related, sample, summarize, summarize_fleet, write_summary_csv,
    write_summary_csv_file, write_summary_json, Aircraft, ComplianceLedger, Corpus,
    IngestReport, QuerySpan,
};

use config::{FleetDocsConfig, OutputFormat, DEFAULT_CONFIG_PATH};

#[derive(Parser)]
#[command(name = "fleetdocs")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Fleet document applicability and compliance resolver", long_about = None)]
struct Cli {
    /// Path to the TOML config file
    #[arg(long, global = true, env = "FLEETDOCS_CONFIG", default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Emit JSON-formatted log lines
    #[arg(long, global = true, env = "FLEETDOCS_JSON_LOGS")]
    json_logs: bool,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Use the built-in sample fleet and documents instead of data files
    #[arg(long, global = true, env = "FLEETDOCS_DEMO")]
    demo: bool,

    /// Documents file (overrides [data].documents)
    #[arg(long, global = true, env = "FLEETDOCS_DOCUMENTS")]
    documents: Option<PathBuf>,

    /// Fleet registry file (overrides [data].fleet)
    #[arg(long, global = true, env = "FLEETDOCS_FLEET")]
    fleet_file: Option<PathBuf>,

    /// Compliance records file (overrides [data].compliance)
    #[arg(long, global = true, env = "FLEETDOCS_COMPLIANCE")]
    compliance: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List documents applicable to an aircraft, in issue order
    Applicable {
        /// Registration or aircraft id
        #[arg(short, long)]
        aircraft: String,
    },

    /// List applicable documents issued before an in-service date
    BeforeCutoff {
        /// Registration or aircraft id (uses its in-service date)
        #[arg(short, long, conflicts_with_all = ["model", "in_service"])]
        aircraft: Option<String>,

        /// Model of a prospective aircraft
        #[arg(long, requires = "in_service")]
        model: Option<String>,

        /// In-service date of a prospective aircraft
        #[arg(long, requires = "model")]
        in_service: Option<String>,
    },

    /// Resolve the documents referenced from an anchor document
    Closure {
        /// Anchor document id
        document: String,

        /// Also follow references pointing at each document
        #[arg(long)]
        related: bool,
    },

    /// Compliance summary for one aircraft
    Summary {
        /// Registration or aircraft id
        #[arg(short, long)]
        aircraft: String,

        /// Output format (default from config)
        #[arg(short, long)]
        format: Option<OutputFormat>,

        /// Write the summary to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Compliance summaries for the whole fleet
    Fleet {
        /// Output format (table or json)
        #[arg(short, long)]
        format: Option<OutputFormat>,
    },
}

/// Everything a query needs, loaded once per invocation.
struct Workspace {
    corpus: Corpus,
    fleet: Vec<Aircraft>,
    ledger: ComplianceLedger,
    format: OutputFormat,
}

impl Workspace {
    fn aircraft(&self, key: &str) -> Result<&Aircraft> {
        self.fleet
            .iter()
            .find(|a| a.is_identified_by(key))
            .with_context(|| format!("No aircraft '{}' in the fleet registry", key))
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = FleetDocsConfig::load_or_default(&cli.config)?;

    // Setup logging
    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    fleetdocs_core::init_tracing(cli.json_logs || config.output.json_logs, level);

    let workspace = load_workspace(&cli, &config)?;

    match cli.command {
        Commands::Applicable { aircraft } => cmd_applicable(&workspace, &aircraft),
        Commands::BeforeCutoff {
            aircraft,
            model,
            in_service,
        } => cmd_before_cutoff(
            &workspace,
            aircraft.as_deref(),
            model.as_deref(),
            in_service.as_deref(),
        ),
        Commands::Closure { document, related } => cmd_closure(&workspace, &document, related),
        Commands::Summary {
            aircraft,
            format,
            output,
        } => cmd_summary(&workspace, &aircraft, format, output.as_deref()),
        Commands::Fleet { format } => cmd_fleet(workspace, format).await,
    }
}

fn load_workspace(cli: &Cli, config: &FleetDocsConfig) -> Result<Workspace> {
    let format = config.output.format;

    if cli.demo {
        info!(event = "workspace.demo", "using built-in sample data");
        return Ok(Workspace {
            corpus: sample::sample_corpus().context("Failed to build sample corpus")?,
            fleet: sample::sample_fleet(),
            ledger: sample::sample_ledger(),
            format,
        });
    }

    let documents_path = cli.documents.as_ref().unwrap_or(&config.data.documents);
    let fleet_path = cli.fleet_file.as_ref().unwrap_or(&config.data.fleet);
    let compliance_path = cli.compliance.as_ref().or(config.data.compliance.as_ref());

    let documents = report_diagnostics(
        documents_path,
        read_documents(documents_path)
            .with_context(|| format!("Failed to load documents from {:?}", documents_path))?,
    );
    let corpus = load_corpus(documents)
        .with_context(|| format!("Invalid document corpus in {:?}", documents_path))?;

    let fleet = report_diagnostics(
        fleet_path,
        read_fleet(fleet_path)
            .with_context(|| format!("Failed to load fleet from {:?}", fleet_path))?,
    );

    let ledger = match compliance_path {
        Some(path) => ComplianceLedger::new(report_diagnostics(
            path,
            read_compliance(path)
                .with_context(|| format!("Failed to load compliance records from {:?}", path))?,
        )),
        None => ComplianceLedger::default(),
    };

    Ok(Workspace {
        corpus,
        fleet,
        ledger,
        format,
    })
}

fn report_diagnostics<T>(path: &Path, report: IngestReport<T>) -> Vec<T> {
    if !report.is_clean() {
        warn!(
            event = "workspace.ingest_diagnostics",
            path = %path.display(),
            rejected = report.diagnostics.len(),
            loaded = report.items.len(),
            "some input elements were skipped"
        );
    }
    report.items
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn parse_date_arg(raw: &str) -> Result<NaiveDate> {
    match parse_calendar_date(raw) {
        Some(date) => Ok(date),
        None => bail!("Unrecognised date '{}'; use YYYY-MM-DD", raw),
    }
}

/// List applicable documents
fn cmd_applicable(ws: &Workspace, key: &str) -> Result<()> {
    let aircraft = ws.aircraft(key)?;
    let _span = QuerySpan::enter("applicable", &aircraft.registration);
    let documents = applicable_documents(aircraft, &ws.corpus);

    match ws.format {
        OutputFormat::Json => print_json(&documents),
        _ => {
            println!(
                "{}",
                output::render_documents(
                    &format!("Applicable to {}", aircraft.registration),
                    &documents
                )
            );
            Ok(())
        }
    }
}

/// List documents issued before an in-service date
fn cmd_before_cutoff(
    ws: &Workspace,
    aircraft: Option<&str>,
    model: Option<&str>,
    in_service: Option<&str>,
) -> Result<()> {
    let (heading, report, _span) = match (aircraft, model, in_service) {
        (Some(key), _, _) => {
            let aircraft = ws.aircraft(key)?;
            let span = QuerySpan::enter("before_cutoff", &aircraft.registration);
            (
                format!("Issued before {} entered service", aircraft.registration),
                documents_before_in_service(aircraft, &ws.corpus)?,
                span,
            )
        }
        (None, Some(model), Some(raw_date)) => {
            let date = parse_date_arg(raw_date)?;
            let span = QuerySpan::enter("before_cutoff", model);
            (
                format!("Issued before {} for a new {}", date, model),
                documents_for_prospective(model, date, &ws.corpus),
                span,
            )
        }
        _ => bail!("Pass --aircraft, or both --model and --in-service"),
    };

    match ws.format {
        OutputFormat::Json => print_json(&report),
        _ => {
            println!("{}", output::render_cutoff(&heading, &report));
            Ok(())
        }
    }
}

/// Resolve a reference closure
fn cmd_closure(ws: &Workspace, document: &str, related: bool) -> Result<()> {
    let _span = QuerySpan::enter("closure", document);
    let closure = if related {
        resolve_related(document, &ws.corpus)?
    } else {
        resolve_closure(document, &ws.corpus)?
    };

    match ws.format {
        OutputFormat::Json => print_json(&closure),
        _ => {
            println!("{}", output::render_closure(&closure));
            Ok(())
        }
    }
}

/// Compliance summary for one aircraft
fn cmd_summary(
    ws: &Workspace,
    key: &str,
    format: Option<OutputFormat>,
    output_path: Option<&Path>,
) -> Result<()> {
    let aircraft = ws.aircraft(key)?;
    let _span = QuerySpan::enter("summary", &aircraft.registration);
    let summary = summarize(aircraft, &ws.corpus, &ws.ledger);
    let format = format.unwrap_or(ws.format);

    match (format, output_path) {
        (OutputFormat::Csv, Some(path)) => {
            write_summary_csv_file(path, &summary)?;
            println!("✓ Wrote {}", path.display());
        }
        (OutputFormat::Csv, None) => write_summary_csv(&summary, std::io::stdout().lock())?,
        (OutputFormat::Json, Some(path)) => {
            write_summary_json(path, &summary)?;
            println!("✓ Wrote {}", path.display());
        }
        (OutputFormat::Json, None) => print_json(&summary)?,
        (OutputFormat::Table, Some(path)) => {
            std::fs::write(path, output::render_summary(&summary))
                .with_context(|| format!("Failed to write {}", path.display()))?;
            println!("✓ Wrote {}", path.display());
        }
        (OutputFormat::Table, None) => println!("{}", output::render_summary(&summary)),
    }
    Ok(())
}

/// Compliance summaries for every aircraft
async fn cmd_fleet(ws: Workspace, format: Option<OutputFormat>) -> Result<()> {
    let format = format.unwrap_or(ws.format);
    let report = summarize_fleet(Arc::new(ws.corpus), Arc::new(ws.ledger), ws.fleet)
        .await
        .context("Fleet summary failed")?;

    match format {
        OutputFormat::Json => print_json(&report),
        OutputFormat::Table => {
            println!("{}", output::render_fleet(&report));
            Ok(())
        }
        OutputFormat::Csv => bail!("The fleet report has no CSV form; use table or json"),
    }
}

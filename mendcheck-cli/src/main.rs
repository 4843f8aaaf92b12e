mod config;

use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use clap::{Parser, Subcommand};
use config::{ConfigMerger, MergedConfig};
use fs_err as fs;
use mendcheck_core::{AggregateFailure, PipelineError, PipelineFactory, RunReport};
use mendcheck_render::{render_report_md, render_report_text};
use mendcheck_stock::{CATALOG, Capability, CatalogEntry};
use serde_json::Value;
use std::process::ExitCode;
use tracing::{debug, error, info};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(
    name = "mendcheck",
    version,
    about = "Validate a JSON document against a rule set, repairing what can be repaired."
)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run the configured rules (and repairs) against a JSON subject.
    Check(CheckArgs),
    /// List the stock rules and repairs usable in mendcheck.toml.
    ListRules(ListRulesArgs),
}

#[derive(Debug, Parser)]
struct CheckArgs {
    /// JSON file holding the subject.
    #[arg(long)]
    subject: Utf8PathBuf,

    /// Rule set (default: ./mendcheck.toml when present).
    #[arg(long)]
    config: Option<Utf8PathBuf>,

    /// Kind reported by the aggregate failure; overrides `error_kind` in the config.
    #[arg(long)]
    error_kind: Option<String>,

    /// Write the repaired subject back to the subject file.
    #[arg(long, default_value_t = false)]
    write: bool,

    /// Also write the JSON run report to this file.
    #[arg(long)]
    report: Option<Utf8PathBuf>,

    /// Output format (text, json, md).
    #[arg(long, value_enum, default_value = "text")]
    format: ReportFormat,
}

#[derive(Debug, Parser)]
struct ListRulesArgs {
    /// Show a single entry instead of the whole catalog.
    kind: Option<String>,

    /// Output format (text, json).
    #[arg(long, value_enum, default_value = "text")]
    format: OutputFormat,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum ReportFormat {
    Text,
    Json,
    Md,
}

fn main() -> ExitCode {
    match real_main() {
        Ok(()) => ExitCode::from(0),
        Err(e) => match e.downcast_ref::<PipelineError>() {
            // The report already went to stdout.
            Some(pe) if pe.is_validation_failure() => ExitCode::from(pe.exit_code()),
            Some(pe) => {
                error!("{:?}", e);
                ExitCode::from(pe.exit_code())
            }
            None => {
                error!("{:?}", e);
                ExitCode::from(1)
            }
        },
    }
}

fn real_main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Check(args) => cmd_check(args),
        Command::ListRules(args) => cmd_list_rules(args),
    }
}

fn cmd_check(args: CheckArgs) -> anyhow::Result<()> {
    let file_config = config::load_or_default(args.config.as_deref(), Utf8Path::new("."))
        .context("load mendcheck.toml config")?;
    let merged = ConfigMerger::new(file_config).merge_check_args(args.error_kind.as_deref());
    debug!(
        "merged config: error_kind={}, rules={}",
        merged.error_kind,
        merged.rules.len()
    );

    let raw = fs::read_to_string(&args.subject)
        .with_context(|| format!("read subject {}", args.subject))?;
    let mut subject: Option<Value> = serde_json::from_str(&raw)
        .with_context(|| format!("parse subject {}", args.subject))?;

    let report = evaluate(&merged, subject.as_mut())?;

    match args.format {
        ReportFormat::Text => print!("{}", render_report_text(&report)),
        ReportFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        ReportFormat::Md => print!("{}", render_report_md(&report)),
    }

    if let Some(path) = &args.report {
        write_json(path, &report)?;
        info!("wrote report to {}", path);
    }

    if args.write {
        // `evaluate` rejects a null subject, so there is always something to write.
        if let Some(repaired) = &subject {
            write_json(&args.subject, repaired)?;
            info!("wrote repaired subject to {}", args.subject);
        }
    }

    match AggregateFailure::from_report(&report) {
        Some(failure) => Err(PipelineError::from(failure).into()),
        None => Ok(()),
    }
}

/// Build the pipeline from the merged rule set and run it over `subject`.
fn evaluate(merged: &MergedConfig, subject: Option<&mut Value>) -> anyhow::Result<RunReport> {
    let mut pipeline = PipelineFactory::new()
        .create_for(subject)?
        .with_error_type(merged.error_kind.clone());

    for (i, entry) in merged.rules.iter().enumerate() {
        let rule = entry
            .rule
            .build::<Value>()
            .with_context(|| format!("rules[{}]", i))?;
        pipeline = pipeline.add_boxed_rule(rule);

        if let Some(spec) = &entry.repair {
            let repair = spec
                .build()
                .with_context(|| format!("rules[{}].repair", i))?;
            pipeline = pipeline.add_boxed_repair(repair)?;
        }
    }

    Ok(pipeline.evaluate())
}

fn cmd_list_rules(args: ListRulesArgs) -> anyhow::Result<()> {
    if let Some(kind) = &args.kind {
        let entry = mendcheck_stock::lookup(kind).ok_or_else(|| {
            anyhow::anyhow!("unknown kind '{}'; run 'mendcheck list-rules' to see all", kind)
        })?;
        return print_entry(entry, args.format);
    }

    match args.format {
        OutputFormat::Text => {
            let sections = [("Rules", Capability::Rule), ("Repairs", Capability::Repair)];
            for (heading, capability) in sections {
                println!("{}:\n", heading);
                println!("  {:<20} {:<36} DESCRIPTION", "KIND", "FIELDS");
                println!("  {:<20} {:<36} -----------", "----", "------");
                for entry in CATALOG.iter().filter(|e| e.capability == capability) {
                    println!(
                        "  {:<20} {:<36} {}",
                        entry.kind,
                        entry.fields.join(", "),
                        entry.description
                    );
                }
                println!();
            }
            println!("Fields ending in '?' are optional.");
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(CATALOG)?);
        }
    }
    Ok(())
}

fn print_entry(entry: &CatalogEntry, format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Text => {
            let capability = match entry.capability {
                Capability::Rule => "rule",
                Capability::Repair => "repair",
            };
            println!("{} ({})\n", entry.kind, capability);
            println!("  Fields: {}", entry.fields.join(", "));
            println!("  {}", entry.description);
        }
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(entry)?),
    }
    Ok(())
}

fn write_json<T: serde::Serialize + ?Sized>(path: &Utf8Path, v: &T) -> anyhow::Result<()> {
    let s = serde_json::to_string_pretty(v).context("serialize json")?;
    fs::write(path, s).with_context(|| format!("write {}", path))?;
    Ok(())
}

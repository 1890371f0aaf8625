//! `claimsift` - filter and sort a CSV export of the claims admin table.
//!
//! The binary stands in for the admin page: it loads the rows, applies the
//! filter controls and selector values from a config file and flags, replays
//! header clicks, then prints the visible rows in presentation order.

mod config;
mod load;
mod report;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{ArgAction, ArgMatches, CommandFactory, FromArgMatches, Parser};
use claimsift::{Selector, StatusFilter, TableSession};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use config::SiftConfig;
use report::OutputFormat;

/// Filter and sort claim records the way the admin table does.
#[derive(Debug, Parser)]
#[command(name = "claimsift", version)]
struct Cli {
    /// CSV export of the claims table (first row is the header)
    #[arg(long, value_name = "CSV")]
    data: PathBuf,

    /// Filter configuration (YAML, or JSON with a .json extension)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Signature status selector: all, pending, signed
    #[arg(long, value_name = "VALUE")]
    status: Option<String>,

    /// Signed-date selector: all, pending_signature_via_date_col, signed_via_date_col
    #[arg(long, value_name = "VALUE")]
    signed_date_status: Option<String>,

    /// Click a column header; repeat to sort again or toggle direction
    #[arg(long, value_name = "COLUMN", action = ArgAction::Append)]
    sort: Vec<String>,

    /// Output format
    #[arg(long, value_enum)]
    format: Option<OutputFormat>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

/// A selector value given on the command line, with its argument position.
#[derive(Debug, Clone, PartialEq, Eq)]
struct SelectorFlag {
    selector: Selector,
    value: String,
    index: usize,
}

/// Selector flags in the order they were given, so the last one wins.
fn selector_flags(cli: &Cli, matches: &ArgMatches) -> Vec<SelectorFlag> {
    let mut flags: Vec<SelectorFlag> = [
        (Selector::SignatureStatus, "status", &cli.status),
        (Selector::SignedDateStatus, "signed_date_status", &cli.signed_date_status),
    ]
    .into_iter()
    .filter_map(|(selector, id, value)| {
        Some(SelectorFlag {
            selector,
            value: value.clone()?,
            index: matches.index_of(id).unwrap_or(0),
        })
    })
    .collect();
    flags.sort_by_key(|flag| flag.index);
    flags
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .ok();
}

/// Loads, filters and sorts, returning what should go to stdout.
fn run(cli: &Cli, flags: &[SelectorFlag]) -> Result<String> {
    let config = match &cli.config {
        Some(path) => SiftConfig::load(path)?,
        None => SiftConfig::default(),
    };

    let dataset = load::read_dataset(&cli.data, &config)?;
    info!(rows = dataset.len(), "dataset loaded");

    let mut session = TableSession::new(dataset);
    session.set_panel(config.panel.clone());
    session.set_extra_criteria(config.criteria.clone());
    session.set_status(Selector::SignatureStatus, config.status);

    for flag in flags {
        let status = StatusFilter::from_selector_value(flag.selector, &flag.value)
            .with_context(|| format!("invalid --{} value", flag_name(flag.selector)))?;
        let update = session.set_status(flag.selector, status);
        debug!(paired_value = update.paired_value, "selector applied");
    }

    let clicks = if cli.sort.is_empty() {
        &config.sort
    } else {
        &cli.sort
    };
    for column in clicks {
        session.request_sort(column);
    }

    let format = cli.format.or(config.format).unwrap_or_default();
    report::render(&session, format)
}

fn flag_name(selector: Selector) -> &'static str {
    match selector {
        Selector::SignatureStatus => "status",
        Selector::SignedDateStatus => "signed-date-status",
    }
}

fn main() -> Result<()> {
    let matches = Cli::command().get_matches();
    let cli = Cli::from_arg_matches(&matches).unwrap_or_else(|err| err.exit());
    init_tracing(cli.verbose);

    let flags = selector_flags(&cli, &matches);
    let output = run(&cli, &flags)?;
    print!("{output}");
    Ok(())
}

//! `bureau-audit`: check a bureau registry log for agents whose lifecycle
//! does not follow a known-valid sequence.
//!
//! Reads the given files in order (line numbers run on across files), or
//! stdin when none are given, and prints one line per suspicious agent.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use bureau_audit::{
    AuditConfig, AuditLog, AuditReport, Catalog, LogScanner, UnresolvedBureau, check_log,
};
use clap::{Parser, ValueEnum};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

/// Audit agent lifecycles in a bureau registry log
#[derive(Debug, Parser)]
#[command(name = "bureau-audit")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Log files to read, in order. Reads stdin when omitted
    #[arg(value_name = "FILE")]
    files: Vec<PathBuf>,

    /// Also print agents whose lifecycle matched exactly
    #[arg(short, long)]
    verbose: bool,

    /// Print aggregate creation/confirmation/failure counts before checking
    #[arg(short, long)]
    summary: bool,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// JSON file with report toggles; command-line flags are applied on top
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Log filter for diagnostics on stderr (e.g. warn, debug, bureau_audit=trace)
    #[arg(long, env = "BUREAU_AUDIT_LOG", default_value = "warn")]
    log_level: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli.log_level)?;

    let config = load_config(&cli)?;
    let catalog = Catalog::bureau().context("failed to build bureau line patterns")?;
    let log = scan_inputs(&catalog, &cli.files)?;
    let report = check_log(&catalog, config, &UnresolvedBureau, &log);

    print!("{}", render(&report, cli.format)?);
    Ok(())
}

fn init_tracing(filter: &str) -> Result<()> {
    let filter =
        EnvFilter::try_new(filter).with_context(|| format!("invalid log filter '{filter}'"))?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
    Ok(())
}

fn load_config(cli: &Cli) -> Result<AuditConfig> {
    let base = match &cli.config {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("failed to open config {}", path.display()))?;
            serde_json::from_reader::<_, AuditConfig>(BufReader::new(file))
                .with_context(|| format!("failed to parse config {}", path.display()))?
        }
        None => AuditConfig::default(),
    };
    let config = base
        .verbose(base.verbose || cli.verbose)
        .summary(base.summary || cli.summary);
    debug!(?config, "resolved audit config");
    Ok(config)
}

fn scan_inputs(catalog: &Catalog, files: &[PathBuf]) -> Result<AuditLog> {
    let mut scanner = LogScanner::new(catalog);
    if files.is_empty() {
        info!("reading log from stdin");
        feed(&mut scanner, io::stdin().lock(), Path::new("<stdin>"))?;
    } else {
        for path in files {
            info!(path = %path.display(), "reading log");
            let file =
                File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
            feed(&mut scanner, BufReader::new(file), path)?;
        }
    }
    Ok(scanner.finish())
}

/// Feed `reader` line by line. Bytes that are not UTF-8 are replaced rather
/// than ending the scan.
fn feed<R: BufRead>(scanner: &mut LogScanner<'_>, mut reader: R, source: &Path) -> Result<()> {
    let mut buf = Vec::new();
    loop {
        buf.clear();
        let read = reader
            .read_until(b'\n', &mut buf)
            .with_context(|| format!("failed to read {}", source.display()))?;
        if read == 0 {
            return Ok(());
        }
        if buf.last() == Some(&b'\n') {
            buf.pop();
            if buf.last() == Some(&b'\r') {
                buf.pop();
            }
        }
        scanner.feed(&String::from_utf8_lossy(&buf));
    }
}

fn render(report: &AuditReport, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => {
            let mut out = report.lines().join("\n");
            out.push('\n');
            Ok(out)
        }
        OutputFormat::Json => {
            let mut out =
                serde_json::to_string_pretty(report).context("failed to serialize report")?;
            out.push('\n');
            Ok(out)
        }
    }
}

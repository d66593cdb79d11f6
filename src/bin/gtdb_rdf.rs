use std::io::{self, BufWriter};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use miette::IntoDiagnostic;
use tracing_subscriber::EnvFilter;

use gtdb_rdf::config::ConfigLoader;
use gtdb_rdf::error::GtdbError;
use gtdb_rdf::metadata::convert_file;
use gtdb_rdf::output::JsonSummary;

#[derive(Parser)]
#[command(name = "gtdb-rdf")]
#[command(about = "Convert GTDB metadata TSV files into RDF Turtle")]
#[command(version, author)]
struct Cli {
    #[arg(short, long, help = "Emit @prefix declarations before the triples")]
    prefixes: bool,

    #[arg(short, long, value_name = "FILE", help = "GTDB metadata TSV file to convert")]
    metadata: Option<PathBuf>,

    #[arg(long, value_name = "FILE", help = "JSON config (defaults to ./gtdb-rdf.json if present)")]
    config: Option<String>,

    #[arg(long, help = "Print a JSON run summary to stderr")]
    summary: bool,
}

fn main() -> ExitCode {
    if let Err(report) = run() {
        eprintln!("{report:?}");
        if let Some(error) = report.downcast_ref::<GtdbError>() {
            return ExitCode::from(map_exit_code(error));
        }
        return ExitCode::from(1);
    }
    ExitCode::SUCCESS
}

fn map_exit_code(error: &GtdbError) -> u8 {
    match error {
        GtdbError::InputOpen { .. } | GtdbError::MissingHeader(_) => 2,
        GtdbError::ConfigRead(_)
        | GtdbError::ConfigParse(_)
        | GtdbError::InvalidNamespace { .. } => 3,
        _ => 1,
    }
}

fn run() -> miette::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(false)
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let mut config = ConfigLoader::resolve(cli.config.as_deref())?;
    if cli.prefixes {
        config.emit_prefixes = true;
    }

    let Some(path) = cli.metadata else {
        tracing::debug!("no metadata file given, nothing to convert");
        return Ok(());
    };

    let stdout = BufWriter::new(io::stdout().lock());
    let mut stderr = io::stderr().lock();
    let summary = convert_file(&path, &config, stdout, &mut stderr)?;
    drop(stderr);

    if cli.summary {
        JsonSummary::print(&summary).into_diagnostic()?;
    }
    Ok(())
}

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;
use wmlcanon_core::xml::parse_bytes;
use wmlcanon_core::{canonicalize_with_report, serialize_document, CanonicalizeSettings, Result};

#[derive(Parser)]
#[command(name = "wmlcanon")]
#[command(about = "WordprocessingML run coalescing and schema ordering", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Canonicalize one XML part and write the result
    Normalize {
        #[arg(short, long)]
        input: PathBuf,

        #[arg(short, long)]
        output: PathBuf,

        /// JSON file with canonicalization settings
        #[arg(short, long)]
        settings: Option<PathBuf>,

        #[arg(long)]
        no_coalesce: bool,

        #[arg(long)]
        no_order: bool,
    },
    /// Report whether a part is already canonical; exits 1 when it is not
    Check {
        #[arg(short, long)]
        input: PathBuf,

        #[arg(short, long)]
        settings: Option<PathBuf>,

        #[arg(long)]
        json: bool,
    },
}

fn load_settings(path: Option<&Path>) -> Result<CanonicalizeSettings> {
    match path {
        Some(path) => CanonicalizeSettings::from_json(&std::fs::read_to_string(path)?),
        None => Ok(CanonicalizeSettings::default()),
    }
}

fn normalize(
    input: &Path,
    output: &Path,
    settings: Option<&Path>,
    no_coalesce: bool,
    no_order: bool,
) -> Result<ExitCode> {
    let mut settings = load_settings(settings)?;
    settings.coalesce_runs &= !no_coalesce;
    settings.order_elements &= !no_order;
    if settings.is_noop() {
        warn!("coalescing and ordering are both disabled; the part is only re-serialized");
    }

    let root = parse_bytes(&std::fs::read(input)?)?;
    let (canonical, report) = canonicalize_with_report(&root, &settings)?;
    std::fs::write(output, serialize_document(&canonical)?)?;

    info!(
        input = %input.display(),
        output = %output.display(),
        runs_before = report.runs_before,
        runs_after = report.runs_after,
        "normalized part"
    );
    Ok(ExitCode::SUCCESS)
}

fn check(input: &Path, settings: Option<&Path>, json: bool) -> Result<ExitCode> {
    let settings = load_settings(settings)?;
    let root = parse_bytes(&std::fs::read(input)?)?;
    let (_, report) = canonicalize_with_report(&root, &settings)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else if report.canonical {
        println!("{}: canonical", input.display());
    } else {
        println!(
            "{}: not canonical ({} runs, {} after coalescing; order {})",
            input.display(),
            report.runs_before,
            report.runs_after,
            if report.order_changed { "changed" } else { "unchanged" }
        );
    }

    Ok(if report.canonical {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("wmlcanon=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Normalize {
            input,
            output,
            settings,
            no_coalesce,
            no_order,
        } => normalize(&input, &output, settings.as_deref(), no_coalesce, no_order),
        Commands::Check {
            input,
            settings,
            json,
        } => check(&input, settings.as_deref(), json),
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            error!("{e}");
            ExitCode::from(2)
        }
    }
}

//! # Folio CLI
//!
//! Usage:
//!   folio render worksheet input.json -o daily_worksheet.pdf
//!   folio render ppr input.json --logo logo.png --schedule-image chart.jpg
//!   folio example engagement > engagement.json

use std::fs;
use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, Subcommand};
use log::{debug, error};

use folio::model::samples::sample_json;
use folio::{Assets, FolioError, LayoutConfig, ReportKind};

#[derive(Parser)]
#[command(name = "folio", version, about = "Generate academic report PDFs from form data")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Render a report data file to PDF
    Render {
        /// Report kind
        #[arg(value_enum)]
        kind: ReportKind,
        /// JSON data object for the report
        input: PathBuf,
        /// Output path (defaults to the kind's standard file name)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Institution logo for cover pages (path, data URI or base64)
        #[arg(long)]
        logo: Option<String>,
        /// Schedule chart image for the PPR
        #[arg(long)]
        schedule_image: Option<String>,
        /// Layout configuration (TOML, or JSON by extension)
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Print a sample data object for a report kind
    Example {
        #[arg(value_enum)]
        kind: ReportKind,
    },
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Command::Example { kind } => print!("{}", sample_json(kind)),
        Command::Render {
            kind,
            input,
            output,
            logo,
            schedule_image,
            config,
        } => {
            let output = output.unwrap_or_else(|| PathBuf::from(kind.file_name()));
            match render(
                kind,
                &input,
                &output,
                logo.as_deref(),
                schedule_image.as_deref(),
                config.as_deref(),
            ) {
                Ok(len) => eprintln!("✓ Written {} bytes to {}", len, output.display()),
                Err(e) => {
                    error!("{:?}", e);
                    eprintln!("✗ {}", e);
                    process::exit(1);
                }
            }
        }
    }
}

fn render(
    kind: ReportKind,
    input: &Path,
    output: &Path,
    logo: Option<&str>,
    schedule_image: Option<&str>,
    config: Option<&Path>,
) -> Result<usize, FolioError> {
    let config = match config {
        Some(path) => LayoutConfig::from_path(path)?,
        None => LayoutConfig::default(),
    };
    let json = fs::read_to_string(input).map_err(|source| FolioError::Io {
        path: input.display().to_string(),
        source,
    })?;
    let assets = Assets::load(logo, schedule_image)?;
    debug!(
        "assets: logo={}, schedule image={}",
        assets.logo.is_some(),
        assets.schedule_image.is_some()
    );

    let bytes = folio::render_json(kind, &json, &assets, &config)?;
    fs::write(output, &bytes).map_err(|source| FolioError::Io {
        path: output.display().to_string(),
        source,
    })?;
    Ok(bytes.len())
}

use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::{Parser, Subcommand, ValueEnum};

use formscout_core::config_file::{self, ConfigFile};
use formscout_core::FormAnalysis;
use formscout_ingest::IngestOptions;
use formscout_parsing::{FormExtractor, ParsingConfigBuilder};
use formscout_reporting::{ExportFormat, ReportForm};

mod output;

use output::ColorMode;

/// PDF form field extractor - list fillable fields and infer their captions
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Extract the form fields of a PDF and infer a label for each
    Extract {
        /// Path to the PDF form
        file_path: PathBuf,

        #[command(flatten)]
        report: ReportArgs,

        /// pdftk executable to use (default: `pdftk` on PATH)
        #[arg(long)]
        pdftk: Option<PathBuf>,
    },

    /// Label fields from a saved `pdftk dump_data_fields` output
    Fields {
        /// Path to the saved field dump
        dump_path: PathBuf,

        /// Plain-text page content to match captions against
        #[arg(long)]
        text: Option<PathBuf>,

        #[command(flatten)]
        report: ReportArgs,
    },
}

#[derive(clap::Args, Debug)]
struct ReportArgs {
    /// Report format
    #[arg(long, value_enum, default_value_t = FormatArg::Text)]
    format: FormatArg,

    /// Write the report to a file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Minimum similarity (0-1) for a page-text caption to be accepted
    #[arg(long)]
    threshold: Option<f64>,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum FormatArg {
    Text,
    Json,
}

impl From<FormatArg> for ExportFormat {
    fn from(f: FormatArg) -> Self {
        match f {
            FormatArg::Text => ExportFormat::Text,
            FormatArg::Json => ExportFormat::Json,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let file_config = config_file::load_config();

    match cli.command {
        Command::Extract {
            file_path,
            report,
            pdftk,
        } => extract(&file_path, report, pdftk, &file_config).await,
        Command::Fields {
            dump_path,
            text,
            report,
        } => fields(&dump_path, text.as_deref(), report, &file_config),
    }
}

async fn extract(
    file_path: &Path,
    report: ReportArgs,
    pdftk: Option<PathBuf>,
    file_config: &ConfigFile,
) -> anyhow::Result<()> {
    if !file_path.exists() {
        anyhow::bail!("File not found: {}", file_path.display());
    }

    // Resolve configuration: CLI flags > env vars > config file > defaults
    let pdftk_command = pdftk
        .or_else(|| std::env::var("FORMSCOUT_PDFTK").ok().map(PathBuf::from))
        .or_else(|| {
            file_config
                .tools
                .as_ref()
                .and_then(|t| t.pdftk_path.as_ref())
                .map(PathBuf::from)
        });
    let text_config = file_config.text.as_ref();
    let options = IngestOptions {
        pdftk_command,
        footer_exclusion: text_config.and_then(|t| t.footer_exclusion).unwrap_or(0.0),
        header_exclusion: text_config.and_then(|t| t.header_exclusion).unwrap_or(0.0),
    };

    let extractor = Arc::new(build_extractor(report.threshold, file_config)?);
    let ingested = formscout_ingest::analyze_pdf(file_path, extractor, &options).await?;

    emit(
        &display_name(file_path),
        &ingested.analysis,
        Some(ingested.file_size_kb),
        &report,
    )
}

fn fields(
    dump_path: &Path,
    text_path: Option<&Path>,
    report: ReportArgs,
    file_config: &ConfigFile,
) -> anyhow::Result<()> {
    let extractor = build_extractor(report.threshold, file_config)?;
    let analysis = formscout_ingest::analyze_saved_dump(dump_path, text_path, &extractor)?;
    emit(&display_name(dump_path), &analysis, None, &report)
}

fn build_extractor(
    threshold_flag: Option<f64>,
    file_config: &ConfigFile,
) -> anyhow::Result<FormExtractor> {
    let threshold = match threshold_flag {
        Some(t) => Some(t),
        None => match std::env::var("FORMSCOUT_LABEL_THRESHOLD") {
            Ok(v) => Some(v.trim().parse::<f64>().map_err(|_| {
                anyhow::anyhow!("FORMSCOUT_LABEL_THRESHOLD must be a number, got {:?}", v)
            })?),
            Err(_) => None,
        },
    };
    if let Some(t) = threshold
        && !(0.0..=1.0).contains(&t)
    {
        anyhow::bail!("Label threshold must be between 0 and 1, got {}", t);
    }

    let mut builder = ParsingConfigBuilder::from_config_file(file_config);
    if let Some(t) = threshold {
        builder = builder.label_threshold(t);
    }
    Ok(FormExtractor::with_config(builder.build()?))
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

fn emit(
    name: &str,
    analysis: &FormAnalysis,
    file_size_kb: Option<u64>,
    report: &ReportArgs,
) -> anyhow::Result<()> {
    let generated_at =
        chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Secs, true);
    let form = ReportForm {
        filename: name,
        analysis,
        file_size_kb,
        generated_at: &generated_at,
    };
    let format = ExportFormat::from(report.format);

    match &report.output {
        Some(path) => {
            formscout_reporting::export_results(&form, format, path).map_err(anyhow::Error::msg)?
        }
        None => {
            let content = match format {
                ExportFormat::Text => formscout_reporting::export_text(&form),
                ExportFormat::Json => formscout_reporting::export_json(&form)?,
            };
            println!("{}", content);
        }
    }

    let color = ColorMode(!report.no_color && std::io::stderr().is_terminal());
    let mut stderr = std::io::stderr();
    output::print_summary(&mut stderr, name, analysis, color)?;
    if let Some(path) = &report.output {
        eprintln!("{} report written to {}", format.label(), path.display());
    }
    Ok(())
}

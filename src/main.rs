//! Darkroom CLI - deadline-bounded image conversion

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::{Parser, Subcommand};
use colored::Colorize;

use darkroom::{create_codec, ConversionExecutor, ConvertError, ConvertLimits, FixSuggestion};

#[derive(Parser)]
#[command(name = "darkroom")]
#[command(about = "Darkroom - deadline-bounded image conversion")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert an image file to another format
    Convert {
        /// Path to the input image
        input: PathBuf,

        /// Target format identifier (jpeg, png, webp, ...)
        #[arg(short, long)]
        format: String,

        /// Output path (defaults to the input path with the new extension)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Codec to use (magick, mock)
        #[arg(short, long, default_value = "magick")]
        codec: String,

        /// Override the conversion deadline in seconds
        #[arg(long)]
        deadline_secs: Option<u64>,
    },

    /// List codecs and whether they are available
    Codecs,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Convert {
            input,
            format,
            output,
            codec,
            deadline_secs,
        } => run_convert(input, &format, output, &codec, deadline_secs).await,
        Commands::Codecs => list_codecs(),
    };

    if let Err(e) = result {
        eprintln!("{} {}", "Error:".red().bold(), e);
        if let Some(suggestion) = e.fix_suggestion() {
            eprintln!("  {} {}", "Fix:".yellow(), suggestion);
        }
        std::process::exit(1);
    }
}

async fn run_convert(
    input: PathBuf,
    format: &str,
    output: Option<PathBuf>,
    codec_name: &str,
    deadline_secs: Option<u64>,
) -> Result<(), ConvertError> {
    let codec = create_codec(codec_name)?;

    let mut limits = ConvertLimits::default();
    if let Some(secs) = deadline_secs {
        limits = limits.with_deadline(Duration::from_secs(secs));
    }

    let payload = tokio::fs::read(&input).await?;
    println!(
        "{} Converting {} ({} bytes) to {} via {}",
        "→".cyan(),
        input.display().to_string().cyan(),
        payload.len(),
        format.cyan().bold(),
        codec_name.cyan()
    );

    let executor = ConversionExecutor::with_limits(Arc::from(codec), limits);
    let converted = executor.convert(payload, format).await?;

    let output = output.unwrap_or_else(|| input.with_extension(format));
    tokio::fs::write(&output, &converted).await?;

    println!(
        "{} Wrote {} ({} bytes)",
        "✓".green(),
        output.display(),
        converted.len()
    );

    Ok(())
}

fn list_codecs() -> Result<(), ConvertError> {
    for name in ["magick", "mock"] {
        let codec = create_codec(name)?;
        let status = if codec.is_available() {
            "available".green()
        } else {
            "not available".red()
        };
        println!("  {} {}", name.bold(), status);
    }
    Ok(())
}

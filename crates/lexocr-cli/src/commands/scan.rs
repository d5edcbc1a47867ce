//! Scan command - extract text from a single document image.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info};

use lexocr_core::{DocumentScanner, ExtractionResult, FileUpload, LexocrConfig, ScanOutcome};
use lexocr_engine::TesseractProvider;

/// Arguments for the scan command.
#[derive(Args)]
pub struct ScanArgs {
    /// Input image file (JPG, PNG, ...)
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    format: OutputFormat,

    /// Language model identifier (default from config, "fra")
    #[arg(short, long)]
    lang: Option<String>,

    /// Show the recognition confidence score
    #[arg(long)]
    show_confidence: bool,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// Plain recognized text
    Text,
}

pub async fn run(args: ScanArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    // Load configuration
    let config = if let Some(path) = config_path {
        LexocrConfig::from_file(Path::new(path))?
    } else {
        LexocrConfig::default()
    };

    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    info!("Scanning file: {}", args.input.display());

    let bytes = fs::read(&args.input)?;
    let upload = FileUpload {
        file_name: args
            .input
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "document".to_string()),
        media_type: media_type_for(&args.input),
        bytes,
    };
    debug!("declared media type: {}", upload.media_type);

    let provider = TesseractProvider::new()
        .with_binary(&config.engine.binary)
        .with_page_segmentation_mode(config.engine.page_segmentation_mode)
        .with_timeout(Duration::from_secs(config.engine.timeout_secs));

    let mut scan_config = config.scan.clone();
    if let Some(lang) = args.lang {
        scan_config.lang = lang;
    }

    let mut scanner = DocumentScanner::with_config(provider, scan_config);

    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap(),
    );
    pb.set_message("Extracting text...");
    pb.enable_steady_tick(Duration::from_millis(100));

    let outcome = scanner.scan_file(&upload).await;
    pb.finish_and_clear();

    let result = match outcome {
        ScanOutcome::Succeeded(result) => result,
        ScanOutcome::Failed { message, .. } => {
            anyhow::bail!(message);
        }
    };

    let output = format_result(&result, args.format)?;

    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        println!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{}", output);
    }

    if args.show_confidence {
        println!();
        println!(
            "{} Recognition confidence: {}%",
            style("ℹ").blue(),
            result.confidence
        );
    }

    debug!("Total scan time: {:?}", start.elapsed());

    Ok(())
}

/// Map a file extension to a declared media type.
///
/// Unknown extensions fall through as a non-image type so the scanner
/// rejects them with its localized message.
fn media_type_for(path: &Path) -> String {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    match extension.as_str() {
        "jpg" | "jpeg" => "image/jpeg".to_string(),
        "png" => "image/png".to_string(),
        "tif" | "tiff" => "image/tiff".to_string(),
        "bmp" => "image/bmp".to_string(),
        "webp" => "image/webp".to_string(),
        "gif" => "image/gif".to_string(),
        _ => "application/octet-stream".to_string(),
    }
}

fn format_result(result: &ExtractionResult, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(result)?),
        OutputFormat::Text => Ok(result.text.clone()),
    }
}

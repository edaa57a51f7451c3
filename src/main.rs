//! exif-probe - Print the EXIF metadata of an image file.

use clap::Parser;
use std::process::ExitCode;
use tracing::{debug, error};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use exif_probe::{
    config::{Config, OutputFormat},
    extract_exif, load_file, ExifData, ExifSummary,
};

fn main() -> ExitCode {
    let config = Config::parse();

    init_logging(config.verbose);

    if let Err(e) = config.validate() {
        error!("Configuration error: {}", e);
        return ExitCode::FAILURE;
    }

    let bytes = match load_file(&config.path, config.max_file_size) {
        Ok(bytes) => bytes,
        Err(e) => {
            error!("{}", e);
            return ExitCode::FAILURE;
        }
    };
    debug!(path = %config.path.display(), size = bytes.len(), "Loaded image");

    let exif = match extract_exif(&bytes) {
        Ok(exif) => exif,
        Err(e) => {
            error!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    match render(&config, exif.as_ref(), bytes.len() as u64) {
        Ok(output) => {
            println!("{}", output);
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("Failed to render output: {}", e);
            ExitCode::FAILURE
        }
    }
}

/// Render extracted metadata in the configured format.
fn render(
    config: &Config,
    exif: Option<&ExifData>,
    file_size: u64,
) -> Result<String, serde_json::Error> {
    match config.format {
        OutputFormat::Json if config.compact => serde_json::to_string(&exif),
        OutputFormat::Json => serde_json::to_string_pretty(&exif),
        OutputFormat::Summary => Ok(match exif {
            Some(exif) => ExifSummary::from_exif(exif, file_size)
                .to_string()
                .trim_end()
                .to_string(),
            None => "No EXIF metadata found".to_string(),
        }),
    }
}

/// Initialize the tracing/logging subsystem.
///
/// Logs go to stderr so that stdout only carries the rendered metadata.
fn init_logging(verbose: bool) {
    let env_filter = if verbose {
        "exif_probe=debug"
    } else {
        "exif_probe=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| env_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

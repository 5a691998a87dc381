use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, fmt};

use fit2gpx::cli::Cli;
use fit2gpx::fit_io;
use fit2gpx::{ConversionOutcome, ConvertOptions, Destination, InputSource, convert};

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    // stdout may carry the GPX document
    fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    if cli.inspect {
        let summary = fit_io::inspect_fit(&cli.input)?;
        if cli.json {
            fit_io::print_summary_json(&summary)?;
        } else {
            fit_io::print_summary(&summary);
        }
        return Ok(());
    }

    let input = InputSource::Path(PathBuf::from(&cli.input));
    let options = ConvertOptions {
        track_name: cli.name,
        show_progress: cli.progress,
    };

    let outcome = match cli.output.as_deref() {
        Some("-") => {
            let mut stdout = std::io::stdout().lock();
            convert(&input, Destination::Sink(&mut stdout), &options)
        }
        Some(path) => convert(&input, Destination::File(PathBuf::from(path)), &options),
        None => convert(&input, Destination::unset_for(&input), &options),
    }
    .with_context(|| format!("failed to convert {}", cli.input))?;

    if let ConversionOutcome::Written {
        path: Some(path),
        points,
    } = &outcome
    {
        println!("Wrote {} points to {}", points, path.display());
    }

    Ok(())
}

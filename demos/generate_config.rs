//! Write the default matcher configuration as JSON
//!
//! ```text
//! cargo run --example generate_config -- config/matcher.json
//! cargo run --example generate_config -- --stdout
//! ```

use clap::Parser;
use color_matcher::{MatchError, MatcherConfig, Result};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "generate-config")]
#[command(about = "Write the default color matcher configuration", long_about = None)]
struct Args {
    /// Destination file; parent directories are created as needed
    #[arg(value_name = "FILE", default_value = "matcher.json")]
    output: PathBuf,

    /// Print the configuration instead of writing a file
    #[arg(long)]
    stdout: bool,
}

fn write(args: &Args, config: &MatcherConfig) -> Result<()> {
    if args.stdout {
        let json = serde_json::to_string_pretty(config)
            .map_err(|e| MatchError::config("Failed to serialize config", e))?;
        println!("{}", json);
        return Ok(());
    }

    if let Some(dir) = args.output.parent().filter(|d| !d.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir).map_err(|e| {
            MatchError::config(format!("Cannot create {}", dir.display()), e)
        })?;
    }
    config.to_json_file(&args.output)?;
    eprintln!("Wrote {}", args.output.display());
    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();
    let config = MatcherConfig::default();

    if let Err(e) = write(&args, &config) {
        eprintln!("generate-config: {}", e);
        return ExitCode::FAILURE;
    }

    eprintln!(
        "trim {:.0}% per side above {} opaque pixels (alpha >= {}), list at {}%+, regions > {:.0}px",
        config.sampling.trim_fraction * 100.0,
        config.sampling.trim_min_pixels,
        config.sampling.alpha_threshold,
        config.matching.visibility_threshold,
        config.regions.min_size
    );
    ExitCode::SUCCESS
}

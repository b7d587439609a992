//! Command-line interface for color_matcher
//!
//! Samples rectangles from an image and ranks candidate colors against them.
//!
//! ```text
//! cargo run --example cli -- photo.png --region 10,10,40,40 --region 80,20,30,30 \
//!     --candidate "#A83232" --candidate "#3250A8"
//! ```

use clap::Parser;
use color_matcher::{region, MatchError, MatcherConfig, Rect, Session};
use serde_json::json;
use std::path::PathBuf;
use std::process;

#[derive(Parser)]
#[command(name = "color-matcher")]
#[command(version, about = "Match colors against sampled image regions", long_about = None)]
struct Cli {
    /// Image to sample from
    #[arg(value_name = "IMAGE")]
    image: PathBuf,

    /// Region to sample (x,y,width,height); repeat for several
    #[arg(short, long, value_name = "X,Y,W,H", value_parser = parse_rect)]
    region: Vec<Rect>,

    /// Candidate color (#RRGGBB); repeat for several
    #[arg(short, long, value_name = "HEX")]
    candidate: Vec<String>,

    /// Add this many candidates with random colors
    #[arg(long, value_name = "N", default_value_t = 0)]
    random: usize,

    /// Matcher configuration file (JSON)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
}

fn parse_rect(s: &str) -> Result<Rect, String> {
    let parts: Vec<f64> = s
        .split(',')
        .map(|p| p.trim().parse::<f64>().map_err(|e| format!("{}: {}", p, e)))
        .collect::<Result<_, _>>()?;

    match parts.as_slice() {
        [x, y, w, h] => {
            let rect = Rect::new(*x, *y, *w, *h);
            if rect.is_finite() {
                Ok(rect)
            } else {
                Err(format!("region bounds must be finite numbers, got {}", s))
            }
        }
        _ => Err(format!("expected X,Y,W,H, got {}", s)),
    }
}

fn main() {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => MatcherConfig::from_json_file(path).unwrap_or_else(|e| {
            eprintln!("Error: {}", e);
            process::exit(1);
        }),
        None => MatcherConfig::default(),
    };

    let image = match image::open(&cli.image) {
        Ok(img) => img.to_rgba8(),
        Err(e) => {
            eprintln!("Error loading {}: {}", cli.image.display(), e);
            process::exit(1);
        }
    };

    let mut session = Session::with_config(&config).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        process::exit(1);
    });

    for rect in &cli.region {
        if let Err(e) = session.add_region(&image, *rect) {
            eprintln!("Skipping region {:?}: {}", rect, e.user_message());
        }
    }

    for hex in &cli.candidate {
        session.add_candidate_with(hex.as_str());
    }
    for _ in 0..cli.random {
        session.add_candidate();
    }

    for (index, r) in session.regions().iter().enumerate() {
        if let Some(color) = r.color {
            eprintln!("{}: {}", region::label(index), color);
        }
    }

    let report = match session.rank() {
        Ok(report) => report,
        Err(e @ MatchError::NoRegions) => {
            eprintln!("{}", e.user_message());
            process::exit(2);
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };

    let output = json!({
        "regions": session.regions(),
        "candidates": session.candidates(),
        "average": session.average_color(),
        "ranking": report,
    });

    match serde_json::to_string_pretty(&output) {
        Ok(text) => println!("{}", text),
        Err(e) => {
            eprintln!("Error serializing result: {}", e);
            process::exit(1);
        }
    }
}

#![deny(unsafe_code)]
//! CLI binary for the rally-ramp palette generator.
//!
//! Subcommands:
//! - `generate`: build a lock-pinned ramp and rate each step against a background
//! - `hue <hex>`: print the converted hue readout for a color
//! - `curves`: list available interpolation curves

mod error;
mod request;

use clap::{Parser, Subcommand};
use error::CliError;
use rally_ramp_core::{
    display_hue, evaluate_contrast, first_sufficient_contrast, generate_ramp, hex_to_rgb,
    major_count, ContrastResult, Curve, GeneratedColor, Rotation, DEFAULT_BACKGROUND,
};
use request::{resolve_request, Overrides};
use std::path::PathBuf;
use std::process;
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "rally-ramp", about = "Lock-pinned color ramp generator")]
struct Cli {
    /// Output as JSON instead of human-readable text.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Generate a ramp and evaluate its contrast against a background.
    Generate {
        /// Lock color that must appear exactly in the ramp (e.g. "#1FA846").
        #[arg(short, long)]
        lock: Option<String>,

        /// Number of steps in the ramp.
        #[arg(short, long)]
        steps: Option<usize>,

        /// Hue sweep direction (clockwise, counterclockwise, cw, ccw).
        #[arg(short, long)]
        rotation: Option<Rotation>,

        /// Background color the steps are rated against.
        #[arg(short, long, default_value = DEFAULT_BACKGROUND)]
        background: String,

        /// JSON ramp request file.
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Print the converted hue of a hex color, in whole degrees.
    Hue {
        /// Hex color (6 digits, optional '#').
        hex: String,
    },
    /// List available interpolation curves.
    Curves,
}

/// One text line per step, in the same shape as the web tool's list view.
fn render_lines(
    colors: &[GeneratedColor],
    results: &[ContrastResult],
    candidate: Option<usize>,
) -> Vec<String> {
    results
        .iter()
        .zip(colors)
        .map(|(r, c)| {
            let mut line = format!(
                "{}, Text: {}, Background: {}, Contrast: {:.2}",
                r.label,
                r.ink.hex(),
                r.hex,
                r.contrast_ratio
            );
            if c.is_locked {
                line.push_str(" [locked]");
            }
            if candidate == Some(r.step) {
                line.push_str("  Candidate");
            }
            line
        })
        .collect()
}

fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Command::Curves => {
            let names: Vec<&str> = Curve::all().iter().map(|c| c.name()).collect();
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&names)?);
            } else {
                for name in names {
                    println!("{name}");
                }
            }
        }
        Command::Hue { hex } => {
            if hex_to_rgb(&hex).is_none() {
                warn!(%hex, "malformed hex color; hue reads as 0");
            }
            let hue = display_hue(&hex);
            if cli.json {
                let info = serde_json::json!({ "hex": hex, "hue": hue });
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                println!("Converted Hue: {hue}°");
            }
        }
        Command::Generate {
            lock,
            steps,
            rotation,
            background,
            config,
        } => {
            let request = resolve_request(
                config.as_deref(),
                Overrides {
                    lock,
                    steps,
                    rotation,
                },
            )?;
            let colors = generate_ramp(&request)?;
            let results = evaluate_contrast(&colors, &background)?;
            let candidate = first_sufficient_contrast(&results).map(|r| r.step);
            match candidate {
                Some(step) => info!(step, %background, "first step with sufficient contrast"),
                None => info!(%background, "no step reaches sufficient contrast"),
            }

            if cli.json {
                let info = serde_json::json!({
                    "request": request,
                    "background": background,
                    "colors": colors,
                    "contrast": results,
                    "candidate": candidate,
                });
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                for line in render_lines(&colors, &results, candidate) {
                    println!("{line}");
                }
                println!(
                    "Generated {} colors with {} major steps",
                    colors.len(),
                    major_count(&colors)
                );
            }
        }
    }

    Ok(())
}

fn init_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "warn".into());
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    init_tracing();
    let cli = Cli::parse();
    let json_mode = cli.json;
    if let Err(e) = run(cli) {
        if json_mode {
            let j = serde_json::json!({"error": e.to_string(), "exit_code": e.exit_code()});
            eprintln!("{}", serde_json::to_string_pretty(&j).unwrap_or_default());
        } else {
            eprintln!("error: {e}");
        }
        process::exit(e.exit_code());
    }
}

//! Text Overlay Demo
//!
//! Loads a PNG, runs it through the text overlay node as a one-image batch and
//! writes the result:
//! - Parameters come from an optional TOML file, command-line flags override them
//! - Fonts are looked up in `--font-dir` (defaults to the crate's `fonts/`)
//!
//! Run with: cargo run -p glint_node --example overlay_png -- in.png out.png --text "Hello"

use anyhow::{Context, Result};
use clap::Parser;
use glint_image::{ImageBatch, TensorLayout};
use glint_node::{NodeRegistry, TextOverlayNode, TextOverlayParams};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "overlay-png")]
#[command(about = "Draw text onto a PNG image")]
struct Args {
    /// Input image
    input: PathBuf,

    /// Output image
    output: PathBuf,

    /// TOML file with overlay parameters
    #[arg(short, long)]
    params: Option<PathBuf>,

    /// Directory to look up font families in
    #[arg(long)]
    font_dir: Option<PathBuf>,

    /// Text to draw
    #[arg(short, long)]
    text: Option<String>,

    /// Font family (file stem in the font directory, or "Custom")
    #[arg(short, long)]
    family: Option<String>,

    /// Font file, used with the "Custom" family
    #[arg(long)]
    font: Option<String>,

    /// Print the node registry as JSON and exit
    #[arg(long)]
    schema: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let args = Args::parse();

    let node = match &args.font_dir {
        Some(dir) => TextOverlayNode::new(dir),
        None => TextOverlayNode::bundled(),
    };

    if args.schema {
        let mut registry = NodeRegistry::new();
        node.register(&mut registry);
        println!("{}", registry.to_json()?);
        return Ok(());
    }

    let mut params = match &args.params {
        Some(path) => TextOverlayParams::load(path)?,
        None => TextOverlayParams::default(),
    };
    if let Some(text) = args.text {
        params.text = text;
    }
    if let Some(family) = args.family {
        params.font_family = family;
    }
    if args.font.is_some() {
        params.custom_font_path = args.font;
    }

    let input = image::open(&args.input)
        .with_context(|| format!("Failed to open {}", args.input.display()))?
        .to_rgb8();
    tracing::info!(
        "Loaded {} ({}x{})",
        args.input.display(),
        input.width(),
        input.height()
    );

    let batch = ImageBatch::from_rasters(TensorLayout::ChannelsLast, &[input])?;
    let output = node.add_text(&batch, &params)?;

    let raster = output
        .to_rasters()?
        .into_iter()
        .next()
        .context("Node returned an empty batch")?;
    raster
        .save(&args.output)
        .with_context(|| format!("Failed to write {}", args.output.display()))?;

    tracing::info!("Wrote {}", args.output.display());
    Ok(())
}

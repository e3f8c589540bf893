//! drawcustom CLI
//!
//! Reads an image request (JSON) from a file or stdin, renders it, and
//! writes a PNG.
//!
//! Usage:
//!   drawcustom [OPTIONS] [FILE]
//!
//! Options:
//!   -o, --output <FILE>   Output PNG path (default: out.png)
//!   -a, --assets <DIR>    Directory holding the font and icon assets
//!   -p, --palette <FILE>  Palette file with named-color overrides (TOML)
//!       --lenient         Skip failing elements instead of aborting

use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use drawcustom::{
    AssetPaths, ErrorPolicy, ImageRequest, Palette, RenderConfig, Renderer,
};

#[derive(Parser)]
#[command(name = "drawcustom")]
#[command(about = "Render e-paper dashboard images from declarative JSON elements")]
struct Cli {
    /// Input request file (reads from stdin if not provided)
    input: Option<PathBuf>,

    /// Output PNG path
    #[arg(short, long, default_value = "out.png")]
    output: PathBuf,

    /// Directory holding the font and icon assets
    #[arg(short, long)]
    assets: Option<PathBuf>,

    /// Palette file with named-color overrides (TOML)
    #[arg(short, long)]
    palette: Option<PathBuf>,

    /// Skip failing elements instead of aborting the render
    #[arg(long)]
    lenient: bool,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    // Load palette
    let palette = match &cli.palette {
        Some(path) => match Palette::from_file(path) {
            Ok(p) => p,
            Err(e) => {
                eprintln!("Error loading palette '{}': {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => Palette::default(),
    };

    // Read input
    let source = match &cli.input {
        Some(path) => match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                eprintln!("Error reading file '{}': {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => {
            let mut buffer = String::new();
            match io::stdin().read_to_string(&mut buffer) {
                Ok(_) => buffer,
                Err(e) => {
                    eprintln!("Error reading from stdin: {}", e);
                    std::process::exit(1);
                }
            }
        }
    };

    let request: ImageRequest = match serde_json::from_str(&source) {
        Ok(request) => request,
        Err(e) => {
            eprintln!("Error parsing request: {}", e);
            std::process::exit(1);
        }
    };

    let assets = cli
        .assets
        .as_deref()
        .map(AssetPaths::in_dir)
        .unwrap_or_default();
    let policy = if cli.lenient {
        ErrorPolicy::Skip
    } else {
        ErrorPolicy::Abort
    };
    let config = RenderConfig::new()
        .with_assets(assets)
        .with_palette(palette)
        .with_error_policy(policy);

    let image = match Renderer::new(config).render(&request) {
        Ok(image) => image,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = image.save(&cli.output) {
        eprintln!("Error writing '{}': {}", cli.output.display(), e);
        std::process::exit(1);
    }
}

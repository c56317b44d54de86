//! lineart: turn a scene spec JSON document into a scene JSON document.
//!
//! Logs go to stderr (`RUST_LOG` overrides the default `info` filter); the
//! scene goes to stdout or `--output`.

mod config;

use anyhow::{Context, Result};
use clap::Parser;
use composer::Composer;
use config::LineartConfig;
use procgen::AlgorithmKind;
use std::io::{Read, Write};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "lineart", version, about = "Procedural line-art scene generator")]
struct Args {
    /// Scene spec JSON file; `-` or omitted reads stdin.
    spec: Option<PathBuf>,

    /// Config file (defaults to ./lineart.ron when present).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Request seed; overrides the config.
    #[arg(long)]
    seed: Option<u64>,

    /// Write the scene here instead of stdout.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Pretty-print the scene JSON.
    #[arg(long)]
    pretty: bool,

    /// List the available algorithms and exit.
    #[arg(long)]
    list: bool,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    if args.list {
        for kind in AlgorithmKind::ALL {
            if kind.aliases().is_empty() {
                println!("{}", kind.name());
            } else {
                println!("{} ({})", kind.name(), kind.aliases().join(", "));
            }
        }
        return Ok(());
    }

    let config = match &args.config {
        Some(path) => LineartConfig::load_from(path)?,
        None => LineartConfig::load(),
    };
    log::debug!("Config: {:?}", config);

    let text = read_spec(args.spec.as_ref())?;
    let mut composer = Composer::new(config.budget);
    if let Some(seed) = args.seed.or(config.seed) {
        composer = composer.with_seed(seed);
    }
    let scene = composer.compose_json_str(&text);
    log::info!(
        "{} lines, {} warning(s){}",
        scene.metadata.total_lines,
        scene.metadata.warnings.len(),
        if scene.metadata.fallback { ", fallback" } else { "" }
    );

    let json = if args.pretty || config.pretty {
        serde_json::to_string_pretty(&scene)?
    } else {
        serde_json::to_string(&scene)?
    };
    match &args.output {
        Some(path) => std::fs::write(path, json).with_context(|| format!("could not write {}", path.display()))?,
        None => {
            let mut stdout = std::io::stdout().lock();
            writeln!(stdout, "{}", json).context("could not write scene to stdout")?;
        }
    }
    Ok(())
}

fn read_spec(path: Option<&PathBuf>) -> Result<String> {
    match path {
        Some(path) if path.as_os_str() != "-" => {
            std::fs::read_to_string(path).with_context(|| format!("could not read spec {}", path.display()))
        }
        _ => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .context("could not read spec from stdin")?;
            Ok(text)
        }
    }
}

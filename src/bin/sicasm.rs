use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use sicxe_asm::{Assembler, AsmConfig};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Assemble a SIC/XE source file into a listing and an object program"
)]
struct Opts {
    /// Input assembly file
    #[arg(short, long, value_name = "FILE")]
    input: PathBuf,
    /// Output directory (defaults to the input's directory)
    #[arg(short, long, value_name = "DIR")]
    output: Option<PathBuf>,
    /// Log pipeline stages at debug level
    #[arg(short, long)]
    verbose: bool,
    /// Assembler settings as JSON (missing fields keep their defaults)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
    /// Write diagnostics to FILE as JSON
    #[arg(long, value_name = "FILE")]
    diagnostics: Option<PathBuf>,
    /// Fail when any symbol or mnemonic is left unresolved
    #[arg(long)]
    strict: bool,
}

fn load_config(path: Option<&Path>) -> Result<AsmConfig> {
    let Some(path) = path else {
        return Ok(AsmConfig::default());
    };
    let txt = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    serde_json::from_str(&txt).with_context(|| format!("invalid config {}", path.display()))
}

fn main() -> Result<()> {
    let opts = Opts::parse();

    let filter = if opts.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let mut cfg = load_config(opts.config.as_deref())?;
    cfg.strict |= opts.strict;

    let source = std::fs::read_to_string(&opts.input)
        .with_context(|| format!("failed to read {}", opts.input.display()))?;
    tracing::info!(input = %opts.input.display(), "loaded source");

    let asm = Assembler::new(cfg).assemble_str(&source)?;
    for d in &asm.diagnostics {
        eprintln!("{d}");
    }

    let out_dir = match &opts.output {
        Some(dir) => dir.clone(),
        None => opts
            .input
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default(),
    };
    let stem = opts
        .input
        .file_stem()
        .context("input path has no file name")?
        .to_string_lossy();

    let listing_path = out_dir.join(format!("{stem}.txt"));
    std::fs::write(&listing_path, &asm.listing)
        .with_context(|| format!("failed to write {}", listing_path.display()))?;
    tracing::info!(path = %listing_path.display(), "saved listing");

    let object_path = out_dir.join(format!("{stem}.obj"));
    std::fs::write(&object_path, asm.object.to_string())
        .with_context(|| format!("failed to write {}", object_path.display()))?;
    tracing::info!(path = %object_path.display(), "saved object program");

    if let Some(path) = &opts.diagnostics {
        let json = serde_json::to_string_pretty(&asm.diagnostics)?;
        std::fs::write(path, json)
            .with_context(|| format!("failed to write {}", path.display()))?;
    }

    Ok(())
}

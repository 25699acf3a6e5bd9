use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::{fs, path::PathBuf};

use wob_catalog::load::{is_wrapped, shape_errors, unwrap_definition};

#[derive(Parser)]
#[command(name = "xtask", about = "wob-catalog workspace tasks")]
struct Cli {
    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Subcommand)]
enum Cmd {
    /// Validate a catalog file against schemas/catalog.schema.json
    ValidateCatalog { file: PathBuf },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    match cli.cmd {
        Cmd::ValidateCatalog { file } => validate_catalog(&file),
    }
}

fn validate_catalog(path: &PathBuf) -> Result<()> {
    let text = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let json = if is_wrapped(&text) { unwrap_definition(&text)? } else { text.as_str() };
    let data: serde_json::Value = serde_json::from_str(json).with_context(|| "parse json")?;
    let errors = shape_errors(&data)?;
    if !errors.is_empty() {
        eprintln!("Invalid: {}", path.display());
        for e in errors {
            eprintln!("- {}", e);
        }
        std::process::exit(1);
    }
    println!("OK: {}", path.display());
    Ok(())
}

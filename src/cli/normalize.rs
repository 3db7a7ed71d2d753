use anyhow::{Context, Result};
use log::info;
use std::io::Write;
use std::path::PathBuf;

use hmxml::registry::Registry;

/// Parse a settings file and write it back in canonical layout
pub fn run(registry: &Registry, input: PathBuf, output: Option<PathBuf>) -> Result<()> {
    let document = registry
        .read_file(&input)
        .with_context(|| format!("Failed to parse {}", input.display()))?;

    match output {
        Some(path) => {
            registry
                .write_file(&document, &path)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            info!("Normalized {} -> {}", input.display(), path.display());
        }
        None => {
            let bytes = registry
                .serialize(&document)
                .context("Failed to serialize document")?;
            std::io::stdout()
                .write_all(&bytes)
                .context("Failed to write to standard output")?;
        }
    }

    Ok(())
}

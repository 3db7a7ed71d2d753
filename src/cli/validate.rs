use anyhow::{Context, Result};
use log::info;
use std::path::PathBuf;

use hmxml::registry::Registry;
use hmxml::validator::validate_file;

/// Validate a settings file
pub fn run(registry: &Registry, file: PathBuf) -> Result<()> {
    info!("HMxml Validator");
    info!("===============");
    info!("File: {}", file.display());

    let report = validate_file(&file, registry)
        .with_context(|| format!("Failed to read {}", file.display()))?;

    // Use colorized output if available
    #[cfg(feature = "colorized_output")]
    {
        println!("{}", report.format_colored());
    }

    #[cfg(not(feature = "colorized_output"))]
    {
        println!("{}", report);
    }

    // Exit with error code if validation failed
    if report.has_failures() {
        std::process::exit(1);
    }

    Ok(())
}

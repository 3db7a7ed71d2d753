use anyhow::{Context, Result};
use log::info;
use std::path::PathBuf;

use hmxml::model::Decimal;
use hmxml::registry::Registry;

/// Set `FBP/Backprojection/ImageCentre` and save the file
pub fn run(registry: &Registry, file: PathBuf, value: &str, output: Option<PathBuf>) -> Result<()> {
    let centre = Decimal::parse(value).context("Centre of rotation must be a decimal number")?;

    let mut document = registry
        .read_file(&file)
        .with_context(|| format!("Failed to parse {}", file.display()))?;
    let root = document
        .hm_xml
        .as_mut()
        .with_context(|| format!("{} has no HMxml element", file.display()))?;

    match root.set_image_centre(centre.clone(), registry.factory()) {
        Some(previous) => info!("Centre of rotation {} -> {}", previous, centre),
        None => info!("Centre of rotation set to {}", centre),
    }

    let target = output.unwrap_or(file);
    registry
        .write_file(&document, &target)
        .with_context(|| format!("Failed to write {}", target.display()))?;
    println!("{}: ImageCentre = {}", target.display(), centre);

    Ok(())
}

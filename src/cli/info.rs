use anyhow::{Context, Result};
use std::path::PathBuf;

use hmxml::model::MixedEntry;
use hmxml::registry::Registry;

/// Display the key parameters of a settings file
pub fn run(registry: &Registry, file: PathBuf, json: bool) -> Result<()> {
    if !file.exists() {
        anyhow::bail!("File does not exist: {}", file.display());
    }

    let document = registry
        .read_file(&file)
        .with_context(|| format!("Failed to parse {}", file.display()))?;

    if json {
        println!("{}", document.to_json_pretty()?);
        return Ok(());
    }

    println!("HMxml File Information");
    println!("======================");
    println!("File: {}", file.display());
    println!();

    println!("{}", document.summary());
    println!();

    if !document.xmlns_prefix_map.is_empty() {
        println!("Namespaces:");
        for (prefix, uri) in &document.xmlns_prefix_map {
            let prefix = if prefix.is_empty() { "(default)" } else { prefix };
            println!("  {}: {}", prefix, uri);
        }
        println!();
    }

    if !document.xsi_schema_location.is_empty() {
        println!("Schema locations:");
        for (namespace, location) in &document.xsi_schema_location {
            let namespace = if namespace.is_empty() { "(no namespace)" } else { namespace };
            println!("  {}: {}", namespace, location);
        }
        println!();
    }

    let unknown: Vec<&MixedEntry> = document.unknown_elements().collect();
    if !unknown.is_empty() {
        println!("Preserved unknown elements:");
        for entry in unknown {
            if let MixedEntry::Element { parent, name, .. } = entry {
                println!("  {} in {}", name, parent.as_deref().unwrap_or("/"));
            }
        }
        println!();
    }

    let missing = document.missing_required();
    if missing.is_empty() {
        println!("All required attributes set.");
    } else {
        println!("Unset required attributes:");
        for path in missing {
            println!("  {}", path);
        }
    }

    Ok(())
}

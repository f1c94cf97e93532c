//! Shared output handling for commands that produce extracted material.
//!
//! Material goes either into a manifest file or into a summary. Values are
//! never printed; summaries show sizes and fingerprints only.

use crate::core::manifest::{self, SecretManifest};
use crate::models::ExtractedMaterial;
use crate::util::fingerprint;
use anyhow::{bail, Result};
use comfy_table::{presets::UTF8_FULL, Attribute, Cell, Table};
use serde::Serialize;
use std::path::Path;
use tracing::info;

#[derive(Serialize)]
struct SummaryItem {
    key: String,
    size_bytes: usize,
    sha256: String,
}

pub fn validate_format(format: &str) -> Result<()> {
    if format != "table" && format != "json" {
        bail!("invalid format: {} (use table|json)", format);
    }
    Ok(())
}

/// Write the manifest when `output` is set, otherwise print a summary.
pub fn emit(
    name: &str,
    material: &ExtractedMaterial,
    tls: bool,
    output: Option<&Path>,
    format: &str,
) -> Result<()> {
    if let Some(path) = output {
        manifest::save(path, &SecretManifest::new(name, material, tls))?;
        info!(secret = name, keys = material.len(), path = %path.display(), "wrote secret manifest");
        println!("Wrote {}", path.display());
        return Ok(());
    }
    print_summary(material, format)
}

fn print_summary(material: &ExtractedMaterial, format: &str) -> Result<()> {
    let items: Vec<SummaryItem> = material
        .iter()
        .map(|(key, value)| SummaryItem {
            key: key.to_string(),
            size_bytes: value.len(),
            sha256: fingerprint::short(value),
        })
        .collect();

    if format == "json" {
        println!("{}", serde_json::to_string_pretty(&items)?);
        return Ok(());
    }

    if items.is_empty() {
        println!("No keys extracted.");
        return Ok(());
    }

    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec![
        Cell::new("Key").add_attribute(Attribute::Bold),
        Cell::new("Size").add_attribute(Attribute::Bold),
        Cell::new("SHA-256").add_attribute(Attribute::Bold),
    ]);
    for item in items {
        table.add_row(vec![
            item.key,
            format!("{} B", item.size_bytes),
            item.sha256,
        ]);
    }
    println!("{table}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_format() {
        assert!(validate_format("table").is_ok());
        assert!(validate_format("json").is_ok());
        assert!(validate_format("yaml").is_err());
    }

    #[test]
    fn test_emit_writes_manifest() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("secret.json");
        let mut material = ExtractedMaterial::new();
        material.insert("token", b"abc".to_vec());

        emit("token", &material, false, Some(&path), "table").unwrap();
        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.contains("\"token\": \"YWJj\""));
    }
}

//! Cluster secret manifest rendering and atomic writes.

use crate::constants;
use crate::models::ExtractedMaterial;
use crate::util::fs as out_fs;
use anyhow::{Context, Result};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::Serialize;
use std::collections::BTreeMap;
use std::io::Write;
use std::path::Path;
use zeroize::Zeroizing;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SecretManifest {
    pub api_version: &'static str,
    pub kind: &'static str,
    pub metadata: ManifestMetadata,
    #[serde(rename = "type")]
    pub secret_type: &'static str,
    pub data: BTreeMap<String, String>,
}

#[derive(Debug, Serialize)]
pub struct ManifestMetadata {
    pub name: String,
}

impl SecretManifest {
    /// Build a manifest; `tls` selects the TLS secret type.
    pub fn new(name: &str, material: &ExtractedMaterial, tls: bool) -> Self {
        let data = material
            .iter()
            .map(|(key, value)| (key.to_string(), STANDARD.encode(value)))
            .collect();
        Self {
            api_version: "v1",
            kind: "Secret",
            metadata: ManifestMetadata {
                name: name.to_string(),
            },
            secret_type: if tls {
                constants::SECRET_TYPE_TLS
            } else {
                constants::SECRET_TYPE_OPAQUE
            },
            data,
        }
    }
}

/// Write `manifest` as JSON via a temp file in the target directory, mode 0600.
pub fn save(path: &Path, manifest: &SecretManifest) -> Result<()> {
    let content =
        Zeroizing::new(serde_json::to_string_pretty(manifest).context("serialize secret manifest")?);
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    if !parent.exists() {
        out_fs::ensure_dir(parent, constants::OUTPUT_DIR_MODE)?;
    }
    let mut tmp = tempfile::NamedTempFile::new_in(parent)
        .context("create temp secret manifest")?;
    out_fs::set_permissions(tmp.path(), constants::MANIFEST_FILE_MODE)?;
    tmp.write_all(content.as_bytes())
        .context("write secret manifest")?;
    tmp.write_all(b"\n").context("write secret manifest")?;
    tmp.flush().context("flush secret manifest")?;

    tmp.persist(path)
        .map_err(|err| anyhow::anyhow!("persist secret manifest: {}", err))?;
    Ok(())
}

//! Offline vault backed by TOML snapshot files.
//!
//! A store directory holds one `<vault-name>.toml` per vault. Each snapshot
//! lists secrets and certificate policies by name and version. An empty
//! version resolves to the entry marked `latest`, or else the last one listed.

use crate::constants;
use crate::core::client::{ClientFactory, VaultClient};
use crate::error::ClientError;
use crate::models::{CertificatePolicy, SecretBundle};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use zeroize::Zeroizing;

#[derive(Clone, Default, Serialize, Deserialize)]
pub struct SnapshotFile {
    #[serde(default)]
    pub secrets: Vec<SecretEntry>,
    #[serde(default)]
    pub certificates: Vec<CertificateEntry>,
}

#[derive(Clone, Serialize, Deserialize)]
pub struct SecretEntry {
    pub name: String,
    #[serde(default)]
    pub version: String,
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
    #[serde(default)]
    pub latest: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CertificateEntry {
    pub name: String,
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub exportable: bool,
    #[serde(default)]
    pub latest: bool,
}

impl Drop for SecretEntry {
    fn drop(&mut self) {
        zeroize::Zeroize::zeroize(&mut self.value);
    }
}

impl fmt::Debug for SecretEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecretEntry")
            .field("name", &self.name)
            .field("version", &self.version)
            .field("content_type", &self.content_type)
            .finish()
    }
}

trait Versioned {
    fn name(&self) -> &str;
    fn version(&self) -> &str;
    fn latest(&self) -> bool;
}

impl Versioned for SecretEntry {
    fn name(&self) -> &str {
        &self.name
    }
    fn version(&self) -> &str {
        &self.version
    }
    fn latest(&self) -> bool {
        self.latest
    }
}

impl Versioned for CertificateEntry {
    fn name(&self) -> &str {
        &self.name
    }
    fn version(&self) -> &str {
        &self.version
    }
    fn latest(&self) -> bool {
        self.latest
    }
}

fn find_entry<'a, T: Versioned>(entries: &'a [T], name: &str, version: &str) -> Option<&'a T> {
    let mut candidates = entries.iter().filter(|e| e.name() == name);
    if !version.is_empty() {
        return candidates.find(|e| e.version() == version);
    }
    let all: Vec<&T> = candidates.collect();
    all.iter()
        .find(|e| e.latest())
        .or_else(|| all.last())
        .copied()
}

fn not_found(kind: &str, name: &str, version: &str) -> ClientError {
    if version.is_empty() {
        format!("{} '{}' not found", kind, name).into()
    } else {
        format!("{} '{}' version '{}' not found", kind, name, version).into()
    }
}

/// A [`VaultClient`] answering from one snapshot.
#[derive(Debug, Clone, Default)]
pub struct FileVault {
    snapshot: SnapshotFile,
}

impl fmt::Debug for SnapshotFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SnapshotFile")
            .field("secrets", &self.secrets.len())
            .field("certificates", &self.certificates.len())
            .finish()
    }
}

impl FileVault {
    pub fn new(snapshot: SnapshotFile) -> Self {
        Self { snapshot }
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = Zeroizing::new(
            fs::read_to_string(path)
                .with_context(|| format!("read vault snapshot {}", path.display()))?,
        );
        let snapshot: SnapshotFile = toml::from_str(&content)
            .with_context(|| format!("parse vault snapshot {}", path.display()))?;
        Ok(Self::new(snapshot))
    }
}

impl VaultClient for FileVault {
    fn fetch_secret(&self, name: &str, version: &str) -> Result<SecretBundle, ClientError> {
        let entry = find_entry(&self.snapshot.secrets, name, version)
            .ok_or_else(|| not_found("secret", name, version))?;
        Ok(SecretBundle::new(
            entry.value.clone(),
            entry.content_type.as_deref(),
        ))
    }

    fn fetch_certificate_policy(
        &self,
        name: &str,
        version: &str,
    ) -> Result<CertificatePolicy, ClientError> {
        let entry = find_entry(&self.snapshot.certificates, name, version)
            .ok_or_else(|| not_found("certificate", name, version))?;
        Ok(CertificatePolicy {
            exportable: entry.exportable,
        })
    }
}

/// Opens `<store>/<vault-name>.toml` for a vault URL.
#[derive(Debug, Clone)]
pub struct FileVaultFactory {
    store: PathBuf,
}

impl FileVaultFactory {
    pub fn new(store: PathBuf) -> Self {
        Self { store }
    }

    pub fn snapshot_path(&self, vault_url: &str) -> Result<PathBuf, ClientError> {
        let host = vault_url
            .strip_prefix("https://")
            .unwrap_or(vault_url)
            .trim_end_matches('/');
        let vault_name = host
            .strip_suffix(constants::VAULT_DNS_SUFFIX)
            .and_then(|s| s.strip_suffix('.'))
            .filter(|s| !s.is_empty() && !s.contains('/') && !s.contains(".."))
            .ok_or_else(|| -> ClientError {
                format!("unrecognized vault url '{}'", vault_url).into()
            })?;
        Ok(self
            .store
            .join(format!("{}{}", vault_name, constants::SNAPSHOT_EXTENSION)))
    }
}

impl ClientFactory for FileVaultFactory {
    type Client = FileVault;

    fn client(&self, vault_url: &str) -> Result<FileVault, ClientError> {
        let path = self.snapshot_path(vault_url)?;
        FileVault::load(&path).map_err(|err| err.into())
    }
}

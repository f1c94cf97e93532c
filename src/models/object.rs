//! Vault object references.

use crate::error::ExtractError;
use std::fmt;
use std::str::FromStr;

/// Kind of object stored in the key vault.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VaultObjectType {
    Secret,
    Certificate,
    Key,
    Storage,
}

impl VaultObjectType {
    pub fn as_str(&self) -> &'static str {
        match self {
            VaultObjectType::Secret => "secret",
            VaultObjectType::Certificate => "certificate",
            VaultObjectType::Key => "key",
            VaultObjectType::Storage => "storage",
        }
    }
}

impl fmt::Display for VaultObjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VaultObjectType {
    type Err = ExtractError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "secret" => Ok(VaultObjectType::Secret),
            "certificate" => Ok(VaultObjectType::Certificate),
            "key" => Ok(VaultObjectType::Key),
            "storage" => Ok(VaultObjectType::Storage),
            other => Err(ExtractError::InvalidRequest(format!(
                "unknown vault object type '{}' (use secret|certificate|key|storage)",
                other
            ))),
        }
    }
}

/// Identifies one object to fetch. An empty version means "latest".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VaultObjectRef {
    object_type: VaultObjectType,
    name: String,
    version: String,
}

impl VaultObjectRef {
    pub fn new(
        object_type: VaultObjectType,
        name: impl Into<String>,
        version: Option<String>,
    ) -> Result<Self, ExtractError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ExtractError::InvalidRequest(
                "vault object name cannot be empty".into(),
            ));
        }
        Ok(Self {
            object_type,
            name,
            version: version.unwrap_or_default(),
        })
    }

    pub fn object_type(&self) -> VaultObjectType {
        self.object_type
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn is_latest(&self) -> bool {
        self.version.is_empty()
    }
}

impl fmt::Display for VaultObjectRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_latest() {
            write!(f, "{}/{}", self.object_type, self.name)
        } else {
            write!(f, "{}/{}@{}", self.object_type, self.name, self.version)
        }
    }
}

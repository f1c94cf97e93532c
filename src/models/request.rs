//! Secret request document model.

use crate::constants;
use crate::error::ExtractError;
use crate::models::object::{VaultObjectRef, VaultObjectType};
use crate::models::output::{OutputKey, OutputKeySpec};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecretRequest {
    pub vault: VaultSection,
    #[serde(default)]
    pub output: OutputSection,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VaultSection {
    /// Key vault name; the base URL is derived from it.
    pub name: String,
    pub object: ObjectSection,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObjectSection {
    /// One of secret|certificate|key|storage, case-insensitive.
    #[serde(rename = "type")]
    pub object_type: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputSection {
    /// Name of the cluster secret to produce.
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub keys: Vec<OutputKey>,
}

impl SecretRequest {
    fn validate_vault_name(name: &str) -> Result<(), ExtractError> {
        if name.is_empty() {
            return Err(ExtractError::InvalidRequest(
                "vault name cannot be empty".into(),
            ));
        }
        if !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
            return Err(ExtractError::InvalidRequest(format!(
                "invalid vault name '{}': only [a-zA-Z0-9-] allowed",
                name
            )));
        }
        Ok(())
    }

    /// Base URL of the vault named in the request.
    pub fn vault_url(&self) -> Result<String, ExtractError> {
        Self::validate_vault_name(&self.vault.name)?;
        Ok(format!(
            "https://{}.{}",
            self.vault.name,
            constants::VAULT_DNS_SUFFIX
        ))
    }

    pub fn object_ref(&self) -> Result<VaultObjectRef, ExtractError> {
        let object = &self.vault.object;
        let object_type: VaultObjectType = object.object_type.parse()?;
        VaultObjectRef::new(object_type, object.name.clone(), object.version.clone())
    }

    pub fn output_spec(&self) -> OutputKeySpec {
        OutputKeySpec::new(self.output.keys.clone())
    }

    /// Output secret name, falling back to the vault object name.
    pub fn output_name(&self) -> &str {
        self.output
            .name
            .as_deref()
            .filter(|n| !n.is_empty())
            .unwrap_or(self.vault.object.name.as_str())
    }
}

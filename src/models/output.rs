use serde::{Deserialize, Serialize};

/// Maps one retrieved field onto a key of the produced secret.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputKey {
    #[serde(rename = "source", default = "default_source_field")]
    pub source_field: String,
    pub destination: String,
}

fn default_source_field() -> String {
    "value".to_string()
}

/// Ordered output keys for the plain-secret path.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OutputKeySpec {
    keys: Vec<OutputKey>,
}

impl OutputKeySpec {
    pub fn new(keys: Vec<OutputKey>) -> Self {
        Self { keys }
    }

    /// Spec with one key per destination, each sourced from the secret value.
    pub fn destinations<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let keys = names
            .into_iter()
            .map(|name| OutputKey {
                source_field: default_source_field(),
                destination: name.into(),
            })
            .collect();
        Self { keys }
    }

    pub fn iter(&self) -> impl Iterator<Item = &OutputKey> {
        self.keys.iter()
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

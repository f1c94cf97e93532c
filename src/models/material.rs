//! Canonical output of a retrieval: key name to raw bytes.

use std::collections::BTreeMap;
use std::fmt;
use zeroize::Zeroize;

/// Named secret values ready to be written into a cluster secret.
///
/// Keys iterate in sorted order. Values are wiped when the material is
/// dropped, and `Debug` shows only key names and lengths.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct ExtractedMaterial {
    values: BTreeMap<String, Vec<u8>>,
}

impl ExtractedMaterial {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a value, replacing (and wiping) any previous value under `key`.
    pub fn insert(&mut self, key: impl Into<String>, value: Vec<u8>) {
        if let Some(mut previous) = self.values.insert(key.into(), value) {
            previous.zeroize();
        }
    }

    pub fn get(&self, key: &str) -> Option<&[u8]> {
        self.values.get(key).map(Vec::as_slice)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[u8])> {
        self.values
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl Drop for ExtractedMaterial {
    fn drop(&mut self) {
        for value in self.values.values_mut() {
            value.zeroize();
        }
    }
}

/// Stand-in for a value in `Debug` output.
struct Redacted(usize);

impl fmt::Debug for Redacted {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{} bytes>", self.0)
    }
}

impl fmt::Debug for ExtractedMaterial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.values.iter().map(|(k, v)| (k, Redacted(v.len()))))
            .finish()
    }
}

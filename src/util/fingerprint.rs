//! Short SHA-256 fingerprints for identifying secret values without showing them.

use crate::constants::FINGERPRINT_LEN;
use sha2::{Digest, Sha256};

/// Leading hex digits of the SHA-256 of `value`. Empty input yields `"-"`.
pub fn short(value: &[u8]) -> String {
    if value.is_empty() {
        return "-".to_string();
    }
    let mut hex = format!("{:x}", Sha256::digest(value));
    hex.truncate(FINGERPRINT_LEN);
    hex
}

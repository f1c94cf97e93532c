//! Payloads returned by the vault client capability.

use crate::constants;
use serde::{Deserialize, Serialize};
use std::fmt;
use zeroize::Zeroizing;

/// Value and content type of a fetched secret.
#[derive(Clone)]
pub struct SecretBundle {
    pub value: Zeroizing<String>,
    pub content_type: Option<String>,
}

impl SecretBundle {
    pub fn new(value: impl Into<String>, content_type: Option<&str>) -> Self {
        Self {
            value: Zeroizing::new(value.into()),
            content_type: content_type.map(str::to_string),
        }
    }

    pub fn encoding(&self) -> CertificateEncoding {
        CertificateEncoding::from_content_type(self.content_type.as_deref())
    }
}

impl fmt::Debug for SecretBundle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecretBundle")
            .field("value", &format_args!("<{} bytes>", self.value.len()))
            .field("content_type", &self.content_type)
            .finish()
    }
}

/// Export policy attached to a certificate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CertificatePolicy {
    pub exportable: bool,
}

/// Encoding of a certificate's companion secret.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CertificateEncoding {
    Pem,
    Pkcs12,
    /// Anything else; holds the content type as received (empty when absent).
    Unsupported(String),
}

impl CertificateEncoding {
    pub fn from_content_type(content_type: Option<&str>) -> Self {
        match content_type {
            Some(constants::CONTENT_TYPE_PEM) => CertificateEncoding::Pem,
            Some(constants::CONTENT_TYPE_PKCS12) => CertificateEncoding::Pkcs12,
            Some(other) => CertificateEncoding::Unsupported(other.to_string()),
            None => CertificateEncoding::Unsupported(String::new()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encoding_from_content_type() {
        assert_eq!(
            CertificateEncoding::from_content_type(Some("application/x-pem-file")),
            CertificateEncoding::Pem
        );
        assert_eq!(
            CertificateEncoding::from_content_type(Some("application/x-pkcs12")),
            CertificateEncoding::Pkcs12
        );
        assert_eq!(
            CertificateEncoding::from_content_type(Some("text/plain")),
            CertificateEncoding::Unsupported("text/plain".into())
        );
        assert_eq!(
            CertificateEncoding::from_content_type(None),
            CertificateEncoding::Unsupported(String::new())
        );
    }

    #[test]
    fn test_debug_hides_value() {
        let bundle = SecretBundle::new("hunter2", None);
        let debug = format!("{:?}", bundle);
        assert!(!debug.contains("hunter2"));
        assert!(debug.contains("<7 bytes>"));
    }
}

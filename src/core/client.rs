//! Capabilities the retriever consumes from the vault side.
//!
//! Authentication and transport live behind these traits; the retriever only
//! sees fetched bundles or opaque [`ClientError`]s.

use crate::error::ClientError;
use crate::models::{CertificatePolicy, SecretBundle};

/// An authenticated handle to one key vault.
pub trait VaultClient {
    /// Fetch a secret value. An empty `version` means the latest version.
    fn fetch_secret(&self, name: &str, version: &str) -> Result<SecretBundle, ClientError>;

    /// Fetch the export policy of a certificate.
    fn fetch_certificate_policy(
        &self,
        name: &str,
        version: &str,
    ) -> Result<CertificatePolicy, ClientError>;
}

/// Produces credentialed clients for a vault base URL.
pub trait ClientFactory {
    type Client: VaultClient;

    fn client(&self, vault_url: &str) -> Result<Self::Client, ClientError>;
}

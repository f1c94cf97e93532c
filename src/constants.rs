//! Centralized constants for content types, output keys, and file modes.

/// Content type of a certificate secret exported as PEM.
pub const CONTENT_TYPE_PEM: &str = "application/x-pem-file";

/// Content type of a certificate secret exported as base64 PKCS#12.
pub const CONTENT_TYPE_PKCS12: &str = "application/x-pkcs12";

/// Output key for the public certificate (platform TLS secret field).
pub const TLS_CERT_KEY: &str = "tls.crt";

/// Output key for the private key (platform TLS secret field).
pub const TLS_PRIVATE_KEY_KEY: &str = "tls.key";

/// Import password used for PKCS#12 archives exported by the vault.
pub const PKCS12_PASSWORD: &str = "";

/// DNS suffix appended to a vault name to form its base URL.
pub const VAULT_DNS_SUFFIX: &str = "vault.azure.net";

/// Secret type written for the certificate path.
pub const SECRET_TYPE_TLS: &str = "kubernetes.io/tls";

/// Secret type written for the plain-secret path.
pub const SECRET_TYPE_OPAQUE: &str = "Opaque";

/// Permission mode for written secret manifests.
pub const MANIFEST_FILE_MODE: u32 = 0o600;

/// Permission mode for directories created to hold manifests.
pub const OUTPUT_DIR_MODE: u32 = 0o700;

/// File extension for offline vault snapshots.
pub const SNAPSHOT_EXTENSION: &str = ".toml";

/// Number of hex characters of a SHA-256 digest shown in summaries.
pub const FINGERPRINT_LEN: usize = 16;

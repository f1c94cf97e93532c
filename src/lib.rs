//! Key vault secret extraction.
//!
//! Fetches secrets, keys, and certificates from a key vault and normalizes
//! them into named byte values for a cluster secret. Certificates exported as
//! PEM or PKCS#12 become `tls.crt` / `tls.key`.
//!
//! ## Modules
//! - `core` — Retrieval, certificate decoding, offline vault, manifests
//! - `models` — Data structures
//! - `cli` — Command-line handlers
//! - `util` — Filesystem and fingerprint helpers

pub mod cli;
pub mod constants;
pub mod core;
pub mod error;
pub mod models;
pub mod util;

pub use crate::core::cert_decoder::{decode_pem, decode_pkcs12};
pub use crate::core::client::{ClientFactory, VaultClient};
pub use crate::core::retriever::{retrieve, retrieve_request};
pub use crate::error::{ClientError, DecodeError, ExtractError};

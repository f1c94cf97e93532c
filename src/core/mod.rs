//! Retrieval, certificate decoding, and the offline vault.

pub mod cert_decoder;
pub mod client;
pub mod file_vault;
pub mod manifest;
pub mod request;
pub mod retriever;

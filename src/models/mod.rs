//! Data structures exchanged between the retriever, decoder, and callers.

pub mod bundle;
pub mod material;
pub mod object;
pub mod output;
pub mod request;

pub use bundle::{CertificateEncoding, CertificatePolicy, SecretBundle};
pub use material::ExtractedMaterial;
pub use object::{VaultObjectRef, VaultObjectType};
pub use output::{OutputKey, OutputKeySpec};
pub use request::SecretRequest;

//! Error types returned by retrieval and certificate decoding.

use thiserror::Error;

/// Opaque failure reported by a vault client capability.
pub type ClientError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Why a base64 encoded PKCS#12 archive could not be decoded.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error(transparent)]
    Base64(#[from] base64::DecodeError),

    #[error("archive decoded to zero bytes")]
    Empty,
}

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("failed to get {operation} '{name}' from key vault")]
    Retrieval {
        operation: &'static str,
        name: String,
        #[source]
        source: ClientError,
    },

    #[error("unable to get certificate '{name}' since it's not exportable")]
    NotExportable { name: String },

    #[error("key vault secret with content-type '{content_type}' not supported")]
    UnsupportedContentType { content_type: String },

    #[error("failed to decode base64 encoded pkcs12 certificate")]
    Decode(#[from] DecodeError),

    #[error("failed to convert pkcs12 certificate to pem")]
    Parse {
        #[source]
        source: ClientError,
    },

    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

impl ExtractError {
    pub(crate) fn retrieval(
        operation: &'static str,
        name: &str,
        source: impl Into<ClientError>,
    ) -> Self {
        Self::Retrieval {
            operation,
            name: name.to_string(),
            source: source.into(),
        }
    }

    pub(crate) fn parse(source: impl Into<ClientError>) -> Self {
        Self::Parse {
            source: source.into(),
        }
    }
}

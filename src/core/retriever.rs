//! Object-type dispatch: fetch from the vault and shape the output mapping.

use crate::constants;
use crate::core::cert_decoder;
use crate::core::client::{ClientFactory, VaultClient};
use crate::error::ExtractError;
use crate::models::{
    CertificateEncoding, ExtractedMaterial, OutputKeySpec, SecretRequest, VaultObjectRef,
    VaultObjectType,
};
use tracing::debug;

/// Fetch one vault object and normalize it into named byte values.
///
/// Certificates produce `tls.crt` and `tls.key`. Every other object type is
/// fetched as a plain secret and copied under each destination of `output`.
pub fn retrieve<C: VaultClient>(
    object: &VaultObjectRef,
    output: &OutputKeySpec,
    client: &C,
) -> Result<ExtractedMaterial, ExtractError> {
    debug!(object = %object, "retrieving vault object");
    match object.object_type() {
        VaultObjectType::Certificate => retrieve_certificate(object, client),
        VaultObjectType::Secret | VaultObjectType::Key | VaultObjectType::Storage => {
            retrieve_secret(object, output, client)
        }
    }
}

/// Resolve a request document: pick its vault, get a client, then retrieve.
pub fn retrieve_request<F: ClientFactory>(
    request: &SecretRequest,
    factory: &F,
) -> Result<ExtractedMaterial, ExtractError> {
    let object = request.object_ref()?;
    let output = request.output_spec();
    let vault_url = request.vault_url()?;
    let client = factory
        .client(&vault_url)
        .map_err(|err| ExtractError::retrieval("client", &vault_url, err))?;
    retrieve(&object, &output, &client)
}

fn retrieve_secret<C: VaultClient>(
    object: &VaultObjectRef,
    output: &OutputKeySpec,
    client: &C,
) -> Result<ExtractedMaterial, ExtractError> {
    let bundle = client
        .fetch_secret(object.name(), object.version())
        .map_err(|err| ExtractError::retrieval("secret", object.name(), err))?;

    let mut material = ExtractedMaterial::new();
    for key in output.iter() {
        material.insert(key.destination.clone(), bundle.value.as_bytes().to_vec());
    }
    Ok(material)
}

fn retrieve_certificate<C: VaultClient>(
    object: &VaultObjectRef,
    client: &C,
) -> Result<ExtractedMaterial, ExtractError> {
    let policy = client
        .fetch_certificate_policy(object.name(), object.version())
        .map_err(|err| ExtractError::retrieval("certificate policy", object.name(), err))?;
    if !policy.exportable {
        return Err(ExtractError::NotExportable {
            name: object.name().to_string(),
        });
    }

    // the private key lives in a secret sharing the certificate's name and version
    let bundle = client
        .fetch_secret(object.name(), object.version())
        .map_err(|err| ExtractError::retrieval("secret", object.name(), err))?;

    match bundle.encoding() {
        CertificateEncoding::Pem => {
            debug!(content_type = constants::CONTENT_TYPE_PEM, "decoding certificate");
            Ok(cert_decoder::decode_pem(&bundle.value))
        }
        CertificateEncoding::Pkcs12 => {
            debug!(content_type = constants::CONTENT_TYPE_PKCS12, "decoding certificate");
            cert_decoder::decode_pkcs12(&bundle.value)
        }
        CertificateEncoding::Unsupported(content_type) => {
            Err(ExtractError::UnsupportedContentType { content_type })
        }
    }
}

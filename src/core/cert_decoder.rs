//! Certificate normalization into `tls.key` / `tls.crt`.
//!
//! The vault exports a certificate secret as two PEM blocks: the private key
//! first, the public certificate second. That order is the only thing used to
//! tell them apart; block labels are ignored. PKCS#12 exports are flattened
//! into the same two-block shape before decoding.
//!
//! Certificate chains are not supported. Only the first two blocks are used.

use crate::constants::{PKCS12_PASSWORD, TLS_CERT_KEY, TLS_PRIVATE_KEY_KEY};
use crate::error::{DecodeError, ExtractError};
use crate::models::ExtractedMaterial;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use p12::{CertBag, SafeBagKind, PFX};
use pem::{EncodeConfig, LineEnding, Pem};
use tracing::{debug, warn};
use zeroize::Zeroizing;

const BEGIN_MARKER: &str = "-----BEGIN ";
const END_MARKER: &str = "-----END ";
const MARKER_TAIL: &str = "-----";

const PEM_TAG_CERTIFICATE: &str = "CERTIFICATE";
const PEM_TAG_PRIVATE_KEY: &str = "PRIVATE KEY";

/// Split a dual-block PEM export into private key and certificate.
///
/// A block that cannot be found still produces its key, with an empty value.
/// Callers must treat an empty value as malformed input.
pub fn decode_pem(raw: &str) -> ExtractedMaterial {
    let (private_key, rest) = match next_block(raw) {
        Some((block, rest)) => (Some(block), rest),
        None => (None, ""),
    };
    let certificate = next_block(rest).map(|(block, remaining)| {
        let dropped = count_blocks(remaining);
        if dropped > 0 {
            debug!(dropped, "ignoring pem blocks after the certificate");
        }
        block
    });

    let mut material = ExtractedMaterial::new();
    material.insert(
        TLS_PRIVATE_KEY_KEY,
        encode_or_empty(private_key.as_ref(), TLS_PRIVATE_KEY_KEY),
    );
    material.insert(
        TLS_CERT_KEY,
        encode_or_empty(certificate.as_ref(), TLS_CERT_KEY),
    );
    material
}

/// Decode a base64 (URL-safe, unpadded) PKCS#12 export with an empty password.
///
/// Line breaks inside the base64 text are ignored.
pub fn decode_pkcs12(raw: &str) -> Result<ExtractedMaterial, ExtractError> {
    let compact: Zeroizing<String> =
        Zeroizing::new(raw.chars().filter(|c| !matches!(c, '\r' | '\n')).collect());
    let archive = Zeroizing::new(
        URL_SAFE_NO_PAD
            .decode(compact.trim())
            .map_err(DecodeError::from)?,
    );
    if archive.is_empty() {
        return Err(DecodeError::Empty.into());
    }
    debug!(bytes = archive.len(), "decoded pkcs12 archive");

    let merged = Zeroizing::new(pkcs12_to_pem(&archive)?);
    Ok(decode_pem(&merged))
}

/// Re-encode every certificate and key bag as PEM, in archive order.
fn pkcs12_to_pem(archive: &[u8]) -> Result<String, ExtractError> {
    let pfx = PFX::parse(archive).map_err(ExtractError::parse)?;
    if !pfx.verify_mac(PKCS12_PASSWORD) {
        return Err(ExtractError::parse(
            "mac verification failed with empty password",
        ));
    }

    let bags = pfx.bags(PKCS12_PASSWORD).map_err(ExtractError::parse)?;
    let shrouded = bags
        .iter()
        .filter(|bag| matches!(bag.bag, SafeBagKind::Pkcs8ShroudedKeyBag(_)))
        .count();
    // key_bags yields decrypted PKCS#8 keys in shrouded bag order, skipping failures
    let mut keys = decrypted_keys(
        shrouded,
        pfx.key_bags(PKCS12_PASSWORD).map_err(ExtractError::parse)?,
    )?
    .into_iter();

    let mut merged = String::new();
    for bag in &bags {
        let block = match &bag.bag {
            SafeBagKind::CertBag(CertBag::X509(der)) => {
                Pem::new(PEM_TAG_CERTIFICATE, der.clone())
            }
            SafeBagKind::Pkcs8ShroudedKeyBag(_) => {
                let key = keys.next().ok_or_else(|| {
                    ExtractError::parse("private key bag could not be decrypted")
                })?;
                Pem::new(PEM_TAG_PRIVATE_KEY, key.to_vec())
            }
            _ => {
                debug!("skipping unsupported pkcs12 bag");
                continue;
            }
        };
        merged.push_str(&encode_canonical(&block));
    }
    Ok(merged)
}

/// Keys can only be paired with their bags by position when every bag decrypted.
fn decrypted_keys(
    shrouded: usize,
    keys: Vec<Vec<u8>>,
) -> Result<Vec<Zeroizing<Vec<u8>>>, ExtractError> {
    let keys: Vec<Zeroizing<Vec<u8>>> = keys.into_iter().map(Zeroizing::new).collect();
    if keys.len() != shrouded {
        return Err(ExtractError::parse(format!(
            "decrypted {} of {} private key bags",
            keys.len(),
            shrouded
        )));
    }
    Ok(keys)
}

fn encode_canonical(block: &Pem) -> String {
    pem::encode_config(block, EncodeConfig::new().set_line_ending(LineEnding::LF))
}

fn encode_or_empty(block: Option<&Pem>, key: &str) -> Vec<u8> {
    match block {
        Some(block) => encode_canonical(block).into_bytes(),
        None => {
            warn!(key, "no pem block found, writing empty value");
            Vec::new()
        }
    }
}

/// Find the next decodable PEM block, returning it and the text after it.
///
/// Text before a block is skipped. A malformed frame is skipped too, and the
/// scan resumes just past its BEGIN marker.
fn next_block(input: &str) -> Option<(Pem, &str)> {
    let mut rest = input;
    while let Some(start) = rest.find(BEGIN_MARKER) {
        let candidate = &rest[start..];
        let end = frame_end(candidate)?;
        match pem::parse(&candidate[..end]) {
            Ok(block) => return Some((block, &candidate[end..])),
            Err(err) => {
                debug!(error = %err, "skipping malformed pem block");
                rest = &candidate[BEGIN_MARKER.len()..];
            }
        }
    }
    None
}

/// Byte offset just past the END line of the frame starting at `candidate`.
fn frame_end(candidate: &str) -> Option<usize> {
    let end_at = candidate.find(END_MARKER)? + END_MARKER.len();
    let mut end = end_at + candidate[end_at..].find(MARKER_TAIL)? + MARKER_TAIL.len();
    let tail = &candidate[end..];
    if tail.starts_with("\r\n") {
        end += 2;
    } else if tail.starts_with('\n') {
        end += 1;
    }
    Some(end)
}

fn count_blocks(mut input: &str) -> usize {
    let mut count = 0;
    while let Some((_, rest)) = next_block(input) {
        count += 1;
        input = rest;
    }
    count
}

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use keyvault_extract::constants::{
    CONTENT_TYPE_PEM, CONTENT_TYPE_PKCS12, TLS_CERT_KEY, TLS_PRIVATE_KEY_KEY,
};
use keyvault_extract::core::file_vault::FileVaultFactory;
use keyvault_extract::models::{
    CertificatePolicy, OutputKeySpec, SecretBundle, SecretRequest, VaultObjectRef,
    VaultObjectType,
};
use keyvault_extract::{
    decode_pem, retrieve, retrieve_request, ClientError, ExtractError, VaultClient,
};
use rcgen::{CertificateParams, KeyPair};
use std::cell::RefCell;
use std::fs;

/// Records every call so tests can assert on ordering and count.
struct RecordingClient {
    exportable: bool,
    bundle: SecretBundle,
    calls: RefCell<Vec<String>>,
}

impl RecordingClient {
    fn new(exportable: bool, bundle: SecretBundle) -> Self {
        Self {
            exportable,
            bundle,
            calls: RefCell::new(Vec::new()),
        }
    }

    fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }
}

impl VaultClient for RecordingClient {
    fn fetch_secret(&self, name: &str, version: &str) -> Result<SecretBundle, ClientError> {
        self.calls
            .borrow_mut()
            .push(format!("secret {}@{}", name, version));
        Ok(self.bundle.clone())
    }

    fn fetch_certificate_policy(
        &self,
        name: &str,
        version: &str,
    ) -> Result<CertificatePolicy, ClientError> {
        self.calls
            .borrow_mut()
            .push(format!("policy {}@{}", name, version));
        Ok(CertificatePolicy {
            exportable: self.exportable,
        })
    }
}

fn key_and_cert() -> (KeyPair, String, String) {
    let key = KeyPair::generate().unwrap();
    let cert = CertificateParams::new(vec!["app.example.com".to_string()])
        .unwrap()
        .self_signed(&key)
        .unwrap();
    let key_pem = key.serialize_pem();
    let cert_pem = cert.pem();
    (key, key_pem, cert_pem)
}

fn der_of(bytes: &[u8]) -> Vec<u8> {
    pem::parse(bytes).unwrap().contents().to_vec()
}

fn certificate(version: &str) -> VaultObjectRef {
    VaultObjectRef::new(
        VaultObjectType::Certificate,
        "app-tls",
        Some(version.to_string()),
    )
    .unwrap()
}

#[test]
fn pem_certificate_end_to_end() {
    let (_key, key_pem, cert_pem) = key_and_cert();
    let client = RecordingClient::new(
        true,
        SecretBundle::new(format!("{}{}", key_pem, cert_pem), Some(CONTENT_TYPE_PEM)),
    );

    let material = retrieve(&certificate("v3"), &OutputKeySpec::default(), &client).unwrap();

    assert_eq!(material.len(), 2);
    assert_eq!(
        der_of(material.get(TLS_PRIVATE_KEY_KEY).unwrap()),
        der_of(key_pem.as_bytes())
    );
    assert_eq!(
        der_of(material.get(TLS_CERT_KEY).unwrap()),
        der_of(cert_pem.as_bytes())
    );
    // metadata strictly before the secret, same name and version
    assert_eq!(client.calls(), vec!["policy app-tls@v3", "secret app-tls@v3"]);
}

#[test]
fn pkcs12_certificate_end_to_end() {
    let (key, key_pem, cert_pem) = key_and_cert();
    let cert_der = der_of(cert_pem.as_bytes());
    let pfx = p12::PFX::new(&cert_der, &key.serialize_der(), None, "", "app-tls").unwrap();
    let client = RecordingClient::new(
        true,
        SecretBundle::new(URL_SAFE_NO_PAD.encode(pfx.to_der()), Some(CONTENT_TYPE_PKCS12)),
    );

    // same result as the PEM path fed the archive's bags in archive order
    let in_archive_order: String = pfx
        .bags("")
        .unwrap()
        .iter()
        .map(|bag| match &bag.bag {
            p12::SafeBagKind::CertBag(_) => cert_pem.clone(),
            p12::SafeBagKind::Pkcs8ShroudedKeyBag(_) => key_pem.clone(),
            _ => String::new(),
        })
        .collect();
    let expected = decode_pem(&in_archive_order);

    let material = retrieve(&certificate(""), &OutputKeySpec::default(), &client).unwrap();

    assert_eq!(material.len(), 2);
    for slot in [TLS_PRIVATE_KEY_KEY, TLS_CERT_KEY] {
        assert_eq!(
            der_of(material.get(slot).unwrap()),
            der_of(expected.get(slot).unwrap()),
            "{slot}"
        );
    }
    // archives built this way list the certificate bag first
    assert_eq!(der_of(material.get(TLS_PRIVATE_KEY_KEY).unwrap()), cert_der);
    assert_eq!(client.calls(), vec!["policy app-tls@", "secret app-tls@"]);
}

#[test]
fn not_exportable_certificate_never_fetches_secret() {
    let client =
        RecordingClient::new(false, SecretBundle::new("unused", Some(CONTENT_TYPE_PEM)));
    let err = retrieve(&certificate(""), &OutputKeySpec::default(), &client).unwrap_err();

    assert!(matches!(err, ExtractError::NotExportable { .. }));
    assert_eq!(client.calls(), vec!["policy app-tls@"]);
}

#[test]
fn unsupported_content_type_is_reported() {
    let client = RecordingClient::new(
        true,
        SecretBundle::new("blob", Some("application/octet-stream")),
    );
    let err = retrieve(&certificate(""), &OutputKeySpec::default(), &client).unwrap_err();

    match err {
        ExtractError::UnsupportedContentType { content_type } => {
            assert_eq!(content_type, "application/octet-stream")
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn plain_secret_fills_each_destination() {
    let client = RecordingClient::new(false, SecretBundle::new("conn-string", None));
    let object = VaultObjectRef::new(VaultObjectType::Secret, "db", None).unwrap();
    let output = OutputKeySpec::destinations(["DATABASE_URL", "url"]);

    let first = retrieve(&object, &output, &client).unwrap();
    let second = retrieve(&object, &output, &client).unwrap();

    assert_eq!(first, second);
    assert_eq!(first.get("DATABASE_URL"), Some(&b"conn-string"[..]));
    assert_eq!(first.get("url"), Some(&b"conn-string"[..]));
    assert_eq!(client.calls(), vec!["secret db@", "secret db@"]);
}

#[test]
fn malformed_pem_degrades_to_empty_values() {
    let material = decode_pem("-----BEGIN NOTHING-----\n");
    assert_eq!(material.get(TLS_PRIVATE_KEY_KEY), Some(&b""[..]));
    assert_eq!(material.get(TLS_CERT_KEY), Some(&b""[..]));
}

#[test]
fn request_resolved_through_snapshot_store() {
    let (_key, key_pem, cert_pem) = key_and_cert();
    let dir = tempfile::TempDir::new().unwrap();
    let snapshot = format!(
        r#"
[[secrets]]
name = "web"
version = "1"
content_type = "application/x-pem-file"
latest = true
value = '''
{}{}'''

[[certificates]]
name = "web"
version = "1"
exportable = true
"#,
        key_pem, cert_pem
    );
    fs::write(dir.path().join("prod-kv.toml"), snapshot).unwrap();

    let request: SecretRequest = toml::from_str(
        "[vault]\nname = \"prod-kv\"\n\n[vault.object]\ntype = \"certificate\"\nname = \"web\"\n",
    )
    .unwrap();
    let factory = FileVaultFactory::new(dir.path().to_path_buf());
    let material = retrieve_request(&request, &factory).unwrap();

    assert_eq!(
        der_of(material.get(TLS_CERT_KEY).unwrap()),
        der_of(cert_pem.as_bytes())
    );
}

#[test]
fn request_for_unknown_vault_is_retrieval_error() {
    let dir = tempfile::TempDir::new().unwrap();
    let request: SecretRequest = toml::from_str(
        "[vault]\nname = \"missing\"\n\n[vault.object]\ntype = \"secret\"\nname = \"x\"\n",
    )
    .unwrap();
    let factory = FileVaultFactory::new(dir.path().to_path_buf());

    let err = retrieve_request(&request, &factory).unwrap_err();
    assert!(matches!(err, ExtractError::Retrieval { operation: "client", .. }));
}

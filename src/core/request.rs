use crate::models::SecretRequest;
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

pub fn load_request(path: &Path) -> Result<SecretRequest> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("read secret request {}", path.display()))?;
    let request: SecretRequest = toml::from_str(&content)
        .with_context(|| format!("parse secret request {}", path.display()))?;
    // surface bad references at load time rather than mid-retrieval
    request
        .object_ref()
        .with_context(|| format!("validate secret request {}", path.display()))?;
    Ok(request)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_request(content: &str) -> tempfile::NamedTempFile {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        f.write_all(content.as_bytes()).unwrap();
        f.flush().unwrap();
        f
    }

    #[test]
    fn test_load_request() {
        let f = write_request(
            "[vault]\nname = \"kv\"\n\n[vault.object]\ntype = \"secret\"\nname = \"token\"\n",
        );
        let request = load_request(f.path()).unwrap();
        assert_eq!(request.vault.name, "kv");
        assert_eq!(request.output_name(), "token");
    }

    #[test]
    fn test_load_request_empty_object_name() {
        let f = write_request(
            "[vault]\nname = \"kv\"\n\n[vault.object]\ntype = \"secret\"\nname = \"\"\n",
        );
        let err = load_request(f.path()).unwrap_err();
        assert!(err.to_string().contains("validate secret request"));
    }

    #[test]
    fn test_load_request_unknown_object_type() {
        let f = write_request(
            "[vault]\nname = \"kv\"\n\n[vault.object]\ntype = \"blob\"\nname = \"token\"\n",
        );
        let err = load_request(f.path()).unwrap_err();
        assert!(err.to_string().contains("validate secret request"));
        assert!(matches!(
            err.downcast_ref::<crate::error::ExtractError>(),
            Some(crate::error::ExtractError::InvalidRequest(_))
        ));
    }

    #[test]
    fn test_load_request_missing_file() {
        assert!(load_request(Path::new("/nonexistent/request.toml")).is_err());
    }
}

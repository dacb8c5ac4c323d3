use std::{collections::HashMap, path::PathBuf};

use directories::BaseDirs;
use log::debug;
use serde::Deserialize;
use thiserror::Error;
use tokio::fs::read;

#[derive(Error, Debug)]
pub enum CredentialsError {
    #[error("cannot read credentials file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("credentials file is not valid JSON: {0}")]
    SerdeError(#[from] serde_json::Error),
    #[error("no token stored for host '{0}'")]
    MissingHost(String),
    #[error("cannot determine home directory for '~' expansion")]
    NoHomeDir,
}

type Result<T> = std::result::Result<T, CredentialsError>;

/// one entry of a mamba/rattler `authentication.json` file.
/// extra fields (`type`, ...) are ignored
#[derive(Deserialize, Debug)]
struct AuthEntry {
    token: String,
}

/// Resolve the bearer token for `host` from a token source:
/// either a literal token string, or (when it ends in `.json`)
/// a path to a credentials file keyed by host.
pub async fn resolve_token(source: &str, host: &str) -> Result<String> {
    if !source.ends_with(".json") {
        return Ok(source.to_string());
    }

    let path = expand_tilde(source)?;
    debug!("Loading credentials for {} from {}", host, path.display());

    let auth_data: HashMap<String, AuthEntry> = serde_json::from_slice(&read(&path).await?)?;
    auth_data
        .get(host)
        .map(|entry| entry.token.clone())
        .ok_or_else(|| CredentialsError::MissingHost(host.to_string()))
}

/// replace a leading `~/` with the user's home directory
fn expand_tilde(path: &str) -> Result<PathBuf> {
    if let Some(rest) = path.strip_prefix("~/") {
        let dirs = BaseDirs::new().ok_or(CredentialsError::NoHomeDir)?;
        Ok(dirs.home_dir().join(rest))
    } else {
        Ok(PathBuf::from(path))
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn write_auth_file(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new()
            .suffix(".json")
            .tempfile()
            .unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[tokio::test]
    async fn literal_token_passes_through() {
        let token = resolve_token("pfx_abc123", "repo.prefix.dev").await.unwrap();
        assert_eq!(token, "pfx_abc123");
    }

    #[tokio::test]
    async fn token_extracted_for_matching_host() {
        let file = write_auth_file(
            r#"{"repo.prefix.dev": {"token": "secret-token", "type": "BearerToken"}}"#,
        );
        let token = resolve_token(file.path().to_str().unwrap(), "repo.prefix.dev")
            .await
            .unwrap();
        assert_eq!(token, "secret-token");
    }

    #[tokio::test]
    async fn missing_host_is_an_error() {
        let file = write_auth_file(r#"{"conda.anaconda.org": {"token": "other"}}"#);
        let err = resolve_token(file.path().to_str().unwrap(), "repo.prefix.dev")
            .await
            .unwrap_err();
        assert!(matches!(err, CredentialsError::MissingHost(host) if host == "repo.prefix.dev"));
    }

    #[tokio::test]
    async fn malformed_json_is_an_error() {
        let file = write_auth_file("not json at all");
        let err = resolve_token(file.path().to_str().unwrap(), "repo.prefix.dev")
            .await
            .unwrap_err();
        assert!(matches!(err, CredentialsError::SerdeError(_)));
    }

    #[tokio::test]
    async fn missing_file_is_an_error() {
        let err = resolve_token("/nonexistent/authentication.json", "repo.prefix.dev")
            .await
            .unwrap_err();
        assert!(matches!(err, CredentialsError::IoError(_)));
    }

    #[test]
    fn tilde_expands_to_home() {
        let expanded = expand_tilde("~/.mamba/auth/authentication.json").unwrap();
        assert!(!expanded.starts_with("~"));
        assert!(expanded.ends_with(".mamba/auth/authentication.json"));
    }

    #[test]
    fn absolute_path_untouched() {
        let expanded = expand_tilde("/etc/auth.json").unwrap();
        assert_eq!(expanded, PathBuf::from("/etc/auth.json"));
    }
}

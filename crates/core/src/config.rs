//! Storage configuration
//!
//! The configuration is a `{ client, bucket }` document, where `client`
//! carries credentials, region and API version for the backend SDK. It can be
//! given inline as JSON, or read from a JSON or TOML file. Without an explicit
//! file, `config.toml` in the stash config directory is used.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Environment variable overriding the config directory
pub const CONFIG_DIR_ENV: &str = "STASH_CONFIG_DIR";

/// File name looked up inside the config directory
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// API versions accepted for S3-compatible backends
pub const SUPPORTED_API_VERSIONS: &[&str] = &["latest", "2006-03-01"];

fn default_version() -> String {
    "latest".to_string()
}

/// Static access credentials
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    /// Access key ID
    pub key: String,
    /// Secret access key
    pub secret: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("key", &self.key)
            .field("secret", &"***")
            .finish()
    }
}

/// Settings handed to the backend client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    pub credentials: Credentials,

    /// Region name, e.g. "us-east-1"
    pub region: String,

    /// Backend API version ("latest" or "2006-03-01")
    #[serde(default = "default_version")]
    pub version: String,

    /// Custom endpoint for S3-compatible services
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,

    /// Use path-style bucket addressing
    #[serde(default)]
    pub force_path_style: bool,

    /// Attempts per request, including the first; passed to the SDK retry policy
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_attempts: Option<u32>,

    /// Operation timeout in seconds; enforced by the SDK
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

/// Full adapter configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageConfig {
    pub client: ClientConfig,
    pub bucket: String,
}

impl StorageConfig {
    /// Parse and validate a JSON document
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| Error::Config(format!("invalid JSON config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Parse and validate a TOML document
    pub fn from_toml(text: &str) -> Result<Self> {
        let config: Self =
            toml::from_str(text).map_err(|e| Error::Config(format!("invalid TOML config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Load a config file; `.json` files are parsed as JSON, anything else as TOML
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("cannot read config file {}: {e}", path.display()))
        })?;

        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        tracing::debug!(path = %path.display(), json = is_json, "Loading storage config");

        if is_json {
            Self::from_json(&text)
        } else {
            Self::from_toml(&text)
        }
    }

    /// Load `config.toml` from the default config directory
    pub fn load_default() -> Result<Self> {
        Self::load(&default_config_path()?)
    }

    /// Serialize to TOML
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| Error::Config(e.to_string()))
    }

    /// Check required fields and value formats
    pub fn validate(&self) -> Result<()> {
        if self.bucket.trim().is_empty() {
            return Err(Error::Config("bucket cannot be empty".to_string()));
        }
        self.client.validate()
    }
}

impl ClientConfig {
    pub fn validate(&self) -> Result<()> {
        if self.credentials.key.is_empty() {
            return Err(Error::Config("credentials.key cannot be empty".to_string()));
        }
        if self.credentials.secret.is_empty() {
            return Err(Error::Config(
                "credentials.secret cannot be empty".to_string(),
            ));
        }
        if self.region.trim().is_empty() {
            return Err(Error::Config("region cannot be empty".to_string()));
        }
        if !SUPPORTED_API_VERSIONS.contains(&self.version.as_str()) {
            return Err(Error::Config(format!(
                "unsupported API version '{}', expected one of: {}",
                self.version,
                SUPPORTED_API_VERSIONS.join(", ")
            )));
        }
        if let Some(endpoint) = &self.endpoint {
            let url = url::Url::parse(endpoint)
                .map_err(|e| Error::Config(format!("invalid endpoint '{endpoint}': {e}")))?;
            if url.scheme() != "http" && url.scheme() != "https" {
                return Err(Error::Config(format!(
                    "endpoint must use http or https: {endpoint}"
                )));
            }
        }
        if self.max_attempts == Some(0) {
            return Err(Error::Config("max_attempts must be at least 1".to_string()));
        }
        Ok(())
    }
}

/// Path of the default config file, honoring `STASH_CONFIG_DIR`
pub fn default_config_path() -> Result<PathBuf> {
    let dir = config_dir(std::env::var_os(CONFIG_DIR_ENV).map(PathBuf::from))?;
    Ok(dir.join(CONFIG_FILE_NAME))
}

fn config_dir(override_dir: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(dir) = override_dir {
        return Ok(dir);
    }
    dirs::config_dir()
        .map(|d| d.join("stash"))
        .ok_or_else(|| Error::Config("cannot determine config directory".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const JSON: &str = r#"{
        "client": {
            "credentials": {"key": "AKID", "secret": "s3cr3t"},
            "region": "eu-west-1",
            "version": "latest"
        },
        "bucket": "media"
    }"#;

    const TOML: &str = r#"
bucket = "media"

[client]
region = "us-east-1"
endpoint = "http://localhost:9000"
force_path_style = true
max_attempts = 5

[client.credentials]
key = "minio"
secret = "minio123"
"#;

    #[test]
    fn test_from_json() {
        let config = StorageConfig::from_json(JSON).unwrap();
        assert_eq!(config.bucket, "media");
        assert_eq!(config.client.region, "eu-west-1");
        assert_eq!(config.client.credentials.key, "AKID");
        assert!(config.client.endpoint.is_none());
        assert!(!config.client.force_path_style);
    }

    #[test]
    fn test_from_toml_defaults() {
        let config = StorageConfig::from_toml(TOML).unwrap();
        assert_eq!(config.client.version, "latest");
        assert_eq!(
            config.client.endpoint.as_deref(),
            Some("http://localhost:9000")
        );
        assert!(config.client.force_path_style);
        assert_eq!(config.client.max_attempts, Some(5));
        assert_eq!(config.client.timeout_secs, None);
    }

    #[test]
    fn test_toml_roundtrip() {
        let config = StorageConfig::from_toml(TOML).unwrap();
        let text = config.to_toml().unwrap();
        assert_eq!(StorageConfig::from_toml(&text).unwrap(), config);
    }

    #[test]
    fn test_validation_errors() {
        let mut config = StorageConfig::from_json(JSON).unwrap();
        config.bucket = " ".to_string();
        assert!(matches!(config.validate(), Err(Error::Config(_))));

        let mut config = StorageConfig::from_json(JSON).unwrap();
        config.client.version = "2010-01-01".to_string();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("unsupported API version"));

        let mut config = StorageConfig::from_json(JSON).unwrap();
        config.client.endpoint = Some("ftp://example.com".to_string());
        assert!(config.validate().is_err());

        let mut config = StorageConfig::from_json(JSON).unwrap();
        config.client.credentials.secret.clear();
        assert!(config.validate().is_err());

        let mut config = StorageConfig::from_json(JSON).unwrap();
        config.client.max_attempts = Some(0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_json() {
        let err = StorageConfig::from_json("{\"bucket\": 1}").unwrap_err();
        assert!(matches!(err, Error::Config(msg) if msg.starts_with("invalid JSON config")));
    }

    #[test]
    fn test_debug_redacts_secret() {
        let config = StorageConfig::from_json(JSON).unwrap();
        let debug = format!("{config:?}");
        assert!(debug.contains("AKID"));
        assert!(!debug.contains("s3cr3t"));
    }

    #[test]
    fn test_load_by_extension() {
        let mut json_file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        json_file.write_all(JSON.as_bytes()).unwrap();
        let config = StorageConfig::load(json_file.path()).unwrap();
        assert_eq!(config.client.region, "eu-west-1");

        let mut toml_file = NamedTempFile::new().unwrap();
        toml_file.write_all(TOML.as_bytes()).unwrap();
        let config = StorageConfig::load(toml_file.path()).unwrap();
        assert_eq!(config.client.region, "us-east-1");
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = StorageConfig::load(&dir.path().join("absent.toml")).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_config_dir_override() {
        let dir = config_dir(Some(PathBuf::from("/opt/stash"))).unwrap();
        assert_eq!(dir, PathBuf::from("/opt/stash"));
    }
}

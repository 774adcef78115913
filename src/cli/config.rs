use anyhow::{Context, Result};
use secrecy::SecretString;
use serde::Deserialize;
use std::{fs, path::Path};

/// Optional `config.yml`, every field falls back to the flags, the
/// environment or the built-in default
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    pub server_url: Option<String>,
    pub access_key: Option<SecretString>,
    pub expire: Option<u64>,
}

impl Config {
    /// # Errors
    ///
    /// Will return an error if the file can't be opened or parsed
    pub fn new(config_path: &Path) -> Result<Self> {
        let content = fs::read_to_string(config_path)
            .with_context(|| format!("unable to open: {}", config_path.display()))?;

        // an empty file is a valid config
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        serde_yaml_ng::from_str(&content)
            .with_context(|| format!("unable to parse: {}", config_path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const CONF: &str = r"---
server_url: https://files.example.com
access_key: XXX
expire: 60";

    const CONF_PARTIAL: &str = r"---
access_key: YYY";

    const CONF_INVALID: &str = r"---
expire: never";

    fn write_config(content: &str) -> NamedTempFile {
        let mut tmp_file = NamedTempFile::new().unwrap();
        tmp_file.write_all(content.as_bytes()).unwrap();
        tmp_file
    }

    #[test]
    fn test_config() {
        let tmp_file = write_config(CONF);
        let c = Config::new(tmp_file.path());
        assert!(c.is_ok());
        let c = c.unwrap();
        assert_eq!(c.server_url, Some("https://files.example.com".to_string()));
        assert_eq!(
            c.access_key.as_ref().map(|k| k.expose_secret()),
            Some("XXX")
        );
        assert_eq!(c.expire, Some(60));
    }

    #[test]
    fn test_config_partial() {
        let tmp_file = write_config(CONF_PARTIAL);
        let c = Config::new(tmp_file.path()).unwrap();
        assert_eq!(c.server_url, None);
        assert_eq!(
            c.access_key.as_ref().map(|k| k.expose_secret()),
            Some("YYY")
        );
        assert_eq!(c.expire, None);
    }

    #[test]
    fn test_config_empty() {
        let tmp_file = write_config("");
        let c = Config::new(tmp_file.path()).unwrap();
        assert_eq!(c.server_url, None);
        assert!(c.access_key.is_none());
        assert_eq!(c.expire, None);
    }

    #[test]
    fn test_config_debug_redacts_access_key() {
        let tmp_file = write_config(CONF);
        let c = Config::new(tmp_file.path()).unwrap();
        let debug = format!("{c:#?}");
        assert!(debug.contains("https://files.example.com"));
        assert!(!debug.contains("XXX"));
    }

    #[test]
    fn test_config_invalid() {
        let tmp_file = write_config(CONF_INVALID);
        assert!(Config::new(tmp_file.path()).is_err());
    }

    #[test]
    fn test_config_missing() {
        assert!(Config::new(Path::new("/nonexistent/templink/config.yml")).is_err());
    }
}

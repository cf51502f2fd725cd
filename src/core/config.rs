use crate::constants;
use crate::models::client_config::ConfigFile;
use anyhow::{bail, Context, Result};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Resolve the configuration path from the environment or the default.
pub fn config_path() -> PathBuf {
    match env::var_os(constants::CONFIG_ENV) {
        Some(path) if !path.is_empty() => PathBuf::from(path),
        _ => PathBuf::from(constants::DEFAULT_CONFIG_PATH),
    }
}

/// Load the client configuration. A missing file yields the defaults.
pub fn load(path: &Path) -> Result<ConfigFile> {
    if !path.exists() {
        return Ok(ConfigFile::default());
    }
    let content = fs::read_to_string(path)
        .with_context(|| format!("read configuration {}", path.display()))?;
    parse(&content).with_context(|| format!("parse configuration {}", path.display()))
}

fn parse(content: &str) -> Result<ConfigFile> {
    let config: ConfigFile = toml::from_str(content)?;
    if config.client.port == Some(0) {
        bail!("invalid port number 0");
    }
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_is_default() {
        let dir = TempDir::new().unwrap();
        let config = load(&dir.path().join("absent.toml")).unwrap();
        assert!(config.client.server.is_none());
        assert!(config.client.port.is_none());
    }

    #[test]
    fn test_load_client_section() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("wallet.toml");
        fs::write(
            &path,
            "[client]\nserver = \"vault.example.com\"\nport = 4373\nremctl_program = \"/usr/bin/remctl\"\n",
        )
        .unwrap();
        let config = load(&path).unwrap();
        assert_eq!(config.client.server.as_deref(), Some("vault.example.com"));
        assert_eq!(config.client.port, Some(4373));
        assert_eq!(config.client.remctl_program.as_deref(), Some("/usr/bin/remctl"));
        assert!(config.client.principal.is_none());
    }

    #[test]
    fn test_port_zero_rejected() {
        assert!(parse("[client]\nport = 0\n").is_err());
    }

    #[test]
    fn test_port_out_of_range_rejected() {
        assert!(parse("[client]\nport = 70000\n").is_err());
    }

    #[test]
    fn test_malformed_file_names_path() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("wallet.toml");
        fs::write(&path, "[client\n").unwrap();
        let err = load(&path).unwrap_err();
        assert!(format!("{:#}", err).contains("wallet.toml"));
    }
}

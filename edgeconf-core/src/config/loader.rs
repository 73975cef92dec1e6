//! Configuration loader

use crate::config::GeneratorConfig;
use crate::error::{Error, Result};
use std::path::Path;

/// Configuration loader for various formats
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<GeneratorConfig> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("Failed to read config file: {}", e)))?;

        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");

        match ext {
            "json" => Self::from_json(&content),
            "toml" => Self::from_toml(&content),
            _ => Err(Error::Config(format!("Unknown config format: {}", ext))),
        }
    }

    /// Load from `path` if given, otherwise use the defaults
    pub fn load_or_default<P: AsRef<Path>>(path: Option<P>) -> Result<GeneratorConfig> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(GeneratorConfig::default()),
        }
    }

    /// Parse JSON configuration
    pub fn from_json(content: &str) -> Result<GeneratorConfig> {
        let config = serde_json::from_str(content)
            .map_err(|e| Error::Config(format!("Invalid JSON: {}", e)))?;
        Self::validate(&config)?;
        Ok(config)
    }

    /// Parse TOML configuration
    pub fn from_toml(content: &str) -> Result<GeneratorConfig> {
        let config =
            toml::from_str(content).map_err(|e| Error::Config(format!("Invalid TOML: {}", e)))?;
        Self::validate(&config)?;
        Ok(config)
    }

    /// Reject settings that would render directives nginx refuses to load
    pub fn validate(config: &GeneratorConfig) -> Result<()> {
        if config.http.listen.trim().is_empty() {
            return Err(Error::Config("http.listen must not be empty".to_string()));
        }
        if config.storage.origin.trim().is_empty() {
            return Err(Error::Config("storage.origin must not be empty".to_string()));
        }

        let codes = &config.storage.fallback_status_codes;
        if codes.is_empty() {
            return Err(Error::Config(
                "storage.fallback_status_codes must list at least one status code".to_string(),
            ));
        }
        if let Some(code) = codes.iter().find(|code| !(300..=599).contains(*code)) {
            return Err(Error::Config(format!(
                "storage.fallback_status_codes: {} is not between 300 and 599",
                code
            )));
        }

        for (key, name) in [
            ("storage.proxy_location", &config.storage.proxy_location),
            ("storage.fallback_location", &config.storage.fallback_location),
        ] {
            Self::validate_named_location(key, name)?;
        }
        if config.storage.proxy_location == config.storage.fallback_location {
            return Err(Error::Config(format!(
                "storage.proxy_location and storage.fallback_location are both \"{}\"",
                config.storage.proxy_location
            )));
        }

        if config.output.file_name.trim().is_empty() {
            return Err(Error::Config("output.file_name must not be empty".to_string()));
        }

        Ok(())
    }

    /// A named location is `@` followed by a name without whitespace
    fn validate_named_location(key: &str, name: &str) -> Result<()> {
        let valid = name
            .strip_prefix('@')
            .is_some_and(|rest| !rest.is_empty() && !rest.contains(char::is_whitespace));
        if valid {
            Ok(())
        } else {
            Err(Error::Config(format!(
                "{} must be a named location like \"@storage\", got \"{}\"",
                key, name
            )))
        }
    }

    /// Render configuration as TOML
    pub fn to_toml(config: &GeneratorConfig) -> Result<String> {
        toml::to_string_pretty(config).map_err(|e| Error::Config(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SlugPolicy;

    #[test]
    fn test_json_loading() {
        let json = r#"{"http": {"listen": "127.0.0.1:9000"}}"#;
        let config = ConfigLoader::from_json(json).unwrap();
        assert_eq!(config.http.listen, "127.0.0.1:9000");
        assert_eq!(config.http.resolver, "1.1.1.1");
    }

    #[test]
    fn test_invalid_policy_rejected() {
        let err = ConfigLoader::from_toml("[policy]\nslug = \"greedy\"\n").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_empty_fallback_codes_rejected() {
        let err = ConfigLoader::from_toml("[storage]\nfallback_status_codes = []\n").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
        assert!(err.to_string().contains("fallback_status_codes"));

        let err = ConfigLoader::from_json(r#"{"storage": {"fallback_status_codes": [200]}}"#)
            .unwrap_err();
        assert!(err.to_string().contains("200 is not between 300 and 599"));
    }

    #[test]
    fn test_location_names_rejected() {
        for toml in [
            "[storage]\nproxy_location = \"\"\n",
            "[storage]\nproxy_location = \"storage\"\n",
            "[storage]\nfallback_location = \"@\"\n",
            "[storage]\nfallback_location = \"@client side\"\n",
            "[storage]\nfallback_location = \"@storage\"\n",
        ] {
            let err = ConfigLoader::from_toml(toml).unwrap_err();
            assert!(matches!(err, Error::Config(_)), "{}", toml);
        }

        let config = ConfigLoader::from_toml("[storage]\nproxy_location = \"@s3\"\n").unwrap();
        assert_eq!(config.storage.proxy_location, "@s3");
    }

    #[test]
    fn test_empty_listen_rejected() {
        let err = ConfigLoader::from_json(r#"{"http": {"listen": " "}}"#).unwrap_err();
        assert!(err.to_string().contains("http.listen"));
    }

    #[test]
    fn test_default_config_is_valid() {
        assert!(ConfigLoader::validate(&GeneratorConfig::default()).is_ok());
    }

    #[test]
    fn test_toml_round_trip() {
        let mut config = GeneratorConfig::default();
        config.policy.slug = SlugPolicy::SingleSegment;

        let text = ConfigLoader::to_toml(&config).unwrap();
        assert!(text.contains("slug = \"single-segment\""));
        assert_eq!(ConfigLoader::from_toml(&text).unwrap(), config);
    }

    #[test]
    fn test_unknown_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("edgeconf.yaml");
        std::fs::write(&path, "process: {}").unwrap();
        let err = ConfigLoader::load(&path).unwrap_err();
        assert!(err.to_string().contains("Unknown config format: yaml"));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("edgeconf.toml");
        std::fs::write(&path, "[process]\nworker_processes = 8\n").unwrap();

        let config = ConfigLoader::load_or_default(Some(&path)).unwrap();
        assert_eq!(config.process.worker_processes, 8);
        assert_eq!(config.process.worker_rlimit_nofile, 8192);
    }
}

use serde::Deserialize;
use std::fs;
use std::path::Path;
use url::Url;

const ENV_CONFIG_PATH: &str = "SENTINEL_CONFIG_PATH";
const DEFAULT_CONFIG_PATH: &str = "config.yaml";

/// Enrichment gateway configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EnrichmentConfig {
    /// Base URL of the enrichment service. Overridden by
    /// `SENTINEL_ENRICHMENT_BASE_URL` when set.
    pub base_url: Option<String>,
    /// Allowed research-target domains (whitelist). Empty allows all.
    #[serde(default)]
    pub allow: Vec<String>,
    /// Denied research-target domains (blacklist). Applied after allow.
    #[serde(default)]
    pub deny: Vec<String>,
}

impl EnrichmentConfig {
    /// Check whether a research-target URL passes the allow/deny lists
    pub fn is_url_allowed(&self, url: &Url) -> bool {
        let host = match url.host_str() {
            Some(h) => h.to_lowercase(),
            None => return false,
        };

        if self.deny.iter().any(|d| host.contains(&d.to_lowercase())) {
            return false;
        }

        if self.allow.is_empty() {
            return true;
        }

        self.allow.iter().any(|a| host.contains(&a.to_lowercase()))
    }
}

/// YAML configuration file structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConfigFile {
    #[serde(default)]
    pub enrichment: EnrichmentConfig,
}

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub enrichment: EnrichmentConfig,
    pub port: u16,
    pub host: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            enrichment: EnrichmentConfig::default(),
            port: 8080,
            host: "127.0.0.1".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from environment and config file
    pub fn from_env() -> Self {
        let port = std::env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(8080);

        let host = std::env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());

        let config_path =
            std::env::var(ENV_CONFIG_PATH).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());

        let enrichment = Self::load_config_file(&config_path)
            .map(|cf| cf.enrichment)
            .unwrap_or_default();

        Self {
            enrichment,
            port,
            host,
        }
    }

    /// Load configuration from YAML file
    fn load_config_file(path: &str) -> Option<ConfigFile> {
        let path = Path::new(path);

        if !path.exists() {
            tracing::debug!(path = %path.display(), "Config file not found, using defaults");
            return None;
        }

        match fs::read_to_string(path) {
            Ok(contents) => {
                let contents = contents.trim();
                if contents.is_empty() {
                    tracing::debug!(path = %path.display(), "Config file is empty, using defaults");
                    return Some(ConfigFile::default());
                }

                match serde_yaml::from_str(contents) {
                    Ok(config) => {
                        tracing::info!(path = %path.display(), "Loaded configuration from file");
                        Some(config)
                    }
                    Err(e) => {
                        tracing::warn!(path = %path.display(), error = %e, "Failed to parse config file, using defaults");
                        None
                    }
                }
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Failed to read config file, using defaults");
                None
            }
        }
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_allow_deny() {
        let config = EnrichmentConfig {
            base_url: None,
            allow: vec!["example.com".to_string()],
            deny: vec!["blocked.example.com".to_string()],
        };

        let allowed = Url::parse("https://www.example.com/product").unwrap();
        let denied = Url::parse("https://blocked.example.com/").unwrap();
        let other = Url::parse("https://other.org/").unwrap();

        assert!(config.is_url_allowed(&allowed));
        assert!(!config.is_url_allowed(&denied));
        assert!(!config.is_url_allowed(&other));

        let open = EnrichmentConfig::default();
        assert!(open.is_url_allowed(&other));
    }
}

//! Configuration loading and management

use anyhow::Result;
use serde::{Deserialize, Serialize};

/// Environment variable naming a YAML config file
pub const CONFIG_ENV_VAR: &str = "CONFERENCE_API_CONFIG";

/// HTTP listener settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

impl ServerConfig {
    /// `host:port` string for binding the listener
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Hyperlink settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinksConfig {
    /// Prefix for every entity route and every generated `href`
    #[serde(default)]
    pub base_path: String,
}

/// A state loaded into the store at startup
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateSeed {
    pub name: String,
    pub abbreviation: String,
}

impl StateSeed {
    pub fn new(name: impl Into<String>, abbreviation: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            abbreviation: abbreviation.into(),
        }
    }
}

/// Complete application configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,

    /// Fallback filter when `RUST_LOG` is unset
    #[serde(default = "default_log_filter")]
    pub log_filter: String,

    #[serde(default)]
    pub links: LinksConfig,

    /// Reference data for state abbreviations
    #[serde(default = "default_states")]
    pub states: Vec<StateSeed>,
}

impl AppConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Load configuration from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        Ok(config)
    }

    /// Load from the file named by `CONFERENCE_API_CONFIG`, or use defaults
    pub fn from_env() -> Result<Self> {
        match std::env::var(CONFIG_ENV_VAR) {
            Ok(path) => Self::from_yaml_file(&path),
            Err(_) => Ok(Self::default_config()),
        }
    }

    /// Default configuration: port 8000 on localhost, all US states and DC
    pub fn default_config() -> Self {
        Self {
            server: ServerConfig::default(),
            log_filter: default_log_filter(),
            links: LinksConfig::default(),
            states: default_states(),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::default_config()
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_log_filter() -> String {
    "conference=info,tower_http=info".to_string()
}

const US_STATES: &[(&str, &str)] = &[
    ("Alabama", "AL"),
    ("Alaska", "AK"),
    ("Arizona", "AZ"),
    ("Arkansas", "AR"),
    ("California", "CA"),
    ("Colorado", "CO"),
    ("Connecticut", "CT"),
    ("Delaware", "DE"),
    ("District of Columbia", "DC"),
    ("Florida", "FL"),
    ("Georgia", "GA"),
    ("Hawaii", "HI"),
    ("Idaho", "ID"),
    ("Illinois", "IL"),
    ("Indiana", "IN"),
    ("Iowa", "IA"),
    ("Kansas", "KS"),
    ("Kentucky", "KY"),
    ("Louisiana", "LA"),
    ("Maine", "ME"),
    ("Maryland", "MD"),
    ("Massachusetts", "MA"),
    ("Michigan", "MI"),
    ("Minnesota", "MN"),
    ("Mississippi", "MS"),
    ("Missouri", "MO"),
    ("Montana", "MT"),
    ("Nebraska", "NE"),
    ("Nevada", "NV"),
    ("New Hampshire", "NH"),
    ("New Jersey", "NJ"),
    ("New Mexico", "NM"),
    ("New York", "NY"),
    ("North Carolina", "NC"),
    ("North Dakota", "ND"),
    ("Ohio", "OH"),
    ("Oklahoma", "OK"),
    ("Oregon", "OR"),
    ("Pennsylvania", "PA"),
    ("Rhode Island", "RI"),
    ("South Carolina", "SC"),
    ("South Dakota", "SD"),
    ("Tennessee", "TN"),
    ("Texas", "TX"),
    ("Utah", "UT"),
    ("Vermont", "VT"),
    ("Virginia", "VA"),
    ("Washington", "WA"),
    ("West Virginia", "WV"),
    ("Wisconsin", "WI"),
    ("Wyoming", "WY"),
];

fn default_states() -> Vec<StateSeed> {
    US_STATES
        .iter()
        .map(|(name, abbreviation)| StateSeed::new(*name, *abbreviation))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default_config();
        assert_eq!(config.server.bind_address(), "127.0.0.1:8000");
        assert_eq!(config.links.base_path, "");
        assert_eq!(config.states.len(), 51);
        assert!(
            config
                .states
                .iter()
                .any(|s| s.abbreviation == "DC" && s.name == "District of Columbia")
        );
    }

    #[test]
    fn test_abbreviations_are_unique() {
        let mut abbreviations: Vec<_> = default_states()
            .into_iter()
            .map(|s| s.abbreviation)
            .collect();
        abbreviations.sort();
        abbreviations.dedup();
        assert_eq!(abbreviations.len(), 51);
    }

    #[test]
    fn test_from_yaml_str_partial() {
        let yaml = r#"
server:
  port: 9090
links:
  base_path: /api
"#;
        let config = AppConfig::from_yaml_str(yaml).unwrap();
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 9090);
        assert_eq!(config.links.base_path, "/api");
        assert_eq!(config.log_filter, default_log_filter());
        assert_eq!(config.states.len(), 51);
    }

    #[test]
    fn test_from_yaml_str_custom_states() {
        let yaml = r#"
states:
  - name: Illinois
    abbreviation: IL
  - name: Ohio
    abbreviation: OH
"#;
        let config = AppConfig::from_yaml_str(yaml).unwrap();
        assert_eq!(
            config.states,
            vec![StateSeed::new("Illinois", "IL"), StateSeed::new("Ohio", "OH")]
        );
    }

    #[test]
    fn test_from_yaml_str_invalid() {
        assert!(AppConfig::from_yaml_str("server: [1, 2").is_err());
        assert!(AppConfig::from_yaml_str("server:\n  port: not-a-port\n").is_err());
    }

    #[test]
    fn test_from_yaml_file_missing() {
        assert!(AppConfig::from_yaml_file("/nonexistent/conference.yaml").is_err());
    }
}

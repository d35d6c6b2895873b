//! Configuration parser for JSON and TOML sources

use crate::{ConfigError, Result, SiteConfig};

/// Configuration format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Json,
    Toml,
}

/// Configuration parser
pub struct ConfigParser;

impl ConfigParser {
    /// Parse configuration from a string
    pub fn parse_string(content: &str, format: ConfigFormat) -> Result<SiteConfig> {
        match format {
            ConfigFormat::Json => Self::parse_json(content),
            ConfigFormat::Toml => Self::parse_toml(content),
        }
    }

    /// Parse JSON configuration
    fn parse_json(content: &str) -> Result<SiteConfig> {
        serde_json::from_str(content)
            .map_err(|e| ConfigError::Parse(format!("JSON parse error: {}", e)))
    }

    /// Parse TOML configuration
    fn parse_toml(content: &str) -> Result<SiteConfig> {
        toml::from_str(content).map_err(|e| ConfigError::Parse(format!("TOML parse error: {}", e)))
    }

    /// Detect the format from a MIME type or file name
    pub fn detect_format(hint: &str) -> Result<ConfigFormat> {
        let hint = hint.to_lowercase();
        if hint.ends_with("json") {
            Ok(ConfigFormat::Json)
        } else if hint.ends_with("toml") {
            Ok(ConfigFormat::Toml)
        } else {
            Err(ConfigError::Parse(format!(
                "Unsupported config format: {}",
                hint
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_json_uses_defaults() {
        let config = ConfigParser::parse_string("{}", ConfigFormat::Json).unwrap();
        assert_eq!(config, SiteConfig::default());
    }

    #[test]
    fn test_partial_toml() {
        let content = r#"
            [timing]
            resize_debounce_ms = 400

            [logging]
            level = "debug"
        "#;
        let config = ConfigParser::parse_string(content, ConfigFormat::Toml).unwrap();
        assert_eq!(config.timing.resize_debounce_ms, 400);
        assert_eq!(config.timing.chart_init_delay_ms, 100);
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn test_malformed_input() {
        let err = ConfigParser::parse_string("{ timing", ConfigFormat::Json).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(msg) if msg.starts_with("JSON")));
    }

    #[test]
    fn test_detect_format() {
        assert_eq!(
            ConfigParser::detect_format("application/json").unwrap(),
            ConfigFormat::Json
        );
        assert_eq!(
            ConfigParser::detect_format("site.TOML").unwrap(),
            ConfigFormat::Toml
        );
        assert!(ConfigParser::detect_format("site.yaml").is_err());
    }
}

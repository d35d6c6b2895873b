//! Configuration validation

use crate::{ConfigError, NavbarConfig, Result, RevealConfig, SiteConfig, TimingConfig};

/// Upper bound for any configured delay
const MAX_DELAY_MS: u32 = 60_000;

/// Configuration validator
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate a complete configuration, reporting every problem found
    pub fn validate(config: &SiteConfig) -> Result<()> {
        let mut problems = Vec::new();
        Self::validate_timing(&config.timing, &mut problems);
        Self::validate_reveal(&config.reveal, &mut problems);
        Self::validate_navbar(&config.navbar, &mut problems);
        if config.logging.level().is_err() {
            problems.push(format!("Invalid log level: {}", config.logging.level));
        }

        if problems.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Validation(problems.join("; ")))
        }
    }

    fn validate_timing(timing: &TimingConfig, problems: &mut Vec<String>) {
        if timing.chart_init_delay_ms > MAX_DELAY_MS {
            problems.push(format!(
                "Invalid chart_init_delay_ms: {}. Must be at most {}",
                timing.chart_init_delay_ms, MAX_DELAY_MS
            ));
        }

        // A zero quiet period would turn the debounce into a per-event resize
        if timing.resize_debounce_ms == 0 || timing.resize_debounce_ms > MAX_DELAY_MS {
            problems.push(format!(
                "Invalid resize_debounce_ms: {}. Must be between 1 and {}",
                timing.resize_debounce_ms, MAX_DELAY_MS
            ));
        }

        if timing.notification_dismiss_ms == 0 || timing.notification_dismiss_ms > MAX_DELAY_MS {
            problems.push(format!(
                "Invalid notification_dismiss_ms: {}. Must be between 1 and {}",
                timing.notification_dismiss_ms, MAX_DELAY_MS
            ));
        }
    }

    fn validate_reveal(reveal: &RevealConfig, problems: &mut Vec<String>) {
        if !(0.0..=1.0).contains(&reveal.threshold) {
            problems.push(format!(
                "Invalid reveal threshold: {}. Must be between 0.0 and 1.0",
                reveal.threshold
            ));
        }

        if reveal.selectors.iter().any(|s| s.trim().is_empty()) {
            problems.push("Reveal selectors must not be empty".to_string());
        }

        if reveal.revealed_class.trim().is_empty() {
            problems.push("Revealed class must not be empty".to_string());
        }
    }

    fn validate_navbar(navbar: &NavbarConfig, problems: &mut Vec<String>) {
        if navbar.scroll_threshold_px < 0.0 || !navbar.scroll_threshold_px.is_finite() {
            problems.push(format!(
                "Invalid scroll_threshold_px: {}",
                navbar.scroll_threshold_px
            ));
        }

        if navbar.selector.trim().is_empty() {
            problems.push("Navbar selector must not be empty".to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(ConfigValidator::validate(&SiteConfig::default()).is_ok());
    }

    #[test]
    fn test_zero_debounce_rejected() {
        let mut config = SiteConfig::default();
        config.timing.resize_debounce_ms = 0;
        let err = ConfigValidator::validate(&config).unwrap_err();
        assert!(err.to_string().contains("resize_debounce_ms"));
    }

    #[test]
    fn test_threshold_range() {
        let mut config = SiteConfig::default();
        config.reveal.threshold = 1.5;
        assert!(ConfigValidator::validate(&config).is_err());

        config.reveal.threshold = 1.0;
        assert!(ConfigValidator::validate(&config).is_ok());
    }

    #[test]
    fn test_bad_log_level_rejected() {
        let mut config = SiteConfig::default();
        config.logging.level = "chatty".to_string();
        assert!(ConfigValidator::validate(&config).is_err());
    }

    #[test]
    fn test_negative_scroll_threshold_rejected() {
        let mut config = SiteConfig::default();
        config.navbar.scroll_threshold_px = -1.0;
        assert!(ConfigValidator::validate(&config).is_err());
    }

    #[test]
    fn test_every_problem_reported() {
        let mut config = SiteConfig::default();
        config.timing.resize_debounce_ms = 0;
        config.reveal.threshold = 2.0;
        config.navbar.selector = String::new();
        config.logging.level = "chatty".to_string();

        let message = match ConfigValidator::validate(&config).unwrap_err() {
            ConfigError::Validation(message) => message,
            other => panic!("unexpected error: {other}"),
        };
        assert!(message.contains("resize_debounce_ms"));
        assert!(message.contains("reveal threshold"));
        assert!(message.contains("Navbar selector"));
        assert!(message.contains("Invalid log level: chatty"));
        assert_eq!(message.matches("; ").count(), 3);
    }
}

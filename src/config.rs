//! Environment-driven configuration.
//!
//! Values come from the process environment, optionally seeded from a `.env`
//! file. Every key is optional and falls back to a documented default.

use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

use crate::documents::layout::PageProfile;
use crate::documents::render::markup::{DEFAULT_PRINT_PROGRAM, DEFAULT_PRINT_TIMEOUT};
use crate::documents::render::{DirectDrawBackend, MarkupBackend, PrintCommand, RenderBackend};

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("invalid value `{value}` for {key}: {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: &'static str,
    },
}

/// Which rendering backend the bundler uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BackendKind {
    #[default]
    Direct,
    Markup,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    pub backend: BackendKind,
    pub page: PageProfile,
    pub print_program: String,
    pub print_args: Vec<String>,
    pub print_timeout: Duration,
    pub bind_addr: String,
    pub port: u16,
    pub allowed_origins: Vec<String>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            backend: BackendKind::Direct,
            page: PageProfile::a4(),
            print_program: DEFAULT_PRINT_PROGRAM.to_string(),
            print_args: PrintCommand::default_args(),
            print_timeout: DEFAULT_PRINT_TIMEOUT,
            bind_addr: "0.0.0.0".to_string(),
            port: 8080,
            allowed_origins: vec![
                "http://localhost:3000".to_string(),
                "http://localhost:5173".to_string(),
                "http://127.0.0.1:8080".to_string(),
            ],
        }
    }
}

impl EngineConfig {
    /// Load `.env` if present, then read the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup; blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };
        let mut config = Self::default();

        if let Some(value) = get("RENDER_BACKEND") {
            config.backend = match value.to_lowercase().as_str() {
                "direct" => BackendKind::Direct,
                "markup" | "print" => BackendKind::Markup,
                _ => {
                    return Err(ConfigError::Invalid {
                        key: "RENDER_BACKEND",
                        value,
                        reason: "expected `direct` or `markup`",
                    })
                }
            };
        }

        if let Some(value) = get("PAGE_SIZE") {
            config.page = match value.to_lowercase().as_str() {
                "a4" => PageProfile::a4(),
                "letter" => PageProfile::letter(),
                _ => {
                    return Err(ConfigError::Invalid {
                        key: "PAGE_SIZE",
                        value,
                        reason: "expected `a4` or `letter`",
                    })
                }
            };
        }

        if let Some(value) = get("PAGE_MARGIN_MM") {
            let margin: f32 = value.parse().map_err(|_| ConfigError::Invalid {
                key: "PAGE_MARGIN_MM",
                value: value.clone(),
                reason: "expected a number of millimetres",
            })?;
            if !(5.0..=50.0).contains(&margin) {
                return Err(ConfigError::Invalid {
                    key: "PAGE_MARGIN_MM",
                    value,
                    reason: "must be between 5 and 50",
                });
            }
            config.page = config.page.with_margins(margin);
        }

        if let Some(value) = get("PRINT_COMMAND") {
            config.print_program = value;
        }
        if let Some(value) = get("PRINT_ARGS") {
            config.print_args = value.split_whitespace().map(str::to_string).collect();
        }
        if let Some(value) = get("PRINT_TIMEOUT_SECS") {
            let seconds: u64 = value.parse().map_err(|_| ConfigError::Invalid {
                key: "PRINT_TIMEOUT_SECS",
                value: value.clone(),
                reason: "expected a whole number of seconds",
            })?;
            if seconds == 0 {
                return Err(ConfigError::Invalid {
                    key: "PRINT_TIMEOUT_SECS",
                    value,
                    reason: "must be greater than zero",
                });
            }
            config.print_timeout = Duration::from_secs(seconds);
        }

        if let Some(value) = get("BIND_ADDR") {
            config.bind_addr = value;
        }
        if let Some(value) = get("PORT") {
            config.port = value.parse().map_err(|_| ConfigError::Invalid {
                key: "PORT",
                value,
                reason: "expected a port number",
            })?;
        }
        if let Some(value) = get("ALLOWED_ORIGINS") {
            config.allowed_origins = value
                .split(',')
                .map(str::trim)
                .filter(|origin| !origin.is_empty())
                .map(str::to_string)
                .collect();
        }

        Ok(config)
    }

    pub fn print_command(&self) -> PrintCommand {
        PrintCommand::new(
            self.print_program.clone(),
            self.print_args.clone(),
            self.print_timeout,
        )
    }

    pub fn build_backend(&self) -> Arc<dyn RenderBackend> {
        match self.backend {
            BackendKind::Direct => Arc::new(DirectDrawBackend::new(self.page)),
            BackendKind::Markup => Arc::new(MarkupBackend::new(self.page, self.print_command())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<EngineConfig, ConfigError> {
        let values: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        EngineConfig::from_lookup(|key| values.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.backend, BackendKind::Direct);
        assert_eq!(config.page, PageProfile::a4());
        assert_eq!(config.print_timeout, Duration::from_secs(30));
        assert_eq!(config.port, 8080);
        assert_eq!(config.build_backend().name(), "direct");
    }

    #[test]
    fn test_markup_backend_settings() {
        let config = config_from(&[
            ("RENDER_BACKEND", "Markup"),
            ("PRINT_COMMAND", "wkhtmltopdf"),
            ("PRINT_ARGS", "--quiet {input} {output}"),
            ("PRINT_TIMEOUT_SECS", "5"),
            ("PAGE_SIZE", "letter"),
            ("PAGE_MARGIN_MM", "15"),
        ])
        .unwrap();

        assert_eq!(config.backend, BackendKind::Markup);
        let command = config.print_command();
        assert_eq!(command.program, "wkhtmltopdf");
        assert_eq!(command.args, vec!["--quiet", "{input}", "{output}"]);
        assert_eq!(command.timeout, Duration::from_secs(5));
        assert_eq!(config.page.width_mm, 215.9);
        assert_eq!(config.page.margin_left, 15.0);
        assert_eq!(config.build_backend().name(), "markup");
    }

    #[test]
    fn test_invalid_values() {
        assert!(matches!(
            config_from(&[("RENDER_BACKEND", "typst")]),
            Err(ConfigError::Invalid { key: "RENDER_BACKEND", .. })
        ));
        assert!(matches!(
            config_from(&[("PRINT_TIMEOUT_SECS", "0")]),
            Err(ConfigError::Invalid { key: "PRINT_TIMEOUT_SECS", .. })
        ));
        assert!(matches!(
            config_from(&[("PORT", "http")]),
            Err(ConfigError::Invalid { key: "PORT", .. })
        ));
    }
}

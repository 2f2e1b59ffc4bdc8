//! Runtime configuration for the bot.
//!
//! Values come either from the process environment (a `.env` file is loaded
//! by the binary before this runs) or from a TOML file.

use crate::error::ConfigError;
use crate::types::DEFAULT_SUBREDDIT;
use serde::Deserialize;
use std::fmt;
use std::path::Path;

pub const DEFAULT_DATABASE_URL: &str = "sqlite://redditcord.db";
pub const DEFAULT_REDDIT_BASE_URL: &str = "https://www.reddit.com";

#[derive(Clone, Deserialize)]
pub struct AppConfig {
    pub discord_token: String,
    pub application_id: u64,
    #[serde(default = "default_database_url")]
    pub database_url: String,
    #[serde(default = "default_reddit_base_url")]
    pub reddit_base_url: String,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    #[serde(default = "default_subreddit")]
    pub default_subreddit: String,
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| {
            lookup(key)
                .filter(|value| !value.trim().is_empty())
                .ok_or_else(|| ConfigError::MissingEnvironmentVariable {
                    var_name: key.to_string(),
                })
        };

        let discord_token = required("DISCORD_TOKEN")?;
        let raw_application_id = required("DISCORD_APPLICATION_ID")?;
        let application_id =
            raw_application_id
                .trim()
                .parse::<u64>()
                .map_err(|_| ConfigError::InvalidValue {
                    field: "DISCORD_APPLICATION_ID".to_string(),
                    value: raw_application_id.clone(),
                })?;

        Ok(Self {
            discord_token,
            application_id,
            database_url: lookup("DATABASE_URL").unwrap_or_else(default_database_url),
            reddit_base_url: lookup("REDDIT_BASE_URL").unwrap_or_else(default_reddit_base_url),
            user_agent: lookup("REDDIT_USER_AGENT").unwrap_or_else(default_user_agent),
            default_subreddit: lookup("DEFAULT_SUBREDDIT").unwrap_or_else(default_subreddit),
        })
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;

        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.discord_token.trim().is_empty() {
            return Err(ConfigError::ValidationFailed {
                reason: "discord_token cannot be empty".to_string(),
            });
        }
        if self.application_id == 0 {
            return Err(ConfigError::ValidationFailed {
                reason: "application_id cannot be 0".to_string(),
            });
        }
        if url::Url::parse(&self.reddit_base_url).is_err() {
            return Err(ConfigError::InvalidValue {
                field: "reddit_base_url".to_string(),
                value: self.reddit_base_url.clone(),
            });
        }
        if self.default_subreddit.trim().is_empty() {
            return Err(ConfigError::ValidationFailed {
                reason: "default_subreddit cannot be empty".to_string(),
            });
        }
        Ok(())
    }
}

impl fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppConfig")
            .field("discord_token", &"<redacted>")
            .field("application_id", &self.application_id)
            .field("database_url", &self.database_url)
            .field("reddit_base_url", &self.reddit_base_url)
            .field("user_agent", &self.user_agent)
            .field("default_subreddit", &self.default_subreddit)
            .finish()
    }
}

fn default_database_url() -> String {
    DEFAULT_DATABASE_URL.to_string()
}

fn default_reddit_base_url() -> String {
    DEFAULT_REDDIT_BASE_URL.to_string()
}

fn default_user_agent() -> String {
    format!("redditcord/{}", env!("CARGO_PKG_VERSION"))
}

fn default_subreddit() -> String {
    DEFAULT_SUBREDDIT.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_from_lookup_applies_defaults() {
        let config = AppConfig::from_lookup(lookup_from(&[
            ("DISCORD_TOKEN", "token"),
            ("DISCORD_APPLICATION_ID", "1234"),
        ]))
        .unwrap();

        assert_eq!(config.discord_token, "token");
        assert_eq!(config.application_id, 1234);
        assert_eq!(config.database_url, DEFAULT_DATABASE_URL);
        assert_eq!(config.reddit_base_url, DEFAULT_REDDIT_BASE_URL);
        assert_eq!(config.default_subreddit, "memes");
        assert!(config.user_agent.starts_with("redditcord/"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_missing_token_names_variable() {
        let result = AppConfig::from_lookup(lookup_from(&[("DISCORD_APPLICATION_ID", "1")]));
        match result {
            Err(ConfigError::MissingEnvironmentVariable { var_name }) => {
                assert_eq!(var_name, "DISCORD_TOKEN");
            }
            other => panic!("Expected MissingEnvironmentVariable, got {:?}", other),
        }
    }

    #[test]
    fn test_blank_token_counts_as_missing() {
        let result = AppConfig::from_lookup(lookup_from(&[
            ("DISCORD_TOKEN", "   "),
            ("DISCORD_APPLICATION_ID", "1"),
        ]));
        assert!(matches!(
            result,
            Err(ConfigError::MissingEnvironmentVariable { .. })
        ));
    }

    #[test]
    fn test_non_numeric_application_id() {
        let result = AppConfig::from_lookup(lookup_from(&[
            ("DISCORD_TOKEN", "token"),
            ("DISCORD_APPLICATION_ID", "not-a-number"),
        ]));
        match result {
            Err(ConfigError::InvalidValue { field, value }) => {
                assert_eq!(field, "DISCORD_APPLICATION_ID");
                assert_eq!(value, "not-a-number");
            }
            other => panic!("Expected InvalidValue, got {:?}", other),
        }
    }

    #[test]
    fn test_overrides_from_lookup() {
        let config = AppConfig::from_lookup(lookup_from(&[
            ("DISCORD_TOKEN", "token"),
            ("DISCORD_APPLICATION_ID", "42"),
            ("DATABASE_URL", "sqlite::memory:"),
            ("REDDIT_BASE_URL", "http://127.0.0.1:9999"),
            ("REDDIT_USER_AGENT", "test-agent/1.0"),
            ("DEFAULT_SUBREDDIT", "rust"),
        ]))
        .unwrap();

        assert_eq!(config.database_url, "sqlite::memory:");
        assert_eq!(config.reddit_base_url, "http://127.0.0.1:9999");
        assert_eq!(config.user_agent, "test-agent/1.0");
        assert_eq!(config.default_subreddit, "rust");
    }

    #[test]
    fn test_from_toml_str() {
        let config = AppConfig::from_toml_str(
            r#"
            discord_token = "abc"
            application_id = 99
            default_subreddit = "aww"
            "#,
        )
        .unwrap();

        assert_eq!(config.discord_token, "abc");
        assert_eq!(config.application_id, 99);
        assert_eq!(config.default_subreddit, "aww");
        assert_eq!(config.reddit_base_url, DEFAULT_REDDIT_BASE_URL);
    }

    #[test]
    fn test_from_toml_str_missing_token_is_parse_error() {
        let result = AppConfig::from_toml_str("application_id = 1");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_from_file_not_found() {
        let result = AppConfig::from_file("/definitely/not/here/redditcord.toml");
        assert!(matches!(result, Err(ConfigError::FileNotFound { .. })));
    }

    #[test]
    fn test_validate_rejects_bad_base_url() {
        let mut config = AppConfig::from_lookup(lookup_from(&[
            ("DISCORD_TOKEN", "token"),
            ("DISCORD_APPLICATION_ID", "1"),
        ]))
        .unwrap();
        config.reddit_base_url = "not a url".to_string();

        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue { .. })
        ));
    }

    #[test]
    fn test_debug_redacts_token() {
        let config = AppConfig::from_lookup(lookup_from(&[
            ("DISCORD_TOKEN", "super-secret"),
            ("DISCORD_APPLICATION_ID", "1"),
        ]))
        .unwrap();

        let rendered = format!("{:?}", config);
        assert!(!rendered.contains("super-secret"));
        assert!(rendered.contains("<redacted>"));
    }
}

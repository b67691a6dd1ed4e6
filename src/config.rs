//! Process configuration read from the environment.
//!
//! | Variable               | Default              | Meaning                                   |
//! |------------------------|----------------------|-------------------------------------------|
//! | `SECRET`               | (required)           | Webhook secret for signature verification |
//! | `TOKEN`                | (required)           | GitHub token of the bot account           |
//! | `VERIFY`               | `true`               | `false`/`0`/`no`/`off` skip verification  |
//! | `PORT`                 | `8080`               | Listen port                               |
//! | `BOT_HANDLE`           | `nodeschoolbot`      | Login the bot answers to                  |
//! | `GITHUB_ORG`           | `nodeschool`         | Organization the bot administers          |
//! | `ORGANIZERS_TEAM_ID`   | `1660004`            | Team whose active members may use the bot |
//! | `ORGANIZERS_TEAM_SLUG` | `chapter-organizers` | Slug of that team, used in replies        |

use thiserror::Error;

use crate::types::TeamId;

pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_BOT_HANDLE: &str = "nodeschoolbot";
pub const DEFAULT_ORG: &str = "nodeschool";
pub const DEFAULT_ORGANIZERS_TEAM_ID: u64 = 1660004;
pub const DEFAULT_ORGANIZERS_TEAM_SLUG: &str = "chapter-organizers";

/// Errors loading configuration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A required variable is unset or empty.
    #[error("{0} is missing")]
    Missing(&'static str),

    /// A variable is set but cannot be parsed.
    #[error("invalid value for {name}: {value:?}")]
    Invalid { name: &'static str, value: String },
}

/// Who the bot is and what it administers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BotSettings {
    /// The bot's login, without `@`.
    pub handle: String,

    /// The organization repositories and teams are created in.
    pub org: String,

    /// ID of the team that gates access and receives `add-user` members.
    pub organizers_team_id: TeamId,

    /// Slug of the organizer team, as shown in replies.
    pub organizers_team_slug: String,
}

impl Default for BotSettings {
    fn default() -> Self {
        BotSettings {
            handle: DEFAULT_BOT_HANDLE.to_string(),
            org: DEFAULT_ORG.to_string(),
            organizers_team_id: TeamId(DEFAULT_ORGANIZERS_TEAM_ID),
            organizers_team_slug: DEFAULT_ORGANIZERS_TEAM_SLUG.to_string(),
        }
    }
}

/// Full process configuration.
#[derive(Clone, PartialEq, Eq)]
pub struct Config {
    /// Webhook secret for HMAC signature verification.
    pub webhook_secret: Vec<u8>,

    /// GitHub token the bot acts with.
    pub github_token: String,

    /// Whether inbound signatures are checked. Only disable for local testing.
    pub verify_signatures: bool,

    /// TCP port to listen on.
    pub port: u16,

    pub bot: BotSettings,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("verify_signatures", &self.verify_signatures)
            .field("port", &self.port)
            .field("bot", &self.bot)
            .finish_non_exhaustive()
    }
}

impl Config {
    /// Loads configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Loads configuration using `lookup` to read variables.
    ///
    /// Empty values are treated as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.is_empty());

        let webhook_secret = get("SECRET").ok_or(ConfigError::Missing("SECRET"))?;
        let github_token = get("TOKEN").ok_or(ConfigError::Missing("TOKEN"))?;

        let verify_signatures = match get("VERIFY") {
            Some(value) => parse_bool("VERIFY", &value)?,
            None => true,
        };

        let port = match get("PORT") {
            Some(value) => value.parse().map_err(|_| ConfigError::Invalid {
                name: "PORT",
                value,
            })?,
            None => DEFAULT_PORT,
        };

        let organizers_team_id = match get("ORGANIZERS_TEAM_ID") {
            Some(value) => TeamId(value.parse().map_err(|_| ConfigError::Invalid {
                name: "ORGANIZERS_TEAM_ID",
                value,
            })?),
            None => TeamId(DEFAULT_ORGANIZERS_TEAM_ID),
        };

        let defaults = BotSettings::default();
        let bot = BotSettings {
            handle: get("BOT_HANDLE")
                .map(|h| h.trim_start_matches('@').to_string())
                .unwrap_or(defaults.handle),
            org: get("GITHUB_ORG").unwrap_or(defaults.org),
            organizers_team_id,
            organizers_team_slug: get("ORGANIZERS_TEAM_SLUG")
                .unwrap_or(defaults.organizers_team_slug),
        };

        Ok(Config {
            webhook_secret: webhook_secret.into_bytes(),
            github_token,
            verify_signatures,
            port,
            bot,
        })
    }
}

fn parse_bool(name: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::Invalid {
            name,
            value: value.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn minimal_config_uses_defaults() {
        let config = load(&[("SECRET", "s3cret"), ("TOKEN", "ghp_x")]).unwrap();

        assert_eq!(config.webhook_secret, b"s3cret");
        assert_eq!(config.github_token, "ghp_x");
        assert!(config.verify_signatures);
        assert_eq!(config.port, DEFAULT_PORT);
        assert_eq!(config.bot, BotSettings::default());
    }

    #[test]
    fn secret_and_token_are_required() {
        assert_eq!(load(&[("TOKEN", "t")]), Err(ConfigError::Missing("SECRET")));
        assert_eq!(load(&[("SECRET", "s")]), Err(ConfigError::Missing("TOKEN")));
        assert_eq!(
            load(&[("SECRET", ""), ("TOKEN", "t")]),
            Err(ConfigError::Missing("SECRET"))
        );
    }

    #[test]
    fn verify_can_be_disabled() {
        for value in ["false", "FALSE", "0", "no", "off"] {
            let config = load(&[("SECRET", "s"), ("TOKEN", "t"), ("VERIFY", value)]).unwrap();
            assert!(!config.verify_signatures, "{value}");
        }
        let config = load(&[("SECRET", "s"), ("TOKEN", "t"), ("VERIFY", "true")]).unwrap();
        assert!(config.verify_signatures);
    }

    #[test]
    fn invalid_values_are_rejected() {
        assert_eq!(
            load(&[("SECRET", "s"), ("TOKEN", "t"), ("VERIFY", "maybe")]),
            Err(ConfigError::Invalid {
                name: "VERIFY",
                value: "maybe".into()
            })
        );
        assert_eq!(
            load(&[("SECRET", "s"), ("TOKEN", "t"), ("PORT", "http")]),
            Err(ConfigError::Invalid {
                name: "PORT",
                value: "http".into()
            })
        );
        assert!(matches!(
            load(&[("SECRET", "s"), ("TOKEN", "t"), ("ORGANIZERS_TEAM_ID", "-1")]),
            Err(ConfigError::Invalid { name: "ORGANIZERS_TEAM_ID", .. })
        ));
    }

    #[test]
    fn bot_settings_overrides() {
        let config = load(&[
            ("SECRET", "s"),
            ("TOKEN", "t"),
            ("PORT", "3000"),
            ("BOT_HANDLE", "@chapterbot"),
            ("GITHUB_ORG", "rustbridge"),
            ("ORGANIZERS_TEAM_ID", "42"),
            ("ORGANIZERS_TEAM_SLUG", "organizers"),
        ])
        .unwrap();

        assert_eq!(config.port, 3000);
        assert_eq!(
            config.bot,
            BotSettings {
                handle: "chapterbot".into(),
                org: "rustbridge".into(),
                organizers_team_id: TeamId(42),
                organizers_team_slug: "organizers".into(),
            }
        );
    }

    #[test]
    fn debug_output_hides_secrets() {
        let config = load(&[("SECRET", "hunter2"), ("TOKEN", "ghp_secret")]).unwrap();
        let debug = format!("{:?}", config);
        assert!(!debug.contains("hunter2"));
        assert!(!debug.contains("ghp_secret"));
    }
}

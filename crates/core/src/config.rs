use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Effective configuration: defaults, then an optional `mesa.toml`, then
/// `MESA_*` environment overrides, then programmatic overrides.
///
/// The webhook endpoint and the session/origin labels live here rather than
/// in process globals, so every collaborator receives them explicitly.
#[derive(Clone, Debug)]
pub struct AppConfig {
    pub webhook: WebhookConfig,
    pub session: SessionConfig,
    pub logging: LoggingConfig,
}

#[derive(Clone, Debug)]
pub struct WebhookConfig {
    pub url: String,
    pub timeout_secs: u64,
    pub language_code: String,
    /// Channel label prefixed to the session identifier on the wire.
    pub session_label: String,
    /// Free-text origin note submitted as `observacions`.
    pub origin_note: String,
}

#[derive(Clone, Debug)]
pub struct SessionConfig {
    /// Default caller-id hint when the channel does not supply one.
    pub caller_phone: Option<String>,
}

#[derive(Clone, Debug)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    Compact,
    Pretty,
    Json,
}

#[derive(Clone, Debug, Default)]
pub struct ConfigOverrides {
    pub webhook_url: Option<String>,
    pub caller_phone: Option<String>,
    pub log_level: Option<String>,
}

#[derive(Clone, Debug, Default)]
pub struct LoadOptions {
    pub config_path: Option<PathBuf>,
    pub require_file: bool,
    pub overrides: ConfigOverrides,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file `{path}`: {source}")]
    ReadFile { path: PathBuf, source: std::io::Error },
    #[error("failed to parse config file `{path}`: {source}")]
    ParseFile { path: PathBuf, source: toml::de::Error },
    #[error("config file `{0}` does not exist")]
    MissingConfigFile(PathBuf),
    #[error("environment override `{key}` has an invalid value: `{value}`")]
    InvalidEnvOverride { key: String, value: String },
    #[error("invalid configuration: {0}")]
    Validation(String),
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            webhook: WebhookConfig {
                url: "https://cronosai-webhook.vercel.app/api/webhook".to_string(),
                timeout_secs: 30,
                language_code: "es-ES".to_string(),
                session_label: "mesa-text".to_string(),
                origin_note: "Reserva creada por el asistente conversacional".to_string(),
            },
            session: SessionConfig { caller_phone: None },
            logging: LoggingConfig { level: "info".to_string(), format: LogFormat::Compact },
        }
    }
}

impl std::str::FromStr for LogFormat {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "compact" => Ok(Self::Compact),
            "pretty" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            other => Err(ConfigError::Validation(format!(
                "unknown log format `{other}`, expected compact, pretty or json"
            ))),
        }
    }
}

impl AppConfig {
    pub fn load(options: LoadOptions) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        let maybe_path = resolve_config_path(options.config_path.as_deref());

        if let Some(path) = maybe_path {
            let patch = read_patch(&path)?;
            config.apply_patch(patch);
        } else if options.require_file {
            let expected = options.config_path.unwrap_or_else(|| PathBuf::from("mesa.toml"));
            return Err(ConfigError::MissingConfigFile(expected));
        }

        config.apply_env_overrides()?;
        config.apply_overrides(options.overrides);
        config.validate()?;

        Ok(config)
    }

    fn apply_patch(&mut self, patch: ConfigPatch) {
        if let Some(webhook) = patch.webhook {
            if let Some(url) = webhook.url {
                self.webhook.url = url;
            }
            if let Some(timeout_secs) = webhook.timeout_secs {
                self.webhook.timeout_secs = timeout_secs;
            }
            if let Some(language_code) = webhook.language_code {
                self.webhook.language_code = language_code;
            }
            if let Some(session_label) = webhook.session_label {
                self.webhook.session_label = session_label;
            }
            if let Some(origin_note) = webhook.origin_note {
                self.webhook.origin_note = origin_note;
            }
        }

        if let Some(session) = patch.session {
            if let Some(caller_phone) = session.caller_phone {
                self.session.caller_phone = Some(caller_phone);
            }
        }

        if let Some(logging) = patch.logging {
            if let Some(level) = logging.level {
                self.logging.level = level;
            }
            if let Some(format) = logging.format {
                self.logging.format = format;
            }
        }
    }

    fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        if let Some(value) = read_env("MESA_WEBHOOK_URL") {
            self.webhook.url = value;
        }
        if let Some(value) = read_env("MESA_WEBHOOK_TIMEOUT_SECS") {
            self.webhook.timeout_secs = parse_u64("MESA_WEBHOOK_TIMEOUT_SECS", &value)?;
        }
        if let Some(value) = read_env("MESA_WEBHOOK_LANGUAGE_CODE") {
            self.webhook.language_code = value;
        }
        if let Some(value) = read_env("MESA_WEBHOOK_SESSION_LABEL") {
            self.webhook.session_label = value;
        }
        if let Some(value) = read_env("MESA_WEBHOOK_ORIGIN_NOTE") {
            self.webhook.origin_note = value;
        }

        if let Some(value) = read_env("MESA_SESSION_CALLER_PHONE") {
            self.session.caller_phone = Some(value);
        }

        if let Some(value) = read_env("MESA_LOGGING_LEVEL") {
            self.logging.level = value;
        }
        if let Some(value) = read_env("MESA_LOGGING_FORMAT") {
            self.logging.format = value.parse()?;
        }

        Ok(())
    }

    fn apply_overrides(&mut self, overrides: ConfigOverrides) {
        if let Some(webhook_url) = overrides.webhook_url {
            self.webhook.url = webhook_url;
        }
        if let Some(caller_phone) = overrides.caller_phone {
            self.session.caller_phone = Some(caller_phone);
        }
        if let Some(log_level) = overrides.log_level {
            self.logging.level = log_level;
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.webhook.url.trim().is_empty() {
            return Err(ConfigError::Validation("webhook.url must not be empty".to_string()));
        }
        if !self.webhook.url.starts_with("http://") && !self.webhook.url.starts_with("https://") {
            return Err(ConfigError::Validation(format!(
                "webhook.url must be an http(s) URL, got `{}`",
                self.webhook.url
            )));
        }
        if self.webhook.timeout_secs == 0 {
            return Err(ConfigError::Validation(
                "webhook.timeout_secs must be greater than zero".to_string(),
            ));
        }
        if self.webhook.language_code.trim().is_empty() {
            return Err(ConfigError::Validation(
                "webhook.language_code must not be empty".to_string(),
            ));
        }
        if self.webhook.session_label.trim().is_empty() {
            return Err(ConfigError::Validation(
                "webhook.session_label must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Default, Deserialize)]
struct ConfigPatch {
    webhook: Option<WebhookPatch>,
    session: Option<SessionPatch>,
    logging: Option<LoggingPatch>,
}

#[derive(Debug, Deserialize)]
struct WebhookPatch {
    url: Option<String>,
    timeout_secs: Option<u64>,
    language_code: Option<String>,
    session_label: Option<String>,
    origin_note: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SessionPatch {
    caller_phone: Option<String>,
}

#[derive(Debug, Deserialize)]
struct LoggingPatch {
    level: Option<String>,
    format: Option<LogFormat>,
}

fn resolve_config_path(explicit: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_path_buf());
    }
    if let Some(value) = read_env("MESA_CONFIG_PATH") {
        return Some(PathBuf::from(value));
    }
    let default = PathBuf::from("mesa.toml");
    default.exists().then_some(default)
}

fn read_patch(path: &Path) -> Result<ConfigPatch, ConfigError> {
    let raw = fs::read_to_string(path)
        .map_err(|source| ConfigError::ReadFile { path: path.to_path_buf(), source })?;
    toml::from_str(&raw)
        .map_err(|source| ConfigError::ParseFile { path: path.to_path_buf(), source })
}

fn read_env(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}

fn parse_u64(key: &str, value: &str) -> Result<u64, ConfigError> {
    value.trim().parse::<u64>().map_err(|_| ConfigError::InvalidEnvOverride {
        key: key.to_string(),
        value: value.to_string(),
    })
}

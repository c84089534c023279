use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use mesa_core::config::{AppConfig, LoadOptions};
use toml::Value;

pub fn run(options: LoadOptions) -> String {
    let explicit_path = options.config_path.clone();
    let config = match AppConfig::load(options) {
        Ok(config) => config,
        Err(error) => return format!("failed to load config: {error}"),
    };

    let config_file_path = detect_config_path(explicit_path);
    let config_file_doc = load_config_file_doc(config_file_path.as_deref());
    let doc = config_file_doc.as_ref();
    let path = config_file_path.as_deref();

    let mut lines =
        vec!["effective configuration (env overrides file, file overrides defaults):".to_string()];

    lines.push(format_entry(
        "webhook.url",
        &config.webhook.url,
        source_of("webhook.url", "MESA_WEBHOOK_URL", doc, path),
    ));
    lines.push(format_entry(
        "webhook.timeout_secs",
        &config.webhook.timeout_secs.to_string(),
        source_of("webhook.timeout_secs", "MESA_WEBHOOK_TIMEOUT_SECS", doc, path),
    ));
    lines.push(format_entry(
        "webhook.language_code",
        &config.webhook.language_code,
        source_of("webhook.language_code", "MESA_WEBHOOK_LANGUAGE_CODE", doc, path),
    ));
    lines.push(format_entry(
        "webhook.session_label",
        &config.webhook.session_label,
        source_of("webhook.session_label", "MESA_WEBHOOK_SESSION_LABEL", doc, path),
    ));
    lines.push(format_entry(
        "webhook.origin_note",
        &config.webhook.origin_note,
        source_of("webhook.origin_note", "MESA_WEBHOOK_ORIGIN_NOTE", doc, path),
    ));
    lines.push(format_entry(
        "session.caller_phone",
        config.session.caller_phone.as_deref().unwrap_or("(unset)"),
        source_of("session.caller_phone", "MESA_SESSION_CALLER_PHONE", doc, path),
    ));
    lines.push(format_entry(
        "logging.level",
        &config.logging.level,
        source_of("logging.level", "MESA_LOGGING_LEVEL", doc, path),
    ));
    lines.push(format_entry(
        "logging.format",
        &format!("{:?}", config.logging.format).to_lowercase(),
        source_of("logging.format", "MESA_LOGGING_FORMAT", doc, path),
    ));

    lines.join("\n")
}

fn format_entry(key: &str, value: &str, source: String) -> String {
    format!("  {key} = {value}  [{source}]")
}

fn source_of(
    dotted_key: &str,
    env_var: &str,
    doc: Option<&Value>,
    path: Option<&Path>,
) -> String {
    if env::var(env_var).map(|value| !value.trim().is_empty()).unwrap_or(false) {
        return format!("env:{env_var}");
    }
    if let (Some(doc), Some(path)) = (doc, path) {
        if file_has_key(doc, dotted_key) {
            return format!("file:{}", path.display());
        }
    }
    "default".to_string()
}

fn file_has_key(doc: &Value, dotted_key: &str) -> bool {
    let mut current = doc;
    for part in dotted_key.split('.') {
        match current.get(part) {
            Some(next) => current = next,
            None => return false,
        }
    }
    true
}

fn detect_config_path(explicit: Option<PathBuf>) -> Option<PathBuf> {
    if explicit.is_some() {
        return explicit;
    }
    if let Ok(value) = env::var("MESA_CONFIG_PATH") {
        if !value.trim().is_empty() {
            return Some(PathBuf::from(value));
        }
    }
    let default = PathBuf::from("mesa.toml");
    default.exists().then_some(default)
}

fn load_config_file_doc(path: Option<&Path>) -> Option<Value> {
    let raw = fs::read_to_string(path?).ok()?;
    raw.parse::<Value>().ok()
}

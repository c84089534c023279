use std::fs;

use mesa_cli::commands::{chat, config};
use mesa_core::config::{ConfigOverrides, LoadOptions};

#[test]
fn config_command_renders_every_effective_field() {
    let output = config::run(LoadOptions::default());
    for key in [
        "webhook.url",
        "webhook.timeout_secs",
        "webhook.language_code",
        "webhook.session_label",
        "webhook.origin_note",
        "session.caller_phone",
        "logging.level",
        "logging.format",
    ] {
        assert!(output.contains(key), "missing `{key}` in:\n{output}");
    }
}

#[test]
fn config_command_attributes_file_backed_values() {
    let dir = std::env::temp_dir().join("mesa-cli-config-test");
    fs::create_dir_all(&dir).expect("temp dir");
    let path = dir.join("mesa.toml");
    fs::write(&path, "[webhook]\nurl = \"https://example.test/hook\"\n").expect("write config");

    let output = config::run(LoadOptions {
        config_path: Some(path.clone()),
        require_file: true,
        ..LoadOptions::default()
    });

    assert!(output.contains("https://example.test/hook"));
    assert!(output.contains(&format!("file:{}", path.display())));
    // Values the file does not set still show their origin.
    assert!(output.contains("[default]"));
}

#[test]
fn chat_command_rejects_invalid_configuration_before_reading_input() {
    let result = chat::run(
        LoadOptions {
            overrides: ConfigOverrides {
                webhook_url: Some("not-a-url".to_string()),
                ..ConfigOverrides::default()
            },
            ..LoadOptions::default()
        },
        None,
    );

    assert_eq!(result.exit_code, 2);
    assert!(result.output.contains("config"));
}

pub mod chat;
pub mod config;

use serde::Serialize;

/// Exit status plus the single line the binary prints before exiting.
#[derive(Debug, Clone)]
pub struct CommandResult {
    pub exit_code: u8,
    pub output: String,
}

#[derive(Debug, Serialize)]
struct Report<'a> {
    command: &'a str,
    status: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    error_class: Option<&'a str>,
    message: &'a str,
}

impl CommandResult {
    pub fn success(command: &str, message: impl Into<String>) -> Self {
        Self::render(command, "ok", None, &message.into(), 0)
    }

    pub fn failure(
        command: &str,
        error_class: &str,
        message: impl Into<String>,
        exit_code: u8,
    ) -> Self {
        Self::render(command, "error", Some(error_class), &message.into(), exit_code)
    }

    fn render(
        command: &str,
        status: &str,
        error_class: Option<&str>,
        message: &str,
        exit_code: u8,
    ) -> Self {
        let report = Report { command, status, error_class, message };
        let output = serde_json::to_string(&report)
            .unwrap_or_else(|_| format!("{{\"command\":{command:?},\"status\":\"error\"}}"));
        Self { exit_code, output }
    }
}

#[cfg(test)]
mod tests {
    use super::CommandResult;

    #[test]
    fn success_payload_is_machine_readable() {
        let result = CommandResult::success("chat", "session closed");
        assert_eq!(result.exit_code, 0);
        let parsed: serde_json::Value =
            serde_json::from_str(&result.output).expect("valid json envelope");
        assert_eq!(parsed["command"], "chat");
        assert_eq!(parsed["status"], "ok");
        assert!(parsed.get("error_class").is_none());
    }

    #[test]
    fn failure_payload_carries_the_error_class() {
        let result = CommandResult::failure("chat", "config", "bad webhook url", 2);
        assert_eq!(result.exit_code, 2);
        let parsed: serde_json::Value =
            serde_json::from_str(&result.output).expect("valid json envelope");
        assert_eq!(parsed["error_class"], "config");
    }
}

//! Shell execution tool.
//!
//! Runs the command string through the platform shell with the privileges
//! of the current process. The string is passed to the shell verbatim:
//! there is no sanitization and no sandboxing. Deploying this tool means
//! accepting that the model can run arbitrary commands.

use std::time::Duration;

use async_trait::async_trait;
use tokio::process::Command;

use crate::tools::{Tool, ToolCallContent, ToolCallContext, ToolSourceError, ToolSpec};

/// Tool name: execute a shell command.
pub const TOOL_EXECUTE_COMMAND: &str = "execute_command";

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Executes shell commands with a wall-clock timeout.
pub struct ExecuteCommandTool {
    timeout: Duration,
}

impl Default for ExecuteCommandTool {
    fn default() -> Self {
        Self::new()
    }
}

enum CommandOutcome {
    Completed {
        code: i32,
        stdout: String,
        stderr: String,
    },
    TimedOut {
        limit: Duration,
    },
    Failed(String),
}

/// All outcomes become model-facing text so the model can react to
/// failures instead of the run aborting.
fn render(outcome: &CommandOutcome) -> String {
    match outcome {
        CommandOutcome::Completed { code: 0, stdout, .. } => {
            format!("Command executed successfully:\n{}", stdout)
        }
        CommandOutcome::Completed { code, stderr, .. } => {
            format!("Command failed with return code {}:\n{}", code, stderr)
        }
        CommandOutcome::TimedOut { limit } => {
            format!("Command timed out after {} seconds", limit.as_secs())
        }
        CommandOutcome::Failed(reason) => format!("Error executing command: {}", reason),
    }
}

#[cfg(unix)]
fn shell_command(command: &str) -> Command {
    let mut cmd = Command::new("sh");
    cmd.arg("-c").arg(command);
    cmd
}

#[cfg(windows)]
fn shell_command(command: &str) -> Command {
    let mut cmd = Command::new("cmd");
    cmd.arg("/C").arg(command);
    cmd
}

impl ExecuteCommandTool {
    pub fn new() -> Self {
        ExecuteCommandTool {
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Overrides the 30-second default, mainly for tests.
    pub fn with_timeout(timeout: Duration) -> Self {
        ExecuteCommandTool { timeout }
    }

    async fn execute(&self, command: &str) -> CommandOutcome {
        tracing::debug!(command = %command, "executing shell command");
        let mut cmd = shell_command(command);
        cmd.kill_on_drop(true);
        match tokio::time::timeout(self.timeout, cmd.output()).await {
            Err(_) => CommandOutcome::TimedOut {
                limit: self.timeout,
            },
            Ok(Err(err)) => CommandOutcome::Failed(err.to_string()),
            Ok(Ok(output)) => CommandOutcome::Completed {
                code: output.status.code().unwrap_or(-1),
                stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            },
        }
    }
}

#[async_trait]
impl Tool for ExecuteCommandTool {
    fn name(&self) -> &str {
        TOOL_EXECUTE_COMMAND
    }

    fn spec(&self) -> ToolSpec {
        ToolSpec {
            name: TOOL_EXECUTE_COMMAND.to_string(),
            description: Some(
                "Execute a shell command on the host and return its output. \
                 Use for file operations, running programs, or inspecting the system."
                    .to_string(),
            ),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {
                    "command": {
                        "type": "string",
                        "description": "Shell command to execute"
                    }
                },
                "required": ["command"]
            }),
        }
    }

    async fn call(
        &self,
        args: serde_json::Value,
        _ctx: Option<&ToolCallContext>,
    ) -> Result<ToolCallContent, ToolSourceError> {
        let command = args
            .get("command")
            .and_then(|v| v.as_str())
            .ok_or_else(|| {
                ToolSourceError::InvalidInput("expected a string field `command`".to_string())
            })?;
        let outcome = self.execute(command).await;
        Ok(ToolCallContent {
            text: render(&outcome),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// **Scenario**: the four outcome shapes render the exact model-facing
    /// strings.
    #[test]
    fn render_covers_all_outcomes() {
        let ok = CommandOutcome::Completed {
            code: 0,
            stdout: "hello\n".to_string(),
            stderr: String::new(),
        };
        assert_eq!(render(&ok), "Command executed successfully:\nhello\n");

        let failed = CommandOutcome::Completed {
            code: 3,
            stdout: String::new(),
            stderr: "nope\n".to_string(),
        };
        assert_eq!(render(&failed), "Command failed with return code 3:\nnope\n");

        let timed_out = CommandOutcome::TimedOut {
            limit: Duration::from_secs(30),
        };
        assert_eq!(render(&timed_out), "Command timed out after 30 seconds");

        let spawn_failed = CommandOutcome::Failed("no such file".to_string());
        assert_eq!(
            render(&spawn_failed),
            "Error executing command: no such file"
        );
    }

    /// **Scenario**: a successful command returns its stdout.
    #[cfg(unix)]
    #[tokio::test]
    async fn echo_succeeds() {
        let tool = ExecuteCommandTool::new();
        let content = tool
            .call(serde_json::json!({"command": "echo hello"}), None)
            .await
            .unwrap();
        assert_eq!(content.text, "Command executed successfully:\nhello\n");
    }

    /// **Scenario**: a non-zero exit reports the return code and stderr.
    #[cfg(unix)]
    #[tokio::test]
    async fn nonzero_exit_reports_code() {
        let tool = ExecuteCommandTool::new();
        let content = tool
            .call(
                serde_json::json!({"command": "echo bad >&2; exit 3"}),
                None,
            )
            .await
            .unwrap();
        assert_eq!(content.text, "Command failed with return code 3:\nbad\n");
    }

    /// **Scenario**: a command that outlives the budget is killed and
    /// reported as a timeout.
    #[cfg(unix)]
    #[tokio::test]
    async fn long_command_times_out() {
        let tool = ExecuteCommandTool::with_timeout(Duration::from_secs(1));
        let content = tool
            .call(serde_json::json!({"command": "sleep 5"}), None)
            .await
            .unwrap();
        assert_eq!(content.text, "Command timed out after 1 seconds");
    }

    /// **Scenario**: missing or non-string `command` is rejected before
    /// anything runs.
    #[tokio::test]
    async fn missing_command_is_invalid_input() {
        let tool = ExecuteCommandTool::new();
        match tool.call(serde_json::json!({}), None).await {
            Err(ToolSourceError::InvalidInput(msg)) => assert!(msg.contains("command")),
            other => panic!("expected InvalidInput, got {:?}", other.map(|c| c.text)),
        }
        match tool.call(serde_json::json!({"command": 5}), None).await {
            Err(ToolSourceError::InvalidInput(_)) => {}
            other => panic!("expected InvalidInput, got {:?}", other.map(|c| c.text)),
        }
    }
}

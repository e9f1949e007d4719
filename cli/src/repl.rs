//! Interactive read-eval-print loop over stdin/stdout.

use std::io::Write;

use tokio::io::{AsyncBufReadExt, BufReader};

use tangle::agent::{ChatSession, TurnEvent};
use tangle::message::Message;

fn is_quit_command(line: &str) -> bool {
    matches!(line.trim().to_lowercase().as_str(), "quit" | "exit" | "q")
}

fn render_event(event: &TurnEvent) -> String {
    match event {
        TurnEvent::Message(message) => match message {
            Message::System(content) => format!("System: {}", content),
            Message::User(content) => format!("User: {}", content),
            Message::Assistant {
                content,
                tool_call: Some(call),
            } if content.is_empty() => format!("Assistant: [calling {}]", call.name),
            Message::Assistant { content, .. } => format!("Assistant: {}", content),
            Message::Tool { content, .. } => format!("Tool: {}", content),
        },
        TurnEvent::Suspended(payload) => {
            let query = payload
                .get("query")
                .and_then(|v| v.as_str())
                .unwrap_or("(no query)");
            format!(
                "[assistance requested] {}\nType your answer to continue.",
                query
            )
        }
    }
}

/// Runs the loop until the user quits or stdin closes.
///
/// Turn errors are printed and terminate the process; the session holds
/// in-memory state that is not worth continuing with after a failed run.
pub async fn run(mut session: ChatSession) -> Result<(), Box<dyn std::error::Error>> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("User: ");
        std::io::stdout().flush()?;
        let Some(line) = lines.next_line().await? else {
            break;
        };
        let line = line.trim().to_string();
        if line.is_empty() {
            continue;
        }
        if is_quit_command(&line) {
            break;
        }
        match session.turn(&line).await {
            Ok(events) => {
                for event in &events {
                    println!("{}", render_event(event));
                }
            }
            Err(err) => {
                eprintln!("error: {}", err);
                std::process::exit(1);
            }
        }
    }
    println!("Goodbye!");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    /// **Scenario**: quit words match case-insensitively after trimming.
    #[test]
    fn quit_words_are_recognized() {
        assert!(is_quit_command("quit"));
        assert!(is_quit_command("  EXIT  "));
        assert!(is_quit_command("Q"));
        assert!(!is_quit_command("quitting"));
        assert!(!is_quit_command("hello"));
    }

    /// **Scenario**: events render with role prefixes; an empty assistant
    /// message with a tool call shows the call instead of a blank line.
    #[test]
    fn events_render_with_role_prefixes() {
        use tangle::state::ToolCall;

        let assistant = TurnEvent::Message(Message::assistant("hello"));
        assert_eq!(render_event(&assistant), "Assistant: hello");

        let tool = TurnEvent::Message(Message::tool("output", None));
        assert_eq!(render_event(&tool), "Tool: output");

        let calling = TurnEvent::Message(Message::assistant_with_call(
            "",
            ToolCall {
                name: "execute_command".to_string(),
                arguments: "{}".to_string(),
                id: None,
            },
        ));
        assert_eq!(render_event(&calling), "Assistant: [calling execute_command]");

        let suspended = TurnEvent::Suspended(serde_json::json!({"query": "help?"}));
        assert!(render_event(&suspended).contains("help?"));
    }
}

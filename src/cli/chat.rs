// src/cli/chat.rs — Interactive REPL

use serde::Serialize;
use std::io::IsTerminal;
use std::path::Path;

use crate::core::session::ChatSession;
use crate::core::types::{GenerationParams, Role, Transcript, Turn};
use crate::infra::config::Config;
use crate::provider::GenerationClient;

/// Run the interactive chat REPL until EOF or `/quit`.
pub async fn run_chat(
    client: &dyn GenerationClient,
    config: &Config,
    quiet: bool,
) -> anyhow::Result<()> {
    let instruction = config.prompt.resolve()?;
    let params = config.model.params();
    let redraw = std::io::stdout().is_terminal();

    if !quiet {
        eprintln!(
            "sheetchat v{} | {} | /help for commands\n",
            env!("CARGO_PKG_VERSION"),
            client.model(),
        );
    }

    let mut session = ChatSession::start(instruction.clone(), params);

    while let Some(input) = read_input() {
        let trimmed = input.trim();

        if trimmed == "quit" || trimmed == "exit" || trimmed == "/quit" {
            break;
        }

        if trimmed.starts_with('/') {
            if let Err(e) = handle_slash_command(trimmed, &mut session, client, &instruction, params)
            {
                eprintln!("  {}", e);
            }
            continue;
        }

        if trimmed.is_empty() {
            continue;
        }

        let outcome = session.submit(client, trimmed).await;

        if redraw {
            // Clear the screen and draw the whole conversation again.
            print!("\x1b[2J\x1b[H");
            println!("{}", render_transcript(session.transcript()));
        } else if let Some(turn) = session.transcript().last() {
            println!("{}", render_turn(turn));
        }

        if let Err(e) = outcome {
            eprintln!("[error] {}", e);
        }
    }

    let transcript = session.end();
    if !quiet {
        eprintln!("\nSession total: {} exchange(s)", transcript.exchanges());
    }
    Ok(())
}

fn read_input() -> Option<String> {
    use std::io::{self, BufRead, Write};

    print!("> ");
    io::stdout().flush().ok();

    let stdin = io::stdin();
    let mut line = String::new();
    match stdin.lock().read_line(&mut line) {
        Ok(0) => None, // EOF
        Ok(_) => Some(line),
        Err(_) => None,
    }
}

pub fn render_turn(turn: &Turn) -> String {
    let label = match turn.role {
        Role::User => "you",
        Role::Assistant => "model",
    };
    format!("{}: {}", label, turn.content)
}

/// The whole conversation, oldest turn first, one blank line between turns.
pub fn render_transcript(transcript: &Transcript) -> String {
    transcript
        .turns()
        .iter()
        .map(render_turn)
        .collect::<Vec<_>>()
        .join("\n\n")
}

#[derive(Serialize)]
struct SavedTranscript<'a> {
    session_id: &'a str,
    model: &'a str,
    saved_at: chrono::DateTime<chrono::Utc>,
    turns: &'a [Turn],
}

/// Write the transcript as YAML (`.yaml`/`.yml`) or JSON (anything else).
pub fn save_transcript(
    path: &Path,
    session: &ChatSession,
    model: &str,
) -> anyhow::Result<()> {
    let saved = SavedTranscript {
        session_id: session.id(),
        model,
        saved_at: chrono::Utc::now(),
        turns: session.transcript().turns(),
    };

    let out = match path.extension().and_then(|e| e.to_str()) {
        Some("yaml") | Some("yml") => serde_yml::to_string(&saved)?,
        _ => serde_json::to_string_pretty(&saved)?,
    };
    std::fs::write(path, out)?;
    Ok(())
}

fn handle_slash_command(
    input: &str,
    session: &mut ChatSession,
    client: &dyn GenerationClient,
    instruction: &str,
    params: GenerationParams,
) -> anyhow::Result<()> {
    let parts: Vec<&str> = input.splitn(2, ' ').collect();
    let cmd = parts[0];
    let arg = parts.get(1).map(|s| s.trim()).unwrap_or("");

    match cmd {
        "/history" => {
            if session.transcript().is_empty() {
                eprintln!("  No messages in this session yet.");
            } else {
                println!("{}", render_transcript(session.transcript()));
            }
        }

        "/clear" => {
            let fresh = ChatSession::start(instruction, params);
            let old = std::mem::replace(session, fresh).end();
            eprintln!("  Cleared {} exchange(s). New session started.", old.exchanges());
        }

        "/save" => {
            if arg.is_empty() {
                anyhow::bail!("Usage: /save <path.json|path.yaml>");
            }
            save_transcript(Path::new(arg), session, client.model())?;
            eprintln!("  Saved transcript to {}", arg);
        }

        "/help" => {
            eprintln!("Slash commands:");
            eprintln!("  /history           Show the whole conversation");
            eprintln!("  /clear             Forget the conversation and start over");
            eprintln!("  /save <path>       Save the conversation as JSON or YAML");
            eprintln!("  /help              Show this help");
            eprintln!("  /quit, quit, exit  End session");
        }

        _ => {
            anyhow::bail!("Unknown command: {}. Type /help for commands.", cmd);
        }
    }
    Ok(())
}

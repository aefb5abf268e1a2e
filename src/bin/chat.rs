//! Terminal chat client for the regulatory assistant relay.
//! Run with: cargo run --bin cadastre-chat

use std::io::{self, BufRead, Write};

use cadastre_advisor::chat::{ChatSession, HttpRelay, Message, SubmitOutcome};

/// Default relay endpoint when `CADASTRE_RELAY_URL` is unset.
const DEFAULT_RELAY_URL: &str = "http://127.0.0.1:3000/api/chat";

/// Print the newest log entry, mirroring the widget's scroll-to-newest.
fn render_newest(message: Option<&Message>) {
    if let Some(message) = message {
        println!("assistant> {}", message.content);
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let endpoint = std::env::var("CADASTRE_RELAY_URL")
        .unwrap_or_else(|_| DEFAULT_RELAY_URL.to_string());

    let relay = HttpRelay::new(endpoint)?;
    let mut session = ChatSession::new(relay);

    render_newest(session.conversation().last());
    println!("(type your question, or /quit to leave)");

    let stdin = io::stdin();
    let mut line = String::new();
    loop {
        print!("you> ");
        io::stdout().flush()?;

        line.clear();
        if stdin.lock().read_line(&mut line)? == 0 {
            break; // EOF
        }
        let text = line.trim();
        if text.eq_ignore_ascii_case("/quit") {
            break;
        }

        match session.submit(text) {
            SubmitOutcome::EmptyInput => {}
            SubmitOutcome::Busy => println!("(still thinking, one question at a time)"),
            SubmitOutcome::Sent => {
                println!("(thinking...)");
                session.resolve().await;
                render_newest(session.conversation().last());
            }
        }
    }

    Ok(())
}

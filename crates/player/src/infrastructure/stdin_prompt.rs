//! Terminal implementation of the confirmation port

use std::io::{self, BufRead, Write};

use async_trait::async_trait;

use crate::ports::outbound::ConfirmPort;

/// Asks on stdout and reads a `y`/`yes` answer from stdin.
///
/// The read blocks, so it runs on tokio's blocking pool.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdinConfirm;

#[async_trait]
impl ConfirmPort for StdinConfirm {
    async fn confirm(&self, message: &str) -> bool {
        let message = message.to_string();
        match tokio::task::spawn_blocking(move || ask(&message)).await {
            Ok(answer) => answer,
            Err(err) => {
                tracing::warn!(error = %err, "Confirmation prompt failed");
                false
            }
        }
    }
}

fn ask(message: &str) -> bool {
    print!("{message} [y/N] ");
    if io::stdout().flush().is_err() {
        return false;
    }
    let mut answer = String::new();
    match io::stdin().lock().read_line(&mut answer) {
        Ok(_) => is_yes(&answer),
        Err(_) => false,
    }
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}

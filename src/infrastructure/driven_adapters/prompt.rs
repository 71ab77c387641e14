//! Confirmation Prompts
//!
//! Implementations of the Confirmer trait: an interactive terminal prompt and
//! a fixed answer for `--yes` and non-interactive runs.

use std::io::{BufRead, Write};

use async_trait::async_trait;

use crate::domain::gateways::Confirmer;
use crate::shared::errors::GatewayError;

/// Asks on stderr and reads the answer from stdin
#[derive(Debug, Clone, Copy, Default)]
pub struct StdinConfirmer;

impl StdinConfirmer {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

/// `y` and `yes` (any case) accept, anything else declines
fn is_affirmative(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}

#[async_trait]
impl Confirmer for StdinConfirmer {
    async fn confirm(&self, question: &str) -> Result<bool, GatewayError> {
        let question = question.to_string();
        tokio::task::spawn_blocking(move || {
            let mut stderr = std::io::stderr().lock();
            write!(stderr, "{question} [y/N] ").map_err(GatewayError::Prompt)?;
            stderr.flush().map_err(GatewayError::Prompt)?;

            let mut answer = String::new();
            std::io::stdin()
                .lock()
                .read_line(&mut answer)
                .map_err(GatewayError::Prompt)?;
            Ok(is_affirmative(&answer))
        })
        .await
        .map_err(|e| GatewayError::Prompt(std::io::Error::other(e)))?
    }
}

/// Answers every question the same way without asking
#[derive(Debug, Clone, Copy)]
pub struct FixedAnswer(pub bool);

#[async_trait]
impl Confirmer for FixedAnswer {
    async fn confirm(&self, question: &str) -> Result<bool, GatewayError> {
        tracing::info!(question, answer = self.0, "Answering confirmation without prompting");
        Ok(self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_affirmative() {
        assert!(is_affirmative("y\n"));
        assert!(is_affirmative(" YES "));
        assert!(!is_affirmative("n"));
        assert!(!is_affirmative(""));
        assert!(!is_affirmative("yep"));
    }

    #[tokio::test]
    async fn test_fixed_answer() {
        assert!(FixedAnswer(true).confirm("Regenerate?").await.unwrap());
        assert!(!FixedAnswer(false).confirm("Regenerate?").await.unwrap());
    }
}

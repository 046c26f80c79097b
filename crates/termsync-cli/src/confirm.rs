use std::io::{BufRead, Write};
use termsync_services::Confirm;

/// Asks on stderr and reads one answer line from the given input.
/// Only `y`/`yes` counts as consent; EOF or a read error is a refusal.
pub struct PromptConfirm<R> {
    input: R,
}

impl<R: BufRead> PromptConfirm<R> {
    pub fn new(input: R) -> Self {
        Self { input }
    }
}

impl PromptConfirm<std::io::StdinLock<'static>> {
    pub fn stdin() -> Self {
        Self::new(std::io::stdin().lock())
    }
}

impl<R: BufRead> Confirm for PromptConfirm<R> {
    fn confirm(&mut self, prompt: &str) -> bool {
        let mut err = std::io::stderr();
        let _ = write!(err, "? {prompt} [y/N] ");
        let _ = err.flush();

        let mut line = String::new();
        match self.input.read_line(&mut line) {
            Ok(0) | Err(_) => {
                tracing::debug!(event = "confirm_no_input");
                false
            }
            Ok(_) => is_yes(&line),
        }
    }
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}

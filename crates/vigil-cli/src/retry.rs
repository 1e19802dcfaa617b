//! Asking the user whether a failed batch should be retried.

use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use tracing::warn;
use vigil_domain::traits::RetryPolicy;

/// Prompts on the terminal after each failed attempt
///
/// Anything other than a "y"/"yes" answer declines, as does end of input
/// or Ctrl-C.
#[derive(Default)]
pub struct InteractiveRetry {
    editor: Option<DefaultEditor>,
}

impl InteractiveRetry {
    /// Create a prompt; the line editor is opened on first use.
    pub fn new() -> Self {
        Self::default()
    }

    fn ask(&mut self, prompt: &str) -> Option<String> {
        if self.editor.is_none() {
            match DefaultEditor::new() {
                Ok(editor) => self.editor = Some(editor),
                Err(e) => {
                    warn!("Cannot open terminal for retry prompt: {}", e);
                    return None;
                }
            }
        }
        let editor = self.editor.as_mut()?;

        match editor.readline(prompt) {
            Ok(line) => Some(line),
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => None,
            Err(e) => {
                warn!("Failed to read retry answer: {}", e);
                None
            }
        }
    }
}

impl RetryPolicy for InteractiveRetry {
    fn decide_retry(&mut self, attempt: u32, max_attempts: u32, error: &str) -> bool {
        eprintln!("Attempt {}/{} failed: {}", attempt, max_attempts, error);
        self.ask("Retry this batch? (y/n): ")
            .is_some_and(|answer| is_yes(&answer))
    }
}

/// Whether an answer means "yes".
pub fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}

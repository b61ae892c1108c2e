//! ui::prompts
//!
//! Interactive prompts.
//!
//! # Design
//!
//! Prompts are only shown in interactive mode (stdin is a terminal). In
//! non-interactive mode they fail with [`PromptError::NotInteractive`] so
//! callers can skip them without blocking on input that never comes.

use std::io::{self, BufRead, Write};

use thiserror::Error;

/// Errors from prompts.
#[derive(Debug, Error)]
pub enum PromptError {
    #[error("not in interactive mode")]
    NotInteractive,

    #[error("IO error: {0}")]
    IoError(String),
}

/// Show `message` and wait for the user to press Enter.
pub fn pause(message: &str, interactive: bool) -> Result<(), PromptError> {
    if !interactive {
        return Err(PromptError::NotInteractive);
    }

    let mut stdout = io::stdout().lock();
    write!(stdout, "{message}").map_err(|e| PromptError::IoError(e.to_string()))?;
    stdout
        .flush()
        .map_err(|e| PromptError::IoError(e.to_string()))?;

    let mut line = String::new();
    io::stdin()
        .lock()
        .read_line(&mut line)
        .map_err(|e| PromptError::IoError(e.to_string()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pause_requires_interactive_mode() {
        assert!(matches!(
            pause("Press Enter to continue...", false),
            Err(PromptError::NotInteractive)
        ));
    }
}

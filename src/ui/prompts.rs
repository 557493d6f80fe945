//! ui::prompts
//!
//! Interactive confirmations.
//!
//! Prompts are only shown in interactive mode. In non-interactive mode,
//! destructive commands must be given `--yes` or fail with a clear error.

use std::io::{self, BufRead, IsTerminal, Write};

use thiserror::Error;

/// Errors from prompts.
#[derive(Debug, Error)]
pub enum PromptError {
    #[error("prompt cancelled by user")]
    Cancelled,

    #[error("not in interactive mode; pass --yes to confirm")]
    NotInteractive,

    #[error("IO error: {0}")]
    IoError(String),
}

/// Whether stdin is a terminal.
pub fn is_interactive() -> bool {
    io::stdin().is_terminal()
}

/// Prompt for confirmation (yes/no) on stdin.
///
/// An empty answer takes `default`.
pub fn confirm(message: &str, default: bool, interactive: bool) -> Result<bool, PromptError> {
    if !interactive {
        return Err(PromptError::NotInteractive);
    }
    let hint = if default { "[Y/n]" } else { "[y/N]" };
    eprint!("{} {} ", message, hint);
    io::stderr()
        .flush()
        .map_err(|e| PromptError::IoError(e.to_string()))?;

    confirm_from(io::stdin().lock(), default)
}

fn confirm_from(mut reader: impl BufRead, default: bool) -> Result<bool, PromptError> {
    let mut line = String::new();
    let read = reader
        .read_line(&mut line)
        .map_err(|e| PromptError::IoError(e.to_string()))?;
    if read == 0 {
        return Err(PromptError::Cancelled);
    }
    parse_answer(&line, default)
}

fn parse_answer(answer: &str, default: bool) -> Result<bool, PromptError> {
    match answer.trim().to_ascii_lowercase().as_str() {
        "" => Ok(default),
        "y" | "yes" => Ok(true),
        "n" | "no" => Ok(false),
        _ => Err(PromptError::Cancelled),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_interactive_fails() {
        assert!(matches!(
            confirm("Reset?", false, false),
            Err(PromptError::NotInteractive)
        ));
    }

    #[test]
    fn answers() {
        assert!(parse_answer("y\n", false).unwrap());
        assert!(parse_answer("YES", false).unwrap());
        assert!(!parse_answer("n", true).unwrap());
        assert!(parse_answer("", true).unwrap());
        assert!(!parse_answer("  \n", false).unwrap());
        assert!(matches!(parse_answer("maybe", true), Err(PromptError::Cancelled)));
    }

    #[test]
    fn eof_cancels() {
        assert!(matches!(
            confirm_from(io::Cursor::new(""), true),
            Err(PromptError::Cancelled)
        ));
        assert!(confirm_from(io::Cursor::new("yes\n"), false).unwrap());
    }
}

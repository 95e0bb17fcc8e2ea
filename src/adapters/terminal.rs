use crate::domain::ports::ConfirmDialog;
use std::io::{self, BufRead, Write};

/// Asks on stdout and reads the answer from stdin. Anything but `y`/`yes` declines.
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalDialog;

impl TerminalDialog {
    fn read_answer(message: &str) -> io::Result<String> {
        let mut stdout = io::stdout().lock();
        write!(stdout, "{} [y/N] ", message)?;
        stdout.flush()?;

        let mut line = String::new();
        io::stdin().lock().read_line(&mut line)?;
        Ok(line)
    }
}

pub(crate) fn is_affirmative(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}

impl ConfirmDialog for TerminalDialog {
    fn confirm(&self, message: &str) -> bool {
        match Self::read_answer(message) {
            Ok(answer) => is_affirmative(&answer),
            Err(e) => {
                tracing::warn!("Could not read confirmation answer: {}", e);
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_affirmative_answers() {
        assert!(is_affirmative("y\n"));
        assert!(is_affirmative("  YES "));
        assert!(!is_affirmative(""));
        assert!(!is_affirmative("n"));
        assert!(!is_affirmative("yep"));
    }
}

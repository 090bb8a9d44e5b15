use base64::{engine::general_purpose::STANDARD, Engine as _};
use console::Term;

use crate::viewer::{Clipboard, SurfaceError};

/// Most terminals drop OSC 52 payloads past roughly this size.
const MAX_OSC52_BYTES: usize = 100_000;

/// Writes to the system clipboard through the terminal (OSC 52).
pub struct Osc52Clipboard {
    term: Term,
}

impl Osc52Clipboard {
    pub fn new() -> Self {
        Self {
            term: Term::stdout(),
        }
    }
}

impl Default for Osc52Clipboard {
    fn default() -> Self {
        Self::new()
    }
}

/// The escape sequence that asks the terminal to set the clipboard.
pub(crate) fn osc52_sequence(text: &str) -> Result<String, SurfaceError> {
    let encoded = STANDARD.encode(text.as_bytes());
    if encoded.len() > MAX_OSC52_BYTES {
        return Err(SurfaceError::Unavailable(format!(
            "text too large for terminal clipboard ({} bytes encoded)",
            encoded.len()
        )));
    }
    Ok(format!("\x1b]52;c;{}\x07", encoded))
}

impl Clipboard for Osc52Clipboard {
    fn write_text(&self, text: &str) -> Result<(), SurfaceError> {
        if !self.term.is_term() {
            return Err(SurfaceError::Unavailable(
                "stdout is not a terminal".to_string(),
            ));
        }
        let sequence = osc52_sequence(text)?;
        self.term.write_str(&sequence)?;
        self.term.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_osc52_sequence() {
        assert_eq!(osc52_sequence("hi").unwrap(), "\x1b]52;c;aGk=\x07");
    }

    #[test]
    fn test_osc52_rejects_huge_payloads() {
        let text = "x".repeat(MAX_OSC52_BYTES);
        assert!(matches!(
            osc52_sequence(&text),
            Err(SurfaceError::Unavailable(_))
        ));
    }
}

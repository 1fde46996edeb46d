//! Locale-aware numeral substitution.
//!
//! Digits in user-facing text must be rendered in the reader's numeral
//! system, so any digit-bearing string is split into literal runs and
//! per-digit catalog codes before it reaches the renderer.

use crate::types::MessageDirective;

/// Splits text into directives so that embedded digits render per-locale.
pub trait NumeralLocalizer: Send + Sync {
    /// Localize `text`. Digit-free input comes back as a single literal.
    fn localize(&self, text: &str) -> Vec<MessageDirective>;
}

/// Maps each ASCII digit to the catalog code `<prefix><digit>`.
///
/// Non-digit runs are kept whole as literals, so `"*12.* "` becomes
/// `[{value:"*"}, {code:"<prefix>1"}, {code:"<prefix>2"}, {value:".* "}]`.
#[derive(Debug, Clone)]
pub struct DigitCodeLocalizer {
    code_prefix: String,
}

impl DigitCodeLocalizer {
    pub fn new(code_prefix: impl Into<String>) -> Self {
        Self {
            code_prefix: code_prefix.into(),
        }
    }

    pub fn code_prefix(&self) -> &str {
        &self.code_prefix
    }
}

impl NumeralLocalizer for DigitCodeLocalizer {
    fn localize(&self, text: &str) -> Vec<MessageDirective> {
        let mut directives = Vec::new();
        let mut run = String::new();

        for ch in text.chars() {
            if ch.is_ascii_digit() {
                if !run.is_empty() {
                    directives.push(MessageDirective::literal(std::mem::take(&mut run)));
                }
                directives.push(MessageDirective::code(format!("{}{}", self.code_prefix, ch)));
            } else {
                run.push(ch);
            }
        }

        if !run.is_empty() || directives.is_empty() {
            directives.push(MessageDirective::literal(run));
        }

        directives
    }
}

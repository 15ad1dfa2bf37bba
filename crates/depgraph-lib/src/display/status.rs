//! Status display for user feedback
//!
//! Stage reports go through the command handlers' writers; this is for the
//! lines around them (warnings, completions, hints) on stdout.

use super::styling::StyleManager;

/// Status display manager for semantic user feedback
pub struct StatusDisplay<'a> {
    styling: &'a StyleManager,
}

impl<'a> StatusDisplay<'a> {
    pub(crate) fn new(styling: &'a StyleManager) -> Self {
        Self { styling }
    }

    /// `✓ item: details`, or just `✓ item` without details
    pub fn success(&self, item: &str, details: &str) {
        println!("{}", self.styling.format_success(&join(item, details)));
    }

    /// `✗ item: details`
    pub fn error(&self, item: &str, details: &str) {
        println!("{}", self.styling.format_error(&join(item, details)));
    }

    /// `! message`
    pub fn warning(&self, message: &str) {
        println!("{}", self.styling.format_warning(message));
    }

    /// `· message`
    pub fn info(&self, message: &str) {
        println!("{}", self.styling.format_info(message));
    }

    pub fn emphasis(&self, text: &str) {
        println!("{}", self.styling.style_emphasis(text));
    }

    pub fn subtle(&self, text: &str) {
        println!("{}", self.styling.style_subtle(text));
    }

    /// Bulleted list, one item per line
    pub fn list(&self, items: &[&str]) {
        for item in items {
            println!("  {} {}", self.styling.bullet(), item);
        }
    }
}

fn join(item: &str, details: &str) -> String {
    if details.is_empty() {
        item.to_string()
    } else {
        format!("{item}: {details}")
    }
}

#[cfg(test)]
mod tests {
    include!("status.test.rs");
}

//! Semantic styling on top of `console`
//!
//! Colors are decided once, when the style manager is built, so output
//! does not depend on whatever `console` detects later.

use console::Style;

const CHECKMARK: &str = "✓";
const CROSS: &str = "✗";
const WARNING_SYMBOL: &str = "!";
const INFO_SYMBOL: &str = "·";
const BULLET: &str = "•";

/// Style manager for status output
#[derive(Debug, Clone)]
pub struct StyleManager {
    colors: bool,
}

impl StyleManager {
    pub fn new(colors: bool) -> Self {
        Self { colors }
    }

    /// Whether ANSI styling is emitted
    pub fn colors(&self) -> bool {
        self.colors
    }

    fn paint(&self, style: Style, text: &str) -> String {
        style.force_styling(self.colors).apply_to(text).to_string()
    }

    /// Style text with semantic success intent
    pub fn style_success(&self, text: &str) -> String {
        self.paint(Style::new().green(), text)
    }

    /// Style text with semantic error intent
    pub fn style_error(&self, text: &str) -> String {
        self.paint(Style::new().red(), text)
    }

    /// Style text with semantic warning intent
    pub fn style_warning(&self, text: &str) -> String {
        self.paint(Style::new().yellow(), text)
    }

    /// Style text with semantic info intent
    pub fn style_info(&self, text: &str) -> String {
        self.paint(Style::new().cyan(), text)
    }

    /// Style text with emphasis (bold)
    pub fn style_emphasis(&self, text: &str) -> String {
        self.paint(Style::new().bold(), text)
    }

    /// Style text as subtle/muted
    pub fn style_subtle(&self, text: &str) -> String {
        self.paint(Style::new().dim(), text)
    }

    pub fn format_success(&self, message: &str) -> String {
        format!("{} {}", self.style_success(CHECKMARK), message)
    }

    pub fn format_error(&self, message: &str) -> String {
        format!("{} {}", self.style_error(CROSS), message)
    }

    pub fn format_warning(&self, message: &str) -> String {
        format!("{} {}", self.style_warning(WARNING_SYMBOL), message)
    }

    pub fn format_info(&self, message: &str) -> String {
        format!("{} {}", self.style_info(INFO_SYMBOL), message)
    }

    pub fn bullet(&self) -> &'static str {
        BULLET
    }
}

#[cfg(test)]
mod tests {
    include!("styling.test.rs");
}

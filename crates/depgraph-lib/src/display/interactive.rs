//! Interactive prompts
//!
//! Thin builder over `dialoguer::Select`, themed to match the color choice.

use super::styling::StyleManager;
use anyhow::Result;
use dialoguer::{
    Select,
    theme::{ColorfulTheme, SimpleTheme, Theme},
};

/// Interactive display manager for selections
pub struct InteractiveDisplay {
    theme: Box<dyn Theme>,
}

impl InteractiveDisplay {
    pub(crate) fn new(styling: &StyleManager) -> Self {
        let theme: Box<dyn Theme> = if styling.colors() {
            Box::new(ColorfulTheme::default())
        } else {
            Box::new(SimpleTheme)
        };

        Self { theme }
    }

    /// Create a selection prompt
    pub fn select(&self, message: &str) -> SelectPrompt<'_> {
        SelectPrompt::new(message, &*self.theme)
    }
}

/// Selection prompt builder
pub struct SelectPrompt<'a> {
    select: Select<'a>,
}

impl<'a> SelectPrompt<'a> {
    fn new(message: &str, theme: &'a dyn Theme) -> Self {
        Self {
            select: Select::with_theme(theme).with_prompt(message),
        }
    }

    pub fn options(mut self, options: &[&str]) -> Self {
        for option in options {
            self.select = self.select.item(*option);
        }
        self
    }

    pub fn default(mut self, index: usize) -> Self {
        self.select = self.select.default(index);
        self
    }

    /// Selected index, or `None` when the user backs out with Esc/q
    pub fn interact_opt(self) -> Result<Option<usize>> {
        Ok(self.select.interact_opt()?)
    }
}

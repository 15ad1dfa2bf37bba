//! Terminal display system
//!
//! User-facing communication, kept apart from logging: status lines on
//! stdout and the interactive stage menu. Color and interactivity are
//! decided once at startup.

use crate::primitives::{ColorIntent, ConfigError};
use std::io::IsTerminal;
use std::sync::OnceLock;

pub mod interactive;
pub mod status;
pub mod styling;

pub use styling::StyleManager;

static GLOBAL_DISPLAY: OnceLock<Display> = OnceLock::new();

/// Main display manager that coordinates all user-facing communication
#[derive(Debug)]
pub struct Display {
    styling: StyleManager,
}

impl Display {
    /// Initialize the global display with the resolved color intent
    pub fn init(color: ColorIntent) -> Result<&'static Self, ConfigError> {
        let colors = resolve_colors(color);
        console::set_colors_enabled(colors);

        let display = Display {
            styling: StyleManager::new(colors),
        };
        GLOBAL_DISPLAY
            .set(display)
            .map_err(|_| ConfigError::AlreadyInitialized)?;

        Ok(Self::global())
    }

    /// Global display, plain styling if `init` was never called
    pub fn global() -> &'static Self {
        GLOBAL_DISPLAY.get_or_init(|| Display {
            styling: StyleManager::new(false),
        })
    }

    pub fn status() -> status::StatusDisplay<'static> {
        status::StatusDisplay::new(&Self::global().styling)
    }

    pub fn prompt() -> interactive::InteractiveDisplay {
        interactive::InteractiveDisplay::new(&Self::global().styling)
    }

    pub fn styling() -> &'static StyleManager {
        &Self::global().styling
    }

    /// A human is at the keyboard and watching stdout
    pub fn is_interactive() -> bool {
        std::io::stdin().is_terminal() && console::Term::stdout().is_term()
    }
}

/// Turn a color intent into a yes/no for this process
pub fn resolve_colors(color: ColorIntent) -> bool {
    match color {
        ColorIntent::Always => true,
        ColorIntent::Never => false,
        ColorIntent::Auto => console::colors_enabled(),
    }
}

//! Custom theme for cliclack prompts

use cliclack::ThemeState;
use console::Style;

/// draftpad's cyan-accented prompt theme. Warnings stay yellow to
/// match the status-line rendering in `output.rs`.
#[derive(Debug, Clone, Default)]
pub struct DraftpadTheme;

impl cliclack::Theme for DraftpadTheme {
    fn bar_color(&self, state: &ThemeState) -> Style {
        match state {
            ThemeState::Active => Style::new().cyan(),
            ThemeState::Error(_) => Style::new().yellow(),
            ThemeState::Cancel => Style::new().dim(),
            ThemeState::Submit => Style::new().cyan().dim(),
        }
    }

    fn state_symbol_color(&self, state: &ThemeState) -> Style {
        match state {
            ThemeState::Active => Style::new().cyan(),
            ThemeState::Error(_) => Style::new().yellow(),
            ThemeState::Cancel => Style::new().dim(),
            ThemeState::Submit => Style::new().green(),
        }
    }
}

/// Install the theme globally, once at startup
pub fn init_theme() {
    cliclack::set_theme(DraftpadTheme);
}

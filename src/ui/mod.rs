//! UI module for consistent CLI output
//!
//! Uses `cliclack` for interactive prompts with automatic fallback to
//! plain output in CI/non-interactive environments. Status signals
//! from the editor session render through `status_line`.

mod context;
mod output;
mod progress;
mod prompts;
mod theme;

pub use context::UiContext;
pub use output::{intro, key_value, outro_error, outro_success, status_line, step_info, step_ok, step_warn};
pub use progress::{TaskSpinner, WarmProgress};
pub use prompts::confirm;
pub use theme::{init_theme, DraftpadTheme};

//! UI context for detecting interactive vs CI environments

use std::io::IsTerminal;

const CI_VARS: &[&str] = &["CI", "GITHUB_ACTIONS", "GITLAB_CI", "JENKINS_URL", "BUILDKITE"];

/// UI context that determines output behavior
#[derive(Debug, Clone)]
pub struct UiContext {
    /// Whether running in an interactive terminal
    interactive: bool,
    /// Whether --yes flag was passed (auto-approve prompts)
    auto_yes: bool,
}

impl UiContext {
    /// Detect the current environment
    pub fn detect() -> Self {
        Self {
            interactive: detect_interactive(),
            auto_yes: false,
        }
    }

    /// Create a non-interactive context (for testing or explicit CI mode)
    pub fn non_interactive() -> Self {
        Self {
            interactive: false,
            auto_yes: false,
        }
    }

    /// Set auto-yes mode (bypass prompts with defaults)
    pub fn with_auto_yes(mut self, yes: bool) -> Self {
        self.auto_yes = yes;
        self
    }

    pub fn is_interactive(&self) -> bool {
        self.interactive
    }

    pub fn auto_yes(&self) -> bool {
        self.auto_yes
    }

    /// Whether spinners, progress bars, and styled prompts are usable
    pub fn use_fancy_output(&self) -> bool {
        self.interactive
    }
}

/// A terminal is interactive when both ends are TTYs and no CI
/// indicator is set. `TERM=dumb` counts as non-interactive so piped
/// and captured output stays parseable.
fn detect_interactive() -> bool {
    if !std::io::stdout().is_terminal() || !std::io::stdin().is_terminal() {
        return false;
    }

    if std::env::var("TERM").is_ok_and(|t| t == "dumb") {
        return false;
    }

    !CI_VARS.iter().any(|var| std::env::var(var).is_ok())
}

//! UI-facing save-state signals
//!
//! Ephemeral, never persisted. Each newly raised signal is emphasized
//! for a short fixed interval so the surrounding UI can flash it.

use std::fmt;
use std::time::Duration;
use tokio::time::Instant;

/// What the editor wants the user to know right now
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusSignal {
    Loaded,
    Editing,
    Saved,
    Unsaved,
    Opened,
    Downloaded,
    Cleared,
    InstallOffered,
    Installed,
    InstallDismissed,
    OpenFailed,
}

impl StatusSignal {
    /// Human-readable status message
    pub fn message(&self) -> &'static str {
        match self {
            Self::Loaded => "Document loaded",
            Self::Editing => "Editing...",
            Self::Saved => "Saved",
            Self::Unsaved => "Unsaved changes",
            Self::Opened => "File opened",
            Self::Downloaded => "Downloaded",
            Self::Cleared => "Saved copy cleared",
            Self::InstallOffered => "App can be installed",
            Self::Installed => "App installed",
            Self::InstallDismissed => "Install dismissed",
            Self::OpenFailed => "Could not open file",
        }
    }

    /// Signals that indicate something went wrong
    pub fn is_warning(&self) -> bool {
        matches!(self, Self::Unsaved | Self::OpenFailed | Self::InstallDismissed)
    }
}

impl fmt::Display for StatusSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// The current status line with its transient emphasis flag
#[derive(Debug, Default)]
pub struct StatusLine {
    signal: Option<StatusSignal>,
    raised_at: Option<Instant>,
}

impl StatusLine {
    /// How long a freshly raised signal stays emphasized
    pub const EMPHASIS_TTL: Duration = Duration::from_secs(2);

    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the current signal and restart the emphasis window
    pub fn raise(&mut self, signal: StatusSignal) {
        self.signal = Some(signal);
        self.raised_at = Some(Instant::now());
    }

    pub fn signal(&self) -> Option<StatusSignal> {
        self.signal
    }

    /// Whether the emphasis window is still open
    pub fn emphasized(&self) -> bool {
        self.raised_at
            .is_some_and(|at| at.elapsed() < Self::EMPHASIS_TTL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_are_distinct() {
        let signals = [
            StatusSignal::Loaded,
            StatusSignal::Editing,
            StatusSignal::Saved,
            StatusSignal::Unsaved,
            StatusSignal::Opened,
            StatusSignal::Downloaded,
            StatusSignal::Cleared,
            StatusSignal::InstallOffered,
            StatusSignal::Installed,
            StatusSignal::InstallDismissed,
            StatusSignal::OpenFailed,
        ];
        for (i, a) in signals.iter().enumerate() {
            for b in &signals[i + 1..] {
                assert_ne!(a.message(), b.message());
            }
        }
    }

    #[test]
    fn warning_signals() {
        assert!(StatusSignal::OpenFailed.is_warning());
        assert!(StatusSignal::Unsaved.is_warning());
        assert!(!StatusSignal::Saved.is_warning());
    }

    #[tokio::test(start_paused = true)]
    async fn emphasis_auto_clears() {
        let mut line = StatusLine::new();
        assert!(!line.emphasized());

        line.raise(StatusSignal::Saved);
        assert!(line.emphasized());
        assert_eq!(line.signal(), Some(StatusSignal::Saved));

        tokio::time::advance(StatusLine::EMPHASIS_TTL + Duration::from_millis(1)).await;
        assert!(!line.emphasized());
        // The signal itself stays until replaced
        assert_eq!(line.signal(), Some(StatusSignal::Saved));
    }

    #[tokio::test(start_paused = true)]
    async fn raising_restarts_emphasis() {
        let mut line = StatusLine::new();
        line.raise(StatusSignal::Editing);
        tokio::time::advance(StatusLine::EMPHASIS_TTL + Duration::from_millis(1)).await;
        assert!(!line.emphasized());

        line.raise(StatusSignal::Saved);
        assert!(line.emphasized());
    }
}

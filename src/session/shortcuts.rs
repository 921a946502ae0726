//! Keyboard-shortcut dispatch table
//!
//! Pure mapping, no state. Both shortcuts must suppress the
//! platform's default handling for their key combination.

/// A modifier-plus-key combination as reported by the UI
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyCombo {
    pub ctrl_or_cmd: bool,
    pub key: char,
}

impl KeyCombo {
    pub fn new(ctrl_or_cmd: bool, key: char) -> Self {
        Self { ctrl_or_cmd, key }
    }
}

/// Session operation a shortcut dispatches to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShortcutAction {
    /// Explicit non-silent save
    SaveDocument,
    /// Trigger the file-selection input
    OpenFilePicker,
}

/// A resolved shortcut binding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShortcutBinding {
    pub action: ShortcutAction,
    /// The platform's default handling must be suppressed
    pub suppress_default: bool,
}

/// Resolve a key combination; unbound combinations pass through to
/// the platform untouched.
pub fn dispatch(combo: KeyCombo) -> Option<ShortcutBinding> {
    if !combo.ctrl_or_cmd {
        return None;
    }

    let action = match combo.key.to_ascii_lowercase() {
        's' => ShortcutAction::SaveDocument,
        'o' => ShortcutAction::OpenFilePicker,
        _ => return None,
    };

    Some(ShortcutBinding {
        action,
        suppress_default: true,
    })
}

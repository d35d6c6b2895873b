//! Page-level events and the actions they map to

use serde::{Deserialize, Serialize};

/// Keyboard shortcuts available with Ctrl (or Cmd on macOS)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Shortcut {
    /// Ctrl/Cmd+E
    Export,
    /// Ctrl/Cmd+F
    ToggleFullscreen,
    /// Ctrl/Cmd+M
    LoadMap,
}

impl Shortcut {
    /// Map a `KeyboardEvent.key` plus modifier state to a shortcut
    pub fn from_key(key: &str, ctrl: bool, meta: bool) -> Option<Self> {
        if !(ctrl || meta) {
            return None;
        }
        match key {
            "e" => Some(Shortcut::Export),
            "f" => Some(Shortcut::ToggleFullscreen),
            "m" => Some(Shortcut::LoadMap),
            _ => None,
        }
    }
}

/// Severity of a transient notification
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    #[default]
    Info,
    Success,
    Danger,
}

impl NotificationKind {
    /// Alert class suffix (`alert-info`, ...)
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationKind::Info => "info",
            NotificationKind::Success => "success",
            NotificationKind::Danger => "danger",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shortcuts_need_modifier() {
        assert_eq!(Shortcut::from_key("e", false, false), None);
        assert_eq!(Shortcut::from_key("e", true, false), Some(Shortcut::Export));
        assert_eq!(
            Shortcut::from_key("f", false, true),
            Some(Shortcut::ToggleFullscreen)
        );
        assert_eq!(Shortcut::from_key("m", true, true), Some(Shortcut::LoadMap));
    }

    #[test]
    fn test_unmapped_keys() {
        assert_eq!(Shortcut::from_key("x", true, false), None);
        assert_eq!(Shortcut::from_key("E", true, false), None);
    }
}

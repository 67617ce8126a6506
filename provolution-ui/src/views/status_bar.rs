//! Status bar of command hints shown under each wizard page.

/// Command hint for the status bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyHint {
    pub key: &'static str,
    pub action: &'static str,
}

impl KeyHint {
    pub const fn new(key: &'static str, action: &'static str) -> Self {
        Self { key, action }
    }
}

/// Render hints as a single line.
pub fn render_status_bar(hints: &[KeyHint]) -> String {
    hints
        .iter()
        .map(|h| format!("{}: {}", h.key, h.action))
        .collect::<Vec<_>>()
        .join(" │ ")
}

/// Hints used by the wizard pages.
pub mod hints {
    use super::KeyHint;

    pub const NEXT: KeyHint = KeyHint::new("n", "Next");
    pub const CALCULATE: KeyHint = KeyHint::new("n", "Calculate");
    pub const BACK: KeyHint = KeyHint::new("b", "Back");
    pub const RESTART: KeyHint = KeyHint::new("r", "Restart");
    pub const SET: KeyHint = KeyHint::new("<field> <value>", "Answer");
    pub const LOGIN: KeyHint = KeyHint::new("login <email> <password>", "Sign in");
    pub const LOGOUT: KeyHint = KeyHint::new("logout", "Sign out");
    pub const HELP: KeyHint = KeyHint::new("?", "Help");
    pub const QUIT: KeyHint = KeyHint::new("q", "Quit");
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn hints_are_joined_with_separator() {
        assert_eq!(
            render_status_bar(&[hints::BACK, hints::QUIT]),
            "b: Back │ q: Quit"
        );
    }

    #[test]
    fn empty_bar_is_empty() {
        assert_eq!(render_status_bar(&[]), "");
    }
}

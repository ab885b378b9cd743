//! Classification of raw input sequences

/// DEL, sent by the backspace key
pub const BACKSPACE: &str = "\u{7f}";

/// VT forward-delete sequence
pub const FORWARD_DELETE: &str = "\u{1b}[3~";

/// What an input sequence may do to the current line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    Backspace,
    ForwardDelete,
    /// Anything else; only the line snapshot needs refreshing
    Edit,
}

impl InputKind {
    /// Match the exact byte sequence; sequences that merely contain DEL are edits
    pub fn classify(data: &str) -> Self {
        match data {
            BACKSPACE => InputKind::Backspace,
            FORWARD_DELETE => InputKind::ForwardDelete,
            _ => InputKind::Edit,
        }
    }

    pub fn is_deletion(self) -> bool {
        !matches!(self, InputKind::Edit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deletion_sequences() {
        assert_eq!(InputKind::classify("\u{7f}"), InputKind::Backspace);
        assert_eq!(InputKind::classify("\u{1b}[3~"), InputKind::ForwardDelete);
        assert!(InputKind::Backspace.is_deletion());
        assert!(InputKind::ForwardDelete.is_deletion());
    }

    #[test]
    fn everything_else_is_an_edit() {
        for data in ["a", "\r", "\u{17}", "\u{1b}\u{7f}", "\u{7f}\u{7f}", "\u{1b}[3", ""] {
            assert_eq!(InputKind::classify(data), InputKind::Edit, "{data:?}");
        }
        assert!(!InputKind::Edit.is_deletion());
    }
}

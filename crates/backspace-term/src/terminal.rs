//! The host terminal view, as seen by the effect

use backspace_core::Vec2;

/// Read access to the text shown by the host terminal.
///
/// Hosts that read a line through a selection must clear that selection
/// before returning.
pub trait TerminalView {
    /// Full text of the line at `row`; empty when the row does not exist
    fn line_text(&mut self, row: u32) -> String;

    /// Offset of the terminal's top-left corner inside the rendering surface
    fn origin(&self) -> Vec2 {
        Vec2::ZERO
    }
}

/// A terminal backed by a list of lines
#[derive(Debug, Clone, Default)]
pub struct MemoryTerminal {
    lines: Vec<String>,
    origin: Vec2,
}

impl MemoryTerminal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_origin(mut self, origin: Vec2) -> Self {
        self.origin = origin;
        self
    }

    /// Replace the text of `row`, growing the screen as needed
    pub fn set_line(&mut self, row: u32, text: impl Into<String>) {
        let row = row as usize;
        if self.lines.len() <= row {
            self.lines.resize(row + 1, String::new());
        }
        self.lines[row] = text.into();
    }

    pub fn line(&self, row: u32) -> &str {
        self.lines.get(row as usize).map_or("", String::as_str)
    }
}

impl TerminalView for MemoryTerminal {
    fn line_text(&mut self, row: u32) -> String {
        self.line(row).to_string()
    }

    fn origin(&self) -> Vec2 {
        self.origin
    }
}

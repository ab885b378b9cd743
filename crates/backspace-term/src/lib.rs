//! Backspace Term - the terminal-facing side of the effect
//!
//! - `TerminalView` - reads the current line from the host terminal
//! - `CursorState` / `CoordinateConvention` - cursor tracking across host notifications
//! - `InputKind` - which raw input sequences may delete characters
//! - `DeletionDetector` - infers deleted characters from two line snapshots
//! - `BackspaceEffect` - wires the host callbacks to the detector and the simulation

mod cursor;
mod detector;
mod effect;
mod input;
mod terminal;

pub use cursor::{CoordinateConvention, CursorFrame, CursorState};
pub use detector::{scan_deletions, Deletion, DeletionDetector, Detection};
pub use effect::{BackspaceEffect, EffectOptions, SampleAction, SAMPLE_DELAY_TICKS};
pub use input::{InputKind, BACKSPACE, FORWARD_DELETE};
pub use terminal::{MemoryTerminal, TerminalView};

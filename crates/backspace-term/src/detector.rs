//! Inferring deleted characters from two snapshots of the same line

use crate::cursor::{CoordinateConvention, CursorFrame, CursorState};
use backspace_core::EffectConfig;
use backspace_particles::{SpawnRequest, UniformSource, VelocityOverrides};
use tracing::debug;

/// A character of the previous line that has no counterpart in the current one
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Deletion {
    /// Character index in the previous line
    pub index: usize,
    pub glyph: char,
}

/// Greedy single-pass scan of `previous` against `current`.
///
/// Matching characters advance both lines; a mismatch marks the previous
/// character as deleted and advances only the previous line. This is not a
/// longest-common-subsequence diff: an insertion inside the scanned window
/// can make later characters look deleted.
pub fn scan_deletions(previous: &str, current: &str) -> Vec<Deletion> {
    let current: Vec<char> = current.chars().collect();
    let mut j = 0;
    let mut deletions = Vec::new();

    for (index, glyph) in previous.chars().enumerate() {
        if current.get(j) == Some(&glyph) {
            j += 1;
        } else {
            deletions.push(Deletion { index, glyph });
        }
    }
    deletions
}

/// Outcome of one detection pass
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Detection {
    pub requests: Vec<SpawnRequest>,
    /// The cursor changed rows since the last sample, so nothing was compared
    pub row_changed: bool,
}

/// Remembers the last sampled line and cursor, and turns the difference to
/// the next sample into spawn requests.
pub struct DeletionDetector {
    config: EffectConfig,
    line: String,
    cursor: CursorState,
}

impl DeletionDetector {
    pub fn new(config: EffectConfig) -> Self {
        Self {
            config,
            line: String::new(),
            cursor: CursorState::default(),
        }
    }

    /// The remembered line
    pub fn line(&self) -> &str {
        &self.line
    }

    pub fn cursor(&self) -> &CursorState {
        &self.cursor
    }

    /// Record a host cursor-move notification
    pub fn cursor_moved(&mut self, frame: &CursorFrame, convention: CoordinateConvention) {
        self.cursor.apply(frame, convention);
    }

    /// Cell size to place particles with before the first cursor-move notification
    pub fn seed_cell_size(&mut self, width: f32, height: f32) {
        self.cursor.seed_cell_size(width, height);
    }

    /// Take `current_line` as the new snapshot without looking for deletions
    pub fn resync(&mut self, current_line: String) {
        self.line = current_line;
        self.cursor.commit();
    }

    /// Compare the remembered line with `current_line` and emit a spawn
    /// request for every deleted character, then take `current_line` as the
    /// new snapshot.
    pub fn detect<R: UniformSource + ?Sized>(
        &mut self,
        current_line: String,
        rng: &mut R,
    ) -> Detection {
        let mut detection = Detection::default();

        if self.cursor.row_changed() {
            debug!(
                from = self.cursor.prev_row,
                to = self.cursor.row,
                "row changed, skipping deletion scan"
            );
            detection.row_changed = true;
        } else {
            let direction = self.cursor.deletion_direction();
            for deletion in scan_deletions(&self.line, &current_line) {
                let vx = rng.next_unit() * self.config.horizontal_max_velocity * direction;
                let v_angular = rng.next_unit() * self.config.angular_max_velocity;
                let request = SpawnRequest::new(
                    deletion.glyph,
                    deletion.index as f32 * self.cursor.cell_width,
                    self.cursor.y,
                )
                .with_overrides(VelocityOverrides {
                    vx: Some(vx),
                    vy: None,
                    v_angular: Some(v_angular),
                });
                detection.requests.push(request);
            }
            debug!(deleted = detection.requests.len(), "deletion scan");
        }

        self.resync(current_line);
        detection
    }
}

//! Simulate command - replays typing and deleting on an in-memory terminal
//! and drives the effect frame by frame against an ASCII surface.

use crate::ascii::AsciiSurface;
use anyhow::Result;
use backspace_core::{EffectConfig, SurfaceSize, Vec2};
use backspace_particles::{ParticleRng, TextStyle};
use backspace_runtime::EffectEvent;
use backspace_term::{
    BackspaceEffect, CoordinateConvention, CursorFrame, EffectOptions, MemoryTerminal, BACKSPACE,
    FORWARD_DELETE,
};

const FRAME_MS: f64 = 1000.0 / 60.0;
const CURSOR_LEFT: &str = "\u{1b}[D";

pub struct SimulateArgs {
    pub config: EffectConfig,
    pub text: String,
    pub backspaces: usize,
    pub forward_deletes: usize,
    pub word: bool,
    pub frames: u64,
    pub width: f32,
    pub height: f32,
    pub cell_width: f32,
    pub cell_height: f32,
    pub row: u32,
    pub key_interval: u64,
    pub lag: u64,
    pub snapshot_every: u64,
    pub seed: u32,
    pub json: bool,
}

/// Single-line editor standing in for the program running in the terminal
#[derive(Debug, Default)]
struct LineEditor {
    text: Vec<char>,
    cursor: usize,
    /// DEL removes the previous word instead of one character
    word_mode: bool,
}

impl LineEditor {
    fn apply(&mut self, data: &str) {
        match data {
            BACKSPACE if self.word_mode => self.delete_word(),
            BACKSPACE => {
                if self.cursor > 0 {
                    self.cursor -= 1;
                    self.text.remove(self.cursor);
                }
            }
            FORWARD_DELETE => {
                if self.cursor < self.text.len() {
                    self.text.remove(self.cursor);
                }
            }
            CURSOR_LEFT => self.cursor = self.cursor.saturating_sub(1),
            _ => {
                for c in data.chars() {
                    self.text.insert(self.cursor, c);
                    self.cursor += 1;
                }
            }
        }
    }

    fn delete_word(&mut self) {
        let mut start = self.cursor;
        while start > 0 && self.text[start - 1] == ' ' {
            start -= 1;
        }
        while start > 0 && self.text[start - 1] != ' ' {
            start -= 1;
        }
        self.text.drain(start..self.cursor);
        self.cursor = start;
    }

    fn line(&self) -> String {
        self.text.iter().collect()
    }
}

/// The key presses to replay, in order
fn keystrokes(args: &SimulateArgs) -> Vec<String> {
    let mut keys: Vec<String> = args.text.chars().map(String::from).collect();
    if args.forward_deletes > 0 {
        // step back so forward deletes have something to remove
        for _ in 0..args.forward_deletes {
            keys.push(CURSOR_LEFT.to_string());
        }
        for _ in 0..args.forward_deletes {
            keys.push(FORWARD_DELETE.to_string());
        }
    }
    for _ in 0..args.backspaces {
        keys.push(BACKSPACE.to_string());
    }
    keys
}

#[derive(Default)]
struct Summary {
    spawned: usize,
    activations: usize,
    frames_run: u64,
}

pub fn run(args: SimulateArgs) -> Result<()> {
    let size = SurfaceSize::new(args.width, args.height);
    let mut effect = BackspaceEffect::new(
        args.config,
        MemoryTerminal::new(),
        ParticleRng::new(args.seed),
    )
    .with_options(EffectOptions {
        convention: CoordinateConvention::AsNamed,
        cell_size: Some(Vec2::new(args.cell_width, args.cell_height)),
        ..EffectOptions::default()
    });
    let style = TextStyle {
        font_size: args.cell_height,
        ..TextStyle::default()
    };
    effect.attach_surface(
        AsciiSurface::new(size, args.cell_width, args.cell_height),
        &style,
    );

    let mut editor = LineEditor {
        word_mode: args.word,
        ..LineEditor::default()
    };
    let keys = keystrokes(&args);
    let mut next_key = 0;
    // terminal buffer updates that the host has not shown yet: (due frame, line, column)
    let mut pending: Vec<(u64, String, usize)> = Vec::new();
    let mut summary = Summary::default();
    let interval = args.key_interval.max(1);

    for frame in 0..args.frames {
        if next_key < keys.len() && frame % interval == 0 {
            let key = &keys[next_key];
            next_key += 1;
            editor.apply(key);
            pending.push((frame + args.lag, editor.line(), editor.cursor));
            effect.on_data(key);
        }

        let (due, later): (Vec<_>, Vec<_>) =
            pending.into_iter().partition(|(at, _, _)| *at <= frame);
        pending = later;
        for (_, line, col) in due {
            effect.view_mut().set_line(args.row, line);
            effect.on_cursor_move(&CursorFrame {
                x: col as f32 * args.cell_width,
                y: args.row as f32 * args.cell_height,
                row: args.row,
                col: col as u32,
                cell_width: args.cell_width,
                cell_height: args.cell_height,
            });
        }

        if effect.needs_frame() {
            effect.on_frame(frame as f64 * FRAME_MS);
            summary.frames_run += 1;
        }

        for event in effect.drain_events() {
            match &event.event {
                EffectEvent::ParticleSpawned { .. } => summary.spawned += 1,
                EffectEvent::Activated => summary.activations += 1,
                _ => {}
            }
            if args.json {
                println!("{}", serde_json::to_string(&event)?);
            }
        }

        let snapshot_due = args.snapshot_every > 0 && frame % args.snapshot_every == 0;
        if !args.json && snapshot_due && effect.is_running() {
            if let Some(surface) = effect.surface() {
                println!(
                    "frame {frame}: {} particle(s), line {:?}",
                    effect.particle_count(),
                    effect.view().line(args.row)
                );
                print!("{}", surface.render());
            }
        }

        if next_key >= keys.len() && pending.is_empty() && !effect.needs_frame() {
            break;
        }
    }

    if !args.json {
        println!("Final line: {:?}", effect.view().line(args.row));
        println!("Particles spawned: {}", summary.spawned);
        println!("Activations: {}", summary.activations);
        println!("Effect frames run: {}", summary.frames_run);
        println!("Still alive: {}", effect.particle_count());
    }

    effect.teardown();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args() -> SimulateArgs {
        SimulateArgs {
            config: EffectConfig::default(),
            text: "hello world".into(),
            backspaces: 0,
            forward_deletes: 0,
            word: false,
            frames: 100,
            width: 320.0,
            height: 160.0,
            cell_width: 8.0,
            cell_height: 16.0,
            row: 1,
            key_interval: 4,
            lag: 1,
            snapshot_every: 0,
            seed: 1,
            json: false,
        }
    }

    #[test]
    fn editor_backspace_and_forward_delete() {
        let mut editor = LineEditor::default();
        editor.apply("abc");
        editor.apply(BACKSPACE);
        assert_eq!(editor.line(), "ab");
        editor.apply(CURSOR_LEFT);
        editor.apply(FORWARD_DELETE);
        assert_eq!(editor.line(), "a");
        assert_eq!(editor.cursor, 1);
    }

    #[test]
    fn editor_word_mode_removes_previous_word() {
        let mut editor = LineEditor {
            word_mode: true,
            ..LineEditor::default()
        };
        editor.apply("git commit  ");
        editor.apply(BACKSPACE);
        assert_eq!(editor.line(), "git ");
        editor.apply(BACKSPACE);
        assert_eq!(editor.line(), "");
        editor.apply(BACKSPACE);
        assert_eq!(editor.line(), "");
    }

    #[test]
    fn keystrokes_type_then_delete() {
        let a = SimulateArgs {
            text: "ab".into(),
            backspaces: 1,
            forward_deletes: 1,
            ..args()
        };
        assert_eq!(
            keystrokes(&a),
            vec!["a", "b", CURSOR_LEFT, FORWARD_DELETE, BACKSPACE]
        );
    }

    #[test]
    fn replay_runs_to_completion() {
        let a = SimulateArgs {
            backspaces: 3,
            config: EffectConfig {
                particle_time_to_live: 20,
                ..EffectConfig::default()
            },
            frames: 500,
            ..args()
        };
        assert!(run(a).is_ok());
    }
}

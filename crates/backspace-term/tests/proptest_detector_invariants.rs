//! Property tests for the greedy deletion scan and the detector built on it.

use backspace_core::EffectConfig;
use backspace_particles::testing::ScriptedUniform;
use backspace_term::{scan_deletions, CoordinateConvention, CursorFrame, DeletionDetector};
use proptest::prelude::*;

fn line() -> impl Strategy<Value = String> {
    proptest::collection::vec(prop::char::range(' ', '~'), 0..40)
        .prop_map(|chars| chars.into_iter().collect())
}

/// A line and a copy of it with an arbitrary subset of characters removed
fn line_with_deletions() -> impl Strategy<Value = (String, String, Vec<usize>)> {
    proptest::collection::vec((prop::char::range(' ', '~'), any::<bool>()), 0..40).prop_map(
        |pairs| {
            let previous: String = pairs.iter().map(|(c, _)| *c).collect();
            let current: String = pairs.iter().filter(|(_, keep)| *keep).map(|(c, _)| *c).collect();
            let removed = pairs
                .iter()
                .enumerate()
                .filter(|(_, (_, keep))| !keep)
                .map(|(i, _)| i)
                .collect();
            (previous, current, removed)
        },
    )
}

fn detector_with(previous: &str) -> DeletionDetector {
    let mut detector = DeletionDetector::new(EffectConfig::default());
    detector.cursor_moved(
        &CursorFrame {
            x: 0.0,
            y: 10.0,
            row: 0,
            col: 0,
            cell_width: 9.0,
            cell_height: 18.0,
        },
        CoordinateConvention::AsNamed,
    );
    detector.resync(previous.to_string());
    detector
}

proptest! {
    #[test]
    fn identical_lines_never_delete(text in line()) {
        prop_assert!(scan_deletions(&text, &text).is_empty());
    }

    #[test]
    fn deletions_are_bounded_and_ordered(previous in line(), current in line()) {
        let deletions = scan_deletions(&previous, &current);
        let prev_chars: Vec<char> = previous.chars().collect();
        prop_assert!(deletions.len() <= prev_chars.len());
        for pair in deletions.windows(2) {
            prop_assert!(pair[0].index < pair[1].index);
        }
        for d in &deletions {
            prop_assert_eq!(prev_chars[d.index], d.glyph);
        }
    }

    #[test]
    fn kept_characters_form_the_matched_prefix(previous in line(), current in line()) {
        // Characters not reported as deleted are exactly the ones the scan
        // matched, so they are a prefix of the current line.
        let deletions = scan_deletions(&previous, &current);
        let kept: String = previous
            .chars()
            .enumerate()
            .filter(|(i, _)| !deletions.iter().any(|d| d.index == *i))
            .map(|(_, c)| c)
            .collect();
        prop_assert!(current.starts_with(&kept));
    }

    #[test]
    fn pure_deletions_report_removed_count((previous, current, removed) in line_with_deletions()) {
        // Greedy matching may pick a different but equal character, never a different count
        let deletions = scan_deletions(&previous, &current);
        prop_assert_eq!(deletions.len(), removed.len());
    }

    #[test]
    fn detector_always_adopts_current_line(previous in line(), current in line()) {
        let mut detector = detector_with(&previous);
        let mut rng = ScriptedUniform::constant(0.5);
        let detection = detector.detect(current.clone(), &mut rng);
        prop_assert_eq!(detector.line(), current.as_str());
        prop_assert!(!detection.row_changed);
        for request in &detection.requests {
            prop_assert!(request.position.x % 9.0 == 0.0);
            prop_assert_eq!(request.position.y, 10.0);
        }
    }
}

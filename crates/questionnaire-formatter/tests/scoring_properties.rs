//! Property-based tests for score maintenance and reversal.

use proptest::prelude::*;
use questionnaire_formatter::scoring::{
    assign_scores, emit_answers, parse_scored, strip_scores, AssignOptions, NumberingScheme,
};

/// Visible answer text: starts with a letter and never contains braces.
fn answer_strategy() -> impl Strategy<Value = String> {
    "[A-Za-z][A-Za-z0-9 ,.'-]{0,20}".prop_map(|text| text.trim_end().to_string())
}

fn scale_strategy() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(answer_strategy(), 1..8)
}

/// Lines as users paste them: indented, blank, or already carrying tags.
fn raw_line_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(String::new()),
        "[ \t]{1,3}",
        "[ \t]{0,3}[A-Za-z][A-Za-z0-9 ,.'-]{0,20}",
        "[ \t]{0,2}\\{score *= *-?[0-9]{1,2}\\}[ \t]{0,3}[A-Za-z][A-Za-z0-9 ,.'-]{0,12}",
        "\\{score=[0-9]\\} ?\\{score=[0-9]\\}[ \t]{0,2}[a-z]{1,8}",
    ]
}

fn raw_scale_strategy() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(raw_line_strategy(), 1..8)
}

fn scheme_strategy() -> impl Strategy<Value = NumberingScheme> {
    prop_oneof![
        Just(NumberingScheme::Incremental),
        Just(NumberingScheme::Decremental),
        Just(NumberingScheme::Fixed),
    ]
}

fn scores_of(scale: &str) -> Vec<i64> {
    scale
        .lines()
        .map(|line| parse_scored(line).expect("every line tagged").score)
        .collect()
}

proptest! {
    #[test]
    fn strip_after_assign_equals_strip(
        lines in raw_scale_strategy(),
        scheme in scheme_strategy(),
        start in -50i64..50,
    ) {
        let text = lines.join("\n");
        let options = AssignOptions { scheme, start, preserve_existing: false };
        prop_assert_eq!(strip_scores(&assign_scores(&text, &options)), strip_scores(&text));
    }

    #[test]
    fn strip_is_idempotent(lines in raw_scale_strategy(), start in 0i64..5) {
        let raw = lines.join("\n");
        let once = strip_scores(&raw);
        prop_assert_eq!(strip_scores(&once), once.clone());

        let text = assign_scores(&raw, &AssignOptions { start, ..AssignOptions::default() });
        let once = strip_scores(&text);
        prop_assert_eq!(strip_scores(&once), once);
    }

    #[test]
    fn schemes_number_untagged_lines(lines in scale_strategy(), fixed in -9i64..9) {
        let text = lines.join("\n");
        let count = lines.len() as i64;

        let incremental = assign_scores(&text, &AssignOptions::default());
        prop_assert_eq!(scores_of(&incremental), (1..=count).collect::<Vec<_>>());

        let decremental = AssignOptions {
            scheme: NumberingScheme::Decremental,
            ..AssignOptions::default()
        };
        prop_assert_eq!(
            scores_of(&assign_scores(&text, &decremental)),
            (1..=count).rev().collect::<Vec<_>>()
        );

        let fixed_options = AssignOptions {
            scheme: NumberingScheme::Fixed,
            start: fixed,
            preserve_existing: false,
        };
        prop_assert_eq!(
            scores_of(&assign_scores(&text, &fixed_options)),
            vec![fixed; lines.len()]
        );
    }

    #[test]
    fn round_trip_restores_unannotated_text(lines in raw_scale_strategy()) {
        let text = lines.join("\n");
        let stripped = strip_scores(&text);
        let restored = strip_scores(&assign_scores(&stripped, &AssignOptions::default()));
        prop_assert_eq!(restored, stripped);
    }

    #[test]
    fn reversal_is_a_position_preserving_permutation(
        lines in scale_strategy(),
        scores in prop::collection::vec(-20i64..20, 8),
    ) {
        let scale: Vec<String> = lines
            .iter()
            .zip(&scores)
            .map(|(text, score)| format!("{{score={score}}} {text}"))
            .collect();

        let forward = emit_answers(&scale, false);
        let reversed = emit_answers(&scale, true);

        let forward_lines: Vec<&str> = forward.lines().collect();
        let reversed_lines: Vec<&str> = reversed.lines().collect();
        prop_assert_eq!(forward_lines.len(), reversed_lines.len());

        let parse = |line: &str| {
            parse_scored(line.trim_start_matches("- "))
                .map(|scored| (scored.score, scored.answer.to_string()))
        };
        let forward_parsed: Vec<_> = forward_lines.iter().copied().filter_map(parse).collect();
        let reversed_parsed: Vec<_> = reversed_lines.iter().copied().filter_map(parse).collect();

        let forward_text: Vec<_> = forward_parsed.iter().map(|(_, text)| text.clone()).collect();
        let reversed_text: Vec<_> = reversed_parsed.iter().map(|(_, text)| text.clone()).collect();
        prop_assert_eq!(forward_text, reversed_text);

        let mut forward_scores: Vec<i64> = forward_parsed.iter().map(|(score, _)| *score).collect();
        let reversed_scores: Vec<i64> = reversed_parsed.iter().map(|(score, _)| *score).collect();
        forward_scores.reverse();
        prop_assert_eq!(forward_scores, reversed_scores);
    }
}

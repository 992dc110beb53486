use super::annotation::{parse_scored, render_tag, ScoredLine};
use crate::lines::is_blank;
use std::fmt::Write;

/// Renders the `- ` answer lines of one block followed by a blank separator.
///
/// With `reversed` set, annotated lines keep their position and visible text
/// but take their scores from the annotated sequence read back to front.
/// Unannotated lines are always copied verbatim.
pub fn emit_answers<S: AsRef<str>>(scale: &[S], reversed: bool) -> String {
    let mut output = String::new();

    if !is_blank(scale) {
        let parsed: Vec<(&str, Option<ScoredLine<'_>>)> = scale
            .iter()
            .map(|line| {
                let line = line.as_ref();
                (line, parse_scored(line))
            })
            .collect();

        let pool = if reversed {
            reversed_scores(&parsed)
        } else {
            Vec::new()
        };
        let mut pool = pool.into_iter();

        for (line, scored) in parsed {
            match scored {
                Some(ScoredLine { answer, .. }) if reversed => {
                    // Pool length equals the annotated line count.
                    let score = pool.next().unwrap_or_default();
                    let _ = writeln!(output, "- {} {answer}", render_tag(score));
                }
                _ => {
                    let _ = writeln!(output, "- {line}");
                }
            }
        }
    }

    output.push('\n');
    output
}

/// Scores in annotation order, reversed.
fn reversed_scores(parsed: &[(&str, Option<ScoredLine<'_>>)]) -> Vec<i64> {
    let mut scores: Vec<i64> = parsed
        .iter()
        .filter_map(|(_, scored)| scored.map(|line| line.score))
        .collect();
    scores.reverse();
    scores
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCALE: [&str; 3] = ["{score=1} Never", "{score=2} Sometimes", "{score=3} Always"];

    #[test]
    fn forward_scale_is_copied_verbatim() {
        assert_eq!(
            emit_answers(&SCALE, false),
            "- {score=1} Never\n- {score=2} Sometimes\n- {score=3} Always\n\n"
        );
    }

    #[test]
    fn reversal_swaps_scores_but_keeps_text_order() {
        assert_eq!(
            emit_answers(&SCALE, true),
            "- {score=3} Never\n- {score=2} Sometimes\n- {score=1} Always\n\n"
        );
    }

    #[test]
    fn reversal_skips_unannotated_lines() {
        let scale = ["{score=1} No", "Don't know", "{score=5}Yes"];
        assert_eq!(
            emit_answers(&scale, true),
            "- {score=5} No\n- Don't know\n- {score=1} Yes\n\n"
        );
    }

    #[test]
    fn duplicate_and_gapped_scores_are_permitted() {
        let scale = ["{score=4} a", "{score=4} b", "{score=10} c"];
        assert_eq!(
            emit_answers(&scale, true),
            "- {score=10} a\n- {score=4} b\n- {score=4} c\n\n"
        );
    }

    #[test]
    fn empty_scale_yields_only_the_separator() {
        assert_eq!(emit_answers(&[""], false), "\n");
        assert_eq!(emit_answers::<&str>(&[], true), "\n");
    }

    #[test]
    fn plain_scale_is_unaffected_by_reversal() {
        let scale = ["Yes", "No"];
        assert_eq!(emit_answers(&scale, true), emit_answers(&scale, false));
    }
}

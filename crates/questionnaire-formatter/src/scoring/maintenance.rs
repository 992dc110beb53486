use super::annotation::{has_tag, render_tag, strip_tag};
use crate::lines::{is_blank, split_lines};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::debug;

/// Rule for numbering untagged scale lines.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NumberingScheme {
    /// `start`, `start + 1`, ... from the top.
    #[default]
    Incremental,
    /// Counts down so the last assigned line receives `start`.
    Decremental,
    /// Every assigned line receives `start`.
    Fixed,
}

impl NumberingScheme {
    pub const fn ordered() -> [Self; 3] {
        [Self::Incremental, Self::Decremental, Self::Fixed]
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Incremental => "incremental",
            Self::Decremental => "decremental",
            Self::Fixed => "fixed",
        }
    }
}

impl fmt::Display for NumberingScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NumberingScheme {
    type Err = ScoringError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_ascii_lowercase();
        Self::ordered()
            .into_iter()
            .find(|scheme| scheme.as_str() == normalized)
            .ok_or_else(|| ScoringError::UnknownScheme(value.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ScoringError {
    #[error("default score '{0}' is not an integer")]
    InvalidStart(String),
    #[error("unknown scoring scheme '{0}' (expected incremental, decremental or fixed)")]
    UnknownScheme(String),
}

/// Parameters of the "add scores" operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignOptions {
    pub scheme: NumberingScheme,
    pub start: i64,
    pub preserve_existing: bool,
}

impl Default for AssignOptions {
    fn default() -> Self {
        Self {
            scheme: NumberingScheme::Incremental,
            start: 1,
            preserve_existing: false,
        }
    }
}

impl AssignOptions {
    /// Builds options from free-text fields; the start value must be an integer.
    pub fn parse(scheme: &str, start: &str, preserve_existing: bool) -> Result<Self, ScoringError> {
        let scheme = scheme.parse()?;
        let start = parse_start(start)?;
        Ok(Self {
            scheme,
            start,
            preserve_existing,
        })
    }
}

pub fn parse_start(raw: &str) -> Result<i64, ScoringError> {
    raw.trim()
        .parse()
        .map_err(|_| ScoringError::InvalidStart(raw.to_string()))
}

/// Removes the leading score tag from every line of `scale`. Idempotent.
pub fn strip_scores(scale: &str) -> String {
    let stripped: Vec<&str> = split_lines(scale).into_iter().map(strip_tag).collect();
    stripped.join("\n").trim().to_string()
}

/// Tags every untagged line of `scale` according to `options`.
///
/// Without `preserve_existing` all tags are stripped first. Lines that keep a
/// tag are skipped by the counter, so the sequence only runs over new tags.
pub fn assign_scores(scale: &str, options: &AssignOptions) -> String {
    let source = if options.preserve_existing {
        scale.trim().to_string()
    } else {
        strip_scores(scale)
    };

    let lines = split_lines(&source);
    if is_blank(&lines) {
        return String::new();
    }

    let untagged = lines.iter().filter(|line| !has_tag(line)).count();
    let mut counter = ScoreCounter::new(options.scheme, options.start, untagged);
    debug!(
        scheme = %options.scheme,
        start = options.start,
        lines = lines.len(),
        untagged,
        "assigning scale scores"
    );

    let assigned: Vec<String> = lines
        .into_iter()
        .map(|line| {
            if has_tag(line) {
                line.to_string()
            } else {
                format!("{} {line}", render_tag(counter.next_score()))
            }
        })
        .collect();

    assigned.join("\n").trim_end().to_string()
}

struct ScoreCounter {
    scheme: NumberingScheme,
    start: i64,
    current: i64,
}

impl ScoreCounter {
    fn new(scheme: NumberingScheme, start: i64, assigned: usize) -> Self {
        let assigned = i64::try_from(assigned).unwrap_or(i64::MAX);
        let current = match scheme {
            NumberingScheme::Incremental => start.saturating_sub(1),
            NumberingScheme::Decremental => start.saturating_add(assigned),
            NumberingScheme::Fixed => start,
        };
        Self {
            scheme,
            start,
            current,
        }
    }

    fn next_score(&mut self) -> i64 {
        match self.scheme {
            NumberingScheme::Incremental => self.current = self.current.saturating_add(1),
            NumberingScheme::Decremental => self.current = self.current.saturating_sub(1),
            NumberingScheme::Fixed => self.current = self.start,
        }
        self.current
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options(scheme: NumberingScheme, start: i64, preserve_existing: bool) -> AssignOptions {
        AssignOptions {
            scheme,
            start,
            preserve_existing,
        }
    }

    #[test]
    fn incremental_numbers_from_start() {
        assert_eq!(
            assign_scores("Never\nSometimes\nAlways", &AssignOptions::default()),
            "{score=1} Never\n{score=2} Sometimes\n{score=3} Always"
        );
    }

    #[test]
    fn decremental_ends_on_start() {
        assert_eq!(
            assign_scores(
                "Never\nSometimes\nAlways",
                &options(NumberingScheme::Decremental, 1, false)
            ),
            "{score=3} Never\n{score=2} Sometimes\n{score=1} Always"
        );
        assert_eq!(
            assign_scores("a\nb", &options(NumberingScheme::Decremental, -1, false)),
            "{score=0} a\n{score=-1} b"
        );
    }

    #[test]
    fn fixed_repeats_start() {
        assert_eq!(
            assign_scores("a\nb\nc", &options(NumberingScheme::Fixed, 7, false)),
            "{score=7} a\n{score=7} b\n{score=7} c"
        );
    }

    #[test]
    fn preserved_tags_are_frozen_and_not_counted() {
        assert_eq!(
            assign_scores(
                "{score=5} Often\nRarely",
                &options(NumberingScheme::Incremental, 1, true)
            ),
            "{score=5} Often\n{score=1} Rarely"
        );
        assert_eq!(
            assign_scores(
                "a\n{score = 9} b\nc",
                &options(NumberingScheme::Decremental, 1, true)
            ),
            "{score=2} a\n{score = 9} b\n{score=1} c"
        );
    }

    #[test]
    fn without_preserve_existing_tags_are_replaced() {
        assert_eq!(
            assign_scores(
                "{score=5} Often\nRarely",
                &options(NumberingScheme::Incremental, 1, false)
            ),
            "{score=1} Often\n{score=2} Rarely"
        );
    }

    #[test]
    fn malformed_tags_are_ordinary_text() {
        assert_eq!(
            assign_scores("{score=x} a", &AssignOptions::default()),
            "{score=1} {score=x} a"
        );
        assert_eq!(strip_scores("{points=2} a"), "{points=2} a");
    }

    #[test]
    fn strip_removes_tags_and_trims_block() {
        assert_eq!(
            strip_scores("  {score=1} a\n{score = 2}   b\nc\n\n"),
            "a\n  b\nc"
        );
        let once = strip_scores("{score=1} a\n{score=2} b");
        assert_eq!(strip_scores(&once), once);
    }

    #[test]
    fn indented_lines_survive_assign_then_strip() {
        let text = "Never\n  Sometimes\n\tAlways";
        let assigned = assign_scores(text, &AssignOptions::default());
        assert_eq!(
            assigned,
            "{score=1} Never\n{score=2}   Sometimes\n{score=3} \tAlways"
        );
        assert_eq!(strip_scores(&assigned), text);
        assert_eq!(strip_scores(&assigned), strip_scores(text));
    }

    #[test]
    fn empty_scale_assigns_nothing() {
        assert_eq!(assign_scores("  \n", &AssignOptions::default()), "");
        assert_eq!(strip_scores(""), "");
    }

    #[test]
    fn parse_rejects_non_integer_start() {
        assert_eq!(
            AssignOptions::parse("incremental", "one", false),
            Err(ScoringError::InvalidStart("one".to_string()))
        );
        assert_eq!(
            AssignOptions::parse("Decremental", " 3 ", true),
            Ok(options(NumberingScheme::Decremental, 3, true))
        );
        assert!(matches!(
            AssignOptions::parse("random", "1", false),
            Err(ScoringError::UnknownScheme(_))
        ));
    }
}

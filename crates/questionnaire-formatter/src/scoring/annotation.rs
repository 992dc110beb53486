use regex::Regex;
use std::sync::OnceLock;

static SCORED_LINE: OnceLock<Regex> = OnceLock::new();
static LEADING_TAG: OnceLock<Regex> = OnceLock::new();

/// Strict form used when emitting answers: `{score=<int>}` at the very start.
fn scored_line() -> &'static Regex {
    SCORED_LINE.get_or_init(|| {
        Regex::new(r"^\{score=(-?\d+)\}\s*(.*)$").expect("score annotation pattern compiles")
    })
}

/// Lenient form used by score maintenance: blanks before a tag, spaces around
/// `=` and stacked tags. Only the single separator space after the last tag is
/// consumed, so the line's own indentation survives.
fn leading_tag() -> &'static Regex {
    LEADING_TAG.get_or_init(|| {
        Regex::new(r"^(?:\s*\{score *= *-?\d+\} ?)+").expect("score tag pattern compiles")
    })
}

/// An answer line carrying a score annotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoredLine<'a> {
    pub score: i64,
    pub answer: &'a str,
}

/// Parses `{score=<int>} answer`. Anything else, including integers that do
/// not fit an `i64`, is plain answer text.
pub fn parse_scored(line: &str) -> Option<ScoredLine<'_>> {
    let captures = scored_line().captures(line)?;
    let score = captures.get(1)?.as_str().parse().ok()?;
    let answer = captures.get(2).map_or("", |answer| answer.as_str());
    Some(ScoredLine { score, answer })
}

pub fn render_tag(score: i64) -> String {
    format!("{{score={score}}}")
}

pub(crate) fn has_tag(line: &str) -> bool {
    leading_tag().is_match(line)
}

pub(crate) fn strip_tag(line: &str) -> &str {
    match leading_tag().find(line) {
        Some(tag) => &line[tag.end()..],
        None => line,
    }
}

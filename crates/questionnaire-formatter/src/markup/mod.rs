//! Block formatter turning raw item lines into survey markup blocks.

pub mod domain;
mod options;

pub use domain::{
    ItemLine, MarkupOption, OptionSet, QuestionType, StructuralSentinel, TypeGroup,
    UnknownQuestionType, REVERSAL_MARKER,
};
pub use options::emit_options;

use crate::lines::split_lines;
use crate::scoring::emit_answers;
use serde::{Deserialize, Serialize};
use std::fmt::Write;
use tracing::{debug, trace};

/// Everything besides the item lines that shapes a block.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BlockSettings {
    /// Label stem; blocks are named `<label>_<n>`.
    pub label: String,
    pub question_type: QuestionType,
    /// Non-standard continue button text, omitted when blank.
    pub button: String,
    pub options: OptionSet,
}

/// Formatter output together with what it contains.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormattedQuestionnaire {
    pub output: String,
    pub blocks: usize,
    pub reversed_items: usize,
}

/// Formats `items` into one block each, sharing `scale` as the answer list.
pub fn format_items<S, T>(items: &[S], scale: &[T], settings: &BlockSettings) -> String
where
    S: AsRef<str>,
    T: AsRef<str>,
{
    format_questionnaire(items, scale, settings).output
}

/// Same as [`format_items`] on raw multi-line text.
pub fn format_text(items: &str, scale: &str, settings: &BlockSettings) -> FormattedQuestionnaire {
    format_questionnaire(&split_lines(items), &split_lines(scale), settings)
}

pub fn format_questionnaire<S, T>(
    items: &[S],
    scale: &[T],
    settings: &BlockSettings,
) -> FormattedQuestionnaire
where
    S: AsRef<str>,
    T: AsRef<str>,
{
    let label = settings.label.trim();
    let button = settings.button.trim();
    let question_type = settings.question_type;

    options::warn_hidden_options(question_type, &settings.options);
    let option_lines = emit_options(question_type, &settings.options);

    // Answers only depend on the reversal flag, so render both variants once.
    let mut forward: Option<String> = None;
    let mut reversed: Option<String> = None;

    let mut output = String::new();
    let mut count = 1usize;
    let mut reversed_items = 0usize;

    for raw in items {
        let raw = raw.as_ref();
        if let Some(sentinel) = StructuralSentinel::parse(raw) {
            trace!(sentinel = sentinel.as_str(), "passing sentinel through");
            let _ = write!(output, "{}\n\n", sentinel.as_str());
            continue;
        }

        let _ = write!(output, "l: {label}_{count}\nt: {question_type}\n");
        if !button.is_empty() {
            let _ = writeln!(output, "b: {button}");
        }

        let item = ItemLine::parse(raw);
        output.push_str(&option_lines);
        let _ = writeln!(output, "q: {}", item.text);

        let answers = if item.reversed {
            reversed_items += 1;
            reversed.get_or_insert_with(|| emit_answers(scale, true))
        } else {
            forward.get_or_insert_with(|| emit_answers(scale, false))
        };
        output.push_str(answers);
        count += 1;
    }

    let blocks = count - 1;
    debug!(
        items = items.len(),
        blocks, reversed_items, "formatted questionnaire"
    );

    FormattedQuestionnaire {
        output: output.trim().to_string(),
        blocks,
        reversed_items,
    }
}

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Marker appended to an item line to reverse the scoring of that item only.
pub const REVERSAL_MARKER: char = '*';

/// Question types understood by the survey scripting tool.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionType {
    #[default]
    Radio,
    Drop,
    Check,
    Rank,
    Info,
}

impl QuestionType {
    pub const fn ordered() -> [Self; 5] {
        [Self::Radio, Self::Drop, Self::Check, Self::Rank, Self::Info]
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Radio => "radio",
            Self::Drop => "drop",
            Self::Check => "check",
            Self::Rank => "rank",
            Self::Info => "info",
        }
    }

    pub const fn group(self) -> TypeGroup {
        match self {
            Self::Radio | Self::Drop => TypeGroup::SelectableFree,
            Self::Check => TypeGroup::SelectableRequired,
            Self::Rank => TypeGroup::Rank,
            Self::Info => TypeGroup::Info,
        }
    }
}

impl fmt::Display for QuestionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown question type '{0}' (expected one of radio, drop, check, rank, info)")]
pub struct UnknownQuestionType(pub String);

impl FromStr for QuestionType {
    type Err = UnknownQuestionType;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_ascii_lowercase();
        Self::ordered()
            .into_iter()
            .find(|kind| kind.as_str() == normalized)
            .ok_or_else(|| UnknownQuestionType(value.to_string()))
    }
}

/// Capability group gating which options apply to a question type.
///
/// Every [`QuestionType`] belongs to exactly one group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeGroup {
    /// Single choice types that can opt out of requiring an answer.
    SelectableFree,
    /// Multiple choice types that can demand a number of selections.
    SelectableRequired,
    Rank,
    /// Text-only screens that may end the questionnaire.
    Info,
}

impl TypeGroup {
    pub const fn label(self) -> &'static str {
        match self {
            Self::SelectableFree => "selectable (free)",
            Self::SelectableRequired => "selectable (required)",
            Self::Rank => "rank",
            Self::Info => "info",
        }
    }

    /// Options an editor should offer for this group.
    ///
    /// Purely advisory: the options emitter only gates `end`, `free` and
    /// `requie` on the group, every other flag is emitted whenever it is set.
    pub fn visible_options(self) -> &'static [MarkupOption] {
        use MarkupOption::*;
        match self {
            Self::SelectableFree => &[Random, Link, Free, Anonymous, QuestionFirst],
            Self::SelectableRequired => &[Random, Link, Require, Anonymous, QuestionFirst],
            Self::Rank => &[Random, Link, Numbers, Anonymous, QuestionFirst],
            Self::Info => &[End, Link, QuestionFirst],
        }
    }

    pub fn allows(self, option: MarkupOption) -> bool {
        self.visible_options().contains(&option)
    }
}

/// Block options in the order they are emitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarkupOption {
    Random,
    Link,
    End,
    Free,
    Require,
    Anonymous,
    QuestionFirst,
    Numbers,
}

impl MarkupOption {
    pub const fn ordered() -> [Self; 8] {
        [
            Self::Random,
            Self::Link,
            Self::End,
            Self::Free,
            Self::Require,
            Self::Anonymous,
            Self::QuestionFirst,
            Self::Numbers,
        ]
    }

    /// Keyword written after `o: `. `requie` is the spelling the survey tool expects.
    pub const fn keyword(self) -> &'static str {
        match self {
            Self::Random => "random",
            Self::Link => "link",
            Self::End => "end",
            Self::Free => "free",
            Self::Require => "requie",
            Self::Anonymous => "sep",
            Self::QuestionFirst => "qf",
            Self::Numbers => "numbers",
        }
    }

    pub const fn description(self) -> &'static str {
        match self {
            Self::Random => "Show items in a random order",
            Self::Link => "Link to previous question (typically not necessary)",
            Self::End => "End questionnaire after this question",
            Self::Free => "Do not require participant to select any item",
            Self::Require => "Require participant to select any item",
            Self::Anonymous => "Save data anonymously",
            Self::QuestionFirst => "Show question text above image/video (if any)",
            Self::Numbers => "Show numbers in front of items",
        }
    }

    /// Group gate applied by the emitter itself, `None` when the option is ungated.
    pub const fn required_group(self) -> Option<TypeGroup> {
        match self {
            Self::End => Some(TypeGroup::Info),
            Self::Free => Some(TypeGroup::SelectableFree),
            Self::Require => Some(TypeGroup::SelectableRequired),
            _ => None,
        }
    }
}

/// Snapshot of the option flags chosen for a formatting run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OptionSet {
    pub random: bool,
    pub link: bool,
    pub end: bool,
    pub free: bool,
    pub require: bool,
    pub anonymous: bool,
    pub question_first: bool,
    pub numbers: bool,
    pub min_required: String,
    pub max_required: String,
}

impl OptionSet {
    pub fn is_set(&self, option: MarkupOption) -> bool {
        match option {
            MarkupOption::Random => self.random,
            MarkupOption::Link => self.link,
            MarkupOption::End => self.end,
            MarkupOption::Free => self.free,
            MarkupOption::Require => self.require,
            MarkupOption::Anonymous => self.anonymous,
            MarkupOption::QuestionFirst => self.question_first,
            MarkupOption::Numbers => self.numbers,
        }
    }

    pub fn enabled(&self) -> impl Iterator<Item = MarkupOption> + '_ {
        MarkupOption::ordered()
            .into_iter()
            .filter(move |option| self.is_set(*option))
    }

    /// Trimmed `(min, max)` bounds for `o: requie`, reported only when
    /// `require` is set on a type that offers it.
    ///
    /// A maximum is only reported together with a minimum.
    pub fn requirement_bounds(&self, question_type: QuestionType) -> Option<(&str, Option<&str>)> {
        if !self.require || !question_type.group().allows(MarkupOption::Require) {
            return None;
        }

        let min = self.min_required.trim();
        if min.is_empty() {
            return None;
        }

        let max = self.max_required.trim();
        Some((min, (!max.is_empty()).then_some(max)))
    }
}

/// Literal control lines that pass through the formatter untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StructuralSentinel {
    Separator,
    PageBegin,
    PageEnd,
}

impl StructuralSentinel {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Separator => "----",
            Self::PageBegin => "page: begin",
            Self::PageEnd => "page: end",
        }
    }

    pub fn parse(line: &str) -> Option<Self> {
        [Self::Separator, Self::PageBegin, Self::PageEnd]
            .into_iter()
            .find(|sentinel| sentinel.as_str() == line)
    }
}

/// One questionnaire prompt with its reversal marker resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ItemLine<'a> {
    pub text: &'a str,
    pub reversed: bool,
}

impl<'a> ItemLine<'a> {
    pub fn parse(line: &'a str) -> Self {
        match line.strip_suffix(REVERSAL_MARKER) {
            Some(text) => Self {
                text,
                reversed: true,
            },
            None => Self {
                text: line,
                reversed: false,
            },
        }
    }
}

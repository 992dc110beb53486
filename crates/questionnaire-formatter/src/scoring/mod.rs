//! Score annotations on scale lines: the reversal-aware answer emitter and
//! the add/remove maintenance operations.

mod annotation;
mod answers;
mod maintenance;

pub use annotation::{parse_scored, render_tag, ScoredLine};
pub use answers::emit_answers;
pub use maintenance::{
    assign_scores, parse_start, strip_scores, AssignOptions, NumberingScheme, ScoringError,
};

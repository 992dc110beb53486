use super::domain::{MarkupOption, OptionSet, QuestionType};
use std::fmt::Write;
use tracing::warn;

/// Renders the `o: ` lines for one block, in fixed emission order.
///
/// `end`, `free` and `requie` are dropped silently when the question type is
/// outside their group. Requirement bounds are copied verbatim, never parsed.
pub fn emit_options(question_type: QuestionType, options: &OptionSet) -> String {
    let group = question_type.group();
    let mut output = String::new();

    for option in options.enabled() {
        if let Some(required) = option.required_group() {
            if required != group {
                continue;
            }
        }

        let _ = write!(output, "o: {}", option.keyword());
        if option == MarkupOption::Require {
            if let Some((min, max)) = options.requirement_bounds(question_type) {
                let _ = write!(output, " {min}");
                if let Some(max) = max {
                    let _ = write!(output, " {max}");
                }
            }
        }
        output.push('\n');
    }

    output
}

/// Logs the options that an editor would not offer for `question_type`.
///
/// Emission is unaffected; this only surfaces likely caller mistakes.
pub(crate) fn warn_hidden_options(question_type: QuestionType, options: &OptionSet) {
    let group = question_type.group();
    for option in options.enabled().filter(|option| !group.allows(*option)) {
        warn!(
            question_type = %question_type,
            option = option.keyword(),
            "option is not offered for this question type"
        );
    }

    let max_only =
        options.min_required.trim().is_empty() && !options.max_required.trim().is_empty();
    if options.require && max_only {
        warn!("maximum selection bound ignored because no minimum was given");
    }
}

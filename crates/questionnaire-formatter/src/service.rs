use crate::config::FormatterDefaults;
use crate::markup::{
    format_text, BlockSettings, FormattedQuestionnaire, MarkupOption, OptionSet, QuestionType,
    TypeGroup,
};
use crate::lines::split_lines;
use crate::scoring::{
    assign_scores, emit_answers, parse_start, strip_scores, AssignOptions, ScoringError,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Raw editor contents for one formatting run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormatRequest {
    pub items: String,
    #[serde(default)]
    pub scale: String,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub question_type: Option<QuestionType>,
    #[serde(default)]
    pub button: String,
    #[serde(default)]
    pub options: OptionSet,
}

/// Scale text plus the "add scores" dialog fields; missing fields fall back
/// to the configured defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreRequest {
    pub scale: String,
    #[serde(default)]
    pub scheme: Option<String>,
    #[serde(default)]
    pub start: Option<String>,
    #[serde(default)]
    pub preserve_existing: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OptionView {
    pub option: MarkupOption,
    pub keyword: &'static str,
    pub description: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuestionTypeView {
    pub name: QuestionType,
    pub group: TypeGroup,
    pub group_label: &'static str,
    pub options: Vec<OptionView>,
}

/// Stateless facade applying configured defaults before calling the engine.
#[derive(Debug, Clone, Default)]
pub struct FormatterService {
    defaults: FormatterDefaults,
}

impl FormatterService {
    pub fn new(defaults: FormatterDefaults) -> Self {
        Self { defaults }
    }

    pub fn defaults(&self) -> &FormatterDefaults {
        &self.defaults
    }

    pub fn format(&self, request: &FormatRequest) -> FormattedQuestionnaire {
        let settings = BlockSettings {
            label: request.label.clone(),
            question_type: request
                .question_type
                .unwrap_or(self.defaults.question_type),
            button: request.button.clone(),
            options: request.options.clone(),
        };

        let formatted = format_text(&request.items, &request.scale, &settings);
        info!(
            label = settings.label.trim(),
            question_type = %settings.question_type,
            blocks = formatted.blocks,
            reversed_items = formatted.reversed_items,
            "questionnaire formatted"
        );
        formatted
    }

    /// Resolves the request's dialog fields against the defaults.
    pub fn assign_options(&self, request: &ScoreRequest) -> Result<AssignOptions, ScoringError> {
        let mut options = self.defaults.scoring;
        if let Some(scheme) = request.scheme.as_deref() {
            options.scheme = scheme.parse()?;
        }
        if let Some(start) = request.start.as_deref() {
            options.start = parse_start(start)?;
        }
        if let Some(preserve) = request.preserve_existing {
            options.preserve_existing = preserve;
        }
        Ok(options)
    }

    pub fn add_scores(&self, request: &ScoreRequest) -> Result<String, ScoringError> {
        let options = self.assign_options(request)?;
        let scale = assign_scores(&request.scale, &options);
        debug!(?options, "scores added");
        Ok(scale)
    }

    pub fn remove_scores(&self, scale: &str) -> String {
        let stripped = strip_scores(scale);
        debug!("scores removed");
        stripped
    }

    /// Answer lines exactly as one block would render them.
    pub fn preview_answers(&self, scale: &str, reversed: bool) -> String {
        let preview = emit_answers(&split_lines(scale), reversed);
        debug!(reversed, "answers previewed");
        preview.trim_end().to_string()
    }

    pub fn question_types(&self) -> Vec<QuestionTypeView> {
        QuestionType::ordered()
            .into_iter()
            .map(|name| {
                let group = name.group();
                QuestionTypeView {
                    name,
                    group,
                    group_label: group.label(),
                    options: group
                        .visible_options()
                        .iter()
                        .map(|option| OptionView {
                            option: *option,
                            keyword: option.keyword(),
                            description: option.description(),
                        })
                        .collect(),
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::NumberingScheme;

    #[test]
    fn format_falls_back_to_default_question_type() {
        let service = FormatterService::new(FormatterDefaults {
            question_type: QuestionType::Drop,
            ..FormatterDefaults::default()
        });
        let formatted = service.format(&FormatRequest {
            items: "Age group".to_string(),
            scale: "18-25\n26-40".to_string(),
            label: "age".to_string(),
            ..FormatRequest::default()
        });

        assert_eq!(
            formatted.output,
            "l: age_1\nt: drop\nq: Age group\n- 18-25\n- 26-40"
        );
    }

    #[test]
    fn request_fields_override_scoring_defaults() {
        let service = FormatterService::default();
        let request = ScoreRequest {
            scale: "a\nb".to_string(),
            scheme: Some("fixed".to_string()),
            start: Some("4".to_string()),
            preserve_existing: None,
        };

        let options = service.assign_options(&request).expect("valid options");
        assert_eq!(options.scheme, NumberingScheme::Fixed);
        assert!(!options.preserve_existing);
        assert_eq!(
            service.add_scores(&request).expect("scores added"),
            "{score=4} a\n{score=4} b"
        );
    }

    #[test]
    fn add_scores_rejects_invalid_start() {
        let service = FormatterService::default();
        let request = ScoreRequest {
            scale: "a".to_string(),
            start: Some("1.5".to_string()),
            ..ScoreRequest::default()
        };
        assert_eq!(
            service.add_scores(&request),
            Err(ScoringError::InvalidStart("1.5".to_string()))
        );
    }

    #[test]
    fn preview_shows_reversed_answers() {
        let service = FormatterService::default();
        let scale = "{score=1} Never\nUnsure\n{score=3} Always";
        assert_eq!(
            service.preview_answers(scale, true),
            "- {score=3} Never\n- Unsure\n- {score=1} Always"
        );
        assert_eq!(service.preview_answers("", false), "");
    }

    #[test]
    fn question_type_catalogue_lists_every_type() {
        let types = FormatterService::default().question_types();
        assert_eq!(types.len(), 5);
        let info = types
            .iter()
            .find(|view| view.name == QuestionType::Info)
            .expect("info listed");
        let keywords: Vec<_> = info.options.iter().map(|view| view.keyword).collect();
        assert_eq!(keywords, vec!["end", "link", "qf"]);
    }
}

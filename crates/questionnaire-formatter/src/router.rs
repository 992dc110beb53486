use std::sync::Arc;

use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::markup::FormattedQuestionnaire;
use crate::service::{FormatRequest, FormatterService, QuestionTypeView, ScoreRequest};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScaleResponse {
    pub scale: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StripRequest {
    pub scale: String,
}

/// Router builder exposing the formatter and score maintenance as JSON endpoints.
pub fn formatter_router(service: Arc<FormatterService>) -> Router {
    Router::new()
        .route("/api/v1/format", post(format_handler))
        .route("/api/v1/scale/scores", post(add_scores_handler))
        .route("/api/v1/scale/strip", post(strip_scores_handler))
        .route("/api/v1/question-types", get(question_types_handler))
        .with_state(service)
}

pub(crate) async fn format_handler(
    State(service): State<Arc<FormatterService>>,
    Json(request): Json<FormatRequest>,
) -> Json<FormattedQuestionnaire> {
    Json(service.format(&request))
}

pub(crate) async fn add_scores_handler(
    State(service): State<Arc<FormatterService>>,
    Json(request): Json<ScoreRequest>,
) -> Result<Json<ScaleResponse>, AppError> {
    let scale = service.add_scores(&request)?;
    Ok(Json(ScaleResponse { scale }))
}

pub(crate) async fn strip_scores_handler(
    State(service): State<Arc<FormatterService>>,
    Json(request): Json<StripRequest>,
) -> Json<ScaleResponse> {
    Json(ScaleResponse {
        scale: service.remove_scores(&request.scale),
    })
}

pub(crate) async fn question_types_handler(
    State(service): State<Arc<FormatterService>>,
) -> Json<Vec<QuestionTypeView>> {
    Json(service.question_types())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markup::{OptionSet, QuestionType};
    use axum::http::StatusCode;
    use axum::response::IntoResponse;

    fn service() -> Arc<FormatterService> {
        Arc::new(FormatterService::default())
    }

    #[tokio::test]
    async fn format_handler_returns_markup() {
        let request = FormatRequest {
            items: "Happy\nSad*".to_string(),
            scale: "{score=1} No\n{score=2} Yes".to_string(),
            label: "mood".to_string(),
            question_type: Some(QuestionType::Radio),
            options: OptionSet {
                free: true,
                ..OptionSet::default()
            },
            ..FormatRequest::default()
        };

        let Json(body) = format_handler(State(service()), Json(request)).await;

        assert_eq!(body.blocks, 2);
        assert_eq!(body.reversed_items, 1);
        assert!(body
            .output
            .ends_with("l: mood_2\nt: radio\no: free\nq: Sad\n- {score=2} No\n- {score=1} Yes"));
    }

    #[tokio::test]
    async fn add_scores_handler_maps_invalid_start_to_bad_request() {
        let request = ScoreRequest {
            scale: "a".to_string(),
            start: Some("abc".to_string()),
            ..ScoreRequest::default()
        };

        let error = add_scores_handler(State(service()), Json(request))
            .await
            .expect_err("invalid start rejected");
        assert_eq!(error.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn strip_handler_removes_tags() {
        let Json(body) = strip_scores_handler(
            State(service()),
            Json(StripRequest {
                scale: "{score=1} a\n{score=2} b".to_string(),
            }),
        )
        .await;
        assert_eq!(body.scale, "a\nb");
    }
}

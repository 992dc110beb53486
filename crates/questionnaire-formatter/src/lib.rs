//! Converts questionnaire items into PsyToolkit survey markup.
//!
//! The [`markup`] and [`scoring`] modules are pure text transformations; the
//! remaining modules wire them to configuration, logging and HTTP.

pub mod config;
pub mod error;
pub mod lines;
pub mod markup;
pub mod router;
pub mod scoring;
pub mod service;
pub mod telemetry;

pub use markup::{format_items, format_text, BlockSettings, FormattedQuestionnaire};
pub use router::formatter_router;
pub use scoring::{assign_scores, emit_answers, strip_scores, AssignOptions, NumberingScheme};
pub use service::FormatterService;

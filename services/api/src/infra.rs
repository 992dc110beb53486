use metrics_exporter_prometheus::PrometheusHandle;
use questionnaire_formatter::config::AppConfig;
use questionnaire_formatter::error::AppError;
use questionnaire_formatter::telemetry;
use questionnaire_formatter::FormatterService;
use std::io::Read;
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Path argument meaning "read standard input".
pub(crate) const STDIN_PATH: &str = "-";

/// Loads configuration, installs logging and builds the service for a CLI run.
pub(crate) fn cli_service() -> Result<FormatterService, AppError> {
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;
    Ok(FormatterService::new(config.formatter))
}

pub(crate) fn read_source(path: &Path) -> Result<String, AppError> {
    if path == Path::new(STDIN_PATH) {
        let mut buffer = String::new();
        std::io::stdin().read_to_string(&mut buffer)?;
        return Ok(buffer);
    }

    Ok(std::fs::read_to_string(path)?)
}

/// Prints `text`, or writes it back to `path` when rewriting in place.
pub(crate) fn emit(text: &str, path: &Path, in_place: bool) -> Result<(), AppError> {
    if !in_place {
        println!("{text}");
        return Ok(());
    }

    if path == Path::new(STDIN_PATH) {
        return Err(AppError::InvalidRequest(
            "--in-place needs a file path, not standard input".to_string(),
        ));
    }

    std::fs::write(path, format!("{text}\n"))?;
    Ok(())
}

use crate::infra::{cli_service, emit, read_source, STDIN_PATH};
use clap::Args;
use questionnaire_formatter::error::AppError;
use questionnaire_formatter::markup::{OptionSet, QuestionType};
use questionnaire_formatter::service::{FormatRequest, ScoreRequest};
use questionnaire_formatter::FormatterService;
use std::path::PathBuf;
use tracing::info;

#[derive(Args, Debug)]
pub(crate) struct FormatArgs {
    /// File with one item per line; a trailing * reverses that item's scoring ("-" for stdin)
    #[arg(long, default_value = STDIN_PATH)]
    pub(crate) items: PathBuf,
    /// File with one answer per line, optionally prefixed with {score=N}
    #[arg(long)]
    pub(crate) scale: Option<PathBuf>,
    /// Label stem; blocks are named <label>_1, <label>_2, ...
    #[arg(long, default_value = "")]
    pub(crate) label: String,
    /// Question type (radio, drop, check, rank, info); defaults to APP_DEFAULT_QUESTION_TYPE
    #[arg(long = "type")]
    pub(crate) question_type: Option<QuestionType>,
    /// Non-standard continue button text
    #[arg(long, default_value = "")]
    pub(crate) button: String,
    #[command(flatten)]
    pub(crate) options: OptionArgs,
}

#[derive(Args, Debug, Default)]
pub(crate) struct OptionArgs {
    /// Show items in a random order
    #[arg(long)]
    pub(crate) random: bool,
    /// Link to previous question
    #[arg(long)]
    pub(crate) link: bool,
    /// End questionnaire after this question (info only)
    #[arg(long)]
    pub(crate) end: bool,
    /// Do not require a selection (radio, drop)
    #[arg(long)]
    pub(crate) free: bool,
    /// Require a selection (check)
    #[arg(long)]
    pub(crate) require: bool,
    /// Minimum number of required selections
    #[arg(long)]
    pub(crate) min: Option<String>,
    /// Maximum number of required selections; ignored without --min
    #[arg(long)]
    pub(crate) max: Option<String>,
    /// Save data anonymously
    #[arg(long)]
    pub(crate) anonymous: bool,
    /// Show question text above image/video
    #[arg(long)]
    pub(crate) question_first: bool,
    /// Show numbers in front of items
    #[arg(long)]
    pub(crate) numbers: bool,
}

impl From<OptionArgs> for OptionSet {
    fn from(args: OptionArgs) -> Self {
        Self {
            random: args.random,
            link: args.link,
            end: args.end,
            free: args.free,
            require: args.require,
            anonymous: args.anonymous,
            question_first: args.question_first,
            numbers: args.numbers,
            min_required: args.min.unwrap_or_default(),
            max_required: args.max.unwrap_or_default(),
        }
    }
}

#[derive(Args, Debug)]
pub(crate) struct AddScoresArgs {
    /// Scale file ("-" for stdin)
    #[arg(default_value = STDIN_PATH)]
    pub(crate) scale: PathBuf,
    /// incremental, decremental or fixed; defaults to APP_SCORING_SCHEME
    #[arg(long)]
    pub(crate) scheme: Option<String>,
    /// Score to start from (or end on when decremental); defaults to APP_DEFAULT_SCORE
    #[arg(long, allow_hyphen_values = true)]
    pub(crate) start: Option<String>,
    /// Keep existing tags instead of renumbering every line
    #[arg(long)]
    pub(crate) preserve: bool,
    /// Rewrite the scale file instead of printing
    #[arg(long)]
    pub(crate) in_place: bool,
}

#[derive(Args, Debug)]
pub(crate) struct RemoveScoresArgs {
    /// Scale file ("-" for stdin)
    #[arg(default_value = STDIN_PATH)]
    pub(crate) scale: PathBuf,
    /// Rewrite the scale file instead of printing
    #[arg(long)]
    pub(crate) in_place: bool,
}

pub(crate) fn run_format(args: FormatArgs) -> Result<(), AppError> {
    let service = cli_service()?;
    let output = format_from_args(&service, args)?;
    println!("{output}");
    Ok(())
}

fn format_from_args(service: &FormatterService, args: FormatArgs) -> Result<String, AppError> {
    let items = read_source(&args.items)?;
    let scale = match &args.scale {
        Some(path) => read_source(path)?,
        None => String::new(),
    };

    let request = FormatRequest {
        items,
        scale,
        label: args.label,
        question_type: args.question_type,
        button: args.button,
        options: args.options.into(),
    };

    Ok(service.format(&request).output)
}

pub(crate) fn run_add_scores(args: AddScoresArgs) -> Result<(), AppError> {
    let service = cli_service()?;
    let request = ScoreRequest {
        scale: read_source(&args.scale)?,
        scheme: args.scheme,
        start: args.start,
        preserve_existing: args.preserve.then_some(true),
    };

    let scale = service.add_scores(&request)?;
    info!(path = %args.scale.display(), in_place = args.in_place, "scale scored");
    emit(&scale, &args.scale, args.in_place)
}

pub(crate) fn run_remove_scores(args: RemoveScoresArgs) -> Result<(), AppError> {
    let service = cli_service()?;
    let scale = service.remove_scores(&read_source(&args.scale)?);
    info!(path = %args.scale.display(), in_place = args.in_place, "scale scores removed");
    emit(&scale, &args.scale, args.in_place)
}

pub(crate) fn run_types() -> Result<(), AppError> {
    let service = cli_service()?;
    println!("Question types");
    for view in service.question_types() {
        let options: Vec<String> = view
            .options
            .iter()
            .map(|option| format!("o: {}", option.keyword))
            .collect();
        println!(
            "- {} ({}): {}",
            view.name,
            view.group_label,
            options.join(", ")
        );
    }
    Ok(())
}

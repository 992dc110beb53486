use crate::infra::cli_service;
use clap::Args;
use questionnaire_formatter::error::AppError;
use questionnaire_formatter::markup::{OptionSet, QuestionType};
use questionnaire_formatter::service::{FormatRequest, ScoreRequest};
use questionnaire_formatter::FormatterService;

const DEMO_ITEMS: &str =
    "I feel happy\nI feel sad*\npage: begin\nI enjoy my hobbies\n----\nThank you!";
const DEMO_SCALE: &str = "Never\nSometimes\nOften\nAlways";

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Label stem used for the demo blocks.
    #[arg(long, default_value = "mood")]
    pub(crate) label: String,
    /// Number the scale down so the last answer scores the start value.
    #[arg(long)]
    pub(crate) decremental: bool,
    /// Score to start numbering from.
    #[arg(long, default_value = "1", allow_hyphen_values = true)]
    pub(crate) start: String,
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let service = cli_service()?;
    let report = build_demo(&service, &args)?;

    println!("Questionnaire formatter demo");
    println!("\nItems (a trailing * reverses scoring)\n{DEMO_ITEMS}");
    println!("\nScored scale\n{}", report.scale);
    println!("\nFormatted blocks\n{}", report.blocks);
    println!(
        "\n{} blocks, {} reversed",
        report.block_count, report.reversed_count
    );
    println!("\nClosing info screen\n{}", report.closing);

    Ok(())
}

struct DemoReport {
    scale: String,
    blocks: String,
    block_count: usize,
    reversed_count: usize,
    closing: String,
}

fn build_demo(service: &FormatterService, args: &DemoArgs) -> Result<DemoReport, AppError> {
    let scheme = if args.decremental {
        "decremental"
    } else {
        "incremental"
    };
    let scale = service.add_scores(&ScoreRequest {
        scale: DEMO_SCALE.to_string(),
        scheme: Some(scheme.to_string()),
        start: Some(args.start.clone()),
        preserve_existing: Some(false),
    })?;

    let formatted = service.format(&FormatRequest {
        items: DEMO_ITEMS
            .lines()
            .take_while(|line| *line != "----")
            .collect::<Vec<_>>()
            .join("\n"),
        scale: scale.clone(),
        label: args.label.clone(),
        question_type: Some(QuestionType::Radio),
        button: String::new(),
        options: OptionSet {
            anonymous: true,
            ..OptionSet::default()
        },
    });

    let closing = service.format(&FormatRequest {
        items: DEMO_ITEMS
            .lines()
            .skip_while(|line| *line != "----")
            .collect::<Vec<_>>()
            .join("\n"),
        label: format!("{}_end", args.label),
        question_type: Some(QuestionType::Info),
        options: OptionSet {
            end: true,
            ..OptionSet::default()
        },
        ..FormatRequest::default()
    });

    Ok(DemoReport {
        scale,
        blocks: formatted.output,
        block_count: formatted.blocks,
        reversed_count: formatted.reversed_items,
        closing: closing.output,
    })
}

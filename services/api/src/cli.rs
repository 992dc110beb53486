use crate::commands::{
    run_add_scores, run_format, run_remove_scores, run_types, AddScoresArgs, FormatArgs,
    RemoveScoresArgs,
};
use crate::demo::{run_demo, DemoArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use questionnaire_formatter::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "qformat",
    about = "Format questionnaire items into PsyToolkit survey markup",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Format item lines into survey blocks and print them
    Format(FormatArgs),
    /// Add or remove {score=N} tags on a scale file
    Scores {
        #[command(subcommand)]
        command: ScoresCommand,
    },
    /// List question types with the options offered for each
    Types,
    /// Print a worked example covering scoring and reversed items
    Demo(DemoArgs),
}

#[derive(Subcommand, Debug)]
enum ScoresCommand {
    /// Tag untagged lines using the chosen numbering scheme
    Add(AddScoresArgs),
    /// Remove leading score tags from every line
    Remove(RemoveScoresArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Format(args) => run_format(args),
        Command::Scores {
            command: ScoresCommand::Add(args),
        } => run_add_scores(args),
        Command::Scores {
            command: ScoresCommand::Remove(args),
        } => run_remove_scores(args),
        Command::Types => run_types(),
        Command::Demo(args) => run_demo(args),
    }
}

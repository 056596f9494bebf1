use crate::demo::{run_assess, run_resources, run_slots, AssessArgs, ResourcesArgs, SlotsArgs};
use crate::error::AppError;
use crate::server;
use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "Mindwell Dashboard Service",
    about = "Run the mental-wellness dashboard service or exercise its flows from the command line",
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
    /// Render a weekly counselling availability grid
    Slots(SlotsArgs),
    /// List the resource directory with optional filters
    Resources(ResourcesArgs),
    /// Score an answer set and print the assessment outcome
    Assess(AssessArgs),
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
        Command::Slots(args) => run_slots(args),
        Command::Resources(args) => run_resources(args),
        Command::Assess(args) => run_assess(args),
    }
}

use crate::demo::{run_catalog_check, run_demo, run_walkthrough, CatalogArgs, DemoArgs, WalkthroughArgs};
use crate::server;
use assessment_funnel::error::AppError;
use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "Assessment Funnel",
    about = "Run and demonstrate the pain assessment funnel from the command line",
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
    /// Walk scripted personas through the funnel and print their results
    Demo(DemoArgs),
    /// Replay a JSON array of funnel actions and print the resulting state
    Walkthrough(WalkthroughArgs),
    /// Import reference catalogs and summarize what was loaded
    Catalog(CatalogArgs),
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
        Command::Demo(args) => run_demo(args),
        Command::Walkthrough(args) => run_walkthrough(args),
        Command::Catalog(args) => run_catalog_check(args),
    }
}

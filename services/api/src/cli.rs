use crate::commands::{run_facets, run_filter, FacetsArgs, FilterArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use job_portal::error::AppError;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "Job Portal Listings",
    about = "Serve and query job listing snapshots from the command line",
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
    /// Filter or summarize a listing snapshot without starting the server
    Listings {
        #[command(subcommand)]
        command: ListingsCommand,
    },
}

#[derive(Subcommand, Debug)]
enum ListingsCommand {
    /// Apply filter selections to a job snapshot and print the visible listings
    Filter(FilterArgs),
    /// Print the city/suburb, job type and work mode option lists
    Facets(FacetsArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
    /// Job snapshot (JSON array or CSV) to load at startup
    #[arg(long)]
    pub(crate) jobs: Option<PathBuf>,
    /// Category snapshot (JSON array) to load at startup
    #[arg(long)]
    pub(crate) categories: Option<PathBuf>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Listings {
            command: ListingsCommand::Filter(args),
        } => run_filter(args),
        Command::Listings {
            command: ListingsCommand::Facets(args),
        } => run_facets(args),
    }
}

use std::sync::Arc;

use clap::{Args, Parser, Subcommand};
use leadscout::config::AppConfig;
use leadscout::error::AppError;
use leadscout::pipeline::{LeadScoutService, ScrapeRequest};
use leadscout::serp::HttpSerpClient;
use leadscout::telemetry;

use crate::server;

#[derive(Parser, Debug)]
#[command(
    name = "LeadScout",
    about = "Discover local businesses and enrich their contact details",
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
    /// Run one search-and-enrich batch and write the results CSV
    Scrape(ScrapeArgs),
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

#[derive(Args, Debug)]
pub(crate) struct ScrapeArgs {
    /// Business niche, e.g. "Dentist" or "Restaurant"
    #[arg(long)]
    niche: String,
    /// Location, e.g. "Surat, Gujarat, India"
    #[arg(long)]
    location: String,
    /// Maximum number of candidates to keep
    #[arg(long, default_value_t = ScrapeRequest::DEFAULT_LIMIT)]
    limit: usize,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Scrape(args) => run_scrape(args).await,
    }
}

async fn run_scrape(args: ScrapeArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;

    let gateway = Arc::new(HttpSerpClient::new(&config.serp)?);
    let service = LeadScoutService::new(gateway, config.output);

    let request = ScrapeRequest {
        niche: args.niche,
        location: args.location,
        limit: args.limit,
    };
    let outcome = service.run(&request).await?;

    println!(
        "Saved {} record(s) to {}",
        outcome.saved,
        outcome.file.display()
    );
    Ok(())
}

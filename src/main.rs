use clap::Parser;
use eyre::Result;
use log::info;

use ytbrief::config::{Config, UPSTREAM_TIMEOUT};
use ytbrief::pipeline::Pipeline;
use ytbrief::server::{self, AppState};
use ytbrief::summarize::OpenAiBackend;
use ytbrief::youtube::InnerTubeFetcher;

mod cli;

use cli::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let config = Config::from_env()?;

    // One HTTP client for both collaborators; a timed-out call surfaces as
    // an upstream-unavailable failure, not a hung request.
    let client = reqwest::Client::builder().timeout(UPSTREAM_TIMEOUT).build()?;

    let fetcher = InnerTubeFetcher::new(client.clone(), "en");
    let backend = OpenAiBackend::new(client, &config);
    let pipeline = Pipeline::new(fetcher, backend);
    let state = AppState::new(pipeline, &config.secret_key);

    info!("Starting ytbrief with model {}", config.model);
    server::serve(cli.bind_addr(), state).await
}

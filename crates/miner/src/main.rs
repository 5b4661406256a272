use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use common::config::{load_env_file, AppConfig};
use common::{logging, AppError};
use gh_http::ReqwestExecutor;
use repo_miner::cli::Cli;
use repo_miner::{commands, Fetcher, RestGithubClient};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // clap reads GITHUB_TOKEN while parsing, so `.env` has to be exported first.
    load_env_file();
    let cli = Cli::parse();
    let config = AppConfig::load().map_err(AppError::from)?;
    logging::init_logging(&config.observability.log_level);

    let token = cli.resolve_token(&config.github);

    let exec = Arc::new(ReqwestExecutor::new(&config.github.user_agent)?);
    let client = Arc::new(RestGithubClient::new(exec, &config.github)?);
    let fetcher = Fetcher::new(client, config.github.effective_page_size());

    let summary = commands::run(cli.command, &fetcher, token.as_ref()).await?;
    println!("{summary}");
    Ok(())
}

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use crosspost_core::config::{SiteConfig, DEFAULT_BASE_URL};

use crate::crosspost::RunOptions;
use crate::prelude::*;
use crate::publish::{Credentials, Endpoints};
use crate::retry::{RetryPolicy, DEFAULT_MAX_ATTEMPTS};

mod crosspost;
mod error;
mod prelude;
mod publish;
mod retry;

#[derive(Debug, clap::Parser)]
#[command(
    author,
    version,
    about,
    long_about = "Publish a markdown blog post as a draft on Dev.to, Hashnode and Medium"
)]
pub struct App {
    /// Markdown file with YAML front matter
    pub path: Option<PathBuf>,

    /// Compute what would be sent to each platform without calling any API
    #[clap(long)]
    pub dry_run: bool,

    /// Print the per-platform outcomes as JSON
    #[clap(long)]
    pub json: bool,

    #[clap(flatten)]
    global: Global,
}

#[derive(Debug, Clone, clap::Args)]
pub struct Global {
    /// Origin site used for canonical URLs and absolute asset links
    #[clap(long, env = "CROSSPOST_BASE_URL", default_value = DEFAULT_BASE_URL)]
    base_url: String,

    /// Attempts per platform, the first one included
    #[clap(long, env = "CROSSPOST_MAX_ATTEMPTS", default_value_t = DEFAULT_MAX_ATTEMPTS)]
    max_attempts: u32,

    /// Pause between attempts, in milliseconds
    #[clap(long, env = "CROSSPOST_RETRY_DELAY_MS", default_value = "1000")]
    retry_delay_ms: u64,

    /// Whether to display additional information.
    #[clap(short, long, env = "CROSSPOST_VERBOSE", default_value = "false")]
    verbose: bool,
}

fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let app = App::parse();
    init_logging(app.global.verbose);

    run_cli(app).await
}

/// Everything after argument parsing. An `Err` here is the exit code 1 path.
async fn run_cli(app: App) -> Result<()> {
    let path = app.path.ok_or_eyre("Please provide a file path")?;

    let options = RunOptions {
        site: SiteConfig::new(app.global.base_url),
        retry: RetryPolicy {
            max_attempts: app.global.max_attempts,
            delay: Duration::from_millis(app.global.retry_delay_ms),
        },
        endpoints: Endpoints::default(),
        dry_run: app.dry_run,
        json: app.json,
    };

    crosspost::run(&path, &options, &Credentials::from_env())
        .await
        .context("Cross-posting aborted")?;

    Ok(())
}

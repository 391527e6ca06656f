use std::path::PathBuf;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use clap::Parser;
use env_logger::Env;
use log::{debug, info, warn};

use subaggregator::interfaces::{update, write_outputs};
use subaggregator::settings::{Settings, SourceConfig};
use subaggregator::utils::HttpFetcher;

/// Merge public vmess subscription lists into Clash proxy and policy files
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to a TOML or YAML settings file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Source as TAG=URL; repeat to list several, replaces configured sources
    #[arg(short, long = "source", value_name = "TAG=URL")]
    sources: Vec<String>,

    /// Output path for the proxy list
    #[arg(long, value_name = "FILE")]
    proxies_out: Option<String>,

    /// Output path for the routing policy
    #[arg(long, value_name = "FILE")]
    policy_out: Option<String>,

    /// Also write a combined profile to this path
    #[arg(long, value_name = "FILE")]
    profile_out: Option<String>,

    /// Exit with an error when no proxies survive
    #[arg(long)]
    fail_on_empty: bool,
}

fn apply_overrides(settings: &mut Settings, args: &Args) -> Result<()> {
    if !args.sources.is_empty() {
        settings.sources = args
            .sources
            .iter()
            .map(|pair| SourceConfig::parse_pair(pair))
            .collect::<Result<_, _>>()?;
    }
    if let Some(path) = &args.proxies_out {
        settings.output.proxies_path = path.clone();
    }
    if let Some(path) = &args.policy_out {
        settings.output.policy_path = path.clone();
    }
    if let Some(path) = &args.profile_out {
        settings.output.profile_path = Some(path.clone());
    }
    settings.validate()?;
    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Initialize the logger
    env_logger::init_from_env(Env::default().default_filter_or("info"));

    let args = Args::parse();

    let mut settings = Settings::load(args.config.as_deref()).context("loading settings")?;
    apply_overrides(&mut settings, &args).context("applying command line overrides")?;

    let fetcher = HttpFetcher::new(
        Duration::from_secs(settings.fetch.timeout_secs),
        &settings.fetch.user_agent,
    )?;

    info!("Fetching {} sources", settings.sources.len());
    let output = update(&fetcher, &settings).await;

    let report = &output.report;
    for source in &report.sources {
        info!(
            "{}: {} proxies, {} rejected",
            source.source_tag, source.decoded, source.rejected
        );
    }
    for failed in &report.failed_sources {
        warn!("{}: fetch failed: {}", failed.source_tag, failed.error);
    }
    for rejected in &report.rejected_lines {
        debug!(
            "{}: rejected ({}): {:.60}",
            rejected.source_tag,
            rejected.error.reason(),
            rejected.line
        );
    }

    write_outputs(&output, &settings.output).context("writing output documents")?;

    if output.proxy_list.proxies.is_empty() {
        warn!("No proxies were converted");
        if args.fail_on_empty {
            bail!("no proxies available");
        }
    } else {
        info!("Converted {} unique proxies", output.proxy_list.proxies.len());
    }
    Ok(())
}

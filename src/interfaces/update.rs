//! End-to-end update: fetch sources, convert, write documents.
//!
//! [`convert`] is the pure part of the pipeline and needs no network access;
//! [`fetch_sources`] and [`write_outputs`] sit at its edges.

use std::path::Path;

use futures::stream::{self, StreamExt};
use log::{debug, info, warn};

use crate::generator::config::remark::resolve_names;
use crate::generator::exports::clash::assemble;
use crate::generator::yaml::clash::{
    ClashProfileDocument, ProxyListDocument, RoutingPolicyDocument,
};
use crate::models::AggregationReport;
use crate::parser::node_manip::deduplicate;
use crate::parser::subparser::{aggregate, SourceFetch};
use crate::settings::{OutputSettings, Settings, SourceConfig};
use crate::utils::file::{write_yaml, WriteError};
use crate::utils::http::Fetcher;

/// Result of one conversion run
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateOutput {
    pub proxy_list: ProxyListDocument,
    pub routing_policy: RoutingPolicyDocument,
    pub report: AggregationReport,
}

impl UpdateOutput {
    /// Single-file profile combining both documents.
    pub fn profile(&self) -> ClashProfileDocument {
        ClashProfileDocument::combine(&self.proxy_list, &self.routing_policy)
    }
}

/// Fetch every source with at most `max_concurrent` requests in flight.
///
/// Results are returned in the order of `sources`, not completion order.
pub async fn fetch_sources<F: Fetcher>(
    fetcher: &F,
    sources: &[SourceConfig],
    max_concurrent: usize,
) -> Vec<SourceFetch> {
    stream::iter(sources)
        .map(|source| async move {
            debug!("Fetching {} from {}", source.tag, source.url);
            let body = fetcher.fetch(&source.url).await;
            match &body {
                Ok(content) => debug!("Fetched {} bytes from {}", content.len(), source.tag),
                Err(err) => warn!("Failed to fetch {}: {}", source.tag, err),
            }
            SourceFetch::new(source.tag.clone(), body)
        })
        .buffered(max_concurrent.max(1))
        .collect::<Vec<_>>()
        .await
}

/// Run decode, aggregation, deduplication, naming and assembly over fetched sources.
pub fn convert(fetched: Vec<SourceFetch>, settings: &Settings) -> UpdateOutput {
    let (nodes, mut report) = aggregate(fetched);

    let unique = deduplicate(nodes);
    report.duplicates_removed = report.decoded - unique.len();

    let named = resolve_names(unique, settings.naming.max_length);
    let (proxy_list, routing_policy) =
        assemble(&named, &settings.groups, settings.general.as_ref());

    UpdateOutput {
        proxy_list,
        routing_policy,
        report,
    }
}

/// Fetch all configured sources and convert them.
pub async fn update<F: Fetcher>(fetcher: &F, settings: &Settings) -> UpdateOutput {
    let fetched = fetch_sources(fetcher, &settings.sources, settings.fetch.max_concurrent).await;
    let output = convert(fetched, settings);

    let report = &output.report;
    info!(
        "Decoded {} proxies from {} sources ({} rejected, {} duplicates, {} unique)",
        report.decoded,
        report.sources.len(),
        report.rejected,
        report.duplicates_removed,
        report.unique()
    );
    output
}

/// Write the proxy list, routing policy and optional combined profile.
pub fn write_outputs(output: &UpdateOutput, paths: &OutputSettings) -> Result<(), WriteError> {
    write_yaml(Path::new(&paths.proxies_path), &output.proxy_list)?;
    info!("Wrote {}", paths.proxies_path);

    write_yaml(Path::new(&paths.policy_path), &output.routing_policy)?;
    info!("Wrote {}", paths.policy_path);

    if let Some(profile_path) = &paths.profile_path {
        write_yaml(Path::new(profile_path), &output.profile())?;
        info!("Wrote {}", profile_path);
    }
    Ok(())
}

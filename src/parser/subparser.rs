use crate::models::{AggregationReport, FailedSource, RejectedLine, SourceSummary, SourcedProxy};
use crate::parser::explodes::explode;
use crate::utils::http::FetchError;
use lazy_static::lazy_static;
use log::{debug, trace};
use regex::Regex;

lazy_static! {
    /// Lines carrying a `scheme://` prefix are treated as proxy links.
    static ref LINK_SCHEME: Regex = Regex::new(r"^[A-Za-z][A-Za-z0-9+.\-]*://").unwrap();
}

/// The outcome of fetching one source, in configured order.
#[derive(Debug)]
pub struct SourceFetch {
    pub tag: String,
    pub body: Result<String, FetchError>,
}

impl SourceFetch {
    pub fn new(tag: impl Into<String>, body: Result<String, FetchError>) -> Self {
        Self {
            tag: tag.into(),
            body,
        }
    }
}

/// Check whether a trimmed line looks like a proxy link of any scheme.
pub fn is_link(line: &str) -> bool {
    LINK_SCHEME.is_match(line)
}

/// Decode every link line of every fetched source.
///
/// Descriptors come back in source order, then line order within a source,
/// which is the precedence order used by deduplication. Bad lines and failed
/// sources are recorded in the report and never stop the run.
///
/// # Arguments
/// * `sources` - Fetch results, one per configured source, in precedence order
///
/// # Returns
/// The tagged descriptors and a report with `duplicates_removed` left at zero
pub fn aggregate(sources: Vec<SourceFetch>) -> (Vec<SourcedProxy>, AggregationReport) {
    let mut nodes = Vec::new();
    let mut report = AggregationReport::default();

    for source in sources {
        let content = match source.body {
            Ok(content) => content,
            Err(err) => {
                debug!("Source {} skipped: {}", source.tag, err);
                report.failed_sources.push(FailedSource {
                    source_tag: source.tag,
                    error: err.to_string(),
                });
                continue;
            }
        };

        let mut summary = SourceSummary {
            source_tag: source.tag.clone(),
            decoded: 0,
            rejected: 0,
        };

        for line in content.lines() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            report.lines_seen += 1;

            if !is_link(line) {
                report.ignored += 1;
                continue;
            }

            match explode(line) {
                Ok(node) => {
                    trace!("Decoded {} from {}", node.endpoint_key(), source.tag);
                    summary.decoded += 1;
                    nodes.push(SourcedProxy::new(node, source.tag.clone()));
                }
                Err(error) => {
                    trace!("Rejected line from {}: {}", source.tag, error);
                    summary.rejected += 1;
                    report.rejected_lines.push(RejectedLine {
                        source_tag: source.tag.clone(),
                        line: line.to_string(),
                        error,
                    });
                }
            }
        }

        debug!(
            "Source {}: {} decoded, {} rejected",
            summary.source_tag, summary.decoded, summary.rejected
        );
        report.decoded += summary.decoded;
        report.rejected += summary.rejected;
        report.sources.push(summary);
    }

    (nodes, report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::DecodeError;
    use base64::{engine::general_purpose::STANDARD, Engine};

    fn link(host: &str, port: u16, ps: &str) -> String {
        let json = format!(
            r#"{{"ps":"{}","add":"{}","port":"{}","id":"uuid"}}"#,
            ps, host, port
        );
        format!("vmess://{}", STANDARD.encode(json).trim_end_matches('='))
    }

    #[test]
    fn test_aggregate_empty() {
        let (nodes, report) = aggregate(Vec::new());
        assert!(nodes.is_empty());
        assert_eq!(report, AggregationReport::default());
        assert!(report.is_empty());
    }

    #[test]
    fn test_aggregate_preserves_source_and_line_order() {
        let s1 = format!("{}\n{}\n", link("a", 1, "a1"), link("b", 2, "b1"));
        let s2 = link("c", 3, "c1");
        let (nodes, report) = aggregate(vec![
            SourceFetch::new("S1", Ok(s1)),
            SourceFetch::new("S2", Ok(s2)),
        ]);

        let order: Vec<(&str, &str)> = nodes
            .iter()
            .map(|n| (n.source_tag.as_str(), n.proxy.remark.as_str()))
            .collect();
        assert_eq!(order, vec![("S1", "a1"), ("S1", "b1"), ("S2", "c1")]);
        assert_eq!(report.decoded, 3);
        assert_eq!(report.sources.len(), 2);
        assert_eq!(report.sources[0].decoded, 2);
    }

    #[test]
    fn test_aggregate_bad_line_does_not_abort_source() {
        let content = format!(
            "vmess://not-base64!!!\n\n# comment\nss://abc@host:1\n{}\n",
            link("ok", 443, "good")
        );
        let (nodes, report) = aggregate(vec![SourceFetch::new("S1", Ok(content))]);

        assert_eq!(nodes.len(), 1);
        assert_eq!(nodes[0].proxy.remark, "good");
        assert_eq!(report.lines_seen, 4);
        assert_eq!(report.ignored, 1);
        assert_eq!(report.rejected, 2);
        assert_eq!(report.rejected_lines[0].line, "vmess://not-base64!!!");
        assert_eq!(report.rejected_lines[0].error.reason(), "malformed-payload");
        assert_eq!(report.rejected_lines[1].error, DecodeError::UnsupportedScheme);
    }

    #[test]
    fn test_aggregate_failed_source_is_skipped() {
        let (nodes, report) = aggregate(vec![
            SourceFetch::new("down", Err(FetchError::Timeout)),
            SourceFetch::new("up", Ok(link("h", 80, "n"))),
        ]);

        assert_eq!(nodes.len(), 1);
        assert_eq!(nodes[0].source_tag, "up");
        assert_eq!(report.failed_sources.len(), 1);
        assert_eq!(report.failed_sources[0].source_tag, "down");
        assert_eq!(report.sources.len(), 1);
    }

    #[test]
    fn test_is_link() {
        assert!(is_link("vmess://abc"));
        assert!(is_link("ss://abc"));
        assert!(is_link("vmess+tls://abc"));
        assert!(!is_link("# vmess://abc"));
        assert!(!is_link("just text"));
    }
}

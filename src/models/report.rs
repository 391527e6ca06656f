//! Per-run diagnostics collected while aggregating sources.

use crate::parser::DecodeError;

/// A line that looked like proxy data but could not be decoded.
#[derive(Debug, Clone, PartialEq)]
pub struct RejectedLine {
    pub source_tag: String,
    pub line: String,
    pub error: DecodeError,
}

/// A source whose fetch failed; it contributed nothing to the run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailedSource {
    pub source_tag: String,
    pub error: String,
}

/// How many descriptors a single source produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceSummary {
    pub source_tag: String,
    pub decoded: usize,
    pub rejected: usize,
}

/// Counts and diagnostics for one pipeline run. Never persisted.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AggregationReport {
    /// Non-empty lines read across all fetched sources.
    pub lines_seen: usize,
    pub decoded: usize,
    pub rejected: usize,
    /// Non-empty lines that did not carry a link scheme at all.
    pub ignored: usize,
    pub duplicates_removed: usize,
    pub rejected_lines: Vec<RejectedLine>,
    pub failed_sources: Vec<FailedSource>,
    pub sources: Vec<SourceSummary>,
}

impl AggregationReport {
    /// Number of descriptors left after deduplication.
    pub fn unique(&self) -> usize {
        self.decoded.saturating_sub(self.duplicates_removed)
    }

    pub fn is_empty(&self) -> bool {
        self.lines_seen == 0 && self.failed_sources.is_empty() && self.sources.is_empty()
    }
}

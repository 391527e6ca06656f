use std::collections::HashSet;

use log::trace;

use crate::models::SourcedProxy;

/// Collapse descriptors that point at the same `(host, port)` endpoint.
///
/// The first occurrence in input order wins, so source precedence is purely
/// the order in which sources were listed. Credentials, cipher and transport
/// are not part of the identity. Kept items retain their relative order.
pub fn deduplicate(nodes: Vec<SourcedProxy>) -> Vec<SourcedProxy> {
    let mut seen = HashSet::with_capacity(nodes.len());
    nodes
        .into_iter()
        .filter(|node| {
            let key = node.proxy.endpoint_key();
            if seen.contains(&key) {
                trace!("Dropping duplicate {} from {}", key, node.source_tag);
                false
            } else {
                seen.insert(key);
                true
            }
        })
        .collect()
}

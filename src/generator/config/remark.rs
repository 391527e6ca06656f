//! Remark processing utilities
//!
//! This module turns per-source labels into the unique display names that the
//! proxy groups reference.

use std::collections::HashSet;

use log::trace;

use crate::models::{ProxyDescriptor, SourcedProxy};

/// Default upper bound, in characters, for a display name.
pub const MAX_NAME_LENGTH: usize = 50;

/// Keep at most `max` characters from the front of `s`.
fn truncate_chars(s: &str, max: usize) -> String {
    s.chars().take(max).collect()
}

/// Build the untruncated display name for a node: `<tag>-<label>`, with spaces
/// in the label replaced by `-`.
pub fn base_name(source_tag: &str, remark: &str) -> String {
    format!("{}-{}", source_tag, remark.replace(' ', "-"))
}

/// Assign every node a unique display name of at most `max_len` characters.
///
/// Names are truncated from the tail. When a name is already taken, `-2`,
/// `-3`, ... is appended to later occurrences, with the base shortened first
/// so the suffix always survives truncation.
///
/// # Arguments
///
/// * `nodes` - Deduplicated nodes in output order
/// * `max_len` - Maximum name length in characters; must exceed the suffix width
///
/// # Returns
///
/// The descriptors with `remark` rewritten to the final display name
pub fn resolve_names(nodes: Vec<SourcedProxy>, max_len: usize) -> Vec<ProxyDescriptor> {
    let mut used: HashSet<String> = HashSet::with_capacity(nodes.len());

    nodes
        .into_iter()
        .map(|SourcedProxy { mut proxy, source_tag }| {
            let base = base_name(&source_tag, &proxy.remark);
            let mut name = truncate_chars(&base, max_len);
            let mut counter = 2u32;

            while used.contains(&name) {
                let suffix = format!("-{}", counter);
                let room = max_len.saturating_sub(suffix.chars().count());
                name = truncate_chars(&base, room) + &suffix;
                counter += 1;
            }

            if counter > 2 {
                trace!("Renamed colliding node {:?} to {:?}", base, name);
            }
            used.insert(name.clone());
            proxy.remark = name;
            proxy
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Network, ProxyType};

    fn node(tag: &str, remark: &str) -> SourcedProxy {
        SourcedProxy::new(
            ProxyDescriptor {
                proxy_type: ProxyType::VMess,
                remark: remark.to_string(),
                hostname: "h".to_string(),
                port: 1,
                user_id: "u".to_string(),
                alter_id: 0,
                cipher: "auto".to_string(),
                tls: false,
                network: Network::Tcp,
                ws_opts: None,
            },
            tag,
        )
    }

    fn names(nodes: Vec<SourcedProxy>) -> Vec<String> {
        resolve_names(nodes, MAX_NAME_LENGTH)
            .into_iter()
            .map(|p| p.remark)
            .collect()
    }

    #[test]
    fn test_prefix_and_space_replacement() {
        assert_eq!(names(vec![node("S1", "Hong Kong 01")]), vec!["S1-Hong-Kong-01"]);
    }

    #[test]
    fn test_identical_names_get_suffix() {
        let result = names(vec![node("S1", "A"), node("S1", "A"), node("S1", "A")]);
        assert_eq!(result, vec!["S1-A", "S1-A-2", "S1-A-3"]);
    }

    #[test]
    fn test_suffix_survives_truncation() {
        let long = "x".repeat(80);
        let result = names(vec![node("S1", &long), node("S1", &long)]);

        assert_eq!(result[0].chars().count(), MAX_NAME_LENGTH);
        assert_eq!(result[1].chars().count(), MAX_NAME_LENGTH);
        assert!(result[1].ends_with("-2"));
        assert_ne!(result[0], result[1]);
    }

    #[test]
    fn test_truncation_collision_between_distinct_labels() {
        let a = format!("{}A", "y".repeat(60));
        let b = format!("{}B", "y".repeat(60));
        let result = names(vec![node("S1", &a), node("S1", &b)]);
        assert_ne!(result[0], result[1]);
    }

    #[test]
    fn test_natural_name_matching_generated_suffix() {
        let result = names(vec![node("S1", "A"), node("S1", "A"), node("S1", "A-2")]);
        assert_eq!(result, vec!["S1-A", "S1-A-2", "S1-A-2-2"]);
    }

    #[test]
    fn test_multibyte_names_are_truncated_by_character() {
        let label = "🇭🇰".repeat(40);
        let result = names(vec![node("S1", &label)]);
        assert!(result[0].chars().count() <= MAX_NAME_LENGTH);
    }
}

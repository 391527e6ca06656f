use std::collections::BTreeMap;

use log::debug;

use crate::generator::config::group::{build_proxy_groups, group_to_clash};
use crate::generator::yaml::clash::{
    ClashGeneral, ClashProxy, ClashWsOpts, ProxyListDocument, RoutingPolicyDocument,
};
use crate::models::ProxyDescriptor;
use crate::settings::GroupSettings;

/// Project a descriptor onto the Clash proxy schema.
pub fn proxy_to_clash(node: &ProxyDescriptor) -> ClashProxy {
    let ws_opts = node.ws_opts.as_ref().map(|ws| {
        let mut headers = BTreeMap::new();
        headers.insert("Host".to_string(), ws.host.clone());
        ClashWsOpts {
            path: ws.path.clone(),
            headers,
        }
    });

    ClashProxy {
        name: node.remark.clone(),
        proxy_type: node.proxy_type.as_str().to_string(),
        server: node.hostname.clone(),
        port: node.port,
        uuid: node.user_id.clone(),
        alter_id: node.alter_id,
        cipher: node.cipher.clone(),
        tls: node.tls,
        network: node.network.as_str().to_string(),
        ws_opts,
    }
}

/// Rule list: configured extra rules, then everything else to the select group.
pub fn build_rules(settings: &GroupSettings) -> Vec<String> {
    let mut rules = settings.extra_rules.clone();
    rules.push(format!("MATCH,{}", settings.select_name));
    rules
}

/// Build the proxy list and routing policy documents from named descriptors.
///
/// An empty input is valid and yields groups with empty member lists.
pub fn assemble(
    nodes: &[ProxyDescriptor],
    settings: &GroupSettings,
    general: Option<&ClashGeneral>,
) -> (ProxyListDocument, RoutingPolicyDocument) {
    let proxies: Vec<ClashProxy> = nodes.iter().map(proxy_to_clash).collect();
    let names: Vec<String> = proxies.iter().map(|p| p.name.clone()).collect();

    let proxy_groups = build_proxy_groups(&names, settings)
        .iter()
        .map(group_to_clash)
        .collect();

    debug!("Assembled {} proxies", proxies.len());

    (
        ProxyListDocument { proxies },
        RoutingPolicyDocument {
            general: general.cloned(),
            proxy_groups,
            rules: build_rules(settings),
        },
    )
}

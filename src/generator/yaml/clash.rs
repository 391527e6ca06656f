use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Header settings of a Clash client profile
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ClashGeneral {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub socks_port: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allow_lan: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_level: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_controller: Option<String>,
}

impl Default for ClashGeneral {
    fn default() -> Self {
        Self {
            port: Some(7890),
            socks_port: Some(7891),
            allow_lan: Some(true),
            mode: Some("Rule".to_string()),
            log_level: Some("info".to_string()),
            external_controller: Some("127.0.0.1:9090".to_string()),
        }
    }
}

/// WebSocket options of a Clash proxy
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClashWsOpts {
    pub path: String,
    pub headers: BTreeMap<String, String>,
}

/// A single proxy entry in a Clash `proxies` list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ClashProxy {
    pub name: String,
    #[serde(rename = "type")]
    pub proxy_type: String,
    pub server: String,
    pub port: u16,
    pub uuid: String,
    #[serde(rename = "alterId")]
    pub alter_id: u32,
    pub cipher: String,
    pub tls: bool,
    pub network: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub ws_opts: Option<ClashWsOpts>,
}

/// A proxy group entry in `proxy-groups`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClashProxyGroup {
    pub name: String,
    #[serde(rename = "type")]
    pub group_type: String,
    /// Always emitted, even when empty.
    pub proxies: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub interval: Option<u32>,
}

/// Document holding only the proxy definitions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProxyListDocument {
    pub proxies: Vec<ClashProxy>,
}

/// Document holding the selection groups and rules that reference proxies by name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct RoutingPolicyDocument {
    #[serde(flatten)]
    pub general: Option<ClashGeneral>,
    pub proxy_groups: Vec<ClashProxyGroup>,
    pub rules: Vec<String>,
}

/// Self-contained profile with proxies, groups and rules in one file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ClashProfileDocument {
    #[serde(flatten)]
    pub general: Option<ClashGeneral>,
    pub proxies: Vec<ClashProxy>,
    pub proxy_groups: Vec<ClashProxyGroup>,
    pub rules: Vec<String>,
}

impl ClashProfileDocument {
    /// Merge the two split documents into a single profile.
    pub fn combine(proxies: &ProxyListDocument, policy: &RoutingPolicyDocument) -> Self {
        Self {
            general: policy.general.clone(),
            proxies: proxies.proxies.clone(),
            proxy_groups: policy.proxy_groups.clone(),
            rules: policy.rules.clone(),
        }
    }
}

/// Type of proxy group
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProxyGroupType {
    Select,
    URLTest,
}

impl ProxyGroupType {
    /// Get string representation of the proxy group type
    pub fn as_str(&self) -> &'static str {
        match self {
            ProxyGroupType::Select => "select",
            ProxyGroupType::URLTest => "url-test",
        }
    }
}

/// Configuration for a proxy group
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProxyGroupConfig {
    /// Name of the proxy group
    pub name: String,
    /// Type of the proxy group
    pub group_type: ProxyGroupType,
    /// List of proxy names in this group
    pub proxies: Vec<String>,
    /// URL for latency probes, only meaningful for `url-test`
    pub url: Option<String>,
    /// Interval in seconds between probes, only meaningful for `url-test`
    pub interval: Option<u32>,
}

impl ProxyGroupConfig {
    /// Create a new proxy group config with no members
    pub fn new(name: impl Into<String>, group_type: ProxyGroupType) -> Self {
        Self {
            name: name.into(),
            group_type,
            proxies: Vec::new(),
            url: None,
            interval: None,
        }
    }

    /// Get string representation of the group type
    pub fn type_str(&self) -> &'static str {
        self.group_type.as_str()
    }
}

/// A collection of proxy group configurations
pub type ProxyGroupConfigs = Vec<ProxyGroupConfig>;

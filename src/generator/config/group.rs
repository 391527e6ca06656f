use crate::generator::yaml::clash::ClashProxyGroup;
use crate::models::{
    ProxyGroupConfig, ProxyGroupConfigs, ProxyGroupType, DIRECT_POLICY, REJECT_POLICY,
};
use crate::settings::GroupSettings;

/// Build the latency-probe group and the manual selection group.
///
/// Both groups are always returned, with empty member lists when there are
/// no proxies.
pub fn build_proxy_groups(names: &[String], settings: &GroupSettings) -> ProxyGroupConfigs {
    let mut url_test = ProxyGroupConfig::new(&settings.url_test_name, ProxyGroupType::URLTest);
    url_test.proxies = names.to_vec();
    url_test.url = Some(settings.test_url.clone());
    url_test.interval = Some(settings.interval);

    let mut select = ProxyGroupConfig::new(&settings.select_name, ProxyGroupType::Select);
    select.proxies = names.to_vec();
    select.proxies.push(DIRECT_POLICY.to_string());
    select.proxies.push(REJECT_POLICY.to_string());

    vec![url_test, select]
}

/// Convert a group config into its Clash YAML form.
pub fn group_to_clash(group: &ProxyGroupConfig) -> ClashProxyGroup {
    ClashProxyGroup {
        name: group.name.clone(),
        group_type: group.type_str().to_string(),
        proxies: group.proxies.clone(),
        url: group.url.clone(),
        interval: group.interval,
    }
}

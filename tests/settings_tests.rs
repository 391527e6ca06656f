use std::fs;

use subaggregator::settings::{Settings, SettingsError};

#[cfg(test)]
mod settings_tests {
    use super::*;

    #[test]
    fn test_load_without_file_gives_defaults() {
        let settings = Settings::load(None).unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_settings_toml() {
        let toml_content = r#"
[[sources]]
tag = "S1"
url = "https://one.example/vmess.txt"

[[sources]]
tag = "S2"
url = "https://two.example/vmess.txt"

[fetch]
timeout_secs = 5

[groups]
url_test_name = "Auto"
select_name = "Proxy"
interval = 600
extra_rules = ["GEOIP,CN,DIRECT"]

[output]
proxies_path = "providers/free_v2ray.yaml"
profile_path = "profile.yaml"

[general]
port = 7890
mode = "Rule"
"#;
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.toml");
        fs::write(&path, toml_content).unwrap();

        let settings = Settings::load(Some(path.as_path())).unwrap();

        assert_eq!(settings.sources.len(), 2);
        assert_eq!(settings.sources[1].tag, "S2");
        assert_eq!(settings.fetch.timeout_secs, 5);
        assert_eq!(settings.fetch.max_concurrent, 4);
        assert_eq!(settings.groups.url_test_name, "Auto");
        assert_eq!(settings.groups.interval, 600);
        assert_eq!(settings.groups.extra_rules, vec!["GEOIP,CN,DIRECT"]);
        assert_eq!(settings.output.proxies_path, "providers/free_v2ray.yaml");
        assert_eq!(settings.output.policy_path, "config.yaml");
        assert_eq!(settings.output.profile_path.as_deref(), Some("profile.yaml"));

        let general = settings.general.unwrap();
        assert_eq!(general.port, Some(7890));
        assert_eq!(general.mode.as_deref(), Some("Rule"));
        assert_eq!(general.socks_port, None);
    }

    #[test]
    fn test_settings_yaml() {
        let yaml_content = r#"
sources:
  - tag: "S1"
    url: "https://one.example/vmess.txt"
naming:
  max_length: 32
general:
  socks-port: 7891
  allow-lan: true
"#;
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.yml");
        fs::write(&path, yaml_content).unwrap();

        let settings = Settings::load(Some(path.as_path())).unwrap();

        assert_eq!(settings.sources.len(), 1);
        assert_eq!(settings.naming.max_length, 32);
        assert_eq!(settings.groups.select_name, "🌐 PROXY");
        let general = settings.general.unwrap();
        assert_eq!(general.socks_port, Some(7891));
        assert_eq!(general.allow_lan, Some(true));
    }

    #[test]
    fn test_invalid_settings_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.toml");
        fs::write(
            &path,
            r#"
[[sources]]
tag = "S1"
url = "https://one.example"

[[sources]]
tag = "S1"
url = "https://two.example"
"#,
        )
        .unwrap();

        assert!(matches!(
            Settings::load(Some(path.as_path())),
            Err(SettingsError::Invalid(_))
        ));
    }

    #[test]
    fn test_unknown_extension_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.ini");
        fs::write(&path, "[common]\n").unwrap();

        assert!(matches!(
            Settings::load(Some(path.as_path())),
            Err(SettingsError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.toml");
        assert!(matches!(
            Settings::load(Some(path.as_path())),
            Err(SettingsError::Io { .. })
        ));
    }
}

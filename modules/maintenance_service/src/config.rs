//! Configuration for maintenance service module

use serde::Deserialize;
use std::time::Duration;

/// Maintenance service configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Path prefix the site is mounted under
    #[serde(default = "default_www_root")]
    pub www_root: String,

    /// Root allowlist: pages outside the gated surface (exact path match)
    #[serde(default = "default_root_paths")]
    pub root_paths: Vec<String>,

    /// Plugin blocklist: gated integration surfaces (path prefix match)
    #[serde(default = "default_plugin_paths")]
    pub plugin_paths: Vec<String>,

    /// Admin cron entry point, always blocklisted (exact path match)
    #[serde(default = "default_cron_path")]
    pub cron_path: String,

    /// Notice shown when the stored message is empty
    #[serde(default = "default_fallback_message")]
    pub fallback_message: String,

    /// Tenant's user-facing zone as a fixed UTC offset
    #[serde(default)]
    pub utc_offset_minutes: i32,

    /// Upper bound for remote maintenance status queries
    #[serde(default = "default_sync_timeout", with = "humantime_serde")]
    pub sync_timeout: Duration,

    /// Maximum message length accepted at write time
    #[serde(default = "default_max_message_length")]
    pub max_message_length: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            www_root: default_www_root(),
            root_paths: default_root_paths(),
            plugin_paths: default_plugin_paths(),
            cron_path: default_cron_path(),
            fallback_message: default_fallback_message(),
            utc_offset_minutes: 0,
            sync_timeout: default_sync_timeout(),
            max_message_length: default_max_message_length(),
        }
    }
}

impl Config {
    /// Parse a YAML module config section
    pub fn from_yaml_str(yaml: &str) -> anyhow::Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }
}

fn default_www_root() -> String {
    "/".to_string()
}

fn default_root_paths() -> Vec<String> {
    ["/", "/index.php", "/course/view.php", "/my/", "/my/index.php", "/my/courses.php"]
        .into_iter()
        .map(String::from)
        .collect()
}

fn default_plugin_paths() -> Vec<String> {
    [
        "/blocks/opencast/",
        "/mod/opencast/",
        "/admin/tool/opencast/",
        "/filter/opencast/",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

fn default_cron_path() -> String {
    "/admin/cron.php".to_string()
}

fn default_fallback_message() -> String {
    "The video platform is currently under maintenance. Some features are unavailable."
        .to_string()
}

fn default_sync_timeout() -> Duration {
    Duration::from_secs(10)
}

fn default_max_message_length() -> usize {
    4096
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_yaml_uses_defaults() {
        let cfg = Config::from_yaml_str("{}").unwrap();
        assert_eq!(cfg.www_root, "/");
        assert_eq!(cfg.cron_path, "/admin/cron.php");
        assert_eq!(cfg.sync_timeout, Duration::from_secs(10));
        assert!(cfg.root_paths.contains(&"/course/view.php".to_string()));
    }

    #[test]
    fn test_yaml_overrides() {
        let cfg = Config::from_yaml_str(
            r#"
www_root: /moodle
plugin_paths: ["/blocks/video/"]
utc_offset_minutes: 120
sync_timeout: 2s
"#,
        )
        .unwrap();
        assert_eq!(cfg.www_root, "/moodle");
        assert_eq!(cfg.plugin_paths, vec!["/blocks/video/".to_string()]);
        assert_eq!(cfg.utc_offset_minutes, 120);
        assert_eq!(cfg.sync_timeout, Duration::from_secs(2));
    }

    #[test]
    fn test_unknown_field_rejected() {
        assert!(Config::from_yaml_str("maintenance_mode: on").is_err());
    }
}

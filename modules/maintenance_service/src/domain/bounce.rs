//! Bounce strategy: where to send a request that maintenance denied
//!
//! Paths are classified against two static sets:
//! - the **root allowlist**: pages outside the gated surface (site root,
//!   course view, dashboard), matched exactly;
//! - the **plugin blocklist**: the integration's own UI surfaces (prefix match)
//!   plus the admin cron entry point (exact match).
//!
//! A redirect always lands on a root-allowlisted path, and the allowlist never
//! overlaps the blocklist, so a bounce cannot loop.

use crate::config::Config;
use crate::contract::{BounceAction, BounceContext, RequestOrigin};
use std::collections::HashSet;
use url::Url;

/// A URL reduced to its site-relative path and query
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SitePath {
    /// Always `/`-prefixed, with the www root stripped
    pub path: String,
    pub query: Option<String>,
}

impl SitePath {
    /// Reduce an absolute URL, absolute path or relative path
    pub fn parse(url: &str, www_root: &str) -> Self {
        let (path, query) = match Url::parse(url) {
            Ok(parsed) => (parsed.path().to_string(), parsed.query().map(str::to_string)),
            Err(url::ParseError::RelativeUrlWithoutBase) => relative_parts(url),
            Err(_) => split_query(url),
        };

        Self {
            path: strip_www_root(&path, www_root),
            query: query.filter(|q| !q.is_empty()),
        }
    }

    /// Site-relative URL under `www_root`
    pub fn to_site_url(&self, www_root: &str) -> String {
        let mut url = format!("{}{}", root_prefix(www_root), self.path);
        if let Some(query) = &self.query {
            url.push('?');
            url.push_str(query);
        }
        url
    }
}

fn relative_parts(url: &str) -> (String, Option<String>) {
    Url::parse("http://localhost/")
        .and_then(|base| base.join(url))
        .map(|joined| (joined.path().to_string(), joined.query().map(str::to_string)))
        .unwrap_or_else(|_| split_query(url))
}

fn split_query(url: &str) -> (String, Option<String>) {
    let without_fragment = url.split('#').next().unwrap_or_default();
    match without_fragment.split_once('?') {
        Some((path, query)) => (path.to_string(), Some(query.to_string())),
        None => (without_fragment.to_string(), None),
    }
}

/// Path component of the www root without a trailing slash ("" for the host root)
fn root_prefix(www_root: &str) -> String {
    let path = match Url::parse(www_root) {
        Ok(parsed) => parsed.path().to_string(),
        Err(_) => www_root.to_string(),
    };
    path.trim_end_matches('/').to_string()
}

fn strip_www_root(path: &str, www_root: &str) -> String {
    let prefix = root_prefix(www_root);
    let rest = if prefix.is_empty() {
        path
    } else {
        match path.strip_prefix(prefix.as_str()) {
            Some(rest) if rest.is_empty() || rest.starts_with('/') => rest,
            _ => path,
        }
    };

    if rest.starts_with('/') {
        rest.to_string()
    } else {
        format!("/{}", rest)
    }
}

/// Resolves denied requests to a [`BounceAction`]
#[derive(Debug, Clone)]
pub struct BounceStrategy {
    root_paths: HashSet<String>,
    plugin_paths: Vec<String>,
    cron_path: String,
}

impl BounceStrategy {
    pub fn new(
        root_paths: impl IntoIterator<Item = String>,
        plugin_paths: impl IntoIterator<Item = String>,
        cron_path: impl Into<String>,
    ) -> Self {
        let mut strategy = Self {
            root_paths: HashSet::new(),
            plugin_paths: plugin_paths.into_iter().collect(),
            cron_path: cron_path.into(),
        };

        for path in root_paths {
            if strategy.is_blocklisted(&path) {
                tracing::warn!(path = %path, "Ignoring root path that is also blocklisted");
                continue;
            }
            strategy.root_paths.insert(path);
        }

        strategy
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.root_paths.iter().cloned(),
            config.plugin_paths.iter().cloned(),
            config.cron_path.clone(),
        )
    }

    /// Path is in the root allowlist
    pub fn is_root(&self, path: &str) -> bool {
        self.root_paths.contains(path)
    }

    /// Path is the admin cron entry point
    pub fn is_cron(&self, path: &str) -> bool {
        path == self.cron_path
    }

    /// Path belongs to the gated surface
    pub fn is_blocklisted(&self, path: &str) -> bool {
        self.is_cron(path)
            || self.plugin_paths.iter().any(|prefix| {
                path.starts_with(prefix.as_str()) || prefix.strip_suffix('/') == Some(path)
            })
    }

    /// Decide how to divert a denied request
    pub fn resolve(&self, context: &BounceContext) -> BounceAction {
        if context.origin != RequestOrigin::Web {
            return BounceAction::ThrowAccessDenied;
        }

        let target = SitePath::parse(&context.target, &context.www_root);

        // Admins keep working during maintenance; only the cron endpoint is gated.
        if context.is_site_admin && !self.is_cron(&target.path) {
            return BounceAction::PassThrough;
        }

        let referer = context
            .referer
            .as_deref()
            .map(|referer| SitePath::parse(referer, &context.www_root));
        let from_blocklisted = referer
            .as_ref()
            .is_some_and(|referer| self.is_blocklisted(&referer.path));
        let target_blocklisted = self.is_blocklisted(&target.path);

        // Traffic that never touches the gated surface, or that leaves it.
        if (!from_blocklisted && !target_blocklisted)
            || (self.is_root(&target.path) && from_blocklisted)
        {
            return BounceAction::PassThrough;
        }

        if context.is_ajax {
            return BounceAction::ThrowAccessDenied;
        }

        if let Some(referer) = referer.filter(|referer| self.is_root(&referer.path)) {
            if target_blocklisted {
                return BounceAction::Redirect(referer.to_site_url(&context.www_root));
            }
        }

        if let Some(home) = context
            .home
            .as_deref()
            .map(|home| SitePath::parse(home, &context.www_root))
        {
            if home.path != "/" && home.path != target.path && !self.is_blocklisted(&home.path) {
                return BounceAction::Redirect(home.to_site_url(&context.www_root));
            }
        }

        BounceAction::CloseWindow
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PLUGIN_PAGE: &str = "/blocks/opencast/index.php?courseid=4";

    fn strategy() -> BounceStrategy {
        BounceStrategy::from_config(&Config::default())
    }

    #[test]
    fn test_site_path_parsing() {
        assert_eq!(
            SitePath::parse("https://lms.example.org/moodle/mod/opencast/view.php?id=3#top", "/moodle"),
            SitePath {
                path: "/mod/opencast/view.php".to_string(),
                query: Some("id=3".to_string()),
            }
        );
        assert_eq!(SitePath::parse("/moodle", "https://lms.example.org/moodle/").path, "/");
        assert_eq!(SitePath::parse("/moodlebeta/index.php", "/moodle").path, "/moodlebeta/index.php");
        assert_eq!(SitePath::parse("my/", "/").path, "/my/");
        assert_eq!(SitePath::parse("/my/?", "/").query, None);
    }

    #[test]
    fn test_site_url_round_trip_keeps_query() {
        let path = SitePath::parse("https://lms.example.org/moodle/course/view.php?id=9", "/moodle");
        assert_eq!(path.to_site_url("/moodle/"), "/moodle/course/view.php?id=9");
        assert_eq!(SitePath::parse("/", "/").to_site_url("/"), "/");
    }

    #[test]
    fn test_classification() {
        let s = strategy();
        assert!(s.is_root("/"));
        assert!(s.is_root("/course/view.php"));
        assert!(!s.is_root("/course/edit.php"));
        assert!(s.is_blocklisted("/blocks/opencast/index.php"));
        assert!(s.is_blocklisted("/mod/opencast"));
        assert!(s.is_blocklisted("/admin/cron.php"));
        assert!(!s.is_blocklisted("/admin/cron.phpx"));
        assert!(!s.is_blocklisted("/mod/forum/view.php"));
    }

    #[test]
    fn test_overlapping_root_path_is_dropped() {
        let s = BounceStrategy::new(
            vec!["/".to_string(), "/mod/opencast/index.php".to_string()],
            vec!["/mod/opencast/".to_string()],
            "/admin/cron.php",
        );
        assert!(s.is_root("/"));
        assert!(!s.is_root("/mod/opencast/index.php"));
    }

    #[test]
    fn test_non_interactive_always_throws() {
        let s = strategy();
        for origin in [RequestOrigin::Cli, RequestOrigin::Background, RequestOrigin::Test] {
            let ctx = BounceContext::non_interactive(origin).with_site_admin(true);
            assert_eq!(s.resolve(&ctx), BounceAction::ThrowAccessDenied);
        }
    }

    #[test]
    fn test_site_admin_bypasses_except_cron() {
        let s = strategy();
        let ctx = BounceContext::web(PLUGIN_PAGE)
            .with_referer("/")
            .with_ajax(true)
            .with_site_admin(true);
        assert_eq!(s.resolve(&ctx), BounceAction::PassThrough);

        let cron = BounceContext::web("/admin/cron.php").with_site_admin(true);
        assert_eq!(s.resolve(&cron), BounceAction::CloseWindow);

        let cron_ajax = BounceContext::web("/admin/cron.php")
            .with_site_admin(true)
            .with_ajax(true);
        assert_eq!(s.resolve(&cron_ajax), BounceAction::ThrowAccessDenied);
    }

    #[test]
    fn test_neutral_traffic_passes() {
        let s = strategy();
        let ctx = BounceContext::web("/course/view.php?id=2").with_referer("/my/");
        assert_eq!(s.resolve(&ctx), BounceAction::PassThrough);

        let no_referer = BounceContext::web("/mod/forum/view.php?id=1");
        assert_eq!(s.resolve(&no_referer), BounceAction::PassThrough);
    }

    #[test]
    fn test_leaving_gated_surface_passes() {
        let s = strategy();
        let ctx = BounceContext::web("/course/view.php?id=2").with_referer(PLUGIN_PAGE);
        assert_eq!(s.resolve(&ctx), BounceAction::PassThrough);
    }

    #[test]
    fn test_ajax_throws() {
        let s = strategy();
        let ctx = BounceContext::web("/blocks/opencast/serveseriesid.php")
            .with_referer(PLUGIN_PAGE)
            .with_ajax(true);
        assert_eq!(s.resolve(&ctx), BounceAction::ThrowAccessDenied);
    }

    #[test]
    fn test_entering_from_root_redirects_back() {
        let s = strategy();
        let ctx = BounceContext::web(PLUGIN_PAGE).with_referer("/course/view.php?id=4");
        assert_eq!(
            s.resolve(&ctx),
            BounceAction::Redirect("/course/view.php?id=4".to_string())
        );
    }

    #[test]
    fn test_redirect_stays_on_site() {
        let s = strategy();
        let ctx = BounceContext::web("https://lms.example.org/moodle/mod/opencast/view.php?id=3")
            .with_referer("https://lms.example.org/moodle/my/")
            .with_www_root("https://lms.example.org/moodle");
        assert_eq!(s.resolve(&ctx), BounceAction::Redirect("/moodle/my/".to_string()));
    }

    #[test]
    fn test_home_redirect_when_referer_unusable() {
        let s = strategy();
        let ctx = BounceContext::web("/blocks/opencast/addvideo.php")
            .with_referer(PLUGIN_PAGE)
            .with_home("/course/view.php?id=4");
        assert_eq!(
            s.resolve(&ctx),
            BounceAction::Redirect("/course/view.php?id=4".to_string())
        );
    }

    #[test]
    fn test_close_window_as_last_resort() {
        let s = strategy();
        let plugin_to_plugin = BounceContext::web("/blocks/opencast/addvideo.php").with_referer(PLUGIN_PAGE);
        assert_eq!(s.resolve(&plugin_to_plugin), BounceAction::CloseWindow);

        let site_home = BounceContext::web(PLUGIN_PAGE).with_home("/");
        assert_eq!(s.resolve(&site_home), BounceAction::CloseWindow);

        let blocked_home = BounceContext::web(PLUGIN_PAGE).with_home("/mod/opencast/view.php?id=1");
        assert_eq!(s.resolve(&blocked_home), BounceAction::CloseWindow);
    }

    #[test]
    fn test_redirect_target_is_a_safe_landing() {
        let s = strategy();
        let cfg = Config::default();
        for root in &cfg.root_paths {
            for plugin in &cfg.plugin_paths {
                let target = format!("{}index.php", plugin);
                let ctx = BounceContext::web(target).with_referer(root.clone());
                let BounceAction::Redirect(landing) = s.resolve(&ctx) else {
                    panic!("expected redirect for {}", root);
                };
                assert_eq!(&landing, root);

                let landing_path = SitePath::parse(&landing, "/");
                assert!(!s.is_blocklisted(&landing_path.path));

                let follow_up = BounceContext::web(landing.clone()).with_referer(landing);
                assert_eq!(s.resolve(&follow_up), BounceAction::PassThrough);
            }
        }
    }
}

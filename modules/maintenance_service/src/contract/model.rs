//! Contract models for maintenance service
//!
//! These models are transport-agnostic and used for inter-module communication.
//! NO serde derives - these are pure domain models.

use std::sync::atomic::{AtomicBool, Ordering};

/// Tri-state operational mode of a tenant instance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MaintenanceMode {
    /// No restriction
    #[default]
    Disabled,
    /// Only read operations reach the remote platform
    ReadOnly,
    /// Every remote operation is refused
    Enabled,
}

impl MaintenanceMode {
    /// Stable storage code
    pub fn code(self) -> i16 {
        match self {
            Self::Disabled => 0,
            Self::ReadOnly => 1,
            Self::Enabled => 2,
        }
    }

    /// Inverse of [`MaintenanceMode::code`]
    pub fn from_code(code: i16) -> Option<Self> {
        match code {
            0 => Some(Self::Disabled),
            1 => Some(Self::ReadOnly),
            2 => Some(Self::Enabled),
            _ => None,
        }
    }

    /// Mode the remote platform reports for itself
    pub fn from_remote(status: RemoteMaintenanceStatus) -> Self {
        match (status.in_maintenance, status.read_only) {
            (false, _) => Self::Disabled,
            (true, true) => Self::ReadOnly,
            (true, false) => Self::Enabled,
        }
    }
}

/// Severity used when rendering the maintenance notice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum NotificationLevel {
    Info,
    Success,
    #[default]
    Warning,
    Error,
}

impl NotificationLevel {
    /// Stable storage code
    pub fn code(self) -> i16 {
        match self {
            Self::Info => 0,
            Self::Success => 1,
            Self::Warning => 2,
            Self::Error => 3,
        }
    }

    /// Inverse of [`NotificationLevel::code`]
    pub fn from_code(code: i16) -> Option<Self> {
        match code {
            0 => Some(Self::Info),
            1 => Some(Self::Success),
            2 => Some(Self::Warning),
            3 => Some(Self::Error),
            _ => None,
        }
    }
}

/// One end of the maintenance window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WindowBound {
    /// Whether this bound takes part in the evaluation
    pub enabled: bool,
    /// Unix timestamp (seconds)
    pub timestamp: i64,
}

impl WindowBound {
    /// An enabled bound at `timestamp`
    pub fn at(timestamp: i64) -> Self {
        Self {
            enabled: true,
            timestamp,
        }
    }

    /// A bound that is ignored
    pub fn disabled() -> Self {
        Self::default()
    }
}

/// Maintenance configuration of one tenant instance
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MaintenanceConfig {
    /// Current mode
    pub mode: MaintenanceMode,
    /// Severity of the notice shown while maintenance is active
    pub notification_level: NotificationLevel,
    /// Rich text notice; empty means "use the fallback message"
    pub message: String,
    /// Start of the window
    pub start: WindowBound,
    /// End of the window
    pub end: WindowBound,
}

impl MaintenanceConfig {
    /// Config with `mode` and no time window
    pub fn with_mode(mode: MaintenanceMode) -> Self {
        Self {
            mode,
            ..Self::default()
        }
    }
}

/// Where the current request came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestOrigin {
    /// Interactive browser request (page load, AJAX, popup)
    Web,
    /// Command line script
    Cli,
    /// Scheduled or ad-hoc background job
    Background,
    /// Unit or integration test run
    Test,
    /// Nothing identifies the caller
    Unknown,
}

/// Request facts needed to pick a bounce action, captured once per inbound request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BounceContext {
    /// Referer URL or path, if the browser sent one
    pub referer: Option<String>,
    /// URL or path being requested
    pub target: String,
    /// AJAX, popup or page-fragment request
    pub is_ajax: bool,
    /// Caller classification
    pub origin: RequestOrigin,
    /// Caller is a site administrator
    pub is_site_admin: bool,
    /// Path the site is mounted under
    pub www_root: String,
    /// Non-root home page of the current context (e.g. the course page), if any
    pub home: Option<String>,
}

impl BounceContext {
    /// Interactive browser request for `target`
    pub fn web(target: impl Into<String>) -> Self {
        Self {
            referer: None,
            target: target.into(),
            is_ajax: false,
            origin: RequestOrigin::Web,
            is_site_admin: false,
            www_root: "/".to_string(),
            home: None,
        }
    }

    /// Non-interactive context of the given origin
    pub fn non_interactive(origin: RequestOrigin) -> Self {
        Self {
            origin,
            ..Self::web("/")
        }
    }

    pub fn with_referer(mut self, referer: impl Into<String>) -> Self {
        self.referer = Some(referer.into());
        self
    }

    pub fn with_ajax(mut self, is_ajax: bool) -> Self {
        self.is_ajax = is_ajax;
        self
    }

    pub fn with_site_admin(mut self, is_site_admin: bool) -> Self {
        self.is_site_admin = is_site_admin;
        self
    }

    pub fn with_www_root(mut self, www_root: impl Into<String>) -> Self {
        self.www_root = www_root.into();
        self
    }

    pub fn with_home(mut self, home: impl Into<String>) -> Self {
        self.home = Some(home.into());
        self
    }
}

/// What to do with a request that was denied
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BounceAction {
    /// Send the browser to this URL
    Redirect(String),
    /// Surface an access-denied error to the caller
    ThrowAccessDenied,
    /// Close the popup/window; no safe redirect target exists
    CloseWindow,
    /// Traffic is leaving the gated surface; do nothing
    PassThrough,
}

/// Notice displayed while maintenance is active
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationPayload {
    pub message: String,
    pub level: NotificationLevel,
}

/// Per-page de-duplication flag for the maintenance notice
///
/// One scope is created per rendered page; only the first `notify` through a
/// scope yields a payload.
#[derive(Debug, Default)]
pub struct NotificationScope {
    notified: AtomicBool,
}

impl NotificationScope {
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks the scope as notified; returns true only for the first caller
    pub fn claim(&self) -> bool {
        !self.notified.swap(true, Ordering::AcqRel)
    }

    pub fn is_notified(&self) -> bool {
        self.notified.load(Ordering::Acquire)
    }
}

/// Maintenance state the remote platform reports about itself
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RemoteMaintenanceStatus {
    pub in_maintenance: bool,
    pub read_only: bool,
}

/// Point-in-time view of a tenant's maintenance state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaintenanceStatus {
    pub mode: MaintenanceMode,
    /// Whether the window is active right now
    pub active: bool,
    /// Notice to show, present only while active
    pub notification: Option<NotificationPayload>,
}

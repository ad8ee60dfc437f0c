use std::fmt;

use web_sys::window;

pub const DEFAULT_MOUNT_SELECTOR: &str = "#app";

const DEVELOPMENT_HOSTS: [&str; 3] = ["localhost", "127.0.0.1", "[::1]"];

/// CSS selector of the element the application is mounted into.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MountTarget(String);

impl MountTarget {
    /// Returns `None` for a blank selector.
    pub fn new(selector: impl Into<String>) -> Option<Self> {
        let selector = selector.into();
        let trimmed = selector.trim();
        if trimmed.is_empty() {
            return None;
        }
        Some(Self(trimmed.to_string()))
    }

    pub fn selector(&self) -> &str {
        &self.0
    }
}

impl Default for MountTarget {
    fn default() -> Self {
        Self(DEFAULT_MOUNT_SELECTOR.to_string())
    }
}

impl fmt::Display for MountTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum AnalyticsMode {
    #[default]
    Auto,
    Development,
    Production,
}

impl AnalyticsMode {
    pub const fn as_str(&self) -> &'static str {
        match self {
            AnalyticsMode::Auto => "auto",
            AnalyticsMode::Development => "development",
            AnalyticsMode::Production => "production",
        }
    }

    /// Collapses `Auto` into a concrete mode. Debug builds and pages served
    /// from a loopback host count as development.
    pub fn resolve(self, host: Option<&str>, debug_build: bool) -> AnalyticsMode {
        match self {
            AnalyticsMode::Auto => {
                if debug_build || host.map(is_development_host).unwrap_or(false) {
                    AnalyticsMode::Development
                } else {
                    AnalyticsMode::Production
                }
            }
            other => other,
        }
    }
}

/// `host` may carry a port, as `Location::host` returns it.
pub fn is_development_host(host: &str) -> bool {
    let name = if host.starts_with('[') {
        host.split_inclusive(']').next().unwrap_or(host)
    } else {
        host.split(':').next().unwrap_or(host)
    };
    DEVELOPMENT_HOSTS.contains(&name)
}

#[derive(Clone, Debug, PartialEq)]
pub struct AnalyticsConfig {
    pub enabled: bool,
    pub mode: AnalyticsMode,
    pub debug: bool,
    pub script_src: Option<String>,
    pub endpoint: Option<String>,
    pub dsn: Option<String>,
    pub disable_auto_track: bool,
    pub framework: Option<String>,
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            mode: AnalyticsMode::Auto,
            debug: true,
            script_src: None,
            endpoint: None,
            dsn: None,
            disable_auto_track: false,
            framework: Some("yew".to_string()),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct AppConfig {
    pub mount: MountTarget,
    pub analytics: AnalyticsConfig,
    pub log_level: log::Level,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            mount: MountTarget::default(),
            analytics: AnalyticsConfig::default(),
            log_level: if cfg!(debug_assertions) {
                log::Level::Debug
            } else {
                log::Level::Info
            },
        }
    }
}

/// Host (and port) of the current page, if running in a browser.
pub fn current_host() -> Option<String> {
    window()?.location().host().ok()
}

use crate::errors::ConfigError;
use reqwest::Url;
use std::{env, time::Duration};
use tracing::warn;

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_BACKEND_URL: &str = "http://127.0.0.1:8000";
const DEFAULT_STATUS_HIDE_MS: u64 = 5000;
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;

/// How the widget brings its view back in line with the backend after a mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReconcilePolicy {
    /// Re-fetch the whole roster and rebuild.
    FullReload,
    /// Apply the change to the local roster only.
    OptimisticPatch,
}

impl ReconcilePolicy {
    fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "reload" | "full" | "full_reload" => Some(Self::FullReload),
            "patch" | "optimistic" | "optimistic_patch" => Some(Self::OptimisticPatch),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoveControl {
    Icon,
    Text,
}

impl RemoveControl {
    fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "icon" => Some(Self::Icon),
            "text" => Some(Self::Text),
            _ => None,
        }
    }
}

/// Rendering and reconciliation knobs shared by handlers.
#[derive(Debug, Clone, Copy)]
pub struct Settings {
    pub signup_policy: ReconcilePolicy,
    pub removal_policy: ReconcilePolicy,
    pub remove_control: RemoveControl,
    pub status_hide_after: Duration,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            signup_policy: ReconcilePolicy::OptimisticPatch,
            removal_policy: ReconcilePolicy::FullReload,
            remove_control: RemoveControl::Icon,
            status_hide_after: Duration::from_millis(DEFAULT_STATUS_HIDE_MS),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub backend_url: Url,
    pub request_timeout: Duration,
    pub settings: Settings,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from any key lookup. Unparseable values fall
    /// back to their defaults, except the backend url which must be usable.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let port = parsed(&lookup, "PORT", |value| value.parse::<u16>().ok()).unwrap_or(DEFAULT_PORT);

        let raw_url = lookup("ROSTER_BACKEND_URL").unwrap_or_else(|| DEFAULT_BACKEND_URL.to_string());
        let backend_url = Url::parse(raw_url.trim()).map_err(|err| ConfigError::BackendUrl {
            value: raw_url.clone(),
            reason: err.to_string(),
        })?;
        if backend_url.cannot_be_a_base() {
            return Err(ConfigError::BackendUrl {
                value: raw_url,
                reason: "not a base url".to_string(),
            });
        }

        let defaults = Settings::default();
        let settings = Settings {
            signup_policy: parsed(&lookup, "ROSTER_SIGNUP_RECONCILE", ReconcilePolicy::parse)
                .unwrap_or(defaults.signup_policy),
            removal_policy: parsed(&lookup, "ROSTER_REMOVAL_RECONCILE", ReconcilePolicy::parse)
                .unwrap_or(defaults.removal_policy),
            remove_control: parsed(&lookup, "ROSTER_REMOVE_CONTROL", RemoveControl::parse)
                .unwrap_or(defaults.remove_control),
            status_hide_after: parsed(&lookup, "ROSTER_STATUS_HIDE_MS", |value| {
                value.parse::<u64>().ok()
            })
            .map(Duration::from_millis)
            .unwrap_or(defaults.status_hide_after),
        };

        let request_timeout = parsed(&lookup, "ROSTER_REQUEST_TIMEOUT_SECS", |value| {
            value.parse::<u64>().ok().filter(|secs| *secs > 0)
        })
        .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS);

        Ok(Self {
            port,
            backend_url,
            request_timeout: Duration::from_secs(request_timeout),
            settings,
        })
    }
}

fn parsed<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    parse: impl Fn(&str) -> Option<T>,
) -> Option<T> {
    let value = lookup(key)?;
    let result = parse(value.trim());
    if result.is_none() {
        warn!("ignoring invalid {key}={value:?}, using default");
    }
    result
}

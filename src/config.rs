//! # Registry configuration

use crate::common::ThreadCheck;
use serde::Deserialize;

/// Settings for a [Registry](crate::registry::Registry)
///
/// Deserializable so a host application can embed it in its own
/// configuration file; every field has a default.
///
/// ```rust
/// let config: intercore::Config =
///     serde_json::from_str(r#"{ "max_channels": 64, "thread_check": "log" }"#).unwrap();
/// assert_eq!(config.max_channels, Some(64));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Upper bound on the number of channels, unlimited if unset
    ///
    /// Channels are never removed, so this caps the registry's growth.
    pub max_channels: Option<usize>,
    /// Behaviour when the registry is used from a foreign thread
    pub thread_check: ThreadCheck,
}

impl Config {
    /// Sets [Config::max_channels]
    pub fn with_max_channels(mut self, max: usize) -> Self {
        self.max_channels = Some(max);
        self
    }

    /// Sets [Config::thread_check]
    pub fn with_thread_check(mut self, check: ThreadCheck) -> Self {
        self.thread_check = check;
        self
    }
}

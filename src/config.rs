use tracing::trace;

use crate::registry::DEFAULT_INTERVAL_SECS;

#[derive(Debug, Clone, serde::Deserialize)]
pub struct Config {
    /// Address the HTTP server binds to
    #[serde(default = "default_addr")]
    pub addr: String,

    #[serde(default = "crate::util::get_default_port")]
    pub port: u16,

    /// Base URL of the Hermes price-feed endpoint
    #[serde(default = "crate::util::get_hermes_url")]
    pub hermes_url: String,

    /// Timeout for a single outbound price fetch, in seconds
    #[serde(default = "default_fetch_timeout")]
    pub fetch_timeout_secs: u64,

    /// Polling interval used when a start request omits one, in seconds
    #[serde(default = "default_interval")]
    pub default_interval_secs: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            addr: default_addr(),
            port: crate::util::get_port(),
            hermes_url: crate::util::get_hermes_url(),
            fetch_timeout_secs: default_fetch_timeout(),
            default_interval_secs: default_interval(),
        }
    }
}

fn default_addr() -> String {
    crate::util::get_addr().to_string()
}

fn default_fetch_timeout() -> u64 {
    10
}

fn default_interval() -> f64 {
    DEFAULT_INTERVAL_SECS
}

pub fn read_config_file(path: &str) -> anyhow::Result<Config> {
    let file_content = std::fs::read_to_string(path)?;
    serde_json::from_str(&file_content)
        .map_err(|_| anyhow::anyhow!("Invalid configuration file provided!"))
        .inspect(|config| trace!("loaded config: {config:?}"))
}

use std::env;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_USER_AGENT: &str = concat!("http-explorer/", env!("CARGO_PKG_VERSION"));
pub const DEFAULT_LOG_FILTER: &str = "http_explorer=info";

pub struct Config {
    /// Request timeout; `None` leaves hung connections to the client's defaults
    pub timeout: Option<Duration>,
    pub user_agent: String,
    /// Where tracing output goes. The terminal belongs to the UI, so no file means no logs.
    pub log_file: Option<PathBuf>,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            timeout: lookup("HTTP_EXPLORER_TIMEOUT_SECS")
                .and_then(|s| s.trim().parse::<u64>().ok())
                .filter(|&secs| secs > 0)
                .map(Duration::from_secs),
            user_agent: lookup("HTTP_EXPLORER_USER_AGENT")
                .filter(|s| !s.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_USER_AGENT.to_string()),
            log_file: lookup("HTTP_EXPLORER_LOG")
                .filter(|s| !s.is_empty())
                .map(PathBuf::from),
        }
    }
}

use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

// Wire defaults - the Resolume OSC input listens on 7000 out of the box
pub const DEFAULT_OSC_HOST: &str = "127.0.0.1";
pub const DEFAULT_OSC_PORT: u16 = 7000;
pub const DEFAULT_FAILURE_LOG: &str = "error_log.txt";
/// Wait-loop quantum in seconds. Dispatch happens within one quantum of the
/// true trigger time; tighter precision is not a goal.
pub const TICK_SECS: u64 = 1;

/// Top-level config (cuepilot.toml + CUEPILOT_* env overrides).
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct CuepilotConfig {
    #[serde(default)]
    pub osc: OscConfig,
    #[serde(default)]
    pub schedule: ScheduleConfig,
    #[serde(default)]
    pub failure_log: FailureLogConfig,
    #[serde(default)]
    pub retry: RetryConfig,
}

/// Target endpoint for the OSC transport. Fixed for the lifetime of a run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OscConfig {
    #[serde(default = "default_osc_host")]
    pub host: String,
    #[serde(default = "default_osc_port")]
    pub port: u16,
}

impl Default for OscConfig {
    fn default() -> Self {
        Self {
            host: default_osc_host(),
            port: default_osc_port(),
        }
    }
}

/// Where the cue sheet comes from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleConfig {
    /// Explicit source file. When unset, the schedule directory is scanned
    /// for a single CSV cue sheet.
    pub path: Option<String>,
    /// Directory scanned when `path` is unset (default: current directory).
    #[serde(default = "default_schedule_dir")]
    pub dir: String,
    /// Force a backend instead of inferring one from the file:
    /// "table", "keyvalue", "timelist", or "calendar".
    pub kind: Option<String>,
    /// Identity this machine answers to in calendar event summaries.
    pub identity: Option<String>,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            path: None,
            dir: default_schedule_dir(),
            kind: None,
            identity: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FailureLogConfig {
    #[serde(default = "default_failure_log")]
    pub path: String,
}

impl Default for FailureLogConfig {
    fn default() -> Self {
        Self {
            path: default_failure_log(),
        }
    }
}

/// Bounded retry for one dispatch. Two attempts total, one second apart.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetryConfig {
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
    #[serde(default = "default_retry_delay_secs")]
    pub delay_secs: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            delay_secs: default_retry_delay_secs(),
        }
    }
}

fn default_osc_host() -> String {
    DEFAULT_OSC_HOST.to_string()
}
fn default_osc_port() -> u16 {
    DEFAULT_OSC_PORT
}
fn default_schedule_dir() -> String {
    ".".to_string()
}
fn default_failure_log() -> String {
    DEFAULT_FAILURE_LOG.to_string()
}
fn default_max_attempts() -> u32 {
    2
}
fn default_retry_delay_secs() -> u64 {
    1
}

impl CuepilotConfig {
    /// Load config from a TOML file with CUEPILOT_* env var overrides.
    ///
    /// Env keys use a double underscore between sections so snake_case
    /// fields stay addressable: `CUEPILOT_OSC__PORT`,
    /// `CUEPILOT_RETRY__MAX_ATTEMPTS`, `CUEPILOT_FAILURE_LOG__PATH`.
    ///
    /// Checks in order:
    ///   1. Explicit path argument
    ///   2. CUEPILOT_CONFIG env var
    ///   3. ./cuepilot.toml
    pub fn load(config_path: Option<&str>) -> crate::error::Result<Self> {
        let path = config_path
            .map(String::from)
            .unwrap_or_else(default_config_path);

        let config: CuepilotConfig = Figment::new()
            .merge(Toml::file(&path))
            .merge(Env::prefixed("CUEPILOT_").split("__"))
            .extract()
            .map_err(|e| crate::error::CoreError::Config(e.to_string()))?;

        Ok(config)
    }

    /// The `host:port` endpoint string for the run.
    pub fn endpoint(&self) -> String {
        format!("{}:{}", self.osc.host, self.osc.port)
    }
}

fn default_config_path() -> String {
    std::env::var("CUEPILOT_CONFIG").unwrap_or_else(|_| "cuepilot.toml".to_string())
}

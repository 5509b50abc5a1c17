//! Startup configuration: hardcoded defaults, then environment, then command line.
//! Read once; nothing is persisted.

use std::time::Duration;

use crate::limit::Limit;

pub const DEFAULT_BASE_URL: &str = "http://localhost:4000";
pub const DEFAULT_SENSOR_ID: &str = "sensor-1";
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(10);

pub const ENV_BASE_URL: &str = "SENSORTOP_BASE_URL";
pub const ENV_SENSOR_ID: &str = "SENSORTOP_SENSOR_ID";
pub const ENV_LIMIT: &str = "SENSORTOP_LIMIT";

#[derive(Debug, Clone, PartialEq)]
pub struct MonitorConfig {
    pub base_url: String,
    pub sensor_id: String,
    pub limit: Limit,
    pub poll_interval: Duration,
    /// Per-request timeout handed to the HTTP client. `None` leaves it to the transport.
    pub request_timeout: Option<Duration>,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.into(),
            sensor_id: DEFAULT_SENSOR_ID.into(),
            limit: Limit::DEFAULT,
            poll_interval: DEFAULT_POLL_INTERVAL,
            request_timeout: None,
        }
    }
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct ParsedArgs {
    pub url: Option<String>,
    pub sensor: Option<String>,
    pub limit: Option<String>,
    pub dry_run: bool,
}

pub fn usage(prog: &str) -> String {
    format!(
        "Usage: {prog} [--url URL|-u URL] [--sensor ID|-s ID] [--limit N|-n N] [--dry-run] [http://HOST:PORT]\n\
         Env: {ENV_BASE_URL}, {ENV_SENSOR_ID}, {ENV_LIMIT}; logging via SENSORTOP_LOG"
    )
}

/// `Err` carries the text to print (usage or a complaint) before exiting.
pub fn parse_args<I: IntoIterator<Item = String>>(args: I) -> Result<ParsedArgs, String> {
    let mut it = args.into_iter();
    let prog = it.next().unwrap_or_else(|| "sensortop".into());
    let mut out = ParsedArgs::default();

    while let Some(arg) = it.next() {
        match arg.as_str() {
            "-h" | "--help" => return Err(usage(&prog)),
            "--url" | "-u" => out.url = it.next(),
            "--sensor" | "-s" => out.sensor = it.next(),
            "--limit" | "-n" => out.limit = it.next(),
            "--dry-run" => out.dry_run = true,
            _ if arg.starts_with("--url=") => out.url = value_of(&arg),
            _ if arg.starts_with("--sensor=") => out.sensor = value_of(&arg),
            _ if arg.starts_with("--limit=") => out.limit = value_of(&arg),
            _ if arg.starts_with('-') => {
                return Err(format!("Unknown option '{arg}'. {}", usage(&prog)));
            }
            _ => {
                if out.url.is_none() {
                    out.url = Some(arg);
                } else {
                    return Err(format!("Unexpected argument. {}", usage(&prog)));
                }
            }
        }
    }
    Ok(out)
}

fn value_of(arg: &str) -> Option<String> {
    arg.split_once('=')
        .map(|(_, v)| v.to_string())
        .filter(|v| !v.is_empty())
}

impl MonitorConfig {
    /// Layer env (through `lookup`) and parsed args over the defaults.
    pub fn resolve<F>(args: &ParsedArgs, lookup: F) -> Result<Self, String>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = MonitorConfig::default();
        let env = |k: &str| lookup(k).filter(|v| !v.trim().is_empty());

        if let Some(v) = args.url.clone().or_else(|| env(ENV_BASE_URL)) {
            cfg.base_url = v.trim().trim_end_matches('/').to_string();
        }
        if let Some(v) = args.sensor.clone().or_else(|| env(ENV_SENSOR_ID)) {
            cfg.sensor_id = v.trim().to_string();
        }
        if let Some(v) = args.limit.clone().or_else(|| env(ENV_LIMIT)) {
            cfg.limit = v.parse::<Limit>().map_err(|e| e.to_string())?;
        }
        url::Url::parse(&cfg.base_url)
            .map_err(|e| format!("invalid base URL '{}': {e}", cfg.base_url))?;
        Ok(cfg)
    }

    pub fn from_env_and_args(args: &ParsedArgs) -> Result<Self, String> {
        Self::resolve(args, |k| std::env::var(k).ok())
    }
}

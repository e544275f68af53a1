use std::path::{Path, PathBuf};

use once_cell::sync::OnceCell;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt as _;
use tracing_subscriber::util::SubscriberInitExt as _;

static INIT: OnceCell<()> = OnceCell::new();

const DEFAULT_LOG_FILE: &str = "agent-studio.logs.jsonl";

/// Logging settings resolved from the environment.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LogSettings {
    pub enabled: bool,
    /// Filter directive; `None` defers to `RUST_LOG`, then `info`.
    pub level: Option<String>,
    /// JSONL destination; `None` means compact console output on stderr.
    pub json_path: Option<PathBuf>,
}

impl LogSettings {
    /// Reads:
    /// - `STUDIO_OBSERVABILITY_ENABLED`: on/off flag, default on.
    /// - `STUDIO_LOG_LEVEL`: filter directive (`info`, `agent_studio_core=debug`, ...).
    /// - `STUDIO_JSON_LOG_PATH`: write JSONL there instead of the console.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let enabled = lookup("STUDIO_OBSERVABILITY_ENABLED")
            .and_then(|v| parse_bool_env(&v))
            .unwrap_or(true);
        Self {
            enabled,
            level: lookup("STUDIO_LOG_LEVEL").filter(|v| !v.trim().is_empty()),
            json_path: lookup("STUDIO_JSON_LOG_PATH")
                .filter(|v| !v.trim().is_empty())
                .map(PathBuf::from),
        }
    }

    fn env_filter(&self) -> EnvFilter {
        self.level
            .as_deref()
            .and_then(|level| EnvFilter::try_new(level).ok())
            .or_else(|| EnvFilter::try_from_default_env().ok())
            .unwrap_or_else(|| EnvFilter::new("info"))
    }
}

fn parse_bool_env(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" | "enabled" => Some(true),
        "0" | "false" | "no" | "off" | "disabled" => Some(false),
        _ => None,
    }
}

fn split_log_path(path: &Path) -> (PathBuf, String) {
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."));
    let file = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or(DEFAULT_LOG_FILE)
        .to_string();
    (dir, file)
}

/// Installs the global subscriber from `LogSettings::from_env()`. Later
/// calls are no-ops.
pub fn init_observability() {
    init_with(LogSettings::from_env());
}

/// Installs the global subscriber once. Results stay on stdout; console logs
/// go to stderr.
pub fn init_with(settings: LogSettings) {
    INIT.get_or_init(|| {
        if !settings.enabled {
            return;
        }
        let filter = settings.env_filter();
        match &settings.json_path {
            Some(path) => {
                let (dir, file) = split_log_path(path);
                let _ = std::fs::create_dir_all(&dir);
                let json = tracing_subscriber::fmt::layer()
                    .json()
                    .with_current_span(true)
                    .with_span_list(true)
                    .with_target(false)
                    .with_writer(tracing_appender::rolling::never(dir, file));
                let _ = tracing_subscriber::registry()
                    .with(filter)
                    .with(json)
                    .try_init();
            }
            None => {
                let console = tracing_subscriber::fmt::layer()
                    .compact()
                    .with_target(false)
                    .with_writer(std::io::stderr);
                let _ = tracing_subscriber::registry()
                    .with(filter)
                    .with(console)
                    .try_init();
            }
        }
    });
}

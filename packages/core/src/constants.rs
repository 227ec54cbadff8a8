use std::env;
use std::path::PathBuf;

pub const DEFAULT_TWILIO_API_URL: &str = "https://api.twilio.com";
pub const DEFAULT_TWILIO_VERIFY_URL: &str = "https://verify.twilio.com";
pub const DEFAULT_TELEGRAM_API_URL: &str = "https://api.telegram.org";
pub const DEFAULT_CLOUD_API_URL: &str = "https://oncall-prod-us-central-0.grafana.net/oncall/";

/// Default timeout for outbound provider requests
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;

/// Get the path to the OnCall data directory (~/.oncall)
pub fn oncall_dir() -> PathBuf {
    // First try HOME environment variable (useful for tests)
    if let Ok(home) = env::var("HOME") {
        PathBuf::from(home).join(".oncall")
    } else {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".oncall")
    }
}

/// Get the path to the default database file (~/.oncall/oncall.db)
pub fn default_database_path() -> PathBuf {
    oncall_dir().join("oncall.db")
}

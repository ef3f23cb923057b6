use crate::config::Settings;
use tracing_subscriber::{fmt, EnvFilter};

pub const LOG_ENV: &str = "COOKBOOK_LOG";

/// Logs go to stderr so list output on stdout stays clean. Filter comes from
/// `COOKBOOK_LOG`, then `log.filter` in settings, then `warn`.
pub fn init(settings: &Settings) {
    let directive = std::env::var(LOG_ENV)
        .ok()
        .or_else(|| settings.log.as_ref().and_then(|l| l.filter.clone()))
        .unwrap_or_else(|| "warn".to_string());
    let filter = EnvFilter::try_new(&directive).unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

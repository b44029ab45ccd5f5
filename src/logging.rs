//! Unified logging for debug output.
//!
//! Compact timestamped logging with per-module level configuration. The
//! `RUST_LOG` environment variable takes precedence over config:
//!
//! ```toml
//! [logging]
//! default = "warn"
//!
//! [logging.modules]
//! watcher = "debug"
//! ```
//!
//! ```bash
//! RUST_LOG=debug cmakesync watch
//! RUST_LOG=cmakesync::engine=trace cmakesync add src/main.cpp
//! ```

use std::sync::Once;
use tracing_subscriber::fmt::time::FormatTime;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

use crate::config::LoggingConfig;

static INIT: Once = Once::new();

/// Compact time format: HH:MM:SS.mmm
struct CompactTime;

impl FormatTime for CompactTime {
    fn format_time(&self, w: &mut tracing_subscriber::fmt::format::Writer<'_>) -> std::fmt::Result {
        write!(w, "{}", chrono::Local::now().format("%H:%M:%S%.3f"))
    }
}

/// Initialize logging with configuration.
///
/// Call once at startup. Safe to call multiple times (only the first call
/// takes effect).
pub fn init_with_config(config: &LoggingConfig) {
    INIT.call_once(|| {
        let filter = if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.default.clone()))
        } else {
            let mut spec = config.default.clone();
            for (module, level) in &config.modules {
                spec.push_str(&format!(",cmakesync::{module}={level}"));
            }
            EnvFilter::new(spec)
        };

        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_timer(CompactTime)
            .with_target(true)
            .with_writer(std::io::stderr)
            .with_filter(filter);

        tracing_subscriber::registry().with(fmt_layer).init();
    });
}

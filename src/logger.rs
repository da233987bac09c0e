use tracing::{Level, debug, enabled, info, trace};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;

/// Low: session lifecycle and faults. Medium: per-report summaries.
/// High: raw report dumps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Verbosity {
    Low = 0,
    Medium = 1,
    High = 2,
}

impl Verbosity {
    pub fn level_filter(self) -> LevelFilter {
        match self {
            Verbosity::Low => LevelFilter::INFO,
            Verbosity::Medium => LevelFilter::DEBUG,
            Verbosity::High => LevelFilter::TRACE,
        }
    }

    /// Whether the installed subscriber would record this level.
    pub fn enabled(self) -> bool {
        match self {
            Verbosity::Low => enabled!(Level::INFO),
            Verbosity::Medium => enabled!(Level::DEBUG),
            Verbosity::High => enabled!(Level::TRACE),
        }
    }
}

/// Installs the global subscriber. `RUST_LOG` wins over `default`.
pub fn init(default: Verbosity) {
    let filter = EnvFilter::builder()
        .with_default_directive(default.level_filter().into())
        .from_env_lossy();
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

pub fn log(level: Verbosity, message: &str) {
    match level {
        Verbosity::Low => info!("{}", message),
        Verbosity::Medium => debug!("{}", message),
        Verbosity::High => trace!("{}", message),
    }
}

pub fn log_detail(level: Verbosity, title: &str, detail: &str) {
    match level {
        Verbosity::Low => info!("{} └─ {}", title, detail),
        Verbosity::Medium => debug!("{} └─ {}", title, detail),
        Verbosity::High => trace!("{} └─ {}", title, detail),
    }
}

pub fn log_data(level: Verbosity, title: &str, data: &[u8]) {
    if level.enabled() {
        log_detail(level, title, &hex(data));
    }
}

pub fn hex(data: &[u8]) -> String {
    data.iter()
        .map(|b| format!("{:02X}", b))
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex() {
        assert_eq!(hex(&[0x01, 0xAB, 0x00]), "01 AB 00");
        assert_eq!(hex(&[]), "");
    }

    #[test]
    fn test_verbosity_order() {
        assert!(Verbosity::Low < Verbosity::High);
        assert_eq!(Verbosity::High.level_filter(), LevelFilter::TRACE);
    }

    #[test]
    fn test_report_dumps_skipped_at_info() {
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(Level::INFO)
            .finish();
        tracing::subscriber::with_default(subscriber, || {
            assert!(Verbosity::Low.enabled());
            assert!(!Verbosity::Medium.enabled());
            assert!(!Verbosity::High.enabled());
        });
    }
}

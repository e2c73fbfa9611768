//! Tracing subscriber setup

use tracing_subscriber::EnvFilter;

use crate::config::LogConfig;

/// Install the global fmt subscriber
///
/// `RUST_LOG` wins over the configured filter. Returns `false` when a global
/// subscriber was already installed, which leaves the existing one in place.
pub fn init(config: &LogConfig) -> bool {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.filter))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init()
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_init_is_harmless() {
        let config = LogConfig::default();
        init(&config);
        assert!(!init(&config));
    }
}

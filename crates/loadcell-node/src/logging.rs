//! Tracing subscriber setup

use crate::config::LoggingConfig;
use crate::error::NodeError;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

/// Initialize logging
pub fn init_logging(config: &LoggingConfig) -> Result<(), NodeError> {
    let level: Level = config
        .level
        .parse()
        .map_err(|_| NodeError::LogLevel(config.level.clone()))?;

    if config.json {
        let subscriber = FmtSubscriber::builder()
            .with_max_level(level)
            .with_target(true)
            .json()
            .finish();
        tracing::subscriber::set_global_default(subscriber)?;
    } else {
        let subscriber = FmtSubscriber::builder()
            .with_max_level(level)
            .with_target(true)
            .finish();
        tracing::subscriber::set_global_default(subscriber)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_unknown_level() {
        let config = LoggingConfig {
            level: "loud".to_string(),
            json: false,
        };
        assert!(matches!(init_logging(&config), Err(NodeError::LogLevel(_))));
    }
}

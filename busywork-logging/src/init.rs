use anyhow::Result;
use busywork_config::{LogFormat, LoggingConfig};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Filter directive string for a logging config: the level, then any
/// extra directives in order
pub fn filter_directives(config: &LoggingConfig) -> String {
    let mut directives = vec![config.level.as_str().to_string()];
    directives.extend(config.directives.iter().map(|d| d.trim().to_string()));
    directives.join(",")
}

/// Build the env filter, preferring `RUST_LOG` when it is set
pub fn build_env_filter(config: &LoggingConfig) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(filter_directives(config)))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Initialize logging from configuration
pub fn init_logging_from_config(config: &LoggingConfig) -> Result<()> {
    let env_filter = build_env_filter(config);
    let registry = tracing_subscriber::registry().with(env_filter);

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_file(config.include_location)
        .with_line_number(config.include_location);

    // Use try_init to avoid panic if global subscriber already set
    let result = match config.format {
        LogFormat::Json => registry.with(fmt_layer.json()).try_init(),
        LogFormat::Compact => registry.with(fmt_layer.compact()).try_init(),
        LogFormat::Pretty => registry.with(fmt_layer.pretty()).try_init(),
        LogFormat::Text => registry.with(fmt_layer).try_init(),
    };

    if result.is_err() {
        tracing::debug!("Global tracing subscriber already initialized, skipping");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use busywork_config::LogLevel;

    #[test]
    fn test_filter_directives() {
        let config = LoggingConfig {
            level: LogLevel::Debug,
            directives: vec!["sea_orm=warn".to_string(), " sqlx=error ".to_string()],
            ..Default::default()
        };
        assert_eq!(filter_directives(&config), "debug,sea_orm=warn,sqlx=error");
        assert_eq!(filter_directives(&LoggingConfig::default()), "info");
    }
}

//! Layered settings: built-in defaults, then an optional TOML file, then
//! `INSIGHTS__SECTION__KEY` environment variables.

use std::path::Path;
use std::time::Duration;

use ::config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

use crate::engine::liquidity::DEFAULT_DEPTH;
use crate::market_data::adapters::injective::DEFAULT_BASE_URL;

pub const DEFAULT_CONFIG_FILE: &str = "insights.toml";

#[derive(Debug, Clone, Deserialize)]
pub struct ProviderSettings {
    pub base_url: String,
    pub timeout_ms: u64,
}

impl ProviderSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AnalyticsSettings {
    pub depth: usize,
    pub rank_concurrency: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TelemetrySettings {
    pub log_filter: String,
    pub metrics: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub provider: ProviderSettings,
    pub analytics: AnalyticsSettings,
    pub telemetry: TelemetrySettings,
}

impl Settings {
    /// Load settings. An explicit `path` must exist; without one, `insights.toml`
    /// in the working directory is used when present.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut builder = Config::builder()
            .set_default("provider.base_url", DEFAULT_BASE_URL)?
            .set_default("provider.timeout_ms", 5000)?
            .set_default("analytics.depth", DEFAULT_DEPTH as u64)?
            .set_default("analytics.rank_concurrency", 8)?
            .set_default("telemetry.log_filter", "info")?
            .set_default("telemetry.metrics", false)?;

        builder = match path {
            Some(p) => builder.add_source(File::from(p).required(true)),
            None => builder.add_source(File::with_name(DEFAULT_CONFIG_FILE).required(false)),
        };

        builder
            .add_source(Environment::with_prefix("INSIGHTS").separator("__").try_parsing(true))
            .build()?
            .try_deserialize::<Settings>()?
            .validated()
    }

    fn validated(self) -> Result<Self, ConfigError> {
        if self.analytics.depth == 0 {
            return Err(ConfigError::Message("analytics.depth must be at least 1".into()));
        }
        if self.analytics.rank_concurrency == 0 {
            return Err(ConfigError::Message("analytics.rank_concurrency must be at least 1".into()));
        }
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let settings = Settings::load(None).unwrap();
        assert_eq!(settings.analytics.depth, 10);
        assert_eq!(settings.provider.timeout(), Duration::from_millis(5000));
        assert!(!settings.telemetry.metrics);
    }

    #[test]
    fn test_file_overrides_defaults() {
        let path = std::env::temp_dir().join(format!("insights-test-{}.toml", std::process::id()));
        let mut f = std::fs::File::create(&path).unwrap();
        writeln!(f, "[analytics]\ndepth = 5\n[provider]\nbase_url = \"http://localhost:9999\"").unwrap();
        drop(f);

        let settings = Settings::load(Some(&path)).unwrap();
        assert_eq!(settings.analytics.depth, 5);
        assert_eq!(settings.analytics.rank_concurrency, 8);
        assert_eq!(settings.provider.base_url, "http://localhost:9999");
        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_zero_depth_rejected() {
        let path = std::env::temp_dir().join(format!("insights-depth0-{}.toml", std::process::id()));
        std::fs::write(&path, "[analytics]\ndepth = 0\n").unwrap();
        let err = Settings::load(Some(&path)).unwrap_err();
        assert!(err.to_string().contains("analytics.depth"));
        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_missing_explicit_file_errors() {
        assert!(Settings::load(Some(Path::new("/nonexistent/insights.toml"))).is_err());
    }
}

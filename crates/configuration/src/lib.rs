// Declare the modules that make up this crate.
pub mod error;
pub mod settings;

// Re-export the core types to provide a clean public API.
pub use error::ConfigError;
pub use settings::{Analytics, Config};

/// Loads the application configuration from the given `.toml` file.
///
/// This function is the primary entry point for this crate. It reads the
/// configuration file, deserializes it into our strongly-typed `Config`
/// struct, validates it, and returns it.
pub fn load_config(path: &str) -> Result<Config, ConfigError> {
    let builder = config::Config::builder()
        .add_source(config::File::with_name(path))
        // Environment variables override the file, e.g. MERIDIAN__ANALYTICS__RISK_FREE_RATE.
        .add_source(config::Environment::with_prefix("MERIDIAN").separator("__"))
        .build()?;

    let config = builder.try_deserialize::<Config>()?;
    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use std::fs;
    use std::path::PathBuf;

    const VALID: &str = r#"
[analytics]
base_capital = 10000
risk_free_rate = 0.05
market_return = 0.12
market_volatility = 0.15
market_correlation = 0.7
trading_days = 252.0
default_window_days = 30
"#;

    fn write_config(name: &str, body: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!(
            "meridian-{name}-{}.toml",
            std::process::id()
        ));
        fs::write(&path, body).unwrap();
        path
    }

    #[test]
    fn loads_the_analytics_section() {
        let path = write_config("valid", VALID);
        let config = load_config(path.to_str().unwrap()).unwrap();

        assert_eq!(config.analytics.base_capital, Decimal::from(10_000));
        assert_eq!(config.analytics.risk_free_rate, 0.05);
        assert_eq!(config.analytics.trading_days, 252.0);
        assert_eq!(config.analytics.default_window_days, 30);
    }

    #[test]
    fn environment_overrides_the_file() {
        // No other test reads this key, so the process-global override is safe.
        let path = write_config("env-override", VALID);
        unsafe { std::env::set_var("MERIDIAN__ANALYTICS__MARKET_CORRELATION", "0.9") };
        let config = load_config(path.to_str().unwrap()).unwrap();
        unsafe { std::env::remove_var("MERIDIAN__ANALYTICS__MARKET_CORRELATION") };

        assert_eq!(config.analytics.market_correlation, 0.9);
    }

    #[test]
    fn rejects_non_positive_market_volatility() {
        let body = VALID.replace("market_volatility = 0.15", "market_volatility = 0.0");
        let path = write_config("bad-volatility", &body);

        let error = load_config(path.to_str().unwrap()).unwrap_err();
        assert!(matches!(error, ConfigError::ValidationError(_)));
    }

    #[test]
    fn rejects_non_positive_window() {
        let body = VALID.replace("default_window_days = 30", "default_window_days = 0");
        let path = write_config("bad-window", &body);

        let error = load_config(path.to_str().unwrap()).unwrap_err();
        assert!(matches!(error, ConfigError::ValidationError(_)));
    }

    #[test]
    fn missing_file_is_a_load_error() {
        let error = load_config("/nonexistent/meridian-config").unwrap_err();
        assert!(matches!(error, ConfigError::LoadError(_)));
    }
}

use crate::error::ConfigError;
use std::path::Path;

// Declare the modules that make up this crate.
pub mod chain;
pub mod error;
pub mod settings;

// Re-export the core types to provide a clean public API.
pub use chain::{chain_from_source, load_chain};
pub use settings::{ChainLimits, LoggingSettings, ReportSettings, Settings, Thresholds};

/// Name (without extension) of the settings file looked up when none is given.
pub const DEFAULT_CONFIG_NAME: &str = "valuechain";

/// Prefix for environment overrides, e.g. `VALUECHAIN__REPORT__TITLE`.
pub const ENV_PREFIX: &str = "VALUECHAIN";

/// Loads the application settings.
///
/// When `path` is given the file must exist. Otherwise `valuechain.toml` (or
/// `.json`) in the working directory is used if present. Environment variables
/// prefixed with `VALUECHAIN__` override file values in both cases.
pub fn load_settings(path: Option<&Path>) -> Result<Settings, ConfigError> {
    let env = config::Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("__")
        .separator("__")
        .try_parsing(true);
    build_settings(path, env)
}

fn build_settings(path: Option<&Path>, env: config::Environment) -> Result<Settings, ConfigError> {
    let file = match path {
        Some(path) => config::File::from(path).required(true),
        None => config::File::with_name(DEFAULT_CONFIG_NAME).required(false),
    };

    let builder = config::Config::builder()
        .add_source(file)
        .add_source(env)
        .build()?;

    // Attempt to deserialize the entire configuration into our `Settings` struct
    let settings = builder.try_deserialize::<Settings>()?;
    settings.validate()?;

    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use std::path::PathBuf;

    fn env_from(pairs: &[(&str, &str)]) -> config::Environment {
        let mut vars = config::Map::new();
        for (key, value) in pairs {
            vars.insert(key.to_string(), value.to_string());
        }
        config::Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("__")
            .separator("__")
            .try_parsing(true)
            .source(Some(vars))
    }

    #[test]
    fn defaults_without_any_source() {
        let settings = build_settings(None, env_from(&[])).unwrap();

        assert_eq!(settings.chain.min_actors, 2);
        assert_eq!(settings.chain.max_actors, 10);
        assert_eq!(settings.analysis.low_margin_pct, dec!(20));
        assert_eq!(settings.analysis.low_value_share_pct, dec!(10));
        assert_eq!(settings.report.output_file, PathBuf::from("value_chain_report.pdf"));
        assert_eq!(settings.report.logo_path, PathBuf::from("logo.png"));
        assert_eq!(settings.logging.level, "info");
        assert!(settings.logging.directory.is_none());
    }

    #[test]
    fn environment_overrides_apply() {
        let env = env_from(&[
            ("VALUECHAIN__ANALYSIS__LOW_MARGIN_PCT", "15"),
            ("VALUECHAIN__REPORT__TITLE", "Cassava Chain"),
            ("VALUECHAIN__CHAIN__MAX_ACTORS", "4"),
        ]);
        let settings = build_settings(None, env).unwrap();

        assert_eq!(settings.analysis.low_margin_pct, dec!(15));
        assert_eq!(settings.analysis.low_value_share_pct, dec!(10));
        assert_eq!(settings.report.title, "Cassava Chain");
        assert_eq!(settings.chain.max_actors, 4);
    }

    #[test]
    fn rejects_inverted_actor_bounds() {
        let env = env_from(&[("VALUECHAIN__CHAIN__MIN_ACTORS", "5"), ("VALUECHAIN__CHAIN__MAX_ACTORS", "3")]);
        let err = build_settings(None, env).unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        let err = build_settings(Some(Path::new("does-not-exist.toml")), env_from(&[])).unwrap_err();
        assert!(matches!(err, ConfigError::LoadError(_)));
    }
}

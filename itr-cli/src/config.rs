//! Tax-year configuration loading.
//!
//! Without a file the built-in FY2024-25 parameters are used. A file must be
//! a complete [`TaxYearConfig`] in TOML, using the same camelCase keys as
//! the JSON contracts; see `config/fy2024-25.toml`.

use std::path::{Path, PathBuf};

use itr_core::{TaxYearConfig, TaxYearConfigError};
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config file '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid TOML in '{path}': {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("config '{path}' failed validation: {source}")]
    Invalid {
        path: PathBuf,
        #[source]
        source: TaxYearConfigError,
    },
}

/// Parses and validates TOML text. `origin` only labels errors.
pub fn from_toml_str(
    text: &str,
    origin: &Path,
) -> Result<TaxYearConfig, ConfigError> {
    let config: TaxYearConfig = toml::from_str(text).map_err(|source| ConfigError::Parse {
        path: origin.to_path_buf(),
        source,
    })?;

    config.validate().map_err(|source| {
        warn!(path = %origin.display(), %source, "rejected tax-year config");
        ConfigError::Invalid {
            path: origin.to_path_buf(),
            source,
        }
    })?;

    Ok(config)
}

/// Loads `path` when given, otherwise returns the built-in default.
pub fn load_config(path: Option<&Path>) -> Result<TaxYearConfig, ConfigError> {
    let Some(path) = path else {
        debug!("using built-in FY2024-25 config");
        return Ok(TaxYearConfig::default());
    };

    let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let config = from_toml_str(&text, path)?;
    debug!(path = %path.display(), year = %config.financial_year, "loaded tax-year config");
    Ok(config)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn no_path_gives_default() {
        assert_eq!(load_config(None).unwrap(), TaxYearConfig::fy_2024_25());
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = load_config(Some(Path::new("/nonexistent/itr.toml"))).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn serialized_default_round_trips_through_toml() {
        let text = toml::to_string(&TaxYearConfig::fy_2024_25()).unwrap();
        let config = from_toml_str(&text, Path::new("inline")).unwrap();

        assert_eq!(config, TaxYearConfig::fy_2024_25());
    }

    #[test]
    fn garbage_is_parse_error() {
        let err = from_toml_str("cessRate = [", Path::new("inline")).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn out_of_range_rate_is_rejected() {
        let mut config = TaxYearConfig::fy_2024_25();
        config.cess_rate = rust_decimal::Decimal::TWO;
        let text = toml::to_string(&config).unwrap();

        let err = from_toml_str(&text, Path::new("inline")).unwrap_err();

        assert!(matches!(
            err,
            ConfigError::Invalid {
                source: TaxYearConfigError::InvalidRate { name: "cessRate", .. },
                ..
            }
        ));
    }
}

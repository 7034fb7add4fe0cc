//! Configuration for locating reference data.
//!
//! Mercator reads an optional `mercator.toml`. The data root is resolved from,
//! in order, an explicit argument, the `MERCATOR_DATA_ROOT` environment
//! variable, the configuration file, and finally the platform data directory
//! (`~/.local/share/mercator` on Linux). Blank values at any step count as
//! absent.

use std::sync::Arc;

use camino::{Utf8Path, Utf8PathBuf};
use directories_next::ProjectDirs;
use log::debug;
use mercator_common::{DataSource, FileLoader};
use serde::Deserialize;
use thiserror::Error;

/// Environment variable overriding the configured data root.
pub const DATA_ROOT_ENV: &str = "MERCATOR_DATA_ROOT";

/// Errors raised while reading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read configuration at {path}: {source}")]
    Read {
        /// Path of the configuration file.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The configuration file is not valid TOML for [`MercatorConfig`].
    #[error("failed to parse configuration at {path}: {source}")]
    Parse {
        /// Path of the configuration file.
        path: Utf8PathBuf,
        /// Parser error.
        #[source]
        source: toml::de::Error,
    },

    /// No data root was supplied and no platform directory is available.
    #[error("no data root configured; set {DATA_ROOT_ENV} or `data_root`")]
    NoDataRoot,

    /// The platform data directory is not valid UTF-8.
    #[error("platform data directory is not valid UTF-8: {path}")]
    NonUtf8DataRoot {
        /// Lossy rendering of the offending path.
        path: String,
    },
}

/// Settings read from `mercator.toml`.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct MercatorConfig {
    /// Directory holding the `general/` and `locales/` partitions.
    pub data_root: Option<Utf8PathBuf>,
    /// Default locale tag for commands that display names.
    pub locale: Option<String>,
}

impl MercatorConfig {
    /// Parse configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns the TOML parser's error for malformed input or unknown keys.
    ///
    /// # Examples
    ///
    /// ```
    /// use mercator::MercatorConfig;
    ///
    /// let config = MercatorConfig::from_toml("locale = \"en_GB\"\n").expect("valid TOML");
    /// assert_eq!(config.locale(), Some("en_GB"));
    /// ```
    pub fn from_toml(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    /// Read configuration from `path`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Read`] or [`ConfigError::Parse`].
    pub fn load(path: &Utf8Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_owned(),
            source,
        })?;
        debug!(target: "mercator::config", "loaded configuration from {path}");
        Self::from_toml(&text).map_err(|source| ConfigError::Parse {
            path: path.to_owned(),
            source,
        })
    }

    /// The configured locale, ignoring blank values.
    #[must_use]
    pub fn locale(&self) -> Option<&str> {
        normalise(self.locale.as_deref())
    }

    /// The configured data root, ignoring blank values.
    #[must_use]
    pub fn data_root(&self) -> Option<&Utf8Path> {
        normalise(self.data_root.as_deref().map(Utf8Path::as_str)).map(Utf8Path::new)
    }

    /// Resolve the data root, reading the environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NoDataRoot`] or [`ConfigError::NonUtf8DataRoot`]
    /// when every source is empty and the platform directory is unusable.
    pub fn resolve_data_root(&self, explicit: Option<&Utf8Path>) -> Result<Utf8PathBuf, ConfigError> {
        let environment = std::env::var(DATA_ROOT_ENV).ok();
        self.resolve_data_root_with(explicit, environment.as_deref())
    }

    /// Resolve the data root with the environment value supplied by the caller.
    ///
    /// # Errors
    ///
    /// See [`Self::resolve_data_root`].
    pub fn resolve_data_root_with(
        &self,
        explicit: Option<&Utf8Path>,
        environment: Option<&str>,
    ) -> Result<Utf8PathBuf, ConfigError> {
        if let Some(root) = explicit.and_then(|path| normalise(Some(path.as_str()))) {
            return Ok(Utf8PathBuf::from(root));
        }
        if let Some(root) = normalise(environment) {
            debug!(target: "mercator::config", "data root from {DATA_ROOT_ENV}: {root}");
            return Ok(Utf8PathBuf::from(root));
        }
        if let Some(root) = self.data_root() {
            return Ok(root.to_owned());
        }
        platform_data_dir()
    }

    /// Build a data source over the resolved data root.
    ///
    /// # Errors
    ///
    /// See [`Self::resolve_data_root`].
    pub fn data_source(&self, explicit: Option<&Utf8Path>) -> Result<DataSource, ConfigError> {
        let root = self.resolve_data_root(explicit)?;
        Ok(DataSource::from_root(root, Arc::new(FileLoader)))
    }
}

fn platform_data_dir() -> Result<Utf8PathBuf, ConfigError> {
    let dirs = ProjectDirs::from("", "", "mercator").ok_or(ConfigError::NoDataRoot)?;
    Utf8PathBuf::from_path_buf(dirs.data_dir().to_path_buf()).map_err(|path| {
        ConfigError::NonUtf8DataRoot {
            path: path.to_string_lossy().into_owned(),
        }
    })
}

fn normalise(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|trimmed| !trimmed.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn defaults_are_empty() {
        let config = MercatorConfig::default();

        assert!(config.locale().is_none());
        assert!(config.data_root().is_none());
    }

    #[rstest]
    fn deserialises_overrides_from_toml() {
        let source = "data_root = \"/srv/cldr\"\nlocale = \"ru\"\n";

        let config = MercatorConfig::from_toml(source).expect("configuration should parse");

        assert_eq!(config.data_root(), Some(Utf8Path::new("/srv/cldr")));
        assert_eq!(config.locale(), Some("ru"));
    }

    #[rstest]
    fn rejects_unknown_fields() {
        let result = MercatorConfig::from_toml("unexpected = true\n");

        assert!(result.is_err(), "unknown keys should be rejected");
    }

    #[rstest]
    #[case(Some("  "), None)]
    #[case(Some(""), None)]
    #[case(Some(" en "), Some("en"))]
    #[case(None, None)]
    fn blank_locales_are_absent(#[case] locale: Option<&str>, #[case] expected: Option<&str>) {
        let config = MercatorConfig {
            locale: locale.map(str::to_owned),
            ..MercatorConfig::default()
        };

        assert_eq!(config.locale(), expected);
    }

    #[rstest]
    #[case::explicit_wins(Some("/explicit"), Some("/env"), Some("/config"), "/explicit")]
    #[case::environment_beats_config(None, Some("/env"), Some("/config"), "/env")]
    #[case::blank_environment_is_ignored(None, Some("   "), Some("/config"), "/config")]
    #[case::blank_explicit_is_ignored(Some(" "), None, Some("/config"), "/config")]
    fn data_root_precedence(
        #[case] explicit: Option<&str>,
        #[case] environment: Option<&str>,
        #[case] configured: Option<&str>,
        #[case] expected: &str,
    ) {
        let config = MercatorConfig {
            data_root: configured.map(Utf8PathBuf::from),
            ..MercatorConfig::default()
        };

        let root = config
            .resolve_data_root_with(explicit.map(Utf8Path::new), environment)
            .expect("data root resolves");

        assert_eq!(root, Utf8PathBuf::from(expected));
    }

    #[test]
    fn reports_unreadable_files() {
        let err = MercatorConfig::load(Utf8Path::new("/definitely/not/here/mercator.toml"))
            .expect_err("missing file");

        assert!(matches!(err, ConfigError::Read { .. }));
    }
}

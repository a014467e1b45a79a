//! INI configuration file.

use std::collections::BTreeSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use ini::Ini;
use thiserror::Error;
use tracing::{debug, warn};

use super::keys::ConfigKey;
use super::paths::{config_file_path, default_store_directory};
use crate::advisory::AdvisoryConfig;
use crate::cache::validate_key;
use crate::highlight::HighlightConfig;
use crate::staleness::{StalenessThresholds, ThresholdError, ThresholdTable};

/// Prefix of the per-dataset threshold sections (`[staleness.incidents]`).
const DATASET_SECTION_PREFIX: &str = "staleness.";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: ini::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] ini::ParseError),

    #[error("failed to write config file {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid value '{value}' for {section}.{key}: {reason}")]
    InvalidValue {
        section: String,
        key: String,
        value: String,
        reason: String,
    },

    #[error("invalid thresholds in [{section}]: {source}")]
    Thresholds {
        section: String,
        #[source]
        source: ThresholdError,
    },
}

impl ConfigError {
    pub(crate) fn invalid(
        section: &str,
        key: &str,
        value: &str,
        reason: impl Into<String>,
    ) -> Self {
        ConfigError::InvalidValue {
            section: section.to_string(),
            key: key.to_string(),
            value: value.to_string(),
            reason: reason.into(),
        }
    }
}

/// Effective configuration.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ConfigFile {
    pub staleness: ThresholdTable,
    pub advisory: AdvisoryConfig,
    pub highlight: HighlightConfig,
    /// Cache directory override; `None` uses the platform cache directory.
    pub store_directory: Option<PathBuf>,
}

impl ConfigFile {
    /// Load from the default location. A missing file yields defaults.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&config_file_path())
    }

    /// Load from `path`. A missing file yields defaults.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            debug!(path = %path.display(), "No config file, using defaults");
            return Ok(Self::default());
        }
        let ini = Ini::load_from_file(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), "Loaded config file");
        Self::from_ini(&ini)
    }

    /// Parse INI text.
    pub fn from_ini_str(text: &str) -> Result<Self, ConfigError> {
        Self::from_ini(&Ini::load_from_str(text)?)
    }

    fn from_ini(ini: &Ini) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        let defaults = match ini.section(Some("staleness")) {
            Some(props) => read_pair(
                "staleness",
                props.get("default_stale_minutes"),
                props.get("default_outdated_minutes"),
                config.staleness.default_thresholds(),
            )?,
            None => config.staleness.default_thresholds(),
        };
        config.staleness = ThresholdTable::with_default(defaults);

        for key in ConfigKey::all() {
            if key.section() == "staleness" {
                continue;
            }
            let raw = ini
                .section(Some(key.section()))
                .and_then(|props| props.get(key.key_name()));
            if let Some(raw) = raw {
                key.set(&mut config, raw)?;
            }
        }

        for (name, props) in ini.iter() {
            let Some(name) = name else { continue };
            let Some(dataset) = name.strip_prefix(DATASET_SECTION_PREFIX) else {
                if !matches!(name, "staleness" | "advisory" | "highlight" | "store") {
                    warn!(section = name, "Ignoring unknown config section");
                }
                continue;
            };
            if validate_key(dataset).is_err() {
                return Err(ConfigError::invalid(
                    name,
                    "",
                    dataset,
                    "not a valid dataset key",
                ));
            }
            let pair = read_pair(
                name,
                props.get("stale_minutes"),
                props.get("outdated_minutes"),
                defaults,
            )?;
            config.staleness.set(dataset, pair);
        }

        Ok(config)
    }

    /// Render back to INI text.
    pub fn to_ini_string(&self) -> String {
        let mut ini = Ini::new();
        for key in ConfigKey::all() {
            let value = key.get(self);
            if !value.is_empty() {
                ini.with_section(Some(key.section()))
                    .set(key.key_name(), value);
            }
        }
        for (dataset, pair) in self.staleness.overrides() {
            ini.with_section(Some(format!("{}{}", DATASET_SECTION_PREFIX, dataset)))
                .set("stale_minutes", pair.stale_minutes().to_string())
                .set("outdated_minutes", pair.outdated_minutes().to_string());
        }

        let mut buf = Vec::new();
        // Writing into a Vec cannot fail.
        let _ = ini.write_to(&mut buf);
        String::from_utf8_lossy(&buf).into_owned()
    }

    /// Save to the default location.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&config_file_path())
    }

    /// Save to `path`, creating parent directories.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let write = || -> io::Result<()> {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(path, self.to_ini_string())
        };
        write().map_err(|source| ConfigError::Write {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), "Saved config file");
        Ok(())
    }

    /// Directory the file store should use.
    pub fn resolved_store_directory(&self) -> PathBuf {
        self.store_directory
            .clone()
            .unwrap_or_else(default_store_directory)
    }
}

fn read_pair(
    section: &str,
    stale: Option<&str>,
    outdated: Option<&str>,
    fallback: StalenessThresholds,
) -> Result<StalenessThresholds, ConfigError> {
    let (stale_key, outdated_key) = if section == "staleness" {
        ("default_stale_minutes", "default_outdated_minutes")
    } else {
        ("stale_minutes", "outdated_minutes")
    };
    let stale = match stale {
        Some(raw) => parse_value(section, stale_key, raw)?,
        None => fallback.stale_minutes(),
    };
    let outdated = match outdated {
        Some(raw) => parse_value(section, outdated_key, raw)?,
        None => fallback.outdated_minutes(),
    };
    StalenessThresholds::new(stale, outdated).map_err(|source| ConfigError::Thresholds {
        section: section.to_string(),
        source,
    })
}

pub(crate) fn parse_value<T>(section: &str, key: &str, raw: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    raw.trim()
        .parse()
        .map_err(|e: T::Err| ConfigError::invalid(section, key, raw, e.to_string()))
}

/// Comma-separated list; blank entries are ignored.
pub(crate) fn parse_list<T>(section: &str, key: &str, raw: &str) -> Result<BTreeSet<T>, ConfigError>
where
    T: FromStr + Ord,
    T::Err: std::fmt::Display,
{
    raw.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(|item| parse_value(section, key, item))
        .collect()
}

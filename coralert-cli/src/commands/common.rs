//! Shared helpers for CLI commands.

use std::path::PathBuf;
use std::sync::Arc;

use coralert::cache::{CacheStore, FileStore};
use coralert::config::ConfigFile;
use coralert::staleness::Staleness;
use coralert::SystemClock;
use console::{style, StyledObject};
use tracing::warn;

use crate::error::CliError;

/// Resolved configuration and paths for one invocation.
#[derive(Debug, Clone)]
pub struct Context {
    pub config: ConfigFile,
    pub config_path: PathBuf,
    pub store_dir: PathBuf,
}

impl Context {
    /// Load configuration, letting CLI flags override file values.
    pub fn load(
        config_path: Option<PathBuf>,
        store_dir: Option<PathBuf>,
    ) -> Result<Self, CliError> {
        let config_path = config_path.unwrap_or_else(coralert::config::config_file_path);
        let config = ConfigFile::load_from(&config_path)?;
        Ok(Self::resolve(config, config_path, store_dir))
    }

    /// Like [`load`](Self::load), but a config file that does not parse is
    /// replaced by the defaults. Used by `init` and `config`, which are how a
    /// broken file gets repaired.
    pub fn load_lenient(config_path: Option<PathBuf>, store_dir: Option<PathBuf>) -> Self {
        let config_path = config_path.unwrap_or_else(coralert::config::config_file_path);
        let config = ConfigFile::load_from(&config_path).unwrap_or_else(|e| {
            warn!(
                path = %config_path.display(),
                error = %e,
                "Ignoring unreadable config file, using defaults"
            );
            ConfigFile::default()
        });
        Self::resolve(config, config_path, store_dir)
    }

    fn resolve(config: ConfigFile, config_path: PathBuf, store_dir: Option<PathBuf>) -> Self {
        let store_dir = store_dir.unwrap_or_else(|| config.resolved_store_directory());
        Self {
            config,
            config_path,
            store_dir,
        }
    }

    /// Open the on-disk dataset cache.
    pub fn open_store(&self) -> Result<CacheStore, CliError> {
        let backend = FileStore::open(&self.store_dir)?;
        Ok(CacheStore::new(
            Arc::new(backend),
            Arc::new(SystemClock),
            self.config.staleness.clone(),
        ))
    }
}

/// Colour a staleness verdict for terminal output.
pub fn styled_staleness(staleness: Staleness) -> StyledObject<String> {
    let label = format!("{:<8}", staleness);
    match staleness {
        Staleness::Fresh => style(label).green(),
        Staleness::Stale => style(label).yellow(),
        Staleness::Outdated => style(label).red(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_context_flags_override_config() {
        let temp = TempDir::new().unwrap();
        let config_path = temp.path().join("config.ini");
        std::fs::write(&config_path, "[store]\ndirectory = /from/config\n").unwrap();

        let ctx = Context::load(Some(config_path.clone()), None).unwrap();
        assert_eq!(ctx.store_dir, PathBuf::from("/from/config"));

        let ctx = Context::load(Some(config_path), Some(temp.path().join("flag"))).unwrap();
        assert_eq!(ctx.store_dir, temp.path().join("flag"));
    }

    #[test]
    fn test_context_missing_config_uses_defaults() {
        let temp = TempDir::new().unwrap();
        let ctx = Context::load(
            Some(temp.path().join("absent.ini")),
            Some(temp.path().join("store")),
        )
        .unwrap();
        assert_eq!(ctx.config, ConfigFile::default());
        assert!(ctx.open_store().is_ok());
    }

    #[test]
    fn test_lenient_load_survives_malformed_config() {
        let temp = TempDir::new().unwrap();
        let config_path = temp.path().join("config.ini");
        std::fs::write(&config_path, "[staleness]\ndefault_stale_minutes = soon\n").unwrap();

        let err = Context::load(Some(config_path.clone()), None).unwrap_err();
        assert!(matches!(err, CliError::ConfigFile(_)));

        let ctx = Context::load_lenient(Some(config_path.clone()), Some(temp.path().join("store")));
        assert_eq!(ctx.config, ConfigFile::default());
        assert_eq!(ctx.config_path, config_path);
        assert_eq!(ctx.store_dir, temp.path().join("store"));
    }
}

//! Configuration management CLI commands.
//!
//! Provides `config get`, `config set`, `config list`, and `config path`.

use clap::Subcommand;
use coralert::config::ConfigKey;

use super::common::Context;
use crate::error::CliError;

/// Config subcommands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Get a configuration value
    Get {
        /// Configuration key in format section.key (e.g., advisory.max_cards)
        key: String,
    },

    /// Set a configuration value
    Set {
        /// Configuration key in format section.key (e.g., advisory.max_cards)
        key: String,

        /// Value to set
        value: String,
    },

    /// List all configuration settings
    List,

    /// Show the configuration file path
    Path,
}

/// Run a config subcommand.
pub fn run(ctx: &Context, command: ConfigCommands) -> Result<(), CliError> {
    match command {
        ConfigCommands::Get { key } => run_get(ctx, &key),
        ConfigCommands::Set { key, value } => run_set(ctx, &key, &value),
        ConfigCommands::List => run_list(ctx),
        ConfigCommands::Path => {
            println!("{}", ctx.config_path.display());
            Ok(())
        }
    }
}

fn parse_key(key: &str) -> Result<ConfigKey, CliError> {
    key.parse().map_err(|_| {
        CliError::Config(format!(
            "Unknown configuration key '{}'. Use 'coralert config list' to see available keys.",
            key
        ))
    })
}

fn run_get(ctx: &Context, key: &str) -> Result<(), CliError> {
    let value = parse_key(key)?.get(&ctx.config);
    if value.is_empty() {
        println!("(not set)");
    } else {
        println!("{}", value);
    }
    Ok(())
}

fn run_set(ctx: &Context, key: &str, value: &str) -> Result<(), CliError> {
    let config_key = parse_key(key)?;
    let mut config = ctx.config.clone();
    config_key.set(&mut config, value)?;
    config.save_to(&ctx.config_path)?;

    println!("Set {} = {}", config_key.name(), value);
    Ok(())
}

fn run_list(ctx: &Context) -> Result<(), CliError> {
    println!("Configuration Settings");
    println!("======================");
    println!();

    let mut current_section = "";

    for key in ConfigKey::all() {
        let section = key.section();

        if section != current_section {
            if !current_section.is_empty() {
                println!();
            }
            println!("[{}]", section);
            current_section = section;
        }

        let value = key.get(&ctx.config);
        if value.is_empty() {
            println!("  {} = (not set)", key.key_name());
        } else {
            println!("  {} = {}", key.key_name(), value);
        }
    }

    for (dataset, pair) in ctx.config.staleness.overrides() {
        println!();
        println!("[staleness.{}]", dataset);
        println!("  stale_minutes = {}", pair.stale_minutes());
        println!("  outdated_minutes = {}", pair.outdated_minutes());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use coralert::config::ConfigFile;
    use tempfile::TempDir;

    fn context(temp: &TempDir) -> Context {
        Context::load(
            Some(temp.path().join("config.ini")),
            Some(temp.path().join("store")),
        )
        .unwrap()
    }

    #[test]
    fn test_set_writes_file() {
        let temp = TempDir::new().unwrap();
        let ctx = context(&temp);

        run(
            &ctx,
            ConfigCommands::Set {
                key: "advisory.max_cards".to_string(),
                value: "3".to_string(),
            },
        )
        .unwrap();

        let saved = ConfigFile::load_from(&ctx.config_path).unwrap();
        assert_eq!(saved.advisory.max_cards, 3);
    }

    #[test]
    fn test_set_rejects_unknown_key() {
        let temp = TempDir::new().unwrap();
        let err = run(
            &context(&temp),
            ConfigCommands::Set {
                key: "advisory.colour".to_string(),
                value: "red".to_string(),
            },
        )
        .unwrap_err();
        assert!(matches!(err, CliError::Config(_)));
    }

    #[test]
    fn test_set_rejects_invalid_value() {
        let temp = TempDir::new().unwrap();
        let err = run(
            &context(&temp),
            ConfigCommands::Set {
                key: "highlight.point_ttl_secs".to_string(),
                value: "soon".to_string(),
            },
        )
        .unwrap_err();
        assert!(matches!(err, CliError::ConfigFile(_)));
    }

    #[test]
    fn test_list_and_get() {
        let temp = TempDir::new().unwrap();
        let ctx = context(&temp);
        assert!(run(&ctx, ConfigCommands::List).is_ok());
        assert!(run(
            &ctx,
            ConfigCommands::Get {
                key: "store.directory".to_string()
            }
        )
        .is_ok());
    }

    #[test]
    fn test_set_repairs_malformed_file() {
        let temp = TempDir::new().unwrap();
        let config_path = temp.path().join("config.ini");
        std::fs::write(&config_path, "[staleness]\ndefault_stale_minutes = soon\n").unwrap();
        let ctx = Context::load_lenient(Some(config_path.clone()), Some(temp.path().join("store")));

        run(&ctx, ConfigCommands::Path).unwrap();
        run(
            &ctx,
            ConfigCommands::Set {
                key: "advisory.max_cards".to_string(),
                value: "2".to_string(),
            },
        )
        .unwrap();

        let saved = ConfigFile::load_from(&config_path).unwrap();
        assert_eq!(saved.advisory.max_cards, 2);
        assert_eq!(saved.staleness, ConfigFile::default().staleness);
    }
}

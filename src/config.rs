use crate::error::ConfigError;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// How the driver echoes scanned tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// One token per line: KIND lexeme literal
    #[default]
    Text,
    /// A JSON array of tokens
    Json,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub prompt: String,
    pub format: OutputFormat,
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            prompt: String::from("> "),
            format: OutputFormat::Text,
            log_level: String::from("warn"),
        }
    }
}

fn env_name() -> String {
    env::var("LOX_ENV").unwrap_or_else(|_| String::from("default"))
}

impl Config {
    /// Loads the config for the current environment. A missing file gives the
    /// defaults; an unreadable one gives the defaults plus the error, so the
    /// caller can report it once logging is up. `LOX_LOG` overrides the log level.
    pub fn load() -> (Self, Option<ConfigError>) {
        let config_path = Self::get_config_path();
        let (mut config, error) = if config_path.exists() {
            match Self::load_from(&config_path) {
                Ok(config) => (config, None),
                Err(err) => (Config::default(), Some(err)),
            }
        } else {
            (Config::default(), None)
        };

        if let Ok(level) = env::var("LOX_LOG") {
            config.log_level = level;
        }
        (config, error)
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::IO {
            path: path.to_path_buf(),
            source,
        })?;

        serde_json::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let io_error = |source| ConfigError::IO {
            path: path.to_path_buf(),
            source,
        };

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(io_error)?;
        }

        let contents = serde_json::to_string_pretty(self).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        fs::write(path, contents).map_err(io_error)
    }

    pub fn get_config_path() -> PathBuf {
        let home = if cfg!(windows) {
            env::var("USERPROFILE")
        } else {
            env::var("HOME")
        };

        PathBuf::from(home.unwrap_or_else(|_| String::from(".")))
            .join(".lox")
            .join(env_name())
            .join("config.json")
    }
}

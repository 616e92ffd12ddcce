use log::warn;
use serde::{de::DeserializeOwned, Serialize};
use thiserror::Error;

use std::{
    fs,
    path::{Path, PathBuf},
};

pub mod codec;

pub use codec::CodecConfig;

const CONFIG_ROOT_FOLDER: &str = "config/";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("couldn't access configuration at {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("couldn't parse config at {path:?}. Reason: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("couldn't serialize default config: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

pub trait LoadConfiguration {
    fn load(exec_dir: &Path) -> Result<Self, ConfigError>
    where
        Self: Sized + Default + Serialize + DeserializeOwned,
    {
        let config_dir = exec_dir.join(CONFIG_ROOT_FOLDER);
        if !config_dir.exists() {
            log::debug!("creating new config root folder");
            fs::create_dir(&config_dir).map_err(|source| ConfigError::Io {
                path: config_dir.clone(),
                source,
            })?;
        }
        let path = config_dir.join(Self::get_path());

        let config = if path.exists() {
            let file_content = fs::read_to_string(&path).map_err(|source| ConfigError::Io {
                path: path.clone(),
                source,
            })?;

            toml::from_str(&file_content).map_err(|source| ConfigError::Parse {
                path: path.clone(),
                source,
            })?
        } else {
            let content = Self::default();

            // A read-only config folder still lets us run with defaults
            if let Err(err) = fs::write(&path, toml::to_string(&content)?) {
                warn!(
                    "Couldn't write default config to {:?}. Reason: {}",
                    &path, err
                );
            }

            content
        };

        config.validate()?;
        Ok(config)
    }

    fn get_path() -> &'static Path;

    fn validate(&self) -> Result<(), ConfigError>;
}

use std::fs;
use std::path::PathBuf;

use thiserror::Error;
use yijing_game::{CardCatalog, ConfigError, ConfigProvider, DataLoader};

#[derive(Debug, Error)]
pub enum LoaderError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid card catalog {path}: {source}")]
    Catalog {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Loads rules from disk, falling back to the bundled assets for anything
/// not given a path.
#[derive(Debug, Clone, Default)]
pub struct FileLoader {
    config_path: Option<PathBuf>,
    cards_path: Option<PathBuf>,
}

impl FileLoader {
    #[must_use]
    pub const fn new(config_path: Option<PathBuf>, cards_path: Option<PathBuf>) -> Self {
        Self {
            config_path,
            cards_path,
        }
    }
}

impl DataLoader for FileLoader {
    type Error = LoaderError;

    fn load_catalog(&self) -> Result<CardCatalog, Self::Error> {
        let Some(path) = &self.cards_path else {
            return Ok(CardCatalog::bundled());
        };
        let json = fs::read_to_string(path).map_err(|source| LoaderError::Io {
            path: path.clone(),
            source,
        })?;
        CardCatalog::from_json(&json).map_err(|source| LoaderError::Catalog {
            path: path.clone(),
            source,
        })
    }

    fn load_config(&self) -> Result<ConfigProvider, Self::Error> {
        match &self.config_path {
            Some(path) => Ok(ConfigProvider::load(path.clone())?),
            None => Ok(ConfigProvider::bundled()),
        }
    }
}

use std::path::PathBuf;

use crate::db::overrides::{load_overrides, OverrideError};
use crate::db::type_mapper::TypeMapper;

pub const OVERRIDES_PATH_ENV: &str = "TYPE_MAPPING_PATH";
pub const OUTPUT_DIR_ENV: &str = "TYPE_MAPPING_OUTPUT_DIR";
pub const DEFAULT_OUTPUT_DIR: &str = "output";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to load type overrides: {0}")]
    Overrides(#[from] OverrideError),
}

/// Runtime settings for the mapper and the files it writes.
#[derive(Debug, Clone, PartialEq)]
pub struct MapperConfig {
    pub overrides_path: Option<PathBuf>,
    pub output_dir: PathBuf,
}

impl Default for MapperConfig {
    fn default() -> Self {
        Self {
            overrides_path: None,
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
        }
    }
}

impl MapperConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        Self {
            overrides_path: get(OVERRIDES_PATH_ENV).map(PathBuf::from),
            output_dir: get(OUTPUT_DIR_ENV)
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR)),
        }
    }

    /// Build a mapper, applying overrides when a path is configured.
    ///
    /// A configured file that does not exist only logs a warning.
    pub fn build_mapper(&self) -> Result<TypeMapper, ConfigError> {
        let Some(path) = &self.overrides_path else {
            return Ok(TypeMapper::new());
        };
        match load_overrides(path) {
            Ok(overrides) => Ok(TypeMapper::with_overrides(overrides)),
            Err(OverrideError::NotFound(p)) => {
                log::warn!(
                    "Type mapping override file not found: {}; using built-in mappings",
                    p.display()
                );
                Ok(TypeMapper::new())
            }
            Err(e) => Err(e.into()),
        }
    }
}

//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading statutory
//! parameters from a YAML file.

use std::fs;
use std::path::Path;

use crate::error::{EngineError, EngineResult};

use super::types::{StatutoryConfig, StatutoryFile};

/// Loads and provides access to statutory configuration.
///
/// # File Structure
///
/// ```text
/// income_tax:
///   brackets:
///     - { up_to: "30000", rate: "0", quick_deduction: "0" }
///     - ...
///     - { rate: "0.38", quick_deduction: "24400" }   # unbounded
/// social_security:
///   monthly_ceiling: "6000"
/// professional_expenses:
///   rate: "0.20"
///   annual_cap: "30000"
/// ```
///
/// # Example
///
/// ```no_run
/// use payroll_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/statutory.yaml").unwrap();
/// println!("Brackets: {}", loader.config().tax_brackets().len());
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: StatutoryConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified YAML file.
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - The file is missing (`ConfigNotFound`)
    /// - The file contains invalid YAML or misses a field (`ConfigParseError`)
    /// - The bracket table is not ascending and continuous (`InvalidConfig`)
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let file = Self::load_yaml::<StatutoryFile>(path.as_ref())?;
        let config = StatutoryConfig::try_from(file)?;
        Ok(Self { config })
    }

    /// Parses configuration from YAML text.
    ///
    /// `origin` names the source in error messages.
    pub fn from_yaml_str(content: &str, origin: &str) -> EngineResult<Self> {
        let file = serde_yaml::from_str::<StatutoryFile>(content).map_err(|e| {
            EngineError::ConfigParseError {
                path: origin.to_string(),
                message: e.to_string(),
            }
        })?;
        let config = StatutoryConfig::try_from(file)?;
        Ok(Self { config })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Returns the loaded statutory configuration.
    pub fn config(&self) -> &StatutoryConfig {
        &self.config
    }

    /// Consumes the loader, returning the configuration.
    pub fn into_config(self) -> StatutoryConfig {
        self.config
    }
}

//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading pairing
//! rules and header aliases from YAML files.

use std::fs;
use std::path::Path;

use tracing::{debug, info};

use crate::error::{PairingError, PairingResult};

use super::types::{AliasTable, RulesConfig};

/// Loads and provides access to the pairing configuration.
///
/// # Directory Structure
///
/// ```text
/// config/stonebridge/
/// ├── rules.yaml    # Affinity pairs, Spanish roster, priority interviewers
/// └── aliases.yaml  # Optional header alias table
/// ```
///
/// # Example
///
/// ```no_run
/// use stonebridge_pairing::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/stonebridge").unwrap();
/// println!("{} affinity pairs", loader.rules().affinity_pairs.len());
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConfigLoader {
    rules: RulesConfig,
    aliases: AliasTable,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// `rules.yaml` is required. `aliases.yaml` is optional and falls back
    /// to [`AliasTable::default`] when absent.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use stonebridge_pairing::config::ConfigLoader;
    ///
    /// let loader = ConfigLoader::load("./config/stonebridge")?;
    /// # Ok::<(), stonebridge_pairing::error::PairingError>(())
    /// ```
    pub fn load<P: AsRef<Path>>(path: P) -> PairingResult<Self> {
        let path = path.as_ref();

        let rules = Self::load_yaml::<RulesConfig>(&path.join("rules.yaml"))?;

        let aliases_path = path.join("aliases.yaml");
        let aliases = if aliases_path.exists() {
            Self::load_yaml::<AliasTable>(&aliases_path)?
        } else {
            debug!(path = %aliases_path.display(), "No alias table, using defaults");
            AliasTable::default()
        };

        info!(
            path = %path.display(),
            affinity_pairs = rules.affinity_pairs.len(),
            spanish_speakers = rules.spanish_speakers.len(),
            "Loaded pairing configuration"
        );

        Ok(Self::from_parts(rules, aliases))
    }

    /// Creates a loader from already-built parts.
    pub fn from_parts(rules: RulesConfig, aliases: AliasTable) -> Self {
        Self { rules, aliases }
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> PairingResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| PairingError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| PairingError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Returns the pairing rules.
    pub fn rules(&self) -> &RulesConfig {
        &self.rules
    }

    /// Returns the header alias table.
    pub fn aliases(&self) -> &AliasTable {
        &self.aliases
    }

    /// Splits the loader into its parts.
    pub fn into_parts(self) -> (RulesConfig, AliasTable) {
        (self.rules, self.aliases)
    }
}

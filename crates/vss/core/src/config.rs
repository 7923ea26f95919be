//! Resolver configuration
//!
//! ```toml
//! tree = "/opt/vss/vss_release_4.0.json"
//!
//! [units]
//! aliases = { litres = "l" }
//!
//! [[units.definitions]]
//! symbol = "kph"
//! name = "kilometer_per_hour"
//! expr = "km/h"
//! ```

use crate::error::ConfigResult;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use vss_tree::{load_default_tree, load_tree_file, VssTree};
use vss_units::UnitRegistry;

/// Resolver configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct VssConfig {
    /// Tree file to resolve against; the bundled catalog when unset
    pub tree: Option<PathBuf>,

    /// Extra units on top of the VSS registry
    pub units: UnitsConfig,
}

/// Extra unit definitions and aliases.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct UnitsConfig {
    pub definitions: Vec<UnitDefinition>,

    /// alias → existing unit
    pub aliases: BTreeMap<String, String>,
}

/// A unit defined by an expression over known units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UnitDefinition {
    pub symbol: String,
    pub name: String,
    pub expr: String,
}

impl VssConfig {
    /// Load configuration from file; a missing file yields the defaults.
    pub fn load(path: &Path) -> ConfigResult<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "No config file, using defaults");
            return Ok(Self::default());
        }
        let contents = std::fs::read_to_string(path)?;
        let config = Self::from_toml(&contents)?;
        tracing::debug!(path = %path.display(), "Loaded config");
        Ok(config)
    }

    pub fn from_toml(contents: &str) -> ConfigResult<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// The VSS registry extended with the configured definitions, then
    /// aliases.
    pub fn unit_registry(&self) -> ConfigResult<UnitRegistry> {
        let mut registry = UnitRegistry::vss();
        for def in &self.units.definitions {
            registry.define(&def.symbol, &def.name, &def.expr)?;
        }
        for (alias, target) in &self.units.aliases {
            registry.alias(alias, target)?;
        }
        Ok(registry)
    }

    /// The configured tree, or the bundled catalog.
    pub fn load_tree(&self) -> ConfigResult<VssTree> {
        let tree = match &self.tree {
            Some(path) => load_tree_file(path)?,
            None => load_default_tree()?,
        };
        Ok(tree)
    }
}

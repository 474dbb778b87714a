//! Mango plugin configuration

use mango_core::config::{ConfigError, ConfigFile};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Top-level plugin configuration, stored as `config.toml`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MangoConfig {
    pub items: ItemsConfig,
    pub mechanics: MechanicsConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ItemsConfig {
    pub mango: MangoItemConfig,
    pub mango_seed: SeedItemConfig,
}

/// Mango item appearance and nutrition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MangoItemConfig {
    /// Display name, with `&` color codes
    pub name: String,
    pub lore: Vec<String>,
    /// Food points restored when eaten
    pub food_level: i32,
    /// Saturation restored when eaten
    pub saturation: f32,
}

impl Default for MangoItemConfig {
    fn default() -> Self {
        Self {
            name: "&6Mango".to_string(),
            lore: Vec::new(),
            food_level: 4,
            saturation: 4.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeedItemConfig {
    pub name: String,
    pub lore: Vec<String>,
}

impl Default for SeedItemConfig {
    fn default() -> Self {
        Self {
            name: "&eMango Seed".to_string(),
            lore: Vec::new(),
        }
    }
}

/// Drop chances and growth timing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MechanicsConfig {
    /// Chance of a seed dropping when a mango is eaten
    pub seed_drop_chance: f64,
    /// Chance of a mango dropping when leaves are broken
    pub leaf_drop_chance: f64,
    /// Minutes from planting to a grown tree
    pub growth_time: u32,
    /// Build the mango tree shape instead of a vanilla jungle tree
    pub use_custom_tree_generation: bool,
}

impl Default for MechanicsConfig {
    fn default() -> Self {
        Self {
            seed_drop_chance: 0.3,
            leaf_drop_chance: 0.1,
            growth_time: 30,
            use_custom_tree_generation: true,
        }
    }
}

fn check_chance(name: &str, value: f64) -> Result<(), ConfigError> {
    if !(0.0..=1.0).contains(&value) {
        return Err(ConfigError::Invalid(format!(
            "mechanics.{} must be between 0.0 and 1.0, got {}",
            name, value
        )));
    }
    Ok(())
}

impl ConfigFile for MangoConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        check_chance("seed_drop_chance", self.mechanics.seed_drop_chance)?;
        check_chance("leaf_drop_chance", self.mechanics.leaf_drop_chance)?;

        let mango = &self.items.mango;
        if mango.food_level < 0 {
            return Err(ConfigError::Invalid(format!(
                "items.mango.food_level cannot be negative, got {}",
                mango.food_level
            )));
        }
        if !mango.saturation.is_finite() || mango.saturation < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "items.mango.saturation must be a non-negative number, got {}",
                mango.saturation
            )));
        }
        Ok(())
    }
}

/// Live configuration shared between the plugin and its listeners.
///
/// Readers take a snapshot; replacing the config never affects trees that
/// are already growing.
#[derive(Debug, Clone, Default)]
pub struct SharedConfig(Arc<RwLock<MangoConfig>>);

impl SharedConfig {
    pub fn new(config: MangoConfig) -> Self {
        Self(Arc::new(RwLock::new(config)))
    }

    pub fn snapshot(&self) -> MangoConfig {
        self.0.read().clone()
    }

    pub fn mechanics(&self) -> MechanicsConfig {
        self.0.read().mechanics.clone()
    }

    pub fn replace(&self, config: MangoConfig) {
        *self.0.write() = config;
    }
}

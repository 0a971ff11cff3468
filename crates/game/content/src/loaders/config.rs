//! Combat configuration loader.

use std::path::Path;

use combat_core::CombatConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for combat balance parameters from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load config data from a TOML file.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the TOML file containing CombatConfig
    ///
    /// # Returns
    ///
    /// Returns a CombatConfig. Keys missing from the file keep their defaults.
    pub fn load(path: &Path) -> LoadResult<CombatConfig> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    /// Parse and validate config TOML.
    pub fn parse(content: &str) -> LoadResult<CombatConfig> {
        let config: CombatConfig = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))?;

        for (key, value) in [
            ("hit_base", config.hit_base),
            ("hit_min", config.hit_min),
            ("hit_max", config.hit_max),
            ("monster_special_chance", config.monster_special_chance),
            ("fear_stun_chance", config.fear_stun_chance),
        ] {
            anyhow::ensure!(
                (0.0..=1.0).contains(&value),
                "{} must be a probability in [0, 1], got {}",
                key,
                value
            );
        }
        anyhow::ensure!(
            config.hit_min <= config.hit_max,
            "hit_min ({}) exceeds hit_max ({})",
            config.hit_min,
            config.hit_max
        );
        anyhow::ensure!(
            config.transform_threshold_percent <= 100,
            "transform_threshold_percent must be at most 100"
        );

        Ok(config)
    }
}

//! Generation configuration.
//!
//! Loaded from RON or JSON; every field has a default so partial files work.
//! A seed of 0 means "pick one at random", which breaks multiplayer
//! agreement unless the chosen seed is shared with peers.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::constants::DEFAULT_NAME_ATTEMPTS;
use crate::effect::ItemTier;
use crate::error::ConfigError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    /// Items to generate per tier, generated in tier order
    pub item_counts: BTreeMap<ItemTier, u32>,
    pub equipment_count: u32,
    pub lunar_equipment_count: u32,
    /// Void items convert generated normal items of the matching tier
    pub voids_convert_normals: bool,
    /// 0 picks a random seed
    pub seed: u64,
    /// Soft cap on the total item count
    pub max_items: Option<u32>,
    /// Name draws per slot before giving up
    pub name_attempts: u32,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        let item_counts = [
            (ItemTier::Tier1, 20),
            (ItemTier::Tier2, 20),
            (ItemTier::Tier3, 20),
            (ItemTier::VoidTier1, 3),
            (ItemTier::VoidTier2, 3),
            (ItemTier::VoidTier3, 3),
        ]
        .into_iter()
        .collect();
        Self {
            item_counts,
            equipment_count: 10,
            lunar_equipment_count: 0,
            voids_convert_normals: true,
            seed: 0,
            max_items: None,
            name_attempts: DEFAULT_NAME_ATTEMPTS,
        }
    }
}

impl GenerationConfig {
    /// Load from `path`, picking the format by extension
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let config = match path.extension().and_then(|e| e.to_str()) {
            Some("ron") => Self::from_ron_str(&text)?,
            Some("json") => Self::from_json_str(&text)?,
            other => {
                return Err(ConfigError::UnsupportedFormat(
                    other.unwrap_or("<none>").to_string(),
                ))
            }
        };
        info!(path = %path.display(), "Loaded generation config");
        Ok(config)
    }

    pub fn from_ron_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = ron::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_ron_string(&self) -> Result<String, ConfigError> {
        Ok(ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.name_attempts == 0 {
            return Err(ConfigError::Invalid(
                "name_attempts must be at least 1".to_string(),
            ));
        }
        if self.item_counts.contains_key(&ItemTier::Untiered) {
            return Err(ConfigError::Invalid(
                "Untiered items cannot be generated".to_string(),
            ));
        }
        Ok(())
    }

    /// Per-tier counts after the void conversion floor and the `max_items` cap
    pub fn effective_item_counts(&self) -> BTreeMap<ItemTier, u32> {
        let mut counts = self.item_counts.clone();

        if self.voids_convert_normals {
            for tier in ItemTier::all() {
                let Some(normal) = tier.converts() else {
                    continue;
                };
                let voids = counts.get(&tier).copied().unwrap_or(0);
                let entry = counts.entry(normal).or_insert(0);
                if *entry < voids {
                    *entry = voids;
                }
            }
        }

        if let Some(max) = self.max_items {
            let total: u32 = counts.values().sum();
            if total > max {
                warn!(requested = total, max, "Item count clamped to maximum");
                let mut remaining = max;
                for count in counts.values_mut() {
                    let kept = (*count).min(remaining);
                    remaining -= kept;
                    *count = kept;
                }
            }
        }

        counts
    }

    pub fn total_items(&self) -> u32 {
        self.effective_item_counts().values().sum()
    }

    /// Configured seed, or a fresh non-zero random one
    pub fn resolve_seed(&self) -> u64 {
        if self.seed != 0 {
            return self.seed;
        }
        loop {
            let seed = rand::random::<u64>();
            if seed != 0 {
                return seed;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = GenerationConfig::default();
        assert_eq!(config.item_counts[&ItemTier::Tier1], 20);
        assert_eq!(config.item_counts[&ItemTier::VoidTier3], 3);
        assert_eq!(config.equipment_count, 10);
        assert!(config.voids_convert_normals);
        assert_eq!(config.total_items(), 69);
    }

    #[test]
    fn test_voids_raise_normal_counts() {
        let mut config = GenerationConfig::default();
        config.item_counts.insert(ItemTier::Tier2, 1);
        config.item_counts.insert(ItemTier::VoidTier2, 5);
        let counts = config.effective_item_counts();
        assert_eq!(counts[&ItemTier::Tier2], 5, "Each void item needs a normal to convert");

        config.voids_convert_normals = false;
        assert_eq!(config.effective_item_counts()[&ItemTier::Tier2], 1);
    }

    #[test]
    fn test_max_items_clamps_in_tier_order() {
        let config = GenerationConfig {
            max_items: Some(25),
            ..GenerationConfig::default()
        };
        let counts = config.effective_item_counts();
        assert_eq!(counts[&ItemTier::Tier1], 20);
        assert_eq!(counts[&ItemTier::Tier2], 5);
        assert_eq!(counts[&ItemTier::Tier3], 0);
        assert_eq!(counts.values().sum::<u32>(), 25);
    }

    #[test]
    fn test_partial_ron() {
        let config = GenerationConfig::from_ron_str("(seed: 42, equipment_count: 2)").unwrap();
        assert_eq!(config.seed, 42);
        assert_eq!(config.equipment_count, 2);
        assert_eq!(config.name_attempts, DEFAULT_NAME_ATTEMPTS, "Missing fields use defaults");
    }

    #[test]
    fn test_ron_round_trip() {
        let config = GenerationConfig {
            seed: 7,
            max_items: Some(12),
            ..GenerationConfig::default()
        };
        let text = config.to_ron_string().unwrap();
        assert_eq!(GenerationConfig::from_ron_str(&text).unwrap(), config);
    }

    #[test]
    fn test_json_counts() {
        let json = r#"{"item_counts": {"Tier1": 2, "Lunar": 1}, "seed": 9}"#;
        let config = GenerationConfig::from_json_str(json).unwrap();
        assert_eq!(config.item_counts.len(), 2);
        assert_eq!(config.item_counts[&ItemTier::Lunar], 1);
    }

    #[test]
    fn test_invalid_rejected() {
        assert!(matches!(
            GenerationConfig::from_ron_str("(name_attempts: 0)"),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            GenerationConfig::from_json_str(r#"{"item_counts": {"Untiered": 1}}"#),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            GenerationConfig::from_ron_str("(seed: \"nope\")"),
            Err(ConfigError::Ron(_))
        ));
    }

    #[test]
    fn test_load_by_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rgi.json");
        let mut file = std::fs::File::create(&path).unwrap();
        write!(file, r#"{{"seed": 5}}"#).unwrap();
        assert_eq!(GenerationConfig::load(&path).unwrap().seed, 5);

        let toml = dir.path().join("rgi.toml");
        std::fs::write(&toml, "seed = 5").unwrap();
        assert!(matches!(
            GenerationConfig::load(&toml),
            Err(ConfigError::UnsupportedFormat(ext)) if ext == "toml"
        ));
    }

    #[test]
    fn test_resolve_seed() {
        let fixed = GenerationConfig {
            seed: 123,
            ..GenerationConfig::default()
        };
        assert_eq!(fixed.resolve_seed(), 123);
        assert_ne!(GenerationConfig::default().resolve_seed(), 0);
    }
}

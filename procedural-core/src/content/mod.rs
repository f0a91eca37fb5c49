//! Content assembly.
//!
//! Turns a [`GenerationConfig`] into a batch of generated items and equipment,
//! all drawn from one seeded stream in a fixed order:
//! - item tiers in tier order, then normal equipment, then lunar equipment
//! - per slot: name (shared stream), effect (fork), icon shading (fork), lore
//!
//! A slot that fails is logged and recorded; the rest of the batch carries on.

pub mod naming;

use serde::{Deserialize, Serialize};
use sha3::{Digest, Sha3_256};
use tracing::{debug, error, info, warn};

use crate::config::GenerationConfig;
use crate::dispatch::EffectEngine;
use crate::effect::{
    generate_equipment, generate_item, Effect, EffectSummary, EquipmentSpec, ItemTier,
};
use crate::error::ContentError;
use crate::logging::TimingSpan;
use crate::registry::Registries;
use crate::rng::DeterministicRng;
use crate::visual::{tier_color, Color, IconSpec, EQUIPMENT_COLOR};

use naming::{GeneratedName, NameGenerator, NamePool};

/// What a generated definition is, from the host's point of view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContentKind {
    Item { tier: ItemTier },
    Equipment { is_lunar: bool, is_boss: bool },
}

/// Everything the host needs to build one definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratedRecord {
    /// Dispatch key, `RGI_<SANITIZED NAME>`
    pub key: String,
    pub display_name: String,
    pub kind: ContentKind,
    pub lore: String,
    pub icon: IconSpec,
    pub effect: EffectSummary,
}

/// Void item `void` converts normal item `normal`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversionPair {
    pub normal: String,
    pub void: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GenerationFailure {
    /// e.g. `Tier2#4` or `equipment#0`
    pub slot: String,
    pub error: ContentError,
}

/// One generated batch plus the engine its effects were registered into
#[derive(Debug)]
pub struct GeneratedContent {
    pub seed: u64,
    pub records: Vec<GeneratedRecord>,
    pub conversions: Vec<ConversionPair>,
    pub failures: Vec<GenerationFailure>,
    pub engine: EffectEngine,
}

impl GeneratedContent {
    pub fn items(&self) -> impl Iterator<Item = &GeneratedRecord> + '_ {
        self.records
            .iter()
            .filter(|r| matches!(r.kind, ContentKind::Item { .. }))
    }

    pub fn equipment(&self) -> impl Iterator<Item = &GeneratedRecord> + '_ {
        self.records
            .iter()
            .filter(|r| matches!(r.kind, ContentKind::Equipment { .. }))
    }

    pub fn record(&self, key: &str) -> Option<&GeneratedRecord> {
        self.records.iter().find(|r| r.key == key)
    }

    /// SHA3-256 over the seed, every record and every conversion, hex encoded.
    /// Peers with equal fingerprints generated identical content.
    pub fn fingerprint(&self) -> String {
        let mut hasher = Sha3_256::new();
        hasher.update(self.seed.to_le_bytes());
        for record in &self.records {
            match serde_json::to_vec(record) {
                Ok(bytes) => hasher.update(&bytes),
                Err(e) => {
                    warn!(
                        key = %record.key,
                        error = %e,
                        "Record not serializable, hashing key only"
                    );
                    hasher.update(record.key.as_bytes());
                }
            }
        }
        for pair in &self.conversions {
            hasher.update(pair.normal.as_bytes());
            hasher.update(pair.void.as_bytes());
        }
        format!("{:x}", hasher.finalize())
    }

    /// Records and conversions as pretty JSON
    pub fn to_json(&self) -> String {
        #[derive(Serialize)]
        struct Dump<'a> {
            seed: u64,
            fingerprint: String,
            records: &'a [GeneratedRecord],
            conversions: &'a [ConversionPair],
        }
        serde_json::to_string_pretty(&Dump {
            seed: self.seed,
            fingerprint: self.fingerprint(),
            records: &self.records,
            conversions: &self.conversions,
        })
        .unwrap_or_else(|e| {
            warn!(error = %e, "Batch dump failed");
            String::new()
        })
    }
}

pub struct ContentGenerator<'a> {
    config: &'a GenerationConfig,
    registries: &'a Registries,
    pool: NamePool,
}

impl<'a> ContentGenerator<'a> {
    pub fn new(config: &'a GenerationConfig, registries: &'a Registries) -> Self {
        Self {
            config,
            registries,
            pool: NamePool::builtin(),
        }
    }

    pub fn with_pool(mut self, pool: NamePool) -> Self {
        self.pool = pool;
        self
    }

    /// Generate the whole batch with the configured (or a fresh random) seed
    pub fn generate(&self) -> GeneratedContent {
        self.generate_with_seed(self.config.resolve_seed())
    }

    pub fn generate_with_seed(&self, seed: u64) -> GeneratedContent {
        let _span = TimingSpan::new("generate_content");
        info!(seed, "Generating content");

        let mut batch = Batch {
            rng: DeterministicRng::new(seed),
            names: NameGenerator::new(self.pool.clone(), self.config.name_attempts),
            registries: self.registries,
            content: GeneratedContent {
                seed,
                records: Vec::new(),
                conversions: Vec::new(),
                failures: Vec::new(),
                engine: EffectEngine::with_builtin_buffs(),
            },
        };

        for (tier, count) in self.config.effective_item_counts() {
            for index in 0..count {
                batch.slot(format!("{}#{index}", tier.as_str()), ContentKind::Item { tier });
            }
        }
        for index in 0..self.config.equipment_count {
            batch.slot(
                format!("equipment#{index}"),
                ContentKind::Equipment {
                    is_lunar: false,
                    is_boss: false,
                },
            );
        }
        for index in 0..self.config.lunar_equipment_count {
            batch.slot(
                format!("lunar_equipment#{index}"),
                ContentKind::Equipment {
                    is_lunar: true,
                    is_boss: false,
                },
            );
        }

        let mut content = batch.content;
        if self.config.voids_convert_normals {
            content.conversions = conversion_pairs(&content.records);
        }
        info!(
            items = content.items().count(),
            equipment = content.equipment().count(),
            failures = content.failures.len(),
            "Content generated"
        );
        content
    }
}

/// In-progress batch state
struct Batch<'r> {
    rng: DeterministicRng,
    names: NameGenerator,
    registries: &'r Registries,
    content: GeneratedContent,
}

impl Batch<'_> {
    fn slot(&mut self, slot: String, kind: ContentKind) {
        if let Err(error) = self.try_slot(kind) {
            error!(slot = %slot, error = %error, "Failed to generate content slot");
            self.content.failures.push(GenerationFailure { slot, error });
        }
    }

    fn try_slot(&mut self, kind: ContentKind) -> Result<(), ContentError> {
        let name = self.names.generate_name(&mut self.rng)?;
        let key = name.key();
        let effect = match kind {
            ContentKind::Item { tier } => generate_item(&key, tier, self.registries, &mut self.rng)?,
            ContentKind::Equipment { is_lunar, is_boss } => generate_equipment(
                &key,
                EquipmentSpec { is_lunar, is_boss },
                self.registries,
                &mut self.rng,
            )?,
        };
        let icon = IconSpec::roll(
            border_color(kind),
            effect.sprite_colors.clone(),
            effect.sprite_shape,
            &mut self.rng.fork(),
        );
        let lore = self.names.generate_log_entry(&mut self.rng);
        self.finish(name, kind, effect, icon, lore)
    }

    fn finish(
        &mut self,
        name: GeneratedName,
        kind: ContentKind,
        effect: Effect,
        icon: IconSpec,
        lore: String,
    ) -> Result<(), ContentError> {
        let record = GeneratedRecord {
            key: effect.name.clone(),
            display_name: name.display,
            kind,
            lore,
            icon,
            effect: effect.summary(),
        };
        self.content.engine.register(effect)?;
        match kind {
            ContentKind::Item { tier } => {
                debug!("Generated a {} item named {}", tier.as_str(), record.display_name)
            }
            ContentKind::Equipment { is_lunar, is_boss } => debug!(
                "Generated a {}{}equipment named {}",
                if is_lunar { "lunar " } else { "" },
                if is_boss { "boss " } else { "" },
                record.display_name
            ),
        }
        self.content.records.push(record);
        Ok(())
    }
}

fn border_color(kind: ContentKind) -> Color {
    match kind {
        ContentKind::Item { tier } => tier_color(tier).unwrap_or(Color::BLACK),
        ContentKind::Equipment { is_lunar: true, .. } => {
            tier_color(ItemTier::Lunar).unwrap_or(EQUIPMENT_COLOR)
        }
        ContentKind::Equipment { .. } => EQUIPMENT_COLOR,
    }
}

/// Pair the i-th void item of each void tier with the i-th normal item it converts
fn conversion_pairs(records: &[GeneratedRecord]) -> Vec<ConversionPair> {
    let of_tier = |tier: ItemTier| {
        records
            .iter()
            .filter(move |r| r.kind == ContentKind::Item { tier })
            .map(|r| r.key.clone())
    };
    let mut pairs = Vec::new();
    for void_tier in ItemTier::all() {
        let Some(normal_tier) = void_tier.converts() else {
            continue;
        };
        pairs.extend(
            of_tier(normal_tier)
                .zip(of_tier(void_tier))
                .map(|(normal, void)| ConversionPair { normal, void }),
        );
    }
    pairs
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_config(seed: u64) -> GenerationConfig {
        let mut config = GenerationConfig {
            seed,
            equipment_count: 3,
            lunar_equipment_count: 1,
            ..GenerationConfig::default()
        };
        config.item_counts = [
            (ItemTier::Tier1, 4),
            (ItemTier::Tier2, 2),
            (ItemTier::VoidTier1, 2),
        ]
        .into_iter()
        .collect();
        config
    }

    #[test]
    fn test_batch_counts_and_order() {
        let registries = Registries::builtin().unwrap();
        let config = small_config(42);
        let content = ContentGenerator::new(&config, &registries).generate();
        assert!(content.failures.is_empty(), "{:?}", content.failures);
        assert_eq!(content.items().count(), 8);
        assert_eq!(content.equipment().count(), 4);
        assert_eq!(content.engine.len(), 12);
        assert_eq!(content.records[0].kind, ContentKind::Item { tier: ItemTier::Tier1 });
        assert_eq!(
            content.records.last().unwrap().kind,
            ContentKind::Equipment {
                is_lunar: true,
                is_boss: false
            },
            "Lunar equipment comes last"
        );
    }

    #[test]
    fn test_same_seed_same_fingerprint() {
        let registries = Registries::builtin().unwrap();
        let config = small_config(1234);
        let a = ContentGenerator::new(&config, &registries).generate();
        let b = ContentGenerator::new(&config, &registries).generate();
        assert_eq!(a.records, b.records);
        assert_eq!(a.fingerprint(), b.fingerprint());
        assert_eq!(a.fingerprint().len(), 64);

        let c = ContentGenerator::new(&config, &registries).generate_with_seed(4321);
        assert_ne!(a.fingerprint(), c.fingerprint());
    }

    #[test]
    fn test_fingerprint_covers_every_record() {
        let registries = Registries::builtin().unwrap();
        let config = small_config(99);
        let base = ContentGenerator::new(&config, &registries).generate();
        for index in 0..base.records.len() {
            let mut edited = ContentGenerator::new(&config, &registries).generate();
            edited.records[index].lore.push('!');
            assert_ne!(
                base.fingerprint(),
                edited.fingerprint(),
                "Editing record {index} must change the fingerprint"
            );
        }
    }

    #[test]
    fn test_keys_unique_and_prefixed() {
        let registries = Registries::builtin().unwrap();
        let config = GenerationConfig {
            seed: 77,
            ..GenerationConfig::default()
        };
        let content = ContentGenerator::new(&config, &registries).generate();
        let mut keys: Vec<_> = content.records.iter().map(|r| r.key.as_str()).collect();
        assert!(keys.iter().all(|k| k.starts_with("RGI_")));
        let total = keys.len();
        keys.sort_unstable();
        keys.dedup();
        assert_eq!(keys.len(), total);
    }

    #[test]
    fn test_void_conversions() {
        let registries = Registries::builtin().unwrap();
        let config = small_config(9);
        let content = ContentGenerator::new(&config, &registries).generate();
        assert_eq!(content.conversions.len(), 2);
        for pair in &content.conversions {
            let normal = content.record(&pair.normal).unwrap();
            let void = content.record(&pair.void).unwrap();
            assert_eq!(normal.kind, ContentKind::Item { tier: ItemTier::Tier1 });
            assert_eq!(void.kind, ContentKind::Item { tier: ItemTier::VoidTier1 });
        }
    }

    #[test]
    fn test_exhausted_names_fail_cleanly() {
        let registries = Registries::builtin().unwrap();
        let config = small_config(5);
        let pool = NamePool {
            prefixes: vec!["Lone".to_string()],
            nouns: vec!["Bell".to_string(), "Ring".to_string()],
            lore_words: vec!["echo".to_string()],
        };
        let content = ContentGenerator::new(&config, &registries)
            .with_pool(pool)
            .generate();
        assert_eq!(content.records.len(), 2, "Only two distinct names exist");
        assert_eq!(content.failures.len(), 10);
        assert!(content
            .failures
            .iter()
            .all(|f| matches!(f.error, ContentError::NameExhausted { .. })));
    }

    #[test]
    fn test_icon_matches_effect_colors() {
        let registries = Registries::builtin().unwrap();
        let config = small_config(31);
        let content = ContentGenerator::new(&config, &registries).generate();
        for record in &content.records {
            assert_eq!(record.icon.core, record.effect.sprite_colors);
            assert_eq!(record.icon.shape, record.effect.sprite_shape);
            assert_eq!(record.icon.shade_offsets.len(), record.icon.core.len());
        }
        let lunar = content.records.last().unwrap();
        assert_eq!(Some(lunar.icon.border), tier_color(ItemTier::Lunar));
    }

    #[test]
    fn test_json_dump_contains_fingerprint() {
        let registries = Registries::builtin().unwrap();
        let config = small_config(2);
        let content = ContentGenerator::new(&config, &registries).generate();
        let json = content.to_json();
        assert!(json.contains(&content.fingerprint()));
        assert!(json.contains("\"records\""));
    }
}

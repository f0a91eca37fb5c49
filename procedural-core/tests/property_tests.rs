//! Property-based tests using proptest
//!
//! Invariants that must hold for ALL seeds:
//! - Determinism: same seed, same effects, same batch fingerprint
//! - Grade monotonicity: no selected entry is gated above the effect's grade
//! - Exclusion integrity: no two selected entries exclude each other
//! - Chance clamping: 0 < chance <= 100, equipment always certain
//! - Budget conservation: dual effects get half of each single-effect roll
//! - Name uniqueness: no sanitized name repeats within a batch

use std::collections::HashSet;

use proptest::prelude::*;

use rgi_core::content::naming::{NameGenerator, NamePool};
use rgi_core::effect::{
    generate_equipment, generate_item, roll_item_strengths, Effect, EffectLayout, EquipmentSpec,
    ItemTier,
};
use rgi_core::{ContentGenerator, DeterministicRng, GenerationConfig, Registries};

fn tier_strategy() -> impl Strategy<Value = ItemTier> {
    prop::sample::select(ItemTier::all().to_vec())
}

fn check_selections(effect: &Effect, registries: &Registries) -> Result<(), TestCaseError> {
    let infos = effect
        .selections
        .iter()
        .map(|s| registries.entry_info(*s))
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| TestCaseError::fail(e.to_string()))?;
    for info in &infos {
        prop_assert!(
            info.minimum_grade <= effect.grade,
            "{} needs grade {}, effect has {}",
            info.name,
            info.minimum_grade,
            effect.grade
        );
        for other in &infos {
            prop_assert!(
                !info.exclusive_with.contains(&other.name),
                "{} excludes {}",
                info.name,
                other.name
            );
        }
    }
    Ok(())
}

// ============================================================
// Effect generation
// ============================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn prop_item_generation_is_deterministic(seed in any::<u64>(), tier in tier_strategy()) {
        let registries = Registries::builtin().unwrap();
        let a = generate_item("RGI_P", tier, &registries, &mut DeterministicRng::new(seed)).unwrap();
        let b = generate_item("RGI_P", tier, &registries, &mut DeterministicRng::new(seed)).unwrap();
        prop_assert_eq!(a.summary(), b.summary());
    }

    #[test]
    fn prop_item_selections_respect_grade_and_exclusions(
        seed in any::<u64>(),
        tier in tier_strategy(),
    ) {
        let registries = Registries::builtin().unwrap();
        let effect = generate_item("RGI_P", tier, &registries, &mut DeterministicRng::new(seed)).unwrap();
        check_selections(&effect, &registries)?;
    }

    #[test]
    fn prop_item_chance_in_range(seed in any::<u64>(), tier in tier_strategy()) {
        let registries = Registries::builtin().unwrap();
        let effect = generate_item("RGI_P", tier, &registries, &mut DeterministicRng::new(seed)).unwrap();
        prop_assert!(effect.chance > 0.0 && effect.chance <= 100.0, "chance {}", effect.chance);
        prop_assert!(effect.has_passive() || effect.has_triggered(), "Effect does nothing");
        prop_assert!(!effect.description.is_empty());
    }

    #[test]
    fn prop_equipment_is_certain_and_valid(
        seed in any::<u64>(),
        is_lunar in any::<bool>(),
        is_boss in any::<bool>(),
    ) {
        let registries = Registries::builtin().unwrap();
        let spec = EquipmentSpec { is_lunar, is_boss };
        let effect = generate_equipment("RGI_E", spec, &registries, &mut DeterministicRng::new(seed)).unwrap();
        prop_assert_eq!(effect.chance, 100.0);
        prop_assert_eq!(effect.grade, spec.grade());
        prop_assert!(effect.cooldown().is_some_and(|c| c > 0.0));
        check_selections(&effect, &registries)?;
    }

    #[test]
    fn prop_shared_budget_is_exactly_half(seed in any::<u64>(), modifier in 0.5f32..4.0) {
        let single = EffectLayout::new(0, true, false);
        let dual = EffectLayout::new(0, true, true);
        let a = roll_item_strengths(&mut DeterministicRng::new(seed), modifier, 1.0, &single);
        let b = roll_item_strengths(&mut DeterministicRng::new(seed), modifier, 1.0, &dual);
        prop_assert!((a.passive.strength - 2.0 * b.passive.strength).abs() < 1e-4);
        prop_assert!((a.triggered.strength - 2.0 * b.triggered.strength).abs() < 1e-3);
        prop_assert_eq!(a.chance, b.chance);
    }
}

// ============================================================
// Batches and names
// ============================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(20))]

    #[test]
    fn prop_batch_fingerprint_is_deterministic(seed in 1u64..u64::MAX) {
        let registries = Registries::builtin().unwrap();
        let config = GenerationConfig { seed, ..GenerationConfig::default() };
        let a = ContentGenerator::new(&config, &registries).generate();
        let b = ContentGenerator::new(&config, &registries).generate();
        prop_assert_eq!(a.fingerprint(), b.fingerprint());
        prop_assert_eq!(a.records.len(), b.records.len());
    }

    #[test]
    fn prop_batch_keys_unique(seed in 1u64..u64::MAX) {
        let registries = Registries::builtin().unwrap();
        let config = GenerationConfig { seed, ..GenerationConfig::default() };
        let content = ContentGenerator::new(&config, &registries).generate();
        let mut keys = HashSet::new();
        for record in &content.records {
            prop_assert!(keys.insert(record.key.clone()), "Duplicate key {}", record.key);
        }
        prop_assert_eq!(
            content.records.len() + content.failures.len(),
            (config.total_items() + config.equipment_count + config.lunar_equipment_count) as usize
        );
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn prop_names_never_repeat(seed in any::<u64>(), count in 1usize..150) {
        let mut names = NameGenerator::new(NamePool::builtin(), 25);
        let mut rng = DeterministicRng::new(seed);
        let mut seen = HashSet::new();
        for _ in 0..count {
            match names.generate_name(&mut rng) {
                Ok(name) => prop_assert!(seen.insert(name.sanitized)),
                Err(_) => break,
            }
        }
    }
}

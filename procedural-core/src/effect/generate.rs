//! Effect generation for items and equipment.
//!
//! Draw order is part of the reproducibility contract. Every call forks the
//! caller's stream first, then draws in this order:
//! 1. layout (condition count, passive/triggered flags) unless forced
//! 2. conditions, one rejection-sampled entry per slot
//! 3. chance, chance-per-stack, passive strength, triggered strength
//! 4. passive entry, then trigger type, then triggered entry and its binding

use tracing::warn;

use super::text::{lower_first, strip_period};
use super::{Effect, EffectKind, ItemTag, ItemTier, Scaling, Selection};
use crate::constants::{
    BOSS_GRADE_BONUS, BOSS_STRENGTH_MULT, CERTAIN_CHANCE, CHANCE_ROLL_MAX, CHANCE_ROLL_MIN,
    CONDITION_CONTINUE_CHANCE, COOLDOWN_ROLL_MAX, COOLDOWN_ROLL_MIN, EQUIPMENT_BASE_GRADE,
    EQUIPMENT_BASE_STRENGTH, EQUIPMENT_MARKER, EQUIPMENT_PASSIVE_PREFIX, LUNAR_GRADE_BONUS,
    LUNAR_STRENGTH_MULT, MAX_CONDITIONS, PARTIAL_CHANCE_STACK_MIN, SHARED_BUDGET_FACTOR,
    STRENGTH_ROLL_MAX, STRENGTH_ROLL_MIN,
};
use crate::error::ContentError;
use crate::registry::{
    excludes_any, mutually_exclusive, BindContext, ConditionEntry, Registries, RegistryEntry,
    RegistryKind, TriggerKind,
};
use crate::rng::DeterministicRng;
use crate::visual::SpriteShape;

// =====================================================
// Layouts
// =====================================================

/// Structural shape of an item effect, rolled before any numbers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EffectLayout {
    pub condition_count: u32,
    pub has_passive: bool,
    pub has_triggered: bool,
}

impl EffectLayout {
    /// Forced layout. An effect without a passive always gets a triggered half.
    pub fn new(condition_count: u32, has_passive: bool, has_triggered: bool) -> Self {
        Self {
            condition_count: condition_count.min(MAX_CONDITIONS),
            has_passive,
            has_triggered: has_triggered || !has_passive,
        }
    }

    pub fn roll(rng: &mut DeterministicRng) -> Self {
        let mut condition_count = 0;
        while condition_count < MAX_CONDITIONS
            && rng.range_float(0.0, 1.0) < CONDITION_CONTINUE_CHANCE
        {
            condition_count += 1;
        }
        let has_passive = rng.next_bool();
        let has_triggered = !has_passive || rng.next_bool();
        Self {
            condition_count,
            has_passive,
            has_triggered,
        }
    }

    fn has_both(&self) -> bool {
        self.has_passive && self.has_triggered
    }

    /// Icon shape: passive-only Square, triggered-only Diamond, both Circle
    pub fn shape(&self) -> SpriteShape {
        match (self.has_passive, self.has_triggered) {
            (true, true) => SpriteShape::Circle,
            (false, _) => SpriteShape::Diamond,
            (true, false) => SpriteShape::Square,
        }
    }
}

/// Lunar and boss flags of the equipment definition being generated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EquipmentSpec {
    pub is_lunar: bool,
    pub is_boss: bool,
}

impl EquipmentSpec {
    pub fn grade(&self) -> u32 {
        let mut grade = EQUIPMENT_BASE_GRADE;
        if self.is_lunar {
            grade += LUNAR_GRADE_BONUS;
        }
        if self.is_boss {
            grade += BOSS_GRADE_BONUS;
        }
        grade
    }

    pub fn strength_modifier(&self) -> f32 {
        let mut modifier = EQUIPMENT_BASE_STRENGTH;
        if self.is_lunar {
            modifier *= LUNAR_STRENGTH_MULT;
        }
        if self.is_boss {
            modifier *= BOSS_STRENGTH_MULT;
        }
        modifier
    }
}

/// Structural shape of an equipment effect
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EquipmentLayout {
    pub has_passive: bool,
    /// Draw the triggered half from the equipment-only pool
    pub exclusive_pool: bool,
}

impl EquipmentLayout {
    pub fn roll(rng: &mut DeterministicRng) -> Self {
        let has_passive = rng.next_bool();
        let exclusive_pool = rng.next_bool();
        Self {
            has_passive,
            exclusive_pool,
        }
    }

    pub fn shape(&self) -> SpriteShape {
        match (self.has_passive, self.exclusive_pool) {
            (false, false) => SpriteShape::Square,
            (true, false) => SpriteShape::Diamond,
            (false, true) => SpriteShape::Circle,
            (true, true) => SpriteShape::Octagon,
        }
    }
}

// =====================================================
// Strength rolls
// =====================================================

/// Numbers rolled for an item effect before entry modifiers are applied
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrengthRoll {
    pub chance: f32,
    pub chance_stack_scaling: f32,
    pub passive: Scaling,
    pub triggered: Scaling,
}

/// Roll chance and both strengths.
///
/// Draw count does not depend on the layout, so two layouts rolled from equal
/// streams see identical draws.
pub fn roll_item_strengths(
    rng: &mut DeterministicRng,
    strength_modifier: f32,
    stack_scaling_modifier: f32,
    layout: &EffectLayout,
) -> StrengthRoll {
    let mut chance = rng.range_float(CHANCE_ROLL_MIN, CHANCE_ROLL_MAX) * strength_modifier;
    let chance_stack_scaling = if rng.next_bool() {
        if rng.next_bool() {
            1.0
        } else {
            rng.range_float(PARTIAL_CHANCE_STACK_MIN, 1.0)
        }
    } else {
        0.0
    };
    let stack_scaling = stack_scaling_modifier / (1.0 + chance_stack_scaling);

    let mut passive = rng.range_float(STRENGTH_ROLL_MIN, STRENGTH_ROLL_MAX) * strength_modifier;
    let mut triggered = rng.range_float(STRENGTH_ROLL_MIN, STRENGTH_ROLL_MAX) * strength_modifier;
    if layout.has_both() {
        passive *= SHARED_BUDGET_FACTOR;
        triggered *= SHARED_BUDGET_FACTOR;
    }

    if chance >= CERTAIN_CHANCE {
        chance = CERTAIN_CHANCE;
    } else {
        // rare procs hit harder
        triggered *= 1.0 + (CERTAIN_CHANCE / chance).ln();
    }

    StrengthRoll {
        chance,
        chance_stack_scaling,
        passive: Scaling::new(passive, stack_scaling),
        triggered: Scaling::new(triggered, stack_scaling),
    }
}

// =====================================================
// Items
// =====================================================

/// Generate the effect for item `name` of `tier` from a fork of `rng`
pub fn generate_item(
    name: &str,
    tier: ItemTier,
    registries: &Registries,
    rng: &mut DeterministicRng,
) -> Result<Effect, ContentError> {
    let mut rng = rng.fork();
    let layout = EffectLayout::roll(&mut rng);
    build_item(name, tier, registries, &mut rng, layout)
}

/// Same as [`generate_item`] with the layout draws replaced by `layout`
pub fn generate_item_with_layout(
    name: &str,
    tier: ItemTier,
    registries: &Registries,
    rng: &mut DeterministicRng,
    layout: EffectLayout,
) -> Result<Effect, ContentError> {
    let mut rng = rng.fork();
    build_item(name, tier, registries, &mut rng, layout)
}

fn build_item(
    name: &str,
    tier: ItemTier,
    registries: &Registries,
    rng: &mut DeterministicRng,
    layout: EffectLayout,
) -> Result<Effect, ContentError> {
    let profile = match tier.lookup_profile() {
        Some(profile) => profile,
        None => {
            warn!(item = name, tier = tier.as_str(), "No tier profile, using grade 0 fallback");
            tier.profile()
        }
    };
    let grade = profile.grade;
    let mut strength_modifier = profile.strength_modifier;
    let mut description = String::new();
    let mut selections = Vec::new();

    let mut conditions: Vec<&ConditionEntry> = Vec::new();
    for slot in 0..layout.condition_count {
        let condition = registries.conditions.sample(rng, grade, |c| {
            conditions
                .iter()
                .all(|&chosen| chosen.name != c.name && !mutually_exclusive(chosen, c))
        })?;
        strength_modifier *= condition.strength_modifier;
        if slot == 0 {
            description.push_str(condition.text);
        } else {
            description.push_str(&lower_first(condition.text));
        }
        selections.push(Selection {
            kind: RegistryKind::Condition,
            name: condition.name,
        });
        conditions.push(condition);
    }
    let condition_names: Vec<&'static str> = conditions.iter().map(|c| c.name).collect();

    let roll = roll_item_strengths(rng, strength_modifier, profile.stack_scaling_modifier, &layout);

    let mut effect = Effect {
        name: name.to_string(),
        kind: EffectKind::Item { tier },
        grade,
        chance: roll.chance,
        chance_stack_scaling: roll.chance_stack_scaling,
        passive: roll.passive,
        triggered: roll.triggered,
        conditions: conditions.iter().map(|c| c.bind()).collect(),
        trigger: None,
        proc_type: None,
        passive_callback: None,
        triggered_callback: None,
        description: String::new(),
        extra_text: Default::default(),
        sprite_colors: Vec::new(),
        sprite_shape: layout.shape(),
        item_tags: Vec::new(),
        selections,
        buffs: Vec::new(),
        stat_hooks: Vec::new(),
    };

    if layout.has_passive {
        let passive = registries
            .passives
            .sample(rng, grade, |p| !excludes_any(p, &condition_names))?;
        effect.passive.strength *= passive.strength_modifier;
        effect.passive_callback = Some(passive.bind(effect.passive));
        effect.sprite_colors.extend_from_slice(&passive.sprite_colors);
        add_tags(&mut effect.item_tags, passive.item_tags);
        let text = passive.description(&effect.passive);
        if layout.condition_count > 0 {
            description.push_str(&lower_first(&text));
        } else {
            description.push_str(&text);
        }
        effect.selections.push(Selection {
            kind: RegistryKind::PassiveEffect,
            name: passive.name,
        });
    }

    if !layout.has_triggered {
        effect.description = description;
        return Ok(effect);
    }

    let trigger_type = registries.trigger_types.sample(rng, grade, |t| {
        !excludes_any(t, &condition_names)
            && registries.triggered_for(t.kind).iter().any(|name| {
                registries.triggered.get(name).is_ok_and(|e| {
                    e.minimum_grade <= grade && !excludes_any(e, &condition_names)
                })
            })
    })?;
    effect.triggered.strength *= trigger_type.strength_modifier;

    let entry = registries.triggered.sample_named(
        registries.triggered_for(trigger_type.kind),
        rng,
        grade,
        |e| !excludes_any(e, &condition_names),
    )?;
    effect.triggered.strength *= entry.strength_modifier;

    let mut ctx = BindContext {
        rng: &mut *rng,
        registries,
        effect_name: name,
        grade,
        is_equipment: false,
        conditions: &condition_names,
        triggered: effect.triggered,
    };
    let bound = (entry.bind)(&mut ctx)?;
    effect.triggered = ctx.triggered;

    let mut trigger_text = trigger_type.describe(effect.chance, effect.chance_stack_scaling);
    trigger_text.push_str(&bound.description);
    if layout.has_passive {
        strip_period(&mut description);
        description.push_str(", and ");
        description.push_str(&lower_first(&trigger_text));
    } else if layout.condition_count > 0 {
        description.push_str(&lower_first(&trigger_text));
    } else {
        description.push_str(&trigger_text);
    }
    effect.description = description;

    effect.trigger = Some(trigger_type.kind);
    effect.proc_type = bound.proc_type;
    effect.triggered_callback = Some(bound.callback);
    effect.extra_text = bound.extra_text;
    effect.sprite_colors.extend(bound.sprite_colors);
    effect.sprite_colors.extend_from_slice(&entry.sprite_colors);
    add_tags(&mut effect.item_tags, entry.item_tags);
    add_tags(&mut effect.item_tags, &bound.item_tags);
    effect.buffs = bound.buffs;
    effect.stat_hooks = bound.stat_hooks;
    effect.selections.push(Selection {
        kind: RegistryKind::TriggerType,
        name: trigger_type.name(),
    });
    effect.selections.push(Selection {
        kind: RegistryKind::TriggeredEffect,
        name: entry.name,
    });
    effect.selections.extend(bound.selections);
    Ok(effect)
}

fn add_tags(tags: &mut Vec<ItemTag>, new: &[ItemTag]) {
    for tag in new {
        if !tags.contains(tag) {
            tags.push(*tag);
        }
    }
}

// =====================================================
// Equipment
// =====================================================

/// Generate the effect for equipment `name` from a fork of `rng`
pub fn generate_equipment(
    name: &str,
    spec: EquipmentSpec,
    registries: &Registries,
    rng: &mut DeterministicRng,
) -> Result<Effect, ContentError> {
    let mut rng = rng.fork();
    let layout = EquipmentLayout::roll(&mut rng);
    build_equipment(name, spec, registries, &mut rng, layout)
}

/// Same as [`generate_equipment`] with the layout draws replaced by `layout`
pub fn generate_equipment_with_layout(
    name: &str,
    spec: EquipmentSpec,
    registries: &Registries,
    rng: &mut DeterministicRng,
    layout: EquipmentLayout,
) -> Result<Effect, ContentError> {
    let mut rng = rng.fork();
    build_equipment(name, spec, registries, &mut rng, layout)
}

fn build_equipment(
    name: &str,
    spec: EquipmentSpec,
    registries: &Registries,
    rng: &mut DeterministicRng,
    layout: EquipmentLayout,
) -> Result<Effect, ContentError> {
    let grade = spec.grade();
    let strength_modifier = spec.strength_modifier();
    let mut description = String::new();
    let mut selections = Vec::new();

    let passive_strength = rng.range_float(STRENGTH_ROLL_MIN, STRENGTH_ROLL_MAX) * strength_modifier;
    let mut triggered_strength =
        rng.range_float(STRENGTH_ROLL_MIN, STRENGTH_ROLL_MAX) * strength_modifier;
    if layout.has_passive {
        triggered_strength *= SHARED_BUDGET_FACTOR;
    }
    let base_cooldown = rng.range_float(COOLDOWN_ROLL_MIN, COOLDOWN_ROLL_MAX) * triggered_strength;

    let mut passive = Scaling::new(passive_strength, 0.0);
    let mut passive_callback = None;
    let mut sprite_colors = Vec::new();
    let mut item_tags = Vec::new();

    if layout.has_passive {
        let entry = registries
            .passives
            .sample(rng, grade, |p| !excludes_any(p, &[EQUIPMENT_MARKER]))?;
        passive.strength *= entry.strength_modifier;
        passive_callback = Some(entry.bind(passive));
        sprite_colors.extend_from_slice(&entry.sprite_colors);
        add_tags(&mut item_tags, entry.item_tags);
        description.push_str(EQUIPMENT_PASSIVE_PREFIX);
        description.push_str(&lower_first(&entry.description(&passive)));
        selections.push(Selection {
            kind: RegistryKind::PassiveEffect,
            name: entry.name,
        });
    }

    let trigger_type = registries.trigger_types.get(TriggerKind::Equipment.as_str())?;
    triggered_strength *= trigger_type.strength_modifier;

    let not_for_equipment = |e: &crate::registry::TriggeredEntry| {
        !excludes_any(e, &[EQUIPMENT_MARKER])
    };
    let (entry, entry_kind) = if layout.exclusive_pool {
        let entry = registries
            .equipment_effects
            .sample(rng, grade, not_for_equipment)?;
        (entry, RegistryKind::EquipmentEffect)
    } else {
        let entry = registries.triggered.sample_named(
            registries.triggered_for(TriggerKind::Equipment),
            rng,
            grade,
            not_for_equipment,
        )?;
        (entry, RegistryKind::TriggeredEffect)
    };
    triggered_strength *= entry.strength_modifier;

    let mut ctx = BindContext {
        rng: &mut *rng,
        registries,
        effect_name: name,
        grade,
        is_equipment: true,
        conditions: &[],
        triggered: Scaling::new(triggered_strength, 0.0),
    };
    let bound = (entry.bind)(&mut ctx)?;
    let triggered = ctx.triggered;

    let mut trigger_text = trigger_type.describe(CERTAIN_CHANCE, 0.0);
    trigger_text.push_str(&bound.description);
    if layout.has_passive {
        strip_period(&mut description);
        description.push_str(", and ");
        description.push_str(&lower_first(&trigger_text));
    } else {
        description.push_str(&trigger_text);
    }

    let cooldown = round_cooldown(base_cooldown * bound.cooldown_modifier);

    sprite_colors.extend(bound.sprite_colors);
    sprite_colors.extend_from_slice(&entry.sprite_colors);
    add_tags(&mut item_tags, entry.item_tags);
    add_tags(&mut item_tags, &bound.item_tags);
    selections.push(Selection {
        kind: RegistryKind::TriggerType,
        name: trigger_type.name(),
    });
    selections.push(Selection {
        kind: entry_kind,
        name: entry.name,
    });
    selections.extend(bound.selections);

    Ok(Effect {
        name: name.to_string(),
        kind: EffectKind::Equipment {
            is_lunar: spec.is_lunar,
            is_boss: spec.is_boss,
            cooldown,
        },
        grade,
        chance: CERTAIN_CHANCE,
        chance_stack_scaling: 0.0,
        passive,
        triggered,
        conditions: Vec::new(),
        trigger: Some(TriggerKind::Equipment),
        proc_type: bound.proc_type,
        passive_callback,
        triggered_callback: Some(bound.callback),
        description,
        extra_text: bound.extra_text,
        sprite_colors,
        sprite_shape: layout.shape(),
        item_tags,
        selections,
        buffs: bound.buffs,
        stat_hooks: bound.stat_hooks,
    })
}

/// Two decimal places
fn round_cooldown(cooldown: f32) -> f32 {
    (cooldown * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registries() -> Registries {
        Registries::builtin().unwrap()
    }

    #[test]
    fn test_same_seed_same_effect() {
        let registries = registries();
        for seed in [1u64, 42, 9001] {
            let a = generate_item("RGI_A", ItemTier::Tier2, &registries, &mut DeterministicRng::new(seed))
                .unwrap();
            let b = generate_item("RGI_A", ItemTier::Tier2, &registries, &mut DeterministicRng::new(seed))
                .unwrap();
            assert_eq!(a.summary(), b.summary(), "Seed {seed} must reproduce");
        }
    }

    #[test]
    fn test_generation_advances_parent_once() {
        let registries = registries();
        let mut rng = DeterministicRng::new(7);
        let mut reference = DeterministicRng::new(7);
        generate_item("RGI_A", ItemTier::Tier1, &registries, &mut rng).unwrap();
        reference.next_u64();
        assert_eq!(rng.next_u64(), reference.next_u64(), "Only the fork draw touches the parent");
    }

    #[test]
    fn test_passive_only_layout() {
        let registries = registries();
        let effect = generate_item_with_layout(
            "RGI_PASSIVE",
            ItemTier::Tier1,
            &registries,
            &mut DeterministicRng::new(42),
            EffectLayout::new(0, true, false),
        )
        .unwrap();
        assert!(effect.has_passive());
        assert!(!effect.has_triggered());
        assert_eq!(effect.trigger, None);
        assert!(effect.chance > 0.0, "Chance is still rolled");
        let passive = effect.selected(RegistryKind::PassiveEffect).next().unwrap();
        let entry = registries.passives.get(passive).unwrap();
        assert_eq!(effect.description, entry.description(&effect.passive));
    }

    #[test]
    fn test_layout_never_empty() {
        let layout = EffectLayout::new(9, false, false);
        assert!(layout.has_triggered, "An effect without passive must trigger");
        assert_eq!(layout.condition_count, MAX_CONDITIONS);
    }

    #[test]
    fn test_shared_budget_halves() {
        let single = EffectLayout::new(0, true, false);
        let both = EffectLayout::new(0, true, true);
        let a = roll_item_strengths(&mut DeterministicRng::new(3), 1.0, 1.0, &single);
        let b = roll_item_strengths(&mut DeterministicRng::new(3), 1.0, 1.0, &both);
        assert!((a.passive.strength - 2.0 * b.passive.strength).abs() < 1e-5);
        assert!((a.triggered.strength - 2.0 * b.triggered.strength).abs() < 1e-4);
        assert_eq!(a.chance, b.chance);
    }

    #[test]
    fn test_low_chance_boosts_triggered() {
        let layout = EffectLayout::new(0, false, true);
        let roll = roll_item_strengths(&mut DeterministicRng::new(11), 1.0, 1.0, &layout);
        assert!(roll.chance >= 10.0 && roll.chance < 20.0);
        // base roll >= 1 and chance < 20 gives a factor above 1 + ln(5)
        assert!(roll.triggered.strength > 1.0 + 5f32.ln());
    }

    #[test]
    fn test_legendary_chance_clamped() {
        let registries = registries();
        for seed in 0..20 {
            let effect =
                generate_item("RGI_L", ItemTier::Tier3, &registries, &mut DeterministicRng::new(seed))
                    .unwrap();
            assert_eq!(effect.chance, 100.0, "Tier3 modifier pushes chance past 100");
            assert_eq!(effect.grade, 3);
        }
    }

    #[test]
    fn test_untiered_fallback() {
        let registries = registries();
        let effect = generate_item(
            "RGI_U",
            ItemTier::Untiered,
            &registries,
            &mut DeterministicRng::new(5),
        )
        .unwrap();
        assert_eq!(effect.grade, 0);
    }

    #[test]
    fn test_selected_entries_respect_grade_and_exclusions() {
        let registries = registries();
        for seed in 0..200 {
            let tier = ItemTier::all()[seed as usize % 9];
            let effect =
                generate_item("RGI_X", tier, &registries, &mut DeterministicRng::new(seed)).unwrap();
            let infos: Vec<_> = effect
                .selections
                .iter()
                .map(|s| registries.entry_info(*s).unwrap())
                .collect();
            for info in &infos {
                assert!(info.minimum_grade <= effect.grade, "{} above grade", info.name);
                for other in &infos {
                    assert!(
                        !info.exclusive_with.contains(&other.name),
                        "{} excludes {}",
                        info.name,
                        other.name
                    );
                }
            }
        }
    }

    #[test]
    fn test_every_effect_does_something() {
        let registries = registries();
        for seed in 0..100 {
            let effect =
                generate_item("RGI_Y", ItemTier::Tier1, &registries, &mut DeterministicRng::new(seed))
                    .unwrap();
            assert!(effect.has_passive() || effect.has_triggered());
            assert!(effect.chance > 0.0 && effect.chance <= 100.0);
            assert_eq!(effect.has_triggered(), effect.trigger.is_some());
            assert!(!effect.description.is_empty());
        }
    }

    #[test]
    fn test_equipment_grades() {
        assert_eq!(EquipmentSpec::default().grade(), 2);
        let lunar_boss = EquipmentSpec {
            is_lunar: true,
            is_boss: true,
        };
        assert_eq!(lunar_boss.grade(), 5);
        assert_eq!(lunar_boss.strength_modifier(), 16.0);
    }

    #[test]
    fn test_equipment_shapes_distinct() {
        let shapes: Vec<_> = [(false, false), (true, false), (false, true), (true, true)]
            .iter()
            .map(|&(has_passive, exclusive_pool)| {
                EquipmentLayout {
                    has_passive,
                    exclusive_pool,
                }
                .shape()
            })
            .collect();
        for (i, a) in shapes.iter().enumerate() {
            for b in &shapes[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn test_item_shape_follows_layout() {
        let registries = registries();
        let shapes: Vec<_> = [(true, false), (false, true), (true, true)]
            .iter()
            .map(|&(has_passive, has_triggered)| {
                generate_item_with_layout(
                    "RGI_SHAPE",
                    ItemTier::Tier1,
                    &registries,
                    &mut DeterministicRng::new(21),
                    EffectLayout::new(0, has_passive, has_triggered),
                )
                .unwrap()
                .sprite_shape
            })
            .collect();
        assert_eq!(
            shapes,
            vec![SpriteShape::Square, SpriteShape::Diamond, SpriteShape::Circle],
            "passive-only, triggered-only and both get distinct shapes"
        );
    }

    #[test]
    fn test_equipment_always_certain() {
        let registries = registries();
        for seed in 0..50 {
            let effect = generate_equipment(
                "RGI_EQ",
                EquipmentSpec::default(),
                &registries,
                &mut DeterministicRng::new(seed),
            )
            .unwrap();
            assert_eq!(effect.chance, 100.0);
            assert_eq!(effect.trigger, Some(TriggerKind::Equipment));
            assert!(effect.conditions.is_empty());
            let cooldown = effect.cooldown().unwrap();
            assert!(cooldown > 0.0);
            assert!(((cooldown * 100.0).round() - cooldown * 100.0).abs() < 1e-2, "Two decimals");
        }
    }

    #[test]
    fn test_exclusive_pool_layout() {
        let registries = registries();
        let effect = generate_equipment_with_layout(
            "RGI_EQ",
            EquipmentSpec::default(),
            &registries,
            &mut DeterministicRng::new(4),
            EquipmentLayout {
                has_passive: true,
                exclusive_pool: true,
            },
        )
        .unwrap();
        assert_eq!(effect.sprite_shape, SpriteShape::Octagon);
        assert!(effect.description.starts_with("Passively "));
        assert!(effect.description.contains(", and "));
        assert_eq!(effect.selected(RegistryKind::EquipmentEffect).count(), 1);
        let passive = effect.selected(RegistryKind::PassiveEffect).next().unwrap();
        assert_ne!(passive, "EquipCooldownBoost", "Never on equipment");
    }
}

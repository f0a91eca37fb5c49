//! Triggered effects and how they bind into a generated effect.
//!
//! Binding runs once at generation time. It may draw from the effect's forked
//! RNG, pick sub-entries (a passive, a payload, a status) and adjust the
//! triggered scaling. The returned callback closes over the final numbers.

use std::collections::BTreeMap;

use super::payload::PayloadLaunch;
use super::{excludes_any, Registries, RegistryEntry, RegistryKind, TriggerKind};
use crate::constants::{
    EQUIPMENT_MARKER, NO_DECAY_BUFF, NO_DECAY_DURATION, PASSIVE_BUFF_PREFIX,
    STACKABLE_BUFF_DIVISOR,
};
use crate::dispatch::{BuffDef, StatHook};
use crate::effect::text::lower_first;
use crate::effect::{ItemTag, Scaling, Selection, TriggeredCallback};
use crate::error::ContentError;
use crate::host::{ProcType, Vec3};
use crate::rng::DeterministicRng;
use crate::visual::Color;

pub const ALL_TRIGGERS: &[TriggerKind] = &[
    TriggerKind::Hit,
    TriggerKind::Crit,
    TriggerKind::Kill,
    TriggerKind::EliteKill,
    TriggerKind::Heal,
    TriggerKind::Hurt,
    TriggerKind::Skill,
    TriggerKind::Equipment,
    TriggerKind::Interact,
];

/// Triggers that always carry a damage report
pub const ATTACK_TRIGGERS: &[TriggerKind] = &[TriggerKind::Hit, TriggerKind::Crit];

/// Generation state visible to a triggered effect while it binds
pub struct BindContext<'a> {
    pub rng: &'a mut DeterministicRng,
    pub registries: &'a Registries,
    /// Definition key of the item or equipment being generated
    pub effect_name: &'a str,
    pub grade: u32,
    pub is_equipment: bool,
    pub conditions: &'a [&'static str],
    /// Triggered scaling so far; binding may adjust it
    pub triggered: Scaling,
}

/// Result of binding a triggered effect
pub struct BoundTrigger {
    pub callback: TriggeredCallback,
    /// Fragment that follows the trigger type's lead-in
    pub description: String,
    pub proc_type: Option<ProcType>,
    pub cooldown_modifier: f32,
    pub extra_text: BTreeMap<String, String>,
    /// Colors contributed by sub-entries, placed before the effect's own
    pub sprite_colors: Vec<Color>,
    pub item_tags: Vec<ItemTag>,
    pub buffs: Vec<BuffDef>,
    pub stat_hooks: Vec<StatHook>,
    pub selections: Vec<Selection>,
}

impl BoundTrigger {
    pub fn new(callback: TriggeredCallback, description: String) -> Self {
        Self {
            callback,
            description,
            proc_type: None,
            cooldown_modifier: 1.0,
            extra_text: BTreeMap::new(),
            sprite_colors: Vec::new(),
            item_tags: Vec::new(),
            buffs: Vec::new(),
            stat_hooks: Vec::new(),
            selections: Vec::new(),
        }
    }
}

pub type BindFn = fn(&mut BindContext<'_>) -> Result<BoundTrigger, ContentError>;

/// One-shot behaviour fired by a trigger type
#[derive(Clone)]
pub struct TriggeredEntry {
    pub name: &'static str,
    pub strength_modifier: f32,
    pub sprite_colors: Vec<Color>,
    pub item_tags: &'static [ItemTag],
    pub minimum_grade: u32,
    pub exclusive_with: &'static [&'static str],
    pub trigger_kinds: &'static [TriggerKind],
    pub bind: BindFn,
}

impl std::fmt::Debug for TriggeredEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TriggeredEntry")
            .field("name", &self.name)
            .field("strength_modifier", &self.strength_modifier)
            .field("minimum_grade", &self.minimum_grade)
            .field("trigger_kinds", &self.trigger_kinds)
            .finish_non_exhaustive()
    }
}

impl RegistryEntry for TriggeredEntry {
    fn name(&self) -> &'static str {
        self.name
    }

    fn minimum_grade(&self) -> u32 {
        self.minimum_grade
    }

    fn exclusive_with(&self) -> &'static [&'static str] {
        self.exclusive_with
    }
}

pub(super) fn builtin() -> Vec<TriggeredEntry> {
    vec![
        TriggeredEntry {
            name: "PassiveBuff",
            strength_modifier: 0.5,
            sprite_colors: vec![Color::BLUE],
            item_tags: &[],
            minimum_grade: 2,
            exclusive_with: &[],
            trigger_kinds: ALL_TRIGGERS,
            bind: bind_passive_buff,
        },
        TriggeredEntry {
            name: "FireEffectPayload",
            strength_modifier: 50.0,
            sprite_colors: vec![Color::rgb(1.0, 0.5, 0.0)],
            item_tags: &[ItemTag::Damage],
            minimum_grade: 0,
            exclusive_with: &[],
            trigger_kinds: ALL_TRIGGERS,
            bind: bind_fire_payload,
        },
        TriggeredEntry {
            name: "SpawnEffectPayload",
            strength_modifier: 25.0,
            sprite_colors: vec![Color::rgb(1.0, 0.75, 0.0)],
            item_tags: &[ItemTag::Damage],
            minimum_grade: 0,
            exclusive_with: &[],
            trigger_kinds: ATTACK_TRIGGERS,
            bind: bind_spawn_payload,
        },
        TriggeredEntry {
            name: "ApplyBleed",
            strength_modifier: 1.0,
            sprite_colors: vec![Color::RED],
            item_tags: &[ItemTag::Damage],
            minimum_grade: 0,
            exclusive_with: &[],
            trigger_kinds: ATTACK_TRIGGERS,
            bind: bind_bleed,
        },
        TriggeredEntry {
            name: "Heal",
            strength_modifier: 1.0,
            sprite_colors: vec![Color::GREEN],
            item_tags: &[ItemTag::Healing],
            minimum_grade: 0,
            exclusive_with: &["AtFullHP", "HasShield"],
            trigger_kinds: ALL_TRIGGERS,
            bind: bind_heal,
        },
        TriggeredEntry {
            name: "Barrier",
            strength_modifier: 3.0,
            sprite_colors: vec![Color::YELLOW],
            item_tags: &[ItemTag::Healing],
            minimum_grade: 0,
            exclusive_with: &[],
            trigger_kinds: ALL_TRIGGERS,
            bind: bind_barrier,
        },
    ]
}

// =====================================================
// Bindings
// =====================================================

fn bind_passive_buff(ctx: &mut BindContext<'_>) -> Result<BoundTrigger, ContentError> {
    let registries = ctx.registries;
    let buff_name = format!("{PASSIVE_BUFF_PREFIX}{}", ctx.effect_name);
    let can_stack = !ctx.is_equipment && ctx.rng.next_bool();
    if can_stack {
        ctx.triggered.strength /= STACKABLE_BUFF_DIVISOR;
    }
    let stack_text = if can_stack {
        ", and the effect <style=cIsDamage>can stack multiple times</style>."
    } else {
        ". This effect does <style=cDeath>not</style> stack."
    };

    let is_equipment = ctx.is_equipment;
    let conditions = ctx.conditions;
    let passive = registries.passives.sample(ctx.rng, ctx.grade, |p| {
        !(is_equipment && excludes_any(p, &[EQUIPMENT_MARKER])) && !excludes_any(p, conditions)
    })?;
    ctx.triggered.strength *= passive.strength_modifier;

    let scaling = ctx.triggered;
    let passive_text = passive.description(&scaling);
    let description = format!(
        "temporarily {} Effect lasts for {}{}",
        lower_first(&passive_text),
        scaling.duration_text(),
        stack_text
    );

    let apply = passive.apply;
    let hook = StatHook {
        label: format!("{}:{}", ctx.effect_name, passive.name),
        buff: Some(buff_name.clone()),
        owner: Some(ctx.effect_name.to_string()),
        handler: Box::new(move |args, hook| {
            let buffed = Scaling::new(
                scaling.strength * hook.buff_count as f32,
                scaling.stack_scaling,
            );
            apply(args, &buffed, hook.stacks.max(1), hook.body);
            Ok(())
        }),
    };

    let timed_buff = buff_name.clone();
    let callback: TriggeredCallback = Box::new(move |tc, host| {
        host.add_timed_buff(
            tc.body.id(),
            &timed_buff,
            scaling.duration(tc.stacks, tc.proc_coefficient),
        );
        Ok(())
    });

    let mut bound = BoundTrigger::new(callback, description);
    bound
        .extra_text
        .insert("BuffCanStack".to_string(), stack_text.to_string());
    bound
        .extra_text
        .insert("PassiveEffectBuff".to_string(), passive_text);
    bound.sprite_colors = passive.sprite_colors.clone();
    bound.item_tags = passive.item_tags.to_vec();
    bound.buffs.push(BuffDef {
        name: buff_name,
        can_stack,
        is_debuff: false,
        is_hidden: false,
    });
    bound.stat_hooks.push(hook);
    bound.selections.push(Selection {
        kind: RegistryKind::PassiveEffect,
        name: passive.name,
    });
    Ok(bound)
}

fn bind_fire_payload(ctx: &mut BindContext<'_>) -> Result<BoundTrigger, ContentError> {
    let registries = ctx.registries;
    let payload = registries.payloads.sample(ctx.rng, ctx.grade, |_| true)?;
    ctx.triggered.strength *= payload.strength_modifier;
    let scaling = ctx.triggered;

    let entry = payload.clone();
    let callback: TriggeredCallback = Box::new(move |tc, host| {
        let body = tc.body;
        let crit = host.check_roll(body.crit_chance(), body);
        let launch = PayloadLaunch {
            attacker: body.id(),
            origin: body.core_position() + Vec3::UP,
            direction: body.aim_direction(),
            damage: body.damage() * scaling.triggered_fraction(tc.stacks, tc.proc_coefficient),
            crit,
            stacks: tc.stacks,
            proc_coefficient: tc.proc_coefficient,
            proc_chain_mask: tc.proc_chain_mask,
            exclude: tc.args.damage.as_ref().map(|d| d.victim),
        };
        host.spawn_payload(entry.request(&launch))
    });

    let description = format!(
        "fire a {} for {} <style=cIsDamage>base damage</style>.",
        payload.label,
        scaling.percent_text("IsDamage")
    );
    let mut bound = BoundTrigger::new(callback, description);
    bound.proc_type = Some(payload.proc_type);
    bound
        .extra_text
        .insert("FiredEffectPayload".to_string(), payload.label.to_string());
    bound.selections.push(Selection {
        kind: RegistryKind::Payload,
        name: payload.name,
    });
    Ok(bound)
}

fn bind_spawn_payload(ctx: &mut BindContext<'_>) -> Result<BoundTrigger, ContentError> {
    let registries = ctx.registries;
    let payload = registries.payloads.sample(ctx.rng, ctx.grade, |_| true)?;
    ctx.triggered.strength *= payload.strength_modifier;
    let scaling = ctx.triggered;

    let entry = payload.clone();
    let callback: TriggeredCallback = Box::new(move |tc, host| {
        let body = tc.body;
        let report = tc.args.damage_report()?;
        let crit = host.check_roll(body.crit_chance(), body);
        let launch = PayloadLaunch {
            attacker: body.id(),
            origin: report.victim_position,
            direction: Vec3::ZERO,
            damage: body.damage() * scaling.triggered_fraction(tc.stacks, tc.proc_coefficient),
            crit,
            stacks: tc.stacks,
            proc_coefficient: tc.proc_coefficient,
            proc_chain_mask: tc.proc_chain_mask,
            exclude: Some(report.victim),
        };
        host.spawn_payload(entry.request(&launch))
    });

    let description = format!(
        "spawn a {} for {} <style=cIsDamage>base damage</style>.",
        payload.label,
        scaling.percent_text("IsDamage")
    );
    let mut bound = BoundTrigger::new(callback, description);
    bound.proc_type = Some(payload.proc_type);
    bound
        .extra_text
        .insert("SpawnedEffectPayload".to_string(), payload.label.to_string());
    bound.selections.push(Selection {
        kind: RegistryKind::Payload,
        name: payload.name,
    });
    Ok(bound)
}

fn bind_bleed(ctx: &mut BindContext<'_>) -> Result<BoundTrigger, ContentError> {
    let status = ctx.registries.statuses.get("Bleed")?.clone();
    ctx.triggered.strength *= status.strength_modifier;
    let scaling = ctx.triggered;

    let description = format!(
        "{} a target for {}.",
        status.label,
        scaling.duration_text()
    );
    let proc_type = status.proc_type;
    let name = status.name;
    let callback: TriggeredCallback = Box::new(move |tc, host| {
        let report = tc.args.damage_report()?;
        let attacker = report.attacker.unwrap_or_else(|| tc.body.id());
        host.inflict_dot(status.request(
            &scaling,
            attacker,
            report.victim,
            tc.stacks,
            tc.proc_coefficient,
            report.damage,
        ))
    });

    let mut bound = BoundTrigger::new(callback, description);
    bound.proc_type = Some(proc_type);
    bound.selections.push(Selection {
        kind: RegistryKind::Status,
        name,
    });
    Ok(bound)
}

fn bind_heal(ctx: &mut BindContext<'_>) -> Result<BoundTrigger, ContentError> {
    let scaling = ctx.triggered;
    let callback: TriggeredCallback = Box::new(move |tc, host| {
        let amount =
            tc.body.full_health() * scaling.triggered_fraction(tc.stacks, tc.proc_coefficient);
        host.heal(tc.body.id(), amount, tc.proc_chain_mask);
        Ok(())
    });
    let description = format!(
        "receive <style=cIsHealing>healing</style> equal to {} of your maximum <style=cIsHealing>health</style>.",
        scaling.percent_text("IsHealing")
    );
    let mut bound = BoundTrigger::new(callback, description);
    bound.proc_type = Some(ProcType::HealingBonus);
    Ok(bound)
}

fn bind_barrier(ctx: &mut BindContext<'_>) -> Result<BoundTrigger, ContentError> {
    let uncapped = ctx.rng.next_normalized_float() * 30.0 < ctx.triggered.strength;
    if uncapped {
        ctx.triggered.strength /= 3.0;
    }
    let scaling = ctx.triggered;
    let uncapped_text = if uncapped {
        " Remove the maximum <style=cIsHealing>barrier</style> cap for 10 seconds."
    } else {
        ""
    };

    let callback: TriggeredCallback = Box::new(move |tc, host| {
        let id = tc.body.id();
        if uncapped {
            host.add_timed_buff(id, NO_DECAY_BUFF, NO_DECAY_DURATION);
        }
        let amount =
            tc.body.full_health() * scaling.triggered_fraction(tc.stacks, tc.proc_coefficient);
        host.add_barrier(id, amount);
        Ok(())
    });
    let description = format!(
        "receive <style=cIsHealing>barrier</style> equal to {} of your maximum <style=cIsHealing>health</style>.{}",
        scaling.percent_text("IsHealing"),
        uncapped_text
    );
    let mut bound = BoundTrigger::new(callback, description);
    bound
        .extra_text
        .insert("NoMaxBarrierText".to_string(), uncapped_text.to_string());
    Ok(bound)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effect::TriggerContext;
    use crate::host::sim::{HostAction, SimBody, SimHost};
    use crate::host::{DamageReport, EventArgs, ProcChainMask};

    fn bind(name: &str, grade: u32, strength: f32, seed: u64) -> (BoundTrigger, Scaling) {
        let registries = Registries::builtin().unwrap();
        let entry = registries.triggered.get(name).unwrap().clone();
        let mut rng = DeterministicRng::new(seed);
        let mut ctx = BindContext {
            rng: &mut rng,
            registries: &registries,
            effect_name: "RGI_TEST",
            grade,
            is_equipment: false,
            conditions: &[],
            triggered: Scaling::new(strength, 1.0),
        };
        let bound = (entry.bind)(&mut ctx).unwrap();
        let scaling = ctx.triggered;
        (bound, scaling)
    }

    fn hit_args() -> EventArgs {
        EventArgs {
            damage: Some(DamageReport {
                attacker: Some(1),
                victim: 2,
                victim_position: Vec3::new(5.0, 0.0, 0.0),
                victim_is_elite: false,
                damage: 40.0,
                crit: false,
                proc_coefficient: 1.0,
                proc_chain_mask: ProcChainMask::new(),
            }),
            ..EventArgs::default()
        }
    }

    fn fire(bound: &BoundTrigger, args: &mut EventArgs, stacks: u32) -> (SimHost, bool) {
        let body = SimBody::new(1);
        let mut host = SimHost::new();
        let mut tc = TriggerContext {
            body: &body,
            stacks,
            proc_coefficient: 1.0,
            proc_chain_mask: ProcChainMask::new(),
            args,
        };
        let ok = (bound.callback)(&mut tc, &mut host).is_ok();
        (host, ok)
    }

    #[test]
    fn test_heal_binding() {
        let (bound, _) = bind("Heal", 1, 10.0, 1);
        assert_eq!(bound.proc_type, Some(ProcType::HealingBonus));
        let (mut host, ok) = fire(&bound, &mut EventArgs::default(), 1);
        assert!(ok);
        match host.take_actions().as_slice() {
            [HostAction::Heal { target, amount, .. }] => {
                assert_eq!(*target, 1);
                assert!((amount - 10.0).abs() < 1e-4, "10% of 100 health");
            }
            other => panic!("Unexpected actions: {:?}", other),
        }
    }

    #[test]
    fn test_bleed_needs_damage_report() {
        let (bound, _) = bind("ApplyBleed", 1, 8.0, 1);
        assert_eq!(bound.proc_type, Some(ProcType::BleedOnHit));
        let (_, ok) = fire(&bound, &mut EventArgs::default(), 1);
        assert!(!ok, "Missing damage report is a callback error");

        let (mut host, ok) = fire(&bound, &mut hit_args(), 1);
        assert!(ok);
        match host.take_actions().as_slice() {
            [HostAction::Dot(dot)] => {
                assert_eq!(dot.victim, 2);
                assert_eq!(dot.total_damage, 40.0);
                assert!((dot.duration - 4.0).abs() < 1e-4);
            }
            other => panic!("Unexpected actions: {:?}", other),
        }
    }

    #[test]
    fn test_fire_payload_binding() {
        let (bound, scaling) = bind("FireEffectPayload", 5, 1.0, 9);
        let payload = bound
            .selections
            .iter()
            .find(|s| s.kind == RegistryKind::Payload)
            .expect("payload selected");
        let registries = Registries::builtin().unwrap();
        let entry = registries.payloads.get(payload.name).unwrap();
        assert_eq!(scaling.strength, entry.strength_modifier);
        assert_eq!(bound.proc_type, Some(entry.proc_type));
        assert!(bound.description.starts_with("fire a "));

        let (mut host, ok) = fire(&bound, &mut hit_args(), 1);
        assert!(ok);
        assert!(matches!(host.take_actions().as_slice(), [HostAction::Payload(_)]));
    }

    #[test]
    fn test_spawn_payload_at_victim() {
        let (bound, _) = bind("SpawnEffectPayload", 5, 1.0, 4);
        let (mut host, ok) = fire(&bound, &mut hit_args(), 2);
        assert!(ok);
        match host.take_actions().as_slice() {
            [HostAction::Payload(req)] => {
                assert_eq!(req.origin, Vec3::new(5.0, 0.0, 0.0));
                assert_eq!(req.stacks, 2);
            }
            other => panic!("Unexpected actions: {:?}", other),
        }
    }

    #[test]
    fn test_passive_buff_declares_buff_and_hook() {
        let (bound, _) = bind("PassiveBuff", 2, 10.0, 3);
        assert_eq!(bound.buffs.len(), 1);
        assert_eq!(bound.buffs[0].name, "BUFF_PASSIVE_RGI_TEST");
        assert_eq!(bound.stat_hooks.len(), 1);
        assert!(bound.description.starts_with("temporarily "));
        assert!(bound.description.contains("Effect lasts for"));
        let stack_text = &bound.extra_text["BuffCanStack"];
        assert!(bound.description.ends_with(stack_text.as_str()));

        let (mut host, ok) = fire(&bound, &mut EventArgs::default(), 1);
        assert!(ok);
        assert!(matches!(
            host.take_actions().as_slice(),
            [HostAction::Buff { buff, .. }] if buff == "BUFF_PASSIVE_RGI_TEST"
        ));
    }

    #[test]
    fn test_passive_buff_not_stackable_on_equipment() {
        let registries = Registries::builtin().unwrap();
        let entry = registries.triggered.get("PassiveBuff").unwrap().clone();
        for seed in 0..20 {
            let mut rng = DeterministicRng::new(seed);
            let mut ctx = BindContext {
                rng: &mut rng,
                registries: &registries,
                effect_name: "RGI_EQ",
                grade: 5,
                is_equipment: true,
                conditions: &[],
                triggered: Scaling::new(10.0, 0.0),
            };
            let bound = (entry.bind)(&mut ctx).unwrap();
            assert!(!bound.buffs[0].can_stack);
            let passive = bound.selections[0].name;
            assert_ne!(passive, "EquipCooldownBoost");
        }
    }

    #[test]
    fn test_barrier_uncapped_when_strong() {
        // next_normalized_float * 30 < strength always holds above 30
        let (bound, scaling) = bind("Barrier", 1, 60.0, 2);
        assert_eq!(scaling.strength, 20.0, "Uncapped barrier divides strength by 3");
        assert!(bound.description.ends_with("cap for 10 seconds."));
        let (mut host, _) = fire(&bound, &mut EventArgs::default(), 1);
        let actions = host.take_actions();
        assert!(matches!(&actions[0], HostAction::Buff { buff, .. } if buff == NO_DECAY_BUFF));
        assert!(matches!(&actions[1], HostAction::Barrier { .. }));
    }
}

//! Effect dispatch engine.
//!
//! Routes stat recalculation and gameplay events to generated effects:
//! - inventory is walked in acquisition order, then the equipped item
//! - equipment always counts as one stack
//! - rolled effects ask the host for a chance roll, certain ones never do
//! - a proc tag already in the incoming chain blocks the effect
//! - callback errors are logged and counted; dispatch carries on

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use crate::constants::{
    CERTAIN_CHANCE, NO_DECAY_BUFF, UNCAPPED_DECAY_DIVISOR, UNCAPPED_MAX_BARRIER,
};
use crate::effect::{Effect, TriggerContext};
use crate::error::{ContentError, EffectError};
use crate::host::{
    Body, DamageReport, EventArgs, Host, InteractionInfo, ProcChainMask, SkillSlot, StatHookArgs,
};
use crate::registry::TriggerKind;

/// Buff definition the host must register alongside the generated content
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuffDef {
    pub name: String,
    pub can_stack: bool,
    pub is_debuff: bool,
    pub is_hidden: bool,
}

/// What a stat hook sees during recalculation
pub struct StatHookContext<'a> {
    pub body: &'a dyn Body,
    /// Stacks of the owning item (1 for equipment, 0 when not held)
    pub stacks: u32,
    /// Count of the gating buff, 0 for ungated hooks
    pub buff_count: u32,
}

pub type StatHookFn = Box<
    dyn Fn(&mut StatHookArgs, &StatHookContext<'_>) -> Result<(), EffectError> + Send + Sync,
>;

/// Extra stat-recalculation step, optionally gated on a buff
pub struct StatHook {
    pub label: String,
    /// Only runs while the body carries this buff
    pub buff: Option<String>,
    /// Definition key whose stack count is passed to the handler
    pub owner: Option<String>,
    pub handler: StatHookFn,
}

impl fmt::Debug for StatHook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StatHook")
            .field("label", &self.label)
            .field("buff", &self.buff)
            .field("owner", &self.owner)
            .finish_non_exhaustive()
    }
}

/// Outcome counters for one dispatch call
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DispatchReport {
    pub invoked: u32,
    pub failed: u32,
    /// Skipped because the proc chain already carried the effect's tag
    pub blocked: u32,
}

impl DispatchReport {
    fn merge(&mut self, other: DispatchReport) {
        self.invoked += other.invoked;
        self.failed += other.failed;
        self.blocked += other.blocked;
    }
}

/// Write-once dispatch table of generated effects
#[derive(Debug, Default)]
pub struct EffectEngine {
    effects: HashMap<String, Effect>,
    order: Vec<String>,
    buffs: Vec<BuffDef>,
    stat_hooks: Vec<StatHook>,
}

impl EffectEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Engine with the shared uncapped-barrier buff already registered
    pub fn with_builtin_buffs() -> Self {
        let mut engine = Self::new();
        engine.register_buff(BuffDef {
            name: NO_DECAY_BUFF.to_string(),
            can_stack: false,
            is_debuff: false,
            is_hidden: true,
        });
        engine.register_stat_hook(StatHook {
            label: NO_DECAY_BUFF.to_string(),
            buff: Some(NO_DECAY_BUFF.to_string()),
            owner: None,
            handler: Box::new(|args, hook| {
                args.max_barrier_override = Some(UNCAPPED_MAX_BARRIER);
                args.barrier_decay_rate_override = Some(
                    (hook.body.max_health() + hook.body.max_shield()) / UNCAPPED_DECAY_DIVISOR,
                );
                Ok(())
            }),
        });
        engine
    }

    /// Add an effect under its definition key; its buffs and hooks move into the engine
    pub fn register(&mut self, mut effect: Effect) -> Result<(), ContentError> {
        if self.effects.contains_key(&effect.name) {
            return Err(ContentError::DuplicateEffect(effect.name));
        }
        self.buffs.append(&mut effect.buffs);
        self.stat_hooks.append(&mut effect.stat_hooks);
        self.order.push(effect.name.clone());
        self.effects.insert(effect.name.clone(), effect);
        Ok(())
    }

    pub fn register_buff(&mut self, buff: BuffDef) {
        self.buffs.push(buff);
    }

    pub fn register_stat_hook(&mut self, hook: StatHook) {
        self.stat_hooks.push(hook);
    }

    pub fn get(&self, key: &str) -> Option<&Effect> {
        self.effects.get(key)
    }

    /// Effects in registration order
    pub fn effects(&self) -> impl Iterator<Item = &Effect> + '_ {
        self.order.iter().filter_map(|key| self.effects.get(key))
    }

    pub fn buffs(&self) -> &[BuffDef] {
        &self.buffs
    }

    pub fn stat_hooks(&self) -> &[StatHook] {
        &self.stat_hooks
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Generated effects held by `body` with their stack counts
    fn held<'s>(&'s self, body: &dyn Body, host: &dyn Host) -> Vec<(&'s Effect, u32)> {
        let mut held = Vec::new();
        for &item in body.item_acquisition_order() {
            let Some(effect) = host.item_key(item).and_then(|key| self.effects.get(key)) else {
                continue;
            };
            if !effect.is_equipment() {
                held.push((effect, body.item_count(item)));
            }
        }
        let equipped = body
            .equipment()
            .and_then(|index| host.equipment_key(index))
            .and_then(|key| self.effects.get(key));
        if let Some(effect) = equipped.filter(|e| e.is_equipment()) {
            held.push((effect, 1));
        }
        held
    }

    /// Stack count of the item or equipment registered under `key`
    fn stacks_of(&self, key: &str, body: &dyn Body, host: &dyn Host) -> u32 {
        let equipped = body
            .equipment()
            .and_then(|index| host.equipment_key(index))
            .is_some_and(|k| k == key);
        if equipped {
            return 1;
        }
        host.item_index(key)
            .map(|index| body.item_count(index))
            .unwrap_or(0)
    }

    /// Stat recalculation: passive callbacks, then buff-gated stat hooks
    pub fn apply_passive_effects(
        &self,
        body: &dyn Body,
        host: &dyn Host,
        args: &mut StatHookArgs,
    ) -> DispatchReport {
        let mut report = DispatchReport::default();

        for (effect, stacks) in self.held(body, host) {
            let Some(callback) = &effect.passive_callback else {
                continue;
            };
            if stacks == 0 || !effect.conditions_met(body) {
                continue;
            }
            match callback(args, stacks, body) {
                Ok(()) => report.invoked += 1,
                Err(e) => {
                    error!(effect = %effect.name, error = %e, "Passive effect failed");
                    report.failed += 1;
                }
            }
        }

        for hook in &self.stat_hooks {
            let buff_count = match &hook.buff {
                Some(buff) => match body.buff_count(buff) {
                    0 => continue,
                    n => n,
                },
                None => 0,
            };
            let stacks = hook
                .owner
                .as_deref()
                .map(|owner| self.stacks_of(owner, body, host))
                .unwrap_or(0);
            let ctx = StatHookContext {
                body,
                stacks,
                buff_count,
            };
            match (hook.handler)(args, &ctx) {
                Ok(()) => report.invoked += 1,
                Err(e) => {
                    error!(hook = %hook.label, error = %e, "Stat hook failed");
                    report.failed += 1;
                }
            }
        }

        report
    }

    /// Fire every held effect bound to `kind`
    pub fn trigger_effects(
        &self,
        kind: TriggerKind,
        body: &dyn Body,
        host: &mut dyn Host,
        proc_coefficient: f32,
        proc_chain_mask: Option<ProcChainMask>,
        args: &mut EventArgs,
    ) -> DispatchReport {
        let mut report = DispatchReport::default();
        let incoming = proc_chain_mask.unwrap_or_default();

        for (effect, stacks) in self.held(body, &*host) {
            if effect.trigger != Some(kind) {
                continue;
            }
            let Some(callback) = &effect.triggered_callback else {
                continue;
            };
            if stacks == 0 || !effect.conditions_met(body) {
                continue;
            }
            if effect.chance < CERTAIN_CHANCE
                && !host.check_roll(effect.chance_at(stacks, proc_coefficient), body)
            {
                continue;
            }

            let mut mask = incoming;
            if let Some(proc_type) = effect.proc_type {
                if incoming.has_proc(proc_type) {
                    debug!(effect = %effect.name, proc = proc_type.as_str(), "Blocked by proc chain");
                    report.blocked += 1;
                    continue;
                }
                mask.add_proc(proc_type);
            }

            let mut ctx = TriggerContext {
                body,
                stacks,
                proc_coefficient,
                proc_chain_mask: mask,
                args: &mut *args,
            };
            match callback(&mut ctx, &mut *host) {
                Ok(()) => report.invoked += 1,
                Err(e) => {
                    error!(
                        effect = %effect.name,
                        trigger = kind.as_str(),
                        error = %e,
                        "Triggered effect failed"
                    );
                    report.failed += 1;
                }
            }
        }

        report
    }

    // =====================================================
    // Host event hooks
    // =====================================================

    /// Hit (and Crit) for the attacker, Hurt for the victim
    pub fn on_damage_dealt(
        &self,
        damage: &DamageReport,
        attacker: Option<&dyn Body>,
        victim: &dyn Body,
        host: &mut dyn Host,
    ) -> DispatchReport {
        let mut report = DispatchReport::default();
        let mut args = EventArgs {
            damage: Some(damage.clone()),
            ..EventArgs::default()
        };
        let pc = damage.proc_coefficient;
        let mask = Some(damage.proc_chain_mask);
        if let Some(attacker) = attacker {
            report.merge(self.trigger_effects(TriggerKind::Hit, attacker, host, pc, mask, &mut args));
            if damage.crit {
                report.merge(self.trigger_effects(
                    TriggerKind::Crit,
                    attacker,
                    host,
                    pc,
                    mask,
                    &mut args,
                ));
            }
        }
        report.merge(self.trigger_effects(TriggerKind::Hurt, victim, host, pc, mask, &mut args));
        report
    }

    /// Kill for the attacker, plus EliteKill when the victim was elite
    pub fn on_character_death(
        &self,
        damage: &DamageReport,
        attacker: Option<&dyn Body>,
        host: &mut dyn Host,
    ) -> DispatchReport {
        let mut report = DispatchReport::default();
        let Some(attacker) = attacker else {
            return report;
        };
        let mut args = EventArgs {
            damage: Some(damage.clone()),
            ..EventArgs::default()
        };
        let pc = damage.proc_coefficient;
        let mask = Some(damage.proc_chain_mask);
        report.merge(self.trigger_effects(TriggerKind::Kill, attacker, host, pc, mask, &mut args));
        if damage.victim_is_elite {
            report.merge(self.trigger_effects(
                TriggerKind::EliteKill,
                attacker,
                host,
                pc,
                mask,
                &mut args,
            ));
        }
        report
    }

    /// Heal trigger for non-regen heals; returns the possibly modified amount
    pub fn on_heal(
        &self,
        body: &dyn Body,
        amount: f32,
        proc_chain_mask: ProcChainMask,
        non_regen: bool,
        host: &mut dyn Host,
    ) -> f32 {
        if !non_regen {
            return amount;
        }
        let mut args = EventArgs {
            heal_amount: Some(amount),
            ..EventArgs::default()
        };
        self.trigger_effects(
            TriggerKind::Heal,
            body,
            host,
            1.0,
            Some(proc_chain_mask),
            &mut args,
        );
        args.heal_amount.unwrap_or(amount)
    }

    pub fn on_skill_activated(
        &self,
        body: &dyn Body,
        skill: SkillSlot,
        host: &mut dyn Host,
    ) -> DispatchReport {
        let mut args = EventArgs {
            skill: Some(skill),
            ..EventArgs::default()
        };
        self.trigger_effects(TriggerKind::Skill, body, host, 1.0, None, &mut args)
    }

    /// Generated equipment always succeeds; other equipment defers to `perform`.
    /// On success the Equipment trigger fires for `body`.
    pub fn on_equipment_used(
        &self,
        body: &dyn Body,
        equipment_key: &str,
        host: &mut dyn Host,
        perform: impl FnOnce(&mut dyn Host) -> bool,
    ) -> bool {
        let generated = self
            .effects
            .get(equipment_key)
            .is_some_and(Effect::is_equipment);
        if !generated && !perform(&mut *host) {
            return false;
        }
        let mut args = EventArgs {
            equipment: Some(equipment_key.to_string()),
            ..EventArgs::default()
        };
        self.trigger_effects(TriggerKind::Equipment, body, host, 1.0, None, &mut args);
        true
    }

    pub fn on_interaction(
        &self,
        interactor: &dyn Body,
        interaction: InteractionInfo,
        host: &mut dyn Host,
    ) -> DispatchReport {
        let mut args = EventArgs {
            interaction: Some(interaction),
            ..EventArgs::default()
        };
        self.trigger_effects(TriggerKind::Interact, interactor, host, 1.0, None, &mut args)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;

    use super::*;
    use crate::effect::{EffectKind, ItemTier, Scaling};
    use crate::host::sim::{RollMode, SimBody, SimHost};
    use crate::host::{ProcType, Vec3};
    use crate::visual::SpriteShape;

    fn effect(name: &str, trigger: Option<TriggerKind>, chance: f32) -> Effect {
        Effect {
            name: name.to_string(),
            kind: EffectKind::Item {
                tier: ItemTier::Tier1,
            },
            grade: 1,
            chance,
            chance_stack_scaling: 0.0,
            passive: Scaling::new(10.0, 1.0),
            triggered: Scaling::new(10.0, 1.0),
            conditions: Vec::new(),
            trigger,
            proc_type: None,
            passive_callback: None,
            triggered_callback: None,
            description: String::new(),
            extra_text: BTreeMap::new(),
            sprite_colors: Vec::new(),
            sprite_shape: SpriteShape::Square,
            item_tags: Vec::new(),
            selections: Vec::new(),
            buffs: Vec::new(),
            stat_hooks: Vec::new(),
        }
    }

    fn counting_trigger(counter: &Arc<AtomicU32>) -> crate::effect::TriggeredCallback {
        let counter = Arc::clone(counter);
        Box::new(move |tc, _| {
            counter.fetch_add(tc.stacks, Ordering::SeqCst);
            Ok(())
        })
    }

    fn setup(e: Effect, stacks: u32) -> (EffectEngine, SimBody, SimHost) {
        let mut host = SimHost::new();
        let index = host.register_item(&e.name);
        let mut body = SimBody::new(1);
        body.give_item(index, stacks);
        let mut engine = EffectEngine::new();
        engine.register(e).unwrap();
        (engine, body, host)
    }

    #[test]
    fn test_duplicate_registration_rejected() {
        let mut engine = EffectEngine::new();
        engine.register(effect("RGI_A", None, 100.0)).unwrap();
        assert_eq!(
            engine.register(effect("RGI_A", None, 100.0)).unwrap_err(),
            ContentError::DuplicateEffect("RGI_A".to_string())
        );
        assert_eq!(engine.len(), 1);
    }

    #[test]
    fn test_certain_hit_fires_once_with_stacks() {
        let counter = Arc::new(AtomicU32::new(0));
        let mut e = effect("RGI_HIT", Some(TriggerKind::Hit), 100.0);
        e.triggered_callback = Some(counting_trigger(&counter));
        let (engine, body, mut host) = setup(e, 3);

        let report = engine.trigger_effects(
            TriggerKind::Hit,
            &body,
            &mut host,
            1.0,
            None,
            &mut EventArgs::default(),
        );
        assert_eq!(report.invoked, 1);
        assert_eq!(counter.load(Ordering::SeqCst), 3, "Callback sees all three stacks");
        assert_eq!(host.rolls, 0, "Certain effects never roll");
    }

    #[test]
    fn test_other_trigger_kinds_ignored() {
        let counter = Arc::new(AtomicU32::new(0));
        let mut e = effect("RGI_KILL", Some(TriggerKind::Kill), 100.0);
        e.triggered_callback = Some(counting_trigger(&counter));
        let (engine, body, mut host) = setup(e, 1);
        let report = engine.on_skill_activated(&body, SkillSlot::Primary, &mut host);
        assert_eq!(report.invoked, 0);
    }

    #[test]
    fn test_failed_roll_skips() {
        let counter = Arc::new(AtomicU32::new(0));
        let mut e = effect("RGI_ROLL", Some(TriggerKind::Skill), 15.0);
        e.triggered_callback = Some(counting_trigger(&counter));
        let (engine, body, mut host) = setup(e, 1);
        host.roll_mode = RollMode::Never;
        let report = engine.on_skill_activated(&body, SkillSlot::Utility, &mut host);
        assert_eq!(report.invoked, 0);
        assert_eq!(host.rolls, 1);
    }

    #[test]
    fn test_proc_chain_blocks_reentry() {
        let counter = Arc::new(AtomicU32::new(0));
        let mut e = effect("RGI_MISSILE", Some(TriggerKind::Hit), 100.0);
        e.proc_type = Some(ProcType::Missile);
        e.triggered_callback = Some(counting_trigger(&counter));
        let (engine, body, mut host) = setup(e, 1);

        let report = engine.trigger_effects(
            TriggerKind::Hit,
            &body,
            &mut host,
            1.0,
            Some(ProcChainMask::with(ProcType::Missile)),
            &mut EventArgs::default(),
        );
        assert_eq!(report.invoked, 0);
        assert_eq!(report.blocked, 1);
        assert_eq!(counter.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_callback_sees_marked_mask() {
        let seen = Arc::new(AtomicU32::new(0));
        let flag = Arc::clone(&seen);
        let mut e = effect("RGI_BLEED", Some(TriggerKind::Hit), 100.0);
        e.proc_type = Some(ProcType::BleedOnHit);
        e.triggered_callback = Some(Box::new(move |tc, _| {
            if tc.proc_chain_mask.has_proc(ProcType::BleedOnHit) {
                flag.store(1, Ordering::SeqCst);
            }
            Ok(())
        }));
        let (engine, body, mut host) = setup(e, 1);
        engine.trigger_effects(
            TriggerKind::Hit,
            &body,
            &mut host,
            1.0,
            None,
            &mut EventArgs::default(),
        );
        assert_eq!(seen.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_zero_stacks_skip_passive() {
        let counter = Arc::new(AtomicU32::new(0));
        let hits = Arc::clone(&counter);
        let mut e = effect("RGI_PASSIVE", None, 100.0);
        e.passive_callback = Some(Box::new(move |_, _, _| {
            hits.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }));
        let (engine, body, host) = setup(e, 0);
        let report = engine.apply_passive_effects(&body, &host, &mut StatHookArgs::default());
        assert_eq!(report.invoked, 0);
        assert_eq!(counter.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_failing_callback_does_not_stop_others() {
        let counter = Arc::new(AtomicU32::new(0));
        let mut host = SimHost::new();
        let mut body = SimBody::new(1);
        let mut engine = EffectEngine::new();

        let mut bad = effect("RGI_BAD", None, 100.0);
        bad.passive_callback = Some(Box::new(|_, _, _| Err(EffectError::Host("boom".into()))));
        let mut good = effect("RGI_GOOD", None, 100.0);
        let hits = Arc::clone(&counter);
        good.passive_callback = Some(Box::new(move |_, _, _| {
            hits.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }));
        for e in [bad, good] {
            body.give_item(host.register_item(&e.name), 1);
            engine.register(e).unwrap();
        }

        let report = engine.apply_passive_effects(&body, &host, &mut StatHookArgs::default());
        assert_eq!(report.failed, 1);
        assert_eq!(report.invoked, 1);
        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_acquisition_order_respected() {
        let log = Arc::new(std::sync::Mutex::new(Vec::new()));
        let mut host = SimHost::new();
        let mut body = SimBody::new(1);
        let mut engine = EffectEngine::new();
        for name in ["RGI_FIRST", "RGI_SECOND"] {
            let mut e = effect(name, Some(TriggerKind::Skill), 100.0);
            let log = Arc::clone(&log);
            let label = name.to_string();
            e.triggered_callback = Some(Box::new(move |_, _| {
                log.lock().unwrap().push(label.clone());
                Ok(())
            }));
            engine.register(e).unwrap();
        }
        // acquire in reverse of registration order
        body.give_item(host.register_item("RGI_SECOND"), 1);
        body.give_item(host.register_item("RGI_FIRST"), 1);

        engine.on_skill_activated(&body, SkillSlot::Special, &mut host);
        assert_eq!(*log.lock().unwrap(), vec!["RGI_SECOND", "RGI_FIRST"]);
    }

    #[test]
    fn test_no_decay_hook_gated_by_buff() {
        let engine = EffectEngine::with_builtin_buffs();
        let host = SimHost::new();
        let mut body = SimBody::new(1);
        body.max_health = 120.0;
        body.max_shield = 30.0;

        let mut args = StatHookArgs::default();
        engine.apply_passive_effects(&body, &host, &mut args);
        assert_eq!(args.max_barrier_override, None, "Hook idle without the buff");

        body.set_buff(NO_DECAY_BUFF, 1);
        engine.apply_passive_effects(&body, &host, &mut args);
        assert_eq!(args.max_barrier_override, Some(UNCAPPED_MAX_BARRIER));
        assert_eq!(args.barrier_decay_rate_override, Some(5.0));
        assert!(engine.buffs()[0].is_hidden);
    }

    #[test]
    fn test_heal_amount_written_back() {
        let mut e = effect("RGI_HEAL", Some(TriggerKind::Heal), 100.0);
        e.triggered_callback = Some(Box::new(|tc, _| {
            if let Some(amount) = tc.args.heal_amount.as_mut() {
                *amount *= 2.0;
            }
            Ok(())
        }));
        let (engine, body, mut host) = setup(e, 1);
        let healed = engine.on_heal(&body, 10.0, ProcChainMask::new(), true, &mut host);
        assert_eq!(healed, 20.0);
        let regen = engine.on_heal(&body, 10.0, ProcChainMask::new(), false, &mut host);
        assert_eq!(regen, 10.0, "Regen heals are not dispatched");
    }

    #[test]
    fn test_equipment_use() {
        let counter = Arc::new(AtomicU32::new(0));
        let mut e = effect("RGI_EQ", Some(TriggerKind::Equipment), 100.0);
        e.kind = EffectKind::Equipment {
            is_lunar: false,
            is_boss: false,
            cooldown: 30.0,
        };
        e.triggered_callback = Some(counting_trigger(&counter));
        let mut host = SimHost::new();
        let mut body = SimBody::new(1);
        body.equipment = Some(host.register_equipment("RGI_EQ"));
        let mut engine = EffectEngine::new();
        engine.register(e).unwrap();

        assert!(engine.on_equipment_used(&body, "RGI_EQ", &mut host, |_| false));
        assert_eq!(counter.load(Ordering::SeqCst), 1, "Equipment fires with one stack");

        assert!(!engine.on_equipment_used(&body, "Vanilla", &mut host, |_| false));
        assert!(engine.on_equipment_used(&body, "Vanilla", &mut host, |_| true));
        assert_eq!(counter.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_damage_dealt_routes_hit_crit_hurt() {
        let counter = Arc::new(AtomicU32::new(0));
        let mut host = SimHost::new();
        let mut attacker = SimBody::new(1);
        let mut victim = SimBody::new(2);
        let mut engine = EffectEngine::new();
        for (name, kind) in [
            ("RGI_ON_HIT", TriggerKind::Hit),
            ("RGI_ON_CRIT", TriggerKind::Crit),
            ("RGI_ON_HURT", TriggerKind::Hurt),
        ] {
            let mut e = effect(name, Some(kind), 100.0);
            e.triggered_callback = Some(counting_trigger(&counter));
            let index = host.register_item(name);
            if kind == TriggerKind::Hurt {
                victim.give_item(index, 1);
            } else {
                attacker.give_item(index, 1);
            }
            engine.register(e).unwrap();
        }
        let damage = DamageReport {
            attacker: Some(1),
            victim: 2,
            victim_position: Vec3::ZERO,
            victim_is_elite: false,
            damage: 10.0,
            crit: true,
            proc_coefficient: 1.0,
            proc_chain_mask: ProcChainMask::new(),
        };
        let report = engine.on_damage_dealt(&damage, Some(&attacker), &victim, &mut host);
        assert_eq!(report.invoked, 3);

        let no_crit = DamageReport { crit: false, ..damage };
        let report = engine.on_damage_dealt(&no_crit, Some(&attacker), &victim, &mut host);
        assert_eq!(report.invoked, 2);
    }
}

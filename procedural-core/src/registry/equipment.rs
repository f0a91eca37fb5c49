//! Equipment-exclusive triggered effects.
//!
//! Only drawn when an equipment piece rolls the exclusive pool. Both fire on
//! equipment use and carry their own cooldown modifier.

use super::payload::PayloadLaunch;
use super::{BindContext, BoundTrigger, RegistryKind, TriggerKind, TriggeredEntry};
use crate::constants::VOLLEY_PAYLOAD_COUNT;
use crate::effect::{ItemTag, Selection, TriggeredCallback};
use crate::error::ContentError;
use crate::host::Vec3;
use crate::visual::Color;

const EQUIPMENT_ONLY: &[TriggerKind] = &[TriggerKind::Equipment];
const VOLLEY_COOLDOWN_MODIFIER: f32 = 1.5;
const VOLLEY_SPACING: f32 = 0.5;

pub(super) fn builtin() -> Vec<TriggeredEntry> {
    vec![
        TriggeredEntry {
            name: "SpawnInteractable",
            strength_modifier: 1.0,
            sprite_colors: vec![Color::CYAN],
            item_tags: &[ItemTag::Utility],
            minimum_grade: 0,
            exclusive_with: &[],
            trigger_kinds: EQUIPMENT_ONLY,
            bind: bind_spawn_interactable,
        },
        TriggeredEntry {
            name: "PayloadVolley",
            strength_modifier: 20.0,
            sprite_colors: vec![Color::rgb(1.0, 0.25, 0.5)],
            item_tags: &[ItemTag::Damage],
            minimum_grade: 0,
            exclusive_with: &[],
            trigger_kinds: EQUIPMENT_ONLY,
            bind: bind_payload_volley,
        },
    ]
}

fn bind_spawn_interactable(ctx: &mut BindContext<'_>) -> Result<BoundTrigger, ContentError> {
    let registries = ctx.registries;
    let interactable = registries.interactables.sample(ctx.rng, ctx.grade, |_| true)?;
    let entry = interactable.clone();
    let callback: TriggeredCallback = Box::new(move |tc, host| {
        host.spawn_interactable(entry.request(tc.body.id(), tc.body.core_position()))
    });

    let mut bound = BoundTrigger::new(callback, format!("summon {} nearby.", interactable.label));
    bound.cooldown_modifier = interactable.cooldown_modifier;
    bound
        .extra_text
        .insert("SpawnedInteractable".to_string(), interactable.label.to_string());
    bound.selections.push(Selection {
        kind: RegistryKind::Interactable,
        name: interactable.name,
    });
    Ok(bound)
}

fn bind_payload_volley(ctx: &mut BindContext<'_>) -> Result<BoundTrigger, ContentError> {
    let registries = ctx.registries;
    let payload = registries.payloads.sample(ctx.rng, ctx.grade, |_| true)?;
    ctx.triggered.strength *= payload.strength_modifier;
    let scaling = ctx.triggered;

    let entry = payload.clone();
    let callback: TriggeredCallback = Box::new(move |tc, host| {
        let body = tc.body;
        let damage = body.damage() * scaling.triggered_fraction(tc.stacks, tc.proc_coefficient);
        for shot in 0..VOLLEY_PAYLOAD_COUNT {
            let crit = host.check_roll(body.crit_chance(), body);
            let launch = PayloadLaunch {
                attacker: body.id(),
                origin: body.core_position() + Vec3::UP * (1.0 + VOLLEY_SPACING * shot as f32),
                direction: body.aim_direction(),
                damage,
                crit,
                stacks: tc.stacks,
                proc_coefficient: tc.proc_coefficient,
                proc_chain_mask: tc.proc_chain_mask,
                exclude: None,
            };
            host.spawn_payload(entry.request(&launch))?;
        }
        Ok(())
    });

    let description = format!(
        "fire a volley of <style=cIsDamage>{VOLLEY_PAYLOAD_COUNT}</style> {} for {} <style=cIsDamage>base damage</style> each.",
        payload.label,
        scaling.percent_text("IsDamage")
    );
    let mut bound = BoundTrigger::new(callback, description);
    bound.proc_type = Some(payload.proc_type);
    bound.cooldown_modifier = VOLLEY_COOLDOWN_MODIFIER;
    bound.selections.push(Selection {
        kind: RegistryKind::Payload,
        name: payload.name,
    });
    Ok(bound)
}

use super::RegistryEntry;
use crate::constants::EQUIPMENT_MARKER;
use crate::effect::text::{fmt_number, styled};
use crate::effect::{ItemTag, PassiveCallback, Scaling};
use crate::host::{Body, StatHookArgs};
use crate::visual::Color;

/// Adds the passive's contribution for `stacks` copies to the accumulator
pub type ApplyFn = fn(&mut StatHookArgs, &Scaling, u32, &dyn Body);

/// Continuous stat modifier, re-applied on every stat recalculation
#[derive(Debug, Clone)]
pub struct PassiveEntry {
    pub name: &'static str,
    pub strength_modifier: f32,
    pub sprite_colors: Vec<Color>,
    pub item_tags: &'static [ItemTag],
    pub minimum_grade: u32,
    pub exclusive_with: &'static [&'static str],
    pub apply: ApplyFn,
    pub describe: fn(&Scaling) -> String,
}

impl PassiveEntry {
    /// Stat callback closed over a fixed scaling
    pub fn bind(&self, scaling: Scaling) -> PassiveCallback {
        let apply = self.apply;
        Box::new(move |args, stacks, body| {
            apply(args, &scaling, stacks, body);
            Ok(())
        })
    }

    pub fn description(&self, scaling: &Scaling) -> String {
        (self.describe)(scaling)
    }
}

impl RegistryEntry for PassiveEntry {
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

#[allow(clippy::too_many_arguments)]
fn passive(
    name: &'static str,
    strength_modifier: f32,
    color: Color,
    tag: &'static [ItemTag],
    minimum_grade: u32,
    exclusive_with: &'static [&'static str],
    apply: ApplyFn,
    describe: fn(&Scaling) -> String,
) -> PassiveEntry {
    PassiveEntry {
        name,
        strength_modifier,
        sprite_colors: vec![color],
        item_tags: tag,
        minimum_grade,
        exclusive_with,
        apply,
        describe,
    }
}

const DAMAGE: &[ItemTag] = &[ItemTag::Damage];
const UTILITY: &[ItemTag] = &[ItemTag::Utility];
const HEALING: &[ItemTag] = &[ItemTag::Healing];

pub(super) fn builtin() -> Vec<PassiveEntry> {
    vec![
        passive(
            "AttackSpeedBoost",
            10.0,
            Color::rgb(1.0, 0.5, 0.0),
            DAMAGE,
            0,
            &["OutOfCombat"],
            |args, s, stacks, _| args.base_attack_speed_add += s.passive_fraction(stacks),
            |s| {
                format!(
                    "Increase <style=cIsDamage>attack speed</style> by {}.",
                    s.percent_text("IsDamage")
                )
            },
        ),
        passive(
            "SpeedBoost",
            10.0,
            Color::rgb(0.75, 0.75, 1.0),
            UTILITY,
            0,
            &[],
            |args, s, stacks, _| args.move_speed_mult_add += s.passive_fraction(stacks),
            |s| {
                format!(
                    "Gain {} <style=cIsUtility>movement speed</style>.",
                    s.percent_text("IsUtility")
                )
            },
        ),
        passive(
            "HealthBoost",
            5.0,
            Color::rgb(0.5, 1.0, 0.5),
            HEALING,
            0,
            &["HasShield", "HasBarrier", "AtFullHP"],
            |args, s, stacks, _| args.health_mult_add += s.passive_fraction(stacks),
            |s| {
                format!(
                    "Gain {} <style=cIsHealing>maximum health</style>.",
                    s.percent_text("IsHealing")
                )
            },
        ),
        passive(
            "DamageBoost",
            5.0,
            Color::rgb(1.0, 0.5, 0.5),
            DAMAGE,
            0,
            &[],
            |args, s, stacks, _| args.damage_mult_add += s.passive_fraction(stacks),
            |s| {
                format!(
                    "Increase <style=cIsDamage>base damage</style> by {}.",
                    s.percent_text("IsDamage")
                )
            },
        ),
        passive(
            "ShieldBoost",
            5.0,
            Color::rgb(0.0, 0.5, 1.0),
            HEALING,
            0,
            &["HasBarrier", "AtFullHP"],
            |args, s, stacks, body| {
                args.base_shield_add += body.full_health() * s.passive_fraction(stacks)
            },
            |s| {
                format!(
                    "Gain a <style=cIsHealing>shield</style> equal to {} of your maximum health.",
                    s.percent_text("IsHealing")
                )
            },
        ),
        // flat armor, not a percentage
        passive(
            "ArmorBoost",
            10.0,
            Color::rgb(0.25, 1.0, 0.25),
            HEALING,
            0,
            &[],
            |args, s, stacks, _| args.armor_add += s.at(stacks),
            |s| {
                let mut out = styled("IsHealing", &fmt_number(s.strength, 1));
                if s.stack_scaling > 0.0 {
                    out.push(' ');
                    out.push_str(&styled(
                        "Stack",
                        &format!("(+{} per stack)", fmt_number(s.strength * s.stack_scaling, 1)),
                    ));
                }
                format!("Gain {out} <style=cIsHealing>armor</style>.")
            },
        ),
        passive(
            "RegenBoost",
            10.0,
            Color::rgb(0.75, 1.0, 0.75),
            HEALING,
            0,
            &["HasShield", "HasBarrier", "AtFullHP"],
            |args, s, stacks, _| args.regen_mult_add += s.passive_fraction(stacks),
            |s| {
                format!(
                    "Increase <style=cIsHealing>base health regeneration</style> by {}.",
                    s.percent_text("IsHealing")
                )
            },
        ),
        passive(
            "CritChanceBoost",
            8.0,
            Color::rgb(1.0, 0.25, 0.0),
            DAMAGE,
            0,
            &[],
            |args, s, stacks, _| args.crit_add += s.passive_fraction(stacks) * 100.0,
            |s| {
                format!(
                    "Gain {} <style=cIsDamage>critical chance</style>.",
                    s.percent_text("IsDamage")
                )
            },
        ),
        passive(
            "CritDamageBoost",
            8.0,
            Color::rgb(1.0, 0.0, 0.25),
            DAMAGE,
            0,
            &[],
            |args, s, stacks, _| args.crit_damage_mult_add += s.passive_fraction(stacks),
            |s| {
                format!(
                    "Gain {} <style=cIsDamage>critical damage</style>.",
                    s.percent_text("IsDamage")
                )
            },
        ),
        passive(
            "SecondaryCooldownBoost",
            3.0,
            Color::rgb(0.25, 0.0, 1.0),
            UTILITY,
            2,
            &[],
            |args, s, stacks, _| args.secondary_cooldown_mult_add -= s.passive_fraction(stacks),
            |s| cooldown_text("secondary skill cooldown", s),
        ),
        passive(
            "UtilityCooldownBoost",
            3.0,
            Color::rgb(0.0, 0.25, 1.0),
            UTILITY,
            2,
            &[],
            |args, s, stacks, _| args.utility_cooldown_mult_add -= s.passive_fraction(stacks),
            |s| cooldown_text("utility skill cooldown", s),
        ),
        passive(
            "SpecialCooldownBoost",
            3.0,
            Color::rgb(0.25, 0.25, 1.0),
            UTILITY,
            2,
            &[],
            |args, s, stacks, _| args.special_cooldown_mult_add -= s.passive_fraction(stacks),
            |s| cooldown_text("special skill cooldown", s),
        ),
        passive(
            "EquipCooldownBoost",
            3.0,
            Color::rgb(0.75, 0.25, 1.0),
            UTILITY,
            2,
            &[EQUIPMENT_MARKER],
            |args, s, stacks, _| args.equipment_cooldown_mult_add -= s.passive_fraction(stacks),
            |s| cooldown_text("equipment cooldown", s),
        ),
        passive(
            "AllCooldownBoost",
            1.5,
            Color::rgb(0.75, 0.75, 1.0),
            UTILITY,
            3,
            &[],
            |args, s, stacks, _| args.cooldown_mult_add -= s.passive_fraction(stacks),
            |s| cooldown_text("all cooldowns", s),
        ),
    ]
}

fn cooldown_text(what: &str, s: &Scaling) -> String {
    format!(
        "Reduce <style=cIsUtility>{what}</style> by {}.",
        s.percent_text("IsUtility")
    )
}

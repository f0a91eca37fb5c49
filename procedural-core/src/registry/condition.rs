use super::RegistryEntry;
use crate::effect::ConditionCheck;
use crate::host::Body;

/// Seconds into a stage that still count as "the first 3 minutes"
const EARLY_STAGE_SECONDS: f32 = 180.0;

/// Gating predicate that must hold for an effect to apply or fire
#[derive(Debug, Clone)]
pub struct ConditionEntry {
    pub name: &'static str,
    pub strength_modifier: f32,
    pub minimum_grade: u32,
    pub exclusive_with: &'static [&'static str],
    /// Description fragment, e.g. "While <style=cIsUtility>moving</style>, "
    pub text: &'static str,
    pub check: fn(&dyn Body) -> bool,
}

impl ConditionEntry {
    pub fn bind(&self) -> ConditionCheck {
        ConditionCheck {
            name: self.name,
            check: self.check,
        }
    }
}

impl RegistryEntry for ConditionEntry {
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

fn condition(
    name: &'static str,
    strength_modifier: f32,
    text: &'static str,
    check: fn(&dyn Body) -> bool,
    exclusive_with: &'static [&'static str],
) -> ConditionEntry {
    ConditionEntry {
        name,
        strength_modifier,
        minimum_grade: 0,
        exclusive_with,
        text,
        check,
    }
}

pub(super) fn builtin() -> Vec<ConditionEntry> {
    vec![
        condition(
            "HasShield",
            1.5,
            "While you have a <style=cIsHealing>shield</style>, ",
            |b| b.shield() > 0.0,
            &["UnderHalfHP"],
        ),
        condition(
            "HasBarrier",
            1.5,
            "While you have a <style=cIsHealing>barrier</style>, ",
            |b| b.barrier() > 0.0,
            &["UnderHalfHP"],
        ),
        condition(
            "OutOfDanger",
            2.0,
            "While <style=cIsUtility>out of danger</style>, ",
            |b| b.out_of_danger(),
            &[],
        ),
        condition(
            "OutOfCombat",
            4.0,
            "While <style=cIsUtility>out of combat</style>, ",
            |b| b.out_of_combat(),
            &[],
        ),
        condition(
            "Moving",
            1.5,
            "While <style=cIsUtility>moving</style>, ",
            |b| !b.not_moving(),
            &["NotMoving"],
        ),
        condition(
            "NotMoving",
            4.0,
            "After standing still for <style=cIsHealing>1</style> second, ",
            |b| b.not_moving(),
            &["Moving", "Midair"],
        ),
        condition(
            "UnderHalfHP",
            4.0,
            "While below <style=cIsHealth>50% health</style>, ",
            |b| b.combined_health_fraction() <= 0.5,
            &["HasShield", "HasBarrier", "AtFullHP"],
        ),
        condition(
            "AtFullHP",
            1.5,
            "While at <style=cIsHealth>full health</style>, ",
            |b| b.combined_health_fraction() >= 1.0,
            &["UnderHalfHP"],
        ),
        condition(
            "Midair",
            2.0,
            "While <style=cIsUtility>midair</style>, ",
            |b| b.midair(),
            &["NotMoving"],
        ),
        condition(
            "Debuffed",
            2.0,
            "While <style=cIsHealth>debuffed</style>, ",
            |b| b.has_debuff(),
            &[],
        ),
        condition(
            "First3Minutes",
            2.0,
            "For the first <style=cIsUtility>3 minutes</style> every stage, ",
            |b| b.seconds_into_stage() <= EARLY_STAGE_SECONDS,
            &[],
        ),
        condition(
            "TeleporterEvent",
            2.0,
            "During the <style=cIsUtility>Teleporter Event</style>, ",
            |b| b.teleporter_charging(),
            &[],
        ),
    ]
}

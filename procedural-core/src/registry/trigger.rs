use serde::{Deserialize, Serialize};

use super::RegistryEntry;
use crate::constants::CERTAIN_CHANCE;
use crate::effect::chance_text;

/// Gameplay event category a triggered effect reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TriggerKind {
    Hit,
    Crit,
    Kill,
    EliteKill,
    Heal,
    Hurt,
    Skill,
    Equipment,
    Interact,
}

impl TriggerKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TriggerKind::Hit => "Hit",
            TriggerKind::Crit => "Crit",
            TriggerKind::Kill => "Kill",
            TriggerKind::EliteKill => "EliteKill",
            TriggerKind::Heal => "Heal",
            TriggerKind::Hurt => "Hurt",
            TriggerKind::Skill => "Skill",
            TriggerKind::Equipment => "Equipment",
            TriggerKind::Interact => "Interact",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::all().into_iter().find(|k| k.as_str() == name)
    }

    pub fn all() -> [TriggerKind; 9] {
        [
            TriggerKind::Hit,
            TriggerKind::Crit,
            TriggerKind::Kill,
            TriggerKind::EliteKill,
            TriggerKind::Heal,
            TriggerKind::Hurt,
            TriggerKind::Skill,
            TriggerKind::Equipment,
            TriggerKind::Interact,
        ]
    }
}

#[derive(Debug, Clone)]
pub struct TriggerTypeEntry {
    pub kind: TriggerKind,
    pub strength_modifier: f32,
    pub exclusive_with: &'static [&'static str],
    /// Lead-in when the effect always fires
    pub certain_text: &'static str,
    /// Lead-in when it fires on a roll; the chance goes between the two halves
    pub chance_text: (&'static str, &'static str),
}

impl TriggerTypeEntry {
    /// "On hit, " or "Gain a 12% chance on hit to "
    pub fn describe(&self, chance: f32, chance_stack_scaling: f32) -> String {
        if chance >= CERTAIN_CHANCE {
            return self.certain_text.to_string();
        }
        let (head, tail) = self.chance_text;
        format!("{head}{}{tail}", chance_text(chance, chance_stack_scaling))
    }
}

impl RegistryEntry for TriggerTypeEntry {
    fn name(&self) -> &'static str {
        self.kind.as_str()
    }

    fn exclusive_with(&self) -> &'static [&'static str] {
        self.exclusive_with
    }
}

fn trigger(
    kind: TriggerKind,
    strength_modifier: f32,
    certain_text: &'static str,
    chance_tail: &'static str,
    exclusive_with: &'static [&'static str],
) -> TriggerTypeEntry {
    TriggerTypeEntry {
        kind,
        strength_modifier,
        exclusive_with,
        certain_text,
        chance_text: ("Gain a ", chance_tail),
    }
}

pub(super) fn builtin() -> Vec<TriggerTypeEntry> {
    vec![
        trigger(TriggerKind::Hit, 0.5, "On hit, ", " chance on hit to ", &[]),
        trigger(
            TriggerKind::Crit,
            1.0,
            "On <style=cIsDamage>critical strike</style>, ",
            " chance on <style=cIsDamage>critical strike</style> to ",
            &[],
        ),
        trigger(
            TriggerKind::Kill,
            2.0,
            "On kill, ",
            " chance on kill to ",
            &["OutOfCombat"],
        ),
        trigger(
            TriggerKind::EliteKill,
            4.0,
            "Upon killing an <style=cIsDamage>elite</style>, ",
            " chance to, upon killing an <style=cIsDamage>elite</style>, ",
            &["OutOfCombat"],
        ),
        trigger(
            TriggerKind::Heal,
            1.0,
            "Upon getting healed, ",
            " chance upon getting healed to ",
            &[],
        ),
        trigger(
            TriggerKind::Hurt,
            2.0,
            "Upon <style=cDeath>taking damage</style>, ",
            " chance upon <style=cDeath>taking damage</style> to ",
            &[],
        ),
        trigger(TriggerKind::Skill, 0.5, "On skill use, ", " chance on skill use to ", &[]),
        trigger(
            TriggerKind::Equipment,
            4.0,
            "On equipment use, ",
            " chance on equipment use to ",
            &[],
        ),
        trigger(
            TriggerKind::Interact,
            8.0,
            "Upon activating an interactable, ",
            " chance upon activating an interactable to ",
            &[],
        ),
    ]
}

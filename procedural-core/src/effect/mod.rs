//! Generated effects.
//!
//! One [`Effect`] per generated item or equipment piece. Numbers are fixed
//! at generation time; callbacks close over copies of them, so nothing is
//! mutated while dispatching.
//!
//! - `Scaling`: base strength plus per-stack growth, stored as percentages
//! - `Effect`: conditions, chance, passive/triggered halves, description
//! - `EffectSummary`: plain serializable record used for fingerprints and dumps

mod generate;
pub mod text;
mod tier;

pub use generate::{
    generate_equipment, generate_equipment_with_layout, generate_item, generate_item_with_layout,
    roll_item_strengths, EffectLayout, EquipmentLayout, EquipmentSpec, StrengthRoll,
};
pub use tier::{ItemTier, TierProfile};

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::{CERTAIN_CHANCE, DURATION_EXPONENT, PERCENT};
use crate::dispatch::{BuffDef, StatHook};
use crate::error::EffectError;
use crate::host::{Body, EventArgs, Host, ProcChainMask, ProcType, StatHookArgs};
use crate::registry::RegistryKind;
use crate::visual::{Color, SpriteShape};

/// Host item category tag contributed by passive/triggered entries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemTag {
    Damage,
    Utility,
    Healing,
}

/// Strength with per-stack growth. Values are percentages.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Scaling {
    pub strength: f32,
    pub stack_scaling: f32,
}

impl Scaling {
    pub fn new(strength: f32, stack_scaling: f32) -> Self {
        Self {
            strength,
            stack_scaling,
        }
    }

    /// `strength * (1 + stack_scaling * (stacks - 1))`
    pub fn at(&self, stacks: u32) -> f32 {
        self.strength * (1.0 + self.stack_scaling * (stacks as f32 - 1.0))
    }

    /// Passive value as a fraction
    pub fn passive_fraction(&self, stacks: u32) -> f32 {
        self.at(stacks) * PERCENT
    }

    /// Triggered value as a fraction, scaled by proc coefficient
    pub fn triggered_fraction(&self, stacks: u32, proc_coefficient: f32) -> f32 {
        self.at(stacks) * proc_coefficient * PERCENT
    }

    /// Single-stack duration in seconds
    pub fn base_duration(&self) -> f32 {
        self.strength.powf(DURATION_EXPONENT)
    }

    pub fn duration(&self, stacks: u32, proc_coefficient: f32) -> f32 {
        self.base_duration()
            * (1.0 + self.stack_scaling * (stacks as f32 - 1.0))
            * proc_coefficient
    }

    pub fn percent_text(&self, style: &str) -> String {
        text::percent_with_stack(self.strength, self.stack_scaling, style)
    }

    pub fn duration_text(&self) -> String {
        text::seconds_with_stack(self.base_duration(), self.stack_scaling)
    }
}

/// Proc chance text, e.g. `<style=cIsDamage>12.5%</style>`
pub fn chance_text(chance: f32, chance_stack_scaling: f32) -> String {
    text::percent_with_stack(chance, chance_stack_scaling, "IsDamage")
}

/// Stat-recalculation callback: accumulator, stack count, holder
pub type PassiveCallback =
    Box<dyn Fn(&mut StatHookArgs, u32, &dyn Body) -> Result<(), EffectError> + Send + Sync>;

/// Triggered callback
pub type TriggeredCallback =
    Box<dyn Fn(&mut TriggerContext<'_>, &mut dyn Host) -> Result<(), EffectError> + Send + Sync>;

/// Everything a triggered callback sees about the firing event
pub struct TriggerContext<'a> {
    pub body: &'a dyn Body,
    pub stacks: u32,
    pub proc_coefficient: f32,
    pub proc_chain_mask: ProcChainMask,
    pub args: &'a mut EventArgs,
}

/// Bound condition predicate
#[derive(Clone, Copy)]
pub struct ConditionCheck {
    pub name: &'static str,
    pub check: fn(&dyn Body) -> bool,
}

impl fmt::Debug for ConditionCheck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum EffectKind {
    Item {
        tier: ItemTier,
    },
    Equipment {
        is_lunar: bool,
        is_boss: bool,
        cooldown: f32,
    },
}

/// One registry entry chosen while generating an effect
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    pub kind: RegistryKind,
    pub name: &'static str,
}

pub struct Effect {
    pub name: String,
    pub kind: EffectKind,
    pub grade: u32,
    pub chance: f32,
    pub chance_stack_scaling: f32,
    pub passive: Scaling,
    pub triggered: Scaling,
    pub conditions: Vec<ConditionCheck>,
    pub trigger: Option<crate::registry::TriggerKind>,
    pub proc_type: Option<ProcType>,
    pub passive_callback: Option<PassiveCallback>,
    pub triggered_callback: Option<TriggeredCallback>,
    pub description: String,
    pub extra_text: BTreeMap<String, String>,
    pub sprite_colors: Vec<Color>,
    pub sprite_shape: SpriteShape,
    pub item_tags: Vec<ItemTag>,
    pub selections: Vec<Selection>,
    /// Buffs this effect declares; moved into the engine on registration
    pub buffs: Vec<BuffDef>,
    /// Stat hooks this effect declares; moved into the engine on registration
    pub stat_hooks: Vec<StatHook>,
}

impl Effect {
    pub fn conditions_met(&self, body: &dyn Body) -> bool {
        self.conditions.iter().all(|c| (c.check)(body))
    }

    /// Effective proc chance for `stacks` copies hit with `proc_coefficient`
    pub fn chance_at(&self, stacks: u32, proc_coefficient: f32) -> f32 {
        if self.chance >= CERTAIN_CHANCE {
            return self.chance;
        }
        self.chance
            * (1.0 + self.chance_stack_scaling * (stacks as f32 - 1.0))
            * proc_coefficient
    }

    pub fn has_passive(&self) -> bool {
        self.passive_callback.is_some()
    }

    pub fn has_triggered(&self) -> bool {
        self.triggered_callback.is_some()
    }

    pub fn is_equipment(&self) -> bool {
        matches!(self.kind, EffectKind::Equipment { .. })
    }

    pub fn cooldown(&self) -> Option<f32> {
        match self.kind {
            EffectKind::Equipment { cooldown, .. } => Some(cooldown),
            EffectKind::Item { .. } => None,
        }
    }

    pub fn selected(&self, kind: RegistryKind) -> impl Iterator<Item = &'static str> + '_ {
        self.selections
            .iter()
            .filter(move |s| s.kind == kind)
            .map(|s| s.name)
    }

    pub fn summary(&self) -> EffectSummary {
        EffectSummary {
            name: self.name.clone(),
            kind: self.kind,
            grade: self.grade,
            chance: self.chance,
            chance_stack_scaling: self.chance_stack_scaling,
            passive: self.passive,
            triggered: self.triggered,
            has_passive: self.has_passive(),
            has_triggered: self.has_triggered(),
            conditions: self.conditions.iter().map(|c| c.name.to_string()).collect(),
            trigger: self.trigger.map(|t| t.as_str().to_string()),
            proc_type: self.proc_type,
            selections: self
                .selections
                .iter()
                .map(|s| format!("{}:{}", s.kind.as_str(), s.name))
                .collect(),
            description: self.description.clone(),
            extra_text: self.extra_text.clone(),
            sprite_colors: self.sprite_colors.clone(),
            sprite_shape: self.sprite_shape,
            item_tags: self.item_tags.clone(),
        }
    }
}

impl fmt::Debug for Effect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Effect")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("grade", &self.grade)
            .field("chance", &self.chance)
            .field("passive", &self.passive)
            .field("triggered", &self.triggered)
            .field("conditions", &self.conditions)
            .field("trigger", &self.trigger)
            .field("proc_type", &self.proc_type)
            .field("description", &self.description)
            .finish_non_exhaustive()
    }
}

/// Callback-free snapshot of an [`Effect`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EffectSummary {
    pub name: String,
    pub kind: EffectKind,
    pub grade: u32,
    pub chance: f32,
    pub chance_stack_scaling: f32,
    pub passive: Scaling,
    pub triggered: Scaling,
    pub has_passive: bool,
    pub has_triggered: bool,
    pub conditions: Vec<String>,
    pub trigger: Option<String>,
    pub proc_type: Option<ProcType>,
    pub selections: Vec<String>,
    pub description: String,
    pub extra_text: BTreeMap<String, String>,
    pub sprite_colors: Vec<Color>,
    pub sprite_shape: SpriteShape,
    pub item_tags: Vec<ItemTag>,
}

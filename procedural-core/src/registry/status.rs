use super::RegistryEntry;
use crate::effect::Scaling;
use crate::host::{CharacterId, DotKind, DotRequest, ProcType};

/// Damage-over-time status a triggered effect can inflict
#[derive(Debug, Clone)]
pub struct StatusEntry {
    pub name: &'static str,
    pub strength_modifier: f32,
    pub is_positive: bool,
    pub proc_type: ProcType,
    pub dot: DotKind,
    pub minimum_grade: u32,
    /// Display label, e.g. "<style=cDeath>bleed</style>"
    pub label: &'static str,
}

impl StatusEntry {
    /// Dot request for one application; duration follows the triggered scaling
    pub fn request(
        &self,
        scaling: &Scaling,
        attacker: CharacterId,
        victim: CharacterId,
        stacks: u32,
        proc_coefficient: f32,
        total_damage: f32,
    ) -> DotRequest {
        DotRequest {
            dot: self.dot,
            attacker,
            victim,
            duration: scaling.duration(stacks, proc_coefficient),
            total_damage,
        }
    }
}

impl RegistryEntry for StatusEntry {
    fn name(&self) -> &'static str {
        self.name
    }

    fn minimum_grade(&self) -> u32 {
        self.minimum_grade
    }
}

pub(super) fn builtin() -> Vec<StatusEntry> {
    vec![StatusEntry {
        name: "Bleed",
        strength_modifier: 1.0,
        is_positive: false,
        proc_type: ProcType::BleedOnHit,
        dot: DotKind::Bleed,
        minimum_grade: 0,
        label: "<style=cDeath>bleed</style>",
    }]
}

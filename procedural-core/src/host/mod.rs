//! Host game boundary.
//!
//! The engine never owns characters, inventories or the damage pipeline. It
//! reads them through [`Body`] and acts on the world through [`Host`]:
//! - catalog lookups (item/equipment index <-> stable definition key)
//! - chance rolls (luck-aware on the host side)
//! - heal, barrier, timed buff, damage-over-time
//! - payload and interactable spawns with fully computed parameters
//!
//! Event arguments are typed ([`EventArgs`]) instead of a string-keyed bag.

pub mod sim;

use serde::{Deserialize, Serialize};

use crate::error::EffectError;

/// Host-side character identity
pub type CharacterId = u64;

/// Host inventory index for an item definition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ItemIndex(pub u32);

/// Host catalog index for an equipment definition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EquipmentIndex(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    pub const ZERO: Vec3 = Vec3::new(0.0, 0.0, 0.0);
    pub const UP: Vec3 = Vec3::new(0.0, 1.0, 0.0);

    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub fn length(&self) -> f32 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }
}

impl std::ops::Add for Vec3 {
    type Output = Vec3;

    fn add(self, rhs: Vec3) -> Vec3 {
        Vec3::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl std::ops::Mul<f32> for Vec3 {
    type Output = Vec3;

    fn mul(self, rhs: f32) -> Vec3 {
        Vec3::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

// =====================================================
// Proc chains
// =====================================================

/// Tag consumed within one causal chain of triggered effects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProcType {
    BleedOnHit,
    Missile,
    Behemoth,
    ChainLightning,
    HealingBonus, // custom tag for generated heals
}

impl ProcType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProcType::BleedOnHit => "bleed_on_hit",
            ProcType::Missile => "missile",
            ProcType::Behemoth => "behemoth",
            ProcType::ChainLightning => "chain_lightning",
            ProcType::HealingBonus => "healing_bonus",
        }
    }

    fn bit(&self) -> u32 {
        match self {
            ProcType::BleedOnHit => 1 << 0,
            ProcType::Missile => 1 << 1,
            ProcType::Behemoth => 1 << 2,
            ProcType::ChainLightning => 1 << 3,
            ProcType::HealingBonus => 1 << 4,
        }
    }
}

/// Set of proc tags already consumed in the current chain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ProcChainMask {
    bits: u32,
}

impl ProcChainMask {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(proc_type: ProcType) -> Self {
        let mut mask = Self::default();
        mask.add_proc(proc_type);
        mask
    }

    pub fn has_proc(&self, proc_type: ProcType) -> bool {
        self.bits & proc_type.bit() != 0
    }

    pub fn add_proc(&mut self, proc_type: ProcType) {
        self.bits |= proc_type.bit();
    }

    pub fn is_empty(&self) -> bool {
        self.bits == 0
    }
}

// =====================================================
// Event arguments
// =====================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SkillSlot {
    Primary,
    Secondary,
    Utility,
    Special,
}

/// One resolved hit, as reported by the host damage pipeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DamageReport {
    pub attacker: Option<CharacterId>,
    pub victim: CharacterId,
    pub victim_position: Vec3,
    pub victim_is_elite: bool,
    pub damage: f32,
    pub crit: bool,
    pub proc_coefficient: f32,
    pub proc_chain_mask: ProcChainMask,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InteractionInfo {
    pub interactable: String,
    pub position: Vec3,
}

/// Arguments carried alongside a triggered event.
///
/// Handlers may write back into `heal_amount`; the heal hook returns it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventArgs {
    pub damage: Option<DamageReport>,
    pub heal_amount: Option<f32>,
    pub skill: Option<SkillSlot>,
    pub equipment: Option<String>,
    pub interaction: Option<InteractionInfo>,
}

impl EventArgs {
    pub fn damage_report(&self) -> Result<&DamageReport, EffectError> {
        self.damage.as_ref().ok_or(EffectError::MissingArgument("damage"))
    }
}

/// Additive stat accumulator filled during stat recalculation
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StatHookArgs {
    pub base_attack_speed_add: f32,
    pub move_speed_mult_add: f32,
    pub health_mult_add: f32,
    pub damage_mult_add: f32,
    pub base_shield_add: f32,
    pub armor_add: f32,
    pub regen_mult_add: f32,
    pub crit_add: f32,
    pub crit_damage_mult_add: f32,
    pub secondary_cooldown_mult_add: f32,
    pub utility_cooldown_mult_add: f32,
    pub special_cooldown_mult_add: f32,
    pub equipment_cooldown_mult_add: f32,
    pub cooldown_mult_add: f32,
    pub max_barrier_override: Option<f32>,
    pub barrier_decay_rate_override: Option<f32>,
}

// =====================================================
// Spawn requests
// =====================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DotKind {
    Bleed,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DotRequest {
    pub dot: DotKind,
    pub attacker: CharacterId,
    pub victim: CharacterId,
    pub duration: f32,
    pub total_damage: f32,
}

/// How the host should realize a payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PayloadKind {
    Projectile,     // fired along `direction`
    Blast,          // instant sphere at `origin`
    DelayedBlast,   // sphere armed for `delay` seconds
    ChainLightning, // bouncing orb starting at `origin`
}

#[derive(Debug, Clone, PartialEq)]
pub struct PayloadRequest {
    pub payload: &'static str,
    pub prefab: &'static str,
    pub kind: PayloadKind,
    pub attacker: CharacterId,
    pub origin: Vec3,
    pub direction: Vec3,
    pub damage: f32,
    pub crit: bool,
    pub speed: f32,
    pub fuse: f32,
    pub radius: f32,
    pub force: f32,
    pub delay: f32,
    pub bounces: u32,
    pub range_bonus: f32,
    pub exclude: Option<CharacterId>,
    pub stacks: u32,
    pub proc_coefficient: f32,
    pub proc_chain_mask: ProcChainMask,
}

#[derive(Debug, Clone, PartialEq)]
pub struct InteractableRequest {
    pub interactable: &'static str,
    pub spawn_card: &'static str,
    pub spawner: CharacterId,
    pub origin: Vec3,
    pub min_distance: f32,
    pub max_distance: f32,
    pub cost_modifier: f32,
}

// =====================================================
// Collaborator traits
// =====================================================

/// Read-only view of a character
pub trait Body {
    fn id(&self) -> CharacterId;
    /// Unique item identities in the order they were first acquired
    fn item_acquisition_order(&self) -> &[ItemIndex];
    fn item_count(&self, item: ItemIndex) -> u32;
    fn equipment(&self) -> Option<EquipmentIndex>;

    fn shield(&self) -> f32;
    fn barrier(&self) -> f32;
    fn combined_health_fraction(&self) -> f32;
    fn full_health(&self) -> f32;
    fn max_health(&self) -> f32;
    fn max_shield(&self) -> f32;

    fn out_of_danger(&self) -> bool;
    fn out_of_combat(&self) -> bool;
    /// Standing still for at least one second
    fn not_moving(&self) -> bool;
    fn midair(&self) -> bool;
    fn has_debuff(&self) -> bool;
    fn buff_count(&self, buff: &str) -> u32;
    fn seconds_into_stage(&self) -> f32;
    fn teleporter_charging(&self) -> bool;

    fn damage(&self) -> f32;
    /// Crit chance as a percentage
    fn crit_chance(&self) -> f32;
    fn core_position(&self) -> Vec3;
    fn aim_direction(&self) -> Vec3;
}

/// Catalog lookups and world actions provided by the host game
pub trait Host {
    fn item_key(&self, index: ItemIndex) -> Option<&str>;
    fn item_index(&self, key: &str) -> Option<ItemIndex>;
    fn equipment_key(&self, index: EquipmentIndex) -> Option<&str>;

    /// Percent roll in `[0, 100]`, optionally luck-adjusted for `roller`
    fn check_roll(&mut self, percent: f32, roller: &dyn Body) -> bool;

    fn heal(&mut self, target: CharacterId, amount: f32, mask: ProcChainMask);
    fn add_barrier(&mut self, target: CharacterId, amount: f32);
    fn add_timed_buff(&mut self, target: CharacterId, buff: &str, duration: f32);
    fn inflict_dot(&mut self, request: DotRequest) -> Result<(), EffectError>;
    fn spawn_payload(&mut self, request: PayloadRequest) -> Result<(), EffectError>;
    fn spawn_interactable(&mut self, request: InteractableRequest) -> Result<(), EffectError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_proc_mask_add_and_query() {
        let mut mask = ProcChainMask::new();
        assert!(mask.is_empty());
        mask.add_proc(ProcType::Missile);
        assert!(mask.has_proc(ProcType::Missile));
        assert!(!mask.has_proc(ProcType::Behemoth));
        mask.add_proc(ProcType::Behemoth);
        assert!(mask.has_proc(ProcType::Missile) && mask.has_proc(ProcType::Behemoth));
    }

    #[test]
    fn test_proc_mask_with() {
        let mask = ProcChainMask::with(ProcType::HealingBonus);
        assert!(mask.has_proc(ProcType::HealingBonus));
        assert!(!mask.is_empty());
    }

    #[test]
    fn test_vec3_ops() {
        let v = Vec3::new(1.0, 2.0, 2.0);
        assert_eq!(v.length(), 3.0);
        assert_eq!(v + Vec3::UP, Vec3::new(1.0, 3.0, 2.0));
        assert_eq!(v * 2.0, Vec3::new(2.0, 4.0, 4.0));
    }

    #[test]
    fn test_event_args_missing_damage() {
        let args = EventArgs::default();
        assert_eq!(
            args.damage_report().unwrap_err(),
            EffectError::MissingArgument("damage")
        );
    }
}

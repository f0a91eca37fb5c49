//! In-memory host used by tests, benches and the `simulate` command.
//!
//! `SimHost` records every action it is asked to perform instead of touching
//! a game world, so dispatch behaviour can be asserted on directly.

use std::collections::HashMap;

use super::{
    Body, CharacterId, DotRequest, EquipmentIndex, Host, InteractableRequest, ItemIndex,
    PayloadRequest, ProcChainMask, Vec3,
};
use crate::error::EffectError;
use crate::rng::DeterministicRng;

/// Character with directly settable state
#[derive(Debug, Clone)]
pub struct SimBody {
    pub id: CharacterId,
    order: Vec<ItemIndex>,
    counts: HashMap<ItemIndex, u32>,
    pub equipment: Option<EquipmentIndex>,
    buffs: HashMap<String, u32>,
    pub shield: f32,
    pub barrier: f32,
    pub health_fraction: f32,
    pub full_health: f32,
    pub max_health: f32,
    pub max_shield: f32,
    pub out_of_danger: bool,
    pub out_of_combat: bool,
    pub not_moving: bool,
    pub midair: bool,
    pub debuffed: bool,
    pub seconds_into_stage: f32,
    pub teleporter_charging: bool,
    pub damage: f32,
    pub crit_chance: f32,
    pub position: Vec3,
    pub aim: Vec3,
}

impl SimBody {
    pub fn new(id: CharacterId) -> Self {
        Self {
            id,
            order: Vec::new(),
            counts: HashMap::new(),
            equipment: None,
            buffs: HashMap::new(),
            shield: 0.0,
            barrier: 0.0,
            health_fraction: 1.0,
            full_health: 100.0,
            max_health: 100.0,
            max_shield: 0.0,
            out_of_danger: false,
            out_of_combat: false,
            not_moving: false,
            midair: false,
            debuffed: false,
            seconds_into_stage: 0.0,
            teleporter_charging: false,
            damage: 12.0,
            crit_chance: 1.0,
            position: Vec3::ZERO,
            aim: Vec3::new(0.0, 0.0, 1.0),
        }
    }

    /// Add `count` copies; first acquisition fixes the item's position in the order
    pub fn give_item(&mut self, item: ItemIndex, count: u32) {
        if !self.counts.contains_key(&item) {
            self.order.push(item);
        }
        *self.counts.entry(item).or_insert(0) += count;
    }

    /// Keep the acquisition slot but set the stack count directly
    pub fn set_item_count(&mut self, item: ItemIndex, count: u32) {
        if !self.counts.contains_key(&item) {
            self.order.push(item);
        }
        self.counts.insert(item, count);
    }

    pub fn set_buff(&mut self, buff: &str, count: u32) {
        self.buffs.insert(buff.to_string(), count);
    }
}

impl Body for SimBody {
    fn id(&self) -> CharacterId {
        self.id
    }

    fn item_acquisition_order(&self) -> &[ItemIndex] {
        &self.order
    }

    fn item_count(&self, item: ItemIndex) -> u32 {
        self.counts.get(&item).copied().unwrap_or(0)
    }

    fn equipment(&self) -> Option<EquipmentIndex> {
        self.equipment
    }

    fn shield(&self) -> f32 {
        self.shield
    }

    fn barrier(&self) -> f32 {
        self.barrier
    }

    fn combined_health_fraction(&self) -> f32 {
        self.health_fraction
    }

    fn full_health(&self) -> f32 {
        self.full_health
    }

    fn max_health(&self) -> f32 {
        self.max_health
    }

    fn max_shield(&self) -> f32 {
        self.max_shield
    }

    fn out_of_danger(&self) -> bool {
        self.out_of_danger
    }

    fn out_of_combat(&self) -> bool {
        self.out_of_combat
    }

    fn not_moving(&self) -> bool {
        self.not_moving
    }

    fn midair(&self) -> bool {
        self.midair
    }

    fn has_debuff(&self) -> bool {
        self.debuffed
    }

    fn buff_count(&self, buff: &str) -> u32 {
        self.buffs.get(buff).copied().unwrap_or(0)
    }

    fn seconds_into_stage(&self) -> f32 {
        self.seconds_into_stage
    }

    fn teleporter_charging(&self) -> bool {
        self.teleporter_charging
    }

    fn damage(&self) -> f32 {
        self.damage
    }

    fn crit_chance(&self) -> f32 {
        self.crit_chance
    }

    fn core_position(&self) -> Vec3 {
        self.position
    }

    fn aim_direction(&self) -> Vec3 {
        self.aim
    }
}

/// Action recorded by [`SimHost`]
#[derive(Debug, Clone, PartialEq)]
pub enum HostAction {
    Heal {
        target: CharacterId,
        amount: f32,
        mask: ProcChainMask,
    },
    Barrier {
        target: CharacterId,
        amount: f32,
    },
    Buff {
        target: CharacterId,
        buff: String,
        duration: f32,
    },
    Dot(DotRequest),
    Payload(PayloadRequest),
    Interactable(InteractableRequest),
}

/// How [`SimHost`] answers chance rolls
#[derive(Debug, Clone)]
pub enum RollMode {
    Always,
    Never,
    Seeded(DeterministicRng),
}

#[derive(Debug, Clone)]
pub struct SimHost {
    items: Vec<String>,
    equipment: Vec<String>,
    pub roll_mode: RollMode,
    pub rolls: u32,
    pub reject_spawns: bool,
    pub actions: Vec<HostAction>,
}

impl Default for SimHost {
    fn default() -> Self {
        Self::new()
    }
}

impl SimHost {
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            equipment: Vec::new(),
            roll_mode: RollMode::Always,
            rolls: 0,
            reject_spawns: false,
            actions: Vec::new(),
        }
    }

    /// Add an item key to the catalog, returning its index
    pub fn register_item(&mut self, key: &str) -> ItemIndex {
        if let Some(pos) = self.items.iter().position(|k| k == key) {
            return ItemIndex(pos as u32);
        }
        self.items.push(key.to_string());
        ItemIndex(self.items.len() as u32 - 1)
    }

    pub fn register_equipment(&mut self, key: &str) -> EquipmentIndex {
        if let Some(pos) = self.equipment.iter().position(|k| k == key) {
            return EquipmentIndex(pos as u32);
        }
        self.equipment.push(key.to_string());
        EquipmentIndex(self.equipment.len() as u32 - 1)
    }

    pub fn take_actions(&mut self) -> Vec<HostAction> {
        std::mem::take(&mut self.actions)
    }

    fn spawn_result(&self, what: &str) -> Result<(), EffectError> {
        if self.reject_spawns {
            Err(EffectError::Host(format!("{what} spawn rejected")))
        } else {
            Ok(())
        }
    }
}

impl Host for SimHost {
    fn item_key(&self, index: ItemIndex) -> Option<&str> {
        self.items.get(index.0 as usize).map(String::as_str)
    }

    fn item_index(&self, key: &str) -> Option<ItemIndex> {
        self.items
            .iter()
            .position(|k| k == key)
            .map(|pos| ItemIndex(pos as u32))
    }

    fn equipment_key(&self, index: EquipmentIndex) -> Option<&str> {
        self.equipment.get(index.0 as usize).map(String::as_str)
    }

    fn check_roll(&mut self, percent: f32, _roller: &dyn Body) -> bool {
        self.rolls += 1;
        match &mut self.roll_mode {
            RollMode::Always => true,
            RollMode::Never => false,
            RollMode::Seeded(rng) => rng.range_float(0.0, 100.0) < percent,
        }
    }

    fn heal(&mut self, target: CharacterId, amount: f32, mask: ProcChainMask) {
        self.actions.push(HostAction::Heal {
            target,
            amount,
            mask,
        });
    }

    fn add_barrier(&mut self, target: CharacterId, amount: f32) {
        self.actions.push(HostAction::Barrier { target, amount });
    }

    fn add_timed_buff(&mut self, target: CharacterId, buff: &str, duration: f32) {
        self.actions.push(HostAction::Buff {
            target,
            buff: buff.to_string(),
            duration,
        });
    }

    fn inflict_dot(&mut self, request: DotRequest) -> Result<(), EffectError> {
        self.spawn_result("dot")?;
        self.actions.push(HostAction::Dot(request));
        Ok(())
    }

    fn spawn_payload(&mut self, request: PayloadRequest) -> Result<(), EffectError> {
        self.spawn_result(request.payload)?;
        self.actions.push(HostAction::Payload(request));
        Ok(())
    }

    fn spawn_interactable(&mut self, request: InteractableRequest) -> Result<(), EffectError> {
        self.spawn_result(request.interactable)?;
        self.actions.push(HostAction::Interactable(request));
        Ok(())
    }
}

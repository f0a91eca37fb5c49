use super::RegistryEntry;
use crate::host::{CharacterId, InteractableRequest, Vec3};

const SPAWN_MIN_DISTANCE: f32 = 20.0;
const SPAWN_MAX_DISTANCE: f32 = 100.0;

/// World object an equipment effect can summon
#[derive(Debug, Clone)]
pub struct InteractableEntry {
    pub name: &'static str,
    pub cost_modifier: f32,
    /// Multiplies the owning equipment's cooldown
    pub cooldown_modifier: f32,
    /// Display label, e.g. "a <style=cIsUtility>Barrel</style>"
    pub label: &'static str,
    pub spawn_card: &'static str,
    pub minimum_grade: u32,
}

impl InteractableEntry {
    pub fn request(&self, spawner: CharacterId, origin: Vec3) -> InteractableRequest {
        InteractableRequest {
            interactable: self.name,
            spawn_card: self.spawn_card,
            spawner,
            origin,
            min_distance: SPAWN_MIN_DISTANCE,
            max_distance: SPAWN_MAX_DISTANCE,
            cost_modifier: self.cost_modifier,
        }
    }
}

impl RegistryEntry for InteractableEntry {
    fn name(&self) -> &'static str {
        self.name
    }

    fn minimum_grade(&self) -> u32 {
        self.minimum_grade
    }
}

fn card(
    name: &'static str,
    cost_modifier: f32,
    cooldown_modifier: f32,
    label: &'static str,
    spawn_card: &'static str,
) -> InteractableEntry {
    InteractableEntry {
        name,
        cost_modifier,
        cooldown_modifier,
        label,
        spawn_card,
        minimum_grade: 0,
    }
}

pub(super) fn builtin() -> Vec<InteractableEntry> {
    vec![
        card("GunnerDrone", 2.0, 1.0, "a <style=cIsDamage>Broken Gunner Drone</style>", "iscBrokenDrone1"),
        card("HealingDrone", 2.0, 1.0, "a <style=cIsDamage>Broken Healing Drone</style>", "iscBrokenDrone2"),
        card(
            "EquipmentDrone",
            2.0,
            1.0,
            "a <style=cIsDamage>Broken Equipment Drone</style>",
            "iscBrokenEquipmentDrone",
        ),
        card("GunnerTurret", 2.0, 1.0, "a <style=cIsDamage>Broken Turret</style>", "iscBrokenTurret1"),
        card("Barrel", 1.0, 0.5, "a <style=cIsUtility>Barrel</style>", "iscBarrel1"),
        card("SmallChest", 4.0, 2.0, "a <style=cIsDamage>Small Chest</style>", "iscChest1"),
        card("LargeChest", 4.0, 4.0, "a <style=cIsHealing>Large Chest</style>", "iscChest2"),
        card("LegendaryChest", 4.0, 8.0, "a <style=cDeath>Legendary Chest</style>", "iscGoldChest"),
        card(
            "EquipmentBarrel",
            2.0,
            2.0,
            "an <style=cIsHealth>Equipment Barrel</style>",
            "iscEquipmentBarrel",
        ),
        card("AdaptiveChest", 4.0, 4.0, "an <style=cIsUtility>Adaptive Chest</style>", "iscCasinoChest"),
        card(
            "SmallDamageChest",
            4.0,
            2.0,
            "a <style=cIsDamage>Small Damage Chest</style>",
            "iscCategoryChestDamage",
        ),
        card(
            "SmallHealingChest",
            4.0,
            2.0,
            "a <style=cIsDamage>Small Healing Chest</style>",
            "iscCategoryChestHealing",
        ),
        card(
            "SmallUtilityChest",
            4.0,
            2.0,
            "a <style=cIsDamage>Small Utility Chest</style>",
            "iscCategoryChestUtility",
        ),
        card("BloodShrine", 1.5, 1.0, "a <style=cDeath>Shrine of Blood</style>", "iscShrineBlood"),
        card(
            "MountainShrine",
            1.0,
            1.0,
            "a <style=cIsUtility>Shrine of the Mountain</style>",
            "iscShrineBoss",
        ),
        card("ChanceShrine", 2.0, 2.0, "a <style=cIsDamage>Shrine of Chance</style>", "iscShrineChance"),
        card("CombatShrine", 1.0, 1.0, "a <style=cWorldEvent>Shrine of Combat</style>", "iscShrineCombat"),
        card(
            "HealingShrine",
            2.0,
            4.0,
            "a <style=cIsHealing>Shrine of the Woods</style>",
            "iscShrineHealing",
        ),
        card("CommonMultishop", 4.0, 3.0, "a <style=cIsDamage>Common Multishop</style>", "iscTripleShop"),
        card(
            "UncommonMultishop",
            4.0,
            6.0,
            "an <style=cIsHealing>Uncommon Multishop</style>",
            "iscTripleShopEquipment",
        ),
        card(
            "EquipmentMultishop",
            2.0,
            3.0,
            "an <style=cIsHealth>Equipment Multishop</style>",
            "iscTripleShopLarge",
        ),
        card(
            "LargeDamageChest",
            4.0,
            4.0,
            "a <style=cIsHealing>Large Damage Chest</style>",
            "iscCategoryChest2Damage",
        ),
        card(
            "LargeHealingChest",
            4.0,
            4.0,
            "a <style=cIsHealing>Large Healing Chest</style>",
            "iscCategoryChest2Healing",
        ),
        card(
            "LargeUtilityChest",
            4.0,
            4.0,
            "a <style=cIsHealing>Large Utility Chest</style>",
            "iscCategoryChest2Utility",
        ),
        card("VoidStalk", 1.0, 0.5, "a <style=cIsVoid>Void Stalk</style>", "iscVoidCoinBarrel"),
        card("VoidCradle", 1.5, 4.0, "a <style=cIsVoid>Void Cradle</style>", "iscVoidChest"),
        card("VoidPotential", 4.0, 4.0, "a <style=cIsVoid>Void Potential</style>", "iscVoidTriple"),
        card(
            "CrashedMultishop",
            1.0,
            8.0,
            "a <style=cIsHealing>Crashed Multishop</style>",
            "iscFreeChest",
        ),
    ]
}

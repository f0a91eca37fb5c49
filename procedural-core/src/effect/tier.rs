use serde::{Deserialize, Serialize};

/// Host rarity classification of a generated item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ItemTier {
    Tier1, // common
    Tier2, // uncommon
    Tier3, // legendary
    Lunar,
    Boss,
    VoidTier1,
    VoidTier2,
    VoidTier3,
    VoidBoss,
    Untiered, // no tier table entry, generated with the fallback profile
}

/// Power budget derived from a tier
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TierProfile {
    pub grade: u32,
    pub strength_modifier: f32,
    pub stack_scaling_modifier: f32,
}

impl ItemTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemTier::Tier1 => "Tier1",
            ItemTier::Tier2 => "Tier2",
            ItemTier::Tier3 => "Tier3",
            ItemTier::Lunar => "Lunar",
            ItemTier::Boss => "Boss",
            ItemTier::VoidTier1 => "VoidTier1",
            ItemTier::VoidTier2 => "VoidTier2",
            ItemTier::VoidTier3 => "VoidTier3",
            ItemTier::VoidBoss => "VoidBoss",
            ItemTier::Untiered => "Untiered",
        }
    }

    /// `None` for tiers without a table entry
    pub fn lookup_profile(&self) -> Option<TierProfile> {
        let (grade, strength_modifier, stack_scaling_modifier) = match self {
            ItemTier::Tier1 => (1, 1.0, 1.0),
            ItemTier::Tier2 => (2, 3.2, 0.5),
            ItemTier::Tier3 => (3, 12.0, 0.15),
            ItemTier::Boss => (4, 3.0, 0.25),
            ItemTier::VoidTier1 => (1, 1.5, 1.0),
            ItemTier::VoidTier2 => (2, 2.4, 0.75),
            ItemTier::VoidTier3 => (3, 8.0, 0.45),
            ItemTier::VoidBoss => (4, 2.0, 0.6),
            ItemTier::Lunar => (5, 1.8, 0.5),
            ItemTier::Untiered => return None,
        };
        Some(TierProfile {
            grade,
            strength_modifier,
            stack_scaling_modifier,
        })
    }

    /// Table profile, or grade 0 with neutral multipliers
    pub fn profile(&self) -> TierProfile {
        self.lookup_profile().unwrap_or(TierProfile {
            grade: 0,
            strength_modifier: 1.0,
            stack_scaling_modifier: 1.0,
        })
    }

    /// Normal tier a void tier converts, if any
    pub fn converts(&self) -> Option<ItemTier> {
        match self {
            ItemTier::VoidTier1 => Some(ItemTier::Tier1),
            ItemTier::VoidTier2 => Some(ItemTier::Tier2),
            ItemTier::VoidTier3 => Some(ItemTier::Tier3),
            _ => None,
        }
    }

    pub fn all() -> [ItemTier; 10] {
        [
            ItemTier::Tier1,
            ItemTier::Tier2,
            ItemTier::Tier3,
            ItemTier::Lunar,
            ItemTier::Boss,
            ItemTier::VoidTier1,
            ItemTier::VoidTier2,
            ItemTier::VoidTier3,
            ItemTier::VoidBoss,
            ItemTier::Untiered,
        ]
    }
}

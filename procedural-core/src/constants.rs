//! Centralized tuning constants for effect generation and dispatch.
//!
//! Registry-specific numbers (per-entry strength modifiers, exclusions,
//! payload radii) stay next to their registry entries as the single source
//! of truth. Everything shared by more than one module lives here.

// =====================================================
// Effect Generation
// =====================================================

/// Probability of adding one more condition to an item effect
pub const CONDITION_CONTINUE_CHANCE: f32 = 0.25;

/// Hard cap on conditions per effect (P(4) = 1/256)
pub const MAX_CONDITIONS: u32 = 4;

/// Base proc chance roll range, before the strength modifier
pub const CHANCE_ROLL_MIN: f32 = 10.0;
pub const CHANCE_ROLL_MAX: f32 = 20.0;

/// Chance at or above which a triggered effect never rolls
pub const CERTAIN_CHANCE: f32 = 100.0;

/// Base strength roll range for passive and triggered halves
pub const STRENGTH_ROLL_MIN: f32 = 1.0;
pub const STRENGTH_ROLL_MAX: f32 = 2.0;

/// Lower bound of the partial chance-per-stack roll (upper bound is 1.0)
pub const PARTIAL_CHANCE_STACK_MIN: f32 = 0.5;

/// Share of the power budget each half keeps when an effect has both
pub const SHARED_BUDGET_FACTOR: f32 = 0.5;

/// Strengths are stored as percentages; callbacks work in fractions
pub const PERCENT: f32 = 0.01;

// =====================================================
// Equipment
// =====================================================

/// Grade every equipment piece starts from
pub const EQUIPMENT_BASE_GRADE: u32 = 2;

/// Strength multiplier every equipment piece starts from
pub const EQUIPMENT_BASE_STRENGTH: f32 = 2.0;

/// Lunar equipment: +2 grade, x2 strength
pub const LUNAR_GRADE_BONUS: u32 = 2;
pub const LUNAR_STRENGTH_MULT: f32 = 2.0;

/// Boss equipment: +1 grade, x4 strength
pub const BOSS_GRADE_BONUS: u32 = 1;
pub const BOSS_STRENGTH_MULT: f32 = 4.0;

/// Cooldown = uniform[min, max) * triggered strength * effect cooldown modifier
pub const COOLDOWN_ROLL_MIN: f32 = 4.0;
pub const COOLDOWN_ROLL_MAX: f32 = 8.0;

/// Exclusion marker for entries that must never land on equipment
pub const EQUIPMENT_MARKER: &str = "IsEquipment";

/// Description prefix for an equipment passive
pub const EQUIPMENT_PASSIVE_PREFIX: &str = "Passively ";

/// Number of payloads fired by the equipment-only volley effect
pub const VOLLEY_PAYLOAD_COUNT: u32 = 3;

// =====================================================
// Buffs
// =====================================================

/// Buff granted by PassiveBuff effects is named `BUFF_PASSIVE_<effect key>`
pub const PASSIVE_BUFF_PREFIX: &str = "BUFF_PASSIVE_";

/// Hidden buff that lifts the barrier cap and slows its decay
pub const NO_DECAY_BUFF: &str = "BUFF_NO_DECAY";

/// How long the uncapped-barrier buff lasts, in seconds
pub const NO_DECAY_DURATION: f32 = 10.0;

/// Max barrier while uncapped: large, but leaves headroom for later multipliers
pub const UNCAPPED_MAX_BARRIER: f32 = f32::MAX / 16.0;

/// Barrier decay while uncapped = (max health + max shield) / this
pub const UNCAPPED_DECAY_DIVISOR: f32 = 30.0;

/// Strength divisor applied when a generated buff can stack
pub const STACKABLE_BUFF_DIVISOR: f32 = 5.0;

/// Buff, bleed and similar durations scale as strength^(2/3)
pub const DURATION_EXPONENT: f32 = 2.0 / 3.0;

// =====================================================
// Content Assembly
// =====================================================

/// Definition keys are `RGI_<SANITIZED NAME>`
pub const DEFINITION_PREFIX: &str = "RGI_";

/// Name draws attempted before a slot is reported as exhausted
pub const DEFAULT_NAME_ATTEMPTS: u32 = 25;

/// Lore entries hold uniform[0, max) words
pub const LORE_MAX_WORDS: i32 = 120;

/// Sentence break cadence is drawn from [min, max) per word
pub const LORE_SENTENCE_MIN: i32 = 8;
pub const LORE_SENTENCE_MAX: i32 = 14;

/// Icon resolution the shape masks are defined against
pub const ICON_SIZE: u32 = 512;

/// Shade noise offsets are drawn from [-range, range)
pub const SHADE_OFFSET_RANGE: f32 = 10_000.0;

/// Noise frequency across one icon edge
pub const SHADE_NOISE_SCALE: f32 = 4.0;

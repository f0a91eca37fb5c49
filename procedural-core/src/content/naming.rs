//! Item names and lore entries.
//!
//! Names are `<prefix> <noun>` drawn from the shared stream. The sanitized
//! form (upper case, `_` for spaces, no apostrophes, `AND` for `&`) must be
//! unique within a batch and becomes the definition key `RGI_<SANITIZED>`.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::constants::{DEFINITION_PREFIX, LORE_MAX_WORDS, LORE_SENTENCE_MAX, LORE_SENTENCE_MIN};
use crate::error::ContentError;
use crate::rng::DeterministicRng;

const PREFIXES: &[&str] = &[
    "Ancient", "Broken", "Cursed", "Dented", "Electric", "Forgotten", "Gilded", "Hollow",
    "Jagged", "Lucky", "Molten", "Needle", "Obsidian", "Pale", "Quiet", "Rusty", "Sharp",
    "Tangled", "Unstable", "Volatile", "Warped", "Yearning", "Bitter", "Crimson", "Drowned",
    "Feral", "Glass", "Heavy", "Ivory", "Kinetic", "Lost", "Mother's", "Nimble", "Orbital",
    "Prismatic", "Rotten", "Shattered", "Thorned", "Vengeful", "Wandering",
];

const NOUNS: &[&str] = &[
    "Amulet", "Battery", "Bell", "Blade", "Bone", "Canister", "Charm", "Clover", "Compass",
    "Crown", "Dice", "Drum", "Egg", "Engine", "Feather", "Fang", "Gauntlet", "Gear", "Halo",
    "Horn", "Idol", "Jar", "Key", "Lantern", "Lens", "Locket", "Mask", "Medal", "Mirror",
    "Needle", "Orb", "Pearl", "Ring", "Rock", "Scarf", "Shell", "Spring", "Thorn & Rose",
    "Totem", "Watch",
];

const LORE_WORDS: &[&str] = &[
    "the", "void", "remembers", "a", "light", "beyond", "storm", "and", "we", "carried", "it",
    "through", "ash", "until", "nothing", "was", "left", "of", "our", "names", "cold", "metal",
    "sings", "when", "touched", "by", "blood", "who", "made", "this", "no", "one", "knows",
    "planet", "hungers", "shipment", "lost", "in", "transit", "handle", "with", "care", "do",
    "not", "open", "return", "to", "sender", "burning", "sky", "again", "always",
];

/// Pools names and lore are drawn from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamePool {
    pub prefixes: Vec<String>,
    pub nouns: Vec<String>,
    pub lore_words: Vec<String>,
}

impl NamePool {
    pub fn builtin() -> Self {
        let owned = |words: &[&str]| words.iter().map(|w| w.to_string()).collect();
        Self {
            prefixes: owned(PREFIXES),
            nouns: owned(NOUNS),
            lore_words: owned(LORE_WORDS),
        }
    }

    /// Upper bound on distinct display names
    pub fn capacity(&self) -> usize {
        self.prefixes.len() * self.nouns.len()
    }
}

impl Default for NamePool {
    fn default() -> Self {
        Self::builtin()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedName {
    pub display: String,
    pub sanitized: String,
}

impl GeneratedName {
    /// Definition key, e.g. `RGI_RUSTY_BELL`
    pub fn key(&self) -> String {
        format!("{DEFINITION_PREFIX}{}", self.sanitized)
    }
}

pub fn sanitize(name: &str) -> String {
    name.to_uppercase()
        .replace(' ', "_")
        .replace('\'', "")
        .replace('&', "AND")
}

/// Batch-scoped name source that never hands out the same sanitized name twice
#[derive(Debug, Clone)]
pub struct NameGenerator {
    pool: NamePool,
    used: HashSet<String>,
    attempts: u32,
}

impl NameGenerator {
    pub fn new(pool: NamePool, attempts: u32) -> Self {
        Self {
            pool,
            used: HashSet::new(),
            attempts,
        }
    }

    pub fn generated(&self) -> usize {
        self.used.len()
    }

    pub fn generate_name(&mut self, rng: &mut DeterministicRng) -> Result<GeneratedName, ContentError> {
        if self.pool.prefixes.is_empty() || self.pool.nouns.is_empty() {
            return Err(ContentError::NameExhausted { attempts: 0 });
        }
        for _ in 0..self.attempts {
            let prefix = &self.pool.prefixes[rng.range_index(self.pool.prefixes.len())];
            let noun = &self.pool.nouns[rng.range_index(self.pool.nouns.len())];
            let display = format!("{prefix} {noun}");
            let sanitized = sanitize(&display);
            if self.used.insert(sanitized.clone()) {
                return Ok(GeneratedName { display, sanitized });
            }
        }
        Err(ContentError::NameExhausted {
            attempts: self.attempts,
        })
    }

    /// Up to `LORE_MAX_WORDS` words with irregular sentence breaks
    pub fn generate_log_entry(&self, rng: &mut DeterministicRng) -> String {
        let words = &self.pool.lore_words;
        let length = rng.range_int(0, LORE_MAX_WORDS);
        if words.is_empty() {
            return String::new();
        }
        let mut log = String::new();
        for i in 0..length {
            log.push_str(&words[rng.range_index(words.len())]);
            if i % rng.range_int(LORE_SENTENCE_MIN, LORE_SENTENCE_MAX) == 0 {
                log.push_str(". ");
            } else {
                log.push(' ');
            }
        }
        log
    }
}

//! Capability registries.
//!
//! Each registry is a named, ordered table of immutable descriptors. They are
//! filled once (`Registries::builtin()` or by hand in tests) and only read
//! afterwards. Sampling is uniform over registration order:
//! - `minimum_grade` gates an entry by the owning effect's grade
//! - `exclusive_with` lists names that rule an entry out, checked both ways
//! - an empty or fully excluded pool is an error, never an endless loop

mod condition;
mod equipment;
mod interactable;
mod passive;
mod payload;
mod status;
mod trigger;
mod triggered;

pub use condition::ConditionEntry;
pub use interactable::InteractableEntry;
pub use passive::PassiveEntry;
pub use payload::{PayloadEntry, PayloadLaunch};
pub use status::StatusEntry;
pub use trigger::{TriggerKind, TriggerTypeEntry};
pub use triggered::{BindContext, BindFn, BoundTrigger, TriggeredEntry, ALL_TRIGGERS, ATTACK_TRIGGERS};

use std::collections::{BTreeMap, HashMap};
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::effect::Selection;
use crate::error::ContentError;
use crate::rng::DeterministicRng;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RegistryKind {
    Condition,
    Status,
    TriggerType,
    PassiveEffect,
    TriggeredEffect,
    EquipmentEffect,
    Payload,
    Interactable,
}

impl RegistryKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RegistryKind::Condition => "condition",
            RegistryKind::Status => "status",
            RegistryKind::TriggerType => "trigger_type",
            RegistryKind::PassiveEffect => "passive_effect",
            RegistryKind::TriggeredEffect => "triggered_effect",
            RegistryKind::EquipmentEffect => "equipment_effect",
            RegistryKind::Payload => "payload",
            RegistryKind::Interactable => "interactable",
        }
    }
}

impl fmt::Display for RegistryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Common view over every descriptor kind
pub trait RegistryEntry {
    fn name(&self) -> &'static str;

    fn minimum_grade(&self) -> u32 {
        0
    }

    fn exclusive_with(&self) -> &'static [&'static str] {
        &[]
    }
}

/// Whether two entries rule each other out, in either direction
pub fn mutually_exclusive(a: &dyn RegistryEntry, b: &dyn RegistryEntry) -> bool {
    a.exclusive_with().contains(&b.name()) || b.exclusive_with().contains(&a.name())
}

/// Whether `entry` excludes any of the plain `names` (e.g. "IsEquipment")
pub fn excludes_any(entry: &dyn RegistryEntry, names: &[&str]) -> bool {
    entry.exclusive_with().iter().any(|e| names.contains(e))
}

/// Ordered name -> descriptor table
#[derive(Debug, Clone)]
pub struct Registry<T> {
    kind: RegistryKind,
    entries: Vec<T>,
    index: HashMap<&'static str, usize>,
}

impl<T: RegistryEntry> Registry<T> {
    pub fn new(kind: RegistryKind) -> Self {
        Self {
            kind,
            entries: Vec::new(),
            index: HashMap::new(),
        }
    }

    pub fn kind(&self) -> RegistryKind {
        self.kind
    }

    pub fn register(&mut self, entry: T) -> Result<(), ContentError> {
        let name = entry.name();
        if self.index.contains_key(name) {
            return Err(ContentError::DuplicateEntry {
                kind: self.kind,
                name: name.to_string(),
            });
        }
        self.index.insert(name, self.entries.len());
        self.entries.push(entry);
        Ok(())
    }

    /// Unknown names are a configuration error
    pub fn get(&self, name: &str) -> Result<&T, ContentError> {
        self.index
            .get(name)
            .map(|&i| &self.entries[i])
            .ok_or_else(|| ContentError::UnknownEntry {
                kind: self.kind,
                name: name.to_string(),
            })
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn all(&self) -> &[T] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Rejection-sample an entry with `minimum_grade <= grade` that passes `eligible`
    pub fn sample(
        &self,
        rng: &mut DeterministicRng,
        grade: u32,
        eligible: impl Fn(&T) -> bool,
    ) -> Result<&T, ContentError> {
        let accept = |e: &T| e.minimum_grade() <= grade && eligible(e);
        if !self.entries.iter().any(accept) {
            return Err(ContentError::NoEligibleEntry {
                kind: self.kind,
                grade,
            });
        }
        loop {
            let entry = &self.entries[rng.range_index(self.entries.len())];
            if accept(entry) {
                return Ok(entry);
            }
        }
    }

    /// Like [`Registry::sample`], but draws uniformly from `names` only
    pub fn sample_named(
        &self,
        names: &[&'static str],
        rng: &mut DeterministicRng,
        grade: u32,
        eligible: impl Fn(&T) -> bool,
    ) -> Result<&T, ContentError> {
        let pool = names
            .iter()
            .map(|name| self.get(name))
            .collect::<Result<Vec<_>, _>>()?;
        let accept = |e: &T| e.minimum_grade() <= grade && eligible(e);
        if !pool.iter().any(|e| accept(e)) {
            return Err(ContentError::NoEligibleEntry {
                kind: self.kind,
                grade,
            });
        }
        loop {
            let entry = pool[rng.range_index(pool.len())];
            if accept(entry) {
                return Ok(entry);
            }
        }
    }
}

/// Grade gate and exclusions of one selected entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntryInfo {
    pub name: &'static str,
    pub minimum_grade: u32,
    pub exclusive_with: &'static [&'static str],
}

impl EntryInfo {
    fn of(entry: &dyn RegistryEntry) -> Self {
        Self {
            name: entry.name(),
            minimum_grade: entry.minimum_grade(),
            exclusive_with: entry.exclusive_with(),
        }
    }
}

/// Every capability table, plus trigger type -> triggered effect bindings
#[derive(Debug, Clone)]
pub struct Registries {
    pub conditions: Registry<ConditionEntry>,
    pub statuses: Registry<StatusEntry>,
    pub trigger_types: Registry<TriggerTypeEntry>,
    pub passives: Registry<PassiveEntry>,
    pub triggered: Registry<TriggeredEntry>,
    pub equipment_effects: Registry<TriggeredEntry>,
    pub payloads: Registry<PayloadEntry>,
    pub interactables: Registry<InteractableEntry>,
    bindings: BTreeMap<TriggerKind, Vec<&'static str>>,
}

impl Default for Registries {
    fn default() -> Self {
        Self::empty()
    }
}

impl Registries {
    pub fn empty() -> Self {
        Self {
            conditions: Registry::new(RegistryKind::Condition),
            statuses: Registry::new(RegistryKind::Status),
            trigger_types: Registry::new(RegistryKind::TriggerType),
            passives: Registry::new(RegistryKind::PassiveEffect),
            triggered: Registry::new(RegistryKind::TriggeredEffect),
            equipment_effects: Registry::new(RegistryKind::EquipmentEffect),
            payloads: Registry::new(RegistryKind::Payload),
            interactables: Registry::new(RegistryKind::Interactable),
            bindings: BTreeMap::new(),
        }
    }

    /// Registries populated with the built-in content, in dependency order
    pub fn builtin() -> Result<Self, ContentError> {
        let mut registries = Self::empty();
        for entry in payload::builtin() {
            registries.payloads.register(entry)?;
        }
        for entry in status::builtin() {
            registries.statuses.register(entry)?;
        }
        for entry in condition::builtin() {
            registries.conditions.register(entry)?;
        }
        for entry in passive::builtin() {
            registries.passives.register(entry)?;
        }
        for entry in trigger::builtin() {
            registries.trigger_types.register(entry)?;
        }
        for entry in triggered::builtin() {
            registries.register_triggered(entry)?;
        }
        for entry in equipment::builtin() {
            registries.equipment_effects.register(entry)?;
        }
        for entry in interactable::builtin() {
            registries.interactables.register(entry)?;
        }
        Ok(registries)
    }

    /// Register a general triggered effect and bind it to its trigger types
    pub fn register_triggered(&mut self, entry: TriggeredEntry) -> Result<(), ContentError> {
        if let Some(missing) = entry
            .trigger_kinds
            .iter()
            .find(|kind| !self.trigger_types.contains(kind.as_str()))
        {
            return Err(ContentError::UnboundTrigger {
                effect: entry.name.to_string(),
                trigger: missing.as_str().to_string(),
            });
        }
        let name = entry.name;
        let kinds = entry.trigger_kinds;
        self.triggered.register(entry)?;
        for kind in kinds {
            self.bindings.entry(*kind).or_default().push(name);
        }
        Ok(())
    }

    /// Triggered effect names bound to `kind`, in registration order
    pub fn triggered_for(&self, kind: TriggerKind) -> &[&'static str] {
        self.bindings
            .get(&kind)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Grade gate and exclusions behind a recorded selection
    pub fn entry_info(&self, selection: Selection) -> Result<EntryInfo, ContentError> {
        let name = selection.name;
        let entry: &dyn RegistryEntry = match selection.kind {
            RegistryKind::Condition => self.conditions.get(name)?,
            RegistryKind::Status => self.statuses.get(name)?,
            RegistryKind::TriggerType => self.trigger_types.get(name)?,
            RegistryKind::PassiveEffect => self.passives.get(name)?,
            RegistryKind::TriggeredEffect => self.triggered.get(name)?,
            RegistryKind::EquipmentEffect => self.equipment_effects.get(name)?,
            RegistryKind::Payload => self.payloads.get(name)?,
            RegistryKind::Interactable => self.interactables.get(name)?,
        };
        Ok(EntryInfo::of(entry))
    }
}

//! Feature schema: the ordered set of boolean capability slots every tool
//! and user profile is expressed against.
//!
//! Slot order is the single source of truth for alignment. Names exist for
//! construction and validation only; the scoring path is purely positional.

use crate::error::AdvisorError;
use lazy_static::lazy_static;
use regex::Regex;
use std::collections::HashMap;

lazy_static! {
    static ref RE_SLOT_NAME: Regex = Regex::new(r"^[A-Za-z][A-Za-z0-9_]*$").unwrap();

    /// Schema used by the builtin catalog
    pub static ref BUILTIN_SCHEMA: FeatureSchema = FeatureSchema::new(
        BUILTIN_SLOTS
            .iter()
            .map(|(name, default)| FeatureSlot::new(*name, *default))
            .collect(),
    )
    .unwrap();
}

/// (name, default) for the builtin schema, in slot order
const BUILTIN_SLOTS: [(&str, u8); 15] = [
    ("Web", 0),
    ("Mobile", 0),
    ("Desktop", 0),
    ("API", 0),
    ("NoCode", 0),
    ("Expert", 0),
    ("BDD", 0),
    ("AI_SelfHeal", 0),
    ("NLP", 0),
    ("VisualAI", 0),
    ("CICD", 1),
    ("Parallel", 0),
    ("SAP", 0),
    ("Cloud", 0),
    ("Reporting", 1),
];

/// A single named slot with the value used when nothing binds it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureSlot {
    pub name: String,
    pub default: u8,
}

impl FeatureSlot {
    pub fn new(name: impl Into<String>, default: u8) -> Self {
        Self {
            name: name.into(),
            default,
        }
    }
}

#[derive(Debug, Clone)]
pub struct FeatureSchema {
    slots: Vec<FeatureSlot>,
    index: HashMap<String, usize>,
}

impl FeatureSchema {
    /// Build a schema, rejecting malformed or duplicate names and non-binary defaults.
    pub fn new(slots: Vec<FeatureSlot>) -> Result<Self, AdvisorError> {
        let mut index = HashMap::with_capacity(slots.len());
        for (i, slot) in slots.iter().enumerate() {
            if !RE_SLOT_NAME.is_match(&slot.name) {
                return Err(AdvisorError::InvalidFeatureName(slot.name.clone()));
            }
            if slot.default > 1 {
                return Err(AdvisorError::InvalidFeatureValue {
                    tool: "<schema default>".to_string(),
                    index: i,
                    value: slot.default,
                });
            }
            if index.insert(slot.name.clone(), i).is_some() {
                return Err(AdvisorError::DuplicateFeature(slot.name.clone()));
            }
        }
        Ok(Self { slots, index })
    }

    /// Schema whose slots all default to 0
    pub fn from_names(names: &[&str]) -> Result<Self, AdvisorError> {
        Self::new(names.iter().map(|n| FeatureSlot::new(*n, 0)).collect())
    }

    pub fn builtin() -> Self {
        BUILTIN_SCHEMA.clone()
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    /// Like [`index_of`](Self::index_of) but fails with `UnknownFeature`.
    pub fn require(&self, name: &str) -> Result<usize, AdvisorError> {
        self.index_of(name)
            .ok_or_else(|| AdvisorError::UnknownFeature(name.to_string()))
    }

    pub fn name_at(&self, index: usize) -> Option<&str> {
        self.slots.get(index).map(|s| s.name.as_str())
    }

    /// Vector holding every slot's default value
    pub fn defaults(&self) -> FeatureVector {
        FeatureVector(self.slots.iter().map(|s| s.default).collect())
    }
}

/// A binary feature vector (every entry 0 or 1), positionally aligned to a schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureVector(Vec<u8>);

impl FeatureVector {
    /// Wrap raw values. `owner` names the vector in the error when a value is not 0/1.
    pub fn new(values: Vec<u8>, owner: &str) -> Result<Self, AdvisorError> {
        if let Some((index, &value)) = values.iter().enumerate().find(|(_, v)| **v > 1) {
            return Err(AdvisorError::InvalidFeatureValue {
                tool: owner.to_string(),
                index,
                value,
            });
        }
        Ok(Self(values))
    }

    pub fn from_bools(values: &[bool]) -> Self {
        Self(values.iter().map(|b| u8::from(*b)).collect())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.0
    }

    pub fn get(&self, index: usize) -> Option<u8> {
        self.0.get(index).copied()
    }

    pub(crate) fn set(&mut self, index: usize, on: bool) {
        self.0[index] = u8::from(on);
    }
}

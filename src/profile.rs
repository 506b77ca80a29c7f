//! Profile Builder: turns a requirements profile into a user feature vector.
//!
//! Mapping from form concepts to schema slots is a declarative binding table,
//! validated against the schema when the builder is created. Building a vector
//! starts from the schema defaults, applies the bindings, then applies any
//! caller overrides.

use crate::error::AdvisorError;
use crate::schema::{FeatureSchema, FeatureVector};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::fmt;
use tracing::debug;

/// An independent yes/no requirement collected from the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Requirement {
    Web,
    Mobile,
    Desktop,
    Api,
    Bdd,
    AiSelfHeal,
    Nlp,
    VisualAi,
    Parallel,
}

impl Requirement {
    /// Label shown to users
    pub fn label(&self) -> &'static str {
        match self {
            Requirement::Web => "Web Application",
            Requirement::Mobile => "Mobile Application",
            Requirement::Desktop => "Desktop Application",
            Requirement::Api => "API Testing",
            Requirement::Bdd => "BDD (Gherkin) Support",
            Requirement::AiSelfHeal => "AI Self-Healing",
            Requirement::Nlp => "NLP Authoring",
            Requirement::VisualAi => "Visual AI",
            Requirement::Parallel => "Parallel Execution",
        }
    }
}

/// Three-way team skill selector. Hybrid is the absence of either extreme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkillLevel {
    #[default]
    #[serde(alias = "Manual / Beginner", alias = "Beginner")]
    Beginner,
    #[serde(alias = "Hybrid")]
    Hybrid,
    #[serde(alias = "SDET / Expert", alias = "Expert")]
    Expert,
}

impl SkillLevel {
    pub fn label(&self) -> &'static str {
        match self {
            SkillLevel::Beginner => "Manual / Beginner",
            SkillLevel::Hybrid => "Hybrid",
            SkillLevel::Expert => "SDET / Expert",
        }
    }
}

impl fmt::Display for SkillLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Requirements collected for one query. Never mutated after construction.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RequirementsProfile {
    #[serde(default)]
    pub selected: BTreeSet<Requirement>,

    #[serde(default)]
    pub skill: SkillLevel,

    /// Slot name → forced value, applied after everything else
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub overrides: BTreeMap<String, bool>,
}

impl RequirementsProfile {
    pub fn new(selected: impl IntoIterator<Item = Requirement>, skill: SkillLevel) -> Self {
        Self {
            selected: selected.into_iter().collect(),
            skill,
            overrides: BTreeMap::new(),
        }
    }

    /// Profile with nothing selected
    pub fn with_skill(skill: SkillLevel) -> Self {
        Self {
            skill,
            ..Self::default()
        }
    }

    pub fn with_override(mut self, slot: impl Into<String>, on: bool) -> Self {
        self.overrides.insert(slot.into(), on);
        self
    }

    pub fn is_selected(&self, requirement: Requirement) -> bool {
        self.selected.contains(&requirement)
    }
}

/// Where a bound slot takes its value from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindingSource {
    /// 1 when the requirement is selected
    Requirement(Requirement),
    /// 1 when the skill selector is exactly this level
    Skill(SkillLevel),
    /// Derived slot that follows another requirement
    Mirror(Requirement),
}

impl BindingSource {
    fn resolve(&self, requirements: &RequirementsProfile) -> bool {
        match self {
            BindingSource::Requirement(r) | BindingSource::Mirror(r) => requirements.is_selected(*r),
            BindingSource::Skill(level) => requirements.skill == *level,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotBinding {
    pub slot: String,
    pub source: BindingSource,
}

impl SlotBinding {
    pub fn new(slot: impl Into<String>, source: BindingSource) -> Self {
        Self {
            slot: slot.into(),
            source,
        }
    }
}

/// Bindings for the builtin schema. CICD, SAP and Reporting stay unbound and
/// take their schema defaults; Cloud follows the Mobile requirement.
pub fn builtin_bindings() -> Vec<SlotBinding> {
    use BindingSource::{Mirror, Requirement as Req, Skill};
    vec![
        SlotBinding::new("Web", Req(Requirement::Web)),
        SlotBinding::new("Mobile", Req(Requirement::Mobile)),
        SlotBinding::new("Desktop", Req(Requirement::Desktop)),
        SlotBinding::new("API", Req(Requirement::Api)),
        SlotBinding::new("NoCode", Skill(SkillLevel::Beginner)),
        SlotBinding::new("Expert", Skill(SkillLevel::Expert)),
        SlotBinding::new("BDD", Req(Requirement::Bdd)),
        SlotBinding::new("AI_SelfHeal", Req(Requirement::AiSelfHeal)),
        SlotBinding::new("NLP", Req(Requirement::Nlp)),
        SlotBinding::new("VisualAI", Req(Requirement::VisualAi)),
        SlotBinding::new("Parallel", Req(Requirement::Parallel)),
        SlotBinding::new("Cloud", Mirror(Requirement::Mobile)),
    ]
}

#[derive(Debug, Clone)]
pub struct ProfileBuilder {
    schema: FeatureSchema,
    /// (slot index, source), validated
    bindings: Vec<(usize, BindingSource)>,
}

impl ProfileBuilder {
    pub fn new(schema: FeatureSchema, bindings: Vec<SlotBinding>) -> Result<Self, AdvisorError> {
        let mut seen = HashSet::with_capacity(bindings.len());
        let mut resolved = Vec::with_capacity(bindings.len());
        for binding in bindings {
            let index = schema.require(&binding.slot)?;
            if !seen.insert(index) {
                return Err(AdvisorError::DuplicateBinding(binding.slot));
            }
            resolved.push((index, binding.source));
        }
        Ok(Self {
            schema,
            bindings: resolved,
        })
    }

    pub fn builtin() -> Result<Self, AdvisorError> {
        Self::new(FeatureSchema::builtin(), builtin_bindings())
    }

    pub fn schema(&self) -> &FeatureSchema {
        &self.schema
    }

    /// Slot index a requirement writes to, if it is bound directly
    pub fn slot_of(&self, requirement: Requirement) -> Option<usize> {
        self.bindings
            .iter()
            .find(|(_, source)| *source == BindingSource::Requirement(requirement))
            .map(|(index, _)| *index)
    }

    /// Build a fresh user vector for one scoring run.
    ///
    /// The vector starts from the schema defaults and bindings only write
    /// validated indices, so its length always equals the schema's.
    pub fn build(&self, requirements: &RequirementsProfile) -> Result<FeatureVector, AdvisorError> {
        let mut vector = self.schema.defaults();

        for (index, source) in &self.bindings {
            vector.set(*index, source.resolve(requirements));
        }

        for (slot, on) in &requirements.overrides {
            let index = self.schema.require(slot)?;
            debug!("Override {} = {}", slot, on);
            vector.set(index, *on);
        }

        Ok(vector)
    }
}

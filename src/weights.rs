//! Weight Resolver: broadcasts a handful of priority dials across the schema
//! slots each dial governs.

use crate::config::DEFAULT_WEIGHT;
use crate::error::AdvisorError;
use crate::schema::FeatureSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::RangeInclusive;

/// User-facing priority controls
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dial {
    Platform,
    SkillMatch,
    ModernFeatures,
}

impl Dial {
    pub const ALL: [Dial; 3] = [Dial::Platform, Dial::SkillMatch, Dial::ModernFeatures];

    pub fn label(&self) -> &'static str {
        match self {
            Dial::Platform => "Platform Priority",
            Dial::SkillMatch => "Team Skill Match",
            Dial::ModernFeatures => "AI/Modern Features",
        }
    }
}

impl fmt::Display for Dial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

fn default_platform() -> f64 {
    8.0
}

fn default_skill_match() -> f64 {
    5.0
}

fn default_modern_features() -> f64 {
    3.0
}

/// One value per dial. Defaults match the initial slider positions of the form.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeightProfile {
    #[serde(default = "default_platform")]
    pub platform: f64,

    #[serde(default = "default_skill_match")]
    pub skill_match: f64,

    #[serde(default = "default_modern_features")]
    pub modern_features: f64,
}

impl Default for WeightProfile {
    fn default() -> Self {
        Self {
            platform: default_platform(),
            skill_match: default_skill_match(),
            modern_features: default_modern_features(),
        }
    }
}

impl WeightProfile {
    pub fn new(platform: f64, skill_match: f64, modern_features: f64) -> Self {
        Self {
            platform,
            skill_match,
            modern_features,
        }
    }

    pub fn get(&self, dial: Dial) -> f64 {
        match dial {
            Dial::Platform => self.platform,
            Dial::SkillMatch => self.skill_match,
            Dial::ModernFeatures => self.modern_features,
        }
    }

    /// Validate every dial against the range the input form declares.
    pub fn check_range(&self, range: &RangeInclusive<f64>) -> Result<(), AdvisorError> {
        for dial in Dial::ALL {
            let value = self.get(dial);
            if !range.contains(&value) {
                return Err(AdvisorError::DialOutOfRange {
                    dial: dial.label().to_string(),
                    value,
                    min: *range.start(),
                    max: *range.end(),
                });
            }
        }
        Ok(())
    }
}

/// Slots owned by one dial
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DialCoverage {
    pub dial: Dial,
    pub slots: Vec<String>,
}

impl DialCoverage {
    pub fn new(dial: Dial, slots: &[&str]) -> Self {
        Self {
            dial,
            slots: slots.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// Coverage for the builtin schema. Parallel, SAP, Cloud and Reporting fall
/// back to the default weight.
pub fn builtin_coverage() -> Vec<DialCoverage> {
    vec![
        DialCoverage::new(Dial::Platform, &["Web", "Mobile", "Desktop", "API"]),
        DialCoverage::new(Dial::SkillMatch, &["NoCode", "Expert", "BDD"]),
        DialCoverage::new(Dial::ModernFeatures, &["AI_SelfHeal", "NLP", "VisualAI", "CICD"]),
    ]
}

/// Per-slot weights, aligned to the schema
#[derive(Debug, Clone, PartialEq)]
pub struct WeightVector(Vec<f64>);

impl WeightVector {
    pub fn new(weights: Vec<f64>) -> Self {
        Self(weights)
    }

    pub fn uniform(len: usize, weight: f64) -> Self {
        Self(vec![weight; len])
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    /// Multiply every weight by `factor`
    pub fn scaled(&self, factor: f64) -> Self {
        Self(self.0.iter().map(|w| w * factor).collect())
    }
}

#[derive(Debug, Clone)]
pub struct WeightResolver {
    /// Owning dial per slot; `None` takes the default weight
    owners: Vec<Option<Dial>>,
    default_weight: f64,
}

impl WeightResolver {
    /// Build the slot → dial map. Every slot is covered by at most one dial;
    /// uncovered slots take `default_weight`, so coverage is always total.
    pub fn new(
        schema: &FeatureSchema,
        coverage: Vec<DialCoverage>,
        default_weight: f64,
    ) -> Result<Self, AdvisorError> {
        if !default_weight.is_finite() || default_weight < 0.0 {
            return Err(AdvisorError::InvalidWeight {
                dial: "default".to_string(),
                value: default_weight,
            });
        }

        let mut owners: Vec<Option<Dial>> = vec![None; schema.len()];
        for group in &coverage {
            for slot in &group.slots {
                let index = schema.require(slot)?;
                if let Some(first) = owners[index] {
                    return Err(AdvisorError::CoverageOverlap {
                        slot: slot.clone(),
                        first: first.label().to_string(),
                        second: group.dial.label().to_string(),
                    });
                }
                owners[index] = Some(group.dial);
            }
        }

        Ok(Self {
            owners,
            default_weight,
        })
    }

    pub fn builtin(schema: &FeatureSchema) -> Result<Self, AdvisorError> {
        Self::new(schema, builtin_coverage(), DEFAULT_WEIGHT)
    }

    /// Dial governing a slot, if any
    pub fn owner(&self, index: usize) -> Option<Dial> {
        self.owners.get(index).copied().flatten()
    }

    pub fn default_weight(&self) -> f64 {
        self.default_weight
    }

    /// Resolve dial values into a full weight vector.
    ///
    /// Values are not clamped; negative or non-finite dials are rejected.
    pub fn resolve(&self, profile: &WeightProfile) -> Result<WeightVector, AdvisorError> {
        for dial in Dial::ALL {
            let value = profile.get(dial);
            if !value.is_finite() || value < 0.0 {
                return Err(AdvisorError::InvalidWeight {
                    dial: dial.label().to_string(),
                    value,
                });
            }
        }

        let weights = self
            .owners
            .iter()
            .map(|owner| match owner {
                Some(dial) => profile.get(*dial),
                None => self.default_weight,
            })
            .collect();

        Ok(WeightVector(weights))
    }
}

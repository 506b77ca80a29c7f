//! Explainer: templated justification for the top recommendation.

use crate::profile::{ProfileBuilder, Requirement, RequirementsProfile, SkillLevel};
use crate::rank::MatchResult;
use crate::schema::FeatureVector;
use crate::weights::{WeightProfile, WeightResolver};

/// Most requirements named in one explanation
const MAX_DRIVERS: usize = 3;

/// Builds explanations from the same binding and coverage tables used for scoring,
/// so a requirement is always attributed to the dial that actually weighted it.
pub struct Explainer<'a> {
    builder: &'a ProfileBuilder,
    resolver: &'a WeightResolver,
}

/// A selected requirement the top tool provides, and the weight its slot received
struct Driver {
    requirement: Requirement,
    weight: f64,
    source: String,
}

impl<'a> Explainer<'a> {
    pub fn new(builder: &'a ProfileBuilder, resolver: &'a WeightResolver) -> Self {
        Self { builder, resolver }
    }

    /// Deterministic for identical inputs. Never fails.
    ///
    /// `features` is the top tool's vector. Only requirements the tool actually
    /// provides are credited as drivers; selected requirements it lacks are
    /// listed separately. Without a vector nothing is credited.
    pub fn explain(
        &self,
        top: &MatchResult,
        features: Option<&FeatureVector>,
        requirements: &RequirementsProfile,
        weights: &WeightProfile,
    ) -> String {
        if requirements.selected.is_empty() && requirements.skill == SkillLevel::Hybrid {
            return format!(
                "No requirements were selected, so {} ({}% match) leads on baseline capabilities only. \
                 Select the platforms and capabilities you need for a tailored recommendation.",
                top.tool, top.score
            );
        }

        let mut text = format!(
            "Based on your preference for {} and your {}/10 platform priority, {} ({}% match) \
             offers the optimal balance of features and ease-of-use.",
            requirements.skill, weights.platform, top.tool, top.score
        );

        let Some(features) = features else {
            return text;
        };

        let drivers = self.drivers(features, requirements, weights);
        if !drivers.is_empty() {
            let parts: Vec<String> = drivers
                .iter()
                .map(|d| format!("{} ({} {})", d.requirement.label(), d.source, d.weight))
                .collect();
            text.push_str(" Strongest drivers: ");
            text.push_str(&join_list(&parts));
            text.push('.');
        }

        let gaps: Vec<String> = self
            .gaps(features, requirements)
            .iter()
            .map(|r| r.label().to_string())
            .collect();
        if !gaps.is_empty() {
            text.push_str(&format!(" Not covered by {}: {}.", top.tool, join_list(&gaps)));
        }

        text
    }

    /// Selected requirements the tool provides, ordered by weight, heaviest first.
    /// Equal weights keep requirement declaration order.
    fn drivers(
        &self,
        features: &FeatureVector,
        requirements: &RequirementsProfile,
        weights: &WeightProfile,
    ) -> Vec<Driver> {
        let mut drivers: Vec<Driver> = requirements
            .selected
            .iter()
            .filter_map(|&requirement| {
                let slot = self.builder.slot_of(requirement)?;
                if features.get(slot) != Some(1) {
                    return None;
                }
                let (weight, source) = match self.resolver.owner(slot) {
                    Some(dial) => (weights.get(dial), dial.label().to_string()),
                    None => (self.resolver.default_weight(), "standard weight".to_string()),
                };
                Some(Driver {
                    requirement,
                    weight,
                    source,
                })
            })
            .filter(|d| d.weight > 0.0)
            .collect();

        drivers.sort_by(|a, b| b.weight.total_cmp(&a.weight));
        drivers.truncate(MAX_DRIVERS);
        drivers
    }

    /// Selected requirements the tool does not provide, in declaration order
    fn gaps(&self, features: &FeatureVector, requirements: &RequirementsProfile) -> Vec<Requirement> {
        requirements
            .selected
            .iter()
            .copied()
            .filter(|&requirement| {
                self.builder
                    .slot_of(requirement)
                    .is_some_and(|slot| features.get(slot) == Some(0))
            })
            .collect()
    }
}

/// "a", "a and b", "a, b and c"
fn join_list(items: &[String]) -> String {
    match items {
        [] => String::new(),
        [only] => only.clone(),
        [init @ .., last] => format!("{} and {}", init.join(", "), last),
    }
}

//! The scoring pipeline behind one submission: build the user vector, resolve
//! weights, rank the catalog, explain the winner.

use crate::catalog::Catalog;
use crate::config::DEFAULT_WEIGHT;
use crate::error::AdvisorError;
use crate::explain::Explainer;
use crate::profile::{builtin_bindings, ProfileBuilder, RequirementsProfile, SlotBinding};
use crate::rank::{rank, MatchResult, Ranking};
use crate::schema::{FeatureSchema, FeatureVector};
use crate::weights::{builtin_coverage, DialCoverage, WeightProfile, WeightResolver, WeightVector};
use serde::Deserialize;
use tracing::{debug, info};

/// One submission from the requirements form
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AdviceRequest {
    #[serde(default)]
    pub requirements: RequirementsProfile,

    #[serde(default)]
    pub weights: WeightProfile,

    /// Rows to return; all rows when absent
    #[serde(default)]
    pub top: Option<usize>,
}

/// Output of a full scoring run
#[derive(Debug, Clone)]
pub struct Recommendation {
    pub ranking: Ranking,
    pub explanation: String,
}

impl Recommendation {
    pub fn top(&self) -> Option<&MatchResult> {
        self.ranking.top()
    }
}

/// Read-only once built; safe to share across runs.
#[derive(Debug, Clone)]
pub struct Advisor {
    catalog: Catalog,
    builder: ProfileBuilder,
    resolver: WeightResolver,
}

impl Advisor {
    /// Validate every table against the schema and every catalog vector's length.
    pub fn new(
        schema: FeatureSchema,
        catalog: Catalog,
        bindings: Vec<SlotBinding>,
        coverage: Vec<DialCoverage>,
        default_weight: f64,
    ) -> Result<Self, AdvisorError> {
        catalog.check_dimensions(schema.len())?;
        let resolver = WeightResolver::new(&schema, coverage, default_weight)?;
        let builder = ProfileBuilder::new(schema, bindings)?;
        Ok(Self {
            catalog,
            builder,
            resolver,
        })
    }

    /// Builtin schema, bindings and coverage over the given catalog
    pub fn with_catalog(catalog: Catalog) -> Result<Self, AdvisorError> {
        Self::new(
            FeatureSchema::builtin(),
            catalog,
            builtin_bindings(),
            builtin_coverage(),
            DEFAULT_WEIGHT,
        )
    }

    pub fn builtin() -> Result<Self, AdvisorError> {
        Self::with_catalog(Catalog::builtin())
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn build_user_vector(
        &self,
        requirements: &RequirementsProfile,
    ) -> Result<FeatureVector, AdvisorError> {
        self.builder.build(requirements)
    }

    pub fn resolve_weights(&self, weights: &WeightProfile) -> Result<WeightVector, AdvisorError> {
        self.resolver.resolve(weights)
    }

    pub fn rank(
        &self,
        user: &FeatureVector,
        weights: &WeightVector,
    ) -> Result<Ranking, AdvisorError> {
        rank(&self.catalog, user, weights)
    }

    /// Explain `top` against its catalog vector, crediting only the features it has.
    pub fn explain(
        &self,
        top: &MatchResult,
        requirements: &RequirementsProfile,
        weights: &WeightProfile,
    ) -> String {
        let features = self.catalog.get(&top.tool).map(|tool| &tool.features);
        Explainer::new(&self.builder, &self.resolver).explain(top, features, requirements, weights)
    }

    /// Run the whole pipeline for one request.
    pub fn recommend(&self, request: &AdviceRequest) -> Result<Recommendation, AdvisorError> {
        let user = self.build_user_vector(&request.requirements)?;
        debug!("User vector: {:?}", user.as_slice());

        let weights = self.resolve_weights(&request.weights)?;
        debug!("Weight vector: {:?}", weights.as_slice());

        let ranking = self.rank(&user, &weights)?;

        let explanation = match ranking.top() {
            Some(top) => {
                info!("Top recommendation: {} ({}%)", top.tool, top.score);
                self.explain(top, &request.requirements, &request.weights)
            }
            None => String::new(),
        };

        Ok(Recommendation {
            ranking,
            explanation,
        })
    }
}

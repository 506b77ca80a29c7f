//! Ranker: scores every catalog entry and orders the results.

use crate::catalog::Catalog;
use crate::error::AdvisorError;
use crate::schema::FeatureVector;
use crate::similarity::score;
use crate::weights::WeightVector;
use serde::Serialize;
use tracing::debug;

/// Score of one tool for one query
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchResult {
    pub tool: String,
    /// 0.0 to 100.0, one decimal
    pub score: f64,
}

/// Results of one query, best first. Equal scores keep catalog order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Ranking {
    results: Vec<MatchResult>,
}

impl Ranking {
    pub fn top(&self) -> Option<&MatchResult> {
        self.results.first()
    }

    /// First `k` rows of the same ordering (fewer if the catalog is smaller)
    pub fn top_k(&self, k: usize) -> &[MatchResult] {
        &self.results[..k.min(self.results.len())]
    }

    pub fn results(&self) -> &[MatchResult] {
        &self.results
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}

/// Score every tool against the user vector and sort by score descending.
///
/// All dimensions are checked before anything is scored, so a run either
/// ranks the full catalog or fails without results.
pub fn rank(
    catalog: &Catalog,
    user: &FeatureVector,
    weights: &WeightVector,
) -> Result<Ranking, AdvisorError> {
    if user.len() != weights.len() {
        return Err(AdvisorError::SchemaMismatch {
            context: "weight vector".to_string(),
            expected: user.len(),
            actual: weights.len(),
        });
    }
    catalog.check_dimensions(user.len())?;

    let mut results: Vec<MatchResult> = catalog
        .tools()
        .iter()
        .map(|tool| MatchResult {
            tool: tool.name.clone(),
            score: score(user, &tool.features, weights),
        })
        .collect();

    // sort_by is stable: ties stay in catalog order
    results.sort_by(|a, b| b.score.total_cmp(&a.score));

    debug!(
        "Ranked {} tools, best: {:?}",
        results.len(),
        results.first().map(|r| (&r.tool, r.score))
    );

    Ok(Ranking { results })
}

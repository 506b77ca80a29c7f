//! Response payloads and plain-text table rendering.

use crate::advisor::Recommendation;
use crate::catalog::Catalog;
use crate::config::{ScoreBands, OUTPUT_VERSION};
use colored::Colorize;
use serde::Serialize;

/// JSON response written to stdout
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdviceOutput {
    /// Response format version
    pub version: String,

    /// RFC 3339 timestamp of the run
    pub generated: String,

    /// Best match, absent only for an empty ranking
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top: Option<ResultRow>,

    pub explanation: String,

    /// Ranked rows (top-K when requested)
    pub results: Vec<ResultRow>,
}

/// A ranked row
#[derive(Debug, Clone, Serialize)]
pub struct ResultRow {
    /// 1-based position
    pub rank: usize,

    pub tool: String,

    /// Match score (0.0 to 100.0)
    pub score: f64,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl AdviceOutput {
    /// Build the response. `limit` truncates `results`; `top` always reports the winner.
    pub fn new(recommendation: &Recommendation, catalog: &Catalog, limit: Option<usize>) -> Self {
        let all = recommendation.ranking.results();
        let shown = match limit {
            Some(k) => recommendation.ranking.top_k(k),
            None => all,
        };

        let row = |index: usize, tool: &str, score: f64| ResultRow {
            rank: index + 1,
            tool: tool.to_string(),
            score,
            description: catalog.get(tool).and_then(|t| t.description.clone()),
        };

        Self {
            version: OUTPUT_VERSION.to_string(),
            generated: chrono::Utc::now().to_rfc3339(),
            top: all.first().map(|m| row(0, &m.tool, m.score)),
            explanation: recommendation.explanation.clone(),
            results: shown
                .iter()
                .enumerate()
                .map(|(i, m)| row(i, &m.tool, m.score))
                .collect(),
        }
    }
}

/// Render the comparison table shown by `--format table`.
pub fn render_table(output: &AdviceOutput) -> String {
    let bands = ScoreBands::default();
    let width = output
        .results
        .iter()
        .map(|r| r.tool.chars().count())
        .max()
        .unwrap_or(4)
        .max(4);

    let mut lines = Vec::with_capacity(output.results.len() + 4);

    if let Some(top) = &output.top {
        lines.push(format!(
            "{} {} ({}%)",
            "Top recommendation:".bold(),
            top.tool.green().bold(),
            top.score
        ));
        lines.push(String::new());
    }

    lines.push(format!("{:>4}  {:<width$}  {:>6}", "#", "Tool", "Score", width = width));
    for row in &output.results {
        let score = format!("{:>6.1}", row.score);
        let score = if row.score >= bands.strong {
            score.green()
        } else if row.score >= bands.partial {
            score.yellow()
        } else {
            score.red()
        };
        lines.push(format!(
            "{:>4}  {:<width$}  {}",
            row.rank,
            row.tool,
            score,
            width = width
        ));
    }

    if !output.explanation.is_empty() {
        lines.push(String::new());
        lines.push(output.explanation.clone());
    }

    lines.join("\n")
}

//! QA Tool Advisor - recommends a software testing tool from a fixed catalog
//!
//! A requirements profile (platforms, team skill, modern capabilities) is turned
//! into a binary feature vector, a few priority dials are broadcast into a
//! per-slot weight vector, and every catalog entry is scored with a weighted
//! cosine similarity.
//!
//! # Pipeline
//! - [`profile`]: requirements → user vector
//! - [`weights`]: dials → weight vector
//! - [`similarity`]: weighted cosine score in [0, 100]
//! - [`rank`]: stable descending ranking with top-K views
//! - [`explain`]: templated justification for the winner
//!
//! [`advisor::Advisor`] wires the stages together over a [`catalog::Catalog`].

pub mod advisor;
pub mod catalog;
pub mod config;
pub mod error;
pub mod explain;
pub mod output;
pub mod profile;
pub mod rank;
pub mod schema;
pub mod similarity;
pub mod weights;

pub use advisor::{AdviceRequest, Advisor, Recommendation};
pub use catalog::{Catalog, ToolProfile};
pub use error::AdvisorError;
pub use profile::{Requirement, RequirementsProfile, SkillLevel};
pub use rank::{rank, MatchResult, Ranking};
pub use schema::{FeatureSchema, FeatureVector};
pub use similarity::score;
pub use weights::{Dial, WeightProfile, WeightVector};

//! Error types shared by every stage of a scoring run.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AdvisorError {
    /// A vector's length disagrees with the feature schema. Never padded or truncated.
    #[error("Schema mismatch in {context}: expected {expected} slots, got {actual}")]
    SchemaMismatch {
        context: String,
        expected: usize,
        actual: usize,
    },

    /// Negative or non-finite dial value handed to the weight resolver.
    #[error("Invalid weight for dial {dial}: {value}")]
    InvalidWeight { dial: String, value: f64 },

    #[error("Dial {dial} value {value} is outside the allowed range {min}..={max}")]
    DialOutOfRange {
        dial: String,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("Unknown feature slot: {0}")]
    UnknownFeature(String),

    #[error("Feature slot declared twice: {0}")]
    DuplicateFeature(String),

    #[error("Invalid feature slot name: {0:?}")]
    InvalidFeatureName(String),

    #[error("Tool {tool} has invalid value {value} at slot {index} (expected 0 or 1)")]
    InvalidFeatureValue {
        tool: String,
        index: usize,
        value: u8,
    },

    #[error("Tool listed twice in catalog: {0}")]
    DuplicateTool(String),

    #[error("Catalog contains no tools")]
    EmptyCatalog,

    #[error("Slot {slot} is claimed by both {first} and {second} dials")]
    CoverageOverlap {
        slot: String,
        first: String,
        second: String,
    },

    #[error("Slot {0} has more than one requirement binding")]
    DuplicateBinding(String),

    #[error("Failed to read catalog from {path}: {source}")]
    CatalogRead { path: PathBuf, source: io::Error },

    #[error("Failed to parse catalog: {0}")]
    CatalogParse(String),

    #[error("Catalog not found at {0}")]
    CatalogNotFound(PathBuf),

    #[error("Config directory not found")]
    NoConfigDir,

    #[error("Failed to read input: {0}")]
    InputRead(#[from] io::Error),

    #[error("Failed to parse input JSON: {0}")]
    InputParse(#[from] serde_json::Error),

    #[error("Failed to serialize output: {0}")]
    OutputSerialize(#[source] serde_json::Error),
}

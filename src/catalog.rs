//! Static tool catalog: tool name → feature profile, in insertion order.

use crate::config::{CATALOG_DIR, CATALOG_FILE};
use crate::error::AdvisorError;
use crate::schema::FeatureVector;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

// Web, Mob, Desk, API, NoCode, Expert, BDD, AI_Heal, NLP, VisualAI, CICD, Parallel, SAP, Cloud, Reporting
const BUILTIN_TOOLS: [(&str, [u8; 15], &str); 7] = [
    (
        "Selenium",
        [1, 0, 0, 1, 0, 1, 1, 0, 0, 0, 1, 1, 0, 0, 1],
        "Open-source browser automation through the WebDriver protocol",
    ),
    (
        "Playwright",
        [1, 0, 0, 1, 0, 1, 0, 0, 0, 1, 1, 1, 0, 1, 1],
        "Cross-browser end-to-end framework with auto-waiting and screenshot diffing",
    ),
    (
        "Cypress",
        [1, 0, 0, 1, 0, 1, 0, 0, 0, 0, 1, 0, 0, 0, 1],
        "JavaScript end-to-end runner executing inside the browser",
    ),
    (
        "Appium",
        [0, 1, 0, 1, 0, 1, 0, 0, 0, 0, 1, 1, 0, 1, 1],
        "WebDriver-based automation for native and hybrid mobile apps",
    ),
    (
        "Katalon",
        [1, 1, 1, 1, 1, 0, 1, 1, 0, 1, 1, 1, 1, 1, 1],
        "Low-code platform covering web, mobile, desktop and API testing",
    ),
    (
        "testRigor",
        [1, 1, 0, 0, 1, 0, 0, 1, 1, 1, 1, 1, 0, 1, 1],
        "AI-driven tool where tests are written in plain English",
    ),
    (
        "Tricentis Tosca",
        [1, 1, 1, 1, 1, 0, 0, 1, 0, 1, 1, 1, 1, 1, 1],
        "Model-based enterprise test automation with SAP support",
    ),
];

/// A single catalog entry. Immutable once loaded.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolProfile {
    pub name: String,
    pub features: FeatureVector,
    pub description: Option<String>,
}

/// On-disk catalog format
#[derive(Debug, Deserialize, Serialize)]
pub struct CatalogFile {
    #[serde(default)]
    pub version: String,

    /// Array rather than map so insertion order survives parsing
    pub tools: Vec<CatalogEntry>,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct CatalogEntry {
    pub name: String,
    pub features: Vec<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone)]
pub struct Catalog {
    tools: Vec<ToolProfile>,
}

impl Catalog {
    /// Build a catalog, rejecting duplicate names and an empty tool list.
    ///
    /// Vector lengths are not checked here; a catalog is independent of any
    /// schema until it is ranked (see [`check_dimensions`](Self::check_dimensions)).
    pub fn new(tools: Vec<ToolProfile>) -> Result<Self, AdvisorError> {
        if tools.is_empty() {
            return Err(AdvisorError::EmptyCatalog);
        }
        let mut seen = HashSet::with_capacity(tools.len());
        for tool in &tools {
            if !seen.insert(tool.name.as_str()) {
                return Err(AdvisorError::DuplicateTool(tool.name.clone()));
            }
        }
        Ok(Self { tools })
    }

    pub fn builtin() -> Self {
        let tools = BUILTIN_TOOLS
            .iter()
            .map(|(name, features, description)| {
                let bits: Vec<bool> = features.iter().map(|f| *f == 1).collect();
                ToolProfile {
                    name: name.to_string(),
                    features: FeatureVector::from_bools(&bits),
                    description: Some(description.to_string()),
                }
            })
            .collect();
        Self { tools }
    }

    pub fn from_file(file: CatalogFile) -> Result<Self, AdvisorError> {
        let tools = file
            .tools
            .into_iter()
            .map(|entry| {
                let features = FeatureVector::new(entry.features, &entry.name)?;
                Ok(ToolProfile {
                    name: entry.name,
                    features,
                    description: entry.description,
                })
            })
            .collect::<Result<Vec<_>, AdvisorError>>()?;
        Self::new(tools)
    }

    /// Load and parse a catalog file
    pub fn load(path: &Path) -> Result<Self, AdvisorError> {
        if !path.exists() {
            return Err(AdvisorError::CatalogNotFound(path.to_path_buf()));
        }

        let content = fs::read_to_string(path).map_err(|e| AdvisorError::CatalogRead {
            path: path.to_path_buf(),
            source: e,
        })?;

        let file: CatalogFile =
            serde_json::from_str(&content).map_err(|e| AdvisorError::CatalogParse(e.to_string()))?;

        debug!("Parsed catalog {:?} (version {:?})", path, file.version);
        Self::from_file(file)
    }

    /// Ensure every tool vector has `expected` slots.
    pub fn check_dimensions(&self, expected: usize) -> Result<(), AdvisorError> {
        match self.tools.iter().find(|t| t.features.len() != expected) {
            Some(tool) => Err(AdvisorError::SchemaMismatch {
                context: format!("catalog entry {}", tool.name),
                expected,
                actual: tool.features.len(),
            }),
            None => Ok(()),
        }
    }

    pub fn tools(&self) -> &[ToolProfile] {
        &self.tools
    }

    pub fn get(&self, name: &str) -> Option<&ToolProfile> {
        self.tools.iter().find(|t| t.name == name)
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    pub fn to_file(&self) -> CatalogFile {
        CatalogFile {
            version: "1.0".to_string(),
            tools: self
                .tools
                .iter()
                .map(|t| CatalogEntry {
                    name: t.name.clone(),
                    features: t.features.as_slice().to_vec(),
                    description: t.description.clone(),
                })
                .collect(),
        }
    }
}

/// Default location of a user catalog: `<config_dir>/qa-tool-advisor/catalog.json`
pub fn default_catalog_path() -> Result<PathBuf, AdvisorError> {
    let config = dirs::config_dir().ok_or(AdvisorError::NoConfigDir)?;
    Ok(config.join(CATALOG_DIR).join(CATALOG_FILE))
}

/// Resolve the catalog for this process.
///
/// An explicit path must exist. Without one, a catalog in the config
/// directory is used when present, else the builtin catalog.
pub fn resolve_catalog(explicit: Option<&Path>) -> Result<Catalog, AdvisorError> {
    if let Some(path) = explicit {
        return Catalog::load(path);
    }

    let path = match default_catalog_path() {
        Ok(path) => path,
        Err(AdvisorError::NoConfigDir) => {
            debug!("No config directory, using builtin catalog");
            return Ok(Catalog::builtin());
        }
        Err(e) => return Err(e),
    };

    match Catalog::load(&path) {
        Ok(catalog) => Ok(catalog),
        Err(AdvisorError::CatalogNotFound(path)) => {
            debug!("No catalog at {:?}, using builtin catalog", path);
            Ok(Catalog::builtin())
        }
        Err(e) => Err(e),
    }
}

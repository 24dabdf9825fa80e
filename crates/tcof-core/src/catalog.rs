//! Static good-practice catalog: delivery zones and framework task sets.
//!
//! The catalog ships embedded in the binary, the same way the database
//! schema does, and is parsed once when the toolkit is built.

use serde::{Deserialize, Serialize};

use crate::{
    error::Result,
    models::StageMap,
};

const CATALOG_JSON: &str = include_str!("../assets/catalog.json");

/// A delivery-context classification zone.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Zone {
    /// Zone code, e.g. "B2"
    pub code: String,
    /// Display name
    pub name: String,
    /// Short description of the delivery context
    pub description: String,
}

/// A named good-practice framework with a fixed task set per stage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Framework {
    /// Framework code, e.g. "AGILEPM"
    pub code: String,
    /// Display name
    pub name: String,
    /// Canonical task texts per stage
    #[serde(default)]
    pub tasks: StageMap<Vec<String>>,
}

/// The embedded zone and framework catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Catalog {
    pub zones: Vec<Zone>,
    pub frameworks: Vec<Framework>,
}

impl Catalog {
    /// Parses the embedded catalog asset.
    pub fn load() -> Result<Self> {
        let catalog: Catalog = serde_json::from_str(CATALOG_JSON)?;
        Ok(catalog)
    }

    /// Looks up a framework by its code.
    pub fn framework(&self, code: &str) -> Option<&Framework> {
        self.frameworks.iter().find(|f| f.code == code)
    }

    /// Looks up a zone by its code.
    pub fn zone(&self, code: &str) -> Option<&Zone> {
        self.zones.iter().find(|z| z.code == code)
    }
}

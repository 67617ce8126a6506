use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FactorSource {
    pub name: String,
    pub url: String,
}

/// Emission factors published by `GET /footprint/factors`, all in kg CO₂e.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmissionFactors {
    pub version: String,
    /// Grouped by category; the inner shape varies per group.
    pub factors: BTreeMap<String, serde_json::Value>,
    #[serde(default)]
    pub sources: Vec<FactorSource>,
    #[serde(default)]
    pub note: Option<String>,
}

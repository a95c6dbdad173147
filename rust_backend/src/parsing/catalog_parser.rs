use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

use crate::core::domain::CelestialTarget;

/// Raw JSON structure of a star catalog file
#[derive(Debug, Deserialize)]
struct CatalogJson {
    stars: Vec<StarJson>,
}

/// Raw JSON structure for a single catalog star.
///
/// Right ascension may be given in hours (`raHours`) or degrees (`raDegrees`).
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StarJson {
    name: String,
    ra_hours: Option<f64>,
    ra_degrees: Option<f64>,
    dec_degrees: f64,
    #[serde(default)]
    aliases: Vec<String>,
}

/// A catalog star together with the alternative names it answers to
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogEntry {
    pub target: CelestialTarget,
    pub aliases: Vec<String>,
}

/// Parse a star catalog from a JSON file
pub fn parse_catalog_json(json_path: &Path) -> Result<Vec<CatalogEntry>> {
    let json_content = std::fs::read_to_string(json_path)
        .with_context(|| format!("Failed to read catalog file: {}", json_path.display()))?;

    parse_catalog_json_str(&json_content)
}

/// Parse a star catalog from a JSON string.
///
/// Expected format:
/// ```json
/// {"stars": [{"name": "Vega", "raHours": 18.6156, "decDegrees": 38.7837, "aliases": ["alf Lyr"]}]}
/// ```
pub fn parse_catalog_json_str(json_str: &str) -> Result<Vec<CatalogEntry>> {
    let deserializer = &mut serde_json::Deserializer::from_str(json_str);
    let catalog: CatalogJson = serde_path_to_error::deserialize(deserializer).map_err(|e| {
        anyhow::anyhow!(
            "Catalog deserialization error at '{}': {}",
            e.path(),
            e.inner()
        )
    })?;

    catalog
        .stars
        .into_iter()
        .enumerate()
        .map(|(idx, star)| {
            star_to_entry(&star).with_context(|| format!("Invalid star #{} '{}'", idx, star.name))
        })
        .collect()
}

fn star_to_entry(star: &StarJson) -> Result<CatalogEntry> {
    let name = star.name.trim();
    if name.is_empty() {
        anyhow::bail!("Star name must not be empty");
    }

    let target = match (star.ra_hours, star.ra_degrees) {
        (Some(hours), None) => CelestialTarget::new(name, hours, star.dec_degrees)?,
        (None, Some(degrees)) => CelestialTarget::from_degrees(name, degrees, star.dec_degrees)?,
        (Some(_), Some(_)) => anyhow::bail!("Specify only one of 'raHours' or 'raDegrees'"),
        (None, None) => anyhow::bail!("Missing 'raHours' or 'raDegrees'"),
    };

    Ok(CatalogEntry {
        target,
        aliases: star
            .aliases
            .iter()
            .map(|a| a.trim().to_string())
            .filter(|a| !a.is_empty())
            .collect(),
    })
}

use anyhow::{Context, Result};
use log::{debug, warn};
use route_graph::{MapSeed, RouteMap};
use std::fs;
use std::path::Path;

/// Build the route map from `path`, or from the built-in seed when `None`
pub fn load_map(path: Option<&Path>) -> Result<RouteMap> {
    let seed = match path {
        Some(path) => read_seed(path)?,
        None => {
            debug!("Using built-in map");
            MapSeed::costa_rica()
        }
    };

    let map = seed.build().context("Failed to build route map")?;
    if map.is_empty() {
        warn!("Route map has no locations; every trip will be rejected");
    }
    Ok(map)
}

fn read_seed(path: &Path) -> Result<MapSeed> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read map file {}", path.display()))?;

    let seed: MapSeed = match path.extension().and_then(|ext| ext.to_str()) {
        Some("toml") => toml::from_str(&text)
            .with_context(|| format!("Invalid TOML map {}", path.display()))?,
        _ => MapSeed::from_json(&text)
            .with_context(|| format!("Invalid JSON map {}", path.display()))?,
    };

    debug!("Loaded map seed from {}", path.display());
    Ok(seed)
}

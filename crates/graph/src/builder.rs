use crate::error::{GraphError, Result};
use crate::types::RouteMap;
use serde::{Deserialize, Serialize};

/// Declarative description of a route map: locations first, then routes
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapSeed {
    /// Capacity hint; defaults to the number of locations
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capacity: Option<usize>,

    /// Location names, in id order
    pub locations: Vec<String>,

    #[serde(default)]
    pub routes: Vec<RouteSeed>,
}

/// One route entry of a [`MapSeed`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteSeed {
    pub from: String,
    pub to: String,
    pub distance_km: u32,

    /// Also insert `to -> from`
    #[serde(default)]
    pub two_way: bool,
}

impl RouteSeed {
    pub fn one_way(from: &str, to: &str, distance_km: u32) -> Self {
        Self {
            from: from.to_string(),
            to: to.to_string(),
            distance_km,
            two_way: false,
        }
    }
}

impl MapSeed {
    /// Built-in map: Costa Rica locations used by the trip CLI
    pub fn costa_rica() -> Self {
        let locations = [
            "Cartago",
            "Alajuela",
            "SanCarlos",
            "Heredia",
            "Paraiso",
            "ITCR",
            "Casa",
            "Energym",
            "Moren",
            "MonteVerde",
            "PlayaCocoSunSetHills",
        ];

        let routes = vec![
            RouteSeed::one_way("Heredia", "SanCarlos", 117),
            RouteSeed::one_way("Cartago", "SanCarlos", 176),
            RouteSeed::one_way("Paraiso", "ITCR", 15),
            RouteSeed::one_way("Casa", "Energym", 5),
            RouteSeed::one_way("Casa", "Moren", 16),
            RouteSeed::one_way("Casa", "PlayaCocoSunSetHills", 300),
            RouteSeed::one_way("Casa", "MonteVerde", 250),
        ];

        Self {
            capacity: Some(17),
            locations: locations.iter().map(|s| s.to_string()).collect(),
            routes,
        }
    }

    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text).map_err(|e| GraphError::SeedError(e.to_string()))
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| GraphError::SeedError(e.to_string()))
    }

    /// Populate a fresh [`RouteMap`].
    ///
    /// Stops at the first duplicate location or unresolved route endpoint.
    pub fn build(&self) -> Result<RouteMap> {
        let capacity = self
            .capacity
            .unwrap_or(self.locations.len())
            .max(self.locations.len());
        let mut map = RouteMap::with_capacity(capacity);

        for name in &self.locations {
            map.add_location(name.as_str())?;
        }

        for route in &self.routes {
            if route.two_way {
                map.add_two_way_route(&route.from, &route.to, route.distance_km)?;
            } else {
                map.add_route(&route.from, &route.to, route.distance_km)?;
            }
        }

        log::info!(
            "Built route map: {} locations, {} routes",
            map.location_count(),
            map.route_count()
        );

        Ok(map)
    }
}

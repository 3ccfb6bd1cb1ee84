//! # Route Graph
//!
//! Weighted directed map of named locations with trip planning queries.
//!
//! ## Features
//!
//! - **Location store** - named locations with stable ids, directed routes in km
//! - **Shortest trip** - Dijkstra over route distance, duration accumulated per route
//! - **Reachability partition** - group locations by what they reach through outgoing routes
//! - **Undirected components** - weak connectivity, as a separate query
//!
//! ## Architecture
//!
//! ```text
//! MapSeed (JSON / built-in)
//!     │
//!     ├──> RouteMap (petgraph DiGraph)
//!     │      ├─ Nodes: Locations (id = insertion order)
//!     │      └─ Edges: Routes (distance_km)
//!     │
//!     └──> Queries (read-only, fresh scratch state per call)
//!            ├─ shortest_path -> TripPlan | Unreachable
//!            ├─ reachability_partition
//!            └─ undirected_components
//! ```

mod types;
mod travel;
mod graph;
mod components;
mod builder;
mod error;

pub use types::{Location, LocationId, Route, RouteMap};
pub use travel::{edge_duration, AverageSpeed, TravelModel, AVERAGE_SPEED_KMH};
pub use graph::{ShortestPath, TripPlan};
pub use builder::{MapSeed, RouteSeed};
pub use error::{Result, GraphError};

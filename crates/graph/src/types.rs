use crate::error::{GraphError, Result};
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use petgraph::Direction;
use std::collections::HashMap;
use std::fmt;

/// Stable identifier of a location, assigned in insertion order (0-based, contiguous)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LocationId(usize);

impl LocationId {
    pub fn new(index: usize) -> Self {
        Self(index)
    }

    pub fn index(self) -> usize {
        self.0
    }

    pub(crate) fn node(self) -> NodeIndex {
        NodeIndex::new(self.0)
    }
}

impl From<NodeIndex> for LocationId {
    fn from(idx: NodeIndex) -> Self {
        Self(idx.index())
    }
}

impl fmt::Display for LocationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Named point on the map
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    pub id: LocationId,
    pub name: String,
}

/// Directed route between two locations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Route {
    pub from: LocationId,
    pub to: LocationId,

    /// Distance in kilometres (edge weight)
    pub distance_km: u32,
}

/// Weighted directed multigraph of named locations.
///
/// Built once (locations first, then routes) and queried read-only afterwards.
/// Routes are never mirrored implicitly: a two-way road is two routes.
#[derive(Debug, Clone)]
pub struct RouteMap {
    /// Adjacency structure; node weight is the location, edge weight the distance in km
    graph: DiGraph<Location, u32>,

    /// Location name -> id
    name_index: HashMap<String, LocationId>,
}

impl RouteMap {
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Create an empty map sized for `locations` nodes
    pub fn with_capacity(locations: usize) -> Self {
        Self {
            graph: DiGraph::with_capacity(locations, locations),
            name_index: HashMap::with_capacity(locations),
        }
    }

    /// Append a location; its id is the current location count.
    ///
    /// Names are unique: adding an existing name fails and leaves the map untouched.
    pub fn add_location(&mut self, name: impl Into<String>) -> Result<LocationId> {
        let name = name.into();
        if self.name_index.contains_key(&name) {
            return Err(GraphError::DuplicateLocation(name));
        }

        let id = LocationId::new(self.graph.node_count());
        let idx = self.graph.add_node(Location {
            id,
            name: name.clone(),
        });
        debug_assert_eq!(LocationId::from(idx), id);
        self.name_index.insert(name, id);

        Ok(id)
    }

    /// Add a directed route `origin -> destination`.
    ///
    /// Both endpoints must already exist; otherwise nothing is inserted.
    pub fn add_route(&mut self, origin: &str, destination: &str, distance_km: u32) -> Result<()> {
        let from = self.resolve(origin)?;
        let to = self.resolve(destination)?;
        self.graph.add_edge(from.node(), to.node(), distance_km);
        Ok(())
    }

    /// Add `a -> b` and `b -> a` with the same distance
    pub fn add_two_way_route(&mut self, a: &str, b: &str, distance_km: u32) -> Result<()> {
        let first = self.resolve(a)?;
        let second = self.resolve(b)?;
        self.graph.add_edge(first.node(), second.node(), distance_km);
        self.graph.add_edge(second.node(), first.node(), distance_km);
        Ok(())
    }

    /// Find location id by name
    pub fn lookup_id(&self, name: &str) -> Option<LocationId> {
        self.name_index.get(name).copied()
    }

    /// Like [`RouteMap::lookup_id`], but unresolved names become `UnknownLocation`
    pub fn resolve(&self, name: &str) -> Result<LocationId> {
        self.lookup_id(name)
            .ok_or_else(|| GraphError::UnknownLocation(name.to_string()))
    }

    pub fn location(&self, id: LocationId) -> Option<&Location> {
        self.graph.node_weight(id.node())
    }

    pub fn name(&self, id: LocationId) -> Option<&str> {
        self.location(id).map(|loc| loc.name.as_str())
    }

    /// All locations in id order
    pub fn locations(&self) -> impl Iterator<Item = &Location> {
        self.graph
            .node_indices()
            .filter_map(move |idx| self.graph.node_weight(idx))
    }

    pub fn location_ids(&self) -> impl Iterator<Item = LocationId> + '_ {
        self.graph.node_indices().map(LocationId::from)
    }

    /// Outgoing routes of `id`, in insertion order
    pub fn routes_from(&self, id: LocationId) -> Vec<Route> {
        self.routes_directed(id, Direction::Outgoing)
    }

    /// Incoming routes of `id`, in insertion order
    pub fn routes_into(&self, id: LocationId) -> Vec<Route> {
        self.routes_directed(id, Direction::Incoming)
    }

    /// Collects and sorts on every call, so each Dijkstra pop or DFS step pays one
    /// small allocation. petgraph does not document its per-node edge order.
    fn routes_directed(&self, id: LocationId, direction: Direction) -> Vec<Route> {
        // edge indices carry insertion order
        let mut edges: Vec<_> = self.graph.edges_directed(id.node(), direction).collect();
        edges.sort_by_key(|e| e.id());
        edges
            .into_iter()
            .map(|e| Route {
                from: e.source().into(),
                to: e.target().into(),
                distance_km: *e.weight(),
            })
            .collect()
    }

    pub fn location_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn route_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    /// Underlying petgraph structure (read-only)
    pub fn as_graph(&self) -> &DiGraph<Location, u32> {
        &self.graph
    }
}

impl Default for RouteMap {
    fn default() -> Self {
        Self::new()
    }
}

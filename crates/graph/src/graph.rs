use crate::error::{GraphError, Result};
use crate::travel::{AverageSpeed, TravelModel};
use crate::types::{LocationId, RouteMap};
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;
use std::collections::BinaryHeap;

/// Shortest route between two locations
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TripPlan {
    /// Location names from origin to destination, both inclusive
    pub route: Vec<String>,

    /// Sum of route distances
    pub total_distance_km: u64,

    /// Sum of per-route durations
    pub total_duration_min: u64,
}

impl TripPlan {
    pub fn origin(&self) -> Option<&str> {
        self.route.first().map(String::as_str)
    }

    pub fn destination(&self) -> Option<&str> {
        self.route.last().map(String::as_str)
    }

    /// Number of routes travelled
    pub fn legs(&self) -> usize {
        self.route.len().saturating_sub(1)
    }
}

/// Outcome of a shortest-path query
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShortestPath {
    Found(TripPlan),
    Unreachable,
}

impl ShortestPath {
    pub fn is_reachable(&self) -> bool {
        matches!(self, ShortestPath::Found(_))
    }

    pub fn plan(&self) -> Option<&TripPlan> {
        match self {
            ShortestPath::Found(plan) => Some(plan),
            ShortestPath::Unreachable => None,
        }
    }

    pub fn into_plan(self) -> Option<TripPlan> {
        match self {
            ShortestPath::Found(plan) => Some(plan),
            ShortestPath::Unreachable => None,
        }
    }

    /// Location names along the path; empty when unreachable
    pub fn route(&self) -> &[String] {
        self.plan().map(|p| p.route.as_slice()).unwrap_or(&[])
    }
}

impl RouteMap {
    /// Shortest route by total distance, timed at the default average speed
    pub fn shortest_path(&self, origin: &str, destination: &str) -> Result<ShortestPath> {
        self.shortest_path_with(origin, destination, &AverageSpeed::default())
    }

    /// Shortest route by total distance, timed with `model`.
    ///
    /// Fails with `UnknownLocation` before searching if either name is unresolved.
    pub fn shortest_path_with<M: TravelModel + ?Sized>(
        &self,
        origin: &str,
        destination: &str,
        model: &M,
    ) -> Result<ShortestPath> {
        let from = self.resolve(origin)?;
        let to = self.resolve(destination)?;
        Ok(self.search(from, to, model))
    }

    /// Shortest route between two ids, timed at the default average speed.
    ///
    /// Ids that do not belong to this map fail with `UnknownLocation`.
    pub fn shortest_path_by_id(&self, from: LocationId, to: LocationId) -> Result<ShortestPath> {
        for id in [from, to] {
            if self.location(id).is_none() {
                return Err(GraphError::UnknownLocation(id.to_string()));
            }
        }
        Ok(self.search(from, to, &AverageSpeed::default()))
    }

    /// Lazy-deletion Dijkstra from `from`; both ids must be valid.
    fn search<M: TravelModel + ?Sized>(
        &self,
        from: LocationId,
        to: LocationId,
        model: &M,
    ) -> ShortestPath {
        let n = self.location_count();
        let mut distance: Vec<Option<u64>> = vec![None; n];
        let mut duration: Vec<u64> = vec![0; n];
        let mut predecessor: Vec<Option<LocationId>> = vec![None; n];
        let mut frontier = BinaryHeap::new();

        distance[from.index()] = Some(0);
        frontier.push(Reverse((0u64, from)));

        let mut settled = 0usize;
        while let Some(Reverse((dist_u, u))) = frontier.pop() {
            if matches!(distance[u.index()], Some(best) if dist_u > best) {
                continue;
            }
            settled += 1;

            for route in self.routes_from(u) {
                let v = route.to.index();
                let candidate = dist_u.saturating_add(u64::from(route.distance_km));
                let improves = match distance[v] {
                    Some(best) => candidate < best,
                    None => true,
                };

                if improves {
                    distance[v] = Some(candidate);
                    duration[v] = duration[u.index()]
                        .saturating_add(model.minutes_for(route.distance_km));
                    predecessor[v] = Some(u);
                    frontier.push(Reverse((candidate, route.to)));
                }
            }
        }

        log::debug!(
            "Shortest path search {} -> {}: settled {} of {} locations",
            from,
            to,
            settled,
            n
        );

        let Some(total_distance_km) = distance[to.index()] else {
            return ShortestPath::Unreachable;
        };

        let mut route = Vec::new();
        let mut cursor = Some(to);
        while let Some(id) = cursor {
            if let Some(name) = self.name(id) {
                route.push(name.to_string());
            }
            cursor = predecessor[id.index()];
        }
        route.reverse();

        ShortestPath::Found(TripPlan {
            route,
            total_distance_km,
            total_duration_min: duration[to.index()],
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use petgraph::visit::EdgeRef;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    fn map_with(locations: &[&str], routes: &[(&str, &str, u32)]) -> RouteMap {
        let mut map = RouteMap::with_capacity(locations.len());
        for name in locations {
            map.add_location(*name).unwrap();
        }
        for (from, to, km) in routes {
            map.add_route(from, to, *km).unwrap();
        }
        map
    }

    fn names(route: &[&str]) -> Vec<String> {
        route.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn finds_chain_with_distance_and_duration() {
        let map = map_with(&["A", "B", "C"], &[("A", "B", 10), ("B", "C", 5)]);
        let result = map.shortest_path("A", "C").unwrap();
        assert_eq!(
            result,
            ShortestPath::Found(TripPlan {
                route: names(&["A", "B", "C"]),
                total_distance_km: 15,
                total_duration_min: 15,
            })
        );
    }

    #[test]
    fn same_origin_and_destination_is_single_location() {
        let map = map_with(&["A", "B"], &[("A", "B", 3)]);
        let plan = map.shortest_path("A", "A").unwrap().into_plan().unwrap();
        assert_eq!(plan.route, names(&["A"]));
        assert_eq!(plan.total_distance_km, 0);
        assert_eq!(plan.total_duration_min, 0);
        assert_eq!(plan.legs(), 0);
    }

    #[test]
    fn shared_destination_does_not_connect_sources() {
        let map = map_with(&["A", "B", "C"], &[("A", "B", 117), ("C", "B", 176)]);
        let result = map.shortest_path("A", "C").unwrap();
        assert_eq!(result, ShortestPath::Unreachable);
        assert!(result.route().is_empty());
        assert!(!result.is_reachable());
    }

    #[test]
    fn routes_are_not_reversible() {
        let map = map_with(&["A", "B"], &[("A", "B", 1)]);
        assert!(map.shortest_path("A", "B").unwrap().is_reachable());
        assert!(!map.shortest_path("B", "A").unwrap().is_reachable());
    }

    #[test]
    fn unknown_names_are_reported() {
        let map = map_with(&["A"], &[]);
        assert_eq!(
            map.shortest_path("A", "Z"),
            Err(GraphError::UnknownLocation("Z".to_string()))
        );
        assert_eq!(
            map.shortest_path("Q", "A"),
            Err(GraphError::UnknownLocation("Q".to_string()))
        );
    }

    #[test]
    fn search_by_id_matches_search_by_name() {
        let map = map_with(&["A", "B", "C"], &[("A", "B", 10), ("B", "C", 5)]);
        let a = map.lookup_id("A").unwrap();
        let c = map.lookup_id("C").unwrap();
        assert_eq!(
            map.shortest_path_by_id(a, c).unwrap(),
            map.shortest_path("A", "C").unwrap()
        );
    }

    #[test]
    fn search_by_foreign_id_is_unknown() {
        let map = map_with(&["A", "B"], &[("A", "B", 1)]);
        let a = map.lookup_id("A").unwrap();
        let outside = LocationId::new(99);
        assert_eq!(
            map.shortest_path_by_id(a, outside),
            Err(GraphError::UnknownLocation("#99".to_string()))
        );
        assert_eq!(
            map.shortest_path_by_id(outside, a),
            Err(GraphError::UnknownLocation("#99".to_string()))
        );
    }

    #[test]
    fn prefers_longer_chain_when_cheaper() {
        let map = map_with(
            &["A", "B", "C", "D"],
            &[("A", "D", 50), ("A", "B", 10), ("B", "C", 10), ("C", "D", 10)],
        );
        let plan = map.shortest_path("A", "D").unwrap().into_plan().unwrap();
        assert_eq!(plan.route, names(&["A", "B", "C", "D"]));
        assert_eq!(plan.total_distance_km, 30);
        assert_eq!(plan.origin(), Some("A"));
        assert_eq!(plan.destination(), Some("D"));
    }

    #[test]
    fn parallel_routes_use_the_shorter_one() {
        let map = map_with(&["A", "B"], &[("A", "B", 9), ("A", "B", 4)]);
        let plan = map.shortest_path("A", "B").unwrap().into_plan().unwrap();
        assert_eq!(plan.total_distance_km, 4);
    }

    #[test]
    fn duration_is_accumulated_per_route() {
        struct PerLeg;
        impl TravelModel for PerLeg {
            fn minutes_for(&self, distance_km: u32) -> u64 {
                // flat pickup cost per route
                u64::from(distance_km) + 2
            }
        }

        let map = map_with(&["A", "B", "C"], &[("A", "B", 10), ("B", "C", 5)]);
        let plan = map
            .shortest_path_with("A", "C", &PerLeg)
            .unwrap()
            .into_plan()
            .unwrap();
        assert_eq!(plan.total_distance_km, 15);
        assert_eq!(plan.total_duration_min, 19);
    }

    #[test]
    fn slower_speed_truncates_each_route() {
        let map = map_with(&["A", "B", "C"], &[("A", "B", 10), ("B", "C", 10)]);
        let speed = AverageSpeed::new(45).unwrap();
        let plan = map
            .shortest_path_with("A", "C", &speed)
            .unwrap()
            .into_plan()
            .unwrap();
        // 13 + 13, not floor(20 * 60 / 45) = 26
        assert_eq!(plan.total_duration_min, 26);
    }

    #[test]
    fn repeated_queries_are_identical() {
        let map = map_with(
            &["A", "B", "C", "D"],
            &[("A", "B", 1), ("A", "C", 1), ("B", "D", 1), ("C", "D", 1)],
        );
        let first = map.shortest_path("A", "D").unwrap();
        for _ in 0..5 {
            assert_eq!(map.shortest_path("A", "D").unwrap(), first);
        }
    }

    fn arb_graph() -> impl Strategy<Value = (usize, Vec<(usize, usize, u32)>)> {
        (1usize..9).prop_flat_map(|n| {
            let edges = prop::collection::vec((0..n, 0..n, 0u32..100), 0..24);
            (Just(n), edges)
        })
    }

    proptest! {
        #[test]
        fn proptest_distance_matches_petgraph_dijkstra(
            (n, edges) in arb_graph(),
            origin_seed in 0usize..64,
            target_seed in 0usize..64,
        ) {
            let mut map = RouteMap::with_capacity(n);
            let labels: Vec<String> = (0..n).map(|i| format!("L{i}")).collect();
            for label in &labels {
                map.add_location(label.as_str()).unwrap();
            }
            for (from, to, km) in &edges {
                map.add_route(&labels[*from], &labels[*to], *km).unwrap();
            }

            let origin = origin_seed % n;
            let target = target_seed % n;
            let expected = petgraph::algo::dijkstra(
                map.as_graph(),
                LocationId::new(origin).node(),
                None,
                |e| u64::from(*e.weight()),
            );

            let result = map.shortest_path(&labels[origin], &labels[target]).unwrap();
            match expected.get(&LocationId::new(target).node()) {
                Some(&best) => {
                    let plan = result.into_plan().expect("reachable");
                    prop_assert_eq!(plan.total_distance_km, best);
                    prop_assert_eq!(plan.total_duration_min, best);
                    prop_assert_eq!(plan.origin(), Some(labels[origin].as_str()));
                    prop_assert_eq!(plan.destination(), Some(labels[target].as_str()));
                }
                None => prop_assert_eq!(result, ShortestPath::Unreachable),
            }
        }
    }
}

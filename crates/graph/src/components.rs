use crate::types::{LocationId, RouteMap};

/// Which edges a component traversal may follow
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Traversal {
    /// Outgoing routes only
    Outgoing,

    /// Outgoing and incoming routes (weak connectivity)
    Undirected,
}

impl RouteMap {
    /// Reachability partition of all locations.
    ///
    /// Locations are scanned in id order; every location not yet visited starts a
    /// new component holding everything reachable from it through *outgoing* routes
    /// that no earlier component claimed. Names are listed in depth-first visit
    /// order. Because only outgoing routes are followed, the result depends on id
    /// order and is not undirected connectivity: with `A -> B` and `C -> B` this
    /// yields `[A, B]`, `[C]`. Use [`RouteMap::undirected_components`] for the latter.
    pub fn reachability_partition(&self) -> Vec<Vec<String>> {
        self.partition(Traversal::Outgoing)
    }

    /// Weakly connected components: routes are followed in both directions.
    ///
    /// Same scan and visit order as [`RouteMap::reachability_partition`].
    pub fn undirected_components(&self) -> Vec<Vec<String>> {
        self.partition(Traversal::Undirected)
    }

    fn partition(&self, traversal: Traversal) -> Vec<Vec<String>> {
        let mut visited = vec![false; self.location_count()];
        let mut components = Vec::new();

        for root in self.location_ids() {
            if visited[root.index()] {
                continue;
            }
            components.push(self.depth_first(root, traversal, &mut visited));
        }

        log::debug!(
            "{:?} partition: {} components over {} locations",
            traversal,
            components.len(),
            visited.len()
        );

        components
    }

    /// Pre-order DFS from `root` with an explicit stack.
    ///
    /// Neighbours are pushed in reverse so they pop in route order, which gives the
    /// same visit order as the recursive formulation.
    fn depth_first(
        &self,
        root: LocationId,
        traversal: Traversal,
        visited: &mut [bool],
    ) -> Vec<String> {
        let mut component = Vec::new();
        let mut stack = vec![root];

        while let Some(current) = stack.pop() {
            if visited[current.index()] {
                continue;
            }
            visited[current.index()] = true;

            if let Some(name) = self.name(current) {
                component.push(name.to_string());
            }

            let neighbours = self.adjacent(current, traversal);
            for next in neighbours.into_iter().rev() {
                if !visited[next.index()] {
                    stack.push(next);
                }
            }
        }

        component
    }

    fn adjacent(&self, id: LocationId, traversal: Traversal) -> Vec<LocationId> {
        let mut out: Vec<LocationId> = self.routes_from(id).iter().map(|r| r.to).collect();
        if traversal == Traversal::Undirected {
            out.extend(self.routes_into(id).iter().map(|r| r.from));
        }
        out
    }
}

use route_graph::{RouteMap, ShortestPath};

const ARROW: &str = " -> ";

pub fn render_trip(
    origin: &str,
    destination: &str,
    result: &ShortestPath,
    payment: &str,
) -> String {
    let Some(plan) = result.plan() else {
        return format!("No route found from {origin} to {destination}");
    };

    let mut out = String::new();
    out.push_str(&format!(
        "Shortest route from {origin} to {destination}: {}\n",
        plan.route.join(ARROW)
    ));
    out.push_str(&format!(
        "Distance: {} km, Duration: {} minutes\n",
        plan.total_distance_km, plan.total_duration_min
    ));
    out.push_str("Trip requested: your driver will arrive in a few minutes\n");
    out.push_str(&format!("Payment method: {payment}"));
    out
}

pub fn render_components(components: &[Vec<String>], undirected: bool) -> String {
    let mut out = String::new();
    out.push_str(if undirected {
        "Undirected components:"
    } else {
        "Reachability partition:"
    });
    for component in components {
        out.push_str(&format!("\nComponent: {}", component.join(ARROW)));
    }
    out
}

pub fn render_locations(map: &RouteMap) -> String {
    let mut lines = Vec::with_capacity(map.location_count());
    for location in map.locations() {
        lines.push(format!("{:>3}  {}", location.id.index(), location.name));
        for route in map.routes_from(location.id) {
            lines.push(format!(
                "       -> {} ({} km)",
                map.name(route.to).unwrap_or("?"),
                route.distance_km
            ));
        }
    }
    lines.join("\n")
}

use crate::error::{Error, Result};
use crate::graph::Vertex;
use crate::traversal::RoutingTable;

/// Rebuild the route from `source` to `target` by following predecessors.
///
/// The returned sequence starts at `source` and ends at `target`, both
/// inclusive. A table whose chain from `target` does not reach `source`
/// within `routing_table.len()` hops is reported as corrupt instead of being
/// followed forever.
pub fn find_route(
    routing_table: &RoutingTable,
    source: Vertex,
    target: Vertex,
) -> Result<Vec<Vertex>> {
    if !routing_table.contains_key(&target) {
        return Err(Error::TargetNotReached { target });
    }

    let corrupt = || Error::CorruptRoutingTable {
        start: source,
        target,
    };

    let mut route = vec![target];
    let mut current = target;
    while current != source {
        if route.len() > routing_table.len() {
            return Err(corrupt());
        }
        current = match routing_table.get(&current) {
            Some(Some(predecessor)) => *predecessor,
            _ => return Err(corrupt()),
        };
        route.push(current);
    }

    route.reverse();
    Ok(route)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(entries: &[(Vertex, Option<Vertex>)]) -> RoutingTable {
        entries.iter().copied().collect()
    }

    #[test]
    fn follows_predecessors_back_to_source() {
        let routing = table(&[(0, None), (1, Some(0)), (4, Some(1)), (5, Some(4))]);
        assert_eq!(find_route(&routing, 0, 5).unwrap(), vec![0, 1, 4, 5]);
        assert_eq!(find_route(&routing, 0, 0).unwrap(), vec![0]);
    }

    #[test]
    fn missing_target_is_rejected() {
        let routing = table(&[(0, None), (1, Some(0))]);
        assert!(matches!(
            find_route(&routing, 0, 7),
            Err(Error::TargetNotReached { target: 7 })
        ));
    }

    #[test]
    fn cycle_is_detected() {
        let routing = table(&[(0, None), (1, Some(2)), (2, Some(1))]);
        assert!(matches!(
            find_route(&routing, 0, 1),
            Err(Error::CorruptRoutingTable { start: 0, target: 1 })
        ));
    }

    #[test]
    fn chain_ending_at_another_root_is_rejected() {
        // Routing table built from source 3, queried as if from source 0.
        let routing = table(&[(3, None), (4, Some(3))]);
        assert!(matches!(
            find_route(&routing, 0, 4),
            Err(Error::CorruptRoutingTable { .. })
        ));
    }

    #[test]
    fn dangling_predecessor_is_rejected() {
        let routing = table(&[(0, None), (2, Some(9))]);
        assert!(matches!(
            find_route(&routing, 0, 2),
            Err(Error::CorruptRoutingTable { .. })
        ));
    }
}

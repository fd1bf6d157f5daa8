use std::collections::{HashSet, VecDeque};

use crate::graph::{Edge, NodeId};

/// Nodes reachable from an anchor, split by traversal depth.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Connections {
    /// One hop from the anchor, in discovery order.
    pub direct: Vec<NodeId>,
    /// Two or more hops from the anchor, in discovery order.
    pub indirect: Vec<NodeId>,
}

impl Connections {
    pub fn reachable(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.direct.iter().chain(self.indirect.iter()).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.direct.is_empty() && self.indirect.is_empty()
    }
}

/// Breadth-first search over `edges` treated as undirected. The anchor itself
/// is never reported.
pub fn find_connections(start: NodeId, edges: &[Edge]) -> Connections {
    let mut connections = Connections::default();
    let mut queue = VecDeque::from([(start, 0usize)]);
    let mut visited = HashSet::from([start]);

    while let Some((node, depth)) = queue.pop_front() {
        for next in edges.iter().filter_map(|edge| edge.other_end(node)) {
            if !visited.insert(next) {
                continue;
            }

            if depth == 0 {
                connections.direct.push(next);
            } else {
                connections.indirect.push(next);
            }
            queue.push_back((next, depth + 1));
        }
    }

    connections
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::find_connections;
    use crate::graph::{Edge, LinkType};

    fn edges(pairs: &[(usize, usize)]) -> Vec<Edge> {
        pairs
            .iter()
            .map(|&(source, target)| Edge {
                source,
                target,
                link_type: LinkType::Other,
                count: 0,
            })
            .collect()
    }

    fn set(ids: &[usize]) -> HashSet<usize> {
        ids.iter().copied().collect()
    }

    #[test]
    fn chain_splits_direct_and_indirect() {
        let chain = edges(&[(0, 1), (1, 2), (2, 3)]);
        let found = find_connections(0, &chain);
        assert_eq!(found.direct, vec![1]);
        assert_eq!(found.indirect.iter().copied().collect::<HashSet<_>>(), set(&[2, 3]));
    }

    #[test]
    fn traversal_ignores_edge_direction() {
        let reversed = edges(&[(1, 0), (2, 1), (3, 2)]);
        let found = find_connections(0, &reversed);
        assert_eq!(found.direct, vec![1]);
        assert_eq!(found.indirect, vec![2, 3]);
    }

    #[test]
    fn isolated_node_has_no_connections() {
        let graph = edges(&[(0, 1), (1, 2)]);
        let found = find_connections(7, &graph);
        assert!(found.is_empty());
    }

    #[test]
    fn unreachable_nodes_are_absent() {
        let graph = edges(&[(0, 1), (2, 3)]);
        let found = find_connections(0, &graph);
        assert_eq!(found.reachable().collect::<HashSet<_>>(), set(&[1]));
    }

    #[test]
    fn self_loops_and_cycles_terminate() {
        let graph = edges(&[(0, 0), (0, 1), (1, 2), (2, 0), (2, 2)]);
        let found = find_connections(0, &graph);
        assert_eq!(found.direct.iter().copied().collect::<HashSet<_>>(), set(&[1, 2]));
        assert!(found.indirect.is_empty());
    }

    #[test]
    fn node_reachable_at_two_depths_is_classified_once_as_direct() {
        let graph = edges(&[(0, 1), (1, 2), (0, 2)]);
        let found = find_connections(0, &graph);
        assert_eq!(found.direct, vec![1, 2]);
        assert!(found.indirect.is_empty());
    }
}

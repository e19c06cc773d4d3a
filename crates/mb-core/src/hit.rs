//! Hit testing: point → drop-target container.
//!
//! Used while dragging a node over the board to decide which container it
//! would land in. Overlapping containers resolve to the deepest one.

use crate::geometry::{content_bounds, node_size};
use crate::hierarchy::Forest;
use crate::id::NodeId;
use crate::model::{Node, Point};
use std::collections::HashSet;

/// Find the container whose content rectangle contains `point`.
///
/// Hidden nodes, the dragged node, and its descendants are skipped (a node
/// cannot be dropped into itself). The deepest container wins; equal depths
/// resolve to the first match in `nodes` order. Returns `None` for the
/// bare canvas.
pub fn drop_target(point: Point, nodes: &[Node], dragged: Option<NodeId>) -> Option<NodeId> {
    let forest = Forest::new(nodes);
    let excluded: HashSet<NodeId> = match dragged {
        Some(id) => {
            let mut set = forest.descendants(&[id]);
            set.insert(id);
            set
        }
        None => HashSet::new(),
    };

    let mut best: Option<(usize, NodeId)> = None;
    for (i, node) in nodes.iter().enumerate() {
        if node.hidden || !node.kind.is_container() || excluded.contains(&node.id) {
            continue;
        }
        if !content_bounds(forest.origin(i), node_size(node)).contains(point) {
            continue;
        }
        let d = forest.depth(i);
        if best.is_none_or(|(best_depth, _)| d > best_depth) {
            best = Some((d, node.id));
        }
    }
    best.map(|(_, id)| id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::NodeKind;

    fn board() -> Vec<Node> {
        let dash = NodeId::intern("hit_dash");
        vec![
            Node::new(dash, NodeKind::Dashboard).sized(1000.0, 800.0),
            Node::new(NodeId::intern("hit_viz"), NodeKind::Visualization)
                .at(100.0, 100.0)
                .sized(400.0, 300.0)
                .in_parent(dash),
            Node::new(NodeId::intern("hit_legend"), NodeKind::Legend)
                .at(600.0, 100.0)
                .in_parent(dash),
        ]
    }

    #[test]
    fn deepest_container_wins() {
        let nodes = board();
        let hit = drop_target(Point::new(250.0, 250.0), &nodes, None);
        assert_eq!(hit, Some(NodeId::intern("hit_viz")));
    }

    #[test]
    fn leaf_kinds_are_not_targets() {
        let nodes = board();
        let hit = drop_target(Point::new(650.0, 150.0), &nodes, None);
        assert_eq!(hit, Some(NodeId::intern("hit_dash")));
    }

    #[test]
    fn canvas_miss() {
        let nodes = board();
        assert_eq!(drop_target(Point::new(2000.0, 10.0), &nodes, None), None);
    }

    #[test]
    fn dragged_subtree_is_excluded() {
        let nodes = board();
        let hit = drop_target(
            Point::new(250.0, 250.0),
            &nodes,
            Some(NodeId::intern("hit_viz")),
        );
        assert_eq!(hit, Some(NodeId::intern("hit_dash")));
    }

    #[test]
    fn equal_depth_overlap_takes_first_in_order() {
        let nodes = vec![
            Node::new(NodeId::intern("hit_tie_a"), NodeKind::Tooltip).sized(300.0, 300.0),
            Node::new(NodeId::intern("hit_tie_b"), NodeKind::Tooltip)
                .at(50.0, 50.0)
                .sized(300.0, 300.0),
        ];
        let hit = drop_target(Point::new(150.0, 150.0), &nodes, None);
        assert_eq!(hit, Some(NodeId::intern("hit_tie_a")));
    }

    #[test]
    fn cyclic_links_hit_where_they_are_drawn() {
        // b -> a closes the cycle and is cut, so b sits at its own (0, 0) and
        // a is nested inside it at (10, 40).
        let a = NodeId::intern("hit_cyc_a");
        let b = NodeId::intern("hit_cyc_b");
        let nodes = vec![
            Node::new(a, NodeKind::Tooltip)
                .at(10.0, 40.0)
                .sized(250.0, 180.0)
                .in_parent(b),
            Node::new(b, NodeKind::Visualization)
                .sized(600.0, 400.0)
                .in_parent(a),
        ];
        assert_eq!(drop_target(Point::new(100.0, 150.0), &nodes, None), Some(a));
        assert_eq!(drop_target(Point::new(400.0, 300.0), &nodes, None), Some(b));
    }
}

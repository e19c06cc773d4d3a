//! Containment layout solver.
//!
//! Keeps every child inside its container's content rectangle and grows
//! containers to enclose their children. Containers never shrink here.
//! Runs as a bounded fixed-point relaxation: containers are settled
//! children-before-parents, and passes repeat until nothing moves or the
//! pass budget is spent.

use crate::geometry::{CONTENT_TOP, PAD_BOTTOM, PAD_X, content_rect};
use crate::hierarchy::{children_of, effective_parents, layout_order};
use crate::model::{GraphType, Node, NodeKind, Size};
use smallvec::SmallVec;

/// Upper bound on relaxation passes.
pub const MAX_LAYOUT_PASSES: usize = 5;

/// Return `nodes` corrected so the containment and auto-grow invariants hold.
///
/// Idempotent: feeding the result back in returns it unchanged. Dangling and
/// cyclic parent links are treated as absent.
#[must_use]
pub fn apply_layout_constraints(nodes: &[Node]) -> Vec<Node> {
    let mut out = nodes.to_vec();
    let parents = effective_parents(&out);
    let children = children_of(&parents);
    let containers: Vec<usize> = layout_order(&parents)
        .into_iter()
        .filter(|&i| out[i].kind.is_container())
        .collect();

    let mut passes = 0;
    for _ in 0..MAX_LAYOUT_PASSES {
        passes += 1;
        let mut changed = false;
        for &container in &containers {
            changed |= settle_container(&mut out, container, &children[container]);
        }
        if !changed {
            break;
        }
    }
    log::debug!(
        "layout: {} nodes, {} containers, settled in {passes} pass(es)",
        out.len(),
        containers.len()
    );

    sync_graph_types_with(&mut out, &children);
    out
}

/// Clamp one container's children and grow it to fit them.
/// Returns true if any position or size changed.
fn settle_container(nodes: &mut [Node], container: usize, children: &[usize]) -> bool {
    let current = nodes[container].resolved_size();
    let min = nodes[container].kind.min_size();

    // Children may sit no further up/left than the content origin; the far
    // edges are satisfied by growing the container instead.
    let mut required_right: f32 = 0.0;
    let mut required_bottom: f32 = 0.0;
    for &child in children {
        let node = &nodes[child];
        let size = node.resolved_size();
        required_right = required_right.max(node.position.x.max(PAD_X) + size.width);
        required_bottom = required_bottom.max(node.position.y.max(CONTENT_TOP) + size.height);
    }

    let grown = Size::new(
        current
            .width
            .max(required_right + PAD_X)
            .max(min.width),
        current
            .height
            .max(required_bottom + PAD_BOTTOM)
            .max(min.height),
    );

    let mut changed = false;
    if grown != current {
        log::trace!(
            "layout: grow {} {}x{} -> {}x{}",
            nodes[container].id,
            current.width,
            current.height,
            grown.width,
            grown.height
        );
        nodes[container].size = Some(grown);
        changed = true;
    }

    let content = content_rect(grown);
    for &child in children {
        let node = &mut nodes[child];
        let size = node.resolved_size();
        let x = clamp_span(node.position.x, content.x, content.right(), size.width);
        let y = clamp_span(node.position.y, content.y, content.bottom(), size.height);
        if x != node.position.x || y != node.position.y {
            node.position.x = x;
            node.position.y = y;
            changed = true;
        }
    }
    changed
}

/// Clamp a box start so `[start, start + extent]` fits in `[lo, hi]`.
/// An oversized box is pinned to `lo`.
fn clamp_span(start: f32, lo: f32, hi: f32, extent: f32) -> f32 {
    let max = (hi - extent).max(lo);
    start.max(lo).min(max)
}

// ─── Graph-type badges ───────────────────────────────────────────────────

/// Recompute each Visualization/Tooltip's contained graph types from its
/// direct Graph children. Every other node gets an empty list.
#[must_use]
pub fn sync_graph_types(nodes: &[Node]) -> Vec<Node> {
    let mut out = nodes.to_vec();
    let children = children_of(&effective_parents(&out));
    sync_graph_types_with(&mut out, &children);
    out
}

fn sync_graph_types_with(nodes: &mut [Node], children: &[Vec<usize>]) {
    for i in 0..nodes.len() {
        let mut types: SmallVec<[GraphType; 4]> = SmallVec::new();
        if nodes[i].kind.shows_graph_types() {
            for &child in &children[i] {
                let child = &nodes[child];
                if child.kind == NodeKind::Graph
                    && let Some(t) = child.graph_type
                    && !types.contains(&t)
                {
                    types.push(t);
                }
            }
        }
        nodes[i].graph_types = types;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::id::NodeId;
    use crate::model::Point;
    use pretty_assertions::assert_eq;

    #[test]
    fn clamp_span_pins_oversized_box() {
        assert_eq!(clamp_span(50.0, 5.0, 100.0, 20.0), 50.0);
        assert_eq!(clamp_span(-10.0, 5.0, 100.0, 20.0), 5.0);
        assert_eq!(clamp_span(95.0, 5.0, 100.0, 20.0), 80.0);
        assert_eq!(clamp_span(40.0, 5.0, 100.0, 200.0), 5.0);
    }

    #[test]
    fn unparented_nodes_are_never_moved() {
        let nodes = vec![
            Node::new(NodeId::intern("l_free_btn"), NodeKind::Button).at(-40.0, -12.0),
        ];
        let out = apply_layout_constraints(&nodes);
        assert_eq!(out[0].position, Point::new(-40.0, -12.0));
        assert_eq!(out[0].size, None);
    }

    #[test]
    fn empty_container_enforces_kind_minimum() {
        let nodes = vec![Node::new(NodeId::intern("l_tiny"), NodeKind::Tooltip).sized(40.0, 40.0)];
        let out = apply_layout_constraints(&nodes);
        assert_eq!(out[0].size, Some(Size::new(250.0, 180.0)));
    }

    #[test]
    fn child_pushed_below_header() {
        let dash = NodeId::intern("l_hdr_dash");
        let nodes = vec![
            Node::new(dash, NodeKind::Dashboard).sized(600.0, 400.0),
            Node::new(NodeId::intern("l_hdr_btn"), NodeKind::Button)
                .at(-3.0, 2.0)
                .in_parent(dash),
        ];
        let out = apply_layout_constraints(&nodes);
        assert_eq!(out[1].position, Point::new(PAD_X, CONTENT_TOP));
        assert_eq!(out[0].size, Some(Size::new(600.0, 400.0)));
    }

    #[test]
    fn graph_types_follow_direct_children() {
        let viz = NodeId::intern("l_gt_viz");
        let nodes = vec![
            Node::new(viz, NodeKind::Visualization),
            Node::new(NodeId::intern("l_gt_a"), NodeKind::Graph)
                .in_parent(viz)
                .with_graph_type(GraphType::Line),
            Node::new(NodeId::intern("l_gt_b"), NodeKind::Graph)
                .in_parent(viz)
                .with_graph_type(GraphType::Bar),
            Node::new(NodeId::intern("l_gt_c"), NodeKind::Graph)
                .in_parent(viz)
                .with_graph_type(GraphType::Line),
            Node::new(NodeId::intern("l_gt_legend"), NodeKind::Legend).in_parent(viz),
        ];
        let out = sync_graph_types(&nodes);
        assert_eq!(out[0].graph_types.as_slice(), &[GraphType::Line, GraphType::Bar]);
        assert!(out[1].graph_types.is_empty());
    }

    #[test]
    fn dashboard_does_not_show_graph_types() {
        let dash = NodeId::intern("l_gt_dash");
        let mut stale = Node::new(dash, NodeKind::Dashboard);
        stale.graph_types.push(GraphType::Pie);
        let nodes = vec![
            stale,
            Node::new(NodeId::intern("l_gt_pie"), NodeKind::Graph)
                .in_parent(dash)
                .with_graph_type(GraphType::Pie),
        ];
        let out = sync_graph_types(&nodes);
        assert!(out[0].graph_types.is_empty());
    }
}

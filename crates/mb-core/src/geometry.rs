//! Node geometry: sizes, absolute positions, depth, and content rectangles.
//!
//! Every container reserves a header strip and fixed padding; children live
//! in what remains (the content rectangle). The same constants drive the
//! layout solver and drop-target detection.

use crate::hierarchy::Forest;
use crate::model::{Node, NodeKind, Point, Rect, Size};

/// Left and right content padding.
pub const PAD_X: f32 = 5.0;
/// Height of a container's title header.
pub const HEADER_H: f32 = 23.0;
/// Gap between the header and the content area.
pub const PAD_TOP: f32 = 17.0;
/// Bottom content padding.
pub const PAD_BOTTOM: f32 = 28.0;
/// Local y of the content rectangle's top edge.
pub const CONTENT_TOP: f32 = HEADER_H + PAD_TOP;

pub fn is_container_kind(kind: NodeKind) -> bool {
    kind.is_container()
}

/// Explicit size, or the kind default.
pub fn node_size(node: &Node) -> Size {
    node.resolved_size()
}

/// Canvas-absolute position: `position` summed up the parent chain.
///
/// Chains follow the sanitized forest, so a cycle-closing link contributes
/// nothing. Callers resolving many nodes should build one [`Forest`].
pub fn absolute_position(node: &Node, all: &[Node]) -> Point {
    Forest::new(all).absolute_position(node)
}

/// Canvas-absolute bounding box.
pub fn absolute_bounds(node: &Node, all: &[Node]) -> Rect {
    Rect::from_origin_size(absolute_position(node, all), node_size(node))
}

/// Number of ancestors.
pub fn depth(node: &Node, all: &[Node]) -> usize {
    let forest = Forest::new(all);
    forest.locate(node).map_or(0, |i| forest.depth(i))
}

/// Content rectangle in the container's local coordinates.
///
/// Degenerate sizes yield a zero-extent rectangle pinned at the content
/// origin rather than a negative one.
pub fn content_rect(size: Size) -> Rect {
    let right = (size.width - PAD_X).max(PAD_X);
    let bottom = (size.height - PAD_BOTTOM).max(CONTENT_TOP);
    Rect::new(PAD_X, CONTENT_TOP, right - PAD_X, bottom - CONTENT_TOP)
}

/// Content rectangle in canvas coordinates for a node at `origin`.
pub fn content_bounds(origin: Point, size: Size) -> Rect {
    let local = content_rect(size);
    Rect::new(origin.x + local.x, origin.y + local.y, local.width, local.height)
}

/// Whether an absolute point lies inside `node`'s content rectangle.
pub fn point_inside_content(point: Point, node: &Node, all: &[Node]) -> bool {
    content_bounds(absolute_position(node, all), node_size(node)).contains(point)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::id::NodeId;
    use pretty_assertions::assert_eq;

    fn nested() -> Vec<Node> {
        let dash = NodeId::intern("g_dash");
        let viz = NodeId::intern("g_viz");
        vec![
            Node::new(dash, NodeKind::Dashboard).at(100.0, 50.0).sized(800.0, 600.0),
            Node::new(viz, NodeKind::Visualization)
                .at(20.0, 60.0)
                .in_parent(dash),
            Node::new(NodeId::intern("g_bar"), NodeKind::Graph)
                .at(10.0, 45.0)
                .in_parent(viz),
        ]
    }

    #[test]
    fn absolute_position_sums_chain() {
        let all = nested();
        assert_eq!(absolute_position(&all[2], &all), Point::new(130.0, 155.0));
        assert_eq!(absolute_position(&all[0], &all), Point::new(100.0, 50.0));
    }

    #[test]
    fn absolute_position_survives_cycles_and_dangling() {
        let a = NodeId::intern("g_cyc_a");
        let b = NodeId::intern("g_cyc_b");
        let all = vec![
            Node::new(a, NodeKind::Dashboard).at(1.0, 1.0).in_parent(b),
            Node::new(b, NodeKind::Dashboard).at(10.0, 10.0).in_parent(a),
            Node::new(NodeId::intern("g_orphan"), NodeKind::Legend)
                .at(5.0, 7.0)
                .in_parent(NodeId::intern("g_nowhere")),
        ];
        // b -> a closes the cycle and is cut: b is a root, a sits inside it.
        assert_eq!(absolute_position(&all[0], &all), Point::new(11.0, 11.0));
        assert_eq!(absolute_position(&all[1], &all), Point::new(10.0, 10.0));
        assert_eq!(depth(&all[0], &all), 1);
        assert_eq!(depth(&all[1], &all), 0);
        assert_eq!(absolute_position(&all[2], &all), Point::new(5.0, 7.0));
        assert_eq!(depth(&all[2], &all), 0);
    }

    #[test]
    fn depth_counts_ancestors() {
        let all = nested();
        assert_eq!(depth(&all[0], &all), 0);
        assert_eq!(depth(&all[1], &all), 1);
        assert_eq!(depth(&all[2], &all), 2);
    }

    #[test]
    fn content_rect_subtracts_header_and_padding() {
        let r = content_rect(Size::new(320.0, 200.0));
        assert_eq!(r, Rect::new(5.0, 40.0, 310.0, 132.0));
        let degenerate = content_rect(Size::new(4.0, 10.0));
        assert_eq!(degenerate.width, 0.0);
        assert_eq!(degenerate.height, 0.0);
    }

    #[test]
    fn point_inside_content_respects_header() {
        let all = nested();
        let dash = &all[0];
        // Inside the header strip: not content.
        assert!(!point_inside_content(Point::new(300.0, 60.0), dash, &all));
        assert!(point_inside_content(Point::new(300.0, 90.0), dash, &all));
        assert!(point_inside_content(Point::new(105.0, 622.0), dash, &all));
        assert!(!point_inside_content(Point::new(104.0, 300.0), dash, &all));
        assert!(!point_inside_content(Point::new(300.0, 623.0), dash, &all));
    }
}

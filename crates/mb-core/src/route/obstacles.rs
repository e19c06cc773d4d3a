//! Obstacle rectangles and axis-aligned segment tests.

use crate::hierarchy::Forest;
use crate::id::NodeId;
use crate::model::{Node, Rect};
use std::collections::HashSet;

/// Margin added around every node when it becomes an obstacle.
pub const OBSTACLE_MARGIN: f32 = 8.0;

/// Build the obstacle set for a connector between `endpoints`.
///
/// Every visible node becomes an inflated rectangle except the endpoints,
/// their ancestors (which enclose the connector's own anchors) and their
/// descendants (which sit inside the endpoint boxes).
pub fn collect_obstacles(nodes: &[Node], endpoints: &[NodeId], margin: f32) -> Vec<Rect> {
    collect_obstacles_in(&Forest::new(nodes), endpoints, margin)
}

/// [`collect_obstacles`] against a prebuilt forest.
pub fn collect_obstacles_in(forest: &Forest<'_>, endpoints: &[NodeId], margin: f32) -> Vec<Rect> {
    let nodes = forest.nodes();
    let mut skip: HashSet<NodeId> = endpoints.iter().copied().collect();
    for i in endpoints.iter().filter_map(|&id| forest.index_of(id)) {
        skip.extend(forest.ancestors(i).map(|a| nodes[a].id));
    }
    skip.extend(forest.descendants(endpoints));

    nodes
        .iter()
        .enumerate()
        .filter(|(_, n)| !n.hidden && !skip.contains(&n.id))
        .map(|(i, _)| forest.bounds(i).inflate(margin))
        .collect()
}

/// Horizontal or vertical segment. Diagonals never occur in routed paths.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Segment {
    Horizontal { y: f32, x0: f32, x1: f32 },
    Vertical { x: f32, y0: f32, y1: f32 },
}

impl Segment {
    pub fn horizontal(y: f32, x0: f32, x1: f32) -> Self {
        Segment::Horizontal { y, x0, x1 }
    }

    pub fn vertical(x: f32, y0: f32, y1: f32) -> Self {
        Segment::Vertical { x, y0, y1 }
    }

    /// The fixed coordinate lies within the rectangle's span on its axis and
    /// the variable range overlaps the span on the other axis. Inclusive.
    pub fn intersects(&self, r: &Rect) -> bool {
        match *self {
            Segment::Horizontal { y, x0, x1 } => {
                y >= r.y && y <= r.bottom() && x0.min(x1) <= r.right() && x0.max(x1) >= r.x
            }
            Segment::Vertical { x, y0, y1 } => {
                x >= r.x && x <= r.right() && y0.min(y1) <= r.bottom() && y0.max(y1) >= r.y
            }
        }
    }
}

/// First obstacle (in slice order) the segment crosses.
pub fn first_blocking<'a>(obstacles: &'a [Rect], segment: &Segment) -> Option<&'a Rect> {
    obstacles.iter().find(|r| segment.intersects(r))
}

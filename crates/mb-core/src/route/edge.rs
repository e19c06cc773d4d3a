//! Edge-level routing: anchors, fan-out slots, obstacle sets, and the final
//! path for each tooltip/interaction edge on the board.

use super::obstacles::{OBSTACLE_MARGIN, collect_obstacles_in};
use super::path::rounded_svg_path;
use super::{RouteOptions, Waypoints, route_orthogonal};
use crate::hierarchy::Forest;
use crate::id::NodeId;
use crate::model::{Edge, EdgeKind, Node, Point, Rect, Side};
use serde::Serialize;

/// Geometry for one edge, ready for the rendering layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoutedEdge {
    pub id: NodeId,
    pub kind: EdgeKind,
    pub source: Point,
    pub target: Point,
    pub side: Side,
    pub waypoints: Waypoints,
    pub points: Vec<Point>,
    /// SVG path data with rounded elbows.
    pub path: String,
}

/// Base constants for an edge kind.
pub fn options_for(kind: EdgeKind) -> RouteOptions {
    match kind {
        EdgeKind::Interaction => RouteOptions::interaction(),
        EdgeKind::Tooltip | EdgeKind::Containment => RouteOptions::tooltip(),
    }
}

/// `(ordinal, siblings)` for an edge among connectors leaving the same source.
///
/// Host-supplied `data.ordinal`/`data.siblings` win. Otherwise routed edges
/// of the same kind sharing the source are counted in slice order.
pub fn fan_out_slot(edge: &Edge, edges: &[Edge]) -> (u32, u32) {
    if let (Some(ordinal), Some(siblings)) = (edge.data.ordinal, edge.data.siblings) {
        return (ordinal, siblings.max(1));
    }
    let mut ordinal = 0;
    let mut count = 0;
    for e in edges
        .iter()
        .filter(|e| e.is_routed() && e.source == edge.source && e.kind == edge.kind)
    {
        if e.id == edge.id {
            ordinal = count;
        }
        count += 1;
    }
    (ordinal, count.max(1))
}

/// Side of `bounds` whose edge midpoint is closer to `toward`.
fn closer_side(bounds: &Rect, toward: Point) -> Side {
    let cy = bounds.y + bounds.height / 2.0;
    let left = (bounds.x - toward.x).hypot(cy - toward.y);
    let right = (bounds.right() - toward.x).hypot(cy - toward.y);
    if right <= left { Side::Right } else { Side::Left }
}

/// Anchor on the given vertical edge of `bounds`, at a handle's offset when
/// one is named and known, else at mid-height.
fn anchor(node: &Node, bounds: &Rect, side: Side, handle: Option<NodeId>) -> Point {
    let x = match side {
        Side::Left => bounds.x,
        Side::Right => bounds.right(),
    };
    let y = handle
        .and_then(|h| node.handle(h))
        .map(|h| bounds.y + h.offset_y)
        .unwrap_or(bounds.y + bounds.height / 2.0);
    Point::new(x, y)
}

/// Route one edge against the live node set.
///
/// Returns `None` for containment edges and for edges whose endpoints are
/// missing or hidden.
pub fn route_edge(edge: &Edge, nodes: &[Node], edges: &[Edge]) -> Option<RoutedEdge> {
    route_edge_in(&Forest::new(nodes), edge, edges)
}

fn route_edge_in(forest: &Forest<'_>, edge: &Edge, edges: &[Edge]) -> Option<RoutedEdge> {
    if !edge.is_routed() {
        return None;
    }
    let (Some(si), Some(ti)) = (forest.index_of(edge.source), forest.index_of(edge.target)) else {
        log::debug!("route: edge {} has a missing endpoint", edge.id);
        return None;
    };
    let (source, target) = (&forest.nodes()[si], &forest.nodes()[ti]);
    if source.hidden || target.hidden {
        return None;
    }

    let source_bounds = forest.bounds(si);
    let target_bounds = forest.bounds(ti);
    let side = edge
        .data
        .side
        .unwrap_or_else(|| closer_side(&source_bounds, target_bounds.center()));
    let base = options_for(edge.kind);
    let source_pt = anchor(source, &source_bounds, side, edge.source_handle);

    // Enter the target on the face that looks back at the away point.
    let away_x = source_pt.x + side.sign() * (base.exit_gap + base.h_gap);
    let target_side = if target_bounds.center().x >= away_x {
        Side::Left
    } else {
        Side::Right
    };
    let target_pt = anchor(target, &target_bounds, target_side, edge.target_handle);

    let (ordinal, siblings) = fan_out_slot(edge, edges);
    let options = base
        .with_side(side)
        .with_fan_out(ordinal, siblings)
        .with_target_half_height(target_bounds.height / 2.0)
        .with_obstacles(collect_obstacles_in(
            forest,
            &[edge.source, edge.target],
            OBSTACLE_MARGIN,
        ));

    let waypoints = route_orthogonal(source_pt, target_pt, &options);
    let points = waypoints.points(source_pt, target_pt);
    let path = rounded_svg_path(&points, options.corner_radius);

    Some(RoutedEdge {
        id: edge.id,
        kind: edge.kind,
        source: source_pt,
        target: target_pt,
        side,
        waypoints,
        points,
        path,
    })
}

/// Route every drawable edge, preserving `edges` order.
///
/// Positions are resolved once for the whole pass.
pub fn route_edges(nodes: &[Node], edges: &[Edge]) -> Vec<RoutedEdge> {
    let forest = Forest::new(nodes);
    edges
        .iter()
        .filter_map(|edge| route_edge_in(&forest, edge, edges))
        .collect()
}

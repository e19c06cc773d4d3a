//! Orthogonal obstacle router for tooltip and interaction connectors.
//!
//! A routed connector leaves its source horizontally, steps away from the
//! source, travels along a horizontal corridor that clears the target's box,
//! drops down a vertical approach column, and enters the target
//! horizontally:
//!
//! ```text
//! source ─ exit ─ away
//!                  │
//!                  └──── corridor ────┐ approach
//!                                     └─ target
//! ```
//!
//! Obstacle avoidance only ever moves the corridor (up/down) and the approach
//! column (left/right), each with a hard retry cap, so routing always
//! terminates and always returns a drawable path.

pub mod edge;
pub mod obstacles;
pub mod path;

use crate::model::{Point, Rect, Side};
use obstacles::{Segment, first_blocking};
use serde::{Deserialize, Serialize};

pub use edge::{RoutedEdge, fan_out_slot, route_edge, route_edges};
pub use obstacles::{OBSTACLE_MARGIN, collect_obstacles, collect_obstacles_in};
pub use path::{compress_path, rounded_path, rounded_svg_path};

/// Horizontal run from the source anchor to the exit point.
pub const EXIT_GAP: f32 = 12.0;
/// Extra horizontal step before the path turns toward the corridor.
pub const H_GAP: f32 = 18.0;
pub const CORNER_RADIUS: f32 = 8.0;
pub const TOOLTIP_APPROACH_GAP: f32 = 12.0;
pub const INTERACTION_APPROACH_GAP: f32 = 28.0;
/// Gap kept between a tooltip corridor and the tooltip's box.
pub const TOOLTIP_TARGET_MARGIN: f32 = 12.0;
/// Vertical spacing between connectors fanning out of one source.
pub const FAN_OUT_SPACING: f32 = 18.0;
/// Distance a bumped corridor or column keeps from the blocking rectangle.
pub const OBSTACLE_CLEARANCE: f32 = 6.0;
/// Bump attempts per segment before the best effort is accepted.
pub const MAX_ROUTE_RETRIES: usize = 20;

/// Geometry knobs for one routing call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RouteOptions {
    pub side: Side,
    pub exit_gap: f32,
    pub h_gap: f32,
    pub approach_gap: f32,
    pub corner_radius: f32,
    /// Half the target box height; corridors clear the whole box.
    pub target_half_height: f32,
    pub target_margin: f32,
    pub ordinal: u32,
    pub siblings: u32,
    pub obstacles: Vec<Rect>,
}

impl Default for RouteOptions {
    fn default() -> Self {
        Self::tooltip()
    }
}

impl RouteOptions {
    /// Constants for Visualization → Tooltip connectors.
    pub fn tooltip() -> Self {
        Self {
            side: Side::Right,
            exit_gap: EXIT_GAP,
            h_gap: H_GAP,
            approach_gap: TOOLTIP_APPROACH_GAP,
            corner_radius: CORNER_RADIUS,
            target_half_height: 0.0,
            target_margin: TOOLTIP_TARGET_MARGIN,
            ordinal: 0,
            siblings: 1,
            obstacles: Vec::new(),
        }
    }

    /// Constants for generic interaction links.
    pub fn interaction() -> Self {
        Self {
            approach_gap: INTERACTION_APPROACH_GAP,
            target_margin: 0.0,
            ..Self::tooltip()
        }
    }

    pub fn with_side(mut self, side: Side) -> Self {
        self.side = side;
        self
    }

    pub fn with_fan_out(mut self, ordinal: u32, siblings: u32) -> Self {
        self.ordinal = ordinal;
        self.siblings = siblings;
        self
    }

    pub fn with_target_half_height(mut self, half_height: f32) -> Self {
        self.target_half_height = half_height;
        self
    }

    pub fn with_target_margin(mut self, margin: f32) -> Self {
        self.target_margin = margin;
        self
    }

    pub fn with_obstacles(mut self, obstacles: Vec<Rect>) -> Self {
        self.obstacles = obstacles;
        self
    }
}

/// Vertical exit offset for slot `ordinal` of `siblings` parallel connectors,
/// centered on the source anchor.
pub fn fan_out_offset(ordinal: u32, siblings: u32) -> f32 {
    let siblings = siblings.max(1);
    (ordinal as f32 - (siblings - 1) as f32 / 2.0) * FAN_OUT_SPACING
}

/// The variable coordinates of a routed connector.
///
/// Together with the source and target anchors these fully determine the
/// polyline; see [`Waypoints::points`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Waypoints {
    pub exit_x: f32,
    pub exit_y: f32,
    pub away_x: f32,
    pub corridor_y: f32,
    pub approach_x: f32,
}

impl Waypoints {
    /// Full orthogonal polyline from `source` to `target`, without duplicate
    /// or collinear points.
    pub fn points(&self, source: Point, target: Point) -> Vec<Point> {
        compress_path(&[
            source,
            Point::new(self.exit_x, source.y),
            Point::new(self.exit_x, self.exit_y),
            Point::new(self.away_x, self.exit_y),
            Point::new(self.away_x, self.corridor_y),
            Point::new(self.approach_x, self.corridor_y),
            Point::new(self.approach_x, target.y),
            target,
        ])
    }
}

/// Route without looking at obstacles: the fixed above/below template.
///
/// This is the degraded mode for hosts that cannot supply live obstacle
/// data; `options.obstacles` is ignored.
pub fn route_template(source: Point, target: Point, options: &RouteOptions) -> Waypoints {
    let dir = options.side.sign();
    let exit_y = source.y + fan_out_offset(options.ordinal, options.siblings);
    let exit_x = source.x + dir * options.exit_gap;
    let away_x = exit_x + dir * options.h_gap;

    let reach = options.target_half_height + options.target_margin;
    let corridor_y = nearer(exit_y, target.y - reach, target.y + reach);

    let approach_x = if approaches_from_left(target, away_x) {
        target.x - options.approach_gap
    } else {
        target.x + options.approach_gap
    };

    Waypoints {
        exit_x,
        exit_y,
        away_x,
        corridor_y,
        approach_x,
    }
}

/// Route a connector, bumping the corridor and approach column around
/// `options.obstacles`.
///
/// Obstacles are tested in slice order; the first one crossing a segment is
/// the one avoided. After [`MAX_ROUTE_RETRIES`] bumps per segment the current
/// candidate is returned even if it still crosses something.
pub fn route_orthogonal(source: Point, target: Point, options: &RouteOptions) -> Waypoints {
    let mut wp = route_template(source, target, options);
    if options.obstacles.is_empty() {
        return wp;
    }
    let from_left = approaches_from_left(target, wp.away_x);
    let corridor_end = wp.approach_x;

    let mut settled = false;
    for _ in 0..MAX_ROUTE_RETRIES {
        let run = Segment::horizontal(wp.corridor_y, wp.away_x, corridor_end);
        let Some(block) = first_blocking(&options.obstacles, &run) else {
            settled = true;
            break;
        };
        wp.corridor_y = nearer(
            wp.corridor_y,
            block.y - OBSTACLE_CLEARANCE,
            block.bottom() + OBSTACLE_CLEARANCE,
        );
    }
    if !settled {
        log::trace!("route: corridor still blocked after {MAX_ROUTE_RETRIES} bumps");
    }

    let mut settled = false;
    for _ in 0..MAX_ROUTE_RETRIES {
        let column = Segment::vertical(wp.approach_x, wp.corridor_y, target.y);
        let Some(block) = first_blocking(&options.obstacles, &column) else {
            settled = true;
            break;
        };
        wp.approach_x = if from_left {
            block.x - OBSTACLE_CLEARANCE
        } else {
            block.right() + OBSTACLE_CLEARANCE
        };
    }
    if !settled {
        log::trace!("route: approach column still blocked after {MAX_ROUTE_RETRIES} bumps");
    }

    wp
}

fn approaches_from_left(target: Point, away_x: f32) -> bool {
    target.x >= away_x
}

/// Whichever of `above`/`below` is closer to `reference`; ties go above.
fn nearer(reference: f32, above: f32, below: f32) -> f32 {
    if (above - reference).abs() <= (below - reference).abs() {
        above
    } else {
        below
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn fan_out_offsets_are_centered() {
        assert_eq!(fan_out_offset(0, 1), 0.0);
        assert_eq!(fan_out_offset(0, 2), -9.0);
        assert_eq!(fan_out_offset(1, 2), 9.0);
        assert_eq!(fan_out_offset(0, 3), -18.0);
        assert_eq!(fan_out_offset(2, 3), 18.0);
        // Zero siblings is treated as a lone connector.
        assert_eq!(fan_out_offset(0, 0), 0.0);
    }

    #[test]
    fn template_exits_toward_side() {
        let opts = RouteOptions::interaction().with_side(Side::Left);
        let wp = route_template(Point::new(500.0, 100.0), Point::new(100.0, 300.0), &opts);
        assert_eq!(wp.exit_x, 488.0);
        assert_eq!(wp.away_x, 470.0);
        assert_eq!(wp.corridor_y, 300.0);
        // Target is left of the away point: approach from its right.
        assert_eq!(wp.approach_x, 128.0);
    }

    #[test]
    fn template_picks_corridor_nearest_exit() {
        let opts = RouteOptions::tooltip().with_target_half_height(90.0);
        let src = Point::new(0.0, 0.0);
        let wp = route_template(src, Point::new(400.0, 300.0), &opts);
        assert_eq!(wp.corridor_y, 300.0 - 102.0);
        let wp = route_template(Point::new(0.0, 600.0), Point::new(400.0, 300.0), &opts);
        assert_eq!(wp.corridor_y, 300.0 + 102.0);
    }

    #[test]
    fn nearer_breaks_ties_upward() {
        assert_eq!(nearer(100.0, 74.0, 126.0), 74.0);
        assert_eq!(nearer(110.0, 74.0, 126.0), 126.0);
    }

    #[test]
    fn no_obstacles_matches_template() {
        let opts = RouteOptions::tooltip().with_target_half_height(40.0);
        let (s, t) = (Point::new(10.0, 10.0), Point::new(300.0, 220.0));
        assert_eq!(route_orthogonal(s, t, &opts), route_template(s, t, &opts));
    }

    #[test]
    fn points_drop_degenerate_corners() {
        let wp = Waypoints {
            exit_x: 112.0,
            exit_y: 100.0,
            away_x: 130.0,
            corridor_y: 100.0,
            approach_x: 388.0,
        };
        let pts = wp.points(Point::new(100.0, 100.0), Point::new(400.0, 100.0));
        assert_eq!(pts, vec![Point::new(100.0, 100.0), Point::new(400.0, 100.0)]);
    }
}

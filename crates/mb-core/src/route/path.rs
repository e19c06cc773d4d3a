//! Polyline cleanup and rounded-elbow path output.

use crate::model::Point;
use kurbo::BezPath;

/// Drop repeated points and interior points that sit on a straight run.
pub fn compress_path(points: &[Point]) -> Vec<Point> {
    let mut out: Vec<Point> = Vec::with_capacity(points.len());
    for &p in points {
        if out.last() == Some(&p) {
            continue;
        }
        if out.len() >= 2 {
            let a = out[out.len() - 2];
            let b = out[out.len() - 1];
            let straight_x = a.x == b.x && b.x == p.x;
            let straight_y = a.y == b.y && b.y == p.y;
            if straight_x || straight_y {
                out.pop();
            }
        }
        out.push(p);
    }
    out
}

fn kp(p: Point) -> kurbo::Point {
    kurbo::Point::new(f64::from(p.x), f64::from(p.y))
}

/// Straight segments joined by quadratic elbows of at most `radius`.
///
/// The radius shrinks to half of the shorter adjacent segment, so short
/// jogs (e.g. fan-out offsets) stay smooth instead of overshooting.
pub fn rounded_path(points: &[Point], radius: f32) -> BezPath {
    let mut path = BezPath::new();
    let Some(&first) = points.first() else {
        return path;
    };
    path.move_to(kp(first));

    for w in points.windows(3) {
        let (prev, corner, next) = (kp(w[0]), kp(w[1]), kp(w[2]));
        let d_in = corner - prev;
        let d_out = next - corner;
        let r = f64::from(radius)
            .min(d_in.hypot() / 2.0)
            .min(d_out.hypot() / 2.0);
        if r <= 0.0 {
            path.line_to(corner);
            continue;
        }
        path.line_to(corner - d_in.normalize() * r);
        path.quad_to(corner, corner + d_out.normalize() * r);
    }

    if let Some(&last) = points.last()
        && points.len() > 1
    {
        path.line_to(kp(last));
    }
    path
}

/// SVG `d` attribute for [`rounded_path`].
pub fn rounded_svg_path(points: &[Point], radius: f32) -> String {
    rounded_path(points, radius).to_svg()
}

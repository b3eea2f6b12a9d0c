//! Discrete shape rasterization on an integer lattice.
//!
//! Every function returns the full list of lattice points in emission order.
//! Duplicates are kept: the symmetric algorithms emit the same point more than
//! once where octants or quadrants meet, and the curve sampler revisits cells
//! between adjacent parameter steps. Nothing here fails; a degenerate input
//! (both endpoints equal) yields a single point.

use serde::{Deserialize, Serialize};

/// Default vertical lift of the synthesized Bezier control point.
pub const DEFAULT_CURVE_OFFSET: i32 = 5;

/// Number of parameter steps used by the curve sampler (t = 0.00 ..= 1.00).
const CURVE_STEPS: i32 = 100;

/// An integer lattice point. In grid contexts `x` is the row, `y` the column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn distance_to(&self, other: &Point) -> f64 {
        let dx = f64::from(self.x) - f64::from(other.x);
        let dy = f64::from(self.y) - f64::from(other.y);
        (dx * dx + dy * dy).sqrt()
    }
}

impl From<(i32, i32)> for Point {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

/// Upper bound on up-front `Vec` reservations for very long shapes.
const MAX_RESERVE: i64 = 1 << 16;

/// Narrow a wide coordinate pair back to a `Point`, `None` outside the i32 plane.
#[inline]
fn lattice((x, y): (i64, i64)) -> Option<Point> {
    Some(Point::new(i32::try_from(x).ok()?, i32::try_from(y).ok()?))
}

/// Round to nearest with ties toward positive infinity.
#[inline]
pub(crate) fn round_half_up(v: f64) -> i64 {
    (v + 0.5).floor() as i64
}

// ============================================================================
// Shape selection
// ============================================================================

/// Two-point shapes the rasterizer knows how to draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ShapeKind {
    #[default]
    Line,
    Circle,
    Ellipse,
    Curve,
}

impl ShapeKind {
    /// Resolve a textual selector. Unknown names fall back to [`ShapeKind::Line`].
    pub fn from_selector(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "line" | "bresenham" => Self::Line,
            "circle" => Self::Circle,
            "ellipse" => Self::Ellipse,
            "curve" | "bezier" => Self::Curve,
            other => {
                log::warn!("unknown shape selector {:?}, falling back to line", other);
                Self::Line
            },
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Line => "line",
            Self::Circle => "circle",
            Self::Ellipse => "ellipse",
            Self::Curve => "curve",
        }
    }
}

impl From<String> for ShapeKind {
    fn from(name: String) -> Self {
        Self::from_selector(&name)
    }
}

impl From<ShapeKind> for String {
    fn from(kind: ShapeKind) -> Self {
        kind.as_str().to_owned()
    }
}

/// Rasterize a two-point shape. `curve_offset` only affects [`ShapeKind::Curve`].
pub fn rasterize(kind: ShapeKind, p0: Point, p1: Point, curve_offset: i32) -> Vec<Point> {
    match kind {
        ShapeKind::Line => line(p0, p1),
        ShapeKind::Circle => circle(p0, p1),
        ShapeKind::Ellipse => ellipse(p0, p1),
        ShapeKind::Curve => quadratic_curve(p0, p1, curve_offset),
    }
}

// ============================================================================
// Primitives
// ============================================================================

/// Integer Bresenham line, both endpoints included.
///
/// When `2*err > -dy` x advances, when `2*err < dx` y advances; both can fire
/// in one step, which produces a diagonal move.
pub fn line(p0: Point, p1: Point) -> Vec<Point> {
    // Deltas and error term are widened so spans across the whole i32 range
    // cannot overflow.
    let dx = (i64::from(p1.x) - i64::from(p0.x)).abs();
    let dy = (i64::from(p1.y) - i64::from(p0.y)).abs();
    let sx = if p0.x < p1.x { 1 } else { -1 };
    let sy = if p0.y < p1.y { 1 } else { -1 };
    let mut err = dx - dy;
    let mut x = p0.x;
    let mut y = p0.y;

    let mut points = Vec::with_capacity(dx.max(dy).min(MAX_RESERVE) as usize + 1);
    loop {
        points.push(Point::new(x, y));
        if x == p1.x && y == p1.y {
            break;
        }
        let e2 = 2 * err;
        if e2 > -dy {
            err -= dy;
            x += sx;
        }
        if e2 < dx {
            err += dx;
            y += sy;
        }
    }
    points
}

/// Midpoint circle through `edge`, centered on `center`.
///
/// Points that would fall outside the i32 plane are left out.
pub fn circle(center: Point, edge: Point) -> Vec<Point> {
    if center == edge {
        return vec![center];
    }
    let radius = center.distance_to(&edge).round() as i64;
    let (cx, cy) = (i64::from(center.x), i64::from(center.y));

    let mut points = Vec::with_capacity(8 * (radius.min(MAX_RESERVE) as usize + 1));
    let mut x = radius;
    let mut y = 0;
    let mut err = 0;

    while x >= y {
        points.extend(
            [
                (cx + x, cy + y),
                (cx + y, cy + x),
                (cx - y, cy + x),
                (cx - x, cy + y),
                (cx - x, cy - y),
                (cx - y, cy - x),
                (cx + y, cy - x),
                (cx + x, cy - y),
            ]
            .into_iter()
            .filter_map(lattice),
        );

        y += 1;
        err += 1 + 2 * y;
        if 2 * (err - x) + 1 > 0 {
            x -= 1;
            err += 1 - 2 * x;
        }
    }
    points
}

/// Two-region midpoint ellipse with radii `|Δx|`, `|Δy|`.
pub fn ellipse(center: Point, edge: Point) -> Vec<Point> {
    if center == edge {
        return vec![center];
    }
    // i128 keeps 2 * ry² * x exact for radii spanning the full i32 range
    let rx = (i128::from(edge.x) - i128::from(center.x)).abs();
    let ry = (i128::from(edge.y) - i128::from(center.y)).abs();
    let (rx2, ry2) = (rx * rx, ry * ry);
    let (cx, cy) = (i64::from(center.x), i64::from(center.y));

    let mut points = Vec::new();
    let mut mirror = |x: i128, y: i128| {
        let (x, y) = (x as i64, y as i64);
        points.extend(
            [(cx + x, cy + y), (cx - x, cy + y), (cx + x, cy - y), (cx - x, cy - y)]
                .into_iter()
                .filter_map(lattice),
        );
    };

    let mut x: i128 = 0;
    let mut y: i128 = ry;
    let mut dx = 2 * ry2 * x;
    let mut dy = 2 * rx2 * y;

    // Region 1: slope magnitude below one
    let mut d1 = ry2 as f64 - rx2 as f64 * ry as f64 + 0.25 * rx2 as f64;
    while dx < dy {
        mirror(x, y);
        x += 1;
        dx += 2 * ry2;
        if d1 < 0.0 {
            d1 += (dx + ry2) as f64;
        } else {
            y -= 1;
            dy -= 2 * rx2;
            d1 += (dx - dy + ry2) as f64;
        }
    }

    // Region 2: walk y down to the major axis
    let xf = x as f64 + 0.5;
    let yf = (y - 1) as f64;
    let mut d2 = ry2 as f64 * xf * xf + rx2 as f64 * yf * yf - rx2 as f64 * ry2 as f64;
    while y >= 0 {
        mirror(x, y);
        y -= 1;
        dy -= 2 * rx2;
        if d2 > 0.0 {
            d2 += (rx2 - dy) as f64;
        } else {
            x += 1;
            dx += 2 * ry2;
            d2 += (dx - dy + rx2) as f64;
        }
    }
    points
}

/// Quadratic Bezier from `p0` to `p1` sampled at 101 evenly spaced steps.
///
/// The control point sits at the horizontal midpoint, `offset` below the
/// smaller of the two `y` coordinates.
pub fn quadratic_curve(p0: Point, p1: Point, offset: i32) -> Vec<Point> {
    if p0 == p1 {
        return vec![p0];
    }
    let control_x = (f64::from(p0.x) + f64::from(p1.x)) / 2.0;
    let control_y = f64::from(p0.y.min(p1.y)) - f64::from(offset);

    let blend = |t: f64, a: f64, c: f64, b: f64| {
        let mt = 1.0 - t;
        mt * mt * a + 2.0 * mt * t * c + t * t * b
    };

    (0..=CURVE_STEPS)
        .filter_map(|i| {
            let t = f64::from(i) / f64::from(CURVE_STEPS);
            let x = blend(t, f64::from(p0.x), control_x, f64::from(p1.x));
            let y = blend(t, f64::from(p0.y), control_y, f64::from(p1.y));
            lattice((round_half_up(x), round_half_up(y)))
        })
        .collect()
}

/// Lines through consecutive pairs, concatenated in input order.
///
/// Shared vertices appear twice (end of one segment, start of the next).
pub fn polyline(points: &[Point]) -> Vec<Point> {
    points.windows(2).flat_map(|pair| line(pair[0], pair[1])).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::Rng;
    use std::collections::HashSet;

    fn pts(raw: &[(i32, i32)]) -> Vec<Point> {
        raw.iter().copied().map(Point::from).collect()
    }

    #[test]
    fn test_line_canonical_tie_break() {
        let got = line(Point::new(0, 0), Point::new(3, 1));
        assert_eq!(got, pts(&[(0, 0), (1, 0), (2, 1), (3, 1)]));
    }

    #[test]
    fn test_line_diagonal_moves() {
        let got = line(Point::new(0, 0), Point::new(3, 3));
        assert_eq!(got, pts(&[(0, 0), (1, 1), (2, 2), (3, 3)]));
    }

    #[test]
    fn test_line_connected_and_inclusive() {
        let mut rng = Rng::new(0x5eed);
        for _ in 0..500 {
            let p0 = Point::new(rng.range_i32(-30, 30), rng.range_i32(-30, 30));
            let p1 = Point::new(rng.range_i32(-30, 30), rng.range_i32(-30, 30));
            let got = line(p0, p1);
            assert_eq!(got.first(), Some(&p0));
            assert_eq!(got.last(), Some(&p1));
            for pair in got.windows(2) {
                assert!((pair[0].x - pair[1].x).abs() <= 1, "{:?} -> {:?}", p0, p1);
                assert!((pair[0].y - pair[1].y).abs() <= 1, "{:?} -> {:?}", p0, p1);
            }
        }
    }

    #[test]
    fn test_degenerate_shapes_are_single_points() {
        let p = Point::new(4, 7);
        for kind in [ShapeKind::Line, ShapeKind::Circle, ShapeKind::Ellipse, ShapeKind::Curve] {
            assert_eq!(rasterize(kind, p, p, DEFAULT_CURVE_OFFSET), vec![p], "{:?}", kind);
        }
    }

    #[test]
    fn test_circle_radius_rounds_distance() {
        // distance sqrt(13) ~= 3.6 rounds to 4
        let got = circle(Point::new(0, 0), Point::new(2, 3));
        assert!(got.contains(&Point::new(4, 0)));
        assert!(got.contains(&Point::new(0, -4)));
        assert!(!got.contains(&Point::new(3, 0)));
    }

    #[test]
    fn test_circle_octant_symmetry() {
        let center = Point::new(10, 10);
        let got: HashSet<Point> = circle(center, Point::new(17, 12)).into_iter().collect();
        for p in &got {
            let (x, y) = (p.x - center.x, p.y - center.y);
            for (mx, my) in [(x, -y), (-x, y), (-x, -y), (y, x), (-y, x), (y, -x), (-y, -x)] {
                assert!(got.contains(&Point::new(center.x + mx, center.y + my)));
            }
        }
    }

    #[test]
    fn test_ellipse_quadrant_symmetry_and_extremes() {
        let center = Point::new(0, 0);
        let got: HashSet<Point> = ellipse(center, Point::new(6, 3)).into_iter().collect();
        assert!(got.contains(&Point::new(0, 3)));
        assert!(got.contains(&Point::new(0, -3)));
        assert!(got.contains(&Point::new(6, 0)));
        assert!(got.contains(&Point::new(-6, 0)));
        for p in &got {
            assert!(got.contains(&Point::new(-p.x, p.y)));
            assert!(got.contains(&Point::new(p.x, -p.y)));
            assert!(got.contains(&Point::new(-p.x, -p.y)));
        }
    }

    #[test]
    fn test_ellipse_zero_width_is_vertical_segment() {
        let got: HashSet<Point> = ellipse(Point::new(5, 5), Point::new(5, 8)).into_iter().collect();
        let expected: HashSet<Point> = (2..=8).map(|y| Point::new(5, y)).collect();
        assert_eq!(got, expected);
    }

    #[test]
    fn test_ellipse_zero_height_collapses_to_center() {
        // Region 1 never runs when ry == 0, and region 2 stops after y = 0
        let got: HashSet<Point> = ellipse(Point::new(5, 5), Point::new(9, 5)).into_iter().collect();
        assert_eq!(got, HashSet::from([Point::new(5, 5)]));
    }

    #[test]
    fn test_shapes_at_coordinate_limits() {
        let corner = Point::new(i32::MAX, i32::MIN);
        let got = line(corner, Point::new(i32::MAX - 2, i32::MIN + 1));
        assert_eq!(got.first(), Some(&corner));
        assert_eq!(got.last(), Some(&Point::new(i32::MAX - 2, i32::MIN + 1)));

        // Only the half of the circle that stays in the i32 plane survives
        let got = circle(corner, Point::new(i32::MAX - 3, i32::MIN));
        assert!(!got.is_empty());
        assert!(got.iter().all(|p| p.x >= i32::MAX - 3 && p.y <= i32::MIN + 3));
        assert!(got.contains(&Point::new(i32::MAX - 3, i32::MIN)));
        assert!(got.contains(&Point::new(i32::MAX, i32::MIN + 3)));

        let got = ellipse(corner, Point::new(i32::MAX - 4, i32::MIN + 2));
        assert!(got.contains(&Point::new(i32::MAX - 4, i32::MIN)));
        assert!(got.contains(&Point::new(i32::MAX, i32::MIN + 2)));

        let got = quadratic_curve(Point::new(i32::MAX - 10, i32::MIN), Point::new(i32::MAX, i32::MIN), 5);
        assert_eq!(got.first(), Some(&Point::new(i32::MAX - 10, i32::MIN)));
        assert_eq!(got.last(), Some(&Point::new(i32::MAX, i32::MIN)));
    }

    #[test]
    fn test_curve_samples_and_endpoints() {
        let got = quadratic_curve(Point::new(0, 10), Point::new(10, 10), DEFAULT_CURVE_OFFSET);
        assert_eq!(got.len(), 101);
        assert_eq!(got[0], Point::new(0, 10));
        assert_eq!(got[100], Point::new(10, 10));
        // apex at t = 0.5: y = 0.25*10 + 0.5*5 + 0.25*10
        assert_eq!(got[50], Point::new(5, 8));
    }

    #[test]
    fn test_polyline_concatenates_segments() {
        let got = polyline(&pts(&[(0, 0), (2, 0), (2, 2)]));
        assert_eq!(got, pts(&[(0, 0), (1, 0), (2, 0), (2, 0), (2, 1), (2, 2)]));
        assert!(polyline(&pts(&[(1, 1)])).is_empty());
    }

    #[test]
    fn test_shape_selector_fallback() {
        assert_eq!(ShapeKind::from_selector("Circle"), ShapeKind::Circle);
        assert_eq!(ShapeKind::from_selector("bezier"), ShapeKind::Curve);
        assert_eq!(ShapeKind::from_selector("spiral"), ShapeKind::Line);
    }
}

//! Polygon geometry for player-drawn enclosures
//!
//! Polygons are vertex slices with an implicit closing edge from the last
//! vertex back to the first. All functions are pure.

use glam::Vec2;

/// 2D cross product (z component of the 3D cross)
#[inline]
fn cross(a: Vec2, b: Vec2) -> f32 {
    a.x * b.y - a.y * b.x
}

/// Iterate the closed edges of a polygon as (start, end) pairs
pub fn edges(polygon: &[Vec2]) -> impl Iterator<Item = (Vec2, Vec2)> + '_ {
    let n = polygon.len();
    (0..n).map(move |i| (polygon[i], polygon[(i + 1) % n]))
}

/// Ray-casting point-in-polygon test
///
/// Casts a horizontal ray to +x and toggles on every edge it crosses. An edge
/// counts when exactly one endpoint lies strictly above `p`, so a vertex shared
/// by two edges is never counted twice. Fewer than 3 vertices is never inside.
pub fn point_in_polygon(p: Vec2, polygon: &[Vec2]) -> bool {
    let n = polygon.len();
    if n < 3 {
        return false;
    }

    let mut inside = false;
    let mut j = n - 1;
    for i in 0..n {
        let vi = polygon[i];
        let vj = polygon[j];
        if (vi.y > p.y) != (vj.y > p.y) {
            let x_cross = (vj.x - vi.x) * (p.y - vi.y) / (vj.y - vi.y) + vi.x;
            if p.x < x_cross {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}

/// Shoelace area (always non-negative)
pub fn polygon_area(polygon: &[Vec2]) -> f32 {
    if polygon.len() < 3 {
        return 0.0;
    }
    let twice: f32 = edges(polygon).map(|(a, b)| cross(a, b)).sum();
    twice.abs() / 2.0
}

/// Sum of edge lengths around the closed loop
pub fn polygon_perimeter(polygon: &[Vec2]) -> f32 {
    if polygon.len() < 2 {
        return 0.0;
    }
    edges(polygon).map(|(a, b)| a.distance(b)).sum()
}

/// Check whether segments a1-a2 and b1-b2 intersect
///
/// Solves `a1 + s*(a2-a1) = b1 + t*(b2-b1)` and reports a hit when both `s`
/// and `t` lie in [0, 1]. Parallel and collinear segments (zero determinant)
/// are reported as not intersecting, even when they share a stretch of line.
pub fn segments_intersect(a1: Vec2, a2: Vec2, b1: Vec2, b2: Vec2) -> bool {
    let r = a2 - a1;
    let q = b2 - b1;
    let det = cross(r, q);
    if det == 0.0 {
        return false;
    }

    let w = b1 - a1;
    let s = cross(w, q) / det;
    let t = cross(w, r) / det;
    (0.0..=1.0).contains(&s) && (0.0..=1.0).contains(&t)
}

/// Check whether two polygons overlap or one contains the other
///
/// Any crossing edge pair counts. Full containment has no crossing edges, so
/// the first vertex of each polygon is also tested against the other.
pub fn polygons_overlap(p: &[Vec2], q: &[Vec2]) -> bool {
    let edges_cross = edges(p)
        .any(|(a1, a2)| edges(q).any(|(b1, b2)| segments_intersect(a1, a2, b1, b2)));
    if edges_cross {
        return true;
    }

    let p_in_q = p.first().is_some_and(|&v| point_in_polygon(v, q));
    let q_in_p = q.first().is_some_and(|&v| point_in_polygon(v, p));
    p_in_q || q_in_p
}

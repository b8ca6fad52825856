//! Point and segment distance queries.
//!
//! Segments are given by their two endpoints. A zero-length segment
//! degrades to a point.

use nalgebra::Point2;

/// Returns the point on segment `ab` closest to `point`.
///
/// # Example
///
/// ```
/// use arena_geom::closest_point_on_segment;
/// use nalgebra::Point2;
///
/// let a = Point2::new(0.0, 0.0);
/// let b = Point2::new(10.0, 0.0);
///
/// assert_eq!(closest_point_on_segment(&a, &b, &Point2::new(4.0, 3.0)), Point2::new(4.0, 0.0));
/// assert_eq!(closest_point_on_segment(&a, &b, &Point2::new(-4.0, 3.0)), a);
/// ```
#[must_use]
pub fn closest_point_on_segment(a: &Point2<f64>, b: &Point2<f64>, point: &Point2<f64>) -> Point2<f64> {
    let ab = b - a;
    let length_sq = ab.norm_squared();
    if length_sq == 0.0 {
        return *a;
    }
    let t = ((point - a).dot(&ab) / length_sq).clamp(0.0, 1.0);
    a + ab * t
}

/// Distance from `point` to segment `ab`.
///
/// # Example
///
/// ```
/// use arena_geom::point_to_segment_distance;
/// use approx::assert_relative_eq;
/// use nalgebra::Point2;
///
/// let d = point_to_segment_distance(
///     &Point2::new(0.0, 0.0),
///     &Point2::new(0.0, 200.0),
///     &Point2::new(15.0, 50.0),
/// );
/// assert_relative_eq!(d, 15.0);
/// ```
#[must_use]
pub fn point_to_segment_distance(a: &Point2<f64>, b: &Point2<f64>, point: &Point2<f64>) -> f64 {
    (point - closest_point_on_segment(a, b, point)).norm()
}

/// Minimum distance between segments `p1p2` and `p3p4`.
///
/// An orientation test first decides whether the segments touch or cross,
/// returning `0.0` if so. Disjoint segments reach their minimum at an
/// endpoint of one of them, so the result is the smallest of the four
/// endpoint-to-segment distances from [`point_to_segment_distance`].
/// Parallel and zero-length segments need no special casing.
///
/// # Example
///
/// ```
/// use arena_geom::segment_segment_distance;
/// use approx::assert_relative_eq;
/// use nalgebra::Point2;
///
/// // Crossing diagonals
/// let d = segment_segment_distance(
///     &Point2::new(0.0, 0.0), &Point2::new(2.0, 2.0),
///     &Point2::new(0.0, 2.0), &Point2::new(2.0, 0.0),
/// );
/// assert_eq!(d, 0.0);
///
/// // Parallel, 3 apart
/// let d = segment_segment_distance(
///     &Point2::new(0.0, 0.0), &Point2::new(5.0, 0.0),
///     &Point2::new(1.0, 3.0), &Point2::new(4.0, 3.0),
/// );
/// assert_relative_eq!(d, 3.0);
/// ```
#[must_use]
pub fn segment_segment_distance(
    p1: &Point2<f64>,
    p2: &Point2<f64>,
    p3: &Point2<f64>,
    p4: &Point2<f64>,
) -> f64 {
    if segments_intersect(p1, p2, p3, p4) {
        return 0.0;
    }

    [
        point_to_segment_distance(p3, p4, p1),
        point_to_segment_distance(p3, p4, p2),
        point_to_segment_distance(p1, p2, p3),
        point_to_segment_distance(p1, p2, p4),
    ]
    .into_iter()
    .fold(f64::INFINITY, f64::min)
}

/// Sign of the turn `a -> b -> c`: positive counter-clockwise, negative clockwise.
fn orientation(a: &Point2<f64>, b: &Point2<f64>, c: &Point2<f64>) -> f64 {
    (b - a).perp(&(c - a))
}

/// `c` lies within the bounding box of `ab` (used for collinear cases).
fn within_box(a: &Point2<f64>, b: &Point2<f64>, c: &Point2<f64>) -> bool {
    c.x >= a.x.min(b.x) && c.x <= a.x.max(b.x) && c.y >= a.y.min(b.y) && c.y <= a.y.max(b.y)
}

fn segments_intersect(p1: &Point2<f64>, p2: &Point2<f64>, p3: &Point2<f64>, p4: &Point2<f64>) -> bool {
    let d1 = orientation(p3, p4, p1);
    let d2 = orientation(p3, p4, p2);
    let d3 = orientation(p1, p2, p3);
    let d4 = orientation(p1, p2, p4);

    if ((d1 > 0.0 && d2 < 0.0) || (d1 < 0.0 && d2 > 0.0))
        && ((d3 > 0.0 && d4 < 0.0) || (d3 < 0.0 && d4 > 0.0))
    {
        return true;
    }

    (d1 == 0.0 && within_box(p3, p4, p1))
        || (d2 == 0.0 && within_box(p3, p4, p2))
        || (d3 == 0.0 && within_box(p1, p2, p3))
        || (d4 == 0.0 && within_box(p1, p2, p4))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn p(x: f64, y: f64) -> Point2<f64> {
        Point2::new(x, y)
    }

    #[test]
    fn test_point_distance_interior_projection() {
        assert_relative_eq!(point_to_segment_distance(&p(0.0, 0.0), &p(10.0, 0.0), &p(5.0, -4.0)), 4.0);
    }

    #[test]
    fn test_point_distance_clamped_to_endpoint() {
        assert_relative_eq!(point_to_segment_distance(&p(0.0, 0.0), &p(10.0, 0.0), &p(13.0, 4.0)), 5.0);
    }

    #[test]
    fn test_point_distance_degenerate_segment() {
        assert_relative_eq!(point_to_segment_distance(&p(1.0, 1.0), &p(1.0, 1.0), &p(4.0, 5.0)), 5.0);
    }

    #[test]
    fn test_segment_distance_touching_endpoint() {
        let d = segment_segment_distance(&p(0.0, 0.0), &p(1.0, 0.0), &p(1.0, 0.0), &p(1.0, 5.0));
        assert_eq!(d, 0.0);
    }

    #[test]
    fn test_segment_distance_collinear_disjoint() {
        let d = segment_segment_distance(&p(0.0, 0.0), &p(1.0, 0.0), &p(3.0, 0.0), &p(5.0, 0.0));
        assert_relative_eq!(d, 2.0);
    }

    #[test]
    fn test_segment_distance_zero_length() {
        // A point off the segment, a point on it, and two bare points
        let off = segment_segment_distance(&p(0.0, 0.0), &p(5.0, 0.0), &p(2.0, 3.0), &p(2.0, 3.0));
        assert_relative_eq!(off, 3.0);
        let on = segment_segment_distance(&p(0.0, 0.0), &p(5.0, 0.0), &p(2.0, 0.0), &p(2.0, 0.0));
        assert_eq!(on, 0.0);
        let points = segment_segment_distance(&p(0.0, 0.0), &p(0.0, 0.0), &p(3.0, 4.0), &p(3.0, 4.0));
        assert_relative_eq!(points, 5.0);
    }

    #[test]
    fn test_segment_distance_to_arena_edge() {
        // Straight run 3 cm inside the west wall
        let d = segment_segment_distance(&p(3.0, 20.0), &p(3.0, 80.0), &p(0.0, 0.0), &p(0.0, 200.0));
        assert_relative_eq!(d, 3.0);
    }

    #[test]
    fn test_segment_distance_is_symmetric() {
        let a = segment_segment_distance(&p(0.0, 0.0), &p(4.0, 1.0), &p(2.0, 5.0), &p(7.0, 3.0));
        let b = segment_segment_distance(&p(2.0, 5.0), &p(7.0, 3.0), &p(0.0, 0.0), &p(4.0, 1.0));
        assert_relative_eq!(a, b);
    }

    #[test]
    fn test_closest_point_interior() {
        let c = closest_point_on_segment(&p(0.0, 0.0), &p(0.0, 200.0), &p(-16.0, 95.0));
        assert_relative_eq!(c.y, 95.0);
        assert_relative_eq!(c.x, 0.0);
    }
}

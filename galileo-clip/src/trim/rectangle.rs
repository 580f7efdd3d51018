//! Trimming of planar ring sets to an axis aligned rectangle.

use crate::cartesian::{Point2, Rect, Vector2};
use crate::error::TrimError;
use crate::ring_set::{
    close_nearly_closed_rings, is_closed, planar_distance, remove_duplicate_vertices, RingSet,
};
use crate::trim::enclosure::{needs_enclosing_ring, point_in_polygon};
use crate::trim::half_plane::{trim_polygon_pass, trim_polyline_to_half_plane, HalfPlane};
use crate::trim::link::{assemble, link_fragments, Boundary, BoundaryLocation};

/// Perimeter of a rectangle walked clockwise, starting from the lower left corner.
pub(crate) struct RectPerimeter {
    rect: Rect,
}

impl RectPerimeter {
    pub fn new(rect: Rect) -> Self {
        Self { rect }
    }

    fn corners(&self) -> [(f64, Point2); 4] {
        let w = self.rect.width();
        let h = self.rect.height();
        let [lower_left, upper_left, upper_right, lower_right] = self.rect.into_quadrangle();
        [
            (0.0, lower_left),
            (h, upper_left),
            (h + w, upper_right),
            (2.0 * h + w, lower_right),
        ]
    }
}

impl Boundary for RectPerimeter {
    fn locate(&self, point: &Point2) -> Option<BoundaryLocation> {
        let r = &self.rect;
        if !r.contains(point) {
            return None;
        }

        let w = r.width();
        let h = r.height();
        let location = |pos, forward: (f64, f64), inward: (f64, f64)| BoundaryLocation {
            pos,
            forward: Vector2::new(forward.0, forward.1),
            inward: Vector2::new(inward.0, inward.1),
        };

        if point.x == r.x_min {
            Some(location(point.y - r.y_min, (0.0, 1.0), (1.0, 0.0)))
        } else if point.y == r.y_max {
            Some(location(h + point.x - r.x_min, (1.0, 0.0), (0.0, -1.0)))
        } else if point.x == r.x_max {
            Some(location(h + w + r.y_max - point.y, (0.0, -1.0), (-1.0, 0.0)))
        } else if point.y == r.y_min {
            Some(location(2.0 * h + w + r.x_max - point.x, (-1.0, 0.0), (0.0, 1.0)))
        } else {
            None
        }
    }

    fn period(&self) -> Option<f64> {
        Some(self.rect.perimeter())
    }

    fn path(&self, _: &Point2, from_pos: f64, _: &Point2, to_pos: f64) -> Vec<Point2> {
        let period = self.rect.perimeter();
        let distance = (to_pos - from_pos).rem_euclid(period);
        let mut corners: Vec<(f64, Point2)> = self
            .corners()
            .into_iter()
            .map(|(pos, corner)| ((pos - from_pos).rem_euclid(period), corner))
            .filter(|(offset, _)| *offset > 0.0 && *offset < distance)
            .collect();
        corners.sort_by(|a, b| a.0.total_cmp(&b.0));

        corners.into_iter().map(|(_, corner)| corner).collect()
    }
}

/// Trims prepared rings to the rectangle and closes the result along its perimeter.
///
/// The result is empty if nothing of the input is left inside the rectangle. Deciding whether
/// the rectangle itself is covered in that case is left to the caller.
pub(crate) fn clip_to_rect(
    rings: Vec<Vec<Point2>>,
    rect: Rect,
) -> Result<Vec<Vec<Point2>>, TrimError> {
    let mut rings = rings;
    for half_plane in [
        HalfPlane::x_max(rect.x_max),
        HalfPlane::y_max(rect.y_max),
        HalfPlane::x_min(rect.x_min),
        HalfPlane::y_min(rect.y_min),
    ] {
        rings = trim_polygon_pass(rings, half_plane)?;
    }

    let (finished, open): (Vec<_>, Vec<_>) = rings
        .into_iter()
        .partition(|ring| ring.len() < 2 || is_closed(ring));

    let perimeter = RectPerimeter::new(rect);
    let next = link_fragments(&open, &perimeter)?;
    let assembled = assemble(&open, &next, &perimeter)?;
    log::trace!(
        "Closed {} rings along the rectangle perimeter, {} chains left open",
        assembled.closed.len(),
        assembled.open.len()
    );

    let mut result = assembled.closed;
    result.extend(finished);
    result.extend(assembled.open);

    if needs_enclosing_ring(&result) {
        log::debug!("Holes are not enclosed, adding rectangle boundary as outer ring");
        result.push(rect.boundary_ring());
    }

    Ok(result)
}

fn subdivide(ring: &mut Vec<Point2>, from: Point2, to: Point2, length: f64, spacing: Option<f64>) {
    let Some(spacing) = spacing.filter(|s| *s > 0.0) else {
        return;
    };

    let count = (length / spacing).ceil();
    if !count.is_finite() || count < 2.0 {
        return;
    }

    let step = (to - from) * (1.0 / count);
    for i in 1..count as usize {
        ring.push(from + step * i as f64);
    }
}

/// Inserts vertices along the segments lying on the rectangle edges so that no two adjacent
/// vertices on horizontal edges are farther apart than `x_spacing`, and on vertical edges than
/// `y_spacing`.
pub(crate) fn densify_edges(
    rings: Vec<Vec<Point2>>,
    rect: &Rect,
    x_spacing: Option<f64>,
    y_spacing: Option<f64>,
) -> Vec<Vec<Point2>> {
    if x_spacing.is_none() && y_spacing.is_none() {
        return rings;
    }

    rings
        .into_iter()
        .map(|ring| {
            let mut result = Vec::with_capacity(ring.len());
            for pair in ring.windows(2) {
                let (a, b) = (pair[0], pair[1]);
                result.push(a);
                if a.x == b.x && (a.x == rect.x_min || a.x == rect.x_max) {
                    subdivide(&mut result, a, b, (b.y - a.y).abs(), y_spacing);
                } else if a.y == b.y && (a.y == rect.y_min || a.y == rect.y_max) {
                    subdivide(&mut result, a, b, (b.x - a.x).abs(), x_spacing);
                }
            }

            if let Some(last) = ring.last() {
                result.push(*last);
            }

            result
        })
        .collect()
}

/// Trims polygon rings to the rectangle.
///
/// Outer rings must be clockwise and holes counter-clockwise. Parts outside the rectangle are
/// removed, and every ring cut by the rectangle is closed by walking clockwise along its
/// perimeter. If holes are left that are not enclosed by any outer ring, or if the whole input
/// was discarded while the rectangle lies inside the polygon, the rectangle boundary is added as
/// an outer ring.
///
/// When `x_spacing` or `y_spacing` is given, vertices are inserted along the horizontal or
/// vertical rectangle edges respectively so that adjacent edge vertices are not farther apart.
///
/// ```
/// use galileo_clip::cartesian::{Point2, Rect};
/// use galileo_clip::trim::trim_polygon_to_rectangle;
/// use galileo_clip::RingSet;
///
/// let square = vec![
///     Point2::new(-5.0, -5.0),
///     Point2::new(-5.0, 15.0),
///     Point2::new(15.0, 15.0),
///     Point2::new(15.0, -5.0),
///     Point2::new(-5.0, -5.0),
/// ];
/// let rect = Rect::new(0.0, 0.0, 10.0, 10.0);
/// let clipped = trim_polygon_to_rectangle(&RingSet::new(vec![square]), rect, None, None, 0.0)?;
///
/// assert_eq!(clipped.len(), 1);
/// assert_eq!(clipped.rings()[0].len(), 5);
/// # Ok::<(), galileo_clip::TrimError>(())
/// ```
pub fn trim_polygon_to_rectangle(
    ring_set: &RingSet<Point2>,
    rect: Rect,
    x_spacing: Option<f64>,
    y_spacing: Option<f64>,
    tolerance: f64,
) -> Result<RingSet<Point2>, TrimError> {
    let prepared = remove_duplicate_vertices(close_nearly_closed_rings(
        ring_set.clone(),
        tolerance,
        planar_distance,
    ));
    if prepared.is_empty() {
        return Ok(RingSet::empty());
    }

    let mut rings = clip_to_rect(prepared.rings().to_vec(), rect)?;
    if rings.is_empty() && point_in_polygon(&rect.center(), prepared.rings(), None) {
        log::debug!("Rectangle is inside the polygon, returning its boundary");
        rings.push(rect.boundary_ring());
    }

    Ok(RingSet::new(densify_edges(rings, &rect, x_spacing, y_spacing)))
}

/// Trims polylines to the rectangle. Parts outside are dropped, no reconnection is made.
pub fn trim_polyline_to_rectangle(ring_set: &RingSet<Point2>, rect: Rect) -> RingSet<Point2> {
    [
        HalfPlane::x_max(rect.x_max),
        HalfPlane::y_max(rect.y_max),
        HalfPlane::x_min(rect.x_min),
        HalfPlane::y_min(rect.y_min),
    ]
    .into_iter()
    .fold(ring_set.clone(), |lines, half_plane| {
        trim_polyline_to_half_plane(&lines, half_plane)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cartesian::{ring_contains_ring, signed_area};

    fn ring(xs: &[f64], ys: &[f64]) -> Vec<Point2> {
        xs.iter().zip(ys).map(|(x, y)| Point2::new(*x, *y)).collect()
    }

    fn unit_rect() -> Rect {
        Rect::new(0.0, 0.0, 10.0, 10.0)
    }

    #[test]
    fn perimeter_positions() {
        let perimeter = RectPerimeter::new(Rect::new(0.0, 0.0, 4.0, 2.0));
        let pos = |x, y| perimeter.locate(&Point2::new(x, y)).map(|l| l.pos);

        assert_eq!(pos(0.0, 0.0), Some(0.0));
        assert_eq!(pos(0.0, 1.0), Some(1.0));
        assert_eq!(pos(1.0, 2.0), Some(3.0));
        assert_eq!(pos(4.0, 1.5), Some(6.5));
        assert_eq!(pos(1.0, 0.0), Some(11.0));
        assert_eq!(pos(1.0, 1.0), None);
        assert_eq!(pos(5.0, 0.0), None);
        assert_eq!(perimeter.period(), Some(12.0));
    }

    #[test]
    fn perimeter_path_inserts_corners() {
        let perimeter = RectPerimeter::new(Rect::new(0.0, 0.0, 4.0, 2.0));
        let from = Point2::new(4.0, 1.0);
        let to = Point2::new(0.0, 1.0);
        assert_eq!(
            perimeter.path(&from, 7.0, &to, 1.0),
            vec![Point2::new(4.0, 0.0), Point2::new(0.0, 0.0)]
        );
        assert!(perimeter.path(&to, 1.0, &Point2::new(0.0, 1.5), 1.5).is_empty());
    }

    #[test]
    fn covering_square_becomes_rectangle() {
        let square = ring(&[-5.0, -5.0, 15.0, 15.0, -5.0], &[-5.0, 15.0, 15.0, -5.0, -5.0]);
        let result =
            trim_polygon_to_rectangle(&RingSet::new(vec![square]), unit_rect(), None, None, 0.0)
                .unwrap();

        assert_eq!(result.len(), 1);
        assert_eq!(
            result.rings()[0],
            ring(&[0.0, 0.0, 10.0, 10.0, 0.0], &[0.0, 10.0, 10.0, 0.0, 0.0])
        );
    }

    #[test]
    fn corner_is_inserted() {
        let triangle = ring(&[5.0, 5.0, 15.0, 5.0], &[5.0, 15.0, 5.0, 5.0]);
        let result =
            trim_polygon_to_rectangle(&RingSet::new(vec![triangle]), unit_rect(), None, None, 0.0)
                .unwrap();

        assert_eq!(result.len(), 1);
        let clipped = &result.rings()[0];
        assert!(clipped.contains(&Point2::new(10.0, 10.0)));
        assert_eq!(signed_area(clipped), 25.0);
        assert!(clipped.iter().all(|p| unit_rect().contains(p)));
    }

    #[test]
    fn hole_is_trimmed_and_stays_nested() {
        let outer = ring(
            &[-10.0, -10.0, 10.0, 10.0, -10.0],
            &[-10.0, 10.0, 10.0, -10.0, -10.0],
        );
        let hole = ring(&[-1.0, 1.0, 1.0, -1.0, -1.0], &[-1.0, -1.0, 1.0, 1.0, -1.0]);
        let rect = Rect::new(-20.0, -20.0, 0.0, 20.0);
        let result =
            trim_polygon_to_rectangle(&RingSet::new(vec![outer, hole]), rect, None, None, 0.0)
                .unwrap();

        assert_eq!(result.len(), 1);
        assert_eq!(signed_area(&result.rings()[0]), 198.0);
        assert!(result.rings()[0].iter().all(|p| p.x <= 0.0));
    }

    #[test]
    fn unenclosed_hole_gets_rectangle_boundary() {
        let hole = ring(&[4.0, 6.0, 6.0, 4.0, 4.0], &[4.0, 4.0, 6.0, 6.0, 4.0]);
        let result = trim_polygon_to_rectangle(
            &RingSet::new(vec![hole.clone()]),
            unit_rect(),
            None,
            None,
            0.0,
        )
        .unwrap();

        assert_eq!(result.len(), 2);
        assert_eq!(result.rings()[0], hole);
        assert_eq!(result.rings()[1], unit_rect().boundary_ring());
        assert!(ring_contains_ring(&result.rings()[1], &result.rings()[0]));
    }

    #[test]
    fn hole_crossing_the_edge_opens_the_boundary() {
        let hole = ring(&[8.0, 12.0, 12.0, 8.0, 8.0], &[4.0, 4.0, 6.0, 6.0, 4.0]);
        let result =
            trim_polygon_to_rectangle(&RingSet::new(vec![hole]), unit_rect(), None, None, 0.0)
                .unwrap();

        assert_eq!(result.len(), 1);
        let clipped = &result.rings()[0];
        assert_eq!(clipped.first(), clipped.last());
        assert_eq!(signed_area(clipped), 100.0 - 4.0);
    }

    #[test]
    fn covered_rectangle_is_returned() {
        let hole = ring(&[20.0, 22.0, 22.0, 20.0, 20.0], &[4.0, 4.0, 6.0, 6.0, 4.0]);
        let result =
            trim_polygon_to_rectangle(&RingSet::new(vec![hole]), unit_rect(), None, None, 0.0)
                .unwrap();
        assert_eq!(result.rings(), &[unit_rect().boundary_ring()]);

        let outside = ring(&[20.0, 20.0, 22.0, 22.0, 20.0], &[4.0, 6.0, 6.0, 4.0, 4.0]);
        let result =
            trim_polygon_to_rectangle(&RingSet::new(vec![outside]), unit_rect(), None, None, 0.0)
                .unwrap();
        assert!(result.is_empty());
    }

    #[test]
    fn edges_are_densified() {
        let square = ring(&[-5.0, -5.0, 15.0, 15.0, -5.0], &[-5.0, 15.0, 15.0, -5.0, -5.0]);
        let result = trim_polygon_to_rectangle(
            &RingSet::new(vec![square]),
            unit_rect(),
            Some(2.5),
            Some(5.0),
            0.0,
        )
        .unwrap();

        let clipped = &result.rings()[0];
        assert_eq!(clipped.len(), 1 + 2 * 4 + 2 * 2);
        assert_eq!(clipped[1], Point2::new(0.0, 5.0));
        assert_eq!(signed_area(clipped), 100.0);
    }

    #[test]
    fn polyline_is_clipped() {
        let line = ring(&[-5.0, 5.0, 15.0], &[5.0, 5.0, 5.0]);
        let result = trim_polyline_to_rectangle(&RingSet::new(vec![line]), unit_rect());
        assert_eq!(result.rings(), &[ring(&[0.0, 5.0, 10.0], &[5.0, 5.0, 5.0])]);
    }
}

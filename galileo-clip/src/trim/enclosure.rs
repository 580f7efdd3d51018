//! Containment tests on trimmed ring sets.

use crate::cartesian::{
    locate_point, ring_contains_ring, signed_area, Point2, PointLocation, Rect,
};
use crate::ring_set::is_closed;

/// Returns true if some closed counter-clockwise ring (hole) is not contained in any closed
/// clockwise ring, which means the region outside all rings is part of the polygon.
pub(crate) fn needs_enclosing_ring(rings: &[Vec<Point2>]) -> bool {
    let closed: Vec<(&Vec<Point2>, f64)> = rings
        .iter()
        .filter(|ring| is_closed(ring))
        .map(|ring| (ring, signed_area(ring)))
        .collect();

    closed.iter().filter(|(_, area)| *area < 0.0).any(|(hole, _)| {
        !closed
            .iter()
            .any(|(outer, area)| *area > 0.0 && ring_contains_ring(outer, hole))
    })
}

fn shifted_contains(ring: &[Point2], point: &Point2, period: Option<f64>) -> bool {
    let inside = |p: &Point2| locate_point(ring, p) == PointLocation::Inside;
    match period {
        None => inside(point),
        Some(period) => {
            let Some(bbox) = Rect::from_points(ring.iter()) else {
                return false;
            };
            let turns = ((bbox.center().x - point.x) / period).round();
            (-1..=1).any(|k| {
                let shift = period * (turns + k as f64);
                inside(&Point2::new(point.x + shift, point.y))
            })
        }
    }
}

/// Tests if the point is inside the polygon formed by the closed rings.
///
/// Every clockwise ring containing the point adds one, every counter-clockwise ring subtracts
/// one. If the largest ring is counter-clockwise, the polygon is unbounded and the count starts
/// from one. With `period` set, the rings are treated as repeated along the first coordinate.
pub(crate) fn point_in_polygon(
    point: &Point2,
    rings: &[Vec<Point2>],
    period: Option<f64>,
) -> bool {
    let closed: Vec<(&Vec<Point2>, f64)> = rings
        .iter()
        .filter(|ring| is_closed(ring) && ring.len() > 3)
        .map(|ring| (ring, signed_area(ring)))
        .collect();

    let largest = closed
        .iter()
        .max_by(|a, b| a.1.abs().total_cmp(&b.1.abs()));
    let mut count = match largest {
        Some((_, area)) if *area < 0.0 => 1,
        _ => 0,
    };

    for (ring, area) in &closed {
        if shifted_contains(ring, point, period) {
            count += if *area > 0.0 { 1 } else { -1 };
        }
    }

    count > 0
}

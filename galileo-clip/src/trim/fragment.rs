//! Truncation of point sequences against a single coordinate bound.
//!
//! All functions here keep the side where the coordinate is *less than or equal* to the bound.
//! Lower bounds are handled by the callers by negating both coordinates.

use serde::{Deserialize, Serialize};

use crate::cartesian::{Point2, Vector2};

/// Coordinate axis of the plane.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    /// First coordinate.
    X,
    /// Second coordinate.
    Y,
}

impl Axis {
    /// Value of the point coordinate along the axis.
    pub fn coord(self, point: &Point2) -> f64 {
        match self {
            Axis::X => point.x,
            Axis::Y => point.y,
        }
    }

    fn with_coord(self, point: Point2, value: f64) -> Point2 {
        match self {
            Axis::X => Point2::new(value, point.y),
            Axis::Y => Point2::new(point.x, value),
        }
    }
}

/// Result of trimming one ring.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum TrimmedRing {
    /// The ring is closed and lies entirely on the kept side.
    Whole(Vec<Point2>),
    /// Open pieces left after cutting the ring. May be empty.
    Fragments(Vec<Vec<Point2>>),
}

/// Point on the segment `from -> to` where its coordinate equals `bound` exactly.
fn crossing(from: &Point2, to: &Point2, axis: Axis, bound: f64) -> Point2 {
    let c_from = axis.coord(from);
    let c_to = axis.coord(to);
    let t = (bound - c_from) / (c_to - c_from);
    let p = *from + (*to - *from) * t;
    axis.with_coord(p, bound)
}

/// Cuts the sequence into pieces lying on the kept side, inserting crossing points at the bound.
///
/// Pieces with a single point are returned too; callers decide whether to keep them.
pub(crate) fn truncate(points: &[Point2], axis: Axis, bound: f64) -> Vec<Vec<Point2>> {
    let mut pieces = Vec::new();
    let mut current: Vec<Point2> = Vec::new();

    for (i, p) in points.iter().enumerate() {
        let c = axis.coord(p);
        if i > 0 {
            let q = &points[i - 1];
            let c_prev = axis.coord(q);
            if (c_prev < bound && c > bound) || (c_prev > bound && c < bound) {
                current.push(crossing(q, p, axis, bound));
            }
        }

        if c <= bound {
            current.push(*p);
        } else if !current.is_empty() {
            pieces.push(std::mem::take(&mut current));
        }
    }

    if !current.is_empty() {
        pieces.push(current);
    }

    pieces
}

/// Splits the piece at every run of two or more consecutive vertices lying exactly on the bound.
///
/// The segments along the bound are dropped; they are restored when fragments are reconnected
/// along the boundary.
pub(crate) fn split_boundary_runs(piece: Vec<Point2>, axis: Axis, bound: f64) -> Vec<Vec<Point2>> {
    let mut result = Vec::new();
    let mut current = Vec::with_capacity(piece.len());
    for (i, p) in piece.iter().enumerate() {
        current.push(*p);
        let on_bound = axis.coord(p) == bound;
        if on_bound && i + 1 < piece.len() && axis.coord(&piece[i + 1]) == bound {
            result.push(std::mem::take(&mut current));
        }
    }

    if !current.is_empty() {
        result.push(current);
    }

    result
}

fn is_degenerate(piece: &[Point2], axis: Axis, bound: f64) -> bool {
    piece.len() < 2 || piece.iter().all(|p| axis.coord(p) == bound)
}

/// Trims one ring or open curve.
///
/// `closing` is `Some(shift)` for closed rings, where `shift` is the difference between the last
/// and the first point (zero for ordinary rings, a full turn for rings that wrap around a
/// periodic coordinate). The first and the last pieces of a closed ring that starts on the kept
/// side are fused back into one fragment.
pub(crate) fn trim_ring(
    ring: &[Point2],
    axis: Axis,
    bound: f64,
    closing: Option<Vector2>,
) -> TrimmedRing {
    let Some(first) = ring.first() else {
        return TrimmedRing::Fragments(vec![]);
    };

    if ring.iter().all(|p| p == first) {
        return if axis.coord(first) <= bound {
            TrimmedRing::Whole(ring.to_vec())
        } else {
            TrimmedRing::Fragments(vec![])
        };
    }

    if closing.is_some() && ring.iter().all(|p| axis.coord(p) <= bound) {
        return TrimmedRing::Whole(ring.to_vec());
    }

    let mut pieces = truncate(ring, axis, bound);
    if let Some(shift) = closing {
        if pieces.len() > 1 && axis.coord(first) <= bound {
            let head = pieces.remove(0);
            if let Some(tail) = pieces.last_mut() {
                tail.extend(head.iter().skip(1).map(|p| *p + shift));
            }
        }
    }

    let fragments = pieces
        .into_iter()
        .flat_map(|piece| split_boundary_runs(piece, axis, bound))
        .filter(|piece| !is_degenerate(piece, axis, bound))
        .collect();

    TrimmedRing::Fragments(fragments)
}

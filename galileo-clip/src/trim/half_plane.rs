//! Trimming of ring sets to a half-plane bounded by a vertical or horizontal line.

use serde::{Deserialize, Serialize};

use crate::cartesian::{Point2, Vector2};
use crate::error::TrimError;
use crate::ring_set::{close_nearly_closed_rings, is_closed, planar_distance, RingSet};
use crate::trim::fragment::{trim_ring, truncate, Axis, TrimmedRing};
use crate::trim::link::{
    assemble, classify, link_fragments, Boundary, BoundaryLocation, FragmentKind,
};

/// Which side of the bound is kept.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    /// Keep points with the coordinate less than or equal to the bound.
    Upper,
    /// Keep points with the coordinate greater than or equal to the bound.
    Lower,
}

/// Half-plane bounded by a line perpendicular to one of the axes.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct HalfPlane {
    /// Trimmed coordinate.
    pub axis: Axis,
    /// Value of the trimmed coordinate on the boundary line.
    pub bound: f64,
    /// Kept side.
    pub side: Side,
}

impl HalfPlane {
    /// Creates a new half-plane.
    pub fn new(axis: Axis, bound: f64, side: Side) -> Self {
        Self { axis, bound, side }
    }

    /// Half-plane `x <= bound`.
    pub fn x_max(bound: f64) -> Self {
        Self::new(Axis::X, bound, Side::Upper)
    }

    /// Half-plane `x >= bound`.
    pub fn x_min(bound: f64) -> Self {
        Self::new(Axis::X, bound, Side::Lower)
    }

    /// Half-plane `y <= bound`.
    pub fn y_max(bound: f64) -> Self {
        Self::new(Axis::Y, bound, Side::Upper)
    }

    /// Half-plane `y >= bound`.
    pub fn y_min(bound: f64) -> Self {
        Self::new(Axis::Y, bound, Side::Lower)
    }

    /// Returns true if the point is inside the half-plane or on its boundary.
    pub fn contains(&self, point: &Point2) -> bool {
        let c = self.axis.coord(point);
        match self.side {
            Side::Upper => c <= self.bound,
            Side::Lower => c >= self.bound,
        }
    }

    /// Lower bounds are turned into upper bounds by rotating the plane by 180 degrees, which
    /// keeps ring orientation and is exact.
    fn normalized(&self) -> (bool, f64) {
        match self.side {
            Side::Upper => (false, self.bound),
            Side::Lower => (true, -self.bound),
        }
    }
}

/// Line `coord == bound` with the kept side where `coord <= bound`. Travel direction is the one
/// of a clockwise ring: downwards along a vertical line, to the right along a horizontal one.
pub(crate) struct LineBoundary {
    pub axis: Axis,
    pub bound: f64,
}

impl Boundary for LineBoundary {
    fn locate(&self, point: &Point2) -> Option<BoundaryLocation> {
        if self.axis.coord(point) != self.bound {
            return None;
        }

        Some(match self.axis {
            Axis::X => BoundaryLocation {
                pos: -point.y,
                forward: Vector2::new(0.0, -1.0),
                inward: Vector2::new(-1.0, 0.0),
            },
            Axis::Y => BoundaryLocation {
                pos: point.x,
                forward: Vector2::new(1.0, 0.0),
                inward: Vector2::new(0.0, -1.0),
            },
        })
    }

    fn period(&self) -> Option<f64> {
        None
    }

    fn path(&self, _: &Point2, _: f64, _: &Point2, _: f64) -> Vec<Point2> {
        vec![]
    }
}

fn rotate_half_turn(rings: Vec<Vec<Point2>>) -> Vec<Vec<Point2>> {
    rings
        .into_iter()
        .map(|ring| ring.iter().map(Point2::negated).collect())
        .collect()
}

/// Trims polygon rings to `coord <= bound` and reconnects the fragments along the boundary line.
///
/// Output order: rings closed along the boundary, open chains, then untouched rings.
pub(crate) fn trim_polygon_upper(
    rings: Vec<Vec<Point2>>,
    axis: Axis,
    bound: f64,
) -> Result<Vec<Vec<Point2>>, TrimError> {
    let mut whole = Vec::new();
    let mut fragments = Vec::new();
    for ring in rings {
        let closing = is_closed(&ring).then(Vector2::default);
        match trim_ring(&ring, axis, bound, closing) {
            TrimmedRing::Whole(ring) => whole.push(ring),
            TrimmedRing::Fragments(parts) => fragments.extend(parts),
        }
    }

    let boundary = LineBoundary { axis, bound };
    if log::log_enabled!(log::Level::Debug) {
        let count = |kind| {
            fragments
                .iter()
                .chain(&whole)
                .filter(|f| classify(f, &boundary) == kind)
                .count()
        };
        log::debug!(
            "Trimmed to {axis:?} <= {bound}: {} outer, {} inner, {} loose, {} non-bounding",
            count(FragmentKind::Outer),
            count(FragmentKind::Inner),
            count(FragmentKind::LooseEnd),
            count(FragmentKind::NonBounding)
        );
    }

    let next = link_fragments(&fragments, &boundary)?;
    let assembled = assemble(&fragments, &next, &boundary)?;

    let mut result = assembled.closed;
    result.extend(assembled.open);
    result.extend(whole);
    Ok(result)
}

/// Applies the half-plane trim to already prepared rings.
pub(crate) fn trim_polygon_pass(
    rings: Vec<Vec<Point2>>,
    half_plane: HalfPlane,
) -> Result<Vec<Vec<Point2>>, TrimError> {
    let (rotate, bound) = half_plane.normalized();
    if rotate {
        let trimmed = trim_polygon_upper(rotate_half_turn(rings), half_plane.axis, bound)?;
        Ok(rotate_half_turn(trimmed))
    } else {
        trim_polygon_upper(rings, half_plane.axis, bound)
    }
}

/// Trims polygon rings to the half-plane.
///
/// Rings are expected to follow the orientation convention: outer rings clockwise, holes
/// counter-clockwise. Rings with end points closer than `tolerance` are closed first. Rings cut
/// by the boundary line are reconnected along it; holes are merged into the outer ring enclosing
/// them. Holes not enclosed by any outer ring, and open curves, are chained together and left
/// open, so that a caller trimming to a bounded region can close them along its boundary.
pub fn trim_polygon_to_half_plane(
    ring_set: &RingSet<Point2>,
    half_plane: HalfPlane,
    tolerance: f64,
) -> Result<RingSet<Point2>, TrimError> {
    let rings = close_nearly_closed_rings(ring_set.clone(), tolerance, planar_distance);
    let trimmed = trim_polygon_pass(rings.into_rings(), half_plane)?;
    Ok(RingSet::new(trimmed))
}

/// Trims polylines to the half-plane. Parts outside are dropped, no reconnection is made.
pub fn trim_polyline_to_half_plane(
    ring_set: &RingSet<Point2>,
    half_plane: HalfPlane,
) -> RingSet<Point2> {
    let (rotate, bound) = half_plane.normalized();
    let sign = if rotate { -1.0 } else { 1.0 };
    let mut result = Vec::new();
    for line in ring_set.iter() {
        let framed: Vec<Point2> = line
            .iter()
            .map(|p| Point2::new(p.x * sign, p.y * sign))
            .collect();
        let single_point = framed.iter().all(|p| *p == framed[0]);
        for piece in truncate(&framed, half_plane.axis, bound) {
            if piece.len() > 1 || single_point {
                result.push(
                    piece
                        .iter()
                        .map(|p| Point2::new(p.x * sign, p.y * sign))
                        .collect(),
                );
            }
        }
    }

    RingSet::new(result)
}

//! Trimming of ring sets on the sphere to a small circle.
//!
//! Rings are transformed into the range-azimuth frame of the circle center, where the circle
//! becomes the line `range == radius` and trimming reduces to cutting at a single bound. The
//! frame is periodic in azimuth, so fragments are reconnected along the circle by walking in the
//! direction of increasing azimuth, which is clockwise around the center.

use std::f64::consts::{FRAC_PI_2, PI, TAU};

use serde::{Deserialize, Serialize};

use crate::cartesian::{signed_area, Point2, Vector2};
use crate::error::TrimError;
use crate::geo::{
    great_circle_forward, great_circle_inverse, unwrap, wrap_to_pi, GeoPoint2d,
};
use crate::ring_set::{remove_duplicate_vertices, RingSet};
use crate::tolerance::Tolerances;
use crate::trim::enclosure::needs_enclosing_ring;
use crate::trim::fragment::{trim_ring, truncate, Axis, TrimmedRing};
use crate::trim::link::{assemble, link_fragments, Boundary, BoundaryLocation};
use crate::trim::quadrangle::prepare_geo_rings;

/// Radii closer to `PI` than this are reduced, so that the antipode stays outside the circle.
const ANTIPODE_MARGIN: f64 = PI / 360.0;

/// Azimuth step of arcs along the circle when no vertex spacing is given.
const DEFAULT_ARC_STEP: f64 = PI / 180.0;

/// Region of the sphere within an angular distance from the center point.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct SmallCircle {
    center: GeoPoint2d,
    radius: f64,
}

impl SmallCircle {
    /// Creates a new circle. The `radius` is the angular distance in radians and must be in
    /// `(0, PI]`.
    pub fn new(center: GeoPoint2d, radius: f64) -> Result<Self, TrimError> {
        if !center.lat.is_finite() || !center.lon.is_finite() || !radius.is_finite() {
            return Err(TrimError::InvalidLimits(format!(
                "circle parameters must be finite, got center {center:?} and radius {radius}"
            )));
        }

        if radius <= 0.0 || radius > PI {
            return Err(TrimError::InvalidLimits(format!(
                "circle radius must be in (0, PI], got {radius}"
            )));
        }

        Ok(Self {
            center: GeoPoint2d::latlon(center.lat.clamp(-FRAC_PI_2, FRAC_PI_2), center.lon),
            radius,
        })
    }

    /// Same as [`SmallCircle::new`], but takes all values in degrees.
    pub fn from_degrees(lat: f64, lon: f64, radius: f64) -> Result<Self, TrimError> {
        Self::new(GeoPoint2d::from_degrees(lat, lon), radius.to_radians())
    }

    /// Center of the circle.
    pub fn center(&self) -> GeoPoint2d {
        self.center
    }

    /// Angular radius of the circle in radians.
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Radius used for trimming.
    fn effective_radius(&self) -> f64 {
        self.radius.min(PI - ANTIPODE_MARGIN)
    }

    /// Closed clockwise ring along the circle.
    ///
    /// This is also the result of trimming a polygon covering the whole sphere to the circle.
    /// Vertices are not farther apart than `max_vertex_spacing` (angular distance), or one degree
    /// of azimuth if it is not given.
    pub fn boundary_ring(&self, max_vertex_spacing: Option<f64>) -> Vec<GeoPoint2d> {
        let radius = self.effective_radius();
        let ring = full_circle(radius, arc_step(max_vertex_spacing, radius));
        from_range_azimuth(&ring, &self.center)
    }

    fn to_range_azimuth(&self, point: &GeoPoint2d) -> Point2 {
        let (range, azimuth) =
            great_circle_inverse(self.center.lat, point.lat, point.lon - self.center.lon);
        Point2::new(azimuth, range)
    }
}

/// The circle as the line `range == radius` in the range-azimuth frame, with azimuth as `x`
/// and range as `y`.
struct CircleBoundary {
    radius: f64,
    step: f64,
}

impl Boundary for CircleBoundary {
    fn locate(&self, point: &Point2) -> Option<BoundaryLocation> {
        (point.y == self.radius).then_some(BoundaryLocation {
            pos: point.x,
            forward: Vector2::new(1.0, 0.0),
            inward: Vector2::new(0.0, -1.0),
        })
    }

    fn period(&self) -> Option<f64> {
        Some(TAU)
    }

    fn path(&self, from: &Point2, from_pos: f64, _: &Point2, to_pos: f64) -> Vec<Point2> {
        let distance = (to_pos - from_pos).rem_euclid(TAU);
        let count = (distance / self.step).ceil();
        if !(count >= 2.0) {
            return vec![];
        }

        (1..count as usize)
            .map(|i| Point2::new(from.x + distance * i as f64 / count, self.radius))
            .collect()
    }
}

fn arc_step(max_vertex_spacing: Option<f64>, radius: f64) -> f64 {
    match max_vertex_spacing {
        Some(spacing) if spacing > 0.0 => (spacing / radius.sin()).min(DEFAULT_ARC_STEP * 10.0),
        _ => DEFAULT_ARC_STEP,
    }
}

/// Azimuth step for arcs between fragments: not coarser than the spacing limit and not coarser
/// than the vertex spacing of the fragments next to the circle.
fn junction_step(base: f64, fragments: &[Vec<Point2>]) -> f64 {
    let local = fragments
        .iter()
        .filter(|f| f.len() > 1)
        .flat_map(|f| [(f[0], f[1]), (f[f.len() - 2], f[f.len() - 1])])
        .map(|(a, b)| (b.x - a.x).abs())
        .filter(|gap| *gap > 0.0)
        .fold(f64::INFINITY, f64::min);

    base.min(local).max(base / 100.0)
}

/// Full circle in the range-azimuth frame, azimuth growing from zero to a full turn.
fn full_circle(radius: f64, step: f64) -> Vec<Point2> {
    let count = (TAU / step).ceil().max(4.0);
    (0..=count as usize)
        .map(|i| Point2::new(TAU * i as f64 / count, radius))
        .collect()
}

/// Returns true if the ring comes back to its start, possibly a whole number of turns away in
/// azimuth.
fn closes_modulo_turn(ring: &[Point2]) -> bool {
    let (Some(first), Some(last)) = (ring.first(), ring.last()) else {
        return false;
    };

    let delta = last.x - first.x;
    ring.len() > 2 && first.y == last.y && (delta - (delta / TAU).round() * TAU).abs() < 1e-9
}

/// Azimuthal equidistant projection of the range-azimuth ring, centered at the circle center or
/// at its antipode.
fn to_azimuthal(ring: &[Point2], antipodal: bool) -> Vec<Point2> {
    let mut result: Vec<Point2> = ring
        .iter()
        .map(|p| {
            if antipodal {
                let r = PI - p.y;
                Point2::new(-r * p.x.sin(), r * p.x.cos())
            } else {
                Point2::new(p.y * p.x.sin(), p.y * p.x.cos())
            }
        })
        .collect();

    if closes_modulo_turn(ring) {
        let first = result[0];
        if let Some(last) = result.last_mut() {
            *last = first;
        }
    }

    result
}

fn from_range_azimuth(ring: &[Point2], center: &GeoPoint2d) -> Vec<GeoPoint2d> {
    let mut points: Vec<GeoPoint2d> = ring
        .iter()
        .map(|p| {
            let (lat, delta_lon) = great_circle_forward(center.lat, p.y, p.x);
            GeoPoint2d::latlon(lat, wrap_to_pi(center.lon + delta_lon))
        })
        .collect();

    let mut lons: Vec<f64> = points.iter().map(|p| p.lon).collect();
    unwrap(&mut lons);
    for (p, lon) in points.iter_mut().zip(lons) {
        p.lon = lon;
    }

    if closes_modulo_turn(ring) {
        let first = points[0];
        if let Some(last) = points.last_mut() {
            *last = first;
        }
    }

    points
}

/// Moves the ring into the range-azimuth frame. Closed rings get their closing azimuth snapped
/// to the opening one, or to whole turns away from it for rings around the center.
fn prepare_ring(ring: &[GeoPoint2d], circle: &SmallCircle, tolerance: f64) -> (Vec<Point2>, bool) {
    let mut points: Vec<Point2> = ring.iter().map(|p| circle.to_range_azimuth(p)).collect();
    let mut azimuths: Vec<f64> = points.iter().map(|p| p.x).collect();
    unwrap(&mut azimuths);
    for (p, azimuth) in points.iter_mut().zip(azimuths) {
        p.x = azimuth;
    }

    let closed = match (ring.first(), ring.last()) {
        (Some(first), Some(last)) if ring.len() > 2 && first.lat == last.lat => {
            let delta = last.lon - first.lon;
            (delta - (delta / TAU).round() * TAU).abs() <= tolerance
        }
        _ => false,
    };

    if closed {
        let first = points[0];
        let delta = points[points.len() - 1].x - first.x;
        let closing_x = if delta.abs() < PI {
            first.x
        } else {
            first.x + (delta / TAU).round() * TAU
        };
        if let Some(last) = points.last_mut() {
            *last = Point2::new(closing_x, first.y);
        }
    }

    (points, closed)
}

/// Returns true if the circle center is inside the polygon formed by the rings, judged from the
/// antipode: the center is then in the unbounded region, which belongs to the polygon if the
/// outermost ring is counter-clockwise.
fn center_is_inside(rings: &[Vec<Point2>]) -> bool {
    rings
        .iter()
        .filter(|ring| closes_modulo_turn(ring))
        .map(|ring| signed_area(&to_azimuthal(ring, true)))
        .max_by(|a, b| a.abs().total_cmp(&b.abs()))
        .is_some_and(|area| area < 0.0)
}

/// Trims polygon rings on the sphere to the small circle.
///
/// Outer rings must be clockwise and holes counter-clockwise in the plane with longitude as `x`
/// and latitude as `y`. Rings crossing the circle are closed along it, inserting vertices along
/// the arcs not farther apart than `max_vertex_spacing` (angular distance) and not coarser than
/// the vertices of the trimmed rings next to the circle.
///
/// If holes are left that are not enclosed by any outer ring, or the whole input was discarded
/// while the circle center is inside the polygon, the full circle is added as an outer ring.
/// Radii within half a degree of `PI` are reduced to keep the antipode of the center outside.
pub fn trim_polygon_to_small_circle(
    ring_set: &RingSet<GeoPoint2d>,
    circle: &SmallCircle,
    max_vertex_spacing: Option<f64>,
    tolerances: &Tolerances,
) -> Result<RingSet<GeoPoint2d>, TrimError> {
    let prepared = prepare_geo_rings(ring_set, tolerances)?;
    if prepared.rings.is_empty() && !prepared.whole_sphere {
        return Ok(RingSet::empty());
    }

    let radius = circle.effective_radius();
    let transformed: Vec<(Vec<Point2>, bool)> = prepared
        .rings
        .iter()
        .map(|ring| prepare_ring(ring, circle, tolerances.close))
        .collect();

    let mut whole = Vec::new();
    let mut fragments = Vec::new();
    for (ring, closed) in &transformed {
        let closing = closed.then(|| Vector2::new(ring[ring.len() - 1].x - ring[0].x, 0.0));
        match trim_ring(ring, Axis::Y, radius, closing) {
            TrimmedRing::Whole(ring) => whole.push(ring),
            TrimmedRing::Fragments(parts) => fragments.extend(parts),
        }
    }

    let base_step = arc_step(max_vertex_spacing, radius);
    let boundary = CircleBoundary {
        radius,
        step: junction_step(base_step, &fragments),
    };
    let next = link_fragments(&fragments, &boundary)?;
    let assembled = assemble(&fragments, &next, &boundary)?;
    log::debug!(
        "Trimmed to circle of radius {radius}: {} fragments, {} closed, {} untouched",
        fragments.len(),
        assembled.closed.len(),
        whole.len()
    );

    let mut rings = assembled.closed;
    rings.extend(whole);
    rings.extend(assembled.open);

    let projected: Vec<Vec<Point2>> = rings.iter().map(|ring| to_azimuthal(ring, false)).collect();
    if needs_enclosing_ring(&projected) {
        log::debug!("Holes are not enclosed, adding the circle as outer ring");
        rings.push(full_circle(radius, base_step));
    } else if rings.is_empty() {
        let input: Vec<Vec<Point2>> = transformed.into_iter().map(|(ring, _)| ring).collect();
        let covered = if input.is_empty() {
            prepared.whole_sphere
        } else {
            center_is_inside(&input)
        };
        if covered {
            log::debug!("Circle is inside the polygon, returning the full circle");
            rings.push(full_circle(radius, base_step));
        }
    }

    let result = rings
        .iter()
        .map(|ring| from_range_azimuth(ring, &circle.center))
        .collect();
    Ok(remove_duplicate_vertices(RingSet::new(result)))
}

/// Trims polylines on the sphere to the small circle. Parts outside are dropped, no reconnection
/// is made.
pub fn trim_polyline_to_small_circle(
    ring_set: &RingSet<GeoPoint2d>,
    circle: &SmallCircle,
) -> RingSet<GeoPoint2d> {
    let radius = circle.effective_radius();
    let mut result = Vec::new();
    for line in remove_duplicate_vertices(ring_set.clone()).iter() {
        let clamped: Vec<GeoPoint2d> = line
            .iter()
            .map(|p| {
                GeoPoint2d::latlon(
                    p.lat.clamp(-FRAC_PI_2, FRAC_PI_2),
                    p.lon,
                )
            })
            .collect();
        let (points, _) = prepare_ring(&clamped, circle, 0.0);
        let single_point = points.len() == 1;
        for piece in truncate(&points, Axis::Y, radius) {
            if piece.len() > 1 || single_point {
                result.push(from_range_azimuth(&piece, &circle.center));
            }
        }
    }

    RingSet::new(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::great_circle_distance;
    use crate::latlon;
    use approx::assert_abs_diff_eq;
    use assert_matches::assert_matches;

    fn ring(points: &[(f64, f64)]) -> Vec<GeoPoint2d> {
        points
            .iter()
            .map(|(lat, lon)| GeoPoint2d::from_degrees(*lat, *lon))
            .collect()
    }

    fn square_deg(lat: [f64; 2], lon: [f64; 2]) -> Vec<GeoPoint2d> {
        ring(&[
            (lat[0], lon[0]),
            (lat[1], lon[0]),
            (lat[1], lon[1]),
            (lat[0], lon[1]),
            (lat[0], lon[0]),
        ])
    }

    fn trim(rings: Vec<Vec<GeoPoint2d>>, circle: &SmallCircle) -> RingSet<GeoPoint2d> {
        trim_polygon_to_small_circle(&RingSet::new(rings), circle, None, &Tolerances::default())
            .unwrap()
    }

    fn planar_area(ring: &[GeoPoint2d]) -> f64 {
        let points: Vec<Point2> = ring.iter().map(GeoPoint2d::to_planar).collect();
        signed_area(&points)
    }

    #[test]
    fn circle_validation() {
        assert_matches!(
            SmallCircle::from_degrees(0.0, 0.0, 0.0),
            Err(TrimError::InvalidLimits(_))
        );
        assert_matches!(
            SmallCircle::from_degrees(0.0, 0.0, -1.0),
            Err(TrimError::InvalidLimits(_))
        );
        assert_matches!(
            SmallCircle::from_degrees(0.0, f64::NAN, 10.0),
            Err(TrimError::InvalidLimits(_))
        );
        assert_matches!(
            SmallCircle::from_degrees(0.0, 0.0, 181.0),
            Err(TrimError::InvalidLimits(_))
        );
        assert!(SmallCircle::from_degrees(0.0, 0.0, 180.0).is_ok());
    }

    #[test]
    fn boundary_ring_is_closed_and_on_the_circle() {
        let circle = SmallCircle::from_degrees(30.0, 40.0, 25.0).unwrap();
        let ring = circle.boundary_ring(Some(2f64.to_radians()));

        assert_eq!(ring.first(), ring.last());
        assert!(planar_area(&ring) > 0.0);
        for p in &ring {
            assert_abs_diff_eq!(
                great_circle_distance(&circle.center(), p),
                25f64.to_radians(),
                epsilon = 1e-9
            );
        }
        for pair in ring.windows(2) {
            assert!(great_circle_distance(&pair[0], &pair[1]) <= 2f64.to_radians() + 1e-9);
        }
    }

    #[test]
    fn radius_near_pi_is_reduced() {
        let circle = SmallCircle::from_degrees(0.0, 0.0, 180.0).unwrap();
        for p in circle.boundary_ring(None) {
            assert_abs_diff_eq!(
                great_circle_distance(&circle.center(), &p),
                PI - ANTIPODE_MARGIN,
                epsilon = 1e-9
            );
        }
    }

    #[test]
    fn whole_sphere_becomes_circle() {
        let circle = SmallCircle::from_degrees(0.0, 0.0, 20.0).unwrap();
        let sphere = ring(&[
            (-90.0, -180.0),
            (90.0, -180.0),
            (90.0, 180.0),
            (-90.0, 180.0),
            (-90.0, -180.0),
        ]);
        let result = trim(vec![sphere], &circle);
        assert_eq!(result.rings(), &[circle.boundary_ring(None)]);
    }

    #[test]
    fn hole_at_antipode_becomes_circle() {
        let circle = SmallCircle::from_degrees(0.0, 0.0, 90.0).unwrap();
        let hole = ring(&[
            (-1.0, 179.0),
            (1.0, 179.0),
            (1.0, 181.0),
            (-1.0, 181.0),
            (-1.0, 179.0),
        ]);
        assert!(planar_area(&hole) > 0.0);

        let mut reversed = hole.clone();
        reversed.reverse();
        let result = trim(vec![reversed], &circle);

        assert_eq!(result.len(), 1);
        assert_eq!(result.rings()[0], circle.boundary_ring(None));
        for p in &result.rings()[0] {
            assert_abs_diff_eq!(
                great_circle_distance(&circle.center(), p),
                FRAC_PI_2,
                epsilon = 1e-9
            );
        }
    }

    #[test]
    fn ring_inside_is_unchanged() {
        let circle = SmallCircle::from_degrees(0.0, 0.0, 20.0).unwrap();
        let input = square_deg([-5.0, 5.0], [-5.0, 5.0]);
        let result = trim(vec![input.clone()], &circle);

        assert_eq!(result.len(), 1);
        assert_eq!(result.rings()[0].len(), input.len());
        for (actual, expected) in result.rings()[0].iter().zip(&input) {
            assert_abs_diff_eq!(actual.lat, expected.lat, epsilon = 1e-9);
            assert_abs_diff_eq!(actual.lon, expected.lon, epsilon = 1e-9);
        }
    }

    #[test]
    fn crossing_ring_is_closed_along_the_circle() {
        let circle = SmallCircle::from_degrees(0.0, 0.0, 20.0).unwrap();
        let radius = 20f64.to_radians();
        let result = trim(vec![square_deg([-10.0, 10.0], [5.0, 40.0])], &circle);

        assert_eq!(result.len(), 1);
        let ring = &result.rings()[0];
        assert_eq!(ring.first(), ring.last());
        assert!(planar_area(ring) > 0.0);

        let distances: Vec<f64> = ring
            .iter()
            .map(|p| great_circle_distance(&circle.center(), p))
            .collect();
        assert!(distances.iter().all(|d| *d <= radius + 1e-9));
        assert!(distances.iter().any(|d| (d - radius).abs() < 1e-9));
        assert!(ring.iter().any(|p| {
            (p.lat - (-10f64).to_radians()).abs() < 1e-9 && (p.lon - 5f64.to_radians()).abs() < 1e-9
        }));
    }

    #[test]
    fn covering_ring_becomes_circle() {
        let circle = SmallCircle::from_degrees(0.0, 0.0, 20.0).unwrap();
        let result = trim(vec![square_deg([-30.0, 30.0], [-30.0, 30.0])], &circle);

        assert_eq!(result.rings(), [circle.boundary_ring(None)]);
    }

    #[test]
    fn ring_outside_is_dropped() {
        let circle = SmallCircle::from_degrees(0.0, 0.0, 20.0).unwrap();
        let result = trim(vec![square_deg([-10.0, 10.0], [50.0, 60.0])], &circle);

        assert!(result.is_empty());
    }

    #[test]
    fn unenclosed_hole_gets_circle_boundary() {
        let circle = SmallCircle::from_degrees(0.0, 0.0, 20.0).unwrap();
        let mut hole = square_deg([-5.0, 5.0], [-5.0, 5.0]);
        hole.reverse();
        let result = trim(vec![hole], &circle);

        assert_eq!(result.len(), 2);
        assert!(planar_area(&result.rings()[0]) < 0.0);
        assert_eq!(result.rings()[1], circle.boundary_ring(None));
    }

    #[test]
    fn polar_cap_inside_circle() {
        let circle = SmallCircle::from_degrees(90.0, 0.0, 10.0).unwrap();
        let cap = ring(&[
            (85.0, 180.0),
            (85.0, 90.0),
            (85.0, 0.0),
            (85.0, -90.0),
            (85.0, -180.0),
        ]);
        let result = trim(vec![cap], &circle);

        assert_eq!(result.len(), 1);
        let ring = &result.rings()[0];
        assert_eq!(ring.first(), ring.last());
        for p in ring {
            assert_abs_diff_eq!(p.lat, 85f64.to_radians(), epsilon = 1e-9);
        }
    }

    #[test]
    fn circle_inside_polar_cap() {
        let circle = SmallCircle::from_degrees(90.0, 0.0, 10.0).unwrap();
        let cap = ring(&[
            (75.0, 180.0),
            (75.0, 90.0),
            (75.0, 0.0),
            (75.0, -90.0),
            (75.0, -180.0),
        ]);
        let result = trim(vec![cap], &circle);

        assert_eq!(result.rings(), [circle.boundary_ring(None)]);
    }

    #[test]
    fn polyline_is_cut_at_the_circle() {
        let circle = SmallCircle::from_degrees(0.0, 0.0, 20.0).unwrap();
        let line: Vec<GeoPoint2d> = (-3..=3)
            .map(|i| latlon!(0.0, i as f64 * 15.0))
            .collect();
        let result = trim_polyline_to_small_circle(&RingSet::new(vec![line]), &circle);

        assert_eq!(result.len(), 1);
        let piece = &result.rings()[0];
        assert_eq!(piece.len(), 5);
        assert_abs_diff_eq!(piece[0].lon, (-20f64).to_radians(), epsilon = 1e-9);
        assert_abs_diff_eq!(piece[4].lon, 20f64.to_radians(), epsilon = 1e-9);
        for p in piece {
            assert_abs_diff_eq!(p.lat, 0.0, epsilon = 1e-9);
        }
    }
}

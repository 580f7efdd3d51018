//! Trimming of ring sets on the sphere to a latitude-longitude quadrangle.

use std::f64::consts::{FRAC_PI_2, PI, TAU};

use serde::{Deserialize, Serialize};

use crate::cartesian::{Point2, Rect};
use crate::error::TrimError;
use crate::geo::{great_circle_distance, unwrap, wrap_to_pi, GeoPoint2d};
use crate::ring_set::{
    close_nearly_closed_rings, nearly_equal, remove_duplicate_vertices, RingSet,
};
use crate::tolerance::{Tolerances, DEFAULT_TOLERANCE};
use crate::trim::enclosure::point_in_polygon;
use crate::trim::polar::{adjust_polar_vertices, encloses_whole_sphere, Pole};
use crate::trim::rectangle::{clip_to_rect, densify_edges, trim_polyline_to_rectangle};

/// Region of the sphere bounded by two parallels and two meridians.
///
/// The western limit is kept as given when it lies in `[-PI, PI]` and wrapped into `[-PI, PI)`
/// otherwise. The eastern limit always lies east of it, so a quadrangle crossing the antimeridian
/// has its eastern limit greater than `PI`. All values are in radians.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quadrangle {
    south: f64,
    north: f64,
    west: f64,
    lon_span: f64,
}

impl Quadrangle {
    /// Creates a new quadrangle from `[south, north]` latitude limits and `[west, east]`
    /// longitude limits in radians.
    ///
    /// Walking east from the western limit to the eastern one defines the longitude range, so
    /// `[170°, -170°]` is a 20 degree wide quadrangle crossing the antimeridian. A range of a
    /// full turn or more makes a full latitudinal zone.
    ///
    /// Returns [`TrimError::WholeSphere`] if the quadrangle would cover the whole sphere.
    pub fn new(lat_limits: [f64; 2], lon_limits: [f64; 2]) -> Result<Self, TrimError> {
        if lat_limits.iter().chain(&lon_limits).any(|v| !v.is_finite()) {
            return Err(TrimError::InvalidLimits(format!(
                "limits must be finite, got {lat_limits:?} and {lon_limits:?}"
            )));
        }

        let south = lat_limits[0].max(-FRAC_PI_2);
        let north = lat_limits[1].min(FRAC_PI_2);
        if south >= north {
            return Err(TrimError::InvalidLimits(format!(
                "southern limit {} must be less than northern limit {}",
                lat_limits[0], lat_limits[1]
            )));
        }

        let [west, east] = lon_limits;
        let raw_span = east - west;
        let wrapped_span = raw_span.rem_euclid(TAU);
        let lon_span = if raw_span.max(wrapped_span) >= TAU - DEFAULT_TOLERANCE {
            TAU
        } else {
            wrapped_span
        };

        if lon_span <= DEFAULT_TOLERANCE {
            return Err(TrimError::InvalidLimits(format!(
                "longitude limits {west} and {east} are equal"
            )));
        }

        if lon_span == TAU
            && south <= -FRAC_PI_2 + DEFAULT_TOLERANCE
            && north >= FRAC_PI_2 - DEFAULT_TOLERANCE
        {
            return Err(TrimError::WholeSphere);
        }

        Ok(Self {
            south,
            north,
            west: normalize_west(west),
            lon_span,
        })
    }

    /// Same as [`Quadrangle::new`], but takes the limits in degrees.
    pub fn from_degrees(lat_limits: [f64; 2], lon_limits: [f64; 2]) -> Result<Self, TrimError> {
        Self::new(
            lat_limits.map(f64::to_radians),
            lon_limits.map(f64::to_radians),
        )
    }

    /// Southern limit.
    pub fn south(&self) -> f64 {
        self.south
    }

    /// Northern limit.
    pub fn north(&self) -> f64 {
        self.north
    }

    /// Western limit, in `[-PI, PI]`.
    pub fn west(&self) -> f64 {
        self.west
    }

    /// Eastern limit. Greater than the western one, possibly by up to a full turn.
    pub fn east(&self) -> f64 {
        self.west + self.lon_span
    }

    /// Returns true if the quadrangle spans all longitudes.
    pub fn is_full_zone(&self) -> bool {
        self.lon_span >= TAU
    }

    /// The quadrangle as a rectangle in the plane with longitude as `x` and latitude as `y`.
    pub fn planar_rect(&self) -> Rect {
        Rect::new(self.west, self.south, self.east(), self.north)
    }

    /// Closed clockwise ring along the quadrangle boundary.
    pub fn boundary_ring(&self) -> Vec<GeoPoint2d> {
        self.planar_rect()
            .boundary_ring()
            .iter()
            .map(GeoPoint2d::from_planar)
            .collect()
    }
}

fn normalize_west(west: f64) -> f64 {
    if (-PI - DEFAULT_TOLERANCE..=PI + DEFAULT_TOLERANCE).contains(&west) {
        return west.clamp(-PI, PI);
    }

    let wrapped = wrap_to_pi(west);
    if wrapped >= PI {
        wrapped - TAU
    } else {
        wrapped
    }
}

/// Polygon rings ready for trimming.
pub(crate) struct PreparedRings {
    pub rings: RingSet<GeoPoint2d>,
    /// The input had a ring tracing the boundary of the whole sphere. Such rings are removed
    /// from `rings`.
    pub whole_sphere: bool,
}

/// Clamps latitudes, closes nearly closed rings, removes duplicate vertices, unwraps longitudes
/// and normalizes polar vertices.
pub(crate) fn prepare_geo_rings(
    ring_set: &RingSet<GeoPoint2d>,
    tolerances: &Tolerances,
) -> Result<PreparedRings, TrimError> {
    let clamped = ring_set
        .clone()
        .map(|p| GeoPoint2d::latlon(p.lat.clamp(-FRAC_PI_2, FRAC_PI_2), p.lon));
    let closed = close_nearly_closed_rings(clamped, tolerances.close, great_circle_distance);
    let mut rings = remove_duplicate_vertices(closed).into_rings();

    let count = rings.len();
    rings.retain(|ring| !encloses_whole_sphere(ring, tolerances.snap));
    let whole_sphere = rings.len() < count;
    if whole_sphere {
        log::debug!("Polygon has a ring around the whole sphere");
    }

    for ring in &mut rings {
        let mut lons: Vec<f64> = ring.iter().map(|p| p.lon).collect();
        unwrap(&mut lons);
        for (p, lon) in ring.iter_mut().zip(lons) {
            p.lon = lon;
        }
    }

    let adjusted = adjust_polar_vertices(RingSet::new(rings), Pole::North, tolerances.snap)?;
    Ok(PreparedRings {
        rings: adjust_polar_vertices(adjusted, Pole::South, tolerances.snap)?,
        whole_sphere,
    })
}

fn snap_periodic(value: f64, limit: f64, tolerance: f64) -> f64 {
    let target = limit + ((value - limit) / TAU).round() * TAU;
    if nearly_equal(value, target, tolerance) {
        target
    } else {
        value
    }
}

fn snap_to_limits(point: Point2, rect: &Rect, tolerance: f64) -> Point2 {
    let mut x = snap_periodic(point.x, rect.x_min, tolerance);
    if x == point.x {
        x = snap_periodic(point.x, rect.x_max, tolerance);
    }

    let y = [rect.y_min, rect.y_max]
        .into_iter()
        .find(|limit| nearly_equal(point.y, *limit, tolerance))
        .unwrap_or(point.y);

    Point2::new(x, y)
}

/// Longitude shift between the end and the start of a ring encircling a pole, if the ring is
/// one.
fn encircling_shift(ring: &[Point2], tolerance: f64) -> Option<f64> {
    let (first, last) = (ring.first()?, ring.last()?);
    let delta = last.x - first.x;
    (ring.len() > 2 && first.y == last.y && (delta.abs() - TAU).abs() <= tolerance)
        .then_some(delta.signum() * TAU)
}

/// Turns a ring encircling a pole into a closed ring bounding the polar cap.
///
/// The ring is cut at a meridian equivalent to `west` and moved to span `[west, west + 2 PI]`,
/// then closed by following the meridian at one end to the pole, the pole itself and the
/// meridian at the other end back down. A ring going west bounds the northern cap, a ring going
/// east the southern one.
///
/// Returns [`TrimError::InvalidInput`] if no segment of the ring crosses the cut meridian.
fn close_through_pole(
    ring: &[Point2],
    shift: f64,
    west: f64,
) -> Result<Vec<Point2>, TrimError> {
    let (start_x, end_x) = if shift < 0.0 {
        (west + TAU, west)
    } else {
        (west, west + TAU)
    };

    let Some(first) = ring.first() else {
        return Ok(vec![]);
    };
    let lo = first.x.min(first.x + shift);
    let cut = west + ((lo - west) / TAU).ceil() * TAU;
    let offset = cut - start_x;

    let segment = ring
        .windows(2)
        .position(|w| (w[0].x - cut) * (w[1].x - cut) <= 0.0 && w[0].x != w[1].x)
        .ok_or_else(|| {
            TrimError::InvalidInput(format!(
                "ring encircling a pole does not cross the meridian at {cut}"
            ))
        })?;
    let (a, b) = (ring[segment], ring[segment + 1]);
    let start_y = if a.x == cut {
        a.y
    } else if b.x == cut {
        b.y
    } else {
        let t = (cut - a.x) / (b.x - a.x);
        a.y + (b.y - a.y) * t
    };

    let moved = |p: &Point2, turn: f64| Point2::new(p.x + turn - offset, p.y);
    let mut middle: Vec<Point2> = ring[segment + 1..]
        .iter()
        .map(|p| moved(p, 0.0))
        .chain(ring[1..=segment].iter().map(|p| moved(p, shift)))
        .collect();
    if b.x == cut {
        middle.remove(0);
    }
    if a.x == cut {
        middle.pop();
    }

    let pole = if shift < 0.0 { FRAC_PI_2 } else { -FRAC_PI_2 };
    let mut result: Vec<Point2> = Vec::with_capacity(middle.len() + 5);
    let points = std::iter::once(Point2::new(start_x, start_y))
        .chain(middle)
        .chain([
            Point2::new(end_x, start_y),
            Point2::new(end_x, pole),
            Point2::new(start_x, pole),
            Point2::new(start_x, start_y),
        ]);
    for p in points {
        if result.last() != Some(&p) {
            result.push(p);
        }
    }

    Ok(result)
}

/// Copies of the ring shifted by whole turns, one for every part of the longitude range
/// `[west, east]` the ring covers. Copies only touching the range are skipped.
fn replicate(
    ring: &[Point2],
    west: f64,
    east: f64,
    full_zone: bool,
    tolerance: f64,
) -> Vec<Vec<Point2>> {
    let Some(bbox) = Rect::from_points(ring.iter()) else {
        return vec![];
    };

    let first = ((west - bbox.x_max) / TAU).ceil() as i64;
    let last = ((east - bbox.x_min) / TAU).floor() as i64;
    (first - 1..=last + 1)
        .filter(|k| {
            let shift = *k as f64 * TAU;
            let (lo, hi) = (bbox.x_min + shift, bbox.x_max + shift);
            if bbox.width() > 0.0 {
                hi > west + tolerance && lo < east - tolerance
            } else if full_zone {
                lo >= west - tolerance && lo < east - tolerance
            } else {
                lo >= west - tolerance && lo <= east + tolerance
            }
        })
        .map(|k| {
            let shift = k as f64 * TAU;
            ring.iter().map(|p| Point2::new(p.x + shift, p.y)).collect()
        })
        .collect()
}

fn to_planar(ring_set: RingSet<GeoPoint2d>) -> Vec<Vec<Point2>> {
    ring_set
        .into_iter()
        .map(|ring| ring.iter().map(GeoPoint2d::to_planar).collect())
        .collect()
}

fn to_geo(rings: Vec<Vec<Point2>>) -> RingSet<GeoPoint2d> {
    rings
        .into_iter()
        .map(|ring| ring.iter().map(GeoPoint2d::from_planar).collect())
        .collect()
}

/// Trims polygon rings on the sphere to the quadrangle.
///
/// Outer rings must be clockwise and holes counter-clockwise in the plane with longitude as `x`
/// and latitude as `y`. A ring whose last longitude is one full turn away from the first one
/// encircles a pole: going west it bounds the northern polar cap, going east the southern one.
///
/// Rings are trimmed in longitude and latitude and closed along the quadrangle boundary. Vertices
/// within `tolerances.snap` of a limit are moved exactly onto it. If `max_vertex_spacing` is
/// given, vertices are inserted along the quadrangle edges so that adjacent edge vertices are
/// not farther apart (in radians of latitude or longitude).
///
/// Output longitudes lie in `[west, east]` of the quadrangle, so rings crossing the antimeridian
/// stay continuous.
pub fn trim_polygon_to_quadrangle(
    ring_set: &RingSet<GeoPoint2d>,
    quadrangle: &Quadrangle,
    max_vertex_spacing: Option<f64>,
    tolerances: &Tolerances,
) -> Result<RingSet<GeoPoint2d>, TrimError> {
    let prepared = prepare_geo_rings(ring_set, tolerances)?;
    if prepared.rings.is_empty() && !prepared.whole_sphere {
        return Ok(RingSet::empty());
    }

    let rect = quadrangle.planar_rect();
    let snap = |ring: Vec<Point2>| -> Vec<Point2> {
        ring.into_iter()
            .map(|p| snap_to_limits(p, &rect, tolerances.snap))
            .collect()
    };

    let rings = to_planar(prepared.rings)
        .into_iter()
        .map(snap)
        .map(|ring| match encircling_shift(&ring, tolerances.close) {
            Some(shift) => {
                log::trace!("Ring encircles a pole, closing it through the pole");
                close_through_pole(&ring, shift, quadrangle.west())
            }
            None => Ok(ring),
        })
        .collect::<Result<Vec<_>, _>>()?;

    let replicated = rings
        .iter()
        .flat_map(|ring| {
            replicate(
                ring,
                quadrangle.west(),
                quadrangle.east(),
                quadrangle.is_full_zone(),
                tolerances.snap,
            )
        })
        .map(snap)
        .collect();

    let mut clipped = clip_to_rect(replicated, rect)?;
    let covered = if rings.is_empty() {
        prepared.whole_sphere
    } else {
        point_in_polygon(&rect.center(), &rings, Some(TAU))
    };
    if clipped.is_empty() && covered {
        log::debug!("Quadrangle is inside the polygon, returning its boundary");
        clipped.push(rect.boundary_ring());
    }

    let densified = densify_edges(clipped, &rect, max_vertex_spacing, max_vertex_spacing);
    let snapped = densified.into_iter().map(snap).collect();

    Ok(to_geo(snapped))
}

/// Trims polylines on the sphere to the quadrangle. Parts outside are dropped, no reconnection is
/// made. Longitudes of the output lie in `[west, east]` of the quadrangle.
pub fn trim_polyline_to_quadrangle(
    ring_set: &RingSet<GeoPoint2d>,
    quadrangle: &Quadrangle,
) -> RingSet<GeoPoint2d> {
    let lines = to_planar(remove_duplicate_vertices(ring_set.clone()))
        .into_iter()
        .flat_map(|line| {
            let mut lons: Vec<f64> = line.iter().map(|p| p.x).collect();
            unwrap(&mut lons);
            let line: Vec<Point2> = line
                .iter()
                .zip(lons)
                .map(|(p, lon)| Point2::new(lon, p.y.clamp(-FRAC_PI_2, FRAC_PI_2)))
                .collect();
            replicate(
                &line,
                quadrangle.west(),
                quadrangle.east(),
                quadrangle.is_full_zone(),
                DEFAULT_TOLERANCE,
            )
        })
        .collect();

    let trimmed = trim_polyline_to_rectangle(&RingSet::new(lines), quadrangle.planar_rect());
    to_geo(trimmed.into_rings())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cartesian::signed_area;
    use crate::latlon;
    use approx::assert_abs_diff_eq;
    use assert_matches::assert_matches;

    fn ring(points: &[(f64, f64)]) -> Vec<GeoPoint2d> {
        points
            .iter()
            .map(|(lat, lon)| GeoPoint2d::from_degrees(*lat, *lon))
            .collect()
    }

    fn planar(ring: &[GeoPoint2d]) -> Vec<Point2> {
        ring.iter().map(GeoPoint2d::to_planar).collect()
    }

    fn trim(rings: Vec<Vec<GeoPoint2d>>, quadrangle: &Quadrangle) -> RingSet<GeoPoint2d> {
        trim_polygon_to_quadrangle(
            &RingSet::new(rings),
            quadrangle,
            None,
            &Tolerances::default(),
        )
        .unwrap()
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

    #[test]
    fn limits_validation() {
        assert_matches!(
            Quadrangle::from_degrees([-90.0, 90.0], [-180.0, 180.0]),
            Err(TrimError::WholeSphere)
        );
        assert_matches!(
            Quadrangle::from_degrees([10.0, -10.0], [0.0, 10.0]),
            Err(TrimError::InvalidLimits(_))
        );
        assert_matches!(
            Quadrangle::from_degrees([-10.0, 10.0], [10.0, 10.0]),
            Err(TrimError::InvalidLimits(_))
        );
        assert_matches!(
            Quadrangle::new([f64::NAN, 0.0], [0.0, 1.0]),
            Err(TrimError::InvalidLimits(_))
        );

        let quadrangle = Quadrangle::from_degrees([-10.0, 10.0], [170.0, -170.0]).unwrap();
        assert_abs_diff_eq!(quadrangle.west(), 170f64.to_radians(), epsilon = 1e-12);
        assert_abs_diff_eq!(quadrangle.east(), 190f64.to_radians(), epsilon = 1e-12);
        assert!(!quadrangle.is_full_zone());

        let zone = Quadrangle::from_degrees([0.0, 90.0], [-180.0, 180.0]).unwrap();
        assert!(zone.is_full_zone());
        assert_abs_diff_eq!(zone.west(), -PI, epsilon = 1e-12);
        assert_abs_diff_eq!(zone.east(), PI, epsilon = 1e-12);

        let shifted = Quadrangle::from_degrees([-10.0, 10.0], [190.0, 200.0]).unwrap();
        assert_abs_diff_eq!(shifted.west(), -170f64.to_radians(), epsilon = 1e-12);
    }

    #[test]
    fn western_limit_at_antimeridian_keeps_its_side() {
        let quadrangle = Quadrangle::from_degrees([-10.0, 10.0], [-180.0, -170.0]).unwrap();
        assert_abs_diff_eq!(quadrangle.west(), -PI, epsilon = 1e-12);
        assert_abs_diff_eq!(quadrangle.east(), -170f64.to_radians(), epsilon = 1e-12);

        let input = square_deg([-5.0, 5.0], [-178.0, -172.0]);
        let result = trim(vec![input.clone()], &quadrangle);

        assert_eq!(result.len(), 1);
        let clipped = &result.rings()[0];
        assert!(clipped
            .iter()
            .all(|p| p.lon >= -PI - 1e-12 && p.lon <= quadrangle.east() + 1e-12));
        assert_abs_diff_eq!(
            signed_area(&planar(clipped)),
            signed_area(&planar(&input)),
            epsilon = 1e-12
        );
    }

    #[test]
    fn whole_sphere_becomes_quadrangle() {
        let quadrangle = Quadrangle::from_degrees([-10.0, 10.0], [0.0, 20.0]).unwrap();
        let sphere = ring(&[
            (-90.0, -180.0),
            (90.0, -180.0),
            (90.0, 180.0),
            (-90.0, 180.0),
            (-90.0, -180.0),
        ]);
        let result = trim(vec![sphere.clone()], &quadrangle);
        assert_eq!(result.rings(), &[quadrangle.boundary_ring()]);

        let densified = ring(&[
            (-90.0, -180.0),
            (0.0, -180.0),
            (90.0, -180.0),
            (90.0, 0.0),
            (90.0, 180.0),
            (0.0, 180.0),
            (-90.0, 180.0),
            (-90.0, 0.0),
            (-90.0, -180.0),
        ]);
        let result = trim(vec![densified], &quadrangle);
        assert_eq!(result.rings(), &[quadrangle.boundary_ring()]);

        let hole = ring(&[(-1.0, 9.0), (-1.0, 11.0), (1.0, 11.0), (1.0, 9.0), (-1.0, 9.0)]);
        let result = trim(vec![sphere, hole.clone()], &quadrangle);
        assert_eq!(result.rings(), &[hole, quadrangle.boundary_ring()]);
    }

    #[test]
    fn ring_missing_the_cut_meridian_is_rejected() {
        let ring = [
            Point2::new(0.5, 1.0),
            Point2::new(1.0, 1.2),
            Point2::new(1.5, 1.0),
        ];
        assert_matches!(
            close_through_pole(&ring, TAU, 0.0),
            Err(TrimError::InvalidInput(_))
        );
    }

    #[test]
    fn point_across_antimeridian_survives() {
        let quadrangle = Quadrangle::from_degrees([-10.0, 10.0], [170.0, -170.0]).unwrap();
        let result = trim(vec![vec![latlon!(0.0, 180.0)]], &quadrangle);
        assert_eq!(result.rings(), &[vec![latlon!(0.0, 180.0)]]);
    }

    #[test]
    fn covering_ring_becomes_quadrangle() {
        let quadrangle = Quadrangle::from_degrees([-10.0, 10.0], [-10.0, 10.0]).unwrap();
        let result = trim(vec![square_deg([-20.0, 20.0], [-20.0, 20.0])], &quadrangle);
        assert_eq!(result.rings(), &[quadrangle.boundary_ring()]);
    }

    #[test]
    fn ring_across_antimeridian_is_kept() {
        let quadrangle = Quadrangle::from_degrees([-10.0, 10.0], [170.0, -170.0]).unwrap();
        let input = square_deg([-5.0, 5.0], [175.0, -175.0]);
        let result = trim(vec![input], &quadrangle);

        assert_eq!(result.len(), 1);
        let clipped = &result.rings()[0];
        assert_eq!(clipped.len(), 5);
        assert_abs_diff_eq!(clipped[2], latlon!(5.0, 185.0), epsilon = 1e-12);
        assert!(signed_area(&planar(clipped)) > 0.0);
    }

    #[test]
    fn ring_is_cut_at_antimeridian() {
        let quadrangle = Quadrangle::from_degrees([-10.0, 10.0], [0.0, 180.0]).unwrap();
        let input = square_deg([-5.0, 5.0], [175.0, -175.0]);
        let result = trim(vec![input], &quadrangle);

        assert_eq!(result.len(), 1);
        let clipped = planar(&result.rings()[0]);
        assert!(clipped.iter().all(|p| p.x <= quadrangle.east()));
        assert_abs_diff_eq!(
            signed_area(&clipped),
            5f64.to_radians() * 10f64.to_radians(),
            epsilon = 1e-12
        );
    }

    #[test]
    fn polar_cap_in_full_zone() {
        let quadrangle = Quadrangle::from_degrees([70.0, 90.0], [-180.0, 180.0]).unwrap();
        let cap = ring(&[
            (80.0, 0.0),
            (80.0, -90.0),
            (80.0, -180.0),
            (80.0, 90.0),
            (80.0, 0.0),
        ]);
        let result = trim(vec![cap], &quadrangle);

        assert_eq!(result.len(), 1);
        let clipped = &result.rings()[0];
        assert_eq!(clipped.first(), clipped.last());
        assert!(clipped.iter().all(|p| p.lat >= 80f64.to_radians() - 1e-12));
        assert!(clipped.iter().all(|p| p.lon >= -PI - 1e-12 && p.lon <= PI + 1e-12));
        assert_abs_diff_eq!(
            signed_area(&planar(clipped)),
            TAU * 10f64.to_radians(),
            epsilon = 1e-9
        );
    }

    #[test]
    fn unenclosed_hole_gets_quadrangle_boundary() {
        let quadrangle = Quadrangle::from_degrees([-10.0, 10.0], [-10.0, 10.0]).unwrap();
        let hole = ring(&[(-1.0, -1.0), (-1.0, 1.0), (1.0, 1.0), (1.0, -1.0), (-1.0, -1.0)]);
        let result = trim(vec![hole.clone()], &quadrangle);

        assert_eq!(result.rings(), &[hole, quadrangle.boundary_ring()]);
    }

    #[test]
    fn covered_quadrangle_is_returned() {
        let quadrangle = Quadrangle::from_degrees([-10.0, 10.0], [-10.0, 10.0]).unwrap();
        let hole = ring(&[(-1.0, 49.0), (-1.0, 51.0), (1.0, 51.0), (1.0, 49.0), (-1.0, 49.0)]);
        let result = trim(vec![hole], &quadrangle);
        assert_eq!(result.rings(), &[quadrangle.boundary_ring()]);

        let outer = square_deg([-1.0, 1.0], [49.0, 51.0]);
        assert!(trim(vec![outer], &quadrangle).is_empty());
    }

    #[test]
    fn edges_are_densified() {
        let quadrangle = Quadrangle::from_degrees([-10.0, 10.0], [-10.0, 10.0]).unwrap();
        let result = trim_polygon_to_quadrangle(
            &RingSet::new(vec![square_deg([-20.0, 20.0], [-20.0, 20.0])]),
            &quadrangle,
            Some(5f64.to_radians() + 1e-9),
            &Tolerances::default(),
        )
        .unwrap();

        assert_eq!(result.rings()[0].len(), 17);
    }

    #[test]
    fn polyline_across_antimeridian() {
        let quadrangle = Quadrangle::from_degrees([-10.0, 10.0], [170.0, -170.0]).unwrap();
        let line = ring(&[(0.0, 160.0), (0.0, -160.0)]);
        let result = trim_polyline_to_quadrangle(&RingSet::new(vec![line]), &quadrangle);

        assert_eq!(result.len(), 1);
        let clipped = &result.rings()[0];
        assert_abs_diff_eq!(clipped[0].lon, quadrangle.west(), epsilon = 1e-12);
        assert_abs_diff_eq!(clipped[1].lon, quadrangle.east(), epsilon = 1e-12);
    }
}

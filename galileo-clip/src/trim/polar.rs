//! Normalization of ring vertices lying at a pole.

use std::f64::consts::{FRAC_PI_2, TAU};

use serde::{Deserialize, Serialize};

use crate::cartesian::{signed_area, Point2};
use crate::error::TrimError;
use crate::geo::GeoPoint2d;
use crate::ring_set::RingSet;

/// One of the poles of the sphere.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Pole {
    /// Latitude `PI / 2`.
    North,
    /// Latitude `-PI / 2`.
    South,
}

impl Pole {
    /// Latitude of the pole in radians.
    pub fn latitude(self) -> f64 {
        match self {
            Pole::North => FRAC_PI_2,
            Pole::South => -FRAC_PI_2,
        }
    }

    fn is_near(self, point: &GeoPoint2d, tolerance: f64) -> bool {
        (point.lat - self.latitude()).abs() <= tolerance
    }
}

/// Normalizes every ring that has vertices within `tolerance` of the `pole`.
///
/// Such vertices are moved exactly onto the pole. Then:
/// * a run of polar vertices spanning a full turn of longitude is an artifact of an earlier
///   clipping. The run is removed together with the meridian segments leading to it, leaving a
///   ring that encircles the pole with its last longitude one full turn away from the first one;
/// * otherwise the ring genuinely visits the pole. The run is replaced with one or two vertices
///   at the longitudes of its neighbours (keeping the middle one of a run of three), so that the
///   segments adjacent to the pole follow meridians.
///
/// Rings visiting the pole with more than three vertices, or visiting it more than once, are
/// rejected.
pub fn adjust_polar_vertices(
    ring_set: RingSet<GeoPoint2d>,
    pole: Pole,
    tolerance: f64,
) -> Result<RingSet<GeoPoint2d>, TrimError> {
    ring_set
        .into_iter()
        .enumerate()
        .map(|(index, ring)| adjust_ring(ring, index, pole, tolerance))
        .collect::<Result<Vec<_>, _>>()
        .map(RingSet::new)
}

/// Returns true if the ring traces the boundary of the whole sphere.
///
/// Such a ring is clockwise in the plane with longitude as `x` and latitude as `y`, and nothing
/// but polar vertices is left of it once the full-turn runs at both poles are removed. Clipping
/// the whole sphere along the antimeridian produces it, e.g. `(-90, -180), (90, -180), (90, 180),
/// (-90, 180)`. A counter-clockwise ring of the same shape is a hole covering the sphere.
pub fn encloses_whole_sphere(ring: &[GeoPoint2d], tolerance: f64) -> bool {
    let planar: Vec<Point2> = ring.iter().map(GeoPoint2d::to_planar).collect();
    if signed_area(&planar) <= 0.0 {
        return false;
    }

    let stripped = adjust_ring(ring.to_vec(), 0, Pole::North, tolerance)
        .and_then(|ring| adjust_ring(ring, 0, Pole::South, tolerance));
    matches!(stripped, Ok(rest) if rest.iter().all(|p| p.lat.abs() == FRAC_PI_2))
}

/// Longitude shift between the last and the first point of a ring that comes back to its start,
/// possibly one or more full turns away.
fn closing_shift(ring: &[GeoPoint2d], tolerance: f64) -> Option<f64> {
    let (first, last) = (ring.first()?, ring.last()?);
    if ring.len() < 3 || first.lat != last.lat {
        return None;
    }

    let delta = last.lon - first.lon;
    let turns = (delta / TAU).round();
    ((delta - turns * TAU).abs() <= tolerance).then_some(turns * TAU)
}

fn shifted(point: &GeoPoint2d, shift: f64) -> GeoPoint2d {
    GeoPoint2d::latlon(point.lat, point.lon + shift)
}

/// Rotates a cyclic ring so that it starts with a non-polar vertex. Returns `None` if all
/// vertices are polar.
fn rotate_to_non_polar(
    ring: &[GeoPoint2d],
    shift: f64,
    is_polar: impl Fn(&GeoPoint2d) -> bool,
) -> Option<Vec<GeoPoint2d>> {
    let body = &ring[..ring.len() - 1];
    let start = body.iter().position(|p| !is_polar(p))?;
    if start == 0 {
        return Some(ring.to_vec());
    }

    let mut rotated = Vec::with_capacity(ring.len());
    rotated.extend_from_slice(&body[start..]);
    rotated.extend(body[..start].iter().map(|p| shifted(p, shift)));
    rotated.push(shifted(&body[start], shift));
    Some(rotated)
}

/// Inclusive index ranges of consecutive polar vertices.
fn polar_runs(ring: &[GeoPoint2d], is_polar: impl Fn(&GeoPoint2d) -> bool) -> Vec<(usize, usize)> {
    let mut runs = Vec::new();
    let mut start = None;
    for (i, p) in ring.iter().enumerate() {
        match (is_polar(p), start) {
            (true, None) => start = Some(i),
            (false, Some(s)) => {
                runs.push((s, i - 1));
                start = None;
            }
            _ => {}
        }
    }

    if let Some(s) = start {
        runs.push((s, ring.len() - 1));
    }

    runs
}

fn longitude_extent(points: &[GeoPoint2d]) -> f64 {
    let min = points.iter().map(|p| p.lon).fold(f64::INFINITY, f64::min);
    let max = points.iter().map(|p| p.lon).fold(f64::NEG_INFINITY, f64::max);
    max - min
}

/// Removes the polar run `(s, e)` and the meridian vertices leading to it, keeping the farthest
/// vertex of each meridian.
fn strip_artifact(
    ring: &[GeoPoint2d],
    (s, e): (usize, usize),
    closing: Option<f64>,
) -> Vec<GeoPoint2d> {
    let last = ring.len() - 1;
    let mut before = s.checked_sub(1);
    if let Some(mut a) = before {
        while a >= 1 && ring[a].lon == ring[s].lon && ring[a - 1].lon == ring[s].lon {
            a -= 1;
        }
        before = Some(a);
    }

    let mut after = (e < last).then_some(e + 1);
    if let Some(mut b) = after {
        while b < last && ring[b].lon == ring[e].lon && ring[b + 1].lon == ring[e].lon {
            b += 1;
        }
        after = Some(b);
    }

    match (closing, before, after) {
        // The ring is re-formed to start after the pole and end before it.
        (Some(shift), Some(a), Some(b)) => {
            let mut result = ring[b..].to_vec();
            result.extend(ring[1..=a].iter().map(|p| shifted(p, shift)));
            result
        }
        (_, before, after) => {
            let mut result = before.map(|a| ring[..=a].to_vec()).unwrap_or_default();
            if let Some(b) = after {
                result.extend_from_slice(&ring[b..]);
            }
            result
        }
    }
}

fn normalize_visit(
    ring: &[GeoPoint2d],
    (s, e): (usize, usize),
    pole: Pole,
) -> Vec<GeoPoint2d> {
    let at_pole = |lon| GeoPoint2d::latlon(pole.latitude(), lon);
    let prev = s.checked_sub(1).map(|i| ring[i].lon);
    let next = ring.get(e + 1).map(|p| p.lon);

    let mut replacement = Vec::with_capacity(3);
    if let Some(lon) = prev {
        replacement.push(at_pole(lon));
    }
    if e - s == 2 {
        replacement.push(ring[s + 1]);
    }
    if let Some(lon) = next {
        if replacement.last() != Some(&at_pole(lon)) {
            replacement.push(at_pole(lon));
        }
    }
    if replacement.is_empty() {
        replacement.push(ring[s]);
    }

    let mut result = Vec::with_capacity(ring.len());
    result.extend_from_slice(&ring[..s]);
    result.extend(replacement);
    result.extend_from_slice(&ring[e + 1..]);
    result
}

fn adjust_ring(
    mut ring: Vec<GeoPoint2d>,
    index: usize,
    pole: Pole,
    tolerance: f64,
) -> Result<Vec<GeoPoint2d>, TrimError> {
    let is_polar = |p: &GeoPoint2d| p.lat == pole.latitude();
    for p in ring.iter_mut() {
        if pole.is_near(p, tolerance) {
            p.lat = pole.latitude();
        }
    }

    loop {
        let closing = closing_shift(&ring, tolerance);
        if let Some(shift) = closing {
            match rotate_to_non_polar(&ring, shift, is_polar) {
                Some(rotated) => ring = rotated,
                None => return Ok(ring),
            }
        }

        let runs = polar_runs(&ring, is_polar);
        let Some(&first_run) = runs.first() else {
            return Ok(ring);
        };

        if let Some(&artifact) = runs
            .iter()
            .find(|(s, e)| longitude_extent(&ring[*s..=*e]) >= TAU - tolerance)
        {
            log::trace!("Ring {index} has a polar run spanning a full turn, removing it");
            ring = strip_artifact(&ring, artifact, closing);
            continue;
        }

        let count: usize = runs.iter().map(|(s, e)| e - s + 1).sum();
        if count > 3 {
            return Err(TrimError::TooManyPolarVertices { ring: index, count });
        }
        if runs.len() > 1 {
            return Err(TrimError::NonAdjacentPolarVertices { ring: index });
        }

        return Ok(normalize_visit(&ring, first_run, pole));
    }
}

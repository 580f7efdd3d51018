//! Ring sets: ordered sequences of rings and open curves.
//!
//! A ring is a sequence of points whose first and last points are equal. Open curves (loose ends)
//! are sequences whose end points differ; they are valid intermediate states of trimming. Callers
//! that store rings in a flat coordinate array separated by `NaN` values can convert with
//! [`RingSet::from_nan_separated`] and [`RingSet::to_nan_separated`].

use serde::{Deserialize, Serialize};

use crate::cartesian::Point2;
use crate::error::TrimError;
use crate::geo::GeoPoint2d;

/// Point type that can be stored in a flat pair of coordinate arrays.
pub trait CoordPair: Copy + PartialEq {
    /// Creates a point from the first and the second coordinate.
    fn from_pair(first: f64, second: f64) -> Self;
    /// First and second coordinate of the point.
    fn pair(&self) -> (f64, f64);
}

impl CoordPair for Point2 {
    fn from_pair(first: f64, second: f64) -> Self {
        Point2::new(first, second)
    }

    fn pair(&self) -> (f64, f64) {
        (self.x, self.y)
    }
}

/// Latitude is the first coordinate, longitude the second one.
impl CoordPair for GeoPoint2d {
    fn from_pair(first: f64, second: f64) -> Self {
        GeoPoint2d::latlon(first, second)
    }

    fn pair(&self) -> (f64, f64) {
        (self.lat, self.lon)
    }
}

/// Ordered sequence of rings and open curves.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RingSet<P> {
    rings: Vec<Vec<P>>,
}

impl<P> RingSet<P> {
    /// Creates a new ring set. Empty rings are dropped.
    pub fn new(rings: Vec<Vec<P>>) -> Self {
        let mut set = Self { rings };
        set.remove_empty_rings();
        set
    }

    /// Creates an empty ring set.
    pub fn empty() -> Self {
        Self { rings: Vec::new() }
    }

    /// Rings of the set.
    pub fn rings(&self) -> &[Vec<P>] {
        &self.rings
    }

    /// Consumes the set, returning the rings.
    pub fn into_rings(self) -> Vec<Vec<P>> {
        self.rings
    }

    /// Iterates over the rings.
    pub fn iter(&self) -> impl Iterator<Item = &Vec<P>> {
        self.rings.iter()
    }

    /// Number of rings.
    pub fn len(&self) -> usize {
        self.rings.len()
    }

    /// Returns true if the set has no rings.
    pub fn is_empty(&self) -> bool {
        self.rings.is_empty()
    }

    /// Total number of vertices in all rings.
    pub fn vertex_count(&self) -> usize {
        self.rings.iter().map(Vec::len).sum()
    }

    /// Adds a ring to the end of the set. Empty rings are ignored.
    pub fn push(&mut self, ring: Vec<P>) {
        if !ring.is_empty() {
            self.rings.push(ring);
        }
    }

    /// Removes rings without points.
    ///
    /// Nested counterpart of [`crate::flat::remove_extra_separators`].
    pub fn remove_empty_rings(&mut self) {
        self.rings.retain(|ring| !ring.is_empty());
    }

    /// Applies `f` to every point of every ring.
    pub fn map<Q>(self, f: impl Fn(P) -> Q) -> RingSet<Q> {
        RingSet {
            rings: self
                .rings
                .into_iter()
                .map(|ring| ring.into_iter().map(&f).collect())
                .collect(),
        }
    }
}

impl<P: CoordPair> RingSet<P> {
    /// Builds a ring set from flat coordinate arrays with rings separated by `NaN` values.
    ///
    /// Leading, trailing and repeated separators are ignored.
    pub fn from_nan_separated(first: &[f64], second: &[f64]) -> Result<Self, TrimError> {
        if first.len() != second.len() {
            return Err(TrimError::InvalidInput(format!(
                "coordinate arrays have different lengths: {} and {}",
                first.len(),
                second.len()
            )));
        }

        let mut rings = Vec::new();
        let mut current = Vec::new();
        for (&a, &b) in first.iter().zip(second) {
            if a.is_nan() || b.is_nan() {
                if !current.is_empty() {
                    rings.push(std::mem::take(&mut current));
                }
            } else {
                current.push(P::from_pair(a, b));
            }
        }

        if !current.is_empty() {
            rings.push(current);
        }

        Ok(Self { rings })
    }

    /// Converts the set into flat coordinate arrays with rings separated by single `NaN` values.
    pub fn to_nan_separated(&self) -> (Vec<f64>, Vec<f64>) {
        let capacity = self.vertex_count() + self.rings.len();
        let mut first = Vec::with_capacity(capacity);
        let mut second = Vec::with_capacity(capacity);

        for (index, ring) in self.rings.iter().enumerate() {
            if index > 0 {
                first.push(f64::NAN);
                second.push(f64::NAN);
            }

            for p in ring {
                let (a, b) = p.pair();
                first.push(a);
                second.push(b);
            }
        }

        (first, second)
    }
}

impl<P> From<Vec<Vec<P>>> for RingSet<P> {
    fn from(rings: Vec<Vec<P>>) -> Self {
        Self::new(rings)
    }
}

impl<P> IntoIterator for RingSet<P> {
    type Item = Vec<P>;
    type IntoIter = std::vec::IntoIter<Vec<P>>;

    fn into_iter(self) -> Self::IntoIter {
        self.rings.into_iter()
    }
}

impl<P> FromIterator<Vec<P>> for RingSet<P> {
    fn from_iter<T: IntoIterator<Item = Vec<P>>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// Returns true if the first and the last points of the ring are exactly equal.
pub fn is_closed<P: PartialEq>(ring: &[P]) -> bool {
    ring.len() > 1 && ring.first() == ring.last()
}

/// Closes rings whose end points are distinct, but closer than `tolerance` according to the
/// `distance` function, by appending a copy of the first point.
///
/// Rings with coincident end points and rings with end points farther apart are left untouched.
pub fn close_nearly_closed_rings<P: Copy + PartialEq>(
    ring_set: RingSet<P>,
    tolerance: f64,
    distance: impl Fn(&P, &P) -> f64,
) -> RingSet<P> {
    let rings = ring_set
        .into_rings()
        .into_iter()
        .map(|mut ring| {
            if let (Some(&first), Some(&last)) = (ring.first(), ring.last()) {
                if ring.len() > 2 && first != last && distance(&first, &last) <= tolerance {
                    ring.push(first);
                }
            }
            ring
        })
        .collect();

    RingSet { rings }
}

/// Removes consecutive duplicate points in every ring.
///
/// The closing point of a ring is never removed, so a closed ring stays closed. A ring consisting
/// of the same point repeated is reduced to that point.
pub fn remove_duplicate_vertices<P: Copy + PartialEq>(ring_set: RingSet<P>) -> RingSet<P> {
    let rings = ring_set
        .into_rings()
        .into_iter()
        .map(|ring| {
            let mut result: Vec<P> = Vec::with_capacity(ring.len());
            for p in ring {
                if result.last() != Some(&p) {
                    result.push(p);
                }
            }
            result
        })
        .collect();

    RingSet { rings }
}

/// Euclidean distance between planar points.
pub fn planar_distance(a: &Point2, b: &Point2) -> f64 {
    a.distance(b)
}

/// Returns true if the two values are within `tolerance` of each other.
pub fn nearly_equal(a: f64, b: f64, tolerance: f64) -> bool {
    (a - b).abs() <= tolerance
}

use crate::cartesian::Point2;
use approx::AbsDiffEq;
use serde::{Deserialize, Serialize};

/// 2d point on the surface of a sphere. Both coordinates are in radians.
#[derive(Debug, Clone, Copy, Default, PartialEq, PartialOrd, Deserialize, Serialize)]
pub struct GeoPoint2d {
    /// Latitude in radians.
    pub lat: f64,
    /// Longitude in radians.
    pub lon: f64,
}

impl GeoPoint2d {
    /// Creates a new point from latitude and longitude in radians.
    pub const fn latlon(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Creates a new point from latitude and longitude in degrees.
    pub fn from_degrees(lat: f64, lon: f64) -> Self {
        Self {
            lat: lat.to_radians(),
            lon: lon.to_radians(),
        }
    }

    /// Returns `(lat, lon)` in degrees.
    pub fn to_degrees(&self) -> (f64, f64) {
        (self.lat.to_degrees(), self.lon.to_degrees())
    }

    /// Planar representation used by the trimming code: `x` is longitude, `y` is latitude.
    pub fn to_planar(&self) -> Point2 {
        Point2::new(self.lon, self.lat)
    }

    /// Inverse of [`GeoPoint2d::to_planar`].
    pub fn from_planar(point: &Point2) -> Self {
        Self::latlon(point.y, point.x)
    }
}

impl AbsDiffEq for GeoPoint2d {
    type Epsilon = f64;

    fn default_epsilon() -> Self::Epsilon {
        f64::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: Self::Epsilon) -> bool {
        self.lat.abs_diff_eq(&other.lat, epsilon) && self.lon.abs_diff_eq(&other.lon, epsilon)
    }
}

/// Creates a new GeoPoint2d from latitude and longitude values (in degrees).
///
/// ```
/// use galileo_clip::latlon;
///
/// let point = latlon!(38.0, 52.0);
/// assert_eq!(point.lat, 38f64.to_radians());
/// ```
#[macro_export]
macro_rules! latlon {
    ($lat:expr, $lon:expr) => {
        $crate::geo::GeoPoint2d::from_degrees($lat, $lon)
    };
}

//! Great circle computations on the unit sphere. All angles are in radians.

use std::f64::consts::{FRAC_PI_2, PI};

use crate::geo::GeoPoint2d;

/// Range (angular distance) and azimuth from the point at `lat1` to the point at `lat2`, where
/// `delta_lon` is the longitude of the second point minus the longitude of the first one.
///
/// Azimuth is measured clockwise from north and lies in `(-PI, PI]`. Poles are handled exactly:
/// from the north pole the azimuth to a point is `PI - delta_lon`, from the south pole it is
/// `delta_lon`.
pub fn great_circle_inverse(lat1: f64, lat2: f64, delta_lon: f64) -> (f64, f64) {
    if lat1 >= FRAC_PI_2 {
        return (FRAC_PI_2 - lat2, wrap_to_pi(PI - delta_lon));
    }
    if lat1 <= -FRAC_PI_2 {
        return (lat2 + FRAC_PI_2, wrap_to_pi(delta_lon));
    }

    let sin_half_lat = ((lat2 - lat1) / 2.0).sin();
    let sin_half_lon = (delta_lon / 2.0).sin();
    let h = sin_half_lat * sin_half_lat + lat1.cos() * lat2.cos() * sin_half_lon * sin_half_lon;
    let range = 2.0 * h.clamp(0.0, 1.0).sqrt().asin();

    let azimuth = (delta_lon.sin() * lat2.cos())
        .atan2(lat1.cos() * lat2.sin() - lat1.sin() * lat2.cos() * delta_lon.cos());

    (range, azimuth)
}

/// Position of the point at the given `range` and `azimuth` from a point at latitude `lat0`.
///
/// Returns `(lat, delta_lon)`, where `delta_lon` is relative to the longitude of the origin.
pub fn great_circle_forward(lat0: f64, range: f64, azimuth: f64) -> (f64, f64) {
    if lat0 >= FRAC_PI_2 {
        return (FRAC_PI_2 - range, wrap_to_pi(PI - azimuth));
    }
    if lat0 <= -FRAC_PI_2 {
        return (range - FRAC_PI_2, wrap_to_pi(azimuth));
    }

    let sin_lat = (lat0.sin() * range.cos() + lat0.cos() * range.sin() * azimuth.cos())
        .clamp(-1.0, 1.0);
    let lat = sin_lat.asin();
    let delta_lon =
        (azimuth.sin() * range.sin() * lat0.cos()).atan2(range.cos() - lat0.sin() * sin_lat);

    (lat, delta_lon)
}

/// Angular distance between two points.
pub fn great_circle_distance(a: &GeoPoint2d, b: &GeoPoint2d) -> f64 {
    great_circle_inverse(a.lat, b.lat, b.lon - a.lon).0
}

/// Wraps the angle into `(-PI, PI]`.
pub fn wrap_to_pi(angle: f64) -> f64 {
    let wrapped = (angle + PI).rem_euclid(2.0 * PI) - PI;
    if wrapped == -PI {
        PI
    } else {
        wrapped
    }
}

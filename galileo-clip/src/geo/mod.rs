//! Geometries in geographic coordinates (latitude and longitude, in radians) and the spherical
//! computations needed to trim them.

mod great_circle;
mod point;
mod unwrap;

pub use great_circle::{
    great_circle_distance, great_circle_forward, great_circle_inverse, wrap_to_pi,
};
pub use point::GeoPoint2d;
pub use unwrap::{unwrap, unwrap_multipart};

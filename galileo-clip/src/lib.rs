//! Galileo-clip trims polygons and polylines to simple regions: half-planes and rectangles in the
//! plane, latitude-longitude quadrangles and small circles on the sphere.
//!
//! Geometries are given as [`RingSet`]s, ordered sequences of rings. Polygon outer rings must be
//! clockwise and holes counter-clockwise (with longitude as `x` and latitude as `y` for
//! geographic rings). Rings crossing the boundary are closed along it, holes left without an
//! enclosing outer ring get the boundary of the region as their outer ring.
//!
//! ```
//! use galileo_clip::latlon;
//! use galileo_clip::trim::{trim_polygon_to_quadrangle, Quadrangle};
//! use galileo_clip::{RingSet, Tolerances};
//!
//! let ring = vec![
//!     latlon!(-10.0, 170.0),
//!     latlon!(10.0, 170.0),
//!     latlon!(10.0, -170.0),
//!     latlon!(-10.0, -170.0),
//!     latlon!(-10.0, 170.0),
//! ];
//! let quadrangle = Quadrangle::from_degrees([-5.0, 5.0], [175.0, -175.0]).unwrap();
//!
//! let trimmed = trim_polygon_to_quadrangle(
//!     &RingSet::new(vec![ring]),
//!     &quadrangle,
//!     None,
//!     &Tolerances::default(),
//! )
//! .unwrap();
//!
//! assert_eq!(trimmed.len(), 1);
//! ```
//!
//! All angles are in radians unless a function says otherwise. The `latlon!` macro takes degrees.

pub mod cartesian;
pub mod flat;
pub mod geo;
pub mod ring_set;
pub mod trim;

mod error;
mod tolerance;

pub use error::TrimError;
pub use ring_set::RingSet;
pub use tolerance::{Tolerances, DEFAULT_TOLERANCE};

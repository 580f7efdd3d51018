//! Types and functions on geometries in cartesian coordinates.

mod point;
mod rect;
mod ring;

pub use point::{Point2, Vector2};
pub use rect::Rect;
pub use ring::{locate_point, ring_contains_ring, signed_area, winding, PointLocation, Winding};

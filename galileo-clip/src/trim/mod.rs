//! Trimming of polygons and polylines to half-planes, rectangles, latitude-longitude quadrangles
//! and small circles on the sphere.
//!
//! All polygon trimmers share the same core: every ring is cut at a single bound, the open
//! fragments left after the cut are linked to each other along the boundary, and linked
//! fragments are joined into closed rings with boundary vertices inserted between them.
//!
//! Outer rings are expected to be clockwise and holes counter-clockwise. Trimming keeps this
//! orientation.

mod enclosure;
mod fragment;
mod half_plane;
mod link;
mod polar;
mod quadrangle;
mod rectangle;
mod small_circle;

pub use fragment::Axis;
pub use half_plane::{trim_polygon_to_half_plane, trim_polyline_to_half_plane, HalfPlane, Side};
pub use link::FragmentKind;
pub use polar::{adjust_polar_vertices, encloses_whole_sphere, Pole};
pub use quadrangle::{trim_polygon_to_quadrangle, trim_polyline_to_quadrangle, Quadrangle};
pub use rectangle::{trim_polygon_to_rectangle, trim_polyline_to_rectangle};
pub use small_circle::{trim_polygon_to_small_circle, trim_polyline_to_small_circle, SmallCircle};

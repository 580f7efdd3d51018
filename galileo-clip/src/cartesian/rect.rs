use crate::cartesian::Point2;
use num_traits::Num;
use serde::{Deserialize, Serialize};

/// Axis aligned rectangle.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rect<N = f64> {
    /// Minimum x coordinate.
    pub x_min: N,
    /// Minimum y coordinate.
    pub y_min: N,
    /// Maximum x coordinate.
    pub x_max: N,
    /// Maximum y coordinate.
    pub y_max: N,
}

impl<N: Num + Copy + PartialOrd> Rect<N> {
    /// Creates a new rectangle. The limits are reordered if given in the wrong order.
    pub fn new(x_min: N, y_min: N, x_max: N, y_max: N) -> Self {
        let (x_min, x_max) = if x_min <= x_max {
            (x_min, x_max)
        } else {
            (x_max, x_min)
        };
        let (y_min, y_max) = if y_min <= y_max {
            (y_min, y_max)
        } else {
            (y_max, y_min)
        };

        Self {
            x_min,
            y_min,
            x_max,
            y_max,
        }
    }

    /// Creates a rectangle from `[min, max]` limit pairs of both coordinates.
    pub fn from_limits(x_limits: [N; 2], y_limits: [N; 2]) -> Self {
        Self::new(x_limits[0], y_limits[0], x_limits[1], y_limits[1])
    }

    /// Width of the rectangle.
    pub fn width(&self) -> N {
        self.x_max - self.x_min
    }

    /// Height of the rectangle.
    pub fn height(&self) -> N {
        self.y_max - self.y_min
    }

    /// Total length of the rectangle boundary.
    pub fn perimeter(&self) -> N {
        let two = N::one() + N::one();
        two * (self.width() + self.height())
    }

    /// Returns true if the point is inside the rectangle or on its boundary.
    pub fn contains(&self, point: &Point2<N>) -> bool {
        self.x_min <= point.x
            && self.x_max >= point.x
            && self.y_min <= point.y
            && self.y_max >= point.y
    }

    /// Bounding rectangle of the points, or `None` if the iterator is empty.
    pub fn from_points<'a>(mut points: impl Iterator<Item = &'a Point2<N>>) -> Option<Self>
    where
        N: 'a,
    {
        let first = points.next()?;
        let mut x_min = first.x;
        let mut y_min = first.y;
        let mut x_max = first.x;
        let mut y_max = first.y;

        for p in points {
            if x_min > p.x {
                x_min = p.x;
            }
            if y_min > p.y {
                y_min = p.y;
            }
            if x_max < p.x {
                x_max = p.x;
            }
            if y_max < p.y {
                y_max = p.y;
            }
        }

        Some(Self {
            x_min,
            y_min,
            x_max,
            y_max,
        })
    }

    /// Center point of the rectangle.
    pub fn center(&self) -> Point2<N> {
        let two = N::one() + N::one();
        Point2::new(
            (self.x_min + self.x_max) / two,
            (self.y_min + self.y_max) / two,
        )
    }

    /// Corners of the rectangle in clockwise order, starting from the lower left one.
    pub fn into_quadrangle(self) -> [Point2<N>; 4] {
        [
            Point2::new(self.x_min, self.y_min),
            Point2::new(self.x_min, self.y_max),
            Point2::new(self.x_max, self.y_max),
            Point2::new(self.x_max, self.y_min),
        ]
    }

    /// Closed clockwise ring tracing the rectangle boundary.
    pub fn boundary_ring(self) -> Vec<Point2<N>> {
        let corners = self.into_quadrangle();
        let mut ring = Vec::from(corners);
        ring.push(corners[0]);
        ring
    }
}

use crate::cartesian::Point2;

/// Direction in which a ring is traversed.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Winding {
    /// Outer rings are clockwise.
    Clockwise,
    /// Holes are counter-clockwise.
    CounterClockwise,
}

/// Position of a point relative to a ring.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum PointLocation {
    /// Strictly inside the area bounded by the ring.
    Inside,
    /// Strictly outside.
    Outside,
    /// On one of the ring segments.
    Boundary,
}

/// Signed area of a ring with the shoelace formula.
///
/// Clockwise rings have positive area, counter-clockwise rings have negative area. The closing
/// segment is included whether or not the last point repeats the first one.
pub fn signed_area(ring: &[Point2]) -> f64 {
    let n = ring.len();
    if n < 3 {
        return 0.0;
    }

    let mut aggr = 0.0;
    for i in 0..n {
        let a = ring[i];
        let b = ring[(i + 1) % n];
        aggr += (b.x - a.x) * (b.y + a.y);
    }

    aggr / 2.0
}

/// Winding of the ring, or `None` for rings with zero area.
pub fn winding(ring: &[Point2]) -> Option<Winding> {
    let area = signed_area(ring);
    if area > 0.0 {
        Some(Winding::Clockwise)
    } else if area < 0.0 {
        Some(Winding::CounterClockwise)
    } else {
        None
    }
}

/// Position of the point relative to the ring, computed with the crossing number.
pub fn locate_point(ring: &[Point2], point: &Point2) -> PointLocation {
    let n = ring.len();
    if n == 0 {
        return PointLocation::Outside;
    }

    let mut inside = false;
    for i in 0..n {
        let a = ring[i];
        let b = ring[(i + 1) % n];
        if is_on_segment(&a, &b, point) {
            return PointLocation::Boundary;
        }

        if (a.y > point.y) != (b.y > point.y) {
            let x = a.x + (point.y - a.y) * (b.x - a.x) / (b.y - a.y);
            if point.x < x {
                inside = !inside;
            }
        }
    }

    if inside {
        PointLocation::Inside
    } else {
        PointLocation::Outside
    }
}

/// Returns true if the `inner` ring lies inside the `outer` one.
///
/// Vertices and segment midpoints of the inner ring are checked in order until one of them is
/// found strictly inside or outside the outer ring. Rings that only touch the outer boundary are
/// considered outside.
pub fn ring_contains_ring(outer: &[Point2], inner: &[Point2]) -> bool {
    let midpoints = inner
        .windows(2)
        .map(|w| Point2::new((w[0].x + w[1].x) / 2.0, (w[0].y + w[1].y) / 2.0));

    for p in inner.iter().copied().chain(midpoints) {
        match locate_point(outer, &p) {
            PointLocation::Inside => return true,
            PointLocation::Outside => return false,
            PointLocation::Boundary => {}
        }
    }

    false
}

fn is_on_segment(a: &Point2, b: &Point2, p: &Point2) -> bool {
    let ab = *b - *a;
    let ap = *p - *a;
    let cross = ab.dx * ap.dy - ab.dy * ap.dx;
    let scale = ab.magnitude_sq().max(ap.magnitude_sq()).max(f64::MIN_POSITIVE);
    if cross.abs() > 1e-12 * scale {
        return false;
    }

    let dot = ab.dot(&ap);
    dot >= 0.0 && dot <= ab.magnitude_sq()
}

//! Reconnection of trimmed fragments along the clip boundary.
//!
//! Every fragment end lying on the boundary is connected to the fragment start that is reached
//! first when walking along the boundary in the direction of travel (clockwise around the kept
//! region), respecting nesting: an end and a start are paired like brackets. This closes outer
//! fragments, merges holes into their tightest enclosing outer fragment in the right order, and
//! chains unenclosed holes with loose ends.
//!
//! Several fragments meeting at one boundary point are ordered by the angle their first segment
//! makes with the boundary, which pairs every end with the start forming the smallest interior
//! angle.

use std::cmp::Ordering;
use std::f64::consts::FRAC_PI_2;

use serde::{Deserialize, Serialize};

use crate::cartesian::{Point2, Vector2};
use crate::error::TrimError;

/// Position of a point on the clip boundary.
#[derive(Debug, Copy, Clone, PartialEq)]
pub(crate) struct BoundaryLocation {
    /// Distance-like parameter growing in the direction of travel.
    pub pos: f64,
    /// Direction of travel at the point.
    pub forward: Vector2,
    /// Direction pointing into the kept region.
    pub inward: Vector2,
}

/// Clip boundary along which fragments are reconnected.
pub(crate) trait Boundary {
    /// Location of the point on the boundary, or `None` if the point is not on it.
    fn locate(&self, point: &Point2) -> Option<BoundaryLocation>;

    /// Length of the boundary parameter range for closed boundaries.
    fn period(&self) -> Option<f64>;

    /// Points strictly between `from` and `to` when walking along the boundary in the direction
    /// of travel.
    fn path(&self, from: &Point2, from_pos: f64, to: &Point2, to_pos: f64) -> Vec<Point2>;
}

/// Class of a trimmed fragment.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FragmentKind {
    /// Both ends on the boundary; becomes clockwise when closed along the boundary.
    Outer,
    /// Both ends on the boundary; becomes counter-clockwise when closed along the boundary.
    Inner,
    /// At most one end on the boundary.
    LooseEnd,
    /// Never touched the boundary and is already closed.
    NonBounding,
}

/// Classifies the trimmed fragment or ring against the boundary.
pub(crate) fn classify(fragment: &[Point2], boundary: &impl Boundary) -> FragmentKind {
    let (Some(first), Some(last)) = (fragment.first(), fragment.last()) else {
        return FragmentKind::LooseEnd;
    };

    match (boundary.locate(first), boundary.locate(last)) {
        (Some(start), Some(end)) if end.pos <= start.pos => FragmentKind::Outer,
        (Some(_), Some(_)) => FragmentKind::Inner,
        (None, None) if fragment.len() > 1 && first == last => FragmentKind::NonBounding,
        _ => FragmentKind::LooseEnd,
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord)]
enum EventKind {
    End,
    Start,
}

#[derive(Debug, Copy, Clone)]
struct Event {
    pos: f64,
    angle: f64,
    fragment: usize,
    kind: EventKind,
}

fn spoke_angle(location: &BoundaryLocation, from: &Point2, to: &Point2) -> f64 {
    let spoke = *to - *from;
    if spoke.magnitude_sq() == 0.0 {
        return FRAC_PI_2;
    }

    // Spokes never leave the kept region; `abs` also turns -0.0 into 0.0 at corners.
    spoke
        .dot(&location.inward)
        .abs()
        .atan2(spoke.dot(&location.forward))
}

fn event_order(a: &Event, b: &Event) -> Ordering {
    a.pos
        .total_cmp(&b.pos)
        .then(b.angle.total_cmp(&a.angle))
        .then(a.kind.cmp(&b.kind))
}

fn normalize_pos(pos: f64, period: Option<f64>) -> f64 {
    match period {
        Some(period) => {
            let pos = pos.rem_euclid(period);
            if pos >= period {
                0.0
            } else {
                pos
            }
        }
        None => pos,
    }
}

/// Finds the successor of every fragment: `result[i]` is the fragment whose start is connected
/// to the end of fragment `i`.
pub(crate) fn link_fragments(
    fragments: &[Vec<Point2>],
    boundary: &impl Boundary,
) -> Result<Vec<Option<usize>>, TrimError> {
    let period = boundary.period();
    let mut events = Vec::with_capacity(fragments.len() * 2);
    for (index, fragment) in fragments.iter().enumerate() {
        let n = fragment.len();
        if n < 2 {
            continue;
        }

        let first = &fragment[0];
        if let Some(location) = boundary.locate(first) {
            events.push(Event {
                pos: normalize_pos(location.pos, period),
                angle: spoke_angle(&location, first, &fragment[1]),
                fragment: index,
                kind: EventKind::Start,
            });
        }

        let last = &fragment[n - 1];
        if let Some(location) = boundary.locate(last) {
            events.push(Event {
                pos: normalize_pos(location.pos, period),
                angle: spoke_angle(&location, last, &fragment[n - 2]),
                fragment: index,
                kind: EventKind::End,
            });
        }
    }

    events.sort_by(event_order);

    for pair in events.windows(2) {
        if pair[0].pos == pair[1].pos
            && pair[0].angle == pair[1].angle
            && pair[0].kind == pair[1].kind
        {
            return Err(TrimError::AmbiguousJunction {
                position: pair[0].pos,
            });
        }
    }

    let mut next = vec![None; fragments.len()];
    let mut start_linked = vec![false; fragments.len()];
    let mut open_ends = Vec::new();

    for event in &events {
        match event.kind {
            EventKind::End => open_ends.push(event.fragment),
            EventKind::Start => {
                if let Some(end) = open_ends.pop() {
                    next[end] = Some(event.fragment);
                    start_linked[event.fragment] = true;
                }
            }
        }
    }

    if period.is_some() {
        for event in &events {
            if open_ends.is_empty() {
                break;
            }

            if event.kind == EventKind::Start && !start_linked[event.fragment] {
                if let Some(end) = open_ends.pop() {
                    next[end] = Some(event.fragment);
                    start_linked[event.fragment] = true;
                }
            }
        }
    }

    Ok(next)
}

/// Rings and open chains built from linked fragments.
#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct Assembled {
    pub closed: Vec<Vec<Point2>>,
    pub open: Vec<Vec<Point2>>,
}

fn push_point(target: &mut Vec<Point2>, point: Point2) {
    if target.last() != Some(&point) {
        target.push(point);
    }
}

fn connect(target: &mut Vec<Point2>, to: &Point2, boundary: &impl Boundary) {
    let Some(from) = target.last().copied() else {
        return;
    };

    if let (Some(from_location), Some(to_location)) = (boundary.locate(&from), boundary.locate(to))
    {
        for p in boundary.path(&from, from_location.pos, to, to_location.pos) {
            push_point(target, p);
        }
    }
}

fn append_fragment(target: &mut Vec<Point2>, fragment: &[Point2], boundary: &impl Boundary) {
    if let Some(first) = fragment.first() {
        connect(target, first, boundary);
    }

    for p in fragment {
        push_point(target, *p);
    }
}

/// Concatenates linked fragments into closed rings and open chains, inserting boundary points
/// between consecutive fragments.
pub(crate) fn assemble(
    fragments: &[Vec<Point2>],
    next: &[Option<usize>],
    boundary: &impl Boundary,
) -> Result<Assembled, TrimError> {
    let n = fragments.len();
    let mut has_predecessor = vec![false; n];
    for successor in next.iter().flatten() {
        has_predecessor[*successor] = true;
    }

    let mut visited = vec![false; n];
    let mut assembled = Assembled::default();

    for head in 0..n {
        if has_predecessor[head] {
            continue;
        }

        let mut chain = Vec::new();
        let mut current = Some(head);
        let mut steps = 0;
        while let Some(index) = current {
            if visited[index] || steps > n {
                return Err(TrimError::TracingDidNotTerminate { steps });
            }

            visited[index] = true;
            append_fragment(&mut chain, &fragments[index], boundary);
            current = next[index];
            steps += 1;
        }

        if !chain.is_empty() {
            assembled.open.push(chain);
        }
    }

    for head in 0..n {
        if visited[head] {
            continue;
        }

        let mut ring = Vec::new();
        let mut current = head;
        let mut steps = 0;
        loop {
            if steps > n {
                return Err(TrimError::TracingDidNotTerminate { steps });
            }

            visited[current] = true;
            append_fragment(&mut ring, &fragments[current], boundary);
            steps += 1;

            match next[current] {
                Some(successor) if successor == head => break,
                Some(successor) if !visited[successor] => current = successor,
                _ => return Err(TrimError::TracingDidNotTerminate { steps }),
            }
        }

        if let Some(&first) = ring.first() {
            connect(&mut ring, &first, boundary);
            ring.push(first);
            if ring.len() > 2 && ring[ring.len() - 2] == first {
                ring.pop();
            }
            assembled.closed.push(ring);
        }
    }

    Ok(assembled)
}

//! Removal of artificial `2 * PI` discontinuities from sequences of angles.

use std::f64::consts::{PI, TAU};

/// Unwraps the sequence in place, so that no two consecutive angles differ by more than `PI`.
pub fn unwrap(angles: &mut [f64]) {
    let mut shift = 0.0;
    for i in 1..angles.len() {
        let original = angles[i];
        let delta = original + shift - angles[i - 1];
        if delta.abs() > PI {
            shift -= TAU * (delta / TAU).round();
        }

        angles[i] = original + shift;
    }
}

/// Unwraps every part of a multi-part sequence independently.
///
/// `part_lengths` give the number of angles in every consecutive part; their sum must not exceed
/// the number of angles.
pub fn unwrap_multipart(angles: &mut [f64], part_lengths: &[usize]) {
    let mut start = 0;
    for &len in part_lengths {
        let end = (start + len).min(angles.len());
        unwrap(&mut angles[start..end]);
        start = end;
    }
}

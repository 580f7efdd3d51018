//! Helpers for flat coordinate arrays with parts separated by `NaN` values.

/// Collapses runs of consecutive `NaN` separators into one and strips leading and trailing
/// separators.
///
/// A position is a separator if either coordinate is `NaN`; separators in the output are `NaN` in
/// both arrays. Arrays of different length are processed up to the shorter one.
pub fn remove_extra_separators(first: &[f64], second: &[f64]) -> (Vec<f64>, Vec<f64>) {
    let len = first.len().min(second.len());
    let mut out_first = Vec::with_capacity(len);
    let mut out_second = Vec::with_capacity(len);
    let mut pending_separator = false;

    for (&a, &b) in first.iter().zip(second) {
        if a.is_nan() || b.is_nan() {
            pending_separator = !out_first.is_empty();
            continue;
        }

        if pending_separator {
            out_first.push(f64::NAN);
            out_second.push(f64::NAN);
            pending_separator = false;
        }

        out_first.push(a);
        out_second.push(b);
    }

    (out_first, out_second)
}

/// Lengths of the parts of a flat coordinate array, not counting separators.
pub fn part_lengths(coords: &[f64]) -> Vec<usize> {
    coords
        .split(|v| v.is_nan())
        .map(<[f64]>::len)
        .filter(|&len| len > 0)
        .collect()
}

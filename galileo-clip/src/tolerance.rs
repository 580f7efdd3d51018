//! Numeric tolerances used by the clipping operations.

use serde::{Deserialize, Serialize};

/// Default tolerance: ten machine epsilons scaled to `PI`.
pub const DEFAULT_TOLERANCE: f64 = 10.0 * f64::EPSILON * std::f64::consts::PI;

/// Tolerances controlling how sensitive the clipping operations are to rounding.
///
/// ```
/// use galileo_clip::Tolerances;
///
/// let tolerances: Tolerances = serde_json::from_str(r#"{"close": 1e-9}"#).unwrap();
/// assert_eq!(tolerances.close, 1e-9);
/// assert_eq!(tolerances.snap, galileo_clip::DEFAULT_TOLERANCE);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tolerances {
    /// Vertices closer than this to a clip limit are moved exactly onto it.
    pub snap: f64,
    /// Rings with end points closer than this are closed before trimming.
    pub close: f64,
}

impl Tolerances {
    /// Creates a new instance with the same value for all tolerances.
    pub fn uniform(tolerance: f64) -> Self {
        Self {
            snap: tolerance,
            close: tolerance,
        }
    }
}

impl Default for Tolerances {
    fn default() -> Self {
        Self::uniform(DEFAULT_TOLERANCE)
    }
}

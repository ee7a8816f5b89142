//! Temperature-humidity (discomfort) index.
//!
//! ```text
//!  DI = 0.81·T + 0.01·RH·(0.99·T − 14.3) + 46.3
//! ```
//!
//! | DI       | Perception            |
//! |----------|-----------------------|
//! | < 55     | cold                  |
//! | 55 – 60  | chilly                |
//! | 60 – 65  | nothing in particular |
//! | 65 – 70  | pleasant              |
//! | 70 – 75  | not hot               |
//! | 75 – 80  | slightly hot          |
//! | 80 – 85  | hot, sweating         |
//! | ≥ 85     | unbearably hot        |

use serde::{Deserialize, Serialize};

/// Lower clamp bound (cold limit).
pub const INDEX_MIN: i32 = 50;
/// Upper clamp bound (heat limit).
pub const INDEX_MAX: i32 = 85;
/// Value shown before the first cycle completes.
pub const INDEX_POWER_ON: i32 = 70;

/// Raw discomfort index, truncated toward zero.
///
/// Evaluated in double precision, stored to `f32`, then truncated.  The
/// `f32` store rounds values a hair below an integer up to it, so the
/// narrowing must happen before the cast to `i32`.
pub fn raw_discomfort_index(temperature_c: f32, relative_humidity_pct: f32) -> i32 {
    let t = f64::from(temperature_c);
    let rh = f64::from(relative_humidity_pct);
    let di = (0.81 * t + 0.01 * rh * (0.99 * t - 14.3) + 46.3) as f32;
    di as i32
}

/// A discomfort index clamped to `[INDEX_MIN, INDEX_MAX]`.
///
/// The only way to build one is through [`DiscomfortIndex::clamped`] (or
/// [`DiscomfortIndex::from_reading`]), so every value handed to the
/// actuation mapper is already inside the band table's domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DiscomfortIndex(i32);

impl DiscomfortIndex {
    /// Clamp an arbitrary raw value into range.
    pub const fn clamped(raw: i32) -> Self {
        let v = if raw < INDEX_MIN {
            INDEX_MIN
        } else if raw > INDEX_MAX {
            INDEX_MAX
        } else {
            raw
        };
        Self(v)
    }

    /// Compute and clamp in one step.
    pub fn from_reading(temperature_c: f32, relative_humidity_pct: f32) -> Self {
        Self::clamped(raw_discomfort_index(temperature_c, relative_humidity_pct))
    }

    pub const fn value(self) -> i32 {
        self.0
    }
}

impl Default for DiscomfortIndex {
    fn default() -> Self {
        Self(INDEX_POWER_ON)
    }
}

impl core::fmt::Display for DiscomfortIndex {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.0)
    }
}

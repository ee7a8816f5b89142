//! Actuation mapper: clamped discomfort index → servo + avatar outputs.
//!
//! Two independent projections of the same index:
//!
//! - **Servo**: inverted linear interpolation onto 0–180°, then a second
//!   interpolation onto the LEDC duty range calibrated for the servo hat.
//! - **Avatar**: ordered half-open bands, each fixing an expression and a
//!   primary/background colour pair.
//!
//! Both are pure; [`ActuationState::from_index`] is the single entry point
//! the orchestrator uses.

use serde::{Deserialize, Serialize};

use super::index::{DiscomfortIndex, INDEX_MAX, INDEX_MIN};

// ───────────────────────────────────────────────────────────────
// Linear interpolation
// ───────────────────────────────────────────────────────────────

/// Integer linear interpolation with truncating division.
///
/// Not clamped: inputs outside `[in_min, in_max]` extrapolate.
pub const fn linear_map(x: i32, in_min: i32, in_max: i32, out_min: i32, out_max: i32) -> i32 {
    out_min + (x - in_min) * (out_max - out_min) / (in_max - in_min)
}

// ───────────────────────────────────────────────────────────────
// Servo
// ───────────────────────────────────────────────────────────────

/// Nominal servo travel in degrees.
pub const SERVO_FULL_SCALE_DEG: i32 = 180;
/// Angle the servo hat actually reaches at [`SERVO_DUTY_MAX`].  The hat is
/// limited to 145° ± 10°, so its duty range is calibrated against 145.
pub const SERVO_CALIBRATED_DEG: i32 = 145;
/// 16-bit LEDC duty for ~1 ms at 50 Hz (0°).
pub const SERVO_DUTY_MIN: i32 = 3277;
/// 16-bit LEDC duty for ~2 ms at 50 Hz (calibrated maximum).
pub const SERVO_DUTY_MAX: i32 = 6553;

/// Servo angle for an index.  High discomfort → low angle.
pub const fn servo_angle(index: DiscomfortIndex) -> i32 {
    SERVO_FULL_SCALE_DEG - linear_map(index.value(), INDEX_MIN, INDEX_MAX, 0, SERVO_FULL_SCALE_DEG)
}

/// LEDC duty for a servo angle.
///
/// Angles past [`SERVO_CALIBRATED_DEG`] extrapolate beyond
/// [`SERVO_DUTY_MAX`]; the hat's end stop is the limit.
pub const fn servo_duty(angle_deg: i32) -> u32 {
    linear_map(angle_deg, 0, SERVO_CALIBRATED_DEG, SERVO_DUTY_MIN, SERVO_DUTY_MAX) as u32
}

// ───────────────────────────────────────────────────────────────
// Avatar palette
// ───────────────────────────────────────────────────────────────

/// RGB565 colour, the avatar engine's native palette format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Color565(pub u16);

impl Color565 {
    pub const BLACK: Self = Self(0x0000);
    pub const WHITE: Self = Self(0xFFFF);
    pub const BLUE: Self = Self(0x001F);
    pub const SKY_BLUE: Self = Self(0x867D);
    pub const LIGHT_YELLOW: Self = Self(0xFFFB);
    pub const GOLD: Self = Self(0xFEA0);
    pub const ORANGE: Self = Self(0xFDA0);
    pub const MAROON: Self = Self(0x7800);
}

/// Foreground (face features) and background colours.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Palette {
    pub primary: Color565,
    pub background: Color565,
}

impl Palette {
    pub const fn new(primary: Color565, background: Color565) -> Self {
        Self {
            primary,
            background,
        }
    }

    /// Palette applied at boot and for the fallback band.
    pub const BOOT: Self = Self::new(Color565::WHITE, Color565::GOLD);
}

/// Avatar facial expressions driven by the index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Expression {
    Neutral,
    Happy,
    Sad,
    Doubt,
    Angry,
}

// ───────────────────────────────────────────────────────────────
// Bands
// ───────────────────────────────────────────────────────────────

/// Comfort bands in ascending index order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ComfortBand {
    /// `[50, 55)`
    Cold,
    /// `[55, 60)`
    Chilly,
    /// `[60, 65)`
    Neutral,
    /// `[65, 70)`
    Pleasant,
    /// `[70, 75)`
    Warm,
    /// `[75, 80)`
    SlightlyHot,
    /// `[80, 85)`
    Sweating,
    /// Anything else.  After clamping this is exactly 85.
    Fallback,
}

/// `(lower inclusive, upper exclusive, band)`, tested in order.
const BAND_TABLE: [(i32, i32, ComfortBand); 7] = [
    (50, 55, ComfortBand::Cold),
    (55, 60, ComfortBand::Chilly),
    (60, 65, ComfortBand::Neutral),
    (65, 70, ComfortBand::Pleasant),
    (70, 75, ComfortBand::Warm),
    (75, 80, ComfortBand::SlightlyHot),
    (80, 85, ComfortBand::Sweating),
];

impl ComfortBand {
    /// First band whose half-open range contains `index`.
    pub fn classify(index: DiscomfortIndex) -> Self {
        let v = index.value();
        BAND_TABLE
            .iter()
            .find(|(lo, hi, _)| v >= *lo && v < *hi)
            .map_or(Self::Fallback, |&(_, _, band)| band)
    }

    /// Expression to show, or `None` to leave the current face as is.
    pub const fn expression(self) -> Option<Expression> {
        match self {
            Self::Cold => Some(Expression::Sad),
            Self::Chilly | Self::SlightlyHot => Some(Expression::Doubt),
            Self::Neutral | Self::Warm => Some(Expression::Neutral),
            Self::Pleasant => Some(Expression::Happy),
            Self::Sweating => Some(Expression::Angry),
            Self::Fallback => None,
        }
    }

    pub const fn palette(self) -> Palette {
        match self {
            Self::Cold => Palette::new(Color565::WHITE, Color565::BLUE),
            Self::Chilly => Palette::new(Color565::WHITE, Color565::SKY_BLUE),
            Self::Neutral => Palette::new(Color565::BLACK, Color565::WHITE),
            Self::Pleasant => Palette::new(Color565::BLACK, Color565::LIGHT_YELLOW),
            Self::Warm => Palette::new(Color565::WHITE, Color565::GOLD),
            Self::SlightlyHot => Palette::new(Color565::WHITE, Color565::ORANGE),
            Self::Sweating => Palette::new(Color565::WHITE, Color565::MAROON),
            Self::Fallback => Palette::BOOT,
        }
    }
}

// ───────────────────────────────────────────────────────────────
// Combined output
// ───────────────────────────────────────────────────────────────

/// Everything the actuators need for one index, recomputed every cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActuationState {
    pub servo_angle: i32,
    pub servo_duty: u32,
    pub band: ComfortBand,
    pub expression: Option<Expression>,
    pub palette: Palette,
}

impl ActuationState {
    pub fn from_index(index: DiscomfortIndex) -> Self {
        let servo_angle = servo_angle(index);
        let band = ComfortBand::classify(index);
        Self {
            servo_angle,
            servo_duty: servo_duty(servo_angle),
            band,
            expression: band.expression(),
            palette: band.palette(),
        }
    }
}

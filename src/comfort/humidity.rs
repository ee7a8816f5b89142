//! Relative → absolute humidity conversion for SGP30 compensation.
//!
//! Approximation from the Sensirion SGP30 driver integration guide
//! (section 3.15), evaluated in single precision like the device does.

/// Absolute humidity in mg/m³ for a temperature (°C) and relative humidity (%).
///
/// The result is truncated toward zero.  Inputs are not validated: the
/// expression has a pole at `T = -243.12`, and negative or NaN products
/// saturate to `0` through the float → integer cast.
pub fn absolute_humidity_mg_per_m3(temperature_c: f32, relative_humidity_pct: f32) -> u32 {
    let t = temperature_c;
    let saturation = 6.112_f32 * ((17.62_f32 * t) / (243.12_f32 + t)).exp();
    let grams_per_m3 =
        216.7_f32 * ((relative_humidity_pct / 100.0_f32) * saturation / (273.15_f32 + t));
    (1000.0_f32 * grams_per_m3) as u32
}

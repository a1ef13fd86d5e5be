use std::f64::consts::PI;

/// Multiplier applied to a value before it is treated as a symbol area.
pub const SCALE_FACTOR: f64 = 5.0;

/// Radius of a circle whose area is proportional to `value`.
///
/// `NaN` in gives `NaN` out; callers treat a non-finite radius as "not drawn".
pub fn radius(value: f64) -> f64 {
    let area = value * SCALE_FACTOR;
    (area / PI).sqrt()
}

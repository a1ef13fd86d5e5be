use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

// ---------------------------------------------------------------------------
// Symbol colours
// ---------------------------------------------------------------------------

/// `#FEB24C` at 0.8 opacity (premultiplied).
pub const SYMBOL_FILL: Color32 = Color32::from_rgba_premultiplied(203, 142, 61, 204);

/// Marker outline.
pub const SYMBOL_STROKE: Color32 = Color32::WHITE;

/// Legend circle outline.
pub const LEGEND_STROKE: Color32 = Color32::BLACK;

const RAMP_HUE: f32 = 36.0;
const RAMP_SATURATION: f32 = 0.98;
const RAMP_LIGHT: f32 = 0.85;
const RAMP_DARK: f32 = 0.40;
const SYMBOL_ALPHA: f32 = 0.8;

/// Sequential orange ramp: `0.0` is the lightest shade, `1.0` the darkest.
/// Non-finite input falls back to [`SYMBOL_FILL`].
pub fn ramp_color(fraction: f64) -> Color32 {
    if !fraction.is_finite() {
        return SYMBOL_FILL;
    }
    let t = fraction.clamp(0.0, 1.0) as f32;
    let lightness = RAMP_LIGHT + (RAMP_DARK - RAMP_LIGHT) * t;
    let hsl = Hsl::new(RAMP_HUE, RAMP_SATURATION, lightness);
    let rgb: Srgb = hsl.into_color();
    Color32::from_rgba_unmultiplied(
        (rgb.red * 255.0) as u8,
        (rgb.green * 255.0) as u8,
        (rgb.blue * 255.0) as u8,
        (SYMBOL_ALPHA * 255.0) as u8,
    )
}

/// Position of `value` between `min` and `max`; `0.5` when they coincide.
pub fn ramp_fraction(value: f64, min: f64, max: f64) -> f64 {
    let range = max - min;
    if range.abs() < f64::EPSILON {
        0.5
    } else {
        (value - min) / range
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn brightness(c: Color32) -> u32 {
        c.r() as u32 + c.g() as u32 + c.b() as u32
    }

    #[test]
    fn ramp_darkens_with_value() {
        assert!(brightness(ramp_color(0.0)) > brightness(ramp_color(0.5)));
        assert!(brightness(ramp_color(0.5)) > brightness(ramp_color(1.0)));
    }

    #[test]
    fn ramp_clamps_and_falls_back() {
        assert_eq!(ramp_color(-3.0), ramp_color(0.0));
        assert_eq!(ramp_color(7.0), ramp_color(1.0));
        assert_eq!(ramp_color(f64::NAN), SYMBOL_FILL);
    }

    #[test]
    fn fraction_of_flat_range_is_middle() {
        assert_eq!(ramp_fraction(20.0, 20.0, 20.0), 0.5);
        assert_eq!(ramp_fraction(15.0, 10.0, 30.0), 0.25);
    }
}

use image::Rgb;
use palette::{Hsl, IntoColor, Srgb};

use crate::error::{PointLightError, Result};

// ---------------------------------------------------------------------------
// Colour parsing
// ---------------------------------------------------------------------------

/// Parse a CSS colour name (`"white"`) or hex code (`"#ffffff"`, `"fff"`).
pub fn parse_color(s: &str) -> Result<Rgb<u8>> {
    let s = s.trim();
    let rgb: Srgb<u8> = match palette::named::from_str(&s.to_ascii_lowercase()) {
        Some(named) => named,
        None => s
            .parse()
            .map_err(|_| PointLightError::config(format!("unrecognised colour '{s}'")))?,
    };
    Ok(Rgb([rgb.red, rgb.green, rgb.blue]))
}

// ---------------------------------------------------------------------------
// Marker palette
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Rgb<u8>> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            let hsl = Hsl::new(hue, 0.75, 0.55);
            let rgb: Srgb = hsl.into_color();
            Rgb([
                (rgb.red * 255.0) as u8,
                (rgb.green * 255.0) as u8,
                (rgb.blue * 255.0) as u8,
            ])
        })
        .collect()
}

/// Colours used to draw a frame.
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerColors {
    pub background: Rgb<u8>,
    marker: Rgb<u8>,
    per_marker: Vec<Rgb<u8>>,
}

impl MarkerColors {
    /// Every marker drawn in the same colour (the classic display).
    pub fn uniform(background: Rgb<u8>, marker: Rgb<u8>) -> Self {
        Self {
            background,
            marker,
            per_marker: Vec::new(),
        }
    }

    /// One hue per marker, for checking marker identity across frames.
    pub fn per_marker(background: Rgb<u8>, markers: usize) -> Self {
        Self {
            background,
            marker: Rgb([255, 255, 255]),
            per_marker: generate_palette(markers),
        }
    }

    /// Colour for the marker at `index`.
    pub fn color_for(&self, index: usize) -> Rgb<u8> {
        self.per_marker.get(index).copied().unwrap_or(self.marker)
    }
}

impl Default for MarkerColors {
    fn default() -> Self {
        Self::uniform(Rgb([0, 0, 0]), Rgb([255, 255, 255]))
    }
}

use image::{ImageBuffer, RgbImage};
use imageproc::drawing::draw_filled_circle_mut;

use super::bounds::Bounds;
use crate::color::MarkerColors;

// ---------------------------------------------------------------------------
// Canvas geometry
// ---------------------------------------------------------------------------

/// Fixed canvas used for every frame of a run.
#[derive(Debug, Clone, PartialEq)]
pub struct Canvas {
    pub width: u32,
    pub height: u32,
    /// Dot radius in pixels.
    pub marker_radius: u32,
    /// Pixels between the plot area and the image edge.
    pub margin: u32,
    pub colors: MarkerColors,
}

impl Default for Canvas {
    fn default() -> Self {
        Self {
            width: 640,
            height: 480,
            marker_radius: 3,
            margin: 10,
            colors: MarkerColors::default(),
        }
    }
}

/// Maps data coordinates onto pixel positions inside the plot area.
#[derive(Debug, Clone, Copy)]
struct Projection {
    min_x: f64,
    span_x: f64,
    min_y: f64,
    span_y: f64,
    left: f64,
    bottom: f64,
    plot_w: f64,
    plot_h: f64,
}

impl Projection {
    fn new(bounds: &Bounds, canvas: &Canvas) -> Self {
        let (min_x, span_x) = widen(bounds.min_x, bounds.max_x);
        let (min_y, span_y) = widen(bounds.min_y, bounds.max_y);
        let margin = canvas.margin as f64;
        Self {
            min_x,
            span_x,
            min_y,
            span_y,
            left: margin,
            bottom: canvas.height as f64 - margin,
            plot_w: (canvas.width as f64 - 2.0 * margin).max(1.0),
            plot_h: (canvas.height as f64 - 2.0 * margin).max(1.0),
        }
    }

    /// Pixel centre for a data point; vertical axis grows upward.
    fn project(&self, x: f64, y: f64) -> (i32, i32) {
        let px = self.left + (x - self.min_x) / self.span_x * self.plot_w;
        let py = self.bottom - (y - self.min_y) / self.span_y * self.plot_h;
        (px.round() as i32, py.round() as i32)
    }
}

/// A zero-width range is widened by one unit each side.
fn widen(min: f64, max: f64) -> (f64, f64) {
    if max > min {
        (min, max - min)
    } else {
        (min - 1.0, 2.0)
    }
}

// ---------------------------------------------------------------------------
// Scatter frame
// ---------------------------------------------------------------------------

/// Draw one frame: unconnected dots, no axes, ticks or labels.
///
/// `xs[i]` and `ys[i]` are the coordinates of marker `i`; the caller
/// guarantees equal lengths.
pub fn draw_scatter(xs: &[f64], ys: &[f64], bounds: &Bounds, canvas: &Canvas) -> RgbImage {
    let mut img = ImageBuffer::from_pixel(canvas.width, canvas.height, canvas.colors.background);
    let projection = Projection::new(bounds, canvas);

    for (marker, (&x, &y)) in xs.iter().zip(ys).enumerate() {
        let center = projection.project(x, y);
        draw_filled_circle_mut(
            &mut img,
            center,
            canvas.marker_radius as i32,
            canvas.colors.color_for(marker),
        );
    }

    img
}

//! Painting orbs onto a drawing surface.
//!
//! [`Surface`] is the seam between the simulation and whatever actually
//! holds pixels: the browser's 2D canvas context in production, or
//! [`PixelSurface`], an in-memory RGBA buffer, on the host.

use crate::field::OrbField;
use crate::orb::Orb;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rgba {
    pub rgb: [u8; 3],
    /// Straight (non-premultiplied) alpha in `[0, 1]`.
    pub alpha: f64,
}

impl Rgba {
    pub fn to_css(self) -> String {
        let [r, g, b] = self.rgb;
        format!("rgba({r}, {g}, {b}, {})", self.alpha)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GradientStop {
    /// Distance from the centre as a fraction of the radius.
    pub offset: f64,
    pub color: Rgba,
}

/// Lightness and alpha multiplier per stop, centre to rim.
const STOPS: [(f64, f64, f64); 4] = [
    (0.0, 0.6, 1.0),
    (0.4, 0.5, 0.6),
    (0.7, 0.4, 0.3),
    (1.0, 0.3, 0.0),
];

/// Radial gradient for one orb: solid at the centre, transparent at the rim.
pub fn gradient_stops(orb: &Orb) -> [GradientStop; 4] {
    STOPS.map(|(offset, lightness, fade)| GradientStop {
        offset,
        color: Rgba {
            rgb: orb.tint().shade(lightness),
            alpha: orb.opacity() * fade,
        },
    })
}

pub trait Surface {
    /// Reset every pixel to transparent.
    fn clear(&mut self);

    /// Fill the disc at `center` with a radial gradient. `stops` are sorted
    /// by offset.
    fn fill_radial(&mut self, center: [f64; 2], radius: f64, stops: &[GradientStop]);
}

/// Clear `surface` and paint every orb of `field`. A missing surface means
/// there is nothing to draw into yet, so the frame is skipped.
pub fn render<S: Surface + ?Sized>(field: &OrbField, surface: Option<&mut S>) {
    let Some(surface) = surface else {
        return;
    };
    surface.clear();
    for orb in field.orbs() {
        surface.fill_radial(orb.position(), orb.radius(), &gradient_stops(orb));
    }
}

/// Colour at fraction `t` along a sorted stop list.
pub fn sample_gradient(stops: &[GradientStop], t: f64) -> Rgba {
    let Some(first) = stops.first() else {
        return Rgba {
            rgb: [0, 0, 0],
            alpha: 0.0,
        };
    };
    if t <= first.offset {
        return first.color;
    }
    for pair in stops.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        if t <= b.offset {
            let span = b.offset - a.offset;
            let k = if span > 0.0 { (t - a.offset) / span } else { 1.0 };
            let lerp = |x: u8, y: u8| (x as f64 + (y as f64 - x as f64) * k).round() as u8;
            return Rgba {
                rgb: [
                    lerp(a.color.rgb[0], b.color.rgb[0]),
                    lerp(a.color.rgb[1], b.color.rgb[1]),
                    lerp(a.color.rgb[2], b.color.rgb[2]),
                ],
                alpha: a.color.alpha + (b.color.alpha - a.color.alpha) * k,
            };
        }
    }
    stops[stops.len() - 1].color
}

/// RGBA8 pixel buffer, row-major, straight alpha.
#[derive(Clone, Debug)]
pub struct PixelSurface {
    width: usize,
    height: usize,
    pixels: Vec<u8>,
}

impl PixelSurface {
    /// Zero dimensions are bumped to one pixel.
    pub fn new(width: usize, height: usize) -> Self {
        let width = width.max(1);
        let height = height.max(1);
        Self {
            width,
            height,
            pixels: vec![0; width * height * 4],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn as_rgba(&self) -> &[u8] {
        &self.pixels
    }

    pub fn pixel(&self, x: usize, y: usize) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (y * self.width + x) * 4;
        Some([
            self.pixels[i],
            self.pixels[i + 1],
            self.pixels[i + 2],
            self.pixels[i + 3],
        ])
    }

    /// Reallocate to a new size; contents are discarded.
    pub fn resize(&mut self, width: usize, height: usize) {
        *self = Self::new(width, height);
    }

    fn blend(&mut self, x: usize, y: usize, src: Rgba) {
        let i = (y * self.width + x) * 4;
        let sa = src.alpha.clamp(0.0, 1.0);
        if sa <= 0.0 {
            return;
        }
        let da = self.pixels[i + 3] as f64 / 255.0;
        let out_a = sa + da * (1.0 - sa);
        for c in 0..3 {
            let sc = src.rgb[c] as f64;
            let dc = self.pixels[i + c] as f64;
            let v = (sc * sa + dc * da * (1.0 - sa)) / out_a;
            self.pixels[i + c] = v.round().clamp(0.0, 255.0) as u8;
        }
        self.pixels[i + 3] = (out_a * 255.0).round().clamp(0.0, 255.0) as u8;
    }
}

impl Surface for PixelSurface {
    fn clear(&mut self) {
        self.pixels.fill(0);
    }

    fn fill_radial(&mut self, center: [f64; 2], radius: f64, stops: &[GradientStop]) {
        if radius.is_nan() || radius <= 0.0 {
            return;
        }
        let [cx, cy] = center;
        let x0 = (cx - radius).floor().max(0.0) as usize;
        let y0 = (cy - radius).floor().max(0.0) as usize;
        let x1 = ((cx + radius).ceil().max(0.0) as usize).min(self.width);
        let y1 = ((cy + radius).ceil().max(0.0) as usize).min(self.height);
        for y in y0..y1 {
            for x in x0..x1 {
                let dx = x as f64 + 0.5 - cx;
                let dy = y as f64 + 0.5 - cy;
                let d = (dx * dx + dy * dy).sqrt();
                if d <= radius {
                    self.blend(x, y, sample_gradient(stops, d / radius));
                }
            }
        }
    }
}

//! A single drifting orb.
//!
//! Only position and velocity change after construction, and only through
//! `step`. Radius, opacity and tint are fixed for the orb's lifetime.

/// Smallest radius an orb may have.
pub const MIN_RADIUS: f64 = 1.0e-3;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Tint {
    /// HSL hue in degrees; saturation is always 100%.
    Hue(f64),
    Rgb([u8; 3]),
}

impl Tint {
    /// Colour at the given HSL lightness (0..=1). Fixed RGB tints ignore it.
    pub fn shade(self, lightness: f64) -> [u8; 3] {
        match self {
            Tint::Hue(h) => hsl_to_rgb(h, 1.0, lightness),
            Tint::Rgb(rgb) => rgb,
        }
    }
}

fn hsl_to_rgb(hue: f64, saturation: f64, lightness: f64) -> [u8; 3] {
    let h = hue.rem_euclid(360.0) / 60.0;
    let l = lightness.clamp(0.0, 1.0);
    let c = (1.0 - (2.0 * l - 1.0).abs()) * saturation.clamp(0.0, 1.0);
    let x = c * (1.0 - (h % 2.0 - 1.0).abs());
    let (r, g, b) = match h as u32 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };
    let m = l - c / 2.0;
    let to_byte = |v: f64| ((v + m) * 255.0).round().clamp(0.0, 255.0) as u8;
    [to_byte(r), to_byte(g), to_byte(b)]
}

#[derive(Clone, Debug, PartialEq)]
pub struct Orb {
    pos: [f64; 2],
    vel: [f64; 2],
    radius: f64,
    opacity: f64,
    tint: Tint,
}

impl Orb {
    pub fn new(pos: [f64; 2], vel: [f64; 2], radius: f64, opacity: f64, tint: Tint) -> Self {
        let radius = if radius.is_finite() {
            radius.max(MIN_RADIUS)
        } else {
            MIN_RADIUS
        };
        let opacity = if opacity.is_nan() {
            0.0
        } else {
            opacity.clamp(0.0, 1.0)
        };
        let finite = |v: [f64; 2]| v.map(|c| if c.is_finite() { c } else { 0.0 });
        Self {
            pos: finite(pos),
            vel: finite(vel),
            radius,
            opacity,
            tint,
        }
    }

    pub fn position(&self) -> [f64; 2] {
        self.pos
    }

    pub fn velocity(&self) -> [f64; 2] {
        self.vel
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn opacity(&self) -> f64 {
        self.opacity
    }

    pub fn tint(&self) -> Tint {
        self.tint
    }

    /// Move one frame, then reflect off any edge the orb has fully left.
    pub(crate) fn step(&mut self, bounds: [f64; 2]) {
        for axis in 0..2 {
            self.pos[axis] += self.vel[axis];
            let low = -self.radius;
            let high = bounds[axis] + self.radius;
            if self.pos[axis] < low {
                self.pos[axis] = low;
                self.vel[axis] = -self.vel[axis];
            } else if self.pos[axis] > high {
                self.pos[axis] = high;
                self.vel[axis] = -self.vel[axis];
            }
        }
    }
}

//! Backdrop tuning knobs.
//!
//! Every field has a default matching the marketing site, so hosts usually
//! pass nothing at all. A page that wants a different look hands over a
//! partial JSON document (via `start_backdrop` or the canvas
//! `data-backdrop` attribute) and only the named fields change.

use rand::Rng;
use serde::Deserialize;
use thiserror::Error;

use crate::orb::Tint;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid backdrop config: {0}")]
    Json(#[from] serde_json::Error),
}

/// Inclusive-exclusive range `[min, max)` sampled uniformly.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
pub struct Range {
    pub min: f64,
    pub max: f64,
}

impl Range {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Same range with the bounds in ascending order.
    pub fn ordered(self) -> Self {
        if self.max < self.min {
            Self::new(self.max, self.min)
        } else {
            self
        }
    }

    pub fn sample<R: Rng + ?Sized>(self, rng: &mut R) -> f64 {
        let Range { min, max } = self.ordered();
        min + rng.gen::<f64>() * (max - min)
    }
}

/// How many orbs a surface gets, chosen once from its width.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DensityPolicy {
    /// Widths strictly below this are treated as mobile.
    pub breakpoint: f64,
    pub compact: usize,
    pub full: usize,
}

impl Default for DensityPolicy {
    fn default() -> Self {
        Self {
            breakpoint: 768.0,
            compact: 4,
            full: 8,
        }
    }
}

impl DensityPolicy {
    pub fn count_for(&self, width: f64) -> usize {
        if width < self.breakpoint {
            self.compact
        } else {
            self.full
        }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Palette {
    /// Hue in degrees, drawn uniformly from the range.
    Hue { min: f64, max: f64 },
    /// One of a fixed set of RGB triplets, picked uniformly.
    Rgb { colors: Vec<[u8; 3]> },
}

impl Default for Palette {
    fn default() -> Self {
        Palette::Hue {
            min: 200.0,
            max: 240.0,
        }
    }
}

impl Palette {
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Tint {
        match self {
            Palette::Hue { min, max } => Tint::Hue(Range::new(*min, *max).sample(rng)),
            Palette::Rgb { colors } if !colors.is_empty() => {
                Tint::Rgb(colors[rng.gen_range(0..colors.len())])
            }
            Palette::Rgb { .. } => Palette::default().sample(rng),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BackdropConfig {
    pub density: DensityPolicy,
    pub radius: Range,
    /// Largest per-axis speed in pixels per frame.
    pub speed: f64,
    pub opacity: Range,
    pub palette: Palette,
    /// Fixed RNG seed; `None` seeds from entropy.
    pub seed: Option<u64>,
}

impl Default for BackdropConfig {
    fn default() -> Self {
        Self {
            density: DensityPolicy::default(),
            radius: Range::new(100.0, 250.0),
            speed: 0.25,
            opacity: Range::new(0.2, 0.35),
            palette: Palette::default(),
            seed: None,
        }
    }
}

impl BackdropConfig {
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(text)?)
    }
}

//! The orb simulation: a fixed set of orbs drifting inside a surface.

use rand::Rng;

use crate::config::BackdropConfig;
use crate::orb::Orb;

/// Smallest surface extent on either axis.
pub const MIN_EXTENT: f64 = 1.0;

fn clamp_extent(v: f64) -> f64 {
    if v.is_finite() {
        v.max(MIN_EXTENT)
    } else {
        MIN_EXTENT
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct OrbField {
    width: f64,
    height: f64,
    orbs: Vec<Orb>,
}

impl OrbField {
    /// Seed a field for a `width` × `height` surface. The orb count comes
    /// from `config.density` and never changes afterwards.
    pub fn initialize<R: Rng + ?Sized>(
        width: f64,
        height: f64,
        config: &BackdropConfig,
        rng: &mut R,
    ) -> Self {
        let width = clamp_extent(width);
        let height = clamp_extent(height);
        let count = config.density.count_for(width);
        let speed = config.speed.abs();
        let orbs = (0..count)
            .map(|_| {
                let pos = [rng.gen::<f64>() * width, rng.gen::<f64>() * height];
                let radius = config.radius.sample(rng);
                let vel = [
                    (rng.gen::<f64>() - 0.5) * 2.0 * speed,
                    (rng.gen::<f64>() - 0.5) * 2.0 * speed,
                ];
                let opacity = config.opacity.sample(rng);
                let tint = config.palette.sample(rng);
                Orb::new(pos, vel, radius, opacity, tint)
            })
            .collect::<Vec<_>>();
        log::debug!("seeded {} orbs on {}x{}", orbs.len(), width, height);
        Self {
            width,
            height,
            orbs,
        }
    }

    /// A field over an explicit orb set, for replaying a known start state.
    pub fn from_orbs(width: f64, height: f64, orbs: Vec<Orb>) -> Self {
        Self {
            width: clamp_extent(width),
            height: clamp_extent(height),
            orbs,
        }
    }

    /// Advance one frame.
    pub fn tick(&mut self) {
        let bounds = [self.width, self.height];
        for orb in &mut self.orbs {
            orb.step(bounds);
        }
    }

    /// New bounds for later ticks. Existing orbs are left where they are.
    pub fn resize(&mut self, width: f64, height: f64) {
        self.width = clamp_extent(width);
        self.height = clamp_extent(height);
        log::debug!("orb field resized to {}x{}", self.width, self.height);
    }

    pub fn orbs(&self) -> &[Orb] {
        &self.orbs
    }

    pub fn len(&self) -> usize {
        self.orbs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.orbs.is_empty()
    }

    pub fn size(&self) -> (f64, f64) {
        (self.width, self.height)
    }
}

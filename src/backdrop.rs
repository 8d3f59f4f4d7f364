//! Owned backdrop instance: field, surface and run state in one place.
//!
//! The host drives it by calling [`Backdrop::frame`] once per display
//! refresh and scheduling the next call only while it returns
//! [`Frame::Continue`].

use crate::field::OrbField;
use crate::paint::{self, Surface};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Lifecycle {
    Running,
    Stopped,
}

/// What the host should do after a frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Frame {
    Continue,
    Halt,
}

pub struct Backdrop<S> {
    field: OrbField,
    surface: Option<S>,
    state: Lifecycle,
    frames: u64,
    warned_unattached: bool,
}

impl<S: Surface> Backdrop<S> {
    pub fn new(field: OrbField, surface: Option<S>) -> Self {
        Self {
            field,
            surface,
            state: Lifecycle::Running,
            frames: 0,
            warned_unattached: false,
        }
    }

    /// Tick then render. Does nothing once stopped.
    pub fn frame(&mut self) -> Frame {
        if self.state == Lifecycle::Stopped {
            return Frame::Halt;
        }
        self.field.tick();
        if self.surface.is_none() && !self.warned_unattached {
            log::warn!("backdrop has no surface; skipping paint");
            self.warned_unattached = true;
        }
        paint::render(&self.field, self.surface.as_mut());
        self.frames += 1;
        Frame::Continue
    }

    pub fn resize(&mut self, width: f64, height: f64) {
        self.field.resize(width, height);
    }

    pub fn attach_surface(&mut self, surface: S) {
        self.surface = Some(surface);
        self.warned_unattached = false;
    }

    pub fn detach_surface(&mut self) -> Option<S> {
        self.surface.take()
    }

    /// Stop the loop. Returns `true` only on the call that actually stopped
    /// it; later calls are no-ops.
    pub fn shutdown(&mut self) -> bool {
        if self.state == Lifecycle::Stopped {
            return false;
        }
        self.state = Lifecycle::Stopped;
        log::info!("backdrop stopped ({} orbs)", self.field.len());
        true
    }

    pub fn state(&self) -> Lifecycle {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == Lifecycle::Running
    }

    pub fn field(&self) -> &OrbField {
        &self.field
    }

    pub fn surface(&self) -> Option<&S> {
        self.surface.as_ref()
    }

    /// Frames run so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::orb::{Orb, Tint};
    use crate::paint::PixelSurface;

    fn backdrop(surface: Option<PixelSurface>) -> Backdrop<PixelSurface> {
        let orb = Orb::new([30.0, 30.0], [1.0, 0.5], 12.0, 0.3, Tint::Hue(210.0));
        Backdrop::new(OrbField::from_orbs(64.0, 64.0, vec![orb]), surface)
    }

    #[test]
    fn frame_ticks_and_paints() {
        let mut b = backdrop(Some(PixelSurface::new(64, 64)));
        assert_eq!(b.frame(), Frame::Continue);
        assert_eq!(b.field().orbs()[0].position(), [31.0, 30.5]);
        assert!(b.surface().unwrap().pixel(31, 30).unwrap()[3] > 0);
    }

    #[test]
    fn frame_without_surface_still_ticks() {
        let mut b = backdrop(None);
        assert_eq!(b.frame(), Frame::Continue);
        assert_eq!(b.field().orbs()[0].position(), [31.0, 30.5]);
        b.attach_surface(PixelSurface::new(64, 64));
        b.frame();
        assert!(b.surface().unwrap().pixel(32, 31).unwrap()[3] > 0);
        assert!(b.detach_surface().is_some());
        assert!(b.surface().is_none());
    }

    #[test]
    fn shutdown_is_idempotent_and_final() {
        let mut b = backdrop(Some(PixelSurface::new(64, 64)));
        b.frame();
        assert!(b.shutdown());
        assert!(!b.shutdown());
        assert_eq!(b.state(), Lifecycle::Stopped);
        assert_eq!(b.frames(), 1);
        let frozen = b.field().clone();
        for _ in 0..10 {
            assert_eq!(b.frame(), Frame::Halt);
        }
        assert_eq!(b.field(), &frozen);
        assert_eq!(b.frames(), 1);
    }

    #[test]
    fn resize_between_frames() {
        let mut b = backdrop(None);
        b.frame();
        b.resize(10.0, 10.0);
        assert_eq!(b.field().size(), (10.0, 10.0));
        assert_eq!(b.field().len(), 1);
        b.frame();
        assert!(b.is_running());
    }
}

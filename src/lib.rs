//! Animated orb background for canvas-backed pages, plus the `mailto:`
//! hand-off used by the site's contact forms.
//!
//! The simulation, painting and form logic are plain Rust and build on any
//! target. Browser wiring lives in the `wasm` module and only exists on
//! wasm32.

pub mod backdrop;
pub mod config;
pub mod contact;
pub mod error;
pub mod field;
pub mod orb;
pub mod paint;

pub use backdrop::{Backdrop, Frame, Lifecycle};
pub use config::{BackdropConfig, DensityPolicy, Palette, Range};
pub use contact::{ContactSubmission, FormError, FormKind, MailDraft};
pub use error::BackdropError;
pub use field::OrbField;
pub use orb::{Orb, Tint};
pub use paint::{PixelSurface, Surface};

// Only compile wasm-specific code when targeting wasm32.

#[cfg(target_arch = "wasm32")]
mod wasm {
    use std::cell::RefCell;

    use wasm_bindgen::prelude::*;

    mod forms;
    mod render;

    pub use render::{start_backdrop, BackdropHandle};

    /// Id of the canvas booted automatically on load.
    const AUTO_CANVAS_ID: &str = "backdrop";

    thread_local! {
        static AUTO: RefCell<Option<BackdropHandle>> = const { RefCell::new(None) };
    }

    #[wasm_bindgen(start)]
    pub fn main() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).ok();

        let window = web_sys::window().ok_or(crate::BackdropError::NoWindow)?;
        let document = window.document().ok_or(crate::BackdropError::NoDocument)?;
        wire_page(&document)
    }

    /// Boot the `#backdrop` canvas, if present, and hook up mailto forms.
    /// A backdrop that fails to start is logged; the forms are wired anyway.
    pub fn wire_page(document: &web_sys::Document) -> Result<(), JsValue> {
        if document.get_element_by_id(AUTO_CANVAS_ID).is_some() {
            match start_backdrop(AUTO_CANVAS_ID, None) {
                Ok(handle) => {
                    if let Some(old) = AUTO.with(|slot| slot.borrow_mut().replace(handle)) {
                        old.shutdown();
                    }
                }
                Err(e) => log::error!("backdrop failed to start: {:?}", e),
            }
        }
        forms::wire_forms(document)
    }

    /// Stop the backdrop started on load, if any.
    #[wasm_bindgen]
    pub fn shutdown_backdrop() {
        if let Some(handle) = AUTO.with(|slot| slot.borrow_mut().take()) {
            handle.shutdown();
        }
    }
}

#[cfg(target_arch = "wasm32")]
pub use wasm::{shutdown_backdrop, start_backdrop, wire_page, BackdropHandle};

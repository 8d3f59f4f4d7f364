use std::cell::{Cell, RefCell};
use std::f64::consts::TAU;
use std::rc::Rc;

use rand::rngs::SmallRng;
use rand::SeedableRng;
use wasm_bindgen::{closure::Closure, prelude::*, JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, Window};

use crate::backdrop::{Backdrop, Frame};
use crate::config::BackdropConfig;
use crate::error::BackdropError;
use crate::field::OrbField;
use crate::paint::{GradientStop, Surface};

/// Browser 2D canvas as a paint target.
pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl CanvasSurface {
    fn try_fill(&self, center: [f64; 2], radius: f64, stops: &[GradientStop]) -> Result<(), JsValue> {
        let [x, y] = center;
        let gradient = self.ctx.create_radial_gradient(x, y, 0.0, x, y, radius)?;
        for stop in stops {
            gradient.add_color_stop(stop.offset as f32, &stop.color.to_css())?;
        }
        self.ctx.set_fill_style_canvas_gradient(&gradient);
        self.ctx.begin_path();
        self.ctx.arc(x, y, radius, 0.0, TAU)?;
        self.ctx.fill();
        Ok(())
    }
}

impl Surface for CanvasSurface {
    fn clear(&mut self) {
        self.ctx.clear_rect(
            0.0,
            0.0,
            self.canvas.width() as f64,
            self.canvas.height() as f64,
        );
    }

    fn fill_radial(&mut self, center: [f64; 2], radius: f64, stops: &[GradientStop]) {
        if let Err(e) = self.try_fill(center, radius, stops) {
            log::error!("orb paint failed: {:?}", e);
        }
    }
}

fn viewport(window: &Window) -> (f64, f64) {
    let dim = |v: Result<JsValue, JsValue>| v.ok().and_then(|v| v.as_f64()).unwrap_or(1.0);
    (dim(window.inner_width()), dim(window.inner_height()))
}

struct Driver {
    window: Window,
    canvas: HtmlCanvasElement,
    backdrop: RefCell<Backdrop<CanvasSurface>>,
    frame_id: Cell<Option<i32>>,
    // `tick` holds the animation-frame closure so it can re-register itself
    // with `request_animation_frame` on every frame.
    tick: RefCell<Option<Closure<dyn FnMut()>>>,
    resize: RefCell<Option<Closure<dyn FnMut()>>>,
}

impl Driver {
    fn schedule(&self) -> Result<(), JsValue> {
        let tick = self.tick.borrow();
        let Some(callback) = tick.as_ref() else {
            return Ok(());
        };
        let id = self
            .window
            .request_animation_frame(callback.as_ref().unchecked_ref())?;
        self.frame_id.set(Some(id));
        Ok(())
    }

    fn on_frame(&self) {
        self.frame_id.set(None);
        let step = self.backdrop.borrow_mut().frame();
        if step == Frame::Continue {
            if let Err(e) = self.schedule() {
                log::error!("request_animation_frame failed: {:?}", e);
            }
        }
    }

    fn on_resize(&self) {
        let (w, h) = viewport(&self.window);
        self.canvas.set_width(w as u32);
        self.canvas.set_height(h as u32);
        self.backdrop.borrow_mut().resize(w, h);
    }

    fn shutdown(&self) {
        if !self.backdrop.borrow_mut().shutdown() {
            return;
        }
        if let Some(id) = self.frame_id.take() {
            if let Err(e) = self.window.cancel_animation_frame(id) {
                log::error!("cancel_animation_frame failed: {:?}", e);
            }
        }
        if let Some(resize) = self.resize.borrow_mut().take() {
            if let Err(e) = self
                .window
                .remove_event_listener_with_callback("resize", resize.as_ref().unchecked_ref())
            {
                log::error!("removing resize listener failed: {:?}", e);
            }
        }
        // Dropping the closures breaks their reference cycle with `Driver`.
        self.tick.borrow_mut().take();
    }
}

/// Handle to a running backdrop. Dropping it does not stop the animation;
/// call [`BackdropHandle::shutdown`].
#[wasm_bindgen]
pub struct BackdropHandle {
    driver: Rc<Driver>,
}

#[wasm_bindgen]
impl BackdropHandle {
    /// Stop animating and detach from the window. Safe to call repeatedly.
    pub fn shutdown(&self) {
        self.driver.shutdown();
    }

    #[wasm_bindgen(js_name = isRunning)]
    pub fn is_running(&self) -> bool {
        self.driver.backdrop.borrow().is_running()
    }

    /// Frames animated so far; stops growing after shutdown.
    #[wasm_bindgen(js_name = frameCount)]
    pub fn frame_count(&self) -> u32 {
        self.driver.backdrop.borrow().frames() as u32
    }

    #[wasm_bindgen(js_name = orbCount)]
    pub fn orb_count(&self) -> usize {
        self.driver.backdrop.borrow().field().len()
    }
}

/// Start an orb backdrop on the canvas with id `canvas_id`.
///
/// `options` is a JSON [`BackdropConfig`]; without it the canvas's
/// `data-backdrop` attribute is used, and failing that the defaults.
#[wasm_bindgen(js_name = startBackdrop)]
pub fn start_backdrop(canvas_id: &str, options: Option<String>) -> Result<BackdropHandle, JsValue> {
    let window = web_sys::window().ok_or(BackdropError::NoWindow)?;
    let document = window.document().ok_or(BackdropError::NoDocument)?;
    let canvas = document
        .get_element_by_id(canvas_id)
        .ok_or_else(|| BackdropError::ElementNotFound(canvas_id.to_string()))?
        .dyn_into::<HtmlCanvasElement>()
        .map_err(|_| BackdropError::NotACanvas(canvas_id.to_string()))?;

    let config = match options.or_else(|| canvas.get_attribute("data-backdrop")) {
        Some(text) => BackdropConfig::from_json(&text).map_err(BackdropError::from)?,
        None => BackdropConfig::default(),
    };

    // Resize canvas to fit window
    let (w, h) = viewport(&window);
    canvas.set_width(w as u32);
    canvas.set_height(h as u32);

    // No 2D context leaves the backdrop running with nothing to paint into.
    let surface = match canvas.get_context("2d") {
        Ok(Some(ctx)) => match ctx.dyn_into::<CanvasRenderingContext2d>() {
            Ok(ctx) => Some(CanvasSurface {
                canvas: canvas.clone(),
                ctx,
            }),
            Err(_) => None,
        },
        Ok(None) | Err(_) => None,
    };
    if surface.is_none() {
        log::warn!("2d context unavailable on #{canvas_id}");
    }

    let mut rng = match config.seed {
        Some(seed) => SmallRng::seed_from_u64(seed),
        None => SmallRng::from_entropy(),
    };
    let field = OrbField::initialize(w, h, &config, &mut rng);
    let orbs = field.len();

    let driver = Rc::new(Driver {
        window: window.clone(),
        canvas,
        backdrop: RefCell::new(Backdrop::new(field, surface)),
        frame_id: Cell::new(None),
        tick: RefCell::new(None),
        resize: RefCell::new(None),
    });

    let tick = {
        let driver = driver.clone();
        Closure::wrap(Box::new(move || driver.on_frame()) as Box<dyn FnMut()>)
    };
    *driver.tick.borrow_mut() = Some(tick);

    let resize = {
        let driver = driver.clone();
        Closure::wrap(Box::new(move || driver.on_resize()) as Box<dyn FnMut()>)
    };
    let listening = window.add_event_listener_with_callback("resize", resize.as_ref().unchecked_ref());
    *driver.resize.borrow_mut() = Some(resize);

    // On failure, tear down whatever was wired so nothing stays attached.
    if let Err(e) = listening.and_then(|()| driver.schedule()) {
        driver.shutdown();
        return Err(BackdropError::js(e).into());
    }
    log::info!("backdrop started on #{canvas_id} with {orbs} orbs");

    Ok(BackdropHandle { driver })
}

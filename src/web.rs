//! Browser entry point
//!
//! Wires the controller to a `<canvas>`, `requestAnimationFrame` and the
//! page's pointer, resize and visibility events.

use glam::Vec2;
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use wasm_bindgen::prelude::*;
use web_sys::{HtmlCanvasElement, MouseEvent, Window};

use crate::controller::BackdropController;
use crate::error::BackdropError;
use crate::renderer::CanvasSurface;
use crate::scheduler::{FrameLoop, FrameRequester};
use crate::settings::{DeviceProfile, Settings};

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        web_sys::console::warn_1(&"orbit-backdrop: logger already set".into());
    }
}

/// `requestAnimationFrame` driving one `App`
struct BrowserFrames {
    app: Weak<RefCell<App>>,
}

impl FrameRequester for BrowserFrames {
    type Handle = i32;

    fn request_frame(&mut self) -> Option<i32> {
        let window = web_sys::window()?;
        let app = self.app.clone();
        let callback = Closure::once_into_js(move |_time: f64| {
            if let Some(app) = app.upgrade() {
                app.borrow_mut().on_animation_frame();
            }
        });
        window
            .request_animation_frame(callback.unchecked_ref())
            .ok()
    }

    fn cancel_frame(&mut self, handle: i32) {
        if let Some(window) = web_sys::window() {
            let _ = window.cancel_animation_frame(handle);
        }
    }
}

struct App {
    controller: BackdropController,
    surface: CanvasSurface,
    frames: FrameLoop<BrowserFrames>,
}

impl App {
    fn on_animation_frame(&mut self) {
        let now = js_sys::Date::now();
        let Self {
            controller,
            surface,
            frames,
        } = self;
        frames.on_frame(|| controller.frame(surface, None, now));
    }

    fn set_visible(&mut self, visible: bool) {
        let now = js_sys::Date::now();
        if visible {
            self.controller.resume(now);
        } else {
            self.controller.suspend(now);
        }
        self.frames.set_visible(visible);
    }
}

/// Handle returned to the page
#[wasm_bindgen]
pub struct Backdrop {
    app: Rc<RefCell<App>>,
}

#[wasm_bindgen]
impl Backdrop {
    /// Start the animation on the canvas with id `canvas_id`
    #[wasm_bindgen(constructor)]
    pub fn new(canvas_id: &str, is_dark: bool) -> Result<Backdrop, JsValue> {
        let window = web_sys::window().ok_or(BackdropError::NoWindow)?;
        let canvas = find_canvas(&window, canvas_id)?;

        let (width, height) = viewport_size(&window);
        canvas.set_width(width);
        canvas.set_height(height);
        let surface = CanvasSurface::new(canvas)?;

        let settings = Settings::load(DeviceProfile::detect());
        let pointer_repulsion = settings.pointer_repulsion;
        let now = js_sys::Date::now();
        let seed = now as u64;
        let controller = BackdropController::new(width, height, settings, seed, now, is_dark);

        let app = Rc::new(RefCell::new(App {
            controller,
            surface,
            frames: FrameLoop::new(BrowserFrames { app: Weak::new() }),
        }));
        app.borrow_mut().frames.requester_mut().app = Rc::downgrade(&app);

        if pointer_repulsion {
            setup_pointer(&window, app.clone());
        }
        setup_resize(&window, app.clone());
        setup_visibility(&window, app.clone());

        app.borrow_mut().frames.start();
        log::info!("Backdrop running on #{} ({}x{})", canvas_id, width, height);

        Ok(Backdrop { app })
    }

    /// Switch palettes; applied on the next frame
    #[wasm_bindgen(js_name = setTheme)]
    pub fn set_theme(&self, is_dark: bool) {
        self.app.borrow_mut().controller.set_theme(is_dark);
    }

    #[wasm_bindgen(js_name = isDark)]
    pub fn is_dark(&self) -> bool {
        self.app.borrow().controller.is_dark()
    }
}

fn find_canvas(window: &Window, id: &str) -> Result<HtmlCanvasElement, BackdropError> {
    let document = window.document().ok_or(BackdropError::NoWindow)?;
    document
        .get_element_by_id(id)
        .ok_or_else(|| BackdropError::CanvasNotFound(id.to_string()))?
        .dyn_into::<HtmlCanvasElement>()
        .map_err(|_| BackdropError::NotACanvas(id.to_string()))
}

fn viewport_size(window: &Window) -> (u32, u32) {
    let dim = |v: Result<JsValue, JsValue>| {
        v.ok()
            .and_then(|v| v.as_f64())
            .map(|v| v.max(0.0) as u32)
            .unwrap_or(0)
    };
    (dim(window.inner_width()), dim(window.inner_height()))
}

fn setup_pointer(window: &Window, app: Rc<RefCell<App>>) {
    {
        let app = app.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
            let pos = Vec2::new(event.client_x() as f32, event.client_y() as f32);
            app.borrow_mut()
                .controller
                .set_pointer(pos, js_sys::Date::now());
        });
        let _ = window
            .add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    // Pointer left the page
    {
        let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
            if event.related_target().is_none() {
                app.borrow_mut().controller.clear_pointer();
            }
        });
        let _ =
            window.add_event_listener_with_callback("mouseout", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}

fn setup_resize(window: &Window, app: Rc<RefCell<App>>) {
    let window_clone = window.clone();
    let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
        let (width, height) = viewport_size(&window_clone);
        app.borrow_mut()
            .controller
            .request_resize(width, height, js_sys::Date::now());
    });
    let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
    closure.forget();
}

fn setup_visibility(window: &Window, app: Rc<RefCell<App>>) {
    let Some(document) = window.document() else {
        return;
    };
    let document_clone = document.clone();
    let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
        let visible = document_clone.visibility_state() == web_sys::VisibilityState::Visible;
        app.borrow_mut().set_visible(visible);
        log::info!("Page {}", if visible { "visible" } else { "hidden" });
    });
    let _ = document
        .add_event_listener_with_callback("visibilitychange", closure.as_ref().unchecked_ref());
    closure.forget();
}

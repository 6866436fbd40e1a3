//! Rendering module
//!
//! Draws a `SceneState` through the `Surface` trait. The browser backend is
//! the Canvas 2D context; everything else is backend-agnostic.

#[cfg(target_arch = "wasm32")]
pub mod canvas;
pub mod draw;
pub mod palette;
pub mod surface;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasSurface;
pub use draw::{Frame, render};
pub use palette::{Rgba, Theme};
pub use surface::{
    ColorStop, DrawCommand, Paint, RecordedPaint, RecordingSurface, RenderLayer, Shadow, Surface,
};

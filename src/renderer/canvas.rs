//! Canvas 2D backend (WASM only)

use glam::Vec2;
use std::f64::consts::TAU;
use wasm_bindgen::JsCast;
use web_sys::{CanvasGradient, CanvasRenderingContext2d, HtmlCanvasElement};

use super::palette::Rgba;
use super::surface::{ColorStop, Paint, Shadow, Surface};
use crate::error::BackdropError;

/// A `Surface` drawing into an `HtmlCanvasElement` through its 2D context
pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl CanvasSurface {
    pub fn new(canvas: HtmlCanvasElement) -> Result<Self, BackdropError> {
        let ctx = canvas
            .get_context("2d")
            .ok()
            .flatten()
            .and_then(|ctx| ctx.dyn_into::<CanvasRenderingContext2d>().ok())
            .ok_or(BackdropError::ContextUnavailable)?;
        Ok(Self { canvas, ctx })
    }

    pub fn canvas(&self) -> &HtmlCanvasElement {
        &self.canvas
    }

    fn gradient(&self, paint: &Paint) -> Option<CanvasGradient> {
        let (gradient, stops) = match *paint {
            Paint::Solid(_) => return None,
            Paint::Radial {
                inner,
                inner_radius,
                outer,
                outer_radius,
                stops,
            } => (
                self.ctx
                    .create_radial_gradient(
                        inner.x as f64,
                        inner.y as f64,
                        inner_radius.max(0.0) as f64,
                        outer.x as f64,
                        outer.y as f64,
                        outer_radius.max(0.0) as f64,
                    )
                    .ok()?,
                stops,
            ),
            Paint::Linear { from, to, stops } => (
                self.ctx
                    .create_linear_gradient(from.x as f64, from.y as f64, to.x as f64, to.y as f64),
                stops,
            ),
        };
        add_stops(&gradient, stops);
        Some(gradient)
    }

    fn set_fill(&self, paint: &Paint) {
        match (paint, self.gradient(paint)) {
            (Paint::Solid(color), _) => self.ctx.set_fill_style_str(&color.css()),
            (_, Some(gradient)) => self.ctx.set_fill_style_canvas_gradient(&gradient),
            (_, None) => self.ctx.set_fill_style_str(&Rgba::TRANSPARENT.css()),
        }
    }

    fn set_stroke(&self, paint: &Paint) {
        match (paint, self.gradient(paint)) {
            (Paint::Solid(color), _) => self.ctx.set_stroke_style_str(&color.css()),
            (_, Some(gradient)) => self.ctx.set_stroke_style_canvas_gradient(&gradient),
            (_, None) => self.ctx.set_stroke_style_str(&Rgba::TRANSPARENT.css()),
        }
    }

    fn circle_path(&self, center: Vec2, radius: f32) {
        self.ctx.begin_path();
        let _ = self
            .ctx
            .arc(center.x as f64, center.y as f64, radius.max(0.0) as f64, 0.0, TAU);
    }
}

fn add_stops(gradient: &CanvasGradient, stops: &[ColorStop]) {
    for stop in stops {
        let _ = gradient.add_color_stop(stop.offset.clamp(0.0, 1.0), &stop.color.css());
    }
}

impl Surface for CanvasSurface {
    fn size(&self) -> Vec2 {
        Vec2::new(self.canvas.width() as f32, self.canvas.height() as f32)
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.canvas.set_width(width);
        self.canvas.set_height(height);
    }

    fn clear(&mut self) {
        let size = self.size();
        self.ctx.clear_rect(0.0, 0.0, size.x as f64, size.y as f64);
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, paint: &Paint, shadow: Option<Shadow>) {
        if radius <= 0.0 || paint.max_alpha() <= 0.0 {
            return;
        }
        self.set_fill(paint);
        if let Some(shadow) = shadow {
            self.ctx.set_shadow_blur(shadow.blur as f64);
            self.ctx.set_shadow_color(&shadow.color.css());
        }
        self.circle_path(center, radius);
        self.ctx.fill();
        if shadow.is_some() {
            self.ctx.set_shadow_blur(0.0);
        }
    }

    fn stroke_circle(&mut self, center: Vec2, radius: f32, width: f32, paint: &Paint) {
        if radius <= 0.0 {
            return;
        }
        self.set_stroke(paint);
        self.ctx.set_line_width(width as f64);
        self.circle_path(center, radius);
        self.ctx.stroke();
    }

    fn stroke_line(&mut self, from: Vec2, to: Vec2, width: f32, paint: &Paint) {
        self.set_stroke(paint);
        self.ctx.set_line_width(width as f64);
        self.ctx.begin_path();
        self.ctx.move_to(from.x as f64, from.y as f64);
        self.ctx.line_to(to.x as f64, to.y as f64);
        self.ctx.stroke();
    }
}

use crate::input::{css_rgb, css_rgba};
use glam::Vec2;
use motion_core::Painter;
use std::f64::consts::TAU;
use wasm_bindgen::JsValue;
use web_sys as web;

/// Canvas 2D backend for the core renderer. Draws in logical units; the
/// device-pixel scale lives in the context transform.
///
/// Canvas calls that can throw record the first failure instead of
/// panicking; the frame loop collects it with [`CanvasPainter::take_error`].
pub struct CanvasPainter {
    ctx: web::CanvasRenderingContext2d,
    error: Option<JsValue>,
}

impl CanvasPainter {
    pub fn new(ctx: web::CanvasRenderingContext2d) -> Self {
        Self { ctx, error: None }
    }

    #[inline]
    pub fn context(&self) -> &web::CanvasRenderingContext2d {
        &self.ctx
    }

    pub fn take_error(&mut self) -> anyhow::Result<()> {
        match self.error.take() {
            Some(e) => Err(anyhow::anyhow!("canvas: {:?}", e)),
            None => Ok(()),
        }
    }

    fn record(&mut self, result: Result<(), JsValue>) {
        if let Err(e) = result {
            if self.error.is_none() {
                self.error = Some(e);
            }
        }
    }
}

impl Painter for CanvasPainter {
    fn clear(&mut self, width: f32, height: f32) {
        self.ctx.set_global_alpha(1.0);
        self.ctx.clear_rect(0.0, 0.0, width as f64, height as f64);
    }

    fn line(&mut self, from: Vec2, to: Vec2, width: f32, color: [f32; 3], alpha: f32) {
        if alpha <= 0.0 {
            return;
        }
        self.ctx.set_global_alpha(alpha.min(1.0) as f64);
        self.ctx.set_stroke_style_str(&css_rgb(color));
        self.ctx.set_line_width(width as f64);
        self.ctx.set_line_cap("round");
        self.ctx.begin_path();
        self.ctx.move_to(from.x as f64, from.y as f64);
        self.ctx.line_to(to.x as f64, to.y as f64);
        self.ctx.stroke();
    }

    fn circle(&mut self, center: Vec2, radius: f32, color: [f32; 3], alpha: f32) {
        if alpha <= 0.0 || radius <= 0.0 {
            return;
        }
        self.ctx.set_global_alpha(alpha.min(1.0) as f64);
        self.ctx.set_fill_style_str(&css_rgb(color));
        self.ctx.begin_path();
        let arc = self
            .ctx
            .arc(center.x as f64, center.y as f64, radius as f64, 0.0, TAU);
        self.record(arc);
        self.ctx.fill();
    }

    fn glow(&mut self, center: Vec2, radius: f32, color: [f32; 3], alpha: f32) {
        if alpha <= 0.0 || radius <= 0.0 {
            return;
        }
        let (x, y, r) = (center.x as f64, center.y as f64, radius as f64);
        let gradient = match self.ctx.create_radial_gradient(x, y, 0.0, x, y, r) {
            Ok(g) => g,
            Err(e) => {
                self.record(Err(e));
                return;
            }
        };
        let inner = gradient.add_color_stop(0.0, &css_rgba(color, alpha));
        let outer = gradient.add_color_stop(1.0, &css_rgba(color, 0.0));
        self.record(inner.and(outer));
        self.ctx.set_global_alpha(1.0);
        self.ctx.set_fill_style_canvas_gradient(&gradient);
        self.ctx.fill_rect(x - r, y - r, 2.0 * r, 2.0 * r);
    }
}

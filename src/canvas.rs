use crate::core::{ConfigError, DrawSurface, FieldConfig, Rgba};
use glam::DVec2;
use std::f64::consts::TAU;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Field settings readable from `data-*` attributes on the hero canvas.
const OVERRIDE_KEYS: [&str; 7] = [
    "particle-count",
    "particle-speed",
    "max-speed",
    "density",
    "connection-distance",
    "repulsion-radius",
    "repulsion-strength",
];

/// 2D-context drawing surface over the hero `<canvas>`.
pub struct CanvasSurface {
    canvas: web::HtmlCanvasElement,
    ctx: web::CanvasRenderingContext2d,
}

impl CanvasSurface {
    pub fn new(canvas: web::HtmlCanvasElement) -> anyhow::Result<Self> {
        let ctx = canvas
            .get_context("2d")
            .map_err(|e| anyhow::anyhow!("getContext(2d) error: {:?}", e))?
            .ok_or_else(|| anyhow::anyhow!("2d context unavailable"))?
            .dyn_into::<web::CanvasRenderingContext2d>()
            .map_err(|e| anyhow::anyhow!("{:?}", e))?;
        Ok(Self { canvas, ctx })
    }
}

impl DrawSurface for CanvasSurface {
    fn refresh_size(&mut self) -> (f64, f64) {
        // backing store follows the laid-out CSS size (1 canvas px per CSS px)
        let w = self.canvas.offset_width().max(0) as u32;
        let h = self.canvas.offset_height().max(0) as u32;
        self.canvas.set_width(w);
        self.canvas.set_height(h);
        (w as f64, h as f64)
    }

    fn clear(&mut self, width: f64, height: f64) {
        self.ctx.clear_rect(0.0, 0.0, width, height);
    }

    fn fill_circle(&mut self, center: DVec2, radius: f64, color: Rgba) {
        self.ctx.begin_path();
        _ = self.ctx.arc(center.x, center.y, radius, 0.0, TAU);
        self.ctx.set_fill_style_str(&color.css());
        self.ctx.fill();
    }

    fn stroke_line(&mut self, from: DVec2, to: DVec2, color: Rgba, line_width: f64) {
        self.ctx.begin_path();
        self.ctx.move_to(from.x, from.y);
        self.ctx.line_to(to.x, to.y);
        self.ctx.set_stroke_style_str(&color.css());
        self.ctx.set_line_width(line_width);
        self.ctx.stroke();
    }
}

/// Defaults with any `data-*` overrides present on `canvas` applied.
pub fn config_from_canvas(canvas: &web::HtmlCanvasElement) -> Result<FieldConfig, ConfigError> {
    let attrs: Vec<(&str, String)> = OVERRIDE_KEYS
        .iter()
        .filter_map(|key| {
            canvas
                .get_attribute(&format!("data-{}", key))
                .map(|v| (*key, v))
        })
        .collect();
    FieldConfig::default().with_overrides(attrs.iter().map(|(k, v)| (*k, v.as_str())))
}

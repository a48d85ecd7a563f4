use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::engine::DesignEngine;
use crate::error::EngineError;
use crate::objects::{DrawableObject, Geometry};
use crate::types::TextAlign;

const SELECTION_STROKE: &str = "#c5a059";

pub(crate) enum SurfaceTarget {
    /// The live editor canvas.
    Canvas2d(CanvasRenderingContext2d),
    /// No paint target; placement and export still work. Used headless.
    Offscreen,
}

/// The explicitly owned render surface. Everything that needs a mounted
/// editor takes the engine's handle through `ensure_ready`, so a torn-down
/// session fails with `EngineNotReady` instead of touching a stale
/// context.
pub struct RenderSurface {
    pub(crate) target: SurfaceTarget,
}

impl RenderSurface {
    pub fn from_canvas(canvas: &HtmlCanvasElement) -> Result<RenderSurface, EngineError> {
        let ctx = canvas
            .get_context("2d")
            .map_err(|_| EngineError::RenderInit("2d context request failed".to_string()))?
            .ok_or_else(|| EngineError::RenderInit("2d context unavailable".to_string()))?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| EngineError::RenderInit("unexpected context type".to_string()))?;
        Ok(RenderSurface { target: SurfaceTarget::Canvas2d(ctx) })
    }

    pub fn offscreen() -> RenderSurface {
        RenderSurface { target: SurfaceTarget::Offscreen }
    }

    pub(crate) fn context(&self) -> Option<&CanvasRenderingContext2d> {
        match &self.target {
            SurfaceTarget::Canvas2d(ctx) => Some(ctx),
            SurfaceTarget::Offscreen => None,
        }
    }
}

#[wasm_bindgen]
impl DesignEngine {
    /// Attach the editor to its canvas element. Sizes the element to the
    /// scene canvas and becomes the surface every later operation checks
    /// for. Construction failure is fatal to the session.
    pub fn mount_canvas(&mut self, canvas: &HtmlCanvasElement) -> Result<(), JsValue> {
        let surface = RenderSurface::from_canvas(canvas)?;
        canvas.set_width(self.scene.canvas().width as u32);
        canvas.set_height(self.scene.canvas().height as u32);
        self.surface = Some(surface);
        self.needs_repaint = true;
        log::info!(
            "mounted {}x{} canvas",
            self.scene.canvas().width,
            self.scene.canvas().height
        );
        Ok(())
    }

    /// Mount without a paint target: placement, mutation and export all
    /// behave normally, repaints are no-ops.
    pub fn mount_offscreen(&mut self) {
        self.surface = Some(RenderSurface::offscreen());
        self.needs_repaint = true;
    }

    /// Detach on editor teardown. In-flight asset continuations then fail
    /// with `EngineNotReady` rather than resurrecting the session.
    pub fn unmount(&mut self) {
        self.surface = None;
    }

    pub fn is_mounted(&self) -> bool {
        self.surface.is_some()
    }

    /// Paint the scene through the current viewport zoom. Returns whether
    /// anything was painted.
    pub fn render(&mut self) -> bool {
        self.needs_repaint = false;
        let Some(surface) = &self.surface else { return false };
        let Some(ctx) = surface.context() else { return false };
        self.paint_scene(ctx);
        true
    }
}

impl DesignEngine {
    fn paint_scene(&self, ctx: &CanvasRenderingContext2d) {
        let canvas = self.scene.canvas();
        ctx.save();
        ctx.clear_rect(0.0, 0.0, 20000.0, 20000.0);
        ctx.scale(self.viewport_zoom, self.viewport_zoom).unwrap();

        ctx.set_fill_style_str(&canvas.background);
        ctx.fill_rect(0.0, 0.0, canvas.width, canvas.height);

        for obj in self.scene.all() {
            self.paint_object(ctx, obj);
        }
        self.paint_selection_overlay(ctx);
        ctx.restore();
    }

    fn paint_object(&self, ctx: &CanvasRenderingContext2d, obj: &DrawableObject) {
        let local = obj.local_bounds();
        let (w, h) = (local.width(), local.height());
        let c = obj.world_center();

        ctx.save();
        ctx.set_global_alpha(obj.style.opacity);
        ctx.translate(c.x, c.y).unwrap();
        ctx.rotate(obj.transform.rotation_radians()).unwrap();
        ctx.scale(obj.transform.scale_x, obj.transform.scale_y).unwrap();
        ctx.translate(-w / 2.0, -h / 2.0).unwrap();

        ctx.set_fill_style_str(&obj.style.fill);
        ctx.set_stroke_style_str(&obj.style.stroke);
        ctx.set_line_width(obj.style.stroke_width);

        match &obj.geometry {
            Geometry::Rectangle { width, height, corner_radius } => {
                if *corner_radius > 0.0 {
                    let r = corner_radius.min(width / 2.0).min(height / 2.0);
                    ctx.begin_path();
                    ctx.move_to(r, 0.0);
                    ctx.line_to(width - r, 0.0);
                    ctx.arc_to(*width, 0.0, *width, r, r).unwrap();
                    ctx.line_to(*width, height - r);
                    ctx.arc_to(*width, *height, width - r, *height, r).unwrap();
                    ctx.line_to(r, *height);
                    ctx.arc_to(0.0, *height, 0.0, height - r, r).unwrap();
                    ctx.line_to(0.0, r);
                    ctx.arc_to(0.0, 0.0, r, 0.0, r).unwrap();
                    ctx.close_path();
                    ctx.fill();
                } else {
                    ctx.fill_rect(0.0, 0.0, *width, *height);
                }
            }
            Geometry::Circle { radius } => {
                ctx.begin_path();
                let _ = ctx.ellipse(*radius, *radius, *radius, *radius, 0.0, 0.0, std::f64::consts::TAU);
                ctx.fill();
            }
            Geometry::Ellipse { rx, ry } => {
                ctx.begin_path();
                let _ = ctx.ellipse(*rx, *ry, *rx, *ry, 0.0, 0.0, std::f64::consts::TAU);
                ctx.fill();
            }
            Geometry::Triangle { width, height } => {
                ctx.begin_path();
                ctx.move_to(width / 2.0, 0.0);
                ctx.line_to(*width, *height);
                ctx.line_to(0.0, *height);
                ctx.close_path();
                ctx.fill();
            }
            Geometry::Polygon { points } => {
                ctx.begin_path();
                for (i, p) in points.iter().enumerate() {
                    let (px, py) = (p.x - local.min_x(), p.y - local.min_y());
                    if i == 0 {
                        ctx.move_to(px, py);
                    } else {
                        ctx.line_to(px, py);
                    }
                }
                ctx.close_path();
                ctx.fill();
            }
            Geometry::Line { dx, dy } => {
                ctx.begin_path();
                ctx.move_to(-local.min_x(), -local.min_y());
                ctx.line_to(dx - local.min_x(), dy - local.min_y());
                ctx.stroke();
            }
            Geometry::Text { content } => {
                if let Some(ts) = &obj.text_style {
                    ctx.set_font(&format!(
                        "{} {} {}px {}",
                        ts.font_style.as_css(),
                        ts.font_weight.as_css(),
                        ts.font_size,
                        ts.font_family
                    ));
                    ctx.set_text_align(ts.text_align.as_css());
                    let anchor_x = match ts.text_align {
                        TextAlign::Left => 0.0,
                        TextAlign::Center => w / 2.0,
                        TextAlign::Right => w,
                    };
                    let size = ts.font_size as f64;
                    for (i, line) in content.lines().enumerate() {
                        let _ = ctx.fill_text(line, anchor_x, size * (1.0 + 1.2 * i as f64));
                    }
                }
            }
            Geometry::Image { natural_width, natural_height, element, .. } => {
                if let Some(el) = element {
                    if let Some(img) = el.dyn_ref::<web_sys::HtmlImageElement>() {
                        let _ = ctx.draw_image_with_html_image_element_and_dw_and_dh(
                            img,
                            0.0,
                            0.0,
                            *natural_width as f64,
                            *natural_height as f64,
                        );
                    } else if let Some(canvas) = el.dyn_ref::<HtmlCanvasElement>() {
                        let _ = ctx.draw_image_with_html_canvas_element_and_dw_and_dh(
                            canvas,
                            0.0,
                            0.0,
                            *natural_width as f64,
                            *natural_height as f64,
                        );
                    }
                }
            }
        }
        ctx.restore();
    }

    fn paint_selection_overlay(&self, ctx: &CanvasRenderingContext2d) {
        let ids = self.selection.ids();
        if ids.is_empty() {
            return;
        }

        if let (1, Some(obj)) = (ids.len(), self.scene.get(ids[0])) {
            let (w, h) = obj.scaled_size();
            let c = obj.world_center();
            ctx.save();
            ctx.translate(c.x, c.y).unwrap();
            ctx.rotate(obj.transform.rotation_radians()).unwrap();
            ctx.translate(-w / 2.0, -h / 2.0).unwrap();
            ctx.set_stroke_style_str(SELECTION_STROKE);
            ctx.set_line_width(1.5 / self.viewport_zoom);
            ctx.set_line_dash(&js_sys::Array::new()).unwrap();
            ctx.stroke_rect(0.0, 0.0, w, h);

            let handle = 8.0 / self.viewport_zoom;
            let rotate_offset = -30.0 / self.viewport_zoom;
            ctx.set_fill_style_str("#ffffff");
            ctx.set_line_width(1.0 / self.viewport_zoom);
            let handles = [
                (0.0, 0.0), (w, 0.0), (0.0, h), (w, h),
                (w / 2.0, 0.0), (w / 2.0, h), (0.0, h / 2.0), (w, h / 2.0),
            ];
            for (hx, hy) in handles {
                ctx.begin_path();
                ctx.rect(hx - handle / 2.0, hy - handle / 2.0, handle, handle);
                ctx.fill();
                ctx.stroke();
            }
            ctx.begin_path();
            ctx.move_to(w / 2.0, 0.0);
            ctx.line_to(w / 2.0, rotate_offset);
            ctx.stroke();
            ctx.begin_path();
            ctx.arc(w / 2.0, rotate_offset, handle / 2.0, 0.0, std::f64::consts::TAU).unwrap();
            ctx.fill();
            ctx.stroke();
            ctx.restore();
        } else {
            let mut union: Option<kurbo::Rect> = None;
            for &id in ids {
                if let Some(obj) = self.scene.get(id) {
                    let b = obj.world_bounds();
                    union = Some(match union {
                        Some(u) => u.union(b),
                        None => b,
                    });
                }
            }
            if let Some(u) = union {
                ctx.save();
                ctx.set_stroke_style_str(SELECTION_STROKE);
                ctx.set_line_width(1.5 / self.viewport_zoom);
                let dash = js_sys::Array::new();
                dash.push(&JsValue::from_f64(4.0 / self.viewport_zoom));
                dash.push(&JsValue::from_f64(4.0 / self.viewport_zoom));
                ctx.set_line_dash(&dash).unwrap();
                ctx.stroke_rect(u.min_x(), u.min_y(), u.width(), u.height());
                ctx.restore();
            }
        }
    }
}

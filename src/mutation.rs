use wasm_bindgen::prelude::*;

use crate::engine::DesignEngine;
use crate::objects::DrawableObject;
use crate::types::{Canvas, FontStyle, ObjectKind, ReorderDirection, TextAlign};

const FALLBACK_FONT_SIZE: u32 = 12;

#[wasm_bindgen]
impl DesignEngine {
    /// Remove everything selected. Removal and selection reset happen in
    /// one step; an empty selection is a no-op.
    pub fn delete_selection(&mut self) -> bool {
        let ids = self.selection.ids().to_vec();
        if ids.is_empty() {
            return false;
        }
        self.save_state("Delete Selection");
        self.scene.remove(&ids);
        self.pump_events();
        true
    }
}

/// The property mutation pipeline. Every operation targets the primary
/// selection, is a no-op without one, writes through to the object and
/// republishes the read model before returning.
impl DesignEngine {
    pub fn set_color(&mut self, value: &str) -> bool {
        self.with_primary(|obj| match obj.kind {
            ObjectKind::Line => obj.style.stroke = value.to_string(),
            _ => obj.style.fill = value.to_string(),
        })
    }

    /// `None` stands for unparseable panel input; anything below 1 is
    /// treated the same way and falls back to 12.
    pub fn set_font_size(&mut self, value: Option<f64>) -> bool {
        let size = match value {
            Some(v) if v.is_finite() && v >= 1.0 => v.trunc() as u32,
            _ => FALLBACK_FONT_SIZE,
        };
        self.with_primary_text(|ts| ts.font_size = size)
    }

    pub fn toggle_font_weight(&mut self) -> bool {
        use crate::types::FontWeight;
        self.with_primary_text(|ts| {
            ts.font_weight = match ts.font_weight {
                FontWeight::Bold => FontWeight::Normal,
                FontWeight::Normal => FontWeight::Bold,
            }
        })
    }

    /// Toggle against the requested style: applying the current style
    /// returns to normal.
    pub fn toggle_font_style(&mut self, style: FontStyle) -> bool {
        self.with_primary_text(|ts| {
            ts.font_style = if ts.font_style == style { FontStyle::Normal } else { style };
        })
    }

    pub fn set_text_align(&mut self, align: TextAlign) -> bool {
        self.with_primary_text(|ts| ts.text_align = align)
    }

    pub fn set_font_family(&mut self, family: &str) -> bool {
        self.with_primary_text(|ts| ts.font_family = family.to_string())
    }

    /// Panel slider value, 0-100, mapped onto the stored 0.0-1.0 range.
    pub fn set_opacity(&mut self, percent: f64) -> bool {
        if !percent.is_finite() {
            return false;
        }
        self.with_primary(|obj| obj.style.opacity = percent.clamp(0.0, 100.0) / 100.0)
    }

    /// Degrees, stored exactly as given.
    pub fn set_rotation(&mut self, degrees: f64) -> bool {
        if !degrees.is_finite() {
            return false;
        }
        self.with_primary(|obj| obj.transform.rotation = degrees)
    }

    /// Move the primary selection through the paint order.
    pub fn reorder_selected(&mut self, direction: ReorderDirection) -> bool {
        let Some(id) = self.selection.primary() else { return false };
        self.save_state("Reorder");
        let moved = self.scene.reorder(id, direction);
        self.pump_events();
        moved
    }

    pub fn configure_canvas(&mut self, width: Option<f64>, height: Option<f64>, background: Option<String>) {
        self.save_state("Set Canvas");
        let current = self.scene.canvas();
        let canvas = Canvas {
            width: width.filter(|w| w.is_finite() && *w > 0.0).unwrap_or(current.width),
            height: height.filter(|h| h.is_finite() && *h > 0.0).unwrap_or(current.height),
            background: background.unwrap_or_else(|| current.background.clone()),
        };
        self.scene.set_canvas(canvas);
        self.pump_events();
    }

    fn with_primary<F: FnOnce(&mut DrawableObject)>(&mut self, apply: F) -> bool {
        let Some(id) = self.selection.primary() else { return false };
        let Some(obj) = self.scene.get_mut(id) else { return false };
        apply(obj);
        self.scene.mark_mutated(id);
        self.pump_events();
        true
    }

    /// Font operations only ever touch text objects.
    fn with_primary_text<F: FnOnce(&mut crate::objects::TextStyle)>(&mut self, apply: F) -> bool {
        let Some(id) = self.selection.primary() else { return false };
        let Some(obj) = self.scene.get_mut(id) else { return false };
        let Some(ts) = obj.text_style.as_mut() else { return false };
        apply(ts);
        self.scene.mark_mutated(id);
        self.pump_events();
        true
    }
}

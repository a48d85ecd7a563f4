use wasm_bindgen::prelude::*;

use crate::engine::DesignEngine;
use crate::error::EngineError;
use crate::geometry;
use crate::objects::{DrawableObject, Geometry, Style, TextStyle, Transform};
use crate::types::{FontWeight, ObjectKind, ShapeKind, TextPreset};

pub const DEFAULT_FILL: &str = "#c5a059";
pub const TEXT_FILL: &str = "#333333";
const LINE_STROKE_WIDTH: f64 = 4.0;

#[wasm_bindgen]
impl DesignEngine {
    /// Drop placement: build a shape of `kind` with its bounding box
    /// centered on the canvas-space point and select it.
    pub fn place_shape(&mut self, kind: ShapeKind, x: f64, y: f64) -> Result<u32, JsValue> {
        Ok(self.place_shape_at(kind, x, y)?)
    }

    /// Quick add: same construction, centered on the canvas midpoint.
    pub fn quick_add(&mut self, kind: ShapeKind) -> Result<u32, JsValue> {
        let canvas = self.scene.canvas();
        let (cx, cy) = (canvas.width / 2.0, canvas.height / 2.0);
        Ok(self.place_shape_at(kind, cx, cy)?)
    }

    pub fn place_text(&mut self, preset: TextPreset, x: f64, y: f64) -> Result<u32, JsValue> {
        Ok(self.place_text_preset(preset, x, y)?)
    }

    pub fn quick_add_text(&mut self, preset: TextPreset) -> Result<u32, JsValue> {
        let canvas = self.scene.canvas();
        let (cx, cy) = (canvas.width / 2.0, canvas.height / 2.0);
        Ok(self.place_text_preset(preset, cx, cy)?)
    }

    /// The starting content of a fresh session: a selected title text, the
    /// way the shell seeds a new design.
    pub fn seed_welcome_text(&mut self) -> Result<u32, JsValue> {
        self.ensure_ready()?;
        let id = self.alloc_id();
        let obj = DrawableObject::new(
            id,
            ObjectKind::Text,
            Geometry::Text { content: "Creloy Designer".to_string() },
            Transform::at(200.0, 200.0),
            Style::filled(DEFAULT_FILL),
        )
        .with_text_style(TextStyle::sized(40, FontWeight::Normal));
        self.insert_and_select(obj)?;
        Ok(id)
    }
}

impl DesignEngine {
    pub fn place_shape_at(&mut self, kind: ShapeKind, x: f64, y: f64) -> Result<u32, EngineError> {
        self.ensure_ready()?;
        self.save_state("Add Shape");
        let id = self.alloc_id();
        let obj = build_shape(id, kind, x, y);
        self.insert_and_select(obj)?;
        log::debug!("placed {:?} #{} at ({}, {})", kind, id, x, y);
        Ok(id)
    }

    pub fn place_text_preset(&mut self, preset: TextPreset, x: f64, y: f64) -> Result<u32, EngineError> {
        let (content, size, weight) = match preset {
            TextPreset::Heading => ("Add a Heading", 48, FontWeight::Bold),
            TextPreset::Subheading => ("Add a Subheading", 32, FontWeight::Normal),
            TextPreset::Body => ("Add body text", 18, FontWeight::Normal),
        };
        self.place_text_at(content, size, weight, x, y)
    }

    /// A plain text drop, outside the preset list.
    pub fn place_default_text(&mut self, x: f64, y: f64) -> Result<u32, EngineError> {
        self.place_text_at("New Text", 24, FontWeight::Normal, x, y)
    }

    pub fn place_text_at(&mut self, content: &str, font_size: u32, weight: FontWeight, x: f64, y: f64) -> Result<u32, EngineError> {
        self.ensure_ready()?;
        self.save_state("Add Text");
        let id = self.alloc_id();
        let obj = DrawableObject::new(
            id,
            ObjectKind::Text,
            Geometry::Text { content: content.to_string() },
            Transform::at(x - 50.0, y - 10.0),
            Style::filled(TEXT_FILL),
        )
        .with_text_style(TextStyle::sized(font_size, weight));
        self.insert_and_select(obj)?;
        Ok(id)
    }

    pub(crate) fn insert_and_select(&mut self, object: DrawableObject) -> Result<(), EngineError> {
        let id = object.id;
        self.scene.add(object)?;
        self.selection.select(&[id], &self.scene);
        self.pump_events();
        Ok(())
    }
}

/// Construct the default geometry for a palette kind, anchored so its
/// bounding box is centered on `(x, y)`. Star, hexagon and diamond have
/// hulls narrower than their nominal radius square, so the anchor comes
/// from the actual bounds rather than a fixed half-size offset.
fn build_shape(id: u32, kind: ShapeKind, x: f64, y: f64) -> DrawableObject {
    let (object_kind, geometry, style, rotation) = match kind {
        ShapeKind::Rect => (
            ObjectKind::Rectangle,
            Geometry::Rectangle { width: 100.0, height: 100.0, corner_radius: 8.0 },
            Style::filled(DEFAULT_FILL),
            0.0,
        ),
        ShapeKind::Circle => (
            ObjectKind::Circle,
            Geometry::Circle { radius: 50.0 },
            Style::filled(DEFAULT_FILL),
            0.0,
        ),
        ShapeKind::Triangle => (
            ObjectKind::Triangle,
            Geometry::Triangle { width: 100.0, height: 100.0 },
            Style::filled(DEFAULT_FILL),
            0.0,
        ),
        ShapeKind::Ellipse => (
            ObjectKind::Ellipse,
            Geometry::Ellipse { rx: 50.0, ry: 30.0 },
            Style::filled(DEFAULT_FILL),
            0.0,
        ),
        ShapeKind::Star => (
            ObjectKind::Polygon,
            Geometry::Polygon { points: geometry::star_points(0.0, 0.0, 50.0, 20.0, 5) },
            Style::filled(DEFAULT_FILL),
            0.0,
        ),
        ShapeKind::Hexagon => (
            ObjectKind::Polygon,
            Geometry::Polygon { points: geometry::hexagon_points(0.0, 0.0, 50.0) },
            Style::filled(DEFAULT_FILL),
            0.0,
        ),
        ShapeKind::Diamond => (
            ObjectKind::Rectangle,
            Geometry::Rectangle { width: 70.0, height: 70.0, corner_radius: 0.0 },
            Style::filled(DEFAULT_FILL),
            45.0,
        ),
        ShapeKind::Line => (
            ObjectKind::Line,
            Geometry::Line { dx: 100.0, dy: 0.0 },
            Style::stroked(DEFAULT_FILL, LINE_STROKE_WIDTH),
            0.0,
        ),
    };

    let mut obj = DrawableObject::new(id, object_kind, geometry, Transform::at(0.0, 0.0), style);
    obj.transform.rotation = rotation;
    // Rotation pivots about the center, so centering the unrotated bounds
    // centers the rotated ones too.
    let b = obj.local_bounds();
    obj.transform.x = x - b.width() / 2.0;
    obj.transform.y = y - b.height() / 2.0;
    obj
}

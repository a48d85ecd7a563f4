use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};
use wasm_bindgen::JsValue;

use crate::geometry;
use crate::svg::xml_escape;
use crate::types::{FontStyle, FontWeight, ObjectKind, TextAlign};

/// Kind-specific shape parameters. Every variant resolves to an
/// axis-aligned local bounding box; the object's transform anchors that
/// box's top-left corner in canvas space.
#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum Geometry {
    Rectangle { width: f64, height: f64, corner_radius: f64 },
    Circle { radius: f64 },
    Triangle { width: f64, height: f64 },
    Ellipse { rx: f64, ry: f64 },
    Polygon { points: Vec<Point> },
    /// Endpoint offset from the line's start.
    Line { dx: f64, dy: f64 },
    Text { content: String },
    Image {
        natural_width: u32,
        natural_height: u32,
        #[serde(skip)]
        png: Vec<u8>,
        /// Decoded HtmlImageElement (or canvas) handle for live painting.
        #[serde(skip)]
        element: Option<JsValue>,
    },
}

#[derive(Serialize, Deserialize, Clone, Copy, PartialEq, Debug)]
pub struct Transform {
    pub x: f64,
    pub y: f64,
    /// Degrees, applied about the scaled bounding-box center. Stored as
    /// given, not normalized.
    pub rotation: f64,
    pub scale_x: f64,
    pub scale_y: f64,
}

impl Transform {
    pub fn at(x: f64, y: f64) -> Transform {
        Transform { x, y, rotation: 0.0, scale_x: 1.0, scale_y: 1.0 }
    }

    pub fn rotation_radians(&self) -> f64 {
        self.rotation.to_radians()
    }
}

#[derive(Serialize, Deserialize, Clone, PartialEq, Debug)]
pub struct Style {
    pub fill: String,
    pub stroke: String,
    pub stroke_width: f64,
    /// 0.0 transparent .. 1.0 opaque.
    pub opacity: f64,
}

impl Style {
    pub fn filled(fill: &str) -> Style {
        Style { fill: fill.to_string(), stroke: "transparent".to_string(), stroke_width: 0.0, opacity: 1.0 }
    }

    pub fn stroked(stroke: &str, width: f64) -> Style {
        Style { fill: "transparent".to_string(), stroke: stroke.to_string(), stroke_width: width, opacity: 1.0 }
    }
}

#[derive(Serialize, Deserialize, Clone, PartialEq, Debug)]
pub struct TextStyle {
    pub font_family: String,
    /// Pixels, always >= 1.
    pub font_size: u32,
    pub font_weight: FontWeight,
    pub font_style: FontStyle,
    pub text_align: TextAlign,
}

impl TextStyle {
    pub fn sized(font_size: u32, font_weight: FontWeight) -> TextStyle {
        TextStyle {
            font_family: "Outfit".to_string(),
            font_size,
            font_weight,
            font_style: FontStyle::Normal,
            text_align: TextAlign::Left,
        }
    }
}

/// One entity of the scene. Mutated in place by the mutation pipeline;
/// `kind` is fixed at creation.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct DrawableObject {
    pub id: u32,
    pub kind: ObjectKind,
    pub geometry: Geometry,
    pub transform: Transform,
    pub style: Style,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_style: Option<TextStyle>,
}

// Text extents are estimated, not shaped: 0.6 em per character advance and
// a 1.2 em line height. Real metrics only exist inside the export
// rasterizer, which lays text out itself.
const TEXT_ADVANCE_EM: f64 = 0.6;
const TEXT_LINE_EM: f64 = 1.2;

impl DrawableObject {
    pub fn new(id: u32, kind: ObjectKind, geometry: Geometry, transform: Transform, style: Style) -> DrawableObject {
        DrawableObject { id, kind, geometry, transform, style, text_style: None }
    }

    pub fn with_text_style(mut self, text_style: TextStyle) -> DrawableObject {
        self.text_style = Some(text_style);
        self
    }

    /// Bounds in the object's own coordinate frame, before scale and
    /// rotation. Polygon vertices keep their generated (centered)
    /// coordinates, so this box is not anchored at the origin for them.
    pub fn local_bounds(&self) -> Rect {
        match &self.geometry {
            Geometry::Rectangle { width, height, .. } => Rect::new(0.0, 0.0, *width, *height),
            Geometry::Circle { radius } => Rect::new(0.0, 0.0, radius * 2.0, radius * 2.0),
            Geometry::Triangle { width, height } => Rect::new(0.0, 0.0, *width, *height),
            Geometry::Ellipse { rx, ry } => Rect::new(0.0, 0.0, rx * 2.0, ry * 2.0),
            Geometry::Polygon { points } => geometry::points_bounds(points),
            Geometry::Line { dx, dy } => {
                let sw = self.style.stroke_width;
                let (x0, x1) = (dx.min(0.0), dx.max(0.0));
                let (y0, y1) = (dy.min(0.0), dy.max(0.0));
                let pad_x = if x1 - x0 < sw { (sw - (x1 - x0)) / 2.0 } else { 0.0 };
                let pad_y = if y1 - y0 < sw { (sw - (y1 - y0)) / 2.0 } else { 0.0 };
                Rect::new(x0 - pad_x, y0 - pad_y, x1 + pad_x, y1 + pad_y)
            }
            Geometry::Text { content } => {
                let size = self.text_style.as_ref().map(|t| t.font_size).unwrap_or(12) as f64;
                let longest = content.lines().map(|l| l.chars().count()).max().unwrap_or(0);
                let lines = content.lines().count().max(1);
                Rect::new(0.0, 0.0, longest as f64 * size * TEXT_ADVANCE_EM, lines as f64 * size * TEXT_LINE_EM)
            }
            Geometry::Image { natural_width, natural_height, .. } => {
                Rect::new(0.0, 0.0, *natural_width as f64, *natural_height as f64)
            }
        }
    }

    /// Width and height of the local bounds after scaling.
    pub fn scaled_size(&self) -> (f64, f64) {
        let b = self.local_bounds();
        (b.width() * self.transform.scale_x, b.height() * self.transform.scale_y)
    }

    /// Axis-aligned canvas-space bounds, rotation included.
    pub fn world_bounds(&self) -> Rect {
        let (w, h) = self.scaled_size();
        let placed = Rect::new(self.transform.x, self.transform.y, self.transform.x + w, self.transform.y + h);
        geometry::rotated_bounds(placed, self.transform.rotation)
    }

    pub fn world_center(&self) -> Point {
        let (w, h) = self.scaled_size();
        Point::new(self.transform.x + w / 2.0, self.transform.y + h / 2.0)
    }

    /// Hit test against the rotated, scaled bounds by rotating the probe
    /// point back into the object's frame.
    pub fn contains_point(&self, px: f64, py: f64) -> bool {
        let (w, h) = self.scaled_size();
        let c = self.world_center();
        let (sin_r, cos_r) = (-self.transform.rotation_radians()).sin_cos();
        let dx = px - c.x;
        let dy = py - c.y;
        let rx = dx * cos_r - dy * sin_r;
        let ry = dx * sin_r + dy * cos_r;
        rx >= -w / 2.0 && rx <= w / 2.0 && ry >= -h / 2.0 && ry <= h / 2.0
    }

    /// The color the property panel edits: stroke for lines, fill for
    /// everything else.
    pub fn primary_color(&self) -> &str {
        match self.kind {
            ObjectKind::Line => &self.style.stroke,
            _ => &self.style.fill,
        }
    }

    /// Emit this object as one SVG element in canvas space.
    pub fn to_svg_element(&self) -> String {
        let local = self.local_bounds();
        let (w, h) = (local.width(), local.height());
        let c = self.world_center();
        let transform = format!(
            "translate({} {}) rotate({}) scale({} {}) translate({} {})",
            c.x, c.y, self.transform.rotation, self.transform.scale_x, self.transform.scale_y,
            -w / 2.0, -h / 2.0
        );

        let mut attrs = vec![format!(r#"transform="{}""#, transform)];
        if self.style.opacity < 1.0 {
            attrs.push(format!(r#"opacity="{}""#, self.style.opacity));
        }
        match self.kind {
            ObjectKind::Line => {
                attrs.push(format!(
                    r#"fill="none" stroke="{}" stroke-width="{}""#,
                    self.style.stroke, self.style.stroke_width
                ));
            }
            _ => {
                let fill = if self.style.fill == "transparent" || self.style.fill.is_empty() {
                    "none"
                } else {
                    &self.style.fill
                };
                attrs.push(format!(r#"fill="{}""#, fill));
            }
        }
        let attr_str = attrs.join(" ");

        match &self.geometry {
            Geometry::Rectangle { width, height, corner_radius } => {
                if *corner_radius > 0.0 {
                    let r = corner_radius.min(width / 2.0).min(height / 2.0);
                    format!(r#"<rect width="{}" height="{}" rx="{}" ry="{}" {} />"#, width, height, r, r, attr_str)
                } else {
                    format!(r#"<rect width="{}" height="{}" {} />"#, width, height, attr_str)
                }
            }
            Geometry::Circle { radius } => {
                format!(r#"<ellipse cx="{0}" cy="{0}" rx="{0}" ry="{0}" {1} />"#, radius, attr_str)
            }
            Geometry::Triangle { width, height } => {
                format!(
                    r#"<polygon points="{},0 {},{} 0,{}" {} />"#,
                    width / 2.0, width, height, height, attr_str
                )
            }
            Geometry::Ellipse { rx, ry } => {
                format!(r#"<ellipse cx="{}" cy="{}" rx="{}" ry="{}" {} />"#, rx, ry, rx, ry, attr_str)
            }
            Geometry::Polygon { points } => {
                let pts = points
                    .iter()
                    .map(|p| format!("{},{}", p.x - local.min_x(), p.y - local.min_y()))
                    .collect::<Vec<_>>()
                    .join(" ");
                format!(r#"<polygon points="{}" {} />"#, pts, attr_str)
            }
            Geometry::Line { dx, dy } => {
                format!(
                    r#"<line x1="{}" y1="{}" x2="{}" y2="{}" {} />"#,
                    -local.min_x(), -local.min_y(), dx - local.min_x(), dy - local.min_y(), attr_str
                )
            }
            Geometry::Text { content } => {
                let ts = match &self.text_style {
                    Some(ts) => ts,
                    None => return String::new(),
                };
                let size = ts.font_size as f64;
                let anchor_x = match ts.text_align {
                    TextAlign::Left => 0.0,
                    TextAlign::Center => w / 2.0,
                    TextAlign::Right => w,
                };
                let mut spans = String::new();
                for (i, line) in content.lines().enumerate() {
                    spans.push_str(&format!(
                        r#"<text x="{}" y="{}" font-family="{}" font-size="{}" font-weight="{}" font-style="{}" text-anchor="{}" {}>{}</text>"#,
                        anchor_x,
                        size * (1.0 + TEXT_LINE_EM * i as f64),
                        xml_escape(&ts.font_family),
                        size,
                        ts.font_weight.as_css(),
                        ts.font_style.as_css(),
                        ts.text_align.as_anchor(),
                        attr_str,
                        xml_escape(line)
                    ));
                }
                spans
            }
            Geometry::Image { natural_width, natural_height, png, .. } => {
                if png.is_empty() {
                    format!(r##"<rect width="{}" height="{}" fill="#ccc" {} />"##, natural_width, natural_height, attr_str)
                } else {
                    use base64::{engine::general_purpose, Engine as _};
                    let b64 = general_purpose::STANDARD.encode(png);
                    format!(
                        r#"<image width="{}" height="{}" preserveAspectRatio="none" href="data:image/png;base64,{}" {} />"#,
                        natural_width, natural_height, b64, attr_str
                    )
                }
            }
        }
    }
}

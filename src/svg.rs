use wasm_bindgen::prelude::*;

use crate::engine::DesignEngine;
use crate::scene::Scene;

pub(crate) fn xml_escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

impl Scene {
    /// The whole scene as a standalone SVG document at canvas size,
    /// background first, objects in paint order. This is both an export
    /// format in its own right and the input to rasterization.
    pub fn to_svg(&self) -> String {
        let canvas = self.canvas();
        let mut body = String::new();
        for obj in self.all() {
            body.push_str(&obj.to_svg_element());
        }
        format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}"><rect width="{w}" height="{h}" fill="{bg}" />{body}</svg>"#,
            w = canvas.width,
            h = canvas.height,
            bg = xml_escape(&canvas.background),
            body = body
        )
    }
}

#[wasm_bindgen]
impl DesignEngine {
    pub fn export_svg(&self) -> String {
        self.scene.to_svg()
    }
}

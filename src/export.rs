use std::io::Cursor;
use std::sync::Arc;

use image::{DynamicImage, ImageOutputFormat};
use resvg::tiny_skia;
use wasm_bindgen::prelude::*;

use crate::engine::DesignEngine;
use crate::error::EngineError;
use crate::types::ExportFormat;

pub const EXPORT_BASENAME: &str = "creloy-design";

#[wasm_bindgen]
impl DesignEngine {
    /// Encode the full scene at `multiplier` times the canvas size. The
    /// shell turns the returned bytes into the actual download.
    pub fn export_image(&self, format: &str, multiplier: f64, quality: f64) -> Result<Vec<u8>, JsValue> {
        let format = ExportFormat::from_name(format)
            .ok_or_else(|| EngineError::ExportFailure(format!("unknown format {format}")))?;
        Ok(self.export(format, multiplier, quality)?)
    }

    pub fn export_filename(&self, format: &str) -> String {
        let ext = ExportFormat::from_name(format).map(|f| f.extension()).unwrap_or("png");
        format!("{EXPORT_BASENAME}.{ext}")
    }
}

impl DesignEngine {
    /// Rasterize the scene, ignoring the viewport zoom: SVG built from the
    /// store, parsed and rendered into a pixmap, then encoded. `quality`
    /// only matters for JPEG, 1.0 meaning maximum.
    pub fn export(&self, format: ExportFormat, multiplier: f64, quality: f64) -> Result<Vec<u8>, EngineError> {
        let multiplier = if multiplier.is_finite() && multiplier > 0.0 { multiplier } else { 1.0 };
        let canvas = self.scene.canvas();
        let svg = self.scene.to_svg();

        let mut opt = usvg::Options::default();
        let mut fonts = usvg::fontdb::Database::new();
        fonts.load_system_fonts();
        opt.fontdb = Arc::new(fonts);
        let tree = usvg::Tree::from_data(svg.as_bytes(), &opt)
            .map_err(|e| EngineError::ExportFailure(e.to_string()))?;

        let width = (canvas.width * multiplier).round().max(1.0) as u32;
        let height = (canvas.height * multiplier).round().max(1.0) as u32;
        let mut pixmap = tiny_skia::Pixmap::new(width, height)
            .ok_or_else(|| EngineError::ExportFailure(format!("could not allocate a {width}x{height} surface")))?;
        resvg::render(
            &tree,
            tiny_skia::Transform::from_scale(multiplier as f32, multiplier as f32),
            &mut pixmap.as_mut(),
        );

        match format {
            ExportFormat::Png => pixmap
                .encode_png()
                .map_err(|e| EngineError::ExportFailure(e.to_string())),
            ExportFormat::Jpeg => {
                // JPEG has no alpha; demultiply and drop it. The scene's
                // background rect already fills the frame.
                let mut rgba = Vec::with_capacity((width * height * 4) as usize);
                for px in pixmap.pixels() {
                    let c = px.demultiply();
                    rgba.extend_from_slice(&[c.red(), c.green(), c.blue(), c.alpha()]);
                }
                let img = image::RgbaImage::from_raw(width, height, rgba)
                    .ok_or_else(|| EngineError::ExportFailure("pixel buffer size mismatch".to_string()))?;
                let rgb = DynamicImage::ImageRgba8(img).to_rgb8();
                let q = (quality.clamp(0.01, 1.0) * 100.0).round() as u8;
                let mut out = Vec::new();
                DynamicImage::ImageRgb8(rgb)
                    .write_to(&mut Cursor::new(&mut out), ImageOutputFormat::Jpeg(q))
                    .map_err(|e| EngineError::ExportFailure(e.to_string()))?;
                Ok(out)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ShapeKind;

    fn engine_with_content() -> DesignEngine {
        let mut engine = DesignEngine::new();
        engine.mount_offscreen();
        engine.place_shape_at(ShapeKind::Rect, 400.0, 250.0).unwrap();
        engine
    }

    #[test]
    fn png_export_doubles_the_canvas_at_2x() {
        let engine = engine_with_content();
        let bytes = engine.export(ExportFormat::Png, 2.0, 1.0).unwrap();
        assert_eq!(&bytes[..4], &[0x89, b'P', b'N', b'G']);
        let decoded = image::load_from_memory(&bytes).unwrap();
        assert_eq!(decoded.width(), 1600);
        assert_eq!(decoded.height(), 1000);
    }

    #[test]
    fn jpeg_export_carries_the_jpeg_signature() {
        let engine = engine_with_content();
        let bytes = engine.export(ExportFormat::Jpeg, 1.0, 1.0).unwrap();
        assert_eq!(&bytes[..2], &[0xff, 0xd8]);
    }

    #[test]
    fn suggested_filenames_follow_the_format() {
        let engine = DesignEngine::new();
        assert_eq!(engine.export_filename("png"), "creloy-design.png");
        assert_eq!(engine.export_filename("jpeg"), "creloy-design.jpeg");
    }
}

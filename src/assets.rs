use std::io::Cursor;

use image::{DynamicImage, ImageOutputFormat};
use wasm_bindgen::prelude::*;

use crate::engine::DesignEngine;
use crate::error::EngineError;
use crate::objects::{DrawableObject, Geometry, Style, Transform};
use crate::types::ObjectKind;

pub const MAX_ASSET_BYTES: usize = 5 * 1024 * 1024;

/// A declared upload that passed validation. Validation happens before the
/// shell reads or decodes any pixel data; completing the upload is a
/// separate step because the file read is asynchronous on the shell side
/// and the editor may be gone by the time it finishes.
#[derive(Clone, Debug)]
pub struct AssetUpload {
    name: String,
    mime: String,
}

impl AssetUpload {
    pub fn validate(name: &str, mime: &str, byte_len: usize) -> Result<AssetUpload, EngineError> {
        if !mime.starts_with("image/") {
            return Err(EngineError::InvalidAsset(format!("{name}: not an image ({mime})")));
        }
        if byte_len > MAX_ASSET_BYTES {
            return Err(EngineError::InvalidAsset(format!("{name}: larger than the 5 MiB limit")));
        }
        Ok(AssetUpload { name: name.to_string(), mime: mime.to_string() })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn mime(&self) -> &str {
        &self.mime
    }
}

#[wasm_bindgen]
impl DesignEngine {
    /// Validate and place an uploaded image. Rejections leave the scene
    /// untouched; decode failures insert nothing.
    pub fn ingest_image(&mut self, name: &str, mime: &str, bytes: &[u8]) -> Result<u32, JsValue> {
        let upload = AssetUpload::validate(name, mime, bytes.len())?;
        Ok(self.complete_upload(&upload, bytes)?)
    }

    /// Hand the live canvas its decoded image handle (HtmlImageElement or
    /// a canvas). Export does not need it; it uses the retained PNG bytes.
    pub fn bind_image_element(&mut self, id: u32, element: JsValue) -> bool {
        let Some(obj) = self.scene.get_mut(id) else { return false };
        let Geometry::Image { element: slot, .. } = &mut obj.geometry else { return false };
        *slot = Some(element);
        self.scene.mark_mutated(id);
        self.pump_events();
        true
    }
}

impl DesignEngine {
    /// Resumption point after the shell's asynchronous file read. Checks
    /// the render surface again: the session may have been torn down while
    /// the read was in flight.
    pub fn complete_upload(&mut self, upload: &AssetUpload, bytes: &[u8]) -> Result<u32, EngineError> {
        self.ensure_ready()?;
        let decoded = image::load_from_memory(bytes)?;
        let rgba = decoded.to_rgba8();
        let (width, height) = rgba.dimensions();

        // Keep a PNG copy for SVG embedding at export time.
        let mut png = Vec::new();
        DynamicImage::ImageRgba8(rgba).write_to(&mut Cursor::new(&mut png), ImageOutputFormat::Png)?;

        self.save_state("Add Image");
        let id = self.alloc_id();
        let mut obj = DrawableObject::new(
            id,
            ObjectKind::Image,
            Geometry::Image { natural_width: width, natural_height: height, png, element: None },
            Transform::at(50.0, 50.0),
            Style::filled("transparent"),
        );
        obj.transform.scale_x = 0.5;
        obj.transform.scale_y = 0.5;
        self.insert_and_select(obj)?;
        log::info!("ingested {} ({} bytes, {}x{})", upload.name(), bytes.len(), width, height);
        Ok(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_image_mime_types_are_rejected() {
        let err = AssetUpload::validate("notes.pdf", "application/pdf", 1024).unwrap_err();
        assert!(matches!(err, EngineError::InvalidAsset(_)));
    }

    #[test]
    fn oversized_payloads_are_rejected_before_decode() {
        let err = AssetUpload::validate("big.png", "image/png", MAX_ASSET_BYTES + 1).unwrap_err();
        assert!(matches!(err, EngineError::InvalidAsset(_)));
    }

    #[test]
    fn exactly_five_mib_is_allowed() {
        assert!(AssetUpload::validate("ok.png", "image/png", MAX_ASSET_BYTES).is_ok());
    }
}

use thiserror::Error;
use wasm_bindgen::JsValue;

/// Engine-level failures. Everything else (bad font sizes, out-of-range
/// zoom or opacity, layering at an extreme) is clamped or defaulted, not
/// reported.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("render surface has not been initialized")]
    EngineNotReady,
    #[error("invalid asset: {0}")]
    InvalidAsset(String),
    #[error("image decode failed: {0}")]
    DecodeFailure(#[from] image::ImageError),
    #[error("render surface init failed: {0}")]
    RenderInit(String),
    #[error("duplicate object id {0}")]
    DuplicateId(u32),
    #[error("export failed: {0}")]
    ExportFailure(String),
}

impl From<EngineError> for JsValue {
    fn from(err: EngineError) -> JsValue {
        JsValue::from_str(&err.to_string())
    }
}

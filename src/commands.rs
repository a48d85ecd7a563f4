use serde::Deserialize;
use serde_json::json;
use wasm_bindgen::prelude::*;

use crate::engine::DesignEngine;
use crate::error::EngineError;
use crate::types::{FontStyle, ReorderDirection, ShapeKind, TextAlign, TextPreset};

/// Everything the UI shell can ask for over the JSON boundary, one
/// variant per panel interaction. Binary-carrying calls (image ingestion,
/// export, canvas mount) have their own methods instead.
#[derive(Deserialize, Debug)]
#[serde(tag = "action", content = "params", rename_all = "snake_case")]
pub enum Command {
    Place { kind: ShapeKind, x: f64, y: f64 },
    QuickAdd { kind: ShapeKind },
    PlaceText { preset: TextPreset, x: f64, y: f64 },
    QuickAddText { preset: TextPreset },
    DropText { x: f64, y: f64 },
    SetColor { value: String },
    SetFontSize { value: Option<f64> },
    ToggleFontWeight,
    ToggleFontStyle { style: FontStyle },
    SetTextAlign { align: TextAlign },
    SetFontFamily { value: String },
    SetOpacity { value: f64 },
    SetRotation { degrees: f64 },
    Reorder { direction: ReorderDirection },
    Select { ids: Vec<u32> },
    ClearSelection,
    DeleteSelection,
    SetZoom { level: f64 },
    SetCanvas { width: Option<f64>, height: Option<f64>, background: Option<String> },
    Undo,
    Redo,
}

#[wasm_bindgen]
impl DesignEngine {
    /// JSON command dispatch: `{"action": "...", "params": {...}}` in,
    /// `{"success": ...}` or `{"error": ...}` out.
    pub fn execute_command(&mut self, cmd_json: &str) -> String {
        let cmd: Command = match serde_json::from_str(cmd_json) {
            Ok(c) => c,
            Err(e) => return json!({ "error": format!("invalid command: {e}") }).to_string(),
        };
        match self.apply(cmd) {
            Ok(value) => value.to_string(),
            Err(e) => json!({ "error": e.to_string() }).to_string(),
        }
    }
}

impl DesignEngine {
    fn apply(&mut self, cmd: Command) -> Result<serde_json::Value, EngineError> {
        match cmd {
            Command::Place { kind, x, y } => {
                let id = self.place_shape_at(kind, x, y)?;
                Ok(json!({ "success": true, "id": id }))
            }
            Command::QuickAdd { kind } => {
                let (cx, cy) = self.canvas_midpoint();
                let id = self.place_shape_at(kind, cx, cy)?;
                Ok(json!({ "success": true, "id": id }))
            }
            Command::PlaceText { preset, x, y } => {
                let id = self.place_text_preset(preset, x, y)?;
                Ok(json!({ "success": true, "id": id }))
            }
            Command::QuickAddText { preset } => {
                let (cx, cy) = self.canvas_midpoint();
                let id = self.place_text_preset(preset, cx, cy)?;
                Ok(json!({ "success": true, "id": id }))
            }
            Command::DropText { x, y } => {
                let id = self.place_default_text(x, y)?;
                Ok(json!({ "success": true, "id": id }))
            }
            Command::SetColor { value } => Ok(json!({ "success": self.set_color(&value) })),
            Command::SetFontSize { value } => Ok(json!({ "success": self.set_font_size(value) })),
            Command::ToggleFontWeight => Ok(json!({ "success": self.toggle_font_weight() })),
            Command::ToggleFontStyle { style } => Ok(json!({ "success": self.toggle_font_style(style) })),
            Command::SetTextAlign { align } => Ok(json!({ "success": self.set_text_align(align) })),
            Command::SetFontFamily { value } => Ok(json!({ "success": self.set_font_family(&value) })),
            Command::SetOpacity { value } => Ok(json!({ "success": self.set_opacity(value) })),
            Command::SetRotation { degrees } => Ok(json!({ "success": self.set_rotation(degrees) })),
            Command::Reorder { direction } => Ok(json!({ "success": self.reorder_selected(direction) })),
            Command::Select { ids } => {
                self.select_objects(ids);
                Ok(json!({ "success": true, "selected": self.selection.ids() }))
            }
            Command::ClearSelection => {
                self.clear_selection();
                Ok(json!({ "success": true }))
            }
            Command::DeleteSelection => Ok(json!({ "success": self.delete_selection() })),
            Command::SetZoom { level } => {
                let zoom = self.set_zoom(level);
                Ok(json!({ "success": true, "zoom": zoom }))
            }
            Command::SetCanvas { width, height, background } => {
                self.configure_canvas(width, height, background);
                Ok(json!({ "success": true }))
            }
            Command::Undo => Ok(json!({ "success": self.undo() })),
            Command::Redo => Ok(json!({ "success": self.redo() })),
        }
    }

    fn canvas_midpoint(&self) -> (f64, f64) {
        let canvas = self.scene.canvas();
        (canvas.width / 2.0, canvas.height / 2.0)
    }
}

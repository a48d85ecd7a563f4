use wasm_bindgen::prelude::*;

use crate::error::EngineError;
use crate::objects::DrawableObject;
use crate::render::RenderSurface;
use crate::scene::{Scene, SceneEvent};
use crate::selection::{SelectionState, SelectionTracker};
use crate::types::Canvas;

const UNDO_CAPACITY: usize = 100;
pub(crate) const MIN_ZOOM: f64 = 0.1;
pub(crate) const MAX_ZOOM: f64 = 3.0;

/// Full editor state captured before a mutating command, for undo/redo.
pub(crate) struct EngineSnapshot {
    objects: Vec<DrawableObject>,
    next_id: u32,
    selection: SelectionState,
    canvas: Canvas,
    action_name: String,
}

/// The editor core: scene store, selection controller, viewport zoom and
/// the render surface handle, driven synchronously by the UI shell.
#[wasm_bindgen]
pub struct DesignEngine {
    pub(crate) scene: Scene,
    pub(crate) next_id: u32,
    pub(crate) selection: SelectionTracker,
    pub(crate) viewport_zoom: f64,
    pub(crate) surface: Option<RenderSurface>,
    pub(crate) needs_repaint: bool,
    pub(crate) undo_stack: Vec<EngineSnapshot>,
    pub(crate) redo_stack: Vec<EngineSnapshot>,
}

#[wasm_bindgen]
impl DesignEngine {
    #[wasm_bindgen(constructor)]
    pub fn new() -> DesignEngine {
        console_error_panic_hook::set_once();
        init_logging();

        DesignEngine {
            scene: Scene::new(Canvas::default()),
            next_id: 1,
            selection: SelectionTracker::default(),
            viewport_zoom: 1.0,
            surface: None,
            needs_repaint: true,
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
        }
    }

    pub fn undo(&mut self) -> bool {
        if let Some(prev) = self.undo_stack.pop() {
            let current = self.capture("Redo State");
            self.redo_stack.push(current);
            self.apply_snapshot(prev);
            true
        } else {
            false
        }
    }

    pub fn redo(&mut self) -> bool {
        if let Some(next) = self.redo_stack.pop() {
            let current = self.capture("Undo State");
            self.undo_stack.push(current);
            self.apply_snapshot(next);
            true
        } else {
            false
        }
    }

    /// Requested zoom levels land inside [0.1, 3.0]; returns the
    /// effective zoom.
    pub fn set_zoom(&mut self, level: f64) -> f64 {
        self.viewport_zoom = level.clamp(MIN_ZOOM, MAX_ZOOM);
        self.needs_repaint = true;
        self.viewport_zoom
    }

    pub fn zoom(&self) -> f64 {
        self.viewport_zoom
    }

    pub fn select_objects(&mut self, ids: Vec<u32>) {
        self.selection.select(&ids, &self.scene);
        self.needs_repaint = true;
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
        self.needs_repaint = true;
    }

    pub fn object_count(&self) -> usize {
        self.scene.len()
    }

    /// Scene ids back-to-front, i.e. paint order.
    pub fn object_ids(&self) -> Vec<u32> {
        self.scene.all().iter().map(|o| o.id).collect()
    }

    pub fn get_objects_json(&self) -> String {
        serde_json::to_string(self.scene.all()).unwrap_or_else(|_| "[]".to_string())
    }

    pub fn get_selected_ids(&self) -> String {
        serde_json::to_string(self.selection.ids()).unwrap_or_else(|_| "[]".to_string())
    }

    pub fn get_canvas_json(&self) -> String {
        serde_json::to_string(self.scene.canvas()).unwrap_or_else(|_| "{}".to_string())
    }

    pub fn get_history(&self) -> String {
        let names: Vec<&str> = self.undo_stack.iter().map(|s| s.action_name.as_str()).collect();
        serde_json::to_string(&names).unwrap_or_else(|_| "[]".to_string())
    }

    /// True exactly once per change; the shell polls this to schedule a
    /// repaint.
    pub fn take_repaint(&mut self) -> bool {
        std::mem::take(&mut self.needs_repaint)
    }
}

impl DesignEngine {
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn object(&self, id: u32) -> Option<&DrawableObject> {
        self.scene.get(id)
    }

    pub fn selection(&self) -> &SelectionTracker {
        &self.selection
    }

    pub(crate) fn alloc_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub(crate) fn ensure_ready(&self) -> Result<&RenderSurface, EngineError> {
        self.surface.as_ref().ok_or(EngineError::EngineNotReady)
    }

    /// Drain the scene's change events: prune the selection after
    /// removals, mark the surface dirty, and republish the read model.
    pub(crate) fn pump_events(&mut self) {
        let events = self.scene.take_events();
        if events.is_empty() {
            return;
        }
        self.needs_repaint = true;
        for event in &events {
            if let SceneEvent::Removed(ids) = event {
                self.selection.prune(ids);
            }
        }
        self.selection.resync(&self.scene);
    }

    pub(crate) fn save_state(&mut self, action_name: &str) {
        let snapshot = self.capture(action_name);
        self.undo_stack.push(snapshot);
        if self.undo_stack.len() > UNDO_CAPACITY {
            self.undo_stack.remove(0);
        }
        self.redo_stack.clear();
    }

    fn capture(&self, action_name: &str) -> EngineSnapshot {
        EngineSnapshot {
            objects: self.scene.snapshot_objects(),
            next_id: self.next_id,
            selection: self.selection.state().clone(),
            canvas: self.scene.canvas().clone(),
            action_name: action_name.to_string(),
        }
    }

    fn apply_snapshot(&mut self, snapshot: EngineSnapshot) {
        self.scene.restore(snapshot.objects, snapshot.canvas);
        self.scene.take_events();
        self.next_id = snapshot.next_id;
        self.selection.restore(snapshot.selection, &self.scene);
        self.needs_repaint = true;
    }
}

impl Default for DesignEngine {
    fn default() -> DesignEngine {
        DesignEngine::new()
    }
}

fn init_logging() {
    #[cfg(target_arch = "wasm32")]
    let _ = console_log::init_with_level(log::Level::Info);
    #[cfg(not(target_arch = "wasm32"))]
    let _ = env_logger::try_init();
}

use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::engine::DesignEngine;
use crate::objects::{DrawableObject, TextStyle};
use crate::scene::Scene;
use crate::types::ObjectKind;

/// UI-facing read model of the primary selection. Rebuilt from the
/// canonical scene object on every selection or transform event; never a
/// partial copy of live state.
#[derive(Serialize, Clone, PartialEq, Debug)]
pub struct SelectionSnapshot {
    pub id: u32,
    pub kind: ObjectKind,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub rotation: f64,
    pub scale_x: f64,
    pub scale_y: f64,
    pub color: String,
    pub opacity: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<TextStyle>,
}

/// Pure projection from a scene object to its read model.
pub fn project_snapshot(obj: &DrawableObject) -> SelectionSnapshot {
    let (width, height) = obj.scaled_size();
    SelectionSnapshot {
        id: obj.id,
        kind: obj.kind,
        x: obj.transform.x,
        y: obj.transform.y,
        width,
        height,
        rotation: obj.transform.rotation,
        scale_x: obj.transform.scale_x,
        scale_y: obj.transform.scale_y,
        color: obj.primary_color().to_string(),
        opacity: obj.style.opacity,
        text: obj.text_style.clone(),
    }
}

#[derive(Clone, PartialEq, Debug, Default)]
pub enum SelectionState {
    #[default]
    Idle,
    Active { ids: Vec<u32>, primary: u32 },
}

/// Tracks which objects are active and keeps the read model in step with
/// them. The first selected id is the primary one driving the property
/// panel; additional members only participate in bulk removal.
#[derive(Default)]
pub struct SelectionTracker {
    state: SelectionState,
    snapshot: Option<SelectionSnapshot>,
}

impl SelectionTracker {
    pub fn state(&self) -> &SelectionState {
        &self.state
    }

    pub fn is_idle(&self) -> bool {
        matches!(self.state, SelectionState::Idle)
    }

    pub fn ids(&self) -> &[u32] {
        match &self.state {
            SelectionState::Idle => &[],
            SelectionState::Active { ids, .. } => ids,
        }
    }

    pub fn primary(&self) -> Option<u32> {
        match &self.state {
            SelectionState::Idle => None,
            SelectionState::Active { primary, .. } => Some(*primary),
        }
    }

    pub fn snapshot(&self) -> Option<&SelectionSnapshot> {
        self.snapshot.as_ref()
    }

    /// Activate the given ids, skipping any that are not scene members.
    /// The first surviving id becomes primary; an empty result clears.
    pub fn select(&mut self, requested: &[u32], scene: &Scene) {
        let mut ids = Vec::new();
        for &id in requested {
            if scene.contains(id) && !ids.contains(&id) {
                ids.push(id);
            }
        }
        match ids.first() {
            Some(&primary) => {
                self.state = SelectionState::Active { ids, primary };
                self.resync(scene);
            }
            None => self.clear(),
        }
    }

    pub fn clear(&mut self) {
        self.state = SelectionState::Idle;
        self.snapshot = None;
    }

    /// Scene removal notification. Losing the primary drops the whole
    /// selection back to idle.
    pub fn prune(&mut self, removed: &[u32]) {
        if let SelectionState::Active { ids, primary } = &mut self.state {
            if removed.contains(primary) {
                self.clear();
                return;
            }
            ids.retain(|id| !removed.contains(id));
            if ids.is_empty() {
                self.clear();
            }
        }
    }

    /// Direct-manipulation notification from the render surface: re-derive
    /// the read model, leaving the selection itself untouched.
    pub fn on_transform(&mut self, id: u32, scene: &Scene) {
        if self.primary() == Some(id) {
            self.resync(scene);
        }
    }

    /// Rebuild the snapshot from the scene, dropping to idle if the
    /// primary is gone.
    pub fn resync(&mut self, scene: &Scene) {
        match self.primary() {
            Some(id) => match scene.get(id) {
                Some(obj) => self.snapshot = Some(project_snapshot(obj)),
                None => self.clear(),
            },
            None => self.snapshot = None,
        }
    }

    pub(crate) fn restore(&mut self, state: SelectionState, scene: &Scene) {
        self.state = state;
        self.resync(scene);
    }
}

#[wasm_bindgen]
impl DesignEngine {
    /// Pointer selection: pick the topmost object whose rotated bounds
    /// contain the point. `additive` (shift-click) toggles membership
    /// instead of replacing the selection.
    pub fn select_at(&mut self, x: f64, y: f64, additive: bool) -> String {
        let hit = self.scene.all().iter().rev().find(|o| o.contains_point(x, y)).map(|o| o.id);
        let mut ids: Vec<u32> = if additive { self.selection.ids().to_vec() } else { Vec::new() };
        if let Some(id) = hit {
            if additive {
                if let Some(pos) = ids.iter().position(|&i| i == id) {
                    ids.remove(pos);
                } else {
                    ids.push(id);
                }
            } else {
                ids.push(id);
            }
        }
        self.selection.select(&ids, &self.scene);
        self.needs_repaint = true;
        self.get_selected_ids()
    }

    /// Rubber-band selection across everything intersecting the rect.
    pub fn select_rect(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, additive: bool) -> String {
        let (sx, ex) = (x1.min(x2), x1.max(x2));
        let (sy, ey) = (y1.min(y2), y1.max(y2));
        let mut ids: Vec<u32> = if additive { self.selection.ids().to_vec() } else { Vec::new() };
        for obj in self.scene.all() {
            let b = obj.world_bounds();
            if b.min_x() < ex && b.max_x() > sx && b.min_y() < ey && b.max_y() > sy && !ids.contains(&obj.id) {
                ids.push(obj.id);
            }
        }
        self.selection.select(&ids, &self.scene);
        self.needs_repaint = true;
        self.get_selected_ids()
    }

    /// Write-back path for drag/resize/rotate handles on the render
    /// surface. Updates the transform and republishes the read model
    /// without changing what is selected.
    pub fn sync_transform(&mut self, id: u32, x: f64, y: f64, scale_x: f64, scale_y: f64, rotation: f64) -> bool {
        let Some(obj) = self.scene.get_mut(id) else { return false };
        obj.transform.x = x;
        obj.transform.y = y;
        obj.transform.scale_x = scale_x;
        obj.transform.scale_y = scale_y;
        obj.transform.rotation = rotation;
        self.scene.mark_mutated(id);
        self.selection.on_transform(id, &self.scene);
        self.pump_events();
        true
    }

    /// The current read model as a JS object, or `null` when idle.
    pub fn selection_snapshot(&self) -> JsValue {
        match self.selection.snapshot() {
            Some(snapshot) => serde_wasm_bindgen::to_value(snapshot).unwrap_or(JsValue::NULL),
            None => JsValue::NULL,
        }
    }
}

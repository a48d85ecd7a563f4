use crate::error::EngineError;
use crate::objects::DrawableObject;
use crate::types::{Canvas, ReorderDirection};

/// Structural change notification. Drained by the engine after every
/// operation and fed to the selection controller and the repaint flag.
#[derive(Clone, PartialEq, Debug)]
pub enum SceneEvent {
    Added(u32),
    Removed(Vec<u32>),
    Reordered(u32),
    Mutated(u32),
    CanvasChanged,
}

/// The ordered object sequence plus the canvas it lives on. Sequence order
/// is the only z-order there is: later entries paint on top.
pub struct Scene {
    objects: Vec<DrawableObject>,
    canvas: Canvas,
    events: Vec<SceneEvent>,
}

impl Scene {
    pub fn new(canvas: Canvas) -> Scene {
        Scene { objects: Vec::new(), canvas, events: Vec::new() }
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    pub fn set_canvas(&mut self, canvas: Canvas) {
        self.canvas = canvas;
        self.events.push(SceneEvent::CanvasChanged);
    }

    /// Objects in paint order (index 0 at the back).
    pub fn all(&self) -> &[DrawableObject] {
        &self.objects
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn contains(&self, id: u32) -> bool {
        self.objects.iter().any(|o| o.id == id)
    }

    pub fn get(&self, id: u32) -> Option<&DrawableObject> {
        self.objects.iter().find(|o| o.id == id)
    }

    pub fn get_mut(&mut self, id: u32) -> Option<&mut DrawableObject> {
        self.objects.iter_mut().find(|o| o.id == id)
    }

    pub fn index_of(&self, id: u32) -> Option<usize> {
        self.objects.iter().position(|o| o.id == id)
    }

    /// Append on top of the stack. Id collisions cannot happen with the
    /// engine's id counter, but are still rejected rather than silently
    /// shadowing an object.
    pub fn add(&mut self, object: DrawableObject) -> Result<(), EngineError> {
        if self.contains(object.id) {
            return Err(EngineError::DuplicateId(object.id));
        }
        self.events.push(SceneEvent::Added(object.id));
        self.objects.push(object);
        Ok(())
    }

    /// Remove every listed id. Ids not present are skipped, not errors.
    pub fn remove(&mut self, ids: &[u32]) {
        let removed: Vec<u32> = self
            .objects
            .iter()
            .filter(|o| ids.contains(&o.id))
            .map(|o| o.id)
            .collect();
        if removed.is_empty() {
            return;
        }
        self.objects.retain(|o| !removed.contains(&o.id));
        self.events.push(SceneEvent::Removed(removed));
    }

    /// Move an object one step or all the way through the paint order.
    /// Already at the requested extreme is a no-op. Returns whether the
    /// order changed.
    pub fn reorder(&mut self, id: u32, direction: ReorderDirection) -> bool {
        let Some(pos) = self.index_of(id) else { return false };
        let last = self.objects.len() - 1;
        let moved = match direction {
            ReorderDirection::Forward if pos < last => {
                self.objects.swap(pos, pos + 1);
                true
            }
            ReorderDirection::Backward if pos > 0 => {
                self.objects.swap(pos, pos - 1);
                true
            }
            ReorderDirection::ToFront if pos < last => {
                let obj = self.objects.remove(pos);
                self.objects.push(obj);
                true
            }
            ReorderDirection::ToBack if pos > 0 => {
                let obj = self.objects.remove(pos);
                self.objects.insert(0, obj);
                true
            }
            _ => false,
        };
        if moved {
            self.events.push(SceneEvent::Reordered(id));
        }
        moved
    }

    /// Record an in-place property edit so consumers resync.
    pub fn mark_mutated(&mut self, id: u32) {
        self.events.push(SceneEvent::Mutated(id));
    }

    pub fn take_events(&mut self) -> Vec<SceneEvent> {
        std::mem::take(&mut self.events)
    }

    pub(crate) fn snapshot_objects(&self) -> Vec<DrawableObject> {
        self.objects.clone()
    }

    pub(crate) fn restore(&mut self, objects: Vec<DrawableObject>, canvas: Canvas) {
        self.objects = objects;
        self.canvas = canvas;
        self.events.push(SceneEvent::CanvasChanged);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::objects::{Geometry, Style, Transform};
    use crate::types::ObjectKind;

    fn scene_with(ids: &[u32]) -> Scene {
        let mut scene = Scene::new(Canvas::default());
        for &id in ids {
            scene
                .add(DrawableObject::new(
                    id,
                    ObjectKind::Rectangle,
                    Geometry::Rectangle { width: 10.0, height: 10.0, corner_radius: 0.0 },
                    Transform::at(0.0, 0.0),
                    Style::filled("#000000"),
                ))
                .unwrap();
        }
        scene.take_events();
        scene
    }

    fn order(scene: &Scene) -> Vec<u32> {
        scene.all().iter().map(|o| o.id).collect()
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let mut scene = scene_with(&[1]);
        let dup = scene.get(1).unwrap().clone();
        assert!(matches!(scene.add(dup), Err(EngineError::DuplicateId(1))));
        assert_eq!(scene.len(), 1);
    }

    #[test]
    fn removing_unknown_ids_is_a_no_op() {
        let mut scene = scene_with(&[1, 2]);
        scene.remove(&[99]);
        assert_eq!(scene.len(), 2);
        assert!(scene.take_events().is_empty());
    }

    #[test]
    fn to_back_at_the_back_changes_nothing() {
        let mut scene = scene_with(&[1, 2, 3]);
        assert!(!scene.reorder(1, ReorderDirection::ToBack));
        assert_eq!(order(&scene), vec![1, 2, 3]);
    }

    #[test]
    fn forward_then_backward_restores_the_order() {
        let mut scene = scene_with(&[1, 2, 3]);
        assert!(scene.reorder(2, ReorderDirection::Forward));
        assert_eq!(order(&scene), vec![1, 3, 2]);
        assert!(scene.reorder(2, ReorderDirection::Backward));
        assert_eq!(order(&scene), vec![1, 2, 3]);
    }

    #[test]
    fn to_front_moves_to_the_end_of_the_paint_order() {
        let mut scene = scene_with(&[1, 2, 3]);
        assert!(scene.reorder(1, ReorderDirection::ToFront));
        assert_eq!(order(&scene), vec![2, 3, 1]);
    }

    #[test]
    fn structural_changes_emit_events() {
        let mut scene = scene_with(&[1, 2]);
        scene.remove(&[1, 99]);
        scene.mark_mutated(2);
        let events = scene.take_events();
        assert_eq!(events, vec![SceneEvent::Removed(vec![1]), SceneEvent::Mutated(2)]);
        assert!(scene.take_events().is_empty());
    }
}

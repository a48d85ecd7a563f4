use creloy_engine::assets::AssetUpload;
use creloy_engine::{DesignEngine, EngineError, ExportFormat, Geometry, ReorderDirection, ShapeKind, TextPreset};

fn editor() -> DesignEngine {
    let mut engine = DesignEngine::new();
    engine.mount_offscreen();
    engine
}

fn order(engine: &DesignEngine) -> Vec<u32> {
    engine.object_ids()
}

#[test]
fn placements_center_their_bounding_box_on_the_target() {
    let kinds = [
        ShapeKind::Rect,
        ShapeKind::Circle,
        ShapeKind::Triangle,
        ShapeKind::Ellipse,
        ShapeKind::Star,
        ShapeKind::Hexagon,
        ShapeKind::Diamond,
        ShapeKind::Line,
    ];
    let mut engine = editor();
    for kind in kinds {
        let id = engine.place_shape_at(kind, 321.0, 123.0).unwrap();
        let bounds = engine.object(id).unwrap().world_bounds();
        assert!((bounds.center().x - 321.0).abs() < 1e-9, "{kind:?} off-center in x");
        assert!((bounds.center().y - 123.0).abs() < 1e-9, "{kind:?} off-center in y");
    }
}

#[test]
fn default_star_vertices_start_at_the_top() {
    let mut engine = editor();
    let id = engine.place_shape_at(ShapeKind::Star, 100.0, 100.0).unwrap();
    let obj = engine.object(id).unwrap();
    let Geometry::Polygon { points } = &obj.geometry else {
        panic!("star should be stored as a polygon");
    };
    assert_eq!(points.len(), 10);
    assert!((points[0].x - 0.0).abs() < 1e-9);
    assert!((points[0].y - (-50.0)).abs() < 1e-9);
    let angle = std::f64::consts::PI / 5.0;
    assert!((points[1].x - 20.0 * angle.sin()).abs() < 1e-9);
    assert!((points[1].y - (-20.0 * angle.cos())).abs() < 1e-9);
}

#[test]
fn a_new_object_is_topmost_and_solely_selected() {
    let mut engine = editor();
    let first = engine.place_shape_at(ShapeKind::Rect, 100.0, 100.0).unwrap();
    let second = engine.place_shape_at(ShapeKind::Circle, 200.0, 200.0).unwrap();
    assert_eq!(order(&engine), vec![first, second]);
    assert_eq!(engine.selection().ids(), &[second]);
    assert_eq!(engine.selection().primary(), Some(second));
}

#[test]
fn placement_requires_a_mounted_surface() {
    let mut engine = DesignEngine::new();
    let err = engine.place_shape_at(ShapeKind::Rect, 100.0, 100.0).unwrap_err();
    assert!(matches!(err, EngineError::EngineNotReady));
    assert_eq!(engine.object_count(), 0);

    engine.mount_offscreen();
    assert!(engine.place_shape_at(ShapeKind::Rect, 100.0, 100.0).is_ok());

    engine.unmount();
    assert!(matches!(
        engine.place_shape_at(ShapeKind::Rect, 100.0, 100.0),
        Err(EngineError::EngineNotReady)
    ));
}

#[test]
fn deleting_the_selection_removes_exactly_those_objects() {
    let mut engine = editor();
    let a = engine.place_shape_at(ShapeKind::Rect, 100.0, 100.0).unwrap();
    let b = engine.place_shape_at(ShapeKind::Circle, 150.0, 150.0).unwrap();
    let c = engine.place_shape_at(ShapeKind::Triangle, 200.0, 200.0).unwrap();

    engine.select_objects(vec![a, c]);
    assert!(engine.delete_selection());
    assert_eq!(order(&engine), vec![b]);
    assert!(engine.selection().is_idle());

    // Nothing selected: a second delete is a no-op.
    assert!(!engine.delete_selection());
    assert_eq!(engine.object_count(), 1);
}

#[test]
fn removing_the_primary_through_the_scene_idles_the_selection() {
    let mut engine = editor();
    let id = engine.place_shape_at(ShapeKind::Rect, 100.0, 100.0).unwrap();
    assert_eq!(engine.selection().primary(), Some(id));
    engine.select_objects(vec![id]);
    assert!(engine.delete_selection());
    assert!(engine.selection().is_idle());
    assert!(engine.selection().snapshot().is_none());
}

#[test]
fn layering_round_trips_and_respects_extremes() {
    let mut engine = editor();
    let a = engine.place_shape_at(ShapeKind::Rect, 100.0, 100.0).unwrap();
    let b = engine.place_shape_at(ShapeKind::Circle, 150.0, 150.0).unwrap();
    let c = engine.place_shape_at(ShapeKind::Triangle, 200.0, 200.0).unwrap();
    let original = order(&engine);

    // to_back on the backmost object changes nothing.
    engine.select_objects(vec![a]);
    assert!(!engine.reorder_selected(ReorderDirection::ToBack));
    assert_eq!(order(&engine), original);

    // forward then backward restores the original order.
    engine.select_objects(vec![b]);
    assert!(engine.reorder_selected(ReorderDirection::Forward));
    assert_eq!(order(&engine), vec![a, c, b]);
    assert!(engine.reorder_selected(ReorderDirection::Backward));
    assert_eq!(order(&engine), original);

    engine.select_objects(vec![c]);
    assert!(engine.reorder_selected(ReorderDirection::ToBack));
    assert_eq!(order(&engine), vec![c, a, b]);
}

#[test]
fn oversized_uploads_are_rejected_without_touching_the_scene() {
    let mut engine = editor();
    engine.place_shape_at(ShapeKind::Rect, 100.0, 100.0).unwrap();
    let before = engine.object_count();

    let err = AssetUpload::validate("photo.png", "image/png", 6 * 1024 * 1024).unwrap_err();
    assert!(matches!(err, EngineError::InvalidAsset(_)));
    assert_eq!(engine.object_count(), before);
}

#[test]
fn undecodable_image_bytes_insert_nothing() {
    let mut engine = editor();
    let upload = AssetUpload::validate("bad.png", "image/png", 16).unwrap();
    let err = engine.complete_upload(&upload, b"definitely not png").unwrap_err();
    assert!(matches!(err, EngineError::DecodeFailure(_)));
    assert_eq!(engine.object_count(), 0);
}

#[test]
fn ingested_images_land_at_half_scale_and_become_the_selection() {
    let mut engine = editor();
    let mut png = Vec::new();
    let pixels = image::RgbaImage::from_pixel(8, 4, image::Rgba([10, 20, 30, 255]));
    image::DynamicImage::ImageRgba8(pixels)
        .write_to(&mut std::io::Cursor::new(&mut png), image::ImageOutputFormat::Png)
        .unwrap();

    let upload = AssetUpload::validate("tiny.png", "image/png", png.len()).unwrap();
    let id = engine.complete_upload(&upload, &png).unwrap();

    let obj = engine.object(id).unwrap();
    let (w, h) = obj.scaled_size();
    assert_eq!((w, h), (4.0, 2.0));
    assert_eq!(engine.selection().ids(), &[id]);
}

#[test]
fn a_pending_upload_fails_cleanly_after_teardown() {
    let mut engine = editor();
    let upload = AssetUpload::validate("late.png", "image/png", 64).unwrap();
    engine.unmount();
    let err = engine.complete_upload(&upload, &[0u8; 64]).unwrap_err();
    assert!(matches!(err, EngineError::EngineNotReady));
}

#[test]
fn zoom_clamps_at_both_ends() {
    let mut engine = editor();
    assert_eq!(engine.set_zoom(5.0), 3.0);
    assert_eq!(engine.set_zoom(-1.0), 0.1);
}

#[test]
fn transform_writeback_refreshes_the_read_model_only() {
    let mut engine = editor();
    let id = engine.place_shape_at(ShapeKind::Rect, 100.0, 100.0).unwrap();
    assert!(engine.sync_transform(id, 10.0, 20.0, 2.0, 1.0, 30.0));

    let snap = engine.selection().snapshot().unwrap();
    assert_eq!(snap.x, 10.0);
    assert_eq!(snap.y, 20.0);
    assert_eq!(snap.width, 200.0);
    assert_eq!(snap.rotation, 30.0);
    assert_eq!(engine.selection().ids(), &[id]);
}

#[test]
fn pointer_selection_honors_paint_order() {
    let mut engine = editor();
    let below = engine.place_shape_at(ShapeKind::Rect, 300.0, 300.0).unwrap();
    let above = engine.place_shape_at(ShapeKind::Rect, 300.0, 300.0).unwrap();

    let selected = engine.select_at(300.0, 300.0, false);
    assert_eq!(selected, format!("[{above}]"));

    engine.select_objects(vec![above]);
    engine.reorder_selected(ReorderDirection::ToBack);
    let selected = engine.select_at(300.0, 300.0, false);
    assert_eq!(selected, format!("[{below}]"));

    // A click on empty canvas clears.
    let selected = engine.select_at(700.0, 20.0, false);
    assert_eq!(selected, "[]");
    assert!(engine.selection().is_idle());
}

#[test]
fn undo_and_redo_walk_the_snapshot_stack() {
    let mut engine = editor();
    let a = engine.place_shape_at(ShapeKind::Rect, 100.0, 100.0).unwrap();
    let b = engine.place_shape_at(ShapeKind::Circle, 200.0, 200.0).unwrap();
    assert_eq!(engine.object_count(), 2);

    assert!(engine.undo());
    assert_eq!(order(&engine), vec![a]);
    assert!(engine.undo());
    assert_eq!(engine.object_count(), 0);
    assert!(!engine.undo());

    assert!(engine.redo());
    assert!(engine.redo());
    assert_eq!(order(&engine), vec![a, b]);
    assert!(!engine.redo());
}

#[test]
fn text_presets_carry_their_documented_styles() {
    let mut engine = editor();
    let heading = engine.place_text_preset(TextPreset::Heading, 400.0, 250.0).unwrap();
    let ts = engine.object(heading).unwrap().text_style.clone().unwrap();
    assert_eq!(ts.font_size, 48);
    assert_eq!(ts.font_weight, creloy_engine::FontWeight::Bold);

    let body = engine.place_text_preset(TextPreset::Body, 400.0, 250.0).unwrap();
    let ts = engine.object(body).unwrap().text_style.clone().unwrap();
    assert_eq!(ts.font_size, 18);
    assert_eq!(ts.font_weight, creloy_engine::FontWeight::Normal);

    // Text anchors 50 left and 10 above the drop point.
    let obj = engine.object(body).unwrap();
    assert_eq!(obj.transform.x, 350.0);
    assert_eq!(obj.transform.y, 240.0);
}

#[test]
fn export_covers_the_full_scene_regardless_of_zoom() {
    let mut engine = editor();
    engine.place_shape_at(ShapeKind::Star, 400.0, 250.0).unwrap();
    engine.set_zoom(0.25);

    let bytes = engine.export(ExportFormat::Png, 2.0, 1.0).unwrap();
    let decoded = image::load_from_memory(&bytes).unwrap();
    assert_eq!((decoded.width(), decoded.height()), (1600, 1000));
}

#[test]
fn exported_pixels_show_the_placed_shape() {
    let mut engine = editor();
    engine.place_shape_at(ShapeKind::Rect, 400.0, 250.0).unwrap();

    let bytes = engine.export(ExportFormat::Png, 1.0, 1.0).unwrap();
    let decoded = image::load_from_memory(&bytes).unwrap().to_rgba8();
    // Canvas center sits inside the default 100x100 rect: the gold fill,
    // not the white background.
    let center = decoded.get_pixel(400, 250);
    assert_eq!(center.0[..3], [0xc5, 0xa0, 0x59]);
    let corner = decoded.get_pixel(5, 5);
    assert_eq!(corner.0[..3], [0xff, 0xff, 0xff]);
}

#![warn(clippy::pedantic)]

use approx::assert_relative_eq;
use rigidx::{
    codec, point, DecodeError, EditError, Editor, Element, ElementError, ElementId, ElementKind,
    Orientation, RigidityCenter, SaveError, ScreenPoint,
};

fn sample_editor() -> Editor {
    let mut editor = Editor::default();
    editor
        .add_column(point(0.0, 0.0), 0.3, 0.3)
        .expect("valid column");
    editor
        .add_wall(point(4.0, 0.0), 3.0, 0.2, Orientation::Vertical)
        .expect("valid wall");
    editor
        .set_mass_center(point(2.0, 0.0))
        .expect("finite mass center");
    editor
}

#[test]
fn column_and_wall_share_the_load() {
    let editor = sample_editor();
    let analysis = editor.analysis();
    let center = analysis.rigidity_center.point().expect("defined center");
    assert!(center.x > 0.0 && center.x < 4.0);

    let column_ky = 0.3 * 0.3_f64.powi(3);
    let wall_ky = 0.2 * 3.0_f64.powi(3);
    assert_relative_eq!(center.x, 4.0 * wall_ky / (column_ky + wall_ky));

    let eccentricity = analysis.eccentricity.expect("defined eccentricity");
    assert_relative_eq!(eccentricity.ey, center.y);
    assert_relative_eq!(eccentricity.ex, center.x - 2.0);
}

#[test]
fn zero_width_is_rejected_before_insertion() {
    let mut editor = sample_editor();
    let depth = editor.undo_depth();
    let error = editor
        .add_column(point(1.0, 1.0), 0.0, 0.3)
        .expect_err("zero width rejected");
    assert_eq!(
        error,
        EditError::InvalidElement(ElementError::InvalidDimension {
            name: "width",
            value: 0.0
        })
    );
    assert_eq!(editor.model().element_count(), 2);
    assert_eq!(editor.undo_depth(), depth);
}

#[test]
fn undo_restores_every_intermediate_state() {
    let mut editor = Editor::default();
    let mut snapshots = vec![editor.model().clone()];

    let c1 = editor
        .add_column(point(0.0, 0.0), 0.3, 0.3)
        .expect("valid column");
    snapshots.push(editor.model().clone());
    editor
        .add_wall(point(2.0, 2.0), 3.0, 0.2, Orientation::Horizontal)
        .expect("valid wall");
    snapshots.push(editor.model().clone());
    editor
        .move_element(c1, rigidx::Displacement::new(1.0, -1.0))
        .expect("known element");
    snapshots.push(editor.model().clone());
    editor
        .set_mass_center(point(1.0, 1.0))
        .expect("finite mass center");
    snapshots.push(editor.model().clone());
    editor.delete_element(c1).expect("known element");

    while let Some(expected) = snapshots.pop() {
        assert!(editor.undo());
        assert_eq!(editor.model(), &expected);
    }
    assert!(!editor.undo());
    assert!(editor.model().is_empty());
}

#[test]
fn history_keeps_the_newest_twenty_states() {
    let mut editor = Editor::default();
    for step in 0..25 {
        editor
            .add_column(point(f64::from(step), 0.0), 0.3, 0.3)
            .expect("valid column");
    }
    assert_eq!(editor.undo_depth(), 20);
    while editor.undo() {}
    assert_eq!(editor.model().element_count(), 5);
    assert_eq!(editor.model().last_number(ElementKind::Column), 5);
}

#[test]
fn deleting_the_only_element_leaves_the_center_undefined() {
    let mut editor = Editor::default();
    let id = editor
        .add_wall(point(0.0, 0.0), 3.0, 0.2, Orientation::Vertical)
        .expect("valid wall");
    assert!(editor.analysis().rigidity_center.is_defined());
    editor.delete_element(id).expect("known element");
    assert_eq!(editor.analysis().rigidity_center, RigidityCenter::Empty);
    assert_eq!(editor.analysis().eccentricity, None);
}

#[test]
fn editing_cannot_change_the_element_kind() {
    let mut editor = sample_editor();
    let column = ElementId::new(ElementKind::Column, 1);
    let wall = Element::wall(point(0.0, 0.0), 3.0, 0.2, Orientation::Vertical)
        .expect("valid wall");
    assert_eq!(
        editor.edit_element(column, wall),
        Err(EditError::KindMismatch {
            id: column,
            found: ElementKind::Column,
            requested: ElementKind::Wall,
        })
    );
}

#[test]
fn saved_layout_loads_back() {
    let dir = tempfile::tempdir().expect("temporary directory");
    let path = dir.path().join("plan.json");

    let mut editor = sample_editor();
    let first_wall = ElementId::new(ElementKind::Wall, 1);
    editor.delete_element(first_wall).expect("known element");
    editor
        .add_wall(point(-3.0, 1.5), 2.5, 0.25, Orientation::Horizontal)
        .expect("valid wall");
    editor.save(&path).expect("layout saved");
    assert_eq!(editor.title(), "Rigidity Center - plan.json");

    let mut reloaded = Editor::default();
    reloaded.load(&path).expect("layout loaded");
    assert_eq!(reloaded.undo_depth(), 0);
    assert_eq!(reloaded.model().mass_center(), point(2.0, 0.0));

    let original: Vec<&Element> = editor.model().elements().map(|(_, e)| e).collect();
    let restored: Vec<&Element> = reloaded.model().elements().map(|(_, e)| e).collect();
    assert_eq!(original, restored);

    // The surviving wall was W2 before saving and is renumbered on load.
    let labels: Vec<String> = reloaded
        .model()
        .elements()
        .map(|(id, _)| id.to_string())
        .collect();
    assert_eq!(labels, ["C1", "W1"]);
}

#[test]
fn save_current_writes_to_the_loaded_file() {
    let dir = tempfile::tempdir().expect("temporary directory");
    let path = dir.path().join("plan.json");
    let mut editor = sample_editor();
    editor.save(&path).expect("layout saved");

    editor
        .add_column(point(8.0, 0.0), 0.4, 0.4)
        .expect("valid column");
    editor.save_current().expect("saved in place");

    let model = codec::load(&path).expect("layout loaded");
    assert_eq!(model.element_count(), 3);
}

#[test]
fn failed_save_leaves_existing_document_alone() {
    let dir = tempfile::tempdir().expect("temporary directory");
    let path = dir.path().join("plan.json");
    let mut editor = sample_editor();
    editor.save(&path).expect("layout saved");
    let saved = std::fs::read(&path).expect("saved document readable");

    editor
        .add_column(point(8.0, 0.0), 0.4, 0.4)
        .expect("valid column");
    let unreachable = dir.path().join("missing").join("plan.json");
    let error = editor.save(&unreachable).expect_err("parent directory missing");
    assert!(matches!(error, SaveError::Io(_)));
    assert!(!unreachable.exists());
    assert_eq!(editor.path(), Some(path.as_path()));
    assert_eq!(std::fs::read(&path).expect("document readable"), saved);

    // A directory cannot be replaced by a document either.
    let error = editor.save(dir.path()).expect_err("target is a directory");
    assert!(matches!(error, SaveError::Io(_)));
    assert_eq!(editor.path(), Some(path.as_path()));
    assert_eq!(std::fs::read(&path).expect("document readable"), saved);
}

#[test]
fn failed_load_keeps_the_current_layout() {
    let dir = tempfile::tempdir().expect("temporary directory");
    let broken = dir.path().join("broken.json");
    std::fs::write(&broken, "{\"elements\": [").expect("file written");

    let mut editor = sample_editor();
    let before = editor.model().clone();
    let depth = editor.undo_depth();

    let error = editor.load(&broken).expect_err("malformed document");
    assert!(matches!(error, DecodeError::Malformed(_)));
    let error = editor
        .load(&dir.path().join("missing.json"))
        .expect_err("missing file");
    assert!(matches!(error, DecodeError::Io(_)));

    assert_eq!(editor.model(), &before);
    assert_eq!(editor.undo_depth(), depth);
    assert_eq!(editor.title(), "Rigidity Center - [Untitled]");
}

#[test]
fn loading_frames_the_layout() {
    let dir = tempfile::tempdir().expect("temporary directory");
    let path = dir.path().join("plan.json");
    let mut source = Editor::default();
    source
        .add_wall(point(20.0, 10.0), 40.0, 0.3, Orientation::Horizontal)
        .expect("valid wall");
    source.save(&path).expect("layout saved");

    let mut editor = Editor::default();
    editor.load(&path).expect("layout loaded");
    let center = editor.view().viewport().center();
    let bounds = editor.model().bounding_box().expect("non-empty layout");
    let projected = editor.view().model_to_view(bounds.center());
    assert_relative_eq!(projected.x, center.x, epsilon = 1.0e-9);
    assert_relative_eq!(projected.y, center.y, epsilon = 1.0e-9);
}

#[test]
fn zooming_keeps_the_cursor_anchored() {
    let mut editor = sample_editor();
    let cursor = ScreenPoint::new(123.0, 456.0);
    let anchor = editor.view().view_to_model(cursor);
    assert!(editor.zoom_in(cursor));
    assert!(editor.zoom_in(cursor));
    assert!(editor.zoom_out(cursor));
    let after = editor.view().view_to_model(cursor);
    assert_relative_eq!(after.x, anchor.x, epsilon = 1.0e-9);
    assert_relative_eq!(after.y, anchor.y, epsilon = 1.0e-9);

    let zoom = editor.view().state().zoom;
    assert!(!editor.zoom_at(100.0, cursor));
    assert_relative_eq!(editor.view().state().zoom, zoom);
}

#[test]
fn clicking_selects_the_topmost_element() {
    let mut editor = Editor::default();
    let wall = editor
        .add_wall(point(0.0, 0.0), 4.0, 0.5, Orientation::Horizontal)
        .expect("valid wall");
    let column = editor
        .add_column(point(0.0, 0.0), 0.5, 0.5)
        .expect("valid column");

    let on_both = editor.view().model_to_view(point(0.0, 0.0));
    assert_eq!(editor.select_at(on_both), Some(column));
    let on_wall = editor.view().model_to_view(point(1.5, 0.0));
    assert_eq!(editor.select_at(on_wall), Some(wall));
    let empty = editor.view().model_to_view(point(0.0, 5.0));
    assert_eq!(editor.select_at(empty), None);
}

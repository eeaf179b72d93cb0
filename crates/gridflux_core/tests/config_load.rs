use gridflux_core::{
    ColumnSpec, ContainerHeight, DataGrid, GridConfig, GridError, Pinned, ReorderMode,
};
use serde_json::Value;
use std::fs;

#[test]
fn loads_config_from_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("grid.json");
    fs::write(
        &path,
        r#"{"row_height": 32, "container_height": 320, "reorder_mode": "commit_on_drop"}"#,
    )
    .expect("write config");

    let config = GridConfig::load(&path).expect("load");

    assert_eq!(config.row_height, 32.0);
    assert_eq!(config.container_height, ContainerHeight::Pixels(320.0));
    assert_eq!(config.reorder_mode, ReorderMode::CommitOnDrop);
    assert!(config.virtualized);
}

#[test]
fn missing_file_yields_defaults() {
    let dir = tempfile::tempdir().expect("tempdir");

    let config = GridConfig::load(dir.path().join("absent.json")).expect("load");

    assert_eq!(config, GridConfig::default());
}

#[test]
fn invalid_file_is_rejected() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("grid.json");
    fs::write(&path, r#"{"default_column_width": -5}"#).expect("write config");

    let err = GridConfig::load(&path).expect_err("negative width must fail");
    assert!(matches!(err, GridError::InvalidConfig(_)));
}

#[test]
fn grid_from_column_specs() {
    let specs: Vec<ColumnSpec> = serde_json::from_str(
        r#"[
            {"id": "id", "width": 60, "pinned": "left", "resizable": false},
            {"id": "name", "header": "Full name", "key": "full_name"},
            {"id": "age", "align": "right"}
        ]"#,
    )
    .expect("specs");

    let mut grid = DataGrid::<Value>::new(
        specs.into_iter().map(Into::into).collect(),
        GridConfig::default(),
    )
    .expect("grid")
    .with_rows(vec![serde_json::json!({"id": 7, "full_name": "Dana", "age": 41})]);

    let frame = grid.compose();

    assert_eq!(frame.header.left[0].column_id, "id");
    assert!(!frame.header.left[0].resizable);
    assert_eq!(frame.header.center[0].label, "Full name");
    assert_eq!(frame.rows[0].cells.center[0].text, "Dana");
    assert_eq!(frame.rows[0].cells.left[0].text, "7");
    assert!(!grid.resize_pointer_down("id", 0.0));
    assert_eq!(
        grid.registry().column("id").map(|c| c.pinned),
        Some(Pinned::Left)
    );
}

use gridflux_core::{Alignment, CellValue, Column, Pinned};
use serde_json::{Value, json};

/// Three people with distinct names and ages, in a non-sorted source order.
pub fn people_rows() -> Vec<Value> {
    vec![
        json!({"id": 1, "name": "Alice", "age": 30}),
        json!({"id": 2, "name": "Bob", "age": 25}),
        json!({"id": 3, "name": "Charlie", "age": 35}),
    ]
}

pub fn people_columns() -> Vec<Column<Value>> {
    vec![
        Column::new("id", "ID").width(60.0),
        Column::new("name", "Name"),
        Column::new("age", "Age").width(100.0).align(Alignment::Right),
    ]
}

/// People columns plus a pinned-left selector and a pinned-right actions
/// column computed from the row.
pub fn pinned_columns() -> Vec<Column<Value>> {
    vec![
        Column::new("select", "").width(40.0).pinned(Pinned::Left),
        Column::new("id", "ID").width(60.0),
        Column::new("name", "Name"),
        Column::new("age", "Age").width(100.0),
        Column::with_accessor("actions", "Actions", |row: &Value| {
            CellValue::from(format!("edit:{}", row["id"]))
        })
        .width(80.0)
        .pinned(Pinned::Right),
    ]
}

pub fn names(rows: &[Value], order: &[usize]) -> Vec<String> {
    order
        .iter()
        .map(|&i| rows[i]["name"].as_str().unwrap_or_default().to_string())
        .collect()
}

/// `count` rows with ids `0..count` and a descending `rank`.
pub fn large_table(count: usize) -> Vec<Value> {
    (0..count)
        .map(|i| {
            json!({
                "id": i,
                "name": format!("user{:05}", i),
                "rank": count - i,
            })
        })
        .collect()
}

pub fn large_table_columns() -> Vec<Column<Value>> {
    vec![
        Column::new("id", "ID").width(80.0).pinned(Pinned::Left),
        Column::new("name", "Name"),
        Column::new("rank", "Rank").pinned(Pinned::Right),
    ]
}

pub fn ids(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

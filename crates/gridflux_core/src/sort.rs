use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use crate::{CellValue, Column, GridRow};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn indicator(self) -> &'static str {
        match self {
            SortDirection::Ascending => SORT_INDICATOR_ASC,
            SortDirection::Descending => SORT_INDICATOR_DESC,
        }
    }
}

/// Sort indicator for ascending sort.
pub const SORT_INDICATOR_ASC: &str = "↑";

/// Sort indicator for descending sort.
pub const SORT_INDICATOR_DESC: &str = "↓";

/// Which column the rows are ordered by, and in which direction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SortDescriptor {
    pub column_id: String,
    pub direction: SortDirection,
}

impl SortDescriptor {
    pub fn new(column_id: impl Into<String>, direction: SortDirection) -> Self {
        Self {
            column_id: column_id.into(),
            direction,
        }
    }

    pub fn ascending(column_id: impl Into<String>) -> Self {
        Self::new(column_id, SortDirection::Ascending)
    }

    pub fn descending(column_id: impl Into<String>) -> Self {
        Self::new(column_id, SortDirection::Descending)
    }
}

/// Who owns the current sort descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOwnership {
    /// The grid applies header clicks itself and reports the result.
    #[default]
    Engine,
    /// The host owns the descriptor; header clicks only propose a change and
    /// nothing moves until the host calls `set_sort`.
    Host,
}

/// Cycle sort state for a header click: none -> asc -> desc -> none.
/// Clicking a different column always starts it at ascending.
pub fn next_sort_state(current: Option<&SortDescriptor>, column_id: &str) -> Option<SortDescriptor> {
    match current {
        Some(SortDescriptor {
            column_id: current_id,
            direction,
        }) if current_id == column_id => match direction {
            SortDirection::Ascending => Some(SortDescriptor::descending(column_id)),
            SortDirection::Descending => None,
        },
        _ => Some(SortDescriptor::ascending(column_id)),
    }
}

/// Ordered view over `rows` as a permutation of source indices.
///
/// No descriptor, or one naming a column that doesn't exist, yields the
/// identity order. Ties keep source order in both directions.
pub fn sort_rows<R: GridRow>(
    rows: &[R],
    columns: &[Column<R>],
    descriptor: Option<&SortDescriptor>,
) -> Vec<usize> {
    let mut order: Vec<usize> = (0..rows.len()).collect();

    let Some(descriptor) = descriptor else {
        return order;
    };

    let Some(column) = columns.iter().find(|c| c.id == descriptor.column_id) else {
        log::warn!(
            "[SORT] Unknown column {}, keeping source order",
            descriptor.column_id
        );
        return order;
    };

    let keys: Vec<CellValue> = rows.iter().map(|row| column.accessor.resolve(row)).collect();

    order.sort_unstable_by(|&a, &b| {
        compare_keys(&keys[a], &keys[b], descriptor.direction).then(a.cmp(&b))
    });

    log::debug!(
        "[SORT] Sorted {} rows by {} ({:?})",
        rows.len(),
        descriptor.column_id,
        descriptor.direction
    );

    order
}

fn compare_keys(a: &CellValue, b: &CellValue, direction: SortDirection) -> Ordering {
    let ordering = a.cmp(b);
    match direction {
        SortDirection::Ascending => ordering,
        SortDirection::Descending => ordering.reverse(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    type Row = serde_json::Value;

    fn people() -> Vec<Row> {
        vec![
            json!({"id": 1, "name": "Alice", "age": 30}),
            json!({"id": 2, "name": "Bob", "age": 25}),
            json!({"id": 3, "name": "Charlie", "age": 35}),
        ]
    }

    fn columns() -> Vec<Column<Row>> {
        vec![
            Column::new("id", "ID"),
            Column::new("name", "Name"),
            Column::new("age", "Age"),
        ]
    }

    fn names(rows: &[Row], order: &[usize]) -> Vec<String> {
        order
            .iter()
            .map(|&i| rows[i]["name"].as_str().unwrap_or_default().to_string())
            .collect()
    }

    #[test]
    fn next_sort_state_cycles_none_asc_desc_none() {
        let step1 = next_sort_state(None, "name");
        assert_eq!(step1, Some(SortDescriptor::ascending("name")));

        let step2 = next_sort_state(step1.as_ref(), "name");
        assert_eq!(step2, Some(SortDescriptor::descending("name")));

        let step3 = next_sort_state(step2.as_ref(), "name");
        assert_eq!(step3, None);
    }

    #[test]
    fn next_sort_state_switches_to_new_column_ascending() {
        let current = SortDescriptor::descending("age");
        let next = next_sort_state(Some(&current), "name");
        assert_eq!(next, Some(SortDescriptor::ascending("name")));
    }

    #[test]
    fn sorts_by_name_in_both_directions() {
        let rows = people();

        let asc = sort_rows(&rows, &columns(), Some(&SortDescriptor::ascending("name")));
        assert_eq!(names(&rows, &asc), vec!["Alice", "Bob", "Charlie"]);

        let desc = sort_rows(&rows, &columns(), Some(&SortDescriptor::descending("name")));
        assert_eq!(names(&rows, &desc), vec!["Charlie", "Bob", "Alice"]);
    }

    #[test]
    fn unknown_column_keeps_source_order() {
        let rows = people();
        let order = sort_rows(&rows, &columns(), Some(&SortDescriptor::ascending("zzz")));
        assert_eq!(order, vec![0, 1, 2]);
    }

    #[test]
    fn no_descriptor_keeps_source_order() {
        let rows = people();
        assert_eq!(sort_rows(&rows, &columns(), None), vec![0, 1, 2]);
    }

    #[test]
    fn ties_keep_source_order_in_both_directions() {
        let rows = vec![
            json!({"k": 1, "tag": "a"}),
            json!({"k": 0, "tag": "b"}),
            json!({"k": 1, "tag": "c"}),
            json!({"k": 0, "tag": "d"}),
        ];
        let columns: Vec<Column<Row>> = vec![Column::new("k", "K")];

        let asc = sort_rows(&rows, &columns, Some(&SortDescriptor::ascending("k")));
        assert_eq!(asc, vec![1, 3, 0, 2]);

        let desc = sort_rows(&rows, &columns, Some(&SortDescriptor::descending("k")));
        assert_eq!(desc, vec![0, 2, 1, 3]);
    }

    #[test]
    fn descending_is_exact_reverse_for_distinct_keys() {
        let rows: Vec<Row> = (0..50).map(|i| json!({"v": (i * 37) % 101})).collect();
        let columns: Vec<Column<Row>> = vec![Column::new("v", "V")];

        let asc = sort_rows(&rows, &columns, Some(&SortDescriptor::ascending("v")));
        let mut desc = sort_rows(&rows, &columns, Some(&SortDescriptor::descending("v")));
        desc.reverse();

        assert_eq!(asc, desc);
    }

    #[test]
    fn function_accessor_drives_sort() {
        let rows = people();
        let columns: Vec<Column<Row>> = vec![Column::with_accessor("name_len", "Len", |row: &Row| {
            CellValue::Int(row["name"].as_str().map(|s| s.len() as i64).unwrap_or(0))
        })];

        let order = sort_rows(&rows, &columns, Some(&SortDescriptor::descending("name_len")));
        assert_eq!(names(&rows, &order), vec!["Charlie", "Alice", "Bob"]);
    }

    #[test]
    fn source_rows_are_untouched() {
        let rows = people();
        let before = rows.clone();

        let _ = sort_rows(&rows, &columns(), Some(&SortDescriptor::descending("age")));

        assert_eq!(rows, before);
    }
}

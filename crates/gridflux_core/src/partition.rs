use crate::{Column, ColumnRegistry, Pinned};

/// One of the three disjoint column groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PartitionKind {
    Left,
    Center,
    Right,
}

impl PartitionKind {
    pub const ALL: [PartitionKind; 3] = [
        PartitionKind::Left,
        PartitionKind::Center,
        PartitionKind::Right,
    ];

    pub fn of<R>(column: &Column<R>) -> Self {
        match column.pinned {
            Pinned::Left => PartitionKind::Left,
            Pinned::Right => PartitionKind::Right,
            Pinned::None => PartitionKind::Center,
        }
    }
}

/// Visible column ids split into pinned-left, center and pinned-right, each
/// in registry order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnPartition {
    pub left: Vec<String>,
    pub center: Vec<String>,
    pub right: Vec<String>,
}

impl ColumnPartition {
    pub fn get(&self, kind: PartitionKind) -> &[String] {
        match kind {
            PartitionKind::Left => &self.left,
            PartitionKind::Center => &self.center,
            PartitionKind::Right => &self.right,
        }
    }

    /// Left, center, right concatenated.
    pub fn iter(&self) -> impl Iterator<Item = (PartitionKind, &str)> {
        PartitionKind::ALL
            .into_iter()
            .flat_map(move |kind| self.get(kind).iter().map(move |id| (kind, id.as_str())))
    }

    pub fn len(&self) -> usize {
        self.left.len() + self.center.len() + self.right.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn contains(&self, id: &str) -> bool {
        self.iter().any(|(_, column_id)| column_id == id)
    }
}

pub fn partition_columns<R>(columns: &[Column<R>]) -> ColumnPartition {
    let mut partition = ColumnPartition::default();

    for column in columns.iter().filter(|c| c.visible) {
        let target = match PartitionKind::of(column) {
            PartitionKind::Left => &mut partition.left,
            PartitionKind::Center => &mut partition.center,
            PartitionKind::Right => &mut partition.right,
        };
        target.push(column.id.clone());
    }

    partition
}

/// Partition in an explicit id order (a reorder preview) instead of registry
/// order. Ids unknown to the registry are skipped.
pub fn partition_by_order<R>(registry: &ColumnRegistry<R>, order: &[String]) -> ColumnPartition {
    let mut partition = ColumnPartition::default();

    for column in order.iter().filter_map(|id| registry.column(id)) {
        if !column.visible {
            continue;
        }
        let target = match PartitionKind::of(column) {
            PartitionKind::Left => &mut partition.left,
            PartitionKind::Center => &mut partition.center,
            PartitionKind::Right => &mut partition.right,
        };
        target.push(column.id.clone());
    }

    partition
}

/// Recomputes the partition only when the registry's column list changed.
#[derive(Debug, Default)]
pub struct PartitionCache {
    revision: Option<u64>,
    partition: ColumnPartition,
}

impl PartitionCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get<R>(&mut self, registry: &ColumnRegistry<R>) -> &ColumnPartition {
        if self.revision != Some(registry.revision()) {
            self.partition = partition_columns(registry.columns());
            self.revision = Some(registry.revision());
            log::trace!(
                "[PARTITION] Recomputed: {} left, {} center, {} right",
                self.partition.left.len(),
                self.partition.center.len(),
                self.partition.right.len()
            );
        }

        &self.partition
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    type Row = serde_json::Value;

    fn strings(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn classifies_by_pinned_and_keeps_registry_order() {
        let columns: Vec<Column<Row>> = vec![
            Column::new("a", "A"),
            Column::new("b", "B").pinned(Pinned::Right),
            Column::new("c", "C").pinned(Pinned::Left),
            Column::new("d", "D"),
            Column::new("e", "E").pinned(Pinned::Left),
        ];

        let partition = partition_columns(&columns);

        assert_eq!(partition.left, strings(&["c", "e"]));
        assert_eq!(partition.center, strings(&["a", "d"]));
        assert_eq!(partition.right, strings(&["b"]));
    }

    #[test]
    fn hidden_columns_are_excluded() {
        let columns: Vec<Column<Row>> = vec![
            Column::new("a", "A").hidden(),
            Column::new("b", "B").pinned(Pinned::Left).hidden(),
            Column::new("c", "C"),
        ];

        let partition = partition_columns(&columns);

        assert!(partition.left.is_empty());
        assert_eq!(partition.center, strings(&["c"]));
        assert!(!partition.contains("a"));
    }

    #[test]
    fn empty_column_list_gives_empty_partitions() {
        let partition = partition_columns::<Row>(&[]);
        assert!(partition.is_empty());
    }

    #[test]
    fn iter_walks_left_center_right() {
        let columns: Vec<Column<Row>> = vec![
            Column::new("r", "R").pinned(Pinned::Right),
            Column::new("c", "C"),
            Column::new("l", "L").pinned(Pinned::Left),
        ];

        let partition = partition_columns(&columns);
        let order: Vec<&str> = partition.iter().map(|(_, id)| id).collect();

        assert_eq!(order, vec!["l", "c", "r"]);
    }

    #[test]
    fn explicit_order_overrides_registry_order() {
        let registry = ColumnRegistry::<Row>::new(vec![
            Column::new("a", "A"),
            Column::new("b", "B").pinned(Pinned::Left),
            Column::new("c", "C"),
            Column::new("d", "D").hidden(),
        ])
        .unwrap();

        let partition = partition_by_order(&registry, &strings(&["c", "d", "b", "a", "zzz"]));

        assert_eq!(partition.left, strings(&["b"]));
        assert_eq!(partition.center, strings(&["c", "a"]));
    }

    #[test]
    fn cache_follows_registry_revision() {
        let mut registry = ColumnRegistry::<Row>::new(vec![
            Column::new("a", "A"),
            Column::new("b", "B"),
        ])
        .unwrap();
        let mut cache = PartitionCache::new();

        assert_eq!(cache.get(&registry).center, strings(&["a", "b"]));

        registry.apply_order(&strings(&["b", "a"])).unwrap();
        assert_eq!(cache.get(&registry).center, strings(&["b", "a"]));

        registry.set_visible("a", false);
        assert_eq!(cache.get(&registry).center, strings(&["b"]));
    }
}

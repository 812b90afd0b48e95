use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::data::Record;

/// Categorical dimensions a record can be grouped by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    State,
    Region,
    OilType,
    Year,
}

/// Value of a [`Field`]. Text keys order lexicographically, years numerically.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(untagged)]
pub enum GroupKey {
    Year(i32),
    Text(String),
}

impl fmt::Display for GroupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GroupKey::Year(y) => write!(f, "{}", y),
            GroupKey::Text(s) => f.write_str(s),
        }
    }
}

/// One partition of an aggregation and its summed production.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Group {
    pub key: GroupKey,
    pub value: f64,
}

/// Result of a one-key aggregation, sorted ascending by key.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Grouped {
    pub groups: Vec<Group>,
}

impl Grouped {
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn keys(&self) -> Vec<String> {
        self.groups.iter().map(|g| g.key.to_string()).collect()
    }

    pub fn values(&self) -> Vec<f64> {
        self.groups.iter().map(|g| g.value).collect()
    }

    /// Largest summed value, or 0 when there are no groups.
    pub fn max_value(&self) -> f64 {
        self.groups.iter().map(|g| g.value).fold(0.0, f64::max)
    }
}

/// One cell of a two-key aggregation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Group2d {
    pub outer: GroupKey,
    pub inner: GroupKey,
    pub value: f64,
}

/// Result of a two-key aggregation, sorted by (outer, inner).
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Grouped2d {
    pub groups: Vec<Group2d>,
}

impl Grouped2d {
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Distinct outer keys in ascending order.
    pub fn outer_keys(&self) -> Vec<GroupKey> {
        let mut keys: Vec<GroupKey> = Vec::new();
        for g in &self.groups {
            if keys.last() != Some(&g.outer) {
                keys.push(g.outer.clone());
            }
        }
        keys
    }

    /// Distinct inner keys in order of first appearance.
    pub fn inner_keys(&self) -> Vec<GroupKey> {
        let mut keys: Vec<GroupKey> = Vec::new();
        for g in &self.groups {
            if !keys.contains(&g.inner) {
                keys.push(g.inner.clone());
            }
        }
        keys
    }

    /// Summed value for a cell; 0 when the combination never occurs.
    pub fn get(&self, outer: &GroupKey, inner: &GroupKey) -> f64 {
        self.groups
            .iter()
            .find(|g| &g.outer == outer && &g.inner == inner)
            .map_or(0.0, |g| g.value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Order {
    Ascending,
    Descending,
}

/// Partition records by a field and sum production per partition.
pub fn group_sum<'a, I>(records: I, by: Field) -> Grouped
where
    I: IntoIterator<Item = &'a Record>,
{
    let mut sums: BTreeMap<GroupKey, f64> = BTreeMap::new();
    for record in records {
        *sums.entry(record.key(by)).or_insert(0.0) += record.production;
    }

    Grouped {
        groups: sums
            .into_iter()
            .map(|(key, value)| Group { key, value })
            .collect(),
    }
}

/// Partition records by a pair of fields and sum production per pair.
pub fn group_sum_2d<'a, I>(records: I, by: (Field, Field)) -> Grouped2d
where
    I: IntoIterator<Item = &'a Record>,
{
    let mut sums: BTreeMap<(GroupKey, GroupKey), f64> = BTreeMap::new();
    for record in records {
        *sums
            .entry((record.key(by.0), record.key(by.1)))
            .or_insert(0.0) += record.production;
    }

    Grouped2d {
        groups: sums
            .into_iter()
            .map(|((outer, inner), value)| Group2d { outer, inner, value })
            .collect(),
    }
}

/// Rank groups by value and keep the first `n`. The sort is stable, so equal
/// values keep their key order.
pub fn top_n(result: &Grouped, n: usize, order: Order) -> Vec<Group> {
    let mut groups = result.groups.clone();
    match order {
        Order::Descending => groups.sort_by(|a, b| b.value.total_cmp(&a.value)),
        Order::Ascending => groups.sort_by(|a, b| a.value.total_cmp(&b.value)),
    }
    groups.truncate(n);
    groups
}

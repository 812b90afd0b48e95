use serde::{Deserialize, Serialize};

use crate::data::{Dataset, Record};

/// Equality predicates submitted with a request. `None` means "no filter".
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Filter {
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub region: Option<String>,
}

impl Filter {
    pub fn new(state: Option<&str>, region: Option<&str>) -> Self {
        Self {
            state: state.map(str::to_string),
            region: region.map(str::to_string),
        }
    }

    /// Empty or whitespace-only selections (an "All" option in a form) become `None`.
    pub fn normalized(self) -> Self {
        let keep = |v: Option<String>| v.filter(|s| !s.trim().is_empty());
        Self {
            state: keep(self.state),
            region: keep(self.region),
        }
    }

    pub fn matches(&self, record: &Record) -> bool {
        let state_ok = match self.state.as_deref() {
            Some(s) if !s.is_empty() => record.state == s,
            _ => true,
        };
        let region_ok = match self.region.as_deref() {
            Some(r) if !r.is_empty() => record.region == r,
            _ => true,
        };
        state_ok && region_ok
    }

    pub fn is_empty(&self) -> bool {
        self.state.as_deref().map_or(true, str::is_empty)
            && self.region.as_deref().map_or(true, str::is_empty)
    }
}

/// A per-request subset of a dataset. Borrows the records, so it cannot
/// outlive the dataset or alter it.
#[derive(Debug, Clone)]
pub struct FilteredView<'a> {
    records: Vec<&'a Record>,
}

impl<'a> FilteredView<'a> {
    /// The whole dataset as a view.
    pub fn all(dataset: &'a Dataset) -> Self {
        Self {
            records: dataset.records().iter().collect(),
        }
    }

    pub fn records(&self) -> &[&'a Record] {
        &self.records
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a Record> + '_ {
        self.records.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Narrow the dataset by exact, case-sensitive equality on state and/or region.
/// An unknown value simply yields an empty view.
pub fn filter<'a>(dataset: &'a Dataset, state: Option<&str>, region: Option<&str>) -> FilteredView<'a> {
    apply(dataset, &Filter::new(state, region))
}

pub fn apply<'a>(dataset: &'a Dataset, filter: &Filter) -> FilteredView<'a> {
    if filter.is_empty() {
        return FilteredView::all(dataset);
    }
    FilteredView {
        records: dataset.records().iter().filter(|r| filter.matches(r)).collect(),
    }
}

use serde::Serialize;
use std::collections::HashSet;

use crate::aggregate::Field;
use crate::filter::FilteredView;
use crate::format::format_indian;

/// Unit appended to displayed production figures.
pub const UNIT: &str = "KL";

/// Ceiling of the summed production. An empty view totals 0.
pub fn total_production(view: &FilteredView) -> u64 {
    let sum: f64 = view.iter().map(|r| r.production).sum();
    ceil_to_u64(sum)
}

/// Ceiling of the mean production. The mean of an empty view is reported as 0.
pub fn avg_production(view: &FilteredView) -> u64 {
    if view.is_empty() {
        return 0;
    }
    let sum: f64 = view.iter().map(|r| r.production).sum();
    ceil_to_u64(sum / view.len() as f64)
}

/// Number of unique values of `field` within the view.
pub fn distinct_count(view: &FilteredView, field: Field) -> usize {
    view.iter().map(|r| r.key(field)).collect::<HashSet<_>>().len()
}

fn ceil_to_u64(v: f64) -> u64 {
    if v.is_finite() && v > 0.0 {
        v.ceil() as u64
    } else {
        0
    }
}

/// Scalar figures shown in the dashboard's metric cards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub total_production: u64,
    pub avg_production: u64,
    pub state_count: usize,
    pub region_count: usize,
}

impl Summary {
    pub fn compute(view: &FilteredView) -> Self {
        Self {
            total_production: total_production(view),
            avg_production: avg_production(view),
            state_count: distinct_count(view, Field::State),
            region_count: distinct_count(view, Field::Region),
        }
    }

    pub fn total_display(&self) -> String {
        format!("{} {}", format_indian(self.total_production), UNIT)
    }

    pub fn avg_display(&self) -> String {
        format!("{} {}", format_indian(self.avg_production), UNIT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{Dataset, Record};
    use crate::filter::filter;

    #[test]
    fn test_total_and_avg_round_up() {
        let ds = Dataset::from_records(vec![
            Record::new("A", "R", "Crude", 2019, 100.2),
            Record::new("A", "R", "Crude", 2020, 200.7),
        ]);
        let view = filter(&ds, None, None);
        assert_eq!(total_production(&view), 301);
        assert_eq!(avg_production(&view), 151);
    }

    #[test]
    fn test_empty_view_is_zero() {
        let ds = Dataset::default();
        let view = filter(&ds, None, None);
        assert_eq!(total_production(&view), 0);
        assert_eq!(avg_production(&view), 0);
        assert_eq!(distinct_count(&view, Field::State), 0);
    }

    #[test]
    fn test_distinct_count() {
        let ds = Dataset::from_records(vec![
            Record::new("A", "R1", "Crude", 2019, 1.0),
            Record::new("A", "R1", "Crude", 2020, 1.0),
            Record::new("B", "R2", "Crude", 2019, 1.0),
        ]);
        let view = filter(&ds, None, None);
        assert_eq!(distinct_count(&view, Field::State), 2);
        assert_eq!(distinct_count(&view, Field::Year), 2);
    }

    #[test]
    fn test_summary_display() {
        let ds = Dataset::from_records(vec![Record::new("A", "R", "Crude", 2019, 1234566.1)]);
        let summary = Summary::compute(&filter(&ds, None, None));
        assert_eq!(summary.total_display(), "12,34,567 KL");
        assert_eq!(summary.avg_display(), "12,34,567 KL");
        assert_eq!(summary.state_count, 1);
        assert_eq!(summary.region_count, 1);
    }
}

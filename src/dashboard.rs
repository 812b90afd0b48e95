use std::sync::Arc;

use log::{debug, info};
use serde::Serialize;

use crate::aggregate::Field;
use crate::charts::DashboardCharts;
use crate::data::Dataset;
use crate::filter::{self, Filter};
use crate::metrics::Summary;

/// Request handling over a shared, read-only dataset.
#[derive(Debug, Clone)]
pub struct Dashboard {
    dataset: Arc<Dataset>,
    states: Vec<String>,
    regions: Vec<String>,
}

/// Everything one dashboard response shows.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardView {
    pub total_production: String,
    pub avg_production: String,
    pub state_count: usize,
    pub region_count: usize,
    pub selected_state: Option<String>,
    pub selected_region: Option<String>,
    pub states: Vec<String>,
    pub regions: Vec<String>,
    pub summary: Summary,
    pub charts: DashboardCharts,
}

impl Dashboard {
    pub fn new(dataset: Arc<Dataset>) -> Self {
        let states = dataset.distinct(Field::State);
        let regions = dataset.distinct(Field::Region);
        info!(
            "Dashboard ready: {} records, {} states, {} regions",
            dataset.len(),
            states.len(),
            regions.len()
        );
        Self { dataset, states, regions }
    }

    /// Metric cards follow the filter; charts always cover the full dataset.
    pub fn render(&self, filter: &Filter) -> DashboardView {
        let filter = filter.clone().normalized();
        let view = filter::apply(&self.dataset, &filter);
        debug!(
            "Filter state={:?} region={:?} matched {} of {} records",
            filter.state,
            filter.region,
            view.len(),
            self.dataset.len()
        );

        let summary = Summary::compute(&view);
        let charts = DashboardCharts::build(&self.dataset);

        DashboardView {
            total_production: summary.total_display(),
            avg_production: summary.avg_display(),
            state_count: summary.state_count,
            region_count: summary.region_count,
            selected_state: filter.state,
            selected_region: filter.region,
            states: self.states.clone(),
            regions: self.regions.clone(),
            summary,
            charts,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Record;
    use pretty_assertions::assert_eq;

    fn make_dashboard() -> Dashboard {
        Dashboard::new(Arc::new(Dataset::from_records(vec![
            Record::new("A", "North", "Crude", 2019, 1000.0),
            Record::new("A", "North", "Crude", 2020, 2000.0),
            Record::new("B", "South", "Crude", 2019, 500.0),
        ])))
    }

    #[test]
    fn test_render_filtered_state() {
        let dash = make_dashboard();
        let view = dash.render(&Filter::new(Some("A"), None));
        assert_eq!(view.total_production, "3,000 KL");
        assert_eq!(view.avg_production, "1,500 KL");
        assert_eq!(view.state_count, 1);
        assert_eq!(view.region_count, 1);
        assert_eq!(view.selected_state.as_deref(), Some("A"));
    }

    #[test]
    fn test_render_unfiltered() {
        let view = make_dashboard().render(&Filter::default());
        assert_eq!(view.total_production, "3,500 KL");
        assert_eq!(view.avg_production, "1,167 KL");
        assert_eq!(view.state_count, 2);
        assert_eq!(view.region_count, 2);
        assert_eq!(view.states, vec!["A", "B"]);
        assert_eq!(view.regions, vec!["North", "South"]);
    }

    #[test]
    fn test_charts_ignore_filter() {
        let dash = make_dashboard();
        let filtered = dash.render(&Filter::new(Some("B"), Some("South")));
        let full = dash.render(&Filter::default());
        assert_eq!(filtered.charts, full.charts);
    }

    #[test]
    fn test_blank_selection_is_all() {
        let view = make_dashboard().render(&Filter::new(Some(""), Some("  ")));
        assert_eq!(view.selected_state, None);
        assert_eq!(view.total_production, "3,500 KL");
    }

    #[test]
    fn test_no_match_renders_zeros() {
        let view = make_dashboard().render(&Filter::new(Some("A"), Some("South")));
        assert_eq!(view.total_production, "0 KL");
        assert_eq!(view.avg_production, "0 KL");
        assert_eq!(view.state_count, 0);
        assert!(!view.charts.top_states.is_empty());
    }
}

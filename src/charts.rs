//! The six dashboard charts.
//!
//! Every renderer is a pure function of the full dataset. Filters chosen on
//! the dashboard narrow the metric cards only; the charts always describe all
//! records.

use log::debug;
use serde::Serialize;

use crate::aggregate::{group_sum, group_sum_2d, top_n, Field, Group, GroupKey, Order};
use crate::data::Dataset;
use crate::format::format_decimal;
use crate::ir::{
    Anchor, Annotation, AreaTrace, Axis, BarMode, BarTrace, ChartKind, ChartSpec, ColorScale, Dash,
    Font, Layout, Legend, LineShape, LineStyle, Margin, PieTrace, RenderMode, TextPosition, Title,
    Trace,
};
use crate::palette::{
    self, ColorPalette, SequentialScale, OIL_TYPE_COLORS, REGION_COLORS, STACKED_COLORS,
};

/// Number of states shown in each ranking chart.
pub const RANKING_SIZE: usize = 5;

/// Lower bound of the yearly chart's y axis.
pub const YEARLY_Y_FLOOR: f64 = 30000.0;
/// Headroom added above the largest yearly total.
pub const YEARLY_Y_HEADROOM: f64 = 50000.0;

/// All dashboard charts, in page order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardCharts {
    pub top_states: ChartSpec,
    pub bottom_states: ChartSpec,
    pub oil_type_share: ChartSpec,
    pub region_share: ChartSpec,
    pub yearly_trend: ChartSpec,
    pub yearly_by_oil_type: ChartSpec,
}

impl DashboardCharts {
    pub fn build(dataset: &Dataset) -> Self {
        let charts = Self {
            top_states: top_states_bar(dataset),
            bottom_states: bottom_states_bar(dataset),
            oil_type_share: oil_type_donut(dataset),
            region_share: region_donut(dataset),
            yearly_trend: yearly_area(dataset),
            yearly_by_oil_type: yearly_oil_type_stacked(dataset),
        };
        debug!("Built {} charts from {} records", charts.all().len(), dataset.len());
        charts
    }

    pub fn all(&self) -> [&ChartSpec; 6] {
        [
            &self.top_states,
            &self.bottom_states,
            &self.oil_type_share,
            &self.region_share,
            &self.yearly_trend,
            &self.yearly_by_oil_type,
        ]
    }
}

/// Best performing states: five largest totals, blue by magnitude.
///
/// Left unsized, so the page autosizes it and static exports use the
/// render options (700x450 by default).
pub fn top_states_bar(dataset: &Dataset) -> ChartSpec {
    let totals = group_sum(dataset.records(), Field::State);
    let ranked = top_n(&totals, RANKING_SIZE, Order::Descending);
    ranking_bar(
        "top_states",
        "Best Performing States",
        &ranked,
        SequentialScale::BLUES,
    )
}

/// Least performing states: five smallest totals, red by magnitude.
pub fn bottom_states_bar(dataset: &Dataset) -> ChartSpec {
    let totals = group_sum(dataset.records(), Field::State);
    let ranked = top_n(&totals, RANKING_SIZE, Order::Ascending);
    let mut spec = ranking_bar(
        "bottom_states",
        "Least Performing States",
        &ranked,
        SequentialScale::REDS,
    );
    spec.layout.width = Some(880);
    spec.layout.height = Some(450);
    spec
}

fn ranking_bar(id: &str, title: &str, ranked: &[Group], scale: SequentialScale) -> ChartSpec {
    let x: Vec<String> = ranked.iter().map(|g| g.key.to_string()).collect();
    let y: Vec<f64> = ranked.iter().map(|g| g.value).collect();
    let text = y.iter().map(|v| format_decimal(*v, 2)).collect();

    let trace = BarTrace {
        name: None,
        colors: scale.colors_for(&y),
        color_scale: Some(ColorScale {
            name: scale.name.to_string(),
            stops: scale.plotly_stops(),
        }),
        x,
        y,
        text,
        text_position: Some(TextPosition::Outside),
        outline: None,
        hover_template: None,
    };

    ChartSpec {
        id: id.to_string(),
        kind: ChartKind::Bar,
        mode: RenderMode::Static,
        traces: vec![Trace::Bar(trace)],
        layout: Layout {
            title: title_at(title, 0.5, Some(0.95)),
            x_axis: Axis {
                title: Some("State".to_string()),
                ..Axis::default()
            },
            y_axis: Axis {
                title: Some("Total Production (KL)".to_string()),
                ..Axis::default()
            },
            plot_background: palette::WHITE.to_string(),
            paper_background: palette::WHITE.to_string(),
            ..base_layout(title)
        },
    }
}

/// Share of total production per oil type.
pub fn oil_type_donut(dataset: &Dataset) -> ChartSpec {
    let totals = group_sum(dataset.records(), Field::OilType);
    let colors = ColorPalette::new(&OIL_TYPE_COLORS).take(totals.len());

    let trace = PieTrace {
        labels: totals.keys(),
        values: totals.values(),
        colors,
        hole: 0.45,
        pull: 0.05,
        text_info: "percent+label".to_string(),
        text_font: Font::new(13.0, palette::WHITE).family("Arial Black"),
        rotation: 90.0,
        outline: LineStyle::solid("rgba(255,255,255,0.8)", 2.0),
        hover_template: Some(
            "<b>%{label}</b><br>Production: %{value:,.0f}<br>Percentage: %{percent}<br><extra></extra>"
                .to_string(),
        ),
    };

    let title = "Total Production by Oil Type";
    ChartSpec {
        id: "oil_type_share".to_string(),
        kind: ChartKind::Donut,
        mode: RenderMode::Interactive,
        traces: vec![Trace::Pie(trace)],
        layout: Layout {
            title: title_at(title, 0.42, Some(0.95)),
            width: Some(530),
            height: Some(560),
            legend: Legend {
                show: true,
                title: None,
                x: Some(1.02),
                y: Some(0.86),
                x_anchor: Some(Anchor::Left),
                y_anchor: Some(Anchor::Middle),
                vertical: true,
                font: Some(Font::new(8.0, "#34495E")),
                background: Some("rgba(255,255,255,0.8)".to_string()),
                border: Some(LineStyle::solid("#BDC3C7", 1.0)),
            },
            annotations: vec![Annotation {
                text: "Oil Production\nAnalysis".to_string(),
                x: 0.5,
                y: 0.5,
                font: Font::new(16.0, palette::MUTED_COLOR).family("Arial"),
                bold: true,
            }],
            margin: Some(Margin { left: 33, right: 130, top: 15, bottom: 75 }),
            ..base_layout(title)
        },
    }
}

/// Share of total production per region.
pub fn region_donut(dataset: &Dataset) -> ChartSpec {
    let totals = group_sum(dataset.records(), Field::Region);
    let colors = ColorPalette::new(&REGION_COLORS).take(totals.len());

    let trace = PieTrace {
        labels: totals.keys(),
        values: totals.values(),
        colors,
        hole: 0.4,
        pull: 0.02,
        text_info: "percent+label".to_string(),
        text_font: Font::new(11.0, palette::WHITE).family("Segoe UI"),
        rotation: 0.0,
        outline: LineStyle::solid(palette::WHITE, 3.0),
        hover_template: None,
    };

    let title = "Region Wise Production";
    ChartSpec {
        id: "region_share".to_string(),
        kind: ChartKind::Donut,
        mode: RenderMode::Interactive,
        traces: vec![Trace::Pie(trace)],
        layout: Layout {
            title: title_at(title, 0.45, Some(0.95)),
            width: Some(530),
            height: Some(560),
            margin: Some(Margin { left: 50, right: 120, top: 20, bottom: 120 }),
            paper_background: "rgba(225,225,225,0)".to_string(),
            ..base_layout(title)
        },
    }
}

/// Total production per year as a smoothed, filled area.
pub fn yearly_area(dataset: &Dataset) -> ChartSpec {
    let totals = group_sum(dataset.records(), Field::Year);
    let x: Vec<f64> = totals
        .groups
        .iter()
        .filter_map(|g| match g.key {
            GroupKey::Year(y) => Some(y as f64),
            GroupKey::Text(_) => None,
        })
        .collect();
    let y_max = totals.max_value();

    let trace = AreaTrace {
        name: None,
        x,
        y: totals.values(),
        color: palette::TEAL.to_string(),
        shape: LineShape::Spline,
        fill_to_zero: true,
    };

    let title = "Year Wise Production Total by Oil Type";
    ChartSpec {
        id: "yearly_trend".to_string(),
        kind: ChartKind::Area,
        mode: RenderMode::Interactive,
        traces: vec![Trace::Area(trace)],
        layout: Layout {
            title: title_at(title, 0.5, None),
            width: Some(800),
            height: Some(390),
            x_axis: Axis {
                title: Some("Year".to_string()),
                ..Axis::default()
            },
            y_axis: Axis {
                title: Some("Production (KL)".to_string()),
                range: Some((YEARLY_Y_FLOOR, y_max + YEARLY_Y_HEADROOM)),
                grid: Some(LineStyle {
                    color: "#d3d3d3".to_string(),
                    width: 1.0,
                    dash: Some(Dash::Dot),
                }),
                zero_line: false,
                ..Axis::default()
            },
            margin: Some(Margin { left: 80, right: 150, top: 75, bottom: 69 }),
            plot_background: palette::WHITE.to_string(),
            paper_background: palette::WHITE.to_string(),
            hover_mode: Some("x unified".to_string()),
            ..base_layout(title)
        },
    }
}

/// Yearly production stacked by oil type, one series per oil type.
pub fn yearly_oil_type_stacked(dataset: &Dataset) -> ChartSpec {
    let grouped = group_sum_2d(dataset.records(), (Field::Year, Field::OilType));
    let years = grouped.outer_keys();
    let oil_types = grouped.inner_keys();
    let series_colors = ColorPalette::new(&STACKED_COLORS);
    let outline = LineStyle::solid("rgba(255,255,255,0.8)", 0.5);

    let traces = oil_types
        .iter()
        .enumerate()
        .map(|(i, oil_type)| {
            let y: Vec<f64> = years.iter().map(|year| grouped.get(year, oil_type)).collect();
            Trace::Bar(BarTrace {
                name: Some(oil_type.to_string()),
                x: years.iter().map(|y| y.to_string()).collect(),
                colors: vec![series_colors.color(i); y.len()],
                y,
                color_scale: None,
                text: Vec::new(),
                text_position: None,
                outline: Some(outline.clone()),
                hover_template: Some(
                    "<b>%{fullData.name}</b><br>Year: %{x}<br>Production: %{y:,.0f} KL<br><extra></extra>"
                        .to_string(),
                ),
            })
        })
        .collect();

    let axis_line = LineStyle::solid(palette::BORDER_COLOR, 1.0);
    let title = "Production Trends Over Years";
    ChartSpec {
        id: "yearly_by_oil_type".to_string(),
        kind: ChartKind::StackedBar,
        mode: RenderMode::Interactive,
        traces,
        layout: Layout {
            title: title_at(title, 0.45, Some(0.95)),
            width: Some(780),
            height: Some(410),
            x_axis: Axis {
                title: Some("Year".to_string()),
                line: Some(axis_line.clone()),
                ..Axis::default()
            },
            y_axis: Axis {
                title: Some("Production Volume (KL)".to_string()),
                tick_format: Some(",.0f".to_string()),
                grid: Some(LineStyle::solid("#ecf0f1", 1.0)),
                zero_line: false,
                line: Some(axis_line),
                ..Axis::default()
            },
            legend: Legend {
                show: true,
                title: Some("Oil Type".to_string()),
                x: Some(1.0),
                y: Some(1.3),
                x_anchor: Some(Anchor::Right),
                y_anchor: None,
                vertical: true,
                font: Some(Font::new(8.0, palette::TEXT_COLOR)),
                background: Some("rgba(255,255,255,0.8)".to_string()),
                border: Some(LineStyle::solid(palette::BORDER_COLOR, 1.0)),
            },
            margin: Some(Margin { left: 80, right: 150, top: 75, bottom: 85 }),
            plot_background: "rgba(255,255,255,0)".to_string(),
            paper_background: "rgba(255,255,255,0)".to_string(),
            bar_mode: Some(BarMode::Stack),
            ..base_layout(title)
        },
    }
}

fn title_at(text: &str, x: f64, y: Option<f64>) -> Title {
    Title {
        text: text.to_string(),
        x,
        y,
        x_anchor: Anchor::Center,
        font: Font::new(18.0, palette::TITLE_COLOR),
    }
}

fn base_layout(title: &str) -> Layout {
    Layout {
        title: title_at(title, 0.5, None),
        width: None,
        height: None,
        x_axis: Axis::default(),
        y_axis: Axis::default(),
        legend: Legend::hidden(),
        annotations: Vec::new(),
        margin: None,
        plot_background: palette::TRANSPARENT.to_string(),
        paper_background: palette::TRANSPARENT.to_string(),
        bar_mode: None,
        hover_mode: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Record;

    fn make_dataset() -> Dataset {
        let mut records = Vec::new();
        for (i, state) in ["A", "B", "C", "D", "E", "F", "G"].iter().enumerate() {
            let region = if i % 2 == 0 { "North" } else { "South" };
            records.push(Record::new(state, region, "Crude", 2019, 1000.0 * (i + 1) as f64));
            records.push(Record::new(state, region, "Condensate", 2020, 500.0));
        }
        Dataset::from_records(records)
    }

    fn bar(spec: &ChartSpec) -> &BarTrace {
        match &spec.traces[0] {
            Trace::Bar(b) => b,
            other => panic!("expected bar trace, got {:?}", other),
        }
    }

    fn pie(spec: &ChartSpec) -> &PieTrace {
        match &spec.traces[0] {
            Trace::Pie(p) => p,
            other => panic!("expected pie trace, got {:?}", other),
        }
    }

    #[test]
    fn test_top_states_bar() {
        let spec = top_states_bar(&make_dataset());
        let trace = bar(&spec);
        assert_eq!(trace.x, vec!["G", "F", "E", "D", "C"]);
        assert_eq!(trace.y[0], 7500.0);
        assert_eq!(trace.text[0], "7500");
        assert_eq!(trace.colors[0], "rgb(8,48,107)");
        assert_eq!(spec.mode, RenderMode::Static);
        assert_eq!(trace.text_position, Some(TextPosition::Outside));
        assert_eq!(spec.layout.title.text, "Best Performing States");
        assert_eq!((spec.width(), spec.height()), (None, None));
    }

    #[test]
    fn test_bottom_states_bar() {
        let spec = bottom_states_bar(&make_dataset());
        let trace = bar(&spec);
        assert_eq!(trace.x, vec!["A", "B", "C", "D", "E"]);
        assert!(trace.y.windows(2).all(|w| w[0] <= w[1]));
        assert_eq!(trace.color_scale.as_ref().unwrap().name, "Reds");
        assert_eq!((spec.width(), spec.height()), (Some(880), Some(450)));
    }

    #[test]
    fn test_oil_type_donut() {
        let spec = oil_type_donut(&make_dataset());
        let trace = pie(&spec);
        assert_eq!(trace.labels, vec!["Condensate", "Crude"]);
        assert_eq!(trace.colors, vec!["#08306b", "#a9cfe5"]);
        assert_eq!(trace.hole, 0.45);
        assert_eq!(trace.pull, 0.05);
        assert_eq!(trace.rotation, 90.0);
        assert_eq!(trace.text_info, "percent+label");
        assert_eq!(trace.text_font.size, 13.0);
        assert!(spec.layout.legend.show);
        assert_eq!(spec.layout.legend.x, Some(1.02));
        assert_eq!(spec.layout.legend.x_anchor, Some(Anchor::Left));
        assert_eq!(spec.layout.annotations.len(), 1);
        assert_eq!(spec.layout.annotations[0].text, "Oil Production\nAnalysis");
        assert!(spec.layout.annotations[0].bold);
        assert_eq!((spec.width(), spec.height()), (Some(530), Some(560)));
    }

    #[test]
    fn test_donut_palettes_cycle() {
        let records = (0..12)
            .map(|i| {
                let name = format!("T{:02}", i);
                Record::new("A", &name, &name, 2019, 100.0)
            })
            .collect();
        let ds = Dataset::from_records(records);

        let oil = oil_type_donut(&ds);
        let colors = &pie(&oil).colors;
        assert_eq!(colors.len(), 12);
        assert_eq!(colors[10], OIL_TYPE_COLORS[0]);
        assert_eq!(colors[11], OIL_TYPE_COLORS[1]);

        let region = region_donut(&ds);
        let colors = &pie(&region).colors;
        assert_eq!(colors.len(), 12);
        assert_eq!(colors[6], REGION_COLORS[0]);
        assert_eq!(colors[11], REGION_COLORS[5]);
    }

    #[test]
    fn test_region_donut() {
        let spec = region_donut(&make_dataset());
        let trace = pie(&spec);
        assert_eq!(trace.labels, vec!["North", "South"]);
        assert_eq!(trace.colors, vec![REGION_COLORS[0], REGION_COLORS[1]]);
        assert_eq!(trace.text_font.size, 11.0);
        assert_eq!(trace.text_font.color, palette::WHITE);
        assert_eq!(trace.hole, 0.4);
        assert_eq!(trace.pull, 0.02);
        assert_eq!((spec.width(), spec.height()), (Some(530), Some(560)));
        assert!(!spec.layout.legend.show);
        let total: f64 = trace.fractions().iter().sum();
        assert!((total - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_yearly_area_range() {
        let spec = yearly_area(&make_dataset());
        match &spec.traces[0] {
            Trace::Area(a) => {
                assert_eq!(a.x, vec![2019.0, 2020.0]);
                assert_eq!(a.y, vec![28000.0, 3500.0]);
                assert_eq!(a.shape, LineShape::Spline);
                assert_eq!(a.color, "#008080");
                assert!(a.fill_to_zero);
            }
            other => panic!("expected area trace, got {:?}", other),
        }
        assert_eq!(spec.layout.y_axis.range, Some((30000.0, 78000.0)));
        assert!(!spec.layout.y_axis.zero_line);
        assert_eq!(spec.layout.y_axis.grid.as_ref().and_then(|g| g.dash), Some(Dash::Dot));
        assert_eq!(spec.layout.hover_mode.as_deref(), Some("x unified"));
        assert_eq!((spec.width(), spec.height()), (Some(800), Some(390)));
    }

    #[test]
    fn test_stacked_series_per_oil_type() {
        let spec = yearly_oil_type_stacked(&make_dataset());
        assert_eq!(spec.traces.len(), 2);
        assert_eq!(spec.layout.bar_mode, Some(BarMode::Stack));
        assert_eq!(spec.layout.y_axis.tick_format.as_deref(), Some(",.0f"));
        assert_eq!((spec.width(), spec.height()), (Some(780), Some(410)));
        let legend = &spec.layout.legend;
        assert!(legend.show);
        assert_eq!(legend.title.as_deref(), Some("Oil Type"));
        assert_eq!((legend.x, legend.y), (Some(1.0), Some(1.3)));
        assert_eq!(legend.x_anchor, Some(Anchor::Right));
        let first = bar(&spec);
        assert_eq!(first.name.as_deref(), Some("Crude"));
        assert_eq!(first.x, vec!["2019", "2020"]);
        assert_eq!(first.y, vec![28000.0, 0.0]);
        assert_eq!(first.colors[0], STACKED_COLORS[0]);
    }

    #[test]
    fn test_empty_dataset_degenerate_charts() {
        let charts = DashboardCharts::build(&Dataset::default());
        assert!(charts.all().iter().all(|c| c.is_empty()));
        assert_eq!(charts.yearly_trend.layout.y_axis.range, Some((30000.0, 50000.0)));
        assert!(charts.yearly_by_oil_type.traces.is_empty());
    }
}

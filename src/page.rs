//! HTML rendering of a [`DashboardView`].

use maud::{html, Markup, PreEscaped, DOCTYPE};

use crate::dashboard::DashboardView;
use crate::ir::ChartSpec;
use crate::plotly::{self, PLOTLY_CDN};

const STYLE: &str = r#"
body { font-family: "Segoe UI", Arial, sans-serif; background: #f4f6f8; color: #2c3e50; margin: 0; }
header { background: #0d3b66; color: #fff; padding: 16px 24px; }
header h1 { margin: 0; font-size: 24px; }
form.filters { display: flex; gap: 16px; align-items: end; padding: 16px 24px; }
form.filters label { display: flex; flex-direction: column; font-size: 13px; gap: 4px; }
.cards { display: grid; grid-template-columns: repeat(4, 1fr); gap: 16px; padding: 0 24px; }
.card { background: #fff; border-radius: 8px; padding: 16px; box-shadow: 0 1px 3px rgba(0,0,0,.12); }
.card .label { font-size: 13px; color: #7f8c8d; }
.card .value { font-size: 22px; font-weight: 600; margin-top: 6px; }
.charts { display: grid; grid-template-columns: repeat(2, 1fr); gap: 16px; padding: 24px; }
.chart { background: #fff; border-radius: 8px; padding: 8px; overflow: hidden; }
"#;

pub fn render_page(view: &DashboardView) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { "Oil Production Dashboard" }
                script src=(PLOTLY_CDN) {}
                style { (PreEscaped(STYLE)) }
            }
            body {
                header { h1 { "Oil Production Dashboard" } }
                (filter_form(view))
                section.cards {
                    (card("Total Production", &view.total_production))
                    (card("Average Production", &view.avg_production))
                    (card("States", &view.state_count.to_string()))
                    (card("Regions", &view.region_count.to_string()))
                }
                section.charts {
                    @for chart in view.charts.all() {
                        (chart_block(chart))
                    }
                }
            }
        }
    }
}

fn filter_form(view: &DashboardView) -> Markup {
    html! {
        form.filters method="post" action="/" {
            (select("state", "State", &view.states, view.selected_state.as_deref()))
            (select("region", "Region", &view.regions, view.selected_region.as_deref()))
            button type="submit" { "Apply" }
        }
    }
}

fn select(name: &str, label: &str, options: &[String], selected: Option<&str>) -> Markup {
    html! {
        label {
            (label)
            select name=(name) {
                option value="" selected[selected.is_none()] { "All" }
                @for opt in options {
                    option value=(opt) selected[selected == Some(opt.as_str())] { (opt) }
                }
            }
        }
    }
}

fn card(label: &str, value: &str) -> Markup {
    html! {
        div.card {
            div.label { (label) }
            div.value { (value) }
        }
    }
}

fn chart_block(chart: &ChartSpec) -> Markup {
    html! {
        div.chart data-chart=(chart.id) {
            (PreEscaped(plotly::to_embed(chart)))
        }
    }
}

use crate::ir::{BarMode, ChartSpec, Trace};

/// Axis domain resolved for static rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct Scale {
    pub domain: (f64, f64),
    pub is_categorical: bool,
    /// If categorical, maps index -> label. Category `i` is centred on `i`.
    pub categories: Vec<String>,
}

impl Scale {
    fn continuous(domain: (f64, f64)) -> Self {
        Scale {
            domain,
            is_categorical: false,
            categories: Vec::new(),
        }
    }
}

/// Resolve the x axis: categorical for bar traces, padded numeric otherwise.
pub fn resolve_x_axis(spec: &ChartSpec) -> Scale {
    let categories = spec.traces.iter().find_map(|t| match t {
        Trace::Bar(b) => Some(b.x.clone()),
        _ => None,
    });

    if let Some(categories) = categories {
        let n = categories.len().max(1) as f64;
        return Scale {
            domain: (-0.5, n - 0.5),
            is_categorical: true,
            categories,
        };
    }

    if let Some(range) = spec.layout.x_axis.range {
        return Scale::continuous(range);
    }

    let xs: Vec<f64> = spec
        .traces
        .iter()
        .flat_map(|t| match t {
            Trace::Area(a) => a.x.clone(),
            _ => Vec::new(),
        })
        .collect();
    if xs.is_empty() {
        return Scale::continuous((0.0, 1.0));
    }

    let min = xs.iter().cloned().fold(f64::INFINITY, f64::min);
    let max = xs.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    Scale::continuous(pad_range(min, max))
}

/// Resolve the y axis. An explicit range wins; bars start at zero and leave
/// headroom for outside labels; stacked bars are measured by their totals.
pub fn resolve_y_axis(spec: &ChartSpec) -> Scale {
    if let Some(range) = spec.layout.y_axis.range {
        return Scale::continuous(range);
    }

    let stacked = matches!(spec.layout.bar_mode, Some(BarMode::Stack));
    let mut stack_totals: Vec<f64> = Vec::new();
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    let mut has_bars = false;

    for trace in &spec.traces {
        match trace {
            Trace::Bar(b) => {
                has_bars = true;
                if stacked {
                    if stack_totals.len() < b.y.len() {
                        stack_totals.resize(b.y.len(), 0.0);
                    }
                    for (i, v) in b.y.iter().enumerate() {
                        stack_totals[i] += v;
                    }
                } else {
                    for &v in &b.y {
                        min = min.min(v);
                        max = max.max(v);
                    }
                }
            }
            Trace::Area(a) => {
                for &v in &a.y {
                    min = min.min(v);
                    max = max.max(v);
                }
            }
            Trace::Pie(_) => {}
        }
    }

    for &total in &stack_totals {
        min = min.min(total);
        max = max.max(total);
    }

    if min == f64::INFINITY {
        return Scale::continuous((0.0, 1.0));
    }

    if has_bars {
        // Bar charts always include 0
        let lo = min.min(0.0);
        let hi = if max > 0.0 { max * 1.1 } else { 1.0 };
        return Scale::continuous((lo, hi));
    }

    Scale::continuous(pad_range(min.min(0.0), max))
}

fn pad_range(min: f64, max: f64) -> (f64, f64) {
    if min == max {
        (min - 1.0, max + 1.0)
    } else {
        let padding = (max - min) * 0.05;
        (min - padding, max + padding)
    }
}

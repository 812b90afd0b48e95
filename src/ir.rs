use serde::Serialize;

// =============================================================================
// Chart description
// =============================================================================

/// A renderer-agnostic description of one dashboard chart: the aggregated
/// data plus every visual encoding needed to draw it. Adapters turn this into
/// Plotly markup or a static image.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSpec {
    /// Stable identifier, used for element ids and output file names.
    pub id: String,
    pub kind: ChartKind,
    pub mode: RenderMode,
    pub traces: Vec<Trace>,
    pub layout: Layout,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartKind {
    Bar,
    Donut,
    Area,
    StackedBar,
}

/// Interactive charts get hover and zoom; static ones are drawn as a fixed picture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RenderMode {
    Interactive,
    Static,
}

impl ChartSpec {
    /// True when no trace carries any data point.
    pub fn is_empty(&self) -> bool {
        self.traces.iter().all(Trace::is_empty)
    }

    pub fn width(&self) -> Option<u32> {
        self.layout.width
    }

    pub fn height(&self) -> Option<u32> {
        self.layout.height
    }
}

// =============================================================================
// Traces
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Trace {
    Bar(BarTrace),
    Pie(PieTrace),
    Area(AreaTrace),
}

impl Trace {
    pub fn is_empty(&self) -> bool {
        match self {
            Trace::Bar(b) => b.y.is_empty(),
            Trace::Pie(p) => p.values.is_empty(),
            Trace::Area(a) => a.y.is_empty(),
        }
    }
}

/// A bar series over categorical x values.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BarTrace {
    /// Legend entry; `None` for single-series charts.
    pub name: Option<String>,
    pub x: Vec<String>,
    pub y: Vec<f64>,
    /// One color per bar.
    pub colors: Vec<String>,
    /// Continuous scale the colors were sampled from, if any.
    pub color_scale: Option<ColorScale>,
    pub text: Vec<String>,
    pub text_position: Option<TextPosition>,
    pub outline: Option<LineStyle>,
    pub hover_template: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColorScale {
    pub name: String,
    pub stops: Vec<(f64, String)>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TextPosition {
    Outside,
}

/// A pie, drawn as a donut when `hole > 0`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PieTrace {
    pub labels: Vec<String>,
    pub values: Vec<f64>,
    pub colors: Vec<String>,
    /// Hole radius as a fraction of the outer radius.
    pub hole: f64,
    /// Radial offset of every slice as a fraction of the radius.
    pub pull: f64,
    pub text_info: String,
    pub text_font: Font,
    /// Degrees clockwise from twelve o'clock where the first slice starts.
    /// Slices then run counter-clockwise.
    pub rotation: f64,
    pub outline: LineStyle,
    pub hover_template: Option<String>,
}

impl PieTrace {
    /// Share of each slice in `[0, 1]`. All zeros when the total is zero.
    pub fn fractions(&self) -> Vec<f64> {
        let total: f64 = self.values.iter().sum();
        self.values
            .iter()
            .map(|v| if total > 0.0 { v / total } else { 0.0 })
            .collect()
    }
}

/// A line over numeric x values, optionally filled down to zero.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AreaTrace {
    pub name: Option<String>,
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    pub color: String,
    pub shape: LineShape,
    pub fill_to_zero: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LineShape {
    Linear,
    Spline,
}

// =============================================================================
// Layout
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Layout {
    pub title: Title,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub x_axis: Axis,
    pub y_axis: Axis,
    pub legend: Legend,
    pub annotations: Vec<Annotation>,
    pub margin: Option<Margin>,
    pub plot_background: String,
    pub paper_background: String,
    pub bar_mode: Option<BarMode>,
    pub hover_mode: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Title {
    pub text: String,
    /// Horizontal position in paper coordinates.
    pub x: f64,
    pub y: Option<f64>,
    pub x_anchor: Anchor,
    pub font: Font,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Font {
    pub size: f64,
    pub color: String,
    pub family: Option<String>,
}

impl Font {
    pub fn new(size: f64, color: &str) -> Self {
        Self {
            size,
            color: color.to_string(),
            family: None,
        }
    }

    pub fn family(mut self, family: &str) -> Self {
        self.family = Some(family.to_string());
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Anchor {
    Left,
    Center,
    Right,
    Middle,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Axis {
    pub title: Option<String>,
    /// Fixed `(min, max)`; the renderer picks one from the data when `None`.
    pub range: Option<(f64, f64)>,
    /// d3-style tick format, e.g. `,.0f`.
    pub tick_format: Option<String>,
    pub grid: Option<LineStyle>,
    pub zero_line: bool,
    pub line: Option<LineStyle>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineStyle {
    pub color: String,
    pub width: f64,
    pub dash: Option<Dash>,
}

impl LineStyle {
    pub fn solid(color: &str, width: f64) -> Self {
        Self {
            color: color.to_string(),
            width,
            dash: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Dash {
    Dot,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Legend {
    pub show: bool,
    pub title: Option<String>,
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub x_anchor: Option<Anchor>,
    pub y_anchor: Option<Anchor>,
    pub vertical: bool,
    pub font: Option<Font>,
    pub background: Option<String>,
    pub border: Option<LineStyle>,
}

impl Legend {
    pub fn hidden() -> Self {
        Self {
            show: false,
            title: None,
            x: None,
            y: None,
            x_anchor: None,
            y_anchor: None,
            vertical: false,
            font: None,
            background: None,
            border: None,
        }
    }
}

/// Free text placed in paper coordinates, e.g. the label inside a donut hole.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Annotation {
    pub text: String,
    pub x: f64,
    pub y: f64,
    pub font: Font,
    pub bold: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Margin {
    pub left: u32,
    pub right: u32,
    pub top: u32,
    pub bottom: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BarMode {
    Stack,
}

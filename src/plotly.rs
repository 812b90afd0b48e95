//! Plotly.js adapter: turns a [`ChartSpec`] into a figure object and an
//! embeddable `<div>` + `<script>` block.

use serde_json::{json, Map, Value};

use crate::ir::{
    Anchor, Annotation, AreaTrace, Axis, BarMode, BarTrace, ChartSpec, Dash, Font, Layout, Legend,
    LineShape, LineStyle, PieTrace, RenderMode, TextPosition, Trace,
};

/// URL of the Plotly bundle the embedded charts expect on the page.
pub const PLOTLY_CDN: &str = "https://cdn.plot.ly/plotly-2.35.2.min.js";

/// The full figure: `{data, layout, config}`.
pub fn to_figure(spec: &ChartSpec) -> Value {
    json!({
        "data": spec.traces.iter().map(trace_json).collect::<Vec<_>>(),
        "layout": layout_json(&spec.layout),
        "config": config_json(spec.mode),
    })
}

/// A self-contained block that draws the chart once Plotly is loaded.
pub fn to_embed(spec: &ChartSpec) -> String {
    let figure = to_figure(spec);
    let size = match (spec.width(), spec.height()) {
        (Some(w), Some(h)) => format!("width:{}px; height:{}px;", w, h),
        _ => "width:100%; height:100%;".to_string(),
    };

    format!(
        "<div id=\"{id}\" class=\"plotly-graph-div\" style=\"{size}\"></div>\n\
         <script type=\"text/javascript\">Plotly.newPlot(\"{id}\", {data}, {layout}, {config});</script>",
        id = spec.id,
        size = size,
        data = script_safe(&figure["data"]),
        layout = script_safe(&figure["layout"]),
        config = script_safe(&figure["config"]),
    )
}

/// JSON that cannot close the surrounding `<script>` element.
fn script_safe(value: &Value) -> String {
    value
        .to_string()
        .replace("</", "<\\/")
        .replace("<!--", "<\\!--")
}

fn config_json(mode: RenderMode) -> Value {
    match mode {
        RenderMode::Static => json!({"staticPlot": true, "displayModeBar": false}),
        RenderMode::Interactive => json!({}),
    }
}

fn trace_json(trace: &Trace) -> Value {
    match trace {
        Trace::Bar(b) => bar_json(b),
        Trace::Pie(p) => pie_json(p),
        Trace::Area(a) => area_json(a),
    }
}

fn bar_json(bar: &BarTrace) -> Value {
    let mut marker = Map::new();
    match &bar.color_scale {
        Some(scale) => {
            marker.insert("color".into(), json!(bar.y));
            marker.insert(
                "colorscale".into(),
                Value::Array(scale.stops.iter().map(|(p, c)| json!([p, c])).collect()),
            );
            marker.insert("showscale".into(), json!(true));
        }
        None => {
            marker.insert("color".into(), json!(bar.colors));
        }
    }
    if let Some(outline) = &bar.outline {
        marker.insert("line".into(), line_json(outline));
    }

    let mut obj = Map::new();
    obj.insert("type".into(), json!("bar"));
    obj.insert("x".into(), json!(bar.x));
    obj.insert("y".into(), json!(bar.y));
    obj.insert("marker".into(), Value::Object(marker));
    obj.insert("showlegend".into(), json!(bar.name.is_some()));
    if let Some(name) = &bar.name {
        obj.insert("name".into(), json!(name));
    }
    if !bar.text.is_empty() {
        obj.insert("text".into(), json!(bar.text));
    }
    if let Some(pos) = bar.text_position {
        let pos = match pos {
            TextPosition::Outside => "outside",
        };
        obj.insert("textposition".into(), json!(pos));
    }
    if let Some(t) = &bar.hover_template {
        obj.insert("hovertemplate".into(), json!(t));
    }
    Value::Object(obj)
}

fn pie_json(pie: &PieTrace) -> Value {
    let mut obj = json!({
        "type": "pie",
        "labels": pie.labels,
        "values": pie.values,
        "hole": pie.hole,
        "pull": vec![pie.pull; pie.values.len()],
        "marker": {
            "colors": pie.colors,
            "line": line_json(&pie.outline),
        },
        "textinfo": pie.text_info,
        "textfont": font_json(&pie.text_font),
        "rotation": pie.rotation,
    });
    if let Some(t) = &pie.hover_template {
        obj["hovertemplate"] = json!(t);
    }
    obj
}

fn area_json(area: &AreaTrace) -> Value {
    let shape = match area.shape {
        LineShape::Linear => "linear",
        LineShape::Spline => "spline",
    };
    let mut obj = json!({
        "type": "scatter",
        "mode": "lines",
        "x": area.x,
        "y": area.y,
        "line": {"color": area.color, "shape": shape},
        "showlegend": area.name.is_some(),
    });
    if area.fill_to_zero {
        obj["fill"] = json!("tozeroy");
    }
    if let Some(name) = &area.name {
        obj["name"] = json!(name);
    }
    obj
}

fn layout_json(layout: &Layout) -> Value {
    let mut title = json!({
        "text": layout.title.text,
        "x": layout.title.x,
        "xanchor": anchor(layout.title.x_anchor),
        "font": font_json(&layout.title.font),
    });
    if let Some(y) = layout.title.y {
        title["y"] = json!(y);
        title["yanchor"] = json!("top");
    }

    let mut obj = json!({
        "title": title,
        "xaxis": axis_json(&layout.x_axis),
        "yaxis": axis_json(&layout.y_axis),
        "showlegend": layout.legend.show,
        "plot_bgcolor": layout.plot_background,
        "paper_bgcolor": layout.paper_background,
    });

    if let Some(w) = layout.width {
        obj["width"] = json!(w);
    }
    if let Some(h) = layout.height {
        obj["height"] = json!(h);
    }
    if layout.legend.show {
        obj["legend"] = legend_json(&layout.legend);
    }
    if !layout.annotations.is_empty() {
        obj["annotations"] = Value::Array(layout.annotations.iter().map(annotation_json).collect());
    }
    if let Some(m) = layout.margin {
        obj["margin"] = json!({"l": m.left, "r": m.right, "t": m.top, "b": m.bottom});
    }
    if let Some(mode) = layout.bar_mode {
        obj["barmode"] = json!(match mode {
            BarMode::Stack => "stack",
        });
    }
    if let Some(mode) = &layout.hover_mode {
        obj["hovermode"] = json!(mode);
    }
    obj
}

fn axis_json(axis: &Axis) -> Value {
    let mut obj = Map::new();
    if let Some(title) = &axis.title {
        obj.insert("title".into(), json!({"text": title}));
    }
    if let Some((lo, hi)) = axis.range {
        obj.insert("range".into(), json!([lo, hi]));
    }
    if let Some(fmt) = &axis.tick_format {
        obj.insert("tickformat".into(), json!(fmt));
    }
    match &axis.grid {
        Some(grid) => {
            obj.insert("gridcolor".into(), json!(grid.color));
            obj.insert("gridwidth".into(), json!(grid.width));
            if let Some(dash) = grid.dash {
                obj.insert("griddash".into(), json!(dash_name(dash)));
            }
        }
        None => {
            obj.insert("showgrid".into(), json!(false));
        }
    }
    obj.insert("zeroline".into(), json!(axis.zero_line));
    if let Some(line) = &axis.line {
        obj.insert("linecolor".into(), json!(line.color));
        obj.insert("linewidth".into(), json!(line.width));
    }
    Value::Object(obj)
}

fn legend_json(legend: &Legend) -> Value {
    let mut obj = Map::new();
    obj.insert("orientation".into(), json!(if legend.vertical { "v" } else { "h" }));
    if let Some(title) = &legend.title {
        let mut t = json!({"text": format!("<b>{}</b>", title)});
        if let Some(font) = &legend.font {
            t["font"] = font_json(font);
        }
        obj.insert("title".into(), t);
    }
    if let Some(x) = legend.x {
        obj.insert("x".into(), json!(x));
    }
    if let Some(y) = legend.y {
        obj.insert("y".into(), json!(y));
    }
    if let Some(a) = legend.x_anchor {
        obj.insert("xanchor".into(), json!(anchor(a)));
    }
    if let Some(a) = legend.y_anchor {
        obj.insert("yanchor".into(), json!(anchor(a)));
    }
    if let Some(font) = &legend.font {
        obj.insert("font".into(), font_json(font));
    }
    if let Some(bg) = &legend.background {
        obj.insert("bgcolor".into(), json!(bg));
    }
    if let Some(border) = &legend.border {
        obj.insert("bordercolor".into(), json!(border.color));
        obj.insert("borderwidth".into(), json!(border.width));
    }
    Value::Object(obj)
}

fn annotation_json(annotation: &Annotation) -> Value {
    let text = annotation.text.replace('\n', "<br>");
    let text = if annotation.bold { format!("<b>{}</b>", text) } else { text };
    json!({
        "text": text,
        "x": annotation.x,
        "y": annotation.y,
        "font": font_json(&annotation.font),
        "showarrow": false,
    })
}

fn font_json(font: &Font) -> Value {
    let mut obj = json!({"size": font.size, "color": font.color});
    if let Some(family) = &font.family {
        obj["family"] = json!(family);
    }
    obj
}

fn line_json(line: &LineStyle) -> Value {
    let mut obj = json!({"color": line.color, "width": line.width});
    if let Some(dash) = line.dash {
        obj["dash"] = json!(dash_name(dash));
    }
    obj
}

fn dash_name(dash: Dash) -> &'static str {
    match dash {
        Dash::Dot => "dot",
    }
}

fn anchor(a: Anchor) -> &'static str {
    match a {
        Anchor::Left => "left",
        Anchor::Center => "center",
        Anchor::Right => "right",
        Anchor::Middle => "middle",
    }
}

//! Static rendering of a [`ChartSpec`] with plotters.

use anyhow::{Context, Result};
use image::ImageEncoder;
use log::debug;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::f64::consts::PI;

use crate::format::format_thousands;
use crate::ir::{
    Anchor, AreaTrace, BarMode, BarTrace, ChartSpec, Font, Legend, LineShape, PieTrace, TextPosition,
    Trace,
};
use crate::palette::parse_color;
use crate::scale::{resolve_x_axis, resolve_y_axis};
use crate::{OutputFormat, RenderOptions};

const FALLBACK: RGBAColor = RGBAColor(0, 0, 255, 1.0);

/// Draw a chart to PNG or SVG bytes. The chart's own dimensions win over
/// the option defaults.
pub fn render_chart(spec: &ChartSpec, options: &RenderOptions) -> Result<Vec<u8>> {
    let width = spec.width().unwrap_or(options.width);
    let height = spec.height().unwrap_or(options.height);
    if width == 0 || height == 0 {
        anyhow::bail!("Cannot render chart '{}' with zero size", spec.id);
    }

    let bytes = match options.format {
        OutputFormat::Png => {
            let mut buffer = vec![0u8; (width * height * 3) as usize];
            {
                let root = BitMapBackend::with_buffer(&mut buffer, (width, height))
                    .into_drawing_area();
                draw_chart(&root, spec)?;
                root.present().context("Failed to present drawing")?;
            }
            encode_png(&buffer, width, height)?
        }
        OutputFormat::Svg => {
            let mut svg = String::new();
            {
                let root = SVGBackend::with_string(&mut svg, (width, height)).into_drawing_area();
                draw_chart(&root, spec)?;
                root.present().context("Failed to present drawing")?;
            }
            svg.into_bytes()
        }
    };

    debug!("Rendered chart '{}' ({} bytes)", spec.id, bytes.len());
    Ok(bytes)
}

fn encode_png(buffer: &[u8], width: u32, height: u32) -> Result<Vec<u8>> {
    let mut png_bytes = Vec::new();
    image::codecs::png::PngEncoder::new(&mut png_bytes)
        .write_image(buffer, width, height, image::ColorType::Rgb8)
        .context("Failed to encode PNG")?;
    Ok(png_bytes)
}

fn draw_chart<DB: DrawingBackend>(root: &DrawingArea<DB, Shift>, spec: &ChartSpec) -> Result<()>
where
    DB::ErrorType: 'static,
{
    root.fill(&WHITE).context("Failed to fill background")?;
    root.fill(&color(&spec.layout.paper_background))
        .context("Failed to fill background")?;

    let title = &spec.layout.title;
    let area = root
        .titled(&title.text, text_style(&title.font, false))
        .context("Failed to draw title")?;

    if spec.is_empty() {
        return Ok(());
    }

    let pies: Vec<&PieTrace> = spec
        .traces
        .iter()
        .filter_map(|t| match t {
            Trace::Pie(p) => Some(p),
            _ => None,
        })
        .collect();

    if let Some(pie) = pies.first() {
        draw_donut(&area, spec, pie)
    } else {
        draw_cartesian(&area, spec)
    }
}

fn draw_cartesian<DB: DrawingBackend>(area: &DrawingArea<DB, Shift>, spec: &ChartSpec) -> Result<()>
where
    DB::ErrorType: 'static,
{
    let x_scale = resolve_x_axis(spec);
    let y_scale = resolve_y_axis(spec);
    let layout = &spec.layout;

    let entries = legend_entries(spec);
    let show_legend = layout.legend.show && !entries.is_empty();
    let labels: Vec<String> = entries.iter().map(|(l, _)| l.clone()).collect();
    let legend_box = legend_size(&layout.legend, &labels);
    let (reserve_right, reserve_top) = if show_legend {
        (
            if layout.legend.x.unwrap_or(1.02) > 1.0 { legend_box.0 as u32 + 10 } else { 0 },
            if layout.legend.y.unwrap_or(1.0) > 1.0 { legend_box.1 as u32 } else { 0 },
        )
    } else {
        (0, 0)
    };

    let mut chart = ChartBuilder::on(area)
        .margin(10)
        .margin_right(10 + reserve_right)
        .margin_top(10 + reserve_top)
        .x_label_area_size(40)
        .y_label_area_size(70)
        .build_cartesian_2d(
            x_scale.domain.0..x_scale.domain.1,
            y_scale.domain.0..y_scale.domain.1,
        )
        .context("Failed to build chart")?;

    let axis_font = text_style(&Font::new(12.0, crate::palette::TEXT_COLOR), false);
    let categories = x_scale.categories.clone();
    let x_formatter = |x: &f64| {
        if !x_scale.is_categorical {
            return format!("{:.0}", x);
        }
        let idx = x.round();
        if (x - idx).abs() > 1e-6 || idx < 0.0 {
            return String::new();
        }
        categories.get(idx as usize).cloned().unwrap_or_default()
    };
    let thousands = layout.y_axis.tick_format.is_some();
    let y_formatter = |y: &f64| {
        if thousands {
            format_thousands(*y)
        } else {
            format!("{:.0}", y)
        }
    };

    {
        let mut mesh = chart.configure_mesh();
        let x_label_count = if x_scale.is_categorical {
            categories.len()
        } else {
            area_x_count(spec)
        };
        mesh.x_labels(x_label_count.max(2))
            .x_label_formatter(&x_formatter)
            .y_label_formatter(&y_formatter)
            .label_style(axis_font.clone())
            .axis_desc_style(axis_font.clone())
            .disable_x_mesh();
        if let Some(title) = &layout.x_axis.title {
            mesh.x_desc(title.as_str());
        }
        if let Some(title) = &layout.y_axis.title {
            mesh.y_desc(title.as_str());
        }
        match &layout.y_axis.grid {
            Some(grid) => {
                let c = color(&grid.color);
                mesh.bold_line_style(c.stroke_width(grid.width.max(1.0) as u32))
                    .light_line_style(c.mix(0.0).stroke_width(0));
            }
            None => {
                mesh.disable_y_mesh();
            }
        }
        mesh.draw().context("Failed to draw mesh")?;
    }

    let stacked = matches!(layout.bar_mode, Some(BarMode::Stack));
    let mut stack_offsets: Vec<f64> = vec![0.0; x_scale.categories.len()];

    for trace in &spec.traces {
        match trace {
            Trace::Bar(bar) => {
                let rects = bar_rects(bar, stacked, &mut stack_offsets);
                chart
                    .draw_series(rects.iter().map(|(tl, br, c)| {
                        Rectangle::new([*tl, *br], c.filled())
                    }))
                    .context("Failed to draw bars")?;

                if let Some(outline) = &bar.outline {
                    let c = color(&outline.color);
                    chart
                        .draw_series(rects.iter().map(|(tl, br, _)| {
                            Rectangle::new([*tl, *br], c.stroke_width(outline.width.ceil() as u32))
                        }))
                        .context("Failed to draw bar outlines")?;
                }

                if matches!(bar.text_position, Some(TextPosition::Outside)) {
                    let label_style = text_style(&Font::new(12.0, crate::palette::TEXT_COLOR), false)
                        .pos(Pos::new(HPos::Center, VPos::Bottom));
                    chart
                        .draw_series(bar.text.iter().zip(rects.iter()).map(|(text, (tl, br, _))| {
                            Text::new(text.clone(), ((tl.0 + br.0) / 2.0, br.1), label_style.clone())
                        }))
                        .context("Failed to draw bar labels")?;
                }
            }
            Trace::Area(area_trace) => {
                let c = color(&area_trace.color);
                let baseline = y_scale.domain.0;
                let points: Vec<(f64, f64)> = area_points(area_trace)
                    .into_iter()
                    .map(|(x, y)| (x, y.max(baseline)))
                    .collect();
                if area_trace.fill_to_zero {
                    chart
                        .draw_series(AreaSeries::new(points.clone(), baseline, c.mix(0.35).filled()))
                        .context("Failed to draw area")?;
                }
                chart
                    .draw_series(LineSeries::new(points, c.stroke_width(2)))
                    .context("Failed to draw area line")?;
            }
            Trace::Pie(_) => {}
        }
    }

    if show_legend {
        let (w, h) = area.dim_in_pixel();
        let (w, h) = (w as i32, h as i32);
        let plot = (w - reserve_right as i32, h);
        let origin = legend_origin(&layout.legend, legend_box, plot, (w, h));
        draw_legend(area, &layout.legend, &entries, origin, legend_box)?;
    }

    Ok(())
}

/// Named series and their colors, in trace order.
fn legend_entries(spec: &ChartSpec) -> Vec<(String, RGBAColor)> {
    spec.traces
        .iter()
        .filter_map(|t| match t {
            Trace::Bar(b) => b.name.as_ref().map(|n| {
                (n.clone(), b.colors.first().map(|c| color(c)).unwrap_or(FALLBACK))
            }),
            Trace::Area(a) => a.name.as_ref().map(|n| (n.clone(), color(&a.color))),
            Trace::Pie(_) => None,
        })
        .collect()
}

/// Number of distinct x values across area traces.
fn area_x_count(spec: &ChartSpec) -> usize {
    let mut xs: Vec<f64> = spec
        .traces
        .iter()
        .flat_map(|t| match t {
            Trace::Area(a) => a.x.clone(),
            _ => Vec::new(),
        })
        .collect();
    xs.sort_by(f64::total_cmp);
    xs.dedup();
    xs.len()
}

const LEGEND_ROW: i32 = 18;

fn legend_font(legend: &Legend) -> Font {
    let font = legend
        .font
        .clone()
        .unwrap_or_else(|| Font::new(10.0, crate::palette::TEXT_COLOR));
    Font { size: font.size.max(10.0), ..font }
}

/// Pixel size of a legend box holding `labels`.
fn legend_size(legend: &Legend, labels: &[String]) -> (i32, i32) {
    let font = legend_font(legend);
    let longest = labels
        .iter()
        .chain(legend.title.iter())
        .map(|l| l.chars().count())
        .max()
        .unwrap_or(0);
    let width = 34 + (longest as f64 * font.size * 0.6).ceil() as i32;
    let rows = labels.len() + usize::from(legend.title.is_some());
    (width, rows as i32 * LEGEND_ROW + 8)
}

/// Top-left corner of the legend box. `x`/`y` are fractions of the plot
/// region (y measured upwards, as on paper), the anchors say which edge of the
/// box sits there, and the result is clamped inside `bounds`.
fn legend_origin(legend: &Legend, size: (i32, i32), plot: (i32, i32), bounds: (i32, i32)) -> (i32, i32) {
    let px = (legend.x.unwrap_or(1.02) * plot.0 as f64) as i32;
    let py = ((1.0 - legend.y.unwrap_or(1.0)) * plot.1 as f64) as i32;
    let x = match legend.x_anchor {
        Some(Anchor::Right) => px - size.0,
        Some(Anchor::Center) => px - size.0 / 2,
        _ => px,
    };
    let y = match legend.y_anchor {
        Some(Anchor::Middle) => py - size.1 / 2,
        _ => py,
    };
    (
        x.clamp(0, (bounds.0 - size.0).max(0)),
        y.clamp(0, (bounds.1 - size.1).max(0)),
    )
}

fn draw_legend<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    legend: &Legend,
    entries: &[(String, RGBAColor)],
    origin: (i32, i32),
    size: (i32, i32),
) -> Result<()>
where
    DB::ErrorType: 'static,
{
    let (x, y) = origin;
    let frame = [(x, y), (x + size.0, y + size.1)];
    if let Some(bg) = &legend.background {
        area.draw(&Rectangle::new(frame, color(bg).filled()))
            .context("Failed to draw legend")?;
    }
    if let Some(border) = &legend.border {
        let stroke = color(&border.color).stroke_width(border.width.ceil() as u32);
        area.draw(&Rectangle::new(frame, stroke))
            .context("Failed to draw legend")?;
    }

    let font = legend_font(legend);
    let style = text_style(&font, false).pos(Pos::new(HPos::Left, VPos::Center));
    let mut row_y = y + 4 + LEGEND_ROW / 2;
    if let Some(title) = &legend.title {
        let title_style = text_style(&font, true).pos(Pos::new(HPos::Left, VPos::Center));
        area.draw(&Text::new(title.clone(), (x + 6, row_y), title_style))
            .context("Failed to draw legend")?;
        row_y += LEGEND_ROW;
    }
    for (label, fill) in entries {
        area.draw(&Rectangle::new([(x + 6, row_y - 5), (x + 16, row_y + 5)], fill.filled()))
            .context("Failed to draw legend")?;
        area.draw(&Text::new(label.clone(), (x + 22, row_y), style.clone()))
            .context("Failed to draw legend")?;
        row_y += LEGEND_ROW;
    }
    Ok(())
}

/// Bars as (top-left, bottom-right, color), centred on their category index.
fn bar_rects(
    bar: &BarTrace,
    stacked: bool,
    stack_offsets: &mut Vec<f64>,
) -> Vec<((f64, f64), (f64, f64), RGBAColor)> {
    let bar_width = 0.8;
    bar.y
        .iter()
        .enumerate()
        .map(|(idx, &y_val)| {
            let x_center = idx as f64;
            let start = if stacked {
                if stack_offsets.len() <= idx {
                    stack_offsets.resize(idx + 1, 0.0);
                }
                let start = stack_offsets[idx];
                stack_offsets[idx] += y_val;
                start
            } else {
                0.0
            };
            let c = bar.colors.get(idx).map(|c| color(c)).unwrap_or(FALLBACK);
            (
                (x_center - bar_width / 2.0, start),
                (x_center + bar_width / 2.0, start + y_val),
                c,
            )
        })
        .collect()
}

/// Points along the trace, smoothed with a Catmull-Rom spline for `LineShape::Spline`.
fn area_points(trace: &AreaTrace) -> Vec<(f64, f64)> {
    let points: Vec<(f64, f64)> = trace.x.iter().cloned().zip(trace.y.iter().cloned()).collect();
    if trace.shape == LineShape::Linear || points.len() < 3 {
        return points;
    }

    const STEPS: usize = 12;
    let mut smooth = Vec::with_capacity(points.len() * STEPS);
    for i in 0..points.len() - 1 {
        let p0 = points[i.saturating_sub(1)];
        let p1 = points[i];
        let p2 = points[i + 1];
        let p3 = points[(i + 2).min(points.len() - 1)];
        for s in 0..STEPS {
            let t = s as f64 / STEPS as f64;
            smooth.push((catmull_rom(p0.0, p1.0, p2.0, p3.0, t), catmull_rom(p0.1, p1.1, p2.1, p3.1, t)));
        }
    }
    if let Some(last) = points.last() {
        smooth.push(*last);
    }
    smooth
}

fn catmull_rom(p0: f64, p1: f64, p2: f64, p3: f64, t: f64) -> f64 {
    let t2 = t * t;
    let t3 = t2 * t;
    0.5 * ((2.0 * p1)
        + (-p0 + p2) * t
        + (2.0 * p0 - 5.0 * p1 + 4.0 * p2 - p3) * t2
        + (-p0 + 3.0 * p1 - 3.0 * p2 + p3) * t3)
}

fn draw_donut<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    spec: &ChartSpec,
    pie: &PieTrace,
) -> Result<()>
where
    DB::ErrorType: 'static,
{
    let (w, h) = area.dim_in_pixel();
    let legend = &spec.layout.legend;
    let legend_box = legend_size(legend, &pie.labels);
    let legend_width = if legend.show && legend.x.unwrap_or(1.02) > 1.0 {
        legend_box.0 as u32 + 20
    } else {
        0
    };
    let plot_w = w.saturating_sub(legend_width) as f64;
    let center = (plot_w / 2.0, h as f64 / 2.0);
    let radius = (plot_w.min(h as f64) / 2.0) * 0.8;
    let hole = radius * pie.hole;

    let fractions = pie.fractions();
    let outline = color(&pie.outline.color).stroke_width(pie.outline.width.ceil() as u32);
    let label_style = text_style(&pie.text_font, false).pos(Pos::new(HPos::Center, VPos::Center));

    // Plotly convention: start at twelve o'clock offset by `rotation`, run counter-clockwise.
    let mut angle = pie.rotation.to_radians();
    for (i, fraction) in fractions.iter().enumerate() {
        let sweep = fraction * 2.0 * PI;
        let (a0, a1) = (angle, angle - sweep);
        angle = a1;
        if sweep <= 0.0 {
            continue;
        }

        let mid = (a0 + a1) / 2.0;
        let offset = radius * pie.pull;
        let c = (center.0 + offset * mid.sin(), center.1 - offset * mid.cos());
        let polygon = ring_sector(c, hole, radius, a0, a1);
        let fill = pie.colors.get(i).map(|s| color(s)).unwrap_or(FALLBACK);

        area.draw(&Polygon::new(polygon.clone(), fill.filled()))
            .context("Failed to draw slice")?;
        let mut closed = polygon;
        if let Some(first) = closed.first().copied() {
            closed.push(first);
        }
        area.draw(&PathElement::new(closed, outline.clone()))
            .context("Failed to draw slice outline")?;

        let r_label = (radius + hole) / 2.0;
        let lx = (c.0 + r_label * mid.sin()) as i32;
        let ly = (c.1 - r_label * mid.cos()) as i32;
        let label = pie.labels.get(i).cloned().unwrap_or_default();
        let line_gap = pie.text_font.size as i32;
        area.draw(&Text::new(label, (lx, ly - line_gap / 2), label_style.clone()))
            .context("Failed to draw slice label")?;
        area.draw(&Text::new(
            format!("{:.1}%", fraction * 100.0),
            (lx, ly + line_gap / 2),
            label_style.clone(),
        ))
        .context("Failed to draw slice label")?;
    }

    for annotation in &spec.layout.annotations {
        let style = text_style(&annotation.font, annotation.bold).pos(Pos::new(HPos::Center, VPos::Center));
        let lines: Vec<&str> = annotation.text.lines().collect();
        let line_height = annotation.font.size * 1.2;
        let x = (annotation.x * plot_w) as i32;
        let top = annotation.y * h as f64 - line_height * (lines.len() as f64 - 1.0) / 2.0;
        for (i, line) in lines.iter().enumerate() {
            let y = (top + i as f64 * line_height) as i32;
            area.draw(&Text::new(line.to_string(), (x, y), style.clone()))
                .context("Failed to draw annotation")?;
        }
    }

    if legend.show {
        let entries: Vec<(String, RGBAColor)> = pie
            .labels
            .iter()
            .enumerate()
            .map(|(i, label)| (label.clone(), pie.colors.get(i).map(|s| color(s)).unwrap_or(FALLBACK)))
            .collect();
        let bounds = (w as i32, h as i32);
        let origin = legend_origin(legend, legend_box, (plot_w as i32, h as i32), bounds);
        draw_legend(area, legend, &entries, origin, legend_box)?;
    }

    Ok(())
}

/// Polygon for the ring between radii `inner` and `outer`, from angle `a0` to `a1`
/// (radians clockwise from twelve o'clock).
fn ring_sector(center: (f64, f64), inner: f64, outer: f64, a0: f64, a1: f64) -> Vec<(i32, i32)> {
    let steps = (((a0 - a1).abs() / (2.0 * PI)) * 120.0).ceil().max(2.0) as usize;
    let point = |r: f64, a: f64| ((center.0 + r * a.sin()) as i32, (center.1 - r * a.cos()) as i32);

    let mut points = Vec::with_capacity(steps * 2 + 2);
    for s in 0..=steps {
        let a = a0 + (a1 - a0) * s as f64 / steps as f64;
        points.push(point(outer, a));
    }
    for s in (0..=steps).rev() {
        let a = a0 + (a1 - a0) * s as f64 / steps as f64;
        points.push(point(inner, a));
    }
    points
}

fn color(s: &str) -> RGBAColor {
    parse_color(s).unwrap_or(FALLBACK)
}

fn text_style(font: &Font, bold: bool) -> TextStyle<'static> {
    let style = if bold { FontStyle::Bold } else { FontStyle::Normal };
    FontDesc::new(FontFamily::SansSerif, font.size, style).color(&color(&font.color))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::charts::DashboardCharts;
    use crate::data::{Dataset, Record};

    fn make_dataset() -> Dataset {
        Dataset::from_records(vec![
            Record::new("A", "North", "Crude", 2019, 40000.0),
            Record::new("B", "South", "Crude", 2020, 60000.0),
            Record::new("B", "South", "Condensate", 2021, 35000.0),
        ])
    }

    fn is_valid_png(bytes: &[u8]) -> bool {
        bytes.len() > 8 && bytes[0..8] == [137, 80, 78, 71, 13, 10, 26, 10]
    }

    #[test]
    fn test_ring_sector_closed_shape() {
        let pts = ring_sector((100.0, 100.0), 40.0, 80.0, 0.0, -PI / 2.0);
        assert_eq!(pts.first(), Some(&(100, 20)));
        assert_eq!(pts.last(), Some(&(100, 60)));
    }

    #[test]
    fn test_area_points_spline_passes_through_data() {
        let trace = AreaTrace {
            name: None,
            x: vec![0.0, 1.0, 2.0],
            y: vec![0.0, 10.0, 0.0],
            color: "#008080".to_string(),
            shape: LineShape::Spline,
            fill_to_zero: true,
        };
        let pts = area_points(&trace);
        assert!(pts.len() > 3);
        assert!(pts.contains(&(1.0, 10.0)));
        assert_eq!(pts.last(), Some(&(2.0, 0.0)));
    }

    #[test]
    fn test_render_all_charts_svg() {
        let charts = DashboardCharts::build(&make_dataset());
        let options = RenderOptions {
            format: OutputFormat::Svg,
            ..RenderOptions::default()
        };
        for spec in charts.all() {
            let bytes = render_chart(spec, &options).unwrap();
            let svg = String::from_utf8(bytes).unwrap();
            assert!(svg.contains("<svg"), "chart {} is not svg", spec.id);
        }
    }

    #[test]
    fn test_render_png_uses_chart_size() {
        let charts = DashboardCharts::build(&make_dataset());
        let bytes = render_chart(&charts.bottom_states, &RenderOptions::default()).unwrap();
        assert!(is_valid_png(&bytes));
    }

    fn png_size(bytes: &[u8]) -> (u32, u32) {
        let width = u32::from_be_bytes([bytes[16], bytes[17], bytes[18], bytes[19]]);
        let height = u32::from_be_bytes([bytes[20], bytes[21], bytes[22], bytes[23]]);
        (width, height)
    }

    #[test]
    fn test_render_options_size_unsized_chart() {
        let charts = DashboardCharts::build(&make_dataset());
        let options: RenderOptions = serde_json::from_str(r#"{"width": 640, "height": 300}"#).unwrap();
        let bytes = render_chart(&charts.top_states, &options).unwrap();
        assert_eq!(png_size(&bytes), (640, 300));

        let bytes = render_chart(&charts.top_states, &RenderOptions::default()).unwrap();
        assert_eq!(png_size(&bytes), (700, 450));

        // Charts with a fixed size keep it.
        let bytes = render_chart(&charts.bottom_states, &options).unwrap();
        assert_eq!(png_size(&bytes), (880, 450));
    }

    #[test]
    fn test_legend_origin_follows_anchors() {
        let charts = DashboardCharts::build(&make_dataset());

        // Stacked chart: right edge at the plot's right, above the plot.
        let legend = &charts.yearly_by_oil_type.layout.legend;
        let size = (100, 50);
        assert_eq!(legend_origin(legend, size, (600, 300), (600, 300)), (500, 0));

        // Oil-type donut: left edge just right of the plot, centred near the top.
        let legend = &charts.oil_type_share.layout.legend;
        let (x, y) = legend_origin(legend, size, (400, 500), (530, 500));
        assert_eq!(x, 408);
        assert_eq!(y, 70 - 25);
    }

    #[test]
    fn test_legend_origin_clamped_to_bounds() {
        let mut legend = Legend::hidden();
        legend.x = Some(1.5);
        legend.y = Some(-1.0);
        assert_eq!(legend_origin(&legend, (100, 40), (400, 200), (450, 200)), (350, 160));
    }

    #[test]
    fn test_legend_size_counts_title_row() {
        let charts = DashboardCharts::build(&make_dataset());
        let legend = &charts.yearly_by_oil_type.layout.legend;
        let labels = vec!["Crude".to_string(), "Condensate".to_string()];
        let (_, height) = legend_size(legend, &labels);
        assert_eq!(height, 3 * LEGEND_ROW + 8);
    }

    #[test]
    fn test_area_x_count_one_tick_per_year() {
        let charts = DashboardCharts::build(&make_dataset());
        assert_eq!(area_x_count(&charts.yearly_trend), 3);
        assert_eq!(area_x_count(&charts.top_states), 0);
    }

    #[test]
    fn test_render_empty_chart() {
        let charts = DashboardCharts::build(&Dataset::default());
        let options = RenderOptions {
            format: OutputFormat::Svg,
            ..RenderOptions::default()
        };
        assert!(render_chart(&charts.region_share, &options).is_ok());
    }
}

use plotters::style::RGBAColor;

/// Categorical palette for the oil-type donut.
pub const OIL_TYPE_COLORS: [&str; 10] = [
    "#08306b", "#a9cfe5", "#45B7D1", "#96CEB4", "#FFEAA7",
    "#DDA0DD", "#98D8C8", "#F7DC6F", "#BB8FCE", "#85C1E9",
];

/// Ocean palette for the region donut.
pub const REGION_COLORS: [&str; 6] = [
    "#08306b", "#084e97", "#80bfbf", "#a9cfe5", "#d4e4f4", "#a9cfe5",
];

/// Series colors for the year by oil-type stacked bars.
pub const STACKED_COLORS: [&str; 6] = [
    "#a9cfe5", "#08306b", "#0C1117", "#FCBF49", "#003566", "#BC6C25",
];

pub const TEAL: &str = "#008080";
pub const TITLE_COLOR: &str = "#2c3e50";
pub const TEXT_COLOR: &str = "#34495e";
pub const MUTED_COLOR: &str = "#7F8C8D";
pub const BORDER_COLOR: &str = "#bdc3c7";
pub const WHITE: &str = "white";
pub const TRANSPARENT: &str = "rgba(0,0,0,0)";

/// A fixed list of colors assigned to categories in order, wrapping around
/// when there are more categories than colors.
#[derive(Debug, Clone)]
pub struct ColorPalette {
    colors: Vec<String>,
}

impl ColorPalette {
    pub fn new(colors: &[&str]) -> Self {
        Self {
            colors: colors.iter().map(|c| c.to_string()).collect(),
        }
    }

    pub fn color(&self, idx: usize) -> String {
        if self.colors.is_empty() {
            return "#000000".to_string();
        }
        self.colors[idx % self.colors.len()].clone()
    }

    /// Colors for the first `n` categories.
    pub fn take(&self, n: usize) -> Vec<String> {
        (0..n).map(|i| self.color(i)).collect()
    }
}

/// A continuous color scale given as evenly spaced stops.
#[derive(Debug, Clone, Copy)]
pub struct SequentialScale {
    pub name: &'static str,
    stops: &'static [(u8, u8, u8)],
}

const BLUES_STOPS: [(u8, u8, u8); 9] = [
    (247, 251, 255), (222, 235, 247), (198, 219, 239), (158, 202, 225), (107, 174, 214),
    (66, 146, 198), (33, 113, 181), (8, 81, 156), (8, 48, 107),
];

const REDS_STOPS: [(u8, u8, u8); 9] = [
    (255, 245, 240), (254, 224, 210), (252, 187, 161), (252, 146, 114), (251, 106, 74),
    (239, 59, 44), (203, 24, 29), (165, 15, 21), (103, 0, 13),
];

impl SequentialScale {
    pub const BLUES: SequentialScale = SequentialScale { name: "Blues", stops: &BLUES_STOPS };
    pub const REDS: SequentialScale = SequentialScale { name: "Reds", stops: &REDS_STOPS };

    /// Color at position `t` in `[0, 1]`, interpolated linearly between stops.
    pub fn at(&self, t: f64) -> (u8, u8, u8) {
        let t = if t.is_finite() { t.clamp(0.0, 1.0) } else { 0.0 };
        let last = self.stops.len() - 1;
        let pos = t * last as f64;
        let lo = pos.floor() as usize;
        let hi = (lo + 1).min(last);
        let w = pos - lo as f64;

        let (a, b) = (self.stops[lo], self.stops[hi]);
        let mix = |x: u8, y: u8| (x as f64 + (y as f64 - x as f64) * w).round() as u8;
        (mix(a.0, b.0), mix(a.1, b.1), mix(a.2, b.2))
    }

    /// Map each value onto the scale by its position between the min and max of `values`.
    /// When all values are equal they take the top of the scale.
    pub fn colors_for(&self, values: &[f64]) -> Vec<String> {
        let min = values.iter().cloned().fold(f64::INFINITY, f64::min);
        let max = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        let span = max - min;

        values
            .iter()
            .map(|&v| {
                let t = if span > 0.0 { (v - min) / span } else { 1.0 };
                let (r, g, b) = self.at(t);
                format!("rgb({},{},{})", r, g, b)
            })
            .collect()
    }

    /// Stops in Plotly's `[[position, color], ...]` form.
    pub fn plotly_stops(&self) -> Vec<(f64, String)> {
        let last = (self.stops.len() - 1) as f64;
        self.stops
            .iter()
            .enumerate()
            .map(|(i, (r, g, b))| (i as f64 / last, format!("rgb({},{},{})", r, g, b)))
            .collect()
    }
}

/// Parse a CSS color (`#rrggbb`, `#rgb`, `rgb(...)`, `rgba(...)` or a few names).
pub fn parse_color(s: &str) -> Option<RGBAColor> {
    let s = s.trim();
    if let Some(hex) = s.strip_prefix('#') {
        return parse_hex(hex);
    }

    let lower = s.to_ascii_lowercase();
    if let Some(body) = lower
        .strip_prefix("rgba(")
        .or_else(|| lower.strip_prefix("rgb("))
        .and_then(|b| b.strip_suffix(')'))
    {
        let parts: Vec<&str> = body.split(',').map(str::trim).collect();
        if parts.len() < 3 {
            return None;
        }
        let r = parts[0].parse::<u8>().ok()?;
        let g = parts[1].parse::<u8>().ok()?;
        let b = parts[2].parse::<u8>().ok()?;
        let a = match parts.get(3) {
            Some(a) => a.parse::<f64>().ok()?,
            None => 1.0,
        };
        return Some(RGBAColor(r, g, b, a));
    }

    match lower.as_str() {
        "white" => Some(RGBAColor(255, 255, 255, 1.0)),
        "black" => Some(RGBAColor(0, 0, 0, 1.0)),
        "red" => Some(RGBAColor(255, 0, 0, 1.0)),
        "green" => Some(RGBAColor(0, 128, 0, 1.0)),
        "blue" => Some(RGBAColor(0, 0, 255, 1.0)),
        "teal" => Some(RGBAColor(0, 128, 128, 1.0)),
        "transparent" => Some(RGBAColor(0, 0, 0, 0.0)),
        _ => None,
    }
}

fn parse_hex(hex: &str) -> Option<RGBAColor> {
    if !hex.is_ascii() {
        return None;
    }
    let channel = |s: &str| u8::from_str_radix(s, 16).ok();
    match hex.len() {
        6 => Some(RGBAColor(channel(&hex[0..2])?, channel(&hex[2..4])?, channel(&hex[4..6])?, 1.0)),
        3 => {
            let expand = |i: usize| channel(&hex[i..i + 1]).map(|v| v * 17);
            Some(RGBAColor(expand(0)?, expand(1)?, expand(2)?, 1.0))
        }
        _ => None,
    }
}

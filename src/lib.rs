// Library exports for oilboard

pub mod aggregate;
pub mod data;
pub mod filter;
pub mod format;
pub mod metrics;
pub mod palette;

// Charts and their adapters
pub mod charts;
pub mod graph;
pub mod ir;
pub mod plotly;
pub mod scale;

// Serving
pub mod dashboard;
pub mod page;
pub mod server;

use serde::Deserialize;

#[derive(Debug, Clone, Copy, Deserialize, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    #[serde(rename = "png")]
    #[default]
    Png,
    #[serde(rename = "svg")]
    Svg,
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Png => "png",
            OutputFormat::Svg => "svg",
        }
    }
}

/// Options for static chart rendering. Width and height apply only to
/// charts that do not fix their own size.
#[derive(Debug, Clone, Deserialize)]
pub struct RenderOptions {
    #[serde(default = "default_width")]
    pub width: u32,
    #[serde(default = "default_height")]
    pub height: u32,
    #[serde(default, rename = "type")]
    pub format: OutputFormat,
}

fn default_width() -> u32 { 700 }
fn default_height() -> u32 { 450 }

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
            format: OutputFormat::Png,
        }
    }
}

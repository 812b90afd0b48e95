use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use env_logger::Env;
use log::info;
use std::fs;
use std::io::{self, Write};
use std::net::{IpAddr, SocketAddr};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use oilboard::charts::DashboardCharts;
use oilboard::dashboard::Dashboard;
use oilboard::data::Dataset;
use oilboard::filter::{self, Filter};
use oilboard::graph::render_chart;
use oilboard::metrics::Summary;
use oilboard::page::render_page;
use oilboard::{server, OutputFormat, RenderOptions};

#[derive(Parser, Debug)]
#[command(name = "oilboard")]
#[command(version, about = "Oil production dashboard over a CSV dataset", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Production CSV (STATE/UT, Region, Oil_type, Year, Production)
    #[arg(long, global = true, env = "OILBOARD_DATA", default_value = "data/oil_production.csv")]
    data: PathBuf,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the metric cards for a selection
    Summary {
        #[arg(long)]
        state: Option<String>,

        #[arg(long)]
        region: Option<String>,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Write the dashboard page as standalone HTML
    Page {
        #[arg(long)]
        state: Option<String>,

        #[arg(long)]
        region: Option<String>,

        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Render every chart to an image file
    Render {
        /// Directory for the chart files
        #[arg(long)]
        out_dir: PathBuf,

        #[arg(long, value_enum)]
        format: Option<OutputFormat>,

        /// Render options as JSON, e.g. '{"type": "svg", "width": 640}'
        #[arg(long)]
        options: Option<String>,
    },

    /// Serve the dashboard over HTTP
    Serve {
        #[arg(long, default_value_t = 5000)]
        port: u16,

        #[arg(long, default_value = "127.0.0.1")]
        host: IpAddr,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    let dataset = Dataset::load(&cli.data)
        .with_context(|| format!("Failed to load dataset from {}", cli.data.display()))?;

    match cli.command {
        Commands::Summary { state, region, json } => {
            let filter = Filter::new(state.as_deref(), region.as_deref()).normalized();
            let summary = Summary::compute(&filter::apply(&dataset, &filter));
            if json {
                println!("{}", serde_json::to_string_pretty(&summary)?);
            } else {
                println!("Total Production:   {}", summary.total_display());
                println!("Average Production: {}", summary.avg_display());
                println!("States:             {}", summary.state_count);
                println!("Regions:            {}", summary.region_count);
            }
        }

        Commands::Page { state, region, output } => {
            let dashboard = Dashboard::new(Arc::new(dataset));
            let view = dashboard.render(&Filter::new(state.as_deref(), region.as_deref()));
            let html = render_page(&view).into_string();
            match output {
                Some(path) => {
                    fs::write(&path, html)
                        .with_context(|| format!("Failed to write {}", path.display()))?;
                    info!("Wrote dashboard page to {}", path.display());
                }
                None => {
                    let stdout = io::stdout();
                    let mut handle = stdout.lock();
                    handle.write_all(html.as_bytes()).context("Failed to write page to stdout")?;
                    handle.flush().context("Failed to flush stdout")?;
                }
            }
        }

        Commands::Render { out_dir, format, options } => {
            let mut options: RenderOptions = match options {
                Some(json) => serde_json::from_str(&json).context("Invalid render options")?,
                None => RenderOptions::default(),
            };
            if let Some(format) = format {
                options.format = format;
            }
            render_all(&dataset, &out_dir, &options)?;
        }

        Commands::Serve { port, host } => {
            let dashboard = Arc::new(Dashboard::new(Arc::new(dataset)));
            let runtime = tokio::runtime::Runtime::new().context("Failed to start runtime")?;
            runtime.block_on(server::serve(dashboard, SocketAddr::new(host, port)))?;
        }
    }

    Ok(())
}

fn render_all(dataset: &Dataset, out_dir: &Path, options: &RenderOptions) -> Result<()> {
    fs::create_dir_all(out_dir)
        .with_context(|| format!("Failed to create {}", out_dir.display()))?;

    let charts = DashboardCharts::build(dataset);
    for chart in charts.all() {
        let bytes = render_chart(chart, options)
            .with_context(|| format!("Failed to render chart '{}'", chart.id))?;
        let path = out_dir.join(format!("{}.{}", chart.id, options.format.extension()));
        fs::write(&path, bytes).with_context(|| format!("Failed to write {}", path.display()))?;
        info!("Wrote {}", path.display());
    }
    Ok(())
}

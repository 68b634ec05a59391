use std::path::Path;

use crate::histogram::{Hist1D, Hist2D, Histograms};

use anyhow::{Context, Result};
use log::debug;
use plotters::prelude::*;

const PLOT_SIZE: (u32, u32) = (1024, 768);
const FONT: &str = "serif";
const CAPTION_FONT_SIZE: f64 = 30.;
const LABEL_AREA_SIZE: u32 = 60;

const BAR_COLOUR: RGBColor = RGBColor(0, 159, 223);

// lower end of logarithmic count axes, below a single entry
const LOG_Y_MIN: f64 = 0.5;

/// Write one SVG per histogram into `dir`, named after the histogram
pub fn plot_all(hists: &Histograms, dir: &Path) -> Result<()> {
    for (name, hist) in &hists.hists_1d {
        let out = dir.join(format!("{name}.svg"));
        debug!("Plotting {name} to {out:?}");
        plot_1d(hist, &out).with_context(|| format!("Failed to plot {out:?}"))?;
    }
    for (name, hist) in &hists.hists_2d {
        let out = dir.join(format!("{name}.svg"));
        debug!("Plotting {name} to {out:?}");
        plot_2d(hist, &out).with_context(|| format!("Failed to plot {out:?}"))?;
    }
    Ok(())
}

pub fn plot_1d(hist: &Hist1D, out: &Path) -> Result<()> {
    let root = SVGBackend::new(out, PLOT_SIZE).into_drawing_area();
    root.fill(&WHITE)?;
    let root = root.margin(10, 10, 10, 10);

    let x_range = hist.binning.min..hist.binning.max;
    let max = hist.counts.iter().copied().max().unwrap_or_default().max(1) as f64;
    let mut builder = ChartBuilder::on(&root);
    builder
        .caption(&hist.title, (FONT, CAPTION_FONT_SIZE))
        .margin(5)
        .x_label_area_size(LABEL_AREA_SIZE)
        .y_label_area_size(LABEL_AREA_SIZE);

    if hist.log_y {
        let mut chart = builder
            .build_cartesian_2d(x_range, (LOG_Y_MIN..2. * max).log_scale())?;
        chart
            .configure_mesh()
            .disable_mesh()
            .x_desc(&hist.x_label)
            .y_desc("Count")
            .x_label_formatter(&tick_label)
            .draw()?;
        draw_bars(&mut chart, hist, LOG_Y_MIN)?;
    } else {
        let mut chart = builder.build_cartesian_2d(x_range, 0.0..1.1 * max)?;
        chart
            .configure_mesh()
            .disable_mesh()
            .x_desc(&hist.x_label)
            .y_desc("Count")
            .x_label_formatter(&tick_label)
            .y_label_formatter(&count_label)
            .draw()?;
        draw_bars(&mut chart, hist, 0.)?;
    }
    root.present()?;
    Ok(())
}

fn draw_bars<CT>(
    chart: &mut ChartContext<'_, SVGBackend<'_>, CT>,
    hist: &Hist1D,
    base: f64,
) -> Result<()>
where
    CT: CoordTranslate<From = (f64, f64)>,
{
    let binning = hist.binning;
    let bars = hist
        .counts
        .iter()
        .enumerate()
        .filter(|&(_, &n)| n > 0)
        .map(|(bin, &n)| {
            Rectangle::new(
                [(binning.edge(bin), base), (binning.edge(bin + 1), n as f64)],
                BAR_COLOUR.filled(),
            )
        });
    chart.draw_series(bars)?;
    Ok(())
}

/// Colour map plot, empty bins are left blank
pub fn plot_2d(hist: &Hist2D, out: &Path) -> Result<()> {
    let root = SVGBackend::new(out, PLOT_SIZE).into_drawing_area();
    root.fill(&WHITE)?;
    let root = root.margin(10, 10, 10, 10);

    let xb = hist.x_binning;
    let yb = hist.y_binning;
    let mut chart = ChartBuilder::on(&root)
        .caption(&hist.title, (FONT, CAPTION_FONT_SIZE))
        .margin(5)
        .x_label_area_size(LABEL_AREA_SIZE)
        .y_label_area_size(LABEL_AREA_SIZE)
        .build_cartesian_2d(xb.min..xb.max, yb.min..yb.max)?;
    chart
        .configure_mesh()
        .disable_mesh()
        .x_desc(&hist.x_label)
        .y_desc(&hist.y_label)
        .x_label_formatter(&tick_label)
        .y_label_formatter(&tick_label)
        .draw()?;

    let max = hist.max_count().max(1) as f64;
    let cells = hist.counts.iter().enumerate().flat_map(move |(nx, column)| {
        column
            .iter()
            .enumerate()
            .filter(|&(_, &n)| n > 0)
            .map(move |(ny, &n)| {
                Rectangle::new(
                    [
                        (xb.edge(nx), yb.edge(ny)),
                        (xb.edge(nx + 1), yb.edge(ny + 1)),
                    ],
                    colour_scale(n as f64 / max).filled(),
                )
            })
    });
    chart.draw_series(cells)?;
    root.present()?;
    Ok(())
}

// blue for the smallest, red for the largest bin content
fn colour_scale(frac: f64) -> HSLColor {
    HSLColor(0.7 * (1. - frac.clamp(0., 1.)), 1., 0.5)
}

fn tick_label(x: &f64) -> String {
    format!("{x:.2}")
}

fn count_label(y: &f64) -> String {
    format!("{y:.0}")
}

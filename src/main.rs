//! Match reconstructed jets to generator-level jets.
//!
//! # How to use
//!
//!     jetmatch EVENTFILE...
//!
//! Each line of an event file is one event in JSON format:
//!
//!     {"jets": [{"pt": 31.2, "eta": 0.4, "phi": 1.1}], "gen_jets": [...]}
//!
//! Generator-level jets can carry their constituents, which are needed
//! for `--variant electron-veto`:
//!
//!     {"pt": 12.0, "eta": -1.3, "phi": 2.9, "constituents": [{"id": 11, "energy": 9.5, "eta": -1.3}]}
//!
//! The filled histograms are written to `histograms.json` in the output
//! directory, together with one SVG plot per histogram.
mod opt;

use std::fs::{self, File};
use std::io::{BufWriter, Write};

use crate::opt::Opt;

use anyhow::{Context, Result};
use env_logger::Env;
use jetmatch::{plot, Analysis, EventReader, Histograms, Settings};
use log::{debug, info};
use structopt::StructOpt;

fn main() -> Result<()> {
    let opt = Opt::from_args();

    let env = Env::default().filter_or("JETMATCH_LOG", opt.verbosity.as_str());
    env_logger::init_from_env(env);

    let mut settings = match &opt.config {
        Some(path) => Settings::from_file(path)?,
        None => Settings::default(),
    };
    if let Some(variant) = opt.variant {
        settings.variant = variant;
    }
    if let Some(max_delta_r) = opt.max_delta_r {
        settings.max_delta_r = max_delta_r;
    }
    settings.validate()?;
    debug!("Settings: {settings:?}");

    let mut analysis = Analysis::new(&settings);
    let mut hists = Histograms::new(&settings.histograms);
    for file in &opt.files {
        info!("Processing events from {file:?}");
        for event in EventReader::open(file)? {
            analysis.process_event(&event?, &mut hists);
        }
    }
    analysis.summary().log();

    fs::create_dir_all(&opt.output)
        .with_context(|| format!("Failed to create {:?}", opt.output))?;
    let out = opt.output.join("histograms.json");
    info!("Writing histograms to {out:?}");
    let file = File::create(&out)
        .with_context(|| format!("Failed to open {out:?}"))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, &hists)
        .with_context(|| format!("Failed to write histograms to {out:?}"))?;
    writer
        .flush()
        .with_context(|| format!("Failed to write histograms to {out:?}"))?;

    if !opt.no_plots {
        plot::plot_all(&hists, &opt.output)?;
    }
    Ok(())
}

use std::collections::BTreeMap;

use crate::aggregator::{samples, Aggregator};
use crate::config::HistogramSettings;

use log::warn;
use serde::{Deserialize, Serialize};

/// Equidistant bins on `[min, max)`
#[derive(Copy, Clone, PartialEq, Debug, Deserialize, Serialize)]
pub struct Binning {
    pub nbins: usize,
    pub min: f64,
    pub max: f64,
}

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Location {
    Underflow,
    Bin(usize),
    Overflow,
}

impl Binning {
    pub const fn new(nbins: usize, min: f64, max: f64) -> Self {
        Self { nbins, min, max }
    }

    pub fn width(&self) -> f64 {
        (self.max - self.min) / self.nbins as f64
    }

    pub fn locate(&self, x: f64) -> Location {
        if x.is_nan() || x < self.min {
            return Location::Underflow;
        }
        if x >= self.max {
            return Location::Overflow;
        }
        let bin = ((x - self.min) / self.width()) as usize;
        // guard against rounding just below `max`
        Location::Bin(bin.min(self.nbins - 1))
    }

    /// Lower edge of the given bin
    pub fn edge(&self, bin: usize) -> f64 {
        self.min + bin as f64 * self.width()
    }
}

#[derive(Clone, PartialEq, Debug, Deserialize, Serialize)]
pub struct Hist1D {
    pub title: String,
    pub x_label: String,
    pub binning: Binning,
    pub counts: Vec<u64>,
    pub underflow: u64,
    pub overflow: u64,
    /// Draw counts on a logarithmic axis
    pub log_y: bool,
}

impl Hist1D {
    pub fn new(title: &str, x_label: &str, binning: Binning) -> Self {
        Self {
            title: title.to_owned(),
            x_label: x_label.to_owned(),
            binning,
            counts: vec![0; binning.nbins],
            underflow: 0,
            overflow: 0,
            log_y: false,
        }
    }

    pub fn log_y(mut self) -> Self {
        self.log_y = true;
        self
    }

    pub fn fill(&mut self, x: f64) {
        match self.binning.locate(x) {
            Location::Underflow => self.underflow += 1,
            Location::Bin(n) => self.counts[n] += 1,
            Location::Overflow => self.overflow += 1,
        }
    }

    pub fn entries(&self) -> u64 {
        self.counts.iter().sum::<u64>() + self.underflow + self.overflow
    }
}

#[derive(Clone, PartialEq, Debug, Deserialize, Serialize)]
pub struct Hist2D {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub x_binning: Binning,
    pub y_binning: Binning,
    /// Bin contents, `counts[x_bin][y_bin]`
    pub counts: Vec<Vec<u64>>,
    /// Samples outside the binned range in at least one direction
    pub outside: u64,
}

impl Hist2D {
    pub fn new(
        title: &str,
        x_label: &str,
        y_label: &str,
        x_binning: Binning,
        y_binning: Binning,
    ) -> Self {
        Self {
            title: title.to_owned(),
            x_label: x_label.to_owned(),
            y_label: y_label.to_owned(),
            x_binning,
            y_binning,
            counts: vec![vec![0; y_binning.nbins]; x_binning.nbins],
            outside: 0,
        }
    }

    pub fn fill(&mut self, x: f64, y: f64) {
        match (self.x_binning.locate(x), self.y_binning.locate(y)) {
            (Location::Bin(nx), Location::Bin(ny)) => self.counts[nx][ny] += 1,
            _ => self.outside += 1,
        }
    }

    pub fn entries(&self) -> u64 {
        self.counts.iter().flatten().sum::<u64>() + self.outside
    }

    pub fn max_count(&self) -> u64 {
        self.counts.iter().flatten().copied().max().unwrap_or_default()
    }
}

/// All histograms filled by the analysis, keyed by sample name
#[derive(Clone, PartialEq, Debug, Default, Deserialize, Serialize)]
pub struct Histograms {
    pub hists_1d: BTreeMap<String, Hist1D>,
    pub hists_2d: BTreeMap<String, Hist2D>,
}

impl Histograms {
    pub fn new(settings: &HistogramSettings) -> Self {
        use samples::*;

        let hists_1d = [
            (
                DELTA_R,
                Hist1D::new("Delta R", "Delta R", settings.delta_r).log_y(),
            ),
            (
                UNMATCHED_GENJET_ENERGY,
                Hist1D::new("Unmatched GenJet Energy", "Energy", settings.energy)
                    .log_y(),
            ),
            (
                UNMATCHED_JET_ENERGY,
                Hist1D::new(
                    "Unmatched Reconstructed Jet Energy",
                    "Energy",
                    settings.energy,
                )
                .log_y(),
            ),
            (
                ELECTRON_ETA,
                Hist1D::new("Electron Pseudorapidity", "η", settings.eta),
            ),
        ];
        let hists_2d = [
            (
                ENERGY_DELTA_R,
                Hist2D::new(
                    "GenJet Energy vs Delta R",
                    "GenJet Energy",
                    "Delta R",
                    settings.energy,
                    settings.delta_r,
                ),
            ),
            (
                GENJET_ETA_DELTA_R,
                Hist2D::new(
                    "GenJet Pseudorapidity vs Delta R",
                    "GenJet η",
                    "Delta R",
                    settings.eta,
                    settings.delta_r,
                ),
            ),
        ];
        Self {
            hists_1d: hists_1d
                .into_iter()
                .map(|(name, h)| (name.to_owned(), h))
                .collect(),
            hists_2d: hists_2d
                .into_iter()
                .map(|(name, h)| (name.to_owned(), h))
                .collect(),
        }
    }

    pub fn get_1d(&self, name: &str) -> Option<&Hist1D> {
        self.hists_1d.get(name)
    }

    pub fn get_2d(&self, name: &str) -> Option<&Hist2D> {
        self.hists_2d.get(name)
    }
}

impl Aggregator for Histograms {
    fn record(&mut self, name: &str, value: f64) {
        if let Some(hist) = self.hists_1d.get_mut(name) {
            hist.fill(value)
        } else {
            warn!("No one-dimensional histogram booked for {name}");
        }
    }

    fn record_2d(&mut self, name: &str, x: f64, y: f64) {
        if let Some(hist) = self.hists_2d.get_mut(name) {
            hist.fill(x, y)
        } else {
            warn!("No two-dimensional histogram booked for {name}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn locate() {
        let binning = Binning::new(100, 0., 1.);
        assert_eq!(binning.locate(-0.1), Location::Underflow);
        assert_eq!(binning.locate(0.), Location::Bin(0));
        assert_eq!(binning.locate(0.005), Location::Bin(0));
        assert_eq!(binning.locate(0.015), Location::Bin(1));
        assert_eq!(binning.locate(0.999), Location::Bin(99));
        assert_eq!(binning.locate(1.), Location::Overflow);
        assert_eq!(binning.locate(f64::NAN), Location::Underflow);
    }

    #[test]
    fn nothing_is_lost() {
        let mut hist = Hist1D::new("test", "x", Binning::new(10, -1., 1.));
        for x in [-2., -1., 0., 0.5, 0.99, 1., 3.] {
            hist.fill(x);
        }
        assert_eq!(hist.underflow, 1);
        assert_eq!(hist.overflow, 2);
        assert_eq!(hist.entries(), 7);
        assert_eq!(hist.counts[5], 1);

        let mut hist = Hist2D::new(
            "test",
            "x",
            "y",
            Binning::new(2, 0., 2.),
            Binning::new(2, 0., 1.),
        );
        hist.fill(1.5, 0.2);
        hist.fill(1.5, 0.3);
        hist.fill(2.5, 0.3);
        assert_eq!(hist.counts[1][0], 2);
        assert_eq!(hist.max_count(), 2);
        assert_eq!(hist.outside, 1);
        assert_eq!(hist.entries(), 3);
    }

    #[test]
    fn default_booking() {
        let mut hists = Histograms::new(&HistogramSettings::default());
        hists.record(samples::DELTA_R, 0.255);
        hists.record_2d(samples::ENERGY_DELTA_R, 150., 0.255);
        hists.record("not booked", 1.);

        let delta_r = hists.get_1d(samples::DELTA_R).unwrap();
        assert_eq!(delta_r.counts.len(), 100);
        assert_eq!(delta_r.counts[25], 1);
        assert!(delta_r.log_y);

        let e_dr = hists.get_2d(samples::ENERGY_DELTA_R).unwrap();
        assert_eq!(e_dr.counts[75][25], 1);
        assert_eq!(hists.get_1d(samples::ELECTRON_ETA).unwrap().entries(), 0);
    }
}

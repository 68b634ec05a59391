use std::collections::BTreeMap;

/// Receiver of the samples produced by the analysis
///
/// A name may receive no samples at all during a run.
pub trait Aggregator {
    fn record(&mut self, name: &str, value: f64);

    fn record_2d(&mut self, name: &str, x: f64, y: f64);
}

impl<A: Aggregator + ?Sized> Aggregator for &mut A {
    fn record(&mut self, name: &str, value: f64) {
        (**self).record(name, value)
    }

    fn record_2d(&mut self, name: &str, x: f64, y: f64) {
        (**self).record_2d(name, x, y)
    }
}

/// Sample names
pub mod samples {
    use crate::event::Side;

    /// ΔR of accepted pairs
    pub const DELTA_R: &str = "delta_R";
    /// Generator-level jet energy vs ΔR of accepted pairs
    pub const ENERGY_DELTA_R: &str = "energy_delta_R";
    /// Generator-level jet pseudorapidity vs ΔR of accepted pairs
    pub const GENJET_ETA_DELTA_R: &str = "genjet_eta_delta_R";
    pub const UNMATCHED_GENJET_ENERGY: &str = "unmatched_genjet_energy";
    pub const UNMATCHED_JET_ENERGY: &str = "unmatched_jet_energy";
    /// Pseudorapidity of the electron that led to a jet exclusion
    pub const ELECTRON_ETA: &str = "electron_eta";

    /// Energies of unmatched jets on the given side
    pub fn unmatched_energy(side: Side) -> &'static str {
        match side {
            Side::Measured => UNMATCHED_JET_ENERGY,
            Side::Reference => UNMATCHED_GENJET_ENERGY,
        }
    }
}

/// Keeps every sample in memory, in submission order
#[derive(Clone, PartialEq, Debug, Default)]
pub struct Samples {
    pub values: BTreeMap<String, Vec<f64>>,
    pub pairs: BTreeMap<String, Vec<(f64, f64)>>,
}

impl Samples {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn values(&self, name: &str) -> &[f64] {
        self.values.get(name).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn pairs(&self, name: &str) -> &[(f64, f64)] {
        self.pairs.get(name).map(Vec::as_slice).unwrap_or_default()
    }
}

impl Aggregator for Samples {
    fn record(&mut self, name: &str, value: f64) {
        self.values.entry(name.to_owned()).or_default().push(value)
    }

    fn record_2d(&mut self, name: &str, x: f64, y: f64) {
        self.pairs.entry(name.to_owned()).or_default().push((x, y))
    }
}

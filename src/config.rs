use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::classify::DEFAULT_MAX_DELTA_R;
use crate::histogram::Binning;

use anyhow::{bail, Context, Result};
use particle_id::sm_elementary_particles::electron;
use particle_id::ParticleID;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// Which jets take part in the matching
#[derive(
    Display,
    EnumIter,
    EnumString,
    Copy,
    Clone,
    Default,
    Eq,
    PartialEq,
    Ord,
    PartialOrd,
    Hash,
    Debug,
    Deserialize,
    Serialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum Variant {
    /// Match all jets
    #[default]
    #[strum(serialize = "basic")]
    Basic,
    /// Exclude the generator-level jet containing the hardest electron
    #[strum(serialize = "electron-veto")]
    ElectronVeto,
}

#[derive(Copy, Clone, PartialEq, Debug, Deserialize, Serialize)]
#[serde(default)]
pub struct HistogramSettings {
    pub delta_r: Binning,
    pub energy: Binning,
    pub eta: Binning,
}

impl Default for HistogramSettings {
    fn default() -> Self {
        Self {
            delta_r: Binning::new(100, 0., 1.),
            energy: Binning::new(100, 0., 200.),
            eta: Binning::new(100, -5., 5.),
        }
    }
}

#[derive(Copy, Clone, PartialEq, Debug, Deserialize, Serialize)]
#[serde(default)]
pub struct Settings {
    pub variant: Variant,
    /// Largest ΔR of an accepted pair (inclusive)
    pub max_delta_r: f64,
    pub electron_id: ParticleID,
    pub histograms: HistogramSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            variant: Variant::default(),
            max_delta_r: DEFAULT_MAX_DELTA_R,
            electron_id: electron,
            histograms: HistogramSettings::default(),
        }
    }
}

impl Settings {
    pub fn from_file(path: &Path) -> Result<Self> {
        let file = File::open(path)
            .with_context(|| format!("Failed to open {path:?}"))?;
        let settings: Self = serde_json::from_reader(BufReader::new(file))
            .with_context(|| format!("Failed to read settings from {path:?}"))?;
        settings
            .validate()
            .with_context(|| format!("Invalid settings in {path:?}"))?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.max_delta_r >= 0.) {
            bail!("Maximum ΔR must be non-negative, got {}", self.max_delta_r);
        }
        let hists = &self.histograms;
        for (name, binning) in [
            ("delta_r", hists.delta_r),
            ("energy", hists.energy),
            ("eta", hists.eta),
        ] {
            if binning.nbins == 0 {
                bail!("Binning {name} has no bins");
            }
            if !(binning.max > binning.min) {
                bail!(
                    "Binning {name} has empty range [{}, {})",
                    binning.min,
                    binning.max
                );
            }
        }
        Ok(())
    }
}

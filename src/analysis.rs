use crate::aggregator::{samples, Aggregator};
use crate::classify::{classify, Classification, DeltaRCut};
use crate::config::{Settings, Variant};
use crate::event::{Event, Side};
use crate::lepton::{find_electron, Electron};
use crate::matching::{greedy_match, MatchStates};

use log::{debug, info, trace};
use particle_id::ParticleID;
use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;

/// Matching result for a single event
#[derive(Clone, PartialEq, Debug, Default)]
pub struct EventResult {
    pub classification: Classification,
    /// The electron responsible for excluding a generator-level jet
    pub electron: Option<Electron>,
}

/// Totals over all processed events
#[derive(Copy, Clone, Eq, PartialEq, Debug, Default, Deserialize, Serialize)]
pub struct RunSummary {
    pub events: usize,
    pub accepted_pairs: usize,
    pub rejected_pairs: usize,
    pub unmatched_jets: usize,
    pub unmatched_gen_jets: usize,
    pub excluded_gen_jets: usize,
}

impl RunSummary {
    fn add(&mut self, res: &EventResult) {
        let c = &res.classification;
        self.events += 1;
        self.accepted_pairs += c.accepted.len();
        self.rejected_pairs += c.rejected.len();
        self.unmatched_jets += c.unmatched_jets.len();
        self.unmatched_gen_jets += c.unmatched_gen_jets.len();
        self.excluded_gen_jets += usize::from(c.excluded_gen_jet.is_some());
    }

    pub fn log(&self) {
        info!("Processed {} events", self.events);
        info!(
            "{} accepted and {} rejected jet pairs",
            self.accepted_pairs, self.rejected_pairs
        );
        info!(
            "{} unmatched reconstructed jets, {} unmatched generator-level jets",
            self.unmatched_jets, self.unmatched_gen_jets
        );
        if self.excluded_gen_jets > 0 {
            info!(
                "{} generator-level jets excluded as electrons",
                self.excluded_gen_jets
            );
        }
    }
}

/// Event-by-event jet matching analysis
///
/// Events are independent: no matching state survives from one call
/// of [`Analysis::process_event`] to the next. Only the run totals
/// and whatever the aggregator records accumulate.
#[derive(Clone, PartialEq, Debug)]
pub struct Analysis {
    variant: Variant,
    cut: DeltaRCut,
    electron_id: ParticleID,
    summary: RunSummary,
}

impl Analysis {
    pub fn new(settings: &Settings) -> Self {
        Self {
            variant: settings.variant,
            cut: DeltaRCut::new(settings.max_delta_r),
            electron_id: settings.electron_id,
            summary: RunSummary::default(),
        }
    }

    pub fn summary(&self) -> &RunSummary {
        &self.summary
    }

    pub fn process_event(
        &mut self,
        event: &Event,
        mut out: impl Aggregator,
    ) -> EventResult {
        let Event { jets, gen_jets } = event;
        debug!(
            "Event {}: {} jets, {} genjets",
            self.summary.events + 1,
            jets.len(),
            gen_jets.len()
        );
        let mut states = MatchStates::new(jets.len(), gen_jets.len());

        let electron = match self.variant {
            Variant::Basic => None,
            Variant::ElectronVeto => find_electron(gen_jets, self.electron_id),
        };
        if let Some(electron) = electron {
            states.exclude_gen_jet(electron.jet);
            out.record(samples::ELECTRON_ETA, electron.eta);
        }

        let pairs = greedy_match(jets, gen_jets, &mut states);
        let classification = classify(pairs, jets, gen_jets, &mut states, &self.cut);

        for pair in &classification.accepted {
            let gen_jet = &gen_jets[pair.gen_jet];
            out.record(samples::DELTA_R, pair.delta_r);
            out.record_2d(samples::ENERGY_DELTA_R, gen_jet.energy(), pair.delta_r);
            out.record_2d(samples::GENJET_ETA_DELTA_R, gen_jet.eta, pair.delta_r);
        }
        for side in Side::iter() {
            let name = samples::unmatched_energy(side);
            for &idx in classification.unmatched(side) {
                let energy = event.jets(side)[idx].energy();
                trace!("unmatched {side} {idx}: E = {energy}");
                out.record(name, energy);
            }
        }

        let res = EventResult {
            classification,
            electron,
        };
        self.summary.add(&res);
        res
    }
}

use crate::jet::Jet;

use log::{debug, trace};
use particle_id::ParticleID;

/// The hardest electron found among the constituents of a set of jets
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct Electron {
    /// Index of the jet containing the electron
    pub jet: usize,
    pub energy: f64,
    pub eta: f64,
}

/// Find the jet to exclude from matching because it is most likely
/// a stray electron
///
/// Among all constituents of all jets with identity `electron_id`, the
/// one with the highest energy wins. At most one jet per event is
/// selected. Only an exact identity match counts. On equal energies the
/// first constituent encountered wins.
pub fn find_electron(gen_jets: &[Jet], electron_id: ParticleID) -> Option<Electron> {
    let mut hardest: Option<Electron> = None;
    for (jet, gen_jet) in gen_jets.iter().enumerate() {
        for c in gen_jet.constituents.iter().filter(|c| c.id == electron_id) {
            trace!("electron candidate in jet {jet}: E = {}, η = {}", c.energy, c.eta);
            if hardest.map_or(true, |e| c.energy > e.energy) {
                hardest = Some(Electron {
                    jet,
                    energy: c.energy,
                    eta: c.eta,
                });
            }
        }
    }
    if let Some(e) = hardest {
        debug!("excluding jet {} with electron energy {}", e.jet, e.energy);
    }
    hardest
}

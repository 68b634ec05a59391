use crate::event::Side;
use crate::jet::Jet;

use log::{debug, trace};

/// Matching status of a single jet within one event
#[derive(Copy, Clone, Eq, PartialEq, Debug, Default)]
pub enum MatchState {
    #[default]
    Unassigned,
    /// Removed from matching altogether (generator-level jets only)
    Excluded,
    /// Paired with the jet at index `partner` on the other side in
    /// the given (1-based) round of the greedy loop
    Matched { partner: usize, round: usize },
}

/// Per-event matching status of all reconstructed and generator-level jets
///
/// Pairings are always symmetric: if reconstructed jet `i` is matched
/// to generator-level jet `j`, then `j` is matched to `i` in the same
/// round.
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct MatchStates {
    jets: Vec<MatchState>,
    gen_jets: Vec<MatchState>,
}

impl MatchStates {
    pub fn new(n_jets: usize, n_gen_jets: usize) -> Self {
        Self {
            jets: vec![MatchState::Unassigned; n_jets],
            gen_jets: vec![MatchState::Unassigned; n_gen_jets],
        }
    }

    pub fn len(&self, side: Side) -> usize {
        self.states(side).len()
    }

    pub fn states(&self, side: Side) -> &[MatchState] {
        match side {
            Side::Measured => &self.jets,
            Side::Reference => &self.gen_jets,
        }
    }

    pub fn get(&self, side: Side, idx: usize) -> MatchState {
        self.states(side)[idx]
    }

    pub fn exclude_gen_jet(&mut self, idx: usize) {
        debug_assert_eq!(self.gen_jets[idx], MatchState::Unassigned);
        self.gen_jets[idx] = MatchState::Excluded;
    }

    fn pair(&mut self, jet: usize, gen_jet: usize, round: usize) {
        debug_assert_eq!(self.jets[jet], MatchState::Unassigned);
        debug_assert_eq!(self.gen_jets[gen_jet], MatchState::Unassigned);
        self.jets[jet] = MatchState::Matched {
            partner: gen_jet,
            round,
        };
        self.gen_jets[gen_jet] = MatchState::Matched {
            partner: jet,
            round,
        };
    }

    /// Dissolve a pairing, returning both jets to `Unassigned`
    pub fn unpair(&mut self, jet: usize, gen_jet: usize) {
        debug_assert!(matches!(
            self.jets[jet],
            MatchState::Matched { partner, .. } if partner == gen_jet
        ));
        debug_assert!(matches!(
            self.gen_jets[gen_jet],
            MatchState::Matched { partner, .. } if partner == jet
        ));
        self.jets[jet] = MatchState::Unassigned;
        self.gen_jets[gen_jet] = MatchState::Unassigned;
    }

    pub fn is_unassigned(&self, side: Side, idx: usize) -> bool {
        self.get(side, idx) == MatchState::Unassigned
    }

    /// Indices of all jets on one side that are still unassigned
    pub fn unassigned(&self, side: Side) -> impl Iterator<Item = usize> + '_ {
        self.states(side)
            .iter()
            .enumerate()
            .filter(|(_, s)| **s == MatchState::Unassigned)
            .map(|(idx, _)| idx)
    }

    pub fn excluded_gen_jet(&self) -> Option<usize> {
        self.gen_jets.iter().position(|s| *s == MatchState::Excluded)
    }
}

/// A reconstructed jet paired with a generator-level jet
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct Pair {
    pub jet: usize,
    pub gen_jet: usize,
    pub delta_r: f64,
    pub round: usize,
}

/// Greedy nearest-pair matching
///
/// In each round the pair of unassigned jets with the smallest ΔR is
/// selected and both jets are marked as matched. The loop ends as soon
/// as one side runs out of unassigned jets. Ties go to the pair found
/// first when scanning reconstructed jets in the outer and
/// generator-level jets in the inner loop.
///
/// This is not an optimal assignment: the sum of ΔR over all pairs is
/// generally not minimal.
pub fn greedy_match(
    jets: &[Jet],
    gen_jets: &[Jet],
    states: &mut MatchStates,
) -> Vec<Pair> {
    debug_assert_eq!(jets.len(), states.len(Side::Measured));
    debug_assert_eq!(gen_jets.len(), states.len(Side::Reference));

    let mut pairs = Vec::new();
    loop {
        let round = pairs.len() + 1;
        let mut best: Option<Pair> = None;
        for jet in states.unassigned(Side::Measured) {
            for gen_jet in states.unassigned(Side::Reference) {
                let delta_r = jets[jet].delta_r(&gen_jets[gen_jet]);
                trace!("round {round}: ΔR(jet {jet}, genjet {gen_jet}) = {delta_r}");
                if best.map_or(true, |best| delta_r < best.delta_r) {
                    best = Some(Pair {
                        jet,
                        gen_jet,
                        delta_r,
                        round,
                    });
                }
            }
        }
        let Some(best) = best else {
            break;
        };
        debug!(
            "round {round}: matched jet {} to genjet {} with ΔR = {}",
            best.jet, best.gen_jet, best.delta_r
        );
        states.pair(best.jet, best.gen_jet, round);
        pairs.push(best);
    }
    pairs
}

use crate::event::Side;
use crate::jet::Jet;
use crate::matching::{MatchStates, Pair};

use log::debug;
use serde::{Deserialize, Serialize};

pub const DEFAULT_MAX_DELTA_R: f64 = 1.;

/// Upper limit on the angular distance of an accepted pair
///
/// The limit is inclusive.
#[derive(Copy, Clone, PartialEq, Debug, Deserialize, Serialize)]
pub struct DeltaRCut {
    pub max_delta_r: f64,
}

impl Default for DeltaRCut {
    fn default() -> Self {
        Self {
            max_delta_r: DEFAULT_MAX_DELTA_R,
        }
    }
}

impl DeltaRCut {
    pub fn new(max_delta_r: f64) -> Self {
        Self { max_delta_r }
    }

    pub fn passes(&self, delta_r: f64) -> bool {
        delta_r <= self.max_delta_r
    }
}

/// Outcome of applying the ΔR cut to the pairs of one event
#[derive(Clone, PartialEq, Debug, Default)]
pub struct Classification {
    pub accepted: Vec<Pair>,
    /// Pairs that failed the cut; their jets are unassigned again
    pub rejected: Vec<Pair>,
    pub unmatched_jets: Vec<usize>,
    pub unmatched_gen_jets: Vec<usize>,
    pub excluded_gen_jet: Option<usize>,
}

impl Classification {
    pub fn unmatched(&self, side: Side) -> &[usize] {
        match side {
            Side::Measured => &self.unmatched_jets,
            Side::Reference => &self.unmatched_gen_jets,
        }
    }
}

/// Split matched pairs into accepted and rejected ones
///
/// The distance of each pair is recomputed from the jets. Both jets
/// of a rejected pair are reset to unassigned and end up in the
/// unmatched lists. Rejected jets are not matched again. Excluded
/// jets are never reported as unmatched.
pub fn classify(
    pairs: Vec<Pair>,
    jets: &[Jet],
    gen_jets: &[Jet],
    states: &mut MatchStates,
    cut: &DeltaRCut,
) -> Classification {
    let mut accepted = Vec::with_capacity(pairs.len());
    let mut rejected = Vec::new();
    for mut pair in pairs {
        pair.delta_r = jets[pair.jet].delta_r(&gen_jets[pair.gen_jet]);
        if cut.passes(pair.delta_r) {
            accepted.push(pair);
        } else {
            debug!(
                "rejecting jet {} and genjet {}: ΔR = {} > {}",
                pair.jet, pair.gen_jet, pair.delta_r, cut.max_delta_r
            );
            states.unpair(pair.jet, pair.gen_jet);
            rejected.push(pair);
        }
    }
    Classification {
        accepted,
        rejected,
        unmatched_jets: states.unassigned(Side::Measured).collect(),
        unmatched_gen_jets: states.unassigned(Side::Reference).collect(),
        excluded_gen_jet: states.excluded_gen_jet(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matching::greedy_match;

    #[test]
    fn boundary_is_inclusive() {
        let cut = DeltaRCut::default();
        assert!(cut.passes(1.));
        assert!(cut.passes(0.));
        assert!(!cut.passes(1. + f64::EPSILON));
    }

    #[test]
    fn rejected_pairs_become_unmatched() {
        let jets = [Jet::new(10., 0., 0.)];
        let gen_jets = [Jet::new(10., 1.5, 0.)];
        let mut states = MatchStates::new(1, 1);
        let pairs = greedy_match(&jets, &gen_jets, &mut states);
        assert_eq!(pairs.len(), 1);

        let res = classify(pairs, &jets, &gen_jets, &mut states, &DeltaRCut::default());
        assert!(res.accepted.is_empty());
        assert_eq!(res.rejected.len(), 1);
        assert_eq!(res.rejected[0].delta_r, 1.5);
        assert_eq!(res.unmatched_jets, [0]);
        assert_eq!(res.unmatched_gen_jets, [0]);
        assert!(states.is_unassigned(Side::Measured, 0));
        assert!(states.is_unassigned(Side::Reference, 0));
    }

    #[test]
    fn accepted_and_unmatched() {
        let jets = [Jet::new(10., 0., 0.), Jet::new(10., 3., 0.)];
        let gen_jets = [Jet::new(10., 0.2, 0.), Jet::new(10., -3., 0.)];
        let mut states = MatchStates::new(2, 2);
        states.exclude_gen_jet(1);
        let pairs = greedy_match(&jets, &gen_jets, &mut states);

        let res = classify(pairs, &jets, &gen_jets, &mut states, &DeltaRCut::new(0.5));
        assert_eq!(res.accepted.len(), 1);
        assert_eq!((res.accepted[0].jet, res.accepted[0].gen_jet), (0, 0));
        assert_eq!(res.unmatched(Side::Measured), [1]);
        assert!(res.unmatched(Side::Reference).is_empty());
        assert_eq!(res.excluded_gen_jet, Some(1));
    }
}

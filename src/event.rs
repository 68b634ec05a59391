use crate::jet::Jet;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

/// The jets observed in a single event
///
/// `jets` are the reconstructed (measured) jets, `gen_jets` the
/// generator-level (reference) jets. The position of a jet in its list
/// is its identity for the duration of the event.
#[derive(Clone, PartialEq, Debug, Default, Deserialize, Serialize)]
pub struct Event {
    #[serde(default)]
    pub jets: Vec<Jet>,
    #[serde(default)]
    pub gen_jets: Vec<Jet>,
}

impl Event {
    pub fn new(jets: Vec<Jet>, gen_jets: Vec<Jet>) -> Self {
        Self { jets, gen_jets }
    }

    pub fn jets(&self, side: Side) -> &[Jet] {
        match side {
            Side::Measured => &self.jets,
            Side::Reference => &self.gen_jets,
        }
    }
}

/// Which of the two jet lists of an event a jet belongs to
#[derive(
    Display,
    EnumIter,
    Copy,
    Clone,
    Eq,
    PartialEq,
    Ord,
    PartialOrd,
    Hash,
    Debug,
    Deserialize,
    Serialize,
)]
pub enum Side {
    #[strum(to_string = "jet")]
    Measured,
    #[strum(to_string = "genjet")]
    Reference,
}

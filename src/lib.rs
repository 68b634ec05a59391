#![warn(clippy::all, rust_2018_idioms)]

pub mod aggregator;
pub mod analysis;
pub mod classify;
pub mod config;
pub mod event;
pub mod histogram;
pub mod jet;
pub mod lepton;
pub mod matching;
pub mod plot;
pub mod reader;

pub use aggregator::{Aggregator, Samples};
pub use analysis::{Analysis, EventResult, RunSummary};
pub use config::{Settings, Variant};
pub use event::{Event, Side};
pub use histogram::Histograms;
pub use jet::{Constituent, Jet};
pub use reader::EventReader;

use std::io::Write;

use jetmatch::aggregator::samples;
use jetmatch::{Analysis, EventReader, Histograms, Settings, Variant};

const EVENTS: &str = r#"{"jets": [{"pt": 20.0, "eta": 0.0, "phi": 0.0}], "gen_jets": [{"pt": 21.0, "eta": 0.1, "phi": 0.0}]}
{"jets": [{"pt": 20.0, "eta": 0.0, "phi": 0.0}, {"pt": 15.0, "eta": 3.0, "phi": 0.0}], "gen_jets": [{"pt": 19.0, "eta": 0.0, "phi": 0.0}]}
{"jets": [], "gen_jets": [{"pt": 10.0, "eta": 0.0, "phi": 1.0}, {"pt": 10.0, "eta": 1.0, "phi": 1.0}, {"pt": 10.0, "eta": -1.0, "phi": 1.0}]}
{"jets": [{"pt": 30.0, "eta": 0.0, "phi": 0.0}], "gen_jets": [{"pt": 30.0, "eta": 1.5, "phi": 0.0}]}

{"jets": [{"pt": 25.0, "eta": 0.0, "phi": 0.0}], "gen_jets": [{"pt": 50.0, "eta": 0.0, "phi": 0.0, "constituents": [{"id": 11, "energy": 50.0, "eta": 0.05}]}, {"pt": 24.0, "eta": 0.2, "phi": 0.1, "constituents": [{"id": 11, "energy": 30.0, "eta": 0.2}, {"id": 22, "energy": 5.0, "eta": 0.3}]}]}
"#;

fn event_file() -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(EVENTS.as_bytes()).unwrap();
    file
}

fn run(settings: &Settings) -> (Analysis, Histograms) {
    let file = event_file();
    let mut analysis = Analysis::new(settings);
    let mut hists = Histograms::new(&settings.histograms);
    for event in EventReader::open(file.path()).unwrap() {
        analysis.process_event(&event.unwrap(), &mut hists);
    }
    (analysis, hists)
}

fn entries_1d(hists: &Histograms, name: &str) -> u64 {
    hists.get_1d(name).unwrap().entries()
}

#[test]
fn basic_run() {
    let (analysis, hists) = run(&Settings::default());
    let summary = analysis.summary();
    assert_eq!(summary.events, 5);
    // events 1, 2 and 5 give one accepted pair each, event 4 is cut
    assert_eq!(summary.accepted_pairs, 3);
    assert_eq!(summary.rejected_pairs, 1);
    // event 2: one, event 4: one
    assert_eq!(summary.unmatched_jets, 2);
    // event 3: three, event 4: one, event 5: one
    assert_eq!(summary.unmatched_gen_jets, 5);
    assert_eq!(summary.excluded_gen_jets, 0);

    assert_eq!(entries_1d(&hists, samples::DELTA_R), 3);
    assert_eq!(entries_1d(&hists, samples::UNMATCHED_JET_ENERGY), 2);
    assert_eq!(entries_1d(&hists, samples::UNMATCHED_GENJET_ENERGY), 5);
    assert_eq!(entries_1d(&hists, samples::ELECTRON_ETA), 0);
    assert_eq!(hists.get_2d(samples::ENERGY_DELTA_R).unwrap().entries(), 3);
}

#[test]
fn electron_veto_run() {
    let settings = Settings {
        variant: Variant::ElectronVeto,
        ..Default::default()
    };
    let (analysis, hists) = run(&settings);
    let summary = analysis.summary();
    assert_eq!(summary.excluded_gen_jets, 1);
    assert_eq!(summary.accepted_pairs, 3);
    // the hard electron jet in event 5 is no longer reported as unmatched
    assert_eq!(summary.unmatched_gen_jets, 4);

    let electron_eta = hists.get_1d(samples::ELECTRON_ETA).unwrap();
    assert_eq!(electron_eta.entries(), 1);
    let bin = match electron_eta.binning.locate(0.05) {
        jetmatch::histogram::Location::Bin(bin) => bin,
        loc => panic!("unexpected location {loc:?}"),
    };
    assert_eq!(electron_eta.counts[bin], 1);
}

#[test]
fn tighter_cut() {
    let settings = Settings {
        max_delta_r: 0.05,
        ..Default::default()
    };
    let (analysis, _) = run(&settings);
    // only the exact matches in events 2 and 5 survive
    assert_eq!(analysis.summary().accepted_pairs, 2);
    assert_eq!(analysis.summary().rejected_pairs, 2);
}

#[test]
fn unreadable_event_aborts() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "{{\"jets\": []}}").unwrap();
    writeln!(file, "not an event").unwrap();
    let events: Result<Vec<_>, _> = EventReader::open(file.path()).unwrap().collect();
    assert!(events.is_err());
    assert!(EventReader::open("/nonexistent/events.jsonl").is_err());
}

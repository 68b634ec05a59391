use std::fs::File;
use std::io::{BufRead, BufReader, Lines};
use std::path::{Path, PathBuf};

use crate::event::Event;

use anyhow::{Context, Result};
use log::{debug, trace};

/// Reader for event files with one JSON event record per line
///
/// Events are returned in file order. Blank lines are skipped.
#[derive(Debug)]
pub struct EventReader<R> {
    lines: Lines<R>,
    source: PathBuf,
    line_nr: usize,
}

impl EventReader<BufReader<File>> {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        debug!("Reading events from {path:?}");
        let file = File::open(path)
            .with_context(|| format!("Failed to open {path:?}"))?;
        Ok(Self::new(BufReader::new(file), path))
    }
}

impl<R: BufRead> EventReader<R> {
    pub fn new<P: AsRef<Path>>(reader: R, source: P) -> Self {
        Self {
            lines: reader.lines(),
            source: source.as_ref().to_owned(),
            line_nr: 0,
        }
    }
}

impl<R: BufRead> Iterator for EventReader<R> {
    type Item = Result<Event>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let line = self.lines.next()?;
            self.line_nr += 1;
            let line = match line.with_context(|| {
                format!("Failed to read line {} of {:?}", self.line_nr, self.source)
            }) {
                Ok(line) => line,
                Err(err) => return Some(Err(err)),
            };
            if line.trim().is_empty() {
                continue;
            }
            trace!("line {}: {line}", self.line_nr);
            let event = serde_json::from_str(&line).with_context(|| {
                format!(
                    "Failed to parse event in line {} of {:?}",
                    self.line_nr, self.source
                )
            });
            return Some(event);
        }
    }
}

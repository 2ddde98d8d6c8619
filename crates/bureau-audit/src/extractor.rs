//! Line scanning: turns raw log lines into recorded occurrences.
//!
//! Every line is tested against every category pattern in declaration
//! order, and independently against the bare timestamp pattern so the
//! last timestamp in the whole log can serve as the reference "now".

use bureau_types::{EntityId, Occurrence};
use tracing::{debug, trace};

use crate::catalog::Catalog;
use crate::recorder::LifecycleRecorder;

/// Stateless matcher over a borrowed [`Catalog`].
#[derive(Clone, Copy, Debug)]
pub struct EventExtractor<'c> {
    catalog: &'c Catalog,
}

impl<'c> EventExtractor<'c> {
    pub fn new(catalog: &'c Catalog) -> Self {
        Self { catalog }
    }

    /// Occurrences on `line`, one per matching category, in declaration order.
    pub fn extract(&self, line_no: usize, line: &str) -> Vec<Occurrence> {
        self.catalog
            .matchers()
            .iter()
            .filter_map(|matcher| {
                let caps = matcher.regex().captures(line)?;
                Some(Occurrence::new(
                    matcher.category(),
                    EntityId::new(&caps["id"]),
                    &caps["time"],
                    line_no,
                ))
            })
            .collect()
    }

    /// First timestamp anywhere on `line`.
    pub fn timestamp<'l>(&self, line: &'l str) -> Option<&'l str> {
        self.catalog
            .timestamp_regex()
            .find(line)
            .map(|m| m.as_str())
    }
}

/// Everything the scanning pass learned about a log.
#[derive(Clone, Debug, Default)]
pub struct AuditLog {
    pub recorder: LifecycleRecorder,
    /// Raw text of the timestamp on the last timestamp-bearing line.
    pub last_timestamp: Option<String>,
    /// Number of lines consumed.
    pub lines: usize,
}

/// Single-pass accumulator. Line numbers are 1-based and keep counting
/// across everything fed to the same scanner.
#[derive(Debug)]
pub struct LogScanner<'c> {
    extractor: EventExtractor<'c>,
    log: AuditLog,
    matched: usize,
}

impl<'c> LogScanner<'c> {
    pub fn new(catalog: &'c Catalog) -> Self {
        Self {
            extractor: EventExtractor::new(catalog),
            log: AuditLog::default(),
            matched: 0,
        }
    }

    pub fn feed(&mut self, line: &str) {
        self.log.lines += 1;
        let line_no = self.log.lines;

        for occurrence in self.extractor.extract(line_no, line) {
            trace!(
                line = line_no,
                id = %occurrence.entity_id,
                category = %occurrence.category,
                "matched lifecycle event"
            );
            self.matched += 1;
            if let Some(prev) = self.log.recorder.record(occurrence) {
                trace!(
                    line = line_no,
                    previous_line = prev.line,
                    id = %prev.entity_id,
                    category = %prev.category,
                    "earlier occurrence overwritten"
                );
            }
        }

        if let Some(ts) = self.extractor.timestamp(line) {
            self.log.last_timestamp = Some(ts.to_string());
        }
    }

    pub fn finish(self) -> AuditLog {
        debug!(
            lines = self.log.lines,
            matched = self.matched,
            entities = self.log.recorder.len(),
            last_timestamp = self.log.last_timestamp.as_deref().unwrap_or("<none>"),
            "finished scanning log"
        );
        self.log
    }
}

/// Scan an in-memory line sequence in one go.
pub fn scan_lines<I, S>(catalog: &Catalog, lines: I) -> AuditLog
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut scanner = LogScanner::new(catalog);
    for line in lines {
        scanner.feed(line.as_ref());
    }
    scanner.finish()
}

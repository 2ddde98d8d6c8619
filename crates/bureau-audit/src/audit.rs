use serde::Serialize;
use tracing::info;

use crate::bureau::BureauLookup;
use crate::catalog::Catalog;
use crate::config::AuditConfig;
use crate::extractor::{AuditLog, scan_lines};
use crate::report::{ReportLine, Reporter};
use crate::summary::LifecycleSummary;

/// Result of auditing one log.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct AuditReport {
    pub lines_scanned: usize,
    pub entities: usize,
    /// Timestamp elapsed times are measured against.
    pub reference_time: Option<String>,
    pub summary: Option<LifecycleSummary>,
    pub findings: Vec<ReportLine>,
}

impl AuditReport {
    /// Human-readable output: progress markers, optional summary, findings.
    pub fn lines(&self) -> Vec<String> {
        let mut out = Vec::with_capacity(self.findings.len() + 3);
        out.push("Reading log".to_string());
        if let Some(summary) = &self.summary {
            out.push(summary.to_string());
        }
        out.push("Checking".to_string());
        out.extend(self.findings.iter().map(ToString::to_string));
        out
    }

    pub fn invalid_count(&self) -> usize {
        self.findings
            .iter()
            .filter(|line| matches!(line, ReportLine::Invalid { .. }))
            .count()
    }

    pub fn partial_count(&self) -> usize {
        self.findings
            .iter()
            .filter(|line| matches!(line, ReportLine::Partial { .. }))
            .count()
    }
}

/// Check every agent in an already-scanned log.
pub fn check_log(
    catalog: &Catalog,
    config: AuditConfig,
    bureaus: &dyn BureauLookup,
    log: &AuditLog,
) -> AuditReport {
    let summary = config
        .summary
        .then(|| LifecycleSummary::from_recorder(&log.recorder));

    let reporter = Reporter::new(catalog, &log.recorder, config).with_bureau_lookup(bureaus);
    let findings = reporter.check_all(&log.recorder.entity_ids(), log.last_timestamp.as_deref());

    let report = AuditReport {
        lines_scanned: log.lines,
        entities: log.recorder.len(),
        reference_time: log.last_timestamp.clone(),
        summary,
        findings,
    };
    info!(
        lines = report.lines_scanned,
        entities = report.entities,
        invalid = report.invalid_count(),
        partial = report.partial_count(),
        "audit complete"
    );
    report
}

/// Scan `lines` and check every agent found, with the unresolved bureau lookup.
pub fn audit<I, S>(catalog: &Catalog, config: AuditConfig, lines: I) -> AuditReport
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let log = scan_lines(catalog, lines);
    check_log(catalog, config, &crate::bureau::UnresolvedBureau, &log)
}

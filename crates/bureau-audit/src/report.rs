//! Rendering of per-agent findings.

use std::fmt;

use bureau_types::{EntityId, LifecyclePath, describe_duration, parse_timestamp};
use chrono::TimeDelta;
use serde::Serialize;
use tracing::{debug, warn};

use crate::bureau::{Bureau, BureauLookup, UnresolvedBureau};
use crate::catalog::Catalog;
use crate::config::AuditConfig;
use crate::error::AuditError;
use crate::path::build_path;
use crate::recorder::LifecycleRecorder;
use crate::validator::{PathMatch, classify};

/// One line of per-agent output.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ReportLine {
    /// Verbose-only progress marker emitted before each agent.
    Checking { id: EntityId },
    Invalid {
        id: EntityId,
        bureau: Bureau,
        path: LifecyclePath,
        description: String,
    },
    Partial {
        id: EntityId,
        bureau: Bureau,
        path: LifecyclePath,
        canonical: usize,
        description: String,
    },
    /// Verbose-only.
    Exact {
        id: EntityId,
        path: LifecyclePath,
        canonical: usize,
        description: String,
    },
}

impl fmt::Display for ReportLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Checking { id } => write!(f, "Checking {id}"),
            Self::Invalid {
                id,
                bureau,
                description,
                ..
            } => write!(f, "Path for id {id} (bureau {bureau}) invalid: {description}"),
            Self::Partial {
                id,
                bureau,
                description,
                ..
            } => write!(
                f,
                "Path for id {id} (bureau {bureau}) partially matched: {description}"
            ),
            Self::Exact { description, .. } => f.write_str(description),
        }
    }
}

/// Checks every agent in a scanned log and renders what it finds.
pub struct Reporter<'a> {
    catalog: &'a Catalog,
    recorder: &'a LifecycleRecorder,
    bureaus: &'a dyn BureauLookup,
    config: AuditConfig,
}

impl<'a> Reporter<'a> {
    pub fn new(catalog: &'a Catalog, recorder: &'a LifecycleRecorder, config: AuditConfig) -> Self {
        Self {
            catalog,
            recorder,
            bureaus: &UnresolvedBureau,
            config,
        }
    }

    pub fn with_bureau_lookup(mut self, bureaus: &'a dyn BureauLookup) -> Self {
        self.bureaus = bureaus;
        self
    }

    /// Time from the last stage of `path` for `id` to `now`.
    ///
    /// `Ok(None)` when the path is empty or its last stage was never
    /// recorded for `id`.
    pub fn elapsed(
        &self,
        id: &EntityId,
        path: &LifecyclePath,
        now: Option<&str>,
    ) -> Result<Option<TimeDelta>, AuditError> {
        let Some(last) = path
            .last()
            .and_then(|category| self.recorder.occurrence(id, category))
        else {
            return Ok(None);
        };
        let now = parse_timestamp(now.ok_or(AuditError::MissingReferenceTime)?)?;
        let then = parse_timestamp(&last.timestamp)?;
        Ok(Some(now - then))
    }

    /// Stage names joined by `", "`, followed by `" (<duration> ago)"` when
    /// an elapsed time can be computed. Failing to compute one drops the
    /// suffix rather than the line.
    pub fn describe(&self, id: &EntityId, path: &LifecyclePath, now: Option<&str>) -> String {
        let names = path.to_string();
        match self.elapsed(id, path, now) {
            Ok(Some(delta)) => format!("{names} ({} ago)", describe_duration(delta)),
            Ok(None) => names,
            Err(AuditError::MissingReferenceTime) => {
                debug!(%id, "no reference time, omitting elapsed time");
                names
            }
            Err(err) => {
                warn!(%id, error = %err, "could not compute elapsed time");
                names
            }
        }
    }

    /// Classify one agent and render its lines.
    pub fn check(&self, id: &EntityId, now: Option<&str>) -> Vec<ReportLine> {
        let mut lines = Vec::new();
        if self.config.verbose {
            lines.push(ReportLine::Checking { id: id.clone() });
        }

        let path = build_path(self.catalog, self.recorder, id);
        let outcome = classify(&path, self.catalog.canonical_paths());
        debug!(%id, %path, ?outcome, "classified lifecycle");

        match outcome {
            PathMatch::Invalid => lines.push(ReportLine::Invalid {
                id: id.clone(),
                bureau: self.bureaus.bureau_for(id, &path),
                description: self.describe(id, &path, now),
                path,
            }),
            PathMatch::Partial { canonical } => lines.push(ReportLine::Partial {
                id: id.clone(),
                bureau: self.bureaus.bureau_for(id, &path),
                description: self.describe(id, &path, now),
                canonical,
                path,
            }),
            PathMatch::Exact { canonical } if self.config.verbose => {
                lines.push(ReportLine::Exact {
                    id: id.clone(),
                    description: self.describe(id, &path, now),
                    canonical,
                    path,
                })
            }
            PathMatch::Exact { .. } => {}
        }
        lines
    }

    /// Check every id in ascending numeric order.
    pub fn check_all<'i, I>(&self, ids: I, now: Option<&str>) -> Vec<ReportLine>
    where
        I: IntoIterator<Item = &'i EntityId>,
    {
        let mut ids: Vec<&EntityId> = ids.into_iter().collect();
        ids.sort();
        ids.into_iter().flat_map(|id| self.check(id, now)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bureau_types::{Category, Occurrence};
    use Category::*;

    /// Recorder fixture that hands out increasing line numbers.
    #[derive(Default)]
    struct Fixture {
        recorder: LifecycleRecorder,
        next_line: usize,
    }

    impl Fixture {
        fn add(&mut self, category: Category, id: &str, ts: &str) -> &mut Self {
            self.next_line += 1;
            self.recorder
                .record(Occurrence::new(category, id.into(), ts, self.next_line));
            self
        }
    }

    fn rendered(lines: &[ReportLine]) -> String {
        lines
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("\n")
    }

    struct FixedBureau;

    impl BureauLookup for FixedBureau {
        fn bureau_for(&self, id: &EntityId, _path: &LifecyclePath) -> Bureau {
            Bureau::Known(format!("bureau-{id}"))
        }
    }

    #[test]
    fn describe_appends_elapsed_since_last_stage() {
        let catalog = Catalog::bureau().unwrap();
        let mut fx = Fixture::default();
        fx.add(Pending, "5", "2024/01/15 10:00:00:000");
        fx.add(Destroy, "5", "2024/01/15 10:28:00:000");
        let reporter = Reporter::new(&catalog, &fx.recorder, AuditConfig::default());

        let path = build_path(&catalog, &fx.recorder, &"5".into());
        let text = reporter.describe(&"5".into(), &path, Some("2024/01/15 10:30:05:000"));

        assert_eq!(text, "Pending, Destroy (2 minutes ago)");
    }

    #[test]
    fn describe_without_reference_time_omits_suffix() {
        let catalog = Catalog::bureau().unwrap();
        let mut fx = Fixture::default();
        fx.add(Pending, "5", "2024/01/15 10:00:00:000");
        let reporter = Reporter::new(&catalog, &fx.recorder, AuditConfig::default());
        let path = build_path(&catalog, &fx.recorder, &"5".into());

        assert!(matches!(
            reporter.elapsed(&"5".into(), &path, None),
            Err(AuditError::MissingReferenceTime)
        ));
        assert_eq!(reporter.describe(&"5".into(), &path, None), "Pending");
    }

    #[test_log::test]
    fn describe_with_bad_calendar_date_omits_suffix() {
        let catalog = Catalog::bureau().unwrap();
        let mut fx = Fixture::default();
        fx.add(Pending, "5", "2024/13/15 10:00:00:000");
        let reporter = Reporter::new(&catalog, &fx.recorder, AuditConfig::default());
        let path = build_path(&catalog, &fx.recorder, &"5".into());
        let now = Some("2024/01/15 10:00:00:000");

        assert!(matches!(
            reporter.elapsed(&"5".into(), &path, now),
            Err(AuditError::MalformedTimestamp(_))
        ));
        assert_eq!(reporter.describe(&"5".into(), &path, now), "Pending");
    }

    #[test]
    fn describe_empty_path_is_empty() {
        let catalog = Catalog::bureau().unwrap();
        let recorder = LifecycleRecorder::new();
        let reporter = Reporter::new(&catalog, &recorder, AuditConfig::default());
        let text = reporter.describe(
            &"1".into(),
            &LifecyclePath::default(),
            Some("2024/01/15 10:00:00:000"),
        );
        assert_eq!(text, "");
    }

    #[test]
    fn check_all_reports_invalid_and_partial_only() {
        let catalog = Catalog::bureau().unwrap();
        let mut fx = Fixture::default();
        // exact: Pending, Destroy
        fx.add(Pending, "30", "2024/01/15 10:00:00:000");
        fx.add(Destroy, "30", "2024/01/15 10:05:00:000");
        // invalid
        fx.add(Destroy, "4", "2024/01/15 09:00:00:000");
        fx.add(ImmediateCreation, "4", "2024/01/15 09:10:00:000");
        // partial
        fx.add(ImmediateCreation, "200", "2024/01/14 10:00:00:000");
        let reporter = Reporter::new(&catalog, &fx.recorder, AuditConfig::default());

        let lines = reporter.check_all(&fx.recorder.entity_ids(), Some("2024/01/16 10:00:00:000"));

        insta::assert_snapshot!(rendered(&lines), @r"
        Path for id 4 (bureau ??) invalid: Destroy, Immediate Creation (1 days ago)
        Path for id 200 (bureau ??) partially matched: Immediate Creation (2 days ago)
        ");
    }

    #[test]
    fn verbose_adds_checking_markers_and_exact_matches() {
        let catalog = Catalog::bureau().unwrap();
        let mut fx = Fixture::default();
        fx.add(Pending, "9", "2024/01/15 10:00:00:000");
        fx.add(Destroy, "9", "2024/01/15 10:00:30:000");
        fx.add(Pending, "10", "2024/01/15 10:00:40:000");
        let reporter = Reporter::new(&catalog, &fx.recorder, AuditConfig::default().verbose(true));

        let lines = reporter.check_all(&fx.recorder.entity_ids(), Some("2024/01/15 10:01:00:000"));

        insta::assert_snapshot!(rendered(&lines), @r"
        Checking 9
        Pending, Destroy (30 seconds ago)
        Checking 10
        Path for id 10 (bureau ??) partially matched: Pending (20 seconds ago)
        ");
        assert_eq!(
            lines[1],
            ReportLine::Exact {
                id: "9".into(),
                path: LifecyclePath::new(vec![Pending, Destroy]),
                canonical: 0,
                description: "Pending, Destroy (30 seconds ago)".into(),
            }
        );
    }

    #[test]
    fn bureau_lookup_is_pluggable() {
        let catalog = Catalog::bureau().unwrap();
        let mut fx = Fixture::default();
        fx.add(ConfirmedCreated, "3", "2024/01/15 10:00:00:000");
        let reporter = Reporter::new(&catalog, &fx.recorder, AuditConfig::default())
            .with_bureau_lookup(&FixedBureau);

        let lines = reporter.check(&"3".into(), None);

        assert_eq!(rendered(&lines), "Path for id 3 (bureau bureau-3) invalid: Confirmed created");
    }

    #[test]
    fn report_line_serializes_with_kind_tag() {
        let line = ReportLine::Invalid {
            id: "4".into(),
            bureau: Bureau::Unknown,
            path: LifecyclePath::new(vec![Destroy]),
            description: "Destroy".into(),
        };
        let json = serde_json::to_value(&line).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "kind": "invalid",
                "id": "4",
                "bureau": "unknown",
                "path": ["Destroy"],
                "description": "Destroy",
            })
        );
    }
}

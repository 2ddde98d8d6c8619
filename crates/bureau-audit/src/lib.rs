//! Bureau log lifecycle audit.
//!
//! Reconstructs every agent's lifecycle from the bureau registry's log lines
//! and flags agents whose observed sequence of stages is not one of the
//! known-valid lifecycles.
//!
//! Pipeline, all single-pass and synchronous:
//! - [`extractor`]: match each line against every [`Category`] pattern and
//!   remember the last timestamp seen anywhere.
//! - [`recorder`]: keep the latest occurrence per `(agent, category)`.
//! - [`path`]: order an agent's stages by line number.
//! - [`validator`]: classify the ordered stages as exact, partial or invalid.
//! - [`report`]: render findings with elapsed time since the last stage.
//!
//! [`Category`]: bureau_types::Category

pub mod audit;
pub mod bureau;
pub mod catalog;
pub mod config;
pub mod error;
pub mod extractor;
pub mod path;
pub mod recorder;
pub mod report;
pub mod summary;
pub mod validator;

pub use audit::{AuditReport, audit, check_log};
pub use bureau::{Bureau, BureauLookup, UnresolvedBureau};
pub use catalog::{Catalog, CategoryMatcher, canonical_lifecycles};
pub use config::AuditConfig;
pub use error::AuditError;
pub use extractor::{AuditLog, EventExtractor, LogScanner, scan_lines};
pub use path::build_path;
pub use recorder::LifecycleRecorder;
pub use report::{ReportLine, Reporter};
pub use summary::LifecycleSummary;
pub use validator::{PathMatch, classify};

use bureau_types::TimestampError;

/// Errors produced while auditing a bureau log.
#[derive(Debug, thiserror::Error)]
pub enum AuditError {
    #[error("malformed timestamp: {0}")]
    MalformedTimestamp(#[from] TimestampError),
    /// No line in the log carried a timestamp, so there is no "now" to
    /// measure elapsed time against.
    #[error("no timestamped line in the log to measure elapsed time from")]
    MissingReferenceTime,
    #[error("invalid line pattern: {0}")]
    InvalidPattern(#[from] regex::Error),
}

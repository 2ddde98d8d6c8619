use thiserror;

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum TimestampError {
    #[error("malformed timestamp '{text}': expected YYYY/MM/DD HH:MM:SS:mmm")]
    Malformed { text: String },
    #[error("timestamp '{text}' is not a valid calendar date or time")]
    OutOfRange { text: String },
}

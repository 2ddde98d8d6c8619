pub mod category;
pub mod entity_id;
pub mod error;
pub mod occurrence;
pub mod path;
pub mod timestamp;

pub use category::Category;
pub use entity_id::EntityId;
pub use error::TimestampError;
pub use occurrence::Occurrence;
pub use path::{CanonicalPath, LifecyclePath};
pub use timestamp::{TIMESTAMP_LEN, describe_duration, parse_timestamp};

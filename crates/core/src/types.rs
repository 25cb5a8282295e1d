/// Item definition index as used by the upstream schema.
pub type Defindex = u32;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

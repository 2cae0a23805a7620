/// All entity primary keys are UUID v4.
pub type EntityId = uuid::Uuid;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// One entry in an entity's ordered qualifier list: a key-value map.
/// `BTreeMap` keeps key order stable across encode/decode.
pub type QualifierMap = std::collections::BTreeMap<String, String>;


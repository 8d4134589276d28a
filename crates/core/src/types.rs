/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Documents and activity events are keyed by UUID strings on the wire.
pub type EntityId = String;

/// Generate a fresh random entity id.
pub fn new_entity_id() -> EntityId {
    uuid::Uuid::new_v4().to_string()
}

use uuid::Uuid;

/// Source of candidate order ids.
///
/// Uniqueness is not this trait's job: the store rejects a colliding id with
/// a conditional write and the caller asks for another one.
pub trait IdGenerator: Send + Sync {
    /// Returns a new candidate id.
    fn next_id(&self) -> String;
}

/// Random UUID v4 ids.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidGenerator;

impl IdGenerator for UuidGenerator {
    fn next_id(&self) -> String {
        Uuid::new_v4().to_string()
    }
}

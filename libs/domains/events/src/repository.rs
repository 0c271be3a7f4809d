//! Event repository trait

use crate::error::Result;
use crate::models::{Event, EventChanges, EventId, NewEvent, UpdateOutcome};
use async_trait::async_trait;

/// Storage operations the event service relies on
#[async_trait]
pub trait EventRepository: Send + Sync {
    /// Store a new event; the store assigns the identifier
    async fn insert(&self, event: NewEvent) -> Result<EventId>;

    async fn find_by_id(&self, id: &EventId) -> Result<Option<Event>>;

    /// Events ordered by `schedule` descending, newest identifier first on ties
    async fn find_latest(&self, skip: u64, limit: u64) -> Result<Vec<Event>>;

    /// Total number of stored events
    async fn count(&self) -> Result<u64>;

    /// Partial merge of `changes` into the matching event
    async fn update(&self, id: &EventId, changes: EventChanges) -> Result<UpdateOutcome>;

    /// Returns the number of deleted events (0 or 1)
    async fn delete(&self, id: &EventId) -> Result<u64>;
}

#[cfg(test)]
pub mod mock {
    use super::*;
    use mockall::mock;

    mock! {
        pub EventRepository {}

        #[async_trait]
        impl EventRepository for EventRepository {
            async fn insert(&self, event: NewEvent) -> Result<EventId>;
            async fn find_by_id(&self, id: &EventId) -> Result<Option<Event>>;
            async fn find_latest(&self, skip: u64, limit: u64) -> Result<Vec<Event>>;
            async fn count(&self) -> Result<u64>;
            async fn update(&self, id: &EventId, changes: EventChanges) -> Result<UpdateOutcome>;
            async fn delete(&self, id: &EventId) -> Result<u64>;
        }
    }
}

//! In-memory event store shared by the handler tests

use async_trait::async_trait;
use domain_events::{
    Event, EventChanges, EventId, EventRepository, NewEvent, Result, UpdateOutcome,
};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Thread-safe map standing in for the events collection
#[derive(Clone, Default)]
pub struct InMemoryEventRepository {
    events: Arc<Mutex<HashMap<EventId, Event>>>,
}

impl InMemoryEventRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.events.lock().unwrap().len()
    }

    pub fn get(&self, id: &EventId) -> Option<Event> {
        self.events.lock().unwrap().get(id).cloned()
    }
}

#[async_trait]
impl EventRepository for InMemoryEventRepository {
    async fn insert(&self, event: NewEvent) -> Result<EventId> {
        let id = EventId::new();
        self.events.lock().unwrap().insert(id, event.with_id(id));
        Ok(id)
    }

    async fn find_by_id(&self, id: &EventId) -> Result<Option<Event>> {
        Ok(self.get(id))
    }

    async fn find_latest(&self, skip: u64, limit: u64) -> Result<Vec<Event>> {
        let mut events: Vec<Event> = self.events.lock().unwrap().values().cloned().collect();
        events.sort_by(|a, b| b.schedule.cmp(&a.schedule).then(b.id.cmp(&a.id)));
        Ok(events
            .into_iter()
            .skip(skip as usize)
            .take(limit as usize)
            .collect())
    }

    async fn count(&self) -> Result<u64> {
        Ok(self.len() as u64)
    }

    async fn update(&self, id: &EventId, changes: EventChanges) -> Result<UpdateOutcome> {
        let mut events = self.events.lock().unwrap();
        let Some(event) = events.get_mut(id) else {
            return Ok(UpdateOutcome::default());
        };
        let before = event.clone();
        event.apply_changes(&changes);
        Ok(UpdateOutcome {
            matched: 1,
            modified: u64::from(*event != before),
        })
    }

    async fn delete(&self, id: &EventId) -> Result<u64> {
        Ok(u64::from(self.events.lock().unwrap().remove(id).is_some()))
    }
}

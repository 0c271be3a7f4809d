//! Event service layer

use crate::error::{EventError, ID_REQUIRED, Result};
use crate::models::{
    CreateEvent, Event, EventId, EventPage, PageRequest, Pagination, UpdateEvent, now,
};
use crate::repository::EventRepository;
use serde_json::{Map, Value};
use std::sync::Arc;
use tracing::{info, instrument};

/// Validates requests and coordinates the repository
pub struct EventService<R: EventRepository> {
    repository: Arc<R>,
}

impl<R: EventRepository> Clone for EventService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}

/// Identifier from a request: must be present, non-empty and well formed
fn parse_id(raw: Option<&str>) -> Result<EventId> {
    match raw.map(str::trim) {
        None | Some("") => Err(EventError::validation(ID_REQUIRED)),
        Some(raw) => raw.parse(),
    }
}

impl<R: EventRepository> EventService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// Get a single event by identifier
    #[instrument(skip(self))]
    pub async fn get(&self, id: Option<&str>) -> Result<Event> {
        let id = parse_id(id)?;
        self.repository
            .find_by_id(&id)
            .await?
            .ok_or_else(|| EventError::NotFound(id.to_string()))
    }

    /// Latest events first, one page at a time
    #[instrument(skip(self))]
    pub async fn list_latest(&self, request: PageRequest) -> Result<EventPage> {
        let total = self.repository.count().await?;
        let skip = request.skip();
        let events = if skip >= total {
            Vec::new()
        } else {
            self.repository.find_latest(skip, request.limit).await?
        };

        Ok(EventPage {
            events,
            pagination: Pagination::new(request, total),
        })
    }

    /// Validate, default and store a new event
    #[instrument(skip(self, body))]
    pub async fn create(&self, body: Map<String, Value>) -> Result<EventId> {
        let new_event = CreateEvent::from_body(body)?.into_new_event(now())?;
        let id = self.repository.insert(new_event).await?;
        info!(event_id = %id, "Event created");
        Ok(id)
    }

    /// Partially update an event, returning the modified count
    #[instrument(skip(self, body))]
    pub async fn update(&self, id: Option<&str>, body: Map<String, Value>) -> Result<u64> {
        let id = parse_id(id)?;
        let changes = UpdateEvent::from_body(body)?.into_changes(now())?;

        let outcome = self.repository.update(&id, changes).await?;
        if outcome.matched == 0 {
            return Err(EventError::NotFound(id.to_string()));
        }
        info!(event_id = %id, modified = outcome.modified, "Event updated");
        Ok(outcome.modified)
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: Option<&str>) -> Result<()> {
        let id = parse_id(id)?;
        if self.repository.delete(&id).await? == 0 {
            return Err(EventError::NotFound(id.to_string()));
        }
        info!(event_id = %id, "Event deleted");
        Ok(())
    }
}

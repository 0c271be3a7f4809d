//! Events Domain
//!
//! CRUD over event documents stored in MongoDB.
//!
//! ```text
//! HTTP ─► handlers ─► EventService ─► EventRepository ─► MongoDB
//!                      (validation,     (MongoEventRepository
//!                       coercion)        or any test double)
//! ```
//!
//! Every response uses the `{ success, data?, message?, pagination? }` envelope
//! from `axum-helpers`.

use utoipa::OpenApi;

pub mod coerce;
mod error;
pub mod handlers;
mod models;
mod mongodb;
mod repository;
mod service;

pub use error::{EventError, Result};
pub use handlers::{CreatedEvent, EventsState, UpdatedEvent, events_router};
pub use models::{
    CreateEvent, DEFAULT_LIMIT, DEFAULT_PAGE, EVENT_TYPE, Event, EventChanges, EventFiles,
    EventId, EventPage, EventsQuery, NewEvent, PageRequest, Pagination, UpdateEvent,
    UpdateOutcome,
};
pub use self::mongodb::{COLLECTION_NAME, MongoEventRepository};
pub use repository::EventRepository;
pub use service::EventService;

/// Client-facing messages
pub mod messages {
    pub use crate::error::{
        ID_REQUIRED, INVALID_ID, INVALID_LIMIT, INVALID_PAGE, INVALID_SCHEDULE, NAME_REQUIRED,
        NOT_FOUND, NO_UPDATE_FIELDS,
    };
    pub use crate::handlers::{CREATED_MESSAGE, DELETED_MESSAGE, UPDATED_MESSAGE};
}

/// OpenAPI documentation for the events API
#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::get_events,
        handlers::create_event,
        handlers::update_event,
        handlers::delete_event,
    ),
    components(
        schemas(
            Event,
            EventFiles,
            CreateEvent,
            UpdateEvent,
            Pagination,
            CreatedEvent,
            UpdatedEvent,
        ),
        responses(
            axum_helpers::errors::responses::BadRequestResponse,
            axum_helpers::errors::responses::NotFoundResponse,
            axum_helpers::errors::responses::InternalServerErrorResponse,
        )
    ),
    tags(
        (name = "events", description = "Event documents stored in MongoDB")
    )
)]
pub struct ApiDoc;

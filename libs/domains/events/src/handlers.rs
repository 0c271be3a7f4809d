//! HTTP handlers for the events API

use crate::error::EventError;
use crate::models::{CreateEvent, Event, EventId, EventsQuery, Pagination, UpdateEvent};
use crate::repository::EventRepository;
use crate::service::EventService;
use axum::Router;
use axum::extract::rejection::QueryRejection;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, put};
use axum_helpers::errors::responses::{
    BadRequestResponse, InternalServerErrorResponse, NotFoundResponse,
};
use axum_helpers::{ApiResponse, JsonObject};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, instrument};
use utoipa::ToSchema;

pub const CREATED_MESSAGE: &str = "Event created successfully";
pub const UPDATED_MESSAGE: &str = "Event updated successfully";
pub const DELETED_MESSAGE: &str = "Event deleted successfully";

/// Events router state
pub type EventsState<R> = Arc<EventService<R>>;

/// `data` of a create response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CreatedEvent {
    #[schema(value_type = String, example = "65a1f0c2e4b0a1b2c3d4e5f6")]
    pub id: EventId,
}

/// `data` of an update response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UpdatedEvent {
    #[serde(rename = "modifiedCount")]
    pub modified_count: u64,
}

/// Create the events router
pub fn events_router<R: EventRepository + 'static>() -> Router<EventsState<R>> {
    Router::new()
        .route("/events", get(get_events::<R>).post(create_event::<R>))
        .route("/events/{id}", put(update_event::<R>).delete(delete_event::<R>))
}

/// Events routes with their state applied
pub fn router<R: EventRepository + 'static>(service: EventService<R>) -> Router {
    events_router().with_state(Arc::new(service))
}

/// Get one event (`?id=`) or the latest events page by page
#[utoipa::path(
    get,
    path = "/events",
    params(EventsQuery),
    responses(
        (status = 200, description = "The event, or a page of events with pagination metadata", body = Vec<Event>),
        (status = 400, response = BadRequestResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    ),
    tag = "events"
)]
#[instrument(skip(state, query))]
pub async fn get_events<R: EventRepository>(
    State(state): State<EventsState<R>>,
    query: Result<Query<EventsQuery>, QueryRejection>,
) -> Result<Response, EventError> {
    let Query(query) = query.map_err(|e| EventError::validation(e.body_text()))?;

    if let Some(id) = query.id.as_deref() {
        let event = state.get(Some(id)).await?;
        return Ok(ApiResponse::ok(event).into_response());
    }

    if let Some(kind) = query.kind.as_deref().filter(|kind| *kind != "latest") {
        debug!(kind, "Unrecognised listing type, falling back to latest");
    }

    let page = state.list_latest(query.page_request()?).await?;
    Ok(ApiResponse::ok(page.events)
        .with_pagination::<Pagination>(page.pagination)
        .into_response())
}

/// Create a new event
#[utoipa::path(
    post,
    path = "/events",
    request_body = CreateEvent,
    responses(
        (status = 201, description = "Event created", body = CreatedEvent),
        (status = 400, response = BadRequestResponse),
        (status = 500, response = InternalServerErrorResponse)
    ),
    tag = "events"
)]
#[instrument(skip(state, body))]
pub async fn create_event<R: EventRepository>(
    State(state): State<EventsState<R>>,
    JsonObject(body): JsonObject,
) -> Result<impl IntoResponse, EventError> {
    let id = state.create(body).await?;
    Ok((
        StatusCode::CREATED,
        ApiResponse::ok(CreatedEvent { id }).with_message(CREATED_MESSAGE),
    ))
}

/// Partially update an event
#[utoipa::path(
    put,
    path = "/events/{id}",
    params(
        ("id" = String, Path, description = "Event ID (24-character hex)")
    ),
    request_body = UpdateEvent,
    responses(
        (status = 200, description = "Event updated", body = UpdatedEvent),
        (status = 400, response = BadRequestResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    ),
    tag = "events"
)]
#[instrument(skip(state, body))]
pub async fn update_event<R: EventRepository>(
    State(state): State<EventsState<R>>,
    Path(id): Path<String>,
    JsonObject(body): JsonObject,
) -> Result<impl IntoResponse, EventError> {
    let modified_count = state.update(Some(&id), body).await?;
    Ok(ApiResponse::ok(UpdatedEvent { modified_count }).with_message(UPDATED_MESSAGE))
}

/// Delete an event
#[utoipa::path(
    delete,
    path = "/events/{id}",
    params(
        ("id" = String, Path, description = "Event ID (24-character hex)")
    ),
    responses(
        (status = 200, description = "Event deleted"),
        (status = 400, response = BadRequestResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    ),
    tag = "events"
)]
#[instrument(skip(state))]
pub async fn delete_event<R: EventRepository>(
    State(state): State<EventsState<R>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, EventError> {
    state.delete(Some(&id)).await?;
    Ok(ApiResponse::message_only(DELETED_MESSAGE))
}

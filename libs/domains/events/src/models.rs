//! Event domain models

use crate::coerce;
use crate::error::{EventError, INVALID_LIMIT, INVALID_PAGE, NAME_REQUIRED, NO_UPDATE_FIELDS, Result};
use chrono::{DateTime, SubsecRound, Utc};
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

/// Value of the `type` discriminator on every stored event
pub const EVENT_TYPE: &str = "event";

pub const DEFAULT_LIMIT: u64 = 5;
pub const DEFAULT_PAGE: u64 = 1;

/// Keys that an update body may carry but that never reach the store
const RESERVED_UPDATE_KEYS: [&str; 3] = ["_id", "id", "type"];

/// Current instant at the store's millisecond resolution
pub fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(3)
}

/// Store-assigned event identifier, a 24-character hex ObjectId on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EventId(ObjectId);

impl EventId {
    pub fn new() -> Self {
        Self(ObjectId::new())
    }

    pub fn object_id(&self) -> ObjectId {
        self.0
    }
}

impl Default for EventId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<ObjectId> for EventId {
    fn from(id: ObjectId) -> Self {
        Self(id)
    }
}

impl FromStr for EventId {
    type Err = EventError;

    fn from_str(s: &str) -> Result<Self> {
        ObjectId::parse_str(s)
            .map(Self)
            .map_err(|_| EventError::InvalidId(s.to_string()))
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.to_hex())
    }
}

impl Serialize for EventId {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0.to_hex())
    }
}

impl<'de> Deserialize<'de> for EventId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Attachments of an event
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct EventFiles {
    #[serde(default)]
    pub image: Option<String>,
}

/// A stored event as returned by the API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Event {
    #[serde(rename = "_id")]
    #[schema(value_type = String, example = "65a1f0c2e4b0a1b2c3d4e5f6")]
    pub id: EventId,

    /// Always `"event"`
    #[serde(rename = "type")]
    pub event_type: String,

    /// Owning user
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uid: Option<String>,

    pub name: String,
    pub tagline: String,
    pub schedule: DateTime<Utc>,
    pub description: String,
    pub files: EventFiles,
    pub moderator: Option<String>,
    pub category: String,
    pub sub_category: String,
    pub rigor_rank: i64,
    pub attendees: Vec<String>,

    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,

    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

impl Event {
    /// Partial merge; fields absent from `changes` keep their value
    pub fn apply_changes(&mut self, changes: &EventChanges) {
        if let Some(uid) = &changes.uid {
            self.uid = uid.clone();
        }
        if let Some(name) = &changes.name {
            self.name = name.clone();
        }
        if let Some(tagline) = &changes.tagline {
            self.tagline = tagline.clone();
        }
        if let Some(schedule) = changes.schedule {
            self.schedule = schedule;
        }
        if let Some(description) = &changes.description {
            self.description = description.clone();
        }
        if let Some(files) = &changes.files {
            self.files = files.clone();
        }
        if let Some(moderator) = &changes.moderator {
            self.moderator = moderator.clone();
        }
        if let Some(category) = &changes.category {
            self.category = category.clone();
        }
        if let Some(sub_category) = &changes.sub_category {
            self.sub_category = sub_category.clone();
        }
        if let Some(rigor_rank) = changes.rigor_rank {
            self.rigor_rank = rigor_rank;
        }
        if let Some(attendees) = &changes.attendees {
            self.attendees = attendees.clone();
        }
        self.updated_at = changes.updated_at;
    }
}

/// A fully defaulted event that has not been stored yet
#[derive(Debug, Clone, PartialEq)]
pub struct NewEvent {
    pub uid: Option<String>,
    pub name: String,
    pub tagline: String,
    pub schedule: DateTime<Utc>,
    pub description: String,
    pub files: EventFiles,
    pub moderator: Option<String>,
    pub category: String,
    pub sub_category: String,
    pub rigor_rank: i64,
    pub attendees: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl NewEvent {
    /// Attach the identifier the store assigned
    pub fn with_id(self, id: EventId) -> Event {
        Event {
            id,
            event_type: EVENT_TYPE.to_string(),
            uid: self.uid,
            name: self.name,
            tagline: self.tagline,
            schedule: self.schedule,
            description: self.description,
            files: self.files,
            moderator: self.moderator,
            category: self.category,
            sub_category: self.sub_category,
            rigor_rank: self.rigor_rank,
            attendees: self.attendees,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// Request body for creating an event
///
/// Only `name` is required. Loosely typed fields are coerced rather than rejected.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct CreateEvent {
    pub uid: Option<String>,

    #[validate(
        required(message = "Event name is required"),
        length(min = 1, message = "Event name is required")
    )]
    #[schema(example = "Rust meetup")]
    pub name: Option<String>,

    pub tagline: Option<String>,

    /// RFC 3339, `YYYY-MM-DDTHH:MM:SS`, `YYYY-MM-DD` or epoch milliseconds
    #[schema(value_type = Option<String>, example = "2025-03-01T18:00:00Z")]
    pub schedule: Option<Value>,

    pub description: Option<String>,

    #[serde(default, deserialize_with = "coerce::lenient_files")]
    pub files: Option<EventFiles>,

    pub moderator: Option<String>,
    pub category: Option<String>,
    pub sub_category: Option<String>,

    #[serde(default, deserialize_with = "coerce::lenient_integer")]
    #[schema(value_type = Option<i64>)]
    pub rigor_rank: Option<i64>,

    #[serde(default, deserialize_with = "coerce::lenient_string_list")]
    #[schema(value_type = Option<Vec<String>>)]
    pub attendees: Option<Vec<String>>,
}

impl CreateEvent {
    /// Read a create body; unknown keys (including `_id` and `type`) are ignored
    pub fn from_body(body: Map<String, Value>) -> Result<Self> {
        Ok(serde_json::from_value(Value::Object(body))?)
    }

    /// Validate and apply defaults, stamping both timestamps with `now`
    pub fn into_new_event(self, now: DateTime<Utc>) -> Result<NewEvent> {
        self.validate()?;

        let schedule = match &self.schedule {
            Some(raw) => coerce::schedule_from_value(raw)?,
            None => None,
        };

        Ok(NewEvent {
            uid: self.uid,
            name: self.name.ok_or_else(|| EventError::validation(NAME_REQUIRED))?,
            tagline: self.tagline.unwrap_or_default(),
            schedule: schedule.unwrap_or(now),
            description: self.description.unwrap_or_default(),
            files: self.files.unwrap_or_default(),
            moderator: self.moderator,
            category: self.category.unwrap_or_default(),
            sub_category: self.sub_category.unwrap_or_default(),
            rigor_rank: self.rigor_rank.unwrap_or_default(),
            attendees: self.attendees.unwrap_or_default(),
            created_at: now,
            updated_at: now,
        })
    }
}

/// Request body for a partial update
///
/// Absent or `null` fields are left untouched, except `uid` and `moderator`
/// where `null` clears the stored value.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct UpdateEvent {
    #[serde(default, deserialize_with = "coerce::nullable")]
    #[schema(value_type = Option<String>, nullable)]
    pub uid: Option<Option<String>>,

    pub name: Option<String>,
    pub tagline: Option<String>,

    #[schema(value_type = Option<String>, example = "2025-03-01T18:00:00Z")]
    pub schedule: Option<Value>,

    pub description: Option<String>,

    #[serde(default, deserialize_with = "coerce::lenient_files")]
    pub files: Option<EventFiles>,

    #[serde(default, deserialize_with = "coerce::nullable")]
    #[schema(value_type = Option<String>, nullable)]
    pub moderator: Option<Option<String>>,

    pub category: Option<String>,
    pub sub_category: Option<String>,

    #[serde(default, deserialize_with = "coerce::lenient_integer")]
    #[schema(value_type = Option<i64>)]
    pub rigor_rank: Option<i64>,

    #[serde(default, deserialize_with = "coerce::lenient_string_list")]
    #[schema(value_type = Option<Vec<String>>)]
    pub attendees: Option<Vec<String>>,
}

impl UpdateEvent {
    /// Read an update body.
    ///
    /// An empty body is rejected. `_id`, `id` and `type` are dropped afterwards,
    /// so a body made only of those keys still refreshes `updatedAt`.
    pub fn from_body(mut body: Map<String, Value>) -> Result<Self> {
        if body.is_empty() {
            return Err(EventError::validation(NO_UPDATE_FIELDS));
        }
        for key in RESERVED_UPDATE_KEYS {
            body.remove(key);
        }
        Ok(serde_json::from_value(Value::Object(body))?)
    }

    pub fn into_changes(self, now: DateTime<Utc>) -> Result<EventChanges> {
        let schedule = match &self.schedule {
            Some(raw) => coerce::schedule_from_value(raw)?,
            None => None,
        };

        Ok(EventChanges {
            uid: self.uid,
            name: self.name,
            tagline: self.tagline,
            schedule,
            description: self.description,
            files: self.files,
            moderator: self.moderator,
            category: self.category,
            sub_category: self.sub_category,
            rigor_rank: self.rigor_rank,
            attendees: self.attendees,
            updated_at: now,
        })
    }
}

/// Coerced field set of an update; `None` means "leave as is"
#[derive(Debug, Clone, PartialEq)]
pub struct EventChanges {
    pub uid: Option<Option<String>>,
    pub name: Option<String>,
    pub tagline: Option<String>,
    pub schedule: Option<DateTime<Utc>>,
    pub description: Option<String>,
    pub files: Option<EventFiles>,
    pub moderator: Option<Option<String>>,
    pub category: Option<String>,
    pub sub_category: Option<String>,
    pub rigor_rank: Option<i64>,
    pub attendees: Option<Vec<String>>,
    pub updated_at: DateTime<Utc>,
}

impl EventChanges {
    /// Changes that only refresh `updatedAt`
    pub fn touch(now: DateTime<Utc>) -> Self {
        Self {
            uid: None,
            name: None,
            tagline: None,
            schedule: None,
            description: None,
            files: None,
            moderator: None,
            category: None,
            sub_category: None,
            rigor_rank: None,
            attendees: None,
            updated_at: now,
        }
    }
}

/// Outcome of a single-document update
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UpdateOutcome {
    pub matched: u64,
    pub modified: u64,
}

/// Query string of `GET /events`
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct EventsQuery {
    /// Fetch a single event by identifier
    pub id: Option<String>,

    /// Listing selector; only `latest` is recognised and it is also the default
    #[serde(rename = "type")]
    #[param(example = "latest")]
    pub kind: Option<String>,

    /// Page size (default 5)
    #[param(value_type = Option<u64>, example = 5)]
    pub limit: Option<String>,

    /// 1-based page number (default 1)
    #[param(value_type = Option<u64>, example = 1)]
    pub page: Option<String>,
}

impl EventsQuery {
    pub fn page_request(&self) -> Result<PageRequest> {
        Ok(PageRequest {
            limit: coerce::positive_integer(self.limit.as_deref(), DEFAULT_LIMIT, INVALID_LIMIT)?,
            page: coerce::positive_integer(self.page.as_deref(), DEFAULT_PAGE, INVALID_PAGE)?,
        })
    }
}

const MAX_SKIP: u64 = i64::MAX as u64;

/// Validated paging parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub limit: u64,
    pub page: u64,
}

impl PageRequest {
    /// Documents before this page, clamped to what the store accepts as an offset
    pub fn skip(&self) -> u64 {
        (self.page - 1).saturating_mul(self.limit).min(MAX_SKIP)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LIMIT,
            page: DEFAULT_PAGE,
        }
    }
}

/// Pagination metadata of a list response
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub current_page: u64,
    pub limit: u64,
    pub total_events: u64,
    pub total_pages: u64,
}

impl Pagination {
    pub fn new(request: PageRequest, total_events: u64) -> Self {
        Self {
            current_page: request.page,
            limit: request.limit,
            total_events,
            total_pages: total_events.div_ceil(request.limit),
        }
    }
}

/// One page of the latest events
#[derive(Debug, Clone, PartialEq)]
pub struct EventPage {
    pub events: Vec<Event>,
    pub pagination: Pagination,
}

//! MongoDB implementation of EventRepository

use crate::error::{EventError, Result};
use crate::models::{
    EVENT_TYPE, Event, EventChanges, EventFiles, EventId, NewEvent, UpdateOutcome,
};
use crate::repository::EventRepository;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use futures_util::TryStreamExt;
use mongodb::bson::oid::ObjectId;
use mongodb::bson::{self, Bson, Document, doc};
use mongodb::{Collection, Database, IndexModel};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

pub const COLLECTION_NAME: &str = "events";

/// Stored shape of an event
#[derive(Debug, Clone, Serialize, Deserialize)]
struct EventDocument {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    id: Option<ObjectId>,
    #[serde(rename = "type")]
    event_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    uid: Option<String>,
    name: String,
    #[serde(default)]
    tagline: String,
    schedule: bson::DateTime,
    #[serde(default)]
    description: String,
    #[serde(default)]
    files: EventFiles,
    #[serde(default)]
    moderator: Option<String>,
    #[serde(default)]
    category: String,
    #[serde(default)]
    sub_category: String,
    #[serde(default)]
    rigor_rank: i64,
    #[serde(default)]
    attendees: Vec<String>,
    #[serde(rename = "createdAt")]
    created_at: bson::DateTime,
    #[serde(rename = "updatedAt")]
    updated_at: bson::DateTime,
}

fn to_bson_datetime(dt: DateTime<Utc>) -> bson::DateTime {
    bson::DateTime::from_millis(dt.timestamp_millis())
}

fn from_bson_datetime(dt: bson::DateTime) -> Result<DateTime<Utc>> {
    DateTime::from_timestamp_millis(dt.timestamp_millis())
        .ok_or_else(|| EventError::Database(format!("stored date out of range: {}", dt)))
}

impl From<NewEvent> for EventDocument {
    fn from(event: NewEvent) -> Self {
        Self {
            id: None,
            event_type: EVENT_TYPE.to_string(),
            uid: event.uid,
            name: event.name,
            tagline: event.tagline,
            schedule: to_bson_datetime(event.schedule),
            description: event.description,
            files: event.files,
            moderator: event.moderator,
            category: event.category,
            sub_category: event.sub_category,
            rigor_rank: event.rigor_rank,
            attendees: event.attendees,
            created_at: to_bson_datetime(event.created_at),
            updated_at: to_bson_datetime(event.updated_at),
        }
    }
}

impl TryFrom<EventDocument> for Event {
    type Error = EventError;

    fn try_from(document: EventDocument) -> Result<Self> {
        let id = document
            .id
            .ok_or_else(|| EventError::Database("stored event has no _id".to_string()))?;

        Ok(Event {
            id: id.into(),
            event_type: document.event_type,
            uid: document.uid,
            name: document.name,
            tagline: document.tagline,
            schedule: from_bson_datetime(document.schedule)?,
            description: document.description,
            files: document.files,
            moderator: document.moderator,
            category: document.category,
            sub_category: document.sub_category,
            rigor_rank: document.rigor_rank,
            attendees: document.attendees,
            created_at: from_bson_datetime(document.created_at)?,
            updated_at: from_bson_datetime(document.updated_at)?,
        })
    }
}

/// `$set` body for a partial update; always carries `updatedAt`
fn set_document(changes: &EventChanges) -> Document {
    let mut set = Document::new();

    if let Some(uid) = &changes.uid {
        set.insert("uid", uid.clone());
    }
    if let Some(name) = &changes.name {
        set.insert("name", name.clone());
    }
    if let Some(tagline) = &changes.tagline {
        set.insert("tagline", tagline.clone());
    }
    if let Some(schedule) = changes.schedule {
        set.insert("schedule", to_bson_datetime(schedule));
    }
    if let Some(description) = &changes.description {
        set.insert("description", description.clone());
    }
    if let Some(files) = &changes.files {
        set.insert("files", doc! { "image": files.image.clone() });
    }
    if let Some(moderator) = &changes.moderator {
        set.insert("moderator", moderator.clone());
    }
    if let Some(category) = &changes.category {
        set.insert("category", category.clone());
    }
    if let Some(sub_category) = &changes.sub_category {
        set.insert("sub_category", sub_category.clone());
    }
    if let Some(rigor_rank) = changes.rigor_rank {
        set.insert("rigor_rank", rigor_rank);
    }
    if let Some(attendees) = &changes.attendees {
        set.insert("attendees", attendees.clone());
    }
    set.insert("updatedAt", to_bson_datetime(changes.updated_at));

    set
}

/// MongoDB-based event repository
#[derive(Clone)]
pub struct MongoEventRepository {
    collection: Collection<EventDocument>,
}

impl MongoEventRepository {
    pub fn new(database: &Database) -> Self {
        Self {
            collection: database.collection(COLLECTION_NAME),
        }
    }

    /// Index backing the latest-first listing
    pub async fn create_indexes(&self) -> Result<()> {
        let indexes = vec![IndexModel::builder().keys(doc! { "schedule": -1 }).build()];

        self.collection.create_indexes(indexes).await?;
        Ok(())
    }
}

#[async_trait]
impl EventRepository for MongoEventRepository {
    #[instrument(skip(self, event), fields(event_name = %event.name))]
    async fn insert(&self, event: NewEvent) -> Result<EventId> {
        let result = self.collection.insert_one(EventDocument::from(event)).await?;
        match result.inserted_id {
            Bson::ObjectId(id) => Ok(id.into()),
            other => Err(EventError::Database(format!(
                "unexpected inserted id: {}",
                other
            ))),
        }
    }

    #[instrument(skip(self), fields(event_id = %id))]
    async fn find_by_id(&self, id: &EventId) -> Result<Option<Event>> {
        let document = self
            .collection
            .find_one(doc! { "_id": id.object_id() })
            .await?;
        document.map(Event::try_from).transpose()
    }

    #[instrument(skip(self))]
    async fn find_latest(&self, skip: u64, limit: u64) -> Result<Vec<Event>> {
        use mongodb::options::FindOptions;

        let options = FindOptions::builder()
            .sort(doc! { "schedule": -1, "_id": -1 })
            .skip(skip)
            .limit(i64::try_from(limit).unwrap_or(i64::MAX))
            .build();

        let cursor = self.collection.find(doc! {}).with_options(options).await?;
        let documents: Vec<EventDocument> = cursor.try_collect().await?;
        debug!(count = documents.len(), "Fetched events page");

        documents.into_iter().map(Event::try_from).collect()
    }

    #[instrument(skip(self))]
    async fn count(&self) -> Result<u64> {
        Ok(self.collection.count_documents(doc! {}).await?)
    }

    #[instrument(skip(self, changes), fields(event_id = %id))]
    async fn update(&self, id: &EventId, changes: EventChanges) -> Result<UpdateOutcome> {
        let update = doc! { "$set": set_document(&changes) };
        let result = self
            .collection
            .update_one(doc! { "_id": id.object_id() }, update)
            .await?;

        Ok(UpdateOutcome {
            matched: result.matched_count,
            modified: result.modified_count,
        })
    }

    #[instrument(skip(self), fields(event_id = %id))]
    async fn delete(&self, id: &EventId) -> Result<u64> {
        let result = self
            .collection
            .delete_one(doc! { "_id": id.object_id() })
            .await?;
        Ok(result.deleted_count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample(now: DateTime<Utc>) -> NewEvent {
        NewEvent {
            uid: Some("u1".into()),
            name: "Launch".into(),
            tagline: "Ship it".into(),
            schedule: now,
            description: String::new(),
            files: EventFiles::default(),
            moderator: None,
            category: "tech".into(),
            sub_category: String::new(),
            rigor_rank: 3,
            attendees: vec!["a".into()],
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_new_document_has_no_id_and_forced_type() {
        let now = Utc.with_ymd_and_hms(2025, 5, 6, 7, 8, 9).unwrap();
        let document = EventDocument::from(sample(now));
        let bson = bson::to_document(&document).unwrap();

        assert!(!bson.contains_key("_id"));
        assert_eq!(bson.get_str("type").unwrap(), EVENT_TYPE);
        assert_eq!(
            bson.get_datetime("schedule").unwrap().timestamp_millis(),
            now.timestamp_millis()
        );
        assert!(bson.get_document("files").unwrap().get("image").unwrap().as_null().is_some());
    }

    #[test]
    fn test_document_round_trip() {
        let now = Utc.with_ymd_and_hms(2025, 5, 6, 7, 8, 9).unwrap();
        let mut document = EventDocument::from(sample(now));
        let oid = ObjectId::new();
        document.id = Some(oid);

        let event = Event::try_from(document).unwrap();
        assert_eq!(event.id, EventId::from(oid));
        assert_eq!(event, sample(now).with_id(oid.into()));
    }

    #[test]
    fn test_document_without_id_is_rejected() {
        let now = Utc::now();
        let err = Event::try_from(EventDocument::from(sample(now))).unwrap_err();
        assert!(matches!(err, EventError::Database(_)));
    }

    #[test]
    fn test_legacy_document_defaults() {
        let now = bson::DateTime::now();
        let raw = doc! {
            "_id": ObjectId::new(),
            "type": "event",
            "name": "Old",
            "schedule": now,
            "rigor_rank": 4_i32,
            "createdAt": now,
            "updatedAt": now,
        };
        let document: EventDocument = bson::from_document(raw).unwrap();
        let event = Event::try_from(document).unwrap();

        assert_eq!(event.rigor_rank, 4);
        assert_eq!(event.tagline, "");
        assert!(event.attendees.is_empty());
        assert_eq!(event.files, EventFiles::default());
    }

    #[test]
    fn test_set_document_only_touches_given_fields() {
        let now = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        let set = set_document(&EventChanges::touch(now));
        assert_eq!(set.len(), 1);
        assert_eq!(
            set.get_datetime("updatedAt").unwrap().timestamp_millis(),
            now.timestamp_millis()
        );

        let mut changes = EventChanges::touch(now);
        changes.name = Some("Renamed".into());
        changes.moderator = Some(None);
        changes.rigor_rank = Some(9);
        changes.files = Some(EventFiles {
            image: Some("a.png".into()),
        });
        let set = set_document(&changes);

        assert_eq!(set.get_str("name").unwrap(), "Renamed");
        assert!(set.get("moderator").unwrap().as_null().is_some());
        assert_eq!(set.get_i64("rigor_rank").unwrap(), 9);
        assert_eq!(set.get_document("files").unwrap().get_str("image").unwrap(), "a.png");
        assert!(!set.contains_key("uid"));
        assert!(!set.contains_key("_id"));
        assert!(!set.contains_key("type"));
    }
}

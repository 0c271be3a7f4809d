//! Shared test utilities for domain testing
//!
//! - `TestMongo`: MongoDB container with automatic cleanup (feature: "mongo")
//! - `TestDataBuilder`: Deterministic test data generation (always available)
//! - `assertions`: Response envelope assertions (always available)
//!
//! # Usage
//!
//! Add `features = ["mongo"]` to your dev-dependencies:
//!
//! ```toml
//! [dev-dependencies]
//! test-utils = { workspace = true, features = ["mongo"] }
//! ```
//!
//! ```rust,ignore
//! use test_utils::{TestDataBuilder, TestMongo};
//!
//! #[tokio::test]
//! async fn my_mongo_test() {
//!     let mongo = TestMongo::new().await;
//!     let builder = TestDataBuilder::from_test_name("my_mongo_test");
//!     let db = mongo.database(&builder.database_name());
//! }
//! ```

use chrono::{DateTime, Duration, TimeZone, Utc};

#[cfg(feature = "mongo")]
mod mongo;

#[cfg(feature = "mongo")]
pub use mongo::TestMongo;

/// Builder for test data with deterministic randomization
///
/// Tests stay reproducible because every value derives from the seed.
pub struct TestDataBuilder {
    seed: u64,
}

impl TestDataBuilder {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    /// Create from test name (generates seed from test name hash)
    ///
    /// # Example
    ///
    /// ```
    /// use test_utils::TestDataBuilder;
    ///
    /// let builder = TestDataBuilder::from_test_name("test_create_event");
    /// ```
    pub fn from_test_name(name: &str) -> Self {
        use std::collections::hash_map::DefaultHasher;
        use std::hash::{Hash, Hasher};

        let mut hasher = DefaultHasher::new();
        name.hash(&mut hasher);
        Self::new(hasher.finish())
    }

    /// Deterministic 24-character hex reference, shaped like a store key
    pub fn object_id_hex(&self, salt: u32) -> String {
        format!("{:016x}{:08x}", self.seed, salt)
    }

    /// Owner reference for created documents
    pub fn user_ref(&self) -> String {
        self.object_id_hex(0)
    }

    /// Generate a unique name for testing
    ///
    /// ```
    /// use test_utils::TestDataBuilder;
    ///
    /// let builder = TestDataBuilder::new(7);
    /// assert_eq!(builder.name("event", "main"), "test-event-7-main");
    /// ```
    pub fn name(&self, prefix: &str, suffix: &str) -> String {
        format!("test-{}-{}-{}", prefix, self.seed, suffix)
    }

    /// Database name that does not collide with other tests
    pub fn database_name(&self) -> String {
        format!("test_{:x}", self.seed)
    }

    /// A fixed instant `days` after a seed-independent epoch, whole seconds only
    pub fn schedule(&self, days: i64) -> DateTime<Utc> {
        let base = Utc
            .with_ymd_and_hms(2030, 1, 1, 12, 0, 0)
            .single()
            .unwrap_or_default();
        base + Duration::days(days)
    }
}

/// Test assertion helpers
pub mod assertions {
    use serde_json::Value;

    /// Assert a `{ success: false, message }` failure envelope
    pub fn assert_failure(body: &Value, message: &str) {
        assert_eq!(body["success"], Value::Bool(false), "body: {}", body);
        assert_eq!(body["message"], message, "body: {}", body);
    }

    /// Assert a `{ success: true }` envelope and return its `data`
    pub fn assert_success(body: &Value) -> &Value {
        assert_eq!(body["success"], Value::Bool(true), "body: {}", body);
        &body["data"]
    }
}

//! Shared test utilities for the domain crates
//!
//! - `TestMongo`: MongoDB container with automatic cleanup
//! - `TestDataBuilder`: deterministic test data generation
//! - `assertions`: custom assertion helpers
//!
//! ```rust,no_run
//! use test_utils::{TestDataBuilder, TestMongo};
//!
//! #[tokio::test]
//! #[ignore = "requires Docker"]
//! async fn my_mongo_test() {
//!     let mongo = TestMongo::new().await;
//!     let db = mongo.database("my_test");
//!     let builder = TestDataBuilder::from_test_name("my_mongo_test");
//!
//!     let category_id = builder.object_id("category");
//!     let email = builder.email("buyer");
//! }
//! ```

mod mongo;

pub use mongo::TestMongo;

use mongodb::bson::oid::ObjectId;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

/// Seeded generator for reproducible ids and names.
pub struct TestDataBuilder {
    seed: u64,
}

impl TestDataBuilder {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    /// Seed from a hash of the test name.
    pub fn from_test_name(name: &str) -> Self {
        let mut hasher = DefaultHasher::new();
        name.hash(&mut hasher);
        Self::new(hasher.finish())
    }

    /// Deterministic ObjectId; different `label`s give different ids.
    pub fn object_id(&self, label: &str) -> ObjectId {
        let mut hasher = DefaultHasher::new();
        (self.seed, label).hash(&mut hasher);
        let tail = hasher.finish().to_be_bytes();

        let mut bytes = [0u8; 12];
        bytes[..4].copy_from_slice(&(self.seed as u32).to_be_bytes());
        bytes[4..].copy_from_slice(&tail);
        ObjectId::from_bytes(bytes)
    }

    /// "test-{prefix}-{seed}-{suffix}"
    pub fn name(&self, prefix: &str, suffix: &str) -> String {
        format!("test-{}-{}-{}", prefix, self.seed, suffix)
    }

    pub fn email(&self, local: &str) -> String {
        format!("{}.{}@example.test", local, self.seed)
    }
}

/// Test assertion helpers
pub mod assertions {
    use mongodb::bson::oid::ObjectId;

    /// Asserts `actual` is the 24-char hex form of `expected`.
    pub fn assert_hex_id(actual: &str, expected: ObjectId, context: &str) {
        assert_eq!(
            actual,
            expected.to_hex(),
            "{}: expected id {}, got {}",
            context,
            expected,
            actual
        );
    }

    pub fn assert_some<T>(value: Option<T>, context: &str) -> T {
        value.unwrap_or_else(|| panic!("{}: expected Some, got None", context))
    }
}

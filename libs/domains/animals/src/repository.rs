use async_trait::async_trait;
use mongodb::bson::Document;

use crate::error::AnimalResult;
use crate::models::OutcomeTypeCount;

/// Repository trait for animal record persistence
///
/// This is the strict layer: every operation reports failure through
/// [`AnimalResult`], so callers can tell "nothing matched" apart from "the
/// store errored". The [`ShelterStore`](crate::ShelterStore) facade wraps
/// an implementation and collapses errors into defaults.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AnimalRepository: Send + Sync {
    /// Insert a single record
    async fn insert(&self, record: Document) -> AnimalResult<()>;

    /// All records matching the filter, with the store identity field
    /// stripped. An empty filter matches everything. No explicit sort.
    async fn find(&self, filter: Document) -> AnimalResult<Vec<Document>>;

    /// Set the given fields on every record matching the filter
    ///
    /// Listed fields are overwritten, unlisted fields are untouched.
    /// Returns the number of modified records.
    async fn update_many(&self, filter: Document, changes: Document) -> AnimalResult<u64>;

    /// Delete every record matching the filter, returning the deleted count
    async fn delete_many(&self, filter: Document) -> AnimalResult<u64>;

    /// Record counts grouped by `outcome_type`, ordered by descending count
    async fn outcome_type_counts(&self) -> AnimalResult<Vec<OutcomeTypeCount>>;

    /// Idempotently create the indexes the store relies on
    async fn ensure_indexes(&self) -> AnimalResult<()>;
}

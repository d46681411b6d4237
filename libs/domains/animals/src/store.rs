//! Lenient store facade over an [`AnimalRepository`]

use std::sync::Arc;

use mongodb::bson::Document;
use tracing::{error, info, instrument};

use database::mongodb::{MongoConfig, connect};

use crate::error::{AnimalError, AnimalResult};
use crate::models::OutcomeTypeCount;
use crate::mongodb::MongoAnimalRepository;
use crate::repository::AnimalRepository;

/// Connection state of one store instance
///
/// Disconnected is terminal for the lifetime of the instance; there is no
/// reconnection logic.
enum ConnectionState<R> {
    Connected(Arc<R>),
    Disconnected { reason: String },
}

/// Shelter records store
///
/// The lenient data-access layer: every store-level failure is logged and
/// collapsed into a benign default (`false`, `0`, or an empty vec) instead
/// of propagating. The one exception is [`ShelterStore::create`] with an
/// empty record, which surfaces [`AnimalError::EmptyRecord`].
///
/// Construction never fails. When the database is unreachable the instance
/// starts disconnected and every operation returns its default.
pub struct ShelterStore<R: AnimalRepository = MongoAnimalRepository> {
    state: ConnectionState<R>,
}

impl ShelterStore<MongoAnimalRepository> {
    /// Connect to MongoDB and ensure the collection indexes exist
    ///
    /// Any failure during connection or index creation is logged and leaves
    /// the store disconnected rather than returning an error.
    pub async fn connect(config: MongoConfig) -> Self {
        match Self::establish(&config).await {
            Ok(repo) => {
                info!(
                    db = config.db_name(),
                    collection = config.collection_name(),
                    "MongoDB connection established and indexes ensured"
                );
                Self {
                    state: ConnectionState::Connected(Arc::new(repo)),
                }
            }
            Err(e) => {
                error!(error = %e, "Error connecting to MongoDB, store starts disconnected");
                Self {
                    state: ConnectionState::Disconnected {
                        reason: e.to_string(),
                    },
                }
            }
        }
    }

    async fn establish(config: &MongoConfig) -> AnimalResult<MongoAnimalRepository> {
        let client = connect(config)
            .await
            .map_err(|e| AnimalError::Database(e.to_string()))?;
        let db = client.database(config.db_name());

        let repo = MongoAnimalRepository::new(&db, config.collection_name());
        repo.ensure_indexes().await?;
        Ok(repo)
    }
}

impl<R: AnimalRepository> ShelterStore<R> {
    /// Build a connected store over an existing repository
    pub fn with_repository(repository: R) -> Self {
        Self {
            state: ConnectionState::Connected(Arc::new(repository)),
        }
    }

    /// Build a store that behaves as if connection establishment failed
    pub fn disconnected(reason: impl Into<String>) -> Self {
        Self {
            state: ConnectionState::Disconnected {
                reason: reason.into(),
            },
        }
    }

    pub fn is_connected(&self) -> bool {
        matches!(self.state, ConnectionState::Connected(_))
    }

    /// Why the store is disconnected, if it is
    pub fn disconnect_reason(&self) -> Option<&str> {
        match &self.state {
            ConnectionState::Connected(_) => None,
            ConnectionState::Disconnected { reason } => Some(reason),
        }
    }

    fn repository(&self) -> AnimalResult<&R> {
        match &self.state {
            ConnectionState::Connected(repo) => Ok(repo),
            ConnectionState::Disconnected { .. } => Err(AnimalError::NotConnected),
        }
    }

    /// Insert a single record
    ///
    /// Returns `Ok(true)` on success and `Ok(false)` when the store is
    /// disconnected or the insert fails (including unique-index violations
    /// on `animal_id`). An empty record is rejected with
    /// [`AnimalError::EmptyRecord`] regardless of connection state.
    #[instrument(skip(self, record))]
    pub async fn create(&self, record: Document) -> AnimalResult<bool> {
        if record.is_empty() {
            return Err(AnimalError::EmptyRecord);
        }

        let result = match self.repository() {
            Ok(repo) => repo.insert(record).await,
            Err(e) => Err(e),
        };

        match result {
            Ok(()) => {
                info!("Record inserted successfully");
                Ok(true)
            }
            Err(e) => {
                error!(error = %e, "Insert failed");
                Ok(false)
            }
        }
    }

    /// All records matching the filter, without the store identity field
    ///
    /// `None` (or an empty filter) matches everything. Returns an empty vec
    /// when the store is disconnected or the query fails. Order is whatever
    /// the store returns.
    #[instrument(skip(self, query))]
    pub async fn read(&self, query: Option<Document>) -> Vec<Document> {
        let result = match self.repository() {
            Ok(repo) => repo.find(query.unwrap_or_default()).await,
            Err(e) => Err(e),
        };

        match result {
            Ok(records) => {
                info!(count = records.len(), "Read records from the collection");
                records
            }
            Err(e) => {
                error!(error = %e, "Read failed");
                Vec::new()
            }
        }
    }

    /// Convenience alias for [`ShelterStore::read`] with no filter
    pub async fn read_all(&self) -> Vec<Document> {
        self.read(None).await
    }

    /// Set fields on every record matching the filter
    ///
    /// Listed fields are overwritten, unlisted fields are untouched.
    /// Returns the modified count, or 0 when the store is disconnected or
    /// the update fails.
    #[instrument(skip(self, query, new_values))]
    pub async fn update(&self, query: Document, new_values: Document) -> u64 {
        let result = match self.repository() {
            Ok(repo) => repo.update_many(query, new_values).await,
            Err(e) => Err(e),
        };

        match result {
            Ok(modified) => {
                info!(modified, "Updated records");
                modified
            }
            Err(e) => {
                error!(error = %e, "Update failed");
                0
            }
        }
    }

    /// Delete every record matching the filter
    ///
    /// Returns the deleted count, or 0 when the store is disconnected or
    /// the delete fails. An empty filter deletes the whole collection; the
    /// store does not guard against it.
    #[instrument(skip(self, query))]
    pub async fn delete(&self, query: Document) -> u64 {
        let result = match self.repository() {
            Ok(repo) => repo.delete_many(query).await,
            Err(e) => Err(e),
        };

        match result {
            Ok(deleted) => {
                info!(deleted, "Deleted records");
                deleted
            }
            Err(e) => {
                error!(error = %e, "Delete failed");
                0
            }
        }
    }

    /// Record counts grouped by outcome type, ordered by descending count
    ///
    /// Ties between equal counts have unspecified relative order. Returns
    /// an empty vec when the store is disconnected or the aggregation
    /// fails.
    #[instrument(skip(self))]
    pub async fn get_outcome_type_counts(&self) -> Vec<OutcomeTypeCount> {
        let result = match self.repository() {
            Ok(repo) => repo.outcome_type_counts().await,
            Err(e) => Err(e),
        };

        match result {
            Ok(counts) => {
                info!(groups = counts.len(), "Aggregated outcome type counts");
                counts
            }
            Err(e) => {
                error!(error = %e, "Aggregation failed");
                Vec::new()
            }
        }
    }
}

impl<R: AnimalRepository> Clone for ShelterStore<R> {
    fn clone(&self) -> Self {
        Self {
            state: match &self.state {
                ConnectionState::Connected(repo) => ConnectionState::Connected(Arc::clone(repo)),
                ConnectionState::Disconnected { reason } => ConnectionState::Disconnected {
                    reason: reason.clone(),
                },
            },
        }
    }
}

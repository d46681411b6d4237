//! Animals Domain
//!
//! Data access for a MongoDB collection of shelter-animal records.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐
//! │ ShelterStore │  ← Lenient facade: connection state, default fallbacks
//! └──────┬───────┘
//!        │
//! ┌──────▼───────┐
//! │  Repository  │  ← Data access (trait + MongoDB implementation)
//! └──────┬───────┘
//!        │
//! ┌──────▼───────┐
//! │    Models    │  ← Aggregation results
//! └──────────────┘
//! ```
//!
//! Records are schemaless BSON documents; the store only relies on the
//! `animal_id`, `animal_type`, `breed`, and `outcome_type` fields for its
//! indexes and aggregation. Callers that need to distinguish "nothing
//! matched" from "the operation failed" use an [`AnimalRepository`]
//! directly; [`ShelterStore`] collapses both into benign defaults.
//!
//! # Usage
//!
//! ```rust,no_run
//! use database::mongodb::MongoConfig;
//! use domain_animals::ShelterStore;
//! use mongodb::bson::doc;
//!
//! # async fn example() {
//! // Never fails: an unreachable server degrades the store into a
//! // disconnected state where every operation returns its default.
//! let store = ShelterStore::connect(MongoConfig::from_env()).await;
//!
//! store
//!     .create(doc! { "animal_id": "A001", "animal_type": "Dog", "breed": "Beagle" })
//!     .await
//!     .expect("non-empty record");
//!
//! let dogs = store.read(Some(doc! { "animal_type": "Dog" })).await;
//! let counts = store.get_outcome_type_counts().await;
//! # }
//! ```

pub mod error;
pub mod models;
pub mod mongodb;
pub mod repository;
pub mod store;

// Re-export commonly used types
pub use error::{AnimalError, AnimalResult};
pub use models::OutcomeTypeCount;
pub use mongodb::MongoAnimalRepository;
pub use repository::AnimalRepository;
pub use store::ShelterStore;

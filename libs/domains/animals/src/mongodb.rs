//! MongoDB implementation of AnimalRepository

use async_trait::async_trait;
use futures_util::TryStreamExt;
use mongodb::{
    Collection, Database, IndexModel,
    bson::{Document, doc, from_document},
    options::{FindOptions, IndexOptions},
};
use tracing::instrument;

use crate::error::{AnimalError, AnimalResult};
use crate::models::OutcomeTypeCount;
use crate::repository::AnimalRepository;

/// MongoDB-based animal record repository
#[derive(Clone)]
pub struct MongoAnimalRepository {
    collection: Collection<Document>,
}

impl MongoAnimalRepository {
    /// Create a repository over the named collection
    ///
    /// # Example
    /// ```ignore
    /// let client = database::mongodb::connect(&config).await?;
    /// let db = client.database(config.db_name());
    /// let repo = MongoAnimalRepository::new(&db, config.collection_name());
    /// ```
    pub fn new(db: &Database, collection_name: &str) -> Self {
        Self {
            collection: db.collection::<Document>(collection_name),
        }
    }

    /// Get the underlying collection for advanced operations
    pub fn collection(&self) -> &Collection<Document> {
        &self.collection
    }

    /// Aggregation pipeline grouping records by outcome type
    fn outcome_pipeline() -> Vec<Document> {
        vec![
            doc! { "$group": { "_id": "$outcome_type", "count": { "$sum": 1 } } },
            doc! { "$sort": { "count": -1 } },
        ]
    }
}

#[async_trait]
impl AnimalRepository for MongoAnimalRepository {
    #[instrument(skip(self, record))]
    async fn insert(&self, record: Document) -> AnimalResult<()> {
        self.collection.insert_one(record).await?;
        Ok(())
    }

    #[instrument(skip(self, filter))]
    async fn find(&self, filter: Document) -> AnimalResult<Vec<Document>> {
        // The _id field is store-internal and never reaches callers
        let options = FindOptions::builder()
            .projection(doc! { "_id": 0 })
            .build();

        let cursor = self.collection.find(filter).with_options(options).await?;
        let records: Vec<Document> = cursor.try_collect().await?;
        Ok(records)
    }

    #[instrument(skip(self, filter, changes))]
    async fn update_many(&self, filter: Document, changes: Document) -> AnimalResult<u64> {
        let result = self
            .collection
            .update_many(filter, doc! { "$set": changes })
            .await?;
        Ok(result.modified_count)
    }

    #[instrument(skip(self, filter))]
    async fn delete_many(&self, filter: Document) -> AnimalResult<u64> {
        let result = self.collection.delete_many(filter).await?;
        Ok(result.deleted_count)
    }

    #[instrument(skip(self))]
    async fn outcome_type_counts(&self) -> AnimalResult<Vec<OutcomeTypeCount>> {
        let cursor = self.collection.aggregate(Self::outcome_pipeline()).await?;
        let groups: Vec<Document> = cursor.try_collect().await?;

        groups
            .into_iter()
            .map(|group| {
                from_document::<OutcomeTypeCount>(group)
                    .map_err(|e| AnimalError::Database(e.to_string()))
            })
            .collect()
    }

    #[instrument(skip(self))]
    async fn ensure_indexes(&self) -> AnimalResult<()> {
        let indexes = vec![
            // animal_id is the domain identifier and must stay unique
            IndexModel::builder()
                .keys(doc! { "animal_id": 1 })
                .options(
                    IndexOptions::builder()
                        .name("idx_animal_id".to_string())
                        .unique(true)
                        .build(),
                )
                .build(),
            IndexModel::builder()
                .keys(doc! { "animal_type": 1 })
                .options(
                    IndexOptions::builder()
                        .name("idx_animal_type".to_string())
                        .build(),
                )
                .build(),
            IndexModel::builder()
                .keys(doc! { "breed": 1 })
                .options(IndexOptions::builder().name("idx_breed".to_string()).build())
                .build(),
        ];

        self.collection.create_indexes(indexes).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_pipeline_groups_then_sorts() {
        let pipeline = MongoAnimalRepository::outcome_pipeline();
        assert_eq!(pipeline.len(), 2);

        let group = pipeline[0].get_document("$group").expect("$group stage");
        assert_eq!(group.get_str("_id").unwrap(), "$outcome_type");

        let sort = pipeline[1].get_document("$sort").expect("$sort stage");
        assert_eq!(sort.get_i32("count").unwrap(), -1);
    }

    mod integration {
        use super::*;
        use database::mongodb::MongoConfig;

        // Each test works in its own collection so runs don't interfere.
        async fn test_repository(collection_name: &str) -> MongoAnimalRepository {
            let config = MongoConfig::from_env()
                .with_host("localhost")
                .with_port(27017)
                .with_db_name("shelter_test");

            let client = database::mongodb::connect(&config)
                .await
                .expect("MongoDB must be reachable for integration tests");
            let db = client.database(config.db_name());
            let collection_name = format!("{}_{}", collection_name, std::process::id());

            let repo = MongoAnimalRepository::new(&db, &collection_name);
            repo.collection()
                .drop()
                .await
                .expect("collection drop must succeed");
            repo.ensure_indexes().await.expect("index creation");
            repo
        }

        #[tokio::test]
        #[ignore] // Requires actual MongoDB
        async fn test_insert_then_find_strips_identity_field() {
            let repo = test_repository("insert_find").await;

            repo.insert(doc! { "animal_id": "A001", "animal_type": "Dog", "breed": "Beagle" })
                .await
                .unwrap();

            let records = repo.find(doc! {}).await.unwrap();
            assert_eq!(records.len(), 1);
            assert!(!records[0].contains_key("_id"));
            assert_eq!(records[0].get_str("animal_id").unwrap(), "A001");
        }

        #[tokio::test]
        #[ignore] // Requires actual MongoDB
        async fn test_duplicate_animal_id_rejected() {
            let repo = test_repository("duplicate_id").await;

            repo.insert(doc! { "animal_id": "A001", "animal_type": "Dog" })
                .await
                .unwrap();
            let second = repo
                .insert(doc! { "animal_id": "A001", "animal_type": "Cat" })
                .await;

            assert!(matches!(second, Err(AnimalError::Database(_))));

            // The first record stays readable
            let records = repo.find(doc! { "animal_id": "A001" }).await.unwrap();
            assert_eq!(records.len(), 1);
            assert_eq!(records[0].get_str("animal_type").unwrap(), "Dog");
        }

        #[tokio::test]
        #[ignore] // Requires actual MongoDB
        async fn test_update_many_sets_listed_fields_only() {
            let repo = test_repository("update_many").await;

            repo.insert(doc! { "animal_id": "A001", "animal_type": "Dog", "breed": "Mix", "outcome_type": "Transfer" })
                .await
                .unwrap();
            repo.insert(doc! { "animal_id": "A002", "animal_type": "Cat", "breed": "Siamese" })
                .await
                .unwrap();

            let modified = repo
                .update_many(
                    doc! { "animal_type": "Dog" },
                    doc! { "breed": "Labrador" },
                )
                .await
                .unwrap();
            assert_eq!(modified, 1);

            let dogs = repo.find(doc! { "animal_type": "Dog" }).await.unwrap();
            assert_eq!(dogs[0].get_str("breed").unwrap(), "Labrador");
            assert_eq!(dogs[0].get_str("outcome_type").unwrap(), "Transfer");

            let cats = repo.find(doc! { "animal_type": "Cat" }).await.unwrap();
            assert_eq!(cats[0].get_str("breed").unwrap(), "Siamese");
        }

        #[tokio::test]
        #[ignore] // Requires actual MongoDB
        async fn test_delete_many_removes_matches() {
            let repo = test_repository("delete_many").await;

            repo.insert(doc! { "animal_id": "A001", "animal_type": "Dog" })
                .await
                .unwrap();
            repo.insert(doc! { "animal_id": "A002", "animal_type": "Dog" })
                .await
                .unwrap();
            repo.insert(doc! { "animal_id": "A003", "animal_type": "Cat" })
                .await
                .unwrap();

            let deleted = repo.delete_many(doc! { "animal_type": "Dog" }).await.unwrap();
            assert_eq!(deleted, 2);

            let dogs = repo.find(doc! { "animal_type": "Dog" }).await.unwrap();
            assert!(dogs.is_empty());
            let all = repo.find(doc! {}).await.unwrap();
            assert_eq!(all.len(), 1);
        }

        #[tokio::test]
        #[ignore] // Requires actual MongoDB
        async fn test_outcome_type_counts_descending() {
            let repo = test_repository("outcome_counts").await;

            for (id, outcome) in [
                ("A001", "Adoption"),
                ("A002", "Adoption"),
                ("A003", "Adoption"),
                ("A004", "Transfer"),
            ] {
                repo.insert(doc! { "animal_id": id, "outcome_type": outcome })
                    .await
                    .unwrap();
            }

            let counts = repo.outcome_type_counts().await.unwrap();
            assert_eq!(counts.len(), 2);
            assert_eq!(counts[0].outcome_type.as_deref(), Some("Adoption"));
            assert_eq!(counts[0].count, 3);
            assert_eq!(counts[1].outcome_type.as_deref(), Some("Transfer"));
            assert_eq!(counts[1].count, 1);
        }

        #[tokio::test]
        #[ignore] // Requires actual MongoDB
        async fn test_ensure_indexes_is_idempotent() {
            let repo = test_repository("indexes").await;
            repo.ensure_indexes().await.unwrap();
            repo.ensure_indexes().await.unwrap();
        }
    }
}

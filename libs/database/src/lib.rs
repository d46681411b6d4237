//! Database library providing MongoDB connectivity for the shelter records services
//!
//! This library owns connection configuration, URI construction, client setup,
//! and health checking. Domain crates build their repositories on top of the
//! `Client`/`Database` handles it produces.
//!
//! # Examples
//!
//! ```ignore
//! use database::mongodb::{MongoConfig, connect};
//!
//! let config = MongoConfig::from_env();
//! let client = connect(&config).await?;
//! let db = client.database(config.db_name());
//! let collection = db.collection::<Document>(config.collection_name());
//! ```

pub mod mongodb;

pub use mongodb::{MongoConfig, MongoError, connect};

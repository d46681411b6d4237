use mongodb::{Client, options::ClientOptions};
use std::time::Duration;
use tracing::info;

use super::MongoConfig;
use super::health::check_health_detailed;

/// Error type for MongoDB connectivity
#[derive(Debug, thiserror::Error)]
pub enum MongoError {
    #[error("MongoDB error: {0}")]
    Mongo(#[from] mongodb::error::Error),

    #[error("Connection failed: {0}")]
    ConnectionFailed(String),
}

/// Connect to MongoDB and return a verified Client
///
/// Builds the connection URI from the config, applies pool and timeout
/// settings, and pings the server before returning. There is no retry
/// loop: a server that is unreachable within the server selection timeout
/// yields `MongoError::ConnectionFailed`.
///
/// # Example
/// ```ignore
/// use database::mongodb::{MongoConfig, connect};
///
/// let config = MongoConfig::from_env();
/// let client = connect(&config).await?;
/// let db = client.database(config.db_name());
/// ```
pub async fn connect(config: &MongoConfig) -> Result<Client, MongoError> {
    info!(
        host = config.host(),
        port = config.port(),
        db = config.db_name(),
        "Attempting to connect to MongoDB"
    );

    let mut options = ClientOptions::parse(config.connection_uri()).await?;

    options.max_pool_size = Some(config.max_pool_size);
    options.min_pool_size = Some(config.min_pool_size);
    options.connect_timeout = Some(Duration::from_secs(config.connect_timeout_secs));
    options.server_selection_timeout =
        Some(Duration::from_secs(config.server_selection_timeout_secs));

    if let Some(ref app_name) = config.app_name {
        options.app_name = Some(app_name.clone());
    }

    let client = Client::with_options(options)?;

    // Verify connectivity before handing the client out
    let status = check_health_detailed(&client).await;
    if !status.healthy {
        return Err(MongoError::ConnectionFailed(
            status
                .message
                .unwrap_or_else(|| "health check failed".to_string()),
        ));
    }

    info!(
        response_time_ms = status.response_time_ms,
        "Successfully connected to MongoDB"
    );
    Ok(client)
}

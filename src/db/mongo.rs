use std::time::Duration;

use mongodb::{options::ClientOptions, Client};

use crate::error::AppResult;

/// Creates a MongoDB client for the dish store
///
/// A short server-selection timeout keeps an unreachable store from
/// hanging a request; the failure surfaces as a clear error instead.
pub async fn create_mongo_client(url: &str) -> AppResult<Client> {
    let mut options = ClientOptions::parse(url).await?;
    options.server_selection_timeout = Some(Duration::from_secs(5));
    let client = Client::with_options(options)?;
    Ok(client)
}

use mongodb::bson::doc;

use crate::{db::create_mongo_client, error::AppResult, models::DishRecord};

/// Dish store read contract
///
/// Returns the dish records the pairing flow selects from. Field-level
/// messiness (stray characters, string-or-list maridaje) is handled at
/// deserialization; a document that still cannot be read is skipped.
/// Store connectivity failure is an error for the current session, with
/// no retries here.
#[async_trait::async_trait]
pub trait DishSource: Send + Sync {
    /// Loads all dish records
    async fn load_dishes(&self) -> AppResult<Vec<DishRecord>>;

    /// Connection parameters identifying this source, used in the
    /// session cache key
    fn describe(&self) -> String;
}

/// MongoDB-backed dish source
pub struct MongoDishSource {
    url: String,
    database: String,
    collection: String,
}

impl MongoDishSource {
    pub fn new(url: String, database: String, collection: String) -> Self {
        Self {
            url,
            database,
            collection,
        }
    }
}

#[async_trait::async_trait]
impl DishSource for MongoDishSource {
    async fn load_dishes(&self) -> AppResult<Vec<DishRecord>> {
        let client = create_mongo_client(&self.url).await?;
        let collection = client
            .database(&self.database)
            .collection::<DishRecord>(&self.collection);

        let mut cursor = collection.find(doc! {}).await?;

        let mut dishes = Vec::new();
        let mut skipped = 0usize;

        while cursor.advance().await? {
            match cursor.deserialize_current() {
                Ok(dish) => dishes.push(dish),
                Err(e) => {
                    skipped += 1;
                    tracing::warn!(error = %e, "Skipping unreadable dish document");
                }
            }
        }

        if dishes.is_empty() {
            tracing::warn!(
                database = %self.database,
                collection = %self.collection,
                "No dishes found in the dish store"
            );
        } else {
            tracing::info!(
                dishes = dishes.len(),
                skipped = skipped,
                "Dishes loaded from store"
            );
        }

        Ok(dishes)
    }

    fn describe(&self) -> String {
        format!("mongodb:{}/{}.{}", self.url, self.database, self.collection)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_describe_includes_connection_parameters() {
        let source = MongoDishSource::new(
            "mongodb://localhost:27017/".to_string(),
            "menu_database".to_string(),
            "platos".to_string(),
        );
        assert_eq!(
            source.describe(),
            "mongodb:mongodb://localhost:27017//menu_database.platos"
        );
    }
}

pub mod cache;
pub mod mongo;

pub use cache::{Cache, CacheKey};
pub use mongo::create_mongo_client;

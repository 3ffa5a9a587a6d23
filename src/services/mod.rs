pub mod catalog;
pub mod dishes;
pub mod narrative;

pub use catalog::{CatalogSource, CsvCatalog};
pub use dishes::{DishSource, MongoDishSource};
pub use narrative::{describe_pairing, GeminiGenerator, NarrativeGenerator, NarrativeSource};

pub mod dish;
pub mod pairing;
pub mod wine;

pub use dish::{DishProfile, DishRecord};
pub use pairing::{Candidate, PriceTier};
pub use wine::WineEntry;

//! Pairing-selection core
//!
//! Pure, synchronous functions over an in-memory catalog snapshot: the
//! similarity filter, price tiering, per-tier selection, and the
//! orchestrator that drives them for each eligible wine type. No I/O
//! happens here; callers hand in read-only slices and get owned results
//! back.

pub mod recommend;
pub mod similarity;
pub mod tiers;

pub use recommend::recommend;
pub use similarity::{filter_by_similarity, DEFAULT_TOLERANCE, MAX_TOLERANCE};
pub use tiers::{select_best, tier_by_price, TieredCandidates};

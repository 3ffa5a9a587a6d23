use std::fmt::Display;

use serde::{Deserialize, Serialize};

use crate::models::WineEntry;

/// Price band computed per wine-type candidate subset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PriceTier {
    Economic,
    Intermediate,
    Premium,
}

impl PriceTier {
    /// Fixed presentation order for tiers within a wine type
    pub const ALL: [PriceTier; 3] = [
        PriceTier::Economic,
        PriceTier::Intermediate,
        PriceTier::Premium,
    ];
}

impl Display for PriceTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PriceTier::Economic => write!(f, "Economic"),
            PriceTier::Intermediate => write!(f, "Intermediate"),
            PriceTier::Premium => write!(f, "Premium"),
        }
    }
}

/// A catalog wine annotated during one recommendation pass
///
/// `distance` is set by the similarity filter; `price_range` and
/// `wine_type_category` are filled in by the orchestrator for selected
/// wines only.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Candidate {
    #[serde(flatten)]
    pub wine: WineEntry,
    /// Euclidean distance from the dish profile in normalized
    /// (acidity, body) space
    pub distance: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_range: Option<PriceTier>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wine_type_category: Option<String>,
}

impl Candidate {
    pub fn new(wine: WineEntry, distance: f64) -> Self {
        Self {
            wine,
            distance,
            price_range: None,
            wine_type_category: None,
        }
    }
}

use crate::models::{Candidate, WineEntry};

/// Default match tolerance in normalized distance units
pub const DEFAULT_TOLERANCE: f64 = 0.4;

/// Widening cap; keeps adaptive matches from drifting too far
/// (the maximum possible distance in the normalized 2D space is √2)
pub const MAX_TOLERANCE: f64 = 0.8;

/// Factor applied on the single widening pass
const WIDENING_FACTOR: f64 = 1.5;

/// Filters the catalog to wines of `wine_type` similar to the dish
/// profile, sorted by ascending distance.
///
/// `wine_type` must be one of `recommended_types` (case-insensitive);
/// otherwise the gate closes and the result is empty. Acidity and body
/// on both sides are normalized from the 0-5 scale to [0, 1] before the
/// Euclidean distance is taken.
///
/// If nothing falls within `tolerance`, the tolerance is widened once to
/// `min(tolerance * 1.5, 0.8)` and the candidates re-evaluated. An empty
/// result after widening is a valid outcome, not an error.
pub fn filter_by_similarity(
    catalog: &[WineEntry],
    target_acidity: f64,
    target_body: f64,
    wine_type: &str,
    recommended_types: &[String],
    tolerance: f64,
) -> Vec<Candidate> {
    let wine_type = wine_type.to_lowercase();

    // Hard gate: the type must be recommended for the dish
    if !recommended_types
        .iter()
        .any(|t| t.to_lowercase() == wine_type)
    {
        return Vec::new();
    }

    let target_acidity = normalize(target_acidity);
    let target_body = normalize(target_body);

    let mut candidates: Vec<Candidate> = catalog
        .iter()
        .filter(|w| w.wine_type.to_lowercase() == wine_type)
        .map(|w| {
            let distance = ((normalize(w.acidity) - target_acidity).powi(2)
                + (normalize(w.body) - target_body).powi(2))
            .sqrt();
            Candidate::new(w.clone(), distance)
        })
        .collect();

    // Single widening pass when the initial tolerance matches nothing
    let mut effective = tolerance;
    if !candidates.iter().any(|c| c.distance <= effective) {
        effective = (tolerance * WIDENING_FACTOR).min(MAX_TOLERANCE);
    }

    candidates.retain(|c| c.distance <= effective);
    candidates.sort_by(|a, b| a.distance.total_cmp(&b.distance));
    candidates
}

/// Maps a 0-5 attribute onto [0, 1], clamping out-of-range inputs
fn normalize(value: f64) -> f64 {
    (value / 5.0).clamp(0.0, 1.0)
}

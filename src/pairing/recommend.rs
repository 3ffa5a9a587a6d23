use std::collections::BTreeSet;

use crate::models::{Candidate, PriceTier, WineEntry};
use crate::pairing::{filter_by_similarity, select_best, tier_by_price, DEFAULT_TOLERANCE};

/// Recommends up to three wines (one per non-empty price tier) for each
/// eligible wine type.
///
/// Eligible types are the catalog's distinct types intersected with the
/// dish's recommended types, case-insensitively, iterated in sorted
/// order for deterministic output. A type whose similarity filter comes
/// back empty is skipped entirely. Selected wines are annotated with
/// their price tier and the capitalized wine type; the result is grouped
/// by type, tiers in Economic, Intermediate, Premium order.
///
/// An empty result means no compatible pairing exists; that is a normal
/// outcome, not an error.
pub fn recommend(
    catalog: &[WineEntry],
    dish_acidity: f64,
    dish_body: f64,
    recommended_types: &[String],
) -> Vec<Candidate> {
    // Sorted distinct catalog types, restricted to the recommended set
    let catalog_types: BTreeSet<String> =
        catalog.iter().map(|w| w.wine_type.to_lowercase()).collect();
    let recommended_lower: BTreeSet<String> = recommended_types
        .iter()
        .map(|t| t.to_lowercase())
        .collect();

    let mut recommendations = Vec::new();

    for wine_type in catalog_types.intersection(&recommended_lower) {
        let filtered = filter_by_similarity(
            catalog,
            dish_acidity,
            dish_body,
            wine_type,
            recommended_types,
            DEFAULT_TOLERANCE,
        );

        if filtered.is_empty() {
            tracing::debug!(wine_type = %wine_type, "No similar wines, skipping type");
            continue;
        }

        let tiers = tier_by_price(filtered);

        for tier in PriceTier::ALL {
            if let Some(best) = select_best(tiers.get(tier)) {
                let mut selected = best.clone();
                selected.price_range = Some(tier);
                selected.wine_type_category = Some(capitalize(wine_type));
                recommendations.push(selected);
            }
        }
    }

    tracing::debug!(
        count = recommendations.len(),
        "Recommendation pass complete"
    );

    recommendations
}

/// First character uppercased, remainder lowercased
fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase(),
        None => String::new(),
    }
}

use crate::models::{Candidate, PriceTier};

/// Candidates partitioned into the three price bands
///
/// Input order (ascending distance from the filter) is preserved within
/// each band.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TieredCandidates {
    pub economic: Vec<Candidate>,
    pub intermediate: Vec<Candidate>,
    pub premium: Vec<Candidate>,
}

impl TieredCandidates {
    pub fn get(&self, tier: PriceTier) -> &[Candidate] {
        match tier {
            PriceTier::Economic => &self.economic,
            PriceTier::Intermediate => &self.intermediate,
            PriceTier::Premium => &self.premium,
        }
    }

    pub fn total(&self) -> usize {
        self.economic.len() + self.intermediate.len() + self.premium.len()
    }
}

/// Partitions candidates into price tiers at the 33rd and 66th
/// percentiles of the candidate set's own prices.
///
/// Boundaries are inclusive downward: `price <= p33` is Economic,
/// `p33 < price <= p66` Intermediate, `price > p66` Premium, so every
/// candidate lands in exactly one tier. An empty input yields three
/// empty tiers.
pub fn tier_by_price(candidates: Vec<Candidate>) -> TieredCandidates {
    if candidates.is_empty() {
        return TieredCandidates::default();
    }

    let mut prices: Vec<f64> = candidates.iter().map(|c| c.wine.price).collect();
    prices.sort_by(f64::total_cmp);

    let p33 = percentile(&prices, 0.33);
    let p66 = percentile(&prices, 0.66);

    let mut tiers = TieredCandidates::default();
    for candidate in candidates {
        let price = candidate.wine.price;
        if price <= p33 {
            tiers.economic.push(candidate);
        } else if price <= p66 {
            tiers.intermediate.push(candidate);
        } else {
            tiers.premium.push(candidate);
        }
    }
    tiers
}

/// Selects the best-scoring candidate in a tier, if any
///
/// Score is `rating * ln(num_reviews + 1)`. Ties keep the first
/// candidate in tier order; since tier order inherits the filter's
/// distance sort, the closest wine wins a tie deterministically.
pub fn select_best(tier: &[Candidate]) -> Option<&Candidate> {
    tier.iter().reduce(|best, candidate| {
        if candidate.wine.score() > best.wine.score() {
            candidate
        } else {
            best
        }
    })
}

/// Linearly interpolated quantile over ascending `sorted` values,
/// matching inclusive quantile semantics (position `q * (n - 1)`).
fn percentile(sorted: &[f64], q: f64) -> f64 {
    match sorted.len() {
        0 => 0.0,
        1 => sorted[0],
        n => {
            let position = q * (n - 1) as f64;
            let lower = position.floor() as usize;
            let upper = position.ceil() as usize;
            let fraction = position - lower as f64;
            sorted[lower] + (sorted[upper] - sorted[lower]) * fraction
        }
    }
}

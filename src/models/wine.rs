use serde::{Deserialize, Serialize};

/// One wine from the catalog CSV
///
/// Attribute scales follow the source dataset: `acidity` and `body` run
/// 0-5, `rating` 0-5. `year` stays a string because the dataset carries
/// non-numeric vintages such as "N.V.".
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WineEntry {
    /// Wine name
    pub wine: String,
    /// Producer
    #[serde(default)]
    pub winery: String,
    #[serde(default)]
    pub year: String,
    /// Wine category, lowercased at load time
    #[serde(rename = "type")]
    pub wine_type: String,
    #[serde(default)]
    pub country: String,
    #[serde(default)]
    pub region: String,
    pub price: f64,
    pub rating: f64,
    pub num_reviews: u32,
    pub acidity: f64,
    pub body: f64,
}

impl WineEntry {
    /// Quality score combining rating and review count
    ///
    /// The `+ 1` keeps the logarithm defined for unreviewed wines;
    /// popularity contributes sub-linearly.
    pub fn score(&self) -> f64 {
        self.rating * ((self.num_reviews as f64) + 1.0).ln()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_csv_row_deserialization() {
        let data = "wine,winery,year,type,country,region,price,rating,num_reviews,acidity,body\n\
                    Tinto Fino,Vega Sicilia,2015,Red,Spain,Ribera del Duero,120.5,4.7,1250,3,4\n";
        let mut reader = csv::Reader::from_reader(data.as_bytes());
        let entries: Vec<WineEntry> = reader.deserialize().collect::<Result<_, _>>().unwrap();

        assert_eq!(entries.len(), 1);
        let entry = &entries[0];
        assert_eq!(entry.wine, "Tinto Fino");
        assert_eq!(entry.winery, "Vega Sicilia");
        assert_eq!(entry.wine_type, "Red");
        assert_eq!(entry.price, 120.5);
        assert_eq!(entry.num_reviews, 1250);
        assert_eq!(entry.acidity, 3.0);
        assert_eq!(entry.body, 4.0);
    }

    #[test]
    fn test_csv_row_non_numeric_year() {
        let data = "wine,winery,year,type,country,region,price,rating,num_reviews,acidity,body\n\
                    Cava Brut,Freixenet,N.V.,Sparkling,Spain,Penedes,9.95,4.0,300,4,2\n";
        let mut reader = csv::Reader::from_reader(data.as_bytes());
        let entries: Vec<WineEntry> = reader.deserialize().collect::<Result<_, _>>().unwrap();

        assert_eq!(entries[0].year, "N.V.");
    }

    #[test]
    fn test_score_rewards_reviews_sublinearly() {
        let mut a = test_wine(4.0, 100);
        let b = test_wine(4.0, 10_000);
        assert!(b.score() > a.score());
        // 100x the reviews is nowhere near 100x the score
        assert!(b.score() < a.score() * 3.0);

        a.num_reviews = 0;
        assert_eq!(a.score(), 0.0);
    }

    fn test_wine(rating: f64, num_reviews: u32) -> WineEntry {
        WineEntry {
            wine: "Test".to_string(),
            winery: "Test Winery".to_string(),
            year: "2020".to_string(),
            wine_type: "red".to_string(),
            country: "Spain".to_string(),
            region: "Rioja".to_string(),
            price: 15.0,
            rating,
            num_reviews,
            acidity: 3.0,
            body: 3.0,
        }
    }
}

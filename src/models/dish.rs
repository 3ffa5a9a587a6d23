use serde::{Deserialize, Deserializer, Serialize};

/// One dish document from the menu store
///
/// The store was populated by an LLM extraction pass over menu PDFs, so
/// field shapes are loose: numeric fields sometimes carry a trailing
/// stray character ("3.5.") and `maridaje` arrives as either a
/// comma-separated string or a native array. Both are normalized here,
/// at the deserialization boundary, so the core only ever sees clean
/// values.
#[derive(Debug, Clone, Deserialize)]
pub struct DishRecord {
    #[serde(rename = "nombre_plato")]
    pub name: String,
    #[serde(rename = "categoria")]
    pub category: String,
    #[serde(rename = "descripcion", default)]
    pub description: String,
    #[serde(rename = "acidez", default, deserialize_with = "lenient_number")]
    pub acidity: f64,
    #[serde(rename = "cuerpo", default, deserialize_with = "lenient_number")]
    pub body: f64,
    #[serde(rename = "maridaje", default, deserialize_with = "wine_type_list")]
    pub recommended_wine_types: Vec<String>,
    #[serde(rename = "ingredientes_clave", default)]
    pub key_ingredients: Vec<String>,
    #[serde(rename = "alergenos", default)]
    pub allergens: Vec<String>,
}

impl DishRecord {
    /// The numeric/categorical view the pairing core consumes
    pub fn profile(&self) -> DishProfile {
        DishProfile {
            acidity: self.acidity,
            body: self.body,
            recommended_wine_types: self.recommended_wine_types.clone(),
        }
    }
}

/// Dish attributes relevant to pairing: acidity and body on the 0-5
/// scale plus the recommended wine categories (lowercase).
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DishProfile {
    pub acidity: f64,
    pub body: f64,
    pub recommended_wine_types: Vec<String>,
}

/// Accepts a number or a numeric string with a trailing stray character.
/// Unparseable values default to 0.0 rather than failing the document.
fn lenient_number<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Float(f64),
        Int(i64),
        Text(String),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Float(v) => v,
        Raw::Int(v) => v as f64,
        Raw::Text(s) => {
            let cleaned = s.trim().trim_end_matches(|c: char| !c.is_ascii_digit());
            cleaned.parse().unwrap_or_else(|_| {
                tracing::warn!(value = %s, "Unparseable numeric dish field, defaulting to 0.0");
                0.0
            })
        }
    })
}

/// Accepts a native array or a comma-separated string of wine
/// categories; normalizes to a trimmed lowercase list either way.
fn wine_type_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        List(Vec<String>),
        Joined(String),
    }

    let items = match Raw::deserialize(deserializer)? {
        Raw::List(items) => items,
        Raw::Joined(s) => s.split(',').map(str::to_string).collect(),
    };

    Ok(items
        .iter()
        .map(|t| t.trim().to_lowercase())
        .filter(|t| !t.is_empty())
        .collect())
}

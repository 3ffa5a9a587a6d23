use serde::{Deserialize, Serialize};

use crate::{
    db::{Cache, CacheKey},
    error::{AppError, AppResult},
    models::{DishRecord, WineEntry},
};

/// Narrative cache TTL: one day
const NARRATIVE_CACHE_TTL: u64 = 86_400;

/// Pairing-prose generator contract
///
/// One operation: dish and wine in, formatted prose out. Implementations
/// may fail freely; callers go through [`describe_pairing`], which never
/// surfaces a generator failure to the end user.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait NarrativeGenerator: Send + Sync {
    /// Generates a pairing description for the wine and dish
    async fn generate(&self, wine: &WineEntry, dish: &DishRecord) -> AppResult<String>;

    /// Generator name for logging
    fn name(&self) -> &'static str;
}

/// Where a narrative came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NarrativeSource {
    Cached,
    Generated,
    Fallback,
}

/// Produces the pairing narrative, consulting the cache first and
/// falling back to the deterministic template on any generator failure
/// or empty response.
///
/// Only successfully generated text is cached; fallback text is not, so
/// a recovered generator is used again on the next request.
pub async fn describe_pairing(
    cache: &Cache,
    generator: &dyn NarrativeGenerator,
    wine: &WineEntry,
    dish: &DishRecord,
) -> (String, NarrativeSource) {
    let key = CacheKey::Narrative {
        dish: dish.name.clone(),
        wine: wine.wine.clone(),
    };

    match cache.get::<String>(&key).await {
        Ok(Some(text)) => return (text, NarrativeSource::Cached),
        Ok(None) => {}
        Err(e) => tracing::warn!(error = %e, "Narrative cache read failed"),
    }

    match generator.generate(wine, dish).await {
        Ok(text) if !text.trim().is_empty() => {
            if let Err(e) = cache.set(&key, &text, NARRATIVE_CACHE_TTL).await {
                tracing::warn!(error = %e, "Narrative cache write failed");
            }
            (text, NarrativeSource::Generated)
        }
        Ok(_) => {
            tracing::warn!(
                generator = generator.name(),
                wine = %wine.wine,
                dish = %dish.name,
                "Generator returned empty narrative, using fallback"
            );
            (fallback_narrative(wine, &dish.name), NarrativeSource::Fallback)
        }
        Err(e) => {
            tracing::warn!(
                generator = generator.name(),
                error = %e,
                wine = %wine.wine,
                dish = %dish.name,
                "Narrative generation failed, using fallback"
            );
            (fallback_narrative(wine, &dish.name), NarrativeSource::Fallback)
        }
    }
}

/// Minimal deterministic narrative built only from the wine's name,
/// producer, and year, and the dish name
pub fn fallback_narrative(wine: &WineEntry, dish_name: &str) -> String {
    format!(
        "### 🍷 Pairing Recommendation\n\n\
         ---\n\n\
         **{}**\n\
         *{} ({})*\n\n\
         This combination of wine and **{}** offers a balance of flavors \
         and textures that complement the character of both.\n\n\
         ---\n",
        wine.wine, wine.winery, wine.year, dish_name
    )
}

/// Gemini-backed narrative generator
pub struct GeminiGenerator {
    http_client: reqwest::Client,
    api_key: Option<String>,
    api_url: String,
    model: String,
}

impl GeminiGenerator {
    /// Creates the generator. Without an API key it stays constructible
    /// but every call fails, which the caller turns into the fallback.
    pub fn new(api_key: Option<String>, api_url: String, model: String) -> Self {
        if api_key.is_none() {
            tracing::warn!("No Gemini API key configured, narratives will use the fallback");
        }
        Self {
            http_client: reqwest::Client::new(),
            api_key,
            api_url,
            model,
        }
    }

    fn build_prompt(wine: &WineEntry, dish: &DishRecord) -> String {
        format!(
            "You are a sommelier expert in food and wine pairings. Write a professional, \
             clear description of the pairing between a wine and a dish. Use elegant, precise \
             language, avoiding both excessive jargon and overly poetic or metaphorical phrasing.\n\n\
             WINE:\n\
             - Name: {wine}\n\
             - Winery: {winery}\n\
             - Year: {year}\n\
             - Type: {wine_type}\n\
             - Region: {region}, {country}\n\
             - Acidity: {wine_acidity}/5\n\
             - Body: {wine_body}/5\n\n\
             DISH:\n\
             - Name: {dish}\n\
             - Description: {description}\n\
             - Acidity: {dish_acidity}/5\n\
             - Body: {dish_body}/5\n\
             - Key ingredients: {ingredients}\n\n\
             Please produce a recommendation that includes:\n\
             1. A descriptive, elegant title\n\
             2. A clear explanation of the balance between the wine and the dish\n\
             3. A precise description of aromas and textures\n\
             4. Practical serving and temperature advice\n\
             5. A brief conclusion about the pairing experience\n\n\
             Format the answer in Markdown with appropriate emojis. Keep the tone professional \
             and accessible, focusing on tangible, practical aspects of why this combination works.",
            wine = wine.wine,
            winery = wine.winery,
            year = wine.year,
            wine_type = wine.wine_type.to_lowercase(),
            region = wine.region,
            country = wine.country,
            wine_acidity = wine.acidity,
            wine_body = wine.body,
            dish = dish.name,
            description = dish.description,
            dish_acidity = dish.acidity,
            dish_body = dish.body,
            ingredients = dish.key_ingredients.join(", "),
        )
    }
}

// Gemini generateContent wire types

#[derive(Serialize)]
struct GenerateRequest {
    contents: Vec<Content>,
}

#[derive(Serialize, Deserialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Serialize, Deserialize)]
struct Part {
    text: String,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<ResponseCandidate>,
}

#[derive(Deserialize)]
struct ResponseCandidate {
    content: Option<Content>,
}

#[async_trait::async_trait]
impl NarrativeGenerator for GeminiGenerator {
    async fn generate(&self, wine: &WineEntry, dish: &DishRecord) -> AppResult<String> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| AppError::ExternalApi("No Gemini API key configured".to_string()))?;

        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.api_url, self.model
        );

        let request = GenerateRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: Self::build_prompt(wine, dish),
                }],
            }],
        };

        let response = self
            .http_client
            .post(&url)
            .header("x-goog-api-key", api_key)
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalApi(format!(
                "Gemini API returned status {}: {}",
                status, body
            )));
        }

        let generated: GenerateResponse = response.json().await?;

        let text = generated
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .and_then(|c| c.parts.into_iter().next())
            .map(|p| p.text)
            .unwrap_or_default();

        if text.trim().is_empty() {
            return Err(AppError::ExternalApi(
                "Gemini API returned no narrative text".to_string(),
            ));
        }

        tracing::info!(
            wine = %wine.wine,
            dish = %dish.name,
            chars = text.len(),
            "Narrative generated"
        );

        Ok(text)
    }

    fn name(&self) -> &'static str {
        "gemini"
    }
}

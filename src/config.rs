use serde::Deserialize;

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Path to the wine catalog CSV file
    #[serde(default = "default_catalog_path")]
    pub catalog_path: String,

    /// MongoDB connection URL for the dish store
    #[serde(default = "default_mongodb_url")]
    pub mongodb_url: String,

    /// MongoDB database holding the dish collection
    #[serde(default = "default_mongodb_database")]
    pub mongodb_database: String,

    /// MongoDB collection holding dish documents
    #[serde(default = "default_mongodb_collection")]
    pub mongodb_collection: String,

    /// Redis connection URL for the narrative cache.
    /// When unset the cache is disabled and every narrative is generated.
    #[serde(default)]
    pub redis_url: Option<String>,

    /// Gemini API key. When unset the service runs in degraded mode and
    /// every narrative uses the fallback template.
    #[serde(default)]
    pub gemini_api_key: Option<String>,

    /// Gemini API base URL
    #[serde(default = "default_gemini_api_url")]
    pub gemini_api_url: String,

    /// Gemini model used for narrative generation
    #[serde(default = "default_gemini_model")]
    pub gemini_model: String,

    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_catalog_path() -> String {
    "./data/vinos.csv".to_string()
}

fn default_mongodb_url() -> String {
    "mongodb://localhost:27017/".to_string()
}

fn default_mongodb_database() -> String {
    "menu_database".to_string()
}

fn default_mongodb_collection() -> String {
    "platos".to_string()
}

fn default_gemini_api_url() -> String {
    "https://generativelanguage.googleapis.com".to_string()
}

fn default_gemini_model() -> String {
    "gemini-2.5-flash".to_string()
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        envy::from_env::<Config>().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }
}

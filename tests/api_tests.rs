use std::sync::Arc;

use axum_test::TestServer;
use serde_json::json;

use maridaje_api::{
    db::Cache,
    error::{AppError, AppResult},
    models::{DishRecord, WineEntry},
    routes::create_router,
    services::{CatalogSource, DishSource, NarrativeGenerator},
    state::{AppState, SessionCache},
};

struct FixtureCatalog(Vec<WineEntry>);

#[async_trait::async_trait]
impl CatalogSource for FixtureCatalog {
    async fn load_catalog(&self) -> AppResult<Vec<WineEntry>> {
        Ok(self.0.clone())
    }

    fn describe(&self) -> String {
        "fixture-catalog".to_string()
    }
}

struct FixtureDishes(Vec<DishRecord>);

#[async_trait::async_trait]
impl DishSource for FixtureDishes {
    async fn load_dishes(&self) -> AppResult<Vec<DishRecord>> {
        Ok(self.0.clone())
    }

    fn describe(&self) -> String {
        "fixture-dishes".to_string()
    }
}

struct CannedNarrator(&'static str);

#[async_trait::async_trait]
impl NarrativeGenerator for CannedNarrator {
    async fn generate(&self, _wine: &WineEntry, _dish: &DishRecord) -> AppResult<String> {
        Ok(self.0.to_string())
    }

    fn name(&self) -> &'static str {
        "canned"
    }
}

struct FailingNarrator;

#[async_trait::async_trait]
impl NarrativeGenerator for FailingNarrator {
    async fn generate(&self, _wine: &WineEntry, _dish: &DishRecord) -> AppResult<String> {
        Err(AppError::ExternalApi("generator offline".to_string()))
    }

    fn name(&self) -> &'static str {
        "failing"
    }
}

fn wine(
    name: &str,
    wine_type: &str,
    acidity: f64,
    body: f64,
    price: f64,
    rating: f64,
    num_reviews: u32,
) -> WineEntry {
    WineEntry {
        wine: name.to_string(),
        winery: "Bodega Test".to_string(),
        year: "2019".to_string(),
        wine_type: wine_type.to_string(),
        country: "Spain".to_string(),
        region: "Rioja".to_string(),
        price,
        rating,
        num_reviews,
        acidity,
        body,
    }
}

fn fixture_catalog() -> Vec<WineEntry> {
    vec![
        wine("Joven", "red", 3.0, 2.0, 8.0, 3.9, 150),
        wine("Crianza", "red", 3.5, 2.5, 18.0, 4.2, 600),
        wine("Reserva", "red", 4.0, 3.0, 45.0, 4.6, 900),
        wine("Verdejo", "white", 4.0, 1.5, 11.0, 4.0, 300),
        // An outlier nothing should pair with at low acidity/body
        wine("Oloroso", "fortified", 5.0, 5.0, 30.0, 4.4, 200),
    ]
}

fn dish_doc(name: &str, category: &str, acidity: f64, body: f64, maridaje: &[&str]) -> DishRecord {
    serde_json::from_value(json!({
        "nombre_plato": name,
        "categoria": category,
        "descripcion": format!("{} description", name),
        "acidez": acidity,
        "cuerpo": body,
        "maridaje": maridaje,
        "ingredientes_clave": ["ingrediente"],
    }))
    .unwrap()
}

fn fixture_dishes() -> Vec<DishRecord> {
    vec![
        dish_doc("Chuleton", "Principal", 2.0, 4.0, &["red"]),
        dish_doc("Ensalada", "Entrante", 3.5, 1.5, &["white", "red"]),
        // Recommends a type absent from the catalog
        dish_doc("Sorbete", "Postre", 4.0, 1.0, &["rosé"]),
    ]
}

fn test_server_with(narrator: Arc<dyn NarrativeGenerator>) -> TestServer {
    let state = AppState {
        sessions: SessionCache::new(
            Arc::new(FixtureCatalog(fixture_catalog())),
            Arc::new(FixtureDishes(fixture_dishes())),
        ),
        narrator,
        cache: Cache::disabled(),
    };
    TestServer::new(create_router(state)).unwrap()
}

fn test_server() -> TestServer {
    test_server_with(Arc::new(CannedNarrator("## A fine match")))
}

#[tokio::test]
async fn test_health_check() {
    let server = test_server();
    let response = server.get("/health").await;
    response.assert_status_ok();
}

#[tokio::test]
async fn test_list_categories_sorted() {
    let server = test_server();
    let response = server.get("/api/v1/categories").await;
    response.assert_status_ok();

    let categories: Vec<String> = response.json();
    assert_eq!(categories, vec!["Entrante", "Postre", "Principal"]);
}

#[tokio::test]
async fn test_list_dishes_in_category() {
    let server = test_server();
    let response = server.get("/api/v1/categories/Principal/dishes").await;
    response.assert_status_ok();

    let dishes: Vec<String> = response.json();
    assert_eq!(dishes, vec!["Chuleton"]);
}

#[tokio::test]
async fn test_unknown_category_yields_empty_list() {
    let server = test_server();
    let response = server.get("/api/v1/categories/Desconocida/dishes").await;
    response.assert_status_ok();

    let dishes: Vec<String> = response.json();
    assert!(dishes.is_empty());
}

#[tokio::test]
async fn test_get_dish_profile() {
    let server = test_server();
    let response = server.get("/api/v1/dishes/Ensalada").await;
    response.assert_status_ok();

    let dish: serde_json::Value = response.json();
    assert_eq!(dish["name"], "Ensalada");
    assert_eq!(dish["acidity"], 3.5);
    assert_eq!(dish["body"], 1.5);
    assert_eq!(dish["recommended_wine_types"], json!(["white", "red"]));
}

#[tokio::test]
async fn test_get_missing_dish_is_404() {
    let server = test_server();
    let response = server.get("/api/v1/dishes/Fantasma").await;
    response.assert_status(axum::http::StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_pairings_for_dish() {
    let server = test_server();
    let response = server.get("/api/v1/dishes/Ensalada/pairings").await;
    response.assert_status_ok();

    let body: serde_json::Value = response.json();
    assert_eq!(body["dish"], "Ensalada");

    let recommendations = body["recommendations"].as_array().unwrap();
    assert!(!recommendations.is_empty());

    for rec in recommendations {
        // Every recommendation carries its annotations
        assert!(rec["price_range"].is_string());
        let category = rec["wine_type_category"].as_str().unwrap();
        assert!(category == "Red" || category == "White");
        // The fortified outlier never pairs with this dish
        assert_ne!(rec["wine"], "Oloroso");
    }
}

#[tokio::test]
async fn test_pairings_stable_across_calls() {
    let server = test_server();
    let first: serde_json::Value = server.get("/api/v1/dishes/Chuleton/pairings").await.json();
    let second: serde_json::Value = server.get("/api/v1/dishes/Chuleton/pairings").await.json();
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_no_compatible_pairing_is_empty_not_error() {
    let server = test_server();
    let response = server.get("/api/v1/dishes/Sorbete/pairings").await;
    response.assert_status_ok();

    let body: serde_json::Value = response.json();
    assert!(body["recommendations"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_narrative_generated() {
    let server = test_server();
    let response = server
        .post("/api/v1/pairings/narrative")
        .json(&json!({ "dish": "Chuleton", "wine": "Reserva" }))
        .await;
    response.assert_status_ok();

    let body: serde_json::Value = response.json();
    assert_eq!(body["source"], "generated");
    assert_eq!(body["narrative"], "## A fine match");
    assert_eq!(body["wine"], "Reserva");
}

#[tokio::test]
async fn test_narrative_falls_back_when_generator_fails() {
    let server = test_server_with(Arc::new(FailingNarrator));
    let response = server
        .post("/api/v1/pairings/narrative")
        .json(&json!({ "dish": "Chuleton", "wine": "Reserva" }))
        .await;
    response.assert_status_ok();

    let body: serde_json::Value = response.json();
    assert_eq!(body["source"], "fallback");
    let narrative = body["narrative"].as_str().unwrap();
    assert!(narrative.contains("Reserva"));
    assert!(narrative.contains("Bodega Test"));
    assert!(narrative.contains("Chuleton"));
}

#[tokio::test]
async fn test_narrative_blank_fields_are_rejected() {
    let server = test_server();
    let response = server
        .post("/api/v1/pairings/narrative")
        .json(&json!({ "dish": "  ", "wine": "Reserva" }))
        .await;
    response.assert_status(axum::http::StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_narrative_unknown_wine_is_404() {
    let server = test_server();
    let response = server
        .post("/api/v1/pairings/narrative")
        .json(&json!({ "dish": "Chuleton", "wine": "Inexistente" }))
        .await;
    response.assert_status(axum::http::StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_summary_counts() {
    let server = test_server();
    let response = server.get("/api/v1/summary").await;
    response.assert_status_ok();

    let body: serde_json::Value = response.json();
    assert_eq!(body["wines"], 5);
    assert_eq!(body["dishes"], 3);
    assert_eq!(body["wine_types"], json!(["fortified", "red", "white"]));
}

#[tokio::test]
async fn test_reload_returns_fresh_counts() {
    let server = test_server();
    let response = server.post("/api/v1/reload").await;
    response.assert_status_ok();

    let body: serde_json::Value = response.json();
    assert_eq!(body["status"], "reloaded");
    assert_eq!(body["wines"], 5);
}

#[tokio::test]
async fn test_request_id_echoed() {
    let server = test_server();
    let response = server.get("/health").await;
    assert!(response.headers().get("x-request-id").is_some());
}

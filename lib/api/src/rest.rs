use crate::state::AppState;
use actix_cors::Cors;
use actix_web::http::StatusCode;
use actix_web::{middleware, web, App, HttpResponse, HttpServer, Result as ActixResult};
use kalakaart_assistant::ChatRequest;
use kalakaart_core::{
    available_states, detect_language, find_similar, search, suggest_states, DatasetStats, Error as CoreError,
    Language, SearchFilters, SearchStatistics, SimilarArtists, DEFAULT_SIMILAR_LIMIT,
};
use kalakaart_retrieval::ScoredDocument;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::{error, warn};

const MAX_STATE_SUGGESTIONS: usize = 5;
const MAX_RETRIEVE_TOP_K: usize = 100;

#[derive(Serialize)]
struct SearchMetadata {
    filters_applied: Vec<&'static str>,
    available_states: Vec<String>,
    search_statistics: SearchStatistics,
}

#[derive(Serialize)]
struct StateSuggestions {
    message: String,
    states: Vec<String>,
}

#[derive(Serialize)]
struct SearchResponse {
    artists: Vec<kalakaart_core::ArtisanRecord>,
    total: usize,
    limit: usize,
    offset: usize,
    has_more: bool,
    status: &'static str,
    search_metadata: SearchMetadata,
    #[serde(skip_serializing_if = "Option::is_none")]
    suggestions: Option<StateSuggestions>,
}

#[derive(Serialize)]
struct StatsResponse<'a> {
    #[serde(flatten)]
    stats: &'a DatasetStats,
    status: &'static str,
}

#[derive(Serialize)]
struct SimilarResponse {
    #[serde(flatten)]
    similar: SimilarArtists,
    status: &'static str,
}

#[derive(Deserialize)]
struct SimilarQuery {
    #[serde(rename = "artistId")]
    artist_id: Option<String>,
    limit: Option<String>,
}

#[derive(Deserialize)]
struct RetrieveRequest {
    #[serde(default)]
    query: String,
    language: Option<String>,
    top_k: Option<usize>,
}

#[derive(Serialize)]
struct RetrieveResponse {
    results: Vec<ScoredDocument>,
    language: Language,
}

fn error_body(status: StatusCode, message: impl Into<String>) -> HttpResponse {
    HttpResponse::build(status).json(json!({ "error": message.into() }))
}

pub struct RestApi;

impl RestApi {
    pub async fn start(state: web::Data<AppState>, host: &str, port: u16) -> std::io::Result<()> {
        HttpServer::new(move || {
            let cors = Cors::default()
                .allow_any_origin()
                .allow_any_method()
                .allow_any_header()
                .max_age(3600);

            App::new()
                .wrap(cors)
                .wrap(middleware::Logger::default())
                .app_data(state.clone())
                .configure(configure)
        })
        .bind((host, port))?
        .run()
        .await
    }
}

/// Register every route both at the root and under `/api`
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(web::scope("/api").configure(routes)).configure(routes);
}

fn routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health))
        .route("/categories", web::get().to(categories))
        .route("/stats", web::get().to(stats))
        .route("/search", web::post().to(search_artists))
        .route("/similar", web::get().to(similar_artists))
        .route("/artists/{id}", web::get().to(get_artist))
        .route("/chat", web::post().to(chat))
        .route("/retrieve", web::post().to(retrieve));
}

async fn health(state: web::Data<AppState>) -> ActixResult<HttpResponse> {
    Ok(HttpResponse::Ok().json(json!({
        "status": "online",
        "artists_loaded": state.store.len()
    })))
}

async fn categories(state: web::Data<AppState>) -> ActixResult<HttpResponse> {
    Ok(HttpResponse::Ok().json(json!({
        "crafts": state.catalog.crafts,
        "states": state.catalog.states,
        "status": "success"
    })))
}

async fn stats(state: web::Data<AppState>) -> ActixResult<HttpResponse> {
    Ok(HttpResponse::Ok().json(StatsResponse { stats: &state.stats, status: "success" }))
}

async fn search_artists(state: web::Data<AppState>, body: web::Bytes) -> ActixResult<HttpResponse> {
    // Bodies that are not a JSON object mean "no filters"
    let value: Value = serde_json::from_slice(&body).unwrap_or(Value::Null);
    let filters = SearchFilters::from_json(&value);
    let (page, search_statistics) = search(&state.store, &filters);

    let suggestions = match &filters.state {
        Some(query) if page.total == 0 => Some(StateSuggestions {
            message: format!("No artists found for \"{}\". Did you mean:", query),
            states: suggest_states(&state.store, query, MAX_STATE_SUGGESTIONS),
        }),
        _ => None,
    };

    Ok(HttpResponse::Ok().json(SearchResponse {
        artists: page.artists,
        total: page.total,
        limit: page.limit,
        offset: page.offset,
        has_more: page.has_more,
        status: "success",
        search_metadata: SearchMetadata {
            filters_applied: filters.applied_keys(),
            available_states: available_states(&state.store),
            search_statistics,
        },
        suggestions,
    }))
}

async fn similar_artists(
    state: web::Data<AppState>,
    query: web::Query<SimilarQuery>,
) -> ActixResult<HttpResponse> {
    let Some(artist_id) = query.artist_id.as_deref().filter(|id| !id.is_empty()) else {
        return Ok(error_body(StatusCode::BAD_REQUEST, "artistId parameter is required"));
    };
    let limit = query
        .limit
        .as_deref()
        .and_then(|l| l.trim().parse::<usize>().ok())
        .unwrap_or(DEFAULT_SIMILAR_LIMIT);

    match find_similar(&state.store, artist_id, limit) {
        Ok(similar) => Ok(HttpResponse::Ok().json(SimilarResponse { similar, status: "success" })),
        Err(CoreError::ArtistNotFound(_)) => Ok(error_body(StatusCode::NOT_FOUND, "Artist not found")),
        Err(e) => {
            error!("Similarity lookup failed: {}", e);
            Ok(error_body(StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))
        }
    }
}

async fn get_artist(state: web::Data<AppState>, path: web::Path<String>) -> ActixResult<HttpResponse> {
    let id = path.into_inner();
    match state.store.get(&id) {
        Some(record) => Ok(HttpResponse::Ok().json(record)),
        None => Ok(error_body(StatusCode::NOT_FOUND, "Artist not found")),
    }
}

async fn chat(state: web::Data<AppState>, body: web::Bytes) -> ActixResult<HttpResponse> {
    let request: ChatRequest = match serde_json::from_slice(&body) {
        Ok(request) => request,
        Err(e) => {
            warn!("Rejected chat body: {}", e);
            return Ok(error_body(StatusCode::BAD_REQUEST, "Invalid request body"));
        }
    };
    if request.message.trim().is_empty() {
        return Ok(error_body(StatusCode::BAD_REQUEST, "Message is required"));
    }

    let response = state.assistant.chat(&request);
    if response.is_error() {
        Ok(HttpResponse::InternalServerError().json(response))
    } else {
        Ok(HttpResponse::Ok().json(response))
    }
}

async fn retrieve(state: web::Data<AppState>, body: web::Bytes) -> ActixResult<HttpResponse> {
    let request: RetrieveRequest = match serde_json::from_slice(&body) {
        Ok(request) => request,
        Err(e) => {
            warn!("Rejected retrieve body: {}", e);
            return Ok(error_body(StatusCode::BAD_REQUEST, "Invalid request body"));
        }
    };
    let query = request.query.trim();
    if query.is_empty() {
        return Ok(error_body(StatusCode::BAD_REQUEST, "query is required"));
    }

    let language = match request.language.as_deref() {
        Some(raw) => match raw.parse::<Language>() {
            Ok(language) => language,
            Err(e) => return Ok(error_body(StatusCode::BAD_REQUEST, e)),
        },
        None => detect_language(query),
    };

    let results = match request.top_k {
        Some(k) if k > MAX_RETRIEVE_TOP_K => {
            return Ok(error_body(
                StatusCode::BAD_REQUEST,
                format!("top_k must be at most {}", MAX_RETRIEVE_TOP_K),
            ));
        }
        Some(k) => state.retriever.search(query, language, k),
        None => state.retriever.retrieve(query, language),
    };
    match results {
        Ok(results) => Ok(HttpResponse::Ok().json(RetrieveResponse { results, language })),
        Err(e) => {
            error!("Retrieval failed: {}", e);
            Ok(error_body(StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ServerConfig;
    use actix_web::test;
    use kalakaart_core::RecordStore;

    const CSV: &str = "id,name,gender,age,craft_type,state,district,village,languages,email,phone,phone_available,government_id,cluster_code\n\
        A1,Asha,Female,34,Pottery,Gujarat,Kutch,Bhuj,\"Gujarati,Hindi\",asha@example.com,9.19876543210E+11,Yes,G1,C1\n\
        A2,Ravi,Male,52,Weaving,Rajasthan,Barmer,,Hindi,,,No,G2,C2\n\
        A3,Meera,Female,28,Pottery,Rajasthan,Jaipur,,Hindi,,,No,G3,C1\n";

    fn state() -> web::Data<AppState> {
        let store = RecordStore::parse(CSV).unwrap();
        web::Data::new(AppState::from_store(store, &ServerConfig::default()).unwrap())
    }

    macro_rules! app {
        () => {
            test::init_service(App::new().app_data(state()).configure(configure)).await
        };
    }

    #[actix_web::test]
    async fn test_health_at_root_and_api() {
        let app = app!();
        for uri in ["/health", "/api/health"] {
            let body: Value = test::call_and_read_body_json(&app, test::TestRequest::get().uri(uri).to_request()).await;
            assert_eq!(body["status"], "online");
            assert_eq!(body["artists_loaded"], 3);
        }
    }

    #[actix_web::test]
    async fn test_search_with_pagination() {
        let app = app!();
        let req = test::TestRequest::post()
            .uri("/api/search")
            .set_json(json!({"craft_type": "pottery", "limit": 1}))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["total"], 2);
        assert_eq!(body["artists"].as_array().unwrap().len(), 1);
        assert_eq!(body["has_more"], true);
        assert_eq!(body["status"], "success");
        assert_eq!(body["search_metadata"]["filters_applied"], json!(["craft_type"]));
        assert_eq!(body["artists"][0]["contact"]["phone"], "+919876543210");
        assert!(body.get("suggestions").is_none());
    }

    #[actix_web::test]
    async fn test_search_suggests_states() {
        let app = app!();
        let req = test::TestRequest::post()
            .uri("/search")
            .set_json(json!({"state": "Gujarat", "craft_type": "Weaving", "age_min": "old"}))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["total"], 0);
        // The non-numeric age bound is ignored, not rejected
        assert_eq!(body["search_metadata"]["filters_applied"], json!(["state", "craft_type"]));
        assert_eq!(body["search_metadata"]["search_statistics"], json!({}));
        assert_eq!(body["suggestions"]["states"], json!(["Gujarat", "Rajasthan"]));
    }

    #[actix_web::test]
    async fn test_search_ignores_non_object_body() {
        let app = app!();
        let req = test::TestRequest::post().uri("/search").set_payload("not json").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["total"], 3);
    }

    #[actix_web::test]
    async fn test_similar_status_codes() {
        let app = app!();

        let resp = test::call_service(&app, test::TestRequest::get().uri("/similar").to_request()).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let resp = test::call_service(&app, test::TestRequest::get().uri("/similar?artistId=ZZ").to_request()).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        let req = test::TestRequest::get().uri("/api/similar?artistId=A1&limit=abc").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["target_artist"]["id"], "A1");
        assert_eq!(body["total_found"], 1);
        assert_eq!(body["similar_artists"][0]["id"], "A3");
    }

    #[actix_web::test]
    async fn test_artist_lookup() {
        let app = app!();
        let body: Value =
            test::call_and_read_body_json(&app, test::TestRequest::get().uri("/artists/A2").to_request()).await;
        assert_eq!(body["name"], "Ravi");

        let resp = test::call_service(&app, test::TestRequest::get().uri("/artists/nope").to_request()).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["error"], "Artist not found");
    }

    #[actix_web::test]
    async fn test_categories_and_stats() {
        let app = app!();
        let body: Value =
            test::call_and_read_body_json(&app, test::TestRequest::get().uri("/categories").to_request()).await;
        assert_eq!(body["crafts"], json!(["Pottery", "Weaving"]));
        assert_eq!(body["states"], json!(["Gujarat", "Rajasthan"]));

        let body: Value =
            test::call_and_read_body_json(&app, test::TestRequest::get().uri("/api/stats").to_request()).await;
        assert_eq!(body["total_artists"], 3);
        assert_eq!(body["hindi_speakers"], 3);
        assert_eq!(body["status"], "success");
    }

    #[actix_web::test]
    async fn test_chat() {
        let app = app!();
        let req = test::TestRequest::post()
            .uri("/api/chat")
            .set_json(json!({"message": "pottery artists in Gujarat", "conversation_history": []}))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["intent"], "find_by_location_and_craft");
        assert_eq!(body["entities"], json!({"craft": "Pottery", "state": "Gujarat"}));
        assert_eq!(body["artists"][0]["id"], "A1");
        assert_eq!(body["language"], "english");

        let req = test::TestRequest::post().uri("/chat").set_json(json!({"message": "  "})).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn test_retrieve() {
        let app = app!();
        let req = test::TestRequest::post()
            .uri("/retrieve")
            .set_json(json!({"query": "madhubani painting", "top_k": 2}))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["language"], "english");
        let results = body["results"].as_array().unwrap();
        assert_eq!(results.len(), 2);
        assert!(results[0]["score"].as_f64().unwrap() > 0.0);
        assert!(results[0].get("text").is_some());

        let req = test::TestRequest::post()
            .uri("/retrieve")
            .set_json(json!({"query": "pottery", "language": "klingon"}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn test_retrieve_rejects_oversized_top_k() {
        let app = app!();
        let req = test::TestRequest::post()
            .uri("/retrieve")
            .set_json(json!({"query": "x", "top_k": 17592186044416u64}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["error"], "top_k must be at most 100");

        let req = test::TestRequest::post()
            .uri("/retrieve")
            .set_json(json!({"query": "pottery", "top_k": 100}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
    }
}

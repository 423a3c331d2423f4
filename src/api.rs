//! JSON endpoints consumed by the dashboard front end

use std::sync::Arc;

use axum::{
    Router,
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    routing::{get, post},
};
use serde::{Deserialize, Serialize};

use crate::models::{ReliefCenter, WeatherReport};
use crate::pipeline::{CityStatus, FloodWatch, RiskAssessment};
use crate::relief::{City, MapView, NDMA_HELPLINE, RESCUE_HELPLINE, ReliefDirectory};
use crate::responder::{self, Topic};

#[derive(Clone)]
pub struct AppState {
    pub watch: Arc<FloodWatch>,
    pub directory: &'static ReliefDirectory,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ApiCity {
    pub name: String,
    pub centers: usize,
}

#[derive(Debug, Deserialize)]
pub struct AskRequest {
    pub question: String,
    /// Covered city whose relief centers follow the answer
    #[serde(default)]
    pub city: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AskResponse {
    pub topic: Option<Topic>,
    pub answer: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub centers: Vec<ReliefCenter>,
}

/// Headline figures for the home page
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiSummary {
    pub cities: usize,
    pub relief_centers: usize,
    pub ndma: String,
    pub rescue: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ApiError {
    pub error: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ApiContacts {
    pub ndma: String,
    pub rescue: String,
}

type ApiResult<T> = Result<Json<T>, (StatusCode, Json<ApiError>)>;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/cities", get(get_cities))
        .route("/cities/{city}/centers", get(get_centers))
        .route("/cities/{city}/map", get(get_map))
        .route("/cities/{city}/weather", get(get_weather))
        .route("/cities/{city}/risk", get(get_risk))
        .route("/dashboard", get(get_dashboard))
        .route("/ask", post(ask))
        .route("/contacts", get(get_contacts))
        .route("/summary", get(get_summary))
        .with_state(state)
}

fn parse_city(name: &str) -> Result<City, (StatusCode, Json<ApiError>)> {
    name.parse::<City>().map_err(|e| {
        (
            StatusCode::NOT_FOUND,
            Json(ApiError {
                error: e.user_message(),
            }),
        )
    })
}

async fn get_cities(State(state): State<AppState>) -> Json<Vec<ApiCity>> {
    let cities = state
        .directory
        .cities()
        .into_iter()
        .map(|city| ApiCity {
            name: city.name().to_string(),
            centers: state.directory.centers(city).len(),
        })
        .collect();
    Json(cities)
}

async fn get_centers(
    State(state): State<AppState>,
    Path(city): Path<String>,
) -> ApiResult<Vec<ReliefCenter>> {
    let city = parse_city(&city)?;
    Ok(Json(state.directory.centers(city).to_vec()))
}

async fn get_map(State(state): State<AppState>, Path(city): Path<String>) -> ApiResult<MapView> {
    let city = parse_city(&city)?;
    Ok(Json(state.directory.map_view(city)))
}

/// `null` body when the weather services could not provide data
async fn get_weather(
    State(state): State<AppState>,
    Path(city): Path<String>,
) -> ApiResult<Option<WeatherReport>> {
    let city = parse_city(&city)?;
    Ok(Json(state.watch.current_conditions(city.name()).await))
}

async fn get_risk(
    State(state): State<AppState>,
    Path(city): Path<String>,
) -> ApiResult<RiskAssessment> {
    let city = parse_city(&city)?;
    Ok(Json(state.watch.assess(city.name()).await))
}

async fn get_dashboard(State(state): State<AppState>) -> Json<Vec<CityStatus>> {
    Json(state.watch.dashboard(state.directory).await)
}

async fn ask(
    State(state): State<AppState>,
    Json(payload): Json<AskRequest>,
) -> ApiResult<AskResponse> {
    if payload.question.trim().is_empty() {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ApiError {
                error: "Please ask a question!".to_string(),
            }),
        ));
    }

    let centers = match payload.city.as_deref() {
        Some(name) => state.directory.centers(parse_city(name)?).to_vec(),
        None => Vec::new(),
    };

    Ok(Json(AskResponse {
        topic: responder::match_topic(&payload.question),
        answer: responder::respond(&payload.question).to_string(),
        centers,
    }))
}

async fn get_contacts() -> Json<ApiContacts> {
    Json(ApiContacts {
        ndma: NDMA_HELPLINE.to_string(),
        rescue: RESCUE_HELPLINE.to_string(),
    })
}

async fn get_summary(State(state): State<AppState>) -> Json<ApiSummary> {
    Json(ApiSummary {
        cities: state.directory.cities().len(),
        relief_centers: state.directory.total_centers(),
        ndma: NDMA_HELPLINE.to_string(),
        rescue: RESCUE_HELPLINE.to_string(),
    })
}

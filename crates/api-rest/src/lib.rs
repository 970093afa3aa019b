//! # API REST
//!
//! REST API implementation for Carefinder.
//!
//! Handles:
//! - HTTP endpoints with axum
//! - OpenAPI/Swagger documentation
//! - REST-specific concerns (JSON serialization, CORS, status mapping)
//!
//! Uses `api-shared` for request/response bodies. The process entry point lives in the
//! workspace root binary, which builds an [`AppState`] and serves [`router`].

#![warn(rust_2018_idioms)]

pub mod error;
mod handlers;

use axum::{
    routing::{get, post},
    Router,
};
use carefinder_core::{CoreConfig, HospitalRegistry};
use carefinder_providers::NearbyAggregator;
use std::sync::{Arc, RwLock};
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

pub use error::ApiError;

/// Shared state for every request handler.
///
/// The registry lock is only ever held for synchronous work; handlers release it before
/// awaiting anything. `writes` serialises registry mutations, including their file writes.
#[derive(Clone)]
pub struct AppState {
    pub cfg: Arc<CoreConfig>,
    pub registry: Arc<RwLock<HospitalRegistry>>,
    pub aggregator: Arc<NearbyAggregator>,
    pub writes: Arc<tokio::sync::Mutex<()>>,
}

impl AppState {
    pub fn new(cfg: CoreConfig, registry: HospitalRegistry, aggregator: NearbyAggregator) -> Self {
        Self {
            cfg: Arc::new(cfg),
            registry: Arc::new(RwLock::new(registry)),
            aggregator: Arc::new(aggregator),
            writes: Arc::new(tokio::sync::Mutex::new(())),
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::health,
        handlers::list_hospitals,
        handlers::register_hospital,
        handlers::get_hospital,
        handlers::set_hospital_active,
        handlers::hospitals_nearby,
        handlers::facilities_nearby,
        handlers::classify_message,
        handlers::list_services,
    ),
    components(schemas(
        api_shared::HealthRes,
        api_shared::ErrorRes,
        api_shared::HospitalListRes,
        api_shared::RegisterHospitalRes,
        api_shared::SetActiveReq,
        api_shared::NearbyReq,
        api_shared::NearbyRes,
        api_shared::FacilitiesNearbyRes,
        api_shared::ServiceRes,
        api_shared::ServiceCategoryRes,
        carefinder_core::Hospital,
        carefinder_core::HospitalType,
        carefinder_core::NewHospital,
        carefinder_core::Coordinate,
        carefinder_core::Facility,
        carefinder_core::RankedFacility,
        carefinder_core::ChatMessage,
        carefinder_core::Role,
        carefinder_core::MessageAnnotation,
        carefinder_core::Classification,
        carefinder_core::Severity,
    ))
)]
pub struct ApiDoc;

/// Builds the full REST router, including Swagger UI and permissive CORS.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/hospitals", get(handlers::list_hospitals))
        .route("/hospitals/register", post(handlers::register_hospital))
        .route("/hospitals/nearby", post(handlers::hospitals_nearby))
        .route("/hospitals/:id", get(handlers::get_hospital))
        .route("/hospitals/:id/active", post(handlers::set_hospital_active))
        .route("/facilities/nearby", get(handlers::facilities_nearby))
        .route("/triage/classify", post(handlers::classify_message))
        .route("/services", get(handlers::list_services))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

use crate::{ApiError, AppState};
use api_shared::{
    ErrorRes, FacilitiesNearbyQuery, FacilitiesNearbyRes, HealthRes, HealthService,
    HospitalListRes, NearbyReq, NearbyRes, RegisterHospitalRes, ServiceCategoryRes,
    SetActiveReq,
};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
};
use carefinder_core::services::CATALOGUE;
use carefinder_core::{
    annotate, ChatMessage, Coordinate, CoreResult, Hospital, HospitalRegistry, MessageAnnotation,
    NewHospital,
};
use std::sync::{RwLockReadGuard, RwLockWriteGuard};

fn read_registry(state: &AppState) -> Result<RwLockReadGuard<'_, HospitalRegistry>, ApiError> {
    state.registry.read().map_err(|e| {
        tracing::error!("Registry lock poisoned: {}", e);
        ApiError::internal()
    })
}

fn write_registry(state: &AppState) -> Result<RwLockWriteGuard<'_, HospitalRegistry>, ApiError> {
    state.registry.write().map_err(|e| {
        tracing::error!("Registry lock poisoned: {}", e);
        ApiError::internal()
    })
}

/// Applies `change` to a copy of the registry, writes the copy to the registry file when one
/// is configured, then swaps it in.
///
/// Writers queue on `state.writes`. The registry lock is held only for the clone and the swap,
/// so readers are never blocked on disk I/O, which runs on the blocking pool.
async fn commit<T>(
    state: &AppState,
    change: impl FnOnce(&mut HospitalRegistry) -> CoreResult<T>,
) -> Result<T, ApiError> {
    let _writer = state.writes.lock().await;

    let mut next = read_registry(state)?.clone();
    let value = change(&mut next)?;

    let next = match state.cfg.registry_file() {
        Some(path) => {
            let path = path.to_path_buf();
            tokio::task::spawn_blocking(move || next.save_to_path(&path).map(|()| next))
                .await
                .map_err(|e| {
                    tracing::error!("Registry write task failed: {}", e);
                    ApiError::internal()
                })??
        }
        None => next,
    };

    *write_registry(state)? = next;
    Ok(value)
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Health check response", body = HealthRes)
    )
)]
/// Health check endpoint for the REST API.
#[axum::debug_handler]
pub(crate) async fn health(State(_state): State<AppState>) -> Json<HealthRes> {
    Json(HealthService::check_health())
}

#[utoipa::path(
    get,
    path = "/hospitals",
    responses(
        (status = 200, description = "Registered hospitals", body = HospitalListRes),
        (status = 500, description = "Internal server error", body = ErrorRes)
    )
)]
/// List every registered hospital in registration order.
#[axum::debug_handler]
pub(crate) async fn list_hospitals(
    State(state): State<AppState>,
) -> Result<Json<HospitalListRes>, ApiError> {
    let hospitals = read_registry(&state)?.list().to_vec();
    Ok(Json(HospitalListRes::from(hospitals)))
}

#[utoipa::path(
    post,
    path = "/hospitals/register",
    request_body = NewHospital,
    responses(
        (status = 201, description = "Hospital registered", body = RegisterHospitalRes),
        (status = 400, description = "Validation failed or hospital already registered", body = ErrorRes),
        (status = 500, description = "Internal server error", body = ErrorRes)
    )
)]
/// Register a new hospital.
///
/// When a registry file is configured the new hospital is written to disk before it becomes
/// visible to other requests. A failed write leaves the in-memory registry unchanged.
///
/// # Errors
/// Returns `400 Bad Request` if:
/// - any field fails validation (every problem is listed in `errors`),
/// - the email, registration number or name is already registered.
///
/// Returns `500 Internal Server Error` if the registry file cannot be written.
#[axum::debug_handler]
pub(crate) async fn register_hospital(
    State(state): State<AppState>,
    Json(req): Json<NewHospital>,
) -> Result<(StatusCode, Json<RegisterHospitalRes>), ApiError> {
    let hospital = commit(&state, |registry| registry.register(req)).await?;

    Ok((
        StatusCode::CREATED,
        Json(RegisterHospitalRes {
            message: "Hospital registered successfully".into(),
            data: hospital,
        }),
    ))
}

#[utoipa::path(
    get,
    path = "/hospitals/{id}",
    params(("id" = String, Path, description = "Hospital id (UUID)")),
    responses(
        (status = 200, description = "Hospital", body = Hospital),
        (status = 400, description = "Malformed id", body = ErrorRes),
        (status = 404, description = "Hospital not found", body = ErrorRes)
    )
)]
#[axum::debug_handler]
pub(crate) async fn get_hospital(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Hospital>, ApiError> {
    let registry = read_registry(&state)?;
    let hospital = registry.get_by_str(&id)?.clone();
    Ok(Json(hospital))
}

#[utoipa::path(
    post,
    path = "/hospitals/{id}/active",
    params(("id" = String, Path, description = "Hospital id (UUID)")),
    request_body = SetActiveReq,
    responses(
        (status = 200, description = "Updated hospital", body = Hospital),
        (status = 400, description = "Malformed id", body = ErrorRes),
        (status = 404, description = "Hospital not found", body = ErrorRes),
        (status = 500, description = "Internal server error", body = ErrorRes)
    )
)]
/// Activate or deactivate a registered hospital.
///
/// Inactive hospitals stay listed but are left out of `/hospitals/nearby`. The change is
/// persisted the same way as a registration.
#[axum::debug_handler]
pub(crate) async fn set_hospital_active(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<SetActiveReq>,
) -> Result<Json<Hospital>, ApiError> {
    let hospital = commit(&state, |registry| {
        registry.set_active_by_str(&id, req.active).cloned()
    })
    .await?;
    Ok(Json(hospital))
}

#[utoipa::path(
    post,
    path = "/hospitals/nearby",
    request_body = NearbyReq,
    responses(
        (status = 200, description = "Registered hospitals within the radius, nearest first", body = NearbyRes),
        (status = 400, description = "Invalid coordinates or radius", body = ErrorRes)
    )
)]
/// Search the hospital registry around a point.
///
/// Only active hospitals are considered. `radius` is in kilometres and defaults to the
/// configured default radius.
#[axum::debug_handler]
pub(crate) async fn hospitals_nearby(
    State(state): State<AppState>,
    Json(req): Json<NearbyReq>,
) -> Result<Json<NearbyRes>, ApiError> {
    let origin = Coordinate::new(req.latitude, req.longitude)?;
    let radius = state.cfg.resolve_radius(req.radius)?;

    let data = read_registry(&state)?.nearby(origin, radius)?;

    Ok(Json(NearbyRes {
        count: data.len(),
        data,
        user_location: origin,
        radius,
    }))
}

#[utoipa::path(
    get,
    path = "/facilities/nearby",
    params(FacilitiesNearbyQuery),
    responses(
        (status = 200, description = "Facilities from the first upstream provider with results", body = FacilitiesNearbyRes),
        (status = 400, description = "Invalid coordinates or radius", body = ErrorRes),
        (status = 502, description = "Every upstream provider failed", body = ErrorRes),
        (status = 503, description = "No upstream provider configured", body = ErrorRes)
    )
)]
/// Search public map data (Google Places, OpenStreetMap) around a point.
#[axum::debug_handler]
pub(crate) async fn facilities_nearby(
    State(state): State<AppState>,
    Query(query): Query<FacilitiesNearbyQuery>,
) -> Result<Json<FacilitiesNearbyRes>, ApiError> {
    let origin = Coordinate::new(query.lat, query.lng)?;
    let radius = state.cfg.resolve_radius(query.radius)?;

    let result = state.aggregator.find_nearby(origin, radius).await?;

    Ok(Json(FacilitiesNearbyRes {
        source: result.source,
        count: result.facilities.len(),
        data: result.facilities,
    }))
}

#[utoipa::path(
    post,
    path = "/triage/classify",
    request_body = ChatMessage,
    responses(
        (status = 200, description = "Critical-symptom annotation for the message", body = MessageAnnotation)
    )
)]
/// Classify one chat message for critical symptoms.
#[axum::debug_handler]
pub(crate) async fn classify_message(
    State(_state): State<AppState>,
    Json(message): Json<ChatMessage>,
) -> Json<MessageAnnotation> {
    Json(annotate(&message))
}

#[utoipa::path(
    get,
    path = "/services",
    responses(
        (status = 200, description = "Medical service catalogue grouped by category", body = [ServiceCategoryRes])
    )
)]
#[axum::debug_handler]
pub(crate) async fn list_services(State(_state): State<AppState>) -> Json<Vec<ServiceCategoryRes>> {
    Json(CATALOGUE.iter().map(ServiceCategoryRes::from).collect())
}

#[cfg(test)]
mod tests {
    use crate::{router, AppState};
    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use axum::Router;
    use carefinder_core::{Coordinate, CoreConfig, Facility, HospitalRegistry};
    use carefinder_providers::{FacilityProvider, NearbyAggregator, ProviderError, ProviderResult};
    use http_body_util::BodyExt;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    struct StaticProvider(Vec<Facility>);

    #[async_trait]
    impl FacilityProvider for StaticProvider {
        fn name(&self) -> &str {
            "static"
        }

        async fn fetch(
            &self,
            _origin: Coordinate,
            _radius_m: u32,
        ) -> ProviderResult<Vec<Facility>> {
            Ok(self.0.clone())
        }
    }

    struct DownProvider;

    #[async_trait]
    impl FacilityProvider for DownProvider {
        fn name(&self) -> &str {
            "down"
        }

        async fn fetch(
            &self,
            _origin: Coordinate,
            _radius_m: u32,
        ) -> ProviderResult<Vec<Facility>> {
            Err(ProviderError::Status {
                provider: "down".into(),
                status: 503,
            })
        }
    }

    fn app_with(cfg: CoreConfig, providers: Vec<Box<dyn FacilityProvider>>) -> Router {
        router(AppState::new(
            cfg,
            HospitalRegistry::new(),
            NearbyAggregator::new(providers),
        ))
    }

    fn app() -> Router {
        let clinic = Facility::new(
            "osm-1",
            "Corner Clinic",
            "1 High Street",
            Coordinate::new(18.53, 73.8567).unwrap(),
        );
        app_with(
            CoreConfig::default(),
            vec![Box::new(DownProvider), Box::new(StaticProvider(vec![clinic]))],
        )
    }

    fn hospital_body(name: &str, reg: &str, email: &str, lat: f64, lon: f64) -> Value {
        json!({
            "hospitalName": name,
            "registrationNumber": reg,
            "email": email,
            "phone": "9876543210",
            "address": "12 Mill Road",
            "city": "Pune",
            "state": "Maharashtra",
            "pincode": "411001",
            "latitude": lat,
            "longitude": lon,
            "establishedYear": 1998,
            "hospitalType": "Semi-Government",
            "totalBeds": 80,
            "specializations": "General Medicine",
            "emergencyAvailable": true,
            "ambulanceAvailable": true,
            "availableServices": ["emergency_24x7"],
            "adminName": "R. Patil",
            "adminPosition": "Administrator"
        })
    }

    async fn send(
        app: &Router,
        method: &str,
        uri: &str,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => builder
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    #[tokio::test]
    async fn test_health_is_ok() {
        let (status, body) = send(&app(), "GET", "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["ok"], true);
    }

    #[tokio::test]
    async fn test_register_then_list_and_get() {
        let app = app();
        let (status, body) = send(
            &app,
            "POST",
            "/hospitals/register",
            Some(hospital_body("Sassoon", "MH-001", "Info@Sassoon.in", 18.5204, 73.8567)),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["message"], "Hospital registered successfully");
        assert_eq!(body["data"]["email"], "info@sassoon.in");
        assert_eq!(body["data"]["isActive"], true);
        let id = body["data"]["id"].as_str().unwrap().to_string();

        let (status, body) = send(&app, "GET", "/hospitals", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["count"], 1);

        let (status, body) = send(&app, "GET", &format!("/hospitals/{id}"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["hospitalName"], "Sassoon");
    }

    #[tokio::test]
    async fn test_get_unknown_or_malformed_hospital() {
        let app = app();
        let (status, _) = send(
            &app,
            "GET",
            "/hospitals/6f1c1f1e-8a4e-4d3e-9a55-3c1d1b0f0a11",
            None,
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = send(&app, "GET", "/hospitals/not-a-uuid", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_duplicate_registration_is_rejected() {
        let app = app();
        let first = hospital_body("Sassoon", "MH-001", "info@sassoon.in", 18.52, 73.85);
        let (status, _) = send(&app, "POST", "/hospitals/register", Some(first)).await;
        assert_eq!(status, StatusCode::CREATED);

        let clash = hospital_body("Other", "MH-002", "info@sassoon.in", 18.52, 73.85);
        let (status, body) = send(&app, "POST", "/hospitals/register", Some(clash)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "Email already registered");
    }

    #[tokio::test]
    async fn test_invalid_registration_lists_errors() {
        let mut body = hospital_body("Sassoon", "MH-001", "info@sassoon.in", 18.52, 73.85);
        body["phone"] = json!("12345");
        body["latitude"] = json!(123.0);

        let (status, body) = send(&app(), "POST", "/hospitals/register", Some(body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "Validation failed");
        assert_eq!(body["errors"].as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_registry_nearby_sorts_and_applies_default_radius() {
        let app = app();
        for (name, reg, email, lat) in [
            ("Far", "R-1", "far@example.org", 18.55),
            ("Near", "R-2", "near@example.org", 18.521),
            ("Out Of Range", "R-3", "out@example.org", 19.5),
        ] {
            let (status, _) = send(
                &app,
                "POST",
                "/hospitals/register",
                Some(hospital_body(name, reg, email, lat, 73.8567)),
            )
            .await;
            assert_eq!(status, StatusCode::CREATED);
        }

        let (status, body) = send(
            &app,
            "POST",
            "/hospitals/nearby",
            Some(json!({ "latitude": 18.5204, "longitude": 73.8567 })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["radius"], 5.0);
        assert_eq!(body["count"], 2);
        assert_eq!(body["data"][0]["name"], "Near");
        assert_eq!(body["data"][1]["name"], "Far");
        assert_eq!(body["userLocation"]["latitude"], 18.5204);
        let first = body["data"][0]["distanceKm"].as_f64().unwrap();
        let second = body["data"][1]["distanceKm"].as_f64().unwrap();
        assert!(first <= second);
    }

    #[tokio::test]
    async fn test_registry_nearby_rejects_bad_input() {
        let app = app();
        let (status, _) = send(
            &app,
            "POST",
            "/hospitals/nearby",
            Some(json!({ "latitude": 18.5, "longitude": 73.8, "radius": 0 })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = send(
            &app,
            "POST",
            "/hospitals/nearby",
            Some(json!({ "latitude": 91.0, "longitude": 73.8 })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = send(
            &app,
            "POST",
            "/hospitals/nearby",
            Some(json!({ "latitude": 18.5, "longitude": 73.8, "radius": 500 })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_facilities_nearby_falls_back_to_working_provider() {
        let (status, body) = send(
            &app(),
            "GET",
            "/facilities/nearby?lat=18.5204&lng=73.8567&radius=5",
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["source"], "static");
        assert_eq!(body["count"], 1);
        assert_eq!(body["data"][0]["id"], "osm-1");
    }

    #[tokio::test]
    async fn test_facilities_nearby_reports_upstream_failure() {
        let app = app_with(CoreConfig::default(), vec![Box::new(DownProvider)]);
        let (status, _) = send(&app, "GET", "/facilities/nearby?lat=18.5&lng=73.8", None).await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
    }

    #[tokio::test]
    async fn test_classify_flags_emergency() {
        let (status, body) = send(
            &app(),
            "POST",
            "/triage/classify",
            Some(json!({ "role": "user", "content": "Crushing CHEST PAIN since an hour" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["isEmergency"], true);
        assert_eq!(body["classification"]["condition"], "heartAttack");
        assert_eq!(body["classification"]["severity"], "EMERGENCY");
        assert_eq!(body["suggestHospitalFinder"], true);
    }

    #[tokio::test]
    async fn test_services_lists_catalogue() {
        let (status, body) = send(&app(), "GET", "/services", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.as_array().unwrap().len(), 15);
    }

    #[tokio::test]
    async fn test_deactivated_hospital_drops_out_of_nearby() {
        let app = app();
        let (_, body) = send(
            &app,
            "POST",
            "/hospitals/register",
            Some(hospital_body("Sassoon", "MH-001", "info@sassoon.in", 18.5204, 73.8567)),
        )
        .await;
        let id = body["data"]["id"].as_str().unwrap().to_string();
        let search = json!({ "latitude": 18.5204, "longitude": 73.8567 });

        let uri = format!("/hospitals/{id}/active");
        let (status, body) = send(&app, "POST", &uri, Some(json!({ "active": false }))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["isActive"], false);

        let (_, body) = send(&app, "POST", "/hospitals/nearby", Some(search.clone())).await;
        assert_eq!(body["count"], 0);
        let (_, body) = send(&app, "GET", "/hospitals", None).await;
        assert_eq!(body["count"], 1);

        let (status, _) = send(&app, "POST", &uri, Some(json!({ "active": true }))).await;
        assert_eq!(status, StatusCode::OK);
        let (_, body) = send(&app, "POST", "/hospitals/nearby", Some(search)).await;
        assert_eq!(body["count"], 1);
    }

    #[tokio::test]
    async fn test_set_active_unknown_or_malformed_hospital() {
        let app = app();
        let body = Some(json!({ "active": false }));
        let (status, _) = send(
            &app,
            "POST",
            "/hospitals/6f1c1f1e-8a4e-4d3e-9a55-3c1d1b0f0a11/active",
            body.clone(),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = send(&app, "POST", "/hospitals/not-a-uuid/active", body).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_registration_is_persisted_when_file_configured() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("registry.json");
        let cfg = CoreConfig::new(5.0, 50.0, Some(path.clone())).unwrap();
        let app = app_with(cfg, Vec::new());

        let (status, _) = send(
            &app,
            "POST",
            "/hospitals/register",
            Some(hospital_body("Sassoon", "MH-001", "info@sassoon.in", 18.52, 73.85)),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);

        let reloaded = HospitalRegistry::load_from_path(&path).unwrap();
        assert_eq!(reloaded.len(), 1);
        assert_eq!(reloaded.list()[0].hospital_name, "Sassoon");
        assert!(reloaded.list()[0].is_active);
    }

    #[tokio::test]
    async fn test_failed_write_leaves_registry_unchanged() {
        let dir = tempfile::tempdir().unwrap();
        // A directory where the file should be makes the final rename fail.
        let path = dir.path().join("registry.json");
        std::fs::create_dir(&path).unwrap();
        let cfg = CoreConfig::new(5.0, 50.0, Some(path)).unwrap();
        let app = app_with(cfg, Vec::new());

        let (status, _) = send(
            &app,
            "POST",
            "/hospitals/register",
            Some(hospital_body("Sassoon", "MH-001", "info@sassoon.in", 18.52, 73.85)),
        )
        .await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);

        let (_, body) = send(&app, "GET", "/hospitals", None).await;
        assert_eq!(body["count"], 0);
    }

    #[tokio::test]
    async fn test_deactivation_is_persisted_when_file_configured() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("registry.json");
        let cfg = CoreConfig::new(5.0, 50.0, Some(path.clone())).unwrap();
        let app = app_with(cfg, Vec::new());

        let (_, body) = send(
            &app,
            "POST",
            "/hospitals/register",
            Some(hospital_body("Sassoon", "MH-001", "info@sassoon.in", 18.52, 73.85)),
        )
        .await;
        let id = body["data"]["id"].as_str().unwrap().to_string();

        let uri = format!("/hospitals/{id}/active");
        let (status, _) = send(&app, "POST", &uri, Some(json!({ "active": false }))).await;
        assert_eq!(status, StatusCode::OK);

        let reloaded = HospitalRegistry::load_from_path(&path).unwrap();
        assert!(!reloaded.list()[0].is_active);
    }
}

use crate::dto::HealthRes;

/// Health check shared by every binary that exposes the API.
#[derive(Clone, Default)]
pub struct HealthService;

impl HealthService {
    /// Liveness only; upstream providers are not probed.
    pub fn check_health() -> HealthRes {
        HealthRes {
            ok: true,
            message: "Carefinder is alive".into(),
        }
    }
}

use crate::dto::HealthRes;

/// Health check shared by every API surface.
#[derive(Clone, Default)]
pub struct HealthService;

impl HealthService {
    /// Reports the service as alive.
    ///
    /// Liveness only: the patient data file is not touched, so a missing or corrupt file does
    /// not fail the check.
    pub fn check_health() -> HealthRes {
        HealthRes {
            ok: true,
            message: "PMS is alive".into(),
        }
    }
}

use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use api_rest::AppState;
use pms_core::{CoreConfig, PatientService, config::save_mode_from_env_value};

/// Main entry point for the PMS application
///
/// Resolves configuration once, then serves the REST API until the process is stopped.
///
/// # Environment Variables
/// - `PMS_REST_ADDR`: REST server address (default: "0.0.0.0:3000")
/// - `PATIENT_DATA_FILE`: JSON file holding the patient records (default: "patients.json")
/// - `PMS_SAVE_MODE`: `overwrite` (default) or `atomic`
///
/// # Errors
/// Returns an error if:
/// - the logging/tracing configuration cannot be initialised,
/// - `PMS_SAVE_MODE` holds an unknown value,
/// - the server address cannot be bound, or
/// - the HTTP server fails while running.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("pms=info".parse()?)
                .add_directive("api_rest=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let rest_addr = std::env::var("PMS_REST_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".into());

    let patient_data_file = std::env::var("PATIENT_DATA_FILE")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(pms_core::DEFAULT_PATIENT_DATA_FILE));
    if !patient_data_file.is_file() {
        tracing::warn!(
            "Patient data file does not exist: {} (requests will fail until it is created)",
            patient_data_file.display()
        );
    }

    let save_mode = save_mode_from_env_value(std::env::var("PMS_SAVE_MODE").ok())?;
    let cfg = Arc::new(CoreConfig::new(patient_data_file, save_mode)?);

    tracing::info!("++ Starting PMS REST on {}", rest_addr);
    tracing::info!(
        "++ Patient data file {} ({:?} saves)",
        cfg.patient_data_file().display(),
        cfg.save_mode()
    );

    let app = api_rest::router(AppState {
        patient_service: PatientService::new(cfg),
    });

    let listener = tokio::net::TcpListener::bind(&rest_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

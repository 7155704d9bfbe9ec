use std::net::SocketAddr;
use std::process::ExitCode;
use std::sync::Arc;

use faultline::services::classifier::classify_server_error;
use faultline::utils::telemetry::init_tracing;
use faultline::{Config, ErrorLogger, ErrorValue, HostSettings, RawError, TracingSink, app};
use tokio::net::TcpListener;
use tracing::{error, info};

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("configuration error: {e}");
            return ExitCode::FAILURE;
        }
    };
    init_tracing(config.production);

    let settings = match HostSettings::from_env() {
        Ok(settings) => settings,
        Err(e) => {
            error!(error = %e, "Invalid host settings");
            return ExitCode::FAILURE;
        }
    };

    let app = match app(&config, &settings) {
        Ok(app) => app,
        Err(e) => {
            error!(error = %e, "Failed to build application");
            return ExitCode::FAILURE;
        }
    };

    let listener = match TcpListener::bind(settings.bind_address).await {
        Ok(listener) => listener,
        Err(e) => {
            let error = classify_server_error(&RawError::bind_failure(e, settings.bind_address));
            ErrorLogger::new(Arc::new(TracingSink), config.production)
                .log(&ErrorValue::Normalized(error));
            return ExitCode::FAILURE;
        }
    };

    info!(address = %settings.bind_address, "Server starting");

    if let Err(e) = axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await
    {
        error!(error = %e, "Server stopped unexpectedly");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

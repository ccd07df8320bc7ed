use tracing::info;

use crate::api;
use crate::cli::commands::ServeArgs;
use crate::config::{self, Settings};
use crate::errors::RelayError;

pub async fn handle_serve(args: ServeArgs) -> Result<(), RelayError> {
    config::load_env_file();
    let settings = Settings::from_env()?;
    // CLI flag wins over the environment.
    let port = args.port.unwrap_or(settings.port);

    info!(host = %args.host, port = port, "Starting relay server");

    let state = api::create_app_state(&settings);
    let app = api::build_router(state);

    let addr = format!("{}:{}", args.host, port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Listening on {}", addr);

    axum::serve(listener, app)
        .await
        .map_err(|e| RelayError::Internal(format!("Server error: {}", e)))?;

    Ok(())
}

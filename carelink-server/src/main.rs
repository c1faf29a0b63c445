use anyhow::Result;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use carelink_server::{
    config::Configuration,
    router,
    services::{Advisor, MySqlUserStore, UserStore},
    AppState,
};
use fitbit_oauth::FitbitOAuthClient;

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing with structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false),
        )
        .init();

    // Load configuration
    let configuration = Configuration::new()?;
    tracing::info!("Configuration loaded successfully");

    // Initialize services
    let user_store: Arc<dyn UserStore> =
        Arc::new(MySqlUserStore::connect(&configuration.database).await?);
    let oauth_client = Arc::new(FitbitOAuthClient::new(
        configuration.fitbit.client_id.clone(),
        configuration.fitbit.client_secret.clone(),
    )?);
    let advisor = Arc::new(Advisor::new(&configuration.openai));

    let app = router(AppState {
        user_store,
        oauth_client,
        advisor,
    });

    // Start server
    let addr = format!(
        "{}:{}",
        configuration.server.host, configuration.server.port
    );
    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

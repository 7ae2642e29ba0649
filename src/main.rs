//! Storefront server: catalog page and password-gated admin panel

use anyhow::Result;
use std::net::SocketAddr;
use storefront::{config::Config, web};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::registry().with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into())).with(tracing_subscriber::fmt::layer()).init();

    let config = Config::from_env()?;
    if config.uses_default_password() {
        tracing::warn!("ADMIN_PASSWORD is not set, the admin panel uses the default password");
    }
    let port = config.port;
    let app = web::router(web::AppState::new(config));

    tracing::info!("🚀 Storefront listening on 0.0.0.0:{}", port);
    tracing::info!("🔐 Admin panel at http://localhost:{}/admin", port);
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", port)).await?;
    axum::serve(listener, app.into_make_service_with_connect_info::<SocketAddr>()).await?;
    Ok(())
}

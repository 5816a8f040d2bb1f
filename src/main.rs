use trackstat_rs::{config, routes, state};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> std::io::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "trackstat_rs=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = config::Config::from_env();
    let addr = format!("0.0.0.0:{}", config.port);
    let app = routes::app(state::AppState::new(config));

    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("trackstat-rs listening on {}", addr);
    tracing::info!("Upload form: http://{}/", addr);
    tracing::info!("JSON upload: POST http://{}/api/upload", addr);

    axum::serve(listener, app).await
}

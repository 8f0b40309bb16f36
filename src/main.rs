use anyhow::Result;
use clap::Parser;
use mcp_geocode_server::{Config, Geocoder, ServerSettings, Transport};
use rmcp::{
    transport::streamable_http_server::{
        session::local::LocalSessionManager, StreamableHttpServerConfig, StreamableHttpService,
    },
    ServiceExt,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "mcp_geocode_server=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // A missing .env file is fine; the variables may come from the host.
    dotenv::dotenv().ok();

    let settings = ServerSettings::parse();
    let config = Config::from_env();

    tracing::info!("Starting MCP geocoding server ({:?})", settings.transport);

    match settings.transport {
        Transport::Stdio => serve_stdio(config).await?,
        Transport::StreamableHttp => serve_http(config, &settings).await?,
    }

    tracing::info!("Server shutdown complete");
    Ok(())
}

async fn serve_stdio(config: Config) -> Result<()> {
    let geocoder = Geocoder::new(config)?;
    let server = geocoder.serve(rmcp::transport::stdio()).await?;
    server.waiting().await?;
    Ok(())
}

async fn serve_http(config: Config, settings: &ServerSettings) -> Result<()> {
    let mount_path = settings.mount_path();

    // Fail at startup rather than on the first session.
    let geocoder = Geocoder::new(config)?;
    let service = StreamableHttpService::new(
        move || Ok(geocoder.clone()),
        LocalSessionManager::default().into(),
        StreamableHttpServerConfig::default(),
    );

    let router = if mount_path == "/" {
        axum::Router::new().fallback_service(service)
    } else {
        axum::Router::new().nest_service(&mount_path, service)
    };

    let listener = settings.bind_listener().await?;
    tracing::info!("Listening on http://{}{}", listener.local_addr()?, mount_path);

    axum::serve(listener, router)
        .with_graceful_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!("Failed to listen for shutdown signal: {}", e);
            }
        })
        .await?;
    Ok(())
}

use san_catalogue::api::router::create_router;
use san_catalogue::api::state::AppState;
use san_catalogue::config::CatalogueConfig;
use san_catalogue::engine::Catalogue;

#[tokio::main]
async fn main() {
    // Handle --health-check flag for Docker HEALTHCHECK (works in scratch image).
    if std::env::args().any(|a| a == "--health-check") {
        match health_check().await {
            Ok(()) => std::process::exit(0),
            Err(e) => {
                eprintln!("Health check failed: {e}");
                std::process::exit(1);
            }
        }
    }

    // Initialize tracing (structured logging).
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "san_catalogue=info,tower_http=info".into()),
        )
        .init();

    let config = CatalogueConfig::from_env();

    // --write: dump both sequences to disk and exit without serving.
    if std::env::args().any(|a| a == "--write") {
        let catalogue = Catalogue::generate();
        match catalogue.write_to(&config.output_dir, &config.base_file, &config.suffixed_file) {
            Ok(()) => std::process::exit(0),
            Err(e) => {
                tracing::error!(error = %e, "failed to write catalogue");
                std::process::exit(1);
            }
        }
    }

    let bind_addr = config.bind_addr();
    let state = AppState::build(config).await;

    let app = create_router(state);

    tracing::info!(
        "san-catalogue v{} starting on {bind_addr}",
        env!("CARGO_PKG_VERSION")
    );

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app).await.expect("Server error");
}

/// Lightweight health check: send raw HTTP/1.1 request and check for 200 OK.
async fn health_check() -> Result<(), Box<dyn std::error::Error>> {
    let port = std::env::var("PORT").unwrap_or_else(|_| "8083".to_string());
    let mut stream = tokio::net::TcpStream::connect(format!("127.0.0.1:{port}")).await?;
    let request =
        format!("GET /health HTTP/1.1\r\nHost: 127.0.0.1:{port}\r\nConnection: close\r\n\r\n");
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    stream.write_all(request.as_bytes()).await?;
    let mut buf = vec![0u8; 1024];
    let n = stream.read(&mut buf).await?;
    let response = String::from_utf8_lossy(&buf[..n]);
    if response.starts_with("HTTP/1.1 200") {
        Ok(())
    } else {
        Err(format!(
            "Unexpected response: {}",
            response.lines().next().unwrap_or("")
        )
        .into())
    }
}

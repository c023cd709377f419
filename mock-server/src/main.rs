use mock_server::Activity;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // MOCK_ACTIVITIES points at a JSON array of activities to serve.
    let activities: Vec<Activity> = match std::env::var("MOCK_ACTIVITIES") {
        Ok(path) => serde_json::from_str(&std::fs::read_to_string(&path)?)?,
        Err(_) => Vec::new(),
    };

    let port = std::env::var("PORT").unwrap_or_else(|_| "8000".to_string());
    let addr = format!("127.0.0.1:{port}");
    let listener = TcpListener::bind(&addr).await?;
    tracing::info!(%addr, activities = activities.len(), "listening");
    mock_server::run_with(listener, activities).await?;
    Ok(())
}

use tokio::signal;

use dotenvy::dotenv;
use tracing_subscriber::EnvFilter;

use user_directory::app::create_app;
use user_directory::config::AppConfig;
use user_directory::db::pool::create_pool;
use user_directory::state::SharedAppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  dotenv().ok();

  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,tower_http=debug")))
    .init();

  let config = AppConfig::from_env()?;
  let pool = create_pool(&config.database).await?;

  sqlx::migrate!("./migrations").run(&pool).await?;

  tracing::info!("Database migrations applied successfully");

  let app_state = SharedAppState::new(pool).await;
  let app = create_app(app_state);

  let addr = config.bind_addr()?;
  let listener = tokio::net::TcpListener::bind(addr).await?;

  tracing::info!("Server running on http://{}", addr);

  axum::serve(listener, app)
    .with_graceful_shutdown(shutdown_signal())
    .await?;

  Ok(())
}

async fn shutdown_signal() {
  let ctrl_c = async {
    if let Err(e) = signal::ctrl_c().await {
      tracing::error!("Failed to install Ctrl+C handler: {}", e);
      std::future::pending::<()>().await;
    }
  };

  #[cfg(unix)]
  let terminate = async {
    match signal::unix::signal(signal::unix::SignalKind::terminate()) {
      Ok(mut sig) => {
        sig.recv().await;
      }
      Err(e) => {
        tracing::error!("Failed to install signal handler: {}", e);
        std::future::pending::<()>().await;
      }
    }
  };

  #[cfg(not(unix))]
  let terminate = std::future::pending::<()>();

  tokio::select! {
      _ = ctrl_c => {},
      _ = terminate => {},
  }

  tracing::info!("Received termination signal, shutting down gracefully...");
}

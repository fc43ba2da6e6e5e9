use actix_web::{middleware::NormalizePath, web, App, HttpServer};
use anyhow::Context;
use todo_service::{config::Config, routes, AppState};
use tracing_actix_web::TracingLogger;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env().context("Failed to load configuration")?;

    init_tracing(config.is_production());

    tracing::info!("Starting todo-service v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!("Environment: {}", config.app_env);

    config.check_jwt_secret()?;

    let state = AppState::from_config(&config).await?;
    let tokens = state.tokens.clone();
    let bind_address = config.bind_address();

    tracing::info!("Listening on {}:{}", bind_address.0, bind_address.1);

    HttpServer::new(move || {
        let tokens = tokens.clone();
        App::new()
            .app_data(web::Data::new(state.clone()))
            .wrap(NormalizePath::trim())
            .wrap(TracingLogger::default())
            .configure(|cfg| routes::configure(cfg, tokens))
    })
    .bind(bind_address)
    .context("Failed to bind HTTP listener")?
    .run()
    .await
    .context("HTTP server error")?;

    tracing::info!("todo-service stopped");
    Ok(())
}

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,todo_service=debug"));

    if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json().with_target(false))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
}

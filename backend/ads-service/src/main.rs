use actix_cors::Cors;
use actix_web::{web, App, HttpServer};
use sqlx::postgres::PgPoolOptions;
use tracing_actix_web::TracingLogger;
use tracing_subscriber::EnvFilter;

use ads_service::config::Settings;
use ads_service::services::content_filter::ContentFilter;
use ads_service::services::email::EmailService;
use ads_service::{configure_routes, AppState};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,sqlx=warn")),
        )
        .init();

    let settings = Settings::load()?;

    auth_core::jwt::initialize_jwt_secret(&settings.jwt.secret)?;

    let db = PgPoolOptions::new()
        .max_connections(settings.database.max_connections)
        .connect(&settings.database.url)
        .await?;

    sqlx::migrate!("./migrations").run(&db).await?;

    let email = EmailService::new(&settings.email)?;
    let state = AppState {
        db,
        email,
        content_filter: ContentFilter::with_default_terms(),
    };

    let bind_addr = (settings.server.host.clone(), settings.server.port);
    tracing::info!(
        host = %settings.server.host,
        port = settings.server.port,
        "starting ads-service"
    );

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(state.clone()))
            .wrap(TracingLogger::default())
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allow_any_method()
                    .allow_any_header()
                    .max_age(3600),
            )
            .configure(configure_routes)
    })
    .bind(bind_addr)?
    .run()
    .await?;

    Ok(())
}

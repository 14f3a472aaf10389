use actix_cors::Cors;
use actix_web::{middleware, web, App, HttpServer};
use product_filter::config::Settings;
use product_filter::routes::{self, AppState, StreamPacing};
use product_filter::services::{CatalogSource, JsonFileStore};
use product_filter::{build_decision_client, logging};
use std::sync::Arc;
use tracing::{error, info};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    let settings = Settings::load().unwrap_or_else(|e| {
        eprintln!("Failed to load configuration: {}", e);
        panic!("Configuration error: {}", e);
    });

    logging::init_tracing(&settings.logging);

    info!("Starting product filter service...");
    info!("Gateway: {} (model {})", settings.llm.endpoint, settings.llm.model);

    let client = match build_decision_client(&settings.llm) {
        Ok(client) => Arc::new(client),
        Err(e) => {
            error!("Failed to initialize decision client: {}", e);
            return Err(std::io::Error::new(std::io::ErrorKind::Other, e.to_string()));
        }
    };

    let catalog: Arc<dyn CatalogSource> = Arc::new(JsonFileStore::new(
        &settings.data.users_path,
        &settings.data.products_path,
    ));

    info!(
        "Catalog files: {} / {}",
        settings.data.users_path, settings.data.products_path
    );

    let app_state = AppState {
        client,
        catalog,
        pacing: StreamPacing::from(&settings.streaming),
    };

    let host = settings.server.host.clone();
    let port = settings.server.port;
    let workers = settings.server.workers.unwrap_or(4);

    info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .wrap(middleware::Compress::default())
            .configure(routes::configure_routes)
    })
    .workers(workers)
    .bind((host, port))?
    .run()
    .await
}

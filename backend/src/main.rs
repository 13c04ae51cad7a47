mod routes;
mod scoring;

use actix_cors::Cors;
use actix_web::{web, App, HttpServer};
use routes::configure_routes;
use scoring::config::PointsTable;
use std::env;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv::dotenv().ok();
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let table = match env::var("POINTS_TABLE") {
        Ok(path) => {
            log::info!("Loading points table from {}", path);
            PointsTable::load(&path)
        }
        Err(_) => PointsTable::builtin(),
    };
    let table = table.map_err(|e| {
        log::error!("Failed to load points table: {}", e);
        std::io::Error::other(format!("Points table loading failed: {}", e))
    })?;
    log::info!("Points table v{} with {} materials", table.version, table.materials.len());
    let table = web::Data::new(table);

    let frontend_dir = env::var("FRONTEND_DIR").ok().or_else(|| {
        env::var("CARGO_MANIFEST_DIR")
            .ok()
            .map(|manifest_dir| format!("{}/../frontend/dist", manifest_dir))
    });

    let port = env::var("PORT").unwrap_or_else(|_| "8000".to_string());
    let bind_address = format!("0.0.0.0:{}", port);

    log::info!("Starting scoring service on {}", bind_address);

    HttpServer::new(move || {
        App::new()
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allowed_methods(vec!["GET", "POST", "OPTIONS"])
                    .allowed_headers(vec![
                        actix_web::http::header::ACCEPT,
                        actix_web::http::header::CONTENT_TYPE,
                    ])
                    .max_age(3600),
            )
            .app_data(table.clone())
            .configure(|cfg| configure_routes(cfg, frontend_dir.clone()))
    })
    .bind(&bind_address)?
    .run()
    .await
}

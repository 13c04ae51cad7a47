use actix_files::Files;
use actix_web::{error, web, HttpResponse};
use log::info;
use serde::Serialize;
use serde_json::json;
use shared::{ScoreResult, ScoringInput};
use std::path::Path;

use crate::scoring::config::PointsTable;
use crate::scoring::rules::calculate_total_points;

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

pub fn configure_routes(cfg: &mut web::ServiceConfig, frontend_dir: Option<String>) {
    cfg.app_data(web::JsonConfig::default().error_handler(|err, _req| {
        let resp = HttpResponse::BadRequest().json(ErrorResponse { error: err.to_string() });
        error::InternalError::from_response(err, resp).into()
    }))
    .service(web::resource("/").route(web::get().to(health)))
    .service(web::resource("/calculate_points").route(web::post().to(calculate_points)));

    if let Some(dir) = frontend_dir.filter(|dir| Path::new(dir).is_dir()) {
        cfg.service(Files::new("/app", dir).index_file("index.html"));
    }
}

async fn health() -> HttpResponse {
    HttpResponse::Ok().json(json!({ "message": "API is running" }))
}

async fn calculate_points(table: web::Data<PointsTable>, request: web::Json<ScoringInput>) -> HttpResponse {
    let request = request.into_inner();
    let result = calculate_total_points(&table, &request);

    match &result {
        ScoreResult::Scored { total_score, .. } => {
            info!("Scored {} with {} damage types: {}", request.material, request.damage_data.len(), total_score)
        }
        ScoreResult::Rejected { error } => info!("Rejected material {}: {}", request.material, error),
    }

    HttpResponse::Ok().json(result)
}

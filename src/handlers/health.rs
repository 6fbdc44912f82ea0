use actix_web::{web, HttpResponse, Result};
use serde::Serialize;

use crate::models::ApiResponse;
use crate::services::DataService;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct HealthInfo {
    status: &'static str,
    mock_mode: bool,
    version: &'static str,
}

pub async fn health_check(data: web::Data<DataService>) -> Result<HttpResponse> {
    let response = ApiResponse::success(HealthInfo {
        status: "ok",
        mock_mode: data.is_mock(),
        version: env!("CARGO_PKG_VERSION"),
    });
    Ok(HttpResponse::Ok().json(response))
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health_check));
}

use actix_web::{web, HttpResponse, Result};
use chrono::Utc;

use crate::models::ApiResponse;
use crate::services::{DataService, MarketService};

use super::error_response;

/// 主要指数行情
pub async fn get_indices(data: web::Data<DataService>) -> Result<HttpResponse> {
    match data.get_market_indices().await {
        Ok(indices) => Ok(HttpResponse::Ok().json(ApiResponse::success(indices))),
        Err(e) => Ok(error_response(e)),
    }
}

/// 全市场快照（指数、板块、涨跌榜、市场宽度）
pub async fn get_snapshot(market: web::Data<MarketService>) -> Result<HttpResponse> {
    Ok(HttpResponse::Ok().json(ApiResponse::success(market.snapshot())))
}

pub async fn get_status(market: web::Data<MarketService>) -> Result<HttpResponse> {
    let status = market.update_status(Utc::now());
    Ok(HttpResponse::Ok().json(ApiResponse::success(status)))
}

/// 重新生成快照
pub async fn refresh(market: web::Data<MarketService>) -> Result<HttpResponse> {
    let snapshot = market.refresh();
    log::info!("手动刷新市场快照，行情基调: {:?}", snapshot.regime);
    Ok(HttpResponse::Ok().json(ApiResponse::success(snapshot)))
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/market")
            .route("/indices", web::get().to(get_indices))
            .route("/snapshot", web::get().to(get_snapshot))
            .route("/status", web::get().to(get_status))
            .route("/refresh", web::post().to(refresh))
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{test, App};
    use serde_json::Value;

    #[actix_web::test]
    async fn test_market_routes() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(DataService::mock_with_seed(401)))
                .app_data(web::Data::new(MarketService::with_seed(402)))
                .configure(config),
        )
        .await;

        let req = test::TestRequest::get().uri("/market/indices").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert!(!body["data"].as_array().unwrap().is_empty());

        let req = test::TestRequest::get().uri("/market/snapshot").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["data"]["gainers"].as_array().unwrap().len(), 15);
        assert!(body["data"]["breadth"]["totalIssues"].is_u64());

        let req = test::TestRequest::get().uri("/market/status").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        let status = &body["data"];
        assert!(status["isOpen"].is_boolean());
        if status["isOpen"] == true {
            assert!(status["nextClose"].is_string());
        } else {
            assert!(status["nextOpen"].is_string());
        }

        let req = test::TestRequest::post().uri("/market/refresh").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["success"], true);
        assert!(body["data"]["regime"].is_string());
    }
}

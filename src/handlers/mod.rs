pub mod health;
pub mod stock;
pub mod watchlist;
pub mod event;
pub mod market;

use actix_web::{web, HttpResponse};

use crate::error::DataError;
use crate::models::ApiResponse;

/// 将数据层错误映射为统一的错误响应
pub fn error_response(e: DataError) -> HttpResponse {
    let body = ApiResponse::<()>::error(e.to_string());
    match e {
        DataError::NotFound(_) => HttpResponse::NotFound().json(body),
        _ => {
            log::error!("请求处理失败: {}", e);
            HttpResponse::InternalServerError().json(body)
        }
    }
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .configure(health::config)
            .configure(stock::config)
            .configure(watchlist::config)
            .configure(event::config)
            .configure(market::config)
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::{DataService, MarketService};
    use actix_web::body::to_bytes;
    use actix_web::http::StatusCode;
    use actix_web::{test, App};

    #[actix_web::test]
    async fn test_routes_mounted_under_api_v1() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(DataService::mock_with_seed(11)))
                .app_data(web::Data::new(MarketService::with_seed(12)))
                .configure(config),
        )
        .await;

        for uri in ["/api/v1/health", "/api/v1/stocks", "/api/v1/watchlists", "/api/v1/market/status"] {
            let req = test::TestRequest::get().uri(uri).to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::OK, "{}", uri);
        }
    }

    #[actix_web::test]
    async fn test_error_response_status() {
        let resp = error_response(DataError::NotFound("watchlist w9".to_string()));
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        let resp = error_response(DataError::EmptyData);
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let bytes = to_bytes(resp.into_body()).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["success"], false);
        assert!(body["message"].is_string());
    }
}

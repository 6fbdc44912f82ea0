use actix_web::{web, HttpResponse, Result};

use crate::models::{AddSymbolRequest, ApiResponse, CreateWatchlistRequest, WatchlistUpdate};
use crate::services::DataService;

use super::error_response;

pub async fn list_watchlists(data: web::Data<DataService>) -> Result<HttpResponse> {
    match data.get_watchlists().await {
        Ok(lists) => Ok(HttpResponse::Ok().json(ApiResponse::success(lists))),
        Err(e) => Ok(error_response(e)),
    }
}

pub async fn create_watchlist(
    data: web::Data<DataService>,
    body: web::Json<CreateWatchlistRequest>,
) -> Result<HttpResponse> {
    let CreateWatchlistRequest { name, description } = body.into_inner();

    match data.create_watchlist(&name, description).await {
        Ok(list) => Ok(HttpResponse::Created().json(ApiResponse::success(list))),
        Err(e) => Ok(error_response(e)),
    }
}

pub async fn get_watchlist(data: web::Data<DataService>, path: web::Path<String>) -> Result<HttpResponse> {
    let id = path.into_inner();

    match data.get_watchlist(&id).await {
        Ok(list) => Ok(HttpResponse::Ok().json(ApiResponse::success(list))),
        Err(e) => Ok(error_response(e)),
    }
}

pub async fn update_watchlist(
    data: web::Data<DataService>,
    path: web::Path<String>,
    body: web::Json<WatchlistUpdate>,
) -> Result<HttpResponse> {
    let id = path.into_inner();

    match data.update_watchlist(&id, body.into_inner()).await {
        Ok(list) => Ok(HttpResponse::Ok().json(ApiResponse::success(list))),
        Err(e) => Ok(error_response(e)),
    }
}

pub async fn delete_watchlist(data: web::Data<DataService>, path: web::Path<String>) -> Result<HttpResponse> {
    let id = path.into_inner();

    match data.delete_watchlist(&id).await {
        Ok(()) => Ok(HttpResponse::Ok().json(ApiResponse::success(id))),
        Err(e) => Ok(error_response(e)),
    }
}

/// 自选股中各股票的行情
pub async fn get_watchlist_stocks(
    data: web::Data<DataService>,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    let id = path.into_inner();

    match data.get_watchlist_stocks(&id).await {
        Ok(stocks) => Ok(HttpResponse::Ok().json(ApiResponse::success(stocks))),
        Err(e) => Ok(error_response(e)),
    }
}

pub async fn add_stock(
    data: web::Data<DataService>,
    path: web::Path<String>,
    body: web::Json<AddSymbolRequest>,
) -> Result<HttpResponse> {
    let id = path.into_inner();

    match data.add_stock_to_watchlist(&id, &body.symbol).await {
        Ok(list) => Ok(HttpResponse::Ok().json(ApiResponse::success(list))),
        Err(e) => Ok(error_response(e)),
    }
}

pub async fn remove_stock(
    data: web::Data<DataService>,
    path: web::Path<(String, String)>,
) -> Result<HttpResponse> {
    let (id, symbol) = path.into_inner();

    match data.remove_stock_from_watchlist(&id, &symbol).await {
        Ok(list) => Ok(HttpResponse::Ok().json(ApiResponse::success(list))),
        Err(e) => Ok(error_response(e)),
    }
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/watchlists")
            .route("", web::get().to(list_watchlists))
            .route("", web::post().to(create_watchlist))
            .route("/{id}", web::get().to(get_watchlist))
            .route("/{id}", web::put().to(update_watchlist))
            .route("/{id}", web::delete().to(delete_watchlist))
            .route("/{id}/stocks", web::get().to(get_watchlist_stocks))
            .route("/{id}/stocks", web::post().to(add_stock))
            .route("/{id}/stocks/{symbol}", web::delete().to(remove_stock))
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::{test, App};
    use serde_json::{json, Value};

    #[actix_web::test]
    async fn test_watchlist_crud() {
        let data = web::Data::new(DataService::mock_with_seed(201));
        let app = test::init_service(App::new().app_data(data).configure(config)).await;

        let req = test::TestRequest::post()
            .uri("/watchlists")
            .set_json(json!({"name": "Banks", "description": "大型银行"}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let body: Value = test::read_body_json(resp).await;
        let id = body["data"]["id"].as_str().unwrap().to_string();
        assert_eq!(body["data"]["stocks"], json!([]));

        for _ in 0..2 {
            let req = test::TestRequest::post()
                .uri(&format!("/watchlists/{}/stocks", id))
                .set_json(json!({"symbol": "jpm"}))
                .to_request();
            let body: Value = test::call_and_read_body_json(&app, req).await;
            assert_eq!(body["data"]["stocks"], json!(["JPM"]));
        }

        let req = test::TestRequest::put()
            .uri(&format!("/watchlists/{}", id))
            .set_json(json!({"name": "US Banks", "stocks": ["JPM", "BAC"]}))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["data"]["name"], "US Banks");

        let req = test::TestRequest::get()
            .uri(&format!("/watchlists/{}/stocks", id))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["data"][1]["symbol"], "BAC");

        let req = test::TestRequest::delete()
            .uri(&format!("/watchlists/{}/stocks/JPM", id))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["data"]["stocks"], json!(["BAC"]));

        let req = test::TestRequest::delete()
            .uri(&format!("/watchlists/{}", id))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert!(resp.status().is_success());

        let req = test::TestRequest::get().uri("/watchlists").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["data"].as_array().unwrap().len(), 3);
    }
}

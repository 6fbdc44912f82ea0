use actix_web::{web, HttpResponse, Result};

use crate::models::{ApiResponse, StockListQuery, StockQuery};
use crate::services::data_service::{DataService, DEFAULT_HISTORY_DAYS, DEFAULT_NEWS_LIMIT};

use super::error_response;

/// 按条件分页获取股票列表
pub async fn list_stocks(
    data: web::Data<DataService>,
    query: web::Query<StockListQuery>,
) -> Result<HttpResponse> {
    let filter = query.filter();

    match data.get_stocks(&filter, query.pagination()).await {
        Ok(result) => Ok(HttpResponse::Ok().json(ApiResponse::success(result))),
        Err(e) => Ok(error_response(e)),
    }
}

pub async fn get_stock(data: web::Data<DataService>, path: web::Path<String>) -> Result<HttpResponse> {
    let symbol = path.into_inner();

    match data.get_stock(&symbol).await {
        Ok(stock) => Ok(HttpResponse::Ok().json(ApiResponse::success(stock))),
        Err(e) => Ok(error_response(e)),
    }
}

pub async fn get_stock_history(
    data: web::Data<DataService>,
    path: web::Path<String>,
    query: web::Query<StockQuery>,
) -> Result<HttpResponse> {
    let symbol = path.into_inner();
    let days = query.days.unwrap_or(DEFAULT_HISTORY_DAYS);

    match data.get_stock_history(&symbol, days).await {
        Ok(history) => Ok(HttpResponse::Ok().json(ApiResponse::success(history))),
        Err(e) => Ok(error_response(e)),
    }
}

pub async fn get_stock_financials(
    data: web::Data<DataService>,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    let symbol = path.into_inner();

    match data.get_stock_financials(&symbol).await {
        Ok(statements) => Ok(HttpResponse::Ok().json(ApiResponse::success(statements))),
        Err(e) => Ok(error_response(e)),
    }
}

pub async fn get_stock_fundamentals(
    data: web::Data<DataService>,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    let symbol = path.into_inner();

    match data.get_stock_fundamentals(&symbol).await {
        Ok(analysis) => Ok(HttpResponse::Ok().json(ApiResponse::success(analysis))),
        Err(e) => Ok(error_response(e)),
    }
}

pub async fn get_stock_news(
    data: web::Data<DataService>,
    path: web::Path<String>,
    query: web::Query<StockQuery>,
) -> Result<HttpResponse> {
    let symbol = path.into_inner();
    let limit = query.limit.unwrap_or(DEFAULT_NEWS_LIMIT);

    match data.get_stock_news(&symbol, limit).await {
        Ok(news) => Ok(HttpResponse::Ok().json(ApiResponse::success(news))),
        Err(e) => Ok(error_response(e)),
    }
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/stocks")
            .route("", web::get().to(list_stocks))
            .route("/{symbol}", web::get().to(get_stock))
            .route("/{symbol}/history", web::get().to(get_stock_history))
            .route("/{symbol}/financials", web::get().to(get_stock_financials))
            .route("/{symbol}/fundamentals", web::get().to(get_stock_fundamentals))
            .route("/{symbol}/news", web::get().to(get_stock_news))
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::data_service::{MAX_HISTORY_DAYS, MAX_NEWS_LIMIT};
    use actix_web::{test, App};
    use serde_json::Value;

    fn app_data() -> web::Data<DataService> {
        web::Data::new(DataService::mock_with_seed(101))
    }

    #[actix_web::test]
    async fn test_list_stocks_with_filter_query() {
        let app = test::init_service(App::new().app_data(app_data()).configure(config)).await;
        let req = test::TestRequest::get()
            .uri("/stocks?page=3&pageSize=20&minPrice=100&sectors=Technology,Financial")
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["success"], true);
        assert_eq!(body["data"]["pagination"]["page"], 3);
        assert_eq!(body["data"]["pagination"]["totalPages"], 50);
        assert_eq!(body["data"]["appliedFilters"]["minPrice"], 100.0);
        for stock in body["data"]["stocks"].as_array().unwrap() {
            assert!(stock["price"].as_f64().unwrap() >= 100.0);
            let sector = stock["sector"].as_str().unwrap();
            assert!(sector == "Technology" || sector == "Financial");
        }
    }

    #[actix_web::test]
    async fn test_stock_detail_routes() {
        let app = test::init_service(App::new().app_data(app_data()).configure(config)).await;

        let req = test::TestRequest::get().uri("/stocks/nvda").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["data"]["symbol"], "NVDA");

        let req = test::TestRequest::get().uri("/stocks/NVDA/history?days=30").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["data"].as_array().unwrap().len(), 31);

        let req = test::TestRequest::get().uri("/stocks/NVDA/news").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["data"].as_array().unwrap().len(), 10);

        let req = test::TestRequest::get().uri("/stocks/NVDA/financials").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["data"].as_array().unwrap().len(), 8);

        let req = test::TestRequest::get().uri("/stocks/NVDA/fundamentals").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert!(body["data"]["overallScore"].is_u64());
    }

    #[actix_web::test]
    async fn test_huge_history_days_is_capped() {
        let app = test::init_service(App::new().app_data(app_data()).configure(config)).await;

        let req = test::TestRequest::get()
            .uri("/stocks/AAPL/history?days=4294967295")
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["success"], true);
        assert_eq!(body["data"].as_array().unwrap().len(), MAX_HISTORY_DAYS as usize + 1);

        let req = test::TestRequest::get().uri("/stocks/AAPL/news?limit=1000000").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["data"].as_array().unwrap().len(), MAX_NEWS_LIMIT);
    }
}

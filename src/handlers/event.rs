use actix_web::{web, HttpResponse, Result};

use crate::models::{group_by_day, ApiResponse, EventQuery};
use crate::services::DataService;

use super::error_response;

/// 按日期区间和类型筛选事件
pub async fn list_events(
    data: web::Data<DataService>,
    query: web::Query<EventQuery>,
) -> Result<HttpResponse> {
    match data.get_events(&query).await {
        Ok(events) => Ok(HttpResponse::Ok().json(ApiResponse::success(events))),
        Err(e) => Ok(error_response(e)),
    }
}

/// 按天分组的事件日历
pub async fn get_calendar(
    data: web::Data<DataService>,
    query: web::Query<EventQuery>,
) -> Result<HttpResponse> {
    match data.get_events(&query).await {
        Ok(events) => Ok(HttpResponse::Ok().json(ApiResponse::success(group_by_day(&events)))),
        Err(e) => Ok(error_response(e)),
    }
}

pub async fn get_event(data: web::Data<DataService>, path: web::Path<String>) -> Result<HttpResponse> {
    let id = path.into_inner();

    match data.get_event(&id).await {
        Ok(event) => Ok(HttpResponse::Ok().json(ApiResponse::success(event))),
        Err(e) => Ok(error_response(e)),
    }
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/events")
            .route("", web::get().to(list_events))
            .route("/calendar", web::get().to(get_calendar))
            .route("/{id}", web::get().to(get_event))
    );
}

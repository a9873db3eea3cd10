use std::sync::Arc;

use actix_web::{delete, get, post, put, web, HttpResponse};
use validator::Validate;

use crate::{
    app_state::AppState,
    errors::AppError,
    models::{
        domain::ReadingSet,
        dto::{
            request::PaginationParams,
            response::{DeleteResponse, ReadingSetListResponse},
        },
    },
};

#[get("/api/lesen")]
pub async fn list_reading_sets(
    state: web::Data<Arc<AppState>>,
    query: web::Query<PaginationParams>,
) -> Result<HttpResponse, AppError> {
    let pagination = query.into_inner();
    pagination.validate()?;

    let (items, total) = state
        .content_service
        .list_reading_sets(pagination.offset(), pagination.limit())
        .await?;

    Ok(HttpResponse::Ok().json(ReadingSetListResponse {
        items,
        total,
        offset: pagination.offset(),
        limit: pagination.limit(),
    }))
}

#[get("/api/lesen/{id}")]
pub async fn get_reading_set(
    state: web::Data<Arc<AppState>>,
    id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let set = state.content_service.get_reading_set(&id).await?;
    Ok(HttpResponse::Ok().json(set))
}

#[post("/api/lesen")]
pub async fn create_reading_set(
    state: web::Data<Arc<AppState>>,
    request: web::Json<ReadingSet>,
) -> Result<HttpResponse, AppError> {
    let set = state
        .content_service
        .create_reading_set(request.into_inner())
        .await?;
    Ok(HttpResponse::Created().json(set))
}

#[put("/api/lesen/{id}")]
pub async fn update_reading_set(
    state: web::Data<Arc<AppState>>,
    id: web::Path<String>,
    request: web::Json<ReadingSet>,
) -> Result<HttpResponse, AppError> {
    let set = state
        .content_service
        .update_reading_set(&id, request.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(set))
}

#[delete("/api/lesen/{id}")]
pub async fn delete_reading_set(
    state: web::Data<Arc<AppState>>,
    id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    state.content_service.delete_reading_set(&id).await?;
    Ok(HttpResponse::Ok().json(DeleteResponse {
        message: format!("Reading set '{}' deleted", id),
    }))
}

#[get("/api/horen")]
pub async fn list_listening_sets(state: web::Data<Arc<AppState>>) -> Result<HttpResponse, AppError> {
    let sets = state.content_service.list_listening_sets().await?;
    Ok(HttpResponse::Ok().json(sets))
}

#[get("/api/horen/{id}")]
pub async fn get_listening_set(
    state: web::Data<Arc<AppState>>,
    id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let set = state.content_service.get_listening_set(&id).await?;
    Ok(HttpResponse::Ok().json(set))
}

#[get("/api/schreiben")]
pub async fn list_writing_tasks(state: web::Data<Arc<AppState>>) -> Result<HttpResponse, AppError> {
    let tasks = state.content_service.list_writing_tasks().await?;
    Ok(HttpResponse::Ok().json(tasks))
}

#[get("/api/schreiben/{id}")]
pub async fn get_writing_task(
    state: web::Data<Arc<AppState>>,
    id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let task = state.content_service.get_writing_task(&id).await?;
    Ok(HttpResponse::Ok().json(task))
}

use std::sync::Arc;

use actix_web::{get, post, put, web, HttpResponse};
use validator::Validate;

use crate::{
    app_state::AppState,
    errors::AppError,
    models::{
        domain::{ExamSection, StageKey},
        dto::request::RecordAnswerRequest,
    },
};

#[post("/api/sessions")]
pub async fn create_session(state: web::Data<Arc<AppState>>) -> Result<HttpResponse, AppError> {
    let created = state.session_service.create_session().await?;
    Ok(HttpResponse::Created().json(created))
}

#[post("/api/sessions/{session}/stages/{set_id}/{stage}")]
pub async fn open_stage(
    state: web::Data<Arc<AppState>>,
    path: web::Path<(String, String, StageKey)>,
) -> Result<HttpResponse, AppError> {
    let (session, set_id, stage) = path.into_inner();
    let view = state
        .session_service
        .open_stage(&session, &set_id, stage)
        .await?;
    Ok(HttpResponse::Ok().json(view))
}

#[get("/api/sessions/{session}/stages/{stage}")]
pub async fn get_stage(
    state: web::Data<Arc<AppState>>,
    path: web::Path<(String, StageKey)>,
) -> Result<HttpResponse, AppError> {
    let (session, stage) = path.into_inner();
    let view = state.session_service.stage_view(&session, stage).await?;
    Ok(HttpResponse::Ok().json(view))
}

#[put("/api/sessions/{session}/stages/{stage}/answers")]
pub async fn record_answer(
    state: web::Data<Arc<AppState>>,
    path: web::Path<(String, StageKey)>,
    request: web::Json<RecordAnswerRequest>,
) -> Result<HttpResponse, AppError> {
    let (session, stage) = path.into_inner();
    let request = request.into_inner();
    request.validate()?;

    let recorded = state
        .session_service
        .record_answer(&session, stage, request.question_id, request.value)
        .await?;
    Ok(HttpResponse::Ok().json(recorded))
}

#[post("/api/sessions/{session}/stages/{stage}/review")]
pub async fn review_stage(
    state: web::Data<Arc<AppState>>,
    path: web::Path<(String, StageKey)>,
) -> Result<HttpResponse, AppError> {
    let (session, stage) = path.into_inner();
    let outcome = state.session_service.review(&session, stage).await?;
    Ok(HttpResponse::Ok().json(outcome))
}

#[get("/api/sessions/{session}/scores")]
pub async fn get_scores(
    state: web::Data<Arc<AppState>>,
    session: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let scores = state.session_service.scores(&session).await?;
    Ok(HttpResponse::Ok().json(scores))
}

#[get("/api/sessions/{session}/results/{section}/{set_id}")]
pub async fn get_results(
    state: web::Data<Arc<AppState>>,
    path: web::Path<(String, ExamSection, String)>,
) -> Result<HttpResponse, AppError> {
    let (session, section, set_id) = path.into_inner();
    let result = state
        .session_service
        .results(&session, section, &set_id)
        .await?;
    Ok(HttpResponse::Ok().json(result))
}

use actix_web::{http::StatusCode, web, HttpResponse, Responder};
use tracing::instrument;

use crate::{
    entities::{person::PersonId, teacher::TeacherRequest},
    errors::AppError,
    handlers::results::general_response,
    AppState, Store,
};

#[instrument(skip(state, data))]
pub async fn create_teacher<R: Store>(
    state: web::Data<AppState<R>>,
    data: web::Json<TeacherRequest>,
) -> Result<impl Responder, AppError> {
    let response = state.teacher_handler.create(data.into_inner()).await?;
    Ok(general_response(response, StatusCode::CREATED))
}

#[instrument(skip(state))]
pub async fn get_all_teachers<R: Store>(
    state: web::Data<AppState<R>>,
) -> Result<impl Responder, AppError> {
    let teachers = state.teacher_handler.list_all().await?;
    Ok(HttpResponse::Ok().json(teachers))
}

#[instrument(skip(state))]
pub async fn get_teacher_by_id<R: Store>(
    state: web::Data<AppState<R>>,
    teacher_id: web::Path<PersonId>,
) -> Result<impl Responder, AppError> {
    let teacher = state.teacher_handler.get_by_id(teacher_id.into_inner()).await?;
    Ok(HttpResponse::Ok().json(teacher))
}

#[instrument(skip(state))]
pub async fn get_teacher_by_name<R: Store>(
    state: web::Data<AppState<R>>,
    name: web::Path<String>,
) -> Result<impl Responder, AppError> {
    let teacher = state.teacher_handler.get_by_name(&name).await?;
    Ok(HttpResponse::Ok().json(teacher))
}

#[instrument(skip(state))]
pub async fn get_teacher_students<R: Store>(
    state: web::Data<AppState<R>>,
    teacher_id: web::Path<PersonId>,
) -> Result<impl Responder, AppError> {
    let student_ids = state.teacher_handler.linked_ids(teacher_id.into_inner()).await?;
    Ok(HttpResponse::Ok().json(serde_json::json!({ "student_ids": student_ids })))
}

#[instrument(skip(state, data))]
pub async fn update_teacher<R: Store>(
    state: web::Data<AppState<R>>,
    teacher_id: web::Path<PersonId>,
    data: web::Json<TeacherRequest>,
) -> Result<impl Responder, AppError> {
    let response = state
        .teacher_handler
        .update(teacher_id.into_inner(), data.into_inner())
        .await?;
    Ok(general_response(response, StatusCode::OK))
}

#[instrument(skip(state))]
pub async fn delete_teacher<R: Store>(
    state: web::Data<AppState<R>>,
    teacher_id: web::Path<PersonId>,
) -> Result<impl Responder, AppError> {
    let response = state.teacher_handler.delete(teacher_id.into_inner()).await?;
    Ok(general_response(response, StatusCode::OK))
}

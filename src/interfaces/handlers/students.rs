use actix_web::{http::StatusCode, web, HttpResponse, Responder};
use serde::Deserialize;
use tracing::instrument;

use crate::{
    entities::{person::PersonId, student::StudentRequest},
    errors::AppError,
    handlers::results::general_response,
    AppState, Store,
};

#[derive(Debug, Deserialize)]
pub struct TeacherNameQuery {
    pub name: Option<String>,
}

#[instrument(skip(state, data))]
pub async fn create_student<R: Store>(
    state: web::Data<AppState<R>>,
    data: web::Json<StudentRequest>,
) -> Result<impl Responder, AppError> {
    let response = state.student_handler.create(data.into_inner()).await?;
    Ok(general_response(response, StatusCode::CREATED))
}

#[instrument(skip(state))]
pub async fn get_all_students<R: Store>(
    state: web::Data<AppState<R>>,
) -> Result<impl Responder, AppError> {
    let students = state.student_handler.list_all().await?;
    Ok(HttpResponse::Ok().json(students))
}

#[instrument(skip(state))]
pub async fn get_students_by_teacher_name<R: Store>(
    state: web::Data<AppState<R>>,
    query: web::Query<TeacherNameQuery>,
) -> Result<impl Responder, AppError> {
    let students = state
        .student_handler
        .students_by_teacher_name(query.name.as_deref())
        .await?;
    Ok(HttpResponse::Ok().json(students))
}

#[instrument(skip(state))]
pub async fn get_student_by_id<R: Store>(
    state: web::Data<AppState<R>>,
    student_id: web::Path<PersonId>,
) -> Result<impl Responder, AppError> {
    let student = state.student_handler.get_by_id(student_id.into_inner()).await?;
    Ok(HttpResponse::Ok().json(student))
}

#[instrument(skip(state))]
pub async fn get_student_by_name<R: Store>(
    state: web::Data<AppState<R>>,
    name: web::Path<String>,
) -> Result<impl Responder, AppError> {
    let student = state.student_handler.get_by_name(&name).await?;
    Ok(HttpResponse::Ok().json(student))
}

#[instrument(skip(state))]
pub async fn get_student_teachers<R: Store>(
    state: web::Data<AppState<R>>,
    student_id: web::Path<PersonId>,
) -> Result<impl Responder, AppError> {
    let teacher_ids = state.student_handler.linked_ids(student_id.into_inner()).await?;
    Ok(HttpResponse::Ok().json(serde_json::json!({ "teacher_ids": teacher_ids })))
}

#[instrument(skip(state, data))]
pub async fn update_student<R: Store>(
    state: web::Data<AppState<R>>,
    student_id: web::Path<PersonId>,
    data: web::Json<StudentRequest>,
) -> Result<impl Responder, AppError> {
    let response = state
        .student_handler
        .update(student_id.into_inner(), data.into_inner())
        .await?;
    Ok(general_response(response, StatusCode::OK))
}

#[instrument(skip(state))]
pub async fn delete_student<R: Store>(
    state: web::Data<AppState<R>>,
    student_id: web::Path<PersonId>,
) -> Result<impl Responder, AppError> {
    let response = state.student_handler.delete(student_id.into_inner()).await?;
    Ok(general_response(response, StatusCode::OK))
}

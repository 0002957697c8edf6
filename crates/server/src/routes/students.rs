use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use service::domain::{Student, StudentInput};

use crate::errors::{parse_id, ApiError};
use crate::state::ServerState;

/// Query string of `GET /students`. Empty values count as absent.
#[derive(Debug, Default, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListQuery {
    /// Exact student name, at least three characters
    pub name: Option<String>,
    /// One of CSE, ISE, MECH, ECE, EEE, CIVIL
    pub branch: Option<String>,
    /// `true` embeds each student's company
    #[serde(rename = "includeCompany")]
    pub include_company: Option<String>,
}

#[utoipa::path(
    get, path = "/students", tag = "students",
    params(ListQuery),
    responses(
        (status = 200, description = "Matching students", body = [crate::openapi::StudentDoc]),
        (status = 400, description = "Invalid filter or no rows found", body = String)
    ),
    security(("api_key" = []))
)]
pub async fn list(State(state): State<ServerState>, Query(q): Query<ListQuery>) -> Result<Json<Vec<Student>>, ApiError> {
    let students = state
        .students
        .list(q.name.as_deref(), q.branch.as_deref(), q.include_company.as_deref())
        .await?;
    Ok(Json(students))
}

#[utoipa::path(
    get, path = "/students/{id}", tag = "students",
    params(("id" = String, Path, description = "Student id")),
    responses(
        (status = 200, description = "Student with its company", body = crate::openapi::StudentDoc),
        (status = 400, description = "Malformed id", body = String),
        (status = 404, description = "No such student", body = String)
    ),
    security(("api_key" = []))
)]
pub async fn get(State(state): State<ServerState>, Path(id): Path<String>) -> Result<Json<Student>, ApiError> {
    let id = parse_id(&id)?;
    Ok(Json(state.students.get(id).await?))
}

#[utoipa::path(
    post, path = "/students", tag = "students",
    request_body = crate::openapi::StudentInputDoc,
    responses(
        (status = 201, description = "Created", body = crate::openapi::StudentDoc),
        (status = 400, description = "Missing or invalid field, or branch not accepted by the company", body = String),
        (status = 404, description = "Referenced company does not exist", body = String)
    ),
    security(("api_key" = []))
)]
pub async fn create(
    State(state): State<ServerState>,
    body: Result<Json<StudentInput>, JsonRejection>,
) -> Result<(StatusCode, Json<Student>), ApiError> {
    let Json(input) = body?;
    let student = state.students.create(input).await?;
    Ok((StatusCode::CREATED, Json(student)))
}

#[utoipa::path(
    put, path = "/students/{id}", tag = "students",
    params(("id" = String, Path, description = "Student id")),
    request_body = crate::openapi::StudentInputDoc,
    responses(
        (status = 200, description = "Replaced", body = crate::openapi::StudentDoc),
        (status = 400, description = "Missing or invalid field", body = String),
        (status = 404, description = "No such student or company", body = String)
    ),
    security(("api_key" = []))
)]
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    body: Result<Json<StudentInput>, JsonRejection>,
) -> Result<Json<Student>, ApiError> {
    let id = parse_id(&id)?;
    let Json(input) = body?;
    Ok(Json(state.students.update(id, input).await?))
}

#[utoipa::path(
    delete, path = "/students/{id}", tag = "students",
    params(("id" = String, Path, description = "Student id")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 400, description = "Malformed id", body = String),
        (status = 404, description = "No such student", body = String)
    ),
    security(("api_key" = []))
)]
pub async fn delete(State(state): State<ServerState>, Path(id): Path<String>) -> Result<StatusCode, ApiError> {
    let id = parse_id(&id)?;
    state.students.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

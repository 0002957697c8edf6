use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

use service::domain::{Company, CompanyInput};

use crate::errors::{parse_id, ApiError};
use crate::state::ServerState;

#[utoipa::path(
    get, path = "/companies", tag = "companies",
    responses(
        (status = 200, description = "All companies", body = [crate::openapi::CompanyDoc]),
        (status = 400, description = "Storage failure", body = String)
    ),
    security(("api_key" = []))
)]
pub async fn list(State(state): State<ServerState>) -> Result<Json<Vec<Company>>, ApiError> {
    Ok(Json(state.companies.list().await?))
}

#[utoipa::path(
    get, path = "/companies/{id}", tag = "companies",
    params(("id" = String, Path, description = "Company id")),
    responses(
        (status = 200, description = "Company", body = crate::openapi::CompanyDoc),
        (status = 400, description = "Malformed id", body = String),
        (status = 404, description = "No such company", body = String)
    ),
    security(("api_key" = []))
)]
pub async fn get(State(state): State<ServerState>, Path(id): Path<String>) -> Result<Json<Company>, ApiError> {
    let id = parse_id(&id)?;
    Ok(Json(state.companies.get(id).await?))
}

#[utoipa::path(
    post, path = "/companies", tag = "companies",
    request_body = crate::openapi::CompanyInputDoc,
    responses(
        (status = 201, description = "Created", body = crate::openapi::CompanyDoc),
        (status = 400, description = "Missing or invalid field", body = String)
    ),
    security(("api_key" = []))
)]
pub async fn create(
    State(state): State<ServerState>,
    body: Result<Json<CompanyInput>, JsonRejection>,
) -> Result<(StatusCode, Json<Company>), ApiError> {
    let Json(input) = body?;
    let company = state.companies.create(input).await?;
    Ok((StatusCode::CREATED, Json(company)))
}

#[utoipa::path(
    put, path = "/companies/{id}", tag = "companies",
    params(("id" = String, Path, description = "Company id")),
    request_body = crate::openapi::CompanyInputDoc,
    responses(
        (status = 200, description = "Replaced", body = crate::openapi::CompanyDoc),
        (status = 400, description = "Missing or invalid field", body = String),
        (status = 404, description = "No such company", body = String)
    ),
    security(("api_key" = []))
)]
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    body: Result<Json<CompanyInput>, JsonRejection>,
) -> Result<Json<Company>, ApiError> {
    let id = parse_id(&id)?;
    let Json(input) = body?;
    Ok(Json(state.companies.update(id, input).await?))
}

#[utoipa::path(
    delete, path = "/companies/{id}", tag = "companies",
    params(("id" = String, Path, description = "Company id")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 400, description = "Malformed id or company still referenced", body = String),
        (status = 404, description = "No such company", body = String)
    ),
    security(("api_key" = []))
)]
pub async fn delete(State(state): State<ServerState>, Path(id): Path<String>) -> Result<StatusCode, ApiError> {
    let id = parse_id(&id)?;
    state.companies.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

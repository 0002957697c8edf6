use axum::{middleware, routing::get, Json, Router};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use common::types::Health;

use crate::{auth, openapi, state::ServerState};

pub mod companies;
pub mod students;

#[utoipa::path(get, path = "/health", tag = "health", responses((status = 200, description = "OK", body = crate::openapi::HealthResponse)))]
pub async fn health() -> Json<Health> {
    Json(Health::ok())
}

/// Build the full application router: public health/docs plus the gated resource routes.
pub fn build_router(state: ServerState, cors: CorsLayer) -> Router {
    let public = Router::new()
        .route("/health", get(health))
        .route("/api-docs/openapi.json", get(openapi::openapi_json));

    let api = Router::new()
        .route("/companies", get(companies::list).post(companies::create))
        .route(
            "/companies/:id",
            get(companies::get).put(companies::update).delete(companies::delete),
        )
        .route("/students", get(students::list).post(students::create))
        .route(
            "/students/:id",
            get(students::get).put(students::update).delete(students::delete),
        )
        .route_layer(middleware::from_fn_with_state(state.clone(), auth::require_api_key));

    public
        .merge(api)
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}

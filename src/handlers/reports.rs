// src/handlers/reports.rs

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::{
    common::error::AppError,
    config::AppState,
    models::reports::{CustomerOrderCount, QuickSearchResult},
};

// GET /api/reports/frequent-customers
#[utoipa::path(
    get,
    path = "/api/reports/frequent-customers",
    tag = "Relatórios",
    responses((status = 200, description = "Clientes com pelo menos um pedido, com a contagem", body = Vec<CustomerOrderCount>))
)]
pub async fn frequent_customers(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let customers = app_state
        .report_service
        .frequent_customers(&app_state.db_pool)
        .await?;

    Ok((StatusCode::OK, Json(customers)))
}

// GET /api/reports/search/{text}
#[utoipa::path(
    get,
    path = "/api/reports/search/{text}",
    tag = "Relatórios",
    params(("text" = String, Path, description = "Fragmento do nome")),
    responses((status = 200, description = "Clientes e pratos cujo nome contém o texto", body = QuickSearchResult))
)]
pub async fn quick_search(
    State(app_state): State<AppState>,
    Path(text): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let result = app_state
        .report_service
        .quick_search(&app_state.db_pool, &text)
        .await?;

    Ok((StatusCode::OK, Json(result)))
}

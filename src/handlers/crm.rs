// src/handlers/crm.rs

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    models::crm::{Customer, CustomerProfile},
};

// =============================================================================
//  CLIENTES
// =============================================================================

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CustomerPayload {
    #[validate(length(min = 1, max = 100, message = "O nome é obrigatório."))]
    #[schema(example = "María García")]
    pub name: String,

    #[validate(email(message = "E-mail inválido."))]
    #[schema(example = "maria@example.com")]
    pub email: String,

    #[validate(length(max = 20, message = "O telefone deve ter no máximo 20 caracteres."))]
    #[serde(default)]
    #[schema(example = "600123123")]
    pub phone: String,
}

// POST /api/customers
#[utoipa::path(
    post,
    path = "/api/customers",
    tag = "Clientes",
    request_body = CustomerPayload,
    responses(
        (status = 201, description = "Cliente criado", body = Customer),
        (status = 400, description = "Dados inválidos"),
        (status = 409, description = "E-mail disputado por outra submissão")
    )
)]
pub async fn create_customer(
    State(app_state): State<AppState>,
    Json(payload): Json<CustomerPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let customer = app_state
        .crm_service
        .create_customer(
            &app_state.db_pool,
            &payload.name,
            &payload.email,
            &payload.phone,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(customer)))
}

// GET /api/customers
#[utoipa::path(
    get,
    path = "/api/customers",
    tag = "Clientes",
    responses((status = 200, description = "Lista de clientes", body = Vec<Customer>))
)]
pub async fn list_customers(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let customers = app_state
        .crm_service
        .list_customers(&app_state.db_pool)
        .await?;

    Ok((StatusCode::OK, Json(customers)))
}

// GET /api/customers/{id}
#[utoipa::path(
    get,
    path = "/api/customers/{id}",
    tag = "Clientes",
    params(("id" = Uuid, Path, description = "ID do cliente")),
    responses(
        (status = 200, description = "Cliente", body = Customer),
        (status = 404, description = "Cliente não encontrado")
    )
)]
pub async fn get_customer(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let customer = app_state
        .crm_service
        .get_customer(&app_state.db_pool, id)
        .await?;

    Ok((StatusCode::OK, Json(customer)))
}

// PUT /api/customers/{id}
#[utoipa::path(
    put,
    path = "/api/customers/{id}",
    tag = "Clientes",
    params(("id" = Uuid, Path, description = "ID do cliente")),
    request_body = CustomerPayload,
    responses(
        (status = 200, description = "Cliente atualizado", body = Customer),
        (status = 400, description = "Dados inválidos"),
        (status = 404, description = "Cliente não encontrado")
    )
)]
pub async fn update_customer(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<CustomerPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let customer = app_state
        .crm_service
        .update_customer(
            &app_state.db_pool,
            id,
            &payload.name,
            &payload.email,
            &payload.phone,
        )
        .await?;

    Ok((StatusCode::OK, Json(customer)))
}

// DELETE /api/customers/{id}
#[utoipa::path(
    delete,
    path = "/api/customers/{id}",
    tag = "Clientes",
    params(("id" = Uuid, Path, description = "ID do cliente")),
    responses(
        (status = 204, description = "Cliente removido (perfil e reservas em cascata)"),
        (status = 404, description = "Cliente não encontrado")
    )
)]
pub async fn delete_customer(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state
        .crm_service
        .delete_customer(&app_state.db_pool, id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

// =============================================================================
//  PERFIS
// =============================================================================

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProfilePayload {
    #[serde(default)]
    #[schema(example = "marisco, frutos secos")]
    pub allergies: String,

    #[serde(default)]
    #[schema(example = "mesa perto da janela")]
    pub preferences: String,

    #[serde(default)]
    pub newsletter: bool,
}

// GET /api/customers/{id}/profile
#[utoipa::path(
    get,
    path = "/api/customers/{id}/profile",
    tag = "Clientes",
    params(("id" = Uuid, Path, description = "ID do cliente")),
    responses(
        (status = 200, description = "Perfil do cliente", body = CustomerProfile),
        (status = 404, description = "Cliente ou perfil não encontrado")
    )
)]
pub async fn get_profile(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let profile = app_state
        .crm_service
        .get_profile(&app_state.db_pool, id)
        .await?;

    Ok((StatusCode::OK, Json(profile)))
}

// PUT /api/customers/{id}/profile
#[utoipa::path(
    put,
    path = "/api/customers/{id}/profile",
    tag = "Clientes",
    params(("id" = Uuid, Path, description = "ID do cliente")),
    request_body = ProfilePayload,
    responses(
        (status = 200, description = "Perfil criado ou substituído", body = CustomerProfile),
        (status = 400, description = "Dados inválidos"),
        (status = 404, description = "Cliente não encontrado")
    )
)]
pub async fn upsert_profile(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<ProfilePayload>,
) -> Result<impl IntoResponse, AppError> {
    let profile = app_state
        .crm_service
        .upsert_profile(
            &app_state.db_pool,
            id,
            &payload.allergies,
            &payload.preferences,
            payload.newsletter,
        )
        .await?;

    Ok((StatusCode::OK, Json(profile)))
}

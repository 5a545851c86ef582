// src/handlers/reservations.rs

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::{NaiveDate, NaiveTime};
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    models::reservations::{DiningTable, Reservation, ReservationStatus},
};

fn default_true() -> bool {
    true
}

// =============================================================================
//  MESAS
// =============================================================================

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateTablePayload {
    pub restaurant_id: Uuid,

    #[validate(range(min = 1, message = "O número deve ser positivo."))]
    #[schema(example = 4)]
    pub number: i32,

    #[validate(range(min = 1, message = "A capacidade deve ser positiva."))]
    #[serde(default = "two")]
    #[schema(example = 4)]
    pub capacity: i32,

    #[serde(default)]
    #[schema(example = "terraço")]
    pub location: String,

    #[serde(default = "default_true")]
    pub is_active: bool,
}

fn two() -> i32 {
    2
}

// POST /api/tables
#[utoipa::path(
    post,
    path = "/api/tables",
    tag = "Reservas",
    request_body = CreateTablePayload,
    responses(
        (status = 201, description = "Mesa criada", body = DiningTable),
        (status = 400, description = "Dados inválidos")
    )
)]
pub async fn create_table(
    State(app_state): State<AppState>,
    Json(payload): Json<CreateTablePayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let table = app_state
        .reservation_service
        .create_table(
            &app_state.db_pool,
            payload.restaurant_id,
            payload.number,
            payload.capacity,
            &payload.location,
            payload.is_active,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(table)))
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTablePayload {
    #[validate(range(min = 1, message = "O número deve ser positivo."))]
    pub number: i32,

    #[validate(range(min = 1, message = "A capacidade deve ser positiva."))]
    pub capacity: i32,

    #[serde(default)]
    pub location: String,

    #[serde(default = "default_true")]
    pub is_active: bool,
}

// PUT /api/tables/{id}
#[utoipa::path(
    put,
    path = "/api/tables/{id}",
    tag = "Reservas",
    params(("id" = Uuid, Path, description = "ID da mesa")),
    request_body = UpdateTablePayload,
    responses(
        (status = 200, description = "Mesa atualizada", body = DiningTable),
        (status = 400, description = "Dados inválidos"),
        (status = 404, description = "Mesa não encontrada")
    )
)]
pub async fn update_table(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateTablePayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let table = app_state
        .reservation_service
        .update_table(
            &app_state.db_pool,
            id,
            payload.number,
            payload.capacity,
            &payload.location,
            payload.is_active,
        )
        .await?;

    Ok((StatusCode::OK, Json(table)))
}

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct TableFilterParams {
    /// Restringe a um restaurante.
    pub restaurant_id: Option<Uuid>,
}

// GET /api/tables
#[utoipa::path(
    get,
    path = "/api/tables",
    tag = "Reservas",
    params(TableFilterParams),
    responses((status = 200, description = "Lista de mesas", body = Vec<DiningTable>))
)]
pub async fn list_tables(
    State(app_state): State<AppState>,
    Query(params): Query<TableFilterParams>,
) -> Result<impl IntoResponse, AppError> {
    let tables = app_state
        .reservation_service
        .list_tables(&app_state.db_pool, params.restaurant_id)
        .await?;

    Ok((StatusCode::OK, Json(tables)))
}

// GET /api/tables/active
#[utoipa::path(
    get,
    path = "/api/tables/active",
    tag = "Reservas",
    params(TableFilterParams),
    responses((status = 200, description = "Mesas ativas, para o formulário de reserva", body = Vec<DiningTable>))
)]
pub async fn list_active_tables(
    State(app_state): State<AppState>,
    Query(params): Query<TableFilterParams>,
) -> Result<impl IntoResponse, AppError> {
    let tables = app_state
        .reservation_service
        .list_active_tables(&app_state.db_pool, params.restaurant_id)
        .await?;

    Ok((StatusCode::OK, Json(tables)))
}

// =============================================================================
//  RESERVAS
// =============================================================================

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateReservationPayload {
    pub customer_id: Uuid,
    pub table_id: Uuid,

    #[schema(value_type = String, format = Date, example = "2025-08-20")]
    pub date: NaiveDate,

    #[schema(value_type = String, example = "20:30:00")]
    pub time: NaiveTime,

    #[serde(default)]
    #[schema(example = "aniversário")]
    pub notes: String,
}

// POST /api/reservations
#[utoipa::path(
    post,
    path = "/api/reservations",
    tag = "Reservas",
    request_body = CreateReservationPayload,
    responses(
        (status = 201, description = "Reserva criada (estado pendente)", body = Reservation),
        (status = 400, description = "Dados inválidos"),
        (status = 409, description = "Horário disputado por outra submissão")
    )
)]
pub async fn create_reservation(
    State(app_state): State<AppState>,
    Json(payload): Json<CreateReservationPayload>,
) -> Result<impl IntoResponse, AppError> {
    let reservation = app_state
        .reservation_service
        .create_reservation(
            &app_state.db_pool,
            payload.customer_id,
            payload.table_id,
            payload.date,
            payload.time,
            &payload.notes,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(reservation)))
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateReservationPayload {
    pub customer_id: Uuid,
    pub table_id: Uuid,

    #[schema(value_type = String, format = Date, example = "2025-08-20")]
    pub date: NaiveDate,

    #[schema(value_type = String, example = "20:30:00")]
    pub time: NaiveTime,

    pub status: ReservationStatus,

    #[serde(default)]
    pub notes: String,
}

// PUT /api/reservations/{id}
#[utoipa::path(
    put,
    path = "/api/reservations/{id}",
    tag = "Reservas",
    params(("id" = Uuid, Path, description = "ID da reserva")),
    request_body = UpdateReservationPayload,
    responses(
        (status = 200, description = "Reserva atualizada (regras reavaliadas por inteiro)", body = Reservation),
        (status = 400, description = "Dados inválidos"),
        (status = 404, description = "Reserva não encontrada")
    )
)]
pub async fn update_reservation(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateReservationPayload>,
) -> Result<impl IntoResponse, AppError> {
    let reservation = app_state
        .reservation_service
        .update_reservation(
            &app_state.db_pool,
            id,
            payload.customer_id,
            payload.table_id,
            payload.date,
            payload.time,
            payload.status,
            &payload.notes,
        )
        .await?;

    Ok((StatusCode::OK, Json(reservation)))
}

// GET /api/reservations
#[utoipa::path(
    get,
    path = "/api/reservations",
    tag = "Reservas",
    responses((status = 200, description = "Reservas por data e hora", body = Vec<Reservation>))
)]
pub async fn list_reservations(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let reservations = app_state
        .reservation_service
        .list_reservations(&app_state.db_pool)
        .await?;

    Ok((StatusCode::OK, Json(reservations)))
}

// GET /api/reservations/{id}
#[utoipa::path(
    get,
    path = "/api/reservations/{id}",
    tag = "Reservas",
    params(("id" = Uuid, Path, description = "ID da reserva")),
    responses(
        (status = 200, description = "Reserva", body = Reservation),
        (status = 404, description = "Reserva não encontrada")
    )
)]
pub async fn get_reservation(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let reservation = app_state
        .reservation_service
        .get_reservation(&app_state.db_pool, id)
        .await?;

    Ok((StatusCode::OK, Json(reservation)))
}

// DELETE /api/reservations/{id}
#[utoipa::path(
    delete,
    path = "/api/reservations/{id}",
    tag = "Reservas",
    params(("id" = Uuid, Path, description = "ID da reserva")),
    responses(
        (status = 204, description = "Reserva removida (pedido vinculado fica com reserva nula)"),
        (status = 404, description = "Reserva não encontrada")
    )
)]
pub async fn delete_reservation(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state
        .reservation_service
        .delete_reservation(&app_state.db_pool, id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

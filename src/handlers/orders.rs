// src/handlers/orders.rs

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
    models::{
        orders::{NewOrderLine, Order, OrderDetail, OrderLine},
        reports::OrdersOverview,
    },
};

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderLinePayload {
    pub dish_id: Uuid,

    #[validate(range(min = 1, message = "A quantidade deve ser pelo menos 1."))]
    #[serde(default = "one")]
    #[schema(example = 2)]
    pub quantity: i32,

    #[validate(length(max = 120, message = "O comentário deve ter no máximo 120 caracteres."))]
    #[serde(default)]
    #[schema(example = "sem cebola")]
    pub comment: String,

    #[validate(range(min = 0, max = 100, message = "O desconto deve estar entre 0 e 100."))]
    #[serde(default)]
    #[schema(example = 0)]
    pub discount_percentage: i32,
}

fn one() -> i32 {
    1
}

impl OrderLinePayload {
    fn into_new_line(self) -> NewOrderLine {
        NewOrderLine {
            dish_id: self.dish_id,
            quantity: self.quantity,
            comment: self.comment,
            discount_percentage: self.discount_percentage,
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderPayload {
    pub customer_id: Uuid,
    pub restaurant_id: Uuid,
    pub reservation_id: Option<Uuid>,

    // Pedido sem linhas é permitido; ele aparece no relatório próprio.
    #[serde(default)]
    #[validate(nested)]
    pub lines: Vec<OrderLinePayload>,
}

// POST /api/orders
#[utoipa::path(
    post,
    path = "/api/orders",
    tag = "Pedidos",
    request_body = CreateOrderPayload,
    responses(
        (status = 201, description = "Pedido criado com linhas e total numa transação só", body = Order),
        (status = 400, description = "Dados inválidos"),
        (status = 409, description = "Reserva disputada por outra submissão")
    )
)]
pub async fn create_order(
    State(app_state): State<AppState>,
    Json(payload): Json<CreateOrderPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let lines: Vec<NewOrderLine> = payload
        .lines
        .into_iter()
        .map(OrderLinePayload::into_new_line)
        .collect();

    let order = app_state
        .order_service
        .create_order(
            &app_state.db_pool,
            payload.customer_id,
            payload.restaurant_id,
            payload.reservation_id,
            &lines,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(order)))
}

// GET /api/orders
#[utoipa::path(
    get,
    path = "/api/orders",
    tag = "Pedidos",
    responses((status = 200, description = "Os 100 pedidos mais recentes", body = Vec<Order>))
)]
pub async fn list_orders(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let orders = app_state
        .order_service
        .list_recent(&app_state.db_pool)
        .await?;

    Ok((StatusCode::OK, Json(orders)))
}

// GET /api/orders/summary
#[utoipa::path(
    get,
    path = "/api/orders/summary",
    tag = "Pedidos",
    responses((status = 200, description = "Soma e média globais + pedidos recentes", body = OrdersOverview))
)]
pub async fn get_summary(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let overview = app_state.order_service.overview(&app_state.db_pool).await?;

    Ok((StatusCode::OK, Json(overview)))
}

// GET /api/orders/without-lines
#[utoipa::path(
    get,
    path = "/api/orders/without-lines",
    tag = "Pedidos",
    responses((status = 200, description = "Pedidos sem nenhuma linha", body = Vec<Order>))
)]
pub async fn list_orders_without_lines(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let orders = app_state
        .order_service
        .list_without_lines(&app_state.db_pool)
        .await?;

    Ok((StatusCode::OK, Json(orders)))
}

// GET /api/orders/{id}
#[utoipa::path(
    get,
    path = "/api/orders/{id}",
    tag = "Pedidos",
    params(("id" = Uuid, Path, description = "ID do pedido")),
    responses(
        (status = 200, description = "Pedido com suas linhas", body = OrderDetail),
        (status = 404, description = "Pedido não encontrado")
    )
)]
pub async fn get_order(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let (order, lines) = app_state
        .order_service
        .get_order(&app_state.db_pool, id)
        .await?;

    Ok((StatusCode::OK, Json(OrderDetail { order, lines })))
}

// POST /api/orders/{id}/lines
#[utoipa::path(
    post,
    path = "/api/orders/{id}/lines",
    tag = "Pedidos",
    params(("id" = Uuid, Path, description = "ID do pedido")),
    request_body = OrderLinePayload,
    responses(
        (status = 201, description = "Linha adicionada e total refeito", body = OrderLine),
        (status = 400, description = "Dados inválidos"),
        (status = 404, description = "Pedido não encontrado")
    )
)]
pub async fn add_order_line(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<OrderLinePayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let line = app_state
        .order_service
        .add_line(&app_state.db_pool, id, payload.into_new_line())
        .await?;

    Ok((StatusCode::CREATED, Json(line)))
}

// PUT /api/orders/{id}/pay
#[utoipa::path(
    put,
    path = "/api/orders/{id}/pay",
    tag = "Pedidos",
    params(("id" = Uuid, Path, description = "ID do pedido")),
    responses(
        (status = 204, description = "Pedido marcado como pago"),
        (status = 404, description = "Pedido não encontrado")
    )
)]
pub async fn pay_order(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state
        .order_service
        .mark_paid(&app_state.db_pool, id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

// DELETE /api/orders/{id}
#[utoipa::path(
    delete,
    path = "/api/orders/{id}",
    tag = "Pedidos",
    params(("id" = Uuid, Path, description = "ID do pedido")),
    responses(
        (status = 204, description = "Pedido removido (linhas em cascata)"),
        (status = 404, description = "Pedido não encontrado")
    )
)]
pub async fn delete_order(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state
        .order_service
        .delete_order(&app_state.db_pool, id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

// src/models/orders.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub restaurant_id: Uuid,
    // Apagar a reserva mantém o pedido (reservation_id vira NULL).
    pub reservation_id: Option<Uuid>,
    pub total: Decimal,
    pub is_paid: bool,
    pub created_at: DateTime<Utc>,
}

/// Página de detalhe do pedido.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderDetail {
    pub order: Order,
    pub lines: Vec<OrderLine>,
}

/// Linha recém-submetida: ainda sem preço, o snapshot é resolvido na criação.
#[derive(Debug, Clone)]
pub struct NewOrderLine {
    pub dish_id: Uuid,
    pub quantity: i32,
    pub comment: String,
    pub discount_percentage: i32,
}

/// Uma entrada prato-quantidade do pedido. O unit_price é um snapshot do
/// preço do prato no momento da venda, independente do cardápio atual.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderLine {
    pub id: Uuid,
    pub order_id: Uuid,
    pub dish_id: Uuid,
    pub quantity: i32,
    pub unit_price: Decimal,
    pub comment: String,
    pub discount_percentage: i32,
}

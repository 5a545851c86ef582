// src/models/reports.rs

use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::{crm::Customer, menu::Dish, orders::Order};

/// Resumo global dos pedidos (SUM/AVG sobre a tabela inteira).
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderSummary {
    pub total_sum: Decimal,
    pub total_avg: Decimal,
    pub order_count: i64,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrdersOverview {
    pub summary: OrderSummary,
    pub recent: Vec<Order>,
}

/// Cliente anotado com a contagem de pedidos (filtro pós-agregação: >= 1).
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CustomerOrderCount {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub order_count: i64,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct QuickSearchResult {
    pub customers: Vec<Customer>,
    pub dishes: Vec<Dish>,
}

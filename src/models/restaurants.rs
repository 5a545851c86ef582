// src/models/restaurants.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::{crm::Customer, menu::Dish, reservations::DiningTable};

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    pub id: Uuid,
    pub street: String,
    pub number: i32,
    pub city: String,
    pub postal_code: String,
    pub province: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Restaurant {
    pub id: Uuid,
    pub name: String,
    pub phone: String,
    pub address_id: Uuid,
}

/// Linha da listagem: endereço achatado + contagens independentes de pratos
/// e mesas (COUNT DISTINCT em cada relação, nunca o produto do join).
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RestaurantListing {
    pub id: Uuid,
    pub name: String,
    pub phone: String,
    pub street: String,
    pub number: i32,
    pub city: String,
    pub postal_code: String,
    pub province: String,
    pub dish_count: i64,
    pub table_count: i64,
}

/// Página de detalhe: restaurante, endereço e as três relações.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RestaurantDetail {
    pub restaurant: Restaurant,
    pub address: Address,
    pub dishes: Vec<Dish>,
    pub tables: Vec<DiningTable>,
    pub frequent_customers: Vec<Customer>,
}

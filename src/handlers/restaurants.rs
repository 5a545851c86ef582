// src/handlers/restaurants.rs

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
    common::{error::AppError, validation::validate_digits},
    config::AppState,
    models::restaurants::{Address, Restaurant, RestaurantDetail, RestaurantListing},
};

// =============================================================================
//  ENDEREÇOS
// =============================================================================

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateAddressPayload {
    #[validate(length(min = 1, max = 120, message = "A rua é obrigatória."))]
    #[schema(example = "Gran Vía")]
    pub street: String,

    #[validate(range(min = 1, message = "O número deve ser positivo."))]
    #[schema(example = 12)]
    pub number: i32,

    #[validate(length(min = 1, max = 80, message = "A cidade é obrigatória."))]
    #[schema(example = "Madrid")]
    pub city: String,

    #[validate(length(min = 1, max = 10, message = "O código postal é obrigatório."))]
    #[schema(example = "28013")]
    pub postal_code: String,

    #[validate(length(min = 1, max = 80, message = "A província é obrigatória."))]
    #[schema(example = "Madrid")]
    pub province: String,
}

// POST /api/addresses
#[utoipa::path(
    post,
    path = "/api/addresses",
    tag = "Endereços",
    request_body = CreateAddressPayload,
    responses(
        (status = 201, description = "Endereço criado", body = Address),
        (status = 400, description = "Dados inválidos")
    )
)]
pub async fn create_address(
    State(app_state): State<AppState>,
    Json(payload): Json<CreateAddressPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let address = app_state
        .restaurant_service
        .create_address(
            &app_state.db_pool,
            &payload.street,
            payload.number,
            &payload.city,
            &payload.postal_code,
            &payload.province,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(address)))
}

// GET /api/addresses
#[utoipa::path(
    get,
    path = "/api/addresses",
    tag = "Endereços",
    responses((status = 200, description = "Lista de endereços", body = Vec<Address>))
)]
pub async fn list_addresses(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let addresses = app_state
        .restaurant_service
        .list_addresses(&app_state.db_pool)
        .await?;

    Ok((StatusCode::OK, Json(addresses)))
}

// GET /api/addresses/available
#[utoipa::path(
    get,
    path = "/api/addresses/available",
    tag = "Endereços",
    responses((status = 200, description = "Endereços ainda sem restaurante", body = Vec<Address>))
)]
pub async fn list_available_addresses(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let addresses = app_state
        .restaurant_service
        .list_available_addresses(&app_state.db_pool)
        .await?;

    Ok((StatusCode::OK, Json(addresses)))
}

// =============================================================================
//  RESTAURANTES
// =============================================================================

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RestaurantPayload {
    #[validate(length(min = 1, max = 100, message = "O nome é obrigatório."))]
    #[schema(example = "Casa Pepe")]
    pub name: String,

    #[validate(custom(function = "validate_digits"))]
    #[schema(example = "912345678")]
    pub phone: String,

    pub address_id: Uuid,
}

// POST /api/restaurants
#[utoipa::path(
    post,
    path = "/api/restaurants",
    tag = "Restaurantes",
    request_body = RestaurantPayload,
    responses(
        (status = 201, description = "Restaurante criado", body = Restaurant),
        (status = 400, description = "Dados inválidos"),
        (status = 409, description = "Endereço disputado por outra submissão")
    )
)]
pub async fn create_restaurant(
    State(app_state): State<AppState>,
    Json(payload): Json<RestaurantPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let restaurant = app_state
        .restaurant_service
        .create_restaurant(
            &app_state.db_pool,
            &payload.name,
            &payload.phone,
            payload.address_id,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(restaurant)))
}

// GET /api/restaurants
#[utoipa::path(
    get,
    path = "/api/restaurants",
    tag = "Restaurantes",
    responses((status = 200, description = "Listagem com contadores de pratos e mesas", body = Vec<RestaurantListing>))
)]
pub async fn list_restaurants(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let restaurants = app_state
        .restaurant_service
        .list_restaurants(&app_state.db_pool)
        .await?;

    Ok((StatusCode::OK, Json(restaurants)))
}

// GET /api/restaurants/{id}
#[utoipa::path(
    get,
    path = "/api/restaurants/{id}",
    tag = "Restaurantes",
    params(("id" = Uuid, Path, description = "ID do restaurante")),
    responses(
        (status = 200, description = "Detalhe do restaurante", body = RestaurantDetail),
        (status = 404, description = "Restaurante não encontrado")
    )
)]
pub async fn get_restaurant(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let detail = app_state
        .restaurant_service
        .get_detail(&app_state.db_pool, id)
        .await?;

    Ok((StatusCode::OK, Json(detail)))
}

// PUT /api/restaurants/{id}
#[utoipa::path(
    put,
    path = "/api/restaurants/{id}",
    tag = "Restaurantes",
    params(("id" = Uuid, Path, description = "ID do restaurante")),
    request_body = RestaurantPayload,
    responses(
        (status = 200, description = "Restaurante atualizado", body = Restaurant),
        (status = 400, description = "Dados inválidos"),
        (status = 404, description = "Restaurante não encontrado")
    )
)]
pub async fn update_restaurant(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<RestaurantPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let restaurant = app_state
        .restaurant_service
        .update_restaurant(
            &app_state.db_pool,
            id,
            &payload.name,
            &payload.phone,
            payload.address_id,
        )
        .await?;

    Ok((StatusCode::OK, Json(restaurant)))
}

// DELETE /api/restaurants/{id}
#[utoipa::path(
    delete,
    path = "/api/restaurants/{id}",
    tag = "Restaurantes",
    params(("id" = Uuid, Path, description = "ID do restaurante")),
    responses(
        (status = 204, description = "Restaurante removido (pratos e mesas em cascata)"),
        (status = 404, description = "Restaurante não encontrado")
    )
)]
pub async fn delete_restaurant(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state
        .restaurant_service
        .delete_restaurant(&app_state.db_pool, id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

// =============================================================================
//  BUSCA MULTI-CRITÉRIO
// =============================================================================

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SearchRestaurantsPayload {
    #[schema(example = "Pepe")]
    pub name: Option<String>,
    #[schema(example = "912")]
    pub phone: Option<String>,
    #[schema(example = "Madrid")]
    pub address: Option<String>,
}

// POST /api/restaurants/search
#[utoipa::path(
    post,
    path = "/api/restaurants/search",
    tag = "Restaurantes",
    request_body = SearchRestaurantsPayload,
    responses(
        (status = 200, description = "Restaurantes que casam com os fragmentos", body = Vec<RestaurantListing>),
        (status = 400, description = "Formulário em branco ou telefone não numérico")
    )
)]
pub async fn search_restaurants(
    State(app_state): State<AppState>,
    Json(payload): Json<SearchRestaurantsPayload>,
) -> Result<impl IntoResponse, AppError> {
    let restaurants = app_state
        .restaurant_service
        .search(
            &app_state.db_pool,
            payload.name.as_deref(),
            payload.phone.as_deref(),
            payload.address.as_deref(),
        )
        .await?;

    Ok((StatusCode::OK, Json(restaurants)))
}

// =============================================================================
//  CLIENTES FREQUENTES
// =============================================================================

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FrequentCustomerPayload {
    pub customer_id: Uuid,
}

// POST /api/restaurants/{id}/frequent-customers
#[utoipa::path(
    post,
    path = "/api/restaurants/{id}/frequent-customers",
    tag = "Restaurantes",
    params(("id" = Uuid, Path, description = "ID do restaurante")),
    request_body = FrequentCustomerPayload,
    responses(
        (status = 204, description = "Cliente vinculado"),
        (status = 404, description = "Restaurante ou cliente não encontrado")
    )
)]
pub async fn add_frequent_customer(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<FrequentCustomerPayload>,
) -> Result<impl IntoResponse, AppError> {
    app_state
        .restaurant_service
        .add_frequent_customer(&app_state.db_pool, id, payload.customer_id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

// DELETE /api/restaurants/{id}/frequent-customers/{customer_id}
#[utoipa::path(
    delete,
    path = "/api/restaurants/{id}/frequent-customers/{customer_id}",
    tag = "Restaurantes",
    params(
        ("id" = Uuid, Path, description = "ID do restaurante"),
        ("customer_id" = Uuid, Path, description = "ID do cliente")
    ),
    responses(
        (status = 204, description = "Vínculo removido"),
        (status = 404, description = "Vínculo não encontrado")
    )
)]
pub async fn remove_frequent_customer(
    State(app_state): State<AppState>,
    Path((id, customer_id)): Path<(Uuid, Uuid)>,
) -> Result<impl IntoResponse, AppError> {
    app_state
        .restaurant_service
        .remove_frequent_customer(&app_state.db_pool, id, customer_id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

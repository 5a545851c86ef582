// src/handlers/menu.rs

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use rust_decimal::Decimal;
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::{error::AppError, validation::validate_positive_price},
    config::AppState,
    models::menu::{Dish, Tag},
};

fn default_color() -> String {
    "verde".to_string()
}

fn default_category() -> String {
    "principal".to_string()
}

// =============================================================================
//  ETIQUETAS
// =============================================================================

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateTagPayload {
    #[validate(length(min = 1, max = 50, message = "O nome é obrigatório."))]
    #[schema(example = "vegano")]
    pub name: String,

    #[serde(default)]
    #[schema(example = "Sem ingredientes de origem animal")]
    pub description: String,

    #[serde(default = "default_color")]
    #[schema(example = "verde")]
    pub color: String,

    #[validate(length(min = 1, max = 50, message = "O slug é obrigatório."))]
    #[schema(example = "vegano")]
    pub slug: String,
}

// POST /api/tags
#[utoipa::path(
    post,
    path = "/api/tags",
    tag = "Cardápio",
    request_body = CreateTagPayload,
    responses(
        (status = 201, description = "Etiqueta criada", body = Tag),
        (status = 400, description = "Dados inválidos")
    )
)]
pub async fn create_tag(
    State(app_state): State<AppState>,
    Json(payload): Json<CreateTagPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let tag = app_state
        .menu_service
        .create_tag(
            &app_state.db_pool,
            &payload.name,
            &payload.description,
            &payload.color,
            &payload.slug,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(tag)))
}

// GET /api/tags
#[utoipa::path(
    get,
    path = "/api/tags",
    tag = "Cardápio",
    responses((status = 200, description = "Lista de etiquetas", body = Vec<Tag>))
)]
pub async fn list_tags(State(app_state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let tags = app_state.menu_service.list_tags(&app_state.db_pool).await?;

    Ok((StatusCode::OK, Json(tags)))
}

// =============================================================================
//  PRATOS
// =============================================================================

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateDishPayload {
    pub restaurant_id: Uuid,

    #[validate(length(min = 1, max = 100, message = "O nome é obrigatório."))]
    #[schema(example = "Sopa de marisco")]
    pub name: String,

    #[validate(custom(function = "validate_positive_price"))]
    #[schema(example = 12.50)]
    pub price: Decimal,

    #[serde(default = "default_category")]
    #[schema(example = "principal")]
    pub category: String,

    #[serde(default)]
    pub tags: Vec<Uuid>,
}

// POST /api/dishes
#[utoipa::path(
    post,
    path = "/api/dishes",
    tag = "Cardápio",
    request_body = CreateDishPayload,
    responses(
        (status = 201, description = "Prato criado", body = Dish),
        (status = 400, description = "Dados inválidos"),
        (status = 409, description = "Nome disputado por outra submissão")
    )
)]
pub async fn create_dish(
    State(app_state): State<AppState>,
    Json(payload): Json<CreateDishPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let dish = app_state
        .menu_service
        .create_dish(
            &app_state.db_pool,
            payload.restaurant_id,
            &payload.name,
            payload.price,
            &payload.category,
            &payload.tags,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(dish)))
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateDishPayload {
    #[validate(length(min = 1, max = 100, message = "O nome é obrigatório."))]
    pub name: String,

    #[validate(custom(function = "validate_positive_price"))]
    pub price: Decimal,

    #[serde(default = "default_category")]
    pub category: String,

    #[serde(default)]
    pub tags: Vec<Uuid>,
}

// PUT /api/dishes/{id}
#[utoipa::path(
    put,
    path = "/api/dishes/{id}",
    tag = "Cardápio",
    params(("id" = Uuid, Path, description = "ID do prato")),
    request_body = UpdateDishPayload,
    responses(
        (status = 200, description = "Prato atualizado", body = Dish),
        (status = 400, description = "Dados inválidos"),
        (status = 404, description = "Prato não encontrado")
    )
)]
pub async fn update_dish(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateDishPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let dish = app_state
        .menu_service
        .update_dish(
            &app_state.db_pool,
            id,
            &payload.name,
            payload.price,
            &payload.category,
            &payload.tags,
        )
        .await?;

    Ok((StatusCode::OK, Json(dish)))
}

// DELETE /api/dishes/{id}
#[utoipa::path(
    delete,
    path = "/api/dishes/{id}",
    tag = "Cardápio",
    params(("id" = Uuid, Path, description = "ID do prato")),
    responses(
        (status = 204, description = "Prato removido"),
        (status = 404, description = "Prato não encontrado")
    )
)]
pub async fn delete_dish(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state
        .menu_service
        .delete_dish(&app_state.db_pool, id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

// GET /api/dishes/{id}/tags
#[utoipa::path(
    get,
    path = "/api/dishes/{id}/tags",
    tag = "Cardápio",
    params(("id" = Uuid, Path, description = "ID do prato")),
    responses(
        (status = 200, description = "Etiquetas do prato", body = Vec<Tag>),
        (status = 404, description = "Prato não encontrado")
    )
)]
pub async fn get_dish_tags(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let tags = app_state
        .menu_service
        .get_dish_tags(&app_state.db_pool, id)
        .await?;

    Ok((StatusCode::OK, Json(tags)))
}

// =============================================================================
//  LISTAGENS E BUSCA
// =============================================================================

// GET /api/dishes
#[utoipa::path(
    get,
    path = "/api/dishes",
    tag = "Cardápio",
    responses((status = 200, description = "Pratos por preço (até 100)", body = Vec<Dish>))
)]
pub async fn list_dishes(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let dishes = app_state
        .menu_service
        .list_dishes(&app_state.db_pool)
        .await?;

    Ok((StatusCode::OK, Json(dishes)))
}

// GET /api/dishes/category/{category}
#[utoipa::path(
    get,
    path = "/api/dishes/category/{category}",
    tag = "Cardápio",
    params(("category" = String, Path, description = "Categoria exata")),
    responses((status = 200, description = "Pratos da categoria", body = Vec<Dish>))
)]
pub async fn list_dishes_by_category(
    State(app_state): State<AppState>,
    Path(category): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let dishes = app_state
        .menu_service
        .list_dishes_by_category(&app_state.db_pool, &category)
        .await?;

    Ok((StatusCode::OK, Json(dishes)))
}

fn validate_not_negative(val: &Decimal) -> Result<(), validator::ValidationError> {
    if val.is_sign_negative() {
        let mut err = validator::ValidationError::new("range");
        err.message = Some("O valor não pode ser negativo.".into());
        return Err(err);
    }
    Ok(())
}

#[derive(Debug, Deserialize, Validate, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct DishSearchParams {
    /// Fragmento do nome OU nome exato de etiqueta.
    #[validate(length(min = 1, message = "Informe o texto da busca."))]
    pub text: String,

    /// Preço mínimo (inclusive).
    #[validate(custom(function = "validate_not_negative"))]
    #[serde(default)]
    pub min_price: Decimal,
}

// GET /api/dishes/search
#[utoipa::path(
    get,
    path = "/api/dishes/search",
    tag = "Cardápio",
    params(DishSearchParams),
    responses(
        (status = 200, description = "Pratos com preço >= mínimo cujo nome contém o texto ou com etiqueta de nome igual, sem duplicados", body = Vec<Dish>),
        (status = 400, description = "Parâmetros inválidos")
    )
)]
pub async fn search_dishes(
    State(app_state): State<AppState>,
    Query(params): Query<DishSearchParams>,
) -> Result<impl IntoResponse, AppError> {
    params.validate()?;

    let dishes = app_state
        .menu_service
        .search_dishes(&app_state.db_pool, params.min_price, &params.text)
        .await?;

    Ok((StatusCode::OK, Json(dishes)))
}

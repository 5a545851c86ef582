// src/db/menu_repo.rs

use rust_decimal::Decimal;
use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::{on_unique_violation, AppError},
    models::menu::{Dish, Tag},
};

#[derive(Clone)]
pub struct MenuRepository {
    pool: PgPool,
}

impl MenuRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // =========================================================================
    //  ETIQUETAS
    // =========================================================================

    pub async fn create_tag<'e, E>(
        &self,
        executor: E,
        name: &str,
        description: &str,
        color: &str,
        slug: &str,
    ) -> Result<Tag, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let tag = sqlx::query_as::<_, Tag>(
            r#"
            INSERT INTO tags (name, description, color, slug)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(name)
        .bind(description)
        .bind(color)
        .bind(slug)
        .fetch_one(executor)
        .await
        .map_err(on_unique_violation(
            "Já existe uma etiqueta com este nome ou slug.",
        ))?;

        Ok(tag)
    }

    pub async fn list_tags<'e, E>(&self, executor: E) -> Result<Vec<Tag>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let tags = sqlx::query_as::<_, Tag>("SELECT * FROM tags ORDER BY name ASC")
            .fetch_all(executor)
            .await?;

        Ok(tags)
    }

    pub async fn tag_name_exists<'e, E>(&self, executor: E, name: &str) -> Result<bool, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let exists =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM tags WHERE name = $1)")
                .bind(name)
                .fetch_one(executor)
                .await?;

        Ok(exists)
    }

    pub async fn tag_slug_exists<'e, E>(&self, executor: E, slug: &str) -> Result<bool, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let exists =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM tags WHERE slug = $1)")
                .bind(slug)
                .fetch_one(executor)
                .await?;

        Ok(exists)
    }

    /// Quantas das etiquetas informadas existem de fato.
    pub async fn count_tags<'e, E>(&self, executor: E, ids: &[Uuid]) -> Result<i64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let count =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM tags WHERE id = ANY($1)")
                .bind(ids)
                .fetch_one(executor)
                .await?;

        Ok(count)
    }

    // =========================================================================
    //  PRATOS
    // =========================================================================

    pub async fn restaurant_exists<'e, E>(
        &self,
        executor: E,
        restaurant_id: Uuid,
    ) -> Result<bool, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let exists =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM restaurants WHERE id = $1)")
                .bind(restaurant_id)
                .fetch_one(executor)
                .await?;

        Ok(exists)
    }

    /// Nome de prato já usado dentro do restaurante? Edições excluem o próprio id.
    pub async fn dish_name_exists<'e, E>(
        &self,
        executor: E,
        restaurant_id: Uuid,
        name: &str,
        exclude: Option<Uuid>,
    ) -> Result<bool, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let exists = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM dishes
                WHERE restaurant_id = $1
                  AND name = $2
                  AND ($3::uuid IS NULL OR id <> $3)
            )
            "#,
        )
        .bind(restaurant_id)
        .bind(name)
        .bind(exclude)
        .fetch_one(executor)
        .await?;

        Ok(exists)
    }

    pub async fn create_dish<'e, E>(
        &self,
        executor: E,
        restaurant_id: Uuid,
        name: &str,
        price: Decimal,
        category: &str,
    ) -> Result<Dish, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let dish = sqlx::query_as::<_, Dish>(
            r#"
            INSERT INTO dishes (restaurant_id, name, price, category)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(restaurant_id)
        .bind(name)
        .bind(price)
        .bind(category)
        .fetch_one(executor)
        .await
        .map_err(on_unique_violation(
            "Este restaurante já tem um prato com este nome.",
        ))?;

        Ok(dish)
    }

    pub async fn update_dish<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        name: &str,
        price: Decimal,
        category: &str,
    ) -> Result<Dish, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let dish = sqlx::query_as::<_, Dish>(
            r#"
            UPDATE dishes
            SET name = $2, price = $3, category = $4
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(name)
        .bind(price)
        .bind(category)
        .fetch_one(executor)
        .await
        .map_err(on_unique_violation(
            "Este restaurante já tem um prato com este nome.",
        ))?;

        Ok(dish)
    }

    pub async fn delete_dish<'e, E>(&self, executor: E, id: Uuid) -> Result<u64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query("DELETE FROM dishes WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await?;

        Ok(result.rows_affected())
    }

    pub async fn find_dish<'e, E>(&self, executor: E, id: Uuid) -> Result<Option<Dish>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let dish = sqlx::query_as::<_, Dish>("SELECT * FROM dishes WHERE id = $1")
            .bind(id)
            .fetch_optional(executor)
            .await?;

        Ok(dish)
    }

    /// Substitui o conjunto de etiquetas do prato (duas queries, mesma conexão).
    pub async fn set_dish_tags(
        &self,
        conn: &mut sqlx::PgConnection,
        dish_id: Uuid,
        tag_ids: &[Uuid],
    ) -> Result<(), AppError> {
        sqlx::query("DELETE FROM dish_tags WHERE dish_id = $1")
            .bind(dish_id)
            .execute(&mut *conn)
            .await?;

        for tag_id in tag_ids {
            sqlx::query("INSERT INTO dish_tags (dish_id, tag_id) VALUES ($1, $2)")
                .bind(dish_id)
                .bind(tag_id)
                .execute(&mut *conn)
                .await?;
        }

        Ok(())
    }

    pub async fn list_dish_tags<'e, E>(
        &self,
        executor: E,
        dish_id: Uuid,
    ) -> Result<Vec<Tag>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let tags = sqlx::query_as::<_, Tag>(
            r#"
            SELECT g.*
            FROM dish_tags dt
            JOIN tags g ON g.id = dt.tag_id
            WHERE dt.dish_id = $1
            ORDER BY g.name ASC
            "#,
        )
        .bind(dish_id)
        .fetch_all(executor)
        .await?;

        Ok(tags)
    }

    // =========================================================================
    //  LISTAGENS E BUSCA
    // =========================================================================

    pub async fn list_dishes<'e, E>(&self, executor: E) -> Result<Vec<Dish>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let dishes =
            sqlx::query_as::<_, Dish>("SELECT * FROM dishes ORDER BY price ASC LIMIT 100")
                .fetch_all(executor)
                .await?;

        Ok(dishes)
    }

    pub async fn list_dishes_by_category<'e, E>(
        &self,
        executor: E,
        category: &str,
    ) -> Result<Vec<Dish>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let dishes = sqlx::query_as::<_, Dish>(
            "SELECT * FROM dishes WHERE category = $1 ORDER BY name ASC",
        )
        .bind(category)
        .fetch_all(executor)
        .await?;

        Ok(dishes)
    }

    /// Busca AND/OR: preço >= limite E (nome contém o texto OU alguma
    /// etiqueta tem exatamente esse nome). DISTINCT porque o join de
    /// etiquetas pode devolver o mesmo prato mais de uma vez.
    pub async fn search_dishes<'e, E>(
        &self,
        executor: E,
        min_price: Decimal,
        text: &str,
    ) -> Result<Vec<Dish>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let name_like = format!("%{}%", text);

        let dishes = sqlx::query_as::<_, Dish>(
            r#"
            SELECT DISTINCT d.id, d.restaurant_id, d.name, d.price, d.category
            FROM dishes d
            LEFT JOIN dish_tags dt ON dt.dish_id = d.id
            LEFT JOIN tags g ON g.id = dt.tag_id
            WHERE d.price >= $1
              AND (d.name ILIKE $2 OR LOWER(g.name) = LOWER($3))
            ORDER BY d.price ASC
            "#,
        )
        .bind(min_price)
        .bind(name_like)
        .bind(text)
        .fetch_all(executor)
        .await?;

        Ok(dishes)
    }
}

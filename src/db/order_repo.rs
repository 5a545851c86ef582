// src/db/order_repo.rs

use rust_decimal::Decimal;
use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::{on_unique_violation, AppError},
    models::{
        menu::Dish,
        orders::{Order, OrderLine},
        reports::OrderSummary,
    },
};

#[derive(Clone)]
pub struct OrderRepository {
    pool: PgPool,
}

impl OrderRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // =========================================================================
    //  LOOKUPS DE FORMULÁRIO
    // =========================================================================

    pub async fn customer_exists<'e, E>(
        &self,
        executor: E,
        customer_id: Uuid,
    ) -> Result<bool, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let exists =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM customers WHERE id = $1)")
                .bind(customer_id)
                .fetch_one(executor)
                .await?;

        Ok(exists)
    }

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

    pub async fn reservation_exists<'e, E>(
        &self,
        executor: E,
        reservation_id: Uuid,
    ) -> Result<bool, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let exists =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM reservations WHERE id = $1)")
                .bind(reservation_id)
                .fetch_one(executor)
                .await?;

        Ok(exists)
    }

    /// A reserva já está vinculada a outro pedido? (no máximo um pedido por reserva)
    pub async fn reservation_taken<'e, E>(
        &self,
        executor: E,
        reservation_id: Uuid,
        exclude_order: Option<Uuid>,
    ) -> Result<bool, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let taken = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM orders
                WHERE reservation_id = $1
                  AND ($2::uuid IS NULL OR id <> $2)
            )
            "#,
        )
        .bind(reservation_id)
        .bind(exclude_order)
        .fetch_one(executor)
        .await?;

        Ok(taken)
    }

    /// Preço atual do prato, para o snapshot da linha.
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

    // =========================================================================
    //  PEDIDOS
    // =========================================================================

    pub async fn create_order<'e, E>(
        &self,
        executor: E,
        customer_id: Uuid,
        restaurant_id: Uuid,
        reservation_id: Option<Uuid>,
    ) -> Result<Order, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let order = sqlx::query_as::<_, Order>(
            r#"
            INSERT INTO orders (customer_id, restaurant_id, reservation_id)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(customer_id)
        .bind(restaurant_id)
        .bind(reservation_id)
        .fetch_one(executor)
        .await
        .map_err(on_unique_violation(
            "Esta reserva já está vinculada a outro pedido.",
        ))?;

        Ok(order)
    }

    pub async fn insert_line<'e, E>(
        &self,
        executor: E,
        order_id: Uuid,
        dish_id: Uuid,
        quantity: i32,
        unit_price: Decimal,
        comment: &str,
        discount_percentage: i32,
    ) -> Result<OrderLine, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let line = sqlx::query_as::<_, OrderLine>(
            r#"
            INSERT INTO order_lines (order_id, dish_id, quantity, unit_price, comment, discount_percentage)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(order_id)
        .bind(dish_id)
        .bind(quantity)
        .bind(unit_price)
        .bind(comment)
        .bind(discount_percentage)
        .fetch_one(executor)
        .await?;

        Ok(line)
    }

    pub async fn list_lines<'e, E>(
        &self,
        executor: E,
        order_id: Uuid,
    ) -> Result<Vec<OrderLine>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let lines = sqlx::query_as::<_, OrderLine>(
            "SELECT * FROM order_lines WHERE order_id = $1 ORDER BY id ASC",
        )
        .bind(order_id)
        .fetch_all(executor)
        .await?;

        Ok(lines)
    }

    pub async fn set_total<'e, E>(
        &self,
        executor: E,
        order_id: Uuid,
        total: Decimal,
    ) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query("UPDATE orders SET total = $2 WHERE id = $1")
            .bind(order_id)
            .bind(total)
            .execute(executor)
            .await?;

        Ok(())
    }

    pub async fn find_order<'e, E>(&self, executor: E, id: Uuid) -> Result<Option<Order>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let order = sqlx::query_as::<_, Order>("SELECT * FROM orders WHERE id = $1")
            .bind(id)
            .fetch_optional(executor)
            .await?;

        Ok(order)
    }

    pub async fn mark_paid<'e, E>(&self, executor: E, id: Uuid) -> Result<u64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query("UPDATE orders SET is_paid = TRUE WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await?;

        Ok(result.rows_affected())
    }

    pub async fn delete_order<'e, E>(&self, executor: E, id: Uuid) -> Result<u64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query("DELETE FROM orders WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await?;

        Ok(result.rows_affected())
    }

    // =========================================================================
    //  LISTAGENS E AGREGADOS
    // =========================================================================

    pub async fn list_recent<'e, E>(&self, executor: E, limit: i64) -> Result<Vec<Order>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let orders = sqlx::query_as::<_, Order>(
            "SELECT * FROM orders ORDER BY created_at DESC LIMIT $1",
        )
        .bind(limit)
        .fetch_all(executor)
        .await?;

        Ok(orders)
    }

    /// Soma e média globais dos totais. COALESCE para a tabela vazia.
    pub async fn summary<'e, E>(&self, executor: E) -> Result<OrderSummary, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let summary = sqlx::query_as::<_, OrderSummary>(
            r#"
            SELECT COALESCE(SUM(total), 0) AS total_sum,
                   COALESCE(AVG(total), 0) AS total_avg,
                   COUNT(*) AS order_count
            FROM orders
            "#,
        )
        .fetch_one(executor)
        .await?;

        Ok(summary)
    }

    /// Pedidos sem nenhuma linha (reversa vazia via LEFT JOIN ... IS NULL).
    pub async fn list_without_lines<'e, E>(&self, executor: E) -> Result<Vec<Order>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let orders = sqlx::query_as::<_, Order>(
            r#"
            SELECT o.*
            FROM orders o
            LEFT JOIN order_lines l ON l.order_id = o.id
            WHERE l.id IS NULL
            ORDER BY o.id ASC
            "#,
        )
        .fetch_all(executor)
        .await?;

        Ok(orders)
    }
}

// src/db/report_repo.rs

use sqlx::{Executor, PgPool, Postgres};

use crate::{
    common::error::AppError,
    models::{crm::Customer, menu::Dish, reports::CustomerOrderCount},
};

#[derive(Clone)]
pub struct ReportRepository {
    pool: PgPool,
}

impl ReportRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Clientes com pelo menos um pedido, anotados com a contagem.
    /// O filtro é pós-agregação (HAVING), não um WHERE antes do GROUP BY.
    pub async fn frequent_customers<'e, E>(
        &self,
        executor: E,
    ) -> Result<Vec<CustomerOrderCount>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let customers = sqlx::query_as::<_, CustomerOrderCount>(
            r#"
            SELECT c.id, c.name, c.email, COUNT(o.id) AS order_count
            FROM customers c
            LEFT JOIN orders o ON o.customer_id = c.id
            GROUP BY c.id
            HAVING COUNT(o.id) >= 1
            ORDER BY c.name ASC
            "#,
        )
        .fetch_all(executor)
        .await?;

        Ok(customers)
    }

    pub async fn search_customers_by_name<'e, E>(
        &self,
        executor: E,
        text: &str,
    ) -> Result<Vec<Customer>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let pattern = format!("%{}%", text);

        let customers = sqlx::query_as::<_, Customer>(
            "SELECT * FROM customers WHERE name ILIKE $1 ORDER BY name ASC LIMIT 50",
        )
        .bind(pattern)
        .fetch_all(executor)
        .await?;

        Ok(customers)
    }

    pub async fn search_dishes_by_name<'e, E>(
        &self,
        executor: E,
        text: &str,
    ) -> Result<Vec<Dish>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let pattern = format!("%{}%", text);

        let dishes = sqlx::query_as::<_, Dish>(
            "SELECT * FROM dishes WHERE name ILIKE $1 ORDER BY name ASC LIMIT 50",
        )
        .bind(pattern)
        .fetch_all(executor)
        .await?;

        Ok(dishes)
    }
}

// src/db/crm_repo.rs

use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::{on_unique_violation, AppError},
    models::crm::{Customer, CustomerProfile},
};

#[derive(Clone)]
pub struct CrmRepository {
    pool: PgPool,
}

impl CrmRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // =========================================================================
    //  CLIENTES
    // =========================================================================

    pub async fn create_customer<'e, E>(
        &self,
        executor: E,
        name: &str,
        email: &str,
        phone: &str,
    ) -> Result<Customer, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let customer = sqlx::query_as::<_, Customer>(
            r#"
            INSERT INTO customers (name, email, phone)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(name)
        .bind(email)
        .bind(phone)
        .fetch_one(executor)
        .await
        .map_err(on_unique_violation("Este e-mail já está em uso."))?;

        Ok(customer)
    }

    pub async fn update_customer<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        name: &str,
        email: &str,
        phone: &str,
    ) -> Result<Customer, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let customer = sqlx::query_as::<_, Customer>(
            r#"
            UPDATE customers
            SET name = $2, email = $3, phone = $4
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(name)
        .bind(email)
        .bind(phone)
        .fetch_one(executor)
        .await
        .map_err(on_unique_violation("Este e-mail já está em uso."))?;

        Ok(customer)
    }

    pub async fn delete_customer<'e, E>(&self, executor: E, id: Uuid) -> Result<u64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query("DELETE FROM customers WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await?;

        Ok(result.rows_affected())
    }

    pub async fn list_customers<'e, E>(&self, executor: E) -> Result<Vec<Customer>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let customers =
            sqlx::query_as::<_, Customer>("SELECT * FROM customers ORDER BY name ASC")
                .fetch_all(executor)
                .await?;

        Ok(customers)
    }

    pub async fn find_customer<'e, E>(
        &self,
        executor: E,
        id: Uuid,
    ) -> Result<Option<Customer>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let customer = sqlx::query_as::<_, Customer>("SELECT * FROM customers WHERE id = $1")
            .bind(id)
            .fetch_optional(executor)
            .await?;

        Ok(customer)
    }

    pub async fn email_exists<'e, E>(
        &self,
        executor: E,
        email: &str,
        exclude: Option<Uuid>,
    ) -> Result<bool, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let exists = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM customers
                WHERE email = $1
                  AND ($2::uuid IS NULL OR id <> $2)
            )
            "#,
        )
        .bind(email)
        .bind(exclude)
        .fetch_one(executor)
        .await?;

        Ok(exists)
    }

    // =========================================================================
    //  PERFIS (um por cliente)
    // =========================================================================

    pub async fn find_profile<'e, E>(
        &self,
        executor: E,
        customer_id: Uuid,
    ) -> Result<Option<CustomerProfile>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let profile = sqlx::query_as::<_, CustomerProfile>(
            "SELECT * FROM customer_profiles WHERE customer_id = $1",
        )
        .bind(customer_id)
        .fetch_optional(executor)
        .await?;

        Ok(profile)
    }

    /// Cria ou substitui o perfil do cliente; a PK em customer_id garante
    /// no máximo um perfil por cliente.
    pub async fn upsert_profile<'e, E>(
        &self,
        executor: E,
        customer_id: Uuid,
        allergies: &str,
        preferences: &str,
        newsletter: bool,
    ) -> Result<CustomerProfile, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let profile = sqlx::query_as::<_, CustomerProfile>(
            r#"
            INSERT INTO customer_profiles (customer_id, allergies, preferences, newsletter)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (customer_id) DO UPDATE
            SET allergies = EXCLUDED.allergies,
                preferences = EXCLUDED.preferences,
                newsletter = EXCLUDED.newsletter
            RETURNING *
            "#,
        )
        .bind(customer_id)
        .bind(allergies)
        .bind(preferences)
        .bind(newsletter)
        .fetch_one(executor)
        .await?;

        Ok(profile)
    }
}

// src/db/reservation_repo.rs

use chrono::{NaiveDate, NaiveTime};
use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::{on_unique_violation, AppError},
    models::reservations::{DiningTable, Reservation, ReservationStatus},
};

#[derive(Clone)]
pub struct ReservationRepository {
    pool: PgPool,
}

impl ReservationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // =========================================================================
    //  MESAS
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

    pub async fn create_table<'e, E>(
        &self,
        executor: E,
        restaurant_id: Uuid,
        number: i32,
        capacity: i32,
        location: &str,
        is_active: bool,
    ) -> Result<DiningTable, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let table = sqlx::query_as::<_, DiningTable>(
            r#"
            INSERT INTO dining_tables (restaurant_id, number, capacity, location, is_active)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(restaurant_id)
        .bind(number)
        .bind(capacity)
        .bind(location)
        .bind(is_active)
        .fetch_one(executor)
        .await?;

        Ok(table)
    }

    pub async fn update_table<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        number: i32,
        capacity: i32,
        location: &str,
        is_active: bool,
    ) -> Result<DiningTable, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let table = sqlx::query_as::<_, DiningTable>(
            r#"
            UPDATE dining_tables
            SET number = $2, capacity = $3, location = $4, is_active = $5
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(number)
        .bind(capacity)
        .bind(location)
        .bind(is_active)
        .fetch_one(executor)
        .await?;

        Ok(table)
    }

    pub async fn find_table<'e, E>(
        &self,
        executor: E,
        id: Uuid,
    ) -> Result<Option<DiningTable>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let table = sqlx::query_as::<_, DiningTable>("SELECT * FROM dining_tables WHERE id = $1")
            .bind(id)
            .fetch_optional(executor)
            .await?;

        Ok(table)
    }

    pub async fn list_tables<'e, E>(
        &self,
        executor: E,
        restaurant_id: Option<Uuid>,
    ) -> Result<Vec<DiningTable>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let tables = sqlx::query_as::<_, DiningTable>(
            r#"
            SELECT * FROM dining_tables
            WHERE ($1::uuid IS NULL OR restaurant_id = $1)
            ORDER BY number ASC
            "#,
        )
        .bind(restaurant_id)
        .fetch_all(executor)
        .await?;

        Ok(tables)
    }

    /// Só as mesas ativas, para montar o select do formulário de reserva.
    pub async fn list_active_tables<'e, E>(
        &self,
        executor: E,
        restaurant_id: Option<Uuid>,
    ) -> Result<Vec<DiningTable>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let tables = sqlx::query_as::<_, DiningTable>(
            r#"
            SELECT * FROM dining_tables
            WHERE is_active
              AND ($1::uuid IS NULL OR restaurant_id = $1)
            ORDER BY number ASC
            "#,
        )
        .bind(restaurant_id)
        .fetch_all(executor)
        .await?;

        Ok(tables)
    }

    // =========================================================================
    //  RESERVAS
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

    /// O cliente já reservou este (data, hora)? Edições excluem a própria reserva.
    pub async fn slot_taken<'e, E>(
        &self,
        executor: E,
        customer_id: Uuid,
        date: NaiveDate,
        time: NaiveTime,
        exclude: Option<Uuid>,
    ) -> Result<bool, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let taken = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM reservations
                WHERE customer_id = $1
                  AND date = $2
                  AND time = $3
                  AND ($4::uuid IS NULL OR id <> $4)
            )
            "#,
        )
        .bind(customer_id)
        .bind(date)
        .bind(time)
        .bind(exclude)
        .fetch_one(executor)
        .await?;

        Ok(taken)
    }

    pub async fn create_reservation<'e, E>(
        &self,
        executor: E,
        customer_id: Uuid,
        table_id: Uuid,
        date: NaiveDate,
        time: NaiveTime,
        notes: &str,
    ) -> Result<Reservation, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let reservation = sqlx::query_as::<_, Reservation>(
            r#"
            INSERT INTO reservations (customer_id, table_id, date, time, notes)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(customer_id)
        .bind(table_id)
        .bind(date)
        .bind(time)
        .bind(notes)
        .fetch_one(executor)
        .await
        .map_err(on_unique_violation(
            "Este cliente já tem uma reserva para esta data e hora.",
        ))?;

        Ok(reservation)
    }

    pub async fn update_reservation<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        customer_id: Uuid,
        table_id: Uuid,
        date: NaiveDate,
        time: NaiveTime,
        status: ReservationStatus,
        notes: &str,
    ) -> Result<Reservation, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let reservation = sqlx::query_as::<_, Reservation>(
            r#"
            UPDATE reservations
            SET customer_id = $2, table_id = $3, date = $4, time = $5, status = $6, notes = $7
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(customer_id)
        .bind(table_id)
        .bind(date)
        .bind(time)
        .bind(status)
        .bind(notes)
        .fetch_one(executor)
        .await
        .map_err(on_unique_violation(
            "Este cliente já tem uma reserva para esta data e hora.",
        ))?;

        Ok(reservation)
    }

    pub async fn delete_reservation<'e, E>(&self, executor: E, id: Uuid) -> Result<u64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query("DELETE FROM reservations WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await?;

        Ok(result.rows_affected())
    }

    pub async fn find_reservation<'e, E>(
        &self,
        executor: E,
        id: Uuid,
    ) -> Result<Option<Reservation>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let reservation =
            sqlx::query_as::<_, Reservation>("SELECT * FROM reservations WHERE id = $1")
                .bind(id)
                .fetch_optional(executor)
                .await?;

        Ok(reservation)
    }

    pub async fn list_reservations<'e, E>(
        &self,
        executor: E,
    ) -> Result<Vec<Reservation>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let reservations = sqlx::query_as::<_, Reservation>(
            "SELECT * FROM reservations ORDER BY date ASC, time ASC",
        )
        .fetch_all(executor)
        .await?;

        Ok(reservations)
    }
}

// src/services/reservation_service.rs

use chrono::{Local, NaiveDate, NaiveTime};
use sqlx::{Acquire, Executor, Postgres};
use uuid::Uuid;

use crate::{
    common::{error::AppError, validation::FieldErrors},
    db::ReservationRepository,
    models::reservations::{DiningTable, Reservation, ReservationStatus},
};

/// Regras de agenda, puras: data no passado e hora fora da janela de
/// serviço. A janela é inclusiva nas duas pontas.
pub(crate) fn check_schedule(
    date: NaiveDate,
    time: NaiveTime,
    today: NaiveDate,
    window: (NaiveTime, NaiveTime),
    errors: &mut FieldErrors,
) {
    if date < today {
        errors.add("date", "past_date", "A data da reserva não pode estar no passado.");
    }

    let (opens_at, closes_at) = window;
    if time < opens_at || time > closes_at {
        errors.add(
            "time",
            "outside_service_window",
            &format!(
                "A hora deve estar entre {} e {}.",
                opens_at.format("%H:%M"),
                closes_at.format("%H:%M")
            ),
        );
    }
}

#[derive(Clone)]
pub struct ReservationService {
    repo: ReservationRepository,
    // Janela de serviço configurada no ambiente (12:00-23:00 por padrão).
    window: (NaiveTime, NaiveTime),
}

impl ReservationService {
    pub fn new(repo: ReservationRepository, window: (NaiveTime, NaiveTime)) -> Self {
        Self { repo, window }
    }

    // =========================================================================
    //  MESAS
    // =========================================================================

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
        E: Executor<'e, Database = Postgres> + Acquire<'e, Database = Postgres>,
    {
        let mut tx = executor.begin().await?;

        let mut errors = FieldErrors::new();
        if !self.repo.restaurant_exists(&mut *tx, restaurant_id).await? {
            errors.add("restaurantId", "unknown_restaurant", "Restaurante inexistente.");
        }
        errors.into_result()?;

        let table = self
            .repo
            .create_table(&mut *tx, restaurant_id, number, capacity, location, is_active)
            .await?;

        tx.commit().await?;
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
        E: Executor<'e, Database = Postgres> + Acquire<'e, Database = Postgres>,
    {
        let mut tx = executor.begin().await?;

        self.repo
            .find_table(&mut *tx, id)
            .await?
            .ok_or(AppError::NotFound("Mesa"))?;

        let table = self
            .repo
            .update_table(&mut *tx, id, number, capacity, location, is_active)
            .await?;

        tx.commit().await?;
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
        self.repo.list_tables(executor, restaurant_id).await
    }

    pub async fn list_active_tables<'e, E>(
        &self,
        executor: E,
        restaurant_id: Option<Uuid>,
    ) -> Result<Vec<DiningTable>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        self.repo.list_active_tables(executor, restaurant_id).await
    }

    // =========================================================================
    //  RESERVAS
    // =========================================================================

    /// Valida e cria. Todas as regras rodam a cada submissão e os erros se
    /// acumulam por campo; nada é gravado se alguma falhar.
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
        E: Executor<'e, Database = Postgres> + Acquire<'e, Database = Postgres>,
    {
        let mut tx = executor.begin().await?;

        let mut errors = FieldErrors::new();
        self.check_reservation_rules(&mut tx, customer_id, table_id, date, time, None, &mut errors)
            .await?;
        errors.into_result()?;

        let reservation = self
            .repo
            .create_reservation(&mut *tx, customer_id, table_id, date, time, notes)
            .await?;

        tx.commit().await?;
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
        E: Executor<'e, Database = Postgres> + Acquire<'e, Database = Postgres>,
    {
        let mut tx = executor.begin().await?;

        self.repo
            .find_reservation(&mut *tx, id)
            .await?
            .ok_or(AppError::NotFound("Reserva"))?;

        let mut errors = FieldErrors::new();
        self.check_reservation_rules(
            &mut tx,
            customer_id,
            table_id,
            date,
            time,
            Some(id),
            &mut errors,
        )
        .await?;
        errors.into_result()?;

        let reservation = self
            .repo
            .update_reservation(&mut *tx, id, customer_id, table_id, date, time, status, notes)
            .await?;

        tx.commit().await?;
        Ok(reservation)
    }

    async fn check_reservation_rules(
        &self,
        tx: &mut sqlx::Transaction<'_, Postgres>,
        customer_id: Uuid,
        table_id: Uuid,
        date: NaiveDate,
        time: NaiveTime,
        exclude: Option<Uuid>,
        errors: &mut FieldErrors,
    ) -> Result<(), AppError> {
        if !self.repo.customer_exists(&mut **tx, customer_id).await? {
            errors.add("customerId", "unknown_customer", "Cliente inexistente.");
        }

        match self.repo.find_table(&mut **tx, table_id).await? {
            None => errors.add("tableId", "unknown_table", "Mesa inexistente."),
            Some(table) if !table.is_active => {
                errors.add("tableId", "inactive_table", "A mesa selecionada não está ativa.");
            }
            Some(_) => {}
        }

        check_schedule(date, time, Local::now().date_naive(), self.window, errors);

        // Duplicado (cliente, data, hora): o erro aparece nos dois campos.
        if self
            .repo
            .slot_taken(&mut **tx, customer_id, date, time, exclude)
            .await?
        {
            errors.add(
                "customerId",
                "duplicate_slot",
                "Este cliente já tem uma reserva para esta data e hora.",
            );
            errors.add("time", "duplicate_slot", "Horário já reservado para este cliente.");
        }

        Ok(())
    }

    pub async fn delete_reservation<'e, E>(&self, executor: E, id: Uuid) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let deleted = self.repo.delete_reservation(executor, id).await?;
        if deleted == 0 {
            return Err(AppError::NotFound("Reserva"));
        }
        Ok(())
    }

    pub async fn list_reservations<'e, E>(&self, executor: E) -> Result<Vec<Reservation>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        self.repo.list_reservations(executor).await
    }

    pub async fn get_reservation<'e, E>(
        &self,
        executor: E,
        id: Uuid,
    ) -> Result<Reservation, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        self.repo
            .find_reservation(executor, id)
            .await?
            .ok_or(AppError::NotFound("Reserva"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn window() -> (NaiveTime, NaiveTime) {
        (
            NaiveTime::from_hms_opt(12, 0, 0).unwrap(),
            NaiveTime::from_hms_opt(23, 0, 0).unwrap(),
        )
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 15).unwrap()
    }

    fn fields_of(errors: FieldErrors) -> Vec<String> {
        match errors.into_result() {
            Ok(()) => Vec::new(),
            Err(AppError::ValidationError(inner)) => {
                let mut fields: Vec<String> =
                    inner.field_errors().keys().map(|k| k.to_string()).collect();
                fields.sort();
                fields
            }
            Err(_) => panic!("esperava erro de validação"),
        }
    }

    #[test]
    fn past_date_is_rejected() {
        let mut errors = FieldErrors::new();
        check_schedule(
            today().pred_opt().unwrap(),
            NaiveTime::from_hms_opt(13, 0, 0).unwrap(),
            today(),
            window(),
            &mut errors,
        );
        assert_eq!(fields_of(errors), vec!["date"]);
    }

    #[test]
    fn today_and_future_dates_pass() {
        for date in [today(), today().succ_opt().unwrap()] {
            let mut errors = FieldErrors::new();
            check_schedule(
                date,
                NaiveTime::from_hms_opt(13, 0, 0).unwrap(),
                today(),
                window(),
                &mut errors,
            );
            assert!(errors.is_empty());
        }
    }

    #[test]
    fn window_bounds_are_inclusive() {
        for time in ["12:00:00", "23:00:00", "18:30:00"] {
            let mut errors = FieldErrors::new();
            check_schedule(
                today(),
                time.parse().unwrap(),
                today(),
                window(),
                &mut errors,
            );
            assert!(errors.is_empty(), "hora {} deveria passar", time);
        }
    }

    #[test]
    fn times_outside_the_window_are_rejected() {
        for time in ["11:59:59", "23:00:01", "00:00:00"] {
            let mut errors = FieldErrors::new();
            check_schedule(
                today(),
                time.parse().unwrap(),
                today(),
                window(),
                &mut errors,
            );
            assert_eq!(fields_of(errors), vec!["time"], "hora {}", time);
        }
    }

    #[test]
    fn past_date_and_bad_time_accumulate() {
        let mut errors = FieldErrors::new();
        check_schedule(
            today().pred_opt().unwrap(),
            NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
            today(),
            window(),
            &mut errors,
        );
        assert_eq!(fields_of(errors), vec!["date", "time"]);
    }
}

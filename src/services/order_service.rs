// src/services/order_service.rs

use rust_decimal::Decimal;
use sqlx::{Acquire, Executor, Postgres};
use uuid::Uuid;

use crate::{
    common::{
        error::AppError,
        validation::{field_error, FieldErrors},
    },
    db::OrderRepository,
    models::{
        orders::{NewOrderLine, Order, OrderLine},
        reports::OrdersOverview,
    },
};

/// Valor de uma linha: quantidade x preço com o desconto percentual
/// aplicado, arredondado a 2 casas.
pub(crate) fn line_total(quantity: i32, unit_price: Decimal, discount_percentage: i32) -> Decimal {
    let gross = Decimal::from(quantity) * unit_price;
    let factor = Decimal::from(100 - discount_percentage) / Decimal::from(100);
    (gross * factor).round_dp(2)
}

pub(crate) fn order_total(lines: &[OrderLine]) -> Decimal {
    lines
        .iter()
        .fold(Decimal::ZERO, |acc, line| {
            acc + line_total(line.quantity, line.unit_price, line.discount_percentage)
        })
}

#[derive(Clone)]
pub struct OrderService {
    repo: OrderRepository,
}

impl OrderService {
    pub fn new(repo: OrderRepository) -> Self {
        Self { repo }
    }

    /// Cria o pedido com suas linhas e o total numa transação só: ou grava
    /// tudo, ou nada. Sem linhas órfãs nem total defasado.
    pub async fn create_order<'e, E>(
        &self,
        executor: E,
        customer_id: Uuid,
        restaurant_id: Uuid,
        reservation_id: Option<Uuid>,
        lines: &[NewOrderLine],
    ) -> Result<Order, AppError>
    where
        E: Executor<'e, Database = Postgres> + Acquire<'e, Database = Postgres>,
    {
        let mut tx = executor.begin().await?;

        let mut errors = FieldErrors::new();
        if !self.repo.customer_exists(&mut *tx, customer_id).await? {
            errors.add("customerId", "unknown_customer", "Cliente inexistente.");
        }
        if !self.repo.restaurant_exists(&mut *tx, restaurant_id).await? {
            errors.add("restaurantId", "unknown_restaurant", "Restaurante inexistente.");
        }
        if let Some(reservation_id) = reservation_id {
            if !self.repo.reservation_exists(&mut *tx, reservation_id).await? {
                errors.add("reservationId", "unknown_reservation", "Reserva inexistente.");
            } else if self
                .repo
                .reservation_taken(&mut *tx, reservation_id, None)
                .await?
            {
                errors.add(
                    "reservationId",
                    "reservation_taken",
                    "Esta reserva já está vinculada a outro pedido.",
                );
            }
        }

        // Snapshot do preço atual de cada prato.
        let mut priced = Vec::with_capacity(lines.len());
        for (index, line) in lines.iter().enumerate() {
            match self.repo.find_dish(&mut *tx, line.dish_id).await? {
                None => errors.add(
                    &format!("lines[{}].dishId", index),
                    "unknown_dish",
                    "Prato inexistente.",
                ),
                Some(dish) => priced.push((line, dish.price)),
            }
        }
        errors.into_result()?;

        let order = self
            .repo
            .create_order(&mut *tx, customer_id, restaurant_id, reservation_id)
            .await?;

        let mut inserted = Vec::with_capacity(priced.len());
        for (line, unit_price) in priced {
            let saved = self
                .repo
                .insert_line(
                    &mut *tx,
                    order.id,
                    line.dish_id,
                    line.quantity,
                    unit_price,
                    &line.comment,
                    line.discount_percentage,
                )
                .await?;
            inserted.push(saved);
        }

        let total = order_total(&inserted);
        self.repo.set_total(&mut *tx, order.id, total).await?;

        tx.commit().await?;
        Ok(Order { total, ..order })
    }

    /// Acrescenta uma linha e refaz o total do pedido na mesma transação.
    pub async fn add_line<'e, E>(
        &self,
        executor: E,
        order_id: Uuid,
        line: NewOrderLine,
    ) -> Result<OrderLine, AppError>
    where
        E: Executor<'e, Database = Postgres> + Acquire<'e, Database = Postgres>,
    {
        let mut tx = executor.begin().await?;

        self.repo
            .find_order(&mut *tx, order_id)
            .await?
            .ok_or(AppError::NotFound("Pedido"))?;

        let Some(dish) = self.repo.find_dish(&mut *tx, line.dish_id).await? else {
            return Err(field_error("dishId", "unknown_dish", "Prato inexistente."));
        };

        let saved = self
            .repo
            .insert_line(
                &mut *tx,
                order_id,
                line.dish_id,
                line.quantity,
                dish.price,
                &line.comment,
                line.discount_percentage,
            )
            .await?;

        let all_lines = self.repo.list_lines(&mut *tx, order_id).await?;
        let total = order_total(&all_lines);
        self.repo.set_total(&mut *tx, order_id, total).await?;

        tx.commit().await?;
        Ok(saved)
    }

    pub async fn mark_paid<'e, E>(&self, executor: E, id: Uuid) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let updated = self.repo.mark_paid(executor, id).await?;
        if updated == 0 {
            return Err(AppError::NotFound("Pedido"));
        }
        Ok(())
    }

    pub async fn delete_order<'e, E>(&self, executor: E, id: Uuid) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let deleted = self.repo.delete_order(executor, id).await?;
        if deleted == 0 {
            return Err(AppError::NotFound("Pedido"));
        }
        Ok(())
    }

    pub async fn get_order<'e, E>(
        &self,
        executor: E,
        id: Uuid,
    ) -> Result<(Order, Vec<OrderLine>), AppError>
    where
        E: Executor<'e, Database = Postgres> + Acquire<'e, Database = Postgres>,
    {
        let mut tx = executor.begin().await?;

        let order = self
            .repo
            .find_order(&mut *tx, id)
            .await?
            .ok_or(AppError::NotFound("Pedido"))?;
        let lines = self.repo.list_lines(&mut *tx, id).await?;

        tx.commit().await?;
        Ok((order, lines))
    }

    /// Resumo global (SUM/AVG) + os 100 pedidos mais recentes, num snapshot
    /// consistente.
    pub async fn overview<'e, E>(&self, executor: E) -> Result<OrdersOverview, AppError>
    where
        E: Executor<'e, Database = Postgres> + Acquire<'e, Database = Postgres>,
    {
        let mut tx = executor.begin().await?;

        let summary = self.repo.summary(&mut *tx).await?;
        let recent = self.repo.list_recent(&mut *tx, 100).await?;

        tx.commit().await?;
        Ok(OrdersOverview { summary, recent })
    }

    pub async fn list_recent<'e, E>(&self, executor: E) -> Result<Vec<Order>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        self.repo.list_recent(executor, 100).await
    }

    pub async fn list_without_lines<'e, E>(&self, executor: E) -> Result<Vec<Order>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        self.repo.list_without_lines(executor).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(quantity: i32, unit_price: &str, discount_percentage: i32) -> OrderLine {
        OrderLine {
            id: Uuid::new_v4(),
            order_id: Uuid::new_v4(),
            dish_id: Uuid::new_v4(),
            quantity,
            unit_price: unit_price.parse().unwrap(),
            comment: String::new(),
            discount_percentage,
        }
    }

    #[test]
    fn two_lines_without_discount_sum_exactly() {
        // 2 x 5.00 + 1 x 3.00 = 13.00
        let lines = vec![line(2, "5.00", 0), line(1, "3.00", 0)];
        assert_eq!(order_total(&lines), "13.00".parse().unwrap());
    }

    #[test]
    fn discount_applies_per_line() {
        // 10.00 com 25% -> 7.50
        assert_eq!(
            line_total(1, "10.00".parse().unwrap(), 25),
            "7.50".parse().unwrap()
        );
        // 100% de desconto zera a linha
        assert_eq!(
            line_total(3, "9.90".parse().unwrap(), 100),
            Decimal::ZERO.round_dp(2)
        );
    }

    #[test]
    fn line_totals_round_to_cents() {
        // 3 x 3.33 com 10% = 8.991 -> 8.99
        assert_eq!(
            line_total(3, "3.33".parse().unwrap(), 10),
            "8.99".parse().unwrap()
        );
    }

    #[test]
    fn empty_order_totals_zero() {
        assert_eq!(order_total(&[]), Decimal::ZERO);
    }
}

// src/services/report_service.rs

use sqlx::{Acquire, Executor, Postgres};

use crate::{
    common::error::AppError,
    db::ReportRepository,
    models::reports::{CustomerOrderCount, QuickSearchResult},
};

#[derive(Clone)]
pub struct ReportService {
    repo: ReportRepository,
}

impl ReportService {
    pub fn new(repo: ReportRepository) -> Self {
        Self { repo }
    }

    pub async fn frequent_customers<'e, E>(
        &self,
        executor: E,
    ) -> Result<Vec<CustomerOrderCount>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        self.repo.frequent_customers(executor).await
    }

    /// Busca rápida por nome, em clientes e pratos ao mesmo tempo.
    pub async fn quick_search<'e, E>(
        &self,
        executor: E,
        text: &str,
    ) -> Result<QuickSearchResult, AppError>
    where
        E: Executor<'e, Database = Postgres> + Acquire<'e, Database = Postgres>,
    {
        let mut tx = executor.begin().await?;

        let customers = self.repo.search_customers_by_name(&mut *tx, text).await?;
        let dishes = self.repo.search_dishes_by_name(&mut *tx, text).await?;

        tx.commit().await?;
        Ok(QuickSearchResult { customers, dishes })
    }
}

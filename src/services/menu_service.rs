// src/services/menu_service.rs

use rust_decimal::Decimal;
use sqlx::{Acquire, Executor, Postgres};
use uuid::Uuid;

use crate::{
    common::{error::AppError, validation::FieldErrors},
    db::MenuRepository,
    models::menu::{Dish, Tag},
};

#[derive(Clone)]
pub struct MenuService {
    repo: MenuRepository,
}

impl MenuService {
    pub fn new(repo: MenuRepository) -> Self {
        Self { repo }
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
        E: Executor<'e, Database = Postgres> + Acquire<'e, Database = Postgres>,
    {
        let mut tx = executor.begin().await?;

        let mut errors = FieldErrors::new();
        if self.repo.tag_name_exists(&mut *tx, name).await? {
            errors.add("name", "duplicate_name", "Já existe uma etiqueta com este nome.");
        }
        if self.repo.tag_slug_exists(&mut *tx, slug).await? {
            errors.add("slug", "duplicate_slug", "Já existe uma etiqueta com este slug.");
        }
        errors.into_result()?;

        let tag = self
            .repo
            .create_tag(&mut *tx, name, description, color, slug)
            .await?;

        tx.commit().await?;
        Ok(tag)
    }

    pub async fn list_tags<'e, E>(&self, executor: E) -> Result<Vec<Tag>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        self.repo.list_tags(executor).await
    }

    // =========================================================================
    //  PRATOS
    // =========================================================================

    pub async fn create_dish<'e, E>(
        &self,
        executor: E,
        restaurant_id: Uuid,
        name: &str,
        price: Decimal,
        category: &str,
        tag_ids: &[Uuid],
    ) -> Result<Dish, AppError>
    where
        E: Executor<'e, Database = Postgres> + Acquire<'e, Database = Postgres>,
    {
        let mut tx = executor.begin().await?;

        let mut errors = FieldErrors::new();
        if !self.repo.restaurant_exists(&mut *tx, restaurant_id).await? {
            errors.add("restaurantId", "unknown_restaurant", "Restaurante inexistente.");
        } else if self
            .repo
            .dish_name_exists(&mut *tx, restaurant_id, name, None)
            .await?
        {
            errors.add(
                "name",
                "duplicate_dish",
                "Este restaurante já tem um prato com este nome.",
            );
        }
        self.check_tags(&mut tx, tag_ids, &mut errors).await?;
        errors.into_result()?;

        let dish = self
            .repo
            .create_dish(&mut *tx, restaurant_id, name, price, category)
            .await?;
        self.repo.set_dish_tags(&mut *tx, dish.id, tag_ids).await?;

        tx.commit().await?;
        Ok(dish)
    }

    pub async fn update_dish<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        name: &str,
        price: Decimal,
        category: &str,
        tag_ids: &[Uuid],
    ) -> Result<Dish, AppError>
    where
        E: Executor<'e, Database = Postgres> + Acquire<'e, Database = Postgres>,
    {
        let mut tx = executor.begin().await?;

        let current = self
            .repo
            .find_dish(&mut *tx, id)
            .await?
            .ok_or(AppError::NotFound("Prato"))?;

        let mut errors = FieldErrors::new();
        if self
            .repo
            .dish_name_exists(&mut *tx, current.restaurant_id, name, Some(id))
            .await?
        {
            errors.add(
                "name",
                "duplicate_dish",
                "Este restaurante já tem um prato com este nome.",
            );
        }
        self.check_tags(&mut tx, tag_ids, &mut errors).await?;
        errors.into_result()?;

        let dish = self
            .repo
            .update_dish(&mut *tx, id, name, price, category)
            .await?;
        self.repo.set_dish_tags(&mut *tx, id, tag_ids).await?;

        tx.commit().await?;
        Ok(dish)
    }

    async fn check_tags(
        &self,
        tx: &mut sqlx::Transaction<'_, Postgres>,
        tag_ids: &[Uuid],
        errors: &mut FieldErrors,
    ) -> Result<(), AppError> {
        if tag_ids.is_empty() {
            return Ok(());
        }
        let found = self.repo.count_tags(&mut **tx, tag_ids).await?;
        if found != tag_ids.len() as i64 {
            errors.add("tags", "unknown_tag", "Uma ou mais etiquetas não existem.");
        }
        Ok(())
    }

    pub async fn delete_dish<'e, E>(&self, executor: E, id: Uuid) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let deleted = self.repo.delete_dish(executor, id).await?;
        if deleted == 0 {
            return Err(AppError::NotFound("Prato"));
        }
        Ok(())
    }

    pub async fn get_dish_tags<'e, E>(
        &self,
        executor: E,
        dish_id: Uuid,
    ) -> Result<Vec<Tag>, AppError>
    where
        E: Executor<'e, Database = Postgres> + Acquire<'e, Database = Postgres>,
    {
        let mut tx = executor.begin().await?;

        self.repo
            .find_dish(&mut *tx, dish_id)
            .await?
            .ok_or(AppError::NotFound("Prato"))?;
        let tags = self.repo.list_dish_tags(&mut *tx, dish_id).await?;

        tx.commit().await?;
        Ok(tags)
    }

    pub async fn list_dishes<'e, E>(&self, executor: E) -> Result<Vec<Dish>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        self.repo.list_dishes(executor).await
    }

    pub async fn list_dishes_by_category<'e, E>(
        &self,
        executor: E,
        category: &str,
    ) -> Result<Vec<Dish>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        self.repo.list_dishes_by_category(executor, category).await
    }

    pub async fn search_dishes<'e, E>(
        &self,
        executor: E,
        min_price: Decimal,
        text: &str,
    ) -> Result<Vec<Dish>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        self.repo.search_dishes(executor, min_price, text).await
    }
}

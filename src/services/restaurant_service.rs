// src/services/restaurant_service.rs

use sqlx::{Acquire, Executor, Postgres};
use uuid::Uuid;

use crate::{
    common::{error::AppError, validation::FieldErrors},
    db::RestaurantRepository,
    models::restaurants::{Address, Restaurant, RestaurantDetail, RestaurantListing},
};

/// Critérios normalizados da busca multi-critério: fragmento em branco vira
/// None e fica fora do filtro.
#[derive(Debug, PartialEq, Eq)]
pub struct SearchCriteria {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
}

fn normalize_fragment(value: Option<&str>) -> Option<String> {
    let trimmed = value?.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Monta os critérios a partir dos campos crus do formulário. Com os três
/// em branco, rejeita com erro em CADA campo; o telefone só aceita dígitos.
pub(crate) fn build_search_criteria(
    name: Option<&str>,
    phone: Option<&str>,
    address: Option<&str>,
) -> Result<SearchCriteria, AppError> {
    let criteria = SearchCriteria {
        name: normalize_fragment(name),
        phone: normalize_fragment(phone),
        address: normalize_fragment(address),
    };

    let mut errors = FieldErrors::new();

    if criteria.name.is_none() && criteria.phone.is_none() && criteria.address.is_none() {
        for field in ["name", "phone", "address"] {
            errors.add(field, "all_blank", "Informe ao menos um critério de busca.");
        }
    }

    if let Some(phone) = &criteria.phone {
        if !phone.chars().all(|c| c.is_ascii_digit()) {
            errors.add("phone", "digits_only", "O telefone deve conter apenas dígitos.");
        }
    }

    errors.into_result()?;
    Ok(criteria)
}

fn like_pattern(fragment: &Option<String>) -> Option<String> {
    fragment.as_ref().map(|f| format!("%{}%", f))
}

#[derive(Clone)]
pub struct RestaurantService {
    repo: RestaurantRepository,
}

impl RestaurantService {
    pub fn new(repo: RestaurantRepository) -> Self {
        Self { repo }
    }

    // =========================================================================
    //  ENDEREÇOS
    // =========================================================================

    pub async fn create_address<'e, E>(
        &self,
        executor: E,
        street: &str,
        number: i32,
        city: &str,
        postal_code: &str,
        province: &str,
    ) -> Result<Address, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        self.repo
            .create_address(executor, street, number, city, postal_code, province)
            .await
    }

    pub async fn list_addresses<'e, E>(&self, executor: E) -> Result<Vec<Address>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        self.repo.list_addresses(executor).await
    }

    pub async fn list_available_addresses<'e, E>(
        &self,
        executor: E,
    ) -> Result<Vec<Address>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        self.repo.list_available_addresses(executor).await
    }

    // =========================================================================
    //  RESTAURANTES
    // =========================================================================

    /// Valida e cria. As regras que dependem do banco rodam dentro da mesma
    /// transação da escrita e TODAS são reavaliadas a cada submissão.
    pub async fn create_restaurant<'e, E>(
        &self,
        executor: E,
        name: &str,
        phone: &str,
        address_id: Uuid,
    ) -> Result<Restaurant, AppError>
    where
        E: Executor<'e, Database = Postgres> + Acquire<'e, Database = Postgres>,
    {
        let mut tx = executor.begin().await?;

        let mut errors = FieldErrors::new();
        self.check_restaurant_rules(&mut tx, name, address_id, None, &mut errors)
            .await?;
        errors.into_result()?;

        let restaurant = self
            .repo
            .create_restaurant(&mut *tx, name, phone, address_id)
            .await?;

        tx.commit().await?;
        Ok(restaurant)
    }

    pub async fn update_restaurant<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        name: &str,
        phone: &str,
        address_id: Uuid,
    ) -> Result<Restaurant, AppError>
    where
        E: Executor<'e, Database = Postgres> + Acquire<'e, Database = Postgres>,
    {
        let mut tx = executor.begin().await?;

        self.repo
            .find_restaurant(&mut *tx, id)
            .await?
            .ok_or(AppError::NotFound("Restaurante"))?;

        let mut errors = FieldErrors::new();
        self.check_restaurant_rules(&mut tx, name, address_id, Some(id), &mut errors)
            .await?;
        errors.into_result()?;

        let restaurant = self
            .repo
            .update_restaurant(&mut *tx, id, name, phone, address_id)
            .await?;

        tx.commit().await?;
        Ok(restaurant)
    }

    async fn check_restaurant_rules(
        &self,
        tx: &mut sqlx::Transaction<'_, Postgres>,
        name: &str,
        address_id: Uuid,
        exclude: Option<Uuid>,
        errors: &mut FieldErrors,
    ) -> Result<(), AppError> {
        if self.repo.name_exists(&mut **tx, name, exclude).await? {
            errors.add(
                "name",
                "duplicate_name",
                "Já existe um restaurante com este nome.",
            );
        }

        match self.repo.find_address(&mut **tx, address_id).await? {
            None => errors.add("addressId", "unknown_address", "Endereço inexistente."),
            Some(_) => {
                if self.repo.address_in_use(&mut **tx, address_id, exclude).await? {
                    errors.add(
                        "addressId",
                        "address_taken",
                        "Este endereço já pertence a outro restaurante.",
                    );
                }
            }
        }

        Ok(())
    }

    pub async fn delete_restaurant<'e, E>(&self, executor: E, id: Uuid) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let deleted = self.repo.delete_restaurant(executor, id).await?;
        if deleted == 0 {
            return Err(AppError::NotFound("Restaurante"));
        }
        Ok(())
    }

    pub async fn list_restaurants<'e, E>(
        &self,
        executor: E,
    ) -> Result<Vec<RestaurantListing>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        self.repo.list_with_counts(executor).await
    }

    pub async fn get_detail<'e, E>(
        &self,
        executor: E,
        id: Uuid,
    ) -> Result<RestaurantDetail, AppError>
    where
        E: Executor<'e, Database = Postgres> + Acquire<'e, Database = Postgres>,
    {
        let mut tx = executor.begin().await?;

        let restaurant = self
            .repo
            .find_restaurant(&mut *tx, id)
            .await?
            .ok_or(AppError::NotFound("Restaurante"))?;
        let address = self
            .repo
            .find_address(&mut *tx, restaurant.address_id)
            .await?
            .ok_or(AppError::NotFound("Endereço"))?;
        let dishes = self.repo.list_dishes_of(&mut *tx, id).await?;
        let tables = self.repo.list_tables_of(&mut *tx, id).await?;
        let frequent_customers = self.repo.list_frequent_customers(&mut *tx, id).await?;

        tx.commit().await?;

        Ok(RestaurantDetail {
            restaurant,
            address,
            dishes,
            tables,
            frequent_customers,
        })
    }

    pub async fn search<'e, E>(
        &self,
        executor: E,
        name: Option<&str>,
        phone: Option<&str>,
        address: Option<&str>,
    ) -> Result<Vec<RestaurantListing>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let criteria = build_search_criteria(name, phone, address)?;

        self.repo
            .search(
                executor,
                like_pattern(&criteria.name).as_deref(),
                like_pattern(&criteria.phone).as_deref(),
                like_pattern(&criteria.address).as_deref(),
            )
            .await
    }

    // =========================================================================
    //  CLIENTES FREQUENTES
    // =========================================================================

    pub async fn add_frequent_customer<'e, E>(
        &self,
        executor: E,
        restaurant_id: Uuid,
        customer_id: Uuid,
    ) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres> + Acquire<'e, Database = Postgres>,
    {
        let mut tx = executor.begin().await?;

        self.repo
            .find_restaurant(&mut *tx, restaurant_id)
            .await?
            .ok_or(AppError::NotFound("Restaurante"))?;
        if !self.repo.customer_exists(&mut *tx, customer_id).await? {
            return Err(AppError::NotFound("Cliente"));
        }

        self.repo
            .add_frequent_customer(&mut *tx, restaurant_id, customer_id)
            .await?;

        tx.commit().await?;
        Ok(())
    }

    pub async fn remove_frequent_customer<'e, E>(
        &self,
        executor: E,
        restaurant_id: Uuid,
        customer_id: Uuid,
    ) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let removed = self
            .repo
            .remove_frequent_customer(executor, restaurant_id, customer_id)
            .await?;
        if removed == 0 {
            return Err(AppError::NotFound("Vínculo"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_form_rejects_with_error_on_each_field() {
        let err = build_search_criteria(None, Some("   "), Some("")).unwrap_err();
        let AppError::ValidationError(inner) = err else {
            panic!("esperava erro de validação");
        };
        let fields = inner.field_errors();
        assert!(fields.contains_key("name"));
        assert!(fields.contains_key("phone"));
        assert!(fields.contains_key("address"));
    }

    #[test]
    fn phone_fragment_must_be_digits() {
        let err = build_search_criteria(None, Some("91-23"), None).unwrap_err();
        let AppError::ValidationError(inner) = err else {
            panic!("esperava erro de validação");
        };
        assert!(inner.field_errors().contains_key("phone"));
    }

    #[test]
    fn fragments_are_trimmed_and_blanks_dropped() {
        let criteria =
            build_search_criteria(Some("  Sol  "), Some(""), Some("Madrid")).unwrap();
        assert_eq!(
            criteria,
            SearchCriteria {
                name: Some("Sol".to_string()),
                phone: None,
                address: Some("Madrid".to_string()),
            }
        );
    }

    #[test]
    fn single_digit_phone_fragment_is_enough() {
        let criteria = build_search_criteria(None, Some("9123"), None).unwrap();
        assert_eq!(criteria.phone.as_deref(), Some("9123"));
        assert!(criteria.name.is_none());
    }
}

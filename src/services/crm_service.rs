// src/services/crm_service.rs

use sqlx::{Acquire, Executor, Postgres};
use uuid::Uuid;

use crate::{
    common::{
        error::AppError,
        validation::{word_count, FieldErrors},
    },
    db::CrmRepository,
    models::crm::{Customer, CustomerProfile},
};

const MAX_ALLERGY_WORDS: usize = 100;

/// Regras cruzadas do perfil. Funções puras dos valores submetidos: o texto
/// de alergias tem teto de palavras, alergias sem preferências não passa e
/// os dois textos não podem ser iguais.
pub(crate) fn check_profile_rules(allergies: &str, preferences: &str, errors: &mut FieldErrors) {
    if word_count(allergies) > MAX_ALLERGY_WORDS {
        errors.add(
            "allergies",
            "too_many_words",
            "As alergias devem ter no máximo 100 palavras.",
        );
    }

    let allergies_given = !allergies.trim().is_empty();
    let preferences_given = !preferences.trim().is_empty();

    if allergies_given && !preferences_given {
        errors.add(
            "preferences",
            "required_with_allergies",
            "Informe as preferências quando houver alergias.",
        );
    }

    if allergies_given && preferences_given && allergies.trim() == preferences.trim() {
        errors.add(
            "preferences",
            "equals_allergies",
            "As preferências devem ser diferentes das alergias.",
        );
    }
}

#[derive(Clone)]
pub struct CrmService {
    repo: CrmRepository,
}

impl CrmService {
    pub fn new(repo: CrmRepository) -> Self {
        Self { repo }
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
        E: Executor<'e, Database = Postgres> + Acquire<'e, Database = Postgres>,
    {
        let mut tx = executor.begin().await?;

        let mut errors = FieldErrors::new();
        if self.repo.email_exists(&mut *tx, email, None).await? {
            errors.add("email", "duplicate_email", "Este e-mail já está em uso.");
        }
        errors.into_result()?;

        let customer = self.repo.create_customer(&mut *tx, name, email, phone).await?;

        tx.commit().await?;
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
        E: Executor<'e, Database = Postgres> + Acquire<'e, Database = Postgres>,
    {
        let mut tx = executor.begin().await?;

        self.repo
            .find_customer(&mut *tx, id)
            .await?
            .ok_or(AppError::NotFound("Cliente"))?;

        let mut errors = FieldErrors::new();
        if self.repo.email_exists(&mut *tx, email, Some(id)).await? {
            errors.add("email", "duplicate_email", "Este e-mail já está em uso.");
        }
        errors.into_result()?;

        let customer = self
            .repo
            .update_customer(&mut *tx, id, name, email, phone)
            .await?;

        tx.commit().await?;
        Ok(customer)
    }

    pub async fn delete_customer<'e, E>(&self, executor: E, id: Uuid) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let deleted = self.repo.delete_customer(executor, id).await?;
        if deleted == 0 {
            return Err(AppError::NotFound("Cliente"));
        }
        Ok(())
    }

    pub async fn list_customers<'e, E>(&self, executor: E) -> Result<Vec<Customer>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        self.repo.list_customers(executor).await
    }

    pub async fn get_customer<'e, E>(&self, executor: E, id: Uuid) -> Result<Customer, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        self.repo
            .find_customer(executor, id)
            .await?
            .ok_or(AppError::NotFound("Cliente"))
    }

    // =========================================================================
    //  PERFIS
    // =========================================================================

    pub async fn get_profile<'e, E>(
        &self,
        executor: E,
        customer_id: Uuid,
    ) -> Result<CustomerProfile, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        self.repo
            .find_profile(executor, customer_id)
            .await?
            .ok_or(AppError::NotFound("Perfil"))
    }

    /// Cria ou substitui o perfil. As regras rodam TODAS de novo a cada
    /// submissão, também nas edições.
    pub async fn upsert_profile<'e, E>(
        &self,
        executor: E,
        customer_id: Uuid,
        allergies: &str,
        preferences: &str,
        newsletter: bool,
    ) -> Result<CustomerProfile, AppError>
    where
        E: Executor<'e, Database = Postgres> + Acquire<'e, Database = Postgres>,
    {
        let mut tx = executor.begin().await?;

        self.repo
            .find_customer(&mut *tx, customer_id)
            .await?
            .ok_or(AppError::NotFound("Cliente"))?;

        let mut errors = FieldErrors::new();
        check_profile_rules(allergies, preferences, &mut errors);
        errors.into_result()?;

        let profile = self
            .repo
            .upsert_profile(&mut *tx, customer_id, allergies, preferences, newsletter)
            .await?;

        tx.commit().await?;
        Ok(profile)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

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
    fn empty_profile_is_valid() {
        let mut errors = FieldErrors::new();
        check_profile_rules("", "", &mut errors);
        assert!(fields_of(errors).is_empty());
    }

    #[test]
    fn allergies_without_preferences_fail() {
        let mut errors = FieldErrors::new();
        check_profile_rules("marisco", "   ", &mut errors);
        assert_eq!(fields_of(errors), vec!["preferences"]);
    }

    #[test]
    fn preferences_must_differ_from_allergies() {
        let mut errors = FieldErrors::new();
        check_profile_rules("sem gluten", "  sem gluten ", &mut errors);
        assert_eq!(fields_of(errors), vec!["preferences"]);
    }

    #[test]
    fn allergy_text_is_capped_at_100_words() {
        let long_text = vec!["palavra"; 101].join(" ");
        let mut errors = FieldErrors::new();
        check_profile_rules(&long_text, "mesa perto da janela", &mut errors);
        assert_eq!(fields_of(errors), vec!["allergies"]);

        let ok_text = vec!["palavra"; 100].join(" ");
        let mut errors = FieldErrors::new();
        check_profile_rules(&ok_text, "mesa perto da janela", &mut errors);
        assert!(fields_of(errors).is_empty());
    }

    #[test]
    fn cap_and_missing_preferences_accumulate() {
        let long_text = vec!["palavra"; 101].join(" ");
        let mut errors = FieldErrors::new();
        check_profile_rules(&long_text, "", &mut errors);
        assert_eq!(fields_of(errors), vec!["allergies", "preferences"]);
    }
}

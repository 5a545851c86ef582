// src/common/validation.rs

use rust_decimal::Decimal;
use validator::{ValidationError, ValidationErrors};

use crate::common::error::AppError;

/// Acumulador de erros de formulário. As regras que dependem do banco
/// (unicidade, chaves estrangeiras) rodam nos services e vão juntando erros
/// aqui, no mesmo formato dos erros do `validator`: o caller recebe um mapa
/// campo -> mensagens, nunca um erro global único.
#[derive(Debug)]
pub struct FieldErrors {
    inner: ValidationErrors,
}

impl FieldErrors {
    pub fn new() -> Self {
        Self {
            inner: ValidationErrors::new(),
        }
    }

    pub fn add(&mut self, field: &str, code: &'static str, message: &str) {
        let mut err = ValidationError::new(code);
        err.message = Some(message.to_string().into());
        // O validator exige nomes de campo 'static; os formulários têm um
        // conjunto pequeno e fixo de campos, então o leak não cresce.
        let static_field: &'static str = Box::leak(field.to_string().into_boxed_str());
        self.inner.add(static_field, err);
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn into_result(self) -> Result<(), AppError> {
        if self.inner.is_empty() {
            Ok(())
        } else {
            Err(AppError::ValidationError(self.inner))
        }
    }
}

/// Erro de validação com um único campo, para os atalhos em que não há o
/// que acumular.
pub fn field_error(field: &str, code: &'static str, message: &str) -> AppError {
    let mut err = ValidationError::new(code);
    err.message = Some(message.to_string().into());
    let static_field: &'static str = Box::leak(field.to_string().into_boxed_str());
    let mut errors = ValidationErrors::new();
    errors.add(static_field, err);
    AppError::ValidationError(errors)
}

/// Telefones aceitam apenas dígitos (sem espaços, traços ou "+").
pub fn validate_digits(value: &str) -> Result<(), ValidationError> {
    if value.is_empty() || !value.chars().all(|c| c.is_ascii_digit()) {
        let mut err = ValidationError::new("digits_only");
        err.message = Some("O telefone deve conter apenas dígitos.".into());
        return Err(err);
    }
    Ok(())
}

pub fn validate_positive_price(value: &Decimal) -> Result<(), ValidationError> {
    if *value <= Decimal::ZERO {
        let mut err = ValidationError::new("positive_price");
        err.message = Some("O preço deve ser maior que zero.".into());
        return Err(err);
    }
    Ok(())
}

pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digits_only_accepts_plain_numbers() {
        assert!(validate_digits("912345678").is_ok());
    }

    #[test]
    fn digits_only_rejects_separators_and_empty() {
        assert!(validate_digits("91 234 56").is_err());
        assert!(validate_digits("+34912345678").is_err());
        assert!(validate_digits("").is_err());
    }

    #[test]
    fn price_must_be_strictly_positive() {
        assert!(validate_positive_price(&Decimal::new(1, 2)).is_ok());
        assert!(validate_positive_price(&Decimal::ZERO).is_err());
        assert!(validate_positive_price(&Decimal::new(-500, 2)).is_err());
    }

    #[test]
    fn word_count_ignores_extra_whitespace() {
        assert_eq!(word_count(""), 0);
        assert_eq!(word_count("   "), 0);
        assert_eq!(word_count("marisco  gluten\nlactosa"), 3);
    }

    #[test]
    fn field_errors_accumulate_per_field() {
        let mut errors = FieldErrors::new();
        assert!(errors.is_empty());

        errors.add("name", "duplicate_name", "Já existe um restaurante com este nome.");
        errors.add("time", "outside_service_window", "Fora do horário de serviço.");
        errors.add("time", "duplicate_slot", "Horário já reservado.");

        let err = errors.into_result().unwrap_err();
        let AppError::ValidationError(inner) = err else {
            panic!("esperava erro de validação");
        };
        let fields = inner.field_errors();
        assert_eq!(fields.len(), 2);
        assert_eq!(fields["time"].len(), 2);
    }
}

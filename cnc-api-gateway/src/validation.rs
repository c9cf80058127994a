use bigdecimal::{BigDecimal, Zero};

use crate::error::{ApiError, FieldErrors};
use crate::models::{LoginFormDto, ProductDto, RegistrationFormDto};

const PRODUCT_NAME_MAX_LENGTH: usize = 100;
const PASSWORD_MIN_LENGTH: usize = 8;
/// `NUMERIC(10, 2)` column.
const PRICE_UPPER_BOUND: i64 = 100_000_000;

/// Shape checks on a request body. Every failing field is reported, keyed
/// by its JSON name.
pub trait Validate {
    fn field_errors(&self) -> FieldErrors;

    fn validate(&self) -> Result<(), ApiError> {
        let errors = self.field_errors();
        if errors.is_empty() {
            Ok(())
        } else {
            Err(ApiError::Validation {
                message: format!("Validation failed with {} error(s)", errors.len()),
                errors,
            })
        }
    }
}

fn not_blank(errors: &mut FieldErrors, field: &str, value: &str) {
    if value.trim().is_empty() {
        errors.insert(field.to_string(), "must not be blank".to_string());
    }
}

fn is_email(value: &str) -> bool {
    match value.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty() && !domain.is_empty() && !domain.contains('@') && !value.contains(' ')
        }
        None => false,
    }
}

impl Validate for ProductDto {
    fn field_errors(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();
        not_blank(&mut errors, "name", &self.name);
        if self.name.chars().count() > PRODUCT_NAME_MAX_LENGTH {
            errors.insert(
                "name".to_string(),
                format!("size must be between 1 and {PRODUCT_NAME_MAX_LENGTH}"),
            );
        }
        match &self.price {
            None => {
                errors.insert("price".to_string(), "must not be null".to_string());
            }
            Some(price) if price < &BigDecimal::zero() => {
                errors.insert(
                    "price".to_string(),
                    "must be greater than or equal to 0".to_string(),
                );
            }
            Some(price) if price >= &BigDecimal::from(PRICE_UPPER_BOUND) => {
                errors.insert(
                    "price".to_string(),
                    format!("must be less than {PRICE_UPPER_BOUND}"),
                );
            }
            Some(price) if price.normalized().as_bigint_and_exponent().1 > 2 => {
                errors.insert(
                    "price".to_string(),
                    "must have at most 2 fractional digits".to_string(),
                );
            }
            Some(_) => {}
        }
        not_blank(&mut errors, "category", &self.category);
        errors
    }
}

impl Validate for RegistrationFormDto {
    fn field_errors(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();
        not_blank(&mut errors, "name", &self.name);
        if !is_email(self.email.trim()) {
            errors.insert(
                "email".to_string(),
                "must be a well-formed email address".to_string(),
            );
        }
        if self.password.chars().count() < PASSWORD_MIN_LENGTH {
            errors.insert(
                "password".to_string(),
                format!("size must be at least {PASSWORD_MIN_LENGTH}"),
            );
        }
        if self.password != self.password_confirmation {
            errors.insert(
                "registrationForm".to_string(),
                "passwords do not match".to_string(),
            );
        }
        errors
    }
}

impl Validate for LoginFormDto {
    fn field_errors(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();
        not_blank(&mut errors, "email", &self.email);
        not_blank(&mut errors, "password", &self.password);
        errors
    }
}

use std::sync::Arc;

use argon2::password_hash::{rand_core::OsRng, PasswordHasher, PasswordVerifier, SaltString};
use argon2::{Argon2, PasswordHash};
use chrono::{TimeDelta, Utc};
use jsonwebtoken::EncodingKey;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::ServiceResult;
use crate::error::{RepositoryError, ServiceError};
use crate::models::{NewRestaurant, Restaurant};
use crate::repository::RestaurantRepository;

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub exp: usize,
    pub iat: usize,
    pub sub: String,
}

/// Registration form once validated, password still in clear.
#[derive(Debug, Clone)]
pub struct Registration {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AuthToken {
    pub token_type: String,
    pub access_token: String,
    pub expires_in: i64,
}

/// Restaurant accounts: registration, email lookups and token issuing.
#[derive(Clone)]
pub struct AuthenticationService {
    restaurants: Arc<dyn RestaurantRepository>,
    encoding_key: EncodingKey,
    access_token_expires: TimeDelta,
}

impl AuthenticationService {
    pub fn new(
        restaurants: Arc<dyn RestaurantRepository>,
        secret_key: &str,
        access_token_expires: TimeDelta,
    ) -> Self {
        Self {
            restaurants,
            encoding_key: EncodingKey::from_secret(secret_key.as_ref()),
            access_token_expires,
        }
    }

    pub fn register(&self, registration: Registration) -> ServiceResult<Restaurant> {
        info!("Registering restaurant '{}'", registration.email);
        if self.restaurants.exists_by_email(&registration.email)? {
            warn!("Email '{}' already registered", registration.email);
            return Err(duplicated_email(&registration.email));
        }

        let salt = SaltString::generate(&mut OsRng);
        let password = Argon2::default()
            .hash_password(registration.password.as_bytes(), &salt)
            .map_err(|e| ServiceError::Internal(format!("Cannot hash password: {e}")))?
            .to_string();

        let restaurant = NewRestaurant {
            name: registration.name,
            email: registration.email,
            password,
        };
        match self.restaurants.insert(&restaurant) {
            Ok(saved) => {
                info!("Restaurant id '{}' saved to database", saved.id);
                Ok(saved)
            }
            Err(RepositoryError::UniqueViolation(_)) => Err(duplicated_email(&restaurant.email)),
            Err(err) => Err(err.into()),
        }
    }

    pub fn check_email_exists_boolean(&self, email: &str) -> ServiceResult<bool> {
        info!("Checking if email '{email}' is present in database");
        Ok(self.restaurants.exists_by_email(email)?)
    }

    pub fn check_email_exists(&self, email: &str) -> ServiceResult<()> {
        if self.check_email_exists_boolean(email)? {
            Ok(())
        } else {
            Err(ServiceError::UnknownResource(format!("Unknown email '{email}'")))
        }
    }

    pub fn login(&self, email: &str, password: &str) -> ServiceResult<AuthToken> {
        info!("User login attempt '{email}'");
        let restaurant = self
            .restaurants
            .find_by_email(email)?
            .ok_or(ServiceError::InvalidCredentials)?;

        let verified = PasswordHash::new(&restaurant.password)
            .map(|hash| {
                Argon2::default()
                    .verify_password(password.as_bytes(), &hash)
                    .is_ok()
            })
            .unwrap_or(false);
        if !verified {
            warn!("Invalid credentials for '{email}'");
            return Err(ServiceError::InvalidCredentials);
        }

        let now = Utc::now();
        let claims = Claims {
            exp: (now + self.access_token_expires).timestamp() as usize,
            iat: now.timestamp() as usize,
            sub: restaurant.id.to_string(),
        };
        let access_token =
            jsonwebtoken::encode(&jsonwebtoken::Header::default(), &claims, &self.encoding_key)
                .map_err(|e| ServiceError::Internal(format!("Cannot issue token: {e}")))?;

        Ok(AuthToken {
            token_type: "bearer".to_string(),
            access_token,
            expires_in: self.access_token_expires.num_seconds(),
        })
    }
}

fn duplicated_email(email: &str) -> ServiceError {
    ServiceError::ResourceDuplication(format!("Email '{email}' already exists"))
}

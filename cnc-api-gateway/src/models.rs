use std::collections::BTreeMap;

use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductDto {
    /// Unique identifier for the product, ignored on input
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    /// Name of the product, unique within the restaurant
    #[serde(default)]
    pub name: String,
    /// Price of the product, as a JSON number or a decimal string such as "12.50"
    #[serde(default, deserialize_with = "price::deserialize")]
    #[schema(value_type = Option<String>)]
    pub price: Option<BigDecimal>,
    /// Name of an existing category
    #[serde(default)]
    pub category: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CategoryDto {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MenuDto {
    pub id: i64,
    pub restaurant_id: i64,
    pub name: String,
    /// Decimal string with two decimals, e.g. "15.00"
    #[schema(value_type = String)]
    pub price: BigDecimal,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationFormDto {
    /// Name of the restaurant
    #[serde(default)]
    pub name: String,
    /// Email of the restaurant, used as login
    #[serde(default)]
    pub email: String,
    /// Password, at least 8 characters
    #[serde(default)]
    pub password: String,
    /// Must repeat `password`
    #[serde(default)]
    pub password_confirmation: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct LoginFormDto {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RestaurantDto {
    /// Unique identifier for the restaurant
    pub id: i64,
    pub name: String,
    pub email: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AuthToken {
    /// Token type, always "bearer"
    pub token_type: String,
    pub access_token: String,
    /// Token lifetime in seconds
    pub expires_in: i64,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct EmailQuery {
    pub email: String,
}

#[derive(Debug, Deserialize)]
pub struct CategoryQuery {
    pub category: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiErrorResponse {
    /// HTTP status name, e.g. "NOT_FOUND"
    pub status: String,
    /// Error message
    pub message: String,
    /// Field name to message, for validation failures
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<BTreeMap<String, String>>,
}

mod price {
    use std::str::FromStr;

    use bigdecimal::BigDecimal;
    use serde::{Deserialize, Deserializer, de};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawPrice {
        Number(f64),
        Text(String),
    }

    /// Numbers go through their shortest decimal representation so that
    /// `12.56` stays `12.56` instead of the nearest binary fraction.
    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<BigDecimal>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let text = match Option::<RawPrice>::deserialize(deserializer)? {
            None => return Ok(None),
            Some(RawPrice::Number(n)) => n.to_string(),
            Some(RawPrice::Text(t)) => t,
        };
        BigDecimal::from_str(text.trim())
            .map(Some)
            .map_err(|_| de::Error::custom(format!("invalid price `{text}`")))
    }
}

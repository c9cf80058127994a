use cnc_restaurant_service::models::{CatalogProduct, Category, Menu, ProductDraft, Restaurant};
use cnc_restaurant_service::service::{AuthToken as IssuedToken, Registration};

use crate::models::{
    AuthToken, CategoryDto, MenuDto, ProductDto, RegistrationFormDto, RestaurantDto,
};

impl From<CatalogProduct> for ProductDto {
    fn from(p: CatalogProduct) -> Self {
        Self {
            id: Some(p.product.id),
            name: p.product.name,
            price: Some(p.product.price),
            category: p.category.name,
        }
    }
}

/// Only call on a validated DTO: a missing price becomes zero.
impl From<ProductDto> for ProductDraft {
    fn from(dto: ProductDto) -> Self {
        Self {
            name: dto.name.trim().to_string(),
            price: dto.price.unwrap_or_default(),
            category: dto.category.trim().to_string(),
        }
    }
}

impl From<Category> for CategoryDto {
    fn from(c: Category) -> Self {
        Self {
            id: c.id,
            name: c.name,
        }
    }
}

impl From<Menu> for MenuDto {
    fn from(m: Menu) -> Self {
        Self {
            id: m.id,
            restaurant_id: m.restaurant_id,
            name: m.name,
            price: m.price,
        }
    }
}

impl From<RegistrationFormDto> for Registration {
    fn from(form: RegistrationFormDto) -> Self {
        Self {
            name: form.name.trim().to_string(),
            email: form.email.trim().to_lowercase(),
            password: form.password,
        }
    }
}

impl From<Restaurant> for RestaurantDto {
    fn from(r: Restaurant) -> Self {
        Self {
            id: r.id,
            name: r.name,
            email: r.email,
        }
    }
}

impl From<IssuedToken> for AuthToken {
    fn from(t: IssuedToken) -> Self {
        Self {
            token_type: t.token_type,
            access_token: t.access_token,
            expires_in: t.expires_in,
        }
    }
}

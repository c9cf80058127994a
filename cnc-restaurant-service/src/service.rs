pub mod auth;
pub mod menu;
pub mod product;

pub use auth::{AuthToken, AuthenticationService, Registration};
pub use menu::MenuService;
pub use product::ProductService;

pub type ServiceResult<T> = Result<T, crate::error::ServiceError>;

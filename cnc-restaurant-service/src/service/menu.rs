use std::sync::Arc;

use tracing::info;

use super::ServiceResult;
use crate::error::ServiceError;
use crate::models::Menu;
use crate::repository::MenuRepository;

#[derive(Clone)]
pub struct MenuService {
    menus: Arc<dyn MenuRepository>,
}

impl MenuService {
    pub fn new(menus: Arc<dyn MenuRepository>) -> Self {
        Self { menus }
    }

    pub fn find_menus(&self, restaurant_id: i64) -> ServiceResult<Vec<Menu>> {
        info!("Retrieving menus for restaurant id '{restaurant_id}'");
        Ok(self.menus.find_all_by_restaurant_id(restaurant_id)?)
    }

    pub fn find_menu(&self, restaurant_id: i64, menu_id: i64) -> ServiceResult<Menu> {
        info!("Retrieving menu id '{menu_id}' for restaurant id '{restaurant_id}'");
        self.menus
            .find_by_id_and_restaurant_id(menu_id, restaurant_id)?
            .ok_or_else(|| {
                ServiceError::UnknownResource(format!(
                    "Unknown menu '{menu_id}' for restaurant '{restaurant_id}'"
                ))
            })
    }
}

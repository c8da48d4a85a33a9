use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::dish::entities::{DishMedia, Ingredient};

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateDishInput {
    pub restaurant_id: Uuid,
    pub name: String,
    pub description: String,
    pub cooking_time: Option<i32>,
    pub ingredients: Vec<Ingredient>,
    pub media: DishMedia,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct UpdateDishInput {
    pub dish_id: Uuid,
    pub name: Option<String>,
    pub description: Option<String>,
    pub cooking_time: Option<i32>,
    pub is_available: Option<bool>,
    pub ingredients: Option<Vec<Ingredient>>,
    pub media: Option<DishMedia>,
}

#[derive(Debug, Clone, Default)]
pub struct GetDishesFilter {
    pub available_only: bool,
    /// Exact ingredient name the dish must contain.
    pub ingredient: Option<String>,
    pub limit: Option<u32>,
    pub offset: Option<u32>,
}

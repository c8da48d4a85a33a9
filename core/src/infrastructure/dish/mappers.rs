use sea_orm::ActiveValue::Set;
use tracing::error;

use crate::{
    domain::{
        common::entities::app_errors::CoreError,
        dish::entities::{Dish, DishMedia, Ingredient},
    },
    entity::dishes,
};

impl TryFrom<dishes::Model> for Dish {
    type Error = CoreError;

    fn try_from(model: dishes::Model) -> Result<Self, Self::Error> {
        let ingredients: Vec<Ingredient> =
            serde_json::from_value(model.ingredients).map_err(|e| {
                error!("Malformed ingredients stored for dish {}: {}", model.id, e);
                CoreError::Storage(format!("dish {} ingredients: {e}", model.id))
            })?;

        Ok(Self {
            id: model.id,
            restaurant_id: model.restaurant_id,
            name: model.name,
            description: model.description,
            cooking_time: model.cooking_time,
            is_available: model.is_available,
            ingredients,
            media: DishMedia {
                photo_id: model.dish_photo_id,
                ingredients_photo_id: model.ingredients_photo_id,
                audio_guide_id: model.audio_guide_id,
                video_guide_id: model.video_guide_id,
            },
            created_at: model.created_at.to_utc(),
            updated_at: model.updated_at.to_utc(),
        })
    }
}

impl TryFrom<&Dish> for dishes::ActiveModel {
    type Error = CoreError;

    fn try_from(dish: &Dish) -> Result<Self, Self::Error> {
        let ingredients = serde_json::to_value(&dish.ingredients).map_err(|e| {
            error!("Failed to encode ingredients of dish {}: {}", dish.id, e);
            CoreError::Storage(format!("dish {} ingredients: {e}", dish.id))
        })?;

        Ok(Self {
            id: Set(dish.id),
            restaurant_id: Set(dish.restaurant_id),
            name: Set(dish.name.clone()),
            description: Set(dish.description.clone()),
            cooking_time: Set(dish.cooking_time),
            is_available: Set(dish.is_available),
            ingredients: Set(ingredients),
            dish_photo_id: Set(dish.media.photo_id.clone()),
            ingredients_photo_id: Set(dish.media.ingredients_photo_id.clone()),
            audio_guide_id: Set(dish.media.audio_guide_id.clone()),
            video_guide_id: Set(dish.media.video_guide_id.clone()),
            created_at: Set(dish.created_at.fixed_offset()),
            updated_at: Set(dish.updated_at.fixed_offset()),
        })
    }
}

/// Each dish model converted in order; the first malformed row fails the batch.
pub fn map_dishes(models: Vec<dishes::Model>) -> Result<Vec<Dish>, CoreError> {
    models.into_iter().map(Dish::try_from).collect()
}

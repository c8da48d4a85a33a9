use sea_orm::ActiveValue::Set;

use crate::{domain::restaurant::entities::Restaurant, entity::restaurants};

impl From<&restaurants::Model> for Restaurant {
    fn from(model: &restaurants::Model) -> Self {
        Self {
            id: model.id,
            title: model.title.clone(),
            description: model.description.clone(),
            is_active: model.is_active,
            created_at: model.created_at.to_utc(),
        }
    }
}

impl From<restaurants::Model> for Restaurant {
    fn from(model: restaurants::Model) -> Self {
        Self::from(&model)
    }
}

impl From<&Restaurant> for restaurants::ActiveModel {
    fn from(restaurant: &Restaurant) -> Self {
        Self {
            id: Set(restaurant.id),
            title: Set(restaurant.title.clone()),
            description: Set(restaurant.description.clone()),
            is_active: Set(restaurant.is_active),
            created_at: Set(restaurant.created_at.fixed_offset()),
        }
    }
}

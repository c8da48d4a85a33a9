use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::common::{
    entities::app_errors::CoreError,
    generate_timestamp,
    validation::{optional_text, required_text},
};

pub const MAX_NAME_CHARS: usize = 100;
pub const MAX_MEDIA_HANDLE_CHARS: usize = 255;

/// One line of a dish's ingredient list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Ingredient {
    pub name: String,
    pub amount: f64,
    pub unit: String,
}

impl Ingredient {
    pub fn new(name: impl Into<String>, amount: f64, unit: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            amount,
            unit: unit.into(),
        }
    }

    fn validated(self) -> Result<Self, CoreError> {
        let name = required_text("ingredient name", &self.name, Some(MAX_NAME_CHARS))?;
        if !self.amount.is_finite() || self.amount < 0.0 {
            return Err(CoreError::validation(format!(
                "ingredient {name} must have a non-negative amount"
            )));
        }
        Ok(Self {
            name,
            amount: self.amount,
            unit: self.unit.trim().to_string(),
        })
    }
}

/// External content handles delivered by the messaging front-end.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct DishMedia {
    pub photo_id: String,
    pub ingredients_photo_id: Option<String>,
    pub audio_guide_id: Option<String>,
    pub video_guide_id: Option<String>,
}

impl DishMedia {
    fn validated(self) -> Result<Self, CoreError> {
        let limit = Some(MAX_MEDIA_HANDLE_CHARS);
        Ok(Self {
            photo_id: required_text("photo_id", &self.photo_id, limit)?,
            ingredients_photo_id: optional_text(
                "ingredients_photo_id",
                self.ingredients_photo_id,
                limit,
            )?,
            audio_guide_id: optional_text("audio_guide_id", self.audio_guide_id, limit)?,
            video_guide_id: optional_text("video_guide_id", self.video_guide_id, limit)?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Dish {
    pub id: Uuid,
    pub restaurant_id: Uuid,
    pub name: String,
    pub description: String,
    /// Minutes.
    pub cooking_time: Option<i32>,
    pub is_available: bool,
    pub ingredients: Vec<Ingredient>,
    pub media: DishMedia,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct DishConfig {
    pub restaurant_id: Uuid,
    pub name: String,
    pub description: String,
    pub cooking_time: Option<i32>,
    pub ingredients: Vec<Ingredient>,
    pub media: DishMedia,
}

#[derive(Debug, Clone, Default)]
pub struct DishChanges {
    pub name: Option<String>,
    pub description: Option<String>,
    pub cooking_time: Option<i32>,
    pub is_available: Option<bool>,
    pub ingredients: Option<Vec<Ingredient>>,
    pub media: Option<DishMedia>,
}

fn validate_cooking_time(cooking_time: Option<i32>) -> Result<Option<i32>, CoreError> {
    match cooking_time {
        Some(minutes) if minutes < 0 => Err(CoreError::validation(
            "cooking_time must not be negative",
        )),
        other => Ok(other),
    }
}

fn validate_ingredients(ingredients: Vec<Ingredient>) -> Result<Vec<Ingredient>, CoreError> {
    ingredients.into_iter().map(Ingredient::validated).collect()
}

impl Dish {
    pub fn new(config: DishConfig) -> Result<Self, CoreError> {
        let (now, timestamp) = generate_timestamp();

        Ok(Self {
            id: Uuid::new_v7(timestamp),
            restaurant_id: config.restaurant_id,
            name: required_text("name", &config.name, Some(MAX_NAME_CHARS))?,
            description: config.description.trim().to_string(),
            cooking_time: validate_cooking_time(config.cooking_time)?,
            is_available: true,
            ingredients: validate_ingredients(config.ingredients)?,
            media: config.media.validated()?,
            created_at: now,
            updated_at: now,
        })
    }

    /// Applies `changes`; nothing is modified when any field is invalid.
    pub fn update(&mut self, changes: DishChanges) -> Result<(), CoreError> {
        let name = changes
            .name
            .map(|name| required_text("name", &name, Some(MAX_NAME_CHARS)))
            .transpose()?;
        let cooking_time = validate_cooking_time(changes.cooking_time)?;
        let ingredients = changes.ingredients.map(validate_ingredients).transpose()?;
        let media = changes.media.map(DishMedia::validated).transpose()?;

        if let Some(name) = name {
            self.name = name;
        }
        if let Some(description) = changes.description {
            self.description = description.trim().to_string();
        }
        if cooking_time.is_some() {
            self.cooking_time = cooking_time;
        }
        if let Some(is_available) = changes.is_available {
            self.is_available = is_available;
        }
        if let Some(ingredients) = ingredients {
            self.ingredients = ingredients;
        }
        if let Some(media) = media {
            self.media = media;
        }

        let (now, _) = generate_timestamp();
        self.updated_at = now;
        Ok(())
    }

    pub fn contains_ingredient(&self, name: &str) -> bool {
        self.ingredients.iter().any(|i| i.name == name)
    }
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::common::{
    entities::app_errors::CoreError,
    generate_timestamp,
    validation::{optional_text, required_text},
};

pub const MAX_TITLE_CHARS: usize = 100;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Restaurant {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl Restaurant {
    pub fn new(title: String, description: Option<String>) -> Result<Self, CoreError> {
        let (now, timestamp) = generate_timestamp();

        Ok(Self {
            id: Uuid::new_v7(timestamp),
            title: required_text("title", &title, Some(MAX_TITLE_CHARS))?,
            description: optional_text("description", description, None)?,
            is_active: true,
            created_at: now,
        })
    }

    pub fn update(
        &mut self,
        title: Option<String>,
        description: Option<String>,
        is_active: Option<bool>,
    ) -> Result<(), CoreError> {
        if let Some(title) = title {
            self.title = required_text("title", &title, Some(MAX_TITLE_CHARS))?;
        }
        if let Some(description) = description {
            self.description = optional_text("description", Some(description), None)?;
        }
        if let Some(is_active) = is_active {
            self.is_active = is_active;
        }
        Ok(())
    }
}

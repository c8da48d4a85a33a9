use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::{
    common::{
        entities::app_errors::CoreError,
        generate_timestamp,
        validation::{optional_text, required_text},
    },
    stats::value_objects::StatsContribution,
};

pub const MAX_FULL_NAME_CHARS: usize = 100;
pub const MAX_USERNAME_CHARS: usize = 50;

/// A staff member, identified externally by their messaging account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct User {
    pub id: Uuid,
    pub tg_id: i64,
    pub tg_username: Option<String>,
    pub full_name: String,
    pub is_waiter: bool,
    pub is_admin: bool,
    pub restaurant_id: Option<Uuid>,
    /// Minutes; never decreases.
    pub total_training_time: i64,
    pub last_trained_dish: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub last_active: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct UserConfig {
    pub tg_id: i64,
    pub tg_username: Option<String>,
    pub full_name: String,
    pub is_waiter: bool,
    pub is_admin: bool,
    pub restaurant_id: Option<Uuid>,
}

impl User {
    pub fn new(config: UserConfig) -> Result<Self, CoreError> {
        let (now, timestamp) = generate_timestamp();

        Ok(Self {
            id: Uuid::new_v7(timestamp),
            tg_id: config.tg_id,
            tg_username: optional_text("tg_username", config.tg_username, Some(MAX_USERNAME_CHARS))?,
            full_name: required_text("full_name", &config.full_name, Some(MAX_FULL_NAME_CHARS))?,
            is_waiter: config.is_waiter,
            is_admin: config.is_admin,
            restaurant_id: config.restaurant_id,
            total_training_time: 0,
            last_trained_dish: None,
            created_at: now,
            last_active: now,
        })
    }

    pub fn update(
        &mut self,
        tg_username: Option<String>,
        full_name: Option<String>,
        is_waiter: Option<bool>,
        is_admin: Option<bool>,
    ) -> Result<(), CoreError> {
        let tg_username = optional_text("tg_username", tg_username, Some(MAX_USERNAME_CHARS))?;
        let full_name = full_name
            .map(|name| required_text("full_name", &name, Some(MAX_FULL_NAME_CHARS)))
            .transpose()?;

        if tg_username.is_some() {
            self.tg_username = tg_username;
        }
        if let Some(full_name) = full_name {
            self.full_name = full_name;
        }
        if let Some(is_waiter) = is_waiter {
            self.is_waiter = is_waiter;
        }
        if let Some(is_admin) = is_admin {
            self.is_admin = is_admin;
        }
        Ok(())
    }

    pub fn touch(&mut self, at: DateTime<Utc>) {
        if at > self.last_active {
            self.last_active = at;
        }
    }

    /// Folds a closed session into the rollups.
    pub fn apply_contribution(&mut self, contribution: &StatsContribution) {
        self.total_training_time += contribution.minutes.max(0);
        if let Some(dish_id) = contribution.trained_dish {
            self.last_trained_dish = Some(dish_id);
        }
    }
}

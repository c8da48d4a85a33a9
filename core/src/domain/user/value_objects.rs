use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RegisterUserInput {
    pub tg_id: i64,
    pub tg_username: Option<String>,
    pub full_name: String,
    #[serde(default)]
    pub is_waiter: bool,
    #[serde(default)]
    pub is_admin: bool,
    pub restaurant_id: Option<Uuid>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct UpdateUserInput {
    pub user_id: Uuid,
    pub tg_username: Option<String>,
    pub full_name: Option<String>,
    pub is_waiter: Option<bool>,
    pub is_admin: Option<bool>,
}

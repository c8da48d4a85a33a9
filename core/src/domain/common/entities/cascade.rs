use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Row counts touched by a cascading delete.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CascadeReport {
    pub restaurants_deleted: u64,
    pub dishes_deleted: u64,
    pub questions_deleted: u64,
    pub users_deleted: u64,
    pub users_detached: u64,
    pub trained_dish_cleared: u64,
    pub sessions_deleted: u64,
    pub sessions_detached: u64,
}

impl CascadeReport {
    pub fn merge(&mut self, other: CascadeReport) {
        self.restaurants_deleted += other.restaurants_deleted;
        self.dishes_deleted += other.dishes_deleted;
        self.questions_deleted += other.questions_deleted;
        self.users_deleted += other.users_deleted;
        self.users_detached += other.users_detached;
        self.trained_dish_cleared += other.trained_dish_cleared;
        self.sessions_deleted += other.sessions_deleted;
        self.sessions_detached += other.sessions_detached;
    }
}

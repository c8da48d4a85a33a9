use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub tg_id: i64,
    #[sea_orm(column_type = "String(StringLen::N(50))", nullable)]
    pub tg_username: Option<String>,
    #[sea_orm(column_type = "String(StringLen::N(100))")]
    pub full_name: String,
    pub is_waiter: bool,
    pub is_admin: bool,
    #[sea_orm(nullable)]
    pub restaurant_id: Option<Uuid>,
    pub total_training_time: i64,
    #[sea_orm(nullable)]
    pub last_trained_dish: Option<Uuid>,
    pub created_at: DateTimeWithTimeZone,
    pub last_active: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::restaurants::Entity",
        from = "Column::RestaurantId",
        to = "super::restaurants::Column::Id",
        on_update = "NoAction",
        on_delete = "SetNull"
    )]
    Restaurants,
    #[sea_orm(
        belongs_to = "super::dishes::Entity",
        from = "Column::LastTrainedDish",
        to = "super::dishes::Column::Id",
        on_update = "NoAction",
        on_delete = "SetNull"
    )]
    LastTrainedDish,
    #[sea_orm(has_many = "super::training_sessions::Entity")]
    TrainingSessions,
}

impl Related<super::restaurants::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Restaurants.def()
    }
}

impl Related<super::training_sessions::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TrainingSessions.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

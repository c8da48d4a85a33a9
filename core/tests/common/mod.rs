#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use brigade_core::{
    application::{BrigadeService, service_with_clock},
    domain::{
        common::{TrainingPolicy, ports::Clock},
        dish::{
            entities::{Dish, DishMedia, Ingredient},
            ports::DishService,
            value_objects::CreateDishInput,
        },
        question::{
            entities::{Difficulty, Question},
            ports::QuestionService,
            value_objects::CreateQuestionInput,
        },
        restaurant::{
            entities::Restaurant, ports::RestaurantService, value_objects::CreateRestaurantInput,
        },
        user::{entities::User, ports::UserService, value_objects::RegisterUserInput},
    },
    infrastructure::db::{Store, StoreConfig},
};
use chrono::{DateTime, Duration, TimeZone, Utc};
use test_context::AsyncTestContext;
use uuid::Uuid;

/// Clock whose time only moves when a test advances it.
#[derive(Debug, Clone)]
pub struct ManualClock {
    now: Arc<Mutex<DateTime<Utc>>>,
}

impl ManualClock {
    pub fn starting_at(at: DateTime<Utc>) -> Self {
        Self {
            now: Arc::new(Mutex::new(at)),
        }
    }

    pub fn advance(&self, by: Duration) {
        let mut now = self.now.lock().unwrap();
        *now += by;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap()
    }
}

pub type TestService = BrigadeService<ManualClock>;

pub async fn memory_store() -> Store {
    let store = Store::connect(StoreConfig {
        database_url: "sqlite::memory:".to_string(),
        max_connections: 1,
        sql_logging: false,
    })
    .await
    .expect("in-memory store");
    store.apply_schema().await.expect("schema");
    store
}

/// A fresh in-memory store and a service on a manual clock.
pub struct StoreContext {
    pub store: Store,
    pub clock: ManualClock,
    pub service: TestService,
}

impl StoreContext {
    pub async fn with_policy(policy: TrainingPolicy) -> Self {
        let store = memory_store().await;
        // After any wall-clock timestamp written at registration.
        let clock = ManualClock::starting_at(Utc.with_ymd_and_hms(2040, 1, 6, 9, 0, 0).unwrap());
        let service = service_with_clock(&store, policy, clock.clone());

        Self {
            store,
            clock,
            service,
        }
    }

    pub async fn restaurant(&self, title: &str) -> Restaurant {
        self.service
            .create_restaurant(CreateRestaurantInput {
                title: title.to_string(),
                description: None,
            })
            .await
            .unwrap()
    }

    pub async fn dish(&self, restaurant_id: Uuid, name: &str, ingredients: &[&str]) -> Dish {
        self.service
            .create_dish(CreateDishInput {
                restaurant_id,
                name: name.to_string(),
                description: format!("{name} as served on the line"),
                cooking_time: Some(15),
                ingredients: ingredients
                    .iter()
                    .map(|name| Ingredient::new(*name, 100.0, "g"))
                    .collect(),
                media: DishMedia {
                    photo_id: format!("photo-{name}"),
                    ingredients_photo_id: None,
                    audio_guide_id: None,
                    video_guide_id: None,
                },
            })
            .await
            .unwrap()
    }

    pub async fn question(&self, dish_id: Uuid, difficulty: Difficulty) -> Question {
        self.service
            .add_question(CreateQuestionInput {
                dish_id,
                question_text: format!("Which garnish goes on top? ({difficulty})"),
                options: vec![
                    "Basil".to_string(),
                    "Parsley".to_string(),
                    "Chives".to_string(),
                ],
                correct_answer: 0,
                difficulty,
            })
            .await
            .unwrap()
    }

    pub async fn waiter(&self, tg_id: i64, restaurant_id: Option<Uuid>) -> User {
        self.service
            .register_user(RegisterUserInput {
                tg_id,
                tg_username: Some(format!("waiter_{tg_id}")),
                full_name: format!("Waiter {tg_id}"),
                is_waiter: true,
                is_admin: false,
                restaurant_id,
            })
            .await
            .unwrap()
    }
}

impl AsyncTestContext for StoreContext {
    async fn setup() -> Self {
        Self::with_policy(TrainingPolicy::default()).await
    }

    async fn teardown(self) {
        self.store.close().await.unwrap();
    }
}

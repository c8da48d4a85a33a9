mod common;

use brigade_core::domain::{
    common::entities::app_errors::CoreError,
    training::{ports::TrainingService, value_objects::StartSessionInput},
    user::{
        ports::UserService,
        value_objects::{RegisterUserInput, UpdateUserInput},
    },
};
use common::StoreContext;
use test_context::test_context;
use uuid::Uuid;

#[test_context(StoreContext)]
#[tokio::test]
async fn test_tg_id_is_unique(ctx: &mut StoreContext) {
    let first = ctx.waiter(42, None).await;

    let duplicate = ctx
        .service
        .register_user(RegisterUserInput {
            tg_id: 42,
            tg_username: None,
            full_name: "Someone Else".to_string(),
            is_waiter: false,
            is_admin: true,
            restaurant_id: None,
        })
        .await;
    assert!(matches!(duplicate, Err(CoreError::Conflict(_))));

    let found = ctx.service.get_user_by_tg_id(42).await.unwrap().unwrap();
    assert_eq!(found.id, first.id);
    assert_eq!(found.total_training_time, 0);
}

#[test_context(StoreContext)]
#[tokio::test]
async fn test_registration_checks_restaurant(ctx: &mut StoreContext) {
    let result = ctx
        .service
        .register_user(RegisterUserInput {
            tg_id: 7,
            tg_username: None,
            full_name: "New Hire".to_string(),
            is_waiter: true,
            is_admin: false,
            restaurant_id: Some(Uuid::new_v4()),
        })
        .await;

    assert!(matches!(
        result,
        Err(CoreError::Reference {
            entity: "restaurant",
            ..
        })
    ));
    assert!(ctx.service.get_user_by_tg_id(7).await.unwrap().is_none());
}

#[test_context(StoreContext)]
#[tokio::test]
async fn test_profile_update_and_reassignment(ctx: &mut StoreContext) {
    let first = ctx.restaurant("First").await;
    let second = ctx.restaurant("Second").await;
    let user = ctx.waiter(8, Some(first.id)).await;

    let updated = ctx
        .service
        .update_user(UpdateUserInput {
            user_id: user.id,
            full_name: Some("Head Waiter".to_string()),
            is_admin: Some(true),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(updated.full_name, "Head Waiter");
    assert!(updated.is_admin);
    assert!(updated.is_waiter);
    assert_eq!(updated.restaurant_id, Some(first.id));

    let moved = ctx
        .service
        .assign_restaurant(user.id, Some(second.id))
        .await
        .unwrap();
    assert_eq!(moved.restaurant_id, Some(second.id));

    let dangling = ctx
        .service
        .assign_restaurant(user.id, Some(Uuid::new_v4()))
        .await;
    assert!(matches!(dangling, Err(CoreError::Reference { .. })));

    let unaffiliated = ctx.service.assign_restaurant(user.id, None).await.unwrap();
    assert_eq!(unaffiliated.restaurant_id, None);

    let blank = ctx
        .service
        .update_user(UpdateUserInput {
            user_id: user.id,
            full_name: Some(" ".to_string()),
            ..Default::default()
        })
        .await;
    assert!(matches!(blank, Err(CoreError::Validation(_))));
}

#[test_context(StoreContext)]
#[tokio::test]
async fn test_user_deletion_removes_sessions(ctx: &mut StoreContext) {
    let restaurant = ctx.restaurant("Cafe").await;
    let dish = ctx.dish(restaurant.id, "Quiche", &["Egg"]).await;
    let user = ctx.waiter(9, Some(restaurant.id)).await;

    let session = ctx
        .service
        .start_session(StartSessionInput {
            user_id: user.id,
            dish_id: dish.id,
        })
        .await
        .unwrap();
    ctx.service.complete_session(session.id).await.unwrap();
    ctx.service
        .start_session(StartSessionInput {
            user_id: user.id,
            dish_id: dish.id,
        })
        .await
        .unwrap();

    let report = ctx.service.delete_user(user.id).await.unwrap();
    assert_eq!(report.users_deleted, 1);
    assert_eq!(report.sessions_deleted, 2);

    assert!(ctx.service.get_user(user.id).await.unwrap().is_none());
    assert!(ctx.service.get_session(session.id).await.unwrap().is_none());

    let again = ctx.service.delete_user(user.id).await;
    assert!(matches!(again, Err(CoreError::NotFound { .. })));
}

mod common;

use brigade_core::{
    domain::{
        common::{TrainingPolicy, entities::app_errors::CoreError, ports::Clock},
        dish::ports::DishService,
        question::{entities::Difficulty, ports::QuestionService, value_objects::UpdateQuestionInput},
        stats::{
            policies::AggregationPolicy, ports::StatsService, value_objects::AggregationOutcome,
        },
        training::{
            entities::{AnswerRecord, SessionState},
            ports::{TrainingService, TrainingSessionRepository},
            scoring::ScoringPolicy,
            value_objects::{GetSessionsFilter, RecordAnswerInput, StartSessionInput},
        },
        user::ports::UserService,
    },
    infrastructure::training::SqlTrainingSessionRepository,
};
use chrono::Duration;
use common::StoreContext;
use test_context::test_context;
use uuid::Uuid;

async fn answer(ctx: &StoreContext, session_id: Uuid, question_id: Uuid, chosen_index: u32) {
    ctx.service
        .record_answer(RecordAnswerInput {
            session_id,
            question_id,
            chosen_index,
        })
        .await
        .unwrap();
}

#[test_context(StoreContext)]
#[tokio::test]
async fn test_weighted_score_of_mixed_answers(ctx: &mut StoreContext) {
    let restaurant = ctx.restaurant("Trattoria").await;
    let dish = ctx.dish(restaurant.id, "Carbonara", &["Guanciale"]).await;
    let easy = ctx.question(dish.id, Difficulty::Easy).await;
    let hard = ctx.question(dish.id, Difficulty::Hard).await;
    let user = ctx.waiter(1, Some(restaurant.id)).await;

    let session = ctx
        .service
        .start_session(StartSessionInput {
            user_id: user.id,
            dish_id: dish.id,
        })
        .await
        .unwrap();
    assert_eq!(session.state(), SessionState::Open);

    answer(ctx, session.id, easy.id, 0).await;
    answer(ctx, session.id, hard.id, 2).await;
    ctx.clock.advance(Duration::seconds(150));

    let closed = ctx.service.complete_session(session.id).await.unwrap();

    assert_eq!(closed.score, Some(25));
    assert_eq!(closed.state(), SessionState::Completed);
    assert_eq!(closed.duration(), 150);
    assert!(closed.end_time.unwrap() >= closed.start_time);

    let stored = ctx.service.get_session(session.id).await.unwrap().unwrap();
    assert_eq!(stored.details.answers.len(), 2);
    assert_eq!(stored.details.correct_count(), 1);
    assert!(stored.aggregated_at.is_some());
}

#[test_context(StoreContext)]
#[tokio::test]
async fn test_zero_answer_completion_scores_zero(ctx: &mut StoreContext) {
    let restaurant = ctx.restaurant("Bistro").await;
    let dish = ctx.dish(restaurant.id, "Ratatouille", &["Zucchini"]).await;
    let user = ctx.waiter(2, None).await;

    let session = ctx
        .service
        .start_session(StartSessionInput {
            user_id: user.id,
            dish_id: dish.id,
        })
        .await
        .unwrap();
    let closed = ctx.service.complete_session(session.id).await.unwrap();

    assert_eq!(closed.score, Some(0));
    assert_eq!(closed.duration(), 0);
}

#[tokio::test]
async fn test_unweighted_policy_counts_every_answer_alike() {
    let ctx = StoreContext::with_policy(TrainingPolicy {
        scoring: ScoringPolicy::Unweighted,
        ..Default::default()
    })
    .await;
    let restaurant = ctx.restaurant("Osteria").await;
    let dish = ctx.dish(restaurant.id, "Risotto", &["Arborio"]).await;
    let easy = ctx.question(dish.id, Difficulty::Easy).await;
    let hard = ctx.question(dish.id, Difficulty::Hard).await;
    let user = ctx.waiter(3, None).await;

    let session = ctx
        .service
        .start_session(StartSessionInput {
            user_id: user.id,
            dish_id: dish.id,
        })
        .await
        .unwrap();
    answer(&ctx, session.id, easy.id, 0).await;
    answer(&ctx, session.id, hard.id, 1).await;

    let closed = ctx.service.complete_session(session.id).await.unwrap();
    assert_eq!(closed.score, Some(50));
}

#[test_context(StoreContext)]
#[tokio::test]
async fn test_second_start_conflicts_until_closed(ctx: &mut StoreContext) {
    let restaurant = ctx.restaurant("Brasserie").await;
    let dish = ctx.dish(restaurant.id, "Onion soup", &["Onion"]).await;
    let user = ctx.waiter(4, Some(restaurant.id)).await;
    let input = StartSessionInput {
        user_id: user.id,
        dish_id: dish.id,
    };

    let first = ctx.service.start_session(input.clone()).await.unwrap();
    let second = ctx.service.start_session(input.clone()).await;
    assert!(matches!(second, Err(CoreError::Conflict(_))));

    ctx.service.abandon_session(first.id).await.unwrap();
    let third = ctx.service.start_session(input).await.unwrap();
    assert_ne!(third.id, first.id);
    assert!(third.is_open());
}

#[test_context(StoreContext)]
#[tokio::test]
async fn test_concurrent_starts_leave_one_open_session(ctx: &mut StoreContext) {
    let restaurant = ctx.restaurant("Diner").await;
    let dish = ctx.dish(restaurant.id, "Pancakes", &["Flour"]).await;
    let user = ctx.waiter(5, None).await;
    let input = StartSessionInput {
        user_id: user.id,
        dish_id: dish.id,
    };

    let (left, right) = tokio::join!(
        ctx.service.start_session(input.clone()),
        ctx.service.start_session(input.clone()),
    );

    let started = [&left, &right].iter().filter(|r| r.is_ok()).count();
    let conflicts = [&left, &right]
        .iter()
        .filter(|r| matches!(r, Err(e) if e.is_conflict()))
        .count();
    assert_eq!(started, 1);
    assert_eq!(conflicts, 1);

    let open = ctx
        .service
        .list_sessions(
            user.id,
            GetSessionsFilter {
                state: Some(SessionState::Open),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(open.len(), 1);
}

#[test_context(StoreContext)]
#[tokio::test]
async fn test_answer_rules(ctx: &mut StoreContext) {
    let restaurant = ctx.restaurant("Izakaya").await;
    let dish = ctx.dish(restaurant.id, "Karaage", &["Chicken"]).await;
    let other_dish = ctx.dish(restaurant.id, "Edamame", &["Soy"]).await;
    let question = ctx.question(dish.id, Difficulty::Medium).await;
    let foreign = ctx.question(other_dish.id, Difficulty::Easy).await;
    let user = ctx.waiter(6, None).await;

    let session = ctx
        .service
        .start_session(StartSessionInput {
            user_id: user.id,
            dish_id: dish.id,
        })
        .await
        .unwrap();

    let wrong_dish = ctx
        .service
        .record_answer(RecordAnswerInput {
            session_id: session.id,
            question_id: foreign.id,
            chosen_index: 0,
        })
        .await;
    assert!(matches!(wrong_dish, Err(CoreError::Reference { .. })));

    let out_of_range = ctx
        .service
        .record_answer(RecordAnswerInput {
            session_id: session.id,
            question_id: question.id,
            chosen_index: 3,
        })
        .await;
    assert!(matches!(out_of_range, Err(CoreError::Validation(_))));

    answer(ctx, session.id, question.id, 1).await;
    let duplicate = ctx
        .service
        .record_answer(RecordAnswerInput {
            session_id: session.id,
            question_id: question.id,
            chosen_index: 0,
        })
        .await;
    assert!(matches!(duplicate, Err(CoreError::Conflict(_))));

    ctx.service.complete_session(session.id).await.unwrap();
    let after_close = ctx
        .service
        .record_answer(RecordAnswerInput {
            session_id: session.id,
            question_id: question.id,
            chosen_index: 0,
        })
        .await;
    assert!(matches!(
        after_close,
        Err(CoreError::InvalidState {
            state: SessionState::Completed,
            ..
        })
    ));

    let stored = ctx.service.get_session(session.id).await.unwrap().unwrap();
    assert_eq!(stored.details.answers.len(), 1);
    assert_eq!(stored.score, Some(0));
}

#[test_context(StoreContext)]
#[tokio::test]
async fn test_closing_twice_is_rejected(ctx: &mut StoreContext) {
    let restaurant = ctx.restaurant("Taverna").await;
    let dish = ctx.dish(restaurant.id, "Moussaka", &["Eggplant"]).await;
    let user = ctx.waiter(7, None).await;

    let session = ctx
        .service
        .start_session(StartSessionInput {
            user_id: user.id,
            dish_id: dish.id,
        })
        .await
        .unwrap();
    ctx.service.abandon_session(session.id).await.unwrap();

    let complete = ctx.service.complete_session(session.id).await;
    assert!(matches!(
        complete,
        Err(CoreError::InvalidState {
            state: SessionState::Abandoned,
            ..
        })
    ));

    let unknown = ctx.service.complete_session(Uuid::new_v4()).await;
    assert!(matches!(unknown, Err(CoreError::NotFound { .. })));
}

#[test_context(StoreContext)]
#[tokio::test]
async fn test_training_time_sums_floor_minutes(ctx: &mut StoreContext) {
    let restaurant = ctx.restaurant("Cantina").await;
    let tacos = ctx.dish(restaurant.id, "Tacos", &["Tortilla"]).await;
    let mole = ctx.dish(restaurant.id, "Mole", &["Chocolate"]).await;
    let user = ctx.waiter(8, None).await;

    let mut totals = vec![];
    for (dish_id, seconds) in [(tacos.id, 119), (mole.id, 61), (tacos.id, 600)] {
        let session = ctx
            .service
            .start_session(StartSessionInput {
                user_id: user.id,
                dish_id,
            })
            .await
            .unwrap();
        ctx.clock.advance(Duration::seconds(seconds));
        ctx.service.complete_session(session.id).await.unwrap();

        let user = ctx.service.get_user(user.id).await.unwrap().unwrap();
        totals.push(user.total_training_time);
    }

    assert_eq!(totals, vec![1, 2, 12]);

    let user = ctx.service.get_user(user.id).await.unwrap().unwrap();
    assert_eq!(user.last_trained_dish, Some(tacos.id));
    assert_eq!(user.last_active, ctx.clock.now());
}

#[test_context(StoreContext)]
#[tokio::test]
async fn test_abandoned_time_is_not_counted_by_default(ctx: &mut StoreContext) {
    let restaurant = ctx.restaurant("Noodle bar").await;
    let dish = ctx.dish(restaurant.id, "Ramen", &["Noodles"]).await;
    let user = ctx.waiter(9, None).await;

    let session = ctx
        .service
        .start_session(StartSessionInput {
            user_id: user.id,
            dish_id: dish.id,
        })
        .await
        .unwrap();
    ctx.clock.advance(Duration::minutes(5));
    let abandoned = ctx.service.abandon_session(session.id).await.unwrap();
    assert_eq!(abandoned.score, None);
    assert!(abandoned.aggregated_at.is_none());

    let user = ctx.service.get_user(user.id).await.unwrap().unwrap();
    assert_eq!(user.total_training_time, 0);
    assert_eq!(user.last_trained_dish, None);

    let outcome = ctx.service.reaggregate_session(session.id).await.unwrap();
    assert_eq!(outcome, AggregationOutcome::NotCounted);
}

#[tokio::test]
async fn test_abandoned_time_counts_when_enabled() {
    let ctx = StoreContext::with_policy(TrainingPolicy {
        aggregation: AggregationPolicy {
            count_abandoned_time: true,
        },
        ..Default::default()
    })
    .await;
    let restaurant = ctx.restaurant("Smokehouse").await;
    let dish = ctx.dish(restaurant.id, "Brisket", &["Beef"]).await;
    let user = ctx.waiter(10, None).await;

    let session = ctx
        .service
        .start_session(StartSessionInput {
            user_id: user.id,
            dish_id: dish.id,
        })
        .await
        .unwrap();
    ctx.clock.advance(Duration::seconds(200));
    ctx.service.abandon_session(session.id).await.unwrap();

    let user = ctx.service.get_user(user.id).await.unwrap().unwrap();
    assert_eq!(user.total_training_time, 3);
    assert_eq!(user.last_trained_dish, None);
}

#[test_context(StoreContext)]
#[tokio::test]
async fn test_reaggregation_leaves_totals_unchanged(ctx: &mut StoreContext) {
    let restaurant = ctx.restaurant("Creperie").await;
    let dish = ctx.dish(restaurant.id, "Galette", &["Buckwheat"]).await;
    let user = ctx.waiter(11, None).await;

    let session = ctx
        .service
        .start_session(StartSessionInput {
            user_id: user.id,
            dish_id: dish.id,
        })
        .await
        .unwrap();
    ctx.clock.advance(Duration::minutes(7));
    ctx.service.complete_session(session.id).await.unwrap();
    let before = ctx.service.get_user(user.id).await.unwrap().unwrap();

    for _ in 0..2 {
        let outcome = ctx.service.reaggregate_session(session.id).await.unwrap();
        assert_eq!(outcome, AggregationOutcome::AlreadyAggregated);
    }

    let after = ctx.service.get_user(user.id).await.unwrap().unwrap();
    assert_eq!(after.total_training_time, 7);
    assert_eq!(after.total_training_time, before.total_training_time);
}

#[test_context(StoreContext)]
#[tokio::test]
async fn test_reaggregating_open_session_is_rejected(ctx: &mut StoreContext) {
    let restaurant = ctx.restaurant("Deli").await;
    let dish = ctx.dish(restaurant.id, "Reuben", &["Pastrami"]).await;
    let user = ctx.waiter(12, None).await;

    let session = ctx
        .service
        .start_session(StartSessionInput {
            user_id: user.id,
            dish_id: dish.id,
        })
        .await
        .unwrap();

    let result = ctx.service.reaggregate_session(session.id).await;
    assert!(matches!(
        result,
        Err(CoreError::InvalidState {
            state: SessionState::Open,
            ..
        })
    ));
}

#[test_context(StoreContext)]
#[tokio::test]
async fn test_dish_deletion_keeps_session_history(ctx: &mut StoreContext) {
    let restaurant = ctx.restaurant("Steakhouse").await;
    let dish = ctx.dish(restaurant.id, "Ribeye", &["Beef"]).await;
    let question = ctx.question(dish.id, Difficulty::Hard).await;
    let user = ctx.waiter(13, None).await;

    let session = ctx
        .service
        .start_session(StartSessionInput {
            user_id: user.id,
            dish_id: dish.id,
        })
        .await
        .unwrap();
    answer(ctx, session.id, question.id, 0).await;
    ctx.clock.advance(Duration::minutes(3));
    ctx.service.complete_session(session.id).await.unwrap();

    let report = ctx.service.delete_dish(dish.id).await.unwrap();
    assert_eq!(report.dishes_deleted, 1);
    assert_eq!(report.questions_deleted, 1);
    assert_eq!(report.sessions_detached, 1);
    assert_eq!(report.trained_dish_cleared, 1);

    let stored = ctx.service.get_session(session.id).await.unwrap().unwrap();
    assert_eq!(stored.dish_id, None);
    assert_eq!(stored.score, Some(100));
    assert_eq!(stored.details.answers.len(), 1);

    let user = ctx.service.get_user(user.id).await.unwrap().unwrap();
    assert_eq!(user.last_trained_dish, None);
    assert_eq!(user.total_training_time, 3);
}

#[test_context(StoreContext)]
#[tokio::test]
async fn test_training_stats_summary(ctx: &mut StoreContext) {
    let restaurant = ctx.restaurant("Pizzeria").await;
    let dish = ctx.dish(restaurant.id, "Margherita", &["Mozzarella"]).await;
    let question = ctx.question(dish.id, Difficulty::Easy).await;
    let user = ctx.waiter(14, Some(restaurant.id)).await;
    let start = StartSessionInput {
        user_id: user.id,
        dish_id: dish.id,
    };

    let first = ctx.service.start_session(start.clone()).await.unwrap();
    answer(ctx, first.id, question.id, 0).await;
    ctx.clock.advance(Duration::minutes(4));
    ctx.service.complete_session(first.id).await.unwrap();

    let second = ctx.service.start_session(start.clone()).await.unwrap();
    ctx.clock.advance(Duration::minutes(2));
    ctx.service.abandon_session(second.id).await.unwrap();

    let third = ctx.service.start_session(start).await.unwrap();

    let stats = ctx.service.get_training_stats(user.id).await.unwrap();
    assert_eq!(stats.total_training_time, 4);
    assert_eq!(stats.completed_sessions, 1);
    assert_eq!(stats.abandoned_sessions, 1);
    assert_eq!(stats.open_session, Some(third.id));
    assert_eq!(stats.average_score, Some(100.0));
    assert_eq!(stats.last_trained_dish, Some(dish.id));

    let unknown = ctx.service.get_training_stats(Uuid::new_v4()).await;
    assert!(matches!(unknown, Err(CoreError::NotFound { .. })));
}

#[test_context(StoreContext)]
#[tokio::test]
async fn test_start_requires_known_user_and_dish(ctx: &mut StoreContext) {
    let restaurant = ctx.restaurant("Canteen").await;
    let dish = ctx.dish(restaurant.id, "Stew", &["Beef"]).await;
    let user = ctx.waiter(15, None).await;

    let no_user = ctx
        .service
        .start_session(StartSessionInput {
            user_id: Uuid::new_v4(),
            dish_id: dish.id,
        })
        .await;
    assert!(matches!(no_user, Err(CoreError::Reference { entity: "user", .. })));

    let no_dish = ctx
        .service
        .start_session(StartSessionInput {
            user_id: user.id,
            dish_id: Uuid::new_v4(),
        })
        .await;
    assert!(matches!(no_dish, Err(CoreError::Reference { entity: "dish", .. })));
}

#[test_context(StoreContext)]
#[tokio::test]
async fn test_answer_rejected_when_dish_deleted_before_append(ctx: &mut StoreContext) {
    let restaurant = ctx.restaurant("Seaside").await;
    let dish = ctx.dish(restaurant.id, "Bouillabaisse", &["Saffron"]).await;
    let question = ctx.question(dish.id, Difficulty::Medium).await;
    let user = ctx.waiter(31, None).await;
    let session = ctx
        .service
        .start_session(StartSessionInput {
            user_id: user.id,
            dish_id: dish.id,
        })
        .await
        .unwrap();

    // Built against the question while it still existed.
    let record = AnswerRecord::for_question(&question, 0, ctx.clock.now()).unwrap();
    ctx.service.delete_dish(dish.id).await.unwrap();

    let repository = SqlTrainingSessionRepository::new(ctx.store.get_db());
    let result = repository.append_answer(session.id, record).await;
    assert!(matches!(result, Err(CoreError::Reference { .. })));

    let stored = ctx.service.get_session(session.id).await.unwrap().unwrap();
    assert_eq!(stored.dish_id, None);
    assert!(stored.details.answers.is_empty());
}

#[test_context(StoreContext)]
#[tokio::test]
async fn test_answer_graded_against_current_question(ctx: &mut StoreContext) {
    let restaurant = ctx.restaurant("Steakhouse").await;
    let dish = ctx.dish(restaurant.id, "Ribeye", &["Beef"]).await;
    let question = ctx.question(dish.id, Difficulty::Hard).await;
    let user = ctx.waiter(32, None).await;
    let session = ctx
        .service
        .start_session(StartSessionInput {
            user_id: user.id,
            dish_id: dish.id,
        })
        .await
        .unwrap();

    let record = AnswerRecord::for_question(&question, 0, ctx.clock.now()).unwrap();
    assert!(record.correct);

    ctx.service
        .update_question(UpdateQuestionInput {
            question_id: question.id,
            correct_answer: Some(2),
            ..Default::default()
        })
        .await
        .unwrap();

    let repository = SqlTrainingSessionRepository::new(ctx.store.get_db());
    let updated = repository.append_answer(session.id, record).await.unwrap();
    assert_eq!(updated.details.answers.len(), 1);
    assert!(!updated.details.answers[0].correct);
    assert_eq!(updated.details.answers[0].difficulty, Difficulty::Hard);
}

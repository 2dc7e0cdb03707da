use carefully_core::conversation::TurnRecord;
use carefully_core::scoring::FeedbackRubric;
use carefully_core::session::{STATUS_COMPLETED, STATUS_IN_PROGRESS};
use carefully_db::repositories::{ScenarioRepo, UserRepo, UserScenarioRepo};
use sqlx::PgPool;

fn turn(n: usize) -> TurnRecord {
    TurnRecord {
        user_response: format!("utterance {n}"),
        ai_response: format!("reply {n}"),
        sentiment: "neutral".to_string(),
        feedback: FeedbackRubric {
            empathy: 80,
            tone: 70,
            clarity: 90,
            decision_making: 60,
            overall_score: 75,
            summary: "Steady.".to_string(),
            suggestions: vec!["Name the feeling you heard.".to_string()],
        },
        timestamp: chrono::Utc::now(),
    }
}

/// Full bootstrap test: connect, migrate, verify schema and seed data.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_full_bootstrap(pool: PgPool) {
    carefully_db::health_check(&pool).await.unwrap();

    let scenarios = ScenarioRepo::list(&pool).await.unwrap();
    assert!(
        !scenarios.is_empty(),
        "scenarios should have seed data, got 0 rows"
    );

    // Seed ordering: easiest first.
    assert_eq!(scenarios[0].difficulty, "beginner");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_find_unknown_scenario_is_none(pool: PgPool) {
    let missing = ScenarioRepo::find_by_id(&pool, 999_999).await.unwrap();
    assert!(missing.is_none());
}

/// start -> append x2 -> complete, exercising every mutation path.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_session_lifecycle(pool: PgPool) {
    UserRepo::ensure(&pool, 1).await.unwrap();
    let scenario = ScenarioRepo::list(&pool).await.unwrap().remove(0);

    let session = UserScenarioRepo::start(&pool, 1, scenario.id).await.unwrap();
    assert_eq!(session.status, STATUS_IN_PROGRESS);
    assert_eq!(session.progress, 0);
    assert_eq!(session.turn_count(), 0);

    // Starting again must not lose anything.
    let resumed = UserScenarioRepo::start(&pool, 1, scenario.id).await.unwrap();
    assert_eq!(resumed.id, session.id);
    assert_eq!(resumed.turn_count(), 0);

    let after_one = UserScenarioRepo::append_turn(&pool, session.id, &turn(1), 33)
        .await
        .unwrap()
        .expect("append on in_progress session");
    assert_eq!(after_one.turn_count(), 1);
    assert_eq!(after_one.progress, 33);

    let after_two = UserScenarioRepo::append_turn(&pool, session.id, &turn(2), 67)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(after_two.turn_count(), 2);
    assert_eq!(after_two.rubrics().unwrap().len(), 2);

    let completed = UserScenarioRepo::complete(&pool, 1, scenario.id, 75, Some(12))
        .await
        .unwrap()
        .expect("first completion finalizes");
    assert_eq!(completed.status, STATUS_COMPLETED);
    assert_eq!(completed.progress, 100);
    assert_eq!(completed.score, 75);
    assert_eq!(completed.total_time, 12);
    assert!(completed.completed_at.is_some());

    let user = UserRepo::find_by_id(&pool, 1).await.unwrap().unwrap();
    assert_eq!(user.total_scenarios, 1);
    assert_eq!(user.total_time_minutes, 12);
}

/// Completing twice must not double-increment the rollup.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_complete_is_idempotent(pool: PgPool) {
    UserRepo::ensure(&pool, 7).await.unwrap();
    let scenario = ScenarioRepo::list(&pool).await.unwrap().remove(0);
    UserScenarioRepo::start(&pool, 7, scenario.id).await.unwrap();

    let first = UserScenarioRepo::complete(&pool, 7, scenario.id, 50, Some(5))
        .await
        .unwrap();
    assert!(first.is_some());

    let second = UserScenarioRepo::complete(&pool, 7, scenario.id, 99, Some(5))
        .await
        .unwrap();
    assert!(second.is_none(), "guard must block re-completion");

    let user = UserRepo::find_by_id(&pool, 7).await.unwrap().unwrap();
    assert_eq!(user.total_scenarios, 1);
    assert_eq!(user.total_time_minutes, 5);

    // The stored score is the first completion's, untouched.
    let session = UserScenarioRepo::find_by_user_and_scenario(&pool, 7, scenario.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(session.score, 50);
}

/// Turns must not append to completed sessions.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_append_blocked_after_completion(pool: PgPool) {
    UserRepo::ensure(&pool, 3).await.unwrap();
    let scenario = ScenarioRepo::list(&pool).await.unwrap().remove(0);
    let session = UserScenarioRepo::start(&pool, 3, scenario.id).await.unwrap();

    UserScenarioRepo::complete(&pool, 3, scenario.id, 80, None)
        .await
        .unwrap();

    let appended = UserScenarioRepo::append_turn(&pool, session.id, &turn(1), 33)
        .await
        .unwrap();
    assert!(appended.is_none());

    // start() on a completed session returns it unchanged.
    let after_start = UserScenarioRepo::start(&pool, 3, scenario.id).await.unwrap();
    assert_eq!(after_start.status, STATUS_COMPLETED);
    assert_eq!(after_start.score, 80);
}

use chrono::{DateTime, FixedOffset, NaiveTime, TimeDelta, TimeZone, Utc};

use crate::domain::{
    common::CoreError,
    schedule::{
        calendar::DEFAULT_LOOKBACK_DAYS,
        entities::{
            DayOfWeek, InsertRecurringWorkoutInput, InsertScheduledWorkoutInput,
            ScheduledWorkoutId, UpdateScheduledWorkoutInput, WorkoutCompletion, WorkoutFavourite,
        },
        ports::ScheduleService,
    },
    test::{MockHarness, MockService, mock_service},
    user::{
        entities::{InsertUserInput, UserId},
        ports::UserService,
    },
    workout::{
        entities::{InsertWorkoutInput, WorkoutId, WorkoutType},
        ports::WorkoutService,
    },
};

struct Fixture {
    harness: MockHarness,
    user_id: UserId,
    strength: WorkoutId,
    cardio: WorkoutId,
}

async fn create_workout(
    service: &MockService,
    user_id: UserId,
    title: &str,
    workout_type: WorkoutType,
) -> WorkoutId {
    service
        .create_workout(InsertWorkoutInput {
            title: title.to_string(),
            description: None,
            duration: 45,
            workout_type,
            user_id,
            exercises: vec![],
        })
        .await
        .expect("create_workout returned an error")
        .id
}

async fn fixture() -> Fixture {
    let harness = mock_service();
    let user_id = harness
        .service
        .create_user(InsertUserInput {
            username: "vera".to_string(),
        })
        .await
        .expect("create_user returned an error")
        .id;
    let strength = create_workout(&harness.service, user_id, "Squats", WorkoutType::Strength).await;
    let cardio = create_workout(&harness.service, user_id, "Intervals", WorkoutType::Cardio).await;

    Fixture {
        harness,
        user_id,
        strength,
        cardio,
    }
}

fn utc(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, h, min, 0).unwrap()
}

async fn schedule_at(
    fixture: &Fixture,
    workout_id: WorkoutId,
    scheduled_at: DateTime<Utc>,
) -> ScheduledWorkoutId {
    fixture
        .harness
        .service
        .schedule_workout(InsertScheduledWorkoutInput {
            user_id: fixture.user_id,
            workout_id,
            scheduled_at,
        })
        .await
        .expect("schedule_workout returned an error")
}

// == Single Schedule Tests ==

#[tokio::test]
async fn test_schedule_workout_success() -> Result<(), Box<dyn std::error::Error>> {
    let fixture = fixture().await;
    let at = utc(2024, 3, 11, 7, 30);

    let id = schedule_at(&fixture, fixture.strength, at).await;

    let scheduled = fixture
        .harness
        .service
        .list_scheduled_workouts(&fixture.user_id)
        .await?;
    assert_eq!(scheduled.len(), 1);
    assert_eq!(scheduled[0].id, id);
    assert_eq!(scheduled[0].workout_title, "Squats");
    assert_eq!(scheduled[0].workout_type, WorkoutType::Strength);
    assert_eq!(scheduled[0].scheduled_at, at);
    assert!(!scheduled[0].completed);

    Ok(())
}

#[tokio::test]
async fn test_schedule_workout_fail_user_checked_first() -> Result<(), Box<dyn std::error::Error>>
{
    let harness = mock_service();

    let result = harness
        .service
        .schedule_workout(InsertScheduledWorkoutInput {
            user_id: UserId(11),
            workout_id: WorkoutId(12),
            scheduled_at: Utc::now(),
        })
        .await;

    assert_eq!(result, Err(CoreError::UserNotFound { id: UserId(11) }));

    Ok(())
}

#[tokio::test]
async fn test_schedule_workout_fail_unknown_workout() -> Result<(), Box<dyn std::error::Error>> {
    let fixture = fixture().await;

    let result = fixture
        .harness
        .service
        .schedule_workout(InsertScheduledWorkoutInput {
            user_id: fixture.user_id,
            workout_id: WorkoutId(500),
            scheduled_at: Utc::now(),
        })
        .await;

    assert_eq!(result, Err(CoreError::WorkoutNotFound { id: WorkoutId(500) }));

    Ok(())
}

// == Calendar View Tests ==

#[tokio::test]
async fn test_scheduled_workouts_for_date_uses_caller_offset()
-> Result<(), Box<dyn std::error::Error>> {
    let fixture = fixture().await;
    // 00:30 on the 11th in UTC+2
    let inside = schedule_at(&fixture, fixture.strength, utc(2024, 3, 10, 22, 30)).await;
    // 00:30 on the 12th in UTC+2
    schedule_at(&fixture, fixture.cardio, utc(2024, 3, 11, 22, 30)).await;

    let date = FixedOffset::east_opt(2 * 3600)
        .unwrap()
        .with_ymd_and_hms(2024, 3, 11, 8, 0, 0)
        .unwrap();
    let found = fixture
        .harness
        .service
        .scheduled_workouts_for_date(&fixture.user_id, date)
        .await?;

    assert_eq!(found.len(), 1);
    assert_eq!(found[0].id, inside);

    Ok(())
}

#[tokio::test]
async fn test_scheduled_workouts_for_week_spans_monday_to_sunday()
-> Result<(), Box<dyn std::error::Error>> {
    let fixture = fixture().await;
    let monday = schedule_at(&fixture, fixture.strength, utc(2024, 3, 11, 0, 0)).await;
    let sunday = schedule_at(&fixture, fixture.cardio, utc(2024, 3, 17, 23, 59)).await;
    schedule_at(&fixture, fixture.cardio, utc(2024, 3, 10, 23, 59)).await;
    schedule_at(&fixture, fixture.strength, utc(2024, 3, 18, 0, 0)).await;

    let wednesday = Utc.with_ymd_and_hms(2024, 3, 13, 12, 0, 0).unwrap().fixed_offset();
    let found = fixture
        .harness
        .service
        .scheduled_workouts_for_week(&fixture.user_id, wednesday)
        .await?;

    let ids: Vec<ScheduledWorkoutId> = found.iter().map(|w| w.id).collect();
    assert_eq!(ids, vec![monday, sunday]);

    Ok(())
}

// == Recurring Workout Tests ==

#[tokio::test]
async fn test_schedule_recurring_workout_expands_twelve_weeks()
-> Result<(), Box<dyn std::error::Error>> {
    let fixture = fixture().await;
    let time_of_day = NaiveTime::from_hms_opt(6, 15, 0).unwrap();

    let ids = fixture
        .harness
        .service
        .schedule_recurring_workout(InsertRecurringWorkoutInput {
            user_id: fixture.user_id,
            workout_id: fixture.strength,
            days_of_week: vec![DayOfWeek::Friday, DayOfWeek::Monday, DayOfWeek::Friday],
            time_of_day,
        })
        .await?;

    // 13 Mondays and 12 Fridays
    assert_eq!(ids.len(), 25);

    let scheduled = fixture
        .harness
        .service
        .list_scheduled_workouts(&fixture.user_id)
        .await?;
    assert_eq!(scheduled.len(), 25);
    assert!(scheduled.iter().all(|w| w.scheduled_at.time() == time_of_day));
    assert!(scheduled.iter().all(|w| !w.completed));

    let templates = fixture
        .harness
        .service
        .recurring_workouts(&fixture.user_id)
        .await?;
    assert_eq!(templates.len(), 1);
    assert_eq!(
        templates[0].days_of_week,
        vec![DayOfWeek::Monday, DayOfWeek::Friday]
    );
    assert_eq!(templates[0].workout_id, fixture.strength);

    Ok(())
}

#[tokio::test]
async fn test_schedule_recurring_workout_fail_no_days() -> Result<(), Box<dyn std::error::Error>> {
    let fixture = fixture().await;

    let result = fixture
        .harness
        .service
        .schedule_recurring_workout(InsertRecurringWorkoutInput {
            user_id: fixture.user_id,
            workout_id: fixture.cardio,
            days_of_week: vec![],
            time_of_day: NaiveTime::MIN,
        })
        .await;

    assert_eq!(result, Err(CoreError::EmptyRecurringDays));
    assert!(
        fixture
            .harness
            .service
            .recurring_workouts(&fixture.user_id)
            .await?
            .is_empty()
    );

    Ok(())
}

#[tokio::test]
async fn test_schedule_recurring_workout_fail_unknown_user() -> Result<(), Box<dyn std::error::Error>>
{
    let harness = mock_service();

    let result = harness
        .service
        .schedule_recurring_workout(InsertRecurringWorkoutInput {
            user_id: UserId(3),
            workout_id: WorkoutId(3),
            days_of_week: vec![DayOfWeek::Sunday],
            time_of_day: NaiveTime::MIN,
        })
        .await;

    assert_eq!(result, Err(CoreError::UserNotFound { id: UserId(3) }));

    Ok(())
}

#[tokio::test]
async fn test_schedule_recurring_workout_rolls_back_template_on_insert_failure()
-> Result<(), Box<dyn std::error::Error>> {
    let fixture = fixture().await;
    fixture.harness.scheduled.fail_bulk_inserts(true);

    let result = fixture
        .harness
        .service
        .schedule_recurring_workout(InsertRecurringWorkoutInput {
            user_id: fixture.user_id,
            workout_id: fixture.cardio,
            days_of_week: vec![DayOfWeek::Tuesday],
            time_of_day: NaiveTime::from_hms_opt(18, 0, 0).unwrap(),
        })
        .await;

    assert!(matches!(result, Err(CoreError::DatabaseError { .. })));
    assert!(
        fixture
            .harness
            .service
            .recurring_workouts(&fixture.user_id)
            .await?
            .is_empty()
    );
    assert!(
        fixture
            .harness
            .service
            .list_scheduled_workouts(&fixture.user_id)
            .await?
            .is_empty()
    );

    fixture.harness.scheduled.fail_bulk_inserts(false);
    let ids = fixture
        .harness
        .service
        .schedule_recurring_workout(InsertRecurringWorkoutInput {
            user_id: fixture.user_id,
            workout_id: fixture.cardio,
            days_of_week: vec![DayOfWeek::Tuesday],
            time_of_day: NaiveTime::from_hms_opt(18, 0, 0).unwrap(),
        })
        .await?;
    assert!(!ids.is_empty());
    assert_eq!(
        fixture
            .harness
            .service
            .recurring_workouts(&fixture.user_id)
            .await?
            .len(),
        1
    );

    Ok(())
}

// == Statistics Tests ==

#[tokio::test]
async fn test_workout_completion_counts_lookback_window() -> Result<(), Box<dyn std::error::Error>>
{
    let fixture = fixture().await;
    let now = Utc::now();

    let done_1 = schedule_at(&fixture, fixture.strength, now - TimeDelta::days(1)).await;
    let done_2 = schedule_at(&fixture, fixture.cardio, now - TimeDelta::days(2)).await;
    schedule_at(&fixture, fixture.cardio, now - TimeDelta::days(3)).await;
    let ancient = schedule_at(&fixture, fixture.strength, now - TimeDelta::days(200)).await;
    fixture.harness.scheduled.set_completed(&done_1, true);
    fixture.harness.scheduled.set_completed(&done_2, true);
    fixture.harness.scheduled.set_completed(&ancient, true);

    let completion = fixture
        .harness
        .service
        .workout_completion(&fixture.user_id, DEFAULT_LOOKBACK_DAYS)
        .await?;

    assert_eq!(
        completion,
        WorkoutCompletion {
            complete: 2,
            incomplete: 1,
            percentage: 67,
        }
    );

    Ok(())
}

#[tokio::test]
async fn test_workout_completion_empty_is_zero() -> Result<(), Box<dyn std::error::Error>> {
    let fixture = fixture().await;

    let completion = fixture
        .harness
        .service
        .workout_completion(&fixture.user_id, DEFAULT_LOOKBACK_DAYS)
        .await?;

    assert_eq!(completion, WorkoutCompletion::default());

    Ok(())
}

#[tokio::test]
async fn test_workout_completion_fail_negative_lookback() -> Result<(), Box<dyn std::error::Error>>
{
    let fixture = fixture().await;

    let result = fixture
        .harness
        .service
        .workout_completion(&fixture.user_id, -1)
        .await;

    assert_eq!(result, Err(CoreError::InvalidLookback { days: -1 }));

    Ok(())
}

#[tokio::test]
async fn test_workout_favourite_counts_completed_only() -> Result<(), Box<dyn std::error::Error>> {
    let fixture = fixture().await;
    let now = Utc::now();

    let a = schedule_at(&fixture, fixture.strength, now - TimeDelta::days(1)).await;
    let b = schedule_at(&fixture, fixture.strength, now - TimeDelta::days(8)).await;
    schedule_at(&fixture, fixture.cardio, now - TimeDelta::days(2)).await;
    fixture.harness.scheduled.set_completed(&a, true);
    fixture.harness.scheduled.set_completed(&b, true);

    let favourite = fixture
        .harness
        .service
        .workout_favourite(&fixture.user_id)
        .await?;

    assert_eq!(
        favourite,
        WorkoutFavourite {
            strength: 2,
            cardio: 0,
            mobility: 0,
        }
    );

    Ok(())
}

// == Update / Delete Tests ==

#[tokio::test]
async fn test_update_scheduled_workout_patches_fields() -> Result<(), Box<dyn std::error::Error>> {
    let fixture = fixture().await;
    let id = schedule_at(&fixture, fixture.cardio, utc(2024, 5, 1, 18, 0)).await;

    let completed = fixture
        .harness
        .service
        .update_scheduled_workout(UpdateScheduledWorkoutInput {
            id,
            scheduled_at: None,
            completed: Some(true),
        })
        .await?;
    assert!(completed.completed);
    assert_eq!(completed.scheduled_at, utc(2024, 5, 1, 18, 0));
    assert!(completed.updated_at.is_some());

    let moved = fixture
        .harness
        .service
        .update_scheduled_workout(UpdateScheduledWorkoutInput {
            id,
            scheduled_at: Some(utc(2024, 5, 2, 18, 0)),
            completed: None,
        })
        .await?;
    assert!(moved.completed);
    assert_eq!(moved.scheduled_at, utc(2024, 5, 2, 18, 0));

    Ok(())
}

#[tokio::test]
async fn test_update_scheduled_workout_fail_not_found() -> Result<(), Box<dyn std::error::Error>> {
    let fixture = fixture().await;

    let err = fixture
        .harness
        .service
        .update_scheduled_workout(UpdateScheduledWorkoutInput {
            id: ScheduledWorkoutId(9),
            scheduled_at: None,
            completed: Some(true),
        })
        .await
        .expect_err("missing scheduled workout should fail");

    assert_eq!(err.to_string(), "Scheduled workout not found with id: 9");

    Ok(())
}

#[tokio::test]
async fn test_delete_scheduled_workout() -> Result<(), Box<dyn std::error::Error>> {
    let fixture = fixture().await;
    let id = schedule_at(&fixture, fixture.strength, utc(2024, 6, 1, 9, 0)).await;

    fixture.harness.service.delete_scheduled_workout(&id).await?;

    assert!(
        fixture
            .harness
            .service
            .list_scheduled_workouts(&fixture.user_id)
            .await?
            .is_empty()
    );
    assert_eq!(
        fixture.harness.service.delete_scheduled_workout(&id).await,
        Err(CoreError::ScheduledWorkoutNotFound { id })
    );

    Ok(())
}

use chrono::{NaiveTime, TimeDelta, Utc};

use crate::domain::{
    common::CoreError,
    exercise::{
        entities::{ExerciseId, InsertExerciseInput, MuscleGroup},
        ports::ExerciseService,
    },
    schedule::{
        entities::{
            DayOfWeek, InsertRecurringWorkoutInput, InsertScheduledWorkoutInput, WorkoutFavourite,
        },
        ports::ScheduleService,
    },
    test::{MockService, mock_service},
    user::{
        entities::{InsertUserInput, UserId},
        ports::UserService,
    },
    workout::{
        entities::{
            InsertWorkoutInput, UpdateWorkoutInput, WorkoutExerciseInput, WorkoutId, WorkoutType,
        },
        ports::WorkoutService,
    },
};

async fn create_user(service: &MockService, username: &str) -> UserId {
    service
        .create_user(InsertUserInput {
            username: username.to_string(),
        })
        .await
        .expect("create_user returned an error")
        .id
}

async fn create_exercise(service: &MockService, title: &str) -> ExerciseId {
    service
        .create_exercise(InsertExerciseInput {
            title: title.to_string(),
            description: None,
            exercise_difficulty: None,
            video_guide: None,
            muscle_groups: vec![MuscleGroup::FullBody],
        })
        .await
        .expect("create_exercise returned an error")
        .id
}

fn entry(exercise_id: Option<ExerciseId>, sets: i32) -> WorkoutExerciseInput {
    WorkoutExerciseInput {
        exercise_id,
        sets,
        repetitions: 10,
        weight: 42.5,
        duration: 0,
        rest_time: 90,
    }
}

fn workout(
    title: &str,
    workout_type: WorkoutType,
    user_id: UserId,
    exercises: Vec<WorkoutExerciseInput>,
) -> InsertWorkoutInput {
    InsertWorkoutInput {
        title: title.to_string(),
        description: Some("Leg day".to_string()),
        duration: 60,
        workout_type,
        user_id,
        exercises,
    }
}

// == Create Workout Tests ==

#[tokio::test]
async fn test_create_workout_success() -> Result<(), Box<dyn std::error::Error>> {
    let harness = mock_service();
    let user_id = create_user(&harness.service, "lena").await;
    let squat = create_exercise(&harness.service, "Squat").await;

    let created = harness
        .service
        .create_workout(workout(
            "Legs",
            WorkoutType::Strength,
            user_id,
            vec![entry(Some(squat), 5)],
        ))
        .await?;

    assert_eq!(created.title, "Legs");
    assert_eq!(created.user_id, Some(user_id));
    assert_eq!(created.exercises.len(), 1);
    assert_eq!(created.exercises[0].exercise_id, Some(squat));
    assert_eq!(created.exercises[0].workout_id, created.id);
    assert_eq!(created.exercises[0].sets, 5);

    Ok(())
}

#[tokio::test]
async fn test_create_workout_clears_unknown_exercise() -> Result<(), Box<dyn std::error::Error>> {
    let harness = mock_service();
    let user_id = create_user(&harness.service, "milo").await;

    let created = harness
        .service
        .create_workout(workout(
            "Mystery",
            WorkoutType::Cardio,
            user_id,
            vec![entry(Some(ExerciseId(999)), 3)],
        ))
        .await?;

    assert_eq!(created.exercises.len(), 1);
    assert_eq!(created.exercises[0].exercise_id, None);
    assert_eq!(created.exercises[0].sets, 3);

    Ok(())
}

#[tokio::test]
async fn test_create_workout_fail_unknown_user() -> Result<(), Box<dyn std::error::Error>> {
    let harness = mock_service();

    let result = harness
        .service
        .create_workout(workout("Legs", WorkoutType::Strength, UserId(5), vec![]))
        .await;

    assert_eq!(result, Err(CoreError::UserNotFound { id: UserId(5) }));
    assert!(harness.service.list_workouts().await?.is_empty());

    Ok(())
}

#[tokio::test]
async fn test_create_workout_fail_blank_title() -> Result<(), Box<dyn std::error::Error>> {
    let harness = mock_service();
    let user_id = create_user(&harness.service, "nora").await;

    let result = harness
        .service
        .create_workout(workout("", WorkoutType::Mobility, user_id, vec![]))
        .await;

    assert_eq!(result, Err(CoreError::InvalidWorkoutTitle));

    Ok(())
}

// == Read Workout Tests ==

#[tokio::test]
async fn test_get_workout_includes_owner() -> Result<(), Box<dyn std::error::Error>> {
    let harness = mock_service();
    let user_id = create_user(&harness.service, "oscar").await;
    let created = harness
        .service
        .create_workout(workout("Run", WorkoutType::Cardio, user_id, vec![]))
        .await?;

    let details = harness.service.get_workout(&created.id).await?;

    assert_eq!(details.id, created.id);
    let owner = details.user.expect("Expected an owner summary");
    assert_eq!(owner.id, user_id);
    assert_eq!(owner.username, "oscar");

    Ok(())
}

#[tokio::test]
async fn test_get_workout_fail_not_found() -> Result<(), Box<dyn std::error::Error>> {
    let harness = mock_service();

    let err = harness
        .service
        .get_workout(&WorkoutId(8))
        .await
        .expect_err("missing workout should fail");

    assert_eq!(err, CoreError::WorkoutNotFound { id: WorkoutId(8) });
    assert_eq!(err.to_string(), "Workout with id: 8 does not exist");

    Ok(())
}

#[tokio::test]
async fn test_list_workouts_by_user_and_type() -> Result<(), Box<dyn std::error::Error>> {
    let harness = mock_service();
    let paula = create_user(&harness.service, "paula").await;
    let quinn = create_user(&harness.service, "quinn").await;

    harness
        .service
        .create_workout(workout("Deadlift", WorkoutType::Strength, paula, vec![]))
        .await?;
    harness
        .service
        .create_workout(workout("Row", WorkoutType::Cardio, paula, vec![]))
        .await?;
    harness
        .service
        .create_workout(workout("Yoga", WorkoutType::Mobility, quinn, vec![]))
        .await?;

    let by_user = harness.service.list_workouts_by_user(&paula).await?;
    assert_eq!(by_user.len(), 2);

    let strength = harness
        .service
        .list_workouts_by_type(&paula, WorkoutType::Strength)
        .await?;
    assert_eq!(strength.len(), 1);
    assert_eq!(strength[0].title, "Deadlift");

    let none = harness
        .service
        .list_workouts_by_type(&quinn, WorkoutType::Cardio)
        .await?;
    assert!(none.is_empty());

    assert_eq!(harness.service.list_workouts().await?.len(), 3);

    Ok(())
}

#[tokio::test]
async fn test_workout_types() {
    let harness = mock_service();

    assert_eq!(
        harness.service.workout_types(),
        vec![
            WorkoutType::Strength,
            WorkoutType::Cardio,
            WorkoutType::Mobility
        ]
    );
}

// == Update Workout Tests ==

#[tokio::test]
async fn test_update_workout_keeps_blank_fields() -> Result<(), Box<dyn std::error::Error>> {
    let harness = mock_service();
    let user_id = create_user(&harness.service, "rita").await;
    let created = harness
        .service
        .create_workout(workout("Swim", WorkoutType::Cardio, user_id, vec![]))
        .await?;

    let updated = harness
        .service
        .update_workout(UpdateWorkoutInput {
            id: created.id,
            title: Some("Open water swim".to_string()),
            description: Some("   ".to_string()),
            user_id,
        })
        .await?;

    assert_eq!(updated.title, "Open water swim");
    assert_eq!(updated.description, Some("Leg day".to_string()));

    Ok(())
}

#[tokio::test]
async fn test_update_workout_fail_workout_checked_before_user()
-> Result<(), Box<dyn std::error::Error>> {
    let harness = mock_service();

    let result = harness
        .service
        .update_workout(UpdateWorkoutInput {
            id: WorkoutId(4),
            title: None,
            description: None,
            user_id: UserId(4),
        })
        .await;

    assert_eq!(result, Err(CoreError::WorkoutNotFound { id: WorkoutId(4) }));

    Ok(())
}

#[tokio::test]
async fn test_update_workout_fail_unknown_user() -> Result<(), Box<dyn std::error::Error>> {
    let harness = mock_service();
    let user_id = create_user(&harness.service, "sam").await;
    let created = harness
        .service
        .create_workout(workout("Bike", WorkoutType::Cardio, user_id, vec![]))
        .await?;

    let result = harness
        .service
        .update_workout(UpdateWorkoutInput {
            id: created.id,
            title: None,
            description: None,
            user_id: UserId(77),
        })
        .await;

    assert_eq!(result, Err(CoreError::UserNotFound { id: UserId(77) }));

    Ok(())
}

// == Delete Workout Tests ==

#[tokio::test]
async fn test_delete_workout_exercise() -> Result<(), Box<dyn std::error::Error>> {
    let harness = mock_service();
    let user_id = create_user(&harness.service, "tess").await;
    let lunge = create_exercise(&harness.service, "Lunge").await;
    let created = harness
        .service
        .create_workout(workout(
            "Legs",
            WorkoutType::Strength,
            user_id,
            vec![entry(Some(lunge), 3)],
        ))
        .await?;

    harness
        .service
        .delete_workout_exercise(&created.id, &lunge)
        .await?;

    let details = harness.service.get_workout(&created.id).await?;
    assert!(details.exercises.is_empty());

    let err = harness
        .service
        .delete_workout_exercise(&created.id, &lunge)
        .await
        .expect_err("second delete should fail");
    assert_eq!(
        err,
        CoreError::WorkoutExerciseNotFound {
            workout_id: created.id,
            exercise_id: lunge,
        }
    );

    Ok(())
}

#[tokio::test]
async fn test_delete_workout() -> Result<(), Box<dyn std::error::Error>> {
    let harness = mock_service();
    let user_id = create_user(&harness.service, "uma").await;
    let created = harness
        .service
        .create_workout(workout("Stretch", WorkoutType::Mobility, user_id, vec![]))
        .await?;

    harness.service.delete_workout(&created.id).await?;

    assert_eq!(
        harness.service.get_workout(&created.id).await.map(|_| ()),
        Err(CoreError::WorkoutNotFound { id: created.id })
    );
    assert_eq!(
        harness.service.delete_workout(&created.id).await,
        Err(CoreError::WorkoutNotFound { id: created.id })
    );

    Ok(())
}

#[tokio::test]
async fn test_delete_workout_cascades_schedule() -> Result<(), Box<dyn std::error::Error>> {
    let harness = mock_service();
    let user_id = create_user(&harness.service, "omar").await;
    let stretch = harness
        .service
        .create_workout(workout("Stretch", WorkoutType::Mobility, user_id, vec![]))
        .await?;
    let run = harness
        .service
        .create_workout(workout("Run", WorkoutType::Cardio, user_id, vec![]))
        .await?;

    let done = harness
        .service
        .schedule_workout(InsertScheduledWorkoutInput {
            user_id,
            workout_id: stretch.id,
            scheduled_at: Utc::now() - TimeDelta::days(1),
        })
        .await?;
    harness.scheduled.set_completed(&done, true);
    harness
        .service
        .schedule_recurring_workout(InsertRecurringWorkoutInput {
            user_id,
            workout_id: stretch.id,
            days_of_week: vec![DayOfWeek::Wednesday],
            time_of_day: NaiveTime::from_hms_opt(7, 0, 0).unwrap(),
        })
        .await?;
    let kept = harness
        .service
        .schedule_workout(InsertScheduledWorkoutInput {
            user_id,
            workout_id: run.id,
            scheduled_at: Utc::now() + TimeDelta::days(1),
        })
        .await?;

    harness.service.delete_workout(&stretch.id).await?;

    let remaining = harness.service.list_scheduled_workouts(&user_id).await?;
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].id, kept);
    assert_eq!(
        harness.service.workout_favourite(&user_id).await?,
        WorkoutFavourite::default()
    );
    assert!(harness.service.recurring_workouts(&user_id).await?.is_empty());
    assert_eq!(
        harness.service.delete_scheduled_workout(&done).await,
        Err(CoreError::ScheduledWorkoutNotFound { id: done })
    );

    Ok(())
}

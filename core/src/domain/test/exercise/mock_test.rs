use crate::domain::{
    common::CoreError,
    exercise::{
        entities::{ExerciseDifficulty, ExerciseId, InsertExerciseInput, MuscleGroup},
        ports::ExerciseService,
    },
    test::mock_service,
};

fn exercise(title: &str, muscle_groups: Vec<MuscleGroup>) -> InsertExerciseInput {
    InsertExerciseInput {
        title: title.to_string(),
        description: Some(format!("How to do a {title}")),
        exercise_difficulty: Some(ExerciseDifficulty::Intermediate),
        video_guide: None,
        muscle_groups,
    }
}

#[tokio::test]
async fn test_create_exercise_normalises_muscle_groups() -> Result<(), Box<dyn std::error::Error>>
{
    let harness = mock_service();

    let created = harness
        .service
        .create_exercise(exercise(
            "Bench Press",
            vec![
                MuscleGroup::Triceps,
                MuscleGroup::Chest,
                MuscleGroup::Triceps,
            ],
        ))
        .await?;

    assert_eq!(
        created.muscle_groups,
        vec![MuscleGroup::Chest, MuscleGroup::Triceps]
    );

    let fetched = harness.service.get_exercise(&created.id).await?;
    assert_eq!(fetched, created);

    Ok(())
}

#[tokio::test]
async fn test_create_exercise_fail_blank_title() -> Result<(), Box<dyn std::error::Error>> {
    let harness = mock_service();

    let result = harness
        .service
        .create_exercise(exercise(" ", vec![MuscleGroup::Abs]))
        .await;

    assert_eq!(result, Err(CoreError::InvalidExerciseTitle));

    Ok(())
}

#[tokio::test]
async fn test_get_exercise_fail_not_found() -> Result<(), Box<dyn std::error::Error>> {
    let harness = mock_service();

    let result = harness.service.get_exercise(&ExerciseId(3)).await;

    assert_eq!(result, Err(CoreError::ExerciseNotFound { id: ExerciseId(3) }));

    Ok(())
}

#[tokio::test]
async fn test_muscle_groups_lists_every_group() {
    let harness = mock_service();

    let groups = harness.service.muscle_groups();

    assert_eq!(groups.len(), 13);
    assert_eq!(groups.first(), Some(&MuscleGroup::Chest));
    assert_eq!(groups.last(), Some(&MuscleGroup::FullBody));
}

#[tokio::test]
async fn test_list_by_muscle_group_keeps_all_groups() -> Result<(), Box<dyn std::error::Error>> {
    let harness = mock_service();
    let squat = harness
        .service
        .create_exercise(exercise(
            "Squat",
            vec![MuscleGroup::Quadriceps, MuscleGroup::Glutes],
        ))
        .await?;
    harness
        .service
        .create_exercise(exercise("Curl", vec![MuscleGroup::Biceps]))
        .await?;

    let found = harness
        .service
        .list_by_muscle_group(MuscleGroup::Glutes)
        .await?;

    assert_eq!(found.len(), 1);
    assert_eq!(found[0].id, squat.id);
    assert_eq!(
        found[0].muscle_groups,
        vec![MuscleGroup::Quadriceps, MuscleGroup::Glutes]
    );

    Ok(())
}

#[tokio::test]
async fn test_search_by_title_is_case_insensitive() -> Result<(), Box<dyn std::error::Error>> {
    let harness = mock_service();
    harness
        .service
        .create_exercise(exercise("Push Up", vec![MuscleGroup::Chest]))
        .await?;
    harness
        .service
        .create_exercise(exercise("Pull Up", vec![MuscleGroup::Back]))
        .await?;
    harness
        .service
        .create_exercise(exercise("Plank", vec![MuscleGroup::Abs]))
        .await?;

    let found = harness.service.search_by_title("  UP ").await?;
    let titles: Vec<&str> = found.iter().map(|e| e.title.as_str()).collect();

    assert_eq!(titles, vec!["Push Up", "Pull Up"]);
    assert!(harness.service.search_by_title("deadlift").await?.is_empty());

    Ok(())
}

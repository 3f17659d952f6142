use std::collections::HashSet;

use tracing::{debug, info};

use crate::domain::{
    common::{CoreError, services::Service},
    exercise::{entities::ExerciseId, ports::ExerciseRepository},
    health::port::HealthRepository,
    schedule::ports::{RecurringWorkoutRepository, ScheduledWorkoutRepository},
    user::{
        entities::{UserId, UserSummary},
        ports::UserRepository,
    },
    workout::{
        entities::{
            InsertWorkoutInput, UpdateWorkoutInput, Workout, WorkoutDetails, WorkoutId,
            WorkoutType,
        },
        ports::{WorkoutRepository, WorkoutService},
    },
};

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

impl<U, W, E, S, R, H> WorkoutService for Service<U, W, E, S, R, H>
where
    U: UserRepository,
    W: WorkoutRepository,
    E: ExerciseRepository,
    S: ScheduledWorkoutRepository,
    R: RecurringWorkoutRepository,
    H: HealthRepository,
{
    async fn get_workout(&self, id: &WorkoutId) -> Result<WorkoutDetails, CoreError> {
        let workout = self
            .workout_repository
            .find_by_id(id)
            .await?
            .ok_or(CoreError::WorkoutNotFound { id: *id })?;

        let owner = match workout.user_id {
            Some(user_id) => self
                .user_repository
                .find_by_id(&user_id)
                .await?
                .map(UserSummary::from),
            None => None,
        };

        Ok(WorkoutDetails::new(workout, owner))
    }

    async fn list_workouts(&self) -> Result<Vec<Workout>, CoreError> {
        self.workout_repository.list().await
    }

    async fn list_workouts_by_user(&self, user_id: &UserId) -> Result<Vec<Workout>, CoreError> {
        self.workout_repository.list_by_user(user_id).await
    }

    async fn list_workouts_by_type(
        &self,
        user_id: &UserId,
        workout_type: WorkoutType,
    ) -> Result<Vec<Workout>, CoreError> {
        self.workout_repository
            .list_by_user_and_type(user_id, workout_type)
            .await
    }

    fn workout_types(&self) -> Vec<WorkoutType> {
        WorkoutType::ALL.to_vec()
    }

    async fn create_workout(&self, mut input: InsertWorkoutInput) -> Result<Workout, CoreError> {
        if input.title.trim().is_empty() {
            return Err(CoreError::InvalidWorkoutTitle);
        }

        if self
            .user_repository
            .find_by_id(&input.user_id)
            .await?
            .is_none()
        {
            return Err(CoreError::UserNotFound { id: input.user_id });
        }

        let requested: Vec<ExerciseId> = input
            .exercises
            .iter()
            .filter_map(|entry| entry.exercise_id)
            .collect();

        if !requested.is_empty() {
            let known: HashSet<ExerciseId> = self
                .exercise_repository
                .find_by_ids(&requested)
                .await?
                .into_iter()
                .map(|exercise| exercise.id)
                .collect();

            for entry in input.exercises.iter_mut() {
                if let Some(exercise_id) = entry.exercise_id {
                    if !known.contains(&exercise_id) {
                        debug!(%exercise_id, "dropping reference to unknown exercise");
                        entry.exercise_id = None;
                    }
                }
            }
        }

        let workout = self.workout_repository.insert(input).await?;
        info!(workout_id = %workout.id, "workout created");

        Ok(workout)
    }

    async fn update_workout(&self, input: UpdateWorkoutInput) -> Result<Workout, CoreError> {
        if self
            .workout_repository
            .find_by_id(&input.id)
            .await?
            .is_none()
        {
            return Err(CoreError::WorkoutNotFound { id: input.id });
        }

        if self
            .user_repository
            .find_by_id(&input.user_id)
            .await?
            .is_none()
        {
            return Err(CoreError::UserNotFound { id: input.user_id });
        }

        let input = UpdateWorkoutInput {
            title: non_blank(input.title),
            description: non_blank(input.description),
            ..input
        };

        self.workout_repository.update(input).await
    }

    async fn delete_workout_exercise(
        &self,
        workout_id: &WorkoutId,
        exercise_id: &ExerciseId,
    ) -> Result<(), CoreError> {
        self.workout_repository
            .delete_exercise(workout_id, exercise_id)
            .await
    }

    async fn delete_workout(&self, id: &WorkoutId) -> Result<(), CoreError> {
        if self.workout_repository.find_by_id(id).await?.is_none() {
            return Err(CoreError::WorkoutNotFound { id: *id });
        }

        self.workout_repository.delete(id).await?;
        info!(workout_id = %id, "workout deleted");

        Ok(())
    }
}

use chrono::{DateTime, FixedOffset, TimeDelta, Utc};
use tracing::{debug, info, warn};

use crate::domain::{
    common::{CoreError, services::Service},
    exercise::ports::ExerciseRepository,
    health::port::HealthRepository,
    schedule::{
        calendar::{
            completion_rate, day_window, favourite_tally, recurring_occurrences, week_window,
        },
        entities::{
            InsertRecurringWorkoutInput, InsertScheduledWorkoutInput, RecurringWorkout,
            ScheduledWorkout, ScheduledWorkoutId, UpdateScheduledWorkoutInput, WorkoutCompletion,
            WorkoutFavourite,
        },
        ports::{RecurringWorkoutRepository, ScheduleService, ScheduledWorkoutRepository},
    },
    user::{entities::UserId, ports::UserRepository},
    workout::{entities::WorkoutId, ports::WorkoutRepository},
};

impl<U, W, E, S, R, H> Service<U, W, E, S, R, H>
where
    U: UserRepository,
    W: WorkoutRepository,
    E: ExerciseRepository,
    S: ScheduledWorkoutRepository,
    R: RecurringWorkoutRepository,
    H: HealthRepository,
{
    /// Checks the user first, then the workout, so a missing user never
    /// triggers a workout lookup.
    async fn ensure_user_and_workout(
        &self,
        user_id: &UserId,
        workout_id: &WorkoutId,
    ) -> Result<(), CoreError> {
        if self.user_repository.find_by_id(user_id).await?.is_none() {
            return Err(CoreError::UserNotFound { id: *user_id });
        }
        if self.workout_repository.find_by_id(workout_id).await?.is_none() {
            return Err(CoreError::WorkoutNotFound { id: *workout_id });
        }
        Ok(())
    }
}

impl<U, W, E, S, R, H> ScheduleService for Service<U, W, E, S, R, H>
where
    U: UserRepository,
    W: WorkoutRepository,
    E: ExerciseRepository,
    S: ScheduledWorkoutRepository,
    R: RecurringWorkoutRepository,
    H: HealthRepository,
{
    async fn list_scheduled_workouts(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<ScheduledWorkout>, CoreError> {
        self.scheduled_workout_repository.list_by_user(user_id).await
    }

    async fn scheduled_workouts_for_date(
        &self,
        user_id: &UserId,
        date: DateTime<FixedOffset>,
    ) -> Result<Vec<ScheduledWorkout>, CoreError> {
        let window = day_window(date);
        self.scheduled_workout_repository
            .list_by_user_between(user_id, &window)
            .await
    }

    async fn scheduled_workouts_for_week(
        &self,
        user_id: &UserId,
        date: DateTime<FixedOffset>,
    ) -> Result<Vec<ScheduledWorkout>, CoreError> {
        let window = week_window(date);
        self.scheduled_workout_repository
            .list_by_user_between(user_id, &window)
            .await
    }

    async fn recurring_workouts(&self, user_id: &UserId) -> Result<Vec<RecurringWorkout>, CoreError> {
        self.recurring_workout_repository.list_by_user(user_id).await
    }

    async fn workout_completion(
        &self,
        user_id: &UserId,
        lookback_days: i64,
    ) -> Result<WorkoutCompletion, CoreError> {
        if lookback_days < 0 {
            return Err(CoreError::InvalidLookback {
                days: lookback_days,
            });
        }

        let since = TimeDelta::try_days(lookback_days)
            .and_then(|lookback| Utc::now().checked_sub_signed(lookback))
            .unwrap_or(DateTime::<Utc>::MIN_UTC);

        let workouts = self
            .scheduled_workout_repository
            .list_by_user_after(user_id, &since)
            .await?;

        Ok(completion_rate(&workouts))
    }

    async fn workout_favourite(&self, user_id: &UserId) -> Result<WorkoutFavourite, CoreError> {
        let workouts = self.scheduled_workout_repository.list_by_user(user_id).await?;
        Ok(favourite_tally(&workouts))
    }

    async fn schedule_workout(
        &self,
        input: InsertScheduledWorkoutInput,
    ) -> Result<ScheduledWorkoutId, CoreError> {
        self.ensure_user_and_workout(&input.user_id, &input.workout_id)
            .await?;

        let scheduled = self.scheduled_workout_repository.insert(input).await?;
        info!(scheduled_workout_id = %scheduled.id, "workout scheduled");

        Ok(scheduled.id)
    }

    async fn schedule_recurring_workout(
        &self,
        input: InsertRecurringWorkoutInput,
    ) -> Result<Vec<ScheduledWorkoutId>, CoreError> {
        self.ensure_user_and_workout(&input.user_id, &input.workout_id)
            .await?;

        if input.days_of_week.is_empty() {
            return Err(CoreError::EmptyRecurringDays);
        }

        let mut input = input;
        input.days_of_week.sort();
        input.days_of_week.dedup();

        let occurrences = recurring_occurrences(
            &input.days_of_week,
            input.time_of_day,
            Utc::now().date_naive(),
        );

        let user_id = input.user_id;
        let workout_id = input.workout_id;
        let template = self.recurring_workout_repository.insert(input).await?;
        debug!(
            recurring_workout_id = template.id.0,
            occurrences = occurrences.len(),
            "expanding recurring workout"
        );

        let inserted = self
            .scheduled_workout_repository
            .insert_many(&user_id, &workout_id, &occurrences)
            .await;

        if let Err(error) = &inserted {
            warn!(
                recurring_workout_id = template.id.0,
                error = %error,
                "occurrences not stored, removing recurring workout"
            );
            self.recurring_workout_repository
                .delete(&template.id)
                .await?;
        }

        inserted
    }

    async fn update_scheduled_workout(
        &self,
        input: UpdateScheduledWorkoutInput,
    ) -> Result<ScheduledWorkout, CoreError> {
        if self
            .scheduled_workout_repository
            .find_by_id(&input.id)
            .await?
            .is_none()
        {
            return Err(CoreError::ScheduledWorkoutNotFound { id: input.id });
        }

        self.scheduled_workout_repository.update(input).await
    }

    async fn delete_scheduled_workout(&self, id: &ScheduledWorkoutId) -> Result<(), CoreError> {
        if self
            .scheduled_workout_repository
            .find_by_id(id)
            .await?
            .is_none()
        {
            return Err(CoreError::ScheduledWorkoutNotFound { id: *id });
        }

        self.scheduled_workout_repository.delete(id).await
    }
}

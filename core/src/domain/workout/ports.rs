use std::sync::{
    Arc, Mutex,
    atomic::{AtomicI64, Ordering},
};

use crate::domain::{
    common::CoreError,
    exercise::entities::ExerciseId,
    user::entities::UserId,
    workout::entities::{
        InsertWorkoutInput, UpdateWorkoutInput, Workout, WorkoutDetails, WorkoutExercise,
        WorkoutExerciseId, WorkoutId, WorkoutType,
    },
};

pub trait WorkoutRepository: Send + Sync {
    /// Stores the workout and all of its exercise entries as one unit.
    fn insert(
        &self,
        input: InsertWorkoutInput,
    ) -> impl Future<Output = Result<Workout, CoreError>> + Send;
    fn find_by_id(
        &self,
        id: &WorkoutId,
    ) -> impl Future<Output = Result<Option<Workout>, CoreError>> + Send;
    fn list(&self) -> impl Future<Output = Result<Vec<Workout>, CoreError>> + Send;
    fn list_by_user(
        &self,
        user_id: &UserId,
    ) -> impl Future<Output = Result<Vec<Workout>, CoreError>> + Send;
    fn list_by_user_and_type(
        &self,
        user_id: &UserId,
        workout_type: WorkoutType,
    ) -> impl Future<Output = Result<Vec<Workout>, CoreError>> + Send;
    fn update(
        &self,
        input: UpdateWorkoutInput,
    ) -> impl Future<Output = Result<Workout, CoreError>> + Send;
    /// Removes the workout along with its exercise entries and schedules.
    fn delete(&self, id: &WorkoutId) -> impl Future<Output = Result<(), CoreError>> + Send;
    fn delete_exercise(
        &self,
        workout_id: &WorkoutId,
        exercise_id: &ExerciseId,
    ) -> impl Future<Output = Result<(), CoreError>> + Send;
}

/// Business operations on workout templates and their exercise entries.
pub trait WorkoutService: Send + Sync {
    /// Fetches a workout with its exercise entries and owner summary.
    fn get_workout(
        &self,
        id: &WorkoutId,
    ) -> impl Future<Output = Result<WorkoutDetails, CoreError>> + Send;

    fn list_workouts(&self) -> impl Future<Output = Result<Vec<Workout>, CoreError>> + Send;

    fn list_workouts_by_user(
        &self,
        user_id: &UserId,
    ) -> impl Future<Output = Result<Vec<Workout>, CoreError>> + Send;

    fn list_workouts_by_type(
        &self,
        user_id: &UserId,
        workout_type: WorkoutType,
    ) -> impl Future<Output = Result<Vec<Workout>, CoreError>> + Send;

    fn workout_types(&self) -> Vec<WorkoutType>;

    /// Creates a workout owned by `input.user_id`.
    ///
    /// Entries that point at an exercise which does not exist are kept, with
    /// their exercise reference cleared.
    fn create_workout(
        &self,
        input: InsertWorkoutInput,
    ) -> impl Future<Output = Result<Workout, CoreError>> + Send;

    /// Updates title and description (blank values keep the current ones) and
    /// hands the workout over to `input.user_id`.
    fn update_workout(
        &self,
        input: UpdateWorkoutInput,
    ) -> impl Future<Output = Result<Workout, CoreError>> + Send;

    fn delete_workout_exercise(
        &self,
        workout_id: &WorkoutId,
        exercise_id: &ExerciseId,
    ) -> impl Future<Output = Result<(), CoreError>> + Send;

    fn delete_workout(&self, id: &WorkoutId) -> impl Future<Output = Result<(), CoreError>> + Send;
}

#[derive(Clone)]
pub struct MockWorkoutRepository {
    workouts: Arc<Mutex<Vec<Workout>>>,
    next_id: Arc<AtomicI64>,
    next_entry_id: Arc<AtomicI64>,
}

impl MockWorkoutRepository {
    pub fn new() -> Self {
        Self {
            workouts: Arc::new(Mutex::new(Vec::new())),
            next_id: Arc::new(AtomicI64::new(1)),
            next_entry_id: Arc::new(AtomicI64::new(1)),
        }
    }

    pub fn contains(&self, id: &WorkoutId) -> bool {
        self.workouts.lock().unwrap().iter().any(|w| &w.id == id)
    }
}

impl Default for MockWorkoutRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl WorkoutRepository for MockWorkoutRepository {
    async fn insert(&self, input: InsertWorkoutInput) -> Result<Workout, CoreError> {
        let mut workouts = self.workouts.lock().unwrap();

        let id = WorkoutId(self.next_id.fetch_add(1, Ordering::SeqCst));
        let now = chrono::Utc::now();
        let exercises = input
            .exercises
            .into_iter()
            .map(|entry| WorkoutExercise {
                id: WorkoutExerciseId(self.next_entry_id.fetch_add(1, Ordering::SeqCst)),
                workout_id: id,
                exercise_id: entry.exercise_id,
                sets: entry.sets,
                repetitions: entry.repetitions,
                weight: entry.weight,
                duration: entry.duration,
                rest_time: entry.rest_time,
            })
            .collect();

        let workout = Workout {
            id,
            title: input.title,
            description: input.description,
            duration: input.duration,
            workout_type: input.workout_type,
            user_id: Some(input.user_id),
            created_at: now,
            updated_at: now,
            exercises,
        };
        workouts.push(workout.clone());

        Ok(workout)
    }

    async fn find_by_id(&self, id: &WorkoutId) -> Result<Option<Workout>, CoreError> {
        let workouts = self.workouts.lock().unwrap();
        Ok(workouts.iter().find(|w| &w.id == id).cloned())
    }

    async fn list(&self) -> Result<Vec<Workout>, CoreError> {
        let workouts = self.workouts.lock().unwrap();
        Ok(workouts.clone())
    }

    async fn list_by_user(&self, user_id: &UserId) -> Result<Vec<Workout>, CoreError> {
        let workouts = self.workouts.lock().unwrap();
        Ok(workouts
            .iter()
            .filter(|w| w.user_id.as_ref() == Some(user_id))
            .cloned()
            .collect())
    }

    async fn list_by_user_and_type(
        &self,
        user_id: &UserId,
        workout_type: WorkoutType,
    ) -> Result<Vec<Workout>, CoreError> {
        let workouts = self.workouts.lock().unwrap();
        Ok(workouts
            .iter()
            .filter(|w| w.user_id.as_ref() == Some(user_id) && w.workout_type == workout_type)
            .cloned()
            .collect())
    }

    async fn update(&self, input: UpdateWorkoutInput) -> Result<Workout, CoreError> {
        let mut workouts = self.workouts.lock().unwrap();

        let workout = workouts
            .iter_mut()
            .find(|w| w.id == input.id)
            .ok_or(CoreError::WorkoutNotFound { id: input.id })?;

        if let Some(title) = input.title {
            workout.title = title;
        }
        if let Some(description) = input.description {
            workout.description = Some(description);
        }
        workout.user_id = Some(input.user_id);
        workout.updated_at = chrono::Utc::now();

        Ok(workout.clone())
    }

    async fn delete(&self, id: &WorkoutId) -> Result<(), CoreError> {
        let mut workouts = self.workouts.lock().unwrap();

        let index = workouts
            .iter()
            .position(|w| &w.id == id)
            .ok_or(CoreError::WorkoutNotFound { id: *id })?;
        workouts.remove(index);

        Ok(())
    }

    async fn delete_exercise(
        &self,
        workout_id: &WorkoutId,
        exercise_id: &ExerciseId,
    ) -> Result<(), CoreError> {
        let mut workouts = self.workouts.lock().unwrap();
        let not_found = CoreError::WorkoutExerciseNotFound {
            workout_id: *workout_id,
            exercise_id: *exercise_id,
        };

        let workout = workouts
            .iter_mut()
            .find(|w| &w.id == workout_id)
            .ok_or_else(|| not_found.clone())?;

        let before = workout.exercises.len();
        workout
            .exercises
            .retain(|entry| entry.exercise_id.as_ref() != Some(exercise_id));
        if workout.exercises.len() == before {
            return Err(not_found);
        }

        Ok(())
    }
}

use std::sync::{
    Arc, Mutex,
    atomic::{AtomicI64, Ordering},
};

use crate::domain::{
    common::CoreError,
    exercise::entities::{Exercise, ExerciseId, InsertExerciseInput, MuscleGroup},
};

pub trait ExerciseRepository: Send + Sync {
    fn insert(
        &self,
        input: InsertExerciseInput,
    ) -> impl Future<Output = Result<Exercise, CoreError>> + Send;
    fn find_by_id(
        &self,
        id: &ExerciseId,
    ) -> impl Future<Output = Result<Option<Exercise>, CoreError>> + Send;
    fn find_by_ids(
        &self,
        ids: &[ExerciseId],
    ) -> impl Future<Output = Result<Vec<Exercise>, CoreError>> + Send;
    fn list(&self) -> impl Future<Output = Result<Vec<Exercise>, CoreError>> + Send;
    fn list_by_muscle_group(
        &self,
        muscle_group: MuscleGroup,
    ) -> impl Future<Output = Result<Vec<Exercise>, CoreError>> + Send;
    /// Case-insensitive substring match on the title.
    fn search_by_title(
        &self,
        title: &str,
    ) -> impl Future<Output = Result<Vec<Exercise>, CoreError>> + Send;
}

/// Read access to the exercise catalogue, plus creation of new entries.
pub trait ExerciseService: Send + Sync {
    fn get_exercise(
        &self,
        id: &ExerciseId,
    ) -> impl Future<Output = Result<Exercise, CoreError>> + Send;

    fn list_exercises(&self) -> impl Future<Output = Result<Vec<Exercise>, CoreError>> + Send;

    /// Every muscle group, in declaration order.
    fn muscle_groups(&self) -> Vec<MuscleGroup>;

    fn list_by_muscle_group(
        &self,
        muscle_group: MuscleGroup,
    ) -> impl Future<Output = Result<Vec<Exercise>, CoreError>> + Send;

    /// An empty search string matches every exercise.
    fn search_by_title(
        &self,
        title: &str,
    ) -> impl Future<Output = Result<Vec<Exercise>, CoreError>> + Send;

    fn create_exercise(
        &self,
        input: InsertExerciseInput,
    ) -> impl Future<Output = Result<Exercise, CoreError>> + Send;
}

#[derive(Clone)]
pub struct MockExerciseRepository {
    exercises: Arc<Mutex<Vec<Exercise>>>,
    next_id: Arc<AtomicI64>,
}

impl MockExerciseRepository {
    pub fn new() -> Self {
        Self {
            exercises: Arc::new(Mutex::new(Vec::new())),
            next_id: Arc::new(AtomicI64::new(1)),
        }
    }
}

impl Default for MockExerciseRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl ExerciseRepository for MockExerciseRepository {
    async fn insert(&self, input: InsertExerciseInput) -> Result<Exercise, CoreError> {
        let mut exercises = self.exercises.lock().unwrap();

        let exercise = Exercise {
            id: ExerciseId(self.next_id.fetch_add(1, Ordering::SeqCst)),
            title: input.title,
            description: input.description,
            exercise_difficulty: input.exercise_difficulty,
            video_guide: input.video_guide,
            muscle_groups: input.muscle_groups,
        };
        exercises.push(exercise.clone());

        Ok(exercise)
    }

    async fn find_by_id(&self, id: &ExerciseId) -> Result<Option<Exercise>, CoreError> {
        let exercises = self.exercises.lock().unwrap();
        Ok(exercises.iter().find(|e| &e.id == id).cloned())
    }

    async fn find_by_ids(&self, ids: &[ExerciseId]) -> Result<Vec<Exercise>, CoreError> {
        let exercises = self.exercises.lock().unwrap();
        Ok(exercises
            .iter()
            .filter(|e| ids.contains(&e.id))
            .cloned()
            .collect())
    }

    async fn list(&self) -> Result<Vec<Exercise>, CoreError> {
        let exercises = self.exercises.lock().unwrap();
        Ok(exercises.clone())
    }

    async fn list_by_muscle_group(
        &self,
        muscle_group: MuscleGroup,
    ) -> Result<Vec<Exercise>, CoreError> {
        let exercises = self.exercises.lock().unwrap();
        Ok(exercises
            .iter()
            .filter(|e| e.muscle_groups.contains(&muscle_group))
            .cloned()
            .collect())
    }

    async fn search_by_title(&self, title: &str) -> Result<Vec<Exercise>, CoreError> {
        let needle = title.to_lowercase();
        let exercises = self.exercises.lock().unwrap();
        Ok(exercises
            .iter()
            .filter(|e| e.title.to_lowercase().contains(&needle))
            .cloned()
            .collect())
    }
}

use std::sync::{
    Arc, Mutex, MutexGuard,
    atomic::{AtomicBool, AtomicI64, Ordering},
};

use chrono::{DateTime, FixedOffset, Utc};

use crate::domain::{
    common::CoreError,
    schedule::entities::{
        DateWindow, InsertRecurringWorkoutInput, InsertScheduledWorkoutInput, RecurringWorkout,
        RecurringWorkoutId, ScheduledWorkout, ScheduledWorkoutId, UpdateScheduledWorkoutInput,
        WorkoutCompletion, WorkoutFavourite,
    },
    user::entities::UserId,
    workout::{
        entities::WorkoutId,
        ports::{MockWorkoutRepository, WorkoutRepository},
    },
};

pub trait ScheduledWorkoutRepository: Send + Sync {
    fn insert(
        &self,
        input: InsertScheduledWorkoutInput,
    ) -> impl Future<Output = Result<ScheduledWorkout, CoreError>> + Send;
    /// Stores one not-yet-completed row per instant, returning the new ids in
    /// the order of `instants`.
    fn insert_many(
        &self,
        user_id: &UserId,
        workout_id: &WorkoutId,
        instants: &[DateTime<Utc>],
    ) -> impl Future<Output = Result<Vec<ScheduledWorkoutId>, CoreError>> + Send;
    fn find_by_id(
        &self,
        id: &ScheduledWorkoutId,
    ) -> impl Future<Output = Result<Option<ScheduledWorkout>, CoreError>> + Send;
    fn list_by_user(
        &self,
        user_id: &UserId,
    ) -> impl Future<Output = Result<Vec<ScheduledWorkout>, CoreError>> + Send;
    fn list_by_user_between(
        &self,
        user_id: &UserId,
        window: &DateWindow,
    ) -> impl Future<Output = Result<Vec<ScheduledWorkout>, CoreError>> + Send;
    fn list_by_user_after(
        &self,
        user_id: &UserId,
        after: &DateTime<Utc>,
    ) -> impl Future<Output = Result<Vec<ScheduledWorkout>, CoreError>> + Send;
    fn update(
        &self,
        input: UpdateScheduledWorkoutInput,
    ) -> impl Future<Output = Result<ScheduledWorkout, CoreError>> + Send;
    fn delete(
        &self,
        id: &ScheduledWorkoutId,
    ) -> impl Future<Output = Result<(), CoreError>> + Send;
}

pub trait RecurringWorkoutRepository: Send + Sync {
    fn insert(
        &self,
        input: InsertRecurringWorkoutInput,
    ) -> impl Future<Output = Result<RecurringWorkout, CoreError>> + Send;
    fn list_by_user(
        &self,
        user_id: &UserId,
    ) -> impl Future<Output = Result<Vec<RecurringWorkout>, CoreError>> + Send;
    fn delete(
        &self,
        id: &RecurringWorkoutId,
    ) -> impl Future<Output = Result<(), CoreError>> + Send;
}

/// Calendar operations: placing workouts on a user's schedule, reading the
/// schedule back by day or week, and the statistics derived from it.
///
/// All instants are stored in UTC. The day and week views take the caller's
/// offset into account when computing window boundaries.
pub trait ScheduleService: Send + Sync {
    fn list_scheduled_workouts(
        &self,
        user_id: &UserId,
    ) -> impl Future<Output = Result<Vec<ScheduledWorkout>, CoreError>> + Send;

    /// Workouts scheduled on the local calendar day of `date`.
    fn scheduled_workouts_for_date(
        &self,
        user_id: &UserId,
        date: DateTime<FixedOffset>,
    ) -> impl Future<Output = Result<Vec<ScheduledWorkout>, CoreError>> + Send;

    /// Workouts scheduled in the Monday-to-Sunday week containing `date`.
    fn scheduled_workouts_for_week(
        &self,
        user_id: &UserId,
        date: DateTime<FixedOffset>,
    ) -> impl Future<Output = Result<Vec<ScheduledWorkout>, CoreError>> + Send;

    fn recurring_workouts(
        &self,
        user_id: &UserId,
    ) -> impl Future<Output = Result<Vec<RecurringWorkout>, CoreError>> + Send;

    /// Completed versus missed workouts over the last `lookback_days` days.
    fn workout_completion(
        &self,
        user_id: &UserId,
        lookback_days: i64,
    ) -> impl Future<Output = Result<WorkoutCompletion, CoreError>> + Send;

    /// Completed workouts of all time, counted per workout type.
    fn workout_favourite(
        &self,
        user_id: &UserId,
    ) -> impl Future<Output = Result<WorkoutFavourite, CoreError>> + Send;

    fn schedule_workout(
        &self,
        input: InsertScheduledWorkoutInput,
    ) -> impl Future<Output = Result<ScheduledWorkoutId, CoreError>> + Send;

    /// Saves the recurring template and schedules every occurrence in the
    /// coming recurrence window, returning the ids of the scheduled rows.
    fn schedule_recurring_workout(
        &self,
        input: InsertRecurringWorkoutInput,
    ) -> impl Future<Output = Result<Vec<ScheduledWorkoutId>, CoreError>> + Send;

    fn update_scheduled_workout(
        &self,
        input: UpdateScheduledWorkoutInput,
    ) -> impl Future<Output = Result<ScheduledWorkout, CoreError>> + Send;

    fn delete_scheduled_workout(
        &self,
        id: &ScheduledWorkoutId,
    ) -> impl Future<Output = Result<(), CoreError>> + Send;
}

#[derive(Clone, Debug)]
struct ScheduledRow {
    id: ScheduledWorkoutId,
    user_id: UserId,
    workout_id: WorkoutId,
    scheduled_at: DateTime<Utc>,
    completed: bool,
    updated_at: Option<DateTime<Utc>>,
}

/// In-memory schedule. Workout title and type are resolved through the
/// wrapped workout repository, the way the SQL adapter joins them in, and
/// rows of a deleted workout disappear with it.
#[derive(Clone)]
pub struct MockScheduledWorkoutRepository {
    rows: Arc<Mutex<Vec<ScheduledRow>>>,
    next_id: Arc<AtomicI64>,
    workouts: MockWorkoutRepository,
    fail_bulk_inserts: Arc<AtomicBool>,
}

impl MockScheduledWorkoutRepository {
    pub fn new(workouts: MockWorkoutRepository) -> Self {
        Self {
            rows: Arc::new(Mutex::new(Vec::new())),
            next_id: Arc::new(AtomicI64::new(1)),
            workouts,
            fail_bulk_inserts: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Makes `insert_many` fail with a database error while set.
    pub fn fail_bulk_inserts(&self, fail: bool) {
        self.fail_bulk_inserts.store(fail, Ordering::SeqCst);
    }

    fn live_rows(&self) -> MutexGuard<'_, Vec<ScheduledRow>> {
        let mut rows = self.rows.lock().unwrap();
        rows.retain(|r| self.workouts.contains(&r.workout_id));
        rows
    }

    async fn resolve(&self, row: ScheduledRow) -> Result<ScheduledWorkout, CoreError> {
        let workout = self
            .workouts
            .find_by_id(&row.workout_id)
            .await?
            .ok_or(CoreError::WorkoutNotFound { id: row.workout_id })?;

        Ok(ScheduledWorkout {
            id: row.id,
            user_id: row.user_id,
            workout_id: row.workout_id,
            workout_title: workout.title,
            workout_type: workout.workout_type,
            scheduled_at: row.scheduled_at,
            completed: row.completed,
            updated_at: row.updated_at,
        })
    }

    async fn resolve_all(
        &self,
        rows: Vec<ScheduledRow>,
    ) -> Result<Vec<ScheduledWorkout>, CoreError> {
        let mut resolved = Vec::with_capacity(rows.len());
        for row in rows {
            resolved.push(self.resolve(row).await?);
        }
        resolved.sort_by_key(|w| w.scheduled_at);
        Ok(resolved)
    }

    fn select(&self, predicate: impl Fn(&ScheduledRow) -> bool) -> Vec<ScheduledRow> {
        let rows = self.live_rows();
        rows.iter().filter(|r| predicate(r)).cloned().collect()
    }

    /// Overwrites the completion flag of a row, bypassing the service.
    pub fn set_completed(&self, id: &ScheduledWorkoutId, completed: bool) {
        let mut rows = self.live_rows();
        if let Some(row) = rows.iter_mut().find(|r| &r.id == id) {
            row.completed = completed;
        }
    }
}

impl ScheduledWorkoutRepository for MockScheduledWorkoutRepository {
    async fn insert(
        &self,
        input: InsertScheduledWorkoutInput,
    ) -> Result<ScheduledWorkout, CoreError> {
        let row = ScheduledRow {
            id: ScheduledWorkoutId(self.next_id.fetch_add(1, Ordering::SeqCst)),
            user_id: input.user_id,
            workout_id: input.workout_id,
            scheduled_at: input.scheduled_at,
            completed: false,
            updated_at: None,
        };
        self.rows.lock().unwrap().push(row.clone());

        self.resolve(row).await
    }

    async fn insert_many(
        &self,
        user_id: &UserId,
        workout_id: &WorkoutId,
        instants: &[DateTime<Utc>],
    ) -> Result<Vec<ScheduledWorkoutId>, CoreError> {
        if self.fail_bulk_inserts.load(Ordering::SeqCst) {
            return Err(CoreError::DatabaseError {
                msg: "bulk insert rejected".to_string(),
            });
        }
        let mut rows = self.live_rows();

        let ids = instants
            .iter()
            .map(|scheduled_at| {
                let id = ScheduledWorkoutId(self.next_id.fetch_add(1, Ordering::SeqCst));
                rows.push(ScheduledRow {
                    id,
                    user_id: *user_id,
                    workout_id: *workout_id,
                    scheduled_at: *scheduled_at,
                    completed: false,
                    updated_at: None,
                });
                id
            })
            .collect();

        Ok(ids)
    }

    async fn find_by_id(
        &self,
        id: &ScheduledWorkoutId,
    ) -> Result<Option<ScheduledWorkout>, CoreError> {
        match self.select(|r| &r.id == id).into_iter().next() {
            Some(row) => Ok(Some(self.resolve(row).await?)),
            None => Ok(None),
        }
    }

    async fn list_by_user(&self, user_id: &UserId) -> Result<Vec<ScheduledWorkout>, CoreError> {
        let rows = self.select(|r| &r.user_id == user_id);
        self.resolve_all(rows).await
    }

    async fn list_by_user_between(
        &self,
        user_id: &UserId,
        window: &DateWindow,
    ) -> Result<Vec<ScheduledWorkout>, CoreError> {
        let rows = self.select(|r| &r.user_id == user_id && window.contains(&r.scheduled_at));
        self.resolve_all(rows).await
    }

    async fn list_by_user_after(
        &self,
        user_id: &UserId,
        after: &DateTime<Utc>,
    ) -> Result<Vec<ScheduledWorkout>, CoreError> {
        let rows = self.select(|r| &r.user_id == user_id && &r.scheduled_at > after);
        self.resolve_all(rows).await
    }

    async fn update(
        &self,
        input: UpdateScheduledWorkoutInput,
    ) -> Result<ScheduledWorkout, CoreError> {
        let row = {
            let mut rows = self.live_rows();
            let row = rows
                .iter_mut()
                .find(|r| r.id == input.id)
                .ok_or(CoreError::ScheduledWorkoutNotFound { id: input.id })?;

            if let Some(scheduled_at) = input.scheduled_at {
                row.scheduled_at = scheduled_at;
            }
            if let Some(completed) = input.completed {
                row.completed = completed;
            }
            row.updated_at = Some(Utc::now());
            row.clone()
        };

        self.resolve(row).await
    }

    async fn delete(&self, id: &ScheduledWorkoutId) -> Result<(), CoreError> {
        let mut rows = self.live_rows();

        let index = rows
            .iter()
            .position(|r| &r.id == id)
            .ok_or(CoreError::ScheduledWorkoutNotFound { id: *id })?;
        rows.remove(index);

        Ok(())
    }
}

/// In-memory templates, dropped along with their workout.
#[derive(Clone)]
pub struct MockRecurringWorkoutRepository {
    templates: Arc<Mutex<Vec<RecurringWorkout>>>,
    next_id: Arc<AtomicI64>,
    workouts: MockWorkoutRepository,
}

impl MockRecurringWorkoutRepository {
    pub fn new(workouts: MockWorkoutRepository) -> Self {
        Self {
            templates: Arc::new(Mutex::new(Vec::new())),
            next_id: Arc::new(AtomicI64::new(1)),
            workouts,
        }
    }

    fn live_templates(&self) -> MutexGuard<'_, Vec<RecurringWorkout>> {
        let mut templates = self.templates.lock().unwrap();
        templates.retain(|t| self.workouts.contains(&t.workout_id));
        templates
    }
}

impl RecurringWorkoutRepository for MockRecurringWorkoutRepository {
    async fn insert(
        &self,
        input: InsertRecurringWorkoutInput,
    ) -> Result<RecurringWorkout, CoreError> {
        let mut templates = self.live_templates();

        let now = Utc::now();
        let template = RecurringWorkout {
            id: RecurringWorkoutId(self.next_id.fetch_add(1, Ordering::SeqCst)),
            user_id: input.user_id,
            workout_id: input.workout_id,
            time_of_day: input.time_of_day,
            days_of_week: input.days_of_week,
            created_at: now,
            updated_at: now,
        };
        templates.push(template.clone());

        Ok(template)
    }

    async fn list_by_user(&self, user_id: &UserId) -> Result<Vec<RecurringWorkout>, CoreError> {
        let templates = self.live_templates();
        Ok(templates
            .iter()
            .filter(|t| &t.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn delete(&self, id: &RecurringWorkoutId) -> Result<(), CoreError> {
        self.templates.lock().unwrap().retain(|t| &t.id != id);
        Ok(())
    }
}

use crate::{
    Service,
    domain::{
        exercise::ports::MockExerciseRepository,
        health::port::MockHealthRepository,
        schedule::ports::{MockRecurringWorkoutRepository, MockScheduledWorkoutRepository},
        user::ports::MockUserRepository,
        workout::ports::MockWorkoutRepository,
    },
};

mod exercise;
mod health;
mod schedule;
mod user;
mod workout;

pub(crate) type MockService = Service<
    MockUserRepository,
    MockWorkoutRepository,
    MockExerciseRepository,
    MockScheduledWorkoutRepository,
    MockRecurringWorkoutRepository,
    MockHealthRepository,
>;

/// A service over fresh in-memory repositories, plus handles on the mocks
/// whose state tests need to poke directly.
pub(crate) struct MockHarness {
    pub service: MockService,
    pub scheduled: MockScheduledWorkoutRepository,
    pub health: MockHealthRepository,
}

pub(crate) fn mock_service() -> MockHarness {
    let workouts = MockWorkoutRepository::new();
    let scheduled = MockScheduledWorkoutRepository::new(workouts.clone());
    let recurring = MockRecurringWorkoutRepository::new(workouts.clone());
    let health = MockHealthRepository::new();

    let service = Service::new(
        MockUserRepository::new(),
        workouts,
        MockExerciseRepository::new(),
        scheduled.clone(),
        recurring,
        health.clone(),
    );

    MockHarness {
        service,
        scheduled,
        health,
    }
}

use tracing::{debug, info};

use crate::domain::{
    common::{CoreError, services::Service},
    exercise::ports::ExerciseRepository,
    health::port::HealthRepository,
    schedule::ports::{RecurringWorkoutRepository, ScheduledWorkoutRepository},
    user::{
        entities::{Credentials, InsertUserInput, UpdateUserInput, User, UserId, UserSummary},
        ports::{UserRepository, UserService},
    },
    workout::ports::WorkoutRepository,
};

impl<U, W, E, S, R, H> UserService for Service<U, W, E, S, R, H>
where
    U: UserRepository,
    W: WorkoutRepository,
    E: ExerciseRepository,
    S: ScheduledWorkoutRepository,
    R: RecurringWorkoutRepository,
    H: HealthRepository,
{
    async fn get_user(&self, id: &UserId) -> Result<User, CoreError> {
        self.user_repository
            .find_by_id(id)
            .await?
            .ok_or(CoreError::UserNotFound { id: *id })
    }

    async fn list_users(&self) -> Result<Vec<UserSummary>, CoreError> {
        let users = self.user_repository.list().await?;
        Ok(users.into_iter().map(UserSummary::from).collect())
    }

    async fn create_user(&self, input: InsertUserInput) -> Result<User, CoreError> {
        let username = input.username.trim().to_string();
        if username.is_empty() {
            return Err(CoreError::InvalidUsername);
        }

        if self.user_repository.exists_by_username(&username).await? {
            debug!(%username, "rejecting duplicate username");
            return Err(CoreError::UsernameTaken { username });
        }

        let user = self
            .user_repository
            .insert(InsertUserInput { username })
            .await?;
        info!(user_id = %user.id, "user created");

        Ok(user)
    }

    async fn update_user(&self, input: UpdateUserInput) -> Result<User, CoreError> {
        let existing = self.get_user(&input.id).await?;

        // Blank usernames leave the current one in place
        let username = input
            .username
            .map(|name| name.trim().to_string())
            .filter(|name| !name.is_empty());

        if let Some(ref name) = username {
            if let Some(other) = self.user_repository.find_by_username(name).await? {
                if other.id != existing.id {
                    return Err(CoreError::UsernameTaken {
                        username: name.clone(),
                    });
                }
            }
        }

        self.user_repository
            .update(UpdateUserInput {
                id: existing.id,
                username,
            })
            .await
    }

    async fn signup(&self, credentials: Credentials) -> Result<User, CoreError> {
        let has_password = credentials
            .password
            .as_deref()
            .is_some_and(|password| !password.is_empty());
        if !has_password {
            return Err(CoreError::MissingPassword);
        }

        self.create_user(InsertUserInput {
            username: credentials.username,
        })
        .await
    }

    async fn login(&self, credentials: Credentials) -> Result<User, CoreError> {
        let username = credentials.username.trim();

        self.user_repository
            .find_by_username(username)
            .await?
            .ok_or(CoreError::InvalidCredentials)
    }

    async fn logout(&self, user_id: &UserId) -> Result<(), CoreError> {
        self.get_user(user_id).await?;
        debug!(%user_id, "user logged out");
        Ok(())
    }
}

use std::sync::{
    Arc, Mutex,
    atomic::{AtomicI64, Ordering},
};

use crate::domain::{
    common::CoreError,
    user::entities::{Credentials, InsertUserInput, UpdateUserInput, User, UserId, UserSummary},
};

pub trait UserRepository: Send + Sync {
    fn insert(&self, input: InsertUserInput)
    -> impl Future<Output = Result<User, CoreError>> + Send;
    fn find_by_id(&self, id: &UserId)
    -> impl Future<Output = Result<Option<User>, CoreError>> + Send;
    fn find_by_username(
        &self,
        username: &str,
    ) -> impl Future<Output = Result<Option<User>, CoreError>> + Send;
    fn exists_by_username(
        &self,
        username: &str,
    ) -> impl Future<Output = Result<bool, CoreError>> + Send;
    fn list(&self) -> impl Future<Output = Result<Vec<User>, CoreError>> + Send;
    fn update(&self, input: UpdateUserInput)
    -> impl Future<Output = Result<User, CoreError>> + Send;
}

/// Business operations on user accounts.
///
/// `signup`, `login` and `logout` form a deliberately thin account stub: the
/// password is required on signup but never persisted, login only resolves
/// the username, and logout only checks that the user exists. None of them
/// issue or verify a session.
pub trait UserService: Send + Sync {
    /// Fetches a user, failing with [`CoreError::UserNotFound`] when absent.
    fn get_user(&self, id: &UserId) -> impl Future<Output = Result<User, CoreError>> + Send;

    /// Lists every user as a [`UserSummary`], ordered by id.
    fn list_users(&self) -> impl Future<Output = Result<Vec<UserSummary>, CoreError>> + Send;

    /// Creates a user after trimming the username.
    ///
    /// Fails with [`CoreError::InvalidUsername`] for a blank username and
    /// [`CoreError::UsernameTaken`] when the name already exists.
    fn create_user(
        &self,
        input: InsertUserInput,
    ) -> impl Future<Output = Result<User, CoreError>> + Send;

    /// Renames a user. A blank or missing username keeps the current one.
    fn update_user(
        &self,
        input: UpdateUserInput,
    ) -> impl Future<Output = Result<User, CoreError>> + Send;

    fn signup(&self, credentials: Credentials)
    -> impl Future<Output = Result<User, CoreError>> + Send;

    fn login(&self, credentials: Credentials)
    -> impl Future<Output = Result<User, CoreError>> + Send;

    fn logout(&self, user_id: &UserId) -> impl Future<Output = Result<(), CoreError>> + Send;
}

#[derive(Clone)]
pub struct MockUserRepository {
    users: Arc<Mutex<Vec<User>>>,
    next_id: Arc<AtomicI64>,
}

impl MockUserRepository {
    pub fn new() -> Self {
        Self {
            users: Arc::new(Mutex::new(Vec::new())),
            next_id: Arc::new(AtomicI64::new(1)),
        }
    }
}

impl Default for MockUserRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl UserRepository for MockUserRepository {
    async fn insert(&self, input: InsertUserInput) -> Result<User, CoreError> {
        let mut users = self.users.lock().unwrap();

        let user = User {
            id: UserId(self.next_id.fetch_add(1, Ordering::SeqCst)),
            username: input.username,
            created_at: chrono::Utc::now(),
            updated_at: None,
        };
        users.push(user.clone());

        Ok(user)
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, CoreError> {
        let users = self.users.lock().unwrap();
        Ok(users.iter().find(|u| &u.id == id).cloned())
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, CoreError> {
        let users = self.users.lock().unwrap();
        Ok(users.iter().find(|u| u.username == username).cloned())
    }

    async fn exists_by_username(&self, username: &str) -> Result<bool, CoreError> {
        let users = self.users.lock().unwrap();
        Ok(users.iter().any(|u| u.username == username))
    }

    async fn list(&self) -> Result<Vec<User>, CoreError> {
        let users = self.users.lock().unwrap();
        let mut all = users.clone();
        all.sort_by_key(|u| u.id);
        Ok(all)
    }

    async fn update(&self, input: UpdateUserInput) -> Result<User, CoreError> {
        let mut users = self.users.lock().unwrap();

        let user = users
            .iter_mut()
            .find(|u| u.id == input.id)
            .ok_or(CoreError::UserNotFound { id: input.id })?;

        if let Some(username) = input.username {
            user.username = username;
        }
        user.updated_at = Some(chrono::Utc::now());

        Ok(user.clone())
    }
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ToSchema)]
#[schema(value_type = i64)]
pub struct UserId(pub i64);

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for UserId {
    fn from(id: i64) -> Self {
        UserId(id)
    }
}

impl From<UserId> for i64 {
    fn from(user_id: UserId) -> Self {
        user_id.0
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    pub username: String,

    #[schema(value_type = String, format = DateTime)]
    pub created_at: DateTime<Utc>,
    #[schema(value_type = Option<String>, format = DateTime)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Public projection of a user, used wherever a user is embedded in another
/// response.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, ToSchema)]
pub struct UserSummary {
    pub id: UserId,
    pub username: String,
}

impl From<&User> for UserSummary {
    fn from(user: &User) -> Self {
        UserSummary {
            id: user.id,
            username: user.username.clone(),
        }
    }
}

impl From<User> for UserSummary {
    fn from(user: User) -> Self {
        UserSummary {
            id: user.id,
            username: user.username,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, ToSchema)]
pub struct InsertUserInput {
    pub username: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, ToSchema)]
pub struct CreateUserRequest {
    pub username: String,
}

impl CreateUserRequest {
    pub fn into_input(self) -> InsertUserInput {
        InsertUserInput {
            username: self.username,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, ToSchema)]
pub struct UpdateUserInput {
    pub id: UserId,
    pub username: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default, ToSchema)]
pub struct UpdateUserRequest {
    pub username: Option<String>,
}

impl UpdateUserRequest {
    pub fn into_input(self, id: UserId) -> UpdateUserInput {
        UpdateUserInput {
            id,
            username: self.username,
        }
    }
}

/// Body of the signup and login endpoints.
///
/// The password is only checked for presence on signup. It is never stored
/// or compared.
#[derive(Debug, Serialize, Deserialize, Clone, ToSchema)]
pub struct Credentials {
    pub username: String,
    pub password: Option<String>,
}

use crate::domain::{
    common::CoreError,
    test::mock_service,
    user::{
        entities::{Credentials, InsertUserInput, UpdateUserInput, UserId},
        ports::UserService,
    },
};

fn new_user(username: &str) -> InsertUserInput {
    InsertUserInput {
        username: username.to_string(),
    }
}

// == Create User Tests ==

#[tokio::test]
async fn test_create_user_success() -> Result<(), Box<dyn std::error::Error>> {
    let harness = mock_service();

    let user = harness.service.create_user(new_user("  alice  ")).await?;

    assert_eq!(user.username, "alice", "Expected trimmed username");
    assert!(user.updated_at.is_none(), "Expected no update timestamp yet");

    let fetched = harness.service.get_user(&user.id).await?;
    assert_eq!(fetched, user);

    Ok(())
}

#[tokio::test]
async fn test_create_user_fail_blank_username() -> Result<(), Box<dyn std::error::Error>> {
    let harness = mock_service();

    let result = harness.service.create_user(new_user("   ")).await;

    assert_eq!(result, Err(CoreError::InvalidUsername));
    assert!(harness.service.list_users().await?.is_empty());

    Ok(())
}

#[tokio::test]
async fn test_create_user_fail_duplicate_username() -> Result<(), Box<dyn std::error::Error>> {
    let harness = mock_service();
    harness.service.create_user(new_user("bob")).await?;

    let err = harness
        .service
        .create_user(new_user("bob"))
        .await
        .expect_err("duplicate username should be rejected");

    assert_eq!(
        err,
        CoreError::UsernameTaken {
            username: "bob".to_string()
        }
    );
    assert_eq!(err.to_string(), "Username: bob is already taken");

    Ok(())
}

// == Read User Tests ==

#[tokio::test]
async fn test_get_user_fail_not_found() -> Result<(), Box<dyn std::error::Error>> {
    let harness = mock_service();

    let err = harness
        .service
        .get_user(&UserId(42))
        .await
        .expect_err("missing user should fail");

    assert_eq!(err, CoreError::UserNotFound { id: UserId(42) });
    assert_eq!(err.to_string(), "User with id: 42 does not exist");

    Ok(())
}

#[tokio::test]
async fn test_list_users_returns_summaries_in_id_order() -> Result<(), Box<dyn std::error::Error>>
{
    let harness = mock_service();
    let carol = harness.service.create_user(new_user("carol")).await?;
    let dave = harness.service.create_user(new_user("dave")).await?;

    let users = harness.service.list_users().await?;

    assert_eq!(users.len(), 2);
    assert_eq!(users[0].id, carol.id);
    assert_eq!(users[0].username, "carol");
    assert_eq!(users[1].id, dave.id);

    Ok(())
}

// == Update User Tests ==

#[tokio::test]
async fn test_update_user_renames() -> Result<(), Box<dyn std::error::Error>> {
    let harness = mock_service();
    let user = harness.service.create_user(new_user("erin")).await?;

    let updated = harness
        .service
        .update_user(UpdateUserInput {
            id: user.id,
            username: Some("erin2".to_string()),
        })
        .await?;

    assert_eq!(updated.username, "erin2");
    assert!(updated.updated_at.is_some(), "Expected update timestamp");

    Ok(())
}

#[tokio::test]
async fn test_update_user_blank_username_keeps_current() -> Result<(), Box<dyn std::error::Error>>
{
    let harness = mock_service();
    let user = harness.service.create_user(new_user("frank")).await?;

    let updated = harness
        .service
        .update_user(UpdateUserInput {
            id: user.id,
            username: Some("  ".to_string()),
        })
        .await?;

    assert_eq!(updated.username, "frank");

    Ok(())
}

#[tokio::test]
async fn test_update_user_fail_name_taken_by_other() -> Result<(), Box<dyn std::error::Error>> {
    let harness = mock_service();
    harness.service.create_user(new_user("gina")).await?;
    let hank = harness.service.create_user(new_user("hank")).await?;

    let result = harness
        .service
        .update_user(UpdateUserInput {
            id: hank.id,
            username: Some("gina".to_string()),
        })
        .await;

    assert_eq!(
        result,
        Err(CoreError::UsernameTaken {
            username: "gina".to_string()
        })
    );

    Ok(())
}

#[tokio::test]
async fn test_update_user_fail_not_found() -> Result<(), Box<dyn std::error::Error>> {
    let harness = mock_service();

    let result = harness
        .service
        .update_user(UpdateUserInput {
            id: UserId(7),
            username: Some("ivy".to_string()),
        })
        .await;

    assert_eq!(result, Err(CoreError::UserNotFound { id: UserId(7) }));

    Ok(())
}

// == Account Stub Tests ==

#[tokio::test]
async fn test_signup_requires_password() -> Result<(), Box<dyn std::error::Error>> {
    let harness = mock_service();

    let err = harness
        .service
        .signup(Credentials {
            username: "jack".to_string(),
            password: None,
        })
        .await
        .expect_err("signup without password should fail");

    assert_eq!(err, CoreError::MissingPassword);
    assert_eq!(err.to_string(), "Requires a password");

    Ok(())
}

#[tokio::test]
async fn test_signup_then_login_and_logout() -> Result<(), Box<dyn std::error::Error>> {
    let harness = mock_service();

    let user = harness
        .service
        .signup(Credentials {
            username: "kate".to_string(),
            password: Some("hunter2".to_string()),
        })
        .await?;

    let logged_in = harness
        .service
        .login(Credentials {
            username: "kate".to_string(),
            password: Some("anything".to_string()),
        })
        .await?;
    assert_eq!(logged_in.id, user.id);

    harness.service.logout(&user.id).await?;

    Ok(())
}

#[tokio::test]
async fn test_login_fail_unknown_user() -> Result<(), Box<dyn std::error::Error>> {
    let harness = mock_service();

    let result = harness
        .service
        .login(Credentials {
            username: "nobody".to_string(),
            password: Some("secret".to_string()),
        })
        .await;

    assert_eq!(result, Err(CoreError::InvalidCredentials));

    Ok(())
}

#[tokio::test]
async fn test_logout_fail_unknown_user() -> Result<(), Box<dyn std::error::Error>> {
    let harness = mock_service();

    let result = harness.service.logout(&UserId(99)).await;

    assert_eq!(result, Err(CoreError::UserNotFound { id: UserId(99) }));

    Ok(())
}

use crate::domain::{common::CoreError, health::port::HealthService, test::mock_service};

#[tokio::test]
async fn test_check_health_reports_healthy() -> Result<(), Box<dyn std::error::Error>> {
    let harness = mock_service();

    let status = harness.service.check_health().await?;

    assert!(status.value());

    Ok(())
}

#[tokio::test]
async fn test_check_health_fails_when_database_down() {
    let harness = mock_service();
    harness.health.set_healthy(false);

    let result = harness.service.check_health().await;

    assert_eq!(result, Err(CoreError::Unhealthy));
}

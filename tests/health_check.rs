mod common;

use anyhow::Result;
use axum::http::StatusCode;
use common::http::TestApp;
use common::memory_storage;
use serde_json::Value;

mod health_check_tests {
    use super::*;

    #[tokio::test]
    async fn test_liveness_endpoint() -> Result<()> {
        let app = TestApp::new(memory_storage());

        let response = app.get("/health/live").await?;

        response.assert_status(StatusCode::OK);
        let health_response: Value = response.json()?;
        assert_eq!(health_response["status"], "ok");
        Ok(())
    }

    #[tokio::test]
    async fn test_readiness_endpoint() -> Result<()> {
        let app = TestApp::new(memory_storage());

        let response = app.get("/health/ready").await?;

        response.assert_status(StatusCode::OK);
        let readiness_response: Value = response.json()?;
        assert_eq!(readiness_response["status"], "ready");
        assert_eq!(readiness_response["storage"], "ok");
        assert!(readiness_response["error"].is_null());
        Ok(())
    }

    #[tokio::test]
    async fn test_readiness_after_upload() -> Result<()> {
        let app = TestApp::new(memory_storage());
        app.upload("points.csv", b"x,y\n1,2\n")
            .await?
            .assert_status(StatusCode::OK);

        let response = app.get("/health/ready").await?;

        response.assert_status(StatusCode::OK);
        Ok(())
    }

    #[tokio::test]
    async fn test_docs_are_served() -> Result<()> {
        let app = TestApp::new(memory_storage());

        let response = app.get("/docs").await?;

        response.assert_status(StatusCode::OK);
        response.assert_body_contains("/api/upload");
        Ok(())
    }
}

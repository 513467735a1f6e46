mod common;

use anyhow::Result;
use reqwest::StatusCode;

#[tokio::test]
async fn admin_endpoints_reject_anonymous_callers() -> Result<()> {
    let server = common::start_server().await?;

    let res = common::client()
        .get(format!("{}/api/admin/payments/transaction", server.base_url))
        .send()
        .await?;

    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "Unauthorized");
    Ok(())
}

#[tokio::test]
async fn admin_endpoints_reject_learners() -> Result<()> {
    let server = common::start_server().await?;
    let token = common::session_token(Some("user"), Some("premium"));

    let res = common::client()
        .get(format!("{}/api/admin/payments/invoice/in_123", server.base_url))
        .bearer_auth(&token)
        .send()
        .await?;

    assert_eq!(res.status(), StatusCode::FORBIDDEN);
    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["error"], "Forbidden");
    Ok(())
}

#[tokio::test]
async fn malformed_authorization_header_is_unauthorized() -> Result<()> {
    let server = common::start_server().await?;

    let res = common::client()
        .get(format!("{}/api/admin/payments/revenue-chart", server.base_url))
        .header("authorization", "Basic abc")
        .send()
        .await?;

    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    Ok(())
}

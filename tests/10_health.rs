mod common;

use anyhow::Result;
use reqwest::StatusCode;

#[tokio::test]
async fn health_endpoint_responds() -> Result<()> {
    let server = common::start_server().await?;

    let res = common::client()
        .get(format!("{}/health", server.base_url))
        .send()
        .await?;

    assert_eq!(res.status(), StatusCode::OK);
    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["status"], "ok");
    Ok(())
}

#[tokio::test]
async fn root_lists_endpoints() -> Result<()> {
    let server = common::start_server().await?;

    let body = common::client()
        .get(format!("{}/", server.base_url))
        .send()
        .await?
        .json::<serde_json::Value>()
        .await?;

    assert_eq!(body["data"]["name"], "Lingo API");
    Ok(())
}

#[tokio::test]
async fn bare_page_path_redirects_to_default_locale() -> Result<()> {
    let server = common::start_server().await?;

    let res = common::client()
        .get(format!("{}/subscription", server.base_url))
        .send()
        .await?;

    assert_eq!(res.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(res.headers()["location"], "/en/subscription");
    Ok(())
}

#[tokio::test]
async fn dropped_server_stops_listening() -> Result<()> {
    let server = common::start_server().await?;
    let url = format!("{}/health", server.base_url);
    drop(server);

    let res = common::client()
        .get(&url)
        .timeout(std::time::Duration::from_secs(2))
        .send()
        .await;

    assert!(res.is_err(), "server still answering after drop");
    Ok(())
}

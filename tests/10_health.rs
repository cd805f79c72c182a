mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::Value;

#[tokio::test]
async fn health_endpoint_responds() -> Result<()> {
    let server = common::ensure_server().await?;
    let res = reqwest::get(server.url("/health")).await?;

    assert_eq!(res.status(), StatusCode::OK);
    let body = res.json::<Value>().await?;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["database"], "ok");
    assert!(body["timestamp"].is_string());
    Ok(())
}

#[tokio::test]
async fn sitemap_lists_the_api() -> Result<()> {
    let server = common::ensure_server().await?;
    let body = reqwest::get(server.url("/")).await?.json::<Value>().await?;

    assert_eq!(body["name"], "Star Wars Blog API");
    let endpoints = body["endpoints"].as_array().expect("endpoints array");
    assert!(endpoints
        .iter()
        .any(|e| e["method"] == "GET" && e["path"] == "/users/:user_id/favorites"));
    Ok(())
}

#[tokio::test]
async fn unknown_route_is_json_404() -> Result<()> {
    let server = common::ensure_server().await?;
    let res = reqwest::get(server.url("/starships/1")).await?;

    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let body = res.json::<Value>().await?;
    assert_eq!(body["code"], "NOT_FOUND");
    Ok(())
}

#[tokio::test]
async fn users_created_from_cli_are_listed() -> Result<()> {
    let server = common::ensure_server().await?;
    let email = common::unique_email("obiwan");
    let id = server.create_user(&email)?;

    let res = reqwest::get(server.url("/users")).await?;
    assert_eq!(res.status(), StatusCode::OK);
    let users = res.json::<Vec<Value>>().await?;
    assert!(users.iter().any(|u| u["id"] == id && u["email"] == email.as_str()));

    // Email is unique
    assert!(server.create_user(&email).is_err());

    let err = server.create_user("   ").expect_err("blank email must be rejected");
    assert!(err.to_string().contains("email is required"), "{}", err);
    Ok(())
}

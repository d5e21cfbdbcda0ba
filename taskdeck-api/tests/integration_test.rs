/// Integration tests for the TaskDeck API
///
/// These tests drive the router end-to-end: authentication flows, the
/// bearer guard, CRUD for groups and tasks, soft-delete visibility, and
/// the error-to-status mapping.
mod common;

use axum::http::StatusCode;
use common::TestContext;
use serde_json::json;
use taskdeck_shared::models::group_member::GroupRole;
use taskdeck_shared::storage::Backend;
use uuid::Uuid;

#[tokio::test]
async fn test_health_check() {
    let ctx = TestContext::new();
    let (status, body) = ctx.send("GET", "/health", None, None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["services"], "ready");
    assert!(ctx.services.is_booted());
}

#[tokio::test]
async fn test_register_strips_password_and_rejects_duplicates() {
    let ctx = TestContext::new();

    let body = ctx.register("a@x.com", "secret12", "A").await;
    assert_eq!(body["email"], "a@x.com");
    assert!(body.get("password").is_none());
    assert!(body.get("password_hash").is_none());

    // Second registration with the same email conflicts.
    let (status, body) = ctx
        .send(
            "POST",
            "/v1/auth/register",
            None,
            Some(json!({
                "email": "a@x.com",
                "password": "secret12",
                "password_confirm": "secret12",
                "full_name": "A",
            })),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "conflict");
}

#[tokio::test]
async fn test_register_validation_failures() {
    let ctx = TestContext::new();

    // Mismatched confirmation
    let (status, body) = ctx
        .send(
            "POST",
            "/v1/auth/register",
            None,
            Some(json!({
                "email": "a@x.com",
                "password": "secret12",
                "password_confirm": "different",
                "full_name": "A",
            })),
        )
        .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"], "validation_error");

    // Malformed email
    let (status, _) = ctx
        .send(
            "POST",
            "/v1/auth/register",
            None,
            Some(json!({
                "email": "not-an-email",
                "password": "secret12",
                "password_confirm": "secret12",
                "full_name": "A",
            })),
        )
        .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_login_and_bad_credentials() {
    let ctx = TestContext::new();
    ctx.register("a@x.com", "secret12", "A").await;

    let token = ctx.login("a@x.com", "secret12").await;

    // The token validates against the configured issuer and embeds the
    // public projection.
    let claims = ctx.config.token_issuer().validate(&token).unwrap();
    assert_eq!(claims.user.email, "a@x.com");

    let (status, body) = ctx
        .send(
            "POST",
            "/v1/auth/login",
            None,
            Some(json!({ "identity": "a@x.com", "password": "wrong-password" })),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "unauthorized");
}

#[tokio::test]
async fn test_bearer_guard() {
    let ctx = TestContext::new();

    // No Authorization header
    let (status, _) = ctx.send("GET", "/v1/user/profile", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    // Garbage token
    let (status, _) = ctx
        .send("GET", "/v1/user/profile", Some("not-a-token"), None)
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_profile_roundtrip() {
    let ctx = TestContext::new();
    let (user, token) = ctx.authenticated_user().await;

    let (status, body) = ctx
        .send("GET", "/v1/user/profile", Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], user["id"]);

    let (status, body) = ctx
        .send(
            "PUT",
            "/v1/user/profile",
            Some(&token),
            Some(json!({ "username": "tester1", "full_name": "Renamed" })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["username"], "tester1");
    assert_eq!(body["full_name"], "Renamed");
}

#[tokio::test]
async fn test_create_group_creates_admin_membership() {
    let ctx = TestContext::new();
    let (user, token) = ctx.authenticated_user().await;

    let (status, group) = ctx
        .send(
            "POST",
            "/v1/user/groups",
            Some(&token),
            Some(json!({ "name": "Team1" })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(group["name"], "Team1");

    // Exactly one membership row links the new group to the caller.
    let memberships = ctx.db.group_members.scan().await.unwrap();
    assert_eq!(memberships.len(), 1);
    assert_eq!(memberships[0].group_id.to_string(), group["id"]);
    assert_eq!(memberships[0].user_id.to_string(), user["id"]);
    assert_eq!(memberships[0].role, GroupRole::Admin);
}

#[tokio::test]
async fn test_group_members_listing() {
    let ctx = TestContext::new();
    let (user, token) = ctx.authenticated_user().await;

    let (_, group) = ctx
        .send(
            "POST",
            "/v1/user/groups",
            Some(&token),
            Some(json!({ "name": "Team1" })),
        )
        .await;
    let group_id = group["id"].as_str().unwrap();

    let (status, body) = ctx
        .send(
            "GET",
            &format!("/v1/user/groups/{group_id}/members"),
            Some(&token),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["pagination"]["total"], 1);
    assert_eq!(body["data"][0]["user_id"], user["id"]);
    assert_eq!(body["data"][0]["role"], "admin");

    // Role filter narrows; an unknown group 404s.
    let (_, body) = ctx
        .send(
            "GET",
            &format!("/v1/user/groups/{group_id}/members?role=member"),
            Some(&token),
            None,
        )
        .await;
    assert_eq!(body["pagination"]["total"], 0);

    let (status, _) = ctx
        .send(
            "GET",
            &format!("/v1/user/groups/{}/members", Uuid::new_v4()),
            Some(&token),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_group_crud() {
    let ctx = TestContext::new();
    let (_, token) = ctx.authenticated_user().await;

    let (_, group) = ctx
        .send(
            "POST",
            "/v1/user/groups",
            Some(&token),
            Some(json!({ "name": "Team1" })),
        )
        .await;
    let group_id = group["id"].as_str().unwrap().to_string();

    // Listing filters by name case-insensitively.
    let (status, body) = ctx
        .send("GET", "/v1/user/groups?name=team1", Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["pagination"]["total"], 1);
    assert_eq!(body["data"][0]["id"], group_id.as_str());

    // Rename
    let (status, body) = ctx
        .send(
            "PUT",
            &format!("/v1/user/groups/{group_id}"),
            Some(&token),
            Some(json!({ "name": "Team2" })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Team2");

    // Delete, then 404 on lookup
    let (status, body) = ctx
        .send(
            "DELETE",
            &format!("/v1/user/groups/{group_id}"),
            Some(&token),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["deleted"], true);

    let (status, _) = ctx
        .send(
            "GET",
            &format!("/v1/user/groups/{group_id}"),
            Some(&token),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_task_crud_and_soft_delete() {
    let ctx = TestContext::new();
    let (_, token) = ctx.authenticated_user().await;

    let (status, task) = ctx
        .send(
            "POST",
            "/v1/user/tasks",
            Some(&token),
            Some(json!({ "title": "write report", "description": "quarterly numbers" })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(task["status"], "todo");
    let task_id = task["id"].as_str().unwrap().to_string();

    // Move it to in_progress.
    let (status, task) = ctx
        .send(
            "PUT",
            &format!("/v1/user/tasks/{task_id}"),
            Some(&token),
            Some(json!({ "status": "in_progress" })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(task["status"], "in_progress");

    // Status filter matches.
    let (_, body) = ctx
        .send(
            "GET",
            "/v1/user/tasks?status=in_progress",
            Some(&token),
            None,
        )
        .await;
    assert_eq!(body["pagination"]["total"], 1);

    // Soft delete: gone from the API, still in storage with the tombstone.
    let (status, _) = ctx
        .send(
            "DELETE",
            &format!("/v1/user/tasks/{task_id}"),
            Some(&token),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = ctx
        .send(
            "GET",
            &format!("/v1/user/tasks/{task_id}"),
            Some(&token),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let raw = ctx
        .db
        .tasks
        .fetch(&task_id.parse::<Uuid>().unwrap())
        .await
        .unwrap()
        .unwrap();
    assert!(raw.is_deleted);

    // Deleting again reports not found.
    let (status, _) = ctx
        .send(
            "DELETE",
            &format!("/v1/user/tasks/{task_id}"),
            Some(&token),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_task_hard_delete_removes_row() {
    let ctx = TestContext::new();
    let (_, token) = ctx.authenticated_user().await;

    let (_, task) = ctx
        .send(
            "POST",
            "/v1/user/tasks",
            Some(&token),
            Some(json!({ "title": "ephemeral" })),
        )
        .await;
    let task_id = task["id"].as_str().unwrap().to_string();

    let (status, _) = ctx
        .send(
            "DELETE",
            &format!("/v1/user/tasks/{task_id}?hard=true"),
            Some(&token),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    let raw = ctx
        .db
        .tasks
        .fetch(&task_id.parse::<Uuid>().unwrap())
        .await
        .unwrap();
    assert!(raw.is_none());
}

#[tokio::test]
async fn test_task_pagination() {
    let ctx = TestContext::new();
    let (_, token) = ctx.authenticated_user().await;

    for i in 0..12 {
        ctx.send(
            "POST",
            "/v1/user/tasks",
            Some(&token),
            Some(json!({ "title": format!("task-{i}") })),
        )
        .await;
    }

    let (status, body) = ctx
        .send("GET", "/v1/user/tasks?page=2&limit=5", Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 5);
    assert_eq!(body["pagination"]["total"], 12);
    assert_eq!(body["pagination"]["total_pages"], 3);
}

#[tokio::test]
async fn test_admin_user_listing_with_filters() {
    let ctx = TestContext::new();
    ctx.register("a@x.com", "secret12", "A").await;
    ctx.register("b@x.com", "secret12", "B").await;
    let token = ctx.login("a@x.com", "secret12").await;

    let (status, body) = ctx
        .send("GET", "/v1/admin/users?email=b@x.com", Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["pagination"]["total"], 1);
    assert_eq!(body["data"][0]["email"], "b@x.com");

    let (_, body) = ctx.send("GET", "/v1/admin/users", Some(&token), None).await;
    assert_eq!(body["pagination"]["total"], 2);
}

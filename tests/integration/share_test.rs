//! Integration tests for share tokens, joining, and collaborator access.

mod helpers;

use chrono::Duration;
use http::StatusCode;
use serde_json::json;

use helpers::{ALICE, BOB, CAROL, TestApp};

#[tokio::test]
async fn test_share_preview_and_join() {
    let app = TestApp::new().await;
    app.add_user(ALICE, "Alice").await;
    app.add_user(BOB, "Bob").await;
    let route_id = app.create_route(ALICE, "Western Ghats").await;
    let token = app.share(ALICE, &route_id, Some(24)).await;

    // Preview needs no authentication and hides the token.
    let preview = app
        .request("GET", &format!("/api/shared-routes/{token}"), None, None)
        .await;
    assert_eq!(preview.status, StatusCode::OK);
    assert_eq!(preview.data()["_id"], route_id.as_str());
    assert!(preview.data().get("shareToken").is_none());

    let joined = app.join(BOB, &token).await;
    assert_eq!(joined.status, StatusCode::OK, "{}", joined.body);
    let shared_with = joined.data()["sharedWith"].as_array().unwrap();
    assert_eq!(shared_with.len(), 1);
    assert_eq!(shared_with[0]["userId"], BOB);
    assert_eq!(shared_with[0]["permission"], "upload");
    assert!(joined.data().get("shareToken").is_none());

    let bob_token = app.token_for(BOB);
    let mine = app
        .request("GET", "/api/my-shared-routes", None, Some(&bob_token))
        .await;
    assert_eq!(mine.status, StatusCode::OK);
    assert_eq!(mine.data().as_array().unwrap().len(), 1);

    let alice_token = app.token_for(ALICE);
    let info = app
        .request(
            "GET",
            &format!("/api/routes/{route_id}/share-info"),
            None,
            Some(&alice_token),
        )
        .await;
    assert_eq!(info.status, StatusCode::OK);
    assert_eq!(info.data()["shareToken"], token.as_str());
    let users = info.data()["users"].as_array().unwrap();
    assert_eq!(users.len(), 2);
    assert_eq!(users[0]["email"], ALICE);
    assert_eq!(users[1]["email"], BOB);
}

#[tokio::test]
async fn test_join_twice_keeps_one_entry() {
    let app = TestApp::new().await;
    let route_id = app.create_route(ALICE, "Coast").await;
    let token = app.share(ALICE, &route_id, None).await;

    assert_eq!(app.join(BOB, &token).await.status, StatusCode::OK);
    let second = app.join(BOB, &token).await;
    assert_eq!(second.status, StatusCode::OK);
    assert_eq!(second.data()["sharedWith"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_owner_cannot_join_own_route() {
    let app = TestApp::new().await;
    let route_id = app.create_route(ALICE, "Coast").await;
    let token = app.share(ALICE, &route_id, None).await;

    let response = app.join(ALICE, &token).await;
    assert_eq!(response.status, StatusCode::CONFLICT);
    assert_eq!(response.error_code(), "ALREADY_OWNER");
}

#[tokio::test]
async fn test_expired_token_is_indistinguishable_from_unknown() {
    let app = TestApp::new().await;
    let route_id = app.create_route(ALICE, "Coast").await;
    let token = app.share(ALICE, &route_id, Some(1)).await;

    app.clock.advance(Duration::minutes(59));
    let before = app
        .request("GET", &format!("/api/shared-routes/{token}"), None, None)
        .await;
    assert_eq!(before.status, StatusCode::OK);

    app.clock.advance(Duration::minutes(2));
    let expired = app
        .request("GET", &format!("/api/shared-routes/{token}"), None, None)
        .await;
    let unknown = app
        .request("GET", "/api/shared-routes/deadbeefdeadbeef", None, None)
        .await;

    assert_eq!(expired.status, StatusCode::NOT_FOUND);
    assert_eq!(expired.error_code(), "NOT_FOUND_OR_EXPIRED");
    assert_eq!(expired.body, unknown.body);

    let join = app.join(BOB, &token).await;
    assert_eq!(join.status, StatusCode::NOT_FOUND);
    assert_eq!(join.error_code(), "NOT_FOUND_OR_EXPIRED");
}

#[tokio::test]
async fn test_reshare_invalidates_previous_token() {
    let app = TestApp::new().await;
    let route_id = app.create_route(ALICE, "Coast").await;
    let first = app.share(ALICE, &route_id, None).await;
    let second = app.share(ALICE, &route_id, None).await;
    assert_ne!(first, second);

    assert_eq!(app.join(BOB, &first).await.status, StatusCode::NOT_FOUND);
    assert_eq!(app.join(BOB, &second).await.status, StatusCode::OK);
}

#[tokio::test]
async fn test_revoke_clears_token_and_collaborators() {
    let app = TestApp::new().await;
    let route_id = app.create_route(ALICE, "Coast").await;
    let token = app.share(ALICE, &route_id, None).await;
    assert_eq!(app.join(BOB, &token).await.status, StatusCode::OK);

    let alice_token = app.token_for(ALICE);
    let revoke = app
        .request(
            "DELETE",
            &format!("/api/routes/{route_id}/share"),
            None,
            Some(&alice_token),
        )
        .await;
    assert_eq!(revoke.status, StatusCode::OK);

    let info = app
        .request(
            "GET",
            &format!("/api/routes/{route_id}/share-info"),
            None,
            Some(&alice_token),
        )
        .await;
    assert!(info.data()["shareToken"].is_null());
    assert!(info.data()["sharedWith"].as_array().unwrap().is_empty());

    assert_eq!(app.join(CAROL, &token).await.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_share_requires_owner_and_existing_route() {
    let app = TestApp::new().await;
    let route_id = app.create_route(ALICE, "Coast").await;
    let bob_token = app.token_for(BOB);

    let forbidden = app
        .request(
            "POST",
            &format!("/api/routes/{route_id}/share"),
            None,
            Some(&bob_token),
        )
        .await;
    assert_eq!(forbidden.status, StatusCode::FORBIDDEN);
    assert_eq!(forbidden.error_code(), "FORBIDDEN");

    let missing = app
        .request("POST", "/api/routes/no-such-route/share", None, Some(&bob_token))
        .await;
    assert_eq!(missing.status, StatusCode::NOT_FOUND);
    assert_eq!(missing.error_code(), "NOT_FOUND");

    let info = app
        .request(
            "GET",
            &format!("/api/routes/{route_id}/share-info"),
            None,
            Some(&bob_token),
        )
        .await;
    assert_eq!(info.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_share_rejects_unusable_expiry() {
    let app = TestApp::new().await;
    let route_id = app.create_route(ALICE, "Coast").await;
    let token = app.token_for(ALICE);
    let path = format!("/api/routes/{route_id}/share");

    for hours in [0_i64, -3, 10_000_000_000] {
        let response = app
            .request("POST", &path, Some(json!({ "expiryHours": hours })), Some(&token))
            .await;
        assert_eq!(response.status, StatusCode::BAD_REQUEST, "hours = {hours}");
        assert_eq!(response.error_code(), "INVALID_INPUT");
    }
}

#[tokio::test]
async fn test_share_accepts_expiry_beyond_a_year() {
    let app = TestApp::new().await;
    let route_id = app.create_route(ALICE, "Coast").await;
    let token = app.token_for(ALICE);
    let path = format!("/api/routes/{route_id}/share");

    for hours in [8761, 24 * 365 * 2] {
        let response = app
            .request("POST", &path, Some(json!({ "expiryHours": hours })), Some(&token))
            .await;
        assert_eq!(response.status, StatusCode::OK, "hours = {hours}");
        assert!(response.data()["expiresAt"].is_string());
    }
}

#[tokio::test]
async fn test_collaborator_can_request_upload_urls() {
    let app = TestApp::new().await;
    let route_id = app.create_route(ALICE, "Coast").await;
    let token = app.share(ALICE, &route_id, None).await;
    assert_eq!(app.join(BOB, &token).await.status, StatusCode::OK);

    let body = json!({ "filenames": ["beach.jpg"], "contentTypes": ["image/jpeg"] });
    let path = format!("/api/routes/{route_id}/generate-upload-urls");

    let bob = app
        .request("POST", &path, Some(body.clone()), Some(&app.token_for(BOB)))
        .await;
    assert_eq!(bob.status, StatusCode::OK, "{}", bob.body);
    let urls = bob.data()["urls"].as_array().unwrap();
    assert_eq!(urls.len(), 1);
    assert_eq!(
        urls[0]["cloudfrontUrl"],
        format!("https://cdn.test/{route_id}/beach.jpg")
    );

    let carol = app
        .request("POST", &path, Some(body), Some(&app.token_for(CAROL)))
        .await;
    assert_eq!(carol.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_join_survives_share_grant_failure() {
    let app = TestApp::new().await;
    let route_id = app.create_route(ALICE, "Coast").await;
    let token = app.share(ALICE, &route_id, None).await;

    app.store.set_grant_writes_failing(true);
    let joined = app.join(BOB, &token).await;
    assert_eq!(joined.status, StatusCode::OK);
    assert_eq!(joined.data()["sharedWith"].as_array().unwrap().len(), 1);
}

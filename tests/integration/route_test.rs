//! Integration tests for route CRUD and upload URL generation.

mod helpers;

use http::StatusCode;
use serde_json::json;

use helpers::{ALICE, BOB, TestApp, route_body};

#[tokio::test]
async fn test_create_route() {
    let app = TestApp::new().await;
    let token = app.token_for(ALICE);

    let mut body = route_body("Deccan loop");
    body["photos"] = json!([{ "filename": "start.jpg" }]);

    let response = app.request("POST", "/api/routes", Some(body), Some(&token)).await;

    assert_eq!(response.status, StatusCode::CREATED, "{}", response.body);
    assert_eq!(response.body["success"], true);
    let route = response.data();
    let id = route["_id"].as_str().unwrap();
    assert_eq!(route["name"], "Deccan loop");
    assert_eq!(route["creatorId"], ALICE);
    assert_eq!(route["isPublic"], false);
    assert!(route["sharedWith"].as_array().unwrap().is_empty());
    assert_eq!(route["intermediateWaypoints"].as_array().unwrap().len(), 1);
    assert_eq!(
        route["photos"][0]["cloudfrontUrl"],
        format!("https://cdn.test/{id}/start.jpg")
    );
}

#[tokio::test]
async fn test_create_route_validation() {
    let app = TestApp::new().await;
    let token = app.token_for(ALICE);

    let empty_name = app
        .request("POST", "/api/routes", Some(route_body("")), Some(&token))
        .await;
    assert_eq!(empty_name.status, StatusCode::BAD_REQUEST);
    assert_eq!(empty_name.error_code(), "INVALID_INPUT");

    let malformed = app
        .raw_request(
            "POST",
            "/api/routes",
            "{\"name\": ".to_string(),
            Some(format!("Bearer {token}")),
        )
        .await;
    assert_eq!(malformed.status, StatusCode::BAD_REQUEST);
    assert_eq!(malformed.error_code(), "INVALID_INPUT");

    let missing_origin = app
        .request("POST", "/api/routes", Some(json!({ "name": "x" })), Some(&token))
        .await;
    assert_eq!(missing_origin.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_public_views_hide_share_token() {
    let app = TestApp::new().await;
    let route_id = app.create_route(ALICE, "Coast").await;
    let share_token = app.share(ALICE, &route_id, Some(48)).await;
    let path = format!("/api/routes/{route_id}");

    let anonymous = app.request("GET", &path, None, None).await;
    assert_eq!(anonymous.status, StatusCode::OK);
    assert!(anonymous.data().get("shareToken").is_none());

    let stranger = app.request("GET", &path, None, Some(&app.token_for(BOB))).await;
    assert!(stranger.data().get("shareToken").is_none());

    let owner = app
        .request("GET", &path, None, Some(&app.token_for(ALICE)))
        .await;
    assert_eq!(owner.data()["shareToken"], share_token.as_str());

    let listing = app.request("GET", "/api/routes", None, None).await;
    assert_eq!(listing.status, StatusCode::OK);
    let routes = listing.data().as_array().unwrap();
    assert_eq!(routes.len(), 1);
    assert!(routes[0].get("shareToken").is_none());
}

#[tokio::test]
async fn test_get_missing_route() {
    let app = TestApp::new().await;
    let response = app.request("GET", "/api/routes/nope", None, None).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.error_code(), "NOT_FOUND");
}

#[tokio::test]
async fn test_update_route_owner_only() {
    let app = TestApp::new().await;
    let route_id = app.create_route(ALICE, "Coast").await;
    let path = format!("/api/routes/{route_id}");

    let bob = app
        .request("PUT", &path, Some(route_body("Hijacked")), Some(&app.token_for(BOB)))
        .await;
    assert_eq!(bob.status, StatusCode::FORBIDDEN);

    let alice = app
        .request("PUT", &path, Some(route_body("Coast v2")), Some(&app.token_for(ALICE)))
        .await;
    assert_eq!(alice.status, StatusCode::OK, "{}", alice.body);
    assert_eq!(alice.data()["name"], "Coast v2");

    let missing = app
        .request(
            "PUT",
            "/api/routes/nope",
            Some(route_body("x")),
            Some(&app.token_for(BOB)),
        )
        .await;
    assert_eq!(missing.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_collaborator_cannot_update_or_delete() {
    let app = TestApp::new().await;
    let route_id = app.create_route(ALICE, "Coast").await;
    let token = app.share(ALICE, &route_id, None).await;
    assert_eq!(app.join(BOB, &token).await.status, StatusCode::OK);

    let path = format!("/api/routes/{route_id}");
    let bob_token = app.token_for(BOB);

    let update = app
        .request("PUT", &path, Some(route_body("Mine now")), Some(&bob_token))
        .await;
    assert_eq!(update.status, StatusCode::FORBIDDEN);

    let delete = app.request("DELETE", &path, None, Some(&bob_token)).await;
    assert_eq!(delete.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_delete_route() {
    let app = TestApp::new().await;
    let route_id = app.create_route(ALICE, "Coast").await;
    let path = format!("/api/routes/{route_id}");
    let token = app.token_for(ALICE);

    let deleted = app.request("DELETE", &path, None, Some(&token)).await;
    assert_eq!(deleted.status, StatusCode::OK);

    let gone = app.request("GET", &path, None, None).await;
    assert_eq!(gone.status, StatusCode::NOT_FOUND);

    let again = app.request("DELETE", &path, None, Some(&token)).await;
    assert_eq!(again.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_my_routes_lists_only_own() {
    let app = TestApp::new().await;
    app.create_route(ALICE, "One").await;
    app.create_route(ALICE, "Two").await;
    app.create_route(BOB, "Three").await;

    let response = app
        .request("GET", "/api/my-routes", None, Some(&app.token_for(ALICE)))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    let routes = response.data().as_array().unwrap();
    assert_eq!(routes.len(), 2);
    assert!(routes.iter().all(|r| r["creatorId"] == ALICE));
}

#[tokio::test]
async fn test_upload_urls_are_recorded_on_route() {
    let app = TestApp::new().await;
    let route_id = app.create_route(ALICE, "Coast").await;
    let token = app.token_for(ALICE);

    let response = app
        .request(
            "POST",
            &format!("/api/routes/{route_id}/generate-upload-urls"),
            Some(json!({
                "filenames": ["a.jpg", "../../etc/b.png"],
                "contentTypes": ["image/jpeg", "image/png"]
            })),
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK, "{}", response.body);

    let urls = response.data()["urls"].as_array().unwrap();
    assert_eq!(urls.len(), 2);
    assert!(urls.iter().all(|u| !u["filename"].as_str().unwrap().contains("..")));
    assert!(urls[0]["url"].as_str().unwrap().starts_with("http://uploads.test/"));

    let route = app
        .request("GET", &format!("/api/routes/{route_id}"), None, None)
        .await;
    assert_eq!(route.data()["photos"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_upload_urls_input_limits() {
    let app = TestApp::new().await;
    let route_id = app.create_route(ALICE, "Coast").await;
    let token = app.token_for(ALICE);
    let path = format!("/api/routes/{route_id}/generate-upload-urls");

    let too_many: Vec<String> = (0..31).map(|i| format!("{i}.jpg")).collect();
    let types: Vec<&str> = vec!["image/jpeg"; 31];
    let response = app
        .request(
            "POST",
            &path,
            Some(json!({ "filenames": too_many, "contentTypes": types })),
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);

    let mismatch = app
        .request(
            "POST",
            &path,
            Some(json!({ "filenames": ["a.jpg", "b.jpg"], "contentTypes": ["image/jpeg"] })),
            Some(&token),
        )
        .await;
    assert_eq!(mismatch.status, StatusCode::BAD_REQUEST);
    assert_eq!(mismatch.error_code(), "INVALID_INPUT");

    let empty = app
        .request(
            "POST",
            &path,
            Some(json!({ "filenames": [], "contentTypes": [] })),
            Some(&token),
        )
        .await;
    assert_eq!(empty.status, StatusCode::BAD_REQUEST);
}

//! HTTP integration tests
//!
//! Each test starts its own server on in-memory storage, so no external
//! services are required.
//!
//! Run with: cargo test -p integration-tests --test api_tests

use integration_tests::{
    assert_json, assert_redirect, assert_status, fixtures::*, TestServer, TestSession,
};
use reqwest::StatusCode;

async fn server() -> TestServer {
    TestServer::start().await.expect("Failed to start server")
}

async fn post_message(server: &TestServer, session: &TestSession, text: &str) -> String {
    let response = server
        .post_form_auth("/messages/new", session, &[("text", text)])
        .await
        .unwrap();
    assert_redirect(&response, &format!("/users/{}", session.user_id)).unwrap();

    let profile: Profile = assert_json(
        server
            .get_auth(&format!("/users/{}", session.user_id), session)
            .await
            .unwrap(),
        StatusCode::OK,
    )
    .await
    .unwrap();
    profile.messages[0].id.clone()
}

// ============================================================================
// Health
// ============================================================================

#[tokio::test]
async fn test_health_check() {
    let server = server().await;
    let response = server.get("/health").await.unwrap();
    let body: serde_json::Value = assert_json(response, StatusCode::OK).await.unwrap();

    assert_eq!(body["status"], "healthy");
    assert_eq!(body["storage"], "memory");
}

// ============================================================================
// Sessions
// ============================================================================

#[tokio::test]
async fn test_signup_sets_session_cookie() {
    let server = server().await;
    let session = server.signup().await.unwrap();

    assert!(!session.user_id.is_empty());
    assert!(session.cookie.starts_with("warbler_session="));
}

#[tokio::test]
async fn test_signup_duplicate_username() {
    let server = server().await;
    let form = SignupForm::unique();
    server.post_form("/signup", &form).await.unwrap();

    let mut again = SignupForm::unique();
    again.username = form.username.clone();
    let response = server.post_form("/signup", &again).await.unwrap();
    let body: ErrorEnvelope = assert_json(response, StatusCode::CONFLICT).await.unwrap();
    assert_eq!(body.error.code, "USERNAME_TAKEN");
}

#[tokio::test]
async fn test_signup_invalid_form() {
    let server = server().await;
    let response = server
        .post_form(
            "/signup",
            &[("username", "x"), ("email", "not-an-email"), ("password", "123")],
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();
}

#[tokio::test]
async fn test_login_and_logout() {
    let server = server().await;
    let first = server.signup().await.unwrap();

    let second = server.login(&first.username, TEST_PASSWORD).await.unwrap();
    assert_eq!(second.user_id, first.user_id);

    let response = server.post_auth("/logout", &second).await.unwrap();
    assert_redirect(&response, "/login").unwrap();

    // The revoked session no longer authenticates; the other one still does
    let response = server.get_auth("/", &second).await.unwrap();
    assert_redirect(&response, "/login").unwrap();
    let response = server.get_auth("/", &first).await.unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();
}

#[tokio::test]
async fn test_login_invalid_credentials() {
    let server = server().await;
    let session = server.signup().await.unwrap();

    let response = server
        .post_form(
            "/login",
            &[("username", session.username.as_str()), ("password", "wrong-password")],
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();
}

#[tokio::test]
async fn test_anonymous_requests_redirect_to_login() {
    let server = server().await;
    let owner = server.signup().await.unwrap();
    let message_id = post_message(&server, &owner, "still here").await;

    for path in [
        "/".to_string(),
        format!("/users/{}/followers", owner.user_id),
        format!("/users/{}/following", owner.user_id),
    ] {
        let response = server.get(&path).await.unwrap();
        assert_redirect(&response, "/login").unwrap();
    }

    for path in [
        "/messages/new".to_string(),
        format!("/messages/{message_id}/delete"),
        format!("/users/follow/{}", owner.user_id),
        format!("/users/stop-following/{}", owner.user_id),
        "/logout".to_string(),
    ] {
        let response = server.post_form(&path, &[("text", "hi")]).await.unwrap();
        assert_redirect(&response, "/login").unwrap();
    }

    // The anonymous delete left the message in place
    let message: MessageBody = assert_json(
        server.get(&format!("/messages/{message_id}")).await.unwrap(),
        StatusCode::OK,
    )
    .await
    .unwrap();
    assert_eq!(message.text, "still here");
}

#[tokio::test]
async fn test_anonymous_post_redirects_before_form_checks() {
    let server = server().await;

    // No body at all
    let response = server.post("/messages/new").await.unwrap();
    assert_redirect(&response, "/login").unwrap();

    // Wrong field name
    let response = server
        .post_form("/messages/new", &[("body", "x")])
        .await
        .unwrap();
    assert_redirect(&response, "/login").unwrap();

    // Text that would fail validation
    let response = server
        .post_form("/messages/new", &[("text", "   ")])
        .await
        .unwrap();
    assert_redirect(&response, "/login").unwrap();
}

#[tokio::test]
async fn test_signed_in_post_with_malformed_form_is_rejected() {
    let server = server().await;
    let session = server.signup().await.unwrap();

    let response = server.post_auth("/messages/new", &session).await.unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();
}

// ============================================================================
// Follow graph
// ============================================================================

#[tokio::test]
async fn test_follow_and_list() {
    let server = server().await;
    let alice = server.signup().await.unwrap();
    let bob = server.signup().await.unwrap();

    let response = server
        .post_auth(&format!("/users/follow/{}", bob.user_id), &alice)
        .await
        .unwrap();
    assert_redirect(&response, &format!("/users/{}/following", alice.user_id)).unwrap();

    // Following twice is a no-op
    server
        .post_auth(&format!("/users/follow/{}", bob.user_id), &alice)
        .await
        .unwrap();

    let following: FollowList = assert_json(
        server
            .get_auth(&format!("/users/{}/following", alice.user_id), &alice)
            .await
            .unwrap(),
        StatusCode::OK,
    )
    .await
    .unwrap();
    assert_eq!(following.users.len(), 1);
    assert_eq!(following.users[0].id, bob.user_id);

    // Any signed-in user may view someone else's listings
    let followers: FollowList = assert_json(
        server
            .get_auth(&format!("/users/{}/followers", bob.user_id), &alice)
            .await
            .unwrap(),
        StatusCode::OK,
    )
    .await
    .unwrap();
    assert_eq!(followers.user.id, bob.user_id);
    assert_eq!(followers.users.len(), 1);
    assert_eq!(followers.users[0].username, alice.username);

    let bobs_following: FollowList = assert_json(
        server
            .get_auth(&format!("/users/{}/following", bob.user_id), &alice)
            .await
            .unwrap(),
        StatusCode::OK,
    )
    .await
    .unwrap();
    assert_eq!(bobs_following.user.id, bob.user_id);
    assert!(bobs_following.users.is_empty());

    // Bob sees the same listing of his own followers
    let own: FollowList = assert_json(
        server
            .get_auth(&format!("/users/{}/followers", bob.user_id), &bob)
            .await
            .unwrap(),
        StatusCode::OK,
    )
    .await
    .unwrap();
    assert_eq!(own.users.len(), 1);
}

#[tokio::test]
async fn test_unfollow() {
    let server = server().await;
    let alice = server.signup().await.unwrap();
    let bob = server.signup().await.unwrap();

    server
        .post_auth(&format!("/users/follow/{}", bob.user_id), &alice)
        .await
        .unwrap();
    let response = server
        .post_auth(&format!("/users/stop-following/{}", bob.user_id), &alice)
        .await
        .unwrap();
    assert_redirect(&response, &format!("/users/{}/following", alice.user_id)).unwrap();

    let profile: Profile = assert_json(
        server
            .get_auth(&format!("/users/{}", bob.user_id), &alice)
            .await
            .unwrap(),
        StatusCode::OK,
    )
    .await
    .unwrap();
    assert_eq!(profile.followers_count, 0);
    assert!(!profile.is_following);
}

#[tokio::test]
async fn test_self_follow_rejected() {
    let server = server().await;
    let alice = server.signup().await.unwrap();

    let response = server
        .post_auth(&format!("/users/follow/{}", alice.user_id), &alice)
        .await
        .unwrap();
    let body: ErrorEnvelope = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(body.error.code, "SELF_FOLLOW");
}

#[tokio::test]
async fn test_follow_unknown_user() {
    let server = server().await;
    let alice = server.signup().await.unwrap();

    let response = server
        .post_auth("/users/follow/999999999", &alice)
        .await
        .unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();

    let response = server
        .get_auth("/users/999999999/followers", &alice)
        .await
        .unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();
}

// ============================================================================
// Messages
// ============================================================================

#[tokio::test]
async fn test_create_and_get_message() {
    let server = server().await;
    let alice = server.signup().await.unwrap();

    let message_id = post_message(&server, &alice, "first warble").await;

    // Messages are public
    let message: MessageBody = assert_json(
        server.get(&format!("/messages/{message_id}")).await.unwrap(),
        StatusCode::OK,
    )
    .await
    .unwrap();
    assert_eq!(message.text, "first warble");
    assert_eq!(message.author_id, alice.user_id);
}

#[tokio::test]
async fn test_message_text_rules() {
    let server = server().await;
    let alice = server.signup().await.unwrap();

    let response = server
        .post_form_auth("/messages/new", &alice, &[("text", "   ")])
        .await
        .unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();

    let long = "a".repeat(141);
    let response = server
        .post_form_auth("/messages/new", &alice, &[("text", long.as_str())])
        .await
        .unwrap();
    let body: ErrorEnvelope = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(body.error.code, "CONTENT_TOO_LONG");
}

#[tokio::test]
async fn test_delete_own_message() {
    let server = server().await;
    let alice = server.signup().await.unwrap();
    let message_id = post_message(&server, &alice, "short-lived").await;

    let response = server
        .post_auth(&format!("/messages/{message_id}/delete"), &alice)
        .await
        .unwrap();
    assert_redirect(&response, &format!("/users/{}", alice.user_id)).unwrap();

    let response = server.get(&format!("/messages/{message_id}")).await.unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();
}

#[tokio::test]
async fn test_delete_someone_elses_message_is_forbidden() {
    let server = server().await;
    let alice = server.signup().await.unwrap();
    let mallory = server.signup().await.unwrap();
    let message_id = post_message(&server, &alice, "mine").await;

    let response = server
        .post_auth(&format!("/messages/{message_id}/delete"), &mallory)
        .await
        .unwrap();
    let body: ErrorEnvelope = assert_json(response, StatusCode::FORBIDDEN).await.unwrap();
    assert_eq!(body.error.code, "NOT_MESSAGE_AUTHOR");

    // Still there
    let response = server.get(&format!("/messages/{message_id}")).await.unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();
}

#[tokio::test]
async fn test_delete_missing_message() {
    let server = server().await;
    let alice = server.signup().await.unwrap();

    let response = server
        .post_auth("/messages/123456/delete", &alice)
        .await
        .unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();
}

#[tokio::test]
async fn test_timeline_includes_followed_users() {
    let server = server().await;
    let alice = server.signup().await.unwrap();
    let bob = server.signup().await.unwrap();
    let carol = server.signup().await.unwrap();

    post_message(&server, &bob, "from bob").await;
    post_message(&server, &carol, "from carol").await;
    post_message(&server, &alice, "from alice").await;

    server
        .post_auth(&format!("/users/follow/{}", bob.user_id), &alice)
        .await
        .unwrap();

    let timeline: Timeline =
        assert_json(server.get_auth("/", &alice).await.unwrap(), StatusCode::OK)
            .await
            .unwrap();
    let texts: Vec<&str> = timeline.messages.iter().map(|m| m.text.as_str()).collect();
    assert_eq!(texts, vec!["from alice", "from bob"]);
}

#[tokio::test]
async fn test_profile_relationship_flags() {
    let server = server().await;
    let alice = server.signup().await.unwrap();
    let bob = server.signup().await.unwrap();

    server
        .post_auth(&format!("/users/follow/{}", alice.user_id), &bob)
        .await
        .unwrap();

    let profile: Profile = assert_json(
        server
            .get_auth(&format!("/users/{}", bob.user_id), &alice)
            .await
            .unwrap(),
        StatusCode::OK,
    )
    .await
    .unwrap();
    assert!(!profile.is_following);
    assert!(profile.is_followed_by);
    assert_eq!(profile.following_count, 1);

    // Anonymous viewers see the profile without relationship flags
    let profile: Profile = assert_json(
        server.get(&format!("/users/{}", bob.user_id)).await.unwrap(),
        StatusCode::OK,
    )
    .await
    .unwrap();
    assert!(!profile.is_followed_by);
}

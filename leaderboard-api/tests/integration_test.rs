/// Integration tests for the leaderboard API
///
/// These tests drive the full router against an in-memory store:
/// - Community leaderboard ranking and empty-community policy
/// - Join/leave membership semantics
/// - User listing and detail views
/// - Creation endpoints and error mapping

mod common;

use axum::http::StatusCode;
use common::TestContext;
use leaderboard_shared::leaderboard::EmptyCommunityPolicy;
use leaderboard_shared::store::LeaderboardStore;
use serde_json::json;
use uuid::Uuid;

#[tokio::test]
async fn test_leaderboard_end_to_end() {
    let ctx = TestContext::new();

    let alpha = ctx.community("Alpha").await;
    let beta = ctx.community("Beta").await;
    ctx.member("a@example.com", alpha.id, &[10, 5]).await;
    ctx.member("b@example.com", alpha.id, &[20]).await;
    ctx.member("d@example.com", beta.id, &[]).await;

    let (status, body) = ctx.get("/community/").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!([{
            "id": alpha.id,
            "name": "Alpha",
            "logo": null,
            "totalCommunityPoints": 35,
            "totalUsers": 2
        }])
    );
}

#[tokio::test]
async fn test_leaderboard_is_sorted_descending() {
    let ctx = TestContext::new();

    let small = ctx.community("Small").await;
    let large = ctx.community("Large").await;
    let medium = ctx.community("Medium").await;
    ctx.member("s@example.com", small.id, &[1]).await;
    ctx.member("l@example.com", large.id, &[100]).await;
    ctx.member("m@example.com", medium.id, &[40, 2]).await;

    let (_, body) = ctx.get("/community").await;
    let names: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|entry| entry["name"].as_str().unwrap())
        .collect();

    assert_eq!(names, vec!["Large", "Medium", "Small"]);
}

#[tokio::test]
async fn test_leaderboard_counts_member_with_zero_point_event() {
    let ctx = TestContext::new();

    let team = ctx.community("Team").await;
    ctx.member("a@example.com", team.id, &[5]).await;
    ctx.member("b@example.com", team.id, &[10]).await;
    ctx.member("c@example.com", team.id, &[0]).await;
    ctx.member("idle@example.com", team.id, &[]).await;

    let (_, body) = ctx.get("/community/").await;

    assert_eq!(body[0]["totalCommunityPoints"], 15);
    assert_eq!(body[0]["totalUsers"], 3);
}

#[tokio::test]
async fn test_include_policy_lists_empty_communities() {
    let ctx = TestContext::with_policy(EmptyCommunityPolicy::Include);

    let alpha = ctx.community("Alpha").await;
    ctx.community("Beta").await;
    ctx.member("a@example.com", alpha.id, &[7]).await;

    let (status, body) = ctx.get("/community/").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 2);
    assert_eq!(body[1]["name"], "Beta");
    assert_eq!(body[1]["totalCommunityPoints"], 0);
    assert_eq!(body[1]["totalUsers"], 0);
}

#[tokio::test]
async fn test_empty_store_has_empty_leaderboard() {
    let ctx = TestContext::new();

    let (status, body) = ctx.get("/community/").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn test_join_sets_community_and_counts_on_leaderboard() {
    let ctx = TestContext::new();

    let alpha = ctx.community("Alpha").await;
    let user = ctx.user("a@example.com").await;
    ctx.award(user.id, &[12]).await;

    let (status, body) = ctx
        .post(&format!("/user/{}/join/{}", user.id, alpha.id))
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["communityId"], json!(alpha.id));
    assert!(body.get("passwordHash").is_none());

    let (_, board) = ctx.get("/community/").await;
    assert_eq!(board[0]["totalCommunityPoints"], 12);
}

#[tokio::test]
async fn test_join_replaces_previous_community() {
    let ctx = TestContext::new();

    let alpha = ctx.community("Alpha").await;
    let beta = ctx.community("Beta").await;
    let user = ctx.member("a@example.com", alpha.id, &[3]).await;

    let (status, body) = ctx
        .post(&format!("/user/{}/join/{}", user.id, beta.id))
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["communityId"], json!(beta.id));

    let (_, board) = ctx.get("/community/").await;
    assert_eq!(board.as_array().unwrap().len(), 1);
    assert_eq!(board[0]["name"], "Beta");
}

#[tokio::test]
async fn test_join_unknown_community_succeeds() {
    let ctx = TestContext::new();

    let user = ctx.user("a@example.com").await;
    ctx.award(user.id, &[50]).await;
    let unknown = Uuid::new_v4();

    let (status, body) = ctx
        .post(&format!("/user/{}/join/{}", user.id, unknown))
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["communityId"], json!(unknown));

    let stored = ctx.store.find_user(user.id).await.unwrap().unwrap();
    assert_eq!(stored.community_id, Some(unknown));

    let (_, board) = ctx.get("/community/").await;
    assert_eq!(board, json!([]));
}

#[tokio::test]
async fn test_join_unknown_user_is_not_found() {
    let ctx = TestContext::new();
    let alpha = ctx.community("Alpha").await;

    let (status, body) = ctx
        .post(&format!("/user/{}/join/{}", Uuid::new_v4(), alpha.id))
        .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "User not found.");
}

#[tokio::test]
async fn test_leave_clears_membership_for_any_community_id() {
    let ctx = TestContext::new();

    let alpha = ctx.community("Alpha").await;
    let user = ctx.member("a@example.com", alpha.id, &[9]).await;

    let (status, body) = ctx
        .delete(&format!("/user/{}/leave/{}", user.id, Uuid::new_v4()))
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["communityId"], json!(null));

    let (_, board) = ctx.get("/community/").await;
    assert_eq!(board, json!([]));
}

#[tokio::test]
async fn test_leave_without_membership_is_noop() {
    let ctx = TestContext::new();
    let user = ctx.user("a@example.com").await;

    let (status, body) = ctx
        .delete(&format!("/user/{}/leave/{}", user.id, Uuid::new_v4()))
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["communityId"], json!(null));
}

#[tokio::test]
async fn test_leave_unknown_user_is_not_found() {
    let ctx = TestContext::new();

    let (status, _) = ctx
        .delete(&format!("/user/{}/leave/{}", Uuid::new_v4(), Uuid::new_v4()))
        .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_malformed_ids_are_bad_request() {
    let ctx = TestContext::new();
    let user = ctx.user("a@example.com").await;

    for (status, body) in [
        ctx.get("/user/not-a-uuid").await,
        ctx.get("/community/42").await,
        ctx.post(&format!("/user/{}/join/nope", user.id)).await,
        ctx.delete(&format!("/user/nope/leave/{}", Uuid::new_v4()))
            .await,
    ] {
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "Wrong input data. Please try again.");
    }
}

#[tokio::test]
async fn test_get_user_returns_history_and_total() {
    let ctx = TestContext::new();
    let user = ctx.user("a@example.com").await;
    ctx.award(user.id, &[10, -3]).await;

    let (status, body) = ctx.get(&format!("/user/{}", user.id)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["email"], "a@example.com");
    assert_eq!(body["experiencePoints"].as_array().unwrap().len(), 2);
    assert_eq!(body["experiencePoints"][1]["points"], -3);
    assert_eq!(body["totalExperience"], 7);
    assert!(body.get("passwordHash").is_none());
}

#[tokio::test]
async fn test_get_missing_user_and_community() {
    let ctx = TestContext::new();

    let (status, body) = ctx.get(&format!("/user/{}", Uuid::new_v4())).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "User not found.");

    let (status, body) = ctx.get(&format!("/community/{}", Uuid::new_v4())).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Community not found");
}

#[tokio::test]
async fn test_get_community() {
    let ctx = TestContext::new();
    let alpha = ctx.community("Alpha").await;

    let (status, body) = ctx.get(&format!("/community/{}", alpha.id)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Alpha");
    assert_eq!(body["id"], json!(alpha.id));
}

#[tokio::test]
async fn test_list_users_reports_totals_including_zero() {
    let ctx = TestContext::new();
    let active = ctx.user("active@example.com").await;
    ctx.user("idle@example.com").await;
    ctx.award(active.id, &[4, 6]).await;

    for uri in ["/user/", "/user"] {
        let (status, body) = ctx.get(uri).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!([
                {
                    "id": active.id,
                    "email": "active@example.com",
                    "profilePicture": null,
                    "totalExperience": 10
                },
                {
                    "id": body[1]["id"],
                    "email": "idle@example.com",
                    "profilePicture": null,
                    "totalExperience": 0
                }
            ])
        );
    }
}

#[tokio::test]
async fn test_create_community_and_user() {
    let ctx = TestContext::new();

    let (status, community) = ctx
        .post_json("/community/", json!({ "name": "Alpha Team", "logo": "https://example.com/a.png" }))
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(community["name"], "Alpha Team");
    assert_eq!(community["logo"], "https://example.com/a.png");

    let (status, user) = ctx
        .post_json(
            "/user/",
            json!({ "email": "ada@example.com", "password": "correct horse" }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(user["email"], "ada@example.com");
    assert_eq!(user["communityId"], json!(null));
    assert!(user.get("password").is_none());
    assert!(user.get("passwordHash").is_none());
}

#[tokio::test]
async fn test_create_user_duplicate_email_conflicts() {
    let ctx = TestContext::new();
    ctx.user("ada@example.com").await;

    let (status, body) = ctx
        .post_json(
            "/user/",
            json!({ "email": "ada@example.com", "password": "correct horse" }),
        )
        .await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "conflict");
}

#[tokio::test]
async fn test_create_validation_failures() {
    let ctx = TestContext::new();

    let (status, body) = ctx
        .post_json("/user/", json!({ "email": "not-an-email", "password": "short" }))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "validation_error");
    assert_eq!(body["details"].as_array().unwrap().len(), 2);

    let (status, _) = ctx.post_json("/community/", json!({ "name": "" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = ctx
        .post_json("/community/", json!({ "name": "x".repeat(101) }))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = ctx.post_json("/community/", json!({ "logo": 7 })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "bad_request");
}

#[tokio::test]
async fn test_record_experience() {
    let ctx = TestContext::new();
    let user = ctx.user("a@example.com").await;

    let (status, event) = ctx
        .post_json(
            &format!("/user/{}/experience", user.id),
            json!({ "points": 25, "timestamp": "2025-03-01T12:00:00Z" }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(event["points"], 25);
    assert_eq!(event["timestamp"], "2025-03-01T12:00:00Z");

    let (status, _) = ctx
        .post_json(&format!("/user/{}/experience", user.id), json!({ "points": 5 }))
        .await;
    assert_eq!(status, StatusCode::CREATED);

    let (_, detail) = ctx.get(&format!("/user/{}", user.id)).await;
    assert_eq!(detail["totalExperience"], 30);

    let (status, _) = ctx
        .post_json(
            &format!("/user/{}/experience", Uuid::new_v4()),
            json!({ "points": 5 }),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_record_experience_rejects_out_of_range_points() {
    let ctx = TestContext::new();
    let user = ctx.user("a@example.com").await;
    let uri = format!("/user/{}/experience", user.id);

    for points in [i64::MAX, 1_000_000_001, -1_000_000_001] {
        let (status, body) = ctx.post_json(&uri, json!({ "points": points })).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "validation_error");
    }

    let (status, _) = ctx
        .post_json(&uri, json!({ "points": 1_000_000_000 }))
        .await;
    assert_eq!(status, StatusCode::CREATED);

    let (_, detail) = ctx.get(&format!("/user/{}", user.id)).await;
    assert_eq!(detail["experiencePoints"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_extreme_stored_totals_do_not_overflow() {
    let ctx = TestContext::new();

    let whales = ctx.community("Whales").await;
    let a = ctx.member("a@example.com", whales.id, &[i64::MAX, 1]).await;
    ctx.member("b@example.com", whales.id, &[i64::MAX]).await;

    let (status, board) = ctx.get("/community/").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(board[0]["totalCommunityPoints"], i64::MAX);

    let (status, users) = ctx.get("/user/").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(users[0]["totalExperience"], i64::MAX);

    let (status, detail) = ctx.get(&format!("/user/{}", a.id)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(detail["totalExperience"], i64::MAX);
}

#[tokio::test]
async fn test_health_check() {
    let ctx = TestContext::new();

    let (status, body) = ctx.get("/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["store"], "connected");
}

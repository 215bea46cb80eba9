use super::helpers::{
    create_review, expect_status, json_request, profile_image_request, read_json, register, send,
    spawn_app,
};
use axum::http::StatusCode;
use reviewtwits_api::{
    domain::social::repository::FollowRepository,
    infrastructure::storage::traits::FileOwnerType,
};
use serde_json::{Value, json};

#[tokio::test]
async fn test_reaction_add_replace_and_remove() {
    let test = spawn_app().await;
    let author = register(&test.app, "reviewer").await;
    let fan = register(&test.app, "fan").await;
    let review = create_review(&test.app, &author.token, "Sneakers").await;
    let review_id = review["id"].as_i64().unwrap();
    let uri = format!("/api/v1/reviews/{}/reactions", review_id);

    let req = json_request("POST", &uri, Some(&fan.token), Some(json!({ "kind": "love" })));
    let res = expect_status(send(&test.app, req).await, StatusCode::OK).await;
    let reactions: Value = read_json(res).await;
    assert_eq!(reactions, json!([{ "kind": "LOVE", "count": 1, "is_reacted": true }]));
    assert_eq!(test.store.review(review_id).unwrap().reaction_count, 1);

    let req = json_request("POST", &uri, Some(&fan.token), Some(json!({ "kind": "COOL" })));
    let res = expect_status(send(&test.app, req).await, StatusCode::OK).await;
    let reactions: Value = read_json(res).await;
    assert_eq!(reactions, json!([{ "kind": "COOL", "count": 1, "is_reacted": true }]));
    assert_eq!(test.store.reaction_rows(fan.id, review_id), 1);
    assert_eq!(test.store.review(review_id).unwrap().reaction_count, 1);

    let res = send(&test.app, json_request("GET", &uri, None, None)).await;
    let anonymous: Value = read_json(expect_status(res, StatusCode::OK).await).await;
    assert_eq!(anonymous[0]["is_reacted"], false);

    let res = send(&test.app, json_request("DELETE", &uri, Some(&fan.token), None)).await;
    expect_status(res, StatusCode::NO_CONTENT).await;
    assert_eq!(test.store.reaction_rows(fan.id, review_id), 0);
    assert_eq!(test.store.review(review_id).unwrap().reaction_count, 0);

    let res = send(&test.app, json_request("DELETE", &uri, Some(&fan.token), None)).await;
    expect_status(res, StatusCode::NOT_FOUND).await;
}

#[tokio::test]
async fn test_reaction_rejects_unknown_kind() {
    let test = spawn_app().await;
    let author = register(&test.app, "picky").await;
    let review = create_review(&test.app, &author.token, "Socks").await;

    let req = json_request(
        "POST",
        &format!("/api/v1/reviews/{}/reactions", review["id"]),
        Some(&author.token),
        Some(json!({ "kind": "HEART" })),
    );
    expect_status(send(&test.app, req).await, StatusCode::BAD_REQUEST).await;
    assert_eq!(
        test.store
            .review(review["id"].as_i64().unwrap())
            .unwrap()
            .reaction_count,
        0
    );
}

#[tokio::test]
async fn test_scrap_toggle_conflicts() {
    let test = spawn_app().await;
    let author = register(&test.app, "scrapped").await;
    let collector = register(&test.app, "collector").await;
    let review = create_review(&test.app, &author.token, "Bookshelf").await;
    let uri = format!("/api/v1/reviews/{}/scrap", review["id"]);

    let res = send(&test.app, json_request("POST", &uri, Some(&collector.token), None)).await;
    let body: Value = read_json(expect_status(res, StatusCode::OK).await).await;
    assert_eq!(body["is_scrapped"], true);

    let res = send(&test.app, json_request("POST", &uri, Some(&collector.token), None)).await;
    expect_status(res, StatusCode::CONFLICT).await;

    let res = send(
        &test.app,
        json_request("GET", "/api/v1/me/scraps", Some(&collector.token), None),
    )
    .await;
    let scraps: Value = read_json(expect_status(res, StatusCode::OK).await).await;
    assert_eq!(scraps.as_array().unwrap().len(), 1);
    assert_eq!(scraps[0]["is_scrapped"], true);

    let res = send(
        &test.app,
        json_request(
            "GET",
            &format!("/api/v1/reviews/{}", review["id"]),
            Some(&collector.token),
            None,
        ),
    )
    .await;
    let viewed: Value = read_json(expect_status(res, StatusCode::OK).await).await;
    assert_eq!(viewed["is_scrapped"], true);

    let res = send(&test.app, json_request("DELETE", &uri, Some(&collector.token), None)).await;
    let body: Value = read_json(expect_status(res, StatusCode::OK).await).await;
    assert_eq!(body["is_scrapped"], false);

    let res = send(&test.app, json_request("DELETE", &uri, Some(&collector.token), None)).await;
    expect_status(res, StatusCode::CONFLICT).await;
}

#[tokio::test]
async fn test_follow_back_flags_stay_in_sync() {
    let test = spawn_app().await;
    let alice = register(&test.app, "alice").await;
    let bob = register(&test.app, "bob").await;

    let req = json_request(
        "POST",
        &format!("/api/v1/users/{}/follow", bob.account_id),
        Some(&alice.token),
        None,
    );
    let res = expect_status(send(&test.app, req).await, StatusCode::CREATED).await;
    let body: Value = read_json(res).await;
    assert_eq!(body["follow_back"], false);

    let req = json_request(
        "POST",
        &format!("/api/v1/users/{}/follow", alice.account_id),
        Some(&bob.token),
        None,
    );
    let res = expect_status(send(&test.app, req).await, StatusCode::CREATED).await;
    let body: Value = read_json(res).await;
    assert_eq!(body["follow_back"], true);
    assert!(test.store.follow_edge(alice.id, bob.id).unwrap().follow_back_flag);
    assert!(test.store.follow_edge(bob.id, alice.id).unwrap().follow_back_flag);

    let req = json_request(
        "DELETE",
        &format!("/api/v1/users/{}/follow", alice.account_id),
        Some(&bob.token),
        None,
    );
    expect_status(send(&test.app, req).await, StatusCode::NO_CONTENT).await;
    assert!(test.store.follow_edge(bob.id, alice.id).is_none());
    let remaining = test.store.follow_edge(alice.id, bob.id).unwrap();
    assert!(!remaining.follow_back_flag);

    let res = send(
        &test.app,
        json_request(
            "GET",
            &format!("/api/v1/users/{}/followers", bob.account_id),
            None,
            None,
        ),
    )
    .await;
    let followers: Value = read_json(expect_status(res, StatusCode::OK).await).await;
    assert_eq!(followers.as_array().unwrap().len(), 1);
    assert_eq!(followers[0]["account_id"], alice.account_id.as_str());
}

#[tokio::test]
async fn test_unfollow_with_edge_read_before_back_follow_clears_flag() {
    let test = spawn_app().await;
    let gina = register(&test.app, "gina").await;
    let hank = register(&test.app, "hank").await;

    let req = json_request(
        "POST",
        &format!("/api/v1/users/{}/follow", hank.account_id),
        Some(&gina.token),
        None,
    );
    expect_status(send(&test.app, req).await, StatusCode::CREATED).await;
    let stale = test.store.follow_edge(gina.id, hank.id).unwrap();
    assert!(!stale.follow_back_flag);

    let req = json_request(
        "POST",
        &format!("/api/v1/users/{}/follow", gina.account_id),
        Some(&hank.token),
        None,
    );
    expect_status(send(&test.app, req).await, StatusCode::CREATED).await;
    assert!(test.store.follow_edge(hank.id, gina.id).unwrap().follow_back_flag);

    FollowRepository::delete(&*test.store, &stale).await.unwrap();
    assert!(test.store.follow_edge(gina.id, hank.id).is_none());
    assert!(!test.store.follow_edge(hank.id, gina.id).unwrap().follow_back_flag);

    // The flag of a new edge comes from the stored reverse edge.
    let edge = FollowRepository::create(&*test.store, gina.id, hank.id)
        .await
        .unwrap();
    assert!(edge.follow_back_flag);
    assert!(test.store.follow_edge(hank.id, gina.id).unwrap().follow_back_flag);
}

#[tokio::test]
async fn test_follow_rejects_duplicates_self_and_strangers() {
    let test = spawn_app().await;
    let carol = register(&test.app, "carol").await;
    let dave = register(&test.app, "dave").await;
    let follow_dave = format!("/api/v1/users/{}/follow", dave.account_id);

    let res = send(&test.app, json_request("POST", &follow_dave, Some(&carol.token), None)).await;
    expect_status(res, StatusCode::CREATED).await;
    let res = send(&test.app, json_request("POST", &follow_dave, Some(&carol.token), None)).await;
    expect_status(res, StatusCode::CONFLICT).await;

    let req = json_request(
        "POST",
        &format!("/api/v1/users/{}/follow", carol.account_id),
        Some(&carol.token),
        None,
    );
    expect_status(send(&test.app, req).await, StatusCode::BAD_REQUEST).await;

    let req = json_request(
        "DELETE",
        &format!("/api/v1/users/{}/follow", carol.account_id),
        Some(&dave.token),
        None,
    );
    expect_status(send(&test.app, req).await, StatusCode::CONFLICT).await;

    let req = json_request(
        "POST",
        "/api/v1/users/ghost@example.com/follow",
        Some(&carol.token),
        None,
    );
    expect_status(send(&test.app, req).await, StatusCode::NOT_FOUND).await;

    let res = send(
        &test.app,
        json_request(
            "GET",
            &format!("/api/v1/users/{}/followings", carol.account_id),
            None,
            None,
        ),
    )
    .await;
    let followings: Value = read_json(expect_status(res, StatusCode::OK).await).await;
    assert_eq!(followings[0]["account_id"], dave.account_id.as_str());
}

#[tokio::test]
async fn test_login_and_profile_image() {
    let test = spawn_app().await;
    let erin = register(&test.app, "erin").await;

    let req = json_request(
        "POST",
        "/api/v1/auth/login",
        None,
        Some(json!({ "account_id": erin.account_id, "password": "wrong-password" })),
    );
    expect_status(send(&test.app, req).await, StatusCode::UNAUTHORIZED).await;

    let req = json_request(
        "POST",
        "/api/v1/auth/login",
        None,
        Some(json!({ "account_id": erin.account_id, "password": "password123" })),
    );
    let res = expect_status(send(&test.app, req).await, StatusCode::OK).await;
    let login: Value = read_json(res).await;
    let token = login["token"].as_str().unwrap().to_string();

    let res = send(&test.app, profile_image_request(&token)).await;
    let first: Value = read_json(expect_status(res, StatusCode::OK).await).await;
    let first_image = first["profile_image"].as_str().unwrap().to_string();

    let res = send(&test.app, profile_image_request(&token)).await;
    let second: Value = read_json(expect_status(res, StatusCode::OK).await).await;
    assert_ne!(second["profile_image"], first_image.as_str());
    assert_eq!(test.store.file_names(FileOwnerType::User, erin.id).len(), 1);

    let res = send(&test.app, json_request("GET", "/api/v1/auth/me", Some(&token), None)).await;
    let me: Value = read_json(expect_status(res, StatusCode::OK).await).await;
    assert_eq!(me["profile_image"], second["profile_image"]);

    let res = send(
        &test.app,
        json_request("GET", "/api/v1/auth/me", Some("not-a-token"), None),
    )
    .await;
    expect_status(res, StatusCode::UNAUTHORIZED).await;
}

#[tokio::test]
async fn test_register_rejects_duplicate_account() {
    let test = spawn_app().await;
    let frank = register(&test.app, "frank").await;

    let req = json_request(
        "POST",
        "/api/v1/auth/register",
        None,
        Some(json!({
            "account_id": frank.account_id,
            "password": "password123",
            "nickname": "frank2",
        })),
    );
    expect_status(send(&test.app, req).await, StatusCode::CONFLICT).await;
}

mod common;

use axum::http::StatusCode;
use serde_json::json;

use classyfyed::modules::users::model::Role;
use common::{build_test_app, get, mit_college, request_with_auth, seed_actor};

#[tokio::test]
async fn test_list_colleges_is_public() {
    let app = build_test_app();
    app.store.seed_college(mit_college());

    let (status, body) = get(&app, "/api/colleges").await;

    assert_eq!(status, StatusCode::OK);
    let colleges = body.as_array().unwrap();
    assert_eq!(colleges.len(), 1);
    assert_eq!(colleges[0]["short_code"], json!("MIT"));
}

#[tokio::test]
async fn test_list_colleges_search_filters_by_name() {
    let app = build_test_app();
    app.store.seed_college(mit_college());

    let (status, body) = get(&app, "/api/colleges?search=institute").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 1);

    let (status, body) = get(&app, "/api/colleges?search=oxford").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_create_college_requires_privileged_role() {
    let app = build_test_app();
    let dto = json!({
        "name": "Stanford University",
        "short_code": "STAN",
        "email_extensions": ["stanford.edu"]
    });

    let (status, _) =
        request_with_auth(&app, "POST", "/api/colleges", None, Some(dto.clone())).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let student = seed_actor(&app, "student@mit.edu", Role::Student);
    let (status, _) =
        request_with_auth(&app, "POST", "/api/colleges", Some(&student), Some(dto.clone())).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let admin = seed_actor(&app, "admin@classyfyed.com", Role::Admin);
    let (status, body) =
        request_with_auth(&app, "POST", "/api/colleges", Some(&admin), Some(dto)).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["short_code"], json!("STAN"));
    assert_eq!(body["email_extensions"], json!(["stanford.edu"]));
}

#[tokio::test]
async fn test_create_college_duplicate_short_code_rejected() {
    let app = build_test_app();
    app.store.seed_college(mit_college());
    let admin = seed_actor(&app, "admin@classyfyed.com", Role::Admin);

    let (status, body) = request_with_auth(
        &app,
        "POST",
        "/api/colleges",
        Some(&admin),
        Some(json!({
            "name": "Another MIT",
            "short_code": "MIT",
            "email_extensions": []
        })),
    )
    .await;

    // Duplicate keys are conflicts, same as a duplicate registration email.
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(
        body["message"],
        json!("College shortcode already exists")
    );
}

#[tokio::test]
async fn test_update_college_partial_fields() {
    let app = build_test_app();
    let college = mit_college();
    let id = college.id;
    app.store.seed_college(college);
    let token = seed_actor(&app, "registrar@mit.edu", Role::College);

    let (status, body) = request_with_auth(
        &app,
        "PUT",
        &format!("/api/colleges/{id}"),
        Some(&token),
        Some(json!({"email_extensions": ["mit.edu", "alum.mit.edu"]})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    // Unspecified fields keep their prior values.
    assert_eq!(
        body["name"],
        json!("Massachusetts Institute of Technology")
    );
    assert_eq!(body["email_extensions"], json!(["mit.edu", "alum.mit.edu"]));
}

#[tokio::test]
async fn test_update_unknown_college_not_found() {
    let app = build_test_app();
    let token = seed_actor(&app, "admin@classyfyed.com", Role::Admin);

    let (status, _) = request_with_auth(
        &app,
        "PUT",
        &format!("/api/colleges/{}", uuid::Uuid::new_v4()),
        Some(&token),
        Some(json!({"name": "Ghost College"})),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_college() {
    let app = build_test_app();
    let college = mit_college();
    let id = college.id;
    app.store.seed_college(college);
    let admin = seed_actor(&app, "admin@classyfyed.com", Role::Admin);

    let (status, _) = request_with_auth(
        &app,
        "DELETE",
        &format!("/api/colleges/{id}"),
        Some(&admin),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = get(&app, "/api/colleges").await;
    assert!(body.as_array().unwrap().is_empty());

    // Second delete reports the record missing.
    let (status, _) = request_with_auth(
        &app,
        "DELETE",
        &format!("/api/colleges/{id}"),
        Some(&admin),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_college_writes_reject_garbage_token() {
    let app = build_test_app();

    let (status, _) = request_with_auth(
        &app,
        "POST",
        "/api/colleges",
        Some("not-a-real-token"),
        Some(json!({"name": "X", "short_code": "X", "email_extensions": []})),
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
}
